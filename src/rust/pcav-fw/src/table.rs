// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use std::marker::PhantomData;

/// A key with a dense, fixed set of values.
pub trait TableKey: Copy {
    const COUNT: usize;

    /// Position of the key in [`TableKey::all`].
    fn position(self) -> usize;

    fn all() -> impl Iterator<Item = Self>;
}

/// A fixed-size table with one entry per key, filled once at construction.
#[derive(Debug)]
pub(crate) struct Table<K, T> {
    cells: Vec<T>,
    key: PhantomData<K>,
}

impl<K: TableKey, T> Table<K, T> {
    /// Build the table by calling `f` once for every key, stopping at the first error.
    pub(crate) fn try_build<E>(f: impl FnMut(K) -> Result<T, E>) -> Result<Self, E> {
        let cells = K::all().map(f).collect::<Result<Vec<_>, E>>()?;
        debug_assert_eq!(cells.len(), K::COUNT);
        Ok(Table {
            cells,
            key: PhantomData,
        })
    }

    pub(crate) fn get(&self, key: K) -> &T {
        &self.cells[key.position()]
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Color {
        Red,
        Green,
        Blue,
    }

    impl TableKey for Color {
        const COUNT: usize = 3;

        fn position(self) -> usize {
            self as usize
        }

        fn all() -> impl Iterator<Item = Self> {
            [Color::Red, Color::Green, Color::Blue].into_iter()
        }
    }

    #[test]
    fn test_lookup() {
        let table: Table<Color, String> =
            Table::try_build(|c| Ok::<_, ()>(format!("{c:?}"))).unwrap();
        assert_eq!(table.get(Color::Green), "Green");
        assert_eq!(table.values().count(), 3);
    }

    #[test]
    fn test_build_stops_at_first_error() {
        let mut visited = vec![];
        let result: Result<Table<Color, ()>, Color> = Table::try_build(|c| {
            visited.push(c);
            if c == Color::Green { Err(c) } else { Ok(()) }
        });
        assert_eq!(result.unwrap_err(), Color::Green);
        assert_eq!(visited, [Color::Red, Color::Green]);
    }
}
