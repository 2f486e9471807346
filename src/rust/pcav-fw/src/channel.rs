// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Validated cavity, probe and waveform indices.

use std::fmt;

use crate::table::TableKey;
use crate::{Error, Result};

pub const CAVITY_COUNT: usize = 2;
pub const PROBE_COUNT: usize = 2;
pub const WAVEFORM_SELECT_COUNT: usize = 4;

/// What an out-of-range index was meant to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    Cavity,
    Probe,
    Waveform,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Cavity => f.write_str("cavity"),
            IndexKind::Probe => f.write_str("probe"),
            IndexKind::Waveform => f.write_str("waveform"),
        }
    }
}

macro_rules! bounded_index {
    ($(#[$meta:meta])* $ident:ident, $count:expr, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $ident(u8);

        impl $ident {
            pub const fn from_index(index: usize) -> Option<Self> {
                if index < $count {
                    Some(Self(index as u8))
                } else {
                    None
                }
            }

            /// Validate a caller-supplied index.
            pub fn new(index: usize) -> Result<Self> {
                Self::from_index(index).ok_or(Error::IndexOutOfRange {
                    kind: $kind,
                    index,
                    limit: $count,
                })
            }

            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl TableKey for $ident {
            const COUNT: usize = $count;

            fn position(self) -> usize {
                self.index()
            }

            fn all() -> impl Iterator<Item = Self> {
                (0..$count as u8).map(Self)
            }
        }
    };
}

bounded_index!(
    /// One of the two cavities.
    Cavity,
    CAVITY_COUNT,
    IndexKind::Cavity
);
bounded_index!(
    /// One of the two probes of a cavity.
    Probe,
    PROBE_COUNT,
    IndexKind::Probe
);
bounded_index!(
    /// A waveform data selector slot.
    WaveformSlot,
    WAVEFORM_SELECT_COUNT,
    IndexKind::Waveform
);

/// A probe of a specific cavity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Channel {
    pub cavity: Cavity,
    pub probe: Probe,
}

impl Channel {
    /// Validate a `(cavity, probe)` pair, cavity first.
    pub fn new(cavity: usize, probe: usize) -> Result<Self> {
        Ok(Channel {
            cavity: Cavity::new(cavity)?,
            probe: Probe::new(probe)?,
        })
    }
}

impl TableKey for Channel {
    const COUNT: usize = CAVITY_COUNT * PROBE_COUNT;

    fn position(self) -> usize {
        self.cavity.index() * PROBE_COUNT + self.probe.index()
    }

    fn all() -> impl Iterator<Item = Self> {
        Cavity::all().flat_map(|cavity| Probe::all().map(move |probe| Channel { cavity, probe }))
    }
}
