// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use crate::{Decode, Encode, Error, Result};

/// A plain unsigned integer register word.
///
/// Wrapping encode truncates toward zero and keeps the low 32 bits of the
/// two's complement integer; checked encode accepts only whole numbers in
/// `0..=u32::MAX`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RawWord;

impl Decode for RawWord {
    fn decode(&self, raw: u32) -> f64 {
        f64::from(raw)
    }
}

impl Encode for RawWord {
    fn encode(&self, value: f64) -> u32 {
        value as i64 as u32
    }

    fn encode_checked(&self, value: f64) -> Result<u32> {
        if value.fract() != 0.0 || !(0.0..=f64::from(u32::MAX)).contains(&value) {
            return Err(Error::RawOutOfRange(value));
        }
        Ok(value as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap() {
        assert_eq!(RawWord.encode(100.0), 100);
        assert_eq!(RawWord.encode(1.5), 1);
        assert_eq!(RawWord.encode(-1.0), 0xFFFF_FFFF);
        assert_eq!(RawWord.encode(1e12), 0xD4A5_1000);
    }

    #[test]
    fn test_checked() {
        assert_eq!(RawWord.encode_checked(0.0), Ok(0));
        assert_eq!(RawWord.encode_checked(4_294_967_295.0), Ok(u32::MAX));
        for value in [-1.0, 1.5, 4_294_967_296.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(RawWord.encode_checked(value), Err(Error::RawOutOfRange(_))),
                "{value}"
            );
        }
    }

    #[test]
    fn test_decode() {
        assert_eq!(RawWord.decode(0xFFFF_FFFF), 4_294_967_295.0);
    }
}
