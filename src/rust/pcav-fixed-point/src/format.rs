// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use num_traits::ToPrimitive;

use crate::{Decode, Encode, Error, Result};

/// Scale divisor of a fixed-point format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Divisor {
    /// `2^F`
    PowerOfTwo,
    /// `2^F - 1`, the largest positive word of an `F.F` format decodes to exactly one.
    PowerOfTwoMinusOne,
}

/// A fixed-point register format with `W` total bits of which `F` are fractional.
///
/// Decoding masks the low `W` bits of the register word, sign-extends from bit
/// `W - 1` for signed formats and divides by the [`Divisor`]. Encoding multiplies
/// by the divisor and truncates toward zero.
///
/// Invariant: `F <= W <= 32` and `W >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedPointFormat {
    width: u32,
    fraction: u32,
    signed: bool,
    divisor: Divisor,
}

impl FixedPointFormat {
    /// Signed `width.fraction` format with a `2^fraction` divisor.
    ///
    /// Panics (at compile time when used in a constant) if the widths are invalid.
    pub const fn signed(width: u32, fraction: u32) -> Self {
        assert!(Self::is_valid(width, fraction), "invalid fixed-point format");
        FixedPointFormat {
            width,
            fraction,
            signed: true,
            divisor: Divisor::PowerOfTwo,
        }
    }

    /// Unsigned `width.fraction` format with a `2^fraction` divisor.
    pub const fn unsigned(width: u32, fraction: u32) -> Self {
        assert!(Self::is_valid(width, fraction), "invalid fixed-point format");
        FixedPointFormat {
            width,
            fraction,
            signed: false,
            divisor: Divisor::PowerOfTwo,
        }
    }

    /// Fallible constructor for formats not known at compile time.
    pub fn try_new(width: u32, fraction: u32, signed: bool) -> Result<Self> {
        if !Self::is_valid(width, fraction) {
            return Err(Error::InvalidFormat { width, fraction });
        }
        Ok(FixedPointFormat {
            width,
            fraction,
            signed,
            divisor: Divisor::PowerOfTwo,
        })
    }

    /// Replace the divisor.
    ///
    /// [`Divisor::PowerOfTwoMinusOne`] requires at least one fractional bit.
    pub const fn with_divisor(self, divisor: Divisor) -> Self {
        assert!(
            !matches!(divisor, Divisor::PowerOfTwoMinusOne) || self.fraction > 0,
            "2^F - 1 divisor needs a fractional bit"
        );
        FixedPointFormat { divisor, ..self }
    }

    const fn is_valid(width: u32, fraction: u32) -> bool {
        width >= 1 && width <= 32 && fraction <= width
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn fraction(&self) -> u32 {
        self.fraction
    }

    pub const fn is_signed(&self) -> bool {
        self.signed
    }

    /// Mask selecting the data bits of a register word.
    pub const fn mask(&self) -> u32 {
        u32::MAX >> (32 - self.width)
    }

    /// The value the integer representation is divided by.
    pub fn divisor(&self) -> f64 {
        let base = (1u64 << self.fraction) as f64;
        match self.divisor {
            Divisor::PowerOfTwo => base,
            Divisor::PowerOfTwoMinusOne => base - 1.0,
        }
    }

    /// Value of the least significant bit.
    pub fn resolution(&self) -> f64 {
        1.0 / self.divisor()
    }

    /// Smallest integer representation.
    pub const fn min_integer(&self) -> i64 {
        if self.signed {
            -(1i64 << (self.width - 1))
        } else {
            0
        }
    }

    /// Largest integer representation.
    pub const fn max_integer(&self) -> i64 {
        if self.signed {
            (1i64 << (self.width - 1)) - 1
        } else {
            (1i64 << self.width) - 1
        }
    }

    pub fn min_value(&self) -> f64 {
        self.min_integer() as f64 / self.divisor()
    }

    pub fn max_value(&self) -> f64 {
        self.max_integer() as f64 / self.divisor()
    }

    /// Integer representation of a raw register word, sign-extended from bit `W - 1`.
    pub const fn to_integer(&self, raw: u32) -> i64 {
        let masked = (raw & self.mask()) as i64;
        if self.signed && masked & (1i64 << (self.width - 1)) != 0 {
            masked - (1i64 << self.width)
        } else {
            masked
        }
    }
}

impl Decode for FixedPointFormat {
    fn decode(&self, raw: u32) -> f64 {
        self.to_integer(raw) as f64 / self.divisor()
    }
}

impl Encode for FixedPointFormat {
    fn encode(&self, value: f64) -> u32 {
        // Keeps the two's complement low 32 bits, bits above `W` are not cleared.
        (value * self.divisor()).trunc() as i64 as u32
    }

    fn encode_checked(&self, value: f64) -> Result<u32> {
        let integer = (value * self.divisor()).trunc().to_i64();
        match integer {
            Some(integer) if (self.min_integer()..=self.max_integer()).contains(&integer) => {
                Ok(integer as u32)
            }
            _ => Err(Error::Overflow {
                value,
                format: *self,
            }),
        }
    }
}

impl fmt::Display for FixedPointFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.signed { "signed" } else { "unsigned" };
        write!(f, "{}.{} {}", self.width, self.fraction, sign)?;
        if self.divisor == Divisor::PowerOfTwoMinusOne {
            write!(f, " (2^{} - 1)", self.fraction)?;
        }
        Ok(())
    }
}
