// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Conversion between raw register words and physical values.
//!
//! Register words are unsigned 32-bit values of which only the low `W` bits carry
//! data. A [`FixedPointFormat`] describes how those bits map to a floating point
//! number, while [`NcoAngleWord`] covers the write-only oscillator phase word.
//!
//! Formats that can be read back implement [`Decode`], formats that can be written
//! implement [`Encode`]. Encoding wraps silently by default, as the hardware does;
//! [`EncodePolicy::Strict`] rejects values outside the representable range.
//!
//! # Examples
//! ```rust
//! use pcav_fixed_point::{Decode, Encode, formats};
//!
//! assert_eq!(formats::S18_17.decode(0x0002_0000), -1.0);
//! assert_eq!(formats::S18_17.encode(0.5), 0x0001_0000);
//! ```

mod format;
pub mod formats;
mod nco;
mod policy;
mod raw;

pub use format::{Divisor, FixedPointFormat};
pub use nco::{NCO_REFERENCE, NCO_SHIFT, NcoAngleWord};
pub use policy::EncodePolicy;
pub use raw::RawWord;

/// Formats that can be decoded from a raw register word.
pub trait Decode {
    /// Decode the raw register word into a physical value.
    fn decode(&self, raw: u32) -> f64;

    /// Decode and multiply by `scale`, e.g. 180 to get degrees from a half-turn fraction.
    fn decode_scaled(&self, raw: u32, scale: f64) -> f64 {
        self.decode(raw) * scale
    }
}

/// Formats that can be encoded into a raw register word.
pub trait Encode {
    /// Encode without range checks. Out-of-range values wrap.
    fn encode(&self, value: f64) -> u32;

    /// Encode, failing if the value is not representable.
    fn encode_checked(&self, value: f64) -> Result<u32>;
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("Invalid fixed-point format {width}.{fraction}")]
    InvalidFormat { width: u32, fraction: u32 },

    #[error("Value {value} is not representable in {format}")]
    Overflow {
        value: f64,
        format: FixedPointFormat,
    },

    #[error("NCO angle {0} exceeds one period ({max})", max = NCO_REFERENCE)]
    NcoAngleOutOfRange(f64),

    #[error("Value {0} is not a 32-bit unsigned integer")]
    RawOutOfRange(f64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
