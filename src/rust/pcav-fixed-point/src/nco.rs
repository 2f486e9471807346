// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use crate::{Encode, Error, Result};

/// Angle that corresponds to one full period of the NCO phase word.
pub const NCO_REFERENCE: f64 = 1.7e7;

/// The phase accumulator ignores the low bits of the 32-bit scaled angle.
pub const NCO_SHIFT: u32 = 6;

const FULL_PERIOD: f64 = 4_294_967_296.0; // 2^32

/// The NCO phase-adjust word.
///
/// The angle (in the device unit) is scaled so that [`NCO_REFERENCE`] spans `2^32`,
/// truncated, shifted right by [`NCO_SHIFT`] with sign extension and cut to the low
/// 32 bits. The word is write-only, so there is no [`Decode`](crate::Decode)
/// implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NcoAngleWord;

impl Encode for NcoAngleWord {
    fn encode(&self, angle: f64) -> u32 {
        let scaled = ((angle / NCO_REFERENCE) * FULL_PERIOD) as i64;
        (scaled >> NCO_SHIFT) as u32
    }

    fn encode_checked(&self, angle: f64) -> Result<u32> {
        if !angle.is_finite() || angle.abs() > NCO_REFERENCE {
            return Err(Error::NcoAngleOutOfRange(angle));
        }
        Ok(self.encode(angle))
    }
}
