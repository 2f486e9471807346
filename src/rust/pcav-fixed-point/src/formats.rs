// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Register formats used by the phase-cavity firmware.

use crate::{Divisor, FixedPointFormat};

/// Amplitude, phase and I/Q words.
pub const S18_17: FixedPointFormat = FixedPointFormat::signed(18, 17);

/// Calibration coefficients; unity is the largest positive word.
pub const S18_17_UNITY: FixedPointFormat =
    FixedPointFormat::signed(18, 17).with_divisor(Divisor::PowerOfTwoMinusOne);

/// DC and integrated terms.
pub const S18_16: FixedPointFormat = FixedPointFormat::signed(18, 16);

/// Output and compare phase on revised firmware.
pub const S18_15: FixedPointFormat = FixedPointFormat::signed(18, 15);

/// DC real and imaginary terms on legacy firmware.
pub const S21_19: FixedPointFormat = FixedPointFormat::signed(21, 19);

/// DC frequency count on legacy firmware.
pub const S26_0: FixedPointFormat = FixedPointFormat::signed(26, 0);

/// Extended DC frequency count on revised firmware.
pub const S32_18: FixedPointFormat = FixedPointFormat::signed(32, 18);

/// NCO phase adjustment, a fraction of a full turn.
pub const U29_29: FixedPointFormat =
    FixedPointFormat::unsigned(29, 29).with_divisor(Divisor::PowerOfTwoMinusOne);

/// Probe weights.
pub const S2_1: FixedPointFormat = FixedPointFormat::signed(2, 1);

pub const ALL: [FixedPointFormat; 9] = [
    S18_17,
    S18_17_UNITY,
    S18_16,
    S18_15,
    S21_19,
    S26_0,
    S32_18,
    U29_29,
    S2_1,
];
