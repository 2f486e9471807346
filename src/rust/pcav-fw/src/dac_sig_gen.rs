// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! DAC signal generator with one I and one Q waveform table.

use pcav_log::{info, warn};

use crate::binding::Binding;
use crate::catalog::{Access, Encoding};
use crate::register::{Register, RegisterSpace};
use crate::{Error, Result};

/// Length of each waveform table.
pub const MAX_SAMPLES: usize = 4096;

/// Default location of the signal generator in the register tree.
pub const DAC_SIG_GEN_PATH: &str = "mmio/AppTop/DacSigGen";

/// Register names below [`DAC_SIG_GEN_PATH`], in resolution order.
pub const DAC_SIG_GEN_REGISTERS: [&str; 6] = [
    "EnableMask",
    "ModeMask",
    "SignFormat",
    "PeriodSize",
    "Waveform[0]/MemoryArray",
    "Waveform[1]/MemoryArray",
];

const ENABLE_I_AND_Q: u32 = 0x03;
const MODE_TRIGGERED: u32 = 0x00;
const SIGN_TWOS_COMPLEMENT: u32 = 0x00;
const FULL_SCALE: f64 = 0x7fff as f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaveformChannel {
    I,
    Q,
}

/// Convert a sample in `[-1, 1]` to a 16-bit two's complement DAC word.
///
/// Samples outside the range saturate at the 16-bit limits.
pub fn dac_word(sample: f64) -> u16 {
    (sample * FULL_SCALE) as i16 as u16
}

/// Number of samples that do not map to their DAC word: beyond full scale or not finite.
fn clipped_samples(samples: &[f64]) -> usize {
    samples
        .iter()
        .filter(|s| !s.is_finite() || s.abs() > 1.0)
        .count()
}

#[derive(Debug)]
pub struct DacSigGen<R> {
    enable_mask: Binding<R>,
    mode_mask: Binding<R>,
    sign_format: Binding<R>,
    period_size: Binding<R>,
    i_waveform: Binding<R>,
    q_waveform: Binding<R>,
}

impl<R: Register> DacSigGen<R> {
    /// Resolve the generator at [`DAC_SIG_GEN_PATH`] and configure it.
    pub fn new<S>(space: &S) -> Result<Self>
    where
        S: RegisterSpace<Register = R> + ?Sized,
    {
        Self::with_root(space, DAC_SIG_GEN_PATH)
    }

    /// Resolve the generator below `root` and configure it for triggered I/Q playback
    /// of signed tables of [`MAX_SAMPLES`] samples.
    pub fn with_root<S>(space: &S, root: &str) -> Result<Self>
    where
        S: RegisterSpace<Register = R> + ?Sized,
    {
        let [enable_mask, mode_mask, sign_format, period_size, i_waveform, q_waveform] =
            DAC_SIG_GEN_REGISTERS;
        let bind =
            |name: &str| Binding::resolve(space, root, name, Access::ReadWrite, Encoding::Raw);
        let generator = DacSigGen {
            enable_mask: bind(enable_mask)?,
            mode_mask: bind(mode_mask)?,
            sign_format: bind(sign_format)?,
            period_size: bind(period_size)?,
            i_waveform: bind(i_waveform)?,
            q_waveform: bind(q_waveform)?,
        };

        generator.enable_mask.write_raw(ENABLE_I_AND_Q)?;
        generator.mode_mask.write_raw(MODE_TRIGGERED)?;
        generator.sign_format.write_raw(SIGN_TWOS_COMPLEMENT)?;
        generator.period_size.write_raw(MAX_SAMPLES as u32)?;
        info!("Configured DAC signal generator below '{}'", root);
        Ok(generator)
    }

    /// Load a waveform table. `samples` must hold exactly [`MAX_SAMPLES`] values.
    pub fn set_waveform(&self, channel: WaveformChannel, samples: &[f64]) -> Result<()> {
        if samples.len() != MAX_SAMPLES {
            return Err(Error::BufferSize {
                expected: MAX_SAMPLES,
                actual: samples.len(),
            });
        }
        let clipped = clipped_samples(samples);
        if clipped > 0 {
            warn!(
                "{} samples of the {:?} waveform are not finite or exceed full scale",
                clipped,
                channel
            );
        }
        let words: Vec<u32> = samples.iter().map(|&s| u32::from(dac_word(s))).collect();
        let table = match channel {
            WaveformChannel::I => &self.i_waveform,
            WaveformChannel::Q => &self.q_waveform,
        };
        table.write_block(&words)
    }

    pub fn set_i_waveform(&self, samples: &[f64]) -> Result<()> {
        self.set_waveform(WaveformChannel::I, samples)
    }

    pub fn set_q_waveform(&self, samples: &[f64]) -> Result<()> {
        self.set_waveform(WaveformChannel::Q, samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dac_word() {
        assert_eq!(dac_word(0.0), 0);
        assert_eq!(dac_word(1.0), 0x7fff);
        assert_eq!(dac_word(-1.0), 0x8001);
        assert_eq!(dac_word(0.5), 0x3fff);
        assert_eq!(dac_word(-0.5), 0xc001);
    }

    #[test]
    fn test_dac_word_saturates() {
        assert_eq!(dac_word(2.0), 0x7fff);
        assert_eq!(dac_word(-2.0), 0x8000);
        assert_eq!(dac_word(f64::NAN), 0);
    }

    #[test]
    fn test_clipped_samples() {
        assert_eq!(clipped_samples(&[0.0, 1.0, -1.0, 0.25]), 0);
        assert_eq!(clipped_samples(&[1.5, -2.0, 0.5]), 2);
        assert_eq!(
            clipped_samples(&[f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 0.0]),
            3
        );
    }
}
