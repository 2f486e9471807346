// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Register-map façade of the phase-cavity monitor firmware.
//!
//! The instrument measures the phase of RF signals picked up by probes in two
//! resonant cavities. Its firmware exposes configuration and measurement data as named
//! 32-bit registers; [`PcavFw`] resolves all of them from a [`RegisterSpace`] and turns
//! register words into physical values and back with the codecs of `pcav-fixed-point`.
//!
//! [`DacSigGen`] drives the companion DAC signal generator.
//!
//! With the `sim` feature (enabled by default), [`SimRegisterSpace`] provides an
//! in-memory register space.

mod binding;
pub mod catalog;
pub mod channel;
mod dac_sig_gen;
mod error;
mod pcav;
pub mod register;
mod settings;
#[cfg(feature = "sim")]
mod sim;
mod table;

pub use catalog::{
    Access, CavityQuantity, Encoding, FirmwareRevision, GlobalQuantity, ProbeQuantity, Quantity,
    Reading,
};
pub use channel::{
    CAVITY_COUNT, Cavity, Channel, IndexKind, PROBE_COUNT, Probe, WAVEFORM_SELECT_COUNT,
    WaveformSlot,
};
pub use dac_sig_gen::{
    DAC_SIG_GEN_PATH, DAC_SIG_GEN_REGISTERS, DacSigGen, MAX_SAMPLES, WaveformChannel, dac_word,
};
pub use error::{Error, IoOperation, Result};
pub use pcav::PcavFw;
pub use register::{Register, RegisterSpace};
pub use settings::FwSettings;
#[cfg(feature = "sim")]
pub use sim::{SimRegister, SimRegisterSpace};
pub use table::TableKey;

pub use pcav_fixed_point::EncodePolicy;
