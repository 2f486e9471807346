// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Logging macros for the phase-cavity crates.
//!
//! All records are emitted through the `log` facade with a `pcav.rust::<module>`
//! target so an embedding application can filter them as one group.

use std::sync::{atomic::AtomicBool, atomic::Ordering};

#[doc(hidden)]
pub use log as _log;

#[macro_export]
macro_rules! info {
    ($msg:literal, $($arg:tt)+) => {
        $crate::_log::info!(target: concat!("pcav.rust::", module_path!()), $msg, $($arg)+);
    };
    ($msg:literal) => {
        $crate::_log::info!(target: concat!("pcav.rust::", module_path!()), $msg);
    };
}

#[macro_export]
macro_rules! warn {
    ($msg:literal, $($arg:tt)+) => {
        $crate::_log::warn!(target: concat!("pcav.rust::", module_path!()), $msg, $($arg)+);
    };
    ($msg:literal) => {
        $crate::_log::warn!(target: concat!("pcav.rust::", module_path!()), $msg);
    };
}

#[macro_export]
macro_rules! error {
    ($msg:literal, $($arg:tt)+) => {
        $crate::_log::error!(target: concat!("pcav.rust::", module_path!()), $msg, $($arg)+);
    };
    ($msg:literal) => {
        $crate::_log::error!(target: concat!("pcav.rust::", module_path!()), $msg);
    };
}

/// Log a register-level trace at debug level if diagnostics logging is enabled.
#[macro_export]
macro_rules! diagnostic {
    ($msg:literal, $($arg:tt)+) => {
        if $crate::is_diagnostics_enabled() {
            $crate::_log::debug!(target: concat!("pcav.rust::", module_path!()), $msg, $($arg)+);
        }
    };
    ($msg:literal) => {
        if $crate::is_diagnostics_enabled() {
            $crate::_log::debug!(target: concat!("pcav.rust::", module_path!()), $msg);
        }
    };
}

static DIAGNOSTICS_ENABLED: AtomicBool = AtomicBool::new(false);

#[inline]
pub fn is_diagnostics_enabled() -> bool {
    DIAGNOSTICS_ENABLED.load(Ordering::Acquire)
}

/// Initialize the logging.
///
/// Meant to be called once by the embedding application. No concrete logger is
/// installed here; the application picks one for the `log` facade. This only
/// toggles the per-register trace emitted by [`diagnostic!`].
pub fn init_logging(with_diagnostics: bool) {
    DIAGNOSTICS_ENABLED.store(with_diagnostics, Ordering::Release);
}
