// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use crate::{Encode, Result};

/// How values outside a format's range are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EncodePolicy {
    /// Truncate and keep the low register bits, like the firmware tooling always did.
    #[default]
    Wrap,
    /// Reject values that are not representable.
    Strict,
}

impl EncodePolicy {
    pub fn encode<E: Encode + ?Sized>(self, format: &E, value: f64) -> Result<u32> {
        match self {
            EncodePolicy::Wrap => Ok(format.encode(value)),
            EncodePolicy::Strict => format.encode_checked(value),
        }
    }
}
