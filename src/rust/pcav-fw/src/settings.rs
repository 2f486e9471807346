// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Settings of the phase-cavity façade.
use pcav_fixed_point::EncodePolicy;

use crate::catalog::FirmwareRevision;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FwSettings {
    root: String,
    revision: FirmwareRevision,
    encode_policy: EncodePolicy,
}

impl FwSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path below which the register names are resolved.
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_revision(mut self, revision: FirmwareRevision) -> Self {
        self.revision = revision;
        self
    }

    pub fn with_encode_policy(mut self, encode_policy: EncodePolicy) -> Self {
        self.encode_policy = encode_policy;
        self
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn revision(&self) -> FirmwareRevision {
        self.revision
    }

    pub fn encode_policy(&self) -> EncodePolicy {
        self.encode_policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = FwSettings::new();
        assert_eq!(settings.root(), "");
        assert_eq!(settings.revision(), FirmwareRevision::Legacy);
        assert_eq!(settings.encode_policy(), EncodePolicy::Wrap);
    }

    #[test]
    fn test_builder() {
        let settings = FwSettings::new()
            .with_root("mmio/AppTop/AppCore")
            .with_revision(FirmwareRevision::Revised)
            .with_encode_policy(EncodePolicy::Strict);
        assert_eq!(settings.root(), "mmio/AppTop/AppCore");
        assert_eq!(settings.revision(), FirmwareRevision::Revised);
        assert_eq!(settings.encode_policy(), EncodePolicy::Strict);
    }
}
