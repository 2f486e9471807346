// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};

use crate::catalog::Access;
use crate::channel::IndexKind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOperation {
    Read,
    Write,
}

impl Display for IoOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoOperation::Read => f.write_str("read"),
            IoOperation::Write => f.write_str("write"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A register of the catalog is missing in the register space.
    #[error("Failed to resolve register '{name}'")]
    Resolution {
        name: String,
        source: anyhow::Error,
    },

    #[error("{kind} index {index} out of range, expected less than {limit}")]
    IndexOutOfRange {
        kind: IndexKind,
        index: usize,
        limit: usize,
    },

    /// The register service failed; it owns any retry policy.
    #[error("Register {operation} of '{name}' failed")]
    RegisterIo {
        name: String,
        operation: IoOperation,
        source: anyhow::Error,
    },

    #[error(transparent)]
    Encoding(#[from] pcav_fixed_point::Error),

    #[error("Register '{name}' is {access}")]
    AccessDenied { name: String, access: Access },

    #[error("Waveform size mismatch: expected {expected} samples, got {actual}")]
    BufferSize { expected: usize, actual: usize },
}

impl Error {
    /// Whether the error was raised before any register was touched.
    pub fn is_rejected_before_io(&self) -> bool {
        matches!(
            self,
            Error::IndexOutOfRange { .. }
                | Error::Encoding(_)
                | Error::AccessDenied { .. }
                | Error::BufferSize { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::IndexOutOfRange {
            kind: IndexKind::Probe,
            index: 5,
            limit: 2,
        };
        assert_eq!(
            err.to_string(),
            "probe index 5 out of range, expected less than 2"
        );
        assert!(err.is_rejected_before_io());

        let err = Error::AccessDenied {
            name: "cav1P1IfAmpl".to_string(),
            access: Access::ReadOnly,
        };
        assert_eq!(err.to_string(), "Register 'cav1P1IfAmpl' is read-only");
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = Error::RegisterIo {
            name: "refAmpl".to_string(),
            operation: IoOperation::Read,
            source: anyhow!("link down"),
        };
        assert_eq!(err.to_string(), "Register read of 'refAmpl' failed");
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("link down"));
        assert!(!err.is_rejected_before_io());
    }
}
