// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use pcav_fixed_point::EncodePolicy;
use pcav_log::{diagnostic, error};

use crate::catalog::{Access, Encoding, Reading};
use crate::error::IoOperation;
use crate::register::{Register, RegisterSpace, join_path};
use crate::{Error, Result};

/// A register handle bound to its catalog entry.
///
/// Every method performs at most one register operation and never retries.
#[derive(Debug)]
pub(crate) struct Binding<R> {
    path: String,
    register: R,
    access: Access,
    encoding: Encoding,
}

impl<R: Register> Binding<R> {
    pub(crate) fn resolve<S>(
        space: &S,
        root: &str,
        name: &str,
        access: Access,
        encoding: Encoding,
    ) -> Result<Self>
    where
        S: RegisterSpace<Register = R> + ?Sized,
    {
        let path = join_path(root, name);
        let register = space.resolve(&path).map_err(|source| Error::Resolution {
            name: path.clone(),
            source,
        })?;
        diagnostic!("Resolved register '{}' ({})", path, access);
        Ok(Binding {
            path,
            register,
            access,
            encoding,
        })
    }

    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    fn denied(&self) -> Error {
        Error::AccessDenied {
            name: self.path.clone(),
            access: self.access,
        }
    }

    fn io_error(&self, operation: IoOperation, source: anyhow::Error) -> Error {
        error!("Register {} of '{}' failed: {:#}", operation, self.path, source);
        Error::RegisterIo {
            name: self.path.clone(),
            operation,
            source,
        }
    }

    pub(crate) fn read_raw(&self) -> Result<u32> {
        if !self.access.is_readable() {
            return Err(self.denied());
        }
        self.register
            .read()
            .map_err(|e| self.io_error(IoOperation::Read, e))
    }

    pub(crate) fn read(&self) -> Result<Reading> {
        let raw = self.read_raw()?;
        let value = self.encoding.decode(raw).ok_or_else(|| self.denied())?;
        Ok(Reading {
            value,
            raw: raw as i32,
        })
    }

    pub(crate) fn write_raw(&self, word: u32) -> Result<()> {
        if !self.access.is_writable() {
            return Err(self.denied());
        }
        diagnostic!("Writing 0x{:08x} to '{}'", word, self.path);
        self.register
            .write(word)
            .map_err(|e| self.io_error(IoOperation::Write, e))
    }

    /// Encode `value`, write it and return the register word.
    pub(crate) fn write(&self, policy: EncodePolicy, value: f64) -> Result<u32> {
        if !self.access.is_writable() {
            return Err(self.denied());
        }
        let word = self.encoding.encode(policy, value)?;
        self.write_raw(word)?;
        Ok(word)
    }

    pub(crate) fn write_block(&self, words: &[u32]) -> Result<()> {
        if !self.access.is_writable() {
            return Err(self.denied());
        }
        diagnostic!("Writing {} words to '{}'", words.len(), self.path);
        self.register
            .write_block(words)
            .map_err(|e| self.io_error(IoOperation::Write, e))
    }
}
