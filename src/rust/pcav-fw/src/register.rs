// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Seam to the register-access service.
//!
//! Discovery, transport and caching of register metadata live behind these traits.
//! Implementations are free to block; they are not required to be `Sync`, callers
//! serialize access to a façade themselves.

/// A resolved register.
pub trait Register {
    fn read(&self) -> anyhow::Result<u32>;

    fn write(&self, value: u32) -> anyhow::Result<()>;

    /// Write consecutive words to a memory-array register.
    fn write_block(&self, values: &[u32]) -> anyhow::Result<()>;
}

/// Resolves hierarchical register paths to registers.
pub trait RegisterSpace {
    type Register: Register;

    fn resolve(&self, path: &str) -> anyhow::Result<Self::Register>;
}

impl<S: RegisterSpace + ?Sized> RegisterSpace for &S {
    type Register = S::Register;

    fn resolve(&self, path: &str) -> anyhow::Result<Self::Register> {
        (**self).resolve(path)
    }
}

/// Join a register name below a root path. An empty root leaves the name unchanged.
pub fn join_path(root: &str, name: &str) -> String {
    let root = root.trim_end_matches('/');
    if root.is_empty() {
        name.to_string()
    } else {
        format!("{root}/{name}")
    }
}
