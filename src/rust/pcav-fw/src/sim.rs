// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! In-memory register space for tests and offline use.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use anyhow::{anyhow, bail};

use crate::catalog::pcav_register_paths;
use crate::dac_sig_gen::DAC_SIG_GEN_REGISTERS;
use crate::register::{Register, RegisterSpace, join_path};
use crate::settings::FwSettings;

#[derive(Debug, Default)]
struct Cell {
    value: u32,
    block: Vec<u32>,
}

#[derive(Debug, Default)]
struct SimState {
    registers: HashMap<String, Cell>,
    failing: HashSet<String>,
    reads: usize,
    writes: usize,
}

impl SimState {
    fn cell(&mut self, path: &str) -> anyhow::Result<&mut Cell> {
        if self.failing.contains(path) {
            bail!("Simulated failure of '{path}'");
        }
        self.registers
            .get_mut(path)
            .ok_or_else(|| anyhow!("Register '{path}' disappeared"))
    }
}

/// A register space backed by a map of register words.
///
/// Clones share the same registers, so a test can keep a handle for inspection while
/// a façade owns the resolved registers.
#[derive(Debug, Clone, Default)]
pub struct SimRegisterSpace {
    state: Rc<RefCell<SimState>>,
}

impl SimRegisterSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a register initialized to zero. Existing registers are left unchanged.
    pub fn add_register(&self, path: impl Into<String>) {
        self.state
            .borrow_mut()
            .registers
            .entry(path.into())
            .or_default();
    }

    pub fn with_register(self, path: impl Into<String>) -> Self {
        self.add_register(path);
        self
    }

    /// Add every register the phase-cavity façade resolves with `settings`.
    pub fn add_pcav_registers(&self, settings: &FwSettings) {
        for path in pcav_register_paths(settings) {
            self.add_register(path);
        }
    }

    /// Add the signal generator registers below `root`.
    pub fn add_dac_sig_gen_registers(&self, root: &str) {
        for name in DAC_SIG_GEN_REGISTERS {
            self.add_register(join_path(root, name));
        }
    }

    /// Set a register word without counting a write. Unknown paths are added.
    pub fn set(&self, path: &str, value: u32) {
        let mut state = self.state.borrow_mut();
        state.registers.entry(path.to_string()).or_default().value = value;
    }

    pub fn get(&self, path: &str) -> Option<u32> {
        self.state.borrow().registers.get(path).map(|c| c.value)
    }

    /// Last block written to a memory-array register.
    pub fn block(&self, path: &str) -> Option<Vec<u32>> {
        self.state
            .borrow()
            .registers
            .get(path)
            .map(|c| c.block.clone())
    }

    /// Make every later access to `path` fail.
    pub fn fail_on(&self, path: impl Into<String>) {
        self.state.borrow_mut().failing.insert(path.into());
    }

    pub fn contains(&self, path: &str) -> bool {
        self.state.borrow().registers.contains_key(path)
    }

    /// Number of register reads performed through resolved registers.
    pub fn reads(&self) -> usize {
        self.state.borrow().reads
    }

    /// Number of register writes performed through resolved registers.
    pub fn writes(&self) -> usize {
        self.state.borrow().writes
    }
}

impl RegisterSpace for SimRegisterSpace {
    type Register = SimRegister;

    fn resolve(&self, path: &str) -> anyhow::Result<SimRegister> {
        if !self.contains(path) {
            bail!("No register at '{path}'");
        }
        Ok(SimRegister {
            path: path.to_string(),
            state: Rc::clone(&self.state),
        })
    }
}

#[derive(Debug, Clone)]
pub struct SimRegister {
    path: String,
    state: Rc<RefCell<SimState>>,
}

impl SimRegister {
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Register for SimRegister {
    fn read(&self) -> anyhow::Result<u32> {
        let mut state = self.state.borrow_mut();
        state.reads += 1;
        Ok(state.cell(&self.path)?.value)
    }

    fn write(&self, value: u32) -> anyhow::Result<()> {
        let mut state = self.state.borrow_mut();
        state.writes += 1;
        state.cell(&self.path)?.value = value;
        Ok(())
    }

    fn write_block(&self, values: &[u32]) -> anyhow::Result<()> {
        let mut state = self.state.borrow_mut();
        state.writes += 1;
        state.cell(&self.path)?.block = values.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_unknown() {
        let space = SimRegisterSpace::new();
        let err = space.resolve("cav1P1IfAmpl").unwrap_err();
        assert_eq!(err.to_string(), "No register at 'cav1P1IfAmpl'");
    }

    #[test]
    fn test_shared_state() {
        let space = SimRegisterSpace::new().with_register("refSel");
        let register = space.resolve("refSel").unwrap();
        register.write(7).unwrap();
        assert_eq!(space.get("refSel"), Some(7));
        space.set("refSel", 9);
        assert_eq!(register.read().unwrap(), 9);
        assert_eq!(space.reads(), 1);
        assert_eq!(space.writes(), 1);
    }

    #[test]
    fn test_failing_register() {
        let space = SimRegisterSpace::new().with_register("refAmpl");
        let register = space.resolve("refAmpl").unwrap();
        space.fail_on("refAmpl");
        let err = register.read().unwrap_err();
        assert_eq!(err.to_string(), "Simulated failure of 'refAmpl'");
    }

    #[test]
    fn test_block_write() {
        let space = SimRegisterSpace::new();
        space.add_dac_sig_gen_registers("gen");
        let register = space.resolve("gen/Waveform[1]/MemoryArray").unwrap();
        register.write_block(&[1, 2, 3]).unwrap();
        assert_eq!(
            space.block("gen/Waveform[1]/MemoryArray"),
            Some(vec![1, 2, 3])
        );
        assert_eq!(space.block("gen/Waveform[0]/MemoryArray"), Some(vec![]));
    }
}
