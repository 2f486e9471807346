// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use pcav_log::info;

use crate::binding::Binding;
use crate::catalog::{
    Access, CavityQuantity, Encoding, GlobalQuantity, ProbeQuantity, Quantity, Reading,
    cavity_register_name, global_register_name, probe_register_name, waveform_select_name,
};
use crate::Result;
use crate::channel::{Cavity, Channel, WaveformSlot};
use crate::register::{Register, RegisterSpace};
use crate::settings::FwSettings;
use crate::table::Table;

type Bank<K, R> = Table<K, Binding<R>>;

/// Register-map façade of the phase-cavity firmware.
///
/// All registers of the catalog are resolved once in [`PcavFw::new`]; afterwards every
/// accessor validates its indices, performs a single register operation and converts
/// the word. The façade holds no state besides the resolved handles.
///
/// # Examples
/// ```rust
/// use pcav_fw::{FwSettings, PcavFw, SimRegisterSpace};
///
/// let settings = FwSettings::new();
/// let space = SimRegisterSpace::new();
/// space.add_pcav_registers(&settings);
/// space.set("cav1P1IfPhase", 0x0001_0000);
///
/// let pcav = PcavFw::new(&space, settings).unwrap();
/// let phase = pcav.get_if_phase(0, 0).unwrap();
/// assert_eq!(phase.value, 90.0);
/// assert_eq!(phase.raw, 0x0001_0000);
/// ```
#[derive(Debug)]
pub struct PcavFw<R> {
    settings: FwSettings,
    globals: Bank<GlobalQuantity, R>,
    waveform_selects: Table<WaveformSlot, Binding<R>>,
    cavities: Table<Cavity, Bank<CavityQuantity, R>>,
    probes: Table<Channel, Bank<ProbeQuantity, R>>,
}

impl<R: Register> PcavFw<R> {
    /// Resolve every register of the catalog.
    ///
    /// Fails with [`Error::Resolution`](crate::Error::Resolution) on the first register
    /// that cannot be resolved; nothing is returned in that case.
    pub fn new<S>(space: &S, settings: FwSettings) -> Result<Self>
    where
        S: RegisterSpace<Register = R> + ?Sized,
    {
        let root = settings.root();
        let revision = settings.revision();
        let bind = |name: &str, access: Access, encoding: Encoding| {
            Binding::resolve(space, root, name, access, encoding)
        };

        let globals = Table::try_build(|q: GlobalQuantity| {
            bind(&global_register_name(q), q.access(), q.encoding(revision))
        })?;
        let waveform_selects = Table::try_build(|slot| {
            bind(&waveform_select_name(slot), Access::ReadWrite, Encoding::Raw)
        })?;
        let cavities = Table::try_build(|cavity| {
            Table::try_build(|q: CavityQuantity| {
                bind(
                    &cavity_register_name(cavity, q),
                    q.access(),
                    q.encoding(revision),
                )
            })
        })?;
        let probes = Table::try_build(|channel| {
            Table::try_build(|q: ProbeQuantity| {
                bind(
                    &probe_register_name(channel, q),
                    q.access(),
                    q.encoding(revision),
                )
            })
        })?;

        let pcav = PcavFw {
            settings,
            globals,
            waveform_selects,
            cavities,
            probes,
        };
        info!(
            "Resolved {} phase-cavity registers below '{}'",
            pcav.register_paths().count(),
            pcav.settings.root()
        );
        Ok(pcav)
    }

    pub fn settings(&self) -> &FwSettings {
        &self.settings
    }

    /// Paths of all resolved registers.
    pub fn register_paths(&self) -> impl Iterator<Item = &str> {
        let cavities = self.cavities.values().flat_map(Table::values);
        let probes = self.probes.values().flat_map(Table::values);
        self.globals
            .values()
            .chain(self.waveform_selects.values())
            .chain(cavities)
            .chain(probes)
            .map(Binding::path)
    }

    fn cavity(&self, cavity: usize, quantity: CavityQuantity) -> Result<&Binding<R>> {
        let cavity = Cavity::new(cavity)?;
        Ok(self.cavities.get(cavity).get(quantity))
    }

    fn probe(&self, cavity: usize, probe: usize, quantity: ProbeQuantity) -> Result<&Binding<R>> {
        let channel = Channel::new(cavity, probe)?;
        Ok(self.probes.get(channel).get(quantity))
    }

    // =========================================================================
    // Quantity-driven access
    // =========================================================================

    pub fn global_reading(&self, quantity: GlobalQuantity) -> Result<Reading> {
        self.globals.get(quantity).read()
    }

    /// Encode and write an instrument-wide quantity, returning the register word.
    pub fn write_global(&self, quantity: GlobalQuantity, value: f64) -> Result<u32> {
        self.globals
            .get(quantity)
            .write(self.settings.encode_policy(), value)
    }

    pub fn cavity_reading(&self, cavity: usize, quantity: CavityQuantity) -> Result<Reading> {
        self.cavity(cavity, quantity)?.read()
    }

    pub fn write_cavity(&self, cavity: usize, quantity: CavityQuantity, value: f64) -> Result<u32> {
        self.cavity(cavity, quantity)?
            .write(self.settings.encode_policy(), value)
    }

    pub fn probe_reading(
        &self,
        cavity: usize,
        probe: usize,
        quantity: ProbeQuantity,
    ) -> Result<Reading> {
        self.probe(cavity, probe, quantity)?.read()
    }

    pub fn write_probe(
        &self,
        cavity: usize,
        probe: usize,
        quantity: ProbeQuantity,
        value: f64,
    ) -> Result<u32> {
        self.probe(cavity, probe, quantity)?
            .write(self.settings.encode_policy(), value)
    }

    // =========================================================================
    // Instrument-wide registers
    // =========================================================================

    /// Firmware version word.
    pub fn get_version(&self) -> Result<i32> {
        Ok(self.globals.get(GlobalQuantity::Version).read_raw()? as i32)
    }

    /// Select the reference channel.
    pub fn set_ref_sel(&self, channel: u32) -> Result<()> {
        self.globals.get(GlobalQuantity::RefSel).write_raw(channel)
    }

    /// Select the data routed to waveform buffer `index`.
    pub fn set_wf_data_sel(&self, index: usize, sel: u32) -> Result<()> {
        let slot = WaveformSlot::new(index)?;
        self.waveform_selects.get(slot).write_raw(sel)
    }

    pub fn get_ref_ampl(&self) -> Result<Reading> {
        self.global_reading(GlobalQuantity::RefAmpl)
    }

    /// Reference phase in degrees.
    pub fn get_ref_phase(&self) -> Result<Reading> {
        self.global_reading(GlobalQuantity::RefPhase)
    }

    pub fn get_ref_i(&self) -> Result<Reading> {
        self.global_reading(GlobalQuantity::RefI)
    }

    pub fn get_ref_q(&self) -> Result<Reading> {
        self.global_reading(GlobalQuantity::RefQ)
    }

    // =========================================================================
    // Per-cavity registers
    // =========================================================================

    /// Set the NCO phase from an angle in the device unit; returns the written word.
    pub fn set_nco(&self, cavity: usize, v: f64) -> Result<u32> {
        self.write_cavity(cavity, CavityQuantity::Nco, v)
    }

    /// Set the NCO phase adjustment as a fraction of a turn in `[0, 1]`.
    pub fn set_nco_phase_adjust(&self, cavity: usize, v: f64) -> Result<u32> {
        self.write_cavity(cavity, CavityQuantity::NcoPhaseAdjust, v)
    }

    pub fn get_nco_phase_adjust(&self, cavity: usize) -> Result<Reading> {
        self.cavity_reading(cavity, CavityQuantity::NcoPhaseAdjust)
    }

    pub fn set_freq_eval_start(&self, cavity: usize, start: u32) -> Result<()> {
        self.cavity(cavity, CavityQuantity::FreqEvalStart)?.write_raw(start)
    }

    pub fn set_freq_eval_end(&self, cavity: usize, end: u32) -> Result<()> {
        self.cavity(cavity, CavityQuantity::FreqEvalEnd)?.write_raw(end)
    }

    pub fn set_reg_latch_point(&self, cavity: usize, point: u32) -> Result<()> {
        self.cavity(cavity, CavityQuantity::RegLatchPoint)?.write_raw(point)
    }

    // =========================================================================
    // Per-probe configuration
    // =========================================================================

    pub fn set_chan_sel(&self, cavity: usize, probe: usize, channel: u32) -> Result<()> {
        self.probe(cavity, probe, ProbeQuantity::ChanSel)?.write_raw(channel)
    }

    /// First sample of the integration window.
    pub fn set_window_start(&self, cavity: usize, probe: usize, start: u32) -> Result<()> {
        self.probe(cavity, probe, ProbeQuantity::WindowStart)?.write_raw(start)
    }

    /// Last sample of the integration window.
    pub fn set_window_end(&self, cavity: usize, probe: usize, end: u32) -> Result<()> {
        self.probe(cavity, probe, ProbeQuantity::WindowEnd)?.write_raw(end)
    }

    pub fn set_calib_coeff(&self, cavity: usize, probe: usize, v: f64) -> Result<u32> {
        self.write_probe(cavity, probe, ProbeQuantity::CalibCoeff, v)
    }

    /// Phase offset in degrees.
    pub fn set_phase_offset(&self, cavity: usize, probe: usize, degrees: f64) -> Result<u32> {
        self.write_probe(cavity, probe, ProbeQuantity::PhaseOffset, degrees)
    }

    pub fn set_weight(&self, cavity: usize, probe: usize, v: f64) -> Result<u32> {
        self.write_probe(cavity, probe, ProbeQuantity::Weight, v)
    }

    // =========================================================================
    // Per-probe monitoring
    // =========================================================================

    pub fn get_if_ampl(&self, cavity: usize, probe: usize) -> Result<Reading> {
        self.probe_reading(cavity, probe, ProbeQuantity::IfAmpl)
    }

    /// IF phase in degrees.
    pub fn get_if_phase(&self, cavity: usize, probe: usize) -> Result<Reading> {
        self.probe_reading(cavity, probe, ProbeQuantity::IfPhase)
    }

    pub fn get_if_i(&self, cavity: usize, probe: usize) -> Result<Reading> {
        self.probe_reading(cavity, probe, ProbeQuantity::IfI)
    }

    pub fn get_if_q(&self, cavity: usize, probe: usize) -> Result<Reading> {
        self.probe_reading(cavity, probe, ProbeQuantity::IfQ)
    }

    pub fn get_dc_real(&self, cavity: usize, probe: usize) -> Result<Reading> {
        self.probe_reading(cavity, probe, ProbeQuantity::DcReal)
    }

    pub fn get_dc_image(&self, cavity: usize, probe: usize) -> Result<Reading> {
        self.probe_reading(cavity, probe, ProbeQuantity::DcImage)
    }

    pub fn get_dc_freq(&self, cavity: usize, probe: usize) -> Result<Reading> {
        self.probe_reading(cavity, probe, ProbeQuantity::DcFreq)
    }

    pub fn get_integ_i(&self, cavity: usize, probe: usize) -> Result<Reading> {
        self.probe_reading(cavity, probe, ProbeQuantity::IntegI)
    }

    pub fn get_integ_q(&self, cavity: usize, probe: usize) -> Result<Reading> {
        self.probe_reading(cavity, probe, ProbeQuantity::IntegQ)
    }

    /// Output phase in degrees.
    pub fn get_out_phase(&self, cavity: usize, probe: usize) -> Result<Reading> {
        self.probe_reading(cavity, probe, ProbeQuantity::OutPhase)
    }

    pub fn get_out_ampl(&self, cavity: usize, probe: usize) -> Result<Reading> {
        self.probe_reading(cavity, probe, ProbeQuantity::OutAmpl)
    }

    /// Compare phase in degrees.
    pub fn get_comp_phase(&self, cavity: usize, probe: usize) -> Result<Reading> {
        self.probe_reading(cavity, probe, ProbeQuantity::CompPhase)
    }
}
