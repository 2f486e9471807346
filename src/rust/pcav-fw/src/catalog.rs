// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! The phase-cavity parameter catalog.
//!
//! Every logical parameter is a quantity scoped globally, per cavity or per probe.
//! Register names follow the firmware convention: cavity index `c` is `cav{c+1}`,
//! probe index `p` is `P{p+1}`, e.g. `cav1P1IfAmpl` for cavity 0, probe 0.

use std::fmt;

use pcav_fixed_point::{
    Decode, EncodePolicy, FixedPointFormat, NcoAngleWord, RawWord, Result as CodecResult, formats,
};

use crate::channel::{Cavity, Channel, WaveformSlot};
use crate::register::join_path;
use crate::settings::FwSettings;
use crate::table::TableKey;

/// Decoded half-turn fractions are multiplied by this to get degrees.
pub const DEGREES_PER_HALF_TURN: f64 = 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    ReadOnly,
    WriteOnly,
    ReadWrite,
}

impl Access {
    pub const fn is_readable(self) -> bool {
        matches!(self, Access::ReadOnly | Access::ReadWrite)
    }

    pub const fn is_writable(self) -> bool {
        matches!(self, Access::WriteOnly | Access::ReadWrite)
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::ReadOnly => f.write_str("read-only"),
            Access::WriteOnly => f.write_str("write-only"),
            Access::ReadWrite => f.write_str("read-write"),
        }
    }
}

/// Generation of the DC and output-phase register formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FirmwareRevision {
    /// 21.19 DC terms, 26.0 DC frequency, 18.17 output phase.
    #[default]
    Legacy,
    /// 18.16 DC terms, 32.18 DC frequency, 18.15 output phase.
    Revised,
}

/// How a register word maps to a physical value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Encoding {
    /// Integer register passed through unchanged.
    Raw,
    /// Fixed-point word; the decoded value is multiplied by `scale`.
    Fixed {
        format: FixedPointFormat,
        scale: f64,
    },
    /// Write-only NCO phase word.
    NcoAngle,
}

impl Encoding {
    pub const fn fixed(format: FixedPointFormat) -> Self {
        Encoding::Fixed { format, scale: 1.0 }
    }

    pub const fn degrees(format: FixedPointFormat) -> Self {
        Encoding::Fixed {
            format,
            scale: DEGREES_PER_HALF_TURN,
        }
    }

    /// Physical value of a register word, `None` for write-only encodings.
    pub fn decode(self, raw: u32) -> Option<f64> {
        match self {
            Encoding::Raw => Some(RawWord.decode(raw)),
            Encoding::Fixed { format, scale } => Some(format.decode_scaled(raw, scale)),
            Encoding::NcoAngle => None,
        }
    }

    /// Register word for a physical value.
    ///
    /// Raw registers take the integer part of `value` and wrap like fixed-point words;
    /// [`EncodePolicy::Strict`] only accepts whole numbers in the `u32` range.
    pub fn encode(self, policy: EncodePolicy, value: f64) -> CodecResult<u32> {
        match self {
            Encoding::Raw => policy.encode(&RawWord, value),
            Encoding::Fixed { format, scale } => policy.encode(&format, value / scale),
            Encoding::NcoAngle => policy.encode(&NcoAngleWord, value),
        }
    }
}

/// A decoded register value together with the register word it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub value: f64,
    /// The register word, reinterpreted as signed.
    pub raw: i32,
}

/// Behaviour shared by the quantity enums.
pub trait Quantity: TableKey {
    /// Register name suffix.
    fn name(self) -> &'static str;

    fn access(self) -> Access;

    fn encoding(self, revision: FirmwareRevision) -> Encoding;
}

macro_rules! quantity_enum {
    (
        $(#[$meta:meta])*
        $ident:ident {
            $($variant:ident => $name:literal, $access:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $ident {
            $($variant),+
        }

        impl $ident {
            pub const ALL: &'static [$ident] = &[$($ident::$variant),+];
        }

        impl TableKey for $ident {
            const COUNT: usize = $ident::ALL.len();

            fn position(self) -> usize {
                self as usize
            }

            fn all() -> impl Iterator<Item = Self> {
                $ident::ALL.iter().copied()
            }
        }

        impl $ident {
            fn name_and_access(self) -> (&'static str, Access) {
                match self {
                    $($ident::$variant => ($name, Access::$access)),+
                }
            }
        }
    };
}

quantity_enum!(
    /// Instrument-wide registers.
    GlobalQuantity {
        Version => "version", ReadOnly,
        RefSel => "refSel", ReadWrite,
        RefAmpl => "refAmpl", ReadOnly,
        RefPhase => "refPhase", ReadOnly,
        RefI => "refI", ReadOnly,
        RefQ => "refQ", ReadOnly,
    }
);

quantity_enum!(
    /// Registers that exist once per cavity.
    CavityQuantity {
        Nco => "NCO", WriteOnly,
        NcoPhaseAdjust => "NCOPhaseAdj", ReadWrite,
        FreqEvalStart => "FreqEvalStart", ReadWrite,
        FreqEvalEnd => "FreqEvalEnd", ReadWrite,
        RegLatchPoint => "RegLatchPoint", ReadWrite,
    }
);

quantity_enum!(
    /// Registers that exist once per probe of every cavity.
    ProbeQuantity {
        ChanSel => "ChanSel", ReadWrite,
        WindowStart => "WindowStart", ReadWrite,
        WindowEnd => "WindowEnd", ReadWrite,
        CalibCoeff => "CalibCoeff", ReadWrite,
        PhaseOffset => "PhaseOffset", ReadWrite,
        Weight => "Weight", ReadWrite,
        IfAmpl => "IfAmpl", ReadOnly,
        IfPhase => "IfPhase", ReadOnly,
        IfI => "IfI", ReadOnly,
        IfQ => "IfQ", ReadOnly,
        DcReal => "DCReal", ReadOnly,
        DcImage => "DCImage", ReadOnly,
        DcFreq => "DCFreq", ReadOnly,
        IntegI => "IntegI", ReadOnly,
        IntegQ => "IntegQ", ReadOnly,
        OutPhase => "OutPhase", ReadOnly,
        OutAmpl => "OutAmpl", ReadOnly,
        CompPhase => "CompPhase", ReadOnly,
    }
);

impl Quantity for GlobalQuantity {
    fn name(self) -> &'static str {
        self.name_and_access().0
    }

    fn access(self) -> Access {
        self.name_and_access().1
    }

    fn encoding(self, _revision: FirmwareRevision) -> Encoding {
        match self {
            GlobalQuantity::Version | GlobalQuantity::RefSel => Encoding::Raw,
            GlobalQuantity::RefAmpl | GlobalQuantity::RefI | GlobalQuantity::RefQ => {
                Encoding::fixed(formats::S18_17)
            }
            GlobalQuantity::RefPhase => Encoding::degrees(formats::S18_17),
        }
    }
}

impl Quantity for CavityQuantity {
    fn name(self) -> &'static str {
        self.name_and_access().0
    }

    fn access(self) -> Access {
        self.name_and_access().1
    }

    fn encoding(self, _revision: FirmwareRevision) -> Encoding {
        match self {
            CavityQuantity::Nco => Encoding::NcoAngle,
            CavityQuantity::NcoPhaseAdjust => Encoding::fixed(formats::U29_29),
            CavityQuantity::FreqEvalStart
            | CavityQuantity::FreqEvalEnd
            | CavityQuantity::RegLatchPoint => Encoding::Raw,
        }
    }
}

impl Quantity for ProbeQuantity {
    fn name(self) -> &'static str {
        self.name_and_access().0
    }

    fn access(self) -> Access {
        self.name_and_access().1
    }

    fn encoding(self, revision: FirmwareRevision) -> Encoding {
        let revised = revision == FirmwareRevision::Revised;
        match self {
            ProbeQuantity::ChanSel | ProbeQuantity::WindowStart | ProbeQuantity::WindowEnd => {
                Encoding::Raw
            }
            ProbeQuantity::CalibCoeff => Encoding::fixed(formats::S18_17_UNITY),
            ProbeQuantity::PhaseOffset | ProbeQuantity::IfPhase => {
                Encoding::degrees(formats::S18_17)
            }
            ProbeQuantity::Weight => Encoding::fixed(formats::S2_1),
            ProbeQuantity::IfAmpl
            | ProbeQuantity::IfI
            | ProbeQuantity::IfQ
            | ProbeQuantity::OutAmpl => Encoding::fixed(formats::S18_17),
            ProbeQuantity::DcReal | ProbeQuantity::DcImage if revised => {
                Encoding::fixed(formats::S18_16)
            }
            ProbeQuantity::DcReal | ProbeQuantity::DcImage => Encoding::fixed(formats::S21_19),
            ProbeQuantity::DcFreq if revised => Encoding::fixed(formats::S32_18),
            ProbeQuantity::DcFreq => Encoding::fixed(formats::S26_0),
            ProbeQuantity::IntegI | ProbeQuantity::IntegQ => Encoding::fixed(formats::S18_16),
            ProbeQuantity::OutPhase | ProbeQuantity::CompPhase if revised => {
                Encoding::degrees(formats::S18_15)
            }
            ProbeQuantity::OutPhase | ProbeQuantity::CompPhase => {
                Encoding::degrees(formats::S18_17)
            }
        }
    }
}

pub fn global_register_name(quantity: GlobalQuantity) -> String {
    quantity.name().to_string()
}

pub fn waveform_select_name(slot: WaveformSlot) -> String {
    format!("wfDataSel{}", slot.index())
}

pub fn cavity_register_name(cavity: Cavity, quantity: CavityQuantity) -> String {
    format!("cav{}{}", cavity.index() + 1, quantity.name())
}

pub fn probe_register_name(channel: Channel, quantity: ProbeQuantity) -> String {
    format!(
        "cav{}P{}{}",
        channel.cavity.index() + 1,
        channel.probe.index() + 1,
        quantity.name()
    )
}

/// Full paths of every register the phase-cavity façade resolves, in resolution order.
pub fn pcav_register_paths(settings: &FwSettings) -> Vec<String> {
    let root = settings.root();
    let globals = GlobalQuantity::all().map(global_register_name);
    let selects = WaveformSlot::all().map(waveform_select_name);
    let cavities = Cavity::all()
        .flat_map(|c| CavityQuantity::all().map(move |q| cavity_register_name(c, q)));
    let probes = Channel::all()
        .flat_map(|ch| ProbeQuantity::all().map(move |q| probe_register_name(ch, q)));
    globals
        .chain(selects)
        .chain(cavities)
        .chain(probes)
        .map(|name| join_path(root, &name))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_naming_convention() {
        let channel = Channel::new(0, 0).unwrap();
        assert_eq!(
            probe_register_name(channel, ProbeQuantity::IfAmpl),
            "cav1P1IfAmpl"
        );
        let channel = Channel::new(1, 1).unwrap();
        assert_eq!(
            probe_register_name(channel, ProbeQuantity::DcImage),
            "cav2P2DCImage"
        );
        let cavity = Cavity::new(1).unwrap();
        assert_eq!(
            cavity_register_name(cavity, CavityQuantity::NcoPhaseAdjust),
            "cav2NCOPhaseAdj"
        );
        let slot = WaveformSlot::new(3).unwrap();
        assert_eq!(waveform_select_name(slot), "wfDataSel3");
    }

    #[test]
    fn test_paths_are_unique_and_complete() {
        let paths = pcav_register_paths(&FwSettings::new());
        let expected = GlobalQuantity::COUNT
            + WaveformSlot::COUNT
            + Cavity::COUNT * CavityQuantity::COUNT
            + Channel::COUNT * ProbeQuantity::COUNT;
        assert_eq!(paths.len(), expected);
        assert_eq!(paths.len(), 92);
        let unique: HashSet<&String> = paths.iter().collect();
        assert_eq!(unique.len(), paths.len());
    }

    #[test]
    fn test_paths_use_root() {
        let settings = FwSettings::new().with_root("mmio/AppTop/AppCore/");
        let paths = pcav_register_paths(&settings);
        assert_eq!(paths[0], "mmio/AppTop/AppCore/version");
        assert!(paths.contains(&"mmio/AppTop/AppCore/cav2P1CompPhase".to_string()));
    }

    #[test]
    fn test_phase_quantities_are_in_degrees() {
        for revision in [FirmwareRevision::Legacy, FirmwareRevision::Revised] {
            for q in [
                ProbeQuantity::IfPhase,
                ProbeQuantity::OutPhase,
                ProbeQuantity::CompPhase,
                ProbeQuantity::PhaseOffset,
            ] {
                assert!(
                    matches!(q.encoding(revision), Encoding::Fixed { scale, .. } if scale == 180.0),
                    "{q:?}"
                );
            }
        }
    }

    #[test]
    fn test_revision_formats() {
        let legacy = FirmwareRevision::Legacy;
        let revised = FirmwareRevision::Revised;
        assert_eq!(
            ProbeQuantity::DcFreq.encoding(legacy),
            Encoding::fixed(formats::S26_0)
        );
        assert_eq!(
            ProbeQuantity::DcFreq.encoding(revised),
            Encoding::fixed(formats::S32_18)
        );
        assert_eq!(
            ProbeQuantity::DcReal.encoding(legacy),
            Encoding::fixed(formats::S21_19)
        );
        assert_eq!(
            ProbeQuantity::DcImage.encoding(revised),
            Encoding::fixed(formats::S18_16)
        );
        assert_eq!(
            ProbeQuantity::OutPhase.encoding(revised),
            Encoding::degrees(formats::S18_15)
        );
    }

    #[test]
    fn test_write_only_nco_has_no_decode() {
        let encoding = CavityQuantity::Nco.encoding(FirmwareRevision::Legacy);
        assert_eq!(encoding.decode(0x0400_0000), None);
        assert_eq!(
            encoding.encode(EncodePolicy::Wrap, 1.7e7),
            Ok(0x0400_0000)
        );
        assert!(!CavityQuantity::Nco.access().is_readable());
    }

    #[test]
    fn test_raw_encoding_passes_through() {
        assert_eq!(Encoding::Raw.decode(0xFFFF_FFFF), Some(4294967295.0));
        assert_eq!(Encoding::Raw.encode(EncodePolicy::Strict, 1234.0), Ok(1234));
    }
}
