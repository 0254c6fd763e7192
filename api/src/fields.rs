//! Registration surface: every field and every expert warning the processors may emit

use serde::Serialize;
use strum::{EnumIter, IntoEnumIterator};

pub use crate::consts::value_string;
use crate::consts::{
    Polarity, ATLAS_MERCURY_CONFIGS, BOARD_IDS, CLOCK_SOURCES, COMMANDS, ENABLED_DISABLED,
    MERCURY_PENELOPE, PHASE_FREQ, SAME_INDEPENDENT,
};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    Dec,
    Hex,
    Mac,
    Ipv4,
    Enum,
    Boolean,
    StringTag,
    Bytes,
}

/// How a raw value is turned into a label
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strings {
    None,
    Values(&'static [(u32, &'static str)]),
    Bool(Polarity),
}

impl Default for Strings {
    fn default() -> Self {
        Strings::None
    }
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct FieldDescriptor {
    pub id: FieldId,
    /// Display filter abbreviation
    pub abbrev: &'static str,
    pub label: &'static str,
    pub encoding: Encoding,
    pub strings: Strings,
    /// Zero means the whole value
    pub bitmask: u32,
}

#[derive(Clone, Copy, Debug, EnumIter, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Banner,
    Seq,
    Cmd,

    // General
    DdccPort,
    DuccPort,
    HpcPort,
    HpsPort,
    DdcaPort,
    DuciqPort,
    DdciqPort,
    MiclPort,
    WbdPort,
    WbEnable,
    WbEnable0,
    WbEnable1,
    WbEnable2,
    WbEnable3,
    WbEnable4,
    WbEnable5,
    WbEnable6,
    WbEnable7,
    WbSamples,
    WbSampleSize,
    WbRate,
    WbPpf,
    MemHostPort,
    MemHwPort,
    PwmEnvMin,
    PwmEnvMax,
    GeneralFlags,
    IqTimestamp,
    Vita49,
    Vna,
    FreqPhase,
    Reserved,
    AtlasMercuryCfg,
    ClockSource,
    HwFlags,
    PaEnable,
    AtuAuto,
    MercuryCommonFreq,
    Clock122Source,
    AlexEnable,
    AlexEnable0,
    AlexEnable1,
    AlexEnable2,
    AlexEnable3,
    AlexEnable4,
    AlexEnable5,
    AlexEnable6,
    AlexEnable7,

    // Discovery reply
    BoardMac,
    BoardId,
    FwVersion,
    Mercury0Version,
    Mercury1Version,
    Mercury2Version,
    Mercury3Version,
    PenelopeVersion,
    MetisVersion,
    DdcCount,
    FreqPhaseWord,

    // Set IP
    SetIpMac,
    SetIpAddr,

    // Program
    ProgramBlocks,
    ProgramData,

    Pad,
}

/// Per bit children of the wideband enable byte
pub const WB_ENABLE_BITS: [FieldId; 8] = [
    FieldId::WbEnable0,
    FieldId::WbEnable1,
    FieldId::WbEnable2,
    FieldId::WbEnable3,
    FieldId::WbEnable4,
    FieldId::WbEnable5,
    FieldId::WbEnable6,
    FieldId::WbEnable7,
];

/// Per bit children of the Alex enable byte
pub const ALEX_ENABLE_BITS: [FieldId; 8] = [
    FieldId::AlexEnable0,
    FieldId::AlexEnable1,
    FieldId::AlexEnable2,
    FieldId::AlexEnable3,
    FieldId::AlexEnable4,
    FieldId::AlexEnable5,
    FieldId::AlexEnable6,
    FieldId::AlexEnable7,
];

impl FieldId {
    #[rustfmt::skip]
    pub fn descriptor(&self) -> FieldDescriptor {
        use Encoding::*;
        let (abbrev, label, encoding, strings, bitmask) = match self {
            FieldId::Banner => ("openhpsdr-e", "openHPSDR Ethernet", StringTag, Strings::None, 0),
            FieldId::Seq => ("openhpsdr-e.seq", "Sequence Number", Dec, Strings::None, 0),
            FieldId::Cmd => ("openhpsdr-e.cr.cmd", "Command", Hex, Strings::Values(COMMANDS), 0),

            FieldId::DdccPort => ("openhpsdr-e.cr.ddcc-port", "DDC Command Port", Dec, Strings::None, 0),
            FieldId::DuccPort => ("openhpsdr-e.cr.ducc-port", "DUC Command Port", Dec, Strings::None, 0),
            FieldId::HpcPort => ("openhpsdr-e.cr.hpc-port", "High Priority Command Port", Dec, Strings::None, 0),
            FieldId::HpsPort => ("openhpsdr-e.cr.hps-port", "High Priority Status Port", Dec, Strings::None, 0),
            FieldId::DdcaPort => ("openhpsdr-e.cr.ddca-port", "DDC Audio Port", Dec, Strings::None, 0),
            FieldId::DuciqPort => ("openhpsdr-e.cr.duciq-port", "DUC I&Q Base Port", Dec, Strings::None, 0),
            FieldId::DdciqPort => ("openhpsdr-e.cr.ddciq-port", "DDC I&Q Base Port", Dec, Strings::None, 0),
            FieldId::MiclPort => ("openhpsdr-e.cr.micl-port", "Mic/Line Samples Port", Dec, Strings::None, 0),
            FieldId::WbdPort => ("openhpsdr-e.cr.wbd-port", "Wide Band Data Base Port", Dec, Strings::None, 0),
            FieldId::WbEnable => ("openhpsdr-e.cr.wb-enable", "Wide Band Enable", Hex, Strings::None, 0),
            FieldId::WbEnable0 => ("openhpsdr-e.cr.wb-enable.0", "WB0", Boolean, Strings::Bool(ENABLED_DISABLED), 0x01),
            FieldId::WbEnable1 => ("openhpsdr-e.cr.wb-enable.1", "WB1", Boolean, Strings::Bool(ENABLED_DISABLED), 0x02),
            FieldId::WbEnable2 => ("openhpsdr-e.cr.wb-enable.2", "WB2", Boolean, Strings::Bool(ENABLED_DISABLED), 0x04),
            FieldId::WbEnable3 => ("openhpsdr-e.cr.wb-enable.3", "WB3", Boolean, Strings::Bool(ENABLED_DISABLED), 0x08),
            FieldId::WbEnable4 => ("openhpsdr-e.cr.wb-enable.4", "WB4", Boolean, Strings::Bool(ENABLED_DISABLED), 0x10),
            FieldId::WbEnable5 => ("openhpsdr-e.cr.wb-enable.5", "WB5", Boolean, Strings::Bool(ENABLED_DISABLED), 0x20),
            FieldId::WbEnable6 => ("openhpsdr-e.cr.wb-enable.6", "WB6", Boolean, Strings::Bool(ENABLED_DISABLED), 0x40),
            FieldId::WbEnable7 => ("openhpsdr-e.cr.wb-enable.7", "WB7", Boolean, Strings::Bool(ENABLED_DISABLED), 0x80),
            FieldId::WbSamples => ("openhpsdr-e.cr.wb-samples", "Wide Band Samples per Datagram", Dec, Strings::None, 0),
            FieldId::WbSampleSize => ("openhpsdr-e.cr.wb-sample-size", "Wide Band Sample Size (bits)", Dec, Strings::None, 0),
            FieldId::WbRate => ("openhpsdr-e.cr.wb-rate", "Wide Band Update Rate (ms)", Dec, Strings::None, 0),
            FieldId::WbPpf => ("openhpsdr-e.cr.wb-ppf", "Wide Band Datagrams per Full Spectrum", Dec, Strings::None, 0),
            FieldId::MemHostPort => ("openhpsdr-e.cr.mem-host-port", "Memory Mapped Host Port", Dec, Strings::None, 0),
            FieldId::MemHwPort => ("openhpsdr-e.cr.mem-hw-port", "Memory Mapped Hardware Port", Dec, Strings::None, 0),
            FieldId::PwmEnvMin => ("openhpsdr-e.cr.pwm-env-min", "PWM Envelope Minimum", Dec, Strings::None, 0),
            FieldId::PwmEnvMax => ("openhpsdr-e.cr.pwm-env-max", "PWM Envelope Maximum", Dec, Strings::None, 0),
            FieldId::GeneralFlags => ("openhpsdr-e.cr.flags", "Flags", Hex, Strings::None, 0),
            FieldId::IqTimestamp => ("openhpsdr-e.cr.flags.iq-ts", "I&Q Time Stamping", Boolean, Strings::Bool(ENABLED_DISABLED), 0x01),
            FieldId::Vita49 => ("openhpsdr-e.cr.flags.vita49", "VITA-49", Boolean, Strings::Bool(ENABLED_DISABLED), 0x02),
            FieldId::Vna => ("openhpsdr-e.cr.flags.vna", "VNA Mode", Boolean, Strings::Bool(ENABLED_DISABLED), 0x04),
            FieldId::FreqPhase => ("openhpsdr-e.cr.flags.freq-phase", "Frequency or Phase Word", Boolean, Strings::Bool(PHASE_FREQ), 0x08),
            FieldId::Reserved => ("openhpsdr-e.cr.reserved", "Reserved", Bytes, Strings::None, 0),
            FieldId::AtlasMercuryCfg => ("openhpsdr-e.cr.atlas-mercury-cfg", "Atlas Bus Mercury Configuration", Enum, Strings::Values(ATLAS_MERCURY_CONFIGS), 0x07),
            FieldId::ClockSource => ("openhpsdr-e.cr.clock-10mhz", "10 MHz Source", Enum, Strings::Values(CLOCK_SOURCES), 0x03),
            FieldId::HwFlags => ("openhpsdr-e.cr.hw-flags", "Hardware Flags", Hex, Strings::None, 0),
            FieldId::PaEnable => ("openhpsdr-e.cr.hw-flags.pa", "PA", Boolean, Strings::Bool(ENABLED_DISABLED), 0x01),
            FieldId::AtuAuto => ("openhpsdr-e.cr.hw-flags.atu-auto", "Apollo ATU Auto Tune", Boolean, Strings::Bool(ENABLED_DISABLED), 0x02),
            FieldId::MercuryCommonFreq => ("openhpsdr-e.cr.hw-flags.common-freq", "Multiple Mercury Frequency", Boolean, Strings::Bool(SAME_INDEPENDENT), 0x04),
            FieldId::Clock122Source => ("openhpsdr-e.cr.hw-flags.clock-122", "122.88 MHz Source", Boolean, Strings::Bool(MERCURY_PENELOPE), 0x08),
            FieldId::AlexEnable => ("openhpsdr-e.cr.alex-enable", "Alex Enable", Hex, Strings::None, 0),
            FieldId::AlexEnable0 => ("openhpsdr-e.cr.alex-enable.0", "Alex 0", Boolean, Strings::Bool(ENABLED_DISABLED), 0x01),
            FieldId::AlexEnable1 => ("openhpsdr-e.cr.alex-enable.1", "Alex 1", Boolean, Strings::Bool(ENABLED_DISABLED), 0x02),
            FieldId::AlexEnable2 => ("openhpsdr-e.cr.alex-enable.2", "Alex 2", Boolean, Strings::Bool(ENABLED_DISABLED), 0x04),
            FieldId::AlexEnable3 => ("openhpsdr-e.cr.alex-enable.3", "Alex 3", Boolean, Strings::Bool(ENABLED_DISABLED), 0x08),
            FieldId::AlexEnable4 => ("openhpsdr-e.cr.alex-enable.4", "Alex 4", Boolean, Strings::Bool(ENABLED_DISABLED), 0x10),
            FieldId::AlexEnable5 => ("openhpsdr-e.cr.alex-enable.5", "Alex 5", Boolean, Strings::Bool(ENABLED_DISABLED), 0x20),
            FieldId::AlexEnable6 => ("openhpsdr-e.cr.alex-enable.6", "Alex 6", Boolean, Strings::Bool(ENABLED_DISABLED), 0x40),
            FieldId::AlexEnable7 => ("openhpsdr-e.cr.alex-enable.7", "Alex 7", Boolean, Strings::Bool(ENABLED_DISABLED), 0x80),

            FieldId::BoardMac => ("openhpsdr-e.cr.board-mac", "Board MAC Address", Mac, Strings::None, 0),
            FieldId::BoardId => ("openhpsdr-e.cr.board-id", "Board Type", Enum, Strings::Values(BOARD_IDS), 0),
            FieldId::FwVersion => ("openhpsdr-e.cr.fw-version", "Firmware Version", Dec, Strings::None, 0),
            FieldId::Mercury0Version => ("openhpsdr-e.cr.mercury0-version", "Mercury 0 Version", Dec, Strings::None, 0),
            FieldId::Mercury1Version => ("openhpsdr-e.cr.mercury1-version", "Mercury 1 Version", Dec, Strings::None, 0),
            FieldId::Mercury2Version => ("openhpsdr-e.cr.mercury2-version", "Mercury 2 Version", Dec, Strings::None, 0),
            FieldId::Mercury3Version => ("openhpsdr-e.cr.mercury3-version", "Mercury 3 Version", Dec, Strings::None, 0),
            FieldId::PenelopeVersion => ("openhpsdr-e.cr.penelope-version", "Penelope Version", Dec, Strings::None, 0),
            FieldId::MetisVersion => ("openhpsdr-e.cr.metis-version", "Metis Version", Dec, Strings::None, 0),
            FieldId::DdcCount => ("openhpsdr-e.cr.ddc-count", "DDCs Implemented", Dec, Strings::None, 0),
            FieldId::FreqPhaseWord => ("openhpsdr-e.cr.freq-phase-word", "Frequency or Phase Word", Boolean, Strings::Bool(PHASE_FREQ), 0x01),

            FieldId::SetIpMac => ("openhpsdr-e.cr.set-ip.mac", "MAC Address", Mac, Strings::None, 0),
            FieldId::SetIpAddr => ("openhpsdr-e.cr.set-ip.addr", "IP Address", Ipv4, Strings::None, 0),

            FieldId::ProgramBlocks => ("openhpsdr-e.cr.program.blocks", "Program Blocks", Dec, Strings::None, 0),
            FieldId::ProgramData => ("openhpsdr-e.cr.program.data", "Program Data", Bytes, Strings::None, 0),

            FieldId::Pad => ("openhpsdr-e.pad", "Pad", Bytes, Strings::None, 0),
        };
        FieldDescriptor {
            id: *self,
            abbrev,
            label,
            encoding,
            strings,
            bitmask,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Warn,
}

#[derive(Clone, Copy, Debug, EnumIter, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpertKind {
    ExtraLength,
    ProgramRollOver,
    MalformedPad,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct ExpertDescriptor {
    pub kind: ExpertKind,
    pub abbrev: &'static str,
    pub severity: Severity,
    pub summary: &'static str,
}

impl ExpertKind {
    pub fn descriptor(&self) -> ExpertDescriptor {
        let (abbrev, summary) = match self {
            ExpertKind::ExtraLength => (
                "openhpsdr-e.extra-length",
                "Extra bytes after the expected end of the datagram",
            ),
            ExpertKind::ProgramRollOver => (
                "openhpsdr-e.program-roll-over",
                "Program data length exceeds a block, host numbering is off",
            ),
            ExpertKind::MalformedPad => ("openhpsdr-e.malformed-pad", "Non-zero pad byte"),
        };
        ExpertDescriptor {
            kind: *self,
            abbrev,
            severity: Severity::Warn,
            summary,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Registration {
    pub fields: Vec<FieldDescriptor>,
    pub experts: Vec<ExpertDescriptor>,
}

/// Everything exposed to the host environment
pub fn registration() -> Registration {
    Registration {
        fields: FieldId::iter().map(|id| id.descriptor()).collect(),
        experts: ExpertKind::iter().map(|kind| kind.descriptor()).collect(),
    }
}
