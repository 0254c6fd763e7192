#![allow(non_camel_case_types)]

use std::fmt::{Display, Formatter};

use num_traits::FromPrimitive;
use serde::Serialize;

/// Command-Reply port, shared with the legacy USB-over-IP protocol
pub const CR_PORT: u16 = 1024;
/// Leading word of the legacy protocol, which is never ours
pub const LEGACY_SYNC: u16 = 0xeffe;

/// Length of every Command-Reply datagram from the sequence number onward
pub const CR_LEN: usize = 60;
/// Sequence number and command code
pub const CR_HEADER_LEN: usize = 5;
/// Firmware bytes carried by one Program datagram
pub const PROGRAM_BLOCK_LEN: usize = 256;

pub fn value_string(table: &[(u32, &'static str)], v: u32) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == v).map(|(_, s)| *s)
}

/// Display an enum through its value table
macro_rules! display_from_table {
    ($t:ty, $table:expr) => {
        impl Display for $t {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(value_string($table, *self as u32).unwrap_or("Reserved"))
            }
        }
    };
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Primitive, Serialize)]
pub enum Command {
    General = 0x00,
    Discovery = 0x02,
    SetIp = 0x03,
    Erase = 0x04,
    Program = 0x05,
}

pub const COMMANDS: &[(u32, &str)] = &[
    (0x00, "General"),
    (0x02, "Discovery"),
    (0x03, "Set IP"),
    (0x04, "Erase"),
    (0x05, "Program"),
];

display_from_table!(Command, COMMANDS);

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Primitive, Serialize)]
pub enum BoardId {
    Atlas = 0,
    Hermes_1 = 1,
    Hermes_2 = 2,
    Angelia = 3,
    Orion = 4,
    Hermes_Lite = 6,
    Xml = 0xfe,
    Full = 0xff,
}

pub const BOARD_IDS: &[(u32, &str)] = &[
    (0, "Atlas"),
    (1, "Hermes-1"),
    (2, "Hermes-2"),
    (3, "Angelia"),
    (4, "Orion"),
    (5, "Reserved"),
    (6, "Hermes-Lite"),
    (7, "Reserved"),
    (8, "Reserved"),
    (9, "Reserved"),
    (0xfe, "XML"),
    (0xff, "Full"),
];

display_from_table!(BoardId, BOARD_IDS);

/// Number of DDCs an Atlas bus Mercury setup runs, low 3 bits
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Primitive, Serialize)]
pub enum AtlasMercuryConfig {
    SingleDdc = 0,
    TwoDdcs = 1,
    ThreeDdcs = 2,
    FourDdcs = 3,
}

impl AtlasMercuryConfig {
    pub const MASK: u8 = 0x07;
}

pub const ATLAS_MERCURY_CONFIGS: &[(u32, &str)] = &[
    (0, "Single DDC"),
    (1, "Two DDCs"),
    (2, "Three DDCs"),
    (3, "Four DDCs"),
];

display_from_table!(AtlasMercuryConfig, ATLAS_MERCURY_CONFIGS);

/// 10 MHz reference source, low 2 bits
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Primitive, Serialize)]
pub enum ClockSource {
    AtlasExcalibur = 0,
    Penelope = 1,
    Mercury = 2,
}

impl ClockSource {
    pub const MASK: u8 = 0x03;
}

pub const CLOCK_SOURCES: &[(u32, &str)] = &[(0, "Atlas/Excalibur"), (1, "Penelope"), (2, "Mercury")];

display_from_table!(ClockSource, CLOCK_SOURCES);

/// A value from a closed set, or the raw value when it falls outside the set
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum Coded<T> {
    Known(T),
    Reserved(u8),
}

impl<T: FromPrimitive> From<u8> for Coded<T> {
    fn from(v: u8) -> Self {
        match T::from_u8(v) {
            Some(t) => Coded::Known(t),
            None => Coded::Reserved(v),
        }
    }
}

impl<T> Coded<T> {
    pub fn known(&self) -> Option<&T> {
        match self {
            Coded::Known(t) => Some(t),
            Coded::Reserved(_) => None,
        }
    }
}

impl<T: Display> Display for Coded<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Coded::Known(t) => write!(f, "{}", t),
            Coded::Reserved(v) => write!(f, "Reserved ({})", v),
        }
    }
}

/// Labels of a single bit flag
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Polarity {
    pub set: &'static str,
    pub clear: &'static str,
}

impl Polarity {
    #[inline]
    pub fn label(&self, bit: bool) -> &'static str {
        if bit {
            self.set
        } else {
            self.clear
        }
    }
}

pub const PHASE_FREQ: Polarity = Polarity {
    set: "Phase",
    clear: "Freq",
};
pub const MERCURY_PENELOPE: Polarity = Polarity {
    set: "Mercury",
    clear: "Penelope",
};
pub const SAME_INDEPENDENT: Polarity = Polarity {
    set: "Same",
    clear: "Independent",
};
pub const ENABLED_DISABLED: Polarity = Polarity {
    set: "Enabled",
    clear: "Disabled",
};

bitflags! {
    /// General command, byte 37
    #[derive(Default)]
    pub struct GeneralFlags: u8 {
        const IQ_TIMESTAMP = 0b0000_0001;
        const VITA_49 = 0b0000_0010;
        const VNA = 0b0000_0100;
        const PHASE_WORD = 0b0000_1000;
    }
}

bitflags! {
    /// General command, byte 58
    #[derive(Default)]
    pub struct HardwareFlags: u8 {
        const PA = 0b0000_0001;
        const APOLLO_ATU_AUTO = 0b0000_0010;
        const MERCURY_COMMON_FREQ = 0b0000_0100;
        const CLOCK_122_MERCURY = 0b0000_1000;
    }
}

/// Firmware versions are sent as tenths, 17 is version 1.7
pub fn firmware_version(v: u8) -> String {
    format!("{}.{}", v / 10, v % 10)
}
