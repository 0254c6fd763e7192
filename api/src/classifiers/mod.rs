use serde::Serialize;

use crate::consts::{CR_PORT, LEGACY_SYNC};
use crate::packet::{Direction, Packet};

pub mod port;

pub use port::{LearnedPorts, PortTable};

/// Logical UDP channels of the protocol
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, strum::EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Substream {
    /// Command-Reply
    CR,
    /// DDC Command
    DDCC,
    /// High Priority Status
    HPS,
    /// DUC Command
    DUCC,
    /// Mic Line samples
    MICL,
    /// High Priority Command
    HPC,
    /// Wide-Band Data
    WBD,
    /// DDC Audio
    DDCA,
    /// DUC IQ samples
    DUCIQ,
    /// DDC IQ samples
    DDCIQ,
    /// Memory mapped registers
    MEM,
}

impl Substream {
    pub fn name(&self) -> &'static str {
        match self {
            Substream::CR => "Command Reply",
            Substream::DDCC => "DDC Command",
            Substream::HPS => "High Priority Status",
            Substream::DUCC => "DUC Command",
            Substream::MICL => "Mic Line",
            Substream::HPC => "High Priority Command",
            Substream::WBD => "Wide Band Data",
            Substream::DDCA => "DDC Audio",
            Substream::DUCIQ => "DUC IQ",
            Substream::DDCIQ => "DDC IQ",
            Substream::MEM => "Memory Mapped",
        }
    }
}

impl std::fmt::Display for Substream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Clone, Copy, Debug)]
enum Side {
    Src,
    Dst,
}

impl Side {
    /// Hardware sources its own ports, the host targets them
    #[inline]
    fn direction(self) -> Direction {
        match self {
            Side::Src => Direction::HardwareToHost,
            Side::Dst => Direction::HostToHardware,
        }
    }
}

/// One row of the port rule table
struct Rule {
    substream: Substream,
    side: Side,
    default: u16,
    /// Number of consecutive ports starting at the base
    range: u16,
}

impl Rule {
    #[inline]
    fn matches(&self, port: u16, ports: &LearnedPorts) -> bool {
        let learned = ports.port(self.substream);
        in_range(port, self.default, self.range)
            || (learned != 0 && in_range(port, learned, self.range))
    }
}

#[inline]
fn in_range(port: u16, base: u16, range: u16) -> bool {
    port >= base && (port - base) < range
}

#[rustfmt::skip]
const RULES: [Rule; 9] = [
    Rule { substream: Substream::DDCC, side: Side::Dst, default: 1025, range: 1 },
    Rule { substream: Substream::HPS, side: Side::Src, default: 1025, range: 1 },
    Rule { substream: Substream::DUCC, side: Side::Dst, default: 1026, range: 1 },
    Rule { substream: Substream::MICL, side: Side::Src, default: 1026, range: 1 },
    Rule { substream: Substream::HPC, side: Side::Dst, default: 1027, range: 1 },
    Rule { substream: Substream::WBD, side: Side::Src, default: 1027, range: 8 },
    Rule { substream: Substream::DDCA, side: Side::Dst, default: 1028, range: 1 },
    Rule { substream: Substream::DUCIQ, side: Side::Dst, default: 1029, range: 8 },
    Rule { substream: Substream::DDCIQ, side: Side::Src, default: 1035, range: 80 },
];

/// Lowest accepted memory mapped ports
pub const MEM_HOST_MIN: u16 = 1037;
pub const MEM_HW_MIN: u16 = 1115;

/// Decide which substream a datagram belongs to and which way it travels,
/// None when it is not ours
pub fn classify(pkt: &dyn Packet, ports: &LearnedPorts) -> Option<(Substream, Direction)> {
    let class = classify_ports(pkt.src_port(), pkt.dst_port(), pkt.leading_word(), ports);
    log::trace!("{:?} classified as {:?}", pkt, class);
    class
}

fn classify_ports(
    src: u16,
    dst: u16,
    word: Option<u16>,
    ports: &LearnedPorts,
) -> Option<(Substream, Direction)> {
    if word == Some(LEGACY_SYNC) {
        return None;
    }

    if dst == CR_PORT {
        return Some((Substream::CR, Direction::HostToHardware));
    }

    if src == CR_PORT {
        return Some((Substream::CR, Direction::HardwareToHost));
    }

    for rule in RULES.iter() {
        let port = match rule.side {
            Side::Src => src,
            Side::Dst => dst,
        };
        if rule.matches(port, ports) {
            return Some((rule.substream, rule.side.direction()));
        }
    }

    if dst == ports.mem_host && dst >= MEM_HOST_MIN {
        return Some((Substream::MEM, Direction::HostToHardware));
    }

    if src == ports.mem_hw && src >= MEM_HW_MIN {
        return Some((Substream::MEM, Direction::HardwareToHost));
    }

    None
}
