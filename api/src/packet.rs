//! We do not perform any protocol parsing in this module.
//! All we do here is describing a captured UDP datagram: its payload and the two ports
//! the classifier and the processors need.

use serde::Serialize;

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Sent by the host computer to the radio
    HostToHardware = 0,
    /// Sent by the radio to the host computer
    HardwareToHost = 1,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::HostToHardware
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::HostToHardware => write!(f, "Host -> Hardware"),
            Direction::HardwareToHost => write!(f, "Hardware -> Host"),
        }
    }
}

pub trait Packet: Send {
    /// Get UDP payload
    fn payload(&self) -> &[u8];

    /// Get UDP src port
    fn src_port(&self) -> u16;

    /// Get UDP dst port
    fn dst_port(&self) -> u16;

    /// Get payload capture length
    #[inline]
    fn caplen(&self) -> usize {
        self.payload().len()
    }

    /// First two payload bytes as a big endian word, if the payload is long enough
    #[inline]
    fn leading_word(&self) -> Option<u16> {
        match self.payload() {
            [hi, lo, ..] => Some(u16::from_be_bytes([*hi, *lo])),
            _ => None,
        }
    }
}

impl<'a> std::fmt::Debug for dyn Packet + 'a {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Packet")
            .field("src_port", &self.src_port())
            .field("dst_port", &self.dst_port())
            .field("caplen", &self.caplen())
            .finish()
    }
}

/// An owned captured UDP datagram, immutable for the whole decode call
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Datagram {
    pub src_port: u16,
    pub dst_port: u16,
    pub payload: Vec<u8>,
}

impl Datagram {
    pub fn new(src_port: u16, dst_port: u16, payload: Vec<u8>) -> Self {
        Datagram {
            src_port,
            dst_port,
            payload,
        }
    }
}

impl Packet for Datagram {
    fn payload(&self) -> &[u8] {
        self.payload.as_slice()
    }

    fn src_port(&self) -> u16 {
        self.src_port
    }

    fn dst_port(&self) -> u16 {
        self.dst_port
    }
}
