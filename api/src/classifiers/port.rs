use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Serialize;

use super::Substream;

/// Ports announced by the last complete General command, 0 means unset
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub struct LearnedPorts {
    pub ddcc: u16,
    pub hps: u16,
    pub ducc: u16,
    pub micl: u16,
    pub hpc: u16,
    pub wbd_base: u16,
    pub ddca: u16,
    pub duciq_base: u16,
    pub ddciq_base: u16,
    pub mem_host: u16,
    pub mem_hw: u16,
}

impl LearnedPorts {
    /// Learned port or port base of a substream, MEM has two ports and CR none so both
    /// yield 0
    pub fn port(&self, substream: Substream) -> u16 {
        match substream {
            Substream::DDCC => self.ddcc,
            Substream::HPS => self.hps,
            Substream::DUCC => self.ducc,
            Substream::MICL => self.micl,
            Substream::HPC => self.hpc,
            Substream::WBD => self.wbd_base,
            Substream::DDCA => self.ddca,
            Substream::DUCIQ => self.duciq_base,
            Substream::DDCIQ => self.ddciq_base,
            Substream::CR | Substream::MEM => 0,
        }
    }
}

/// Shared learned port table
///
/// Readers take a snapshot, so a classification never observes half of a General
/// command's ports. Writers replace the whole table at once.
#[derive(Debug, Default)]
pub struct PortTable {
    ports: ArcSwap<LearnedPorts>,
}

impl PortTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn snapshot(&self) -> Arc<LearnedPorts> {
        self.ports.load_full()
    }

    pub fn commit(&self, ports: LearnedPorts) {
        log::debug!("learned ports updated: {:?}", ports);
        self.ports.store(Arc::new(ports));
    }

    /// Forget every learned port, used when a new capture is opened
    pub fn reset(&self) {
        self.ports.store(Arc::new(LearnedPorts::default()));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn commit_and_reset() {
        let table = PortTable::new();
        assert_eq!(*table.snapshot(), LearnedPorts::default());

        let before = table.snapshot();
        table.commit(LearnedPorts {
            ddcc: 2001,
            ddciq_base: 2000,
            ..Default::default()
        });
        // old snapshots stay untouched
        assert_eq!(before.ddcc, 0);
        assert_eq!(table.snapshot().ddcc, 2001);
        assert_eq!(table.snapshot().ddciq_base, 2000);

        table.reset();
        assert_eq!(*table.snapshot(), LearnedPorts::default());
    }
}
