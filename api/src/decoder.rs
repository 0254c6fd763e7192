use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use arc_swap::ArcSwap;

use crate::classifiers::{classify, PortTable, Substream};
use crate::config::Config;
use crate::packet::Packet;
use crate::plugins::processor::Processor;
use crate::record::Record;

/// Classifier, one processor per substream, the active configuration and the learned
/// port table
pub struct Decoder {
    processors: HashMap<Substream, Box<dyn Processor>>,
    ports: Arc<PortTable>,
    config: ArcSwap<Config>,
}

impl Decoder {
    pub fn new(processors: Vec<Box<dyn Processor>>, cfg: Config) -> Result<Self> {
        let mut table = HashMap::new();
        for processor in processors {
            processor.init(&cfg)?;
            let substream = processor.substream();
            log::debug!("{} decodes {}", processor.name(), substream);
            if table.insert(substream, processor).is_some() {
                return Err(anyhow!("Duplicate processor for {}", substream));
            }
        }

        Ok(Decoder {
            processors: table,
            ports: Arc::new(PortTable::new()),
            config: ArcSwap::from_pointee(cfg),
        })
    }

    /// Publish a new configuration, every later decode observes it
    pub fn set_config(&self, cfg: Config) {
        self.config.store(Arc::new(cfg));
    }

    pub fn config(&self) -> Arc<Config> {
        self.config.load_full()
    }

    pub fn ports(&self) -> &Arc<PortTable> {
        &self.ports
    }

    /// Decode one datagram, None when it belongs to some other protocol
    pub fn decode(&self, pkt: &dyn Packet) -> Option<Record> {
        let ports = self.ports.snapshot();
        let (substream, direction) = classify(pkt, &ports)?;
        let processor = match self.processors.get(&substream) {
            Some(p) => p,
            None => {
                log::warn!("No processor registered for {}", substream);
                return None;
            }
        };

        let cfg = self.config.load();
        let mut rec = Record::new(substream, direction, pkt.caplen());
        if let Err(e) = processor.parse_pkt(pkt, &cfg, &self.ports, &mut rec) {
            log::debug!("{} datagram cut short: {}", substream, e);
            rec.truncated = true;
        }
        Some(rec)
    }
}
