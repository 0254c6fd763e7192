//! Substreams whose bodies are not decoded yet: a banner and the sequence number

use strum::IntoEnumIterator;

use hpsdr_api as api;
use api::classifiers::{PortTable, Substream};
use api::config::Config;
use api::dissectors::{Error, Reader};
use api::fields::FieldId;
use api::packet::Packet;
use api::plugins::processor::Processor;
use api::plugins::Plugin;
use api::record::{Field, Record, Value};

#[derive(Clone, Debug)]
pub struct StreamProcessor {
    substream: Substream,
    name: String,
}

impl StreamProcessor {
    pub fn new(substream: Substream) -> Self {
        StreamProcessor {
            substream,
            name: format!("openhpsdr-e.{:?}", substream).to_lowercase(),
        }
    }
}

impl Plugin for StreamProcessor {
    fn name(&self) -> &str {
        self.name.as_str()
    }
}

impl Processor for StreamProcessor {
    fn substream(&self) -> Substream {
        self.substream
    }

    fn parse_pkt(
        &self,
        pkt: &dyn Packet,
        _cfg: &Config,
        _ports: &PortTable,
        rec: &mut Record,
    ) -> Result<(), Error> {
        rec.add_field(Field::new(
            FieldId::Banner,
            0,
            pkt.caplen(),
            Value::Text(self.substream.name().to_string()),
        ));

        let mut reader = Reader::new(pkt.payload());
        let seq = reader.read_u32()?;
        rec.add_field(Field::new(FieldId::Seq, 0, 4, Value::U32(seq)));
        rec.consumed = reader.offset();
        Ok(())
    }
}

/// One processor per substream other than Command-Reply
pub fn processors() -> Vec<Box<dyn Processor>> {
    Substream::iter()
        .filter(|s| *s != Substream::CR)
        .map(|s| Box::new(StreamProcessor::new(s)) as Box<dyn Processor>)
        .collect()
}
