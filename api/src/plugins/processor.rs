use crate::classifiers::{PortTable, Substream};
use crate::config::Config;
use crate::dissectors::Error;
use crate::packet::Packet;
use crate::plugins::Plugin;
use crate::record::Record;

/// Decoder of one substream
///
/// Processors hold no per datagram state, a single instance serves every thread.
/// The only shared state a processor may touch is the learned port table.
pub trait Processor: Send + Sync + Plugin {
    /// Substream this processor decodes
    fn substream(&self) -> Substream;

    /// Decode a single datagram into the record
    ///
    /// Fields emitted before an error stay in the record. A short read is reported as
    /// `Error::Truncated` and the caller marks the record truncated.
    fn parse_pkt(
        &self,
        pkt: &dyn Packet,
        cfg: &Config,
        ports: &PortTable,
        rec: &mut Record,
    ) -> Result<(), Error>;
}
