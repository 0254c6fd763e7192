use anyhow::Result;

use hpsdr_api as api;
use api::classifiers::{PortTable, Substream};
use api::config::Config;
use api::consts::{Coded, Command, CR_LEN, CR_HEADER_LEN, PROGRAM_BLOCK_LEN};
use api::dissectors::{Error, Reader};
use api::fields::{ExpertKind, FieldId};
use api::packet::{Direction, Packet};
use api::plugins::processor::Processor;
use api::plugins::Plugin;
use api::record::{Field, Record, Value};

mod discovery;
mod general;
mod pad;
mod program;
mod set_ip;

pub use general::General;
pub use program::data_length;

/// Pad following the header of Discovery and Erase commands
const COMMAND_PAD_LEN: usize = CR_LEN - CR_HEADER_LEN;
/// Header, block counter and one block of data
const PROGRAM_LEN: usize = CR_HEADER_LEN + 4 + PROGRAM_BLOCK_LEN;

#[derive(Clone, Debug, Default)]
pub struct CommandReplyProcessor {}

impl Plugin for CommandReplyProcessor {
    fn name(&self) -> &str {
        "openhpsdr-e.cr"
    }

    fn init(&self, cfg: &Config) -> Result<()> {
        log::debug!(
            "{} strict size: {}, strict pad: {}, strict program data size: {}",
            self.name(),
            cfg.strict_size,
            cfg.strict_pad,
            cfg.strict_program_data_size
        );
        Ok(())
    }
}

impl CommandReplyProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the body, returns the expected datagram length when the command is known
    fn parse_body(
        &self,
        reader: &mut Reader,
        rec: &mut Record,
        cfg: &Config,
        ports: &PortTable,
        seq: u32,
        cmd: u8,
    ) -> Result<Option<usize>, Error> {
        let expected = match (Coded::<Command>::from(cmd), rec.direction) {
            (Coded::Known(Command::General), Direction::HostToHardware) => {
                let general = general::parse(reader, rec, ports)?;
                log::debug!(
                    "general command {}: {:?}, {:?}, {:?}",
                    seq,
                    general.flags,
                    general.atlas_mercury,
                    general.clock
                );
                CR_LEN
            }
            (Coded::Known(Command::Discovery), Direction::HostToHardware)
            | (Coded::Known(Command::Erase), Direction::HostToHardware) => {
                pad::pad(reader, rec, cfg, COMMAND_PAD_LEN)?;
                CR_LEN
            }
            (Coded::Known(Command::SetIp), Direction::HostToHardware) => {
                set_ip::parse(reader, rec, cfg)?;
                CR_LEN
            }
            (Coded::Known(Command::Program), Direction::HostToHardware) => {
                program::parse(reader, rec, cfg, seq)?;
                PROGRAM_LEN
            }
            (Coded::Known(Command::Discovery), Direction::HardwareToHost)
            | (Coded::Known(Command::SetIp), Direction::HardwareToHost)
            | (Coded::Known(Command::Erase), Direction::HardwareToHost) => {
                discovery::parse_reply(reader, rec, cfg)?;
                CR_LEN
            }
            _ => {
                log::trace!("command 0x{:02x} {} left undecoded", cmd, rec.direction);
                return Ok(None);
            }
        };
        Ok(Some(expected))
    }

    fn parse(
        &self,
        reader: &mut Reader,
        rec: &mut Record,
        cfg: &Config,
        ports: &PortTable,
    ) -> Result<(), Error> {
        let seq = reader.read_u32()?;
        rec.add_field(Field::new(FieldId::Seq, 0, 4, Value::U32(seq)));

        let offset = reader.offset();
        let cmd = reader.read_u8()?;
        rec.add_field(Field::new(FieldId::Cmd, offset, 1, Value::U8(cmd)));

        if self.parse_body(reader, rec, cfg, ports, seq, cmd)?.is_none() {
            return Ok(());
        }

        let consumed = reader.offset();
        if cfg.strict_size && rec.caplen > consumed {
            let extra = rec.caplen - consumed;
            rec.warn(
                ExpertKind::ExtraLength,
                consumed,
                extra,
                format!("Extra length: {} byte(s)", extra),
            );
        }
        Ok(())
    }
}

impl Processor for CommandReplyProcessor {
    fn substream(&self) -> Substream {
        Substream::CR
    }

    fn parse_pkt(
        &self,
        pkt: &dyn Packet,
        cfg: &Config,
        ports: &PortTable,
        rec: &mut Record,
    ) -> Result<(), Error> {
        rec.add_field(Field::new(
            FieldId::Banner,
            0,
            pkt.caplen(),
            Value::Text(Substream::CR.name().to_string()),
        ));

        let mut reader = Reader::new(pkt.payload());
        let result = self.parse(&mut reader, rec, cfg, ports);
        rec.consumed = reader.offset();
        result
    }
}

pub fn new_processor() -> Box<dyn Processor> {
    Box::new(CommandReplyProcessor::new())
}
