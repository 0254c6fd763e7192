use hpsdr_api as api;
use api::config::Config;
use api::consts::PROGRAM_BLOCK_LEN;
use api::dissectors::{Error, Reader};
use api::fields::{ExpertKind, FieldId};
use api::record::{Field, Record, Value};

use crate::pad::pad;

/// Firmware bytes carried by a Program datagram, and by how much the host overshot
///
/// `blocks` counts the program bytes still to come, this datagram included. Once the
/// sequence number catches up with it the last, possibly short, block is in flight.
pub fn data_length(seq: u32, blocks: u32) -> (usize, Option<u64>) {
    let sent = seq as u64 * PROGRAM_BLOCK_LEN as u64;
    let blocks = blocks as u64;
    if sent == 0 || blocks / sent != 0 {
        return (PROGRAM_BLOCK_LEN, None);
    }

    let len = sent - blocks;
    if len > PROGRAM_BLOCK_LEN as u64 {
        (PROGRAM_BLOCK_LEN, Some(len - PROGRAM_BLOCK_LEN as u64))
    } else {
        (len as usize, None)
    }
}

/// Host to hardware Program: block counter, firmware data, zero pad up to a full block
pub fn parse(reader: &mut Reader, rec: &mut Record, cfg: &Config, seq: u32) -> Result<(), Error> {
    let offset = reader.offset();
    let blocks = reader.read_u32()?;
    rec.add_field(Field::new(FieldId::ProgramBlocks, offset, 4, Value::U32(blocks)));

    let (len, roll_over) = data_length(seq, blocks);
    if let Some(amount) = roll_over {
        if cfg.strict_program_data_size {
            rec.warn(
                ExpertKind::ProgramRollOver,
                offset,
                4,
                format!(
                    "Program data length rolled over by {} byte(s), sequence {} blocks {}",
                    amount, seq, blocks
                ),
            );
        }
    }

    if len > 0 {
        let offset = reader.offset();
        let data = reader.read_bytes(len)?;
        rec.add_field(Field::new(
            FieldId::ProgramData,
            offset,
            len,
            Value::Bytes(data.to_vec()),
        ));
    }

    pad(reader, rec, cfg, PROGRAM_BLOCK_LEN - len)
}
