use hpsdr_api as api;
use api::config::Config;
use api::consts::{firmware_version, BoardId, Coded};
use api::dissectors::{Error, Reader};
use api::fields::FieldId;
use api::record::{Field, Record, Value};

use crate::pad::pad;

/// Pad after the 16 significant reply bytes
const REPLY_PAD_LEN: usize = 39;

fn version(reader: &mut Reader, rec: &mut Record, id: FieldId) -> Result<u8, Error> {
    let offset = reader.offset();
    let v = reader.read_u8()?;
    rec.add_field(Field::new(id, offset, 1, Value::U8(v)).with_display(firmware_version(v)));
    Ok(v)
}

/// Hardware to host reply to Discovery, Set IP and Erase, returns the board type
pub fn parse_reply(reader: &mut Reader, rec: &mut Record, cfg: &Config) -> Result<Coded<BoardId>, Error> {
    let offset = reader.offset();
    let mac = reader.read_mac()?;
    rec.add_field(Field::new(FieldId::BoardMac, offset, 6, Value::Mac(mac)));

    let offset = reader.offset();
    let id = reader.read_u8()?;
    rec.add_field(Field::new(FieldId::BoardId, offset, 1, Value::U8(id)));
    let board = Coded::<BoardId>::from(id);

    version(reader, rec, FieldId::FwVersion)?;
    version(reader, rec, FieldId::Mercury0Version)?;
    version(reader, rec, FieldId::Mercury1Version)?;
    version(reader, rec, FieldId::Mercury2Version)?;
    version(reader, rec, FieldId::Mercury3Version)?;
    version(reader, rec, FieldId::PenelopeVersion)?;
    version(reader, rec, FieldId::MetisVersion)?;

    let offset = reader.offset();
    let ddcs = reader.read_u8()?;
    rec.add_field(Field::new(FieldId::DdcCount, offset, 1, Value::U8(ddcs)));

    let offset = reader.offset();
    let word = reader.read_u8()?;
    rec.add_field(Field::new(FieldId::FreqPhaseWord, offset, 1, Value::U8(word)));

    pad(reader, rec, cfg, REPLY_PAD_LEN)?;
    log::debug!("board {} {} with {} DDC(s)", board, api::record::format_mac(&mac), ddcs);
    Ok(board)
}
