use hpsdr_api as api;
use api::config::Config;
use api::dissectors::{Error, Reader};
use api::fields::FieldId;
use api::record::{Field, Record, Value};

use crate::pad::pad;

const SET_IP_PAD_LEN: usize = 45;

/// Host to hardware Set IP: target MAC address, new IPv4 address, pad
pub fn parse(reader: &mut Reader, rec: &mut Record, cfg: &Config) -> Result<(), Error> {
    let offset = reader.offset();
    let mac = reader.read_mac()?;
    rec.add_field(Field::new(FieldId::SetIpMac, offset, 6, Value::Mac(mac)));

    let offset = reader.offset();
    let addr = reader.read_ipv4()?;
    rec.add_field(Field::new(FieldId::SetIpAddr, offset, 4, Value::Ipv4(addr)));

    pad(reader, rec, cfg, SET_IP_PAD_LEN)
}
