use hpsdr_api as api;
use api::classifiers::{LearnedPorts, PortTable};
use api::consts::{AtlasMercuryConfig, ClockSource, Coded, GeneralFlags, HardwareFlags};
use api::dissectors::{Error, Reader};
use api::fields::{FieldId, ALEX_ENABLE_BITS, WB_ENABLE_BITS};
use api::record::{Field, Record, Value};

const RESERVED_LEN: usize = 18;

/// Settings of a General command worth keeping around
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct General {
    pub ports: LearnedPorts,
    pub flags: GeneralFlags,
    pub atlas_mercury: Option<Coded<AtlasMercuryConfig>>,
    pub clock: Option<Coded<ClockSource>>,
    pub hw_flags: HardwareFlags,
}

fn u8_field(reader: &mut Reader, rec: &mut Record, id: FieldId) -> Result<u8, Error> {
    let offset = reader.offset();
    let v = reader.read_u8()?;
    rec.add_field(Field::new(id, offset, 1, Value::U8(v)));
    Ok(v)
}

fn u16_field(reader: &mut Reader, rec: &mut Record, id: FieldId) -> Result<u16, Error> {
    let offset = reader.offset();
    let v = reader.read_u16()?;
    rec.add_field(Field::new(id, offset, 2, Value::U16(v)));
    Ok(v)
}

fn bits_field(
    reader: &mut Reader,
    rec: &mut Record,
    id: FieldId,
    bits: &[FieldId],
) -> Result<u8, Error> {
    let offset = reader.offset();
    let v = reader.read_u8()?;
    rec.add_field(Field::new(id, offset, 1, Value::U8(v)).with_bits(bits));
    Ok(v)
}

/// Host to hardware General command
///
/// Every port is announced again by each General command, zero meaning the default.
/// The learned port table is only replaced once the whole body was read.
pub fn parse(reader: &mut Reader, rec: &mut Record, table: &PortTable) -> Result<General, Error> {
    let mut general = General::default();
    let ports = &mut general.ports;

    ports.ddcc = u16_field(reader, rec, FieldId::DdccPort)?;
    ports.ducc = u16_field(reader, rec, FieldId::DuccPort)?;
    ports.hpc = u16_field(reader, rec, FieldId::HpcPort)?;
    ports.hps = u16_field(reader, rec, FieldId::HpsPort)?;
    ports.ddca = u16_field(reader, rec, FieldId::DdcaPort)?;
    ports.duciq_base = u16_field(reader, rec, FieldId::DuciqPort)?;
    ports.ddciq_base = u16_field(reader, rec, FieldId::DdciqPort)?;
    ports.micl = u16_field(reader, rec, FieldId::MiclPort)?;
    ports.wbd_base = u16_field(reader, rec, FieldId::WbdPort)?;

    bits_field(reader, rec, FieldId::WbEnable, &WB_ENABLE_BITS)?;
    u16_field(reader, rec, FieldId::WbSamples)?;
    u8_field(reader, rec, FieldId::WbSampleSize)?;
    u8_field(reader, rec, FieldId::WbRate)?;
    u8_field(reader, rec, FieldId::WbPpf)?;

    ports.mem_host = u16_field(reader, rec, FieldId::MemHostPort)?;
    ports.mem_hw = u16_field(reader, rec, FieldId::MemHwPort)?;

    u16_field(reader, rec, FieldId::PwmEnvMin)?;
    u16_field(reader, rec, FieldId::PwmEnvMax)?;

    let flags = bits_field(
        reader,
        rec,
        FieldId::GeneralFlags,
        &[
            FieldId::IqTimestamp,
            FieldId::Vita49,
            FieldId::Vna,
            FieldId::FreqPhase,
        ],
    )?;
    general.flags = GeneralFlags::from_bits_truncate(flags);

    let offset = reader.offset();
    let reserved = reader.read_bytes(RESERVED_LEN)?;
    rec.add_field(Field::new(
        FieldId::Reserved,
        offset,
        RESERVED_LEN,
        Value::Bytes(reserved.to_vec()),
    ));

    let cfg = u8_field(reader, rec, FieldId::AtlasMercuryCfg)?;
    general.atlas_mercury = Some(Coded::from(cfg & AtlasMercuryConfig::MASK));
    let clock = u8_field(reader, rec, FieldId::ClockSource)?;
    general.clock = Some(Coded::from(clock & ClockSource::MASK));

    let hw_flags = bits_field(
        reader,
        rec,
        FieldId::HwFlags,
        &[
            FieldId::PaEnable,
            FieldId::AtuAuto,
            FieldId::MercuryCommonFreq,
            FieldId::Clock122Source,
        ],
    )?;
    general.hw_flags = HardwareFlags::from_bits_truncate(hw_flags);
    bits_field(reader, rec, FieldId::AlexEnable, &ALEX_ENABLE_BITS)?;

    table.commit(general.ports);
    Ok(general)
}
