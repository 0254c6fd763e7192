use hpsdr_api as api;
use api::config::Config;
use api::dissectors::{Error, Reader};
use api::record::Record;

/// Emit a pad region of `len` bytes starting at the cursor
///
/// With strict pad the whole region becomes one field and every byte is checked.
/// Otherwise only the first byte is emitted and the rest is skipped, as far as it was
/// captured.
pub fn pad(reader: &mut Reader, rec: &mut Record, cfg: &Config, len: usize) -> Result<(), Error> {
    if len == 0 {
        return Ok(());
    }

    let offset = reader.offset();
    if cfg.strict_pad {
        let data = reader.read_bytes(len)?;
        rec.add_pad(offset, data, None);
    } else {
        let data = reader.read_bytes(1)?;
        rec.add_pad(offset, data, Some("disabled"));
        reader.skip(len - 1);
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use api::classifiers::Substream;
    use api::fields::{ExpertKind, FieldId};
    use api::packet::Direction;

    fn record(caplen: usize) -> Record {
        Record::new(Substream::CR, Direction::HostToHardware, caplen)
    }

    #[test]
    fn strict() -> Result<(), Error> {
        let buf = [0u8; 10];
        let mut reader = Reader::new(&buf);
        let mut rec = record(buf.len());
        pad(&mut reader, &mut rec, &Config::default(), 10)?;
        assert_eq!(reader.offset(), 10);
        assert_eq!(rec.field(FieldId::Pad).map(|f| f.length), Some(10));
        assert!(rec.diagnostics.is_empty());
        Ok(())
    }

    #[test]
    fn strict_non_zero() -> Result<(), Error> {
        let mut buf = [0u8; 10];
        buf[9] = 0x5a;
        let mut reader = Reader::new(&buf);
        let mut rec = record(buf.len());
        pad(&mut reader, &mut rec, &Config::default(), 10)?;
        assert!(rec.diagnostic(ExpertKind::MalformedPad).is_some());
        Ok(())
    }

    #[test]
    fn strict_short() {
        let buf = [0u8; 6];
        let mut reader = Reader::new(&buf);
        let mut rec = record(buf.len());
        let err = pad(&mut reader, &mut rec, &Config::default(), 10).unwrap_err();
        assert_eq!(err, Error::Truncated { offset: 0, needed: 4 });
        assert!(rec.fields.is_empty());
    }

    #[test]
    fn relaxed() -> Result<(), Error> {
        let mut cfg = Config::default();
        cfg.strict_pad = false;

        // bytes after the first one are never looked at
        let buf = [0u8, 1, 2, 3, 4, 5];
        let mut reader = Reader::new(&buf);
        let mut rec = record(buf.len());
        pad(&mut reader, &mut rec, &cfg, 6)?;
        assert_eq!(reader.offset(), 6);
        let field = rec.field(FieldId::Pad).unwrap();
        assert_eq!((field.offset, field.length), (0, 1));
        assert!(field.text.ends_with("(disabled)"));
        assert!(rec.diagnostics.is_empty());

        // skip is clamped to what was captured
        let mut reader = Reader::new(&buf[..3]);
        let mut rec = record(3);
        pad(&mut reader, &mut rec, &cfg, 6)?;
        assert_eq!(reader.offset(), 3);

        // first byte is still checked
        let buf = [0x01u8, 0];
        let mut reader = Reader::new(&buf);
        let mut rec = record(buf.len());
        pad(&mut reader, &mut rec, &cfg, 2)?;
        assert!(rec.diagnostic(ExpertKind::MalformedPad).is_some());
        Ok(())
    }
}
