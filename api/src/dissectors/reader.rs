use std::convert::TryFrom;
use std::net::Ipv4Addr;

use nom::bytes::complete::take;
use nom::number::complete::{be_u16, be_u32, be_u8};
use nom::IResult;

use super::Error;

/// A cursor over a captured UDP payload
///
/// Every read is big endian and advances the cursor only on success, so a failed read
/// leaves `offset()` pointing at the field that could not be read.
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Reader { data, offset: 0 }
    }

    /// Current cursor position, relative to the payload start
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Captured length of the whole payload
    #[inline]
    pub fn caplen(&self) -> usize {
        self.data.len()
    }

    /// Bytes left after the cursor
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Bytes between `offset` and `offset + len`, clamped to the captured data
    pub fn slice(&self, offset: usize, len: usize) -> &'a [u8] {
        let data: &'a [u8] = self.data;
        let start = offset.min(data.len());
        let end = offset.saturating_add(len).min(data.len());
        &data[start..end]
    }

    fn parse<O, F>(&mut self, size: usize, parser: F) -> Result<O, Error>
    where
        F: Fn(&'a [u8]) -> IResult<&'a [u8], O, Error>,
    {
        let input = self.slice(self.offset, usize::MAX);
        match parser(input) {
            Ok((_, o)) => {
                self.offset += size;
                Ok(o)
            }
            Err(_) => Err(Error::Truncated {
                offset: self.offset,
                needed: size - input.len().min(size),
            }),
        }
    }

    pub fn read_u8(&mut self) -> Result<u8, Error> {
        self.parse(1, be_u8)
    }

    pub fn read_u16(&mut self) -> Result<u16, Error> {
        self.parse(2, be_u16)
    }

    pub fn read_u32(&mut self) -> Result<u32, Error> {
        self.parse(4, be_u32)
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], Error> {
        self.parse(len, take(len))
    }

    pub fn read_mac(&mut self) -> Result<[u8; 6], Error> {
        let bytes = self.read_bytes(6)?;
        // take(6) guarantees the length
        Ok(<[u8; 6]>::try_from(bytes).unwrap_or_default())
    }

    pub fn read_ipv4(&mut self) -> Result<Ipv4Addr, Error> {
        Ok(Ipv4Addr::from(self.read_u32()?))
    }

    /// Move the cursor forward by at most `len` bytes, returns how many were skipped
    pub fn skip(&mut self, len: usize) -> usize {
        let len = len.min(self.remaining());
        self.offset += len;
        len
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn typed_reads() -> Result<(), Error> {
        let buf = [
            0x00, 0x00, 0x00, 0x07, 0x02, 0x04, 0x01, 0x00, 0x1c, 0xc0, 0xa2, 0x13, 0xdd, 0xc0,
            0xa8, 0x01, 0x0a,
        ];
        let mut reader = Reader::new(&buf);
        assert_eq!(reader.read_u32()?, 7);
        assert_eq!(reader.read_u8()?, 2);
        assert_eq!(reader.read_u16()?, 1025);
        assert_eq!(reader.read_mac()?, [0x00, 0x1c, 0xc0, 0xa2, 0x13, 0xdd]);
        assert_eq!(reader.read_ipv4()?, Ipv4Addr::new(192, 168, 1, 10));
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.offset(), buf.len());
        Ok(())
    }

    #[test]
    fn short_read_keeps_offset() {
        let buf = [0x00, 0x01, 0x02];
        let mut reader = Reader::new(&buf);
        assert!(matches!(reader.read_u16(), Ok(1)));
        assert_eq!(
            reader.read_u32(),
            Err(Error::Truncated {
                offset: 2,
                needed: 3
            })
        );
        assert_eq!(reader.offset(), 2);
        assert!(matches!(reader.read_u8(), Ok(2)));
        assert!(matches!(reader.read_u8(), Err(Error::Truncated { .. })));
    }

    #[test]
    fn skip_is_clamped() {
        let buf = [0u8; 10];
        let mut reader = Reader::new(&buf);
        assert_eq!(reader.skip(4), 4);
        assert_eq!(reader.skip(55), 6);
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.slice(8, 10), &[0u8, 0u8]);
    }
}
