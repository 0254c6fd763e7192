//! Text datagram lists: `<src-port> <dst-port> <hex payload>` per line

use anyhow::{anyhow, Context, Result};

use hpsdr_api::packet::Datagram;

/// Parse one line, blank lines and `#` comments yield None
pub fn parse_line(line: &str) -> Result<Option<Datagram>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let src_port = parse_port(parts.next(), "source")?;
    let dst_port = parse_port(parts.next(), "destination")?;
    let digits: String = parts.collect();
    let payload = hex::decode(&digits).with_context(|| format!("Invalid hex payload {:?}", digits))?;

    Ok(Some(Datagram::new(src_port, dst_port, payload)))
}

fn parse_port(s: Option<&str>, side: &str) -> Result<u16> {
    let s = s.ok_or_else(|| anyhow!("Missing {} port", side))?;
    s.parse::<u16>()
        .with_context(|| format!("Invalid {} port {:?}", side, s))
}
