use std::net::Ipv4Addr;

use serde::{Serialize, Serializer};

use crate::classifiers::Substream;
use crate::fields::{value_string, Encoding, ExpertKind, FieldDescriptor, FieldId, Severity, Strings};
use crate::packet::Direction;

fn serialize_bytes<T, S>(bytes: &T, s: S) -> Result<S::Ok, S::Error>
where
    T: AsRef<[u8]>,
    S: Serializer,
{
    s.serialize_str(&hex::encode(bytes.as_ref()))
}

fn serialize_mac<S>(mac: &[u8; 6], s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&format_mac(mac))
}

pub fn format_mac(mac: &[u8; 6]) -> String {
    mac.iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":")
}

/// Raw value of a decoded field
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    U8(u8),
    U16(u16),
    U32(u32),
    Mac(#[serde(serialize_with = "serialize_mac")] [u8; 6]),
    Ipv4(Ipv4Addr),
    Bytes(#[serde(serialize_with = "serialize_bytes")] Vec<u8>),
    Text(String),
}

impl Value {
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::U8(v) => Some(*v as u32),
            Value::U16(v) => Some(*v as u32),
            Value::U32(v) => Some(*v),
            _ => None,
        }
    }
}

/// A decoded field, bitmask bytes carry one child per named bit
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Field {
    pub id: FieldId,
    pub offset: usize,
    pub length: usize,
    pub value: Value,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Field>,
}

impl Field {
    pub fn new(id: FieldId, offset: usize, length: usize, value: Value) -> Self {
        let desc = id.descriptor();
        let text = format!("{}: {}", desc.label, render(&desc, length, &value));
        Field {
            id,
            offset,
            length,
            value,
            text,
            children: vec![],
        }
    }

    /// Replace the rendered value, keeping the label
    pub fn with_display<S: AsRef<str>>(mut self, display: S) -> Self {
        self.text = format!("{}: {}", self.id.descriptor().label, display.as_ref());
        self
    }

    pub fn annotate<S: AsRef<str>>(mut self, note: S) -> Self {
        self.text.push_str(&format!(" ({})", note.as_ref()));
        self
    }

    /// Add one child per bit field, each sharing this field's bytes and raw value
    pub fn with_bits(mut self, bits: &[FieldId]) -> Self {
        for id in bits {
            let child = Field::new(*id, self.offset, self.length, self.value.clone());
            self.children.push(child);
        }
        self
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    fn find(&self, id: FieldId) -> Option<&Field> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|f| f.find(id))
    }
}

fn render(desc: &FieldDescriptor, length: usize, value: &Value) -> String {
    match value {
        Value::U8(v) => render_integer(desc, length, *v as u32),
        Value::U16(v) => render_integer(desc, length, *v as u32),
        Value::U32(v) => render_integer(desc, length, *v),
        Value::Mac(mac) => format_mac(mac),
        Value::Ipv4(ip) => ip.to_string(),
        Value::Bytes(b) => format!("{} byte(s)", b.len()),
        Value::Text(s) => s.clone(),
    }
}

fn render_integer(desc: &FieldDescriptor, length: usize, v: u32) -> String {
    let masked = if desc.bitmask != 0 {
        (v & desc.bitmask) >> desc.bitmask.trailing_zeros()
    } else {
        v
    };

    match (desc.encoding, desc.strings) {
        (Encoding::Boolean, Strings::Bool(polarity)) => polarity.label(masked != 0).to_string(),
        (_, Strings::Values(table)) => {
            let name = value_string(table, masked).unwrap_or("Reserved");
            match desc.encoding {
                Encoding::Hex => format!("{} (0x{:0width$x})", name, masked, width = length * 2),
                _ => format!("{} ({})", name, masked),
            }
        }
        (Encoding::Hex, _) => format!("0x{:0width$x}", masked, width = length * 2),
        _ => masked.to_string(),
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Diagnostic {
    pub kind: ExpertKind,
    pub severity: Severity,
    pub offset: usize,
    pub length: usize,
    pub message: String,
}

/// Output of a single decode call
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Record {
    pub substream: Substream,
    pub direction: Direction,
    pub caplen: usize,
    /// Bytes the processor accounted for
    pub consumed: usize,
    /// Field emission stopped on a short read
    pub truncated: bool,
    pub fields: Vec<Field>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl Record {
    pub fn new(substream: Substream, direction: Direction, caplen: usize) -> Self {
        Record {
            substream,
            direction,
            caplen,
            consumed: 0,
            truncated: false,
            fields: vec![],
            diagnostics: vec![],
        }
    }

    pub fn add_field(&mut self, field: Field) {
        debug_assert!(field.end() <= self.caplen);
        self.fields.push(field);
    }

    /// Add a pad field, non-zero bytes are flagged
    pub fn add_pad(&mut self, offset: usize, data: &[u8], note: Option<&str>) {
        let mut field = Field::new(FieldId::Pad, offset, data.len(), Value::Bytes(data.to_vec()));
        if let Some(note) = note {
            field = field.annotate(note);
        }
        self.add_field(field);
        if let Some(pos) = data.iter().position(|b| *b != 0) {
            self.warn(
                ExpertKind::MalformedPad,
                offset,
                data.len(),
                format!("Pad byte at offset {} is 0x{:02x}", offset + pos, data[pos]),
            );
        }
    }

    pub fn warn<S: Into<String>>(&mut self, kind: ExpertKind, offset: usize, length: usize, msg: S) {
        self.diagnostics.push(Diagnostic {
            kind,
            severity: kind.descriptor().severity,
            offset,
            length,
            message: msg.into(),
        });
    }

    /// Find the first field with this id, children included
    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.iter().find_map(|f| f.find(id))
    }

    pub fn diagnostic(&self, kind: ExpertKind) -> Option<&Diagnostic> {
        self.diagnostics.iter().find(|d| d.kind == kind)
    }
}
