use std::fmt::{Display, Formatter};

use nom::error::{ErrorKind, ParseError};

mod reader;

pub use reader::Reader;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// Captured data ends before the field at `offset` which needs `needed` bytes
    Truncated { offset: usize, needed: usize },
    Nom(ErrorKind),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Truncated { offset, needed } => write!(
                f,
                "Datagram truncated at offset {}, {} more byte(s) needed",
                offset, needed
            ),
            Error::Nom(kind) => write!(f, "Nom parse error: {:?}", kind),
        }
    }
}

impl<I> ParseError<I> for Error {
    fn from_error_kind(_: I, kind: ErrorKind) -> Self {
        Error::Nom(kind)
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

impl std::error::Error for Error {}
