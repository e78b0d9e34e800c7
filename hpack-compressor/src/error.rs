use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A header was rejected while building the header list.
    InvalidHeader(&'static str),
    /// The per-call options are out of range.
    InvalidOptions(&'static str),
    /// A length or index does not fit the integer representation.
    IntegerOverflow(usize),
    /// Internal state is inconsistent. The compression context must not
    /// be used any more, since the peer's table may be out of sync.
    Invariant(&'static str),
}

impl Error {
    /// Returns true if the caller passed something wrong, false if the
    /// compressor itself is broken.
    pub fn is_bad_input(&self) -> bool {
        !matches!(self, Error::Invariant(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidHeader(s) => write!(f, "invalid header: {s}"),
            Error::InvalidOptions(s) => write!(f, "invalid encode options: {s}"),
            Error::IntegerOverflow(n) => write!(f, "integer too large for HPACK: {n}"),
            Error::Invariant(s) => write!(f, "compressor invariant broken: {s}"),
        }
    }
}

impl std::error::Error for Error {}
