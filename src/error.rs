use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Scanner built with an empty open or close marker
    EmptyMarker(&'static str),
    /// `\uXXXX` escape without four hex digits, at the given line
    MalformedUnicodeEscape(usize),
    /// IO Error
    IoError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyMarker(which) => write!(f, "The {} marker must not be empty", which),
            Error::MalformedUnicodeEscape(line) => write!(f, "Malformed \\uXXXX escape on line {}", line),
            Error::IoError(msg) => write!(f, "IO Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err.to_string())
    }
}
