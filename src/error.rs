use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("no input file configured: `input` must name the text to encode")]
    MissingInput,
    #[error("i/o failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid code table record: {0}")]
    Format(String),
    #[error("symbol {0:?} has no entry in the code table")]
    UnknownSymbol(char),
    #[error("malformed encoded data: {0}")]
    MalformedData(String),
    #[error("corrupt code table: {0}")]
    CorruptTable(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit status for the command-line driver.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::InputNotFound(_) | Error::MissingInput => 3,
            Error::Io { .. } => 4,
            Error::Format(_) => 5,
            Error::UnknownSymbol(_) | Error::MalformedData(_) | Error::CorruptTable(_) => 6,
        }
    }
}
