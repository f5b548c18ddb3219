use std::path::PathBuf;

use crate::persist::{ArtifactPaths, TableFormat};

pub const DEFAULT_DATA_FILE: &str = "encoded.bin";
pub const DEFAULT_DECODED_FILE: &str = "decoded.txt";

/// File locations for one encode/decode run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: Option<PathBuf>,
    pub data: PathBuf,
    pub table: PathBuf,
    pub output: PathBuf,
    pub table_format: TableFormat,
}

impl Default for Config {
    fn default() -> Self {
        let artifact = ArtifactPaths::beside(DEFAULT_DATA_FILE, TableFormat::default());
        Self {
            input: None,
            data: artifact.data,
            table: artifact.table,
            output: PathBuf::from(DEFAULT_DECODED_FILE),
            table_format: artifact.format,
        }
    }
}

impl Config {
    /// Fills unset paths with the defaults; the table follows the data file
    /// unless given explicitly.
    pub fn new(
        input: Option<PathBuf>,
        data: Option<PathBuf>,
        table: Option<PathBuf>,
        output: Option<PathBuf>,
        table_format: TableFormat,
    ) -> Self {
        let data = data.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        let table = table.unwrap_or_else(|| ArtifactPaths::beside(&data, table_format).table);
        Self {
            input,
            data,
            table,
            output: output.unwrap_or_else(|| PathBuf::from(DEFAULT_DECODED_FILE)),
            table_format,
        }
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            data: self.data.clone(),
            table: self.table.clone(),
            format: self.table_format,
        }
    }
}
