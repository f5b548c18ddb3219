use std::{
    collections::{BTreeMap, btree_map::Entry},
    fmt::Write as _,
    fs, io,
    path::{Path, PathBuf},
};

use chrono::Utc;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::codes::{CodeTable, bits_to_string, parse_bits};
use crate::encoder::EncodedPayload;
use crate::error::{Error, Result};

pub const TABLE_VERSION: u32 = 1;
const TEMP_EXT: &str = "tmp";
const BACKUP_EXT: &str = "bak";

/// Serialization used for the code-table file.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum TableFormat {
    /// Human-readable JSON record.
    #[default]
    Json,
    /// Compact bincode record.
    Bincode,
}

/// Locations of the two files that make up one encoded artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub data: PathBuf,
    pub table: PathBuf,
    pub format: TableFormat,
}

impl ArtifactPaths {
    /// Table file sits next to the data file with a `.dict` suffix.
    pub fn beside(data: impl Into<PathBuf>, format: TableFormat) -> Self {
        let data = data.into();
        let mut table = data.clone().into_os_string();
        table.push(".dict");
        Self {
            data,
            table: table.into(),
            format,
        }
    }
}

/// Everything needed to decode: packed bits, their length and the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedArtifact {
    pub payload: EncodedPayload,
    pub table: CodeTable,
    pub symbol_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CodeEntry {
    symbol: char,
    code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TableRecord {
    version: u32,
    bit_length: u64,
    symbol_count: u64,
    payload_sha256: String,
    created_at: String,
    codes: Vec<CodeEntry>,
}

fn payload_digest(bytes: &[u8]) -> String {
    Sha256::digest(bytes).iter().fold(String::with_capacity(64), |mut hex, byte| {
        let _ = write!(hex, "{byte:02x}");
        hex
    })
}

impl TableRecord {
    fn new(artifact: &PersistedArtifact) -> Self {
        Self {
            version: TABLE_VERSION,
            bit_length: artifact.payload.bit_length,
            symbol_count: artifact.symbol_count,
            payload_sha256: payload_digest(&artifact.payload.bytes),
            created_at: Utc::now().to_rfc3339(),
            codes: artifact
                .table
                .iter()
                .map(|(symbol, code)| CodeEntry {
                    symbol,
                    code: bits_to_string(code),
                })
                .collect(),
        }
    }

    fn to_bytes(&self, format: TableFormat) -> Result<Vec<u8>> {
        match format {
            TableFormat::Json => serde_json::to_vec_pretty(self)
                .map_err(|e| Error::Format(format!("failed to serialize table: {e}"))),
            TableFormat::Bincode => bincode::serialize(self)
                .map_err(|e| Error::Format(format!("failed to serialize table: {e}"))),
        }
    }

    fn from_bytes(data: &[u8], format: TableFormat) -> Result<Self> {
        match format {
            TableFormat::Json => serde_json::from_slice(data)
                .map_err(|e| Error::Format(format!("failed to parse table: {e}"))),
            TableFormat::Bincode => bincode::deserialize(data)
                .map_err(|e| Error::Format(format!("failed to parse table: {e}"))),
        }
    }

    fn code_table(&self) -> Result<CodeTable> {
        let mut codes = BTreeMap::new();
        for entry in &self.codes {
            let bits = parse_bits(&entry.code).ok_or_else(|| {
                Error::Format(format!("code {:?} for {:?} is not binary", entry.code, entry.symbol))
            })?;
            match codes.entry(entry.symbol) {
                Entry::Vacant(slot) => {
                    slot.insert(bits);
                }
                Entry::Occupied(_) => {
                    return Err(Error::Format(format!("symbol {:?} listed twice", entry.symbol)));
                }
            }
        }
        Ok(CodeTable::from_codes(codes))
    }
}

fn sibling(path: &Path, ext: &str) -> PathBuf {
    let mut sibling = path.as_os_str().to_owned();
    sibling.push(".");
    sibling.push(ext);
    sibling.into()
}

fn temp_path(path: &Path) -> PathBuf {
    sibling(path, TEMP_EXT)
}

fn backup_path(path: &Path) -> PathBuf {
    sibling(path, BACKUP_EXT)
}

fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "could not remove temporary file");
        }
    }
}

/// Puts the previous table back, or removes the new one when there was none.
fn restore_table(table: &Path, backup: Option<&Path>) {
    let restored = match backup {
        Some(backup) => fs::rename(backup, table),
        None => fs::remove_file(table),
    };
    if let Err(e) = restored {
        if e.kind() != io::ErrorKind::NotFound {
            tracing::warn!(table = %table.display(), error = %e, "could not roll back code table");
        }
    }
}

/// Writes both files through temporaries and renames them into place only
/// once both writes have succeeded. A failed rename rolls the table back, so
/// the pair on disk is either the old one or the new one.
pub fn save(artifact: &PersistedArtifact, paths: &ArtifactPaths) -> Result<()> {
    let record = TableRecord::new(artifact).to_bytes(paths.format)?;

    let data_tmp = temp_path(&paths.data);
    let table_tmp = temp_path(&paths.table);

    let written = fs::write(&data_tmp, &artifact.payload.bytes)
        .map_err(|e| Error::io(&data_tmp, e))
        .and_then(|()| fs::write(&table_tmp, &record).map_err(|e| Error::io(&table_tmp, e)));
    if let Err(e) = written {
        remove_quietly(&data_tmp);
        remove_quietly(&table_tmp);
        return Err(e);
    }

    let table_bak = backup_path(&paths.table);
    let backup = match fs::rename(&paths.table, &table_bak) {
        Ok(()) => Some(table_bak.as_path()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => {
            remove_quietly(&data_tmp);
            remove_quietly(&table_tmp);
            return Err(Error::io(&paths.table, e));
        }
    };

    if let Err(e) = fs::rename(&table_tmp, &paths.table) {
        remove_quietly(&data_tmp);
        remove_quietly(&table_tmp);
        if let Some(backup) = backup {
            restore_table(&paths.table, Some(backup));
        }
        return Err(Error::io(&paths.table, e));
    }
    if let Err(e) = fs::rename(&data_tmp, &paths.data) {
        remove_quietly(&data_tmp);
        restore_table(&paths.table, backup);
        return Err(Error::io(&paths.data, e));
    }
    if let Some(backup) = backup {
        remove_quietly(backup);
    }

    tracing::info!(
        data = %paths.data.display(),
        table = %paths.table.display(),
        bits = artifact.payload.bit_length,
        "saved encoded artifact"
    );
    Ok(())
}

pub fn load(paths: &ArtifactPaths) -> Result<PersistedArtifact> {
    let bytes = fs::read(&paths.data).map_err(|e| Error::io(&paths.data, e))?;
    let raw = fs::read(&paths.table).map_err(|e| Error::io(&paths.table, e))?;
    let record = TableRecord::from_bytes(&raw, paths.format)?;

    if record.version != TABLE_VERSION {
        return Err(Error::Format(format!(
            "unsupported table version {}",
            record.version
        )));
    }
    let digest = payload_digest(&bytes);
    if record.payload_sha256 != digest {
        return Err(Error::Format(format!(
            "{} does not belong to this table (sha256 {digest})",
            paths.data.display()
        )));
    }
    let table = record.code_table()?;

    tracing::info!(
        data = %paths.data.display(),
        symbols = table.len(),
        bits = record.bit_length,
        created_at = %record.created_at,
        "loaded encoded artifact"
    );
    Ok(PersistedArtifact {
        payload: EncodedPayload {
            bytes,
            bit_length: record.bit_length,
        },
        table,
        symbol_count: record.symbol_count,
    })
}
