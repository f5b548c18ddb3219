use std::fmt;

use crate::codes::CodeTable;
use crate::decoder::{decode, unpack};
use crate::encoder::{EncodedPayload, encode, pack};
use crate::error::{Error, Result};
use crate::frequency::count_frequencies;
use crate::persist::PersistedArtifact;
use crate::tree::HuffmanTree;

/// Tree and code table built for one text.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    tree: Option<HuffmanTree>,
    table: CodeTable,
}

impl HuffmanCodec {
    pub fn from_text(text: &str) -> Self {
        let frequencies = count_frequencies(text);
        let tree = HuffmanTree::from_frequencies(&frequencies);
        let table = tree.as_ref().map(CodeTable::from_tree).unwrap_or_default();
        tracing::debug!(symbols = table.len(), max_code_len = table.max_code_len(), "built code table");
        HuffmanCodec { tree, table }
    }

    pub fn tree(&self) -> Option<&HuffmanTree> {
        self.tree.as_ref()
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    pub fn encode(&self, text: &str) -> Result<EncodedPayload> {
        let bits = encode(text, &self.table)?;
        Ok(pack(&bits))
    }

    pub fn into_table(self) -> CodeTable {
        self.table
    }
}

pub fn compress(text: &str) -> Result<(EncodedPayload, CodeTable)> {
    let codec = HuffmanCodec::from_text(text);
    let payload = codec.encode(text)?;
    Ok((payload, codec.into_table()))
}

pub fn decompress(artifact: &PersistedArtifact) -> Result<String> {
    let bits = unpack(&artifact.payload.bytes, artifact.payload.bit_length)?;
    let text = decode(&bits, &artifact.table)?;

    let decoded = text.chars().count() as u64;
    if decoded != artifact.symbol_count {
        return Err(Error::MalformedData(format!(
            "expected {} symbols, decoded {decoded}",
            artifact.symbol_count
        )));
    }
    Ok(text)
}

/// Size summary printed after encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionStats {
    pub original_bytes: usize,
    pub packed_bytes: usize,
    pub bit_length: u64,
}

impl CompressionStats {
    pub fn new(text: &str, payload: &EncodedPayload) -> Self {
        Self {
            original_bytes: text.len(),
            packed_bytes: payload.bytes.len(),
            bit_length: payload.bit_length,
        }
    }

    pub fn ratio(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        self.packed_bytes as f64 / self.original_bytes as f64
    }
}

/// Byte count scaled to the largest binary unit that keeps it at or above one.
struct Size(usize);

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
        let (scaled, unit) = UNITS[1..]
            .iter()
            .fold((self.0 as f64, UNITS[0]), |(value, unit), &next| {
                if value >= 1024.0 { (value / 1024.0, next) } else { (value, unit) }
            });
        write!(f, "{scaled:.2} {unit}")
    }
}

impl fmt::Display for CompressionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({} bits, {:.1}% of original)",
            Size(self.original_bytes),
            Size(self.packed_bytes),
            self.bit_length,
            self.ratio() * 100.0
        )
    }
}
