use std::{fs, io, path::Path};

use crate::codec::{CompressionStats, HuffmanCodec, decompress};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::persist::{self, PersistedArtifact};

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::InputNotFound(path.to_path_buf()),
        _ => Error::io(path, e),
    })
}

fn require_input(config: &Config) -> Result<&Path> {
    config
        .input
        .as_deref()
        .ok_or(Error::MissingInput)
}

/// Encodes the input file and saves the data/table pair.
pub fn encode_file(config: &Config) -> Result<CompressionStats> {
    let input = require_input(config)?;
    let text = read_input(input)?;

    let codec = HuffmanCodec::from_text(&text);
    let payload = codec.encode(&text)?;
    let stats = CompressionStats::new(&text, &payload);

    let artifact = PersistedArtifact {
        payload,
        table: codec.into_table(),
        symbol_count: text.chars().count() as u64,
    };
    persist::save(&artifact, &config.artifact_paths())?;

    tracing::info!(input = %input.display(), %stats, "encoded");
    Ok(stats)
}

/// Loads the data/table pair and writes the decoded text.
pub fn decode_file(config: &Config) -> Result<String> {
    let artifact = persist::load(&config.artifact_paths())?;
    let text = decompress(&artifact)?;
    fs::write(&config.output, &text).map_err(|e| Error::io(&config.output, e))?;
    tracing::info!(output = %config.output.display(), symbols = artifact.symbol_count, "decoded");
    Ok(text)
}

/// Encode, persist, reload, decode and check the result matches the input.
pub fn roundtrip_file(config: &Config) -> Result<CompressionStats> {
    let stats = encode_file(config)?;
    let decoded = decode_file(config)?;

    let original = read_input(require_input(config)?)?;
    if decoded != original {
        return Err(Error::MalformedData(format!(
            "decoded text differs from {}",
            config.output.display()
        )));
    }
    tracing::info!("round trip verified");
    Ok(stats)
}
