//! # hufftext
//!
//! Huffman coding over the characters of a text file. Encoding produces two
//! files: the packed code bits and a code-table record holding the exact bit
//! length, which together decode back to the original text.
//!
//! ```no_run
//! use hufftext::{Config, TableFormat, commands};
//!
//! let config = Config::new(Some("notes.txt".into()), None, None, None, TableFormat::Json);
//! commands::roundtrip_file(&config)?;
//! # Ok::<(), hufftext::Error>(())
//! ```

pub mod codec;
pub mod codes;
pub mod commands;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod heap;
pub mod logger;
pub mod persist;
pub mod tree;

pub use codec::{CompressionStats, HuffmanCodec, compress, decompress};
pub use codes::CodeTable;
pub use config::Config;
pub use encoder::EncodedPayload;
pub use error::{Error, Result};
pub use persist::{ArtifactPaths, PersistedArtifact, TableFormat};
pub use tree::{HuffmanTree, TreeNode};
