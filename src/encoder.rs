use bitstream_io::{BigEndian, BitWrite, BitWriter};

use crate::codes::{Bits, CodeTable};
use crate::error::{Error, Result};

/// Packed code bits plus the exact number of meaningful bits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedPayload {
    pub bytes: Vec<u8>,
    pub bit_length: u64,
}

impl EncodedPayload {
    pub fn is_empty(&self) -> bool {
        self.bit_length == 0
    }
}

/// Concatenates the code of every symbol in text order.
pub fn encode(text: &str, table: &CodeTable) -> Result<Bits> {
    let mut bits = Vec::new();
    for symbol in text.chars() {
        let code = table.get(symbol).ok_or(Error::UnknownSymbol(symbol))?;
        bits.extend_from_slice(code);
    }
    Ok(bits)
}

/// Packs bits MSB-first; the last byte is zero-filled at its low end.
pub fn pack(bits: &[bool]) -> EncodedPayload {
    let mut writer = BitWriter::endian(Vec::with_capacity(bits.len().div_ceil(8)), BigEndian);
    let written = bits
        .iter()
        .try_for_each(|&bit| writer.write_bit(bit))
        .and_then(|()| writer.byte_align());
    // writes into a Vec cannot fail
    debug_assert!(written.is_ok());

    EncodedPayload {
        bytes: writer.into_writer(),
        bit_length: bits.len() as u64,
    }
}
