use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader};

use crate::codes::{Bits, CodeTable, bits_to_string};
use crate::error::{Error, Result};

/// Reads back exactly `bit_length` bits written by [`crate::encoder::pack`].
pub fn unpack(bytes: &[u8], bit_length: u64) -> Result<Bits> {
    let expected = bit_length.div_ceil(8);
    if bytes.len() as u64 != expected {
        return Err(Error::MalformedData(format!(
            "{bit_length} bits need {expected} bytes, found {}",
            bytes.len()
        )));
    }

    let mut reader = BitReader::endian(Cursor::new(bytes), BigEndian);
    let mut bits = Vec::with_capacity(bit_length as usize);
    for _ in 0..bit_length {
        bits.push(read_bit(&mut reader)?);
    }

    let padding = expected * 8 - bit_length;
    for _ in 0..padding {
        if read_bit(&mut reader)? {
            return Err(Error::MalformedData("non-zero padding bits".into()));
        }
    }
    Ok(bits)
}

fn read_bit(reader: &mut BitReader<Cursor<&[u8]>, BigEndian>) -> Result<bool> {
    reader
        .read_bit()
        .map_err(|e| Error::MalformedData(format!("bit stream ended early: {e}")))
}

/// Walks the bits left to right, emitting a symbol whenever the pending
/// buffer matches a code.
pub fn decode(bits: &[bool], table: &CodeTable) -> Result<String> {
    let reversed = table.invert()?;
    let max_len = table.max_code_len();

    let mut decoded = String::new();
    let mut buffer = Vec::with_capacity(max_len);
    for &bit in bits {
        buffer.push(bit);
        if let Some(&symbol) = reversed.get(&buffer) {
            decoded.push(symbol);
            buffer.clear();
        } else if buffer.len() >= max_len {
            return Err(Error::MalformedData(format!(
                "bits {} match no code",
                bits_to_string(&buffer)
            )));
        }
    }

    if !buffer.is_empty() {
        return Err(Error::MalformedData(format!(
            "stream ends inside a code: trailing bits {}",
            bits_to_string(&buffer)
        )));
    }
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::parse_bits;
    use crate::encoder::{encode, pack};
    use crate::frequency::count_frequencies;
    use crate::tree::HuffmanTree;

    fn table_for(text: &str) -> CodeTable {
        let tree = HuffmanTree::from_frequencies(&count_frequencies(text)).unwrap();
        CodeTable::from_tree(&tree)
    }

    #[test]
    fn unpack_restores_leading_zeros() {
        let bits = parse_bits("000111110").unwrap();
        assert_eq!(unpack(&[0x1F, 0x00], 9).unwrap(), bits);
    }

    #[test]
    fn unpack_checks_byte_count() {
        assert!(matches!(unpack(&[0x1F], 9), Err(Error::MalformedData(_))));
        assert!(matches!(unpack(&[0x1F, 0, 0], 9), Err(Error::MalformedData(_))));
        assert_eq!(unpack(&[], 0).unwrap(), Vec::<bool>::new());
    }

    #[test]
    fn unpack_rejects_dirty_padding() {
        assert!(matches!(unpack(&[0b1010_0001], 3), Err(Error::MalformedData(_))));
    }

    #[test]
    fn decodes_aaabbc() {
        let table = table_for("aaabbc");
        let bits = unpack(&[0x1F, 0x00], 9).unwrap();
        assert_eq!(decode(&bits, &table).unwrap(), "aaabbc");
    }

    #[test]
    fn truncated_stream_is_malformed() {
        let table = table_for("aaabbc");
        let bits = parse_bits("00011111").unwrap();
        assert!(matches!(decode(&bits, &table), Err(Error::MalformedData(_))));
    }

    #[test]
    fn single_symbol_round_trip() {
        let table = table_for("aaaa");
        let payload = pack(&encode("aaaa", &table).unwrap());
        assert_eq!(payload.bit_length, 4);
        let bits = unpack(&payload.bytes, payload.bit_length).unwrap();
        assert_eq!(decode(&bits, &table).unwrap(), "aaaa");
    }

    #[test]
    fn stray_bit_after_single_symbol_is_malformed() {
        let table = table_for("aaaa");
        assert!(matches!(decode(&[false, true], &table), Err(Error::MalformedData(_))));
    }

    #[test]
    fn empty_table_decodes_empty_stream() {
        assert_eq!(decode(&[], &CodeTable::default()).unwrap(), "");
    }
}
