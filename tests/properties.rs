use hufftext::codes::bits_to_string;
use hufftext::decoder::{decode, unpack};
use hufftext::encoder::{encode, pack};
use hufftext::frequency::count_frequencies;
use hufftext::heap::{PriorityQueue, Weighted};
use hufftext::{HuffmanCodec, PersistedArtifact, compress, decompress};
use quickcheck::{TestResult, quickcheck};

#[derive(Debug)]
struct W(u64);

impl Weighted for W {
    fn weight(&self) -> u64 {
        self.0
    }
}

fn artifact(text: &str) -> PersistedArtifact {
    let (payload, table) = compress(text).unwrap();
    PersistedArtifact {
        payload,
        table,
        symbol_count: text.chars().count() as u64,
    }
}

quickcheck! {
    fn round_trip(text: String) -> bool {
        decompress(&artifact(&text)).unwrap() == text
    }

    fn codes_are_prefix_free(text: String) -> bool {
        let codec = HuffmanCodec::from_text(&text);
        let codes: Vec<String> = codec.table().iter().map(|(_, c)| bits_to_string(c)).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes.iter().enumerate().all(|(j, b)| i == j || !b.starts_with(a.as_str()))
        })
    }

    fn encoded_length_is_weighted_code_length(text: String) -> bool {
        let codec = HuffmanCodec::from_text(&text);
        let bits = encode(&text, codec.table()).unwrap();
        bits.len() as u64 == codec.table().weighted_length(&count_frequencies(&text))
    }

    fn pack_unpack_exact(bits: Vec<bool>) -> bool {
        let payload = pack(&bits);
        payload.bytes.len() == bits.len().div_ceil(8)
            && unpack(&payload.bytes, payload.bit_length).unwrap() == bits
    }

    fn heap_always_pops_minimum(ops: Vec<Option<u8>>) -> bool {
        let mut queue = PriorityQueue::new();
        let mut model: Vec<u64> = Vec::new();
        for op in ops {
            match op {
                Some(w) => {
                    queue.push(W(u64::from(w)));
                    model.push(u64::from(w));
                }
                None => {
                    let expected = model.iter().copied().min();
                    if let Some(min) = expected {
                        let pos = model.iter().position(|&w| w == min).unwrap();
                        model.swap_remove(pos);
                    }
                    if queue.pop().map(|w| w.0) != expected {
                        return false;
                    }
                }
            }
            if !queue.is_heap() || queue.size() != model.len() {
                return false;
            }
        }
        true
    }

    fn truncated_stream_never_decodes_silently(text: String) -> TestResult {
        let codec = HuffmanCodec::from_text(&text);
        let bits = encode(&text, codec.table()).unwrap();
        if codec.table().max_code_len() < 2 {
            return TestResult::discard();
        }
        // drop the last bit of the final code
        let cut = &bits[..bits.len() - 1];
        match decode(cut, codec.table()) {
            Ok(decoded) => TestResult::from_bool(decoded.chars().count() < text.chars().count()),
            Err(_) => TestResult::passed(),
        }
    }
}
