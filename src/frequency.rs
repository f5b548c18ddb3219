use std::collections::BTreeMap;

/// Symbol counts, kept sorted by symbol so the tree built from them is
/// reproducible.
pub type FrequencyMap = BTreeMap<char, u64>;

pub fn count_frequencies(text: &str) -> FrequencyMap {
    let mut freq_map = FrequencyMap::new();
    for symbol in text.chars() {
        *freq_map.entry(symbol).or_insert(0) += 1;
    }
    freq_map
}
