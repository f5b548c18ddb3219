use std::collections::{BTreeMap, HashMap};

use crate::error::{Error, Result};
use crate::frequency::FrequencyMap;
use crate::tree::{HuffmanTree, TreeNode};

/// A code as a sequence of bits, most significant first.
pub type Bits = Vec<bool>;

pub fn bits_to_string(bits: &[bool]) -> String {
    bits.iter().map(|&bit| if bit { '1' } else { '0' }).collect()
}

pub fn parse_bits(s: &str) -> Option<Bits> {
    s.chars()
        .map(|c| match c {
            '0' => Some(false),
            '1' => Some(true),
            _ => None,
        })
        .collect()
}

/// Symbol -> code mapping derived from a Huffman tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<char, Bits>,
}

impl CodeTable {
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        build_codes_recursive(&tree.root, Vec::new(), &mut codes);
        CodeTable { codes }
    }

    pub fn from_codes(codes: BTreeMap<char, Bits>) -> Self {
        CodeTable { codes }
    }

    pub fn get(&self, symbol: char) -> Option<&[bool]> {
        self.codes.get(&symbol).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &[bool])> {
        self.codes.iter().map(|(&symbol, code)| (symbol, code.as_slice()))
    }

    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Sum of `frequency * code length` over the given distribution.
    pub fn weighted_length(&self, frequencies: &FrequencyMap) -> u64 {
        frequencies
            .iter()
            .map(|(symbol, &freq)| freq * self.get(*symbol).map_or(0, |c| c.len() as u64))
            .sum()
    }

    pub fn is_prefix_free(&self) -> bool {
        self.find_prefix_violation().is_none()
    }

    // After sorting, a code that prefixes another sorts directly before
    // some code it prefixes, so adjacent pairs are enough.
    fn find_prefix_violation(&self) -> Option<(String, String)> {
        let mut sorted: Vec<String> = self.codes.values().map(|c| bits_to_string(c)).collect();
        sorted.sort();
        sorted
            .windows(2)
            .find(|pair| pair[1].starts_with(pair[0].as_str()))
            .map(|pair| (pair[0].clone(), pair[1].clone()))
    }

    /// Builds the code -> symbol map used while decoding.
    pub fn invert(&self) -> Result<HashMap<Bits, char>> {
        let mut reversed = HashMap::with_capacity(self.codes.len());
        for (&symbol, code) in &self.codes {
            if code.is_empty() {
                return Err(Error::CorruptTable(format!("symbol {symbol:?} has an empty code")));
            }
            if let Some(other) = reversed.insert(code.clone(), symbol) {
                return Err(Error::CorruptTable(format!(
                    "symbols {other:?} and {symbol:?} share code {}",
                    bits_to_string(code)
                )));
            }
        }
        if let Some((short, long)) = self.find_prefix_violation() {
            return Err(Error::CorruptTable(format!("code {short} is a prefix of {long}")));
        }
        Ok(reversed)
    }
}

fn build_codes_recursive(node: &TreeNode, prefix: Bits, codes: &mut BTreeMap<char, Bits>) {
    match node {
        TreeNode::Leaf { symbol, .. } => {
            // A lone leaf still needs one bit so it can be packed.
            if prefix.is_empty() {
                codes.insert(*symbol, vec![false]);
            } else {
                codes.insert(*symbol, prefix);
            }
        }
        TreeNode::Internal { left, right, .. } => {
            let mut left_prefix = prefix.clone();
            left_prefix.push(false);
            build_codes_recursive(left, left_prefix, codes);

            let mut right_prefix = prefix;
            right_prefix.push(true);
            build_codes_recursive(right, right_prefix, codes);
        }
    }
}
