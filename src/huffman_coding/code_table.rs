//! Turns a finished Huffman tree into a lookup table of codes, and uses that table to encode text.
//!
//! The output of encode is a string of '0' and '1' characters. Packing those into bytes, and
//! storing the table so a decoder can invert the transform, is up to the caller.

use log::{info, trace, warn};

use super::tree::{NodeData, TreeNode};
use super::HuffError;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Code string for every symbol in a tree, kept in ascending symbol order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<char, String>,
}

impl CodeTable {
    /// Walk the tree from the root and record the path bits to every leaf.
    ///
    /// A tree that is a single leaf has no edges at all. That symbol is given the code "0" so
    /// every encoded character still takes up one bit.
    pub fn from_tree(root: &TreeNode) -> CodeTable {
        debug_assert!(root.is_well_formed());
        let mut codes = BTreeMap::new();

        if let NodeData::Leaf(symbol) = root.node_data() {
            warn!(
                "Only one symbol ({:?}) to encode, using the single bit code 0",
                symbol
            );
            codes.insert(*symbol, "0".to_string());
            return CodeTable { codes };
        }

        collect_codes(root, String::new(), &mut codes);
        CodeTable { codes }
    }

    /// Encode text one character at a time. Fails on the first character that has no code,
    /// in which case nothing is returned.
    pub fn encode(&self, text: &str) -> Result<String, HuffError> {
        let longest = self.codes.values().map(String::len).max().unwrap_or(0);
        let mut output = String::with_capacity(text.chars().count() * longest);
        for symbol in text.chars() {
            match self.codes.get(&symbol) {
                Some(code) => output.push_str(code),
                None => {
                    return Err(HuffError::UnencodableSymbol {
                        symbol,
                        table: self.to_string(),
                    })
                }
            }
        }
        info!("Input Text: {}", text);
        info!("Output Text: {}", output);
        Ok(output)
    }

    /// Code for a single symbol, if it has one.
    pub fn code(&self, symbol: char) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Symbols and their codes in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> + '_ {
        self.codes
            .iter()
            .map(|(&symbol, code)| (symbol, code.as_str()))
    }
}

/// Recursively walk the tree. Each branch works on its own copy of the code so far, so
/// siblings never see each other's bits.
fn collect_codes(node: &TreeNode, mut code: String, codes: &mut BTreeMap<char, String>) {
    if let Some(bit) = node.edge_bit() {
        code.push(bit.as_char());
    }
    match node.node_data() {
        NodeData::Kids(left, right) => {
            collect_codes(left, code.clone(), codes);
            collect_codes(right, code, codes);
        }
        NodeData::Leaf(symbol) => {
            trace!("{:?} -> {}", symbol, code);
            codes.insert(*symbol, code);
        }
    };
}

/// One line per symbol, in symbol order, e.g. `'l':11`.
impl Display for CodeTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (symbol, code) in &self.codes {
            writeln!(f, "{:?}:{}", symbol, code)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::CodeTable;
    use crate::huffman_coding::tree::{build, Frequencies, TreeNode};
    use crate::huffman_coding::HuffError;
    use rustc_hash::FxHashMap;

    fn freqs(pairs: &[(char, u64)]) -> Frequencies {
        pairs.iter().copied().collect()
    }

    fn table_for(pairs: &[(char, u64)]) -> CodeTable {
        CodeTable::from_tree(&build(&freqs(pairs)).unwrap())
    }

    fn hello_freqs() -> Vec<(char, u64)> {
        vec![
            ('h', 3),
            ('e', 2),
            ('l', 5),
            ('o', 2),
            ('w', 1),
            ('r', 1),
            ('d', 1),
        ]
    }

    /// Split a bit string back into symbols by matching codes as they complete.
    fn decode(bits: &str, table: &CodeTable) -> String {
        let lookup = table
            .iter()
            .map(|(symbol, code)| (code, symbol))
            .collect::<FxHashMap<&str, char>>();
        let mut text = String::new();
        let mut start = 0;
        for end in 1..=bits.len() {
            if let Some(&symbol) = lookup.get(&bits[start..end]) {
                text.push(symbol);
                start = end;
            }
        }
        assert_eq!(start, bits.len(), "trailing bits that match no code");
        text
    }

    fn assert_prefix_free(table: &CodeTable) {
        for (a, code_a) in table.iter() {
            for (b, code_b) in table.iter() {
                if a != b {
                    assert!(
                        !code_b.starts_with(code_a),
                        "{:?}:{} is a prefix of {:?}:{}",
                        a,
                        code_a,
                        b,
                        code_b
                    );
                }
            }
        }
    }

    #[test]
    fn example_codes_test() {
        let table = table_for(&hello_freqs());
        let expect = [
            ('d', "0110"),
            ('e', "100"),
            ('h', "00"),
            ('l', "11"),
            ('o', "101"),
            ('r', "0111"),
            ('w', "010"),
        ];
        assert_eq!(table.iter().collect::<Vec<_>>(), expect.to_vec());
    }

    #[test]
    fn example_lengths_test() {
        let table = table_for(&hello_freqs());
        let len = |c| table.code(c).unwrap().len();
        for light in ['w', 'r', 'd'] {
            assert!(len('l') < len(light));
        }
    }

    #[test]
    fn display_test() {
        let table = table_for(&[('a', 1), ('b', 2), (' ', 4)]);
        assert_eq!(table.to_string(), "' ':1\n'a':00\n'b':01\n");
    }

    #[test]
    fn hello_world_test() {
        let mut pairs = hello_freqs();
        pairs.push((' ', 1));
        let table = table_for(&pairs);

        let bits = table.encode("hello world").unwrap();
        let expected_len = "hello world"
            .chars()
            .map(|c| table.code(c).unwrap().len())
            .sum::<usize>();
        assert_eq!(bits.len(), expected_len);
        assert!(bits.chars().all(|b| b == '0' || b == '1'));
        assert_eq!(decode(&bits, &table), "hello world");
    }

    #[test]
    fn unencodable_symbol_test() {
        let table = table_for(&hello_freqs());
        let result = table.encode("hello world");
        assert_eq!(
            result,
            Err(HuffError::UnencodableSymbol {
                symbol: ' ',
                table: table.to_string(),
            })
        );
    }

    #[test]
    fn unencodable_message_test() {
        let table = table_for(&[('a', 1), ('b', 1)]);
        let err = table.encode("abc").unwrap_err();
        assert_eq!(
            err.to_string(),
            "can't encode symbol 'c' as it isn't in the encoding table:\n'a':0\n'b':1\n"
        );
    }

    #[test]
    fn single_symbol_test() {
        let table = table_for(&[('a', 5)]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.code('a'), Some("0"));
        assert_eq!(table.encode("aaa").unwrap(), "000");
    }

    #[test]
    fn multibyte_symbols_test() {
        let table = table_for(&[('é', 4), ('ß', 2), ('a', 1)]);
        let bits = table.encode("éßaé").unwrap();
        assert_eq!(bits, "101001");
        assert_eq!(decode(&bits, &table), "éßaé");
    }

    #[test]
    fn empty_text_test() {
        let table = table_for(&hello_freqs());
        assert_eq!(table.encode("").unwrap(), "");
    }

    #[test]
    fn coverage_and_prefix_free_test() {
        let inputs: Vec<Vec<(char, u64)>> = vec![
            hello_freqs(),
            vec![('a', 1), ('b', 1)],
            vec![('a', 0), ('b', 0), ('c', 0)],
            vec![('x', 1), ('y', 2), ('z', 4), ('q', 8), ('p', 16), ('m', 32)],
            ('a'..='z').zip(1..).collect(),
            ('A'..='Z').map(|c| (c, 7)).collect(),
        ];
        for pairs in inputs {
            let table = table_for(&pairs);
            assert_eq!(table.len(), pairs.len());
            for (symbol, _) in &pairs {
                assert!(table.code(*symbol).is_some());
            }
            assert_prefix_free(&table);
        }
    }

    #[test]
    fn determinism_test() {
        let pairs = ('a'..='p').map(|c| (c, (c as u64) % 3)).collect::<Vec<_>>();
        assert_eq!(table_for(&pairs), table_for(&pairs));

        let mut reversed = pairs.clone();
        reversed.reverse();
        assert_eq!(table_for(&pairs), table_for(&reversed));
    }

    #[test]
    fn weight_monotonicity_test() {
        let pairs = vec![
            ('a', 45),
            ('b', 13),
            ('c', 12),
            ('d', 16),
            ('e', 9),
            ('f', 5),
            ('g', 1),
            ('h', 1),
        ];
        let table = table_for(&pairs);
        for &(a, weight_a) in &pairs {
            for &(b, weight_b) in &pairs {
                if weight_a < weight_b {
                    assert!(table.code(a).unwrap().len() >= table.code(b).unwrap().len());
                }
            }
        }
    }

    #[test]
    fn round_trip_test() {
        let text = "abracadabra, alakazam";
        let mut counts = Frequencies::default();
        text.chars().for_each(|c| *counts.entry(c).or_insert(0) += 1);
        let table = CodeTable::from_tree(&build(&counts).unwrap());
        let bits = table.encode(text).unwrap();
        assert_eq!(decode(&bits, &table), text);
    }

    #[test]
    fn codes_follow_edge_bits_test() {
        // 'b' is the left child but the heavier one, so it carries the 1 edge.
        let root = TreeNode::merge(TreeNode::leaf('b', 9), TreeNode::leaf('a', 1));
        let table = CodeTable::from_tree(&root);
        assert_eq!(table.code('a'), Some("0"));
        assert_eq!(table.code('b'), Some("1"));
    }
}
