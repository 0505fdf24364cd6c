//! Huffman code tables for text.
//!
//! Version 0.1.0
//!
//! Builds a minimum-redundancy (Huffman) prefix code from symbol counts and encodes text as a
//! string of '0' and '1' characters. Ties between equal weights are settled on the symbols
//! themselves, so a given set of counts always produces the same code.
//!
//! Counting symbols, packing the bits into bytes, writing files and decoding are left to the
//! caller.
//!
//! Basic usage from the command line:
//!
//! `$> huffcode -s -w 'h:1,e:1,l:3,o:2, :1,w:1,r:1,d:1' 'hello world'`
//!
//! This prints the code table followed by the encoded text.
//!
//! Basic usage as a library:
//!
//! ```
//! use huffcode::huffman_coding::{code_table::CodeTable, tree::{build, Frequencies}};
//!
//! let freqs: Frequencies = [('a', 3), ('b', 1), ('c', 1)].into_iter().collect();
//! let table = CodeTable::from_tree(&build(&freqs)?);
//! assert_eq!(table.encode("abc")?, "10001");
//! # Ok::<(), huffcode::huffman_coding::HuffError>(())
//! ```
//!
pub mod huffman_coding;
pub mod tools;
