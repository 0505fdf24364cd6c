//! The huffman_coding module builds prefix-free binary codes from symbol frequencies and uses them
//! to turn text into a bit string.
//!
//! Work happens in two stages:
//! - tree: Build a Huffman tree from a frequency map. The two lightest trees are merged until only
//!   the root is left. Ties are broken on the node labels so the same input always gives the same tree.
//! - code_table: Walk the finished tree to collect a code for every symbol, then encode text by
//!   substituting each character's code.
//!
//! Counting frequencies, packing bits into bytes and decoding are left to the caller.
//!
//! Both stages are sequential and do not benefit from multithreading.
//!

pub mod code_table;
mod error;
pub mod tree;

pub use error::HuffError;
