//! Builds the Huffman tree used to generate codes.
//!
//! Each distinct symbol starts as a leaf weighted by its count. The two lightest trees are
//! repeatedly merged into a new parent until a single tree, the root, is left. When two trees
//! are merged each one is stamped with the bit on the edge to its new parent, so the code for a
//! symbol is simply the bits found on the path from the root down to its leaf.
//!
//! Tie-breaking happens in two places and both are deterministic:
//! - Selection: lighter trees are taken first. Equal weights are taken in label order, so the
//!   tree with the lexicographically larger label waits.
//! - Bit assignment: in a merge the lighter tree gets 0. With equal weights the tree whose label
//!   sorts lower gets 0.

use log::{debug, trace};
use rustc_hash::FxHashMap;

use super::HuffError;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt::{Display, Formatter};

/// Symbol counts supplied by the caller. One entry per distinct symbol.
pub type Frequencies = FxHashMap<char, u64>;

/// The bit on the edge between a node and its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    /// Character used for this bit in a code string.
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl Display for Bit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NodeData {
    Kids(Box<TreeNode>, Box<TreeNode>),
    Leaf(char),
}

#[derive(Debug, Clone)]
pub struct TreeNode {
    label: String,
    weight: u64,
    edge_bit: Option<Bit>,
    node_data: NodeData,
}

impl TreeNode {
    /// Create a new leaf for a symbol. Leaves have no edge bit until they are merged.
    pub fn leaf(symbol: char, weight: u64) -> TreeNode {
        TreeNode {
            label: symbol.to_string(),
            weight,
            edge_bit: None,
            node_data: NodeData::Leaf(symbol),
        }
    }

    /// Every symbol in this subtree, in left to right order.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Total count of every symbol in this subtree.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Bit on the edge to the parent. Only the root has none.
    pub fn edge_bit(&self) -> Option<Bit> {
        self.edge_bit
    }

    /// Whether this node holds a symbol or two children.
    pub fn node_data(&self) -> &NodeData {
        &self.node_data
    }

    /// True for a single symbol with no children.
    pub fn is_leaf(&self) -> bool {
        matches!(self.node_data, NodeData::Leaf(_))
    }

    /// The left and right children, if this is an internal node.
    pub fn kids(&self) -> Option<(&TreeNode, &TreeNode)> {
        match &self.node_data {
            NodeData::Kids(left, right) => Some((&**left, &**right)),
            NodeData::Leaf(_) => None,
        }
    }

    /// Merge two trees under a new parent. `a` becomes the left child and `b` the right child.
    /// The parent's weight saturates at `u64::MAX`.
    ///
    /// The lighter tree gets the 0 edge. If the weights match, the tree whose label sorts lower gets
    /// the 0 edge. (Should the labels also match, `a` gets 1 and `b` gets 0.)
    pub fn merge(mut a: TreeNode, mut b: TreeNode) -> TreeNode {
        let a_is_zero = match a.weight.cmp(&b.weight) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => a.label < b.label,
        };
        if a_is_zero {
            a.edge_bit = Some(Bit::Zero);
            b.edge_bit = Some(Bit::One);
        } else {
            a.edge_bit = Some(Bit::One);
            b.edge_bit = Some(Bit::Zero);
        }

        let mut label = String::with_capacity(a.label.len() + b.label.len());
        label.push_str(&a.label);
        label.push_str(&b.label);

        TreeNode {
            label,
            weight: a.weight.saturating_add(b.weight),
            edge_bit: None,
            node_data: NodeData::Kids(Box::new(a), Box::new(b)),
        }
    }

    /// Checks the shape of a finished tree: the root has no edge bit and every other node has one.
    /// Leaves and two-child internal nodes are guaranteed by NodeData.
    pub fn is_well_formed(&self) -> bool {
        self.edge_bit.is_none() && self.kids_well_formed()
    }

    fn kids_well_formed(&self) -> bool {
        match &self.node_data {
            NodeData::Leaf(_) => true,
            NodeData::Kids(left, right) => [left, right]
                .iter()
                .all(|kid| kid.edge_bit.is_some() && kid.kids_well_formed()),
        }
    }

    /// Number of leaves (symbols) in this subtree.
    pub fn leaf_count(&self) -> usize {
        match &self.node_data {
            NodeData::Leaf(_) => 1,
            NodeData::Kids(left, right) => left.leaf_count() + right.leaf_count(),
        }
    }
}

/// Trees are equal when their labels match and their children match, all the way down.
/// Weights and edge bits are not compared.
impl PartialEq for TreeNode {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && self.node_data == other.node_data
    }
}

impl Eq for TreeNode {}

/// Prints `(label,weight,left,right,bit)`, using None for missing children or bit.
impl Display for TreeNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (left, right) = match self.kids() {
            Some((left, right)) => (left.label(), right.label()),
            None => ("None", "None"),
        };
        match self.edge_bit {
            Some(bit) => write!(f, "({:?},{},{},{},{})", self.label, self.weight, left, right, bit),
            None => write!(f, "({:?},{},{},{},None)", self.label, self.weight, left, right),
        }
    }
}

/// Wrapper giving the selection order used while building: lighter first, then lower label first.
#[derive(Debug)]
struct Pending(TreeNode);

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .weight
            .cmp(&other.0.weight)
            .then_with(|| self.0.label.cmp(&other.0.label))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

/// Create one leaf per symbol. The leaves come back in selection order, so the result does not
/// depend on the iteration order of the map.
pub fn build_leaves(frequencies: &Frequencies) -> Result<Vec<TreeNode>, HuffError> {
    if frequencies.is_empty() {
        return Err(HuffError::EmptyFrequencies);
    }

    let mut leaves = frequencies
        .iter()
        .map(|(&symbol, &count)| {
            debug!("Count: {:?} {}", symbol, count);
            Pending(TreeNode::leaf(symbol, count))
        })
        .collect::<Vec<Pending>>();
    leaves.sort_unstable();

    Ok(leaves.into_iter().map(|pending| pending.0).collect())
}

/// Build a Huffman tree from the frequency map and return its root.
///
/// A single symbol gives a root that is a bare leaf with no edge bit.
pub fn build(frequencies: &Frequencies) -> Result<TreeNode, HuffError> {
    // Min-heap of everything still waiting to be merged
    let mut heap = build_leaves(frequencies)?
        .into_iter()
        .map(|node| Reverse(Pending(node)))
        .collect::<BinaryHeap<_>>();

    loop {
        // The heap is never empty here: build_leaves rejects an empty map and each
        // round removes two nodes and pushes one back.
        let Reverse(Pending(first)) = heap.pop().ok_or(HuffError::EmptyFrequencies)?;
        match heap.pop() {
            None => {
                debug!(
                    "Tree built: {} symbols, total weight {}",
                    first.leaf_count(),
                    first.weight()
                );
                return Ok(first);
            }
            Some(Reverse(Pending(second))) => {
                trace!(
                    "Merging {:?} ({}) with {:?} ({})",
                    first.label(),
                    first.weight(),
                    second.label(),
                    second.weight()
                );
                heap.push(Reverse(Pending(TreeNode::merge(first, second))));
            }
        }
    }
}
