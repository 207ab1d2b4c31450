//! Huffman tree construction.
//!
//! The tree is built bottom-up from a [`WeightTable`]: one leaf per symbol with
//! a nonzero weight, then the two lowest nodes of a min-priority queue are
//! merged until a single root remains. The node extracted first becomes the
//! left child (code bit `0`).
//!
//! ## Tie-breaking
//!
//! Nodes of equal weight are ordered by a [`TieBreak`] policy. Both policies
//! define a total order over the live nodes, so a given table always yields the
//! same tree, and both produce optimal codes with identical total weighted
//! length. They differ only in which optimal code is chosen:
//!
//! - [`TieBreak::SymbolOrder`]: lowest symbol index in the subtree first.
//! - [`TieBreak::Balanced`]: shallower subtree first (leaves before merged
//!   nodes), then lowest symbol index. This is the minimum-variance rule and
//!   yields the smallest maximum code length.

use crate::symbol::Symbol;
use crate::weights::WeightTable;
use oxihuff_core::error::{OxiHuffError, Result};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt::Write as _;
use tracing::{debug, warn};

/// How nodes of equal weight are ordered during construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Lowest contained symbol index first.
    #[default]
    SymbolOrder,
    /// Lowest subtree height first, then lowest contained symbol index.
    Balanced,
}

impl TieBreak {
    /// Map the `optimize` switch onto a policy.
    pub fn from_optimize(optimize: bool) -> Self {
        if optimize { Self::Balanced } else { Self::SymbolOrder }
    }
}

/// A node of the Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A symbol and its weight.
    Leaf {
        /// The encoded symbol.
        symbol: Symbol,
        /// Occurrence count used for construction.
        weight: u64,
    },
    /// Two exclusively owned children and their combined weight.
    Internal {
        /// Sum of the children's weights.
        weight: u64,
        /// Subtree reached by a `0` bit.
        left: Box<Node>,
        /// Subtree reached by a `1` bit.
        right: Box<Node>,
    },
}

impl Node {
    /// Weight of this node.
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    /// Symbol of a leaf, `None` for internal nodes.
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Child selected by a code bit (`false` = left), `None` on a leaf.
    #[inline]
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { right } else { left }),
        }
    }
}

/// A queued subtree and the rank it is ordered by.
struct Pending {
    rank: (u64, u32, u8),
    height: u32,
    min_symbol: u8,
    node: Node,
}

impl Pending {
    fn leaf(symbol: Symbol, weight: u64, tie_break: TieBreak) -> Self {
        let min_symbol = symbol.index() as u8;
        Self {
            rank: Self::rank(weight, 0, min_symbol, tie_break),
            height: 0,
            min_symbol,
            node: Node::Leaf { symbol, weight },
        }
    }

    fn merge(left: Pending, right: Pending, tie_break: TieBreak) -> Result<Self> {
        let weight = left
            .node
            .weight()
            .checked_add(right.node.weight())
            .ok_or_else(|| OxiHuffError::configuration("total symbol weight overflows u64"))?;
        let height = left.height.max(right.height) + 1;
        let min_symbol = left.min_symbol.min(right.min_symbol);

        Ok(Self {
            rank: Self::rank(weight, height, min_symbol, tie_break),
            height,
            min_symbol,
            node: Node::Internal {
                weight,
                left: Box::new(left.node),
                right: Box::new(right.node),
            },
        })
    }

    fn rank(weight: u64, height: u32, min_symbol: u8, tie_break: TieBreak) -> (u64, u32, u8) {
        match tie_break {
            TieBreak::SymbolOrder => (weight, 0, min_symbol),
            TieBreak::Balanced => (weight, height, min_symbol),
        }
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

/// An immutable Huffman code tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
    tie_break: TieBreak,
    leaf_count: usize,
    depth: u32,
}

impl HuffmanTree {
    /// Build a tree from symbol weights.
    ///
    /// Symbols with zero weight get no leaf. A zero terminator weight is
    /// raised to 1 as long as some other symbol is present, so every stream
    /// can be terminated. A table with a single nonzero symbol produces a
    /// single-leaf tree.
    ///
    /// # Errors
    ///
    /// `Configuration` if every weight is zero or the weights overflow `u64`.
    pub fn build(weights: &WeightTable, tie_break: TieBreak) -> Result<Self> {
        if weights.is_empty() {
            return Err(OxiHuffError::configuration(
                "all symbol weights are zero; nothing to build a tree from",
            ));
        }

        let mut queue = BinaryHeap::with_capacity(weights.distinct_symbols() + 1);
        for (symbol, weight) in weights.iter() {
            let weight = if symbol.is_terminator() && weight == 0 {
                warn!("terminator weight is zero; using 1");
                1
            } else {
                weight
            };
            if weight > 0 {
                queue.push(Reverse(Pending::leaf(symbol, weight, tie_break)));
            }
        }
        let leaf_count = queue.len();

        while queue.len() > 1 {
            let (Some(Reverse(left)), Some(Reverse(right))) = (queue.pop(), queue.pop()) else {
                break;
            };
            queue.push(Reverse(Pending::merge(left, right, tie_break)?));
        }

        let Reverse(root) = queue
            .pop()
            .ok_or_else(|| OxiHuffError::configuration("tree has no leaves"))?;

        debug!(
            leaves = leaf_count,
            depth = root.height,
            weight = root.node.weight(),
            ?tie_break,
            "built Huffman tree"
        );

        Ok(Self {
            root: root.node,
            tie_break,
            leaf_count,
            depth: root.height,
        })
    }

    /// Root node, for traversal.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Tie-break policy the tree was built with.
    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Number of leaves (encodable symbols, terminator included).
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Maximum leaf depth. Zero for a single-leaf tree.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Indented dump of the tree structure.
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_node(&self.root, 0, "root", &mut out);
        out
    }
}

fn render_node(node: &Node, depth: usize, label: &str, out: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Leaf { symbol, weight } => {
            let _ = writeln!(out, "{indent}{label}-> Leaf: {symbol} [weight: {weight}]");
        }
        Node::Internal {
            weight,
            left,
            right,
        } => {
            let _ = writeln!(out, "{indent}{label}-> Internal [weight: {weight}]");
            render_node(left, depth + 1, "0", out);
            render_node(right, depth + 1, "1", out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(c: u8) -> Symbol {
        Symbol::from_byte(c).unwrap()
    }

    fn leaf_depths(node: &Node, depth: u32, out: &mut Vec<(Symbol, u32)>) {
        match node {
            Node::Leaf { symbol, .. } => out.push((*symbol, depth)),
            Node::Internal { left, right, .. } => {
                leaf_depths(left, depth + 1, out);
                leaf_depths(right, depth + 1, out);
            }
        }
    }

    fn depth_of(tree: &HuffmanTree, symbol: Symbol) -> u32 {
        let mut depths = Vec::new();
        leaf_depths(tree.root(), 0, &mut depths);
        depths.into_iter().find(|(s, _)| *s == symbol).unwrap().1
    }

    /// a:1 b:1 c:2 EOF:2 has several optimal trees.
    fn tied_table() -> WeightTable {
        WeightTable::new()
            .with(sym(b'a'), 1)
            .with(sym(b'b'), 1)
            .with(sym(b'c'), 2)
            .with(Symbol::TERMINATOR, 2)
    }

    #[test]
    fn test_build_simple() {
        let weights = WeightTable::from_bytes(b"AAABC");
        let tree = HuffmanTree::build(&weights, TieBreak::SymbolOrder).unwrap();

        assert_eq!(tree.leaf_count(), 4);
        assert_eq!(tree.root().weight(), 6);
        assert!(!tree.root().is_leaf());
        assert_eq!(depth_of(&tree, sym(b'A')), 1);
        assert!(depth_of(&tree, sym(b'B')) >= 2);
        assert!(depth_of(&tree, sym(b'C')) >= 2);
    }

    #[test]
    fn test_zero_weights_have_no_leaf() {
        let weights = WeightTable::from_bytes(b"xyz");
        let tree = HuffmanTree::build(&weights, TieBreak::Balanced).unwrap();
        let mut depths = Vec::new();
        leaf_depths(tree.root(), 0, &mut depths);
        let symbols: Vec<_> = depths.iter().map(|(s, _)| *s).collect();
        assert_eq!(symbols.len(), 4);
        assert!(!symbols.contains(&sym(b'a')));
    }

    #[test]
    fn test_all_zero_is_configuration_error() {
        let err = HuffmanTree::build(&WeightTable::new(), TieBreak::SymbolOrder).unwrap_err();
        assert!(matches!(err, OxiHuffError::Configuration { .. }));
    }

    #[test]
    fn test_single_leaf_tree() {
        let weights = WeightTable::new().with(Symbol::TERMINATOR, 1);
        let tree = HuffmanTree::build(&weights, TieBreak::SymbolOrder).unwrap();
        assert!(tree.root().is_leaf());
        assert_eq!(tree.root().symbol(), Some(Symbol::TERMINATOR));
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn test_zero_terminator_is_raised() {
        let weights = WeightTable::new().with(sym(b'A'), 5);
        let tree = HuffmanTree::build(&weights, TieBreak::SymbolOrder).unwrap();
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(depth_of(&tree, Symbol::TERMINATOR), 1);
    }

    #[test]
    fn test_weight_overflow() {
        let weights = WeightTable::new()
            .with(sym(b'a'), u64::MAX)
            .with(sym(b'b'), u64::MAX);
        let err = HuffmanTree::build(&weights, TieBreak::SymbolOrder).unwrap_err();
        assert!(matches!(err, OxiHuffError::Configuration { .. }));
    }

    #[test]
    fn test_tie_break_changes_shape() {
        let weights = tied_table();
        let plain = HuffmanTree::build(&weights, TieBreak::SymbolOrder).unwrap();
        let balanced = HuffmanTree::build(&weights, TieBreak::Balanced).unwrap();

        assert_eq!(plain.depth(), 3);
        assert_eq!(balanced.depth(), 2);
        assert_ne!(plain, balanced);
        assert_eq!(depth_of(&plain, Symbol::TERMINATOR), 1);
        assert_eq!(depth_of(&balanced, Symbol::TERMINATOR), 2);
    }

    #[test]
    fn test_tie_break_deterministic() {
        for tie_break in [TieBreak::SymbolOrder, TieBreak::Balanced] {
            let first = HuffmanTree::build(&tied_table(), tie_break).unwrap();
            let second = HuffmanTree::build(&tied_table(), tie_break).unwrap();
            assert_eq!(first, second);
            assert_eq!(first.tie_break(), tie_break);
        }
    }

    #[test]
    fn test_child_navigation() {
        let tree = HuffmanTree::build(&tied_table(), TieBreak::SymbolOrder).unwrap();
        // Plain tree: root -> 0: EOF, 1: ((a, b), c)
        let left = tree.root().child(false).unwrap();
        assert_eq!(left.symbol(), Some(Symbol::TERMINATOR));
        assert!(left.child(true).is_none());
        let right = tree.root().child(true).unwrap();
        assert_eq!(right.child(true).unwrap().symbol(), Some(sym(b'c')));
        assert_eq!(right.child(false).unwrap().weight(), 2);
    }

    #[test]
    fn test_render() {
        let tree = HuffmanTree::build(&WeightTable::from_bytes(b"ab"), TieBreak::Balanced).unwrap();
        let dump = tree.render();
        assert!(dump.starts_with("root-> Internal [weight: 3]"));
        assert!(dump.contains("Leaf: 'a' [weight: 1]"));
        assert!(dump.contains("Leaf: EOF [weight: 1]"));
    }

    #[test]
    fn test_from_optimize() {
        assert_eq!(TieBreak::from_optimize(true), TieBreak::Balanced);
        assert_eq!(TieBreak::from_optimize(false), TieBreak::SymbolOrder);
        assert_eq!(TieBreak::default(), TieBreak::SymbolOrder);
    }
}
