//! Structured metadata attached to functions and modules.
//!
//! Metadata is untyped at this level: a node is an ordered tuple of integers,
//! strings, nullable function references and nested nodes. Interpreting a
//! node is left to the codecs that own each attachment kind.

use std::collections::BTreeMap;

use crate::FunctionId;

/// One metadata operand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Metadata {
    /// Integer constant of the given bit width, zero-extended.
    Int { bits: u32, value: u64 },
    String(String),
    /// Function reference; `None` is a null operand.
    Function(Option<FunctionId>),
    Node(MdNode),
}

impl Metadata {
    pub fn i32(value: i32) -> Self {
        Self::Int { bits: 32, value: u64::from(value as u32) }
    }

    pub fn u32(value: u32) -> Self {
        Self::Int { bits: 32, value: u64::from(value) }
    }

    pub fn u64(value: u64) -> Self {
        Self::Int { bits: 64, value }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn function(id: FunctionId) -> Self {
        Self::Function(Some(id))
    }

    pub fn null() -> Self {
        Self::Function(None)
    }

    /// Zero-extended integer value.
    pub fn as_int(&self) -> Option<u64> {
        match self {
            Self::Int { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Sign-extended integer value.
    pub fn as_sint(&self) -> Option<i64> {
        match self {
            Self::Int { bits, value } if *bits == 0 => Some(*value as i64),
            Self::Int { bits, value } if *bits >= 64 => Some(*value as i64),
            Self::Int { bits, value } => {
                let shift = 64 - bits;
                Some(((*value << shift) as i64) >> shift)
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// `Some(None)` for a null function operand, `None` if not a function operand.
    pub fn as_function(&self) -> Option<Option<FunctionId>> {
        match self {
            Self::Function(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&MdNode> {
        match self {
            Self::Node(n) => Some(n),
            _ => None,
        }
    }
}

impl From<MdNode> for Metadata {
    fn from(node: MdNode) -> Self {
        Self::Node(node)
    }
}

/// An ordered tuple of metadata operands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MdNode {
    operands: Vec<Metadata>,
}

impl MdNode {
    pub fn new(operands: impl IntoIterator<Item = Metadata>) -> Self {
        Self { operands: operands.into_iter().collect() }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn operands(&self) -> &[Metadata] {
        &self.operands
    }

    pub fn operand(&self, index: usize) -> Option<&Metadata> {
        self.operands.get(index)
    }

    pub fn len(&self) -> usize {
        self.operands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operands.is_empty()
    }
}

/// Metadata attached to a function, keyed by kind name.
///
/// A kind may carry several nodes: [`set`](Self::set) replaces every node of
/// the kind, [`add`](Self::add) appends one more.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataAttachments {
    entries: Vec<(String, MdNode)>,
}

impl MetadataAttachments {
    /// First node of the given kind.
    pub fn get(&self, kind: &str) -> Option<&MdNode> {
        self.entries.iter().find(|(k, _)| k == kind).map(|(_, n)| n)
    }

    /// Every node of the given kind, in attachment order.
    pub fn get_all<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a MdNode> + 'a {
        self.entries.iter().filter(move |(k, _)| k == kind).map(|(_, n)| n)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.get(kind).is_some()
    }

    pub fn set(&mut self, kind: &str, node: MdNode) {
        self.erase(kind);
        self.entries.push((kind.to_string(), node));
    }

    pub fn add(&mut self, kind: &str, node: MdNode) {
        self.entries.push((kind.to_string(), node));
    }

    /// Removes every node of the given kind. Returns whether any was present.
    pub fn erase(&mut self, kind: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| k != kind);
        before != self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MdNode)> {
        self.entries.iter().map(|(k, n)| (k.as_str(), n))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Module-level named metadata: each name owns an ordered list of nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedMetadata {
    nodes: BTreeMap<String, Vec<MdNode>>,
}

impl NamedMetadata {
    pub fn get(&self, name: &str) -> Option<&[MdNode]> {
        self.nodes.get(name).map(Vec::as_slice)
    }

    pub fn get_or_insert(&mut self, name: &str) -> &mut Vec<MdNode> {
        self.nodes.entry(name.to_string()).or_default()
    }

    pub fn erase(&mut self, name: &str) -> bool {
        self.nodes.remove(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MdNode])> {
        self.nodes.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}
