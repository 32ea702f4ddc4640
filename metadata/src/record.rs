//! Structured encoding of typed records as metadata nodes.
//!
//! Every record family implements [`NodeCodec`]. Decoding validates arity
//! and the type and range of each field; anything unexpected makes the whole
//! record decode as `None`.

use ember_ir::{Function, MdNode, Metadata};
use tracing::trace;

/// A typed record with a fixed node layout.
pub trait NodeCodec: Sized {
    fn to_node(&self) -> MdNode;

    fn from_node(node: &MdNode) -> Option<Self>;
}

/// Decodes the first attachment of `kind` on `f`.
///
/// A present but malformed attachment is logged and treated as absent.
pub(crate) fn decode_attached<T>(f: &Function, kind: &str, decode: impl FnOnce(&MdNode) -> Option<T>) -> Option<T> {
    let node = f.metadata().get(kind)?;
    let decoded = decode(node);
    if decoded.is_none() {
        trace!(function = f.name(), kind, %node, "ignoring malformed metadata");
    }
    decoded
}

/// `Some(())` when `node` has exactly `arity` operands.
pub(crate) fn arity(node: &MdNode, arity: usize) -> Option<()> {
    (node.len() == arity).then_some(())
}

pub(crate) fn int_field(node: &MdNode, index: usize) -> Option<u64> {
    node.operand(index)?.as_int()
}

pub(crate) fn u32_field(node: &MdNode, index: usize) -> Option<u32> {
    u32::try_from(int_field(node, index)?).ok()
}

/// Sign-extended 32-bit field.
pub(crate) fn i32_field(node: &MdNode, index: usize) -> Option<i32> {
    i32::try_from(node.operand(index)?.as_sint()?).ok()
}

/// Boolean stored as an integer that must be 0 or 1.
pub(crate) fn flag_field(node: &MdNode, index: usize) -> Option<bool> {
    match int_field(node, index)? {
        0 => Some(false),
        1 => Some(true),
        _ => None,
    }
}

pub(crate) fn node_field(node: &MdNode, index: usize) -> Option<&MdNode> {
    node.operand(index)?.as_node()
}

pub(crate) fn str_field(node: &MdNode, index: usize) -> Option<&str> {
    node.operand(index)?.as_str()
}

pub(crate) fn flag(value: bool) -> Metadata {
    Metadata::u32(u32::from(value))
}

/// Three integer fields starting at `start`.
pub(crate) fn triple(node: &MdNode, start: usize) -> Option<[u64; 3]> {
    Some([int_field(node, start)?, int_field(node, start + 1)?, int_field(node, start + 2)?])
}
