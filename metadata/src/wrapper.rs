//! Wrapper kernel shape.
//!
//! A wrapper kernel runs a main vectorized loop and optionally a scalar or
//! narrower tail for the remaining work items. Unvectorized kernels record a
//! scalar main and no tail. Vector-predicated kernels without a tail record
//! their maximum factor as the main shape.

use ember_ir::{Function, MdNode, Metadata};

use crate::kinds;
use crate::record::{NodeCodec, arity, decode_attached, node_field};
use crate::vectorization::VectorizationInfo;

/// Encoded as `!{!Main, !Tail}` where `!Tail` is `!{}` when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WrapperMetadata {
    pub main: VectorizationInfo,
    pub tail: Option<VectorizationInfo>,
}

impl WrapperMetadata {
    pub const fn new(main: VectorizationInfo, tail: Option<VectorizationInfo>) -> Self {
        Self { main, tail }
    }

    pub const fn unvectorized() -> Self {
        Self::new(VectorizationInfo::scalar(), None)
    }
}

impl NodeCodec for WrapperMetadata {
    fn to_node(&self) -> MdNode {
        let tail = self.tail.as_ref().map_or_else(MdNode::empty, NodeCodec::to_node);
        MdNode::new([Metadata::Node(self.main.to_node()), Metadata::Node(tail)])
    }

    fn from_node(node: &MdNode) -> Option<Self> {
        arity(node, 2)?;
        let main = VectorizationInfo::from_node(node_field(node, 0)?)?;
        let tail = match node_field(node, 1)? {
            empty if empty.is_empty() => None,
            tail => Some(VectorizationInfo::from_node(tail)?),
        };
        Some(Self { main, tail })
    }
}

pub fn encode_wrapper_fn_metadata(f: &mut Function, wrapper: &WrapperMetadata) {
    f.metadata_mut().set(kinds::WRAPPER, wrapper.to_node());
}

pub fn parse_wrapper_fn_metadata(f: &Function) -> Option<WrapperMetadata> {
    decode_attached(f, kinds::WRAPPER, WrapperMetadata::from_node)
}
