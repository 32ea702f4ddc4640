//! Work-group sizing records.

use ember_ir::{Function, MdNode, Metadata};

use crate::kinds;
use crate::record::{arity, decode_attached, str_field, triple, u32_field};

/// Records the local work-group size chosen for `f`.
pub fn encode_local_size_metadata(f: &mut Function, size: [u64; 3]) {
    f.metadata_mut().set(kinds::LOCAL_SIZE, MdNode::new(size.map(Metadata::u64)));
}

pub fn get_local_size_metadata(f: &Function) -> Option<[u64; 3]> {
    decode_attached(f, kinds::LOCAL_SIZE, |node| {
        arity(node, 3)?;
        triple(node, 0)
    })
}

/// Attaches a required work-group size as the function-level `!{i32 x, i32 y, i32 z}`.
pub fn encode_required_wgs_metadata(f: &mut Function, size: [u32; 3]) {
    f.metadata_mut().set(kinds::REQD_WORK_GROUP_SIZE, MdNode::new(size.map(Metadata::u32)));
}

/// Required work-group size from the function attachment.
pub fn parse_required_wgs_metadata(f: &Function) -> Option<[u64; 3]> {
    decode_attached(f, kinds::REQD_WORK_GROUP_SIZE, |node| {
        arity(node, 3)?;
        triple(node, 0)
    })
}

/// Required work-group size from a legacy kernel-list node.
///
/// The node is `!{fn, ...}` where one of the trailing operands may be the
/// subnode `!{!"reqd_work_group_size", i32 x, i32 y, i32 z}`. Sizes are read
/// from subnode operands 1..=3 rather than 0..=2.
pub fn parse_required_wgs_from_kernel_node(node: &MdNode) -> Option<[u64; 3]> {
    node.operands().iter().skip(1).filter_map(Metadata::as_node).find_map(|sub| {
        if str_field(sub, 0)? != kinds::REQD_WORK_GROUP_SIZE {
            return None;
        }
        arity(sub, 4)?;
        triple(sub, 1)
    })
}

pub fn encode_max_work_dim_metadata(f: &mut Function, dims: u32) {
    f.metadata_mut().set(kinds::MAX_WORK_DIM, MdNode::new([Metadata::u32(dims)]));
}

pub fn parse_max_work_dim_metadata(f: &Function) -> Option<u32> {
    decode_attached(f, kinds::MAX_WORK_DIM, |node| {
        arity(node, 1)?;
        u32_field(node, 0)
    })
}
