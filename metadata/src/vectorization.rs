//! Vectorization records.
//!
//! The vectorizer clones a kernel and links the two functions in both
//! directions: the original carries one `base` record per vectorized
//! clone, the clone carries a single `derived` record pointing back.
//! Failed attempts are recorded on the original as well, so that later
//! passes do not retry them.

use std::fmt;

use ember_ir::{Function, FunctionId, MdNode, Metadata};
use tracing::trace;

use crate::kinds;
use crate::record::{NodeCodec, arity, decode_attached, flag, flag_field, node_field, u32_field};

/// Number of lanes a kernel was widened by.
///
/// Scalable factors multiply `known_min` by a hardware-dependent runtime
/// multiple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VectorizationFactor {
    known_min: u32,
    is_scalable: bool,
}

impl VectorizationFactor {
    /// Returns `None` for a zero lane count.
    pub fn new(known_min: u32, is_scalable: bool) -> Option<Self> {
        (known_min > 0).then_some(Self { known_min, is_scalable })
    }

    pub const fn scalar() -> Self {
        Self { known_min: 1, is_scalable: false }
    }

    pub fn fixed(lanes: u32) -> Option<Self> {
        Self::new(lanes, false)
    }

    pub fn scalable(min_lanes: u32) -> Option<Self> {
        Self::new(min_lanes, true)
    }

    pub const fn known_min(&self) -> u32 {
        self.known_min
    }

    pub const fn is_scalable(&self) -> bool {
        self.is_scalable
    }

    pub const fn is_scalar(&self) -> bool {
        self.known_min == 1 && !self.is_scalable
    }

    pub const fn is_vector(&self) -> bool {
        !self.is_scalar()
    }
}

impl Default for VectorizationFactor {
    fn default() -> Self {
        Self::scalar()
    }
}

impl fmt::Display for VectorizationFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_scalable {
            write!(f, "vscale x {}", self.known_min)
        } else {
            write!(f, "{}", self.known_min)
        }
    }
}

/// Work-item dimension a kernel was vectorized along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(strum::FromRepr, strum::EnumIter, strum::Display)]
#[repr(u32)]
pub enum SimdDim {
    #[default]
    X = 0,
    Y = 1,
    Z = 2,
}

impl SimdDim {
    pub fn from_index(index: u32) -> Option<Self> {
        Self::from_repr(index)
    }

    pub const fn index(self) -> u32 {
        self as u32
    }
}

/// Shape of one vectorized variant.
///
/// Encoded as `!{i32 knownMin, i32 isScalable, i32 simdDimIdx, i32 isVP}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VectorizationInfo {
    pub vf: VectorizationFactor,
    pub simd_dim: SimdDim,
    pub is_vector_predicated: bool,
}

impl VectorizationInfo {
    pub const fn new(vf: VectorizationFactor, simd_dim: SimdDim, is_vector_predicated: bool) -> Self {
        Self { vf, simd_dim, is_vector_predicated }
    }

    /// The unvectorized shape.
    pub const fn scalar() -> Self {
        Self::new(VectorizationFactor::scalar(), SimdDim::X, false)
    }
}

impl NodeCodec for VectorizationInfo {
    fn to_node(&self) -> MdNode {
        MdNode::new([
            Metadata::u32(self.vf.known_min),
            flag(self.vf.is_scalable),
            Metadata::u32(self.simd_dim.index()),
            flag(self.is_vector_predicated),
        ])
    }

    fn from_node(node: &MdNode) -> Option<Self> {
        arity(node, 4)?;
        let vf = VectorizationFactor::new(u32_field(node, 0)?, flag_field(node, 1)?)?;
        let simd_dim = SimdDim::from_index(u32_field(node, 2)?)?;
        Some(Self::new(vf, simd_dim, flag_field(node, 3)?))
    }
}

/// One direction of an original/vectorized function link.
///
/// Encoded as `!{!VeczInfo, fn}` where `fn` may be null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkRecord {
    pub info: VectorizationInfo,
    pub function: Option<FunctionId>,
}

impl NodeCodec for LinkRecord {
    fn to_node(&self) -> MdNode {
        let function = match self.function {
            Some(id) => Metadata::function(id),
            None => Metadata::null(),
        };
        MdNode::new([Metadata::Node(self.info.to_node()), function])
    }

    fn from_node(node: &MdNode) -> Option<Self> {
        arity(node, 2)?;
        let info = VectorizationInfo::from_node(node_field(node, 0)?)?;
        let function = node.operand(1)?.as_function()?;
        Some(Self { info, function })
    }
}

/// Records on `orig` that `vecz` is its vectorized variant with shape `info`.
///
/// Appends: an original may be vectorized several times.
pub fn link_orig_to_vecz_fn_metadata(orig: &mut Function, vecz: FunctionId, info: VectorizationInfo) {
    let record = LinkRecord { info, function: Some(vecz) };
    orig.metadata_mut().add(kinds::VECZ_BASE, record.to_node());
}

/// Records on `vecz` that it was derived from `orig` with shape `info`.
///
/// Replaces any previous back link.
pub fn link_vecz_to_orig_fn_metadata(vecz: &mut Function, orig: FunctionId, info: VectorizationInfo) {
    let record = LinkRecord { info, function: Some(orig) };
    vecz.metadata_mut().set(kinds::VECZ_DERIVED, record.to_node());
}

/// Every vectorized variant linked from `f`, in link order.
///
/// `None` if there are no links, or if any link is malformed.
pub fn parse_orig_to_vecz_fn_link_metadata(f: &Function) -> Option<Vec<LinkRecord>> {
    let mut nodes = f.metadata().get_all(kinds::VECZ_BASE).peekable();
    nodes.peek()?;
    let links = nodes.map(LinkRecord::from_node).collect::<Option<Vec<_>>>();
    if links.is_none() {
        trace!(function = f.name(), kind = kinds::VECZ_BASE, "ignoring malformed vectorization links");
    }
    links
}

pub fn parse_vecz_to_orig_fn_link_metadata(f: &Function) -> Option<LinkRecord> {
    decode_attached(f, kinds::VECZ_DERIVED, LinkRecord::from_node)
}

/// Records on `f` that vectorizing it with shape `info` failed.
pub fn encode_vectorization_failed_metadata(f: &mut Function, info: VectorizationInfo) {
    let record = LinkRecord { info, function: None };
    f.metadata_mut().add(kinds::VECZ_BASE_FAIL, record.to_node());
}

/// Shapes whose vectorization failed. Malformed entries are skipped.
pub fn parse_vectorization_failed_metadata(f: &Function) -> Vec<VectorizationInfo> {
    f.metadata()
        .get_all(kinds::VECZ_BASE_FAIL)
        .filter_map(|node| {
            let record = LinkRecord::from_node(node);
            if record.is_none() {
                trace!(function = f.name(), kind = kinds::VECZ_BASE_FAIL, %node, "ignoring malformed metadata");
            }
            record.map(|r| r.info)
        })
        .collect()
}

/// Removes the links to vectorized variants and the failure records.
pub fn drop_vecz_orig_metadata(f: &mut Function) {
    f.metadata_mut().erase(kinds::VECZ_BASE);
    f.metadata_mut().erase(kinds::VECZ_BASE_FAIL);
}

/// Removes the link back to the original function.
pub fn drop_vecz_derived_metadata(f: &mut Function) {
    f.metadata_mut().erase(kinds::VECZ_DERIVED);
}

