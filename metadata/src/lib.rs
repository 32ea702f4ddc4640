//! Kernel metadata codec.
//!
//! Passes communicate facts about kernels (vectorization shape, work-group
//! sizing, scheduling-parameter placement) through metadata attached to
//! functions and modules. This crate owns the wire layout of every such
//! record and exposes typed encoders and decoders for them.
//!
//! Decoders never fail: a record that is missing or does not have the
//! expected layout decodes as `None`. Operations that check consistency
//! across records return [`Result`].
//!
//! # Module Organization
//!
//! - [`kinds`] - Attachment and named-metadata names
//! - [`record`] - [`NodeCodec`] and validated field readers
//! - [`vectorization`] - Vectorization factors, links between original and vectorized functions
//! - [`wrapper`] - Main/tail vectorization shape of wrapper kernels
//! - [`work_group`] - Local size, required work-group size, max work dimension
//! - [`scheduling`] - Scheduling-parameter placement
//! - [`context`] - Per-compilation-unit configuration
//! - [`kernel`] - Kernel list population
//! - [`copy`] - Copying attachments between functions
//! - [`versions`] - Module-level format version table

pub mod context;
pub mod copy;
pub mod error;
pub mod kernel;
pub mod kinds;
pub mod record;
pub mod scheduling;
pub mod vectorization;
pub mod versions;
pub mod work_group;
pub mod wrapper;

#[cfg(any(test, feature = "proptest"))]
pub mod test;

pub use context::CompilationContext;
pub use copy::copy_function_metadata;
pub use error::{Error, Result};
pub use kernel::{KernelInfo, populate_kernel_list};
pub use record::NodeCodec;
pub use scheduling::{
    drop_scheduling_parameter_metadata, get_scheduling_parameter_function_metadata,
    get_scheduling_parameter_module_metadata, is_scheduling_parameter, set_scheduling_parameter_function_metadata,
    set_scheduling_parameter_module_metadata,
};
pub use vectorization::{
    LinkRecord, SimdDim, VectorizationFactor, VectorizationInfo, drop_vecz_derived_metadata, drop_vecz_orig_metadata,
    encode_vectorization_failed_metadata, link_orig_to_vecz_fn_metadata, link_vecz_to_orig_fn_metadata,
    parse_orig_to_vecz_fn_link_metadata, parse_vecz_to_orig_fn_link_metadata, parse_vectorization_failed_metadata,
};
pub use versions::{MetadataFamily, check_metadata_versions, encode_metadata_versions};
pub use work_group::{
    encode_local_size_metadata, encode_max_work_dim_metadata, encode_required_wgs_metadata, get_local_size_metadata,
    parse_max_work_dim_metadata, parse_required_wgs_from_kernel_node, parse_required_wgs_metadata,
};
pub use wrapper::{WrapperMetadata, encode_wrapper_fn_metadata, parse_wrapper_fn_metadata};
