//! Names under which records are attached.
//!
//! These strings are the wire contract between passes and must stay stable
//! within a compiler version.

/// Main/tail vectorization shape of a wrapper kernel.
pub const WRAPPER: &str = "codeplay_ca_wrapper";

/// Original function to vectorized function. Multi-valued.
pub const VECZ_BASE: &str = "codeplay_ca_vecz.base";

/// Vectorized function back to its original.
pub const VECZ_DERIVED: &str = "codeplay_ca_vecz.derived";

/// Vectorization attempts that failed. Multi-valued.
pub const VECZ_BASE_FAIL: &str = "codeplay_ca_vecz.base.fail";

pub const LOCAL_SIZE: &str = "codeplay_ca_local_size";
pub const REQD_WORK_GROUP_SIZE: &str = "reqd_work_group_size";
pub const MAX_WORK_DIM: &str = "max_work_dim";
pub const SCHEDULED_FN: &str = "mux_scheduled_fn";

/// Debug location attachment, copied only on request.
pub const DEBUG: &str = "dbg";

// Module-level named metadata.

/// Legacy kernel list: one node per kernel, function first.
pub const OPENCL_KERNELS: &str = "opencl.kernels";
pub const SCHEDULING_PARAMS: &str = "mux-scheduling-params";
pub const VERSIONS: &str = "ember.metadata.versions";
