//! Kernel list population.

use ember_ir::Module;
use tracing::trace;

use crate::kinds;
use crate::work_group::{parse_required_wgs_from_kernel_node, parse_required_wgs_metadata};

/// A kernel entry point of a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelInfo {
    pub name: String,
    pub reqd_work_group_size: Option<[u64; 3]>,
}

impl KernelInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), reqd_work_group_size: None }
    }
}

/// Lists the kernels of `m`.
///
/// When the legacy `opencl.kernels` list is present it is authoritative:
/// one entry per node, with the required work-group size read from the
/// node. Otherwise every function with the kernel calling convention is
/// listed, with the required work-group size read from the function.
pub fn populate_kernel_list(m: &Module) -> Vec<KernelInfo> {
    if let Some(nodes) = m.named_metadata().get(kinds::OPENCL_KERNELS) {
        return nodes
            .iter()
            .filter_map(|node| {
                let function = node.operand(0).and_then(|op| op.as_function()).flatten().and_then(|id| m.function(id));
                let Some(function) = function else {
                    trace!(%node, "skipping kernel list entry without a function");
                    return None;
                };
                Some(KernelInfo {
                    name: function.name().to_string(),
                    reqd_work_group_size: parse_required_wgs_from_kernel_node(node),
                })
            })
            .collect();
    }

    m.functions()
        .filter(|(_, f)| f.is_kernel())
        .map(|(_, f)| KernelInfo { name: f.name().to_string(), reqd_work_group_size: parse_required_wgs_metadata(f) })
        .collect()
}
