//! Scheduling-parameter placement.
//!
//! Scheduling parameters are the implicit arguments (work-item info,
//! work-group info, ...) a target adds to kernels. The module lists the
//! parameter kinds by name once; each function lists, per kind, the index
//! of the argument carrying it, or `-1` when that kind was not
//! materialized on the function.

use ember_ir::{Function, MdNode, Metadata, Module};

use crate::kinds;
use crate::record::{decode_attached, i32_field, str_field};

/// Marker for a scheduling parameter not present on a function.
pub const NOT_MATERIALIZED: i32 = -1;

/// Records the argument index of each scheduling parameter of `f`.
pub fn set_scheduling_parameter_function_metadata(f: &mut Function, indices: &[i32]) {
    let node = MdNode::new(indices.iter().map(|&i| Metadata::i32(i)));
    f.metadata_mut().set(kinds::SCHEDULED_FN, node);
}

/// Argument indices of the scheduling parameters of `f`.
///
/// Empty when the record is absent or malformed.
pub fn get_scheduling_parameter_function_metadata(f: &Function) -> Vec<i32> {
    decode_attached(f, kinds::SCHEDULED_FN, |node| {
        (0..node.len()).map(|i| i32_field(node, i).filter(|&v| v >= NOT_MATERIALIZED)).collect::<Option<Vec<_>>>()
    })
    .unwrap_or_default()
}

pub fn drop_scheduling_parameter_metadata(f: &mut Function) {
    f.metadata_mut().erase(kinds::SCHEDULED_FN);
}

/// Records the names of the target's scheduling parameters on `m`.
pub fn set_scheduling_parameter_module_metadata<S: AsRef<str>>(m: &mut Module, names: &[S]) {
    let node = MdNode::new(names.iter().map(|n| Metadata::string(n.as_ref())));
    let named = m.named_metadata_mut().get_or_insert(kinds::SCHEDULING_PARAMS);
    named.clear();
    named.push(node);
}

pub fn get_scheduling_parameter_module_metadata(m: &Module) -> Option<Vec<String>> {
    let [node] = m.named_metadata().get(kinds::SCHEDULING_PARAMS)? else {
        tracing::trace!(name = kinds::SCHEDULING_PARAMS, "expected exactly one node");
        return None;
    };
    (0..node.len()).map(|i| str_field(node, i).map(str::to_string)).collect()
}

/// Position in the scheduling-parameter list of `f` whose argument is `arg_index`.
pub fn is_scheduling_parameter(f: &Function, arg_index: u32) -> Option<usize> {
    let arg_index = i32::try_from(arg_index).ok()?;
    get_scheduling_parameter_function_metadata(f).iter().position(|&i| i == arg_index)
}
