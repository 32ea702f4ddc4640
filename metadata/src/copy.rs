use ember_ir::Function;
use itertools::Itertools;

use crate::kinds;

/// Copies the metadata attachments of `from` onto `to`.
///
/// Every kind present on `from` replaces the same kind on `to`; other kinds
/// on `to` are kept. Debug locations are copied only with `include_debug`.
pub fn copy_function_metadata(from: &Function, to: &mut Function, include_debug: bool) {
    let present = from.metadata().iter().map(|(kind, _)| kind).filter(|&k| include_debug || k != kinds::DEBUG).unique();
    for kind in present {
        to.metadata_mut().erase(kind);
        for node in from.metadata().get_all(kind) {
            to.metadata_mut().add(kind, node.clone());
        }
    }
}
