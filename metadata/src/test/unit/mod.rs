use ember_ir::{DType, Function, FunctionId, Module};

mod vectorization;
mod wrapper;

/// A module holding one kernel per name, in order.
pub(super) fn kernels(names: &[&str]) -> (Module, Vec<FunctionId>) {
    let mut m = Module::new("m");
    let ids = names.iter().map(|&name| m.add_function(Function::kernel(name, [DType::I32, DType::GlobalPtr]))).collect();
    (m, ids)
}
