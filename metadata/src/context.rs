//! Per-compilation-unit configuration.

use ember_ir::{Function, Module};
use snafu::ensure;

use crate::error::*;
use crate::scheduling::{NOT_MATERIALIZED, get_scheduling_parameter_function_metadata, get_scheduling_parameter_module_metadata};

/// Configuration shared by every function of one compilation unit.
///
/// Holds the target's canonical scheduling-parameter names. Built once per
/// module and passed explicitly to whatever needs it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilationContext {
    scheduling_parameters: Vec<String>,
}

impl CompilationContext {
    pub fn new(scheduling_parameters: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self { scheduling_parameters: scheduling_parameters.into_iter().map(Into::into).collect() }
    }

    /// Reads the scheduling-parameter names recorded on `m`, if any.
    pub fn from_module(m: &Module) -> Self {
        Self { scheduling_parameters: get_scheduling_parameter_module_metadata(m).unwrap_or_default() }
    }

    pub fn scheduling_parameter_names(&self) -> &[String] {
        &self.scheduling_parameters
    }

    /// Name of the scheduling parameter carried by argument `arg_index` of `f`.
    pub fn scheduling_parameter_kind(&self, f: &Function, arg_index: u32) -> Option<&str> {
        let position = crate::scheduling::is_scheduling_parameter(f, arg_index)?;
        self.scheduling_parameters.get(position).map(String::as_str)
    }

    /// Checks the scheduling-parameter record of `f` against this context.
    ///
    /// Every listed index must be `-1` or a valid argument index, and the
    /// function may not list more parameters than the context names.
    pub fn validate_scheduling_parameters(&self, f: &Function) -> Result<()> {
        let indices = get_scheduling_parameter_function_metadata(f);
        ensure!(
            indices.len() <= self.scheduling_parameters.len(),
            SchedulingParameterCountSnafu {
                function: f.name(),
                found: indices.len(),
                expected: self.scheduling_parameters.len(),
            }
        );
        let params = f.params().len();
        for index in indices {
            let in_range = index == NOT_MATERIALIZED || usize::try_from(index).is_ok_and(|i| i < params);
            ensure!(in_range, SchedulingParameterOutOfRangeSnafu { function: f.name(), index, params });
        }
        Ok(())
    }
}
