//! Pipeline configuration.
//!
//! Supports both explicit configuration with bon builders and environment
//! variable fallbacks.

use bon::bon;

/// Pipeline used when none is configured.
pub const DEFAULT_PIPELINE: &str = "bit-shift-fixup";

/// Pass manager options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Verify the module after every pass.
    pub verify_each: bool,
    /// Log each pass as it starts and finishes.
    pub debug_passes: bool,
    /// Log the wall time of each pass.
    pub time_passes: bool,
    /// Comma-separated pass names.
    pub passes: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { verify_each: false, debug_passes: false, time_passes: false, passes: DEFAULT_PIPELINE.to_string() }
    }
}

#[bon]
impl PipelineConfig {
    /// Create a pipeline configuration with builder pattern.
    #[builder]
    pub fn new(
        #[builder(default = false)] verify_each: bool,
        #[builder(default = false)] debug_passes: bool,
        #[builder(default = false)] time_passes: bool,
        #[builder(default = DEFAULT_PIPELINE.to_string(), into)] passes: String,
    ) -> Self {
        Self { verify_each, debug_passes, time_passes, passes }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `EMBER_VERIFY_EACH` - Verify after every pass if set
    /// * `EMBER_DEBUG_PASSES` - Log pass execution if set
    /// * `EMBER_TIME_PASSES` - Log pass timings if set
    /// * `EMBER_PASSES` - Pipeline text (default: `bit-shift-fixup`)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str| lookup(key).is_some_and(|v| !matches!(v.as_str(), "" | "0" | "false"));
        Self {
            verify_each: flag("EMBER_VERIFY_EACH"),
            debug_passes: flag("EMBER_DEBUG_PASSES"),
            time_passes: flag("EMBER_TIME_PASSES"),
            passes: lookup("EMBER_PASSES").unwrap_or_else(|| DEFAULT_PIPELINE.to_string()),
        }
    }
}
