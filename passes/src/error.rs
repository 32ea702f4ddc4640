use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("unknown pass '{name}'"))]
    UnknownPass { name: String },

    #[snafu(display("invalid pipeline '{pipeline}': {reason}"))]
    InvalidPipeline { pipeline: String, reason: String },

    /// The IR failed verification after the named pass ran.
    #[snafu(display("IR is invalid after {pass}"))]
    VerifyFailed { pass: String, source: ember_ir::Error },
}
