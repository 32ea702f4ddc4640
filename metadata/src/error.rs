use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// A record family was written by an incompatible codec.
    #[snafu(display("metadata family {family} has version {found}, expected {expected}"))]
    VersionMismatch { family: String, found: u64, expected: u32 },

    #[snafu(display("unknown metadata family {family} in version table"))]
    UnknownFamily { family: String },

    #[snafu(display("malformed metadata version table: {reason}"))]
    MalformedVersionTable { reason: String },

    /// The function lists more scheduling parameters than the module names.
    #[snafu(display("@{function} has {found} scheduling parameters but the module names {expected}"))]
    SchedulingParameterCount { function: String, found: usize, expected: usize },

    #[snafu(display("@{function} marks argument {index} as a scheduling parameter but has {params} parameters"))]
    SchedulingParameterOutOfRange { function: String, index: i32, params: usize },
}
