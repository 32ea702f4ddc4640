//! Module-level format version table.
//!
//! Producers record the layout version of each record family they wrote.
//! Consumers compare the table against their own versions before trusting
//! any record. A module without a table is accepted as-is.

use ember_ir::{MdNode, Metadata, Module};
use snafu::OptionExt;
use strum::IntoEnumIterator;

use crate::error::*;
use crate::kinds;
use crate::record::{arity, int_field, str_field};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(strum::EnumIter, strum::Display, strum::EnumString, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum MetadataFamily {
    Wrapper,
    VeczLink,
    WorkGroup,
    Scheduling,
}

impl MetadataFamily {
    /// Layout version written by this codec.
    pub const fn version(self) -> u32 {
        match self {
            Self::Wrapper => 1,
            // Failure records joined the family in version 2.
            Self::VeczLink => 2,
            Self::WorkGroup => 1,
            Self::Scheduling => 1,
        }
    }
}

/// Writes the version of every family to `m`, replacing any previous table.
pub fn encode_metadata_versions(m: &mut Module) {
    let table = m.named_metadata_mut().get_or_insert(kinds::VERSIONS);
    table.clear();
    table.extend(MetadataFamily::iter().map(|family| {
        let name: &'static str = family.into();
        MdNode::new([Metadata::string(name), Metadata::u32(family.version())])
    }));
}

/// Checks the version table of `m` against this codec.
pub fn check_metadata_versions(m: &Module) -> Result<()> {
    let Some(table) = m.named_metadata().get(kinds::VERSIONS) else {
        return Ok(());
    };
    for node in table {
        let malformed = || MalformedVersionTableSnafu { reason: format!("unexpected entry {node}") };
        arity(node, 2).with_context(malformed)?;
        let name = str_field(node, 0).with_context(malformed)?;
        let found = int_field(node, 1).with_context(malformed)?;
        let family: MetadataFamily = name.parse().ok().context(UnknownFamilySnafu { family: name })?;
        snafu::ensure!(
            found == u64::from(family.version()),
            VersionMismatchSnafu { family: name, found, expected: family.version() }
        );
    }
    Ok(())
}
