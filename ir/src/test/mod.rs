//! Test support for the IR.
//!
//! `property::generators` is public behind the `proptest` feature so that
//! downstream crates can generate kernels for their own property tests.

pub mod property;
