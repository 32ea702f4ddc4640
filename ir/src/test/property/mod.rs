//! Property-based tests for IR operations.
//!
//! Uses proptest to verify invariants across wide input spaces.
