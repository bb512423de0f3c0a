//! CQRS marker traits
//!
//! Distinguish write operations from reads at the type level. Commands are
//! the mutating operations; queries are side-effect-free and safe to
//! retry.

/// Marker for write operations
pub trait Command {}

/// Marker for read operations
pub trait Query {}
