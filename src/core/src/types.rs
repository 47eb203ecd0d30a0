//! Shared identifier types for the sqlgate platform
//!
//! Roles, prepared statements, and data sources are all addressed by
//! dense zero-based indices. The executor defines what a statement or
//! source index means; the policy kernel treats them as opaque.

/// Index of a role in a hierarchy or compiled role table.
pub type RoleId = usize;

/// Index of a prepared statement registered with the executor.
pub type StatementId = usize;

/// Index of a data source opened by the executor.
pub type SourceId = usize;
