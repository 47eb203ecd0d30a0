//! # sqlgate Policy Kernel
//!
//! Role-hierarchy access control for the sqlgate sandboxed SQL executor.
//!
//! A policy is declared as a forest of roles, each carrying direct grants
//! of statement and source indices. Start roles are isolated entry points,
//! sink roles are isolated dead ends, and everything else may hand off to
//! stricter roles only. [`ClosureGenerator`] compiles a finished
//! [`RoleHierarchy`] into an immutable [`RoleTable`] that the dispatcher
//! consults on every request through the
//! [`AccessControl`](sqlgate_core::AccessControl) trait.
//!
//! ```
//! use sqlgate_policy::{ClosureGenerator, RoleHierarchy};
//! use sqlgate_core::AccessControl;
//!
//! let mut hier = RoleHierarchy::new(3);
//! hier.add_child(0, 1).unwrap();
//! hier.mark_sink(2).unwrap();
//! hier.grant_statement(0, 7).unwrap();
//!
//! let table = ClosureGenerator::generate(&hier, 0).unwrap();
//! assert!(table.statement_permitted(1, 7)); // inherited from role 0
//! assert!(table.transition_permitted(0, 1)); // descendant
//! assert!(table.transition_permitted(1, 2)); // any role may give up
//! assert!(!table.transition_permitted(1, 0)); // never back up the ladder
//! ```

pub mod closure;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod shared;
pub mod table;

// Re-export commonly used types
pub use closure::ClosureGenerator;
pub use config::PolicyConfig;
pub use error::{PolicyError, Result};
pub use hierarchy::RoleHierarchy;
pub use shared::SharedTable;
pub use table::RoleTable;
