//! Error types for the role-policy kernel

use sqlgate_core::types::RoleId;
use thiserror::Error;

/// Role-policy errors
///
/// Every variant identifies the offending role by index so callers can
/// report which line of their policy definition was rejected. A failed
/// operation never mutates the hierarchy it was applied to.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// Role index outside the hierarchy
    #[error("role {role} out of bounds (hierarchy has {len} roles)")]
    RoleOutOfBounds { role: RoleId, len: usize },

    /// Role already has a parent (re-parenting is rejected, not overwritten)
    #[error("role {role} already has a parent")]
    HasParent { role: RoleId },

    /// Role already has children and cannot be isolated
    #[error("role {role} already has children")]
    HasChildren { role: RoleId },

    /// Edge would make a role its own ancestor
    #[error("edge {parent} -> {child} would create a cycle")]
    CycleDetected { parent: RoleId, child: RoleId },

    /// Role is a start or sink and may not gain relationships
    #[error("role {role} is a start or sink and cannot take an edge")]
    IsolatedRole { role: RoleId },

    /// Role is already in the sink set
    #[error("role {role} is already a sink")]
    AlreadySink { role: RoleId },

    /// Role is already in the start set
    #[error("role {role} is already a start")]
    AlreadyStart { role: RoleId },

    /// Default role handed to closure generation is out of range
    #[error("default role {role} out of bounds (hierarchy has {len} roles)")]
    InvalidDefaultRole { role: RoleId, len: usize },
}

/// Result type for role-policy operations
pub type Result<T> = std::result::Result<T, PolicyError>;

impl From<PolicyError> for sqlgate_core::CoreError {
    fn from(err: PolicyError) -> Self {
        sqlgate_core::CoreError::Policy(err.to_string())
    }
}
