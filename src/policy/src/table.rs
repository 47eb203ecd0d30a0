//! Compiled role table and its lookup API
//!
//! The table is the immutable output of closure generation: one entry
//! per role holding the full transition set and the ancestor-inherited
//! statement and source grants. The dispatcher queries it on every
//! request, so lookups are plain slice scans with no locking and no
//! allocation, and a bad role index answers deny rather than panicking.

use serde::{Deserialize, Serialize};
use sqlgate_core::traits::AccessControl;
use sqlgate_core::types::{RoleId, SourceId, StatementId};

/// Per-role slice of the compiled table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct RoleEntry {
    /// Roles this role may switch into
    pub(crate) transitions: Vec<RoleId>,
    /// Statements usable by this role (direct and inherited)
    pub(crate) statements: Vec<StatementId>,
    /// Sources usable by this role (direct and inherited)
    pub(crate) sources: Vec<SourceId>,
}

impl RoleEntry {
    /// Entry whose transition set is allocated at its final size.
    pub(crate) fn with_transition_capacity(size: usize) -> Self {
        Self {
            transitions: Vec::with_capacity(size),
            statements: Vec::new(),
            sources: Vec::new(),
        }
    }
}

/// Immutable compiled access policy, one entry per role.
///
/// Produced once per hierarchy version by
/// [`ClosureGenerator`](crate::ClosureGenerator); replace it wholesale
/// (see [`SharedTable`](crate::SharedTable)) rather than editing it. The
/// serde derives exist so the controller can ship a compiled table to
/// the isolated executor; the table has no persistence format of its
/// own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleTable {
    entries: Vec<RoleEntry>,
    default_role: RoleId,
}

impl RoleTable {
    pub(crate) fn new(entries: Vec<RoleEntry>, default_role: RoleId) -> Self {
        Self {
            entries,
            default_role,
        }
    }

    /// Number of roles in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table was compiled from an empty hierarchy.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Role a fresh session starts in.
    pub fn default_role(&self) -> RoleId {
        self.default_role
    }

    /// Transition set of `role`, or `None` when out of range.
    pub fn transitions(&self, role: RoleId) -> Option<&[RoleId]> {
        self.entries.get(role).map(|e| e.transitions.as_slice())
    }

    /// Usable statements of `role`, or `None` when out of range.
    pub fn statements(&self, role: RoleId) -> Option<&[StatementId]> {
        self.entries.get(role).map(|e| e.statements.as_slice())
    }

    /// Usable sources of `role`, or `None` when out of range.
    pub fn sources(&self, role: RoleId) -> Option<&[SourceId]> {
        self.entries.get(role).map(|e| e.sources.as_slice())
    }
}

impl AccessControl for RoleTable {
    fn statement_permitted(&self, role: RoleId, stmt: StatementId) -> bool {
        self.entries
            .get(role)
            .is_some_and(|e| e.statements.contains(&stmt))
    }

    fn source_permitted(&self, role: RoleId, src: SourceId) -> bool {
        self.entries
            .get(role)
            .is_some_and(|e| e.sources.contains(&src))
    }

    fn transition_permitted(&self, from: RoleId, to: RoleId) -> bool {
        self.entries
            .get(from)
            .is_some_and(|e| e.transitions.contains(&to))
    }

    fn default_role(&self) -> RoleId {
        self.default_role
    }
}
