//! Editable role hierarchy with structural validation
//!
//! Roles form a forest through parent indices: a role whose parent is
//! itself is a root. Start and sink roles must stay isolated, so every
//! mutation validates before it writes and a failed call leaves the
//! hierarchy exactly as it was.

use crate::error::{PolicyError, Result};
use sqlgate_core::types::{RoleId, SourceId, StatementId};
use tracing::debug;

/// Append `value` if absent. Returns true when the set changed.
pub(crate) fn insert_unique(set: &mut Vec<usize>, value: usize) -> bool {
    if set.contains(&value) {
        return false;
    }
    set.push(value);
    true
}

/// One role: parent link plus direct grants.
///
/// Grant sets keep insertion order and never hold duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RoleNode {
    /// Parent role index; a node is a root iff it points at itself
    pub(crate) parent: RoleId,
    /// Statements granted directly to this role
    pub(crate) statements: Vec<StatementId>,
    /// Sources granted directly to this role
    pub(crate) sources: Vec<SourceId>,
}

impl RoleNode {
    fn root(index: RoleId) -> Self {
        Self {
            parent: index,
            statements: Vec::new(),
            sources: Vec::new(),
        }
    }
}

/// Editable forest of roles with per-role grants and the two isolated
/// node sets (starts and sinks).
///
/// The role count is fixed at construction; edit calls only rearrange
/// parent links, grants, and set membership. Once the policy is fully
/// declared, hand the hierarchy to
/// [`ClosureGenerator`](crate::ClosureGenerator) and drop it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleHierarchy {
    pub(crate) roles: Vec<RoleNode>,
    pub(crate) starts: Vec<RoleId>,
    pub(crate) sinks: Vec<RoleId>,
}

impl RoleHierarchy {
    /// Create a hierarchy of `len` roles, each its own root with no
    /// grants. `len == 0` is a legal empty hierarchy.
    pub fn new(len: usize) -> Self {
        Self {
            roles: (0..len).map(RoleNode::root).collect(),
            starts: Vec::new(),
            sinks: Vec::new(),
        }
    }

    /// Number of roles.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// True when the hierarchy has no roles.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Parent of `role`, or `None` when `role` is out of bounds. A root
    /// reports itself.
    pub fn parent(&self, role: RoleId) -> Option<RoleId> {
        self.roles.get(role).map(|node| node.parent)
    }

    /// Direct statement grants of `role`.
    pub fn statements(&self, role: RoleId) -> Option<&[StatementId]> {
        self.roles.get(role).map(|node| node.statements.as_slice())
    }

    /// Direct source grants of `role`.
    pub fn sources(&self, role: RoleId) -> Option<&[SourceId]> {
        self.roles.get(role).map(|node| node.sources.as_slice())
    }

    /// Roles marked as entry points.
    pub fn starts(&self) -> &[RoleId] {
        &self.starts
    }

    /// Roles marked as dead ends.
    pub fn sinks(&self) -> &[RoleId] {
        &self.sinks
    }

    /// True when `role` is in the start set.
    pub fn is_start(&self, role: RoleId) -> bool {
        self.starts.contains(&role)
    }

    /// True when `role` is in the sink set.
    pub fn is_sink(&self, role: RoleId) -> bool {
        self.sinks.contains(&role)
    }

    fn check_bounds(&self, role: RoleId) -> Result<()> {
        if role >= self.roles.len() {
            return Err(PolicyError::RoleOutOfBounds {
                role,
                len: self.roles.len(),
            });
        }
        Ok(())
    }

    fn has_children(&self, role: RoleId) -> bool {
        self.roles
            .iter()
            .enumerate()
            .any(|(i, node)| i != role && node.parent == role)
    }

    /// Grant statement `stmt` directly to `role`. Re-granting an
    /// identifier the role already holds succeeds without duplicating.
    pub fn grant_statement(&mut self, role: RoleId, stmt: StatementId) -> Result<()> {
        self.check_bounds(role)?;
        insert_unique(&mut self.roles[role].statements, stmt);
        Ok(())
    }

    /// Grant source `src` directly to `role`. Idempotent like
    /// [`grant_statement`](Self::grant_statement).
    pub fn grant_source(&mut self, role: RoleId, src: SourceId) -> Result<()> {
        self.check_bounds(role)?;
        insert_unique(&mut self.roles[role].sources, src);
        Ok(())
    }

    /// Make `child` a child of `parent`.
    ///
    /// Rejects the edge when either endpoint is out of bounds, when
    /// `child` already has a parent (a role has at most one), when
    /// either endpoint is a start or sink, or when `child` sits on
    /// `parent`'s ancestor chain (the edge would close a cycle). A
    /// self-edge on an unmarked role is a no-op success.
    pub fn add_child(&mut self, parent: RoleId, child: RoleId) -> Result<()> {
        self.check_bounds(parent)?;
        self.check_bounds(child)?;

        if self.roles[child].parent != child {
            return Err(PolicyError::HasParent { role: child });
        }

        for &role in [parent, child].iter() {
            if self.is_sink(role) || self.is_start(role) {
                return Err(PolicyError::IsolatedRole { role });
            }
        }

        // Ignore self-reference.
        if child == parent {
            return Ok(());
        }

        // Walk from the parent to its root; finding the child on the way
        // means the edge would make the child its own ancestor.
        let mut idx = parent;
        loop {
            let up = self.roles[idx].parent;
            if up == child {
                return Err(PolicyError::CycleDetected { parent, child });
            }
            if up == idx {
                break;
            }
            idx = up;
        }

        self.roles[child].parent = parent;
        debug!("role {} linked under role {}", child, parent);
        Ok(())
    }

    /// Mark `role` as a start (entry-point) role.
    ///
    /// Fails if the role already has a parent or children, or is a
    /// sink. Re-marking an existing start succeeds.
    pub fn mark_start(&mut self, role: RoleId) -> Result<()> {
        self.check_isolatable(role)?;

        if self.is_sink(role) {
            return Err(PolicyError::AlreadySink { role });
        }
        if insert_unique(&mut self.starts, role) {
            debug!("role {} marked as start", role);
        }
        Ok(())
    }

    /// Mark `role` as a sink (dead-end) role.
    ///
    /// Fails if the role already has a parent or children, or is a
    /// start. Re-marking an existing sink succeeds.
    pub fn mark_sink(&mut self, role: RoleId) -> Result<()> {
        self.check_isolatable(role)?;

        if self.is_start(role) {
            return Err(PolicyError::AlreadyStart { role });
        }
        if insert_unique(&mut self.sinks, role) {
            debug!("role {} marked as sink", role);
        }
        Ok(())
    }

    /// A role can only be isolated while it has no relationships at all.
    fn check_isolatable(&self, role: RoleId) -> Result<()> {
        self.check_bounds(role)?;

        if self.roles[role].parent != role {
            return Err(PolicyError::HasParent { role });
        }
        if self.has_children(role) {
            return Err(PolicyError::HasChildren { role });
        }
        Ok(())
    }
}
