//! Policy configuration loading and validation
//!
//! Deployments declare the role policy as a TOML document instead of
//! hand-written builder calls. Building replays the declaration through
//! the hierarchy edit API, so every structural invariant is enforced on
//! the declared data exactly as it would be on code.

use crate::closure::ClosureGenerator;
use crate::hierarchy::RoleHierarchy;
use crate::table::RoleTable;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use sqlgate_core::types::RoleId;
use std::path::Path;

/// One parent/child edge in the role forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub parent: RoleId,
    pub child: RoleId,
}

/// Grant of a list of statement or source indices to one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub role: RoleId,
    pub ids: Vec<usize>,
}

/// Complete declarative role policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Number of roles in the hierarchy
    pub roles: usize,

    #[serde(default)]
    pub starts: Vec<RoleId>,

    #[serde(default)]
    pub sinks: Vec<RoleId>,

    #[serde(default)]
    pub edges: Vec<Edge>,

    #[serde(default)]
    pub statements: Vec<Grant>,

    #[serde(default)]
    pub sources: Vec<Grant>,

    #[serde(default)]
    pub default_role: RoleId,
}

impl PolicyConfig {
    /// Load a policy from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())
            .context("Failed to read policy configuration file")?;

        let config: PolicyConfig =
            toml::from_str(&contents).context("Failed to parse policy configuration file")?;

        Ok(config)
    }

    /// Parse a policy from a TOML string.
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        toml::from_str(contents).context("Failed to parse policy configuration")
    }

    /// Replay the declaration into an editable hierarchy.
    ///
    /// Marks are applied before edges and edges before grants, so that
    /// declared start/sink roles are isolated before any relationship
    /// could touch them.
    pub fn hierarchy(&self) -> crate::error::Result<RoleHierarchy> {
        let mut hier = RoleHierarchy::new(self.roles);

        for &role in &self.starts {
            hier.mark_start(role)?;
        }
        for &role in &self.sinks {
            hier.mark_sink(role)?;
        }
        for edge in &self.edges {
            hier.add_child(edge.parent, edge.child)?;
        }
        for grant in &self.statements {
            for &stmt in &grant.ids {
                hier.grant_statement(grant.role, stmt)?;
            }
        }
        for grant in &self.sources {
            for &src in &grant.ids {
                hier.grant_source(grant.role, src)?;
            }
        }

        Ok(hier)
    }

    /// Build the compiled role table for this declaration.
    pub fn build(&self) -> crate::error::Result<RoleTable> {
        let hier = self.hierarchy()?;
        ClosureGenerator::generate(&hier, self.default_role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PolicyError;
    use sqlgate_core::traits::AccessControl;

    const POLICY: &str = r#"
        roles = 5
        starts = [4]
        sinks = [3]
        default_role = 0

        [[edges]]
        parent = 0
        child = 1

        [[edges]]
        parent = 1
        child = 2

        [[statements]]
        role = 0
        ids = [1, 2]

        [[sources]]
        role = 1
        ids = [0]
    "#;

    #[test]
    fn test_parse_and_build() {
        let config = PolicyConfig::from_toml(POLICY).unwrap();
        assert_eq!(config.roles, 5);
        assert_eq!(config.edges.len(), 2);

        let table = config.build().unwrap();
        assert_eq!(table.len(), 5);
        assert_eq!(table.default_role(), 0);

        assert!(table.statement_permitted(2, 1));
        assert!(table.source_permitted(2, 0));
        assert!(!table.source_permitted(0, 0));
        assert!(table.transition_permitted(4, 0));
        assert!(table.transition_permitted(0, 3));
        assert!(!table.transition_permitted(0, 4));
    }

    #[test]
    fn test_defaults_are_optional() {
        let config = PolicyConfig::from_toml("roles = 2").unwrap();
        assert!(config.starts.is_empty());
        assert!(config.edges.is_empty());
        assert_eq!(config.default_role, 0);
        assert!(config.build().is_ok());
    }

    #[test]
    fn test_invalid_declaration_is_rejected() {
        // Edge touches a declared sink.
        let config = PolicyConfig::from_toml(
            r#"
            roles = 3
            sinks = [1]

            [[edges]]
            parent = 1
            child = 2
        "#,
        )
        .unwrap();

        assert_eq!(
            config.build(),
            Err(PolicyError::IsolatedRole { role: 1 })
        );
    }

    #[test]
    fn test_bad_default_role() {
        let config = PolicyConfig::from_toml("roles = 2\ndefault_role = 2").unwrap();
        assert_eq!(
            config.build(),
            Err(PolicyError::InvalidDefaultRole { role: 2, len: 2 })
        );
    }

    #[test]
    fn test_malformed_toml() {
        assert!(PolicyConfig::from_toml("roles = ").is_err());
    }
}
