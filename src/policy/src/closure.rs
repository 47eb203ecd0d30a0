//! Closure generation: compiling a hierarchy into a role table
//!
//! Every role is one of three kinds. Sinks get no outbound transitions
//! at all. Starts may enter any role that is neither a start nor a
//! sink, plus every sink. Ordinary roles may enter their proper
//! descendants plus every sink. Privilege only narrows or terminates;
//! there is no path back toward an ancestor or into a start.
//!
//! Construction is two-pass: the exact size of every transition set is
//! computed first, storage is allocated once, then population indexes
//! into that pre-sized storage. The population step must never grow a
//! set past its computed size.

use crate::error::{PolicyError, Result};
use crate::hierarchy::{insert_unique, RoleHierarchy};
use crate::table::{RoleEntry, RoleTable};
use sqlgate_core::types::RoleId;
use tracing::{debug, info};

/// Compiles a finalized [`RoleHierarchy`] into an immutable
/// [`RoleTable`].
///
/// Generation is all-or-nothing: the table is accumulated locally and
/// only returned on success, so no partially-populated state is ever
/// observable. The hierarchy is read-only input and is normally dropped
/// afterwards.
pub struct ClosureGenerator;

impl ClosureGenerator {
    /// Generate the role table for `hier` with `default_role` as the
    /// role every fresh session begins in.
    ///
    /// Fails before any computation when `default_role` is out of range
    /// (an empty hierarchy only accepts `default_role == 0`).
    pub fn generate(hier: &RoleHierarchy, default_role: RoleId) -> Result<RoleTable> {
        let len = hier.len();

        if (len > 0 && default_role >= len) || (len == 0 && default_role != 0) {
            return Err(PolicyError::InvalidDefaultRole {
                role: default_role,
                len,
            });
        }

        // First pass: count each role's proper descendants by letting
        // every role register itself with each of its strict ancestors.
        let mut sizes = vec![0usize; len];
        for role in 0..len {
            let mut idx = role;
            while hier.roles[idx].parent != idx {
                sizes[hier.roles[idx].parent] += 1;
                idx = hier.roles[idx].parent;
            }
        }

        // Starts and sinks are isolated, so nothing can have registered
        // with them. A start reaches every role that is neither a start
        // nor a sink; every non-sink also reaches all sinks.
        let reachable_from_start = len - hier.starts.len() - hier.sinks.len();
        for role in 0..len {
            if hier.is_sink(role) {
                debug_assert_eq!(sizes[role], 0);
                continue;
            }
            if hier.is_start(role) {
                debug_assert_eq!(sizes[role], 0);
                sizes[role] = reachable_from_start;
            }
            sizes[role] += hier.sinks.len();
        }

        let mut entries: Vec<RoleEntry> = sizes
            .iter()
            .map(|&size| RoleEntry::with_transition_capacity(size))
            .collect();

        // Second pass: populate the pre-sized sets.
        //
        // Each role becomes a transition target of all its strict
        // ancestors.
        for role in 0..len {
            let mut idx = role;
            while hier.roles[idx].parent != idx {
                let pidx = hier.roles[idx].parent;
                entries[pidx].transitions.push(role);
                idx = pidx;
            }
        }

        // Every non-sink may give up into any sink.
        for role in 0..len {
            if hier.is_sink(role) {
                continue;
            }
            for &sink in &hier.sinks {
                entries[role].transitions.push(sink);
            }
        }

        // Starts fan out into every ordinary role (sinks are already
        // there).
        for &start in &hier.starts {
            for role in 0..len {
                if hier.is_start(role) || hier.is_sink(role) {
                    continue;
                }
                entries[start].transitions.push(role);
            }
        }

        for (role, entry) in entries.iter().enumerate() {
            debug_assert_eq!(entry.transitions.len(), sizes[role]);
        }

        // Permission inheritance: union the direct grants of the full
        // ancestor chain, self included, into each role.
        for role in 0..len {
            let mut idx = role;
            loop {
                for &stmt in &hier.roles[idx].statements {
                    insert_unique(&mut entries[role].statements, stmt);
                }
                for &src in &hier.roles[idx].sources {
                    insert_unique(&mut entries[role].sources, src);
                }
                if hier.roles[idx].parent == idx {
                    break;
                }
                idx = hier.roles[idx].parent;
            }
            debug!(
                "role {}: {} transitions, {} statements, {} sources",
                role,
                entries[role].transitions.len(),
                entries[role].statements.len(),
                entries[role].sources.len()
            );
        }

        info!(
            "compiled role table: {} roles ({} starts, {} sinks), default role {}",
            len,
            hier.starts.len(),
            hier.sinks.len(),
            default_role
        );

        Ok(RoleTable::new(entries, default_role))
    }
}
