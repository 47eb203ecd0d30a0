//! Structural validation tests for the role hierarchy builder

use sqlgate_policy::{PolicyError, RoleHierarchy};

#[test]
fn test_start_rejected_once_role_has_a_child() {
    // A role that already parents another can never become an entry
    // point; the start set must stay empty after the failed call.
    let mut hier = RoleHierarchy::new(2);
    hier.add_child(0, 1).unwrap();

    assert!(hier.mark_start(0).is_err());
    assert!(hier.starts().is_empty());
}

#[test]
fn test_sink_rejected_once_role_has_a_parent() {
    let mut hier = RoleHierarchy::new(2);
    hier.add_child(0, 1).unwrap();

    assert!(hier.mark_sink(1).is_err());
    assert!(hier.sinks().is_empty());
}

#[test]
fn test_marked_role_never_appears_in_an_edge() {
    let mut hier = RoleHierarchy::new(4);
    hier.mark_start(0).unwrap();
    hier.mark_sink(1).unwrap();

    let before = hier.clone();
    for (parent, child) in [(0, 2), (2, 0), (1, 2), (2, 1), (0, 1)] {
        assert!(
            matches!(
                hier.add_child(parent, child),
                Err(PolicyError::IsolatedRole { .. })
            ),
            "edge {} -> {} must be rejected",
            parent,
            child
        );
    }
    assert_eq!(hier, before);
}

#[test]
fn test_reverse_edge_on_related_roles_fails_without_mutation() {
    let mut hier = RoleHierarchy::new(4);
    hier.add_child(0, 1).unwrap();
    hier.add_child(1, 2).unwrap();
    hier.add_child(2, 3).unwrap();

    let before = hier.clone();
    for descendant in [1, 2, 3] {
        assert!(matches!(
            hier.add_child(descendant, 0),
            Err(PolicyError::CycleDetected { .. })
        ));
    }
    assert_eq!(hier, before, "failed calls must leave the hierarchy unchanged");
}

#[test]
fn test_every_role_reaches_a_root() {
    let mut hier = RoleHierarchy::new(8);
    hier.add_child(0, 1).unwrap();
    hier.add_child(1, 2).unwrap();
    hier.add_child(2, 3).unwrap();
    hier.add_child(0, 4).unwrap();
    hier.add_child(4, 5).unwrap();
    hier.add_child(6, 7).unwrap();

    for role in 0..hier.len() {
        let mut idx = role;
        let mut steps = 0;
        while hier.parent(idx) != Some(idx) {
            idx = hier.parent(idx).unwrap();
            steps += 1;
            assert!(steps <= hier.len(), "parent chain of {} does not terminate", role);
        }
    }
}

#[test]
fn test_grants_are_idempotent() {
    let mut hier = RoleHierarchy::new(2);

    hier.grant_statement(0, 3).unwrap();
    hier.grant_statement(0, 3).unwrap();
    assert_eq!(hier.statements(0).unwrap().len(), 1);

    hier.grant_source(1, 8).unwrap();
    hier.grant_source(1, 8).unwrap();
    assert_eq!(hier.sources(1).unwrap().len(), 1);
}

#[test]
fn test_out_of_bounds_everywhere() {
    let mut hier = RoleHierarchy::new(3);

    assert!(matches!(
        hier.add_child(3, 0),
        Err(PolicyError::RoleOutOfBounds { role: 3, .. })
    ));
    assert!(matches!(
        hier.add_child(0, 5),
        Err(PolicyError::RoleOutOfBounds { role: 5, .. })
    ));
    assert!(hier.grant_statement(3, 0).is_err());
    assert!(hier.grant_source(3, 0).is_err());
    assert!(hier.mark_start(3).is_err());
    assert!(hier.mark_sink(3).is_err());
}
