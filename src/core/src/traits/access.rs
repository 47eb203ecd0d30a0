//! Access-control trait consumed by the request dispatcher
//!
//! The dispatcher resolves the caller's current role, then asks these
//! three questions before forwarding anything to the SQL engine. All
//! answers must be computable without locking or allocation so the
//! checks can sit on the per-request hot path.

use crate::types::{RoleId, SourceId, StatementId};

/// Compiled access policy queried on every request.
///
/// Implementations answer deny (`false`) for any out-of-range role
/// index rather than panicking; a misbehaving caller must not be able
/// to crash the enforcement layer.
pub trait AccessControl {
    /// May `role` execute the prepared statement `stmt`?
    fn statement_permitted(&self, role: RoleId, stmt: StatementId) -> bool;

    /// May `role` open the data source `src`?
    fn source_permitted(&self, role: RoleId, src: SourceId) -> bool;

    /// May a session currently in `from` switch to `to`?
    fn transition_permitted(&self, from: RoleId, to: RoleId) -> bool;

    /// Role a fresh session starts in.
    fn default_role(&self) -> RoleId;
}
