//! Graph-specific error types.

use ft_core::{FtError, MemberId};
use thiserror::Error;

use crate::member::Relation;

/// Graph construction and validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two records share the same member id.
    #[error("Member {id} is registered more than once")]
    DuplicateMember { id: MemberId },

    /// A relationship list names a member that was never registered.
    #[error("Member {member} lists unknown member {target} among its {relation}")]
    UnresolvedReference {
        member: MemberId,
        relation: Relation,
        target: MemberId,
    },

    /// An edge is present on one endpoint but not mirrored on the other.
    #[error("Member {member} lists {other} among its {relation}, but the edge is not mirrored")]
    Asymmetric {
        member: MemberId,
        relation: Relation,
        other: MemberId,
    },

    #[error(transparent)]
    Core(#[from] FtError),
}

pub type GraphResult<T> = Result<T, GraphError>;
