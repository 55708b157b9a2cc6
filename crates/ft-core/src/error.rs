use thiserror::Error;

use crate::ids::MemberId;

pub type FtResult<T> = Result<T, FtError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FtError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Unknown member: {role} {id} is not part of this family graph")]
    UnknownMember { role: &'static str, id: MemberId },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}
