//! ft-core: shared foundation for the family tree crates.
//!
//! Contains:
//! - ids (UUID-backed member identifiers)
//! - error (shared error types)

pub mod error;
pub mod ids;

// Re-exports: nice ergonomics for downstream crates
pub use error::{FtError, FtResult};
pub use ids::MemberId;
