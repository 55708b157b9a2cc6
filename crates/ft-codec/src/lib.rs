//! ft-codec: JSON document format for family graphs.
//!
//! A document is a flat array of `MemberRecord`s that reference each other
//! by id. Decoding is always two-pass (register everything, then link) so
//! records may appear in any order.

pub mod schema;

use std::path::Path;

use ft_core::FtError;
use ft_graph::{FamilyGraph, GraphBuilder, GraphError};
use tracing::debug;

pub use schema::{MemberRecord, ProfileRecord};

pub type CodecResult<T> = Result<T, CodecError>;

#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Invalid member data: {0}")]
    Member(#[from] FtError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Flatten a graph into records, in id order.
pub fn to_records(graph: &FamilyGraph) -> Vec<MemberRecord> {
    graph.iter().map(MemberRecord::from_member).collect()
}

/// Rebuild a graph from records using a caller-supplied builder.
///
/// Pass one registers every record; pass two resolves and assigns the
/// relationship lists. A reference to an id absent from `records` fails with
/// `GraphError::UnresolvedReference`.
pub fn from_records_with(
    records: &[MemberRecord],
    mut builder: GraphBuilder,
) -> CodecResult<FamilyGraph> {
    for record in records {
        record.register(&mut builder)?;
    }
    for record in records {
        record.link(&mut builder)?;
    }
    debug!(members = records.len(), "rebuilt family graph from records");
    Ok(builder.build())
}

pub fn from_records(records: &[MemberRecord]) -> CodecResult<FamilyGraph> {
    from_records_with(records, GraphBuilder::new())
}

/// Serialize a graph to a pretty-printed JSON array.
pub fn serialize(graph: &FamilyGraph) -> CodecResult<String> {
    Ok(serde_json::to_string_pretty(&to_records(graph))?)
}

/// Reconstruct a graph from JSON produced by `serialize`.
pub fn deserialize(json: &str) -> CodecResult<FamilyGraph> {
    let records: Vec<MemberRecord> = serde_json::from_str(json)?;
    from_records(&records)
}

pub fn load_json(path: &Path) -> CodecResult<FamilyGraph> {
    let content = std::fs::read_to_string(path)?;
    deserialize(&content)
}

pub fn save_json(path: &Path, graph: &FamilyGraph) -> CodecResult<()> {
    let content = serialize(graph)?;
    std::fs::write(path, content)?;
    Ok(())
}
