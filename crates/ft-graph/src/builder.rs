//! Two-phase graph builder.
//!
//! Records that reference each other by id can arrive in any order, so a
//! graph is rebuilt in two passes:
//! 1. `register` every member, building the complete id index with empty
//!    relationship sets.
//! 2. `link` each member's relationship sets against that index.
//!
//! Linking before every member is registered would reject forward references,
//! so callers must finish phase one first.

use std::collections::BTreeSet;
use std::sync::Arc;

use ft_core::{FtError, MemberId};
use tracing::Level;

use crate::error::{GraphError, GraphResult};
use crate::graph::FamilyGraph;
use crate::member::{Member, Relation};
use crate::observer::GraphObserver;
use crate::validate;

/// Builder for reconstructing a graph from flat, id-referencing records.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: FamilyGraph,
}

impl GraphBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder whose graph reports to `observer`.
    pub fn with_observer(observer: Arc<dyn GraphObserver>) -> Self {
        Self {
            graph: FamilyGraph::with_observer(observer),
        }
    }

    /// Phase one: add a member with empty relationship sets.
    ///
    /// Fails if a member with the same id was already registered.
    pub fn register(&mut self, member: Member) -> GraphResult<&Member> {
        let id = self.graph.insert_member(member)?;
        self.graph
            .get(id)
            .ok_or(GraphError::Core(FtError::UnknownMember { role: "member", id }))
    }

    pub fn contains(&self, id: MemberId) -> bool {
        self.graph.contains(id)
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Phase two: replace one relationship set of `member` with `targets`.
    ///
    /// Every target must have been registered; the first one that was not
    /// fails with `GraphError::UnresolvedReference` and leaves the set as it was.
    pub fn link(
        &mut self,
        member: MemberId,
        relation: Relation,
        targets: impl IntoIterator<Item = MemberId>,
    ) -> GraphResult<()> {
        if !self.graph.contains(member) {
            return Err(FtError::UnknownMember {
                role: "member",
                id: member,
            }
            .into());
        }

        let mut resolved = BTreeSet::new();
        for target in targets {
            if !self.graph.contains(target) {
                return Err(GraphError::UnresolvedReference {
                    member,
                    relation,
                    target,
                });
            }
            resolved.insert(target);
        }

        self.graph.replace_relations(member, relation, resolved)?;
        Ok(())
    }

    /// Finish building.
    ///
    /// Sets are kept exactly as linked; edges that are not mirrored on both
    /// endpoints are reported as warnings rather than repaired.
    pub fn build(self) -> FamilyGraph {
        for problem in validate::validate_reciprocity(&self.graph) {
            self.graph.emit(Level::WARN, problem.to_string());
        }
        self.graph
            .emit(Level::DEBUG, format!("Linked {} family members", self.graph.len()));
        self.graph
    }
}
