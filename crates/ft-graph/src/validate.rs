//! Reciprocity checks over a built graph.

use crate::error::GraphError;
use crate::graph::FamilyGraph;
use crate::member::Relation;

/// Collect every edge that is dangling or not mirrored on its other endpoint.
///
/// A graph built only through `FamilyGraph` mutations always passes; graphs
/// rebuilt from hand-edited documents may not.
pub fn validate_reciprocity(graph: &FamilyGraph) -> Vec<GraphError> {
    let mut problems = Vec::new();

    for member in graph.iter() {
        for relation in Relation::ALL {
            for &target in member.relations(relation) {
                match graph.get(target) {
                    None => problems.push(GraphError::UnresolvedReference {
                        member: member.id(),
                        relation,
                        target,
                    }),
                    Some(other) if !other.relations(relation.mirror()).contains(&member.id()) => {
                        problems.push(GraphError::Asymmetric {
                            member: member.id(),
                            relation,
                            other: target,
                        });
                    }
                    Some(_) => {}
                }
            }
        }
    }

    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GraphBuilder;
    use crate::member::Member;
    use crate::profile::Profile;

    #[test]
    fn empty_graph_is_valid() {
        assert!(validate_reciprocity(&FamilyGraph::new()).is_empty());
    }

    #[test]
    fn one_sided_child_edge_reported() {
        let parent = Member::new(Profile::new("John", "Doe").unwrap());
        let child = Member::new(Profile::new("Junior", "Doe").unwrap());
        let (pid, cid) = (parent.id(), child.id());

        let mut builder = GraphBuilder::new();
        builder.register(parent).unwrap();
        builder.register(child).unwrap();
        builder.link(pid, Relation::Children, [cid]).unwrap();
        let graph = builder.build();

        let problems = validate_reciprocity(&graph);
        assert_eq!(
            problems,
            vec![GraphError::Asymmetric {
                member: pid,
                relation: Relation::Children,
                other: cid,
            }]
        );
        assert!(graph.validate().is_err());
    }
}
