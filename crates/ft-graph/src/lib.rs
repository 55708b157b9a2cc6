//! ft-graph: relationship graph layer for the family tree.
//!
//! Provides:
//! - Demographic profiles with derived display fields
//! - Members (graph nodes) and the `FamilyGraph` arena that owns them
//! - Reciprocal parent/child and partner edge maintenance
//! - Cycle-safe ancestor/descendant walks
//! - Two-phase `GraphBuilder` for reconstructing graphs from flat records
//!
//! # Example
//!
//! ```
//! use ft_graph::{FamilyGraph, Profile};
//!
//! let mut graph = FamilyGraph::new();
//! let petra = graph.add_member(Profile::new("Petra", "Williams").unwrap());
//! let junie = graph.add_member(Profile::new("Jerry", "Aska").unwrap().with_suffix("Sr"));
//! let jerry = graph.add_member(Profile::new("Jerry", "Aska").unwrap().with_suffix("Jr"));
//!
//! graph.add_child(petra, jerry, Some(junie)).unwrap();
//!
//! assert!(graph.get(jerry).unwrap().parents().contains(&junie));
//! assert!(graph.get(petra).unwrap().partners().contains(&junie));
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub mod member;
pub mod observer;
pub mod profile;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::GraphBuilder;
pub use error::GraphError;
pub use graph::FamilyGraph;
pub use member::{Member, Relation};
pub use observer::{GraphObserver, TracingObserver};
pub use profile::{DEFAULT_BIRTH_YEAR, Profile};
pub use validate::validate_reciprocity;
