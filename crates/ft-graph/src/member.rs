//! Graph nodes: one member per person.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use ft_core::MemberId;

use crate::profile::Profile;

/// Which relationship set of a member an edge lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Parents,
    Children,
    Partners,
}

impl Relation {
    pub const ALL: [Relation; 3] = [Relation::Parents, Relation::Children, Relation::Partners];

    /// The set on the other endpoint that must mirror an edge in this set.
    pub fn mirror(self) -> Relation {
        match self {
            Relation::Parents => Relation::Children,
            Relation::Children => Relation::Parents,
            Relation::Partners => Relation::Partners,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Relation::Parents => "parents",
            Relation::Children => "children",
            Relation::Partners => "partners",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A person in the family graph.
///
/// Relationship sets hold ids, not references; the owning `FamilyGraph`
/// resolves them and keeps both endpoints of every edge in step.
/// Equality and hashing look at the id only.
#[derive(Debug, Clone)]
pub struct Member {
    id: MemberId,
    profile: Profile,
    pub(crate) parents: BTreeSet<MemberId>,
    pub(crate) children: BTreeSet<MemberId>,
    pub(crate) partners: BTreeSet<MemberId>,
}

impl Member {
    /// Create a member with a freshly generated id.
    pub fn new(profile: Profile) -> Self {
        Self::with_id(MemberId::new_v4(), profile)
    }

    /// Create a member with a supplied id and no relationships.
    pub fn with_id(id: MemberId, profile: Profile) -> Self {
        Self {
            id,
            profile,
            parents: BTreeSet::new(),
            children: BTreeSet::new(),
            partners: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> MemberId {
        self.id
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn full_name(&self) -> String {
        self.profile.full_name()
    }

    pub fn parents(&self) -> &BTreeSet<MemberId> {
        &self.parents
    }

    pub fn children(&self) -> &BTreeSet<MemberId> {
        &self.children
    }

    pub fn partners(&self) -> &BTreeSet<MemberId> {
        &self.partners
    }

    pub fn relations(&self, relation: Relation) -> &BTreeSet<MemberId> {
        match relation {
            Relation::Parents => &self.parents,
            Relation::Children => &self.children,
            Relation::Partners => &self.partners,
        }
    }

    pub(crate) fn relations_mut(&mut self, relation: Relation) -> &mut BTreeSet<MemberId> {
        match relation {
            Relation::Parents => &mut self.parents,
            Relation::Children => &mut self.children,
            Relation::Partners => &mut self.partners,
        }
    }
}

impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Member {}

impl Hash for Member {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.profile.full_name())
    }
}
