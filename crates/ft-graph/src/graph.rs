//! The family graph: an arena of members keyed by id.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

use ft_core::{FtError, FtResult, MemberId};
use tracing::Level;

use crate::error::{GraphError, GraphResult};
use crate::member::{Member, Relation};
use crate::observer::{GraphObserver, TracingObserver};
use crate::profile::Profile;
use crate::validate;

/// A tree (or forest) of family members.
///
/// Members live in an ordered map keyed by id, and relationship sets store
/// ids. Every mutation goes through the graph so that both endpoints of an
/// edge are updated before the call returns:
/// - child C in P.children implies P in C.parents
/// - partner edges are symmetric
#[derive(Clone)]
pub struct FamilyGraph {
    members: BTreeMap<MemberId, Member>,
    observer: Arc<dyn GraphObserver>,
}

impl Default for FamilyGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FamilyGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FamilyGraph")
            .field("members", &self.members)
            .finish_non_exhaustive()
    }
}

impl FamilyGraph {
    /// Create an empty graph reporting to `tracing`.
    pub fn new() -> Self {
        Self::with_observer(Arc::new(TracingObserver))
    }

    /// Create an empty graph reporting to a custom observer.
    pub fn with_observer(observer: Arc<dyn GraphObserver>) -> Self {
        Self {
            members: BTreeMap::new(),
            observer,
        }
    }

    pub fn set_observer(&mut self, observer: Arc<dyn GraphObserver>) {
        self.observer = observer;
    }

    /// Create a member from a profile and return its new id.
    pub fn add_member(&mut self, profile: Profile) -> MemberId {
        let member = Member::new(profile);
        let id = member.id();
        self.emit(
            Level::INFO,
            format!("Family member named {} created", member.full_name()),
        );
        self.members.insert(id, member);
        id
    }

    /// Register an already-built member, typically one with a supplied id.
    pub fn insert_member(&mut self, member: Member) -> GraphResult<MemberId> {
        let id = member.id();
        if self.members.contains_key(&id) {
            return Err(GraphError::DuplicateMember { id });
        }
        self.emit(
            Level::INFO,
            format!("Family member named {} created", member.full_name()),
        );
        self.members.insert(id, member);
        Ok(id)
    }

    pub fn get(&self, id: MemberId) -> Option<&Member> {
        self.members.get(&id)
    }

    /// Like `get`, but an unknown id is an error.
    pub fn member(&self, id: MemberId) -> FtResult<&Member> {
        self.require(id, "member")
    }

    pub fn contains(&self, id: MemberId) -> bool {
        self.members.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterate members in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.members.keys().copied()
    }

    /// Members whose full name contains `query`, ignoring case.
    pub fn find_by_name(&self, query: &str) -> Vec<&Member> {
        let needle = query.to_lowercase();
        self.members
            .values()
            .filter(|m| m.full_name().to_lowercase().contains(&needle))
            .collect()
    }

    /// Reciprocally partner two members.
    ///
    /// Adding an existing partner is a logged no-op.
    pub fn add_partner(&mut self, member: MemberId, partner: MemberId) -> FtResult<()> {
        self.require(member, "member")?;
        self.require(partner, "partner")?;
        if member == partner {
            return Err(FtError::InvalidArg {
                what: "a member cannot be their own partner",
            });
        }

        if self.members[&member].partners.contains(&partner) {
            self.emit(
                Level::WARN,
                format!(
                    "{} already a partner for {}",
                    self.name_of(partner),
                    self.name_of(member)
                ),
            );
            return Ok(());
        }

        self.link(member, Relation::Partners, partner);
        self.emit(
            Level::INFO,
            format!(
                "Added {} as a partner to {}",
                self.name_of(partner),
                self.name_of(member)
            ),
        );
        Ok(())
    }

    /// Add `child` under `parent`, optionally with `partner` as the other parent.
    ///
    /// With a partner, the two parents are partnered and the child is added
    /// under the partner as well. If `child` is already a child of `parent`
    /// the call is a logged no-op and the partner is not touched.
    pub fn add_child(
        &mut self,
        parent: MemberId,
        child: MemberId,
        partner: Option<MemberId>,
    ) -> FtResult<()> {
        self.require(parent, "parent")?;
        self.require(child, "child")?;
        if parent == child {
            return Err(FtError::InvalidArg {
                what: "a member cannot be their own child",
            });
        }
        if let Some(partner) = partner {
            self.require(partner, "partner")?;
            if partner == parent {
                return Err(FtError::InvalidArg {
                    what: "partner must differ from the parent",
                });
            }
            if partner == child {
                return Err(FtError::InvalidArg {
                    what: "partner must differ from the child",
                });
            }
        }

        if self.members[&parent].children.contains(&child) {
            self.emit(
                Level::WARN,
                format!(
                    "{} already a child for {}",
                    self.name_of(child),
                    self.name_of(parent)
                ),
            );
            return Ok(());
        }

        self.link(parent, Relation::Children, child);
        self.emit(
            Level::INFO,
            format!(
                "Added {} as child to {}",
                self.name_of(child),
                self.name_of(parent)
            ),
        );

        if let Some(partner) = partner {
            self.add_partner(parent, partner)?;
            // No partner on the nested call, so pairing happens once.
            self.add_child(partner, child, None)?;
        }
        Ok(())
    }

    /// Add `parent` as a parent of `child`; same as `add_child(parent, child, None)`.
    pub fn add_parent(&mut self, child: MemberId, parent: MemberId) -> FtResult<()> {
        self.add_child(parent, child, None)
    }

    /// Add several partners in order, stopping at the first failure.
    pub fn add_partners(&mut self, member: MemberId, partners: &[MemberId]) -> FtResult<()> {
        self.emit(
            Level::DEBUG,
            format!("Bulk assigning partners to {}", self.name_of(member)),
        );
        for &partner in partners {
            self.add_partner(member, partner)?;
        }
        Ok(())
    }

    /// Add several children in order, each with the same optional partner.
    pub fn add_children(
        &mut self,
        parent: MemberId,
        children: &[MemberId],
        partner: Option<MemberId>,
    ) -> FtResult<()> {
        self.emit(
            Level::DEBUG,
            format!("Bulk assigning children to {}", self.name_of(parent)),
        );
        for &child in children {
            self.add_child(parent, child, partner)?;
        }
        Ok(())
    }

    /// Add several parents in order, stopping at the first failure.
    pub fn add_parents(&mut self, child: MemberId, parents: &[MemberId]) -> FtResult<()> {
        self.emit(
            Level::DEBUG,
            format!("Bulk assigning parents to {}", self.name_of(child)),
        );
        for &parent in parents {
            self.add_parent(child, parent)?;
        }
        Ok(())
    }

    /// Everyone reachable through `children` edges, each once, excluding `id`.
    pub fn descendants(&self, id: MemberId) -> FtResult<Vec<&Member>> {
        self.walk(id, Relation::Children)
    }

    /// Everyone reachable through `parents` edges, each once, excluding `id`.
    pub fn ancestors(&self, id: MemberId) -> FtResult<Vec<&Member>> {
        self.walk(id, Relation::Parents)
    }

    /// Check that every edge resolves and is mirrored on its other endpoint.
    pub fn validate(&self) -> GraphResult<()> {
        match validate::validate_reciprocity(self).into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Overwrite one relationship set of `id` without mirroring.
    ///
    /// Only the two-phase builder uses this; it reproduces a document's sets
    /// exactly as written.
    pub(crate) fn replace_relations(
        &mut self,
        id: MemberId,
        relation: Relation,
        targets: BTreeSet<MemberId>,
    ) -> FtResult<()> {
        let member = self
            .members
            .get_mut(&id)
            .ok_or(FtError::UnknownMember { role: "member", id })?;
        *member.relations_mut(relation) = targets;
        Ok(())
    }

    pub(crate) fn emit(&self, level: Level, message: String) {
        self.observer.emit(level, &message);
    }

    /// Iterative depth-first walk with a visited set; terminates on cycles.
    fn walk(&self, start: MemberId, relation: Relation) -> FtResult<Vec<&Member>> {
        let origin = self.require(start, "member")?;

        let mut visited: HashSet<MemberId> = HashSet::new();
        visited.insert(start);
        let mut found = Vec::new();
        let mut stack: Vec<MemberId> = origin.relations(relation).iter().copied().collect();

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            if let Some(member) = self.members.get(&current) {
                found.push(member);
                stack.extend(
                    member
                        .relations(relation)
                        .iter()
                        .filter(|next| !visited.contains(*next))
                        .copied(),
                );
            }
        }
        Ok(found)
    }

    /// Insert `target` into `owner`'s set and `owner` into the mirrored set of `target`.
    fn link(&mut self, owner: MemberId, relation: Relation, target: MemberId) {
        if let Some(m) = self.members.get_mut(&owner) {
            m.relations_mut(relation).insert(target);
        }
        if let Some(m) = self.members.get_mut(&target) {
            m.relations_mut(relation.mirror()).insert(owner);
        }
    }

    fn require(&self, id: MemberId, role: &'static str) -> FtResult<&Member> {
        self.members
            .get(&id)
            .ok_or(FtError::UnknownMember { role, id })
    }

    fn name_of(&self, id: MemberId) -> String {
        self.members
            .get(&id)
            .map_or_else(|| id.to_string(), Member::full_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<(Level, String)>>);

    impl GraphObserver for Recorder {
        fn emit(&self, level: Level, message: &str) {
            self.0.lock().unwrap().push((level, message.to_string()));
        }
    }

    impl Recorder {
        fn count(&self, level: Level) -> usize {
            self.0
                .lock()
                .unwrap()
                .iter()
                .filter(|(l, _)| *l == level)
                .count()
        }
    }

    fn person(graph: &mut FamilyGraph, first: &str, last: &str) -> MemberId {
        graph.add_member(Profile::new(first, last).unwrap())
    }

    #[test]
    fn add_partner_is_symmetric() {
        let mut g = FamilyGraph::new();
        let john = person(&mut g, "John", "Doe");
        let jane = person(&mut g, "Jane", "Doe");

        g.add_partner(john, jane).unwrap();

        assert!(g.get(john).unwrap().partners().contains(&jane));
        assert!(g.get(jane).unwrap().partners().contains(&john));
    }

    #[test]
    fn duplicate_partner_warns_once() {
        let recorder = Arc::new(Recorder::default());
        let mut g = FamilyGraph::with_observer(recorder.clone());
        let john = person(&mut g, "John", "Doe");
        let jane = person(&mut g, "Jane", "Doe");

        g.add_partner(john, jane).unwrap();
        g.add_partner(jane, john).unwrap();

        assert_eq!(g.get(john).unwrap().partners().len(), 1);
        assert_eq!(recorder.count(Level::WARN), 1);
    }

    #[test]
    fn add_child_mirrors_parent() {
        let mut g = FamilyGraph::new();
        let john = person(&mut g, "John", "Doe");
        let junior = person(&mut g, "Junior", "Doe");

        g.add_child(john, junior, None).unwrap();

        assert!(g.get(john).unwrap().children().contains(&junior));
        assert!(g.get(junior).unwrap().parents().contains(&john));
    }

    #[test]
    fn add_child_with_partner_links_both_parents() {
        let mut g = FamilyGraph::new();
        let petra = person(&mut g, "Petra", "Williams");
        let junie = person(&mut g, "Jerry", "Aska");
        let jerry = person(&mut g, "Jerry", "Aska");

        g.add_child(petra, jerry, Some(junie)).unwrap();

        let jerry_m = g.get(jerry).unwrap();
        assert_eq!(
            jerry_m.parents().iter().copied().collect::<HashSet<_>>(),
            HashSet::from([petra, junie])
        );
        assert_eq!(g.get(petra).unwrap().partners().len(), 1);
        assert!(g.get(petra).unwrap().partners().contains(&junie));
        assert!(g.get(junie).unwrap().children().contains(&jerry));
        assert!(g.validate().is_ok());
    }

    #[test]
    fn existing_child_skips_partner_pairing() {
        let recorder = Arc::new(Recorder::default());
        let mut g = FamilyGraph::with_observer(recorder.clone());
        let petra = person(&mut g, "Petra", "Williams");
        let junie = person(&mut g, "Junie", "Aska");
        let jerry = person(&mut g, "Jerry", "Aska");

        g.add_child(petra, jerry, None).unwrap();
        g.add_child(petra, jerry, Some(junie)).unwrap();

        assert!(g.get(petra).unwrap().partners().is_empty());
        assert_eq!(recorder.count(Level::WARN), 1);
    }

    #[test]
    fn add_parent_matches_add_child() {
        let mut a = FamilyGraph::new();
        let p = Member::new(Profile::new("Clarence", "Williams").unwrap());
        let c = Member::new(Profile::new("Petra", "Williams").unwrap());
        let (pid, cid) = (p.id(), c.id());
        a.insert_member(p).unwrap();
        a.insert_member(c).unwrap();
        let mut b = a.clone();

        a.add_parent(cid, pid).unwrap();
        b.add_child(pid, cid, None).unwrap();

        for id in [pid, cid] {
            let (ma, mb) = (a.get(id).unwrap(), b.get(id).unwrap());
            for relation in Relation::ALL {
                assert_eq!(ma.relations(relation), mb.relations(relation));
            }
        }
    }

    #[test]
    fn self_edges_rejected() {
        let mut g = FamilyGraph::new();
        let john = person(&mut g, "John", "Doe");
        assert!(matches!(
            g.add_partner(john, john),
            Err(FtError::InvalidArg { .. })
        ));
        assert!(matches!(
            g.add_child(john, john, None),
            Err(FtError::InvalidArg { .. })
        ));
        assert!(g.get(john).unwrap().partners().is_empty());
        assert!(g.get(john).unwrap().children().is_empty());
    }

    #[test]
    fn unknown_member_rejected_without_effect() {
        let mut g = FamilyGraph::new();
        let john = person(&mut g, "John", "Doe");
        let junior = person(&mut g, "Junior", "Doe");
        let stranger = MemberId::new_v4();

        let err = g.add_child(john, junior, Some(stranger)).unwrap_err();
        assert_eq!(
            err,
            FtError::UnknownMember {
                role: "partner",
                id: stranger
            }
        );
        assert!(g.get(john).unwrap().children().is_empty());
        assert!(g.add_partner(john, stranger).is_err());
    }

    #[test]
    fn bulk_children_stop_at_first_failure() {
        let mut g = FamilyGraph::new();
        let bob = person(&mut g, "Bob", "Barker");
        let brittany = person(&mut g, "Brittany", "Barker");
        let bella = person(&mut g, "Bella", "Barker");
        let ghost = MemberId::new_v4();

        assert!(g.add_children(bob, &[brittany, ghost, bella], None).is_err());
        assert!(g.get(bob).unwrap().children().contains(&brittany));
        assert!(!g.get(bob).unwrap().children().contains(&bella));
    }

    #[test]
    fn bulk_children_with_partner() {
        let mut g = FamilyGraph::new();
        let bob = person(&mut g, "Bob", "Barker");
        let alice = person(&mut g, "Alice", "Barker");
        let brittany = person(&mut g, "Brittany", "Barker");
        let bella = person(&mut g, "Bella", "Barker");

        g.add_children(bob, &[brittany, bella], Some(alice)).unwrap();

        for kid in [brittany, bella] {
            let parents = g.get(kid).unwrap().parents();
            assert!(parents.contains(&bob) && parents.contains(&alice));
        }
        assert_eq!(g.get(alice).unwrap().partners().len(), 1);
    }

    #[test]
    fn bulk_parents_and_partners() {
        let mut g = FamilyGraph::new();
        let kid = person(&mut g, "Kid", "Doe");
        let mom = person(&mut g, "Mom", "Doe");
        let dad = person(&mut g, "Dad", "Doe");

        g.add_parents(kid, &[mom, dad]).unwrap();
        g.add_partners(mom, &[dad]).unwrap();

        assert_eq!(g.get(kid).unwrap().parents().len(), 2);
        assert!(g.get(dad).unwrap().partners().contains(&mom));
    }

    #[test]
    fn walks_exclude_start_and_duplicates() {
        let mut g = FamilyGraph::new();
        let garp = person(&mut g, "Garp", "Monkey");
        let dragon = person(&mut g, "Dragon", "Monkey");
        let luffy = person(&mut g, "Luffy", "Monkey");
        let other = person(&mut g, "Other", "Monkey");

        g.add_child(garp, dragon, None).unwrap();
        g.add_child(dragon, luffy, Some(other)).unwrap();
        // Diamond: garp also parent of other.
        g.add_child(garp, other, None).unwrap();

        let desc: Vec<MemberId> = g
            .descendants(garp)
            .unwrap()
            .iter()
            .map(|m| m.id())
            .collect();
        assert_eq!(desc.len(), 3);
        assert!(!desc.contains(&garp));
        assert_eq!(desc.iter().collect::<HashSet<_>>().len(), 3);

        let anc: HashSet<MemberId> = g
            .ancestors(luffy)
            .unwrap()
            .iter()
            .map(|m| m.id())
            .collect();
        assert_eq!(anc, HashSet::from([dragon, other, garp]));
    }

    #[test]
    fn walks_terminate_on_cycles() {
        let mut g = FamilyGraph::new();
        let a = person(&mut g, "A", "Loop");
        let b = person(&mut g, "B", "Loop");
        let c = person(&mut g, "C", "Loop");
        g.add_child(a, b, None).unwrap();
        g.add_child(b, c, None).unwrap();
        g.add_child(c, a, None).unwrap();

        let desc = g.descendants(a).unwrap();
        assert_eq!(desc.len(), 2);
        let anc = g.ancestors(a).unwrap();
        assert_eq!(anc.len(), 2);
    }

    #[test]
    fn walk_on_unknown_member_errors() {
        let g = FamilyGraph::new();
        assert!(g.descendants(MemberId::new_v4()).is_err());
    }

    #[test]
    fn find_by_name_ignores_case() {
        let mut g = FamilyGraph::new();
        let petra = person(&mut g, "Petra", "Williams");
        person(&mut g, "Clarence", "Williams");

        let hits = g.find_by_name("petra");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id(), petra);
        assert_eq!(g.find_by_name("williams").len(), 2);
    }

    #[test]
    fn insert_member_rejects_duplicates() {
        let mut g = FamilyGraph::new();
        let m = Member::new(Profile::new("John", "Doe").unwrap());
        let dup = m.clone();
        g.insert_member(m).unwrap();
        assert!(matches!(
            g.insert_member(dup),
            Err(GraphError::DuplicateMember { .. })
        ));
    }

    #[test]
    fn creation_is_reported() {
        let recorder = Arc::new(Recorder::default());
        let mut g = FamilyGraph::with_observer(recorder.clone());
        person(&mut g, "John", "Doe");
        assert_eq!(recorder.count(Level::INFO), 1);
    }
}
