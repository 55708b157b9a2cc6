//! Document schema: one flat record per member.

use ft_core::{FtResult, MemberId};
use ft_graph::{GraphBuilder, Member, Profile, Relation};
use serde::{Deserialize, Serialize};

use crate::CodecResult;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileRecord {
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub birth_year: Option<i32>,
    #[serde(default)]
    pub death_year: Option<i32>,
}

impl ProfileRecord {
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            first_name: profile.first_name().to_string(),
            middle_name: profile.middle_name().map(str::to_string),
            last_name: profile.last_name().to_string(),
            suffix: profile.suffix().map(str::to_string),
            gender: profile.gender().map(str::to_string),
            birth_year: profile.birth_year(),
            death_year: profile.death_year(),
        }
    }

    /// Build the profile, rejecting empty first or last names.
    pub fn to_profile(&self) -> FtResult<Profile> {
        let mut profile = Profile::new(self.first_name.clone(), self.last_name.clone())?;
        if let Some(middle) = &self.middle_name {
            profile = profile.with_middle_name(middle.clone());
        }
        if let Some(suffix) = &self.suffix {
            profile = profile.with_suffix(suffix.clone());
        }
        if let Some(gender) = &self.gender {
            profile = profile.with_gender(gender.clone());
        }
        profile = match self.birth_year {
            Some(year) => profile.with_birth_year(year),
            None => profile.without_birth_year(),
        };
        if let Some(year) = self.death_year {
            profile = profile.with_death_year(year);
        }
        Ok(profile)
    }
}

/// A member as stored in the document.
///
/// Relationships are lists of ids rather than nested records, so cyclic
/// references serialize without recursion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberRecord {
    pub id: MemberId,
    pub profile: ProfileRecord,
    #[serde(default)]
    pub parents: Vec<MemberId>,
    #[serde(default)]
    pub children: Vec<MemberId>,
    #[serde(default)]
    pub partners: Vec<MemberId>,
}

impl MemberRecord {
    pub fn from_member(member: &Member) -> Self {
        Self {
            id: member.id(),
            profile: ProfileRecord::from_profile(member.profile()),
            parents: member.parents().iter().copied().collect(),
            children: member.children().iter().copied().collect(),
            partners: member.partners().iter().copied().collect(),
        }
    }

    pub fn ids(&self, relation: Relation) -> &[MemberId] {
        match relation {
            Relation::Parents => &self.parents,
            Relation::Children => &self.children,
            Relation::Partners => &self.partners,
        }
    }

    /// First pass: create the member and register it with empty relationships.
    ///
    /// The ids this record points at may not be registered yet, so nothing is
    /// linked here.
    pub fn register<'b>(&self, builder: &'b mut GraphBuilder) -> CodecResult<&'b Member> {
        let member = Member::with_id(self.id, self.profile.to_profile()?);
        Ok(builder.register(member)?)
    }

    /// Second pass: resolve and assign all three relationship sets.
    pub fn link(&self, builder: &mut GraphBuilder) -> CodecResult<()> {
        for relation in Relation::ALL {
            builder.link(self.id, relation, self.ids(relation).iter().copied())?;
        }
        Ok(())
    }
}
