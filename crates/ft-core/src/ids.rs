use core::fmt;
use core::str::FromStr;

use uuid::Uuid;

/// Stable identifier of a family member.
///
/// Identity of a member is defined by this value alone: two members carrying
/// the same id are the same person even when their profiles differ.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MemberId(Uuid);

impl MemberId {
    /// Generate a fresh random (v4) id.
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for MemberId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for MemberId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Debug for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemberId({})", self.0)
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Hyphenated lowercase form, same as the document format.
        write!(f, "{}", self.0.hyphenated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_are_distinct() {
        let a = MemberId::new_v4();
        let b = MemberId::new_v4();
        assert_ne!(a, b);
    }

    #[test]
    fn parse_display_round_trip() {
        let text = "6f1c2a9e-3b1d-4c55-9a51-0f7e3b2d8c10";
        let id: MemberId = text.parse().unwrap();
        assert_eq!(id.to_string(), text);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("not-a-uuid".parse::<MemberId>().is_err());
    }
}
