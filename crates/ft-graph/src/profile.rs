//! Demographic profile attached to each member.

use std::fmt;

use chrono::Datelike;
use ft_core::{FtError, FtResult};

/// Birth year assumed when a profile is constructed without one.
pub const DEFAULT_BIRTH_YEAR: i32 = 1900;

/// Personal details of one individual.
///
/// First and last name are always present and non-empty; every other field is
/// optional. `full_name` and `details` are derived on each call, so the age of
/// a living person follows the clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    first_name: String,
    middle_name: Option<String>,
    last_name: String,
    suffix: Option<String>,
    gender: Option<String>,
    birth_year: Option<i32>,
    death_year: Option<i32>,
}

impl Profile {
    /// Create a profile with the required names and the default birth year.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> FtResult<Self> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        if first_name.trim().is_empty() {
            return Err(FtError::InvalidArg {
                what: "first name must not be empty",
            });
        }
        if last_name.trim().is_empty() {
            return Err(FtError::InvalidArg {
                what: "last name must not be empty",
            });
        }
        Ok(Self {
            first_name,
            middle_name: None,
            last_name,
            suffix: None,
            gender: None,
            birth_year: Some(DEFAULT_BIRTH_YEAR),
            death_year: None,
        })
    }

    pub fn with_middle_name(mut self, middle_name: impl Into<String>) -> Self {
        self.middle_name = Some(middle_name.into());
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_birth_year(mut self, year: i32) -> Self {
        self.birth_year = Some(year);
        self
    }

    /// Clear the birth year (decoded documents may carry `null`).
    pub fn without_birth_year(mut self) -> Self {
        self.birth_year = None;
        self
    }

    pub fn with_death_year(mut self, year: i32) -> Self {
        self.death_year = Some(year);
        self
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn middle_name(&self) -> Option<&str> {
        self.middle_name.as_deref()
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    pub fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }

    pub fn birth_year(&self) -> Option<i32> {
        self.birth_year
    }

    pub fn death_year(&self) -> Option<i32> {
        self.death_year
    }

    pub fn is_living(&self) -> bool {
        self.death_year.is_none()
    }

    /// Space-joined first, middle, last and suffix, skipping absent parts.
    pub fn full_name(&self) -> String {
        [
            Some(self.first_name.as_str()),
            self.middle_name.as_deref(),
            Some(self.last_name.as_str()),
            self.suffix.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Age at death, or age in `current_year` for the living.
    ///
    /// `None` when the birth year is unknown or the age does not fit an `i32`.
    pub fn age_at(&self, current_year: i32) -> Option<i32> {
        let birth = self.birth_year?;
        self.death_year.unwrap_or(current_year).checked_sub(birth)
    }

    /// Lifespan range such as `(1980 - present)` or `(1921 - 2003)`.
    pub fn lifespan(&self) -> String {
        let birth = self
            .birth_year
            .map_or_else(|| "?".to_string(), |y| y.to_string());
        let death = self
            .death_year
            .map_or_else(|| "present".to_string(), |y| y.to_string());
        format!("({birth} - {death})")
    }

    /// Detail line using an explicit current year.
    pub fn details_at(&self, current_year: i32) -> String {
        let mut parts = vec![self.full_name()];
        if let Some(gender) = self.gender.as_deref().filter(|g| !g.is_empty()) {
            parts.push(gender.to_string());
        }
        if let Some(age) = self.age_at(current_year) {
            parts.push(age.to_string());
        }
        parts.push(self.lifespan());
        parts.join(" ")
    }

    /// Detail line: full name, gender, age and lifespan, aged against today.
    pub fn details(&self) -> String {
        self.details_at(chrono::Local::now().year())
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}
