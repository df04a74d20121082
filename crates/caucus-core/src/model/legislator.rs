//! Legislator records as returned by the API, and the cleaned attribute
//! record that becomes a graph node.
//!
//! # Cleaning
//!
//! [`Legislator::clean`] turns a raw record into [`LegislatorAttrs`]:
//!
//! - `youtubeid`, `twitterid` and `cspanid` are dropped. They are missing for
//!   many members and are not used by any analysis.
//! - The raw `id` becomes `govtrackid`, so it cannot collide with the `id`
//!   key that node-link serialization uses for node identity.
//! - `party_affiliation` is parsed from the `[P-SS...]` suffix of `name`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;

/// External-service identifiers removed by [`Legislator::clean`].
pub const DROPPED_FIELDS: [&str; 3] = ["youtubeid", "twitterid", "cspanid"];

static PARTY_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([A-Z])-[A-Z]{2}[^\]]*\]").expect("party suffix pattern is valid")
});

/// A legislator exactly as the API describes them.
///
/// Only `id`, `bioguideid` and `name` are interpreted. Everything else is
/// carried in `extra` so a cached record re-serializes without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legislator {
    pub id: u64,
    pub bioguideid: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Legislator {
    /// Build the cleaned node attributes for this legislator.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NameParse`] if `name` has no party/state suffix.
    pub fn clean(&self) -> Result<LegislatorAttrs, CoreError> {
        let party_affiliation = party_affiliation(&self.name)?;

        let mut extra = self.extra.clone();
        for field in DROPPED_FIELDS {
            extra.remove(field);
        }

        Ok(LegislatorAttrs {
            bioguideid: self.bioguideid.clone(),
            govtrackid: self.id,
            name: self.name.clone(),
            party_affiliation,
            extra,
        })
    }
}

/// Cleaned attributes attached to a graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegislatorAttrs {
    pub bioguideid: String,
    pub govtrackid: u64,
    pub name: String,
    pub party_affiliation: Party,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Party affiliation parsed from a legislator's display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Party {
    Republican,
    Democrat,
    Independent,
    /// Any other single-letter code, kept verbatim.
    Other(String),
}

impl Party {
    /// Map a single-letter party code onto a [`Party`].
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "R" => Self::Republican,
            "D" => Self::Democrat,
            "I" => Self::Independent,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Republican => "republican",
            Self::Democrat => "democrat",
            Self::Independent => "independent",
            Self::Other(code) => code,
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Party {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "republican" => Self::Republican,
            "democrat" => Self::Democrat,
            "independent" => Self::Independent,
            _ => Self::Other(raw),
        }
    }
}

impl From<Party> for String {
    fn from(party: Party) -> Self {
        party.as_str().to_string()
    }
}

/// Parse the party affiliation out of a name like
/// `Rep. Jane Doe [D-CA5]`.
///
/// # Errors
///
/// Returns [`CoreError::NameParse`] when the bracketed suffix is absent.
pub fn party_affiliation(name: &str) -> Result<Party, CoreError> {
    PARTY_SUFFIX
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|code| Party::from_code(code.as_str()))
        .ok_or_else(|| CoreError::NameParse(name.to_string()))
}
