use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::legislator::Legislator;

/// One bill from the catalog: its sponsor and ordered cosponsors.
///
/// Fields the analysis does not read (title, status, dates, ...) stay in
/// `extra` so the cache file holds the full record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub sponsor: Legislator,
    #[serde(default)]
    pub cosponsors: Vec<Legislator>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Bill {
    /// Number of sponsor/cosponsor pairings this bill contributes, before
    /// self-pairs are discarded.
    #[must_use]
    pub fn pairing_count(&self) -> usize {
        self.cosponsors.len()
    }
}
