pub mod profile;

pub use profile::Profile;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{self, Display};

/// Opaque identifier of a candidate (a divisible good).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl CandidateId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CandidateId {
    fn from(id: &str) -> Self {
        CandidateId(id.to_string())
    }
}

impl From<String> for CandidateId {
    fn from(id: String) -> Self {
        CandidateId(id)
    }
}

impl From<&String> for CandidateId {
    fn from(id: &String) -> Self {
        CandidateId(id.clone())
    }
}

/// One voter's strict ranking, most preferred first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preference(Vec<CandidateId>);

impl Preference {
    /// The candidate this voter currently vetoes.
    pub fn tail(&self) -> Option<&CandidateId> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CandidateId> {
        self.0.iter()
    }

    pub fn get(&self, position: usize) -> Option<&CandidateId> {
        self.0.get(position)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, candidate: &CandidateId) -> bool {
        self.0.contains(candidate)
    }

    /// A copy of this ranking with the given candidates struck out.
    pub fn without(&self, removed: &HashSet<&CandidateId>) -> Preference {
        Preference(
            self.0
                .iter()
                .filter(|c| !removed.contains(c))
                .cloned()
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Preference {
    type Item = &'a CandidateId;
    type IntoIter = std::slice::Iter<'a, CandidateId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<C: Into<CandidateId>> FromIterator<C> for Preference {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Preference(iter.into_iter().map(Into::into).collect())
    }
}

/// Reasons a profile is rejected at construction time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidProfile {
    #[error("Profile has no voters")]
    NoVoters,
    #[error("Voter {voter} has an empty preference list")]
    EmptyPreference { voter: usize },
    #[error("Voter {voter} ranks candidate {candidate} more than once")]
    DuplicateCandidate { voter: usize, candidate: CandidateId },
    #[error("Voter {voter} does not rank candidate {missing}")]
    IncompletePreference { voter: usize, missing: CandidateId },
    #[error("Voter {voter} ranks candidate {candidate} which has no capacity")]
    UnknownCandidate { voter: usize, candidate: CandidateId },
    #[error("Candidate {candidate} has invalid capacity {capacity}")]
    InvalidCapacity { candidate: CandidateId, capacity: f64 },
}
