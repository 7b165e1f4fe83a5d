use super::{CandidateId, InvalidProfile, Preference};
use itertools::Itertools;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt::{self, Display};

/// Snapshot of remaining candidate capacities and every voter's remaining ranking.
///
/// A profile is never mutated once built. Each round of the engine produces a
/// fresh, smaller profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    capacity: BTreeMap<CandidateId, f64>,
    preferences: Vec<Preference>,
}

impl Profile {
    /// Build the initial profile: every distinct candidate gets capacity 1.0.
    pub fn from_preferences<I, P, C>(lists: I) -> Result<Self, InvalidProfile>
    where
        I: IntoIterator<Item = P>,
        P: IntoIterator<Item = C>,
        C: Into<CandidateId>,
    {
        let preferences: Vec<Preference> = lists
            .into_iter()
            .map(|list| list.into_iter().collect())
            .collect();

        let capacity = preferences
            .iter()
            .flat_map(|p| p.iter().cloned())
            .map(|c| (c, 1.0))
            .collect();

        Self::new(capacity, preferences)
    }

    /// Build a profile from explicit capacities. Every voter must rank exactly
    /// the candidates that hold capacity, so an unranked capacity surfaces as an
    /// incomplete preference.
    pub fn new(
        capacity: BTreeMap<CandidateId, f64>,
        preferences: Vec<Preference>,
    ) -> Result<Self, InvalidProfile> {
        if preferences.is_empty() {
            return Err(InvalidProfile::NoVoters);
        }

        for (candidate, &value) in &capacity {
            if !value.is_finite() || value < 0.0 {
                return Err(InvalidProfile::InvalidCapacity {
                    candidate: candidate.clone(),
                    capacity: value,
                });
            }
        }

        for (voter, preference) in preferences.iter().enumerate() {
            if preference.is_empty() {
                return Err(InvalidProfile::EmptyPreference { voter });
            }

            let mut seen = HashSet::with_capacity(preference.len());
            for candidate in preference {
                if !seen.insert(candidate) {
                    return Err(InvalidProfile::DuplicateCandidate {
                        voter,
                        candidate: candidate.clone(),
                    });
                }
                if !capacity.contains_key(candidate) {
                    return Err(InvalidProfile::UnknownCandidate {
                        voter,
                        candidate: candidate.clone(),
                    });
                }
            }

            if let Some(missing) = capacity.keys().find(|c| !seen.contains(c)) {
                return Err(InvalidProfile::IncompletePreference {
                    voter,
                    missing: missing.clone(),
                });
            }
        }

        Ok(Profile {
            capacity,
            preferences,
        })
    }

    /// Assemble a profile the engine derived from an already valid one.
    pub(crate) fn from_parts(
        capacity: BTreeMap<CandidateId, f64>,
        preferences: Vec<Preference>,
    ) -> Self {
        Profile {
            capacity,
            preferences,
        }
    }

    pub fn capacity(&self) -> &BTreeMap<CandidateId, f64> {
        &self.capacity
    }

    pub fn capacity_of(&self, candidate: &CandidateId) -> Option<f64> {
        self.capacity.get(candidate).copied()
    }

    pub fn preferences(&self) -> &[Preference] {
        &self.preferences
    }

    pub fn candidates(&self) -> impl Iterator<Item = &CandidateId> {
        self.capacity.keys()
    }

    pub fn cap_sum(&self) -> f64 {
        self.capacity.values().sum()
    }

    pub fn voters_num(&self) -> usize {
        self.preferences.len()
    }

    pub fn candidates_num(&self) -> usize {
        self.capacity.len()
    }

    /// Number of voters whose least preferred remaining candidate is each candidate.
    /// Candidates nobody vetoes are absent.
    pub fn veto_counts(&self) -> BTreeMap<CandidateId, usize> {
        self.preferences
            .iter()
            .filter_map(Preference::tail)
            .counts()
            .into_iter()
            .map(|(c, n)| (c.clone(), n))
            .collect()
    }
}

impl Display for Profile {
    /// Capacities on one line, then one row per rank position across voters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let capacities = self
            .capacity
            .iter()
            .map(|(c, v)| format!("{}: {}", c, v))
            .join(", ");
        writeln!(f, "{{{}}}", capacities)?;

        let depth = self.preferences.iter().map(Preference::len).max().unwrap_or(0);
        for position in 0..depth {
            let row = self
                .preferences
                .iter()
                .map(|p| p.get(position).map(CandidateId::as_str).unwrap_or("-"))
                .join(" ");
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Preference {
        list.iter().copied().collect()
    }

    #[test]
    fn initial_capacities_are_one() {
        let profile =
            Profile::from_preferences(vec![vec!["a", "b", "c"], vec!["c", "b", "a"]]).unwrap();

        assert_eq!(profile.candidates_num(), 3);
        assert_eq!(profile.voters_num(), 2);
        assert!(profile.capacity().values().all(|&v| v == 1.0));
        assert_eq!(profile.cap_sum(), 3.0);
        assert_eq!(profile.preferences()[1], ids(&["c", "b", "a"]));
    }

    #[test]
    fn veto_counts_use_list_tails() {
        let profile = Profile::from_preferences(vec![
            vec!["a", "b", "c"],
            vec!["b", "a", "c"],
            vec!["c", "b", "a"],
        ])
        .unwrap();

        let counts = profile.veto_counts();
        assert_eq!(counts.get(&CandidateId::from("c")), Some(&2));
        assert_eq!(counts.get(&CandidateId::from("a")), Some(&1));
        assert_eq!(counts.get(&CandidateId::from("b")), None);
    }

    #[test]
    fn rejects_empty_profiles() {
        let lists: Vec<Vec<&str>> = vec![];
        assert_eq!(
            Profile::from_preferences(lists),
            Err(InvalidProfile::NoVoters)
        );
        assert_eq!(
            Profile::from_preferences(vec![vec!["a"], vec![]]),
            Err(InvalidProfile::EmptyPreference { voter: 1 })
        );
    }

    #[test]
    fn rejects_ties_and_partial_orders() {
        assert_eq!(
            Profile::from_preferences(vec![vec!["a", "b", "a"]]),
            Err(InvalidProfile::DuplicateCandidate {
                voter: 0,
                candidate: "a".into()
            })
        );
        assert_eq!(
            Profile::from_preferences(vec![vec!["a", "b", "c"], vec!["b", "a"]]),
            Err(InvalidProfile::IncompletePreference {
                voter: 1,
                missing: "c".into()
            })
        );
    }

    #[test]
    fn explicit_capacities_must_match_rankings() {
        let mut capacity = BTreeMap::new();
        capacity.insert(CandidateId::from("a"), 0.5);
        capacity.insert(CandidateId::from("b"), 0.5);
        capacity.insert(CandidateId::from("z"), 0.5);

        assert_eq!(
            Profile::new(capacity.clone(), vec![ids(&["a", "b"])]),
            Err(InvalidProfile::IncompletePreference {
                voter: 0,
                missing: "z".into()
            })
        );

        capacity.remove(&CandidateId::from("z"));
        assert_eq!(
            Profile::new(capacity.clone(), vec![ids(&["a", "b", "q"])]),
            Err(InvalidProfile::UnknownCandidate {
                voter: 0,
                candidate: "q".into()
            })
        );

        capacity.insert(CandidateId::from("b"), -0.1);
        assert!(matches!(
            Profile::new(capacity, vec![ids(&["a", "b"])]),
            Err(InvalidProfile::InvalidCapacity { .. })
        ));
    }

    #[test]
    fn display_transposes_rankings() {
        let profile = Profile::from_preferences(vec![vec!["a", "b"], vec!["b", "a"]]).unwrap();
        assert_eq!(profile.to_string(), "{a: 1, b: 1}\na b\nb a\n");
    }
}
