use super::options::Precision;
use super::{Result, VetoError};
use crate::model::{CandidateId, Preference, Profile};
use std::collections::{BTreeMap, HashSet};

/// Result of applying one consumption rate to a profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Consumption {
    /// Per-voter rate charged to each vetoed candidate.
    pub rate: f64,
    /// Veto counts the rate was charged against.
    pub vetoes: BTreeMap<CandidateId, usize>,
    /// Candidates whose capacity reached zero, in id order.
    pub eliminated: Vec<CandidateId>,
    pub profile: Profile,
}

/// The largest rate that drives at least one vetoed candidate to zero without
/// pushing any capacity negative.
pub fn min_ratio_rate(profile: &Profile, vetoes: &BTreeMap<CandidateId, usize>) -> Result<f64> {
    profile
        .capacity()
        .iter()
        .filter_map(|(candidate, &capacity)| {
            vetoes
                .get(candidate)
                .filter(|&&count| count > 0)
                .map(|&count| capacity / count as f64)
        })
        .min_by(f64::total_cmp)
        .ok_or_else(|| degenerate(profile))
}

/// The rate that takes the total capacity down to `target` in one round,
/// spreading the excess evenly over the voters.
pub fn threshold_rate(profile: &Profile, target: f64) -> Result<f64> {
    if profile.voters_num() == 0 {
        return Err(degenerate(profile));
    }
    Ok((profile.cap_sum() - target) / profile.voters_num() as f64)
}

/// Charge `rate` against every candidate once per veto, round, and strike out
/// anything that reached zero.
pub fn consume(
    profile: &Profile,
    vetoes: BTreeMap<CandidateId, usize>,
    rate: f64,
    precision: Precision,
) -> Consumption {
    let mut capacity = BTreeMap::new();
    let mut eliminated = Vec::new();

    for (candidate, &old) in profile.capacity() {
        let count = vetoes.get(candidate).copied().unwrap_or(0);
        let new = precision.round(old - count as f64 * rate);
        if precision.is_consumed(new) {
            eliminated.push(candidate.clone());
        } else {
            capacity.insert(candidate.clone(), new);
        }
    }

    let removed: HashSet<&CandidateId> = eliminated.iter().collect();
    let preferences: Vec<Preference> = profile
        .preferences()
        .iter()
        .map(|p| p.without(&removed))
        .collect();

    Consumption {
        rate,
        vetoes,
        eliminated,
        profile: Profile::from_parts(capacity, preferences),
    }
}

fn degenerate(profile: &Profile) -> VetoError {
    VetoError::DegenerateRound {
        voters: profile.voters_num(),
        candidates: profile.candidates_num(),
    }
}
