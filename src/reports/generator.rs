use super::{AllocationReport, ProfileInfo, ResultSummary, RoundResult};
use crate::formats::LoadedProfile;
use crate::model::{CandidateId, Profile};
use crate::veto::{Outcome, VetoOptions};
use std::collections::BTreeMap;

/// Build the serializable report for a finished run.
pub fn generate_allocation_report(
    loaded: &LoadedProfile,
    options: &VetoOptions,
    outcome: &Outcome,
) -> AllocationReport {
    let info = ProfileInfo {
        name: loaded.name.clone(),
        voter_count: outcome.initial.voters_num(),
        candidate_count: outcome.initial.candidates_num(),
        digest: loaded.digest.clone(),
    };

    let rounds = outcome
        .rounds
        .iter()
        .map(|round| RoundResult {
            round: round.number,
            kind: round.kind,
            rate: round.rate,
            tally: round
                .vetoes
                .iter()
                .map(|(c, &n)| (c.to_string(), n))
                .collect(),
            eliminated: round.eliminated.iter().map(CandidateId::to_string).collect(),
            capacities: capacities(&round.profile),
            total: round.profile.cap_sum(),
        })
        .collect();

    let summary = ResultSummary {
        total_rounds: outcome.rounds.len(),
        elimination_rounds: outcome.elimination_rounds(),
        corrected: outcome.corrected(),
        final_total: outcome.allocation.cap_sum(),
        drift: outcome.drift(options.threshold),
    };

    AllocationReport {
        info,
        options: *options,
        rounds,
        allocation: capacities(&outcome.allocation),
        summary,
    }
}

fn capacities(profile: &Profile) -> BTreeMap<String, f64> {
    profile
        .capacity()
        .iter()
        .map(|(c, &v)| (c.to_string(), v))
        .collect()
}
