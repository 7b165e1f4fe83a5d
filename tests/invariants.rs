use consuming_veto::model::{CandidateId, Profile};
use consuming_veto::veto::{ConsumingVeto, Precision, RoundKind, VetoOptions};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Strict profiles: 1-8 voters each ranking the same `1..=max_candidates` candidates.
fn arb_rankings(max_candidates: usize) -> impl Strategy<Value = Vec<Vec<String>>> {
    (1..=8usize, 1..=max_candidates).prop_flat_map(|(voters, candidates)| {
        let names: Vec<String> = (0..candidates)
            .map(|i| ((b'a' + i as u8) as char).to_string())
            .collect();
        proptest::collection::vec(Just(names).prop_shuffle(), voters..=voters)
    })
}

fn engine(precision: Precision) -> ConsumingVeto {
    ConsumingVeto::new(VetoOptions {
        precision,
        ..VetoOptions::default()
    })
    .unwrap()
}

fn ranked(profile: &Profile) -> BTreeSet<&CandidateId> {
    profile.preferences().iter().flat_map(|p| p.iter()).collect()
}

proptest! {
    #[test]
    fn capacities_stay_non_negative_and_consistent(rankings in arb_rankings(6)) {
        let profile = Profile::from_preferences(rankings).unwrap();
        let outcome = engine(Precision::Decimals(2)).run(profile).unwrap();

        for round in &outcome.rounds {
            let p = &round.profile;
            prop_assert!(p.capacity().values().all(|&v| v >= 0.0));
            prop_assert_eq!(ranked(p), p.candidates().collect::<BTreeSet<_>>());
            prop_assert!(p.preferences().iter().all(|pref| pref.len() == p.candidates_num()));
            prop_assert!(Profile::new(p.capacity().clone(), p.preferences().to_vec()).is_ok());
        }
    }

    #[test]
    fn elimination_rounds_shrink_total(rankings in arb_rankings(6)) {
        let profile = Profile::from_preferences(rankings).unwrap();
        let outcome = engine(Precision::Decimals(2)).run(profile).unwrap();

        let mut before = outcome.initial.clone();
        for round in &outcome.rounds {
            if round.kind == RoundKind::Elimination {
                prop_assert!(round.profile.cap_sum() < before.cap_sum());
                prop_assert!(!round.eliminated.is_empty());
                prop_assert!(round.profile.candidates_num() < before.candidates_num());
            }
            before = round.profile.clone();
        }
    }

    #[test]
    fn terminates_within_candidate_bound(rankings in arb_rankings(6)) {
        let profile = Profile::from_preferences(rankings).unwrap();
        let candidates = profile.candidates_num();
        let outcome = engine(Precision::Decimals(2)).run(profile).unwrap();

        prop_assert!(outcome.elimination_rounds() <= candidates.saturating_sub(1));
        let corrections = outcome.rounds.iter()
            .filter(|r| r.kind == RoundKind::BoundaryCorrection)
            .count();
        prop_assert!(corrections <= 1);
        if corrections == 1 {
            prop_assert!(outcome.corrected());
        }
    }

    #[test]
    fn lands_on_threshold_within_rounding(rankings in arb_rankings(8)) {
        let profile = Profile::from_preferences(rankings).unwrap();
        let candidates = profile.candidates_num();
        let precision = Precision::Decimals(2);
        let outcome = engine(precision).run(profile).unwrap();

        if candidates >= 2 {
            let vetoed = outcome.rounds.last().map_or(0, |r| r.vetoes.len());
            let bound = precision.drift_bound(outcome.rounds.len(), vetoed) + 1e-9;
            prop_assert!((outcome.allocation.cap_sum() - 1.0).abs() <= bound);
        } else {
            prop_assert!(outcome.rounds.is_empty());
        }
    }

    #[test]
    fn exact_precision_lands_on_threshold(rankings in arb_rankings(8)) {
        let profile = Profile::from_preferences(rankings).unwrap();
        let candidates = profile.candidates_num();
        let outcome = engine(Precision::Exact).run(profile).unwrap();

        if candidates >= 2 {
            prop_assert!((outcome.allocation.cap_sum() - 1.0).abs() < 1e-6);
            prop_assert!(outcome.shares().values().all(|&v| v > 0.0));
        }
    }
}
