//! The Consuming Veto rule.
//!
//! Every round each voter vetoes its least preferred remaining candidate and
//! that candidate loses `rate` capacity per veto. The standard round uses the
//! largest rate that keeps every capacity non-negative, which zeroes at least
//! one candidate. Rounds repeat while the total capacity exceeds the
//! threshold. When a standard round would undershoot the threshold, a single
//! boundary correction charges exactly the excess instead, and the run ends.

pub mod options;
pub mod step;

pub use options::{Precision, VetoOptions};
pub use step::Consumption;

use crate::model::{CandidateId, InvalidProfile, Profile};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VetoError {
    #[error("Invalid profile: {0}")]
    InvalidProfile(#[from] InvalidProfile),
    #[error("Invalid threshold {0}: must be positive and finite")]
    InvalidThreshold(f64),
    #[error("Invalid precision of {0} decimal places: must be between 1 and 15")]
    InvalidPrecision(u32),
    #[error("No candidate is vetoed ({voters} voters, {candidates} candidates)")]
    DegenerateRound { voters: usize, candidates: usize },
    #[error("Round {round} eliminated no candidate")]
    Stalled { round: usize },
}

pub type Result<T> = std::result::Result<T, VetoError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundKind {
    /// Min-ratio round that zeroes at least one candidate.
    Elimination,
    /// Final round charging exactly the excess above the threshold.
    BoundaryCorrection,
}

/// One entry of the run trace.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    /// 1-based round number.
    pub number: usize,
    pub kind: RoundKind,
    pub rate: f64,
    pub vetoes: BTreeMap<CandidateId, usize>,
    pub eliminated: Vec<CandidateId>,
    /// Profile after the round.
    pub profile: Profile,
}

impl Round {
    fn new(number: usize, kind: RoundKind, consumption: Consumption) -> Self {
        Round {
            number,
            kind,
            rate: consumption.rate,
            vetoes: consumption.vetoes,
            eliminated: consumption.eliminated,
            profile: consumption.profile,
        }
    }
}

/// Completed run: the starting profile, every round, and the final allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub initial: Profile,
    pub rounds: Vec<Round>,
    pub allocation: Profile,
}

impl Outcome {
    /// Final share per surviving candidate. Eliminated candidates are absent.
    pub fn shares(&self) -> &BTreeMap<CandidateId, f64> {
        self.allocation.capacity()
    }

    pub fn elimination_rounds(&self) -> usize {
        self.rounds
            .iter()
            .filter(|r| r.kind == RoundKind::Elimination)
            .count()
    }

    pub fn corrected(&self) -> bool {
        self.rounds
            .last()
            .map_or(false, |r| r.kind == RoundKind::BoundaryCorrection)
    }

    /// Signed distance of the final total from `threshold`.
    pub fn drift(&self, threshold: f64) -> f64 {
        self.allocation.cap_sum() - threshold
    }
}

pub struct ConsumingVeto {
    options: VetoOptions,
}

impl ConsumingVeto {
    pub fn new(options: VetoOptions) -> Result<Self> {
        if !options.threshold.is_finite() || options.threshold <= 0.0 {
            return Err(VetoError::InvalidThreshold(options.threshold));
        }
        if let Precision::Decimals(places) = options.precision {
            if !options.precision.is_valid() {
                return Err(VetoError::InvalidPrecision(places));
            }
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &VetoOptions {
        &self.options
    }

    /// Standard elimination round at the min-ratio rate.
    pub fn step(&self, profile: &Profile) -> Result<Consumption> {
        let vetoes = profile.veto_counts();
        let rate = step::min_ratio_rate(profile, &vetoes)?;
        Ok(step::consume(profile, vetoes, rate, self.options.precision))
    }

    /// Calibrated round that lands the total capacity on the threshold.
    pub fn eat_to_threshold(&self, profile: &Profile) -> Result<Consumption> {
        let vetoes = profile.veto_counts();
        if vetoes.is_empty() {
            return Err(VetoError::DegenerateRound {
                voters: profile.voters_num(),
                candidates: profile.candidates_num(),
            });
        }
        let rate = step::threshold_rate(profile, self.options.threshold)?;
        Ok(step::consume(profile, vetoes, rate, self.options.precision))
    }

    /// Lazily yield each round, starting from `profile`.
    pub fn rounds(&self, profile: Profile) -> Rounds<'_> {
        Rounds {
            engine: self,
            current: profile,
            number: 0,
            done: false,
        }
    }

    /// Drive the rounds to completion.
    pub fn run(&self, profile: Profile) -> Result<Outcome> {
        let initial = profile.clone();
        let mut rounds = Vec::new();

        for round in self.rounds(profile) {
            let round = round?;
            log::debug!(
                "round {} ({:?}): rate {:.4}, eliminated [{}], total {:.4}",
                round.number,
                round.kind,
                round.rate,
                round.eliminated.iter().join(", "),
                round.profile.cap_sum()
            );
            rounds.push(round);
        }

        let allocation = rounds
            .last()
            .map_or_else(|| initial.clone(), |r| r.profile.clone());

        let outcome = Outcome {
            initial,
            rounds,
            allocation,
        };

        let drift = outcome.drift(self.options.threshold);
        let vetoed = outcome.rounds.last().map_or(0, |r| r.vetoes.len());
        let bound = self
            .options
            .precision
            .drift_bound(outcome.rounds.len(), vetoed);
        if outcome.initial.cap_sum() > self.options.threshold && drift.abs() > bound {
            log::warn!(
                "final capacity {:.4} drifted {:+.4} from threshold {}",
                outcome.allocation.cap_sum(),
                drift,
                self.options.threshold
            );
        }

        Ok(outcome)
    }

    fn total(&self, profile: &Profile) -> f64 {
        self.options.precision.round(profile.cap_sum())
    }
}

/// Iterator over the rounds of a run.
///
/// Yields nothing once the total capacity is at or below the threshold. A
/// boundary correction or an error is always the last item.
pub struct Rounds<'a> {
    engine: &'a ConsumingVeto,
    current: Profile,
    number: usize,
    done: bool,
}

impl<'a> Rounds<'a> {
    /// Profile after the most recent round.
    pub fn current(&self) -> &Profile {
        &self.current
    }

    fn advance(&self) -> Result<(RoundKind, Consumption)> {
        let threshold = self.engine.options.threshold;
        let standard = self.engine.step(&self.current)?;

        if self.engine.total(&standard.profile) >= threshold {
            if standard.eliminated.is_empty() {
                return Err(VetoError::Stalled {
                    round: self.number + 1,
                });
            }
            Ok((RoundKind::Elimination, standard))
        } else {
            let corrected = self.engine.eat_to_threshold(&self.current)?;
            Ok((RoundKind::BoundaryCorrection, corrected))
        }
    }
}

impl<'a> Iterator for Rounds<'a> {
    type Item = Result<Round>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.engine.total(&self.current) <= self.engine.options.threshold {
            self.done = true;
            return None;
        }

        match self.advance() {
            Ok((kind, consumption)) => {
                self.number += 1;
                self.done = kind == RoundKind::BoundaryCorrection;
                self.current = consumption.profile.clone();
                Some(Ok(Round::new(self.number, kind, consumption)))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
