use serde::{Deserialize, Serialize};

/// Capacities at or below this are treated as consumed when no rounding is applied.
pub const EXACT_TOLERANCE: f64 = 1e-9;

/// Decimal places `Precision::Decimals` accepts.
pub const DECIMALS_RANGE: std::ops::RangeInclusive<u32> = 1..=15;

/// Rounding applied to every capacity after a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Precision {
    /// Round to this many decimal places, ties to even.
    Decimals(u32),
    /// Keep full floating point precision.
    Exact,
}

impl Precision {
    /// Whether rounding at this precision stays finite and keeps a non-zero unit.
    pub fn is_valid(self) -> bool {
        match self {
            Precision::Decimals(places) => DECIMALS_RANGE.contains(&places),
            Precision::Exact => true,
        }
    }

    pub fn round(self, value: f64) -> f64 {
        match self {
            Precision::Decimals(places) => {
                let scale = 10f64.powi(places as i32);
                (value * scale).round_ties_even() / scale
            }
            Precision::Exact => value,
        }
    }

    /// Whether a rounded capacity counts as fully consumed.
    pub fn is_consumed(self, value: f64) -> bool {
        match self {
            Precision::Decimals(_) => value <= 0.0,
            Precision::Exact => value <= EXACT_TOLERANCE,
        }
    }

    /// Smallest capacity step this precision can represent.
    pub fn unit(self) -> f64 {
        match self {
            Precision::Decimals(places) => 10f64.powi(-(places as i32)),
            Precision::Exact => EXACT_TOLERANCE,
        }
    }

    /// Tolerated distance between the final total and the threshold after
    /// `rounds` rounds, the last of which charged `vetoed` candidates.
    ///
    /// Each candidate charged in the last round can be off by half a unit once
    /// rounded, on top of the per-round term.
    pub fn drift_bound(self, rounds: usize, vetoed: usize) -> f64 {
        2.0 * self.unit() * rounds.max(1) as f64 + self.unit() / 2.0 * vetoed as f64
    }
}

impl Default for Precision {
    fn default() -> Self {
        Precision::Decimals(2)
    }
}

/// Allocation options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VetoOptions {
    pub precision: Precision,
    /// Total capacity at which the procedure stops.
    pub threshold: f64,
}

impl Default for VetoOptions {
    fn default() -> Self {
        Self {
            precision: Precision::default(),
            threshold: 1.0,
        }
    }
}
