use crate::formats::FormatError;
use crate::veto::{RoundKind, VetoError, VetoOptions};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub mod generator;

pub use generator::generate_allocation_report;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Allocation error: {0}")]
    Veto(#[from] VetoError),
    #[error("Input error: {0}")]
    Format(#[from] FormatError),
}

pub type ReportResult<T> = std::result::Result<T, ReportError>;

/// Full allocation report
#[derive(Debug, Serialize, Deserialize)]
pub struct AllocationReport {
    pub info: ProfileInfo,
    pub options: VetoOptions,
    pub rounds: Vec<RoundResult>,
    pub allocation: BTreeMap<String, f64>,
    pub summary: ResultSummary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileInfo {
    pub name: Option<String>,
    #[serde(rename = "voterCount")]
    pub voter_count: usize,
    #[serde(rename = "candidateCount")]
    pub candidate_count: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub digest: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: usize,
    pub kind: RoundKind,
    pub rate: f64,
    pub tally: BTreeMap<String, usize>,
    pub eliminated: Vec<String>,
    pub capacities: BTreeMap<String, f64>,
    pub total: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResultSummary {
    #[serde(rename = "totalRounds")]
    pub total_rounds: usize,
    #[serde(rename = "eliminationRounds")]
    pub elimination_rounds: usize,
    pub corrected: bool,
    #[serde(rename = "finalTotal")]
    pub final_total: f64,
    pub drift: f64,
}

impl AllocationReport {
    pub fn write(&self, path: &Path) -> ReportResult<()> {
        crate::util::write_serialized(path, self)?;
        Ok(())
    }
}
