use super::print_profile;
use colored::*;
use consuming_veto::formats::{load_profile, DataFormat, LoadedProfile};
use consuming_veto::reports::{generate_allocation_report, ReportResult};
use consuming_veto::veto::{ConsumingVeto, Outcome, Precision, RoundKind, VetoOptions};
use std::path::Path;

/// Command-line settings that take precedence over the profile file's options.
#[derive(Debug, Default, Clone, Copy)]
pub struct OptionOverrides {
    pub precision: Option<u32>,
    pub exact: bool,
    pub threshold: Option<f64>,
}

impl OptionOverrides {
    pub fn apply(&self, base: Option<VetoOptions>) -> VetoOptions {
        let mut options = base.unwrap_or_default();
        if self.exact {
            options.precision = Precision::Exact;
        } else if let Some(places) = self.precision {
            options.precision = Precision::Decimals(places);
        }
        if let Some(threshold) = self.threshold {
            options.threshold = threshold;
        }
        options
    }
}

pub fn run(
    profile_path: &Path,
    format: Option<DataFormat>,
    overrides: OptionOverrides,
    report_path: Option<&Path>,
    quiet: bool,
) -> ReportResult<()> {
    let loaded = load_profile(profile_path, format)?;
    run_loaded(&loaded, overrides, report_path, quiet)
}

pub(super) fn run_loaded(
    loaded: &LoadedProfile,
    overrides: OptionOverrides,
    report_path: Option<&Path>,
    quiet: bool,
) -> ReportResult<()> {
    let options = overrides.apply(loaded.options);
    let engine = ConsumingVeto::new(options)?;

    println!(
        "🚀 Running consuming veto on {} voters, {} candidates",
        loaded.profile.voters_num().to_string().bright_cyan(),
        loaded.profile.candidates_num().to_string().bright_cyan()
    );

    let outcome = engine.run(loaded.profile.clone())?;

    if !quiet {
        print_trace(&outcome);
    }
    print_allocation(&outcome, &options);

    if let Some(path) = report_path {
        let report = generate_allocation_report(loaded, &options, &outcome);
        report.write(path)?;
        println!(
            "✅ Report written: {}",
            path.display().to_string().bright_green()
        );
    }

    Ok(())
}

fn print_trace(outcome: &Outcome) {
    println!("{}", "Initial profile".bright_white().bold());
    print_profile(&outcome.initial);

    for round in &outcome.rounds {
        let label = match round.kind {
            RoundKind::Elimination => "elimination".yellow(),
            RoundKind::BoundaryCorrection => "boundary correction".magenta(),
        };
        let eliminated: Vec<String> = round.eliminated.iter().map(|c| c.to_string()).collect();

        println!(
            "{} {} ({}) rate {:.4}{}",
            "Round".bright_white().bold(),
            round.number.to_string().bright_white().bold(),
            label,
            round.rate,
            if eliminated.is_empty() {
                String::new()
            } else {
                format!(", eliminated {}", eliminated.join(", ").red())
            }
        );
        print_profile(&round.profile);
    }
}

fn print_allocation(outcome: &Outcome, options: &VetoOptions) {
    println!("\n{}", "🎉 Final allocation".bright_green().bold());
    println!("{}", "=".repeat(40).bright_green());
    for (candidate, share) in outcome.shares() {
        println!(
            "{}: {}",
            candidate.to_string().bright_white().bold(),
            share.to_string().bright_yellow()
        );
    }
    println!("{}", "-".repeat(40).bright_green());
    println!(
        "{}: {} ({} elimination, {})",
        "Rounds".bright_white().bold(),
        outcome.rounds.len(),
        outcome.elimination_rounds(),
        if outcome.corrected() {
            "boundary corrected"
        } else {
            "no correction"
        }
    );
    println!(
        "{}: {:.4} (drift {:+.4})",
        "Total".bright_white().bold(),
        outcome.allocation.cap_sum(),
        outcome.drift(options.threshold)
    );
}
