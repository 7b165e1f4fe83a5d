mod commands;

use crate::commands::{generate, info, run, OptionOverrides};
use clap::{Parser, Subcommand};
use consuming_veto::formats::DataFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(version, about = "Fractional allocation by the Consuming Veto rule")]
struct Opts {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate and dump info about a preference profile.
    Info {
        /// Profile file (.json, or one `a > b > c` ballot per line)
        profile: PathBuf,
        /// Input format, overriding the file extension ("json" or "text")
        #[clap(long)]
        format: Option<DataFormat>,
    },
    /// Run the allocation and print every round.
    Run {
        /// Profile file (.json, or one `a > b > c` ballot per line)
        profile: PathBuf,
        /// Input format, overriding the file extension ("json" or "text")
        #[clap(long)]
        format: Option<DataFormat>,
        /// Round capacities to this many decimal places (1 to 15)
        #[clap(long, conflicts_with = "exact")]
        precision: Option<u32>,
        /// Keep full floating point precision
        #[clap(long)]
        exact: bool,
        /// Total capacity at which the procedure stops
        #[clap(long)]
        threshold: Option<f64>,
        /// Write a JSON report to this path
        #[clap(long)]
        report: Option<PathBuf>,
        /// Only print the final allocation
        #[clap(long, short)]
        quiet: bool,
    },
    /// Generate a random profile of strict rankings.
    Generate {
        /// Number of voters
        #[clap(long, default_value = "10")]
        voters: usize,
        /// Number of candidates
        #[clap(long, default_value = "4")]
        candidates: usize,
        /// Seed for a reproducible profile
        #[clap(long)]
        seed: Option<u64>,
        /// Write the profile as JSON to this path instead of stdout
        #[clap(long)]
        output: Option<PathBuf>,
        /// Run the allocation on the generated profile
        #[clap(long)]
        run: bool,
    },
}

fn main() {
    env_logger::init();
    let opts = Opts::parse();

    let result = match opts.command {
        Command::Info { profile, format } => info(&profile, format),
        Command::Run {
            profile,
            format,
            precision,
            exact,
            threshold,
            report,
            quiet,
        } => run(
            &profile,
            format,
            OptionOverrides {
                precision,
                exact,
                threshold,
            },
            report.as_deref(),
            quiet,
        ),
        Command::Generate {
            voters,
            candidates,
            seed,
            output,
            run,
        } => generate(voters, candidates, seed, output.as_deref(), run),
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}
