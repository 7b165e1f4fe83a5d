mod generate;
mod info;
mod run;

pub use generate::generate;
pub use info::info;
pub use run::{run, OptionOverrides};

use colored::*;
use consuming_veto::model::Profile;

/// Capacities in id order, then the preference table with one row per rank.
fn print_profile(profile: &Profile) {
    let capacities: Vec<String> = profile
        .capacity()
        .iter()
        .map(|(c, v)| format!("{}: {}", c.to_string().bright_white().bold(), v))
        .collect();
    println!("    {}", capacities.join(", "));

    let table = profile.to_string();
    for row in table.lines().skip(1) {
        println!("    {}", row.dimmed());
    }
}
