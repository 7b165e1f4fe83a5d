use super::print_profile;
use colored::*;
use consuming_veto::formats::{load_profile, DataFormat};
use consuming_veto::reports::ReportResult;
use std::path::Path;

pub fn info(profile_path: &Path, format: Option<DataFormat>) -> ReportResult<()> {
    println!("🔍 Validating {}", profile_path.display().to_string().cyan());

    let loaded = load_profile(profile_path, format)?;
    let profile = &loaded.profile;

    if let Some(name) = &loaded.name {
        println!("📋 Profile: {}", name.bright_yellow());
    }
    println!(
        "👥 {} voters, {} candidates",
        profile.voters_num().to_string().bright_yellow(),
        profile.candidates_num().to_string().bright_yellow()
    );
    if let Some(digest) = &loaded.digest {
        println!("🔑 SHA-1 {}", digest.dimmed());
    }
    if let Some(options) = &loaded.options {
        println!(
            "⚙️  Options: precision {:?}, threshold {}",
            options.precision, options.threshold
        );
    }

    let vetoes = profile.veto_counts();
    let tally: Vec<String> = profile
        .candidates()
        .map(|c| format!("{}: {}", c, vetoes.get(c).copied().unwrap_or(0)))
        .collect();
    println!("🚫 First-round vetoes: {}", tally.join(", "));

    print_profile(profile);
    println!("✅ Profile is valid");
    Ok(())
}
