use super::run::{run_loaded, OptionOverrides};
use colored::*;
use consuming_veto::formats::json::ProfileDocument;
use consuming_veto::formats::LoadedProfile;
use consuming_veto::generate::random_profile;
use consuming_veto::model::Profile;
use consuming_veto::reports::ReportResult;
use consuming_veto::util::write_serialized;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::Path;

pub fn generate(
    voters: usize,
    candidates: usize,
    seed: Option<u64>,
    output: Option<&Path>,
    run_after: bool,
) -> ReportResult<()> {
    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    println!(
        "🎲 Generating {} random rankings over {} candidates",
        voters.to_string().bright_cyan(),
        candidates.to_string().bright_cyan()
    );

    let preferences = random_profile(voters, candidates, &mut rng);
    let name = seed.map(|s| format!("random-{}x{}-seed{}", voters, candidates, s));

    match output {
        Some(path) => {
            let document = ProfileDocument {
                name: name.clone(),
                preferences: preferences.clone(),
                options: None,
            };
            write_serialized(path, &document)?;
            println!(
                "✅ Profile written: {}",
                path.display().to_string().bright_green()
            );
        }
        None => println!("{}", serde_json::to_string(&preferences)?),
    }

    if run_after {
        let loaded = LoadedProfile {
            name,
            profile: Profile::from_preferences(preferences)
                .map_err(consuming_veto::formats::FormatError::from)?,
            options: None,
            digest: None,
        };
        run_loaded(&loaded, OptionOverrides::default(), None, false)?;
    }

    Ok(())
}
