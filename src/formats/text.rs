use super::{FormatError, LoadedProfile, Result};
use crate::model::Profile;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BALLOT_RX: Regex = Regex::new(r"^(?:(\d+)\s*:)?\s*(.+)$").unwrap();
    static ref CANDIDATE_RX: Regex = Regex::new(r"^[A-Za-z0-9_.\-]+$").unwrap();
}

/// Read ballots written one per line as `a > b > c`.
///
/// A `3:` prefix repeats the ballot for three voters. Blank lines and `#`
/// comments are skipped.
pub fn read_profile(content: &str) -> Result<LoadedProfile> {
    let mut preferences: Vec<Vec<String>> = Vec::new();

    for (i, raw) in content.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let caps = BALLOT_RX.captures(line).ok_or_else(|| FormatError::Parse {
            line: line_no,
            message: format!("not a ballot: {:?}", line),
        })?;

        let copies: usize = match caps.get(1) {
            Some(m) => m.as_str().parse().map_err(|_| FormatError::Parse {
                line: line_no,
                message: format!("bad multiplier {:?}", m.as_str()),
            })?,
            None => 1,
        };

        let ranking = caps[2]
            .split('>')
            .map(str::trim)
            .map(|candidate| {
                if CANDIDATE_RX.is_match(candidate) {
                    Ok(candidate.to_string())
                } else {
                    Err(FormatError::Parse {
                        line: line_no,
                        message: format!("bad candidate id {:?}", candidate),
                    })
                }
            })
            .collect::<Result<Vec<String>>>()?;

        preferences.extend(std::iter::repeat(ranking).take(copies));
    }

    Ok(LoadedProfile {
        name: None,
        profile: Profile::from_preferences(preferences)?,
        options: None,
        digest: None,
    })
}
