use super::{LoadedProfile, Result};
use crate::model::Profile;
use crate::veto::VetoOptions;
use serde::{Deserialize, Serialize};

/// On-disk JSON profile: either a bare list of rankings or a document.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProfileFile {
    Bare(Vec<Vec<String>>),
    Document(ProfileDocument),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileDocument {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    pub preferences: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub options: Option<VetoOptions>,
}

pub fn read_profile(content: &str) -> Result<LoadedProfile> {
    let document = match serde_json::from_str(content)? {
        ProfileFile::Bare(preferences) => ProfileDocument {
            name: None,
            preferences,
            options: None,
        },
        ProfileFile::Document(document) => document,
    };

    Ok(LoadedProfile {
        name: document.name,
        profile: Profile::from_preferences(document.preferences)?,
        options: document.options,
        digest: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::FormatError;
    use crate::model::InvalidProfile;
    use crate::veto::Precision;

    #[test]
    fn reads_bare_rankings() {
        let loaded = read_profile(r#"[["a", "b"], ["b", "a"]]"#).unwrap();
        assert_eq!(loaded.profile.voters_num(), 2);
        assert_eq!(loaded.profile.candidates_num(), 2);
        assert!(loaded.name.is_none());
        assert!(loaded.options.is_none());
    }

    #[test]
    fn reads_document_with_options() {
        let loaded = read_profile(
            r#"{
                "name": "committee",
                "preferences": [["a", "b", "c"], ["c", "b", "a"]],
                "options": {"precision": "exact"}
            }"#,
        )
        .unwrap();
        assert_eq!(loaded.name.as_deref(), Some("committee"));
        let options = loaded.options.unwrap();
        assert_eq!(options.precision, Precision::Exact);
        assert_eq!(options.threshold, 1.0);
    }

    #[test]
    fn invalid_rankings_are_rejected() {
        let err = read_profile(r#"[["a", "b"], ["a"]]"#).unwrap_err();
        assert!(matches!(
            err,
            FormatError::Profile(InvalidProfile::IncompletePreference { voter: 1, .. })
        ));
        assert!(matches!(
            read_profile("{\"voters\": 3}"),
            Err(FormatError::Json(_))
        ));
    }
}
