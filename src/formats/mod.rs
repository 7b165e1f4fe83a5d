pub mod json;
pub mod text;

use crate::model::{InvalidProfile, Profile};
use crate::util::file_digest;
use crate::veto::VetoOptions;
use std::fmt::{self, Display};
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Unknown data format: {0}")]
    UnknownFormat(String),
    #[error("{0}")]
    Profile(#[from] InvalidProfile),
}

pub type Result<T> = std::result::Result<T, FormatError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Text,
}

impl DataFormat {
    /// `.json` files are JSON, everything else is the ballot text format.
    pub fn from_path(path: &Path) -> DataFormat {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DataFormat::Json,
            _ => DataFormat::Text,
        }
    }
}

impl FromStr for DataFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(DataFormat::Json),
            "text" | "txt" => Ok(DataFormat::Text),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

impl Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataFormat::Json => write!(f, "json"),
            DataFormat::Text => write!(f, "text"),
        }
    }
}

/// A validated profile together with whatever the source file carried alongside it.
#[derive(Debug, Clone)]
pub struct LoadedProfile {
    pub name: Option<String>,
    pub profile: Profile,
    pub options: Option<VetoOptions>,
    /// SHA-1 of the source file, when read from disk.
    pub digest: Option<String>,
}

/// Parse a profile from in-memory content.
pub fn read_profile(content: &str, format: DataFormat) -> Result<LoadedProfile> {
    match format {
        DataFormat::Json => json::read_profile(content),
        DataFormat::Text => text::read_profile(content),
    }
}

/// Load a profile file, picking the format from the extension unless given.
pub fn load_profile(path: &Path, format: Option<DataFormat>) -> Result<LoadedProfile> {
    let format = format.unwrap_or_else(|| DataFormat::from_path(path));
    let content = std::fs::read_to_string(path)?;

    let mut loaded = read_profile(&content, format)?;
    loaded.digest = Some(file_digest(path)?);
    if loaded.name.is_none() {
        loaded.name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned());
    }
    Ok(loaded)
}
