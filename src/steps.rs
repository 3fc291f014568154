//! Loading step descriptors from a standalone file.
//!
//! JSON files hold either a bare array of steps or `{ "steps": [...] }`.
//! TOML files hold `[[steps]]` tables.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::ui::stepper::StepDescriptor;

/// Errors reading a steps file
#[derive(Error, Debug)]
pub enum StepsError {
    #[error("failed to read steps file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in steps file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid TOML in steps file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unsupported steps file format '{0}' (expected .json or .toml)")]
    UnsupportedFormat(String),

    #[error("steps file {0} defines no steps")]
    Empty(PathBuf),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonSteps {
    List(Vec<StepDescriptor>),
    Table { steps: Vec<StepDescriptor> },
}

#[derive(Deserialize)]
struct TomlSteps {
    #[serde(default)]
    steps: Vec<StepDescriptor>,
}

/// Supported steps file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepsFormat {
    Json,
    Toml,
}

impl StepsFormat {
    pub fn from_path(path: &Path) -> Result<Self, StepsError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "json" => Ok(StepsFormat::Json),
            "toml" => Ok(StepsFormat::Toml),
            _ => Err(StepsError::UnsupportedFormat(extension)),
        }
    }
}

/// Parse steps from file contents
pub fn parse_steps(
    contents: &str,
    format: StepsFormat,
    path: &Path,
) -> Result<Vec<StepDescriptor>, StepsError> {
    let steps = match format {
        StepsFormat::Json => match serde_json::from_str::<JsonSteps>(contents) {
            Ok(JsonSteps::List(steps) | JsonSteps::Table { steps }) => steps,
            Err(source) => {
                return Err(StepsError::Json {
                    path: path.to_path_buf(),
                    source,
                })
            }
        },
        StepsFormat::Toml => {
            toml::from_str::<TomlSteps>(contents)
                .map_err(|source| StepsError::Toml {
                    path: path.to_path_buf(),
                    source,
                })?
                .steps
        }
    };
    if steps.is_empty() {
        return Err(StepsError::Empty(path.to_path_buf()));
    }
    Ok(steps)
}

/// Load steps from a `.json` or `.toml` file
pub fn load_steps(path: &Path) -> Result<Vec<StepDescriptor>, StepsError> {
    let format = StepsFormat::from_path(path)?;
    let contents = std::fs::read_to_string(path).map_err(|source| StepsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let steps = parse_steps(&contents, format, path)?;
    tracing::debug!(path = %path.display(), count = steps.len(), "loaded steps file");
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_json_array() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "steps.json",
            r#"[
                {"label": "Cart", "icon": "cart"},
                {"label": "Payment", "is_valid": false, "status": "error"},
                {"label": "Review", "optional": true}
            ]"#,
        );

        let steps = load_steps(&path).unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].icon.as_deref(), Some("cart"));
        assert_eq!(steps[1].is_valid, Some(false));
        assert_eq!(steps[1].extra_str("status"), Some("error"));
        assert!(steps[2].optional);
    }

    #[test]
    fn test_load_json_table() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "steps.json", r#"{"steps": [{"label": "Only"}]}"#);
        let steps = load_steps(&path).unwrap();
        assert_eq!(steps, vec![StepDescriptor::labeled("Only")]);
    }

    #[test]
    fn test_load_toml() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "steps.toml",
            r#"
[[steps]]
label = "Account"
text = "A"

[[steps]]
label = "Confirm"
disabled = true
detail = "last"
"#,
        );

        let steps = load_steps(&path).unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].text.as_deref(), Some("A"));
        assert!(steps[1].disabled);
        assert_eq!(steps[1].extra_str("detail"), Some("last"));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_steps(Path::new("steps.yaml")).unwrap_err();
        assert!(matches!(err, StepsError::UnsupportedFormat(ext) if ext == "yaml"));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_steps(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, StepsError::Read { .. }));
    }

    #[test]
    fn test_invalid_contents() {
        let dir = TempDir::new().unwrap();
        let json = write(&dir, "bad.json", "{not json");
        assert!(matches!(load_steps(&json).unwrap_err(), StepsError::Json { .. }));

        let toml_path = write(&dir, "bad.toml", "steps = 3");
        assert!(matches!(load_steps(&toml_path).unwrap_err(), StepsError::Toml { .. }));
    }

    #[test]
    fn test_empty_steps_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "empty.json", "[]");
        assert!(matches!(load_steps(&path).unwrap_err(), StepsError::Empty(_)));
    }
}
