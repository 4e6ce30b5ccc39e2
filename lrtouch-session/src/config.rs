use std::path::{Path, PathBuf};

use lrtouch_catalog::ImageCatalog;
use lrtouch_core::{SpeechRequest, Trial, TrialError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read session file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported session file extension: {0}")]
    UnsupportedExtension(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub correct_feedback_ms: u64,
    /// Error feedback plus the pause before the trial comes back
    pub incorrect_feedback_ms: u64,
    pub speak_instructions: bool,
    pub image_dir: String,
    pub image_extension: String,
    pub speech_rate: f32,
    pub speech_pitch: f32,
    /// Closed list of known image names; any name is accepted when unset
    pub images: Option<Vec<String>>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            correct_feedback_ms: 700,
            incorrect_feedback_ms: 700 + 500,
            speak_instructions: true,
            image_dir: "images/".to_string(),
            image_extension: "png".to_string(),
            speech_rate: 0.9,
            speech_pitch: 1.0,
            images: None,
        }
    }
}

impl SessionConfig {
    pub fn catalog(&self) -> ImageCatalog {
        match &self.images {
            Some(known) => ImageCatalog::closed(&*self.image_dir, &*self.image_extension, known),
            None => ImageCatalog::open(&*self.image_dir, &*self.image_extension),
        }
    }

    pub fn speech(&self, text: String) -> SpeechRequest {
        SpeechRequest {
            text,
            rate: self.speech_rate,
            pitch: self.speech_pitch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrialSpec {
    pub target: String,
    pub distractor: String,
}

impl TrialSpec {
    pub fn new(target: impl Into<String>, distractor: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            distractor: distractor.into(),
        }
    }
}

/// A session file: optional `[session]` settings plus the trial list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionFile {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub trials: Vec<TrialSpec>,
}

impl SessionFile {
    /// Load a `.toml` or `.json` session file.
    ///
    /// A JSON file may also be a bare array of trials.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            }),
            Some("json") => Self::from_json_str(&content).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            }),
            _ => Err(ConfigError::UnsupportedExtension(path.to_path_buf())),
        }?;
        if file.trials.is_empty() {
            warn!(path = %path.display(), "session file has no trials");
        }
        Ok(file)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        match serde_json::from_str::<Value>(content)? {
            value @ Value::Array(_) => Ok(SessionFile {
                session: SessionConfig::default(),
                trials: serde_json::from_value(value)?,
            }),
            value @ Value::Object(_) => serde_json::from_value(value),
            _ => Err(serde::de::Error::custom(
                "expected an array of trials or a session object",
            )),
        }
    }
}

/// Validate and intern a trial list. One bad entry rejects the whole list.
pub fn build_trials(specs: &[TrialSpec], catalog: &mut ImageCatalog) -> Result<Vec<Trial>, TrialError> {
    specs
        .iter()
        .map(|spec| Trial::new(&spec.target, &spec.distractor, catalog))
        .collect()
}
