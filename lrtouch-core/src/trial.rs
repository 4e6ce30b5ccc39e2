use lrtouch_catalog::{Atom, ImageCatalog};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::Response;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrialError {
    #[error("trial has an empty target")]
    EmptyTarget,
    #[error("trial has an empty distractor")]
    EmptyDistractor,
    #[error("target and distractor are both {0:?}")]
    SameImage(String),
    #[error("image {0:?} is not in the catalog")]
    UnknownImage(String),
}

/// One target/distractor pair to discriminate
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Trial {
    pub target: Atom,
    pub distractor: Atom,
}

impl Trial {
    /// Build a trial from two image names, interning both in `catalog`.
    pub fn new(target: &str, distractor: &str, catalog: &mut ImageCatalog) -> Result<Self, TrialError> {
        if target.trim().is_empty() {
            return Err(TrialError::EmptyTarget);
        }
        if distractor.trim().is_empty() {
            return Err(TrialError::EmptyDistractor);
        }
        let target = catalog
            .intern(target)
            .ok_or_else(|| TrialError::UnknownImage(target.trim().to_string()))?;
        let distractor = catalog
            .intern(distractor)
            .ok_or_else(|| TrialError::UnknownImage(distractor.trim().to_string()))?;
        if target == distractor {
            return Err(TrialError::SameImage(target.to_string()));
        }
        Ok(Self { target, distractor })
    }

    /// On-screen instruction, e.g. "Touch the CAT"
    pub fn instruction(&self) -> String {
        format!("Touch the {}", self.target.to_uppercase())
    }

    /// Instruction as spoken, with the target as written
    pub fn spoken_instruction(&self) -> String {
        format!("Touch the {}", self.target)
    }
}

/// One response attempt. Never mutated after it is logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// ISO-8601 UTC wall-clock time of the response
    pub timestamp: String,
    /// 1-based position of the trial in the session order
    pub trial_index: usize,
    pub target: String,
    pub left: String,
    pub right: String,
    pub response: Response,
    pub correct: bool,
    #[serde(rename = "rtMs")]
    pub reaction_time_ms: u64,
}
