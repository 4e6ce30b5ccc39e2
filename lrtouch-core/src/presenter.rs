use lrtouch_catalog::Atom;
use thiserror::Error;

/// One choice button as the screen shows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceView {
    pub image: Atom,
    /// Asset path, e.g. `images/cat.png`
    pub asset: String,
    /// Upper-cased caption under the image
    pub label: String,
}

/// Counter and accuracy line, re-emitted on every change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatus {
    /// 1-based; equals `trial_count` once the session is complete
    pub trial_number: usize,
    pub trial_count: usize,
    pub counter: String,
    pub accuracy: String,
}

/// Everything needed to draw a trial that is waiting for a touch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialView {
    pub instruction: String,
    pub left: ChoiceView,
    pub right: ChoiceView,
    pub status: SessionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct { text: String },
    Incorrect,
    Complete { text: String, summary: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechError {
    #[error("speech synthesis is not available")]
    Unavailable,
    #[error("speech synthesis failed: {0}")]
    Failed(String),
}

/// Screen and speaker the trial runner drives.
///
/// The runner only calls into this; it never draws or speaks itself.
pub trait Presenter {
    fn show_trial(&mut self, view: &TrialView);

    fn update_status(&mut self, status: &SessionStatus);

    fn show_feedback(&mut self, feedback: &Feedback);

    /// Called when a feedback screen is taken down.
    fn clear_feedback(&mut self) {}

    /// Speak an instruction, cancelling anything still being spoken.
    fn speak(&mut self, _request: &SpeechRequest) -> Result<(), SpeechError> {
        Err(SpeechError::Unavailable)
    }
}
