/// States of the trial runner
#[derive(Copy, Debug, Clone, PartialEq, Eq)]
pub enum TrialState {
    Idle,
    Presenting,
    FeedbackCorrect,
    FeedbackIncorrect,
    Complete,
}

impl Default for TrialState {
    fn default() -> Self {
        TrialState::Idle
    }
}

impl TrialState {
    /// Only a visible trial takes responses; feedback screens swallow input.
    pub fn accepts_response(&self) -> bool {
        matches!(self, Self::Presenting)
    }

    pub fn is_feedback(&self) -> bool {
        matches!(self, Self::FeedbackCorrect | Self::FeedbackIncorrect)
    }

    /// Feedback and completion screens sit over the trial until taken down.
    pub fn shows_overlay(&self) -> bool {
        self.is_feedback() || self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}
