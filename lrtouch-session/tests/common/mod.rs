#![allow(dead_code)]

use lrtouch_core::{Feedback, Presenter, SessionStatus, SpeechError, SpeechRequest, TrialView};
use lrtouch_session::{SessionConfig, TrialRunner, TrialSpec};
use lrtouch_timing::ManualTimer;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub views: Vec<TrialView>,
    pub statuses: Vec<SessionStatus>,
    pub feedback: Vec<Feedback>,
    pub cleared: usize,
    pub spoken: Vec<SpeechRequest>,
    pub speech_available: bool,
}

impl RecordingPresenter {
    pub fn with_speech() -> Self {
        Self {
            speech_available: true,
            ..Self::default()
        }
    }
}

impl Presenter for RecordingPresenter {
    fn show_trial(&mut self, view: &TrialView) {
        self.views.push(view.clone());
    }

    fn update_status(&mut self, status: &SessionStatus) {
        self.statuses.push(status.clone());
    }

    fn show_feedback(&mut self, feedback: &Feedback) {
        self.feedback.push(feedback.clone());
    }

    fn clear_feedback(&mut self) {
        self.cleared += 1;
    }

    fn speak(&mut self, request: &SpeechRequest) -> Result<(), SpeechError> {
        if !self.speech_available {
            return Err(SpeechError::Unavailable);
        }
        self.spoken.push(request.clone());
        Ok(())
    }
}

pub type TestRunner = TrialRunner<ManualTimer, StdRng, RecordingPresenter>;

pub fn specs(pairs: &[(&str, &str)]) -> Vec<TrialSpec> {
    pairs.iter().map(|(t, d)| TrialSpec::new(*t, *d)).collect()
}

pub fn quiet_config() -> SessionConfig {
    SessionConfig {
        speak_instructions: false,
        ..SessionConfig::default()
    }
}

/// Runner plus a handle on its clock
pub fn runner(pairs: &[(&str, &str)], seed: u64) -> (TestRunner, ManualTimer) {
    runner_with(pairs, seed, quiet_config(), RecordingPresenter::default())
}

pub fn runner_with(
    pairs: &[(&str, &str)],
    seed: u64,
    config: SessionConfig,
    presenter: RecordingPresenter,
) -> (TestRunner, ManualTimer) {
    let timer = ManualTimer::default();
    let runner = TrialRunner::from_specs(
        &specs(pairs),
        config,
        timer.clone(),
        StdRng::seed_from_u64(seed),
        presenter,
    );
    (runner, timer)
}
