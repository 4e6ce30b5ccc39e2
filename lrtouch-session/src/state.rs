use std::time::Duration;

use lrtouch_catalog::{label, Atom, ImageCatalog};
use lrtouch_core::{
    ChoiceView, Feedback, Layout, LogEntry, Presenter, Response, SessionStatus, Trial, TrialState,
    TrialView,
};
use lrtouch_timing::{iso_timestamp, Timer};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::accuracy::Accuracy;
use crate::config::{build_trials, SessionConfig, TrialSpec};
use crate::layout::compute_layout;
use crate::log::SessionLog;
use crate::queue::EventQueue;
use crate::shuffle::shuffled;
use crate::trial::Presentation;

pub const CORRECT_TEXT: &str = "Great work!";
pub const COMPLETE_TEXT: &str = "Session complete!";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Response(Response),
    FeedbackElapsed,
    Restart,
}

/// Presents trials, scores touches and repeats a trial until it is answered
/// correctly.
///
/// All session state lives here and only changes through the methods below.
/// Feedback delays are queued against the runner's own [`Timer`]; the caller
/// drains them with [`TrialRunner::run_due_events`].
pub struct TrialRunner<T, R, P>
where
    T: Timer<Timestamp = u64>,
    R: Rng,
    P: Presenter,
{
    config: SessionConfig,
    catalog: ImageCatalog,
    trials: Vec<Trial>,
    timer: T,
    rng: R,
    presenter: P,
    state: TrialState,
    order: Vec<Trial>,
    current_index: usize,
    current: Option<Presentation<u64>>,
    correct_count: usize,
    total_responses: usize,
    log: SessionLog,
    queue: EventQueue,
    speak_instructions: bool,
}

impl<T, R, P> TrialRunner<T, R, P>
where
    T: Timer<Timestamp = u64>,
    R: Rng,
    P: Presenter,
{
    pub fn new(
        trials: Vec<Trial>,
        catalog: ImageCatalog,
        config: SessionConfig,
        timer: T,
        rng: R,
        presenter: P,
    ) -> Self {
        let speak_instructions = config.speak_instructions;
        Self {
            config,
            catalog,
            trials,
            timer,
            rng,
            presenter,
            state: TrialState::default(),
            order: Vec::new(),
            current_index: 0,
            current: None,
            correct_count: 0,
            total_responses: 0,
            log: SessionLog::new(),
            queue: EventQueue::new(),
            speak_instructions,
        }
    }

    /// Build from raw trial specs. An invalid list leaves the runner with no
    /// trials, so the session completes as soon as it starts.
    pub fn from_specs(specs: &[TrialSpec], config: SessionConfig, timer: T, rng: R, presenter: P) -> Self {
        let mut catalog = config.catalog();
        let trials = match build_trials(specs, &mut catalog) {
            Ok(trials) => trials,
            Err(e) => {
                warn!(error = %e, "rejecting trial list, session will have no trials");
                Vec::new()
            }
        };
        Self::new(trials, catalog, config, timer, rng, presenter)
    }

    pub fn start(&mut self, reset_log: bool) {
        self.queue.clear();
        self.order = shuffled(&self.trials, &mut self.rng);
        self.current_index = 0;
        self.current = None;
        self.correct_count = 0;
        self.total_responses = 0;
        if reset_log {
            self.log.clear();
        }
        info!(trials = self.order.len(), reset_log, "session started");

        if self.order.is_empty() {
            self.complete();
        } else {
            self.present();
        }
    }

    pub fn restart(&mut self) {
        info!(state = ?self.state, "restart requested");
        self.start(true);
    }

    /// Show `order[current_index]` with a freshly drawn layout and start its
    /// reaction-time clock.
    ///
    /// Does nothing before the session has been started.
    pub fn present_current_trial(&mut self) {
        if self.state == TrialState::Idle {
            debug!("no session started, nothing to present");
            return;
        }
        self.present();
    }

    fn present(&mut self) {
        let Some(trial) = self.order.get(self.current_index).cloned() else {
            self.complete();
            return;
        };
        // anything still pending belongs to the previous screen
        self.queue.clear();
        if self.state.shows_overlay() {
            self.presenter.clear_feedback();
        }

        let layout = compute_layout(&trial, &mut self.rng);
        let view = self.trial_view(&trial, &layout);
        self.state = TrialState::Presenting;
        self.presenter.show_trial(&view);

        if self.speak_instructions {
            let request = self.config.speech(trial.spoken_instruction());
            if let Err(e) = self.presenter.speak(&request) {
                debug!(error = %e, "dropping spoken instruction");
            }
        }

        info!(
            trial = self.current_index + 1,
            of = self.order.len(),
            target = %trial.target,
            correct_side = layout.correct_side.as_str(),
            "trial presented"
        );
        self.current = Some(Presentation {
            index: self.current_index,
            trial,
            layout,
            started_at: self.timer.now(),
        });
    }

    /// Score a touch on the visible trial. Returns `false` and changes nothing
    /// when no trial is waiting for a response.
    pub fn submit_response(&mut self, response: Response) -> bool {
        if !self.state.accepts_response() {
            debug!(%response, state = ?self.state, "ignoring response outside a trial");
            return false;
        }
        let Some(current) = &self.current else {
            return false;
        };

        let correct = current.layout.is_correct(response);
        let rt = self.timer.elapsed(current.started_at);
        let reaction_time_ms = ((rt.as_nanos() + 500_000) / 1_000_000) as u64;
        let entry = LogEntry {
            timestamp: iso_timestamp(self.timer.wall_clock()),
            trial_index: current.index + 1,
            target: current.trial.target.to_string(),
            left: current.layout.left.to_string(),
            right: current.layout.right.to_string(),
            response,
            correct,
            reaction_time_ms,
        };
        info!(
            trial = entry.trial_index,
            %response,
            correct,
            rt_ms = reaction_time_ms,
            "response recorded"
        );
        self.log.push(entry);

        self.total_responses += 1;
        let (state, feedback, delay_ms) = if correct {
            self.correct_count += 1;
            (
                TrialState::FeedbackCorrect,
                Feedback::Correct {
                    text: CORRECT_TEXT.to_string(),
                },
                self.config.correct_feedback_ms,
            )
        } else {
            (
                TrialState::FeedbackIncorrect,
                Feedback::Incorrect,
                self.config.incorrect_feedback_ms,
            )
        };
        self.state = state;

        let status = self.status();
        self.presenter.update_status(&status);
        self.presenter.show_feedback(&feedback);

        let due = self.timer.now() + Duration::from_millis(delay_ms).as_nanos() as u64;
        self.queue.schedule(due, SessionEvent::FeedbackElapsed);
        true
    }

    /// Due events, removed from the queue
    pub fn update(&mut self) -> Vec<SessionEvent> {
        self.queue.pop_due(self.timer.now())
    }

    pub fn handle_event(&mut self, event: SessionEvent) -> bool {
        match event {
            SessionEvent::Response(response) => self.submit_response(response),
            SessionEvent::FeedbackElapsed => self.resolve_feedback(),
            SessionEvent::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Handle every event whose deadline has passed; returns how many took effect.
    pub fn run_due_events(&mut self) -> usize {
        let events = self.update();
        events
            .into_iter()
            .filter(|event| self.handle_event(event.clone()))
            .count()
    }

    fn resolve_feedback(&mut self) -> bool {
        match self.state {
            TrialState::FeedbackCorrect => {
                self.current_index += 1;
                if self.current_index >= self.order.len() {
                    self.complete();
                } else {
                    self.present();
                }
                true
            }
            TrialState::FeedbackIncorrect => {
                debug!(trial = self.current_index + 1, "repeating trial after error");
                self.present();
                true
            }
            _ => false,
        }
    }

    fn complete(&mut self) {
        if self.state.shows_overlay() {
            self.presenter.clear_feedback();
        }
        self.queue.clear();
        self.current = None;
        self.current_index = self.order.len();
        self.state = TrialState::Complete;

        let status = self.status();
        self.presenter.update_status(&status);
        self.presenter.show_feedback(&Feedback::Complete {
            text: COMPLETE_TEXT.to_string(),
            summary: self.summary(),
        });
        info!(
            trials = self.order.len(),
            responses = self.total_responses,
            correct = self.correct_count,
            "session complete"
        );
    }

    fn trial_view(&self, trial: &Trial, layout: &Layout) -> TrialView {
        TrialView {
            instruction: trial.instruction(),
            left: self.choice(&layout.left),
            right: self.choice(&layout.right),
            status: self.status(),
        }
    }

    fn choice(&self, image: &Atom) -> ChoiceView {
        ChoiceView {
            image: image.clone(),
            asset: self.catalog.asset_path(image),
            label: label(image),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} trials in {} responses. {}",
            self.order.len(),
            self.total_responses,
            self.accuracy()
        )
    }

    pub fn status(&self) -> SessionStatus {
        let trial_count = self.order.len();
        let trial_number = (self.current_index + 1).min(trial_count);
        SessionStatus {
            trial_number,
            trial_count,
            counter: format!("Trial {trial_number} of {trial_count}"),
            accuracy: self.accuracy().to_string(),
        }
    }

    pub fn accuracy(&self) -> Accuracy {
        Accuracy::new(self.correct_count, self.total_responses)
    }

    pub fn state(&self) -> TrialState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn order(&self) -> &[Trial] {
        &self.order
    }

    pub fn trials(&self) -> &[Trial] {
        &self.trials
    }

    pub fn current_trial(&self) -> Option<&Trial> {
        self.current.as_ref().map(|p| &p.trial)
    }

    pub fn current_layout(&self) -> Option<&Layout> {
        self.current.as_ref().map(|p| &p.layout)
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn total_responses(&self) -> usize {
        self.total_responses
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    pub fn export_records(&self) -> Vec<LogEntry> {
        self.log.export_records()
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Takes effect from the next presentation.
    pub fn set_speak_instructions(&mut self, enabled: bool) {
        self.speak_instructions = enabled;
    }

    pub fn speaks_instructions(&self) -> bool {
        self.speak_instructions
    }

    /// Time left until the next queued event, if any
    pub fn time_until_next_event(&self) -> Option<Duration> {
        self.queue
            .next_due()
            .map(|due| Duration::from_nanos(due.saturating_sub(self.timer.now())))
    }
}
