use std::fmt;
use std::io::{self, Stdout, Write};

use lrtouch_core::{Feedback, Presenter, SessionStatus, SpeechError, SpeechRequest, TrialView};
use tracing::debug;

/// Draws trials as text. Speech is echoed as a line when enabled; there is
/// no synthesizer behind it.
pub struct TerminalPresenter<W: Write> {
    out: W,
    echo_speech: bool,
}

impl TerminalPresenter<Stdout> {
    pub fn stdout(echo_speech: bool) -> Self {
        Self::new(io::stdout(), echo_speech)
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, echo_speech: bool) -> Self {
        Self { out, echo_speech }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = self.out.write_fmt(args).and_then(|_| self.out.write_all(b"\n")) {
            debug!(error = %e, "terminal write failed");
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn show_trial(&mut self, view: &TrialView) {
        self.line(format_args!(""));
        self.line(format_args!("{}  |  {}", view.status.counter, view.status.accuracy));
        self.line(format_args!("  {}", view.instruction));
        self.line(format_args!(
            "  [L] {:<12} {:<24} [R] {:<12} {}",
            view.left.label, view.left.asset, view.right.label, view.right.asset
        ));
    }

    fn update_status(&mut self, status: &SessionStatus) {
        self.line(format_args!("  {}  |  {}", status.counter, status.accuracy));
    }

    fn show_feedback(&mut self, feedback: &Feedback) {
        match feedback {
            Feedback::Correct { text } => self.line(format_args!("  ⭐ {text}")),
            Feedback::Incorrect => self.line(format_args!("  ✖")),
            Feedback::Complete { text, summary } => {
                self.line(format_args!(""));
                self.line(format_args!("  ✅ {text}"));
                self.line(format_args!("  {summary}"));
            }
        }
    }

    fn speak(&mut self, request: &SpeechRequest) -> Result<(), SpeechError> {
        if !self.echo_speech {
            return Err(SpeechError::Unavailable);
        }
        self.line(format_args!("  (says) {}", request.text));
        Ok(())
    }
}
