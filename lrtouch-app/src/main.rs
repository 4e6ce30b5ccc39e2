mod app;
mod presenter;

use std::path::{Path, PathBuf};

use app::App;
use clap::Parser;
use lrtouch_session::{SessionFile, TrialRunner};
use lrtouch_timing::HighPrecisionTimer;
use presenter::TerminalPresenter;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

/// Two-choice "touch the target" trainer with correction trials
#[derive(Debug, Parser)]
#[command(name = "lrtouch", version)]
struct Args {
    /// Session file (.toml or .json) holding the trial list
    #[arg(long)]
    trials: Option<PathBuf>,

    /// Do not speak instructions
    #[arg(long)]
    no_speak: bool,

    /// Where exported logs are written
    #[arg(long, default_value = ".")]
    export_dir: PathBuf,

    /// Correct feedback duration in milliseconds
    #[arg(long)]
    correct_ms: Option<u64>,

    /// Error feedback duration in milliseconds, including the return pause
    #[arg(long)]
    incorrect_ms: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let file = load_session(args.trials.as_deref());
    let mut config = file.session;
    if args.no_speak {
        config.speak_instructions = false;
    }
    if let Some(ms) = args.correct_ms {
        config.correct_feedback_ms = ms;
    }
    if let Some(ms) = args.incorrect_ms {
        config.incorrect_feedback_ms = ms;
    }

    let runner = TrialRunner::from_specs(
        &file.trials,
        config,
        HighPrecisionTimer::new(),
        rand::rng(),
        TerminalPresenter::stdout(true),
    );
    App::new(runner, args.export_dir).run()
}

fn load_session(path: Option<&Path>) -> SessionFile {
    match path {
        Some(path) => SessionFile::load(path).unwrap_or_else(|e| {
            error!(error = %e, "could not load session file, starting with no trials");
            SessionFile::default()
        }),
        None => {
            warn!("no --trials file given, starting with no trials");
            SessionFile::default()
        }
    }
}

/// Logs go to stderr; stdout is the trial screen.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
