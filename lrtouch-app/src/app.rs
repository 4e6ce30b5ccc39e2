use anyhow::{Context, Result};
use lrtouch_core::Response;
use lrtouch_session::{export_file_name, SessionEvent, TrialRunner};
use lrtouch_timing::{HighPrecisionTimer, Timer};
use rand::rngs::ThreadRng;
use std::io::{self, BufRead, Stdout};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::presenter::TerminalPresenter;

const IDLE_POLL: Duration = Duration::from_millis(250);

pub type Runner = TrialRunner<HighPrecisionTimer, ThreadRng, TerminalPresenter<Stdout>>;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Touch(Response),
    Restart,
    Export,
    ExportJson,
    Speak(bool),
    Status,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim().to_ascii_lowercase();
        Some(match line.as_str() {
            "restart" => Command::Restart,
            "export" | "csv" => Command::Export,
            "json" => Command::ExportJson,
            "speak on" => Command::Speak(true),
            "speak off" => Command::Speak(false),
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => Command::Touch(other.parse().ok()?),
        })
    }
}

pub struct App {
    runner: Runner,
    export_dir: PathBuf,
    should_exit: bool,
}

impl App {
    pub fn new(runner: Runner, export_dir: PathBuf) -> Self {
        Self {
            runner,
            export_dir,
            should_exit: false,
        }
    }

    pub fn run(mut self) -> Result<()> {
        println!("=== LEFT/RIGHT TOUCH TRAINER ===");
        println!("Platform: {}", std::env::consts::OS);
        Self::print_help();

        let input = Self::spawn_input();
        self.runner.start(true);

        while !self.should_exit {
            let wait = self.runner.time_until_next_event().unwrap_or(IDLE_POLL);
            match input.recv_timeout(wait) {
                Ok(line) => self.handle_input(&line),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => match self.runner.time_until_next_event() {
                    // let pending feedback finish before leaving
                    Some(wait) => self.runner.timer().sleep(wait),
                    None => self.should_exit = true,
                },
            }
            self.runner.run_due_events();
        }

        self.cleanup_and_exit();
        Ok(())
    }

    fn spawn_input() -> Receiver<String> {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        rx
    }

    fn handle_input(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        let Some(command) = Command::parse(line) else {
            println!("  unknown input {:?}, type help", line.trim());
            return;
        };
        match command {
            Command::Touch(response) => {
                if !self.runner.handle_event(SessionEvent::Response(response)) {
                    debug!(%response, "touch ignored");
                }
            }
            Command::Restart => {
                self.runner.handle_event(SessionEvent::Restart);
            }
            Command::Export => self.report_export("csv"),
            Command::ExportJson => self.report_export("json"),
            Command::Speak(enabled) => {
                self.runner.set_speak_instructions(enabled);
                println!("  spoken instructions {}", if enabled { "on" } else { "off" });
            }
            Command::Status => {
                let status = self.runner.status();
                println!("  {}  |  {}", status.counter, status.accuracy);
            }
            Command::Help => Self::print_help(),
            Command::Quit => self.should_exit = true,
        }
    }

    fn report_export(&self, extension: &str) {
        match self.export(extension) {
            Ok(path) => println!(
                "  exported {} records to {}",
                self.runner.log().len(),
                path.display()
            ),
            Err(e) => warn!("export failed: {e:#}"),
        }
    }

    fn export(&self, extension: &str) -> Result<PathBuf> {
        let millis = self.runner.timer().wall_clock().timestamp_millis();
        let path = self.export_dir.join(export_file_name(millis, extension));
        std::fs::create_dir_all(&self.export_dir)
            .with_context(|| format!("failed to create {}", self.export_dir.display()))?;
        let log = self.runner.log();
        let written = match extension {
            "json" => log.write_json(&path),
            _ => log.write_csv(&path),
        };
        written.with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), records = log.len(), "session log exported");
        Ok(path)
    }

    fn print_help() {
        println!("Touch with l (left), r (right) or o (outside the choices).");
        println!("Commands: restart, export, json, speak on|off, status, help, quit\n");
    }

    fn cleanup_and_exit(&self) {
        let status = self.runner.status();
        info!(
            responses = self.runner.total_responses(),
            accuracy = %status.accuracy,
            "exiting"
        );
        println!("\nSession closed. Use export before quitting to keep the log.");
    }
}
