pub mod accuracy;
pub mod config;
pub mod layout;
pub mod log;
pub mod queue;
pub mod shuffle;
pub mod state;
pub mod trial;

pub use accuracy::Accuracy;
pub use config::{build_trials, ConfigError, SessionConfig, SessionFile, TrialSpec};
pub use layout::compute_layout;
pub use log::{export_file_name, ExportError, SessionLog};
pub use queue::EventQueue;
pub use shuffle::shuffled;
pub use state::{SessionEvent, TrialRunner};
pub use trial::Presentation;
