pub mod layout;
pub mod presenter;
pub mod state;
pub mod trial;

pub use layout::{Layout, ParseResponseError, Response, Side};
pub use presenter::{ChoiceView, Feedback, Presenter, SessionStatus, SpeechError, SpeechRequest, TrialView};
pub use state::TrialState;
pub use trial::{LogEntry, Trial, TrialError};
