//! Application state machine shared by the desktop and CLI front ends.

mod effect;
mod msg;
mod runner;
mod state;

pub use effect::Effect;
pub use msg::Msg;
pub use runner::{drive, execute};
pub use state::{AppState, BackendStatus, EMPTY_HISTORY_MESSAGE, FormState};

/// Correlates an analysis request with its completion.
pub type RequestId = uuid::Uuid;
