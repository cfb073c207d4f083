//! VideoInsight Core Library
//!
//! Client side of the video analysis service: wire types, the HTTP backend
//! client, document classification and the UI state machine.

pub mod app;
pub mod client;
pub mod config;
pub mod documents;
pub mod error;
pub mod format;
pub mod options;
pub mod types;

// Re-export commonly used items at crate root
pub use app::{
    AppState, BackendStatus, EMPTY_HISTORY_MESSAGE, Effect, FormState, Msg, RequestId, drive,
    execute,
};
pub use client::{Backend, ReqwestBackend, download_to, entry_download_dir, extract_detail};
pub use config::ClientConfig;
pub use documents::{DocumentKind, FileEntry, file_entries};
pub use error::{
    CONNECT_MESSAGE, ClientError, FALLBACK_MESSAGE, Result, ValidationError, user_message,
};
pub use format::{format_date, format_health, format_history_line, format_result_readable};
pub use options::OptionSelection;
pub use types::{AnalysisRequest, AnalysisResult, HealthStatus, HistoryList, OutputOption};
