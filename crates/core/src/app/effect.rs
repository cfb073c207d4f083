use crate::types::AnalysisRequest;

use super::RequestId;

/// Side effects requested by [`super::AppState::update`], executed by the
/// front end that owns the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// `POST /analyze`; answer with `Msg::AnalysisFinished` carrying the same id.
    Analyze {
        request_id: RequestId,
        request: AnalysisRequest,
    },
    /// `GET /history`; answer with `Msg::HistoryLoaded` or `Msg::HistoryFailed`.
    FetchHistory,
    /// `GET /health`; answer with `Msg::HealthChecked`.
    CheckHealth,
    /// Open a download link outside the application.
    OpenLink(String),
}
