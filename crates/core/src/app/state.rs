use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{
    error::{ClientError, ValidationError, user_message},
    options::OptionSelection,
    types::{AnalysisRequest, AnalysisResult, HealthStatus, HistoryList},
};

use super::{Effect, Msg, RequestId};

pub const EMPTY_HISTORY_MESSAGE: &str = "No videos analyzed yet.";

/// Outcome of the last `/health` probe.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BackendStatus {
    #[default]
    Unknown,
    Healthy,
    Unhealthy(String),
    Unreachable,
}

impl BackendStatus {
    pub fn from_health(result: &Result<HealthStatus, ClientError>) -> Self {
        match result {
            Ok(health) if health.is_healthy() => BackendStatus::Healthy,
            Ok(health) => {
                let missing = health.missing_components();
                if missing.is_empty() {
                    BackendStatus::Unhealthy(health.status.clone())
                } else {
                    BackendStatus::Unhealthy(format!("missing {}", missing.join(", ")))
                }
            }
            Err(err) if err.is_connectivity() => BackendStatus::Unreachable,
            Err(err) => BackendStatus::Unhealthy(err.to_string()),
        }
    }
}

/// The URL form: text field plus option selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub url: String,
    pub selection: OptionSelection,
    /// Message from the URL check, shown under the field.
    pub hint: Option<String>,
}

impl FormState {
    fn validate(&self) -> Result<AnalysisRequest, ValidationError> {
        let request = AnalysisRequest::new(&self.url, self.selection.to_vec())?;
        if url::Url::parse(&request.url).is_err() {
            return Err(ValidationError::MalformedUrl { input: request.url });
        }
        Ok(request)
    }
}

/// Everything the UI shows, owned by one place and changed only through
/// [`AppState::update`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub form: FormState,
    pub dark_mode: bool,
    pub history_open: bool,
    pub loading: bool,
    pub current_result: Option<AnalysisResult>,
    pub history: HistoryList,
    /// Blocking alert text; the UI shows it until dismissed.
    pub alert: Option<String>,
    pub backend: BackendStatus,
    in_flight: Option<RequestId>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state plus the startup requests.
    pub fn boot() -> (Self, Vec<Effect>) {
        (Self::new(), vec![Effect::FetchHistory, Effect::CheckHealth])
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Text shown in place of the history list when it is empty.
    pub fn history_placeholder(&self) -> Option<&'static str> {
        self.history.is_empty().then_some(EMPTY_HISTORY_MESSAGE)
    }

    /// Submit is disabled while an analysis runs or the field is empty.
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.form.url.trim().is_empty()
    }

    pub fn update(&mut self, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::UrlChanged(url) => {
                self.form.url = url;
                self.form.hint = None;
                Vec::new()
            }
            Msg::OptionToggled(option) => {
                self.form.selection.toggle(option);
                Vec::new()
            }
            Msg::SubmitClicked => self.submit(),
            Msg::CancelAnalysis => {
                if let Some(request_id) = self.in_flight.take() {
                    info!("analysis {} cancelled", request_id);
                    self.loading = false;
                }
                Vec::new()
            }
            Msg::AnalysisFinished { request_id, result } => {
                self.finish_analysis(request_id, result)
            }
            Msg::HistoryLoaded(history) => {
                debug!("history loaded with {} entries", history.len());
                self.history = history;
                Vec::new()
            }
            Msg::HistoryFailed(err) => {
                warn!("Failed to fetch history: {}", err);
                Vec::new()
            }
            Msg::HealthChecked(result) => {
                self.backend = BackendStatus::from_health(&result);
                if let Err(err) = &result {
                    warn!("health check failed: {}", err);
                }
                Vec::new()
            }
            Msg::ToggleDarkMode => {
                self.dark_mode = !self.dark_mode;
                Vec::new()
            }
            Msg::OpenHistory => {
                self.history_open = true;
                Vec::new()
            }
            Msg::CloseHistory => {
                self.history_open = false;
                Vec::new()
            }
            Msg::HistoryEntrySelected(index) => {
                self.select_history_entry(index);
                Vec::new()
            }
            Msg::OpenLink(link) => vec![Effect::OpenLink(link)],
            Msg::DismissAlert => {
                self.alert = None;
                Vec::new()
            }
        }
    }

    fn submit(&mut self) -> Vec<Effect> {
        if self.loading {
            return Vec::new();
        }

        let request = match self.form.validate() {
            Ok(request) => request,
            Err(ValidationError::EmptyUrl) => return Vec::new(),
            Err(err @ ValidationError::MalformedUrl { .. }) => {
                self.form.hint = Some(err.to_string());
                return Vec::new();
            }
        };

        let request_id = Uuid::new_v4();
        self.loading = true;
        self.current_result = None;
        self.in_flight = Some(request_id);
        vec![Effect::Analyze {
            request_id,
            request,
        }]
    }

    fn finish_analysis(
        &mut self,
        request_id: RequestId,
        result: Result<AnalysisResult, ClientError>,
    ) -> Vec<Effect> {
        if self.in_flight != Some(request_id) {
            debug!("dropping stale analysis response {}", request_id);
            return Vec::new();
        }
        self.in_flight = None;
        self.loading = false;

        match result {
            Ok(result) => {
                self.current_result = Some(result);
                vec![Effect::FetchHistory]
            }
            Err(err) => {
                error!("analysis failed: {:?}", err);
                self.alert = Some(user_message(&err));
                Vec::new()
            }
        }
    }

    /// Shows the entry as the current result and closes the sidebar.
    fn select_history_entry(&mut self, index: usize) {
        match self.history.get(index) {
            Some(entry) => {
                self.current_result = Some(entry.clone());
                self.history_open = false;
            }
            None => warn!("history row {} out of range", index),
        }
    }
}
