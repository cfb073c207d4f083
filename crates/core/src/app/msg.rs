use crate::{
    error::ClientError,
    types::{AnalysisResult, HealthStatus, HistoryList, OutputOption},
};

use super::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL field.
    UrlChanged(String),
    /// User clicked one of the four option cards.
    OptionToggled(OutputOption),
    /// User submitted the form.
    SubmitClicked,
    /// User abandoned the in-flight analysis.
    CancelAnalysis,
    /// Backend answered (or failed) an analysis request.
    AnalysisFinished {
        request_id: RequestId,
        result: Result<AnalysisResult, ClientError>,
    },
    HistoryLoaded(HistoryList),
    HistoryFailed(ClientError),
    HealthChecked(Result<HealthStatus, ClientError>),
    ToggleDarkMode,
    OpenHistory,
    /// Close button or backdrop click.
    CloseHistory,
    /// User picked the history row at this index. Ids are not unique: a
    /// video analysed twice appears twice under the same id.
    HistoryEntrySelected(usize),
    /// User clicked a generated document link.
    OpenLink(String),
    /// User acknowledged the alert dialog.
    DismissAlert,
}
