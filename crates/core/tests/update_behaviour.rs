use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use videoinsight_core::{
    AnalysisRequest, AnalysisResult, AppState, BackendStatus, CONNECT_MESSAGE, ClientError,
    EMPTY_HISTORY_MESSAGE, Effect, HealthStatus, Msg, OutputOption, RequestId,
};

fn sample_result(id: &str, title: &str) -> AnalysisResult {
    AnalysisResult {
        id: id.to_string(),
        title: title.to_string(),
        date: "20240131".to_string(),
        thumbnail: format!("https://i.ytimg.com/vi/{id}/hqdefault.jpg"),
        files: BTreeMap::from([
            (
                "summary_pdf".to_string(),
                format!("/download/{id}/summary.pdf"),
            ),
            ("guide_pdf".to_string(), format!("/download/{id}/guide.pdf")),
        ]),
        url: None,
        report_date: None,
        dir_name: None,
    }
}

fn submit(state: &mut AppState, url: &str) -> Vec<Effect> {
    state.update(Msg::UrlChanged(url.to_string()));
    state.update(Msg::SubmitClicked)
}

fn analyze_id(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Analyze { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("analyze effect")
}

#[test]
fn boot_fetches_history_and_health() {
    let (state, effects) = AppState::boot();
    assert_eq!(effects, vec![Effect::FetchHistory, Effect::CheckHealth]);
    assert!(!state.loading);
    assert!(!state.dark_mode);
    assert!(!state.history_open);
    assert!(state.current_result.is_none());
}

#[test]
fn empty_url_never_issues_a_request() {
    let mut state = AppState::new();
    assert!(state.update(Msg::SubmitClicked).is_empty());
    assert!(submit(&mut state, "   ").is_empty());
    assert!(!state.loading);
    assert!(!state.can_submit());
}

#[test]
fn malformed_url_sets_hint_without_request() {
    let mut state = AppState::new();
    let effects = submit(&mut state, "youtube.com/watch?v=abc");
    assert!(effects.is_empty());
    assert_eq!(state.form.hint.as_deref(), Some("Please enter a URL."));
    assert!(!state.loading);

    state.update(Msg::UrlChanged("https://youtube.com/watch?v=abc".into()));
    assert_eq!(state.form.hint, None);
}

#[test]
fn submit_sends_url_and_selected_options() {
    let mut state = AppState::new();
    state.update(Msg::OptionToggled(OutputOption::TranscriptionEs));
    let effects = submit(&mut state, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");

    let request_id = analyze_id(&effects);
    assert_eq!(
        effects,
        vec![Effect::Analyze {
            request_id,
            request: AnalysisRequest {
                url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
                options: vec![
                    OutputOption::Summary,
                    OutputOption::Guide,
                    OutputOption::TranscriptionEs,
                ],
            },
        }]
    );
    assert_eq!(state.form.url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
}

#[test]
fn loading_spans_submission_to_success() {
    let mut state = AppState::new();
    let previous = sample_result("old", "Previous");
    state.update(Msg::HistoryLoaded(vec![previous.clone()]));
    state.update(Msg::HistoryEntrySelected(0));
    assert_eq!(state.current_result, Some(previous));

    let effects = submit(&mut state, "https://youtu.be/abc");
    let request_id = analyze_id(&effects);
    assert!(state.loading);
    assert!(state.current_result.is_none());
    assert!(!state.can_submit());

    let fresh = sample_result("new", "Fresh");
    let effects = state.update(Msg::AnalysisFinished {
        request_id,
        result: Ok(fresh.clone()),
    });
    assert!(!state.loading);
    assert_eq!(state.current_result, Some(fresh));
    assert_eq!(effects, vec![Effect::FetchHistory]);
}

#[test]
fn second_submit_while_loading_is_ignored() {
    let mut state = AppState::new();
    let first = submit(&mut state, "https://youtu.be/abc");
    assert_eq!(first.len(), 1);
    assert!(state.update(Msg::SubmitClicked).is_empty());
    assert_eq!(state.in_flight(), Some(analyze_id(&first)));
}

#[test]
fn server_detail_is_alerted_verbatim() {
    let mut state = AppState::new();
    let request_id = analyze_id(&submit(&mut state, "https://youtu.be/abc"));

    let effects = state.update(Msg::AnalysisFinished {
        request_id,
        result: Err(ClientError::Server {
            status: 500,
            detail: Some("X".into()),
            body: r#"{"detail":"X"}"#.into(),
        }),
    });
    assert!(effects.is_empty());
    assert!(!state.loading);
    assert_eq!(state.alert.as_deref(), Some("X"));

    state.update(Msg::DismissAlert);
    assert_eq!(state.alert, None);
}

#[test]
fn connectivity_failure_uses_fixed_message() {
    let mut state = AppState::new();
    let request_id = analyze_id(&submit(&mut state, "https://youtu.be/abc"));

    state.update(Msg::AnalysisFinished {
        request_id,
        result: Err(ClientError::Connect {
            url: "http://localhost:8000/analyze".into(),
            reason: "connection refused".into(),
        }),
    });
    assert_eq!(state.alert.as_deref(), Some(CONNECT_MESSAGE));
    assert!(!state.loading);
}

#[test]
fn cancelled_request_completion_is_dropped() {
    let mut state = AppState::new();
    let request_id = analyze_id(&submit(&mut state, "https://youtu.be/abc"));

    state.update(Msg::CancelAnalysis);
    assert!(!state.loading);
    assert_eq!(state.in_flight(), None);

    let before = state.clone();
    let effects = state.update(Msg::AnalysisFinished {
        request_id,
        result: Ok(sample_result("late", "Late")),
    });
    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn history_failure_keeps_existing_list() {
    let mut state = AppState::new();
    let history = vec![sample_result("a", "A"), sample_result("b", "B")];
    state.update(Msg::HistoryLoaded(history.clone()));
    assert_eq!(state.history, history);

    let effects = state.update(Msg::HistoryFailed(ClientError::Timeout {
        url: "http://localhost:8000/history".into(),
    }));
    assert!(effects.is_empty());
    assert_eq!(state.history, history);
    assert_eq!(state.alert, None);
}

#[test]
fn history_is_replaced_wholesale() {
    let mut state = AppState::new();
    state.update(Msg::HistoryLoaded(vec![sample_result("a", "A")]));
    state.update(Msg::HistoryLoaded(vec![sample_result("b", "B")]));
    let ids: Vec<_> = state.history.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["b"]);
}

#[test]
fn selecting_history_entry_shows_it_and_closes_sidebar() {
    let mut state = AppState::new();
    let history = vec![sample_result("a", "A"), sample_result("b", "B")];
    state.update(Msg::HistoryLoaded(history.clone()));
    state.update(Msg::OpenHistory);
    assert!(state.history_open);

    let effects = state.update(Msg::HistoryEntrySelected(1));
    assert!(effects.is_empty());
    assert_eq!(state.current_result, Some(history[1].clone()));
    assert!(!state.history_open);
}

#[test]
fn repeated_video_rows_are_selected_by_position() {
    let mut state = AppState::new();
    let mut older = sample_result("dQw4w9WgXcQ", "Same Video");
    older.files = BTreeMap::from([(
        "summary_pdf".to_string(),
        "/download/Same_Video_dQw4w9WgXcQ/summary.pdf".to_string(),
    )]);
    let mut newer = sample_result("dQw4w9WgXcQ", "Same Video");
    newer.files = BTreeMap::from([(
        "transcription_es".to_string(),
        "/download/Same_Video_dQw4w9WgXcQ/transcription_es.md".to_string(),
    )]);
    state.update(Msg::HistoryLoaded(vec![older.clone(), newer.clone()]));

    state.update(Msg::HistoryEntrySelected(1));
    assert_eq!(state.current_result, Some(newer));

    state.update(Msg::HistoryEntrySelected(0));
    assert_eq!(state.current_result, Some(older));
}

#[test]
fn empty_history_shows_placeholder_only() {
    let mut state = AppState::new();
    assert_eq!(state.history_placeholder(), Some(EMPTY_HISTORY_MESSAGE));
    assert_eq!(EMPTY_HISTORY_MESSAGE, "No videos analyzed yet.");

    state.update(Msg::HistoryLoaded(vec![sample_result("a", "A")]));
    assert_eq!(state.history_placeholder(), None);

    state.update(Msg::HistoryLoaded(Vec::new()));
    assert_eq!(state.history_placeholder(), Some(EMPTY_HISTORY_MESSAGE));
    assert!(state.history.is_empty());
}

#[test]
fn out_of_range_history_row_changes_nothing() {
    let mut state = AppState::new();
    state.update(Msg::HistoryLoaded(vec![sample_result("a", "A")]));
    state.update(Msg::OpenHistory);

    state.update(Msg::HistoryEntrySelected(5));
    assert!(state.current_result.is_none());
    assert!(state.history_open);
}

#[test]
fn sidebar_close_and_dark_mode_toggle() {
    let mut state = AppState::new();
    state.update(Msg::OpenHistory);
    state.update(Msg::CloseHistory);
    assert!(!state.history_open);

    state.update(Msg::ToggleDarkMode);
    assert!(state.dark_mode);
    state.update(Msg::ToggleDarkMode);
    assert!(!state.dark_mode);
}

#[test]
fn open_link_is_forwarded_as_effect() {
    let mut state = AppState::new();
    let link = "http://localhost:8000/download/a/summary.pdf".to_string();
    assert_eq!(
        state.update(Msg::OpenLink(link.clone())),
        vec![Effect::OpenLink(link)]
    );
}

#[test]
fn health_outcomes_map_to_backend_status() {
    let mut state = AppState::new();
    state.update(Msg::HealthChecked(Ok(HealthStatus {
        status: "healthy".into(),
        ffmpeg: "installed".into(),
        api_key: "set".into(),
    })));
    assert_eq!(state.backend, BackendStatus::Healthy);

    state.update(Msg::HealthChecked(Ok(HealthStatus {
        status: "unhealthy".into(),
        ffmpeg: "missing".into(),
        api_key: "missing".into(),
    })));
    assert_eq!(
        state.backend,
        BackendStatus::Unhealthy("missing ffmpeg, api key".into())
    );

    state.update(Msg::HealthChecked(Err(ClientError::Connect {
        url: "http://localhost:8000/health".into(),
        reason: "refused".into(),
    })));
    assert_eq!(state.backend, BackendStatus::Unreachable);
}
