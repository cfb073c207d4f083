use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A derivative document the backend can generate for a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputOption {
    Summary,
    TranscriptionOrig,
    TranscriptionEs,
    Guide,
}

impl OutputOption {
    pub const ALL: [OutputOption; 4] = [
        OutputOption::Summary,
        OutputOption::TranscriptionOrig,
        OutputOption::TranscriptionEs,
        OutputOption::Guide,
    ];

    /// Wire identifier sent in `AnalysisRequest::options`.
    pub fn id(&self) -> &'static str {
        match self {
            OutputOption::Summary => "summary",
            OutputOption::TranscriptionOrig => "transcription_orig",
            OutputOption::TranscriptionEs => "transcription_es",
            OutputOption::Guide => "guide",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OutputOption::Summary => "Summary",
            OutputOption::TranscriptionOrig => "Original Transcript",
            OutputOption::TranscriptionEs => "Translated Transcript",
            OutputOption::Guide => "Didactic Guide",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OutputOption::Summary => "Spanish Summary (PDF, DOCX, EPUB)",
            OutputOption::TranscriptionOrig => "Original language with active speakers",
            OutputOption::TranscriptionEs => "Spanish translation with speakers",
            OutputOption::Guide => "PDF Tutorial with Schema descriptions",
        }
    }
}

impl fmt::Display for OutputOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Body of `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub url: String,
    pub options: Vec<OutputOption>,
}

impl AnalysisRequest {
    /// Builds a request, rejecting an empty or whitespace-only URL.
    pub fn new(url: &str, options: Vec<OutputOption>) -> Result<Self, ValidationError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ValidationError::EmptyUrl);
        }
        Ok(Self {
            url: url.to_string(),
            options,
        })
    }
}

/// A completed analysis as returned by `/analyze` and listed by `/history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub thumbnail: String,
    /// Output identifier (e.g. `summary_pdf`) to server-relative download path.
    #[serde(default)]
    pub files: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir_name: Option<String>,
}

pub type HistoryList = Vec<AnalysisResult>;

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub ffmpeg: String,
    #[serde(default)]
    pub api_key: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }

    /// Components the backend reports as missing.
    pub fn missing_components(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.ffmpeg == "missing" {
            missing.push("ffmpeg");
        }
        if self.api_key == "missing" {
            missing.push("api key");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_serialize_as_wire_ids() {
        let request = AnalysisRequest::new(
            " https://youtu.be/abc ",
            vec![OutputOption::Summary, OutputOption::TranscriptionEs],
        )
        .unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "url": "https://youtu.be/abc",
                "options": ["summary", "transcription_es"],
            })
        );
    }

    #[test]
    fn empty_url_is_rejected() {
        assert_eq!(
            AnalysisRequest::new("   ", vec![OutputOption::Guide]),
            Err(ValidationError::EmptyUrl)
        );
    }

    #[test]
    fn result_accepts_backend_history_entry() {
        let entry: AnalysisResult = serde_json::from_str(
            r#"{
                "id": "1a2b3c4d",
                "title": "Rust in 100 Seconds",
                "url": "https://www.youtube.com/watch?v=5C_HPTJg5ek",
                "date": "20210914",
                "report_date": "2025-01-02",
                "dir_name": "Rust_in_100_Seconds_1a2b3c4d",
                "files": {"summary_pdf": "/download/Rust_in_100_Seconds_1a2b3c4d/summary.pdf"},
                "thumbnail": "https://i.ytimg.com/vi/5C_HPTJg5ek/maxresdefault.jpg"
            }"#,
        )
        .unwrap();
        assert_eq!(entry.id, "1a2b3c4d");
        assert_eq!(entry.files.len(), 1);
        assert_eq!(entry.report_date.as_deref(), Some("2025-01-02"));
    }

    #[test]
    fn health_lists_missing_components() {
        let health = HealthStatus {
            status: "unhealthy".into(),
            ffmpeg: "missing".into(),
            api_key: "set".into(),
        };
        assert!(!health.is_healthy());
        assert_eq!(health.missing_components(), vec!["ffmpeg"]);
    }
}
