//! Classification of generated-file entries for display.
//!
//! The backend names files `<option>_<format>` (`summary_pdf`, `guide_epub`)
//! and plain transcripts after their option (`transcription_orig`).

use crate::{config::ClientConfig, types::AnalysisResult};

/// Format tokens stripped from the end of a display label.
const FORMAT_TOKENS: [&str; 4] = ["md", "pdf", "docx", "epub"];

/// Display category of a generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Epub,
    /// Anything not matching a known format, including markdown and plain
    /// transcripts.
    Generic,
}

impl DocumentKind {
    /// Matches the raw key against `pdf`, `docx`, `epub` in that order.
    /// Case-sensitive; first match wins.
    pub fn classify(key: &str) -> Self {
        if key.contains("pdf") {
            DocumentKind::Pdf
        } else if key.contains("docx") {
            DocumentKind::Docx
        } else if key.contains("epub") {
            DocumentKind::Epub
        } else {
            DocumentKind::Generic
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            DocumentKind::Pdf | DocumentKind::Docx => "📄",
            DocumentKind::Epub => "📖",
            DocumentKind::Generic => "📁",
        }
    }

    /// Accent colour as RGB in `0.0..=1.0`.
    pub fn accent(&self) -> [f32; 3] {
        match self {
            DocumentKind::Pdf => [0.86, 0.15, 0.15],
            DocumentKind::Docx => [0.15, 0.39, 0.92],
            DocumentKind::Epub => [0.92, 0.35, 0.05],
            DocumentKind::Generic => [0.42, 0.45, 0.50],
        }
    }
}

/// One renderable row of the results panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub key: String,
    pub path: String,
    pub kind: DocumentKind,
    pub label: String,
    pub badge: String,
    pub link: String,
}

impl FileEntry {
    pub fn new(key: &str, path: &str, config: &ClientConfig) -> Self {
        Self {
            key: key.to_string(),
            path: path.to_string(),
            kind: DocumentKind::classify(key),
            label: display_label(key),
            badge: format_badge(key),
            link: config.endpoint(path),
        }
    }
}

/// All file entries of a result, in key order.
pub fn file_entries(result: &AnalysisResult, config: &ClientConfig) -> Vec<FileEntry> {
    result
        .files
        .iter()
        .map(|(key, path)| FileEntry::new(key, path, config))
        .collect()
}

/// `summary_pdf` -> `summary`, `transcription_orig` -> `transcription orig`.
pub fn display_label(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut words: Vec<&str> = spaced.split(' ').collect();
    if words.len() > 1 {
        if let Some(last) = words.last() {
            if FORMAT_TOKENS.iter().any(|t| last.eq_ignore_ascii_case(t)) {
                words.pop();
            }
        }
    }
    words.join(" ").trim().to_string()
}

/// Last underscore-delimited segment, upper-cased.
pub fn format_badge(key: &str) -> String {
    key.rsplit('_').next().unwrap_or(key).to_uppercase()
}
