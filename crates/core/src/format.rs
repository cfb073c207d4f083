use crate::{
    config::ClientConfig,
    documents::file_entries,
    types::{AnalysisResult, HealthStatus},
};

/// Format a backend upload date (`YYYYMMDD`) as `YYYY-MM-DD`; other
/// strings are returned unchanged.
pub fn format_date(date: &str) -> String {
    if date.len() == 8 && date.chars().all(|c| c.is_ascii_digit()) {
        format!("{}-{}-{}", &date[0..4], &date[4..6], &date[6..8])
    } else {
        date.to_string()
    }
}

/// One line per history entry: id, date and title.
pub fn format_history_line(entry: &AnalysisResult) -> String {
    format!(
        "{:<10} {:<10} {} ({} files)",
        entry.id,
        format_date(&entry.date),
        entry.title,
        entry.files.len()
    )
}

/// Format an analysis result as human-readable markdown
pub fn format_result_readable(result: &AnalysisResult, config: &ClientConfig) -> String {
    let mut output = String::new();
    output.push_str(&format!("# {}\n\n", result.title));

    let mut meta = vec![format!("**Date:** {}", format_date(&result.date))];
    if let Some(report_date) = &result.report_date {
        meta.push(format!("**Report:** {}", report_date));
    }
    meta.push(format!("**Id:** {}", result.id));
    output.push_str(&meta.join(" | "));
    output.push_str("\n\n");

    if let Some(url) = &result.url {
        output.push_str(&format!("Source: {}\n\n", url));
    }

    output.push_str("## Generated Documents\n\n");
    let entries = file_entries(result, config);
    if entries.is_empty() {
        output.push_str("No documents were generated.\n");
    }
    for entry in entries {
        output.push_str(&format!(
            "{} {} [{}]\n   {}\n",
            entry.kind.icon(),
            entry.label,
            entry.badge,
            entry.link
        ));
    }

    output
}

pub fn format_health(health: &HealthStatus) -> String {
    format!(
        "status: {} | ffmpeg: {} | api key: {}",
        health.status, health.ffmpeg, health.api_key
    )
}
