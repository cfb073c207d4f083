use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use videoinsight_core::{
    AnalysisResult, AppState, Backend, ClientConfig, ClientError, Effect, Msg, OutputOption,
    ReqwestBackend, config::API_URL_ENV, download_to, drive, entry_download_dir, execute,
    format_health, format_history_line, format_result_readable, user_message,
};

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

/// CLI wrapper for OutputOption (needed for clap ValueEnum)
#[derive(Clone, Copy, ValueEnum)]
enum CliOption {
    Summary,
    TranscriptionOrig,
    TranscriptionEs,
    Guide,
}

impl From<CliOption> for OutputOption {
    fn from(cli: CliOption) -> Self {
        match cli {
            CliOption::Summary => OutputOption::Summary,
            CliOption::TranscriptionOrig => OutputOption::TranscriptionOrig,
            CliOption::TranscriptionEs => OutputOption::TranscriptionEs,
            CliOption::Guide => OutputOption::Guide,
        }
    }
}

#[derive(Parser)]
#[command(name = "videoinsight")]
#[command(about = "Turn YouTube videos into summaries, transcripts and didactic guides")]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = API_URL_ENV)]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit a video for analysis
    Analyze {
        /// Video URL
        url: String,

        /// Documents to generate (repeatable). Defaults to summary and guide.
        #[arg(short, long = "option", value_enum)]
        options: Vec<CliOption>,

        /// Download the generated documents when the analysis finishes
        #[arg(short, long)]
        download: bool,

        /// Target directory for --download
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List previous analyses
    History {
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one previous analysis
    Show {
        /// History entry id
        id: String,
    },
    /// Download the documents of a previous analysis
    Download {
        /// History entry id
        id: String,

        /// Only this file key (e.g. summary_pdf)
        #[arg(short, long)]
        key: Option<String>,

        /// Target directory
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Check backend health
    Health,
}

fn create_spinner(msg: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")?,
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    Ok(pb)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn fail(err: &ClientError) -> ! {
    eprintln!("{} {}", style("Error:").red().bold(), user_message(err));
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(api_url) = &cli.api_url {
        config = config.with_api_base(api_url);
    }
    if let Some(secs) = cli.timeout.filter(|s| *s > 0) {
        config = config.with_request_timeout(Duration::from_secs(secs));
    }
    debug!(
        "backend {} (timeout {:?})",
        config.api_base, config.request_timeout
    );
    let backend = ReqwestBackend::new(config.clone()).unwrap_or_else(|err| fail(&err));

    match cli.command {
        Command::Analyze {
            url,
            options,
            download,
            out,
        } => {
            let options: Vec<OutputOption> = options.into_iter().map(Into::into).collect();
            analyze(&backend, &config, &url, &options, download, out).await
        }
        Command::History { json } => history(&backend, json).await,
        Command::Show { id } => {
            let entry = find_entry(&backend, &id).await;
            println!("{}", format_result_readable(&entry, &config));
            Ok(())
        }
        Command::Download { id, key, out } => {
            let entry = find_entry(&backend, &id).await;
            let dir = out.unwrap_or_else(|| config.download_dir.clone());
            download_files(&backend, &entry, key.as_deref(), dir).await
        }
        Command::Health => {
            match backend.health().await {
                Ok(health) if health.is_healthy() => {
                    println!("{} {}", style("✓").green().bold(), format_health(&health));
                }
                Ok(health) => {
                    println!("{} {}", style("✗").red().bold(), format_health(&health));
                    std::process::exit(2);
                }
                Err(err) => fail(&err),
            }
            Ok(())
        }
    }
}

async fn analyze(
    backend: &ReqwestBackend,
    config: &ClientConfig,
    url: &str,
    options: &[OutputOption],
    download: bool,
    out: Option<PathBuf>,
) -> Result<()> {
    let mut state = AppState::new();
    state.update(Msg::UrlChanged(url.to_string()));
    if !options.is_empty() {
        for option in OutputOption::ALL {
            if options.contains(&option) != state.form.selection.contains(option) {
                state.update(Msg::OptionToggled(option));
            }
        }
    }

    let selected: Vec<&str> = state
        .form
        .selection
        .as_slice()
        .iter()
        .map(|o| o.label())
        .collect();
    println!(
        "\n{}  {}\n",
        style("videoinsight").cyan().bold(),
        style("Video Analyzer").dim()
    );
    println!(
        "{} {}",
        style("Documents:").dim(),
        if selected.is_empty() {
            "none".to_string()
        } else {
            selected.join(", ")
        }
    );

    let started = Instant::now();
    let spinner = create_spinner("Analyzing Video...")?;
    let cancelled = tokio::select! {
        _ = drive(&mut state, backend, Msg::SubmitClicked) => false,
        _ = tokio::signal::ctrl_c() => true,
    };
    if cancelled {
        state.update(Msg::CancelAnalysis);
        spinner.finish_with_message(format!("{} Cancelled", style("✗").red().bold()));
        std::process::exit(130);
    }

    if let Some(alert) = state.alert.take() {
        spinner.finish_with_message(format!("{} Analysis failed", style("✗").red().bold()));
        eprintln!("{} {}", style("Error:").red().bold(), alert);
        std::process::exit(1);
    }

    let Some(result) = state.current_result.clone() else {
        spinner.finish_and_clear();
        if let Some(hint) = state.form.hint {
            eprintln!("{} {}", style("Error:").red().bold(), hint);
        } else {
            eprintln!("{} URL is required", style("Error:").red().bold());
        }
        std::process::exit(1);
    };

    spinner.finish_with_message(format!(
        "{} Analyzed: {} {}",
        style("✓").green().bold(),
        style(&result.title).dim(),
        style(format!("[{}]", format_duration(started.elapsed()))).dim()
    ));
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", format_result_readable(&result, config));

    if download {
        let dir = out.unwrap_or_else(|| config.download_dir.clone());
        download_files(backend, &result, None, dir).await?;
    }

    Ok(())
}

async fn history(backend: &ReqwestBackend, json: bool) -> Result<()> {
    let mut state = AppState::new();
    match execute(backend, Effect::FetchHistory).await {
        Some(Msg::HistoryFailed(err)) => fail(&err),
        Some(reply) => {
            state.update(reply);
        }
        None => {}
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&state.history)?);
        return Ok(());
    }

    if let Some(placeholder) = state.history_placeholder() {
        println!("{}", placeholder);
        return Ok(());
    }
    for entry in &state.history {
        println!("{}", format_history_line(entry));
    }
    Ok(())
}

async fn find_entry(backend: &ReqwestBackend, id: &str) -> AnalysisResult {
    let history = backend.history().await.unwrap_or_else(|err| fail(&err));
    // The backend appends re-analyses under the same id; show the latest.
    match history.into_iter().rev().find(|entry| entry.id == id) {
        Some(entry) => entry,
        None => {
            eprintln!(
                "{} no history entry with id {}",
                style("Error:").red().bold(),
                style(id).yellow()
            );
            std::process::exit(1);
        }
    }
}

async fn download_files(
    backend: &ReqwestBackend,
    entry: &AnalysisResult,
    key: Option<&str>,
    dir: PathBuf,
) -> Result<()> {
    let dir = entry_download_dir(&dir, entry);

    let files: Vec<(&String, &String)> = entry
        .files
        .iter()
        .filter(|(k, _)| key.is_none_or(|wanted| wanted == k.as_str()))
        .collect();
    if files.is_empty() {
        anyhow::bail!("no matching files for {}", entry.id);
    }

    for (file_key, path) in files {
        let spinner = create_spinner(&format!("Downloading {}...", file_key))?;
        let target = download_to(backend, path, &dir)
            .await
            .with_context(|| format!("downloading {}", file_key))?;
        spinner.finish_with_message(format!(
            "{} {} {}",
            style("✓").green().bold(),
            file_key,
            style(target.display()).dim()
        ));
    }
    Ok(())
}
