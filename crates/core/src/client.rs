use std::{
    path::{Component, Path, PathBuf},
    time::Instant,
};

use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::{
    config::ClientConfig,
    error::{ClientError, Result},
    types::{AnalysisRequest, AnalysisResult, HealthStatus, HistoryList},
};

/// The backend's HTTP contract.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /history`
    async fn history(&self) -> Result<HistoryList>;

    /// `POST /analyze`
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult>;

    /// `GET /health`
    async fn health(&self) -> Result<HealthStatus>;

    /// Raw bytes of a server path (`/download/...`) or an absolute URL.
    async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    config: ClientConfig,
    http: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| ClientError::Http {
                reason: err.to_string(),
            })?;
        Ok(Self { config, http })
    }

    async fn read_json<T: DeserializeOwned>(&self, response: Response, url: &str) -> Result<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| map_reqwest_error(err, url))?;

        if !status.is_success() {
            return Err(server_error(status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(|err| ClientError::Decode {
            reason: format!("Invalid response from {url}: {err}"),
        })
    }
}

#[async_trait]
impl Backend for ReqwestBackend {
    async fn history(&self) -> Result<HistoryList> {
        let url = self.config.endpoint("/history");
        debug!("GET {}", url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| map_reqwest_error(err, &url))?;
        self.read_json(response, &url).await
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let url = self.config.endpoint("/analyze");
        info!(
            "POST {} video={} options={:?}",
            url, request.url, request.options
        );
        let started = Instant::now();
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|err| map_reqwest_error(err, &url))?;
        let result: AnalysisResult = self.read_json(response, &url).await?;
        info!(
            "analysis {} finished in {:.1}s with {} files",
            result.id,
            started.elapsed().as_secs_f64(),
            result.files.len()
        );
        Ok(result)
    }

    async fn health(&self) -> Result<HealthStatus> {
        let url = self.config.endpoint("/health");
        debug!("GET {}", url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| map_reqwest_error(err, &url))?;
        self.read_json(response, &url).await
    }

    async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.config.endpoint(path);
        debug!("GET {}", url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| map_reqwest_error(err, &url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(server_error(status.as_u16(), body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| map_reqwest_error(err, &url))?;
        Ok(bytes.to_vec())
    }
}

/// Downloads a generated document into `dir`, named after the last path
/// segment. Returns the written path.
pub async fn download_to(backend: &dyn Backend, path: &str, dir: &Path) -> Result<PathBuf> {
    let file_name = file_name_from_path(path);
    let bytes = backend.fetch_bytes(path).await?;
    fs::create_dir_all(dir).await?;
    let target = dir.join(file_name);
    fs::write(&target, &bytes).await?;
    info!("saved {} ({} bytes)", target.display(), bytes.len());
    Ok(target)
}

/// Pulls the `detail` field out of a FastAPI-style error body.
///
/// String details are returned as-is; structured ones (validation error
/// lists) as their JSON text.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(detail) => Some(detail.clone()),
        other => Some(other.to_string()),
    }
}

fn server_error(status: u16, body: String) -> ClientError {
    ClientError::Server {
        status,
        detail: extract_detail(&body),
        body,
    }
}

fn map_reqwest_error(err: reqwest::Error, url: &str) -> ClientError {
    if err.is_timeout() {
        return ClientError::Timeout {
            url: url.to_string(),
        };
    }
    // No response at all: refused, reset or closed before any status.
    if err.is_connect() || (err.is_request() && err.status().is_none()) {
        return ClientError::Connect {
            url: url.to_string(),
            reason: err.to_string(),
        };
    }
    if err.is_decode() {
        return ClientError::Decode {
            reason: err.to_string(),
        };
    }
    ClientError::Http {
        reason: err.to_string(),
    }
}

/// Directory a history entry's documents are saved to: `base/<dir_name>`,
/// falling back to `base/<id>`. Server-supplied names that are not a single
/// plain path component are ignored.
pub fn entry_download_dir(base: &Path, entry: &AnalysisResult) -> PathBuf {
    let name = entry
        .dir_name
        .as_deref()
        .into_iter()
        .chain([entry.id.as_str()])
        .find(|name| {
            let safe = is_plain_component(name);
            if !safe {
                warn!("ignoring unsafe directory name {:?}", name);
            }
            safe
        })
        .unwrap_or("analysis");
    base.join(name)
}

fn is_plain_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}

fn file_name_from_path(path: &str) -> String {
    let trimmed = path.split(['?', '#']).next().unwrap_or(path);
    trimmed
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .filter(|segment| is_plain_component(segment))
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "download".to_string())
}
