use crate::models::{AppsStatus, IntegratorPayload, IntegratorTotals, RawObservation, ToolsPayload};
use crate::series::SeriesKind;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{0:?} is not a usable name")]
    InvalidName(String),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered {status}")]
    Status { url: String, status: StatusCode },
    #[error("{url} returned an unreadable body: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Upstream {
    client: Client,
    base_url: String,
}

impl Upstream {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn series(&self, kind: SeriesKind, app: &str) -> Result<Vec<RawObservation>, UpstreamError> {
        let path = match kind {
            SeriesKind::Daily => "get-day-data",
            SeriesKind::Monthly => "get-month-data",
        };
        self.get_json(&format!("{path}/{}", segment(app)?)).await
    }

    pub async fn apps(&self) -> Result<AppsStatus, UpstreamError> {
        self.get_json("get-apps").await
    }

    pub async fn info(&self, epoch_millis: i64) -> Result<ToolsPayload, UpstreamError> {
        self.get_json(&format!("get-info/{epoch_millis}")).await
    }

    pub async fn integrator(&self, id: &str) -> Result<IntegratorPayload, UpstreamError> {
        self.get_json(&format!("get-integrator-data/{}", segment(id)?)).await
    }

    pub async fn integrator_totals(&self) -> Result<IntegratorTotals, UpstreamError> {
        self.get_json("get-integrator-data/").await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, UpstreamError> {
        let url = format!("{}/{path}", self.base_url);
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| UpstreamError::Transport { url: url.clone(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status { url, status });
        }

        response
            .json()
            .await
            .map_err(|source| UpstreamError::Body { url, source })
    }
}

// A caller-supplied name must stay one path segment under the fixed endpoint.
fn segment(name: &str) -> Result<Cow<'_, str>, UpstreamError> {
    if matches!(name.trim(), "" | "." | "..") {
        return Err(UpstreamError::InvalidName(name.to_string()));
    }
    Ok(urlencoding::encode(name))
}
