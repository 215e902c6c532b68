use super::SoundSearch;
use super::models::{SearchResponse, SoundDetail};
use anyhow::{Context, Result};
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Blocking client for the Freesound v2 API. Build and use it off the UI
/// thread.
pub struct FreesoundClient {
    http: Client,
    base: String,
    token: String,
}

impl FreesoundClient {
    pub fn new(base: &str, token: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("booksmart/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Building HTTP client")?;
        Ok(Self {
            http,
            base: base.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    pub fn search_url(&self) -> String {
        format!("{}/search/text/", self.base)
    }

    pub fn sound_url(&self, sound_id: u64) -> String {
        format!("{}/sounds/{sound_id}/", self.base)
    }

    /// Fetch the audio bytes behind a preview URL.
    pub fn download_preview(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(url)
            .send()
            .with_context(|| format!("Requesting preview {url}"))?;
        if response.status() != StatusCode::OK {
            anyhow::bail!("Preview download failed with HTTP {}", response.status());
        }
        let bytes = response
            .bytes()
            .with_context(|| format!("Reading preview body from {url}"))?;
        debug!(url, bytes = bytes.len(), "Downloaded preview");
        Ok(bytes.to_vec())
    }

    /// GET `url` and decode the body; a non-200 status is logged and yields
    /// `None`.
    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<T>> {
        let response = self
            .http
            .get(url)
            .query(query)
            .query(&[("token", self.token.as_str())])
            .send()
            .with_context(|| format!("Requesting {url}"))?;
        let Some(response) = ok_or_log(response) else {
            return Ok(None);
        };
        let body = response
            .text()
            .with_context(|| format!("Reading response body from {url}"))?;
        let parsed = serde_json::from_str(&body)
            .with_context(|| format!("Decoding JSON response from {url}"))?;
        Ok(Some(parsed))
    }
}

impl SoundSearch for FreesoundClient {
    fn search_first(&self, query: &str) -> Result<Option<u64>> {
        let response: Option<SearchResponse> =
            self.get_json(&self.search_url(), &[("query", query)])?;
        let id = response.and_then(|r| r.first_id());
        debug!(query, ?id, "Text search finished");
        Ok(id)
    }

    fn preview_url(&self, sound_id: u64) -> Result<Option<String>> {
        let detail: Option<SoundDetail> = self.get_json(&self.sound_url(sound_id), &[])?;
        Ok(detail.and_then(|d| d.preview_url()))
    }
}

fn ok_or_log(response: Response) -> Option<Response> {
    let status = response.status();
    if status == StatusCode::OK {
        return Some(response);
    }
    warn!(
        status = status.as_u16(),
        reason = status.canonical_reason().unwrap_or("unknown"),
        path = response.url().path(),
        "Sound service returned an error"
    );
    None
}
