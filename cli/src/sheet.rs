//! Sheet sinks available to the CLI: a real Apps Script web-app endpoint
//! when one is configured, the library's simulated sink otherwise.

use herbarium::host::{HostError, SheetSink, SimulatedSheet};
use herbarium::types::SheetRow;

/// Posts condensed rows to a Google Apps Script web-app URL.
#[derive(Debug, Clone)]
pub struct AppsScriptSink {
    http: reqwest::Client,
    url: String,
}

impl AppsScriptSink {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl SheetSink for AppsScriptSink {
    async fn save(&self, row: &SheetRow) -> Result<String, HostError> {
        let response = self
            .http
            .post(&self.url)
            .json(row)
            .send()
            .await
            .map_err(|error| HostError::Save(error.to_string()))?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(HostError::Save(format!("HTTP {status}: {body}")));
        }
        // Apps Script replies `{ "message": "..." }` on success.
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| value.get("message")?.as_str().map(str::to_owned))
            .unwrap_or_else(|| "Saved to sheet".to_owned());
        Ok(message)
    }
}

/// Whichever sink the command line selected.
#[derive(Debug, Clone)]
pub enum Sink {
    Simulated(SimulatedSheet),
    AppsScript(AppsScriptSink),
}

impl Sink {
    pub fn from_url(url: Option<String>) -> Self {
        match url {
            Some(url) => Self::AppsScript(AppsScriptSink::new(url)),
            None => Self::Simulated(SimulatedSheet),
        }
    }
}

impl SheetSink for Sink {
    async fn save(&self, row: &SheetRow) -> Result<String, HostError> {
        match self {
            Self::Simulated(sink) => sink.save(row).await,
            Self::AppsScript(sink) => sink.save(row).await,
        }
    }
}
