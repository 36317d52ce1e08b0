//! HTTP client for the Jurify backend import endpoints
//!
//! The client is deliberately thin: one bulk-creation POST per import
//! target, no retries (resubmission is always an explicit user action).

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::config::ApiConfig;
use crate::import::{ColumnMapping, ImportSink, NormalizedRow};

/// Which bulk-creation endpoint an import feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportTarget {
    Processos,
    Publicacoes,
}

impl ImportTarget {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Processos => "processos/importar",
            Self::Publicacoes => "publicacoes/importar",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Processos => "processos",
            Self::Publicacoes => "publicações",
        }
    }
}

/// Response shape of the bulk import endpoints
#[derive(Debug, Deserialize)]
struct ImportResponse {
    sucesso: bool,
    #[serde(default)]
    mensagem: Option<String>,
}

/// Thin reqwest wrapper around the Jurify API
pub struct JurifyClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl JurifyClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    /// POST rows to a bulk import endpoint.
    ///
    /// Returns `Ok(false)` when the backend answered but rejected the data
    /// (remote validation), so the caller can correct and resubmit.
    pub async fn import(&self, target: ImportTarget, rows: &[NormalizedRow]) -> Result<bool> {
        let url = format!("{}/{}", self.base_url, target.endpoint());
        log::debug!("POST {} ({} rows)", url, rows.len());

        let mut request = self.http.post(&url).json(&json!({ "linhas": rows }));
        if !self.token.is_empty() {
            request = request.bearer_auth(&self.token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to reach the Jurify API at {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Import request failed with status {}: {}", status, body);
        }

        let body: ImportResponse = response
            .json()
            .await
            .context("Failed to decode the import response")?;

        if !body.sucesso {
            log::warn!(
                "backend rejected the {} import: {}",
                target.label(),
                body.mensagem.as_deref().unwrap_or("no message")
            );
        }
        Ok(body.sucesso)
    }
}

/// Import sink backed by the Jurify API
pub struct ApiSink {
    client: JurifyClient,
    target: ImportTarget,
}

impl ApiSink {
    pub fn new(client: JurifyClient, target: ImportTarget) -> Self {
        Self { client, target }
    }
}

#[async_trait]
impl ImportSink for ApiSink {
    async fn submit(&mut self, rows: &[NormalizedRow], _mapping: &ColumnMapping) -> Result<bool> {
        self.client.import(self.target, rows).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(ImportTarget::Processos.endpoint(), "processos/importar");
        assert_eq!(ImportTarget::Publicacoes.endpoint(), "publicacoes/importar");
    }

    #[test]
    fn test_import_response_decoding() {
        let ok: ImportResponse = serde_json::from_str(r#"{"sucesso": true}"#).unwrap();
        assert!(ok.sucesso);
        assert!(ok.mensagem.is_none());

        let rejected: ImportResponse =
            serde_json::from_str(r#"{"sucesso": false, "mensagem": "processo duplicado"}"#)
                .unwrap();
        assert!(!rejected.sucesso);
        assert_eq!(rejected.mensagem.as_deref(), Some("processo duplicado"));
    }
}
