//! HTTP client for the form ingestion endpoint.
//!
//! The endpoint accepts one multipart POST per submission: the text fields
//! `exporterName`, `exporterEmail` and `formDataJson`, plus zero or more
//! named binary parts. It answers with `{success, message?}` and an HTTP
//! status for the failure category. Everything behind it (database, email
//! notification, object storage) is the backend's concern.

use super::traits::IngestApi;
use super::{SubmissionError, SubmissionPayload};
use crate::config::CooConfig;
use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

/// Default ingestion endpoint address.
const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8600/api/submit-form";

/// Acknowledgment message shown after an accepted submission that carries no
/// message of its own.
const ACCEPTED_MESSAGE: &str =
    "Form submitted successfully. You will receive a confirmation email shortly.";

/// Acknowledgment of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitAck {
    pub message: String,
}

/// Response body of the ingestion endpoint.
#[derive(Debug, Deserialize)]
struct IngestResponse {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
    /// Some backend revisions report the reason under `error` instead.
    #[serde(default)]
    error: Option<String>,
}

/// Client for the ingestion endpoint.
pub struct IngestClient {
    http: reqwest::Client,
    endpoint: String,
}

impl IngestClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Endpoint resolution: environment override, then config file, then the
    /// built-in default.
    pub fn resolve_endpoint(config: &CooConfig) -> String {
        std::env::var("COO_INGEST_ENDPOINT")
            .ok()
            .or_else(|| config.ingest_endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }
}

#[async_trait]
impl IngestApi for IngestClient {
    async fn submit(&self, payload: SubmissionPayload) -> Result<SubmitAck, SubmissionError> {
        let mut form = multipart::Form::new()
            .text("exporterName", payload.exporter_name)
            .text("exporterEmail", payload.exporter_email)
            .text("formDataJson", payload.form_json);
        for part in payload.attachments {
            let file = multipart::Part::bytes(part.bytes)
                .file_name(part.file_name)
                .mime_str(&part.media_type)?;
            form = form.part(part.name, file);
        }

        let response = self.http.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        interpret_response(status, &body)
    }
}

/// Map the endpoint's status and body onto an acknowledgment or a rejection.
/// A parseable server-reported reason is surfaced verbatim; anything else
/// becomes a generic transport-level reason.
fn interpret_response(
    status: reqwest::StatusCode,
    body: &str,
) -> Result<SubmitAck, SubmissionError> {
    let parsed: Option<IngestResponse> = serde_json::from_str(body).ok();
    let reported_failure = parsed
        .as_ref()
        .is_some_and(|r| r.success == Some(false));

    if status.is_success() && !reported_failure {
        let message = parsed
            .and_then(|r| r.message)
            .unwrap_or_else(|| ACCEPTED_MESSAGE.to_string());
        return Ok(SubmitAck { message });
    }

    let reason = parsed
        .and_then(|r| r.message.or(r.error))
        .unwrap_or_else(|| format!("ingestion endpoint returned {status}"));
    Err(SubmissionError::Rejected(reason))
}
