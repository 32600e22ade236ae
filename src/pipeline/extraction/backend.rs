//! HTTP client for the remote document-understanding backend.
//!
//! One `analyze` call is submit-then-poll-until-done: the document bytes
//! are posted against a model id, the backend answers with an operation
//! URL, and the client polls that URL until the backend reports a
//! terminal state. The poll loop is the backend's wait primitive — no
//! local timeout beyond the per-request timeout, no cancellation.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use serde::Deserialize;

use super::types::{AnalysisClient, AnalyzeResult};
use super::ExtractionError;
use crate::config::ServiceConfig;

const API_VERSION: &str = "2024-11-30";

pub struct DocumentIntelligenceClient {
    endpoint: String,
    api_key: String,
    client: reqwest::blocking::Client,
    poll_interval: Duration,
}

impl DocumentIntelligenceClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, ExtractionError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ExtractionError::Connection(e.to_string()))?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            client,
            poll_interval: config.poll_interval,
        })
    }

    fn analyze_url(&self, model_id: &str) -> String {
        format!(
            "{}/documentintelligence/documentModels/{}:analyze?api-version={}",
            self.endpoint, model_id, API_VERSION
        )
    }

    /// Submit the document; returns the operation URL to poll.
    fn submit(&self, model_id: &str, document: &[u8]) -> Result<String, ExtractionError> {
        let response = self
            .client
            .post(self.analyze_url(model_id))
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .header("Content-Type", "application/octet-stream")
            .body(document.to_vec())
            .send()
            .map_err(|e| map_transport_error(e, &self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(classify_backend_error(status.as_u16(), body, model_id));
        }

        response
            .headers()
            .get("operation-location")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                ExtractionError::ResponseParsing("Missing operation-location header".into())
            })
    }

    /// Poll the operation until the backend reports a terminal state.
    fn wait(&self, operation_url: &str, model_id: &str) -> Result<AnalyzeResult, ExtractionError> {
        loop {
            std::thread::sleep(self.poll_interval);

            let response = self
                .client
                .get(operation_url)
                .header("Ocp-Apim-Subscription-Key", &self.api_key)
                .send()
                .map_err(|e| map_transport_error(e, &self.endpoint))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().unwrap_or_default();
                return Err(classify_backend_error(status.as_u16(), body, model_id));
            }

            let envelope: OperationEnvelope = response
                .json()
                .map_err(|e| ExtractionError::ResponseParsing(e.to_string()))?;

            match envelope.status.as_str() {
                "succeeded" => {
                    return envelope.analyze_result.ok_or_else(|| {
                        ExtractionError::ResponseParsing(
                            "Operation succeeded without analyzeResult".into(),
                        )
                    });
                }
                "failed" => {
                    let message = envelope
                        .error
                        .map(|e| format!("{}: {}", e.code, e.message))
                        .unwrap_or_else(|| "unspecified backend failure".into());
                    return Err(ExtractionError::AnalysisFailed(message));
                }
                other => {
                    tracing::trace!(status = other, "Analysis still in progress");
                }
            }
        }
    }
}

impl AnalysisClient for DocumentIntelligenceClient {
    fn analyze(&self, model_id: &str, document: &[u8]) -> Result<AnalyzeResult, ExtractionError> {
        let operation_url = self.submit(model_id, document)?;
        self.wait(&operation_url, model_id)
    }
}

fn map_transport_error(e: reqwest::Error, endpoint: &str) -> ExtractionError {
    if e.is_connect() || e.is_timeout() {
        ExtractionError::Connection(endpoint.to_string())
    } else {
        ExtractionError::Connection(e.to_string())
    }
}

/// A non-success status with a model-not-found error code becomes the
/// recoverable `ModelUnavailable`; everything else stays a backend error.
fn classify_backend_error(status: u16, body: String, model_id: &str) -> ExtractionError {
    let code = serde_json::from_str::<ErrorEnvelope>(&body)
        .ok()
        .map(|e| e.error.code)
        .unwrap_or_default();
    let lower_body = body.to_lowercase();
    if code.eq_ignore_ascii_case("ModelNotFound")
        || lower_body.contains("modelnotfound")
        || lower_body.contains("model not found")
    {
        return ExtractionError::ModelUnavailable {
            model: model_id.to_string(),
            message: body,
        };
    }
    ExtractionError::Backend { status, body }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationEnvelope {
    status: String,
    #[serde(default)]
    analyze_result: Option<AnalyzeResult>,
    #[serde(default)]
    error: Option<BackendError>,
}

#[derive(Deserialize, Default)]
struct BackendError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: BackendError,
}

/// Mock backend for testing — pops scripted outcomes per call and
/// records the model id of every call.
pub struct MockAnalysisClient {
    responses: Mutex<VecDeque<Result<AnalyzeResult, ExtractionError>>>,
    calls: Mutex<Vec<String>>,
}

impl MockAnalysisClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn push_ok(self, result: AnalyzeResult) -> Self {
        self.responses.lock().unwrap().push_back(Ok(result));
        self
    }

    pub fn push_err(self, err: ExtractionError) -> Self {
        self.responses.lock().unwrap().push_back(Err(err));
        self
    }

    /// Model ids in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockAnalysisClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisClient for MockAnalysisClient {
    fn analyze(&self, model_id: &str, _document: &[u8]) -> Result<AnalyzeResult, ExtractionError> {
        self.calls.lock().unwrap().push(model_id.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(ExtractionError::Backend {
                    status: 500,
                    body: "mock exhausted".into(),
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_trims_trailing_slash() {
        let config = ServiceConfig::new("https://di.example.com/", "key").unwrap();
        let client = DocumentIntelligenceClient::new(&config).unwrap();
        assert_eq!(client.endpoint, "https://di.example.com");
    }

    #[test]
    fn analyze_url_includes_model_and_version() {
        let config = ServiceConfig::new("https://di.example.com", "key").unwrap();
        let client = DocumentIntelligenceClient::new(&config).unwrap();
        let url = client.analyze_url("prebuilt-tax.us.w2");
        assert!(url.contains("/documentModels/prebuilt-tax.us.w2:analyze"));
        assert!(url.contains(API_VERSION));
    }

    #[test]
    fn model_not_found_code_classifies_as_unavailable() {
        let body = r#"{"error":{"code":"ModelNotFound","message":"Requested model was not found."}}"#;
        let err = classify_backend_error(404, body.into(), "prebuilt-tax.us.w2");
        assert!(matches!(err, ExtractionError::ModelUnavailable { .. }));
        assert!(err.is_model_unavailable());
    }

    #[test]
    fn model_not_found_message_substring_classifies_as_unavailable() {
        let err = classify_backend_error(404, "the model was not found: ModelNotFound".into(), "m");
        assert!(err.is_model_unavailable());
    }

    #[test]
    fn unrelated_error_classifies_as_backend() {
        let err = classify_backend_error(503, "service busy".into(), "m");
        assert!(matches!(err, ExtractionError::Backend { status: 503, .. }));
        assert!(!err.is_model_unavailable());
    }

    #[test]
    fn mock_pops_scripted_responses_and_records_calls() {
        let mock = MockAnalysisClient::new()
            .push_ok(AnalyzeResult {
                content: "first".into(),
                ..Default::default()
            })
            .push_err(ExtractionError::Connection("down".into()));

        let first = mock.analyze("model-a", b"bytes").unwrap();
        assert_eq!(first.content, "first");
        assert!(mock.analyze("model-b", b"bytes").is_err());
        assert_eq!(mock.calls(), ["model-a", "model-b"]);
        assert_eq!(mock.call_count(), 2);
    }
}
