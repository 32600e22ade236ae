pub mod backend;
pub mod classify;
pub mod fields;
pub mod form1099;
pub mod orchestrator;
pub mod types;
pub mod w2;

pub use backend::*;
pub use classify::*;
pub use orchestrator::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Required setting {0} is not configured")]
    ConfigurationMissing(&'static str),

    #[error("Backend connection failed at {0}")]
    Connection(String),

    #[error("Model '{model}' is not provisioned: {message}")]
    ModelUnavailable { model: String, message: String },

    #[error("Backend returned error (status {status}): {body}")]
    Backend { status: u16, body: String },

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Analysis did not complete: {0}")]
    AnalysisFailed(String),

    #[error("Extraction failed during {stage}: {source}")]
    ExtractionFailed {
        stage: &'static str,
        #[source]
        source: Box<ExtractionError>,
    },
}

impl ExtractionError {
    /// Wrap a terminal failure with the pipeline stage it occurred in.
    pub fn terminal(stage: &'static str, source: ExtractionError) -> Self {
        Self::ExtractionFailed {
            stage,
            source: Box::new(source),
        }
    }

    /// A model-not-found class of failure, detected by variant or by the
    /// backend's error code/message content. Recoverable: the orchestrator
    /// retries against the plain OCR model.
    pub fn is_model_unavailable(&self) -> bool {
        match self {
            Self::ModelUnavailable { .. } => true,
            Self::Backend { body, .. } => {
                let lower = body.to_lowercase();
                lower.contains("modelnotfound") || lower.contains("model not found")
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_unavailable_variant_is_recoverable() {
        let err = ExtractionError::ModelUnavailable {
            model: "prebuilt-tax.us.w2".into(),
            message: "not provisioned".into(),
        };
        assert!(err.is_model_unavailable());
    }

    #[test]
    fn backend_error_with_model_not_found_body_is_recoverable() {
        let err = ExtractionError::Backend {
            status: 404,
            body: "{\"error\":{\"code\":\"ModelNotFound\"}}".into(),
        };
        assert!(err.is_model_unavailable());
    }

    #[test]
    fn unrelated_backend_error_is_terminal() {
        let err = ExtractionError::Backend {
            status: 500,
            body: "internal error".into(),
        };
        assert!(!err.is_model_unavailable());
    }

    #[test]
    fn terminal_wrapper_preserves_cause() {
        let err = ExtractionError::terminal(
            "primary attempt",
            ExtractionError::Connection("https://di.example.com".into()),
        );
        let text = err.to_string();
        assert!(text.contains("primary attempt"));
        assert!(text.contains("di.example.com"));
    }
}
