//! Extraction orchestration: model selection, primary attempt, OCR
//! fallback, and the single-pass document type correction.
//!
//! The fallback exists because not every deployment has every specialized
//! tax model provisioned. The correction step compensates for callers
//! mis-identifying a document before upload; it runs exactly once, not to
//! a fixpoint, to bound latency and avoid oscillation between two types
//! that might each reclassify the other's output.

use uuid::Uuid;

use super::classify::classify_full_text;
use super::types::{AnalysisClient, AnalyzeResult, ExtractedFieldData, ExtractionPath};
use super::{form1099, w2, ExtractionError};
use crate::models::enums::DocumentType;
use crate::pipeline::model_router;

/// Project a retrieved backend result into the canonical field bag for a
/// document type. Types without a specialized extractor pass through with
/// the recognized text only.
pub(crate) fn project_fields(
    doc_type: DocumentType,
    result: &AnalyzeResult,
    path: ExtractionPath,
) -> ExtractedFieldData {
    match (doc_type, path) {
        (DocumentType::W2, ExtractionPath::Structured) => w2::from_provider(result),
        (DocumentType::W2, ExtractionPath::TextHeuristic) => w2::from_text(result),
        (DocumentType::Form1099Int, ExtractionPath::Structured) => {
            form1099::int::from_provider(result)
        }
        (DocumentType::Form1099Int, ExtractionPath::TextHeuristic) => {
            form1099::int::from_text(result)
        }
        (DocumentType::Form1099Div, ExtractionPath::Structured) => {
            form1099::div::from_provider(result)
        }
        (DocumentType::Form1099Div, ExtractionPath::TextHeuristic) => {
            form1099::div::from_text(result)
        }
        (DocumentType::Form1099Misc, ExtractionPath::Structured) => {
            form1099::misc::from_provider(result)
        }
        (DocumentType::Form1099Misc, ExtractionPath::TextHeuristic) => {
            form1099::misc::from_text(result)
        }
        (DocumentType::Form1099Nec, ExtractionPath::Structured) => {
            form1099::nec::from_provider(result)
        }
        (DocumentType::Form1099Nec, ExtractionPath::TextHeuristic) => {
            form1099::nec::from_text(result)
        }
        (DocumentType::Other, _) => ExtractedFieldData::new(&result.content),
    }
}

/// Orchestrates one document's extraction:
/// model select → analyze (→ OCR fallback) → project → type correction.
pub struct DocumentExtractor {
    client: Box<dyn AnalysisClient + Send + Sync>,
}

impl DocumentExtractor {
    pub fn new(client: Box<dyn AnalysisClient + Send + Sync>) -> Self {
        Self { client }
    }

    pub fn extract(
        &self,
        document_id: &Uuid,
        document: &[u8],
        asserted: DocumentType,
    ) -> Result<ExtractedFieldData, ExtractionError> {
        let _span = tracing::info_span!(
            "extract_document",
            doc_id = %document_id,
            asserted = asserted.as_str()
        )
        .entered();

        let model = model_router::model_for(asserted);
        let (result, path) = match self.client.analyze(model, document) {
            Ok(result) => (result, ExtractionPath::Structured),
            Err(e) if e.is_model_unavailable() => {
                tracing::warn!(
                    doc_id = %document_id,
                    model,
                    error = %e,
                    "Specialized model unavailable, falling back to OCR model"
                );
                match self.client.analyze(model_router::READ_MODEL, document) {
                    Ok(result) => (result, ExtractionPath::TextHeuristic),
                    Err(e) => return Err(ExtractionError::terminal("fallback attempt", e)),
                }
            }
            Err(e) => return Err(ExtractionError::terminal("primary attempt", e)),
        };

        let mut record = project_fields(asserted, &result, path);

        // Single-pass type correction: re-project the already-retrieved
        // result under the classified type. No second network round trip.
        if let Some(candidate) = classify_full_text(&record.full_text) {
            if candidate != asserted {
                tracing::info!(
                    doc_id = %document_id,
                    asserted = asserted.as_str(),
                    corrected = candidate.as_str(),
                    "Document text disagrees with asserted type, re-projecting"
                );
                record = project_fields(candidate, &result, path);
                record.corrected_document_type = Some(candidate);
            }
        }

        Ok(record)
    }
}
