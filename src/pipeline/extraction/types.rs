//! Field bag, wire types, and the analysis-backend abstraction.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::ExtractionError;
use crate::models::enums::DocumentType;
use crate::models::records::Box12Entry;

/// A single extracted field value, tagged by its semantic kind so
/// per-document-type projections stay compile-time safe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Amount(f64),
    Flag(bool),
    /// W-2 Box 12 code/amount pairs, in document order.
    Codes(Vec<Box12Entry>),
    /// A named checkbox group (W-2 Box 13).
    Group(BTreeMap<String, bool>),
}

/// The field-name-keyed bag produced by one extraction attempt.
///
/// Created once per projection and replaced wholesale if a type correction
/// triggers re-projection — never partially merged across attempts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedFieldData {
    pub fields: BTreeMap<String, FieldValue>,
    /// The document's full recognized text.
    pub full_text: String,
    /// Set only when the classifier overrode the caller's asserted type.
    pub corrected_document_type: Option<DocumentType>,
}

impl ExtractedFieldData {
    pub fn new(full_text: &str) -> Self {
        Self {
            full_text: full_text.to_string(),
            ..Default::default()
        }
    }

    pub fn set_text(&mut self, name: &str, value: String) {
        self.fields.insert(name.to_string(), FieldValue::Text(value));
    }

    pub fn set_amount(&mut self, name: &str, value: f64) {
        self.fields.insert(name.to_string(), FieldValue::Amount(value));
    }

    pub fn set_flag(&mut self, name: &str, value: bool) {
        self.fields.insert(name.to_string(), FieldValue::Flag(value));
    }

    pub fn set_codes(&mut self, name: &str, value: Vec<Box12Entry>) {
        self.fields.insert(name.to_string(), FieldValue::Codes(value));
    }

    pub fn set_group(&mut self, name: &str, value: BTreeMap<String, bool>) {
        self.fields.insert(name.to_string(), FieldValue::Group(value));
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(FieldValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn amount(&self, name: &str) -> Option<f64> {
        match self.fields.get(name) {
            Some(FieldValue::Amount(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.fields.get(name) {
            Some(FieldValue::Flag(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn codes(&self, name: &str) -> Option<&[Box12Entry]> {
        match self.fields.get(name) {
            Some(FieldValue::Codes(c)) => Some(c.as_slice()),
            _ => None,
        }
    }

    pub fn group(&self, name: &str) -> Option<&BTreeMap<String, bool>> {
        match self.fields.get(name) {
            Some(FieldValue::Group(g)) => Some(g),
            _ => None,
        }
    }
}

// ──────────────────────────────────────────────
// Backend wire types
// ──────────────────────────────────────────────

/// Completed analysis payload from the document-understanding backend.
///
/// Tax-specialized models populate `documents[].fields`; the general
/// document model adds `key_value_pairs`; the plain OCR model returns
/// only `content`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzeResult {
    pub content: String,
    pub documents: Vec<AnalyzedDocument>,
    pub key_value_pairs: Vec<KeyValuePair>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzedDocument {
    pub doc_type: String,
    pub fields: HashMap<String, ProviderField>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyValuePair {
    pub key: ProviderSpan,
    pub value: Option<ProviderSpan>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderSpan {
    pub content: String,
}

/// One structured field as reported by the backend. Exactly one of the
/// `value_*` members is populated per field; `content` carries the raw
/// recognized text regardless.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderField {
    pub content: Option<String>,
    pub value_string: Option<String>,
    pub value_number: Option<f64>,
    pub value_boolean: Option<bool>,
    pub value_object: Option<HashMap<String, ProviderField>>,
    pub value_array: Option<Vec<ProviderField>>,
}

impl ProviderField {
    /// Typed string, falling back to raw content.
    pub fn as_text(&self) -> Option<&str> {
        self.value_string
            .as_deref()
            .or(self.content.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Typed number, falling back to a tolerant parse of the raw content.
    pub fn as_amount(&self) -> Option<f64> {
        if let Some(n) = self.value_number {
            return Some(n);
        }
        self.as_text().map(super::fields::parse_amount)
    }

    pub fn as_flag(&self) -> Option<bool> {
        if let Some(b) = self.value_boolean {
            return Some(b);
        }
        self.as_text().map(super::fields::parse_flag)
    }

    /// Nested object member by name.
    pub fn member(&self, name: &str) -> Option<&ProviderField> {
        self.value_object.as_ref()?.get(name)
    }
}

/// Remote document-understanding backend abstraction (allows mocking).
///
/// `analyze` is submit-then-poll-until-done: the implementation blocks
/// until the backend reports a terminal state. One call, one round trip.
pub trait AnalysisClient {
    fn analyze(&self, model_id: &str, document: &[u8]) -> Result<AnalyzeResult, ExtractionError>;
}

/// Which projection path produced a field bag. Fallback OCR results carry
/// no structured fields, so they must re-project through the text path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionPath {
    Structured,
    TextHeuristic,
}
