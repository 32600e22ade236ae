//! Model selection: maps an asserted document type to the backend model
//! that extracts it. Pure and total — every type resolves, every call with
//! the same type returns the same model id.

use crate::models::enums::DocumentType;

/// W-2 specialized extraction model.
pub const W2_MODEL: &str = "prebuilt-tax.us.w2";

/// One unified model covers every 1099 variant (INT/DIV/MISC/NEC).
pub const UNIFIED_1099_MODEL: &str = "prebuilt-tax.us.1099";

/// General document model for unrecognized types.
pub const GENERAL_DOCUMENT_MODEL: &str = "prebuilt-document";

/// Plain OCR model used for the fallback attempt when a specialized
/// model is not provisioned in the deployment.
pub const READ_MODEL: &str = "prebuilt-read";

pub fn model_for(doc_type: DocumentType) -> &'static str {
    match doc_type {
        DocumentType::W2 => W2_MODEL,
        DocumentType::Form1099Int
        | DocumentType::Form1099Div
        | DocumentType::Form1099Misc
        | DocumentType::Form1099Nec => UNIFIED_1099_MODEL,
        DocumentType::Other => GENERAL_DOCUMENT_MODEL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_select_is_total_and_deterministic() {
        for doc_type in [
            DocumentType::W2,
            DocumentType::Form1099Int,
            DocumentType::Form1099Div,
            DocumentType::Form1099Misc,
            DocumentType::Form1099Nec,
            DocumentType::Other,
        ] {
            let first = model_for(doc_type);
            let second = model_for(doc_type);
            assert_eq!(first, second);
            assert!(!first.is_empty());
        }
    }

    #[test]
    fn all_1099_variants_share_one_model() {
        assert_eq!(model_for(DocumentType::Form1099Int), UNIFIED_1099_MODEL);
        assert_eq!(model_for(DocumentType::Form1099Div), UNIFIED_1099_MODEL);
        assert_eq!(model_for(DocumentType::Form1099Misc), UNIFIED_1099_MODEL);
        assert_eq!(model_for(DocumentType::Form1099Nec), UNIFIED_1099_MODEL);
    }

    #[test]
    fn unrecognized_types_use_general_model() {
        assert_eq!(model_for(DocumentType::Other), GENERAL_DOCUMENT_MODEL);
    }

    #[test]
    fn w2_uses_specialized_model() {
        assert_eq!(model_for(DocumentType::W2), W2_MODEL);
    }
}
