//! Document type classification from recognized text.
//!
//! Case-insensitive substring matching against an ordered rule list,
//! first match wins. The ordering is a deliberate tie-break: some forms
//! share vocabulary ("income" appears on several), so W-2 markers are
//! checked before 1099-INT, then DIV, MISC, NEC. Do not reorder.

use crate::models::enums::DocumentType;

const CLASSIFICATION_RULES: &[(&str, DocumentType)] = &[
    ("wage and tax statement", DocumentType::W2),
    ("form w-2", DocumentType::W2),
    ("w-2 wage", DocumentType::W2),
    ("interest income", DocumentType::Form1099Int),
    ("1099-int", DocumentType::Form1099Int),
    ("dividends and distributions", DocumentType::Form1099Div),
    ("1099-div", DocumentType::Form1099Div),
    ("miscellaneous information", DocumentType::Form1099Misc),
    ("miscellaneous income", DocumentType::Form1099Misc),
    ("1099-misc", DocumentType::Form1099Misc),
    ("nonemployee compensation", DocumentType::Form1099Nec),
    ("1099-nec", DocumentType::Form1099Nec),
];

/// Classify a document from its full recognized text. Pure and
/// deterministic; returns `None` when no marker matches.
pub fn classify_full_text(full_text: &str) -> Option<DocumentType> {
    let lower = full_text.to_lowercase();
    CLASSIFICATION_RULES
        .iter()
        .find(|(marker, _)| lower.contains(marker))
        .map(|(_, doc_type)| *doc_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_form() {
        assert_eq!(
            classify_full_text("Form W-2 Wage and Tax Statement 2023"),
            Some(DocumentType::W2)
        );
        assert_eq!(
            classify_full_text("Form 1099-INT Interest Income"),
            Some(DocumentType::Form1099Int)
        );
        assert_eq!(
            classify_full_text("Form 1099-DIV Dividends and Distributions"),
            Some(DocumentType::Form1099Div)
        );
        assert_eq!(
            classify_full_text("Form 1099-MISC Miscellaneous Information"),
            Some(DocumentType::Form1099Misc)
        );
        assert_eq!(
            classify_full_text("Form 1099-NEC Nonemployee Compensation"),
            Some(DocumentType::Form1099Nec)
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            classify_full_text("WAGE AND TAX STATEMENT"),
            Some(DocumentType::W2)
        );
        assert_eq!(
            classify_full_text("nonemployee COMPENSATION"),
            Some(DocumentType::Form1099Nec)
        );
    }

    #[test]
    fn rule_order_is_a_stable_tie_break() {
        // Both W-2 and 1099-INT markers present: the W-2 rule precedes.
        let text = "Wage and Tax Statement ... also mentions interest income";
        assert_eq!(classify_full_text(text), Some(DocumentType::W2));

        // INT precedes DIV when both appear.
        let text = "interest income and dividends and distributions";
        assert_eq!(classify_full_text(text), Some(DocumentType::Form1099Int));
    }

    #[test]
    fn unmatched_text_is_unknown() {
        assert_eq!(classify_full_text("grocery receipt, thanks"), None);
        assert_eq!(classify_full_text(""), None);
    }

}
