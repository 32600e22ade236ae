//! Serial per-document pipeline: extract, project the typed record for
//! the effective document type, dispatch the matching mapper, return the
//! updated aggregate. Callers folding several documents into one
//! aggregate must serialize calls; the processor does not synchronize.

use uuid::Uuid;

use crate::config::ServiceConfig;
use crate::models::enums::DocumentType;
use crate::models::form1040::Form1040Data;
use crate::models::records::{
    Form1099DivRecord, Form1099IntRecord, Form1099MiscRecord, Form1099NecRecord, W2Record,
};
use crate::pipeline::extraction::backend::DocumentIntelligenceClient;
use crate::pipeline::extraction::types::{AnalysisClient, ExtractedFieldData};
use crate::pipeline::extraction::{DocumentExtractor, ExtractionError};
use crate::pipeline::mapping;

/// Fold one extracted document into the aggregate under the given type.
/// `Other` documents carry no mappable boxes and pass the aggregate
/// through unchanged.
pub fn map_document(
    doc_type: DocumentType,
    data: &ExtractedFieldData,
    aggregate: Form1040Data,
) -> Form1040Data {
    match doc_type {
        DocumentType::W2 => mapping::map_w2(&W2Record::from_fields(data), aggregate),
        DocumentType::Form1099Int => {
            mapping::map_1099_int(&Form1099IntRecord::from_fields(data), aggregate)
        }
        DocumentType::Form1099Div => {
            mapping::map_1099_div(&Form1099DivRecord::from_fields(data), aggregate)
        }
        DocumentType::Form1099Misc => {
            mapping::map_1099_misc(&Form1099MiscRecord::from_fields(data), aggregate)
        }
        DocumentType::Form1099Nec => {
            mapping::map_1099_nec(&Form1099NecRecord::from_fields(data), aggregate)
        }
        DocumentType::Other => aggregate,
    }
}

/// End-to-end intake for one document.
pub struct DocumentProcessor {
    extractor: DocumentExtractor,
}

impl DocumentProcessor {
    /// Build against the real backend. Fails fast when endpoint or API
    /// key are missing.
    pub fn new(config: &ServiceConfig) -> Result<Self, ExtractionError> {
        let client = DocumentIntelligenceClient::new(config)?;
        Ok(Self::with_client(Box::new(client)))
    }

    pub fn with_client(client: Box<dyn AnalysisClient + Send + Sync>) -> Self {
        Self {
            extractor: DocumentExtractor::new(client),
        }
    }

    /// Extract the document and fold it into the aggregate. The corrected
    /// type, when the classifier produced one, wins over the asserted
    /// type for mapper dispatch.
    pub fn process(
        &self,
        document_id: &Uuid,
        document: &[u8],
        asserted: DocumentType,
        aggregate: Form1040Data,
    ) -> Result<Form1040Data, ExtractionError> {
        let data = self.extractor.extract(document_id, document, asserted)?;
        let effective = data.corrected_document_type.unwrap_or(asserted);
        tracing::info!(
            doc_id = %document_id,
            doc_type = effective.as_str(),
            fields = data.fields.len(),
            "Mapping extracted document into return aggregate"
        );
        Ok(map_document(effective, &data, aggregate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::extraction::backend::MockAnalysisClient;
    use serde_json::json;

    #[test]
    fn processes_w2_end_to_end() {
        let result = serde_json::from_value(json!({
            "content": "Form W-2 Wage and Tax Statement",
            "documents": [{
                "docType": "tax.us.w2",
                "fields": {
                    "Employee": {"valueObject": {
                        "Name": {"valueString": "Jane A Doe"},
                        "SocialSecurityNumber": {"valueString": "123456789"}
                    }},
                    "WagesTipsAndOtherCompensation": {"valueNumber": 52000.0},
                    "FederalIncomeTaxWithheld": {"valueNumber": 6300.0},
                    "DependentCareBenefits": {"valueNumber": 7000.0}
                }
            }]
        }))
        .unwrap();
        let processor =
            DocumentProcessor::with_client(Box::new(MockAnalysisClient::new().push_ok(result)));

        let ret = processor
            .process(
                &Uuid::new_v4(),
                b"w2 bytes",
                DocumentType::W2,
                Form1040Data::default(),
            )
            .unwrap();

        // 52,000 wages + 2,000 taxable dependent care above the cap.
        assert_eq!(ret.wages, 54_000.0);
        assert_eq!(ret.federal_withholding, 6_300.0);
        let info = ret.personal_info.unwrap();
        assert_eq!(info.ssn, "123-45-6789");
        assert_eq!(info.source_document, "Enhanced W-2");
    }

    #[test]
    fn corrected_type_wins_mapper_dispatch() {
        // Asserted W-2, but the text is a 1099-DIV: the mapper must run
        // the dividend routing, not the wage routing.
        let result = serde_json::from_value(json!({
            "content": "Form 1099-DIV Dividends and Distributions",
            "documents": [{
                "docType": "tax.us.1099DIV",
                "fields": {
                    "Box1a": {"valueNumber": 310.25},
                    "Box1b": {"valueNumber": 280.0}
                }
            }]
        }))
        .unwrap();
        let processor =
            DocumentProcessor::with_client(Box::new(MockAnalysisClient::new().push_ok(result)));

        let ret = processor
            .process(
                &Uuid::new_v4(),
                b"div bytes",
                DocumentType::W2,
                Form1040Data::default(),
            )
            .unwrap();

        assert_eq!(ret.ordinary_dividends, 310.25);
        assert_eq!(ret.qualified_dividends, 280.0);
        assert_eq!(ret.wages, 0.0);
    }

    #[test]
    fn other_documents_pass_aggregate_through() {
        let data = ExtractedFieldData::new("cover letter text");
        let mut aggregate = Form1040Data::default();
        aggregate.wages = 10.0;
        let ret = map_document(DocumentType::Other, &data, aggregate);
        assert_eq!(ret.wages, 10.0);
        assert!(ret.personal_info.is_none());
    }

    #[test]
    fn sequential_folds_accumulate_across_documents() {
        let w2 = serde_json::from_value(json!({
            "content": "Form W-2 Wage and Tax Statement",
            "documents": [{"docType": "tax.us.w2", "fields": {
                "WagesTipsAndOtherCompensation": {"valueNumber": 52000.0}
            }}]
        }))
        .unwrap();
        let int = serde_json::from_value(json!({
            "content": "Form 1099-INT Interest Income",
            "documents": [{"docType": "tax.us.1099INT", "fields": {
                "Box1": {"valueNumber": 425.10}
            }}]
        }))
        .unwrap();
        let processor = DocumentProcessor::with_client(Box::new(
            MockAnalysisClient::new().push_ok(w2).push_ok(int),
        ));

        let ret = processor
            .process(
                &Uuid::new_v4(),
                b"w2",
                DocumentType::W2,
                Form1040Data::default(),
            )
            .unwrap();
        let ret = processor
            .process(&Uuid::new_v4(), b"int", DocumentType::Form1099Int, ret)
            .unwrap();

        assert_eq!(ret.wages, 52_000.0);
        assert_eq!(ret.taxable_interest, 425.10);
    }
}
