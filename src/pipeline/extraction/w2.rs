//! W-2 field extraction: structured path over the tax-specialized model's
//! fields, and a text-heuristic path over plain OCR output. Both paths
//! emit the same canonical field names so downstream projection and
//! mapping are path-agnostic.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use super::fields::{parse_amount, parse_flag, probe_amount, probe_text};
use super::types::{AnalyzeResult, ExtractedFieldData, ProviderField};
use crate::models::records::Box12Entry;

pub(crate) fn from_provider(result: &AnalyzeResult) -> ExtractedFieldData {
    let mut data = ExtractedFieldData::new(&result.content);
    let Some(document) = result.documents.first() else {
        return data;
    };
    let fields = &document.fields;

    if let Some(employee) = fields.get("Employee") {
        set_text_member(&mut data, "employee_name", employee, "Name");
        set_text_member(&mut data, "employee_ssn", employee, "SocialSecurityNumber");
        set_text_member(&mut data, "employee_address", employee, "Address");
    }
    if let Some(employer) = fields.get("Employer") {
        set_text_member(&mut data, "employer_name", employer, "Name");
        set_text_member(&mut data, "employer_ein", employer, "IdNumber");
        set_text_member(&mut data, "employer_address", employer, "Address");
    }

    set_amount(&mut data, "wages", fields.get("WagesTipsAndOtherCompensation"));
    set_amount(&mut data, "federal_tax_withheld", fields.get("FederalIncomeTaxWithheld"));
    set_amount(&mut data, "social_security_wages", fields.get("SocialSecurityWages"));
    set_amount(&mut data, "social_security_tax", fields.get("SocialSecurityTaxWithheld"));
    set_amount(&mut data, "medicare_wages", fields.get("MedicareWagesAndTips"));
    set_amount(&mut data, "medicare_tax", fields.get("MedicareTaxWithheld"));
    set_amount(&mut data, "social_security_tips", fields.get("SocialSecurityTips"));
    set_amount(&mut data, "allocated_tips", fields.get("AllocatedTips"));
    set_amount(&mut data, "dependent_care_benefits", fields.get("DependentCareBenefits"));
    set_amount(&mut data, "nonqualified_plans", fields.get("NonQualifiedPlans"));

    if let Some(entries) = fields.get("AdditionalInfo").and_then(|f| f.value_array.as_ref()) {
        let codes: Vec<Box12Entry> = entries
            .iter()
            .filter_map(|entry| {
                let code = entry.member("LetterCode")?.as_text()?.to_uppercase();
                let amount = entry.member("Amount")?.as_amount()?;
                Some(Box12Entry { code, amount })
            })
            .collect();
        if !codes.is_empty() {
            data.set_codes("box12", codes);
        }
    }

    let mut box13 = BTreeMap::new();
    for (name, provider_name) in [
        ("statutory_employee", "IsStatutoryEmployee"),
        ("retirement_plan", "IsRetirementPlan"),
        ("third_party_sick_pay", "IsThirdPartySickPay"),
    ] {
        if let Some(flag) = fields.get(provider_name).and_then(ProviderField::as_flag) {
            box13.insert(name.to_string(), flag);
        }
    }
    if !box13.is_empty() {
        data.set_group("box13", box13);
    }

    if let Some(other) = fields.get("Other").and_then(ProviderField::as_text) {
        data.set_text("other", other.to_string());
    }

    if let Some(state) = fields
        .get("StateTaxInfos")
        .and_then(|f| f.value_array.as_ref())
        .and_then(|a| a.first())
    {
        set_text_member(&mut data, "employer_state_id", state, "EmployerStateIdNumber");
        if let Some(n) = state.member("StateWagesTipsEtc").and_then(ProviderField::as_amount) {
            data.set_amount("state_wages", n);
        }
        if let Some(n) = state.member("StateIncomeTax").and_then(ProviderField::as_amount) {
            data.set_amount("state_tax_withheld", n);
        }
    }
    if let Some(local) = fields
        .get("LocalTaxInfos")
        .and_then(|f| f.value_array.as_ref())
        .and_then(|a| a.first())
    {
        if let Some(n) = local.member("LocalWagesTipsEtc").and_then(ProviderField::as_amount) {
            data.set_amount("local_wages", n);
        }
        if let Some(n) = local.member("LocalIncomeTax").and_then(ProviderField::as_amount) {
            data.set_amount("local_tax_withheld", n);
        }
        set_text_member(&mut data, "locality_name", local, "LocalityName");
    }

    data
}

pub(crate) fn from_text(result: &AnalyzeResult) -> ExtractedFieldData {
    let mut data = ExtractedFieldData::new(&result.content);
    let pairs = &result.key_value_pairs;
    let content = &result.content;

    for (name, label) in [
        ("wages", "wages, tips, other compensation"),
        ("federal_tax_withheld", "federal income tax withheld"),
        ("social_security_wages", "social security wages"),
        ("social_security_tax", "social security tax withheld"),
        ("medicare_wages", "medicare wages and tips"),
        ("medicare_tax", "medicare tax withheld"),
        ("social_security_tips", "social security tips"),
        ("allocated_tips", "allocated tips"),
        ("dependent_care_benefits", "dependent care benefits"),
        ("nonqualified_plans", "nonqualified plans"),
        ("state_wages", "state wages, tips"),
        ("state_tax_withheld", "state income tax"),
        ("local_wages", "local wages, tips"),
        ("local_tax_withheld", "local income tax"),
    ] {
        if let Some(n) = probe_amount(pairs, content, label) {
            data.set_amount(name, n);
        }
    }

    for (name, label) in [
        ("employee_ssn", "employee's social security number"),
        ("employee_name", "employee's first name and initial"),
        ("employer_name", "employer's name, address"),
        ("employer_ein", "employer identification number"),
        ("employer_state_id", "employer's state id number"),
        ("locality_name", "locality name"),
    ] {
        if let Some(s) = probe_text(pairs, content, label) {
            data.set_text(name, s);
        }
    }

    let codes = box12_from_text(content);
    if !codes.is_empty() {
        data.set_codes("box12", codes);
    }

    let mut box13 = BTreeMap::new();
    for (name, label) in [
        ("statutory_employee", "statutory employee"),
        ("retirement_plan", "retirement plan"),
        ("third_party_sick_pay", "third-party sick pay"),
    ] {
        if let Some(v) = super::fields::kv_lookup(pairs, label) {
            box13.insert(name.to_string(), parse_flag(v));
        }
    }
    if !box13.is_empty() {
        data.set_group("box13", box13);
    }

    data
}

fn box12_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // "12a D 4,000.00" / "12b DD $9,200" / "12 W 3000"
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*12[a-d]?\s+([A-Z]{1,2})\s+\$?([\d,]+(?:\.\d{1,2})?)\s*$")
            .expect("box12 regex")
    })
}

fn box12_from_text(content: &str) -> Vec<Box12Entry> {
    box12_line()
        .captures_iter(content)
        .map(|cap| Box12Entry {
            code: cap[1].to_string(),
            amount: parse_amount(&cap[2]),
        })
        .collect()
}

fn set_amount(data: &mut ExtractedFieldData, name: &str, field: Option<&ProviderField>) {
    if let Some(n) = field.and_then(ProviderField::as_amount) {
        data.set_amount(name, n);
    }
}

fn set_text_member(data: &mut ExtractedFieldData, name: &str, field: &ProviderField, member: &str) {
    if let Some(s) = field.member(member).and_then(ProviderField::as_text) {
        data.set_text(name, s.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider_w2() -> AnalyzeResult {
        serde_json::from_value(json!({
            "content": "Form W-2 Wage and Tax Statement",
            "documents": [{
                "docType": "tax.us.w2",
                "fields": {
                    "Employee": {"valueObject": {
                        "Name": {"valueString": "Jane A Doe"},
                        "SocialSecurityNumber": {"valueString": "123-45-6789"},
                        "Address": {"content": "12 Maple St, Springfield, IL 62704"}
                    }},
                    "Employer": {"valueObject": {
                        "Name": {"valueString": "Acme Corp"},
                        "IdNumber": {"valueString": "98-7654321"}
                    }},
                    "WagesTipsAndOtherCompensation": {"valueNumber": 52000.0},
                    "FederalIncomeTaxWithheld": {"content": "$6,300.00"},
                    "DependentCareBenefits": {"valueNumber": 7000.0},
                    "AdditionalInfo": {"valueArray": [
                        {"valueObject": {
                            "LetterCode": {"valueString": "D"},
                            "Amount": {"valueNumber": 4000.0}
                        }},
                        {"valueObject": {
                            "LetterCode": {"valueString": "dd"},
                            "Amount": {"content": "$9,200.00"}
                        }}
                    ]},
                    "IsRetirementPlan": {"valueBoolean": true},
                    "StateTaxInfos": {"valueArray": [
                        {"valueObject": {
                            "EmployerStateIdNumber": {"valueString": "IL-001234"},
                            "StateWagesTipsEtc": {"valueNumber": 52000.0},
                            "StateIncomeTax": {"valueNumber": 2600.0}
                        }}
                    ]}
                }
            }]
        }))
        .unwrap()
    }

    #[test]
    fn structured_path_populates_canonical_names() {
        let data = from_provider(&provider_w2());
        assert_eq!(data.text("employee_name"), Some("Jane A Doe"));
        assert_eq!(data.text("employee_ssn"), Some("123-45-6789"));
        assert_eq!(data.text("employer_name"), Some("Acme Corp"));
        assert_eq!(data.amount("wages"), Some(52_000.0));
        assert_eq!(data.amount("federal_tax_withheld"), Some(6_300.0));
        assert_eq!(data.amount("dependent_care_benefits"), Some(7_000.0));
        assert_eq!(data.text("employer_state_id"), Some("IL-001234"));
        assert_eq!(data.amount("state_tax_withheld"), Some(2_600.0));

        let codes = data.codes("box12").unwrap();
        assert_eq!(codes.len(), 2);
        assert_eq!(codes[0].code, "D");
        // Letter codes normalize to uppercase.
        assert_eq!(codes[1].code, "DD");
        assert_eq!(codes[1].amount, 9_200.0);

        assert_eq!(
            data.group("box13").unwrap().get("retirement_plan"),
            Some(&true)
        );
    }

    #[test]
    fn structured_path_without_documents_is_empty() {
        let result = AnalyzeResult {
            content: "blank page".into(),
            ..Default::default()
        };
        let data = from_provider(&result);
        assert!(data.fields.is_empty());
        assert_eq!(data.full_text, "blank page");
    }

    #[test]
    fn text_path_reads_labeled_lines() {
        let result = AnalyzeResult {
            content: "Form W-2 Wage and Tax Statement\n\
                      1 Wages, tips, other compensation $52,000.00\n\
                      2 Federal income tax withheld 6,300.00\n\
                      10 Dependent care benefits\n7,000.00\n\
                      12a D 4,000.00\n\
                      12b DD 9,200.00\n"
                .into(),
            ..Default::default()
        };
        let data = from_text(&result);
        assert_eq!(data.amount("wages"), Some(52_000.0));
        assert_eq!(data.amount("federal_tax_withheld"), Some(6_300.0));
        assert_eq!(data.amount("dependent_care_benefits"), Some(7_000.0));
        let codes = data.codes("box12").unwrap();
        assert_eq!(codes.len(), 2);
        assert_eq!(codes[0].code, "D");
        assert_eq!(codes[0].amount, 4_000.0);
        assert_eq!(codes[1].code, "DD");
    }

    #[test]
    fn both_paths_are_projection_agnostic() {
        // The same logical data through either path lands under the same
        // canonical names, so mapping never needs to know the path.
        let structured = from_provider(&provider_w2());
        let text = from_text(&AnalyzeResult {
            content: "1 Wages, tips, other compensation $52,000.00".into(),
            ..Default::default()
        });
        assert_eq!(structured.amount("wages"), text.amount("wages"));
    }
}
