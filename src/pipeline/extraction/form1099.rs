//! 1099 field extraction for the INT/DIV/MISC/NEC variants.
//!
//! All four forms come back from the one unified 1099 model, so they share
//! payer/recipient and state plumbing; each variant adds its own box map.
//! Every extractor has two paths: structured fields from the specialized
//! model, and a text heuristic over plain OCR output. Both emit the same
//! canonical field names.

use std::collections::HashMap;

use super::fields::{probe_amount, probe_text};
use super::types::{AnalyzeResult, ExtractedFieldData, ProviderField};

// ═══════════════════════════════════════════
// Shared helpers
// ═══════════════════════════════════════════

fn payee_from_provider(fields: &HashMap<String, ProviderField>, data: &mut ExtractedFieldData) {
    if let Some(payer) = fields.get("Payer") {
        set_member(data, "payer_name", payer, "Name");
        set_member(data, "payer_tin", payer, "TIN");
    }
    if let Some(recipient) = fields.get("Recipient") {
        set_member(data, "recipient_name", recipient, "Name");
        set_member(data, "recipient_tin", recipient, "TIN");
        set_member(data, "recipient_address", recipient, "Address");
    }
}

fn payee_from_text(result: &AnalyzeResult, data: &mut ExtractedFieldData) {
    let pairs = &result.key_value_pairs;
    let content = &result.content;
    for (name, label) in [
        ("payer_name", "payer's name"),
        ("payer_tin", "payer's tin"),
        ("recipient_name", "recipient's name"),
        ("recipient_tin", "recipient's tin"),
        ("recipient_address", "street address"),
    ] {
        if let Some(s) = probe_text(pairs, content, label) {
            data.set_text(name, s);
        }
    }
}

fn state_from_provider(fields: &HashMap<String, ProviderField>, data: &mut ExtractedFieldData) {
    let Some(state) = fields
        .get("StateTaxesWithheld")
        .and_then(|f| f.value_array.as_ref())
        .and_then(|a| a.first())
    else {
        return;
    };
    if let Some(n) = state.member("StateTaxWithheld").and_then(ProviderField::as_amount) {
        data.set_amount("state_tax_withheld", n);
    }
    if let Some(s) = state.member("StateId").and_then(ProviderField::as_text) {
        data.set_text("state_id", s.to_string());
    }
    if let Some(n) = state.member("StateIncome").and_then(ProviderField::as_amount) {
        data.set_amount("state_income", n);
    }
}

fn state_from_text(result: &AnalyzeResult, data: &mut ExtractedFieldData) {
    let pairs = &result.key_value_pairs;
    let content = &result.content;
    if let Some(n) = probe_amount(pairs, content, "state tax withheld") {
        data.set_amount("state_tax_withheld", n);
    }
    if let Some(s) = probe_text(pairs, content, "state/payer's state no") {
        data.set_text("state_id", s);
    }
    if let Some(n) = probe_amount(pairs, content, "state income") {
        data.set_amount("state_income", n);
    }
}

fn fatca_from_provider(fields: &HashMap<String, ProviderField>, data: &mut ExtractedFieldData) {
    if let Some(flag) = fields
        .get("FatcaFilingRequirement")
        .and_then(ProviderField::as_flag)
    {
        data.set_flag("fatca_filing_requirement", flag);
    }
}

fn fatca_from_text(result: &AnalyzeResult, data: &mut ExtractedFieldData) {
    if let Some(v) = super::fields::kv_lookup(&result.key_value_pairs, "fatca filing") {
        data.set_flag("fatca_filing_requirement", super::fields::parse_flag(v));
    }
}

fn set_member(data: &mut ExtractedFieldData, name: &str, field: &ProviderField, member: &str) {
    if let Some(s) = field.member(member).and_then(ProviderField::as_text) {
        data.set_text(name, s.to_string());
    }
}

fn set_amounts_from_provider(
    fields: &HashMap<String, ProviderField>,
    data: &mut ExtractedFieldData,
    boxes: &[(&str, &str)],
) {
    for (name, provider_name) in boxes {
        if let Some(n) = fields.get(*provider_name).and_then(ProviderField::as_amount) {
            data.set_amount(name, n);
        }
    }
}

fn set_amounts_from_text(
    result: &AnalyzeResult,
    data: &mut ExtractedFieldData,
    labels: &[(&str, &str)],
) {
    for (name, label) in labels {
        if let Some(n) = probe_amount(&result.key_value_pairs, &result.content, label) {
            data.set_amount(name, n);
        }
    }
}

// ═══════════════════════════════════════════
// 1099-INT
// ═══════════════════════════════════════════

pub mod int {
    use super::*;

    const PROVIDER_BOXES: &[(&str, &str)] = &[
        ("interest_income", "Box1"),
        ("early_withdrawal_penalty", "Box2"),
        ("us_savings_bond_interest", "Box3"),
        ("federal_tax_withheld", "Box4"),
        ("investment_expenses", "Box5"),
        ("foreign_tax_paid", "Box6"),
        ("tax_exempt_interest", "Box8"),
        ("specified_pab_interest", "Box9"),
        ("market_discount", "Box10"),
        ("bond_premium", "Box11"),
    ];

    const TEXT_LABELS: &[(&str, &str)] = &[
        ("interest_income", "interest income"),
        ("early_withdrawal_penalty", "early withdrawal penalty"),
        ("us_savings_bond_interest", "u.s. savings bonds"),
        ("federal_tax_withheld", "federal income tax withheld"),
        ("investment_expenses", "investment expenses"),
        ("foreign_tax_paid", "foreign tax paid"),
        ("tax_exempt_interest", "tax-exempt interest"),
        ("specified_pab_interest", "specified private activity bond"),
        ("market_discount", "market discount"),
        ("bond_premium", "bond premium"),
    ];

    pub(crate) fn from_provider(result: &AnalyzeResult) -> ExtractedFieldData {
        let mut data = ExtractedFieldData::new(&result.content);
        let Some(document) = result.documents.first() else {
            return data;
        };
        let fields = &document.fields;
        payee_from_provider(fields, &mut data);
        set_amounts_from_provider(fields, &mut data, PROVIDER_BOXES);
        if let Some(s) = fields.get("Box7").and_then(ProviderField::as_text) {
            data.set_text("foreign_country", s.to_string());
        }
        fatca_from_provider(fields, &mut data);
        state_from_provider(fields, &mut data);
        data
    }

    pub(crate) fn from_text(result: &AnalyzeResult) -> ExtractedFieldData {
        let mut data = ExtractedFieldData::new(&result.content);
        payee_from_text(result, &mut data);
        set_amounts_from_text(result, &mut data, TEXT_LABELS);
        if let Some(s) = probe_text(
            &result.key_value_pairs,
            &result.content,
            "foreign country",
        ) {
            data.set_text("foreign_country", s);
        }
        fatca_from_text(result, &mut data);
        state_from_text(result, &mut data);
        data
    }
}

// ═══════════════════════════════════════════
// 1099-DIV
// ═══════════════════════════════════════════

pub mod div {
    use super::*;

    const PROVIDER_BOXES: &[(&str, &str)] = &[
        ("ordinary_dividends", "Box1a"),
        ("qualified_dividends", "Box1b"),
        ("total_capital_gain", "Box2a"),
        ("unrecaptured_1250_gain", "Box2b"),
        ("section_1202_gain", "Box2c"),
        ("collectibles_gain", "Box2d"),
        ("section_897_ordinary", "Box2e"),
        ("section_897_capital", "Box2f"),
        ("nondividend_distributions", "Box3"),
        ("federal_tax_withheld", "Box4"),
        ("section_199a_dividends", "Box5"),
        ("investment_expenses", "Box6"),
        ("foreign_tax_paid", "Box7"),
        ("cash_liquidation", "Box9"),
        ("noncash_liquidation", "Box10"),
        ("exempt_interest_dividends", "Box12"),
        ("specified_pab_dividends", "Box13"),
    ];

    const TEXT_LABELS: &[(&str, &str)] = &[
        ("ordinary_dividends", "total ordinary dividends"),
        ("qualified_dividends", "qualified dividends"),
        ("total_capital_gain", "total capital gain distr"),
        ("unrecaptured_1250_gain", "unrecap. sec. 1250 gain"),
        ("section_1202_gain", "section 1202 gain"),
        ("collectibles_gain", "collectibles (28%) gain"),
        ("section_897_ordinary", "section 897 ordinary dividends"),
        ("section_897_capital", "section 897 capital gain"),
        ("nondividend_distributions", "nondividend distributions"),
        ("federal_tax_withheld", "federal income tax withheld"),
        ("section_199a_dividends", "section 199a dividends"),
        ("investment_expenses", "investment expenses"),
        ("foreign_tax_paid", "foreign tax paid"),
        ("cash_liquidation", "cash liquidation distributions"),
        ("noncash_liquidation", "noncash liquidation distributions"),
        ("exempt_interest_dividends", "exempt-interest dividends"),
        ("specified_pab_dividends", "specified private activity bond"),
    ];

    pub(crate) fn from_provider(result: &AnalyzeResult) -> ExtractedFieldData {
        let mut data = ExtractedFieldData::new(&result.content);
        let Some(document) = result.documents.first() else {
            return data;
        };
        let fields = &document.fields;
        payee_from_provider(fields, &mut data);
        set_amounts_from_provider(fields, &mut data, PROVIDER_BOXES);
        if let Some(s) = fields.get("Box8").and_then(ProviderField::as_text) {
            data.set_text("foreign_country", s.to_string());
        }
        fatca_from_provider(fields, &mut data);
        state_from_provider(fields, &mut data);
        data
    }

    pub(crate) fn from_text(result: &AnalyzeResult) -> ExtractedFieldData {
        let mut data = ExtractedFieldData::new(&result.content);
        payee_from_text(result, &mut data);
        set_amounts_from_text(result, &mut data, TEXT_LABELS);
        if let Some(s) = probe_text(
            &result.key_value_pairs,
            &result.content,
            "foreign country",
        ) {
            data.set_text("foreign_country", s);
        }
        fatca_from_text(result, &mut data);
        state_from_text(result, &mut data);
        data
    }
}

// ═══════════════════════════════════════════
// 1099-MISC
// ═══════════════════════════════════════════

pub mod misc {
    use super::*;
    use crate::pipeline::extraction::fields::{kv_lookup, parse_flag};

    const PROVIDER_BOXES: &[(&str, &str)] = &[
        ("rents", "Box1"),
        ("royalties", "Box2"),
        ("other_income", "Box3"),
        ("federal_tax_withheld", "Box4"),
        ("fishing_boat_proceeds", "Box5"),
        ("medical_payments", "Box6"),
        ("substitute_payments", "Box8"),
        ("crop_insurance_proceeds", "Box9"),
        ("gross_attorney_proceeds", "Box10"),
        ("fish_purchased", "Box11"),
        ("section_409a_deferrals", "Box12"),
        ("excess_golden_parachute", "Box14"),
        ("nonqualified_deferred_comp", "Box15"),
    ];

    const TEXT_LABELS: &[(&str, &str)] = &[
        ("rents", "rents"),
        ("royalties", "royalties"),
        ("other_income", "other income"),
        ("federal_tax_withheld", "federal income tax withheld"),
        ("fishing_boat_proceeds", "fishing boat proceeds"),
        ("medical_payments", "medical and health care payments"),
        ("substitute_payments", "substitute payments"),
        ("crop_insurance_proceeds", "crop insurance proceeds"),
        ("gross_attorney_proceeds", "gross proceeds paid to an attorney"),
        ("fish_purchased", "fish purchased for resale"),
        ("section_409a_deferrals", "section 409a deferrals"),
        ("excess_golden_parachute", "excess golden parachute"),
        ("nonqualified_deferred_comp", "nonqualified deferred compensation"),
    ];

    pub(crate) fn from_provider(result: &AnalyzeResult) -> ExtractedFieldData {
        let mut data = ExtractedFieldData::new(&result.content);
        let Some(document) = result.documents.first() else {
            return data;
        };
        let fields = &document.fields;
        payee_from_provider(fields, &mut data);
        set_amounts_from_provider(fields, &mut data, PROVIDER_BOXES);
        if let Some(flag) = fields.get("Box7").and_then(ProviderField::as_flag) {
            data.set_flag("direct_sales", flag);
        }
        fatca_from_provider(fields, &mut data);
        state_from_provider(fields, &mut data);
        data
    }

    pub(crate) fn from_text(result: &AnalyzeResult) -> ExtractedFieldData {
        let mut data = ExtractedFieldData::new(&result.content);
        payee_from_text(result, &mut data);
        set_amounts_from_text(result, &mut data, TEXT_LABELS);
        if let Some(v) = kv_lookup(&result.key_value_pairs, "direct sales") {
            data.set_flag("direct_sales", parse_flag(v));
        }
        fatca_from_text(result, &mut data);
        state_from_text(result, &mut data);
        data
    }
}

// ═══════════════════════════════════════════
// 1099-NEC
// ═══════════════════════════════════════════

pub mod nec {
    use super::*;
    use crate::pipeline::extraction::fields::{kv_lookup, parse_flag};

    pub(crate) fn from_provider(result: &AnalyzeResult) -> ExtractedFieldData {
        let mut data = ExtractedFieldData::new(&result.content);
        let Some(document) = result.documents.first() else {
            return data;
        };
        let fields = &document.fields;
        payee_from_provider(fields, &mut data);
        set_amounts_from_provider(
            fields,
            &mut data,
            &[
                ("nonemployee_compensation", "Box1"),
                ("federal_tax_withheld", "Box4"),
            ],
        );
        if let Some(flag) = fields.get("Box2").and_then(ProviderField::as_flag) {
            data.set_flag("direct_sales", flag);
        }
        state_from_provider(fields, &mut data);
        data
    }

    pub(crate) fn from_text(result: &AnalyzeResult) -> ExtractedFieldData {
        let mut data = ExtractedFieldData::new(&result.content);
        payee_from_text(result, &mut data);
        set_amounts_from_text(
            result,
            &mut data,
            &[
                ("nonemployee_compensation", "nonemployee compensation"),
                ("federal_tax_withheld", "federal income tax withheld"),
            ],
        );
        if let Some(v) = kv_lookup(&result.key_value_pairs, "direct sales") {
            data.set_flag("direct_sales", parse_flag(v));
        }
        state_from_text(result, &mut data);
        data
    }
}
