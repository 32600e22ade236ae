//! Typed per-document records: named-field projections of the extraction
//! field bag, one field per IRS form box. Absent values stay `None`.

use serde::{Deserialize, Serialize};

use crate::pipeline::extraction::types::ExtractedFieldData;

/// One W-2 Box 12 code/amount pair. A document may carry zero or many;
/// document order is preserved for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Box12Entry {
    pub code: String,
    pub amount: f64,
}

/// W-2 Box 13 checkbox group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Box13Flags {
    pub statutory_employee: bool,
    pub retirement_plan: bool,
    pub third_party_sick_pay: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct W2Record {
    pub employee_name: Option<String>,
    pub employee_ssn: Option<String>,
    pub employee_address: Option<String>,
    pub employer_name: Option<String>,
    pub employer_ein: Option<String>,
    pub employer_address: Option<String>,
    /// Box 1.
    pub wages: Option<f64>,
    /// Box 2.
    pub federal_tax_withheld: Option<f64>,
    /// Box 3.
    pub social_security_wages: Option<f64>,
    /// Box 4.
    pub social_security_tax: Option<f64>,
    /// Box 5.
    pub medicare_wages: Option<f64>,
    /// Box 6.
    pub medicare_tax: Option<f64>,
    /// Box 7.
    pub social_security_tips: Option<f64>,
    /// Box 8.
    pub allocated_tips: Option<f64>,
    /// Box 10.
    pub dependent_care_benefits: Option<f64>,
    /// Box 11.
    pub nonqualified_plans: Option<f64>,
    /// Box 12, in document order.
    pub box12: Vec<Box12Entry>,
    /// Box 13.
    pub box13: Box13Flags,
    /// Box 14 free text.
    pub other: Option<String>,
    /// Box 15.
    pub employer_state_id: Option<String>,
    /// Box 16.
    pub state_wages: Option<f64>,
    /// Box 17.
    pub state_tax_withheld: Option<f64>,
    /// Box 18.
    pub local_wages: Option<f64>,
    /// Box 19.
    pub local_tax_withheld: Option<f64>,
    /// Box 20.
    pub locality_name: Option<String>,
}

impl W2Record {
    pub fn from_fields(data: &ExtractedFieldData) -> Self {
        let box13 = data
            .group("box13")
            .map(|g| Box13Flags {
                statutory_employee: g.get("statutory_employee").copied().unwrap_or(false),
                retirement_plan: g.get("retirement_plan").copied().unwrap_or(false),
                third_party_sick_pay: g.get("third_party_sick_pay").copied().unwrap_or(false),
            })
            .unwrap_or_default();

        Self {
            employee_name: data.text("employee_name").map(str::to_string),
            employee_ssn: data.text("employee_ssn").map(str::to_string),
            employee_address: data.text("employee_address").map(str::to_string),
            employer_name: data.text("employer_name").map(str::to_string),
            employer_ein: data.text("employer_ein").map(str::to_string),
            employer_address: data.text("employer_address").map(str::to_string),
            wages: data.amount("wages"),
            federal_tax_withheld: data.amount("federal_tax_withheld"),
            social_security_wages: data.amount("social_security_wages"),
            social_security_tax: data.amount("social_security_tax"),
            medicare_wages: data.amount("medicare_wages"),
            medicare_tax: data.amount("medicare_tax"),
            social_security_tips: data.amount("social_security_tips"),
            allocated_tips: data.amount("allocated_tips"),
            dependent_care_benefits: data.amount("dependent_care_benefits"),
            nonqualified_plans: data.amount("nonqualified_plans"),
            box12: data.codes("box12").map(<[_]>::to_vec).unwrap_or_default(),
            box13,
            other: data.text("other").map(str::to_string),
            employer_state_id: data.text("employer_state_id").map(str::to_string),
            state_wages: data.amount("state_wages"),
            state_tax_withheld: data.amount("state_tax_withheld"),
            local_wages: data.amount("local_wages"),
            local_tax_withheld: data.amount("local_tax_withheld"),
            locality_name: data.text("locality_name").map(str::to_string),
        }
    }
}

/// Payer/recipient identity shared by every 1099 variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayeeInfo {
    pub payer_name: Option<String>,
    pub payer_tin: Option<String>,
    pub recipient_name: Option<String>,
    pub recipient_tin: Option<String>,
    pub recipient_address: Option<String>,
}

impl PayeeInfo {
    fn from_fields(data: &ExtractedFieldData) -> Self {
        Self {
            payer_name: data.text("payer_name").map(str::to_string),
            payer_tin: data.text("payer_tin").map(str::to_string),
            recipient_name: data.text("recipient_name").map(str::to_string),
            recipient_tin: data.text("recipient_tin").map(str::to_string),
            recipient_address: data.text("recipient_address").map(str::to_string),
        }
    }
}

/// State-level figures shared by every 1099 variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State1099 {
    pub state_tax_withheld: Option<f64>,
    pub state_id: Option<String>,
    pub state_income: Option<f64>,
}

impl State1099 {
    fn from_fields(data: &ExtractedFieldData) -> Self {
        Self {
            state_tax_withheld: data.amount("state_tax_withheld"),
            state_id: data.text("state_id").map(str::to_string),
            state_income: data.amount("state_income"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Form1099IntRecord {
    pub payee: PayeeInfo,
    /// Box 1.
    pub interest_income: Option<f64>,
    /// Box 2.
    pub early_withdrawal_penalty: Option<f64>,
    /// Box 3.
    pub us_savings_bond_interest: Option<f64>,
    /// Box 4.
    pub federal_tax_withheld: Option<f64>,
    /// Box 5.
    pub investment_expenses: Option<f64>,
    /// Box 6.
    pub foreign_tax_paid: Option<f64>,
    /// Box 7.
    pub foreign_country: Option<String>,
    /// Box 8.
    pub tax_exempt_interest: Option<f64>,
    /// Box 9.
    pub specified_pab_interest: Option<f64>,
    /// Box 10.
    pub market_discount: Option<f64>,
    /// Box 11.
    pub bond_premium: Option<f64>,
    pub fatca_filing_requirement: Option<bool>,
    pub state: State1099,
}

impl Form1099IntRecord {
    pub fn from_fields(data: &ExtractedFieldData) -> Self {
        Self {
            payee: PayeeInfo::from_fields(data),
            interest_income: data.amount("interest_income"),
            early_withdrawal_penalty: data.amount("early_withdrawal_penalty"),
            us_savings_bond_interest: data.amount("us_savings_bond_interest"),
            federal_tax_withheld: data.amount("federal_tax_withheld"),
            investment_expenses: data.amount("investment_expenses"),
            foreign_tax_paid: data.amount("foreign_tax_paid"),
            foreign_country: data.text("foreign_country").map(str::to_string),
            tax_exempt_interest: data.amount("tax_exempt_interest"),
            specified_pab_interest: data.amount("specified_pab_interest"),
            market_discount: data.amount("market_discount"),
            bond_premium: data.amount("bond_premium"),
            fatca_filing_requirement: data.flag("fatca_filing_requirement"),
            state: State1099::from_fields(data),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Form1099DivRecord {
    pub payee: PayeeInfo,
    /// Box 1a.
    pub ordinary_dividends: Option<f64>,
    /// Box 1b.
    pub qualified_dividends: Option<f64>,
    /// Box 2a.
    pub total_capital_gain: Option<f64>,
    /// Box 2b.
    pub unrecaptured_1250_gain: Option<f64>,
    /// Box 2c.
    pub section_1202_gain: Option<f64>,
    /// Box 2d.
    pub collectibles_gain: Option<f64>,
    /// Box 2e.
    pub section_897_ordinary: Option<f64>,
    /// Box 2f.
    pub section_897_capital: Option<f64>,
    /// Box 3.
    pub nondividend_distributions: Option<f64>,
    /// Box 4.
    pub federal_tax_withheld: Option<f64>,
    /// Box 5.
    pub section_199a_dividends: Option<f64>,
    /// Box 6.
    pub investment_expenses: Option<f64>,
    /// Box 7.
    pub foreign_tax_paid: Option<f64>,
    /// Box 8.
    pub foreign_country: Option<String>,
    /// Box 9.
    pub cash_liquidation: Option<f64>,
    /// Box 10.
    pub noncash_liquidation: Option<f64>,
    /// Box 12.
    pub exempt_interest_dividends: Option<f64>,
    /// Box 13.
    pub specified_pab_dividends: Option<f64>,
    pub fatca_filing_requirement: Option<bool>,
    pub state: State1099,
}

impl Form1099DivRecord {
    pub fn from_fields(data: &ExtractedFieldData) -> Self {
        Self {
            payee: PayeeInfo::from_fields(data),
            ordinary_dividends: data.amount("ordinary_dividends"),
            qualified_dividends: data.amount("qualified_dividends"),
            total_capital_gain: data.amount("total_capital_gain"),
            unrecaptured_1250_gain: data.amount("unrecaptured_1250_gain"),
            section_1202_gain: data.amount("section_1202_gain"),
            collectibles_gain: data.amount("collectibles_gain"),
            section_897_ordinary: data.amount("section_897_ordinary"),
            section_897_capital: data.amount("section_897_capital"),
            nondividend_distributions: data.amount("nondividend_distributions"),
            federal_tax_withheld: data.amount("federal_tax_withheld"),
            section_199a_dividends: data.amount("section_199a_dividends"),
            investment_expenses: data.amount("investment_expenses"),
            foreign_tax_paid: data.amount("foreign_tax_paid"),
            foreign_country: data.text("foreign_country").map(str::to_string),
            cash_liquidation: data.amount("cash_liquidation"),
            noncash_liquidation: data.amount("noncash_liquidation"),
            exempt_interest_dividends: data.amount("exempt_interest_dividends"),
            specified_pab_dividends: data.amount("specified_pab_dividends"),
            fatca_filing_requirement: data.flag("fatca_filing_requirement"),
            state: State1099::from_fields(data),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Form1099MiscRecord {
    pub payee: PayeeInfo,
    /// Box 1.
    pub rents: Option<f64>,
    /// Box 2.
    pub royalties: Option<f64>,
    /// Box 3.
    pub other_income: Option<f64>,
    /// Box 4.
    pub federal_tax_withheld: Option<f64>,
    /// Box 5.
    pub fishing_boat_proceeds: Option<f64>,
    /// Box 6.
    pub medical_payments: Option<f64>,
    /// Box 7 checkbox.
    pub direct_sales: Option<bool>,
    /// Box 8.
    pub substitute_payments: Option<f64>,
    /// Box 9.
    pub crop_insurance_proceeds: Option<f64>,
    /// Box 10.
    pub gross_attorney_proceeds: Option<f64>,
    /// Box 11.
    pub fish_purchased: Option<f64>,
    /// Box 12.
    pub section_409a_deferrals: Option<f64>,
    /// Box 14.
    pub excess_golden_parachute: Option<f64>,
    /// Box 15.
    pub nonqualified_deferred_comp: Option<f64>,
    pub fatca_filing_requirement: Option<bool>,
    pub state: State1099,
}

impl Form1099MiscRecord {
    pub fn from_fields(data: &ExtractedFieldData) -> Self {
        Self {
            payee: PayeeInfo::from_fields(data),
            rents: data.amount("rents"),
            royalties: data.amount("royalties"),
            other_income: data.amount("other_income"),
            federal_tax_withheld: data.amount("federal_tax_withheld"),
            fishing_boat_proceeds: data.amount("fishing_boat_proceeds"),
            medical_payments: data.amount("medical_payments"),
            direct_sales: data.flag("direct_sales"),
            substitute_payments: data.amount("substitute_payments"),
            crop_insurance_proceeds: data.amount("crop_insurance_proceeds"),
            gross_attorney_proceeds: data.amount("gross_attorney_proceeds"),
            fish_purchased: data.amount("fish_purchased"),
            section_409a_deferrals: data.amount("section_409a_deferrals"),
            excess_golden_parachute: data.amount("excess_golden_parachute"),
            nonqualified_deferred_comp: data.amount("nonqualified_deferred_comp"),
            fatca_filing_requirement: data.flag("fatca_filing_requirement"),
            state: State1099::from_fields(data),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Form1099NecRecord {
    pub payee: PayeeInfo,
    /// Box 1.
    pub nonemployee_compensation: Option<f64>,
    /// Box 2 checkbox.
    pub direct_sales: Option<bool>,
    /// Box 4.
    pub federal_tax_withheld: Option<f64>,
    pub state: State1099,
}

impl Form1099NecRecord {
    pub fn from_fields(data: &ExtractedFieldData) -> Self {
        Self {
            payee: PayeeInfo::from_fields(data),
            nonemployee_compensation: data.amount("nonemployee_compensation"),
            direct_sales: data.flag("direct_sales"),
            federal_tax_withheld: data.amount("federal_tax_withheld"),
            state: State1099::from_fields(data),
        }
    }
}
