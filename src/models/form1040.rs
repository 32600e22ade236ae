//! Consolidated tax-return accumulator.
//!
//! `Form1040Data` is the single aggregate every form mapper folds into.
//! Top-level line amounts are additive: a mapper call adds its document's
//! contribution to the existing value, never overwrites. Sub-objects are
//! created lazily on first write and accumulate the same way. Identity
//! fields are overwrite-guarded by source precedence (a W-2 outranks
//! information returns).

use serde::{Deserialize, Serialize};

/// Taxpayer identity carried on the return, with a provenance trail of
/// every source document that contributed to the aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub ssn: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    /// Comma-separated list of source documents, in mapping order.
    pub source_document: String,
}

/// Itemized-deduction figures (Schedule A).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleA {
    pub investment_expenses: f64,
    pub noncash_liquidation_distributions: f64,
}

/// Additional income and adjustments (Schedule 1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule1 {
    pub rents: f64,
    pub royalties: f64,
    pub other_income: f64,
    pub nonemployee_compensation: f64,
    pub early_withdrawal_penalty: f64,
    pub hsa_contributions: f64,
}

/// State and local withholding/wage figures. Amounts accumulate;
/// identifiers are last-write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateData {
    pub employer_state_id: String,
    pub state_wages: f64,
    pub state_withholding: f64,
    pub local_wages: f64,
    pub local_withholding: f64,
    pub locality_name: String,
}

/// Foreign tax paid, routed toward the foreign tax credit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForeignTaxCredit {
    pub amount: f64,
    pub country: String,
}

/// Employer-plan contributions reported on W-2 Box 12.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RetirementContributions {
    pub pretax_deferrals: f64,
    pub roth_contributions: f64,
}

/// Side ledger for capital items taxed at special rates. Each amount is
/// also included in the aggregate capital-gain line; the ledger exists so
/// downstream rate calculations (25% §1250, 28% collectibles, §1202
/// exclusion, FIRPTA §897 tracking) see the components separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CapitalGainDetail {
    pub unrecaptured_1250_gain: f64,
    pub section_1202_gain: f64,
    pub collectibles_gain: f64,
    pub section_897_ordinary: f64,
    pub section_897_capital: f64,
    pub cash_liquidation_distributions: f64,
}

/// Dependent-care benefit split against the statutory exclusion cap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DependentCareBenefits {
    pub employer_provided: f64,
    pub excludable: f64,
    pub taxable: f64,
}

/// Adoption benefit split against the statutory exclusion cap (Box 12 T).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AdoptionBenefits {
    pub employer_provided: f64,
    pub excludable: f64,
    pub taxable: f64,
}

/// Markers with no effect on income lines. Recorded for cross-reference
/// and downstream filing decisions only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InformationalItems {
    pub fatca_filing_requirement: bool,
    pub statutory_employee: bool,
    pub retirement_plan: bool,
    pub third_party_sick_pay: bool,
    pub direct_sales: bool,
    pub employer_health_coverage: f64,
    pub group_term_life_cost: f64,
    pub section_199a_dividends: f64,
    pub nondividend_distributions: f64,
    pub specified_pab_interest: f64,
    pub bond_premium: f64,
    pub section_409a_deferrals: f64,
}

/// Other-tax accumulators fed by Box 12 and 1099-MISC figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OtherTaxes {
    pub uncollected_tip_tax: f64,
    pub excess_golden_parachute: f64,
}

/// A Box 12 entry with no specific tax rule, preserved verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnhandledBox12 {
    pub code: String,
    pub amount: f64,
    pub description: String,
}

/// The tax-return aggregate. See module docs for accumulation semantics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Form1040Data {
    pub personal_info: Option<PersonalInfo>,

    // Top-level line amounts, all additive.
    pub wages: f64,
    pub federal_withholding: f64,
    pub taxable_interest: f64,
    pub tax_exempt_interest: f64,
    pub ordinary_dividends: f64,
    pub qualified_dividends: f64,
    pub capital_gain: f64,

    // Sub-objects, lazily created on first write.
    pub schedule_a: Option<ScheduleA>,
    pub schedule_1: Option<Schedule1>,
    pub state_data: Option<StateData>,
    pub foreign_tax_credit: Option<ForeignTaxCredit>,
    pub retirement: Option<RetirementContributions>,
    pub capital_gain_detail: Option<CapitalGainDetail>,
    pub dependent_care: Option<DependentCareBenefits>,
    pub adoption_benefits: Option<AdoptionBenefits>,
    pub informational: Option<InformationalItems>,
    pub other_taxes: Option<OtherTaxes>,

    /// Unrecognized Box 12 codes, preserved in document order.
    pub box12_overflow: Vec<UnhandledBox12>,
}

impl Form1040Data {
    pub fn schedule_a_mut(&mut self) -> &mut ScheduleA {
        self.schedule_a.get_or_insert_with(Default::default)
    }

    pub fn schedule_1_mut(&mut self) -> &mut Schedule1 {
        self.schedule_1.get_or_insert_with(Default::default)
    }

    pub fn state_data_mut(&mut self) -> &mut StateData {
        self.state_data.get_or_insert_with(Default::default)
    }

    pub fn foreign_tax_credit_mut(&mut self) -> &mut ForeignTaxCredit {
        self.foreign_tax_credit.get_or_insert_with(Default::default)
    }

    pub fn retirement_mut(&mut self) -> &mut RetirementContributions {
        self.retirement.get_or_insert_with(Default::default)
    }

    pub fn capital_gain_detail_mut(&mut self) -> &mut CapitalGainDetail {
        self.capital_gain_detail.get_or_insert_with(Default::default)
    }

    pub fn dependent_care_mut(&mut self) -> &mut DependentCareBenefits {
        self.dependent_care.get_or_insert_with(Default::default)
    }

    pub fn adoption_benefits_mut(&mut self) -> &mut AdoptionBenefits {
        self.adoption_benefits.get_or_insert_with(Default::default)
    }

    pub fn informational_mut(&mut self) -> &mut InformationalItems {
        self.informational.get_or_insert_with(Default::default)
    }

    pub fn other_taxes_mut(&mut self) -> &mut OtherTaxes {
        self.other_taxes.get_or_insert_with(Default::default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_objects_created_lazily() {
        let mut ret = Form1040Data::default();
        assert!(ret.schedule_a.is_none());
        ret.schedule_a_mut().investment_expenses += 25.0;
        assert_eq!(ret.schedule_a.unwrap().investment_expenses, 25.0);
    }

    #[test]
    fn line_amounts_accumulate() {
        let mut ret = Form1040Data::default();
        ret.wages += 50_000.0;
        ret.wages += 12_000.0;
        assert_eq!(ret.wages, 62_000.0);
    }

    #[test]
    fn default_aggregate_has_zeroed_lines() {
        let ret = Form1040Data::default();
        assert_eq!(ret.wages, 0.0);
        assert_eq!(ret.capital_gain, 0.0);
        assert!(ret.personal_info.is_none());
        assert!(ret.box12_overflow.is_empty());
    }

    #[test]
    fn aggregate_serializes() {
        let mut ret = Form1040Data::default();
        ret.ordinary_dividends = 310.25;
        ret.foreign_tax_credit_mut().amount = 42.0;
        ret.foreign_tax_credit_mut().country = "France".into();
        let json = serde_json::to_string(&ret).unwrap();
        assert!(json.contains("\"ordinary_dividends\":310.25"));
        assert!(json.contains("\"country\":\"France\""));
    }
}
