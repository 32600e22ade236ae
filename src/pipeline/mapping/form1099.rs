//! 1099 → Form 1040 mapping. The four variants share recipient-identity,
//! state, and FATCA handling; each contributes its own box→line routing.
//! All mappers are pure folds over the aggregate.

use super::identity::{apply_identity, Identity};
use crate::models::form1040::Form1040Data;
use crate::models::records::{PayeeInfo, State1099};

fn apply_recipient(aggregate: &mut Form1040Data, payee: &PayeeInfo, source: &str) {
    apply_identity(
        aggregate,
        &Identity {
            name: payee.recipient_name.as_deref(),
            ssn: payee.recipient_tin.as_deref(),
            address: payee.recipient_address.as_deref(),
        },
        source,
    );
}

fn apply_state(aggregate: &mut Form1040Data, state: &State1099) {
    if let Some(id) = &state.state_id {
        aggregate.state_data_mut().employer_state_id = id.clone();
    }
    if let Some(v) = state.state_income {
        aggregate.state_data_mut().state_wages += v;
    }
    if let Some(v) = state.state_tax_withheld {
        aggregate.state_data_mut().state_withholding += v;
    }
}

fn apply_foreign_tax(aggregate: &mut Form1040Data, paid: Option<f64>, country: Option<&str>) {
    if let Some(amount) = paid.filter(|v| *v != 0.0) {
        let credit = aggregate.foreign_tax_credit_mut();
        credit.amount += amount;
        if let Some(country) = country {
            credit.country = country.to_string();
        }
    }
}

fn apply_fatca(aggregate: &mut Form1040Data, flag: Option<bool>) {
    if flag == Some(true) {
        aggregate.informational_mut().fatca_filing_requirement = true;
    }
}

// ──────────────────────────────────────────────────────────────────────
// 1099-INT
// ──────────────────────────────────────────────────────────────────────

pub mod int {
    use super::*;
    use crate::models::records::Form1099IntRecord;

    pub const SOURCE_LABEL: &str = "Enhanced 1099-INT";

    pub fn map_1099_int(record: &Form1099IntRecord, mut aggregate: Form1040Data) -> Form1040Data {
        apply_recipient(&mut aggregate, &record.payee, SOURCE_LABEL);

        // Boxes 1, 3, and 10 are all taxable interest.
        aggregate.taxable_interest += record.interest_income.unwrap_or(0.0);
        aggregate.taxable_interest += record.us_savings_bond_interest.unwrap_or(0.0);
        aggregate.taxable_interest += record.market_discount.unwrap_or(0.0);
        aggregate.tax_exempt_interest += record.tax_exempt_interest.unwrap_or(0.0);
        aggregate.federal_withholding += record.federal_tax_withheld.unwrap_or(0.0);

        if let Some(v) = record.early_withdrawal_penalty.filter(|v| *v != 0.0) {
            aggregate.schedule_1_mut().early_withdrawal_penalty += v;
        }
        if let Some(v) = record.investment_expenses.filter(|v| *v != 0.0) {
            aggregate.schedule_a_mut().investment_expenses += v;
        }
        if let Some(v) = record.specified_pab_interest.filter(|v| *v != 0.0) {
            aggregate.informational_mut().specified_pab_interest += v;
        }
        if let Some(v) = record.bond_premium.filter(|v| *v != 0.0) {
            aggregate.informational_mut().bond_premium += v;
        }
        apply_foreign_tax(
            &mut aggregate,
            record.foreign_tax_paid,
            record.foreign_country.as_deref(),
        );
        apply_fatca(&mut aggregate, record.fatca_filing_requirement);
        apply_state(&mut aggregate, &record.state);

        aggregate
    }
}

// ──────────────────────────────────────────────────────────────────────
// 1099-DIV
// ──────────────────────────────────────────────────────────────────────

pub mod div {
    use super::*;
    use crate::models::records::Form1099DivRecord;

    pub const SOURCE_LABEL: &str = "Enhanced 1099-DIV";

    pub fn map_1099_div(record: &Form1099DivRecord, mut aggregate: Form1040Data) -> Form1040Data {
        apply_recipient(&mut aggregate, &record.payee, SOURCE_LABEL);

        aggregate.ordinary_dividends += record.ordinary_dividends.unwrap_or(0.0);
        aggregate.qualified_dividends += record.qualified_dividends.unwrap_or(0.0);
        aggregate.capital_gain += record.total_capital_gain.unwrap_or(0.0);
        aggregate.tax_exempt_interest += record.exempt_interest_dividends.unwrap_or(0.0);
        aggregate.federal_withholding += record.federal_tax_withheld.unwrap_or(0.0);

        // Special-rate capital items land on the capital-gain line and in
        // the side ledger for rate-specific downstream calculation.
        if let Some(v) = record.unrecaptured_1250_gain.filter(|v| *v != 0.0) {
            aggregate.capital_gain += v;
            aggregate.capital_gain_detail_mut().unrecaptured_1250_gain += v;
        }
        if let Some(v) = record.section_1202_gain.filter(|v| *v != 0.0) {
            aggregate.capital_gain += v;
            aggregate.capital_gain_detail_mut().section_1202_gain += v;
        }
        if let Some(v) = record.collectibles_gain.filter(|v| *v != 0.0) {
            aggregate.capital_gain += v;
            aggregate.capital_gain_detail_mut().collectibles_gain += v;
        }
        if let Some(v) = record.section_897_ordinary.filter(|v| *v != 0.0) {
            aggregate.capital_gain += v;
            aggregate.capital_gain_detail_mut().section_897_ordinary += v;
        }
        if let Some(v) = record.section_897_capital.filter(|v| *v != 0.0) {
            aggregate.capital_gain += v;
            aggregate.capital_gain_detail_mut().section_897_capital += v;
        }
        if let Some(v) = record.cash_liquidation.filter(|v| *v != 0.0) {
            aggregate.capital_gain += v;
            aggregate.capital_gain_detail_mut().cash_liquidation_distributions += v;
        }
        // Box 10 routes to itemized deductions, not to any income line.
        if let Some(v) = record.noncash_liquidation.filter(|v| *v != 0.0) {
            aggregate.schedule_a_mut().noncash_liquidation_distributions += v;
        }
        if let Some(v) = record.investment_expenses.filter(|v| *v != 0.0) {
            aggregate.schedule_a_mut().investment_expenses += v;
        }
        if let Some(v) = record.nondividend_distributions.filter(|v| *v != 0.0) {
            aggregate.informational_mut().nondividend_distributions += v;
        }
        if let Some(v) = record.section_199a_dividends.filter(|v| *v != 0.0) {
            aggregate.informational_mut().section_199a_dividends += v;
        }
        if let Some(v) = record.specified_pab_dividends.filter(|v| *v != 0.0) {
            aggregate.informational_mut().specified_pab_interest += v;
        }
        apply_foreign_tax(
            &mut aggregate,
            record.foreign_tax_paid,
            record.foreign_country.as_deref(),
        );
        apply_fatca(&mut aggregate, record.fatca_filing_requirement);
        apply_state(&mut aggregate, &record.state);

        aggregate
    }
}

// ──────────────────────────────────────────────────────────────────────
// 1099-MISC
// ──────────────────────────────────────────────────────────────────────

pub mod misc {
    use super::*;
    use crate::models::records::Form1099MiscRecord;

    pub const SOURCE_LABEL: &str = "Enhanced 1099-MISC";

    pub fn map_1099_misc(
        record: &Form1099MiscRecord,
        mut aggregate: Form1040Data,
    ) -> Form1040Data {
        apply_recipient(&mut aggregate, &record.payee, SOURCE_LABEL);

        aggregate.federal_withholding += record.federal_tax_withheld.unwrap_or(0.0);

        if let Some(v) = record.rents.filter(|v| *v != 0.0) {
            aggregate.schedule_1_mut().rents += v;
        }
        if let Some(v) = record.royalties.filter(|v| *v != 0.0) {
            aggregate.schedule_1_mut().royalties += v;
        }
        // Boxes 3, 5, 6, 8, 9, 10, 11, and 15 all report as other income.
        for amount in [
            record.other_income,
            record.fishing_boat_proceeds,
            record.medical_payments,
            record.substitute_payments,
            record.crop_insurance_proceeds,
            record.gross_attorney_proceeds,
            record.fish_purchased,
            record.nonqualified_deferred_comp,
        ] {
            if let Some(v) = amount.filter(|v| *v != 0.0) {
                aggregate.schedule_1_mut().other_income += v;
            }
        }
        if let Some(v) = record.section_409a_deferrals.filter(|v| *v != 0.0) {
            aggregate.informational_mut().section_409a_deferrals += v;
        }
        if let Some(v) = record.excess_golden_parachute.filter(|v| *v != 0.0) {
            aggregate.other_taxes_mut().excess_golden_parachute += v;
        }
        if record.direct_sales == Some(true) {
            aggregate.informational_mut().direct_sales = true;
        }
        apply_fatca(&mut aggregate, record.fatca_filing_requirement);
        apply_state(&mut aggregate, &record.state);

        aggregate
    }
}

// ──────────────────────────────────────────────────────────────────────
// 1099-NEC
// ──────────────────────────────────────────────────────────────────────

pub mod nec {
    use super::*;
    use crate::models::records::Form1099NecRecord;

    pub const SOURCE_LABEL: &str = "Enhanced 1099-NEC";

    pub fn map_1099_nec(record: &Form1099NecRecord, mut aggregate: Form1040Data) -> Form1040Data {
        apply_recipient(&mut aggregate, &record.payee, SOURCE_LABEL);

        if let Some(v) = record.nonemployee_compensation.filter(|v| *v != 0.0) {
            aggregate.schedule_1_mut().nonemployee_compensation += v;
        }
        aggregate.federal_withholding += record.federal_tax_withheld.unwrap_or(0.0);
        if record.direct_sales == Some(true) {
            aggregate.informational_mut().direct_sales = true;
        }
        apply_state(&mut aggregate, &record.state);

        aggregate
    }
}
