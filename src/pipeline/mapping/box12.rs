//! W-2 Box 12 code dispatch. Thirty fixed codes resolve to treatment
//! categories; anything outside the set is preserved verbatim in the
//! aggregate's overflow list so no reported amount is ever dropped.

use crate::models::form1040::{Form1040Data, UnhandledBox12};
use crate::models::records::Box12Entry;

/// Statutory exclusion cap for employer-provided adoption benefits
/// (Box 12 code T), 2023 figure.
pub const ADOPTION_EXCLUSION_CAP: f64 = 15_950.0;

/// How a Box 12 amount affects the return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Box12Treatment {
    /// Pre-tax elective deferral, already excluded from Box 1 wages.
    PretaxDeferral,
    /// After-tax designated Roth contribution, no income-line change.
    RothContribution,
    /// Amount assumed already included in the wage line; recorded only.
    TaxableAddBack,
    /// Uncollected social security / Medicare tax on tips.
    UncollectedTipTax,
    /// Employer adoption benefits, split against the statutory cap.
    CappedExclusion,
    /// Employer HSA contribution, routed to the HSA accumulator.
    HsaDeduction,
    /// Reporting-only marker with no tax effect.
    Informational,
    /// No specific rule; preserved in the overflow list.
    Other,
}

/// Resolve a code to its treatment. Total over all inputs: unknown codes
/// resolve to `Other` rather than failing.
pub fn resolve(code: &str) -> Box12Treatment {
    match code {
        "D" | "E" | "F" | "G" | "H" | "S" => Box12Treatment::PretaxDeferral,
        "AA" | "BB" | "EE" => Box12Treatment::RothContribution,
        "C" => Box12Treatment::TaxableAddBack,
        "A" | "B" => Box12Treatment::UncollectedTipTax,
        "T" => Box12Treatment::CappedExclusion,
        "W" => Box12Treatment::HsaDeduction,
        "DD" => Box12Treatment::Informational,
        _ => Box12Treatment::Other,
    }
}

/// Human-readable description per the W-2 instructions, carried into the
/// overflow list for codes without a specific rule.
pub fn describe(code: &str) -> &'static str {
    match code {
        "A" => "Uncollected social security or RRTA tax on tips",
        "B" => "Uncollected Medicare tax on tips",
        "C" => "Taxable cost of group-term life insurance over $50,000",
        "D" => "Elective deferrals to a section 401(k) plan",
        "E" => "Elective deferrals under a section 403(b) agreement",
        "F" => "Elective deferrals under a section 408(k)(6) SEP",
        "G" => "Elective deferrals to a section 457(b) plan",
        "H" => "Elective deferrals under a section 501(c)(18)(D) plan",
        "J" => "Nontaxable sick pay",
        "K" => "20% excise tax on excess golden parachute payments",
        "L" => "Substantiated employee business expense reimbursements",
        "M" => "Uncollected social security or RRTA tax on group-term life insurance",
        "N" => "Uncollected Medicare tax on group-term life insurance",
        "P" => "Excludable moving expense reimbursements (Armed Forces)",
        "Q" => "Nontaxable combat pay",
        "R" => "Employer contributions to an Archer MSA",
        "S" => "Salary reduction contributions under a section 408(p) SIMPLE plan",
        "T" => "Employer-provided adoption benefits",
        "V" => "Income from exercise of nonstatutory stock options",
        "W" => "Employer contributions to a health savings account",
        "Y" => "Deferrals under a section 409A nonqualified plan",
        "Z" => "Income under a section 409A nonqualified plan",
        "AA" => "Designated Roth contributions under a section 401(k) plan",
        "BB" => "Designated Roth contributions under a section 403(b) plan",
        "DD" => "Cost of employer-sponsored health coverage",
        "EE" => "Designated Roth contributions under a governmental section 457(b) plan",
        "FF" => "Permitted benefits under a qualified small employer HRA",
        "GG" => "Income from qualified equity grants under section 83(i)",
        "HH" => "Aggregate deferrals under section 83(i) elections",
        "II" => "Medicaid waiver payments excluded from gross income",
        _ => "Unrecognized W-2 Box 12 code",
    }
}

/// Fold one Box 12 entry into the aggregate per its treatment.
pub fn apply(entry: &Box12Entry, aggregate: &mut Form1040Data) {
    match resolve(&entry.code) {
        Box12Treatment::PretaxDeferral => {
            aggregate.retirement_mut().pretax_deferrals += entry.amount;
        }
        Box12Treatment::RothContribution => {
            aggregate.retirement_mut().roth_contributions += entry.amount;
        }
        Box12Treatment::TaxableAddBack => {
            aggregate.informational_mut().group_term_life_cost += entry.amount;
        }
        Box12Treatment::UncollectedTipTax => {
            aggregate.other_taxes_mut().uncollected_tip_tax += entry.amount;
        }
        Box12Treatment::CappedExclusion => {
            let excludable = entry.amount.min(ADOPTION_EXCLUSION_CAP);
            let taxable = entry.amount - excludable;
            let benefits = aggregate.adoption_benefits_mut();
            benefits.employer_provided += entry.amount;
            benefits.excludable += excludable;
            benefits.taxable += taxable;
            aggregate.wages += taxable;
        }
        Box12Treatment::HsaDeduction => {
            aggregate.schedule_1_mut().hsa_contributions += entry.amount;
        }
        Box12Treatment::Informational => {
            aggregate.informational_mut().employer_health_coverage += entry.amount;
        }
        Box12Treatment::Other => {
            aggregate.box12_overflow.push(UnhandledBox12 {
                code: entry.code.clone(),
                amount: entry.amount,
                description: describe(&entry.code).to_string(),
            });
        }
    }
}
