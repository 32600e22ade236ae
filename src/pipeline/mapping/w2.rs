//! W-2 → Form 1040 mapping: a pure fold from the typed record into the
//! return aggregate. Line amounts add, identity writes are precedence
//! guarded, Box 12 dispatches per code.

use super::box12;
use super::identity::{apply_identity, Identity, W2_SOURCE_LABEL};
use crate::models::form1040::Form1040Data;
use crate::models::records::W2Record;

/// Statutory exclusion cap for employer dependent-care benefits
/// (W-2 Box 10).
pub const DEPENDENT_CARE_EXCLUSION_CAP: f64 = 5_000.0;

pub fn map_w2(record: &W2Record, mut aggregate: Form1040Data) -> Form1040Data {
    apply_identity(
        &mut aggregate,
        &Identity {
            name: record.employee_name.as_deref(),
            ssn: record.employee_ssn.as_deref(),
            address: record.employee_address.as_deref(),
        },
        W2_SOURCE_LABEL,
    );

    aggregate.wages += record.wages.unwrap_or(0.0);
    aggregate.federal_withholding += record.federal_tax_withheld.unwrap_or(0.0);

    // Box 10: the portion above the exclusion cap is taxable wages. The
    // full split is kept for cross-reference against Form 2441.
    if let Some(provided) = record.dependent_care_benefits.filter(|v| *v > 0.0) {
        let excludable = provided.min(DEPENDENT_CARE_EXCLUSION_CAP);
        let taxable = provided - excludable;
        let care = aggregate.dependent_care_mut();
        care.employer_provided += provided;
        care.excludable += excludable;
        care.taxable += taxable;
        aggregate.wages += taxable;
    }

    for entry in &record.box12 {
        box12::apply(entry, &mut aggregate);
    }

    if record.box13.statutory_employee {
        aggregate.informational_mut().statutory_employee = true;
    }
    if record.box13.retirement_plan {
        aggregate.informational_mut().retirement_plan = true;
    }
    if record.box13.third_party_sick_pay {
        aggregate.informational_mut().third_party_sick_pay = true;
    }

    // Boxes 15-20: withholding and wage figures accumulate, identifiers
    // are last-write.
    if let Some(id) = &record.employer_state_id {
        aggregate.state_data_mut().employer_state_id = id.clone();
    }
    if let Some(v) = record.state_wages {
        aggregate.state_data_mut().state_wages += v;
    }
    if let Some(v) = record.state_tax_withheld {
        aggregate.state_data_mut().state_withholding += v;
    }
    if let Some(v) = record.local_wages {
        aggregate.state_data_mut().local_wages += v;
    }
    if let Some(v) = record.local_tax_withheld {
        aggregate.state_data_mut().local_withholding += v;
    }
    if let Some(name) = &record.locality_name {
        aggregate.state_data_mut().locality_name = name.clone();
    }

    aggregate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::records::{Box12Entry, Box13Flags};

    fn sample_w2() -> W2Record {
        W2Record {
            employee_name: Some("Jane A Doe".into()),
            employee_ssn: Some("123456789".into()),
            employee_address: Some("12 Maple St, Springfield, IL 62704".into()),
            wages: Some(52_000.0),
            federal_tax_withheld: Some(6_300.0),
            ..Default::default()
        }
    }

    #[test]
    fn wages_and_withholding_map_to_lines() {
        let ret = map_w2(&sample_w2(), Form1040Data::default());
        assert_eq!(ret.wages, 52_000.0);
        assert_eq!(ret.federal_withholding, 6_300.0);
        let info = ret.personal_info.unwrap();
        assert_eq!(info.first_name, "Jane");
        assert_eq!(info.last_name, "A Doe");
        assert_eq!(info.ssn, "123-45-6789");
        assert_eq!(info.city, "Springfield");
        assert_eq!(info.source_document, "Enhanced W-2");
    }

    #[test]
    fn mapping_twice_doubles_the_wage_line() {
        // No deduplication at this layer.
        let record = sample_w2();
        let ret = map_w2(&record, map_w2(&record, Form1040Data::default()));
        assert_eq!(ret.wages, 104_000.0);
        assert_eq!(ret.federal_withholding, 12_600.0);
    }

    #[test]
    fn dependent_care_above_cap_adds_back_to_wages() {
        let record = W2Record {
            wages: Some(50_000.0),
            dependent_care_benefits: Some(7_000.0),
            ..Default::default()
        };
        let ret = map_w2(&record, Form1040Data::default());
        let care = ret.dependent_care.unwrap();
        assert_eq!(care.employer_provided, 7_000.0);
        assert_eq!(care.excludable, 5_000.0);
        assert_eq!(care.taxable, 2_000.0);
        assert_eq!(ret.wages, 52_000.0);
    }

    #[test]
    fn dependent_care_under_cap_leaves_wages_alone() {
        let record = W2Record {
            wages: Some(50_000.0),
            dependent_care_benefits: Some(4_000.0),
            ..Default::default()
        };
        let ret = map_w2(&record, Form1040Data::default());
        assert_eq!(ret.dependent_care.unwrap().taxable, 0.0);
        assert_eq!(ret.wages, 50_000.0);
    }

    #[test]
    fn box12_codes_dispatch_per_entry() {
        let record = W2Record {
            wages: Some(50_000.0),
            box12: vec![
                Box12Entry {
                    code: "D".into(),
                    amount: 4_000.0,
                },
                Box12Entry {
                    code: "T".into(),
                    amount: 20_000.0,
                },
                Box12Entry {
                    code: "XX".into(),
                    amount: 10.0,
                },
            ],
            ..Default::default()
        };
        let ret = map_w2(&record, Form1040Data::default());
        assert_eq!(ret.retirement.unwrap().pretax_deferrals, 4_000.0);
        assert_eq!(ret.adoption_benefits.unwrap().taxable, 4_050.0);
        assert_eq!(ret.wages, 54_050.0);
        assert_eq!(ret.box12_overflow.len(), 1);
    }

    #[test]
    fn box13_flags_set_informational_markers() {
        let record = W2Record {
            box13: Box13Flags {
                retirement_plan: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let ret = map_w2(&record, Form1040Data::default());
        let info = ret.informational.unwrap();
        assert!(info.retirement_plan);
        assert!(!info.statutory_employee);
    }

    #[test]
    fn state_figures_accumulate_identifiers_last_write() {
        let first = W2Record {
            employer_state_id: Some("IL-001234".into()),
            state_wages: Some(52_000.0),
            state_tax_withheld: Some(2_600.0),
            ..Default::default()
        };
        let second = W2Record {
            employer_state_id: Some("IL-009999".into()),
            state_tax_withheld: Some(400.0),
            ..Default::default()
        };
        let ret = map_w2(&second, map_w2(&first, Form1040Data::default()));
        let state = ret.state_data.unwrap();
        assert_eq!(state.employer_state_id, "IL-009999");
        assert_eq!(state.state_wages, 52_000.0);
        assert_eq!(state.state_withholding, 3_000.0);
    }

    #[test]
    fn absent_boxes_contribute_nothing() {
        let ret = map_w2(&W2Record::default(), Form1040Data::default());
        assert_eq!(ret.wages, 0.0);
        assert!(ret.dependent_care.is_none());
        assert!(ret.state_data.is_none());
    }
}
