//! Taxpayer identity handling shared by every form mapper: name/SSN/
//! address normalization and the precedence-guarded write into the
//! aggregate's `PersonalInfo`.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::form1040::{Form1040Data, PersonalInfo};

/// Provenance label for identity sourced from a W-2. A W-2 outranks every
/// information return: once identity is W-2 sourced, later documents only
/// append to the provenance trail.
pub const W2_SOURCE_LABEL: &str = "Enhanced W-2";

/// Identity fields a document contributes, pre-normalization. Absent
/// fields never clear an existing value.
#[derive(Debug, Default)]
pub struct Identity<'a> {
    pub name: Option<&'a str>,
    pub ssn: Option<&'a str>,
    pub address: Option<&'a str>,
}

/// First whitespace token is the first name; the remainder is the last
/// name (middle initials ride along).
pub fn split_name(full: &str) -> (String, String) {
    let mut parts = full.split_whitespace();
    let first = parts.next().unwrap_or("").to_string();
    let last = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}

/// Reformat to `###-##-####` when the input carries exactly nine digits;
/// anything else passes through untouched.
pub fn format_ssn(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 9 {
        format!("{}-{}-{}", &digits[..3], &digits[3..5], &digits[5..])
    } else {
        raw.trim().to_string()
    }
}

fn state_zip() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Z]{2})\s+(\d{5}(?:-\d{4})?)$").expect("state/zip regex"))
}

/// Parsed postal address. Unparseable input lands whole in `street` with
/// the other fields empty, so no address data is ever dropped.
#[derive(Debug, Default, PartialEq)]
pub struct ParsedAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Comma-split into street / city / `STATE ZIPCODE`. The state+ZIP
/// pattern must sit at the tail segment; otherwise the address is treated
/// as unparseable.
pub fn parse_address(raw: &str) -> ParsedAddress {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() >= 3 {
        if let Some(caps) = state_zip().captures(parts[parts.len() - 1]) {
            return ParsedAddress {
                street: parts[..parts.len() - 2].join(", "),
                city: parts[parts.len() - 2].to_string(),
                state: caps[1].to_string(),
                zip: caps[2].to_string(),
            };
        }
    }
    ParsedAddress {
        street: raw.trim().to_string(),
        ..Default::default()
    }
}

fn sourced_from_w2(info: &PersonalInfo) -> bool {
    info.source_document
        .split(", ")
        .any(|s| s == W2_SOURCE_LABEL)
}

fn write_fields(info: &mut PersonalInfo, identity: &Identity<'_>) {
    if let Some(name) = identity.name {
        let (first, last) = split_name(name);
        info.first_name = first;
        info.last_name = last;
    }
    if let Some(ssn) = identity.ssn {
        info.ssn = format_ssn(ssn);
    }
    if let Some(address) = identity.address {
        let parsed = parse_address(address);
        info.street = parsed.street;
        info.city = parsed.city;
        info.state = parsed.state;
        info.zip = parsed.zip;
    }
}

/// Precedence-guarded identity write. First document populates; a W-2 may
/// overwrite identity sourced from an information return; every document
/// appends its label to the provenance trail exactly once per mapping.
pub fn apply_identity(aggregate: &mut Form1040Data, identity: &Identity<'_>, source: &str) {
    match &mut aggregate.personal_info {
        None => {
            let mut info = PersonalInfo {
                source_document: source.to_string(),
                ..Default::default()
            };
            write_fields(&mut info, identity);
            aggregate.personal_info = Some(info);
        }
        Some(info) => {
            if source == W2_SOURCE_LABEL && !sourced_from_w2(info) {
                write_fields(info, identity);
            }
            info.source_document.push_str(", ");
            info.source_document.push_str(source);
        }
    }
}
