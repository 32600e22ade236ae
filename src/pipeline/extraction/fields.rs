//! Tolerant field coercion and text-heuristic lookup helpers shared by
//! every per-form extractor.

use regex::Regex;
use std::sync::OnceLock;

use super::types::KeyValuePair;

/// Parse a currency-ish string into a number. Strips `$`, thousands
/// separators, and surrounding whitespace; parenthesized values read as
/// negative. Defaults to 0 on failure — mapping never throws on a
/// malformed amount.
pub fn parse_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let negative = trimmed.starts_with('(') && trimmed.ends_with(')');
    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    let value = cleaned.parse::<f64>().unwrap_or(0.0);
    if negative {
        -value.abs()
    } else {
        value
    }
}

/// Coerce a boolean-like string. `true`, `1`, `yes` (case-insensitive)
/// and the provider's `:selected:` checkbox state read true; everything
/// else reads false.
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | ":selected:" | "selected"
    )
}

/// Look up a value in the backend's key/value pairs whose key contains
/// the given label (case-insensitive, whitespace-collapsed).
pub fn kv_lookup<'a>(pairs: &'a [KeyValuePair], label: &str) -> Option<&'a str> {
    let needle = normalize_label(label);
    pairs
        .iter()
        .find(|p| normalize_label(&p.key.content).contains(&needle))
        .and_then(|p| p.value.as_ref().map(|v| v.content.trim()))
        .filter(|v| !v.is_empty())
}

fn normalize_label(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn amount_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Money-looking only: a $ prefix, cents, or thousands separators.
    // Bare integers are skipped — they are usually box numbers.
    RE.get_or_init(|| {
        Regex::new(r"\(?\$\s*\d[\d,]*(?:\.\d{1,2})?\)?|\(?\d[\d,]*\.\d{2}\)?|\(?\d{1,3}(?:,\d{3})+\)?")
            .expect("amount regex")
    })
}

/// Scan OCR text for an amount following a box label (case-insensitive).
/// Same-line matches win over wrapped-to-next-line matches anywhere in
/// the document, so a bare mention of the label (a form header, an
/// instruction block) cannot shadow the actual box value.
pub fn labeled_amount(content: &str, label: &str) -> Option<f64> {
    let needle = label.to_lowercase();
    let lines: Vec<&str> = content.lines().collect();

    for line in &lines {
        let lower = line.to_lowercase();
        if let Some(pos) = lower.find(&needle) {
            if let Some(tail) = line.get(pos + needle.len()..) {
                if let Some(m) = amount_token().find(tail) {
                    return Some(parse_amount(m.as_str()));
                }
            }
        }
    }

    for (i, line) in lines.iter().enumerate() {
        if line.to_lowercase().contains(&needle) {
            if let Some(next) = lines.get(i + 1) {
                if let Some(m) = amount_token().find(next) {
                    return Some(parse_amount(m.as_str()));
                }
            }
        }
    }
    None
}

/// Scan OCR text for free text following a box label on the same line.
pub fn labeled_text(content: &str, label: &str) -> Option<String> {
    let needle = label.to_lowercase();
    for line in content.lines() {
        let lower = line.to_lowercase();
        if let Some(pos) = lower.find(&needle) {
            let Some(rest) = line.get(pos + label.len()..) else {
                continue;
            };
            let tail = rest.trim_start_matches([':', '.', '-', ' ']).trim();
            if !tail.is_empty() {
                return Some(tail.to_string());
            }
        }
    }
    None
}

/// Key/value lookup first, then line scan — the common probe order for
/// text-heuristic extraction.
pub fn probe_amount(pairs: &[KeyValuePair], content: &str, label: &str) -> Option<f64> {
    if let Some(v) = kv_lookup(pairs, label) {
        return Some(parse_amount(v));
    }
    labeled_amount(content, label)
}

pub fn probe_text(pairs: &[KeyValuePair], content: &str, label: &str) -> Option<String> {
    if let Some(v) = kv_lookup(pairs, label) {
        return Some(v.to_string());
    }
    labeled_text(content, label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::extraction::types::ProviderSpan;

    fn kv(key: &str, value: &str) -> KeyValuePair {
        KeyValuePair {
            key: ProviderSpan {
                content: key.to_string(),
            },
            value: Some(ProviderSpan {
                content: value.to_string(),
            }),
        }
    }

    #[test]
    fn parse_amount_strips_currency_formatting() {
        assert_eq!(parse_amount("$1,234.56"), 1234.56);
        assert_eq!(parse_amount("52000"), 52000.0);
        assert_eq!(parse_amount(" $ 7,000 "), 7000.0);
    }

    #[test]
    fn parse_amount_defaults_to_zero_on_garbage() {
        assert_eq!(parse_amount("N/A"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("see attached"), 0.0);
    }

    #[test]
    fn parse_amount_reads_parenthesized_as_negative() {
        assert_eq!(parse_amount("($125.00)"), -125.0);
    }

    #[test]
    fn parse_flag_accepts_truthy_variants() {
        assert!(parse_flag("true"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("1"));
        assert!(parse_flag("Yes"));
        assert!(parse_flag(":selected:"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("X"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn kv_lookup_matches_case_insensitive_substring() {
        let pairs = vec![
            kv("1 Wages, tips, other compensation", "$52,000.00"),
            kv("2 Federal income tax withheld", "6,300.00"),
        ];
        assert_eq!(kv_lookup(&pairs, "wages, tips"), Some("$52,000.00"));
        assert_eq!(
            kv_lookup(&pairs, "Federal income tax withheld"),
            Some("6,300.00")
        );
        assert_eq!(kv_lookup(&pairs, "dependent care"), None);
    }

    #[test]
    fn labeled_amount_finds_value_on_same_line() {
        let content = "1 Wages, tips, other compensation $52,000.00\n2 Federal income tax withheld 6,300.00";
        assert_eq!(
            labeled_amount(content, "wages, tips, other compensation"),
            Some(52_000.0)
        );
        assert_eq!(
            labeled_amount(content, "federal income tax withheld"),
            Some(6_300.0)
        );
    }

    #[test]
    fn labeled_amount_falls_through_to_next_line() {
        let content = "10 Dependent care benefits\n7,000.00";
        assert_eq!(labeled_amount(content, "dependent care benefits"), Some(7_000.0));
    }

    #[test]
    fn labeled_amount_missing_label_is_none() {
        assert_eq!(labeled_amount("nothing relevant here", "wages"), None);
    }

    #[test]
    fn header_mention_does_not_shadow_box_value() {
        // "interest income" appears in the form title; the box line wins.
        let content = "Form 1099-INT Interest Income\n1 Interest income $425.10";
        assert_eq!(labeled_amount(content, "interest income"), Some(425.10));
    }

    #[test]
    fn bare_integers_are_not_amounts() {
        // A lone box number on the following line is not a value.
        let content = "Interest income\n1 Interest income details below";
        assert_eq!(labeled_amount(content, "interest income"), None);
    }

    #[test]
    fn labeled_text_strips_separators() {
        let content = "Employer's name: Acme Corp";
        assert_eq!(
            labeled_text(content, "employer's name"),
            Some("Acme Corp".to_string())
        );
    }

    #[test]
    fn probe_prefers_key_value_pairs() {
        let pairs = vec![kv("Interest income", "$88.00")];
        let content = "1 Interest income $99.00";
        assert_eq!(probe_amount(&pairs, content, "interest income"), Some(88.0));
        assert_eq!(probe_amount(&[], content, "interest income"), Some(99.0));
    }
}
