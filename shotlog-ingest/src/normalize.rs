//! Field normalization
//!
//! Club-name canonicalization, numeric coercion, and the spin-rate fallback
//! chain. Everything here is pure and total: `parse_number` never fails and
//! never produces NaN, `normalize_club_name` always returns a non-empty
//! string.

use crate::csv_file::RawRow;

/// Fixed synonym table: lowercased input → canonical club name
const CLUB_SYNONYMS: &[(&str, &str)] = &[
    ("driver", "Driver"),
    ("1 wood", "Driver"),
    ("1w", "Driver"),
    ("3 wood", "3 Wood"),
    ("3w", "3 Wood"),
    ("5 wood", "5 Wood"),
    ("5w", "5 Wood"),
    ("7 wood", "7 Wood"),
    ("7w", "7 Wood"),
    ("2 iron", "2 Iron"),
    ("2i", "2 Iron"),
    ("3 iron", "3 Iron"),
    ("3i", "3 Iron"),
    ("4 iron", "4 Iron"),
    ("4i", "4 Iron"),
    ("5 iron", "5 Iron"),
    ("5i", "5 Iron"),
    ("6 iron", "6 Iron"),
    ("6i", "6 Iron"),
    ("7 iron", "7 Iron"),
    ("7i", "7 Iron"),
    ("8 iron", "8 Iron"),
    ("8i", "8 Iron"),
    ("9 iron", "9 Iron"),
    ("9i", "9 Iron"),
    ("pw", "Pitching Wedge"),
    ("pitching wedge", "Pitching Wedge"),
    ("gw", "Gap Wedge"),
    ("gap wedge", "Gap Wedge"),
    ("sw", "Sand Wedge"),
    ("sand wedge", "Sand Wedge"),
    ("lw", "Lob Wedge"),
    ("lob wedge", "Lob Wedge"),
    ("aw", "Approach Wedge"),
    ("approach wedge", "Approach Wedge"),
    ("uw", "Utility Wedge"),
    ("utility wedge", "Utility Wedge"),
];

/// Columns probed, in strict priority order, when the vendor mapping
/// produced no spin rate
pub const SPIN_FALLBACK_COLUMNS: [&str; 4] = ["TotalSpin", "BackSpin", "SpinRate", "Spin"];

/// Raw-row keys probed for the club value, in priority order
const CLUB_COLUMNS: [&str; 3] = ["club", "Club", "CLUB"];

/// Canonicalize a club name
///
/// Trims and lowercases the input, then consults the synonym table. Input
/// outside the table comes back with its first letter capitalized and the
/// rest lowercased; empty input becomes the "Unknown" sentinel. Idempotent.
pub fn normalize_club_name(raw: &str) -> String {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        return "Unknown".to_string();
    }

    for (synonym, canonical) in CLUB_SYNONYMS {
        if normalized == *synonym {
            return (*canonical).to_string();
        }
    }

    let mut chars = normalized.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => "Unknown".to_string(),
    }
}

/// Coerce a raw cell to a number
///
/// Empty or unparseable input yields 0.0. Never panics, never returns NaN
/// or infinity.
pub fn parse_number(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Resolve the club value from a raw row
///
/// The club is read from the raw row (`club`/`Club`/`CLUB`, first present),
/// independent of the vendor column mapping, then canonicalized.
pub fn club_from_row(row: &RawRow) -> String {
    let raw = CLUB_COLUMNS
        .iter()
        .find_map(|key| row.get(*key))
        .map(String::as_str)
        .unwrap_or("");
    normalize_club_name(raw)
}

/// Spin-rate fallback chain
///
/// Probes `TotalSpin`, `BackSpin`, `SpinRate`, `Spin` in order and coerces
/// the first present column. `None` when no spin column exists at all.
pub fn spin_fallback(row: &RawRow) -> Option<f64> {
    SPIN_FALLBACK_COLUMNS
        .iter()
        .find_map(|key| row.get(*key))
        .map(|raw| parse_number(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn row(cells: &[(&str, &str)]) -> RawRow {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>()
    }

    #[test]
    fn test_club_synonyms() {
        assert_eq!(normalize_club_name("driver"), "Driver");
        assert_eq!(normalize_club_name("1w"), "Driver");
        assert_eq!(normalize_club_name("1 WOOD"), "Driver");
        assert_eq!(normalize_club_name("3w"), "3 Wood");
        assert_eq!(normalize_club_name("7i"), "7 Iron");
        assert_eq!(normalize_club_name(" 7 Iron "), "7 Iron");
        assert_eq!(normalize_club_name("PW"), "Pitching Wedge");
        assert_eq!(normalize_club_name("uw"), "Utility Wedge");
    }

    #[test]
    fn test_unmatched_club_is_capitalized() {
        assert_eq!(normalize_club_name("putter"), "Putter");
        assert_eq!(normalize_club_name("HYBRID"), "Hybrid");
        assert_eq!(normalize_club_name("3 hybrid"), "3 hybrid");
    }

    #[test]
    fn test_empty_club_is_unknown() {
        assert_eq!(normalize_club_name(""), "Unknown");
        assert_eq!(normalize_club_name("   "), "Unknown");
    }

    #[test]
    fn test_normalize_club_name_is_idempotent() {
        for raw in ["driver", "1w", "7I", "pw", "putter", "HYBRID", "", "3 hybrid", "Unknown"] {
            let once = normalize_club_name(raw);
            assert_eq!(normalize_club_name(&once), once, "not idempotent for {:?}", raw);
        }
    }

    #[test]
    fn test_parse_number_valid() {
        assert_eq!(parse_number("150"), 150.0);
        assert_eq!(parse_number("150.5"), 150.5);
        assert_eq!(parse_number(" -3.2 "), -3.2);
        assert_eq!(parse_number("0"), 0.0);
    }

    #[test]
    fn test_parse_number_never_nan() {
        for raw in ["", "   ", "abc", "12abc", "NaN", "nan", "inf", "-inf", "1e999"] {
            let value = parse_number(raw);
            assert!(value.is_finite(), "non-finite result for {:?}", raw);
        }
        assert_eq!(parse_number("garbage"), 0.0);
        assert_eq!(parse_number("NaN"), 0.0);
        assert_eq!(parse_number("inf"), 0.0);
    }

    #[test]
    fn test_club_from_row_probes_key_casings() {
        assert_eq!(club_from_row(&row(&[("club", "7i")])), "7 Iron");
        assert_eq!(club_from_row(&row(&[("Club", "driver")])), "Driver");
        assert_eq!(club_from_row(&row(&[("CLUB", "sw")])), "Sand Wedge");
        assert_eq!(club_from_row(&row(&[("Carry", "210")])), "Unknown");
    }

    #[test]
    fn test_spin_fallback_priority() {
        let r = row(&[("BackSpin", "4000"), ("Spin", "9999")]);
        assert_eq!(spin_fallback(&r), Some(4000.0));

        let r = row(&[("TotalSpin", "5500"), ("BackSpin", "4000")]);
        assert_eq!(spin_fallback(&r), Some(5500.0));

        let r = row(&[("Spin", "3200")]);
        assert_eq!(spin_fallback(&r), Some(3200.0));

        let r = row(&[("Carry", "210")]);
        assert_eq!(spin_fallback(&r), None);
    }

    #[test]
    fn test_spin_fallback_garbage_is_present_zero() {
        let r = row(&[("SpinRate", "n/a")]);
        assert_eq!(spin_fallback(&r), Some(0.0));
    }
}
