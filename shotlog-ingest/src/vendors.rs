//! Vendor schema registry
//!
//! Each supported launch monitor exports CSV with its own column names.
//! The registry holds a fixed, ordered source-column → canonical-field
//! table per vendor. When two source columns target the same canonical
//! field (e.g. `PeakHeight` and `ApexHeight`), the later entry wins,
//! matching table order.
//!
//! Some source columns (BackSpin, SideSpin, HLA, Path, ...) have no slot in
//! the canonical record; they stay in the tables because the header
//! pre-check matches files on source columns, but the mapper does not store
//! them.

use crate::error::IngestError;
use crate::models::Vendor;

/// Ordered source-column → canonical-field mapping
pub type ColumnTable = &'static [(&'static str, &'static str)];

const GSPRO_COLUMNS: ColumnTable = &[
    ("BallSpeed", "ball_speed"),
    ("LaunchAngle", "vla"),
    ("VLA", "vla"),
    ("PeakHeight", "peak_height"),
    ("ApexHeight", "peak_height"),
    ("Decent", "descent_angle"),
    ("Descent", "descent_angle"),
    ("Spin", "spin_rate"),
    ("BackSpin", "back_spin"),
    ("SideSpin", "side_spin"),
    ("Carry", "carry_distance"),
    ("TotalDistance", "total_distance"),
    ("Offline", "side_total"),
    ("Club", "club"),
    ("ClubSpeed", "club_speed"),
    ("HLA", "hla"),
    ("DistanceToPin", "distance_to_pin"),
    ("Path", "path"),
    ("AoA", "aoa"),
    ("FaceToTarget", "face_to_target"),
    ("FaceToPath", "face_to_path"),
    ("Lie", "lie"),
    ("Loft", "loft"),
    ("DynamicLoft", "dynamic_loft"),
    ("SmashFactor", "smash_factor"),
];

const RAPSODO_COLUMNS: ColumnTable = &[
    ("BallSpeed", "ball_speed"),
    ("LaunchAngle", "vla"),
    ("VLA", "vla"),
    ("PeakHeight", "peak_height"),
    ("ApexHeight", "peak_height"),
    ("DescentAngle", "descent_angle"),
    ("SpinRate", "spin_rate"),
    ("CarryDistance", "carry_distance"),
    ("TotalDistance", "total_distance"),
    ("Offline", "side_total"),
    ("ClubSpeed", "club_speed"),
];

const FORESIGHT_COLUMNS: ColumnTable = &[
    ("BallSpeed", "ball_speed"),
    ("LaunchAngle", "vla"),
    ("VLA", "vla"),
    ("PeakHeight", "peak_height"),
    ("ApexHeight", "peak_height"),
    ("DescentAngle", "descent_angle"),
    ("SpinRate", "spin_rate"),
    ("CarryDistance", "carry_distance"),
    ("TotalDistance", "total_distance"),
    ("Offline", "side_total"),
    ("ClubSpeed", "club_speed"),
];

const TRACKMAN_COLUMNS: ColumnTable = &[
    ("Ball_Spd", "ball_speed"),
    ("Launch_Ang", "vla"),
    ("VLA", "vla"),
    ("Peak_Height", "peak_height"),
    ("Apex_Height", "peak_height"),
    ("Descent_Ang", "descent_angle"),
    ("Spin", "spin_rate"),
    ("Carry", "carry_distance"),
    ("Total", "total_distance"),
    ("Offline", "side_total"),
    ("Club_Spd", "club_speed"),
];

/// Column table for a vendor
pub fn column_table(vendor: Vendor) -> ColumnTable {
    match vendor {
        Vendor::Gspro => GSPRO_COLUMNS,
        Vendor::Rapsodo => RAPSODO_COLUMNS,
        Vendor::Foresight => FORESIGHT_COLUMNS,
        Vendor::Trackman => TRACKMAN_COLUMNS,
    }
}

/// Column table looked up by raw vendor identifier
///
/// Fails with `UnsupportedVendor` for identifiers outside the registry.
pub fn column_table_for(vendor: &str) -> Result<ColumnTable, IngestError> {
    let vendor: Vendor = vendor.parse()?;
    Ok(column_table(vendor))
}

/// The source-column names a vendor's export is expected to use
pub fn source_columns(vendor: Vendor) -> Vec<&'static str> {
    column_table(vendor).iter().map(|(src, _)| *src).collect()
}

/// Header-overlap pre-check
///
/// Rejects a file whose headers share no column with the vendor's schema,
/// before any row is processed. The error carries the full expected column
/// list so the user can self-correct.
pub fn check_format(vendor: Vendor, headers: &[String]) -> Result<(), IngestError> {
    let expected = source_columns(vendor);
    let matches = expected
        .iter()
        .any(|col| headers.iter().any(|h| h.as_str() == *col));

    if matches {
        Ok(())
    } else {
        Err(IngestError::FormatMismatch { vendor, expected })
    }
}

/// Vendor-specific unit overrides, applied after numeric coercion
///
/// gspro exports peak height in yards; the canonical record carries feet.
/// New conversions are added here without touching the mapper.
pub fn unit_adjust(vendor: Vendor, canonical_field: &str, value: f64) -> f64 {
    match (vendor, canonical_field) {
        (Vendor::Gspro, "peak_height") => value * 3.0,
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_vendor_has_a_table() {
        for vendor in Vendor::ALL {
            assert!(!column_table(vendor).is_empty());
        }
    }

    #[test]
    fn test_lookup_by_identifier() {
        assert!(column_table_for("gspro").is_ok());
        let err = column_table_for("garmin").unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedVendor(_)));
    }

    #[test]
    fn test_check_format_accepts_partial_overlap() {
        let headers = vec!["Carry".to_string(), "SomethingElse".to_string()];
        assert!(check_format(Vendor::Gspro, &headers).is_ok());
    }

    #[test]
    fn test_check_format_rejects_disjoint_headers() {
        let headers = vec!["Date".to_string(), "Score".to_string()];
        let err = check_format(Vendor::Trackman, &headers).unwrap_err();
        match err {
            IngestError::FormatMismatch { vendor, expected } => {
                assert_eq!(vendor, Vendor::Trackman);
                assert!(expected.contains(&"Ball_Spd"));
                assert!(expected.contains(&"Total"));
            }
            other => panic!("Expected FormatMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_gspro_peak_height_converts_yards_to_feet() {
        assert_eq!(unit_adjust(Vendor::Gspro, "peak_height", 10.0), 30.0);
    }

    #[test]
    fn test_unit_adjust_is_identity_elsewhere() {
        assert_eq!(unit_adjust(Vendor::Gspro, "carry_distance", 10.0), 10.0);
        assert_eq!(unit_adjust(Vendor::Rapsodo, "peak_height", 10.0), 10.0);
        assert_eq!(unit_adjust(Vendor::Trackman, "peak_height", 10.0), 10.0);
        assert_eq!(unit_adjust(Vendor::Foresight, "peak_height", 10.0), 10.0);
    }
}
