//! Shot record and session types

use crate::error::IngestError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported launch-monitor vendors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    Gspro,
    Rapsodo,
    Foresight,
    Trackman,
}

impl Vendor {
    /// All supported vendors
    pub const ALL: [Vendor; 4] = [
        Vendor::Gspro,
        Vendor::Rapsodo,
        Vendor::Foresight,
        Vendor::Trackman,
    ];

    /// Vendor identifier as stored and as accepted by `from_str`
    pub fn as_str(&self) -> &'static str {
        match self {
            Vendor::Gspro => "gspro",
            Vendor::Rapsodo => "rapsodo",
            Vendor::Foresight => "foresight",
            Vendor::Trackman => "trackman",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vendor {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gspro" => Ok(Vendor::Gspro),
            "rapsodo" => Ok(Vendor::Rapsodo),
            "foresight" => Ok(Vendor::Foresight),
            "trackman" => Ok(Vendor::Trackman),
            other => Err(IngestError::UnsupportedVendor(other.to_string())),
        }
    }
}

/// One normalized launch-monitor reading
///
/// Metric fields are `Option<f64>`: `Some` means the vendor file carried a
/// column for the metric (an unparseable cell still counts as present and
/// coerces to 0.0), `None` means the file had no such column. Values are
/// never NaN.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotRecord {
    pub owner_id: String,
    /// Upload identifier shared by every row of one import call
    pub batch_id: String,
    pub vendor: Vendor,
    /// Position within the originating file
    pub row_index: i64,
    /// Canonical club name, never empty ("Unknown" sentinel when unmapped)
    pub club: String,
    pub ball_speed: Option<f64>,
    pub club_speed: Option<f64>,
    /// Vertical launch angle
    pub vla: Option<f64>,
    /// Apex height in feet (gspro exports yards, converted on import)
    pub peak_height: Option<f64>,
    pub descent_angle: Option<f64>,
    pub spin_rate: Option<f64>,
    pub carry_distance: Option<f64>,
    pub side_total: Option<f64>,
    pub total_distance: Option<f64>,
    pub session_name: String,
    pub notes: String,
    /// Session-level elevation in feet, replicated per row
    pub elevation: f64,
    pub uploaded_at: DateTime<Utc>,
}

/// Per-upload summary derived from the records sharing a batch id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub batch_id: String,
    pub session_name: String,
    /// Defaults to "No notes" when the upload carried none
    pub notes: String,
    pub uploaded_at: DateTime<Utc>,
    pub shot_count: usize,
    pub vendor: String,
}

/// Session-level parameters for one import call
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub vendor: Vendor,
    pub session_name: String,
    pub notes: String,
    pub elevation: f64,
    pub owner_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_from_str_known() {
        assert_eq!("gspro".parse::<Vendor>().unwrap(), Vendor::Gspro);
        assert_eq!("Rapsodo".parse::<Vendor>().unwrap(), Vendor::Rapsodo);
        assert_eq!(" trackman ".parse::<Vendor>().unwrap(), Vendor::Trackman);
        assert_eq!("FORESIGHT".parse::<Vendor>().unwrap(), Vendor::Foresight);
    }

    #[test]
    fn test_vendor_from_str_unknown() {
        let err = "flightscope".parse::<Vendor>().unwrap_err();
        match err {
            IngestError::UnsupportedVendor(name) => assert_eq!(name, "flightscope"),
            other => panic!("Expected UnsupportedVendor, got {:?}", other),
        }
    }

    #[test]
    fn test_vendor_round_trips_through_as_str() {
        for vendor in Vendor::ALL {
            assert_eq!(vendor.as_str().parse::<Vendor>().unwrap(), vendor);
        }
    }
}
