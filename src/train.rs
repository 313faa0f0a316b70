//! Trains are the rolling stock making up a depot's fleet roster.
use crate::id::{define_id_getter, define_id_type};
use crate::input::deserialise_proportion;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::EnumString;

define_id_type! {TrainID}

/// The status a train has in the baseline roster.
///
/// Status strings are matched exactly, in the same way as for [`EffectiveStatus`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TrainStatus {
    /// Cleared to enter revenue service
    GoForService,
    /// Available, but not scheduled for service
    Standby,
    /// Held back until an inspection has been carried out
    InspectionRequired,
}

/// The status a train has for the duration of a single simulation run.
///
/// As well as the baseline statuses, this includes the states which only ever appear in an
/// override map. Any other status string is kept verbatim in [`EffectiveStatus::Unrecognised`]
/// so that it can be reported rather than rejected.
#[derive(Clone, Debug, PartialEq, Eq, Hash, EnumString, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EffectiveStatus {
    /// Cleared to enter revenue service
    #[strum(serialize = "go_for_service")]
    GoForService,
    /// Available, but not scheduled for service
    #[strum(serialize = "standby")]
    Standby,
    /// Held back until an inspection has been carried out
    #[strum(serialize = "inspection_required")]
    InspectionRequired,
    /// Withdrawn for maintenance work
    #[strum(serialize = "maintenance_required")]
    MaintenanceRequired,
    /// Withdrawn while being rebranded
    #[strum(serialize = "branding_unavailable")]
    BrandingUnavailable,
    /// A status string which is not otherwise known
    #[strum(disabled)]
    Unrecognised(String),
}

impl EffectiveStatus {
    /// Parse a status string, keeping unknown strings as [`EffectiveStatus::Unrecognised`]
    pub fn parse(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|_| Self::Unrecognised(s.to_string()))
    }

    /// The status string as it appears in input and output files
    pub fn as_str(&self) -> &str {
        match self {
            Self::GoForService => "go_for_service",
            Self::Standby => "standby",
            Self::InspectionRequired => "inspection_required",
            Self::MaintenanceRequired => "maintenance_required",
            Self::BrandingUnavailable => "branding_unavailable",
            Self::Unrecognised(s) => s,
        }
    }
}

impl fmt::Display for EffectiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for EffectiveStatus {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<EffectiveStatus> for String {
    fn from(status: EffectiveStatus) -> Self {
        status.as_str().to_string()
    }
}

impl From<TrainStatus> for EffectiveStatus {
    fn from(status: TrainStatus) -> Self {
        match status {
            TrainStatus::GoForService => Self::GoForService,
            TrainStatus::Standby => Self::Standby,
            TrainStatus::InspectionRequired => Self::InspectionRequired,
        }
    }
}

/// A train in the fleet roster
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Train {
    /// A unique identifier for the train (e.g. "TRN-001")
    pub id: TrainID,
    /// Human-readable name for the train
    pub name: String,
    /// Where the train currently is
    pub current_location: String,
    /// Baseline status for the train
    pub status: TrainStatus,
    /// Predicted risk of failure, between 0 and 1. Lower is better.
    #[serde(deserialize_with = "deserialise_proportion")]
    pub ai_risk_score: f64,
    /// Total distance travelled in km
    pub total_mileage: u32,
    /// Depot bay the train is parked in, if any
    pub assigned_bay: Option<String>,
    /// Line the train is assigned to, if any
    pub assigned_route: Option<String>,
}
define_id_getter! {Train, TrainID}

/// Format a number with comma thousands separators (e.g. 145678 -> "145,678")
pub fn format_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("go_for_service", EffectiveStatus::GoForService)]
    #[case("standby", EffectiveStatus::Standby)]
    #[case("inspection_required", EffectiveStatus::InspectionRequired)]
    #[case("maintenance_required", EffectiveStatus::MaintenanceRequired)]
    #[case("branding_unavailable", EffectiveStatus::BrandingUnavailable)]
    #[case("scrapped", EffectiveStatus::Unrecognised("scrapped".into()))]
    fn test_effective_status_parse(#[case] s: &str, #[case] expected: EffectiveStatus) {
        let status = EffectiveStatus::parse(s);
        assert_eq!(status, expected);
        assert_eq!(status.to_string(), s);
    }

    #[rstest]
    #[case("go_for_service", Some(TrainStatus::GoForService))]
    #[case("inspection_required", Some(TrainStatus::InspectionRequired))]
    #[case("GO_FOR_SERVICE", None)]
    #[case("Standby", None)]
    fn test_train_status_matches_effective_status(
        #[case] s: &str,
        #[case] expected: Option<TrainStatus>,
    ) {
        assert_eq!(TrainStatus::from_str(s).ok(), expected);

        // Overrides are matched by the same rules as the roster
        let effective = EffectiveStatus::parse(s);
        match expected {
            Some(status) => assert_eq!(effective, status.into()),
            None => assert_eq!(effective, EffectiveStatus::Unrecognised(s.into())),
        }
    }

    #[rstest]
    #[case("unrecognised")]
    #[case("Unrecognised")]
    fn test_effective_status_parse_variant_name(#[case] s: &str) {
        assert_eq!(
            EffectiveStatus::parse(s),
            EffectiveStatus::Unrecognised(s.into())
        );
    }

    #[test]
    fn test_effective_status_from_train_status() {
        assert_eq!(
            EffectiveStatus::from(TrainStatus::InspectionRequired),
            EffectiveStatus::InspectionRequired
        );
    }

    #[rstest]
    #[case(0, "0")]
    #[case(999, "999")]
    #[case(1000, "1,000")]
    #[case(87456, "87,456")]
    #[case(145_678, "145,678")]
    #[case(1_234_567, "1,234,567")]
    fn test_format_thousands(#[case] value: u32, #[case] expected: &str) {
        assert_eq!(format_thousands(value), expected);
    }
}
