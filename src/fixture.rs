//! Fixtures for tests
use crate::scenario::{Scenario, StatusChange};
use crate::train::{EffectiveStatus, Train, TrainStatus};
use rstest::fixture;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

/// Create a train with only the fields relevant to simulation filled in
pub fn train(id: &str, status: TrainStatus, ai_risk_score: f64, total_mileage: u32) -> Train {
    Train {
        id: id.into(),
        name: format!("Train {id}"),
        current_location: "Depot".into(),
        status,
        ai_risk_score,
        total_mileage,
        assigned_bay: None,
        assigned_route: None,
    }
}

/// The five trains of the bundled metro fleet
#[fixture]
pub fn metro_trains() -> Vec<Train> {
    vec![
        train("TRN-001", TrainStatus::GoForService, 0.15, 145_678),
        train("TRN-002", TrainStatus::InspectionRequired, 0.72, 198_234),
        train("TRN-003", TrainStatus::GoForService, 0.31, 87_456),
        train("TRN-004", TrainStatus::Standby, 0.45, 156_789),
        train("TRN-005", TrainStatus::GoForService, 0.18, 92_341),
    ]
}

/// A five-train roster with TRN-001, TRN-002 and TRN-005 in service and the rest on standby
#[fixture]
pub fn mixed_trains() -> Vec<Train> {
    vec![
        train("TRN-001", TrainStatus::GoForService, 0.15, 145_678),
        train("TRN-002", TrainStatus::GoForService, 0.72, 198_234),
        train("TRN-003", TrainStatus::Standby, 0.31, 87_456),
        train("TRN-004", TrainStatus::Standby, 0.45, 156_789),
        train("TRN-005", TrainStatus::GoForService, 0.18, 92_341),
    ]
}

#[fixture]
pub fn branding_event() -> Scenario {
    let change = |train_id: &str| StatusChange {
        train_id: train_id.into(),
        new_status: EffectiveStatus::BrandingUnavailable,
        reason: "Special event branding requirement".into(),
    };

    Scenario {
        id: "branding_event".into(),
        name: "Special Event Branding".into(),
        description: "Two trains unavailable for special event branding".into(),
        changes: vec![change("TRN-002"), change("TRN-004")],
    }
}

#[fixture]
pub fn maintenance_surge() -> Scenario {
    let change = |train_id: &str, reason: &str| StatusChange {
        train_id: train_id.into(),
        new_status: EffectiveStatus::MaintenanceRequired,
        reason: reason.into(),
    };

    Scenario {
        id: "maintenance_surge".into(),
        name: "Maintenance Surge".into(),
        description: "Three additional trains require maintenance".into(),
        changes: vec![
            change("TRN-001", "Preventive maintenance schedule"),
            change("TRN-003", "HVAC system inspection needed"),
            change("TRN-005", "Brake system service due"),
        ],
    }
}
