//! Code for reading the fleet roster from a CSV file.
use super::*;
use crate::train::{Train, TrainID};
use std::path::Path;

const TRAINS_FILE_NAME: &str = "trains.csv";

/// Reads the fleet roster from a CSV file.
///
/// # Arguments
///
/// * `fleet_dir` - Folder containing fleet input files
///
/// # Returns
///
/// An `IndexMap<TrainID, Train>` in roster order or an error
pub fn read_trains(fleet_dir: &Path) -> Result<IndexMap<TrainID, Train>> {
    let file_path = fleet_dir.join(TRAINS_FILE_NAME);
    let trains = read_csv(&file_path)?;
    try_collect_id_map(trains).with_context(|| input_err_msg(&file_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::train::TrainStatus;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    /// Create an example trains file in dir_path
    fn create_trains_file(dir_path: &Path, contents: &str) {
        let file_path = dir_path.join(TRAINS_FILE_NAME);
        let mut file = File::create(file_path).unwrap();
        writeln!(file, "{contents}").unwrap();
    }

    #[test]
    fn test_read_trains() {
        let dir = tempdir().unwrap();
        create_trains_file(
            dir.path(),
            "id,name,current_location,status,ai_risk_score,total_mileage,assigned_bay,assigned_route
TRN-001,Express Metro 1,MG Road Station,go_for_service,0.15,145678,Bay 3,Line 1
TRN-002,City Runner 2,Aluva Depot,inspection_required,0.72,198234,Maintenance Bay 1,",
        );
        let trains = read_trains(dir.path()).unwrap();
        assert_eq!(
            trains.values().collect_vec(),
            [
                &Train {
                    id: "TRN-001".into(),
                    name: "Express Metro 1".into(),
                    current_location: "MG Road Station".into(),
                    status: TrainStatus::GoForService,
                    ai_risk_score: 0.15,
                    total_mileage: 145_678,
                    assigned_bay: Some("Bay 3".into()),
                    assigned_route: Some("Line 1".into()),
                },
                &Train {
                    id: "TRN-002".into(),
                    name: "City Runner 2".into(),
                    current_location: "Aluva Depot".into(),
                    status: TrainStatus::InspectionRequired,
                    ai_risk_score: 0.72,
                    total_mileage: 198_234,
                    assigned_bay: Some("Maintenance Bay 1".into()),
                    assigned_route: None,
                },
            ]
        );
    }

    #[test]
    fn test_read_trains_duplicate_id() {
        let dir = tempdir().unwrap();
        create_trains_file(
            dir.path(),
            "id,name,current_location,status,ai_risk_score,total_mileage,assigned_bay,assigned_route
TRN-001,Express Metro 1,MG Road Station,go_for_service,0.15,145678,,
TRN-001,Express Metro 1,MG Road Station,standby,0.15,145678,,",
        );
        let err = read_trains(dir.path()).unwrap_err();
        assert_eq!(
            err.chain().nth(1).unwrap().to_string(),
            "Duplicate ID found: TRN-001"
        );
    }

    #[test]
    fn test_read_trains_bad_risk_score() {
        let dir = tempdir().unwrap();
        create_trains_file(
            dir.path(),
            "id,name,current_location,status,ai_risk_score,total_mileage,assigned_bay,assigned_route
TRN-001,Express Metro 1,MG Road Station,go_for_service,1.5,145678,,",
        );
        assert!(read_trains(dir.path()).is_err());
    }

    #[test]
    fn test_read_trains_bad_status() {
        let dir = tempdir().unwrap();
        create_trains_file(
            dir.path(),
            "id,name,current_location,status,ai_risk_score,total_mileage,assigned_bay,assigned_route
TRN-001,Express Metro 1,MG Road Station,branding_unavailable,0.1,145678,,",
        );
        assert!(read_trains(dir.path()).is_err());
    }

    #[test]
    fn test_read_trains_status_case_sensitive() {
        let dir = tempdir().unwrap();
        create_trains_file(
            dir.path(),
            "id,name,current_location,status,ai_risk_score,total_mileage,assigned_bay,assigned_route
TRN-001,Express Metro 1,MG Road Station,GO_FOR_SERVICE,0.1,145678,,",
        );
        assert!(read_trains(dir.path()).is_err());
    }

    #[test]
    fn test_read_trains_missing_file() {
        let dir = tempdir().unwrap();
        assert!(read_trains(dir.path()).is_err());
    }
}
