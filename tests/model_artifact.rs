use fault_predictor::ml::{Classifier, FaultModel, Label};
use fault_predictor::{FaultError, FeatureRow};
use std::fs;
use std::path::{Path, PathBuf};

fn sample_artifact() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("gaussian_nb_pipeline.json")
}

fn scratch_file(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("fault-artifact-{}", uuid::Uuid::new_v4().simple()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn row(equipment: &str, location: &str, readings: [f64; 4]) -> FeatureRow {
    FeatureRow {
        equipment_name: equipment.to_string(),
        location_name: location.to_string(),
        temperature: readings[0],
        pressure: readings[1],
        vibration: readings[2],
        humidity: readings[3],
    }
}

#[test]
fn missing_artifact_is_reported_with_its_path() {
    let path = std::env::temp_dir().join("definitely-not-here-gaussian_nb_pipeline.json");
    let err = FaultModel::load(&path).unwrap_err();

    assert!(matches!(err, FaultError::ModelNotFound { .. }));
    assert!(err.to_string().contains("definitely-not-here-gaussian_nb_pipeline.json"));
}

#[test]
fn directory_is_not_an_artifact() {
    let err = FaultModel::load(std::env::temp_dir()).unwrap_err();
    assert!(matches!(err, FaultError::ModelNotFound { .. }));
}

#[test]
fn corrupt_artifact_is_invalid() {
    let path = scratch_file("model.json", "{ this is not json");
    let err = FaultModel::load(&path).unwrap_err();
    assert!(matches!(err, FaultError::InvalidModel(_)));
}

#[test]
fn artifact_with_wrong_estimator_shape_is_invalid() {
    let mut artifact: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(sample_artifact()).unwrap()).unwrap();
    artifact["estimator"]["theta"][0]
        .as_array_mut()
        .unwrap()
        .pop();

    let path = scratch_file("model.json", &artifact.to_string());
    let err = FaultModel::load(&path).unwrap_err();
    assert!(matches!(err, FaultError::InvalidModel(_)));
}

#[test]
fn sample_artifact_loads_and_describes_itself() {
    let model = FaultModel::load(sample_artifact()).unwrap();
    let info = model.info();

    assert_eq!(info.estimator, "gaussian_nb");
    assert_eq!(info.encoded_width, 11);
    assert_eq!(info.classes, vec![Label::Number(0.0), Label::Number(1.0)]);
    assert_eq!(
        info.features,
        vec![
            "equipment_name",
            "location_name",
            "temperature",
            "pressure",
            "vibration",
            "humidity"
        ]
    );
}

#[test]
fn sample_artifact_separates_normal_and_faulty_readings() {
    let model = FaultModel::load(sample_artifact()).unwrap();

    let labels = model
        .predict(&[
            row("Pump-1", "PlantA", [75.0, 101.3, 0.02, 40.0]),
            row("Turbine", "PlantC", [95.0, 110.0, 0.08, 70.0]),
            row("Compressor", "PlantB", [68.0, 99.0, 0.025, 44.0]),
        ])
        .unwrap();

    let faulty: Vec<f64> = labels.iter().map(|l| l.to_f64().unwrap()).collect();
    assert_eq!(faulty, vec![0.0, 1.0, 0.0]);
}

#[test]
fn unseen_category_fails_the_prediction() {
    let model = FaultModel::load(sample_artifact()).unwrap();
    let err = model
        .predict(&[row("Boiler-9", "PlantA", [75.0, 101.3, 0.02, 40.0])])
        .unwrap_err();

    assert!(matches!(err, FaultError::UnknownCategory { .. }));
}
