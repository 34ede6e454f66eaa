//! Export and trajectory reconstruction of stored movements.

use anyhow::Result;
use swingtrace_engine::SAMPLE_COLUMNS;
use swingtrace_testing::TestWorld;
use swingtrace_testing::fixtures;

#[test]
fn test_export_to_stdout() -> Result<()> {
    let session = fixtures::recorded_session(1, 8);
    let movement_id = session.movements()[0].id.to_string();
    let world = TestWorld::new().with_sessions(std::slice::from_ref(&session));

    let result = world.run(&["movement", "export", &movement_id[..8]])?;

    assert!(result.success(), "stderr: {}", result.stderr());
    let lines: Vec<&str> = result.stdout().lines().collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], SAMPLE_COLUMNS.join(","));
    assert!(lines[1].contains(&movement_id));
    Ok(())
}

#[test]
fn test_export_to_file_reports_rows() -> Result<()> {
    let session = fixtures::recorded_session(2, 5);
    let movement_id = session.movements()[1].id.to_string();
    let world = TestWorld::new()
        .json()
        .with_sessions(std::slice::from_ref(&session));
    let out = world.temp_dir().join("movement.csv");

    let result = world.run(&[
        "movement",
        "export",
        &movement_id,
        "--output",
        out.to_str().unwrap(),
    ])?;

    assert!(result.success(), "stderr: {}", result.stderr());
    let json = result.json()?;
    assert_eq!(json["content"]["row_count"], 5);
    assert_eq!(json["content"]["movement_id"], movement_id);

    let mut reader = csv::Reader::from_path(&out)?;
    assert_eq!(reader.headers()?.len(), SAMPLE_COLUMNS.len());
    assert_eq!(reader.records().count(), 5);
    Ok(())
}

#[test]
fn test_trajectory_json_shape() -> Result<()> {
    let session = fixtures::recorded_session(1, 30);
    let movement_id = session.movements()[0].id.to_string();
    let world = TestWorld::new()
        .json()
        .with_sessions(std::slice::from_ref(&session));

    let result = world.run(&["movement", "trajectory", &movement_id])?;

    assert!(result.success(), "stderr: {}", result.stderr());
    let json = result.json()?;
    let content = &json["content"];
    assert_eq!(content["sample_count"], 30);
    assert_eq!(content["positions"].as_array().unwrap().len(), 30);
    assert_eq!(content["speeds"].as_array().unwrap().len(), 29);
    assert_eq!(content["colors"].as_array().unwrap().len(), 29);
    assert_eq!(content["orientations"].as_array().unwrap().len(), 30);

    let key_times = content["key_times"].as_array().unwrap();
    assert_eq!(key_times[0].as_f64(), Some(0.0));
    assert_eq!(key_times[29].as_f64(), Some(1.0));

    let first = &content["positions"][0];
    assert_eq!(first["x"].as_f64(), Some(0.0));
    assert!(content["colors"][0].as_str().unwrap().starts_with('#'));
    Ok(())
}

#[test]
fn test_trajectory_plain_table() -> Result<()> {
    let session = fixtures::recorded_session(1, 4);
    let movement_id = session.movements()[0].id.to_string();
    let world = TestWorld::new().with_sessions(std::slice::from_ref(&session));

    let result = world.run(&["movement", "trajectory", &movement_id])?;

    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("Max speed"));
    assert!(result.stdout().contains("right forehand"));
    Ok(())
}

#[test]
fn test_unknown_movement_fails() -> Result<()> {
    let world = TestWorld::new();

    let result = world.run(&["movement", "trajectory", "0000"])?;

    assert!(!result.success());
    assert!(result.stderr().contains("Movement not found: 0000"));
    Ok(())
}
