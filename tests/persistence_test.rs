mod common;

use anyhow::Result;
use common::spawn_app;
use ptz_servo::{FileStore, RecordingActuator, ServoError, State, StorageKeys};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

fn read_json(dir: &TempDir, file: &str) -> Result<serde_json::Value> {
    let data = std::fs::read(dir.path().join(file))?;
    Ok(serde_json::from_slice(&data)?)
}

#[tokio::test]
async fn test_state_survives_restart() -> Result<()> {
    let temp_dir = TempDir::new()?;

    {
        let app = spawn_app(Arc::new(FileStore::new(temp_dir.path()))).await?;
        app.put_servo("pan", 0, 180, 0).await?;
        app.put_servo("tilt", 10, 170, 1).await?;
        app.post_json("/absolute/tilt", json!({"position": 45}))
            .await?;
        app.client
            .put(app.url("/preset/desk"))
            .json(&json!({"servos": {"pan": 100, "tilt": 30}}))
            .send()
            .await?;
    }

    assert_eq!(
        read_json(&temp_dir, "servos.json")?,
        json!({
            "pan": {"position": 0, "channel": 0, "limits": {"min": 0, "max": 180}},
            "tilt": {"position": 45, "channel": 1, "limits": {"min": 10, "max": 170}}
        })
    );
    assert_eq!(
        read_json(&temp_dir, "presets.json")?,
        json!({"desk": {"pan": 100, "tilt": 30}})
    );

    let restarted = spawn_app(Arc::new(FileStore::new(temp_dir.path()))).await?;
    let (_, positions) = restarted.get_json("/absolute").await?;
    assert_eq!(positions, json!({"pan": 0, "tilt": 45}));

    let response = restarted
        .client
        .post(restarted.url("/preset/desk"))
        .send()
        .await?;
    assert_eq!(response.status(), 204);
    assert_eq!(restarted.sink.commands(), vec![(0, 100), (1, 30)]);
    Ok(())
}

#[tokio::test]
async fn test_deletes_are_persisted() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let app = spawn_app(Arc::new(FileStore::new(temp_dir.path()))).await?;
    app.put_servo("pan", 0, 180, 0).await?;
    app.put_servo("zoom", 0, 10, 2).await?;

    let response = app.client.delete(app.url("/servo/zoom")).send().await?;
    assert_eq!(response.status(), 200);

    assert_eq!(
        read_json(&temp_dir, "servos.json")?,
        json!({"pan": {"position": 0, "channel": 0, "limits": {"min": 0, "max": 180}}})
    );
    Ok(())
}

#[test]
fn test_missing_and_malformed_files_start_empty() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let keys = StorageKeys::default();

    let state = State::load(
        Arc::new(FileStore::new(temp_dir.path())),
        Arc::new(RecordingActuator::new()),
        keys.clone(),
    )?;
    assert!(state.servos().is_empty());

    std::fs::write(temp_dir.path().join("servos.json"), "garbage")?;
    std::fs::write(temp_dir.path().join("presets.json"), "{\"home\": 3}")?;
    let state = State::load(
        Arc::new(FileStore::new(temp_dir.path())),
        Arc::new(RecordingActuator::new()),
        keys,
    )?;
    assert!(state.servos().is_empty());
    assert!(state.presets().is_empty());
    Ok(())
}

#[test]
fn test_preset_referencing_unknown_servo_fails_startup() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("servos.json"),
        r#"{"pan": {"position": 5, "channel": 0, "limits": {"min": 0, "max": 10}}}"#,
    )?;
    std::fs::write(
        temp_dir.path().join("presets.json"),
        r#"{"home": {"pan": 1, "tilt": 2}}"#,
    )?;

    let result = State::load(
        Arc::new(FileStore::new(temp_dir.path())),
        Arc::new(RecordingActuator::new()),
        StorageKeys::default(),
    );
    assert!(matches!(result, Err(ServoError::ServoNotFound { ref name }) if name == "tilt"));
    Ok(())
}

#[test]
fn test_custom_storage_keys() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let keys = StorageKeys {
        servos: "rig.json".to_string(),
        presets: "looks.json".to_string(),
    };
    let mut state = State::load(
        Arc::new(FileStore::new(temp_dir.path())),
        Arc::new(RecordingActuator::new()),
        keys,
    )?;
    state.put_servo(
        "pan",
        ptz_servo::core::ServoSpec {
            limits: ptz_servo::core::Limits::new(0, 90),
            channel: 3,
            position: Some(45),
        },
    )?;

    assert_eq!(read_json(&temp_dir, "rig.json")?["pan"]["position"], 45);
    assert_eq!(read_json(&temp_dir, "looks.json")?, json!({}));
    assert!(!temp_dir.path().join("servos.json").exists());
    Ok(())
}

#[tokio::test]
async fn test_restart_after_tightening_limits() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let app = spawn_app(Arc::new(FileStore::new(temp_dir.path()))).await?;
    app.put_servo("pan", 0, 180, 0).await?;
    app.post_json("/absolute/pan", json!({"position": 90}))
        .await?;
    app.client
        .put(app.url("/preset/wide"))
        .json(&json!({"servos": {"pan": 170}}))
        .send()
        .await?;
    let response = app
        .client
        .patch(app.url("/servo/pan"))
        .json(&json!({"limit_max": 80}))
        .send()
        .await?;
    assert_eq!(response.status(), 200);
    let before = read_json(&temp_dir, "servos.json")?;

    let restarted = spawn_app(Arc::new(FileStore::new(temp_dir.path()))).await?;
    let (status, servos) = restarted.get_json("/servos").await?;
    assert_eq!(status, 200);
    assert_eq!(servos, before);
    assert_eq!(
        servos,
        json!({"pan": {"position": 90, "channel": 0, "limits": {"min": 0, "max": 80}}})
    );

    let (_, presets) = restarted.get_json("/presets").await?;
    assert_eq!(presets, json!({"wide": {"pan": 170}}));
    let (status, body) = restarted.post_json("/preset/wide", json!({})).await?;
    assert_eq!(status, 403);
    assert_eq!(body["errors"][0]["error"], "MovementOutOfRange");
    assert!(restarted.sink.commands().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_deleting_servo_used_by_preset_blocks_restart() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let app = spawn_app(Arc::new(FileStore::new(temp_dir.path()))).await?;
    app.put_servo("pan", 0, 180, 0).await?;
    app.put_servo("tilt", 0, 90, 1).await?;
    app.client
        .put(app.url("/preset/desk"))
        .json(&json!({"servos": {"pan": 10, "tilt": 20}}))
        .send()
        .await?;
    let response = app.client.delete(app.url("/servo/tilt")).send().await?;
    assert_eq!(response.status(), 200);

    assert_eq!(
        read_json(&temp_dir, "presets.json")?,
        json!({"desk": {"pan": 10, "tilt": 20}})
    );
    let (status, _) = app.post_json("/preset/desk", json!({})).await?;
    assert_eq!(status, 404);

    let result = State::load(
        Arc::new(FileStore::new(temp_dir.path())),
        Arc::new(RecordingActuator::new()),
        StorageKeys::default(),
    );
    assert!(matches!(result, Err(ServoError::ServoNotFound { ref name }) if name == "tilt"));

    let response = app.client.delete(app.url("/preset/desk")).send().await?;
    assert_eq!(response.status(), 200);
    let state = State::load(
        Arc::new(FileStore::new(temp_dir.path())),
        Arc::new(RecordingActuator::new()),
        StorageKeys::default(),
    )?;
    assert_eq!(state.servos().len(), 1);
    assert!(state.presets().is_empty());
    Ok(())
}
