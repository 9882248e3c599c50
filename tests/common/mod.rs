#![allow(dead_code)]

use anyhow::Result;
use ptz_servo::core::BlobStore;
use ptz_servo::{create_router, AppState, RecordingActuator, State, StorageKeys};
use serde_json::{json, Value};
use std::sync::Arc;

pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    pub sink: Arc<RecordingActuator>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn put_servo(&self, name: &str, min: i32, max: i32, channel: u16) -> Result<()> {
        let response = self
            .client
            .put(self.url(&format!("/servo/{}", name)))
            .json(&json!({"limit_min": min, "limit_max": max, "channel": channel}))
            .send()
            .await?;
        anyhow::ensure!(
            response.status() == 201,
            "servo {} not created: {}",
            name,
            response.status()
        );
        Ok(())
    }

    pub async fn get_json(&self, path: &str) -> Result<(u16, Value)> {
        let response = self.client.get(self.url(path)).send().await?;
        let status = response.status().as_u16();
        Ok((status, response.json().await?))
    }

    pub async fn post_json(&self, path: &str, body: Value) -> Result<(u16, Value)> {
        let response = self.client.post(self.url(path)).json(&body).send().await?;
        let status = response.status().as_u16();
        Ok((status, response.json().await?))
    }
}

/// Starts the router on an ephemeral port backed by `store`.
pub async fn spawn_app(store: Arc<dyn BlobStore>) -> Result<TestApp> {
    let sink = Arc::new(RecordingActuator::new());
    let state = State::load(store, sink.clone(), StorageKeys::default())?;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = create_router(AppState::new(state));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(TestApp {
        base_url: format!("http://{}", addr),
        client: reqwest::Client::new(),
        sink,
    })
}
