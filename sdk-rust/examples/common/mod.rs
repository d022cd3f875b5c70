#![allow(dead_code)]

use brainys_sdk::{FileStorage, HttpApi, HttpApiOptions, Session};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Log to stderr, filtered by `RUST_LOG` (defaults to `info`).
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// A session persisted in `BRAINYS_SESSION_FILE` (default
/// `.brainys-session.json`) talking to `BRAINYS_API_URL`.
pub fn session() -> Arc<Session> {
    let path = std::env::var("BRAINYS_SESSION_FILE")
        .unwrap_or_else(|_| ".brainys-session.json".to_string());
    let storage = Arc::new(FileStorage::open(path).expect("session file should be readable"));
    let api = Arc::new(HttpApi::new(storage.clone(), HttpApiOptions::from_env()));
    Session::restore(api, storage)
}
