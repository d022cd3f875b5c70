#![allow(dead_code)]

use brainys_sdk::{
    brainys_test::{MockApi, RecordingBrowser},
    MemoryStorage, Session,
};
use std::sync::Arc;

pub struct Harness {
    pub api: Arc<MockApi>,
    pub storage: Arc<MemoryStorage>,
    pub session: Arc<Session>,
    pub browser: Arc<RecordingBrowser>,
}

pub fn harness() -> Harness {
    let api = Arc::new(MockApi::new());
    let storage = Arc::new(MemoryStorage::new());
    let session = Session::restore(api.clone(), storage.clone());
    Harness {
        api,
        storage,
        session,
        browser: Arc::new(RecordingBrowser::new()),
    }
}

/// Yield to spawned tasks until `condition` holds.
pub async fn eventually(mut condition: impl FnMut() -> bool) {
    for _ in 0..1_000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not met after yielding to background tasks");
}
