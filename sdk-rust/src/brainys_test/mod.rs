//! Test doubles for the client seams: a queue-backed [`MockApi`], a
//! [`RecordingBrowser`] and a [`RecordingObserver`].

mod api;

pub use api::{profile_data, MockApi, MockMethod, MockResponse, TrackedRequest};

use crate::{BrowsingContext, GenerationObserver, Notice, NoticeLevel};
use std::sync::Mutex;

/// A browsing context that remembers every navigation and notice.
#[derive(Default)]
pub struct RecordingBrowser {
    navigations: Mutex<Vec<String>>,
    notices: Mutex<Vec<Notice>>,
}

impl RecordingBrowser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs navigated to, oldest first.
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().expect("browser state poisoned").clone()
    }

    /// The most recent navigation, i.e. the current location.
    pub fn location(&self) -> Option<String> {
        self.navigations().pop()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("browser state poisoned").clone()
    }

    /// Messages of the error notices shown so far.
    pub fn errors(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(|notice| notice.level == NoticeLevel::Error)
            .map(|notice| notice.message)
            .collect()
    }
}

impl BrowsingContext for RecordingBrowser {
    fn navigate(&self, url: &str) {
        self.navigations
            .lock()
            .expect("browser state poisoned")
            .push(url.to_string());
    }

    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .expect("browser state poisoned")
            .push(notice);
    }
}

/// A generation observer that records every callback.
#[derive(Default)]
pub struct RecordingObserver {
    loading: Mutex<Vec<bool>>,
    results: Mutex<Vec<String>>,
    generate_ids: Mutex<Vec<String>>,
}

impl RecordingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loading transitions in call order.
    pub fn loading(&self) -> Vec<bool> {
        self.loading.lock().expect("observer state poisoned").clone()
    }

    pub fn results(&self) -> Vec<String> {
        self.results.lock().expect("observer state poisoned").clone()
    }

    pub fn generate_ids(&self) -> Vec<String> {
        self.generate_ids
            .lock()
            .expect("observer state poisoned")
            .clone()
    }
}

impl GenerationObserver for RecordingObserver {
    fn on_loading(&self, loading: bool) {
        self.loading
            .lock()
            .expect("observer state poisoned")
            .push(loading);
    }

    fn on_result(&self, result: &str) {
        self.results
            .lock()
            .expect("observer state poisoned")
            .push(result.to_string());
    }

    fn on_generate_id(&self, id: &str) {
        self.generate_ids
            .lock()
            .expect("observer state poisoned")
            .push(id.to_string());
    }
}
