use crate::{Notice, NoticeLevel};

/// Where downloads are opened and notifications are shown.
pub trait BrowsingContext: Send + Sync {
    /// Point the current browsing context at `url`. For export download
    /// URLs this is what starts the file download.
    fn navigate(&self, url: &str);
    /// Show a transient notification to the user.
    fn notify(&self, notice: Notice);
}

/// A headless [`BrowsingContext`] that reports through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingBrowser;

impl BrowsingContext for TracingBrowser {
    fn navigate(&self, url: &str) {
        tracing::info!(%url, "navigate");
    }

    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => tracing::info!(text = %notice.message, "notice"),
            NoticeLevel::Error => tracing::warn!(text = %notice.message, "notice"),
        }
    }
}
