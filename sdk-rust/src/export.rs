use crate::{
    session::BackgroundRefresh, BrowsingContext, ClientError, ClientResult, ExportFormat,
    ExportLoading, ExportRequest, Notice, Session,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex, PoisonError};
use tracing_futures::Instrument;

/// The result of a completed export.
#[derive(Debug)]
pub struct ExportOutcome {
    /// Where the browsing context was sent to fetch the file.
    pub download_url: String,
    /// The detached credit refresh started by this export.
    pub refresh: BackgroundRefresh,
}

/// Turns export clicks into file downloads.
///
/// Each format has its own in-flight flag, so exporting to Word does not
/// lock the Excel or PPT buttons. Failed exports are reported to the user
/// and never retried.
pub struct Exporter {
    session: Arc<Session>,
    browser: Arc<dyn BrowsingContext>,
    loading: Arc<Mutex<ExportLoading>>,
}

impl Exporter {
    #[must_use]
    pub fn new(session: Arc<Session>, browser: Arc<dyn BrowsingContext>) -> Self {
        Self {
            session,
            browser,
            loading: Arc::new(Mutex::new(ExportLoading::default())),
        }
    }

    /// Snapshot of the in-flight flags.
    #[must_use]
    pub fn loading(&self) -> ExportLoading {
        *self.loading.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn is_loading(&self, format: ExportFormat) -> bool {
        self.loading().get(format)
    }

    /// Request a server-side render of the artifact and navigate to the
    /// returned download URL.
    pub async fn export(&self, request: &ExportRequest) -> ClientResult<ExportOutcome> {
        let span = tracing::info_span!(
            "brainys.export",
            module = %request.module,
            format = %request.format,
            artifact_id = %request.artifact_id,
        );
        self.run(request).instrument(span).await
    }

    async fn run(&self, request: &ExportRequest) -> ClientResult<ExportOutcome> {
        if let Err(error) = request.validate() {
            self.browser.notify(Notice::error(notice_text(&error)));
            return Err(error);
        }

        let _in_flight = InFlight::acquire(&self.loading, request.format)?;

        tracing::info!(endpoint = %request.endpoint(), "exporting");

        match self.request_download(request).await {
            Ok(download_url) => {
                let refresh = self.session.spawn_refresh();
                tracing::info!(%download_url, "export ready");
                self.browser.navigate(&download_url);
                Ok(ExportOutcome {
                    download_url,
                    refresh,
                })
            }
            Err(error) => {
                tracing::warn!(%error, "export failed");
                self.browser
                    .notify(Notice::error(failure_message(&error, request.format)));
                Err(error)
            }
        }
    }

    async fn request_download(&self, request: &ExportRequest) -> ClientResult<String> {
        let envelope = self
            .session
            .api()
            .post(&request.endpoint(), json!({ "id": request.artifact_id }))
            .await?
            .into_success()?;

        envelope
            .data
            .get("download_url")
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .map(ToString::to_string)
            .ok_or_else(|| {
                ClientError::Invariant("Export response has no download_url".to_string())
            })
    }
}

/// Marks a format as in flight for as long as it is alive.
struct InFlight {
    loading: Arc<Mutex<ExportLoading>>,
    format: ExportFormat,
}

impl InFlight {
    fn acquire(loading: &Arc<Mutex<ExportLoading>>, format: ExportFormat) -> ClientResult<Self> {
        let mut flags = loading.lock().unwrap_or_else(PoisonError::into_inner);
        if flags.get(format) {
            return Err(ClientError::Busy(format));
        }
        flags.set(format, true);
        Ok(Self {
            loading: Arc::clone(loading),
            format,
        })
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.loading
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set(self.format, false);
    }
}

fn notice_text(error: &ClientError) -> String {
    match error {
        ClientError::InvalidInput(message) => message.clone(),
        other => other.to_string(),
    }
}

/// The server's message when it sent one, otherwise a generic text.
fn failure_message(error: &ClientError, format: ExportFormat) -> String {
    error.server_message().map_or_else(
        || format!("Gagal export {format}. Silakan coba lagi."),
        ToString::to_string,
    )
}
