use crate::{
    client_utils::{value_to_i64, value_to_id},
    ApiEnvelope, BrowsingContext, ClientError, ClientResult, GeneratedArtifact, ModuleType,
    Notice, Session,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing_futures::Instrument;

/// The input of one generation request.
pub trait GenerationForm: Send + Sync {
    fn module(&self) -> ModuleType;

    /// Reject forms the service would refuse. Called before any request.
    fn validate(&self) -> ClientResult<()>;

    /// The JSON body posted to `/<module>/generate`.
    fn to_payload(&self) -> Value;
}

/// Receives the progress of a generation, in place of the page that shows
/// the form and the output side by side.
pub trait GenerationObserver: Send + Sync {
    fn on_loading(&self, loading: bool);
    /// The pretty-printed payload, or an empty string after a failure.
    fn on_result(&self, result: &str);
    fn on_generate_id(&self, id: &str);
}

fn require_name(name: &str) -> ClientResult<()> {
    if name.trim().is_empty() {
        return Err(ClientError::InvalidInput("Nama wajib diisi".to_string()));
    }
    Ok(())
}

/// Modul ajar request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct TeachingModuleForm {
    pub name: String,
    pub notes: String,
    pub phase: String,
    pub subject: String,
    pub element: String,
}

impl GenerationForm for TeachingModuleForm {
    fn module(&self) -> ModuleType {
        ModuleType::TeachingModule
    }

    fn validate(&self) -> ClientResult<()> {
        require_name(&self.name)
    }

    fn to_payload(&self) -> Value {
        json!({
            "name": self.name.trim(),
            "notes": self.notes.trim(),
            "phase": self.phase.trim(),
            "subject": self.subject.trim(),
            "element": self.element.trim(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct SyllabusForm {
    pub name: String,
    pub grade: String,
    pub subject: String,
    pub notes: String,
}

impl GenerationForm for SyllabusForm {
    fn module(&self) -> ModuleType {
        ModuleType::Syllabus
    }

    fn validate(&self) -> ClientResult<()> {
        require_name(&self.name)
    }

    fn to_payload(&self) -> Value {
        json!({
            "name": self.name.trim(),
            "grade": self.grade.trim(),
            "subject": self.subject.trim(),
            "notes": self.notes.trim(),
        })
    }
}

/// Bahan ajar request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct TeachingMaterialForm {
    pub name: String,
    pub grade: String,
    pub subject: String,
    pub notes: String,
}

impl GenerationForm for TeachingMaterialForm {
    fn module(&self) -> ModuleType {
        ModuleType::TeachingMaterial
    }

    fn validate(&self) -> ClientResult<()> {
        require_name(&self.name)
    }

    fn to_payload(&self) -> Value {
        json!({
            "name": self.name.trim(),
            "grade": self.grade.trim(),
            "subject": self.subject.trim(),
            "notes": self.notes.trim(),
        })
    }
}

/// A request for a module without a dedicated form. String fields are
/// trimmed, other values are sent as given.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenericForm {
    pub module: ModuleType,
    pub fields: Map<String, Value>,
}

impl GenericForm {
    #[must_use]
    pub fn new(module: ModuleType) -> Self {
        Self {
            module,
            fields: Map::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

impl GenerationForm for GenericForm {
    fn module(&self) -> ModuleType {
        self.module
    }

    fn validate(&self) -> ClientResult<()> {
        require_name(self.fields.get("name").and_then(Value::as_str).unwrap_or(""))
    }

    fn to_payload(&self) -> Value {
        let fields = self
            .fields
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(text) => Value::String(text.trim().to_string()),
                    other => other.clone(),
                };
                (key.clone(), value)
            })
            .collect();
        Value::Object(fields)
    }
}

/// Submits generation forms and reports progress to an observer.
pub struct Generator {
    session: Arc<Session>,
    browser: Arc<dyn BrowsingContext>,
}

impl Generator {
    #[must_use]
    pub fn new(session: Arc<Session>, browser: Arc<dyn BrowsingContext>) -> Self {
        Self { session, browser }
    }

    /// Generate an artifact. Loading is reported around the request, the
    /// result and the artifact id are pushed to `observer` and a credit
    /// refresh is started in the background.
    pub async fn submit<F>(
        &self,
        form: &F,
        observer: &dyn GenerationObserver,
    ) -> ClientResult<GeneratedArtifact>
    where
        F: GenerationForm + ?Sized,
    {
        let module = form.module();
        let span = tracing::info_span!("brainys.generate", %module);
        self.run(form, observer).instrument(span).await
    }

    async fn run<F>(
        &self,
        form: &F,
        observer: &dyn GenerationObserver,
    ) -> ClientResult<GeneratedArtifact>
    where
        F: GenerationForm + ?Sized,
    {
        let module = form.module();
        if let Err(error) = form.validate() {
            self.browser.notify(Notice::error(error.to_string()));
            return Err(error);
        }

        let _loading = Loading::start(observer);

        let envelope = match self.request(module, form.to_payload()).await {
            Ok(envelope) => envelope,
            Err(error) => {
                tracing::warn!(%error, "generation failed");
                observer.on_result("");
                self.browser
                    .notify(Notice::error(failure_message(&error, module)));
                return Err(error);
            }
        };

        let _ = self.session.spawn_refresh();

        let id = resolve_artifact_id(&envelope);
        let artifact = GeneratedArtifact {
            id,
            module,
            payload: envelope.data,
        };
        observer.on_result(&artifact.to_json_string()?);

        let message = envelope
            .message
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| success_message(module).to_string());
        self.browser.notify(Notice::success(message));

        match &artifact.id {
            Some(id) => {
                tracing::info!(generate_id = %id, "artifact generated");
                observer.on_generate_id(id);
            }
            None => tracing::warn!("generation response carries no artifact id"),
        }

        Ok(artifact)
    }

    async fn request(&self, module: ModuleType, payload: Value) -> ClientResult<ApiEnvelope> {
        self.session
            .api()
            .post(&module.generate_endpoint(), payload)
            .await?
            .into_success()
    }

    /// Credits charged by one generation of `module`.
    pub async fn credit_charge(&self, module: ModuleType) -> ClientResult<i64> {
        let path = format!("/module-credit-charges/{}", module.credit_charge_slug());
        let envelope = self.session.api().get(&path).await?.into_success()?;
        Ok(value_to_i64(&envelope.data["credit_charged_generate"]))
    }
}

/// Reports `on_loading(true)` on creation and `on_loading(false)` when
/// dropped.
struct Loading<'a>(&'a dyn GenerationObserver);

impl<'a> Loading<'a> {
    fn start(observer: &'a dyn GenerationObserver) -> Self {
        observer.on_loading(true);
        Self(observer)
    }
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        self.0.on_loading(false);
    }
}

/// The id may sit at the top level, inside `data` or under `generateId`.
fn resolve_artifact_id(envelope: &ApiEnvelope) -> Option<String> {
    envelope
        .extra
        .get("id")
        .and_then(value_to_id)
        .or_else(|| envelope.data.get("id").and_then(value_to_id))
        .or_else(|| envelope.extra.get("generateId").and_then(value_to_id))
}

fn success_message(module: ModuleType) -> &'static str {
    match module {
        ModuleType::TeachingModule => "Modul ajar berhasil dibuat!",
        ModuleType::Syllabus => "Silabus berhasil dibuat!",
        ModuleType::ExerciseSet => "Soal berhasil dibuat!",
        ModuleType::TeachingMaterial => "Bahan ajar berhasil dibuat!",
        ModuleType::GamifiedMaterial => "Gamifikasi berhasil dibuat!",
        ModuleType::AnswerKeyBlueprint => "Kisi-kisi berhasil dibuat!",
        ModuleType::LearningFlow => "ATP berhasil dibuat!",
    }
}

fn failure_message(error: &ClientError, module: ModuleType) -> String {
    if let Some(message) = error.server_message() {
        return message.to_string();
    }
    match error.status() {
        Some(status) => format!("Error {}", status.as_u16()),
        None => format!("Gagal generate {module}. Silakan coba lagi."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn envelope(body: Value) -> ApiEnvelope {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn artifact_id_lookup_order() {
        let top = envelope(json!({ "status": "success", "id": 5, "data": { "id": "inner" } }));
        assert_eq!(resolve_artifact_id(&top), Some("5".to_string()));

        let nested = envelope(json!({ "status": "success", "data": { "id": "inner" }, "generateId": "g" }));
        assert_eq!(resolve_artifact_id(&nested), Some("inner".to_string()));

        let legacy = envelope(json!({ "status": "success", "data": {}, "generateId": "g-1" }));
        assert_eq!(resolve_artifact_id(&legacy), Some("g-1".to_string()));

        let none = envelope(json!({ "status": "success", "data": [1, 2] }));
        assert_eq!(resolve_artifact_id(&none), None);
    }

    #[test]
    fn payloads_are_trimmed() {
        let form = SyllabusForm {
            name: "  Silabus IPA ".to_string(),
            grade: "fase_d".to_string(),
            subject: " IPA".to_string(),
            notes: String::new(),
        };
        assert_eq!(
            form.to_payload(),
            json!({ "name": "Silabus IPA", "grade": "fase_d", "subject": "IPA", "notes": "" })
        );

        let generic = GenericForm::new(ModuleType::AnswerKeyBlueprint)
            .field("name", " Kisi ")
            .field("jumlah_soal", 10);
        assert_eq!(
            generic.to_payload(),
            json!({ "name": "Kisi", "jumlah_soal": 10 })
        );
    }

    #[test]
    fn name_is_required() {
        let form = TeachingModuleForm {
            name: "   ".to_string(),
            ..TeachingModuleForm::default()
        };
        assert!(matches!(form.validate(), Err(ClientError::InvalidInput(_))));
        assert!(GenericForm::new(ModuleType::LearningFlow).validate().is_err());
    }

    #[test]
    fn failure_message_falls_back_to_status() {
        let error = ClientError::StatusCode(StatusCode::UNPROCESSABLE_ENTITY, None);
        assert_eq!(failure_message(&error, ModuleType::Syllabus), "Error 422");

        let error = ClientError::Invariant("no data".to_string());
        assert_eq!(
            failure_message(&error, ModuleType::Syllabus),
            "Gagal generate syllabus. Silakan coba lagi."
        );
    }
}
