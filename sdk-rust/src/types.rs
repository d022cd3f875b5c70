use crate::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};

/// The category of a generated artifact. Determines the API endpoints,
/// the renderer layout and the export formats that are offered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub enum ModuleType {
    /// Modul ajar.
    #[serde(rename = "modul-ajar")]
    TeachingModule,
    #[serde(rename = "syllabus")]
    Syllabus,
    /// Soal latihan.
    #[serde(rename = "exercise-v2")]
    ExerciseSet,
    /// Bahan ajar.
    #[serde(rename = "bahan-ajar")]
    TeachingMaterial,
    /// Gamifikasi.
    #[serde(rename = "gamification")]
    GamifiedMaterial,
    /// Kisi-kisi.
    #[serde(rename = "hint")]
    AnswerKeyBlueprint,
    /// Alur tujuan pembelajaran.
    #[serde(rename = "atp")]
    LearningFlow,
}

impl ModuleType {
    pub const ALL: [Self; 7] = [
        Self::TeachingModule,
        Self::Syllabus,
        Self::ExerciseSet,
        Self::TeachingMaterial,
        Self::GamifiedMaterial,
        Self::AnswerKeyBlueprint,
        Self::LearningFlow,
    ];

    /// Path segment used by the generate and export endpoints.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::TeachingModule => "modul-ajar",
            Self::Syllabus => "syllabus",
            Self::ExerciseSet => "exercise-v2",
            Self::TeachingMaterial => "bahan-ajar",
            Self::GamifiedMaterial => "gamification",
            Self::AnswerKeyBlueprint => "hint",
            Self::LearningFlow => "atp",
        }
    }

    /// Path segment of `/module-credit-charges/<slug>`.
    #[must_use]
    pub fn credit_charge_slug(self) -> &'static str {
        match self {
            Self::Syllabus => "silabus",
            other => other.slug(),
        }
    }

    /// Export formats the service can render for this module.
    #[must_use]
    pub fn export_formats(self) -> &'static [ExportFormat] {
        match self {
            Self::Syllabus | Self::ExerciseSet => &[ExportFormat::Word],
            Self::TeachingModule | Self::AnswerKeyBlueprint | Self::LearningFlow => {
                &[ExportFormat::Word, ExportFormat::Excel]
            }
            Self::TeachingMaterial | Self::GamifiedMaterial => {
                &[ExportFormat::Word, ExportFormat::Ppt]
            }
        }
    }

    #[must_use]
    pub fn supports(self, format: ExportFormat) -> bool {
        self.export_formats().contains(&format)
    }

    #[must_use]
    pub fn generate_endpoint(self) -> String {
        format!("/{}/generate", self.slug())
    }

    #[must_use]
    pub fn export_endpoint(self, format: ExportFormat) -> String {
        format!("/{}/export-{}", self.slug(), format.as_str())
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ModuleType {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|module| module.slug() == s)
            .ok_or_else(|| ClientError::InvalidInput(format!("Unknown module type: {s}")))
    }
}

/// File formats the export endpoints produce.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Word,
    Excel,
    Ppt,
}

impl ExportFormat {
    pub const ALL: [Self; 3] = [Self::Word, Self::Excel, Self::Ppt];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Excel => "excel",
            Self::Ppt => "ppt",
        }
    }

    /// Caption of the export button.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Word => "Export Word",
            Self::Excel => "Export Excel",
            Self::Ppt => "Export PPT",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| ClientError::InvalidInput(format!("Unknown export format: {s}")))
    }
}

/// A request to render an artifact into a downloadable file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct ExportRequest {
    pub artifact_id: String,
    pub module: ModuleType,
    pub format: ExportFormat,
}

impl ExportRequest {
    pub fn new(artifact_id: impl Into<String>, module: ModuleType, format: ExportFormat) -> Self {
        Self {
            artifact_id: artifact_id.into(),
            module,
            format,
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        self.module.export_endpoint(self.format)
    }

    pub fn validate(&self) -> ClientResult<()> {
        if self.artifact_id.trim().is_empty() {
            return Err(ClientError::InvalidInput(
                "Generate ID tidak ditemukan!".to_string(),
            ));
        }
        if !self.module.supports(self.format) {
            return Err(ClientError::InvalidInput(format!(
                "Export {} tidak tersedia untuk {}",
                self.format, self.module
            )));
        }
        Ok(())
    }
}

/// One generated instructional document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedArtifact {
    pub id: Option<String>,
    pub module: ModuleType,
    /// Untyped payload as returned by the service. Not validated.
    pub payload: Value,
}

impl GeneratedArtifact {
    /// Pretty-printed payload, the input of the output renderer.
    pub fn to_json_string(&self) -> ClientResult<String> {
        Ok(serde_json::to_string_pretty(&self.payload)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct User {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    /// Remaining profile fields (email, school level, ...) kept as sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Up to two uppercase initials of the user's name.
    #[must_use]
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

pub const NO_ACTIVE_PACKAGE: &str = "Tidak ada paket aktif";

/// Credit usage summary of the signed-in user. Always re-fetched from the
/// service, never computed locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct CreditBalance {
    pub limit: i64,
    pub used: i64,
    pub credit: i64,
    pub package_name: String,
}

impl Default for CreditBalance {
    fn default() -> Self {
        Self {
            limit: 0,
            used: 0,
            credit: 0,
            package_name: NO_ACTIVE_PACKAGE.to_string(),
        }
    }
}

/// The `{status, message, data}` body every endpoint answers with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Value,
    /// Top-level fields other than the three above (e.g. `id`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiEnvelope {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    /// Turn a non-success envelope into an error carrying its message.
    pub fn into_success(self) -> ClientResult<Self> {
        if self.is_success() {
            return Ok(self);
        }
        match self.message.filter(|message| !message.is_empty()) {
            Some(message) => Err(ClientError::Failed(message)),
            None => Err(ClientError::Invariant(format!(
                "Unexpected response status: {}",
                self.status.as_deref().unwrap_or("missing")
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient user-visible notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// In-flight flag per export format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportLoading {
    pub word: bool,
    pub excel: bool,
    pub ppt: bool,
}

impl ExportLoading {
    #[must_use]
    pub fn get(&self, format: ExportFormat) -> bool {
        match format {
            ExportFormat::Word => self.word,
            ExportFormat::Excel => self.excel,
            ExportFormat::Ppt => self.ppt,
        }
    }

    pub fn set(&mut self, format: ExportFormat, loading: bool) {
        match format {
            ExportFormat::Word => self.word = loading,
            ExportFormat::Excel => self.excel = loading,
            ExportFormat::Ppt => self.ppt = loading,
        }
    }

    #[must_use]
    pub fn any(&self) -> bool {
        self.word || self.excel || self.ppt
    }
}
