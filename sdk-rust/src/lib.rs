mod api;
pub mod auth;
mod browser;
pub mod client_utils;
mod errors;
pub mod export;
pub mod generate;
pub mod session;
pub mod storage;
mod types;

pub mod brainys_test;

pub use api::{BrainysApi, HttpApi, HttpApiOptions, API_URL_ENV, DEFAULT_BASE_URL};
pub use auth::{Auth, ChangePasswordRequest, RegisterRequest};
pub use browser::{BrowsingContext, TracingBrowser};
pub use errors::*;
pub use export::{ExportOutcome, Exporter};
pub use generate::{
    GenerationForm, GenerationObserver, Generator, GenericForm, SyllabusForm,
    TeachingMaterialForm, TeachingModuleForm,
};
pub use session::{BackgroundRefresh, Session};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use types::*;
