use std::sync::Arc;
use crate::config::Config;
use crate::services::{ApiClient, Backend, WatchStore};
use crate::training::QuestionBank;

/// Application state shared between handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
    /// Raw client used by the CORS proxy.
    pub upstream: ApiClient,
    pub watch_store: Arc<dyn WatchStore>,
    pub question_bank: Arc<QuestionBank>,
    pub config: Arc<Config>,
}
