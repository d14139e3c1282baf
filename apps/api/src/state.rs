use std::sync::Arc;

use crate::auth::AuthStore;
use crate::config::Config;
use crate::optimize::OptimizeEngine;
use crate::workflow::manager::SessionManager;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// All live workflow sessions, keyed by session id.
    pub sessions: SessionManager,
    /// Pluggable optimization engine. Default: KeywordEngine.
    pub engine: Arc<dyn OptimizeEngine>,
    pub auth: AuthStore,
    pub config: Config,
}
