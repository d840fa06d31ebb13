use std::sync::Arc;

use crate::catalog::related::RoleRecommender;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-only after startup.
    pub catalog: Arc<Catalog>,
    pub sessions: SessionStore,
    pub config: Config,
    /// Pluggable related-role ranking. Default: SkillOverlapRecommender.
    pub recommender: Arc<dyn RoleRecommender>,
}
