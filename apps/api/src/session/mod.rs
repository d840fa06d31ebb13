//! Sessions — one client's view state: selection, search term and theme.
//!
//! Held in memory only. Views are recomputed from the catalog on every read.

pub mod handlers;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::catalog::filter::filter_domains;
use crate::catalog::related::RoleRecommender;
use crate::catalog::Catalog;
use crate::errors::AppError;
use crate::models::catalog::{DomainSummary, RelatedRoleEntry};
use crate::selection::{Selection, Transition};
use crate::theme::Theme;

pub type SessionStore = Arc<RwLock<HashMap<Uuid, Session>>>;

pub fn new_store() -> SessionStore {
    Arc::new(RwLock::new(HashMap::new()))
}

/// Drops sessions with no applied event since `now - max_idle`.
/// Returns how many were removed.
pub async fn sweep_idle(store: &SessionStore, max_idle: Duration, now: DateTime<Utc>) -> usize {
    let cutoff = now - max_idle;
    let mut sessions = store.write().await;
    let before = sessions.len();
    sessions.retain(|_, s| s.updated_at >= cutoff);
    let removed = before - sessions.len();
    if removed > 0 {
        info!("Swept {removed} idle sessions ({} remaining)", sessions.len());
    }
    removed
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub selection: Selection,
    pub search_term: String,
    pub theme: Theme,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input events from a view layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    SetSearch { term: String },
    OpenDomain { domain_id: u32 },
    OpenRole { role_title: String },
    Back,
    CloseAll,
    SwitchDomain { domain_id: u32, role_title: String },
    ToggleTheme,
    SetTheme { theme: Theme },
}

/// Everything a view needs to render one session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub theme: Theme,
    pub search_term: String,
    pub selection: Selection,
    pub domains: Vec<DomainSummary>,
    pub related: Vec<RelatedRoleEntry>,
    pub apply_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(theme: Theme) -> Self {
        let now = Utc::now();
        Session {
            id: Uuid::new_v4(),
            selection: Selection::default(),
            search_term: String::new(),
            theme,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies one event. Unknown domains on `open_domain` and role titles
    /// that exist nowhere in the catalog are `NotFound`; anything else that
    /// does not fit the current state is ignored.
    pub fn apply(&mut self, event: &SessionEvent, catalog: &Catalog) -> Result<Transition, AppError> {
        let transition = match event {
            SessionEvent::SetSearch { term } => {
                self.search_term = term.clone();
                Transition::Applied
            }
            SessionEvent::OpenDomain { domain_id } => {
                let domain = catalog
                    .domain(*domain_id)
                    .ok_or_else(|| AppError::NotFound(format!("Domain {domain_id} not found")))?;
                self.selection.open_domain(domain)
            }
            SessionEvent::OpenRole { role_title } => {
                let in_open_domain = self
                    .selection
                    .domain()
                    .and_then(|d| d.role(role_title))
                    .cloned();
                match in_open_domain {
                    Some(role) => self.selection.open_role(&role),
                    None if catalog.find_role(role_title).is_none() => {
                        return Err(AppError::NotFound(format!("Role '{role_title}' not found")));
                    }
                    None => Transition::Ignored,
                }
            }
            SessionEvent::Back => self.selection.back(),
            SessionEvent::CloseAll => self.selection.close_all(),
            SessionEvent::SwitchDomain {
                domain_id,
                role_title,
            } => {
                // The role must be owned by the target domain.
                let role = catalog.domain(*domain_id).and_then(|d| d.role(role_title));
                match role {
                    Some(role) => self.selection.switch_domain(catalog, *domain_id, role),
                    None => Transition::Ignored,
                }
            }
            SessionEvent::ToggleTheme => {
                self.theme = self.theme.toggle();
                Transition::Applied
            }
            SessionEvent::SetTheme { theme } => {
                self.theme = *theme;
                Transition::Applied
            }
        };

        if transition.applied() {
            self.updated_at = Utc::now();
        }
        Ok(transition)
    }

    pub fn view(
        &self,
        catalog: &Catalog,
        recommender: &dyn RoleRecommender,
        apply_url: Option<&str>,
    ) -> SessionView {
        let domains = filter_domains(&self.search_term, catalog.domains())
            .into_iter()
            .map(DomainSummary::from)
            .collect();
        let related = self
            .selection
            .role()
            .map(|role| recommender.related(role, catalog.domains()))
            .unwrap_or_default();

        SessionView {
            id: self.id,
            theme: self.theme,
            search_term: self.search_term.clone(),
            selection: self.selection.clone(),
            domains,
            related,
            apply_url: apply_url.map(str::to_string),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
