use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog::dataset::DatasetWarning;
use crate::catalog::filter::filter_domains;
use crate::errors::AppError;
use crate::models::catalog::{Domain, DomainSummary, RelatedRoleEntry, Role};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct DomainListResponse {
    pub term: String,
    pub total: usize,
    pub matched: usize,
    pub domains: Vec<DomainSummary>,
}

#[derive(Serialize)]
pub struct RoleDetailResponse {
    pub domain_id: u32,
    pub domain_title: String,
    pub role: Role,
    pub related: Vec<RelatedRoleEntry>,
    pub recommender: &'static str,
}

#[derive(Serialize)]
pub struct CatalogInfoResponse {
    pub domains: usize,
    pub roles: usize,
    pub warnings: Vec<DatasetWarning>,
}

/// GET /api/v1/catalog
pub async fn handle_catalog_info(State(state): State<AppState>) -> Json<CatalogInfoResponse> {
    Json(CatalogInfoResponse {
        domains: state.catalog.domains().len(),
        roles: state.catalog.role_count(),
        warnings: state.catalog.audit().to_vec(),
    })
}

/// GET /api/v1/domains?q=term
pub async fn handle_list_domains(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<DomainListResponse> {
    let all = state.catalog.domains();
    let domains: Vec<DomainSummary> = filter_domains(&params.q, all)
        .into_iter()
        .map(DomainSummary::from)
        .collect();

    Json(DomainListResponse {
        total: all.len(),
        matched: domains.len(),
        term: params.q,
        domains,
    })
}

/// GET /api/v1/domains/:id
pub async fn handle_get_domain(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Domain>, AppError> {
    state
        .catalog
        .domain(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Domain {id} not found")))
}

/// GET /api/v1/roles/:title
pub async fn handle_get_role(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<RoleDetailResponse>, AppError> {
    let (domain, role) = state
        .catalog
        .find_role(&title)
        .ok_or_else(|| AppError::NotFound(format!("Role '{title}' not found")))?;

    Ok(Json(RoleDetailResponse {
        domain_id: domain.id,
        domain_title: domain.title.clone(),
        related: state.recommender.related(role, state.catalog.domains()),
        role: role.clone(),
        recommender: state.recommender.backend(),
    }))
}

/// GET /api/v1/roles/:title/related
pub async fn handle_related_roles(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<Vec<RelatedRoleEntry>>, AppError> {
    let (_, role) = state
        .catalog
        .find_role(&title)
        .ok_or_else(|| AppError::NotFound(format!("Role '{title}' not found")))?;

    Ok(Json(state.recommender.related(role, state.catalog.domains())))
}
