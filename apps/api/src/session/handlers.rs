use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::{Session, SessionEvent, SessionView};
use crate::state::AppState;

#[derive(Serialize)]
pub struct EventResponse {
    pub applied: bool,
    pub session: SessionView,
}

fn parse_session_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::Validation(format!("Invalid session id '{raw}'")))
}

fn render(state: &AppState, session: &Session) -> SessionView {
    session.view(
        &state.catalog,
        state.recommender.as_ref(),
        state.config.apply_url.as_deref(),
    )
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionView>) {
    let session = Session::new(state.config.default_theme);
    let view = render(&state, &session);

    state.sessions.write().await.insert(session.id, session);
    info!("Session {} created", view.id);

    (StatusCode::CREATED, Json(view))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    let id = parse_session_id(&id)?;
    let sessions = state.sessions.read().await;
    let session = sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
    Ok(Json(render(&state, session)))
}

/// POST /api/v1/sessions/:id/events
pub async fn handle_session_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(event): Json<SessionEvent>,
) -> Result<Json<EventResponse>, AppError> {
    let id = parse_session_id(&id)?;
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;

    let transition = session.apply(&event, &state.catalog)?;
    Ok(Json(EventResponse {
        applied: transition.applied(),
        session: render(&state, session),
    }))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_session_id(&id)?;
    state
        .sessions
        .write()
        .await
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}
