use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::ProfileQuery, views::ProfilePage},
    error::AppError,
};

/// `GET /profile?user=<view token>`
pub async fn profile(
    State(state): State<AppState>,
    Query(query): Query<ProfileQuery>,
) -> Result<Response, AppError> {
    let view_token = query
        .user
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::NotFound("profile".to_string()))?;
    debug!("Viewing profile {}", view_token);

    let session = state
        .session_service
        .lookup_by_view_token(&view_token)
        .await?;

    Ok((
        [(header::CACHE_CONTROL, "public")],
        Html(ProfilePage::from(&session).render()),
    )
        .into_response())
}
