use axum::{
    Form,
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::{
    api::{
        app_state::AppState,
        cookies::{session_cookie, session_token},
        dto::StartForm,
        views::StartPage,
    },
    config::SessionCreation,
    error::AppError,
    models::SessionRecord,
    security::validators,
};

/// Whether the request carries a cookie for a live session.
async fn has_live_session(state: &AppState, headers: &HeaderMap) -> bool {
    match session_token(headers, state.cookie_name()) {
        Some(token) => state.session_service.lookup(&token).await.is_ok(),
        None => false,
    }
}

/// Create a session and record it in the metrics.
pub(crate) async fn open_session(
    state: &AppState,
    display_name: &str,
) -> Result<(SessionRecord, HeaderValue), AppError> {
    let record = state.session_service.create(display_name).await?;
    state.metrics.record_session();
    let cookie = session_cookie(state.cookie_name(), &record.token)?;
    Ok((record, cookie))
}

/// `GET /`
pub async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    if has_live_session(&state, &headers).await {
        return Ok(Redirect::to("/piece").into_response());
    }

    match state.config.session.creation {
        SessionCreation::Lazy => Ok(Redirect::to("/piece").into_response()),
        SessionCreation::Named => Ok((
            [(header::CACHE_CONTROL, "no-store")],
            Html(StartPage.render()),
        )
            .into_response()),
    }
}

/// `POST /start`
pub async fn start(
    State(state): State<AppState>,
    Form(form): Form<StartForm>,
) -> Result<Response, AppError> {
    let name = validators::display_name(&form.name)?;
    debug!("Starting session for {:?}", name);

    let (_, cookie) = open_session(&state, &name).await?;

    let mut response = Redirect::to("/piece").into_response();
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    Ok(response)
}
