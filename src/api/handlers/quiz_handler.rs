use axum::{
    Form,
    extract::{Query, State},
    http::{HeaderMap, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::{
    api::{
        app_state::AppState,
        cookies::session_token,
        dto::{ResultQuery, SubmitForm},
        handlers::session_handler::open_session,
        views::{PiecePage, ResultPage},
    },
    config::SessionCreation,
    error::AppError,
    security::validators,
};

/// Session token from the cookie, or `SessionNotStarted`.
fn require_token(state: &AppState, headers: &HeaderMap) -> Result<String, AppError> {
    session_token(headers, state.cookie_name()).ok_or(AppError::SessionNotStarted)
}

/// `GET /piece`
///
/// Read-only for an existing session. In lazy mode a visitor without a
/// session gets a nameless one here.
pub async fn piece(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let existing = match session_token(&headers, state.cookie_name()) {
        Some(token) => state.session_service.lookup(&token).await.ok(),
        None => None,
    };

    let (token, cookie) = match existing {
        Some(record) => (record.token, None),
        None if state.config.session.creation == SessionCreation::Lazy => {
            let (record, cookie) = open_session(&state, "").await?;
            (record.token, Some(cookie))
        }
        None => return Err(AppError::SessionNotStarted),
    };

    let (session, entry) = state.quiz_service.current_piece(&token).await?;
    debug!(piece = entry.id, "Showing piece");

    let mut response = (
        [(header::CACHE_CONTROL, "no-store")],
        Html(PiecePage::new(&session, entry).render()),
    )
        .into_response();
    if let Some(cookie) = cookie {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    Ok(response)
}

/// `POST /submit`
pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SubmitForm>,
) -> Result<Response, AppError> {
    let token = require_token(&state, &headers)?;
    state.session_service.lookup(&token).await?;

    let guess = form.into_guess()?;
    let attempt = state.quiz_service.submit(&token, &guess).await?;
    state.metrics.record_guess(attempt.points);

    Ok(Redirect::to(&attempt.result_location()).into_response())
}

/// `GET /result`
pub async fn result(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ResultQuery>,
) -> Result<Response, AppError> {
    let token = require_token(&state, &headers)?;
    let session = state.session_service.lookup(&token).await?;

    let item = validators::piece_id("item", query.item.as_deref())?;
    let (outcome, entry) = state.quiz_service.result(&query.results, item)?;

    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        Html(ResultPage::new(&session, entry, outcome).render()),
    )
        .into_response())
}
