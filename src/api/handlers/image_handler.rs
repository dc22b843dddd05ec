use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
};
use tracing::warn;

use crate::{api::app_state::AppState, error::AppError};

/// Piece id from an `<id>.png` file name.
fn parse_image_name(file: &str) -> Option<usize> {
    file.strip_suffix(".png")?.parse().ok()
}

/// `GET /images/:file`
///
/// Fetches the piece's score image so the remote URL (which may give the
/// answer away) never reaches the page. Any upstream failure falls back to
/// redirecting the browser to the remote image.
pub async fn image(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<Response, AppError> {
    let entry = parse_image_name(&file)
        .and_then(|id| state.catalog.get(id).ok())
        .ok_or_else(|| AppError::NotFound(format!("image {}", file)))?;

    if !state.config.images.proxy_enabled {
        return Ok(Redirect::to(&entry.image).into_response());
    }

    match fetch(&state.http_client, &entry.image).await {
        Ok((content_type, body)) => Ok((
            [
                (header::CONTENT_TYPE, content_type),
                (header::CACHE_CONTROL, "public, max-age=86400".to_string()),
            ],
            body,
        )
            .into_response()),
        Err(e) => {
            warn!(piece = entry.id, "Image proxy failed, redirecting: {}", e);
            Ok(Redirect::to(&entry.image).into_response())
        }
    }
}

async fn fetch(client: &reqwest::Client, url: &str) -> Result<(String, Vec<u8>), AppError> {
    let response = client.get(url).send().await?.error_for_status()?;
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("image/png")
        .to_string();
    let body = response.bytes().await?;
    Ok((content_type, body.to_vec()))
}
