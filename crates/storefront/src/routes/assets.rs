//! Static file handler.

use axum::{
    extract::State,
    http::{
        Uri,
        header::{CACHE_CONTROL, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Serve a file from the public root, or the entry document for unmatched
/// routes.
#[instrument(skip(state), fields(path = %uri.path()))]
pub async fn serve(State(state): State<AppState>, uri: Uri) -> Result<Response> {
    let decoded = urlencoding::decode(uri.path())
        .map_err(|_| AppError::BadRequest("invalid path encoding".to_string()))?;

    let asset = state.assets().open(&decoded).await?;
    tracing::debug!(file = %asset.path.display(), bytes = asset.body.len(), "Serving asset");

    Ok((
        [
            (CONTENT_TYPE, asset.content_type),
            (CACHE_CONTROL, asset.cache_control),
        ],
        asset.body,
    )
        .into_response())
}
