use axum::{
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{App, error::AppError};

use super::ensure_in_snippet;

#[debug_handler]
pub async fn delete_comment(
    State(ctx): State<App>,
    Path((snippet_id, id)): Path<(i32, i32)>,
) -> Result<StatusCode, AppError> {
    ensure_in_snippet(&ctx, snippet_id, id).await?;

    ctx.comments.delete(id).await?;

    tracing::info!(id, "Comment deleted");

    Ok(StatusCode::NO_CONTENT)
}
