use axum::{
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{App, error::AppError};

use super::{ensure_in_snippet, validate_content};

#[debug_handler]
pub async fn patch_comment(
    State(ctx): State<App>,
    Path((snippet_id, id)): Path<(i32, i32)>,
    crate::json::Json(mut comment): crate::json::Json<CommentPatch>,
) -> Result<StatusCode, AppError> {
    validate_content(&mut comment.content).map_err(|e| (e, StatusCode::BAD_REQUEST))?;

    ensure_in_snippet(&ctx, snippet_id, id).await?;

    // succeeds even if there is no such comment
    ctx.comments.update(id, &comment.content).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct CommentPatch {
    content: String,
}
