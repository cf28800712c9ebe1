use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{App, error::AppError, models::comment::Comment};

pub async fn get_comments(
    State(ctx): State<App>,
    Path(snippet_id): Path<i32>,
) -> Result<Json<Vec<Comment>>, AppError> {
    Ok(Json(ctx.comments.get_by_snippet_id(snippet_id).await?))
}

pub async fn get_comment(
    State(ctx): State<App>,
    Path((snippet_id, id)): Path<(i32, i32)>,
) -> Result<Json<Comment>, AppError> {
    let comment = ctx.comments.get(id).await?;

    if comment.snippet_id != snippet_id {
        return Err(("Comment not found", StatusCode::NOT_FOUND))?;
    }

    Ok(Json(comment))
}
