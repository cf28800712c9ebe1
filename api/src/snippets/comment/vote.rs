use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::{App, error::AppError};

use super::ensure_in_snippet;

#[derive(Deserialize)]
pub struct VoteSubmission {
    user_id: i32,
}

#[derive(Serialize)]
pub struct VoteResponse {
    message: &'static str,
}

pub async fn upvote_comment(
    State(ctx): State<App>,
    Path((snippet_id, id)): Path<(i32, i32)>,
    crate::json::Json(vote): crate::json::Json<VoteSubmission>,
) -> Result<Json<VoteResponse>, AppError> {
    ensure_in_snippet(&ctx, snippet_id, id).await?;
    let message = ctx.comments.upvote(id, vote.user_id).await?;
    Ok(Json(VoteResponse { message }))
}

pub async fn downvote_comment(
    State(ctx): State<App>,
    Path((snippet_id, id)): Path<(i32, i32)>,
    crate::json::Json(vote): crate::json::Json<VoteSubmission>,
) -> Result<Json<VoteResponse>, AppError> {
    ensure_in_snippet(&ctx, snippet_id, id).await?;
    let message = ctx.comments.downvote(id, vote.user_id).await?;
    Ok(Json(VoteResponse { message }))
}
