use axum::{
    Json, debug_handler,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{App, error::AppError, models::comment::Comment};

use super::{MAX_AUTHOR_LEN, validate_content};

#[debug_handler]
pub async fn create_comment(
    State(ctx): State<App>,
    Path(snippet_id): Path<i32>,
    crate::json::Json(mut comment): crate::json::Json<CommentSubmission>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    comment
        .validate()
        .map_err(|e| (e, StatusCode::BAD_REQUEST))?;

    let id = ctx
        .comments
        .insert(snippet_id, &comment.author, &comment.content)
        .await?;

    tracing::info!(id, snippet_id, "Comment created");

    let resulting_comment = ctx.comments.get(id).await?;

    Ok((StatusCode::CREATED, Json(resulting_comment)))
}

#[derive(Deserialize)]
pub struct CommentSubmission {
    author: String,
    content: String,
}

impl CommentSubmission {
    fn validate(&mut self) -> Result<(), &'static str> {
        self.author = self.author.trim().to_string();
        if self.author.is_empty() {
            return Err("No author name provided");
        }

        if self.author.chars().count() > MAX_AUTHOR_LEN {
            return Err("Author name too long");
        }

        validate_content(&mut self.content)
    }
}
