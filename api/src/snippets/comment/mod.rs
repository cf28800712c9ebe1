pub mod create;
pub mod delete;
pub mod get;
pub mod patch;
pub mod vote;

use axum::http::StatusCode;

use crate::{App, error::AppError, models};

pub const MAX_AUTHOR_LEN: usize = 50;
pub const MAX_CONTENT_LEN: usize = 5000;

/// Trims the content in place and checks its length.
pub(crate) fn validate_content(content: &mut String) -> Result<(), &'static str> {
    *content = content.trim().to_string();

    if content.is_empty() {
        return Err("No content provided");
    }

    if content.chars().count() > MAX_CONTENT_LEN {
        return Err("Content too long (max 5000 characters)");
    }

    Ok(())
}

/// Rejects a comment that exists but belongs to another snippet. A comment
/// that doesn't exist at all passes, so the store decides what a missing id
/// means.
pub(crate) async fn ensure_in_snippet(ctx: &App, snippet_id: i32, id: i32) -> Result<(), AppError> {
    match ctx.comments.get(id).await {
        Ok(comment) if comment.snippet_id != snippet_id => {
            Err(("Comment not found", StatusCode::NOT_FOUND).into())
        }
        Ok(_) | Err(models::Error::NoRecord) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
