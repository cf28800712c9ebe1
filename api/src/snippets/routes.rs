use axum::{
    Router,
    routing::{get, post},
};

use crate::App;

use super::comment::{
    create::create_comment,
    delete::delete_comment,
    get::{get_comment, get_comments},
    patch::patch_comment,
    vote::{downvote_comment, upvote_comment},
};

pub fn route() -> Router<App> {
    Router::<App>::new()
        .route(
            "/{snippet_id}/comments",
            get(get_comments).post(create_comment),
        )
        .route(
            "/{snippet_id}/comments/{id}",
            get(get_comment).patch(patch_comment).delete(delete_comment),
        )
        .route("/{snippet_id}/comments/{id}/upvote", post(upvote_comment))
        .route(
            "/{snippet_id}/comments/{id}/downvote",
            post(downvote_comment),
        )
}
