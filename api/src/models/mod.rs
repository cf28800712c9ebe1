use async_trait::async_trait;

pub mod comment;
pub mod comment_vote;
pub mod pg;

#[cfg(test)]
pub mod memory;

use self::{comment::Comment, comment_vote::VoteType};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("no matching record found")]
    NoRecord,

    #[error(transparent)]
    Database(#[from] diesel::result::Error),

    #[error("couldn't check out a database connection: {0}")]
    Pool(#[from] diesel_async::pooled_connection::deadpool::PoolError),

    #[error("unknown vote type `{0}` stored in comment_votes")]
    InvalidVoteType(String),
}

/// Persistence operations on comments and their per-user votes.
///
/// `update` and `delete` report success even if no comment has the given id.
#[async_trait]
pub trait CommentModel: Send + Sync {
    async fn insert(&self, snippet_id: i32, author: &str, content: &str) -> Result<i32, Error>;

    /// Oldest first.
    async fn get_by_snippet_id(&self, snippet_id: i32) -> Result<Vec<Comment>, Error>;

    /// Fails with [`Error::NoRecord`] when the comment doesn't exist.
    async fn get(&self, id: i32) -> Result<Comment, Error>;

    async fn update(&self, id: i32, content: &str) -> Result<(), Error>;

    async fn delete(&self, id: i32) -> Result<(), Error>;

    /// Applies `action` on behalf of `user_id` and returns the status message
    /// shown to the user.
    async fn vote(
        &self,
        comment_id: i32,
        user_id: i32,
        action: VoteType,
    ) -> Result<&'static str, Error>;

    async fn upvote(&self, comment_id: i32, user_id: i32) -> Result<&'static str, Error> {
        self.vote(comment_id, user_id, VoteType::Upvote).await
    }

    async fn downvote(&self, comment_id: i32, user_id: i32) -> Result<&'static str, Error> {
        self.vote(comment_id, user_id, VoteType::Downvote).await
    }
}
