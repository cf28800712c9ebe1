use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{
    AsyncConnection, AsyncPgConnection, RunQueryDsl, pooled_connection::deadpool::Pool,
};

use crate::schema::{comment_votes, comments};

use super::{
    CommentModel, Error,
    comment::Comment,
    comment_vote::{NewCommentVote, VoteRecordChange, VoteTransition, VoteType},
};

pub type DbPool = Pool<AsyncPgConnection>;

#[derive(Clone)]
pub struct PgCommentModel {
    pool: DbPool,
}

impl PgCommentModel {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentModel for PgCommentModel {
    #[tracing::instrument(skip(self, author, content))]
    async fn insert(&self, snippet_id: i32, author: &str, content: &str) -> Result<i32, Error> {
        let mut conn = self.pool.get().await?;

        let id = diesel::insert_into(comments::table)
            .values(Comment::new_for_snippet(snippet_id, author, content))
            .returning(comments::id)
            .get_result::<i32>(&mut conn)
            .await?;

        tracing::debug!(id, "Inserted comment");

        Ok(id)
    }

    #[tracing::instrument(skip(self))]
    async fn get_by_snippet_id(&self, snippet_id: i32) -> Result<Vec<Comment>, Error> {
        let mut conn = self.pool.get().await?;

        Ok(comments::table
            .filter(comments::snippet_id.eq(snippet_id))
            .order((comments::created.asc(), comments::id.asc()))
            .select(Comment::as_select())
            .load(&mut conn)
            .await?)
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: i32) -> Result<Comment, Error> {
        let mut conn = self.pool.get().await?;

        comments::table
            .find(id)
            .select(Comment::as_select())
            .first(&mut conn)
            .await
            .optional()?
            .ok_or(Error::NoRecord)
    }

    #[tracing::instrument(skip(self, content))]
    async fn update(&self, id: i32, content: &str) -> Result<(), Error> {
        let mut conn = self.pool.get().await?;

        let affected = diesel::update(comments::table.find(id))
            .set((
                comments::content.eq(content),
                comments::updated.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(&mut conn)
            .await?;

        if affected == 0 {
            tracing::debug!("No comment updated");
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: i32) -> Result<(), Error> {
        let mut conn = self.pool.get().await?;

        // votes on the comment are left in place
        let affected = diesel::delete(comments::table.find(id))
            .execute(&mut conn)
            .await?;

        if affected == 0 {
            tracing::debug!("No comment deleted");
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn vote(
        &self,
        comment_id: i32,
        user_id: i32,
        action: VoteType,
    ) -> Result<&'static str, Error> {
        let mut conn = self.pool.get().await?;

        let transition = conn
            .transaction(|conn| {
                Box::pin(async move {
                    // Row lock on the comment serializes concurrent votes on it.
                    // A missing comment locks nothing and the vote still goes
                    // through.
                    let _locked = comments::table
                        .find(comment_id)
                        .select(comments::id)
                        .for_update()
                        .get_result::<i32>(conn)
                        .await
                        .optional()?;

                    let current = comment_votes::table
                        .filter(comment_votes::comment_id.eq(comment_id))
                        .filter(comment_votes::user_id.eq(user_id))
                        .select(comment_votes::vote_type)
                        .first::<String>(conn)
                        .await
                        .optional()?
                        .map(|v| v.parse::<VoteType>())
                        .transpose()?;

                    let transition = VoteTransition::resolve(current, action);

                    let user_vote = comment_votes::table
                        .filter(comment_votes::comment_id.eq(comment_id))
                        .filter(comment_votes::user_id.eq(user_id));

                    match transition.record {
                        VoteRecordChange::Insert(vote) => {
                            diesel::insert_into(comment_votes::table)
                                .values(NewCommentVote {
                                    comment_id,
                                    user_id,
                                    vote_type: vote.as_str(),
                                })
                                .execute(conn)
                                .await?
                        }
                        VoteRecordChange::Update(vote) => {
                            diesel::update(user_vote)
                                .set(comment_votes::vote_type.eq(vote.as_str()))
                                .execute(conn)
                                .await?
                        }
                        VoteRecordChange::Delete => diesel::delete(user_vote).execute(conn).await?,
                    };

                    diesel::update(comments::table.find(comment_id))
                        .set(comments::upvotes.eq(comments::upvotes + transition.delta))
                        .execute(conn)
                        .await?;

                    Ok::<_, Error>(transition)
                })
            })
            .await?;

        tracing::debug!(
            current_vote = ?transition.next_state(),
            delta = transition.delta,
            "Applied vote"
        );

        Ok(transition.message)
    }
}
