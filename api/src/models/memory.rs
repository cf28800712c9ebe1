use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{
    CommentModel, Error,
    comment::Comment,
    comment_vote::{VoteRecordChange, VoteTransition, VoteType},
};

/// Keeps comments and votes in memory, applying the same vote transitions as
/// the PostgreSQL model.
#[derive(Default)]
pub struct MemoryCommentModel {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    last_id: i32,
    comments: BTreeMap<i32, Comment>,
    votes: HashMap<(i32, i32), VoteType>,
}

impl MemoryCommentModel {
    pub async fn vote_of(&self, comment_id: i32, user_id: i32) -> Option<VoteType> {
        self.state
            .lock()
            .await
            .votes
            .get(&(comment_id, user_id))
            .copied()
    }
}

#[async_trait]
impl CommentModel for MemoryCommentModel {
    async fn insert(&self, snippet_id: i32, author: &str, content: &str) -> Result<i32, Error> {
        let mut state = self.state.lock().await;
        state.last_id += 1;

        let new = Comment::new_for_snippet(snippet_id, author, content);
        let comment = Comment {
            id: state.last_id,
            snippet_id: new.snippet_id,
            author: new.author.to_owned(),
            content: new.content.to_owned(),
            created: new.created,
            updated: new.updated,
            upvotes: new.upvotes,
        };
        state.comments.insert(comment.id, comment);

        Ok(state.last_id)
    }

    async fn get_by_snippet_id(&self, snippet_id: i32) -> Result<Vec<Comment>, Error> {
        let state = self.state.lock().await;
        let mut comments: Vec<Comment> = state
            .comments
            .values()
            .filter(|c| c.snippet_id == snippet_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| (c.created, c.id));
        Ok(comments)
    }

    async fn get(&self, id: i32) -> Result<Comment, Error> {
        self.state
            .lock()
            .await
            .comments
            .get(&id)
            .cloned()
            .ok_or(Error::NoRecord)
    }

    async fn update(&self, id: i32, content: &str) -> Result<(), Error> {
        if let Some(comment) = self.state.lock().await.comments.get_mut(&id) {
            comment.content = content.to_owned();
            comment.updated = chrono::Utc::now().naive_utc();
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), Error> {
        self.state.lock().await.comments.remove(&id);
        Ok(())
    }

    async fn vote(
        &self,
        comment_id: i32,
        user_id: i32,
        action: VoteType,
    ) -> Result<&'static str, Error> {
        let mut state = self.state.lock().await;
        let key = (comment_id, user_id);

        let transition = VoteTransition::resolve(state.votes.get(&key).copied(), action);
        match transition.record {
            VoteRecordChange::Insert(vote) | VoteRecordChange::Update(vote) => {
                state.votes.insert(key, vote);
            }
            VoteRecordChange::Delete => {
                state.votes.remove(&key);
            }
        }

        if let Some(comment) = state.comments.get_mut(&comment_id) {
            comment.upvotes += transition.delta;
        }

        Ok(transition.message)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_insert_then_list() {
        let model = MemoryCommentModel::default();
        let id = model.insert(1, "alice", "hello").await.unwrap();

        let comments = model.get_by_snippet_id(1).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].id, id);
        assert_eq!(comments[0].author, "alice");
        assert_eq!(comments[0].content, "hello");
        assert_eq!(comments[0].created, comments[0].updated);
        assert_eq!(comments[0].upvotes, 0);
    }

    #[tokio::test]
    async fn test_list_is_oldest_first_and_scoped_to_snippet() {
        let model = MemoryCommentModel::default();
        let first = model.insert(7, "a", "one").await.unwrap();
        model.insert(8, "b", "elsewhere").await.unwrap();
        let second = model.insert(7, "c", "two").await.unwrap();
        let third = model.insert(7, "d", "three").await.unwrap();

        let comments = model.get_by_snippet_id(7).await.unwrap();
        let ids: Vec<i32> = comments.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![first, second, third]);
        assert!(comments.windows(2).all(|w| w[0].created <= w[1].created));
    }

    #[tokio::test]
    async fn test_list_without_comments_is_empty() {
        let model = MemoryCommentModel::default();
        assert!(model.get_by_snippet_id(42).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_is_no_record() {
        let model = MemoryCommentModel::default();
        assert!(matches!(model.get(99).await, Err(Error::NoRecord)));
    }

    #[tokio::test]
    async fn test_update_only_touches_content_and_updated() {
        let model = MemoryCommentModel::default();
        let id = model.insert(1, "alice", "draft").await.unwrap();
        model.upvote(id, 10).await.unwrap();
        let before = model.get(id).await.unwrap();

        model.update(id, "final").await.unwrap();

        let after = model.get(id).await.unwrap();
        assert_eq!(after.content, "final");
        assert_eq!(after.author, before.author);
        assert_eq!(after.created, before.created);
        assert_eq!(after.upvotes, 1);
        assert!(after.updated >= before.updated);
    }

    #[tokio::test]
    async fn test_update_and_delete_of_missing_comment_succeed() {
        let model = MemoryCommentModel::default();
        model.update(5, "nobody home").await.unwrap();
        model.delete(5).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_then_get_is_no_record() {
        let model = MemoryCommentModel::default();
        let id = model.insert(1, "alice", "bye").await.unwrap();
        model.upvote(id, 3).await.unwrap();

        model.delete(id).await.unwrap();

        assert!(matches!(model.get(id).await, Err(Error::NoRecord)));
        // votes are orphaned, not cascaded
        assert_eq!(model.vote_of(id, 3).await, Some(VoteType::Upvote));
    }

    async fn upvotes(model: &MemoryCommentModel, id: i32) -> i32 {
        model.get(id).await.unwrap().upvotes
    }

    #[tokio::test]
    async fn test_vote_sequence() {
        let model = MemoryCommentModel::default();
        let id = model.insert(1, "alice", "vote on me").await.unwrap();
        let user = 2;

        assert_eq!(model.upvote(id, user).await.unwrap(), "Vote successfully registered!");
        assert_eq!(upvotes(&model, id).await, 1);

        assert_eq!(model.upvote(id, user).await.unwrap(), "Vote removed!");
        assert_eq!(upvotes(&model, id).await, 0);
        assert_eq!(model.vote_of(id, user).await, None);

        assert_eq!(model.downvote(id, user).await.unwrap(), "Vote successfully registered!");
        assert_eq!(upvotes(&model, id).await, -1);

        assert_eq!(model.upvote(id, user).await.unwrap(), "Vote updated to upvote!");
        assert_eq!(upvotes(&model, id).await, 1);
        assert_eq!(model.vote_of(id, user).await, Some(VoteType::Upvote));

        assert_eq!(model.downvote(id, user).await.unwrap(), "Vote updated to downvote!");
        assert_eq!(upvotes(&model, id).await, -1);

        assert_eq!(model.downvote(id, user).await.unwrap(), "Vote removed!");
        assert_eq!(upvotes(&model, id).await, 0);
    }

    #[tokio::test]
    async fn test_votes_are_tracked_per_user() {
        let model = MemoryCommentModel::default();
        let id = model.insert(1, "alice", "popular").await.unwrap();

        model.upvote(id, 1).await.unwrap();
        model.upvote(id, 2).await.unwrap();
        model.downvote(id, 3).await.unwrap();

        assert_eq!(model.get(id).await.unwrap().upvotes, 1);
        assert_eq!(model.vote_of(id, 3).await, Some(VoteType::Downvote));
    }
}
