use std::str::FromStr;

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::Error;

pub const VOTE_REGISTERED: &str = "Vote successfully registered!";
pub const VOTE_REMOVED: &str = "Vote removed!";
pub const VOTE_UPDATED_TO_UPVOTE: &str = "Vote updated to upvote!";
pub const VOTE_UPDATED_TO_DOWNVOTE: &str = "Vote updated to downvote!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Upvote,
    Downvote,
}

impl VoteType {
    /// The value stored in `comment_votes.vote_type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteType::Upvote => "upvote",
            VoteType::Downvote => "downvote",
        }
    }

    fn score(self) -> i32 {
        match self {
            VoteType::Upvote => 1,
            VoteType::Downvote => -1,
        }
    }
}

impl FromStr for VoteType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upvote" => Ok(VoteType::Upvote),
            "downvote" => Ok(VoteType::Downvote),
            other => Err(Error::InvalidVoteType(other.to_owned())),
        }
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::comment_votes)]
pub struct NewCommentVote<'a> {
    pub comment_id: i32,
    pub user_id: i32,
    pub vote_type: &'a str,
}

/// What has to happen to the user's vote record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteRecordChange {
    Insert(VoteType),
    Update(VoteType),
    Delete,
}

/// The effect of one vote action given the user's current vote on a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTransition {
    pub record: VoteRecordChange,
    /// Added to the comment's cached `upvotes` counter.
    pub delta: i32,
    pub message: &'static str,
}

impl VoteTransition {
    pub fn resolve(current: Option<VoteType>, action: VoteType) -> Self {
        match current {
            None => VoteTransition {
                record: VoteRecordChange::Insert(action),
                delta: action.score(),
                message: VOTE_REGISTERED,
            },
            // repeating the same vote retracts it
            Some(current) if current == action => VoteTransition {
                record: VoteRecordChange::Delete,
                delta: -action.score(),
                message: VOTE_REMOVED,
            },
            Some(_) => VoteTransition {
                record: VoteRecordChange::Update(action),
                delta: 2 * action.score(),
                message: match action {
                    VoteType::Upvote => VOTE_UPDATED_TO_UPVOTE,
                    VoteType::Downvote => VOTE_UPDATED_TO_DOWNVOTE,
                },
            },
        }
    }

    /// The user's vote once this transition has been applied.
    pub fn next_state(&self) -> Option<VoteType> {
        match self.record {
            VoteRecordChange::Insert(vote) | VoteRecordChange::Update(vote) => Some(vote),
            VoteRecordChange::Delete => None,
        }
    }
}
