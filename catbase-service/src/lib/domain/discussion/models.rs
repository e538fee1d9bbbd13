use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::discussion::errors::DiscussionIdError;
use crate::discussion::errors::MessageError;
use crate::domain::breed::models::BreedId;
use crate::domain::rating::models::Ratings;
use crate::domain::reaction::models::ReactionKind;
use crate::domain::user::models::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiscussionId(pub i64);

impl DiscussionId {
    pub fn from_string(s: &str) -> Result<Self, DiscussionIdError> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(DiscussionIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for DiscussionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Discussion body, 1-2000 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message(String);

impl Message {
    const MAX_LENGTH: usize = 2000;

    pub fn new(message: String) -> Result<Self, MessageError> {
        if message.trim().is_empty() {
            return Err(MessageError::Empty);
        }
        let length = message.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(MessageError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(message))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Who removed a discussion; decides the tombstone text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    ByAuthor,
    ByModerator,
}

impl Removal {
    pub fn tombstone(&self) -> &'static str {
        match self {
            Removal::ByAuthor => "[Deleted]",
            Removal::ByModerator => "[Deleted by moderator]",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Discussion {
    pub id: DiscussionId,
    pub breed_id: BreedId,
    pub user_id: UserId,
    pub username: String,
    pub parent_id: Option<DiscussionId>,
    pub message: String,
    pub ratings: Option<Ratings>,
    pub tags: Vec<String>,
    pub like_count: i64,
    pub dislike_count: i64,
    pub reply_count: i64,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Discussion {
    /// Only top-level discussions feed the breed's rating aggregate.
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A discussion as seen by a particular caller, with its replies.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscussionView {
    pub discussion: Discussion,
    pub user_reaction: Option<ReactionKind>,
    pub is_owner: bool,
    pub replies: Vec<DiscussionView>,
}

impl DiscussionView {
    pub fn owned(discussion: Discussion) -> Self {
        Self {
            discussion,
            user_reaction: None,
            is_owner: true,
            replies: Vec::new(),
        }
    }
}

/// Entry of a user's own discussion history.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthoredDiscussion {
    pub discussion: Discussion,
    pub breed_name: String,
}

/// Row about to be inserted. Replies never carry ratings.
#[derive(Debug, Clone)]
pub struct NewDiscussion {
    pub breed_id: BreedId,
    pub user_id: UserId,
    pub parent_id: Option<DiscussionId>,
    pub message: Message,
    pub ratings: Option<Ratings>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CreateDiscussionCommand {
    pub breed_id: BreedId,
    pub parent_id: Option<DiscussionId>,
    pub message: Message,
    pub ratings: Option<Ratings>,
    pub tags: Vec<String>,
}

/// Full replacement of the editable fields.
#[derive(Debug, Clone)]
pub struct UpdateDiscussionCommand {
    pub message: Message,
    pub ratings: Option<Ratings>,
    pub tags: Vec<String>,
}

/// Drop blank tags and surrounding whitespace.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Empty rating maps are stored as no ratings at all.
pub fn non_empty_ratings(ratings: Option<Ratings>) -> Option<Ratings> {
    ratings.filter(|r| !r.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscussionPage {
    pub limit: i64,
    pub offset: i64,
}

impl DiscussionPage {
    pub const DEFAULT_LIMIT: i64 = 20;
    pub const MAX_LIMIT: i64 = 100;
    /// Replies returned under each top-level discussion.
    pub const REPLY_LIMIT: i64 = 100;

    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        let limit = match limit {
            Some(limit) if limit > 0 => limit.min(Self::MAX_LIMIT),
            _ => Self::DEFAULT_LIMIT,
        };
        Self {
            limit,
            offset: offset.unwrap_or(0).max(0),
        }
    }
}

impl Default for DiscussionPage {
    fn default() -> Self {
        Self::new(None, None)
    }
}
