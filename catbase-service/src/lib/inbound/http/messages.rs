/// Serializable response types shared by several HTTP handlers.
///
/// Domain models stay free of serialization concerns; handlers convert into
/// these before wrapping them in `ApiSuccess`.
use std::collections::BTreeMap;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::breed::models::Breed;
use crate::domain::breed::models::BreedView;
use crate::domain::discussion::models::AuthoredDiscussion;
use crate::domain::discussion::models::Discussion;
use crate::domain::discussion::models::DiscussionView;
use crate::domain::reaction::models::ReactionKind;
use crate::domain::user::models::Roles;
use crate::domain::user::models::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}

/// A user together with the roles currently granted to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUserData {
    pub user: UserData,
    pub roles: Vec<String>,
}

impl SessionUserData {
    pub fn new(user: &User, roles: &Roles) -> Self {
        Self {
            user: user.into(),
            roles: roles.as_slice().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub message: String,
}

impl MessageData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreedData {
    pub id: i64,
    pub name: String,
    pub origin: String,
    pub history: String,
    pub appearance: String,
    pub temperament: String,
    pub care_instructions: String,
    pub image_url: String,
    pub like_count: i64,
    pub dislike_count: i64,
    pub discussion_count: i64,
    pub view_count: i64,
    pub average_ratings: BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_reaction: Option<ReactionKind>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Breed> for BreedData {
    fn from(breed: &Breed) -> Self {
        Self {
            id: breed.id.0,
            name: breed.name.as_str().to_string(),
            origin: breed.profile.origin.clone(),
            history: breed.profile.history.clone(),
            appearance: breed.profile.appearance.clone(),
            temperament: breed.profile.temperament.clone(),
            care_instructions: breed.profile.care_instructions.clone(),
            image_url: breed.profile.image_url.clone(),
            like_count: breed.like_count,
            dislike_count: breed.dislike_count,
            discussion_count: breed.discussion_count,
            view_count: breed.view_count,
            average_ratings: breed.average_ratings.clone(),
            user_reaction: None,
            created_at: breed.created_at,
            updated_at: breed.updated_at,
        }
    }
}

impl From<&BreedView> for BreedData {
    fn from(view: &BreedView) -> Self {
        Self {
            user_reaction: view.user_reaction,
            ..BreedData::from(&view.breed)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscussionData {
    pub id: i64,
    pub breed_id: i64,
    pub user_id: i64,
    pub username: String,
    pub parent_id: Option<i64>,
    pub message: String,
    pub ratings: Option<BTreeMap<String, u8>>,
    pub tags: Vec<String>,
    pub like_count: i64,
    pub dislike_count: i64,
    pub reply_count: i64,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_reaction: Option<ReactionKind>,
    pub is_owner: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<DiscussionData>,
}

impl DiscussionData {
    fn from_discussion(discussion: &Discussion) -> Self {
        Self {
            id: discussion.id.0,
            breed_id: discussion.breed_id.0,
            user_id: discussion.user_id.0,
            username: discussion.username.clone(),
            parent_id: discussion.parent_id.map(|id| id.0),
            message: discussion.message.clone(),
            ratings: discussion.ratings.as_ref().map(|r| r.as_map().clone()),
            tags: discussion.tags.clone(),
            like_count: discussion.like_count,
            dislike_count: discussion.dislike_count,
            reply_count: discussion.reply_count,
            is_deleted: discussion.is_deleted,
            created_at: discussion.created_at,
            updated_at: discussion.updated_at,
            user_reaction: None,
            is_owner: false,
            replies: Vec::new(),
        }
    }
}

impl From<&DiscussionView> for DiscussionData {
    fn from(view: &DiscussionView) -> Self {
        Self {
            user_reaction: view.user_reaction,
            is_owner: view.is_owner,
            replies: view.replies.iter().map(DiscussionData::from).collect(),
            ..DiscussionData::from_discussion(&view.discussion)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthoredDiscussionData {
    #[serde(flatten)]
    pub discussion: DiscussionData,
    pub breed_name: String,
}

impl From<&AuthoredDiscussion> for AuthoredDiscussionData {
    fn from(authored: &AuthoredDiscussion) -> Self {
        Self {
            discussion: DiscussionData {
                is_owner: true,
                ..DiscussionData::from_discussion(&authored.discussion)
            },
            breed_name: authored.breed_name.clone(),
        }
    }
}
