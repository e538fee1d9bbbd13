use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::breed::models::BreedId;
use crate::domain::discussion::models::DiscussionId;
use crate::reaction::errors::ReactionError;

/// A user's reaction to a subject. Absence of a reaction is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Dislike => "dislike",
        }
    }
}

impl FromStr for ReactionKind {
    type Err = ReactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(ReactionKind::Like),
            "dislike" => Ok(ReactionKind::Dislike),
            other => Err(ReactionError::InvalidReactionType(other.to_string())),
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Next state of a (subject, user) pair after a toggle request.
///
/// Repeating the active reaction clears it; the other reaction replaces it.
pub fn toggle(current: Option<ReactionKind>, requested: ReactionKind) -> Option<ReactionKind> {
    match current {
        Some(active) if active == requested => None,
        _ => Some(requested),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubjectKind {
    Breed,
    Discussion,
}

impl SubjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectKind::Breed => "breed",
            SubjectKind::Discussion => "discussion",
        }
    }
}

/// Something that can be reacted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subject {
    pub kind: SubjectKind,
    pub id: i64,
}

impl Subject {
    pub fn breed(id: BreedId) -> Self {
        Self {
            kind: SubjectKind::Breed,
            id: id.0,
        }
    }

    pub fn discussion(id: DiscussionId) -> Self {
        Self {
            kind: SubjectKind::Discussion,
            id: id.0,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.as_str(), self.id)
    }
}

/// Totals on a subject plus the caller's own reaction, read after any write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReactionSummary {
    pub user_reaction: Option<ReactionKind>,
    pub like_count: i64,
    pub dislike_count: i64,
}
