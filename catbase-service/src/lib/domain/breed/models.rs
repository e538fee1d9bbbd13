use std::collections::BTreeMap;
use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::breed::errors::BreedIdError;
use crate::breed::errors::BreedNameError;
use crate::domain::reaction::models::ReactionKind;
use crate::domain::user::models::UserId;

/// Numeric breed identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BreedId(pub i64);

impl BreedId {
    pub fn from_string(s: &str) -> Result<Self, BreedIdError> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(BreedIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for BreedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Breed display name, 2-255 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreedName(String);

impl BreedName {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 255;

    pub fn new(name: String) -> Result<Self, BreedNameError> {
        let name = name.trim().to_string();
        let length = name.chars().count();
        if length < Self::MIN_LENGTH {
            Err(BreedNameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(BreedNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Free-text description of a breed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreedProfile {
    pub origin: String,
    pub history: String,
    pub appearance: String,
    pub temperament: String,
    pub care_instructions: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Breed {
    pub id: BreedId,
    pub name: BreedName,
    pub profile: BreedProfile,
    pub like_count: i64,
    pub dislike_count: i64,
    /// Top-level discussions that contributed ratings.
    pub discussion_count: i64,
    pub view_count: i64,
    pub average_ratings: BTreeMap<String, f64>,
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A breed as seen by a particular (possibly anonymous) caller.
#[derive(Debug, Clone, PartialEq)]
pub struct BreedView {
    pub breed: Breed,
    pub user_reaction: Option<ReactionKind>,
}

#[derive(Debug, Clone)]
pub struct NewBreed {
    pub name: BreedName,
    pub profile: BreedProfile,
    pub created_by: UserId,
}

#[derive(Debug, Clone)]
pub struct CreateBreedCommand {
    pub name: BreedName,
    pub profile: BreedProfile,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateBreedCommand {
    pub name: Option<BreedName>,
    pub origin: Option<String>,
    pub history: Option<String>,
    pub appearance: Option<String>,
    pub temperament: Option<String>,
    pub care_instructions: Option<String>,
    pub image_url: Option<String>,
}

impl UpdateBreedCommand {
    pub fn apply(self, breed: &mut Breed) {
        if let Some(name) = self.name {
            breed.name = name;
        }
        let profile = &mut breed.profile;
        let fields = [
            (self.origin, &mut profile.origin),
            (self.history, &mut profile.history),
            (self.appearance, &mut profile.appearance),
            (self.temperament, &mut profile.temperament),
            (self.care_instructions, &mut profile.care_instructions),
            (self.image_url, &mut profile.image_url),
        ];
        for (update, field) in fields {
            if let Some(value) = update {
                *field = value;
            }
        }
    }
}

/// Paging and search for the breed listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreedQuery {
    pub limit: i64,
    pub offset: i64,
    /// Case-insensitive substring of the name.
    pub search: Option<String>,
}

impl BreedQuery {
    pub const DEFAULT_LIMIT: i64 = 10;
    pub const MAX_LIMIT: i64 = 100;

    /// Clamp raw query parameters into a usable page.
    pub fn new(limit: Option<i64>, offset: Option<i64>, search: Option<String>) -> Self {
        let limit = match limit {
            Some(limit) if limit > 0 => limit.min(Self::MAX_LIMIT),
            _ => Self::DEFAULT_LIMIT,
        };
        Self {
            limit,
            offset: offset.unwrap_or(0).max(0),
            search: search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

impl Default for BreedQuery {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breed_name_is_trimmed_and_bounded() {
        assert_eq!(
            BreedName::new("  Maine Coon ".to_string()).unwrap().as_str(),
            "Maine Coon"
        );
        assert!(BreedName::new(" x ".to_string()).is_err());
        assert!(BreedName::new("x".repeat(256)).is_err());
    }

    #[test]
    fn test_query_defaults_and_clamps() {
        assert_eq!(BreedQuery::default().limit, 10);
        assert_eq!(BreedQuery::new(Some(500), None, None).limit, 100);
        assert_eq!(BreedQuery::new(Some(0), Some(-4), None).limit, 10);
        assert_eq!(BreedQuery::new(None, Some(-4), None).offset, 0);
        assert_eq!(
            BreedQuery::new(None, None, Some("  ".to_string())).search,
            None
        );
    }

    #[test]
    fn test_update_keeps_unset_fields() {
        let mut breed = Breed {
            id: BreedId(1),
            name: BreedName::new("Siamese".to_string()).unwrap(),
            profile: BreedProfile {
                origin: "Thailand".to_string(),
                history: "Old".to_string(),
                ..BreedProfile::default()
            },
            like_count: 0,
            dislike_count: 0,
            discussion_count: 0,
            view_count: 0,
            average_ratings: BTreeMap::new(),
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        UpdateBreedCommand {
            history: Some("Royal cats of Siam".to_string()),
            ..UpdateBreedCommand::default()
        }
        .apply(&mut breed);

        assert_eq!(breed.name.as_str(), "Siamese");
        assert_eq!(breed.profile.origin, "Thailand");
        assert_eq!(breed.profile.history, "Royal cats of Siam");
    }
}
