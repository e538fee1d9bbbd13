use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UserIdError;
use crate::user::errors::UsernameError;

/// Role granted to every new account.
pub const DEFAULT_ROLE: &str = "user";
pub const ADMIN_ROLE: &str = "admin";
pub const MODERATOR_ROLE: &str = "moderator";

/// Registered identity.
///
/// `password_hash` is an opaque digest and is never serialized outward; the
/// HTTP layer maps users into response types that omit it.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// Identity about to be inserted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
}

/// Numeric user identifier, assigned by the store and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl UserId {
    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a positive integer
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(UserIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 3-50 characters and contains only alphanumeric, underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 50;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 50 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Plaintext password accepted at registration.
///
/// `Debug` is redacted so the value cannot leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;
    const MAX_LENGTH: usize = 128;

    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(PasswordPolicyError::TooLong {
                max: Self::MAX_LENGTH,
            })
        } else {
            Ok(Self(password))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Point-in-time copy of a user's role names.
///
/// Embedded into access tokens at issue time; later role changes only show up
/// in tokens minted afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roles(Vec<String>);

impl Roles {
    pub fn new(mut roles: Vec<String>) -> Self {
        roles.sort();
        roles.dedup();
        Self(roles)
    }

    pub fn contains(&self, role: &str) -> bool {
        self.0.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.contains(ADMIN_ROLE)
    }

    /// Admins and moderators may remove other users' content.
    pub fn can_moderate(&self) -> bool {
        self.contains(ADMIN_ROLE) || self.contains(MODERATOR_ROLE)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// Command to register a new user with validated fields.
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: Password,
}

impl RegisterUserCommand {
    pub fn new(username: Username, email: EmailAddress, password: Password) -> Self {
        Self {
            username,
            email,
            password,
        }
    }
}

/// A user together with their current role snapshot.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user: User,
    pub roles: Roles,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_bounds() {
        assert!(Username::new("al".to_string()).is_err());
        assert!(Username::new("alice".to_string()).is_ok());
        assert!(Username::new("a".repeat(50)).is_ok());
        assert!(matches!(
            Username::new("a".repeat(51)),
            Err(UsernameError::TooLong { max: 50, actual: 51 })
        ));
    }

    #[test]
    fn test_username_characters() {
        assert!(Username::new("alice_cat-lover".to_string()).is_ok());
        assert_eq!(
            Username::new("alice smith".to_string()),
            Err(UsernameError::InvalidCharacters)
        );
    }

    #[test]
    fn test_user_id_parsing() {
        assert_eq!(UserId::from_string("42"), Ok(UserId(42)));
        assert!(UserId::from_string("0").is_err());
        assert!(UserId::from_string("-3").is_err());
        assert!(UserId::from_string("abc").is_err());
    }

    #[test]
    fn test_password_is_redacted_in_debug() {
        let password = Password::new("hunter2hunter2".to_string()).unwrap();
        assert_eq!(format!("{:?}", password), "Password(***)");
    }

    #[test]
    fn test_password_length() {
        assert!(Password::new("short".to_string()).is_err());
        assert!(Password::new("long enough".to_string()).is_ok());
    }

    #[test]
    fn test_roles_snapshot() {
        let roles = Roles::new(vec![
            "user".to_string(),
            "admin".to_string(),
            "user".to_string(),
        ]);
        assert_eq!(roles.as_slice(), &["admin".to_string(), "user".to_string()]);
        assert!(roles.is_admin());
        assert!(roles.can_moderate());
        assert!(!Roles::new(vec!["user".to_string()]).can_moderate());
    }
}
