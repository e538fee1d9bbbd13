//! Authentication utilities library
//!
//! Credential and token primitives for the catbase service:
//! - Password hashing (Argon2id, fixed work factor)
//! - Signed access/refresh tokens (HS256 JWT) with role snapshots
//! - An `Authenticator` that composes both under a `TokenPolicy`
//!
//! Persistence concerns (refresh token ledger, role storage) live in the
//! service; this crate is pure computation over bytes and a secret.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("my_passwordx", &hash).unwrap());
//! ```
//!
//! ## Access and Refresh Tokens
//! ```
//! use auth::{Authenticator, TokenPolicy};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", TokenPolicy::default());
//!
//! let access = auth.issue_access(1, "alice", &["user".to_string()]).unwrap();
//! let refresh = auth.issue_refresh(1, "alice").unwrap();
//!
//! let claims = auth.verify_access(&access.token).unwrap();
//! assert!(claims.has_role("user"));
//! assert!(auth.verify_access(&refresh.token).is_err());
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::IssuedToken;
pub use authenticator::TokenPolicy;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenClaims;
pub use jwt::TokenType;
pub use password::PasswordError;
pub use password::PasswordHasher;
