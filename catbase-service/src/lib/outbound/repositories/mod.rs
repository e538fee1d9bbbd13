pub mod audit;
pub mod breed;
pub mod discussion;
pub mod rating;
pub mod reaction;
pub mod refresh_token;
pub mod user;

pub use audit::PostgresAuditLog;
pub use breed::PostgresBreedRepository;
pub use discussion::PostgresDiscussionRepository;
pub use rating::PostgresRatingRepository;
pub use reaction::PostgresReactionRepository;
pub use refresh_token::PostgresRefreshTokenLedger;
pub use user::PostgresUserRepository;
