pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::breed;
pub use domain::discussion;
pub use domain::rating;
pub use domain::reaction;
pub use domain::session;
pub use domain::user;
pub use outbound::repositories;
