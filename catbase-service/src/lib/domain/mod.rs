pub mod audit;
pub mod breed;
pub mod discussion;
pub mod rating;
pub mod reaction;
pub mod session;
pub mod user;
