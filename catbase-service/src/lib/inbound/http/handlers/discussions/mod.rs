pub mod create_discussion;
pub mod delete_discussion;
pub mod list_breed_discussions;
pub mod list_my_discussions;
pub mod update_discussion;

pub use create_discussion::create_discussion;
pub use delete_discussion::delete_discussion;
pub use list_breed_discussions::list_breed_discussions;
pub use list_my_discussions::list_my_discussions;
pub use update_discussion::update_discussion;
