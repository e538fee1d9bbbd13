pub mod create_breed;
pub mod delete_breed;
pub mod get_breed;
pub mod list_breeds;
pub mod update_breed;

pub use create_breed::create_breed;
pub use delete_breed::delete_breed;
pub use get_breed::get_breed;
pub use list_breeds::list_breeds;
pub use update_breed::update_breed;
