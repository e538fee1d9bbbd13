pub mod get_breed_reactions;
pub mod toggle_reaction;

pub use get_breed_reactions::get_breed_reactions;
pub use toggle_reaction::react_to_breed;
pub use toggle_reaction::react_to_discussion;
