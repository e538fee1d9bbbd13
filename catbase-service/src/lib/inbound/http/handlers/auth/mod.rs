pub mod get_current_user;
pub mod login;
pub mod logout;
pub mod refresh_session;

pub use get_current_user::get_current_user;
pub use login::login;
pub use logout::logout;
pub use refresh_session::refresh_session;
