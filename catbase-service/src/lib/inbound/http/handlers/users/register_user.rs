use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::PasswordPolicyError;
use crate::domain::user::errors::UsernameError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::UserData;
use crate::inbound::http::middleware::ClientContext;
use crate::inbound::http::router::AppState;

pub async fn register_user(
    State(state): State<AppState>,
    ClientContext(context): ClientContext,
    Json(body): Json<RegisterUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .user_service
        .register(body.try_into_command()?, context)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Clone, Deserialize)]
pub struct RegisterUserRequest {
    username: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterUserRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),
}

impl RegisterUserRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, ParseRegisterUserRequestError> {
        let username = Username::new(self.username)?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        Ok(RegisterUserCommand::new(username, email, password))
    }
}

impl From<ParseRegisterUserRequestError> for ApiError {
    fn from(err: ParseRegisterUserRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
