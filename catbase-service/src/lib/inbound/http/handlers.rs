pub mod auth;
pub mod breeds;
pub mod discussions;
pub mod health;
pub mod reactions;
pub mod users;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::breed::errors::BreedError;
use crate::domain::discussion::errors::DiscussionError;
use crate::domain::rating::errors::RatingError;
use crate::domain::reaction::errors::ReactionError;
use crate::domain::session::errors::SessionError;
use crate::domain::user::errors::UserError;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                // Storage and signing details stay in the log.
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::UsernameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            UserError::InvalidUsername(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_)
            | UserError::InvalidUserId(_) => ApiError::UnprocessableEntity(err.to_string()),
            UserError::PasswordHashing(_) | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            // A disabled account is reported exactly like a bad password.
            SessionError::InvalidCredentials | SessionError::AccountDisabled => {
                ApiError::Unauthorized(SessionError::InvalidCredentials.to_string())
            }
            SessionError::InvalidOrExpiredToken => ApiError::Unauthorized(err.to_string()),
            SessionError::Internal(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<BreedError> for ApiError {
    fn from(err: BreedError) -> Self {
        match err {
            BreedError::InvalidBreedId(_) => ApiError::BadRequest(err.to_string()),
            BreedError::InvalidName(_) => ApiError::UnprocessableEntity(err.to_string()),
            BreedError::NotFound(_) => ApiError::NotFound(err.to_string()),
            BreedError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<DiscussionError> for ApiError {
    fn from(err: DiscussionError) -> Self {
        match err {
            DiscussionError::InvalidDiscussionId(_) | DiscussionError::InvalidParent(_) => {
                ApiError::BadRequest(err.to_string())
            }
            DiscussionError::InvalidMessage(_) => ApiError::UnprocessableEntity(err.to_string()),
            DiscussionError::InvalidRatings(inner) => ApiError::from(inner),
            DiscussionError::NotFound(_) => ApiError::NotFound(err.to_string()),
            DiscussionError::AggregationFailed(_) | DiscussionError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<RatingError> for ApiError {
    fn from(err: RatingError) -> Self {
        match err {
            RatingError::OutOfRange { .. } | RatingError::BlankAxis => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            RatingError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<ReactionError> for ApiError {
    fn from(err: ReactionError) -> Self {
        match err {
            ReactionError::InvalidReactionType(_) => ApiError::BadRequest(err.to_string()),
            ReactionError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ReactionError::Contended => ApiError::Conflict(err.to_string()),
            ReactionError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::errors::UsernameError;

    #[test]
    fn test_disabled_account_looks_like_bad_credentials() {
        assert_eq!(
            ApiError::from(SessionError::AccountDisabled),
            ApiError::from(SessionError::InvalidCredentials)
        );
    }

    #[test]
    fn test_duplicate_username_is_conflict() {
        let err = ApiError::from(UserError::UsernameAlreadyExists("alice".to_string()));
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn test_validation_is_unprocessable() {
        let err = ApiError::from(UserError::InvalidUsername(UsernameError::InvalidCharacters));
        assert!(matches!(err, ApiError::UnprocessableEntity(_)));

        let err = ApiError::from(DiscussionError::InvalidRatings(RatingError::BlankAxis));
        assert!(matches!(err, ApiError::UnprocessableEntity(_)));
    }

    #[test]
    fn test_contended_toggle_is_conflict() {
        assert!(matches!(
            ApiError::from(ReactionError::Contended),
            ApiError::Conflict(_)
        ));
    }

    #[test]
    fn test_internal_error_hides_details() {
        let response =
            ApiError::InternalServerError("connection refused".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
