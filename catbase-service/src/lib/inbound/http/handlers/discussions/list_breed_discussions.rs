use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use crate::domain::breed::models::BreedId;
use crate::domain::discussion::models::DiscussionPage;
use crate::domain::discussion::ports::DiscussionServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::DiscussionData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_breed_discussions(
    State(state): State<AppState>,
    caller: Option<Extension<AuthenticatedUser>>,
    Path(breed_id): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<ApiSuccess<Vec<DiscussionData>>, ApiError> {
    let breed_id =
        BreedId::from_string(&breed_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let viewer = caller.map(|Extension(caller)| caller.user_id);
    let page = DiscussionPage::new(params.limit, params.offset);

    state
        .discussion_service
        .list_for_breed(breed_id, page, viewer)
        .await
        .map_err(ApiError::from)
        .map(|views| {
            let discussion_data: Vec<DiscussionData> = views.iter().map(|v| v.into()).collect();
            ApiSuccess::new(StatusCode::OK, discussion_data)
        })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    limit: Option<i64>,
    offset: Option<i64>,
}
