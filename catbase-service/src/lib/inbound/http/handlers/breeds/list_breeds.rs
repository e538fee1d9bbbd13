use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use crate::domain::breed::models::BreedQuery;
use crate::domain::breed::ports::BreedServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::BreedData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_breeds(
    State(state): State<AppState>,
    caller: Option<Extension<AuthenticatedUser>>,
    Query(params): Query<ListBreedsParams>,
) -> Result<ApiSuccess<Vec<BreedData>>, ApiError> {
    let viewer = caller.map(|Extension(caller)| caller.user_id);
    let query = BreedQuery::new(params.limit, params.offset, params.q);

    state
        .breed_service
        .list_breeds(query, viewer)
        .await
        .map_err(ApiError::from)
        .map(|breeds| {
            let breed_data: Vec<BreedData> = breeds.iter().map(|b| b.into()).collect();
            ApiSuccess::new(StatusCode::OK, breed_data)
        })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListBreedsParams {
    limit: Option<i64>,
    offset: Option<i64>,
    q: Option<String>,
}
