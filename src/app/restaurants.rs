use crate::domain::model::UnavailableBody;
use crate::domain::ports::RestaurantSource;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub genre: Option<String>,
}

pub fn routes(source: Arc<dyn RestaurantSource>) -> Router {
    Router::new()
        .route("/api/restaurants/nearby", get(handle_nearby))
        .route("/api/restaurants/genres", get(handle_genres))
        .with_state(source)
}

fn unavailable(error: &str) -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(UnavailableBody {
            error: error.to_string(),
        }),
    )
        .into_response()
}

async fn handle_nearby(
    State(source): State<Arc<dyn RestaurantSource>>,
    Query(query): Query<NearbyQuery>,
) -> Response {
    match source.nearby(query.genre.as_deref()).await {
        Ok(list) => Json(list).into_response(),
        Err(e) => {
            tracing::error!("restaurant lookup failed: {}", e);
            unavailable("failed to fetch restaurant information")
        }
    }
}

async fn handle_genres(State(source): State<Arc<dyn RestaurantSource>>) -> Response {
    match source.genres().await {
        Ok(list) => Json(list).into_response(),
        Err(e) => {
            tracing::error!("genre lookup failed: {}", e);
            unavailable("failed to fetch genre information")
        }
    }
}
