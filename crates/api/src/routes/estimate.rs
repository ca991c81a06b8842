//! Public price estimate endpoint.

use axum::{
    Json, Router,
    extract::Query,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use serde_json::json;

use crate::AppState;
use niwaki_core::estimate::{EstimateRequest, HeightBand, TreeService, estimate};

/// Creates the estimate routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/estimate", get(get_estimate))
}

/// Query parameters for an estimate.
#[derive(Debug, Deserialize)]
pub struct EstimateQuery {
    /// One of `pruning`, `felling`, `mowing`.
    pub service: String,
    /// Height band for per-tree services.
    #[serde(default)]
    pub height: Option<String>,
    /// Number of trees, defaults to 1.
    #[serde(default)]
    pub count: Option<u64>,
    /// Area in square meters, required for mowing.
    #[serde(default)]
    pub area: Option<u64>,
}

/// GET `/estimate`
/// Compute a rough price range for the requested work.
async fn get_estimate(Query(query): Query<EstimateQuery>) -> impl IntoResponse {
    let request = match query.service.as_str() {
        "mowing" => {
            let Some(area_sqm) = query.area else {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "missing_area",
                        "message": "area is required for mowing"
                    })),
                )
                    .into_response();
            };
            EstimateRequest::Mowing { area_sqm }
        }
        other => {
            let Some(service) = TreeService::parse(other) else {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_service",
                        "message": format!("Unknown service: {other}")
                    })),
                )
                    .into_response();
            };
            let Some(height) = query.height.as_deref().and_then(HeightBand::parse) else {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_height",
                        "message": "height must be one of low, medium, high"
                    })),
                )
                    .into_response();
            };
            EstimateRequest::PerTree {
                service,
                height,
                count: query.count.unwrap_or(1),
            }
        }
    };

    (StatusCode::OK, Json(estimate(request))).into_response()
}

#[cfg(test)]
mod integration_tests {
    use axum::{Router, body::Body, http::Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::testing::create_test_state;

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let (state, _dir) = create_test_state().await;
        let app = Router::new().merge(routes()).with_state(state);

        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn test_estimate_pruning() {
        let (status, json) = get_json("/estimate?service=pruning&height=low&count=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["min"], 11_000);
        assert_eq!(json["max"], 15_000);
    }

    #[tokio::test]
    async fn test_estimate_count_defaults_to_one() {
        let (status, json) = get_json("/estimate?service=pruning&height=low").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["min"], 8_000);
        assert_eq!(json["max"], 10_000);
    }

    #[tokio::test]
    async fn test_estimate_mowing() {
        let (status, json) = get_json("/estimate?service=mowing&area=30").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["min"], 11_000);
        assert_eq!(json["max"], 20_000);
    }

    #[tokio::test]
    async fn test_estimate_mowing_requires_area() {
        let (status, json) = get_json("/estimate?service=mowing").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "missing_area");
    }

    #[tokio::test]
    async fn test_estimate_unknown_service() {
        let (status, json) = get_json("/estimate?service=landscaping").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "invalid_service");
    }

    #[tokio::test]
    async fn test_estimate_tree_service_requires_height() {
        let (status, json) = get_json("/estimate?service=felling&count=2").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "invalid_height");
    }
}
