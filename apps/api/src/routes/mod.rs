pub mod graphql;
pub mod health;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            graphql::GRAPHQL_PATH,
            get(graphql::graphiql_handler).post(graphql::graphql_handler),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::schema::build_schema;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn test_router() -> Router {
        let db = test_pool().await;
        build_router(AppState {
            schema: build_schema(db.clone()),
            db,
        })
    }

    #[tokio::test]
    async fn test_health_reports_database_up() {
        let response = test_router()
            .await
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["database"], "up");
    }

    #[tokio::test]
    async fn test_graphql_over_http() {
        let request = Request::post("/graphql")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "query": "mutation { createCompany(input: { name: \"TechCorp\" }) { name } }"
                })
                .to_string(),
            ))
            .unwrap();

        let response = test_router().await.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["data"]["createCompany"]["name"], "TechCorp");
    }

    #[tokio::test]
    async fn test_graphiql_page_is_served() {
        let response = test_router()
            .await
            .oneshot(Request::get("/graphql").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
