use http::Method;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

pub const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost,https://localhost,http://127.0.0.1,https://127.0.0.1";

/// Build a CORS layer for the REST API with the given allowed origins.
///
/// An origin is allowed when it starts with one of `cors_origins`.
/// Pass "*" in the origins list to allow all origins (not recommended for production).
#[must_use]
pub fn build_cors_layer(cors_origins: Vec<String>) -> CorsLayer {
    let allow_all_origins = cors_origins.iter().any(|o| o == "*");

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            if allow_all_origins {
                return true;
            }
            origin.to_str().is_ok_and(|origin_str| {
                cors_origins
                    .iter()
                    .any(|allowed| origin_str.starts_with(allowed.as_str()))
            })
        }))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .expose_headers(Any)
}

/// Split a comma separated origin list, dropping blanks.
#[must_use]
pub fn normalize_origins(origins: &[String]) -> Vec<String> {
    origins
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Router};
    use http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn app(origins: &[&str]) -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(build_cors_layer(
                origins.iter().map(ToString::to_string).collect(),
            ))
    }

    async fn allowed_origin(app: Router, origin: &str) -> Option<String> {
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::ORIGIN, origin)
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_configured_origin_allowed() {
        let allowed = allowed_origin(app(&["http://localhost"]), "http://localhost:5173").await;
        assert_eq!(allowed.as_deref(), Some("http://localhost:5173"));
    }

    #[tokio::test]
    async fn test_unknown_origin_rejected() {
        let allowed = allowed_origin(app(&["http://localhost"]), "https://evil.example").await;
        assert!(allowed.is_none());
    }

    #[tokio::test]
    async fn test_wildcard_allows_everything() {
        let allowed = allowed_origin(app(&["*"]), "https://anything.example").await;
        assert!(allowed.is_some());
    }

    #[test]
    fn test_normalize_origins() {
        let origins = vec![
            " http://localhost ".to_string(),
            String::new(),
            "http://127.0.0.1".to_string(),
        ];
        assert_eq!(
            normalize_origins(&origins),
            vec!["http://localhost", "http://127.0.0.1"]
        );
    }
}
