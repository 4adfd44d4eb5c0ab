use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nl_core::{Error, SearchParams};
use nl_search::{fetch_trending, run_comparison, CredentialSource, PerplexityProvider};
use serde::{Deserialize, Serialize};

use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub keyword: String,
    pub start_date: String,
    pub end_date: String,
    pub api_key: Option<String>,
    pub is_admin: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CredentialRequest {
    pub api_key: Option<String>,
    pub is_admin: bool,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

fn credential_source(api_key: &Option<String>, is_admin: bool) -> CredentialSource {
    if is_admin {
        CredentialSource::Admin
    } else {
        CredentialSource::Guest(api_key.clone().unwrap_or_default())
    }
}

/// Maps a resolution failure to the status the original boundary used:
/// a guest without a key is a bad request, a misconfigured server is not.
fn resolve_key(state: &AppState, source: &CredentialSource) -> Result<String, Response> {
    state.resolve_credential(source).map_err(|err| {
        let status = match source {
            CredentialSource::Guest(_) => StatusCode::BAD_REQUEST,
            CredentialSource::Admin => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error_response(status, &err.to_string())
    })
}

fn map_error(err: Error) -> Response {
    if err.is_credential() {
        return error_response(
            StatusCode::UNAUTHORIZED,
            "the API key was rejected; check that it is a valid Perplexity key",
        );
    }
    match err {
        Error::NoResults => error_response(
            StatusCode::NOT_FOUND,
            "no articles found in either outlet group; try a different keyword or date range",
        ),
        err => {
            tracing::error!("analysis failed: {}", err);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "news analysis failed")
        }
    }
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Response {
    if request.keyword.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "a search keyword is required");
    }

    let source = credential_source(&request.api_key, request.is_admin);
    let api_key = match resolve_key(&state, &source) {
        Ok(key) => key,
        Err(response) => return response,
    };

    let provider = PerplexityProvider::new(api_key);
    let params = SearchParams {
        keyword: request.keyword.trim().to_string(),
        start_date: request.start_date,
        end_date: request.end_date,
    };

    match run_comparison(&provider, &params).await {
        Ok(result) => Json(result).into_response(),
        Err(err) => map_error(err),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthSuccess {
    success: bool,
    is_admin: bool,
    message: String,
}

pub async fn auth(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AuthRequest>,
) -> Response {
    let (Some(admin_id), Some(admin_password)) = (&state.admin_id, &state.admin_password) else {
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "no admin account is configured",
        );
    };

    if request.username == *admin_id && request.password == *admin_password {
        Json(AuthSuccess {
            success: true,
            is_admin: true,
            message: "admin login successful".to_string(),
        })
        .into_response()
    } else {
        error_response(
            StatusCode::UNAUTHORIZED,
            "incorrect username or password",
        )
    }
}

pub async fn trending(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CredentialRequest>,
) -> Response {
    let source = credential_source(&request.api_key, request.is_admin);
    let api_key = match resolve_key(&state, &source) {
        Ok(key) => key,
        Err(response) => return response,
    };

    let provider = PerplexityProvider::new(api_key);
    match fetch_trending(&provider).await {
        Ok(result) => Json(result).into_response(),
        Err(err) => map_error(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_app;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn configured_state() -> AppState {
        AppState {
            admin_id: Some("admin".to_string()),
            admin_password: Some("secret".to_string()),
            server_api_key: Some("server-key".to_string()),
        }
    }

    #[tokio::test]
    async fn analyze_rejects_a_missing_keyword() {
        let app = create_app(configured_state()).await;
        let response = app
            .oneshot(post("/api/analyze", json!({ "keyword": "  " })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response.into_response()).await;
        assert!(body["error"].as_str().unwrap().contains("keyword"));
    }

    #[tokio::test]
    async fn analyze_requires_a_guest_key() {
        let app = create_app(configured_state()).await;
        let response = app
            .oneshot(post(
                "/api/analyze",
                json!({ "keyword": "tax", "isAdmin": false }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn analyze_reports_a_missing_server_key() {
        let state = AppState {
            server_api_key: None,
            ..configured_state()
        };
        let app = create_app(state).await;
        let response = app
            .oneshot(post(
                "/api/analyze",
                json!({ "keyword": "tax", "isAdmin": true }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn auth_accepts_the_configured_admin() {
        let app = create_app(configured_state()).await;
        let response = app
            .oneshot(post(
                "/api/auth",
                json!({ "username": "admin", "password": "secret" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response.into_response()).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["isAdmin"], json!(true));
    }

    #[tokio::test]
    async fn auth_rejects_wrong_credentials() {
        let app = create_app(configured_state()).await;
        let response = app
            .oneshot(post(
                "/api/auth",
                json!({ "username": "admin", "password": "wrong" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn auth_without_configuration_is_a_server_error() {
        let app = create_app(AppState::default()).await;
        let response = app
            .oneshot(post(
                "/api/auth",
                json!({ "username": "a", "password": "b" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn trending_requires_a_guest_key() {
        let app = create_app(configured_state()).await;
        let response = app
            .oneshot(post("/api/trending", json!({ "isAdmin": false })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn error_mapping_distinguishes_the_failure_kinds() {
        assert_eq!(
            map_error(Error::Credential("x".to_string())).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(map_error(Error::NoResults).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            map_error(Error::Provider("rate limited".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
