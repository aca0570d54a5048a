use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{Form, Json, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::domains::feature::Feature;
use crate::domains::form::FormValues;
use crate::domains::ui_state::{theme_from_request, UiState};
use crate::error::{CodeTutorError, Result};
use crate::render::{escape_html, render_page, PageView};
use crate::services::tutor::{Submission, TutorService};

const COLOR_SCHEME_HINT: &str = "sec-ch-prefers-color-scheme";

#[derive(Clone)]
pub struct AppState {
    pub tutor: Arc<TutorService>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    model: String,
}

#[derive(Deserialize)]
struct ThemeToggleRequest {
    return_to: Option<String>,
}

#[derive(Serialize)]
struct AnswerResponse {
    feature: Feature,
    text: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    missing: Vec<String>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/theme", post(toggle_theme))
        .route("/features/{slug}", get(show_feature).post(submit_feature))
        .route("/api/features/{slug}", post(api_submit))
        .with_state(state)
}

async fn index() -> Redirect {
    Redirect::to(&format!("/features/{}", Feature::ALL[0].slug()))
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::BUILD_REVISION.to_string(),
        model: state.tutor.model().to_string(),
    })
}

fn request_theme(headers: &HeaderMap) -> bool {
    let cookie = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok());
    let hint = headers
        .get(COLOR_SCHEME_HINT)
        .and_then(|value| value.to_str().ok());
    theme_from_request(cookie, hint)
}

fn page_response(status: StatusCode, state: &UiState, outcome: Option<&Submission>) -> Response {
    let body = render_page(&PageView { state, outcome });
    let mut response = (status, Html(body)).into_response();
    response.headers_mut().insert(
        header::HeaderName::from_static("accept-ch"),
        HeaderValue::from_static("Sec-CH-Prefers-Color-Scheme"),
    );
    response
}

fn not_found_page(slug: &str) -> Response {
    let body = format!(
        "<!DOCTYPE html><html><body><h1>Unknown feature</h1>\
         <p>No feature called <code>{}</code>. <a href=\"/\">Back to the tutor</a></p></body></html>",
        escape_html(slug)
    );
    (StatusCode::NOT_FOUND, Html(body)).into_response()
}

async fn show_feature(Path(slug): Path<String>, headers: HeaderMap) -> Response {
    let Some(feature) = Feature::from_slug(&slug) else {
        return not_found_page(&slug);
    };
    let state = UiState::new(feature).with_theme(request_theme(&headers));
    page_response(StatusCode::OK, &state, None)
}

async fn submit_feature(
    State(app): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let Some(feature) = Feature::from_slug(&slug) else {
        return not_found_page(&slug);
    };
    let values = FormValues::from_pairs(pairs);
    let outcome = app.tutor.submit(feature, &values).await;
    let state = UiState::new(feature)
        .with_theme(request_theme(&headers))
        .with_values(values);
    let status = match outcome {
        Submission::Incomplete(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::OK,
    };
    page_response(status, &state, Some(&outcome))
}

/// Only feature pages are valid redirect targets.
fn safe_return_path(return_to: Option<&str>) -> String {
    return_to
        .and_then(|path| path.strip_prefix("/features/"))
        .and_then(Feature::from_slug)
        .map(|feature| format!("/features/{}", feature.slug()))
        .unwrap_or_else(|| "/".to_string())
}

async fn toggle_theme(headers: HeaderMap, Form(payload): Form<ThemeToggleRequest>) -> Response {
    let target = safe_return_path(payload.return_to.as_deref());
    let mut state = UiState::new(Feature::ALL[0]).with_theme(request_theme(&headers));
    state.toggle_theme();
    tracing::debug!(dark = state.theme_enabled, "Theme toggled");
    (
        [(header::SET_COOKIE, state.theme_cookie())],
        Redirect::to(&target),
    )
        .into_response()
}

fn json_error(status: StatusCode, error: String, missing: Vec<String>) -> Response {
    (status, Json(ErrorResponse { error, missing })).into_response()
}

async fn api_submit(
    State(app): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<Value>,
) -> Response {
    let Some(feature) = Feature::from_slug(&slug) else {
        return json_error(
            StatusCode::NOT_FOUND,
            format!("unknown feature: {slug}"),
            Vec::new(),
        );
    };
    let values = FormValues::from_json(&payload);
    match app.tutor.submit(feature, &values).await {
        Submission::Answered { feature, text } => {
            (StatusCode::OK, Json(AnswerResponse { feature, text })).into_response()
        }
        Submission::Incomplete(missing) => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            missing.to_string(),
            missing.0.iter().map(|label| label.to_string()).collect(),
        ),
        Submission::Failed { message, .. } => {
            json_error(StatusCode::BAD_GATEWAY, message, Vec::new())
        }
    }
}

pub async fn run(config: &Config) -> Result<()> {
    run_with_shutdown(config, shutdown_signal()).await
}

pub async fn run_with_shutdown<F>(config: &Config, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    config.validate()?;
    let tutor = Arc::new(TutorService::from_config(config)?);
    tracing::info!(
        model = tutor.model(),
        base_url = config.base_url(),
        timeout_secs = config.timeout().as_secs(),
        "Completion client ready"
    );
    let app = build_router(AppState { tutor });

    let addr = format!("{}:{}", config.host(), config.port());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| CodeTutorError::Runtime(format!("cannot bind {addr}: {e}")))?;
    tracing::info!("Serving {} on http://{}", crate::render::APP_TITLE, addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| CodeTutorError::Runtime(e.to_string()))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("Could not listen for ctrl-c: {err}");
        futures::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serving_refuses_to_start_without_a_credential() {
        let err = run_with_shutdown(&Config::convention_defaults(), async {})
            .await
            .unwrap_err();
        assert!(matches!(err, CodeTutorError::Config(_)), "{err}");
    }

    #[test]
    fn return_path_is_limited_to_feature_pages() {
        assert_eq!(
            safe_return_path(Some("/features/career-guide")),
            "/features/career-guide"
        );
        assert_eq!(safe_return_path(Some("https://evil.example/")), "/");
        assert_eq!(safe_return_path(Some("/features/unknown")), "/");
        assert_eq!(safe_return_path(None), "/");
    }

    #[test]
    fn theme_comes_from_cookie_or_hint() {
        let mut headers = HeaderMap::new();
        assert!(!request_theme(&headers));
        headers.insert(COLOR_SCHEME_HINT, HeaderValue::from_static("\"dark\""));
        assert!(request_theme(&headers));
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("code_tutor_theme=light"),
        );
        assert!(!request_theme(&headers));
    }
}
