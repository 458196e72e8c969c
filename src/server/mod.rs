//! HTTP surface for test case generation.
//!
//! Thin axum wrapper over the generation pipeline, mirroring the CLI: a
//! small HTML form at `/`, a generate endpoint, a spreadsheet download
//! endpoint keyed by identifier, and a status endpoint.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::ai::ProviderRegistry;
use crate::domain::{CategoryFailure, Generator};
use crate::entities::TestCase;
use crate::errors::CasegenError;
use crate::export::{default_filename, export_to_excel};

mod store;

pub use store::{DownloadStore, StoredFile};

/// Shared server state.
pub struct AppState {
    /// Provider registry
    pub registry: ProviderRegistry,
    /// Download identifier → generated file
    pub store: DownloadStore,
    /// Provider used when a request does not name one
    pub default_provider: String,
    /// Directory exported spreadsheets are written to
    pub output_dir: PathBuf,
}

impl AppState {
    /// Create server state with the given default provider.
    pub fn new(registry: ProviderRegistry, default_provider: impl Into<String>) -> Self {
        Self {
            registry,
            store: DownloadStore::new(),
            default_provider: default_provider.into(),
            output_dir: std::env::temp_dir(),
        }
    }

    /// Override the export directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

/// Build the application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/generate", post(generate_handler))
        .route("/api/download/{id}", get(download_handler))
        .route("/api/status", get(status_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the server until shutdown.
pub async fn serve(state: Arc<AppState>, host: &str, port: u16) -> anyhow::Result<()> {
    if !state.registry.is_any_configured() {
        warn!("No AI provider credential found; set OPENAI_API_KEY or ANTHROPIC_API_KEY");
    }

    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!("Listening on http://{}:{}", host, port);
    axum::serve(listener, router).await?;
    Ok(())
}

/// Request body for the generate endpoint.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Free-text feature description
    pub feature_prompt: String,
    /// Requested categories; defaults applied when empty
    #[serde(default)]
    pub test_types: Vec<String>,
    /// Provider override
    #[serde(default)]
    pub provider: Option<String>,
}

/// Response body for the generate endpoint.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub download_id: Uuid,
    pub message: String,
    pub test_case_count: usize,
    pub test_cases: Vec<TestCase>,
    pub failures: Vec<CategoryFailure>,
}

/// Error body returned for failed requests.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    detail: String,
}

fn error_response(status: StatusCode, detail: impl Into<String>) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            detail: detail.into(),
        }),
    )
        .into_response()
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn generate_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> axum::response::Response {
    if request.feature_prompt.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "feature_prompt must not be blank");
    }

    let provider_name = request
        .provider
        .as_deref()
        .unwrap_or(&state.default_provider);

    let generator = match Generator::from_registry(&state.registry, provider_name) {
        Ok(generator) => generator,
        Err(e @ (CasegenError::UnknownProvider { .. } | CasegenError::ProviderNotConfigured { .. })) => {
            return error_response(StatusCode::BAD_REQUEST, e.to_string());
        }
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };

    let report = match generator
        .generate(&request.feature_prompt, &request.test_types)
        .await
    {
        Ok(report) => report,
        Err(CasegenError::InvalidArgument { reason }) => {
            return error_response(StatusCode::BAD_REQUEST, reason);
        }
        Err(e) => {
            error!(error = %e, "Generation failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }
    };

    let path = state.output_dir.join(default_filename());
    let path = match export_to_excel(&report.cases, Some(&path)) {
        Ok(path) => path,
        Err(e) => {
            error!(error = %e, "Export failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }
    };

    let download_id = state
        .store
        .insert(path, report.case_count(), &request.feature_prompt);

    let category_count = if request.test_types.is_empty() {
        crate::domain::DEFAULT_CATEGORIES.len()
    } else {
        request.test_types.len()
    };
    let message = if report.is_complete() {
        format!("Generated {} test cases", report.case_count())
    } else {
        format!(
            "Generated {} test cases ({} of {} categories failed)",
            report.case_count(),
            report.failures.len(),
            category_count
        )
    };

    Json(GenerateResponse {
        success: true,
        download_id,
        message,
        test_case_count: report.case_count(),
        test_cases: report.cases,
        failures: report.failures,
    })
    .into_response()
}

async fn download_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> axum::response::Response {
    let Some(file) = state.store.get(&id) else {
        return error_response(StatusCode::NOT_FOUND, "File not found or expired");
    };

    let bytes = match tokio::fs::read(&file.path).await {
        Ok(bytes) => bytes,
        Err(_) => return error_response(StatusCode::NOT_FOUND, "File no longer on disk"),
    };

    let filename = file
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "test_cases.xlsx".to_string());

    (
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// Status payload for health checks.
#[derive(Debug, Serialize)]
struct StatusResponse {
    status: &'static str,
    timestamp: String,
    api_keys: ApiKeyStatus,
    generated_files_count: usize,
}

#[derive(Debug, Serialize)]
struct ApiKeyStatus {
    openai: bool,
    anthropic: bool,
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let configured = |name: &str| {
        state
            .registry
            .get(name)
            .is_some_and(|p| p.is_configured())
    };

    Json(StatusResponse {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339(),
        api_keys: ApiKeyStatus {
            openai: configured("openai"),
            anthropic: configured("anthropic"),
        },
        generated_files_count: state.store.len(),
    })
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Test Case Generator</title>
<style>
  body { font-family: sans-serif; max-width: 720px; margin: 2rem auto; padding: 0 1rem; }
  textarea { width: 100%; height: 7rem; }
  table { border-collapse: collapse; width: 100%; margin-top: 1rem; }
  th, td { border: 1px solid #ccc; padding: 4px 8px; text-align: left; }
  th { background: #366092; color: #fff; }
  .error { color: #b00; }
</style>
</head>
<body>
<h1>Test Case Generator</h1>
<form id="form">
  <p><label>Feature description<br><textarea name="feature_prompt" required></textarea></label></p>
  <p>
    <label><input type="checkbox" name="test_types" value="functional" checked> functional</label>
    <label><input type="checkbox" name="test_types" value="negative" checked> negative</label>
    <label><input type="checkbox" name="test_types" value="edge_case" checked> edge_case</label>
    <label><input type="checkbox" name="test_types" value="regression"> regression</label>
  </p>
  <p>
    <label>Provider
      <select name="provider">
        <option value="openai">openai</option>
        <option value="anthropic">anthropic</option>
      </select>
    </label>
    <button type="submit">Generate</button>
  </p>
</form>
<div id="result"></div>
<script>
const form = document.getElementById('form');
const result = document.getElementById('result');
form.addEventListener('submit', async (e) => {
  e.preventDefault();
  result.textContent = 'Generating...';
  const data = new FormData(form);
  const body = {
    feature_prompt: data.get('feature_prompt'),
    test_types: data.getAll('test_types'),
    provider: data.get('provider'),
  };
  try {
    const resp = await fetch('/api/generate', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify(body),
    });
    const payload = await resp.json();
    if (!resp.ok) {
      result.innerHTML = '<p class="error">' + payload.detail + '</p>';
      return;
    }
    let html = '<p>' + payload.message +
      ' &mdash; <a href="/api/download/' + payload.download_id + '">Download spreadsheet</a></p>';
    html += '<table><tr><th>ID</th><th>Name</th><th>Type</th><th>Priority</th></tr>';
    for (const tc of payload.test_cases) {
      html += '<tr><td>' + tc.test_case_id + '</td><td>' + tc.test_case_name +
        '</td><td>' + tc.test_type + '</td><td>' + tc.priority + '</td></tr>';
    }
    html += '</table>';
    for (const f of payload.failures) {
      html += '<p class="error">Category ' + f.category + ' failed: ' + f.error + '</p>';
    }
    result.innerHTML = html;
  } catch (err) {
    result.innerHTML = '<p class="error">' + err + '</p>';
  }
});
</script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_defaults() {
        let json = r#"{"feature_prompt": "login"}"#;
        let request: GenerateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.feature_prompt, "login");
        assert!(request.test_types.is_empty());
        assert!(request.provider.is_none());
    }

    #[test]
    fn test_state_construction() {
        let state = AppState::new(ProviderRegistry::new(), "openai")
            .with_output_dir("/tmp/casegen-test");
        assert_eq!(state.default_provider, "openai");
        assert_eq!(state.output_dir, PathBuf::from("/tmp/casegen-test"));
    }
}
