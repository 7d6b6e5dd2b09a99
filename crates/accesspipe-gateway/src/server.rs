//! Upload endpoint, filename sanitization, and error translation
//!
//! Thin glue: stores the upload, constructs a fresh pipeline run per
//! request, and turns typed pipeline errors into HTTP responses. The
//! pipeline core never sees HTTP.

use accesspipe_agent::AgentFactory;
use accesspipe_core::{Config, Error};
use accesspipe_llm::AnthropicClient;
use accesspipe_pipeline::{AccessibilityPipeline, PersonaPaths, PipelineOptions};
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Process-wide read-only state shared by every request.
pub struct AppState {
    pub config: Config,
    pub factory: AgentFactory,
    pub personas: PersonaPaths,
}

pub async fn start_server(config: Config, port: u16) -> anyhow::Result<()> {
    let client = Arc::new(AnthropicClient::new(&config.api_key, config.timeout_secs));
    let factory = AgentFactory::new(client);
    let personas = PersonaPaths {
        analysis: config.analysis_persona_path(),
        summary: config.summary_persona_path(),
    };

    // Personas are read per run, but a missing resource should surface
    // at startup rather than on the first upload.
    for path in [&personas.analysis, &personas.summary] {
        if !path.is_file() {
            anyhow::bail!("persona resource missing: {}", path.display());
        }
    }

    let state = Arc::new(AppState {
        config,
        factory,
        personas,
    });

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/upload", post(upload_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let bind_addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("accesspipe gateway v{} listening on {}", env!("CARGO_PKG_VERSION"), bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index_handler() -> &'static str {
    "accesspipe gateway is running"
}

async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.config.model,
    }))
}

/// Accept one uploaded HTML file, run the pipeline over it, and reply
/// with the full result contract.
async fn upload_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Response {
    let mut upload: Option<(String, Vec<u8>)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({ "error": format!("bad multipart body: {e}") })),
                )
                    .into_response();
            }
        };

        if field.name() == Some("file") {
            let filename = sanitize_filename(field.file_name().unwrap_or("upload.html"));
            match field.bytes().await {
                Ok(bytes) => upload = Some((filename, bytes.to_vec())),
                Err(e) => {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(serde_json::json!({ "error": format!("upload read failed: {e}") })),
                    )
                        .into_response();
                }
            }
        }
    }

    let Some((filename, bytes)) = upload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "missing 'file' field" })),
        )
            .into_response();
    };

    let path = state.config.uploads_dir.join(&filename);
    if let Err(e) = tokio::fs::create_dir_all(&state.config.uploads_dir).await {
        return error_response(Error::Io(e));
    }
    if let Err(e) = tokio::fs::write(&path, &bytes).await {
        return error_response(Error::Io(e));
    }

    info!(file = %filename, bytes = bytes.len(), "upload received");

    // Fresh run per request: fresh agents, fresh memory, no shared
    // mutable state between requests.
    let options = PipelineOptions {
        persist_artifacts: true,
        return_original: true,
    };
    let mut pipeline = AccessibilityPipeline::new(options);
    match pipeline
        .run(
            &state.factory,
            &state.personas,
            &state.config.model,
            &path,
            &state.config.output_dir,
        )
        .await
    {
        Ok(output) => {
            info!(file = %filename, "pipeline run complete");
            Json(output).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: Error) -> Response {
    let status = match &err {
        Error::ModelTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        Error::ModelRequest(_) => StatusCode::BAD_GATEWAY,
        Error::MalformedResponse(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Error::Encoding(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error!(error = %err, "request failed");
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

/// Strip path components and anything hostile from an uploaded
/// filename before it touches the filesystem.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        "upload.html".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::sanitize_filename;

    #[test]
    fn keeps_plain_names() {
        assert_eq!(sanitize_filename("page.html"), "page.html");
        assert_eq!(sanitize_filename("my-page_2.html"), "my-page_2.html");
    }

    #[test]
    fn strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("..\\..\\boot.ini"), "boot.ini");
        assert_eq!(sanitize_filename("/absolute/path.html"), "path.html");
    }

    #[test]
    fn replaces_hostile_characters() {
        assert_eq!(sanitize_filename("my page!.html"), "my_page_.html");
        assert_eq!(sanitize_filename("a;b&c.html"), "a_b_c.html");
    }

    #[test]
    fn never_returns_an_empty_or_hidden_name() {
        assert_eq!(sanitize_filename(""), "upload.html");
        assert_eq!(sanitize_filename("...."), "upload.html");
        assert_eq!(sanitize_filename(".hidden"), "hidden");
    }
}
