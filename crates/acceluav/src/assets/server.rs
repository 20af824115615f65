//! The static asset HTTP server.

use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Path as AxumPath, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use super::range::RangeRequest;
use super::urls::AssetKind;
use crate::config::Config;
use crate::error::{Error, Result};

const MODEL_CONTENT_TYPE: &str = "model/gltf-binary";
const VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// Read size for streamed video bodies.
const STREAM_CHUNK_SIZE: usize = 64 * 1024;

/// Settings for [`router`] and [`serve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetServerConfig {
    /// Root holding `3d-model/`, `images/` and the videos.
    pub public_dir: PathBuf,
    /// Lifetime sent in `Cache-Control`.
    pub cache_max_age: Duration,
}

impl From<&Config> for AssetServerConfig {
    fn from(config: &Config) -> Self {
        Self {
            public_dir: config.server.public_dir.clone(),
            cache_max_age: config.cache_max_age(),
        }
    }
}

#[derive(Debug)]
struct AssetState {
    public_dir: PathBuf,
    cache_control: HeaderValue,
}

impl AssetState {
    fn root(&self, kind: AssetKind) -> PathBuf {
        match kind.subdir() {
            Some(dir) => self.public_dir.join(dir),
            None => self.public_dir.clone(),
        }
    }

    fn headers(&self, content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CACHE_CONTROL, self.cache_control.clone());
        if let Ok(value) = HeaderValue::from_str(content_type) {
            headers.insert(header::CONTENT_TYPE, value);
        }
        headers
    }
}

/// Why an asset request was not served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Denied,
    NotFound(AssetKind),
    Unreadable,
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        match self {
            Self::Denied => error_response(StatusCode::FORBIDDEN, "Access denied"),
            Self::NotFound(kind) => {
                error_response(StatusCode::NOT_FOUND, kind.not_found_message())
            }
            Self::Unreadable => {
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read asset")
            }
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Build the asset router.
///
/// Routes:
/// - `GET /api/models/:name` serves `<public>/3d-model/<name>`
/// - `GET /api/images/:name` serves `<public>/images/<name>`
/// - `GET /api/videos/:name` serves `<public>/<name>` with range support
/// - `GET /api/health`
pub fn router(config: AssetServerConfig) -> Router {
    let cache_control = format!(
        "public, max-age={}, immutable",
        config.cache_max_age.as_secs()
    );
    let state = Arc::new(AssetState {
        public_dir: config.public_dir,
        cache_control: HeaderValue::from_str(&cache_control)
            .unwrap_or_else(|_| HeaderValue::from_static("public, immutable")),
    });

    Router::new()
        .route("/api/models/:name", get(model_handler))
        .route("/api/images/:name", get(image_handler))
        .route("/api/videos/:name", get(video_handler))
        .route("/api/health", get(health_handler))
        .layer(middleware::map_response(allow_any_origin))
        .with_state(state)
}

async fn allow_any_origin(mut response: Response) -> Response {
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "AccelUAV backend is running",
    }))
}

async fn model_handler(
    State(state): State<Arc<AssetState>>,
    AxumPath(name): AxumPath<String>,
) -> Response {
    match read_whole(&state, AssetKind::Models, &name).await {
        Ok(bytes) => (state.headers(MODEL_CONTENT_TYPE), bytes).into_response(),
        Err(rejection) => rejection.into_response(),
    }
}

async fn image_handler(
    State(state): State<Arc<AssetState>>,
    AxumPath(name): AxumPath<String>,
) -> Response {
    match read_whole(&state, AssetKind::Images, &name).await {
        Ok(bytes) => (state.headers(image_content_type(&name)), bytes).into_response(),
        Err(rejection) => rejection.into_response(),
    }
}

async fn video_handler(
    State(state): State<Arc<AssetState>>,
    AxumPath(name): AxumPath<String>,
    request_headers: HeaderMap,
) -> Response {
    let path = match locate(&state, AssetKind::Videos, &name).await {
        Ok(path) => path,
        Err(rejection) => return rejection.into_response(),
    };
    let size = match tokio::fs::metadata(&path).await {
        Ok(meta) => meta.len(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to stat video");
            return Rejection::Unreadable.into_response();
        }
    };

    let range_header = request_headers
        .get(header::RANGE)
        .and_then(|value| value.to_str().ok());

    let mut headers = state.headers(VIDEO_CONTENT_TYPE);
    headers.insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));

    match RangeRequest::parse(range_header, size) {
        RangeRequest::Full => match open_video(&path, 0).await {
            Ok(file) => {
                debug!(name = name.as_str(), size, "Serving video");
                headers.insert(header::CONTENT_LENGTH, HeaderValue::from(size));
                (headers, stream_body(file, size)).into_response()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to open video");
                Rejection::Unreadable.into_response()
            }
        },
        RangeRequest::Partial(range) => match open_video(&path, range.start).await {
            Ok(file) => {
                debug!(
                    name = name.as_str(),
                    start = range.start,
                    end = range.end,
                    size,
                    "Serving video range"
                );
                if let Ok(value) = HeaderValue::from_str(&range.content_range(size)) {
                    headers.insert(header::CONTENT_RANGE, value);
                }
                headers.insert(header::CONTENT_LENGTH, HeaderValue::from(range.len()));
                (StatusCode::PARTIAL_CONTENT, headers, stream_body(file, range.len()))
                    .into_response()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to open video range");
                Rejection::Unreadable.into_response()
            }
        },
        RangeRequest::Unsatisfiable => {
            warn!(name = name.as_str(), range = ?range_header, size, "Unsatisfiable range");
            if let Ok(value) = HeaderValue::from_str(&format!("bytes */{size}")) {
                headers.insert(header::CONTENT_RANGE, value);
            }
            (StatusCode::RANGE_NOT_SATISFIABLE, headers).into_response()
        }
    }
}

/// Whether `name` is a single plain file name.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && !name.contains("..")
}

/// Resolve `name` under the root for `kind`.
///
/// Rejects names that could leave the root, including through symlinks.
async fn locate(
    state: &AssetState,
    kind: AssetKind,
    name: &str,
) -> std::result::Result<PathBuf, Rejection> {
    if !is_plain_name(name) {
        warn!(%kind, name, "Rejected asset path");
        return Err(Rejection::Denied);
    }

    let root = state.root(kind);
    let path = root.join(name);
    let is_file = tokio::fs::metadata(&path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false);
    if !is_file {
        debug!(%kind, name, "Asset not found");
        return Err(Rejection::NotFound(kind));
    }

    if !stays_within(&root, &path).await {
        warn!(%kind, name, "Asset resolves outside its root");
        return Err(Rejection::Denied);
    }
    Ok(path)
}

async fn stays_within(root: &Path, path: &Path) -> bool {
    match (
        tokio::fs::canonicalize(root).await,
        tokio::fs::canonicalize(path).await,
    ) {
        (Ok(root), Ok(path)) => path.starts_with(root),
        _ => false,
    }
}

async fn read_whole(
    state: &AssetState,
    kind: AssetKind,
    name: &str,
) -> std::result::Result<Vec<u8>, Rejection> {
    let path = locate(state, kind, name).await?;
    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            debug!(%kind, name, size = bytes.len(), "Serving asset");
            Ok(bytes)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read asset");
            Err(Rejection::Unreadable)
        }
    }
}

async fn open_video(path: &Path, start: u64) -> std::io::Result<File> {
    let mut file = File::open(path).await?;
    if start > 0 {
        file.seek(SeekFrom::Start(start)).await?;
    }
    Ok(file)
}

/// Body streaming `len` bytes from the current position of `file`.
fn stream_body(file: File, len: u64) -> Body {
    let stream = async_stream::stream! {
        let mut reader = file.take(len);
        let mut buf = vec![0u8; STREAM_CHUNK_SIZE];
        loop {
            match reader.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => yield Ok::<Vec<u8>, std::io::Error>(buf[..n].to_vec()),
                Err(e) => {
                    warn!(error = %e, "Video stream interrupted");
                    yield Err(e);
                    break;
                }
            }
        }
    };
    Body::from_stream(stream)
}

/// Content type for an image, by extension.
fn image_content_type(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

/// Resolves when the process receives Ctrl-C.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down"),
        Err(e) => {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// Bind `addr` and serve assets until Ctrl-C.
///
/// # Errors
///
/// Returns [`Error::Bind`] if the address cannot be bound, or
/// [`Error::Server`] if the server fails while running.
pub async fn serve(config: AssetServerConfig, addr: &str) -> Result<()> {
    if !config.public_dir.is_dir() {
        warn!(public_dir = %config.public_dir.display(), "Public directory does not exist");
    }

    let listener = TcpListener::bind(addr).await.map_err(|source| Error::Bind {
        addr: addr.to_string(),
        source,
    })?;
    let local_addr = listener.local_addr()?;
    info!(
        addr = %local_addr,
        public_dir = %config.public_dir.display(),
        "AccelUAV asset server running"
    );

    axum::serve(listener, router(config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::server(e.to_string()))?;

    info!("Asset server stopped");
    Ok(())
}
