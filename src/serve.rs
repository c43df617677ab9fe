//! Local preview server.
//!
//! Serves the generated output directory as static files. Purely a
//! convenience for inspecting a build: it never re-enters the pipeline, it
//! just keeps serving whatever the last `build` wrote.

use axum::Router;
use std::io;
use std::path::PathBuf;
use tower_http::services::ServeDir;

/// Serve `output_root` over HTTP until interrupted.
pub async fn serve(output_root: PathBuf, host: &str, port: u16) -> io::Result<()> {
    let app = Router::new().fallback_service(ServeDir::new(output_root));
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    axum::serve(listener, app).await
}
