//! Static file server for `cwb distserver`.

use axum::Router;
use std::future::Future;
use std::io;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::ui;

/// Serve `root` on `host:port` until Ctrl+C.
pub async fn serve(host: &str, port: u16, root: PathBuf) -> io::Result<()> {
    if !root.is_dir() {
        ui::warning(&format!(
            "{} does not exist yet; run `cwb` to build it",
            root.display()
        ));
    }

    let listener = TcpListener::bind((host, port)).await?;
    let addr = listener.local_addr()?;

    tracing::info!(%addr, root = %root.display(), "dist server listening");
    ui::success(&format!("Serving {} at http://{}", root.display(), addr));
    ui::info("Press Ctrl+C to stop");

    serve_dir(listener, root, shutdown_signal()).await
}

/// Serve `root` on an already bound listener until `shutdown` resolves.
pub async fn serve_dir<F>(listener: TcpListener, root: PathBuf, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = Router::new().fallback_service(ServeDir::new(root).append_index_html_on_directories(true));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    ui::info("Shutting down dist server...");
}
