use super::{PAGE_TOML, api, load_page, page_toml_path};
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::State,
    response::{
        Html, IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::get,
};
use notify::{Event as NotifyEvent, EventKind, RecursiveMode, Watcher};
use page_kit_core::parse_page_toml;
use page_kit_generator::{Registry, RenderOptions, html_escape, render_page};
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};
use tokio::sync::{Mutex, broadcast, broadcast::error::RecvError};
use tower_http::{services::ServeDir, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub page_dir: PathBuf,
    pub registry: Arc<Registry>,
    pub reload_tx: broadcast::Sender<()>,
    /// Serialises load-modify-save of page.toml
    pub edit_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(page_dir: PathBuf, registry: Registry) -> Self {
        let (reload_tx, _) = broadcast::channel::<()>(100);
        Self {
            page_dir,
            registry: Arc::new(registry),
            reload_tx,
            edit_lock: Arc::new(Mutex::new(())),
        }
    }
}

/// Routes served by the preview server
pub fn app(state: AppState) -> Router {
    let assets = ServeDir::new(state.page_dir.join("assets"));
    Router::new()
        .route("/", get(index_handler))
        .route("/_reload", get(sse_handler))
        .nest("/api", api::routes())
        .nest_service("/assets", assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start preview server with hot reload for local development.
///
/// This command:
/// - Validates and loads page.toml
/// - Renders the page on every request
/// - Serves the editing API under /api
/// - Watches for file changes and triggers hot reload
pub async fn run(path: PathBuf, port: u16, registry: Registry) -> Result<()> {
    println!("🧱 Starting preview server...");
    println!("   Page: {}", path.display());

    let page = load_page(&path)?;
    println!("   ✓ Loaded: {}", page.site.title);
    println!("   ✓ Blocks: {}", page.blocks.len());

    let state = AppState::new(path.clone(), registry);

    let watcher_path = path.clone();
    let watcher_tx = state.reload_tx.clone();
    tokio::spawn(async move {
        if let Err(e) = watch_files(watcher_path, watcher_tx).await {
            tracing::error!("File watcher error: {}", e);
        }
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("\n🚀 Preview ready at: http://localhost:{}", port);
    println!("   Editing API at: http://localhost:{}/api", port);
    println!("   Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to port")?;

    axum::serve(listener, app(state))
        .await
        .context("Server error")?;

    Ok(())
}

/// Quiet period used to fold one save's burst of events into a single reload
const SETTLE: Duration = Duration::from_millis(75);

/// Whether a file event changes what the preview shows.
///
/// Only page.toml and files under assets/ count. Build output written
/// inside the page directory, editor backups and the hidden temporary
/// file used while saving page.toml are ignored.
fn is_page_change(page_dir: &Path, event: &NotifyEvent) -> bool {
    if !matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) {
        return false;
    }

    let page_toml = page_dir.join(PAGE_TOML);
    let assets = page_dir.join("assets");
    event.paths.iter().any(|p| {
        let name = p.file_name().unwrap_or_default().to_string_lossy();
        if name.starts_with('.') || name.ends_with('~') {
            return false;
        }
        *p == page_toml || p.starts_with(&assets)
    })
}

/// Watch page.toml and assets/ and push a reload to open preview tabs
async fn watch_files(path: PathBuf, reload_tx: broadcast::Sender<()>) -> Result<()> {
    // notify reports absolute paths
    let page_dir = path.canonicalize().unwrap_or(path);
    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut watcher =
        notify::recommended_watcher(move |res: std::result::Result<NotifyEvent, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.blocking_send(event);
            }
        })?;

    watcher.watch(&page_dir, RecursiveMode::Recursive)?;
    tracing::debug!(dir = %page_dir.display(), "watching page directory");

    while let Some(event) = rx.recv().await {
        if !is_page_change(&page_dir, &event) {
            continue;
        }

        tokio::time::sleep(SETTLE).await;
        while rx.try_recv().is_ok() {}

        println!("   📝 Page changed, reloading...");
        let _ = reload_tx.send(());
    }

    Ok(())
}

/// SSE endpoint the preview page listens on for reloads
async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl futures::Stream<Item = std::result::Result<Event, std::convert::Infallible>>> {
    let mut rx = state.reload_tx.subscribe();

    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                // Missed reloads still mean the page is stale
                Ok(()) | Err(RecvError::Lagged(_)) => {
                    yield Ok(Event::default().data("reload"));
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Main page handler
async fn index_handler(State(state): State<AppState>) -> Response {
    let page = match parse_page_toml(page_toml_path(&state.page_dir)) {
        Ok(page) => page,
        Err(e) => {
            return Html(format!(
                r#"<!DOCTYPE html>
<html><head><title>Error</title></head><body>
<h1>Configuration Error</h1>
<pre>{}</pre>
</body></html>"#,
                html_escape(&e.to_string())
            ))
            .into_response();
        }
    };

    Html(render_page(
        &page,
        &state.registry,
        RenderOptions { preview: true },
    ))
    .into_response()
}
