//! Development server with live reload

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;

use crate::commands::build::BuildOptions;
use crate::Folio;

/// Quiet period before a burst of file events triggers a rebuild
const DEBOUNCE: Duration = Duration::from_millis(300);

/// Live reload script injected into HTML pages
const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        console.log('Live reload disconnected. Attempting to reconnect...');
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
</body>
"#;

/// Server state
struct ServerState {
    root_dir: PathBuf,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

/// Optimize images and build with drafts, as the dev server does on every change
pub fn rebuild(folio: &Folio) -> Result<()> {
    crate::commands::images::run(folio, false)?;
    crate::commands::build::run(
        folio,
        BuildOptions {
            force: false,
            include_drafts: true,
        },
    )?;
    Ok(())
}

/// Start the development server
pub async fn start(folio: &Folio, ip: &str, port: u16, watch: bool, open: bool) -> Result<()> {
    // Create broadcast channel for live reload notifications
    let (reload_tx, _) = broadcast::channel::<()>(16);

    let state = Arc::new(ServerState {
        root_dir: folio.base_dir.clone(),
        reload_tx: reload_tx.clone(),
        live_reload: watch,
    });

    // Create router with live reload endpoint
    let app = Router::new()
        .route("/__livereload", get(livereload_handler))
        .fallback(fallback_handler)
        .with_state(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    tracing::info!("Server running at {}", url);
    if watch {
        tracing::info!("Live reload enabled. Watching for changes...");
    }
    tracing::info!("Press Ctrl+C to stop.");

    // Open browser if requested
    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    // The watcher blocks on a std channel, so keep it off the async workers
    if watch {
        let folio = folio.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(folio, reload_tx) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Paths whose changes trigger a rebuild
fn watch_targets(folio: &Folio) -> Vec<(PathBuf, RecursiveMode)> {
    let paths = &folio.config.paths;
    let mut targets = vec![
        (folio.content_dir.clone(), RecursiveMode::Recursive),
        (folio.path(&paths.images_src), RecursiveMode::Recursive),
        (folio.template_path.clone(), RecursiveMode::NonRecursive),
    ];
    if let Some(css_dir) = folio.path(&paths.css_src).parent() {
        targets.push((css_dir.to_path_buf(), RecursiveMode::Recursive));
    }
    if let Some(config) = Folio::find_config(&folio.base_dir) {
        targets.push((config, RecursiveMode::NonRecursive));
    }
    targets
}

/// Whether a changed path should trigger a rebuild. Build outputs are
/// ignored so a rebuild does not trigger itself.
fn is_relevant(folio: &Folio, path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    if path_str.contains(".git") || path_str.contains(".DS_Store") || path_str.ends_with('~') {
        return false;
    }
    if path == folio.path(&folio.config.paths.css_min) {
        return false;
    }
    let is_html = path.extension().map(|e| e == "html").unwrap_or(false);
    !(is_html && path != folio.template_path)
}

/// Watch for file changes, rebuild and trigger reload
fn watch_and_reload(folio: Folio, reload_tx: broadcast::Sender<()>) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to avoid multiple rapid rebuilds
    let mut debouncer = new_debouncer(DEBOUNCE, tx)?;

    for (path, mode) in watch_targets(&folio) {
        if path.exists() {
            debouncer.watcher().watch(&path, mode)?;
            tracing::debug!("Watching: {:?}", path);
        }
    }

    // Handle file change events
    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant: Vec<_> = events
                    .iter()
                    .filter(|e| is_relevant(&folio, &e.path))
                    .collect();

                if relevant.is_empty() {
                    continue;
                }

                for event in &relevant {
                    let shown = event.path.strip_prefix(&folio.base_dir).unwrap_or(&event.path);
                    tracing::info!("Changed: {}", shown.display());
                }

                tracing::info!("Rebuilding...");
                let start = std::time::Instant::now();
                match rebuild(&folio) {
                    Ok(()) => {
                        tracing::info!("Built in {}ms", start.elapsed().as_millis());
                        // Notify all connected clients to reload
                        let _ = reload_tx.send(());
                    }
                    Err(e) => {
                        tracing::error!("Build failed: {:#}", e);
                    }
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

/// WebSocket handler for live reload
async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

/// Handle WebSocket connection for live reload
async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            // Wait for reload signal
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            // Handle incoming messages (ping/pong)
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// Fallback handler that serves files and injects live reload script
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let path = request.uri().path();

    // Determine the file path
    let file_path = if path == "/" {
        state.root_dir.join("index.html")
    } else {
        let clean_path = path.trim_start_matches('/');
        if !is_within_root(clean_path) {
            return not_found(&state.root_dir).await;
        }
        let candidate = state.root_dir.join(clean_path);

        // If it's a directory, look for index.html
        if candidate.is_dir() {
            candidate.join("index.html")
        } else if candidate.exists() {
            candidate
        } else {
            // Try adding .html extension
            let with_html = state.root_dir.join(format!("{}.html", clean_path));
            if with_html.exists() {
                with_html
            } else {
                candidate
            }
        }
    };

    // Check if it's an HTML file that needs live reload injection
    let is_html = file_path
        .extension()
        .map(|ext| ext == "html" || ext == "htm")
        .unwrap_or(false)
        || file_path.ends_with("index.html");

    if is_html && state.live_reload {
        // Read and inject live reload script
        match tokio::fs::read_to_string(&file_path).await {
            Ok(content) => {
                let injected = inject_live_reload(&content);
                Html(injected).into_response()
            }
            Err(_) => not_found(&state.root_dir).await,
        }
    } else {
        // Serve static file using tower-http
        let mut service = ServeDir::new(&state.root_dir).append_index_html_on_directories(true);
        match service.try_call(request).await {
            Ok(response) => response.into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
        }
    }
}

/// A request path made only of normal components, so joining it onto the
/// root cannot escape it
fn is_within_root(path: &str) -> bool {
    Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// The site's own 404 page when it has one
async fn not_found(root_dir: &Path) -> Response {
    match tokio::fs::read_to_string(root_dir.join("404.html")).await {
        Ok(content) => (StatusCode::NOT_FOUND, Html(inject_live_reload(&content))).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// Inject live reload script into HTML content
fn inject_live_reload(html: &str) -> String {
    if html.contains("</body>") {
        html.replace("</body>", LIVE_RELOAD_SCRIPT)
    } else {
        // If no </body> tag, append to end
        format!("{}{}", html, LIVE_RELOAD_SCRIPT)
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
