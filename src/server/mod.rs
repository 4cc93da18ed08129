//! Preview server
//!
//! The generated site is a single page, so the server has one dynamic route:
//! `index.html`, which gets the reload client appended while watching.
//! Everything else under `public/` (stylesheet, page script, images) is
//! served from disk as-is.

use anyhow::Result;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::commands::build;
use crate::Site;

const RELOAD_CLIENT: &str = include_str!("reload.js");
const RELOAD_CLIENT_PATH: &str = "/__postdeck/reload.js";
const RELOAD_EVENTS_PATH: &str = "/__postdeck/events";

/// What the server hands out
struct Preview {
    public_dir: PathBuf,
    /// Finished rebuilds, by generation; `None` in static mode
    rebuilds: Option<broadcast::Sender<u64>>,
}

impl Preview {
    fn new(public_dir: PathBuf, live_reload: bool) -> Self {
        let rebuilds = live_reload.then(|| broadcast::channel(16).0);
        Self {
            public_dir,
            rebuilds,
        }
    }
}

/// Serve `public/`, rebuilding and reloading browsers on change when `watch`
pub async fn start(site: &Site, ip: &str, port: u16, watch: bool, open: bool) -> Result<()> {
    let preview = Arc::new(Preview::new(site.public_dir.clone(), watch));

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    if let Some(rebuilds) = preview.rebuilds.clone() {
        let site = site.clone();
        tokio::spawn(async move {
            let announce = move |generation| {
                let _ = rebuilds.send(generation);
            };
            if let Err(e) = build::watch_with(&site, announce).await {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let url = format!("http://{}:{}", ip, port);
    println!("Serving {:?} at {}", site.public_dir, url);
    if watch {
        println!("Rebuilding on changes; open pages reload themselves.");
    }
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    axum::serve(listener, router(preview)).await?;
    Ok(())
}

fn router(preview: Arc<Preview>) -> Router {
    let mut app = Router::new()
        .route("/", get(page))
        .route("/index.html", get(page));
    if preview.rebuilds.is_some() {
        app = app
            .route(RELOAD_CLIENT_PATH, get(reload_client))
            .route(RELOAD_EVENTS_PATH, get(reload_events));
    }

    app.fallback_service(ServeDir::new(&preview.public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(preview)
}

async fn page(State(preview): State<Arc<Preview>>) -> Response {
    let path = preview.public_dir.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(html) if preview.rebuilds.is_some() => Html(with_reload_client(&html)).into_response(),
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::warn!("Cannot read {:?}: {}", path, e);
            (StatusCode::NOT_FOUND, "Site not built yet").into_response()
        }
    }
}

async fn reload_client() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript")], RELOAD_CLIENT)
}

async fn reload_events(ws: WebSocketUpgrade, State(preview): State<Arc<Preview>>) -> Response {
    match &preview.rebuilds {
        Some(rebuilds) => {
            let rebuilds = rebuilds.subscribe();
            ws.on_upgrade(move |socket| push_rebuilds(socket, rebuilds))
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Forward rebuild generations to one browser until either side goes away
async fn push_rebuilds(mut socket: WebSocket, mut rebuilds: broadcast::Receiver<u64>) {
    tracing::debug!("Reload client connected");

    loop {
        tokio::select! {
            rebuilt = rebuilds.recv() => match rebuilt {
                Ok(generation) => {
                    if socket.send(Message::Text(generation.to_string())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    tracing::debug!("Reload client disconnected");
}

/// Append the reload client just before the last `</body>`
fn with_reload_client(html: &str) -> String {
    let tag = format!(r#"<script src="{}"></script>"#, RELOAD_CLIENT_PATH);
    match html.rfind("</body>") {
        Some(at) => format!("{}{}\n{}", &html[..at], tag, &html[at..]),
        None => format!("{}\n{}", html, tag),
    }
}

fn open_browser(url: &str) -> std::io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        std::process::Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut command = std::process::Command::new("cmd");
        command.args(["/c", "start"]);
        command
    } else {
        std::process::Command::new("xdg-open")
    };
    command.arg(url).spawn().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    const PAGE: &str = "<html><body><main id=\"post-list\"></main></body></html>";

    fn public_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("css")).unwrap();
        fs::write(dir.path().join("index.html"), PAGE).unwrap();
        fs::write(dir.path().join("css/style.css"), "body { margin: 0; }").unwrap();
        dir
    }

    /// Serve `public` on an ephemeral port and fetch `path` over plain HTTP/1.1
    async fn fetch(public: &std::path::Path, live_reload: bool, path: &str) -> String {
        let preview = Arc::new(Preview::new(public.to_path_buf(), live_reload));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router(preview)).await.unwrap() });

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let request = format!(
            "GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
            path
        );
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_page_gets_reload_client_while_watching() {
        let public = public_dir();
        for path in ["/", "/index.html"] {
            let response = fetch(public.path(), true, path).await;
            assert!(response.starts_with("HTTP/1.1 200"), "{}", response);
            assert!(response.contains(r#"<script src="/__postdeck/reload.js"></script>"#));
            assert!(response.contains("</script>\n</body></html>"));
        }

        let client = fetch(public.path(), true, RELOAD_CLIENT_PATH).await;
        assert!(client.contains("text/javascript"));
        assert!(client.contains("/__postdeck/events"));
    }

    #[tokio::test]
    async fn test_assets_pass_through_untouched() {
        let public = public_dir();
        let response = fetch(public.path(), true, "/css/style.css").await;
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with("body { margin: 0; }"));
        assert!(!response.contains("reload.js"));

        let missing = fetch(public.path(), true, "/images/none.jpg").await;
        assert!(missing.starts_with("HTTP/1.1 404"));
    }

    #[tokio::test]
    async fn test_static_mode_serves_page_as_built() {
        let public = public_dir();
        let response = fetch(public.path(), false, "/").await;
        assert!(response.ends_with(PAGE));
        assert!(!response.contains("reload.js"));

        let client = fetch(public.path(), false, RELOAD_CLIENT_PATH).await;
        assert!(client.starts_with("HTTP/1.1 404"));
    }

    #[tokio::test]
    async fn test_unbuilt_site_is_not_found() {
        let empty = tempfile::tempdir().unwrap();
        let response = fetch(empty.path(), true, "/").await;
        assert!(response.starts_with("HTTP/1.1 404"));
    }

    #[test]
    fn test_reload_client_without_body_tag() {
        let html = with_reload_client("<p>fragment</p>");
        assert_eq!(
            html,
            "<p>fragment</p>\n<script src=\"/__postdeck/reload.js\"></script>"
        );
    }
}
