//! HTTP front end
//!
//! An axum [`Router`](axum::Router) serving:
//! - `GET /health`
//! - `GET /api/time?tz=..&format=12|24` (also records the result in history)
//! - `GET /api/list?op=..` (history commands)
//! - `OPTIONS *` (CORS preflight)
//!
//! The history ring is shared behind one mutex; each request holds the lock
//! for a single command and never across an `.await`.

pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, Method};
use axum::Router;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::clock::Clock;
use crate::errors::Result;
use crate::ring::RingList;

/// The process-wide history, shared between connections.
pub type SharedHistory = Arc<Mutex<RingList<Value>>>;

#[derive(Clone)]
pub struct AppState {
    pub history: SharedHistory,
    pub clock: Clock,
}

/// The full application: routes plus CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    routes::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub struct Server {
    listener: TcpListener,
    app: Router,
}

impl Server {
    /// Bind to `addr` (use port 0 for an OS-assigned port).
    pub async fn bind(addr: &str, history: SharedHistory, clock: Clock) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            app: app(AppState { history, clock }),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until `shutdown` flips to `true`, then let in-flight requests
    /// finish.
    pub async fn run(self, shutdown: watch::Receiver<bool>) -> Result<()> {
        if let Ok(addr) = self.listener.local_addr() {
            info!("Listening on http://{}", addr);
        }
        axum::serve(self.listener, self.app)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;
        Ok(())
    }
}

async fn wait_for_shutdown(mut shutdown: watch::Receiver<bool>) {
    loop {
        let requested = *shutdown.borrow_and_update();
        if requested || shutdown.changed().await.is_err() {
            break;
        }
    }
    info!("Shutdown requested, no longer accepting connections");
}
