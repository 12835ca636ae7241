//! # NEP LOCAL HOUSE
//!
//! Backend for the ordering page.
//!
//!
//!
//! # General Infrastructure
//! - Page opens a session, the session loads the menu in the background
//! - Every button on the page maps to one route below, each returns the new session state
//! - Pages left idle for `SESSION_TTL_SECS` are dropped along with their menu fetch
//! - `/api/menu-debug` is a raw proxy to microCMS so the key never reaches the browser
//!
//!
//!
//! # Routes
//!
//! | Method | Path | Action |
//! |---|---|---|
//! | GET | `/api/menu-debug` | proxy the CMS menu |
//! | POST | `/api/sessions` | open a page |
//! | GET, DELETE | `/api/sessions/{id}` | observe / close a page |
//! | GET | `/api/sessions/{id}/menu` | menu, `loading` until the fetch finishes |
//! | POST, DELETE | `/api/sessions/{id}/cart` | add `{"itemId","qty"}` / clear |
//! | DELETE | `/api/sessions/{id}/cart/{item_id}` | take one off |
//! | POST | `/api/sessions/{id}/checkout` | open the modal |
//! | POST | `/api/sessions/{id}/checkout/confirm` | order, clears the cart |
//! | POST | `/api/sessions/{id}/checkout/close` | close the modal |
//!
//!
//!
//! # Setup
//!
//! ```sh
//! MICROCMS_API_KEY=... MICROCMS_SERVICE_DOMAIN=... RUST_LOG=info cargo run -p nephouse
//! ```
//!
//! Built-in menu, no CMS.
//! ```sh
//! MENU_SOURCE=static cargo run -p nephouse
//! ```
use std::{sync::Arc, time::Duration};

use anyhow::{Context, Error};
use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{delete, get, post},
};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal::ctrl_c, time::interval};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod proxy;
pub mod routes;
pub mod sessions;
pub mod state;
pub mod utils;
pub mod views;

use config::Config;
use proxy::menu_debug_handler;
use routes::{
    add_item_handler, clear_cart_handler, close_checkout_handler, confirm_checkout_handler,
    create_session_handler, delete_session_handler, menu_handler, open_checkout_handler,
    remove_item_handler, session_handler,
};
use state::AppState;

pub async fn start_server() -> Result<(), Error> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;
    let address = format!("0.0.0.0:{}", config.port);

    info!("Initializing state...");
    let state = AppState::new(config);
    tokio::spawn(sweep_sessions(Arc::clone(&state)));

    info!("Starting server...");
    let app = router(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/menu-debug", get(menu_debug_handler))
        .route("/api/sessions", post(create_session_handler))
        .route(
            "/api/sessions/{id}",
            get(session_handler).delete(delete_session_handler),
        )
        .route("/api/sessions/{id}/menu", get(menu_handler))
        .route(
            "/api/sessions/{id}/cart",
            post(add_item_handler).delete(clear_cart_handler),
        )
        .route("/api/sessions/{id}/cart/{item_id}", delete(remove_item_handler))
        .route("/api/sessions/{id}/checkout", post(open_checkout_handler))
        .route(
            "/api/sessions/{id}/checkout/confirm",
            post(confirm_checkout_handler),
        )
        .route(
            "/api/sessions/{id}/checkout/close",
            post(close_checkout_handler),
        )
        .layer(cors)
        .with_state(state)
}

/// Drops idle pages even when nobody opens new ones.
async fn sweep_sessions(state: Arc<AppState>) {
    let period = state
        .sessions
        .ttl()
        .clamp(Duration::from_secs(1), Duration::from_secs(60));
    let mut ticker = interval(period);

    loop {
        ticker.tick().await;
        state.sessions.sweep().await;
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
