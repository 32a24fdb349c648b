use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use safety_alert::{AlertDispatcher, ConsoleGateway, TwilioConfig, TwilioGateway};
use safety_api::AppStateInner;
use safety_db::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "safety=debug,safety_api=debug,safety_alert=debug,safety_db=info,tower_http=debug".into()
            }),
        )
        .init();

    // Config
    let host = std::env::var("SAFETY_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("SAFETY_PORT")
        .unwrap_or_else(|_| "5000".into())
        .parse()?;
    let db_path: PathBuf = std::env::var("SAFETY_DB_PATH")
        .unwrap_or_else(|_| "safety.db".into())
        .into();
    let public_dir: PathBuf = std::env::var("SAFETY_PUBLIC_DIR")
        .unwrap_or_else(|_| "public".into())
        .into();
    let admin_token = std::env::var("SAFETY_ADMIN_TOKEN")
        .ok()
        .filter(|t| !t.is_empty());

    if admin_token.is_none() {
        warn!("SAFETY_ADMIN_TOKEN is unset; /admin/api/data is open to anyone");
    }

    // Init database and SMS gateway
    let db = Database::open(&db_path)?;
    let dispatcher = build_dispatcher()?;

    let state = AppStateInner::new(db, dispatcher, admin_token);

    let admin_dir = public_dir.join("admin");
    let app = Router::new()
        .merge(safety_api::router(state.clone()))
        .route_service("/admin", ServeFile::new(admin_dir.join("admin-login.html")))
        .route_service("/admin/dashboard", ServeFile::new(admin_dir.join("admin-dashboard.html")))
        .route_service("/admin/logout", ServeFile::new(admin_dir.join("admin-logout.html")))
        .fallback_service(ServeDir::new(&public_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Safety server listening on {}", addr);
    info!("Serving static files from {}", public_dir.display());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router and its state clones are gone once serve returns
    match Arc::try_unwrap(state) {
        Ok(inner) => inner.db.close()?,
        Err(_) => warn!("State still shared at shutdown; database closes on drop"),
    }

    Ok(())
}

/// Twilio when fully configured, otherwise log-only delivery.
fn build_dispatcher() -> anyhow::Result<AlertDispatcher> {
    let sid = std::env::var("TWILIO_ACCOUNT_SID").unwrap_or_default();
    let token = std::env::var("TWILIO_AUTH_TOKEN").unwrap_or_default();
    let from = std::env::var("TWILIO_FROM_NUMBER").unwrap_or_default();

    if sid.is_empty() || token.is_empty() || from.is_empty() {
        warn!("Twilio credentials incomplete; SOS alerts will only be logged");
        return Ok(AlertDispatcher::new(ConsoleGateway));
    }

    let api_base = std::env::var("TWILIO_API_BASE")
        .unwrap_or_else(|_| safety_alert::twilio::DEFAULT_API_BASE.into());

    let gateway = TwilioGateway::new(TwilioConfig {
        account_sid: sid,
        auth_token: token,
        from_number: from,
        api_base,
    })?;

    info!("SOS alerts go through Twilio");
    Ok(AlertDispatcher::new(gateway))
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
