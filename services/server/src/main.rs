use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod config;
mod credentials;
mod error;
mod middleware;
mod models;
mod routes;
mod sessions;
mod state;
mod store;
mod validation;

use tokio::net::TcpListener;

use crate::{
    config::ServerConfig, credentials::CredentialStore, sessions::SessionStore, state::AppState,
    store::NoteStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting NoteForest server");

    let config = ServerConfig::from_env()?;
    tokio::fs::create_dir_all(config.notes_dir()).await?;
    tokio::fs::create_dir_all(config.auth_dir()).await?;

    let credentials = CredentialStore::new(config.password_file());
    let sessions = SessionStore::load(config.session_file(), config.session_ttl_seconds).await;
    let notes = NoteStore::new(config.notes_dir());

    if credentials.is_configured() {
        info!("Credential present, setup disabled");
    } else {
        info!("No credential yet, awaiting first-time setup");
    }

    let app_state = AppState {
        credentials,
        sessions,
        notes,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("NoteForest server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
