//! Server configuration

use std::path::PathBuf;

use anyhow::Result;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Root directory for all persisted state
    pub data_dir: PathBuf,
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Session time-to-live in seconds
    pub session_ttl_seconds: i64,
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `NOTEFOREST_DATA_DIR`: Root directory for persisted state (default: "./data")
    /// - `NOTEFOREST_BIND`: Listen address (default: "0.0.0.0:3001")
    /// - `NOTEFOREST_SESSION_TTL_SECONDS`: Session time-to-live in seconds (default: 86400)
    pub fn from_env() -> Result<Self> {
        let data_dir = std::env::var("NOTEFOREST_DATA_DIR").unwrap_or_else(|_| "./data".to_string());

        let bind_addr = std::env::var("NOTEFOREST_BIND").unwrap_or_else(|_| "0.0.0.0:3001".to_string());

        let session_ttl_seconds = std::env::var("NOTEFOREST_SESSION_TTL_SECONDS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .unwrap_or(86400);

        Ok(ServerConfig {
            data_dir: PathBuf::from(data_dir),
            bind_addr,
            session_ttl_seconds,
        })
    }

    /// Directory holding the note files
    pub fn notes_dir(&self) -> PathBuf {
        self.data_dir.join("notes")
    }

    /// Directory holding the credential and session files
    pub fn auth_dir(&self) -> PathBuf {
        self.data_dir.join("auth")
    }

    /// Path of the password hash file
    pub fn password_file(&self) -> PathBuf {
        self.auth_dir().join("password.hash")
    }

    /// Path of the session table file
    pub fn session_file(&self) -> PathBuf {
        self.auth_dir().join("sessions.json")
    }
}
