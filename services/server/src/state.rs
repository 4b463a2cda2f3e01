//! Application state shared across handlers

use crate::{credentials::CredentialStore, sessions::SessionStore, store::NoteStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub credentials: CredentialStore,
    pub sessions: SessionStore,
    pub notes: NoteStore,
}
