//! Request and response payloads for the NoteForest server

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use common::frontmatter::lenient_datetime;

pub mod note;

use note::{Note, NoteSummary};

/// Request carrying the shared password (setup and login)
#[derive(Deserialize)]
pub struct PasswordRequest {
    #[serde(default)]
    pub password: String,
}

/// Request for note creation or replacement
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteNoteRequest {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default, deserialize_with = "lenient_datetime::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Response for the password status endpoint
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub password_set: bool,
}

/// Response for the note listing endpoint
#[derive(Serialize)]
pub struct ListNotesResponse {
    pub success: bool,
    pub data: Vec<NoteSummary>,
    pub count: usize,
}

/// Response for the note read endpoint
#[derive(Serialize)]
pub struct NoteResponse {
    pub success: bool,
    pub data: Note,
}

/// Response for the note write endpoint
#[derive(Serialize)]
pub struct WriteNoteResponse {
    pub success: bool,
    pub uuid: String,
}

/// Response for the note delete endpoint
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteNoteResponse {
    pub success: bool,
    pub deleted_uuid: String,
}

/// Coerce anything that is not an array of strings to an empty tag list
fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
