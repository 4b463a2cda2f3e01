//! File-backed note store
//!
//! Each note is one markdown file named `<uuid>.md` inside the notes
//! directory: YAML front-matter (title, tags, timestamps) followed by the
//! markdown body. Every operation is an independent read or write of that
//! one file; `list` re-scans the whole directory on each call.

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::warn;

use common::error::{StorageError, StorageResult};
use common::frontmatter;

use crate::models::note::{Note, NoteFrontMatter, NoteSummary};
use crate::validation::validate_note_id;

/// File-backed note store
#[derive(Clone)]
pub struct NoteStore {
    dir: PathBuf,
}

impl NoteStore {
    /// Create a new note store rooted at the given directory
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn note_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.md", id))
    }

    /// List summaries of every parseable note, newest first
    ///
    /// Files whose name is not a UUID or whose front-matter does not parse
    /// are skipped, never fatal to the whole call. Notes without a usable
    /// `updatedAt` sort after dated ones.
    pub async fn list(&self) -> StorageResult<Vec<NoteSummary>> {
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        let mut summaries = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if validate_note_id(stem).is_err() {
                warn!("Skipping non-note file {}", path.display());
                continue;
            }

            let content = match tokio::fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) => {
                    warn!("Skipping unreadable note {}: {}", path.display(), e);
                    continue;
                }
            };
            let (meta, _body): (NoteFrontMatter, String) = match frontmatter::parse(&content) {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!("Skipping malformed note {}: {}", path.display(), e);
                    continue;
                }
            };

            summaries.push(NoteSummary {
                uuid: stem.to_string(),
                title: meta.title,
                tags: meta.tags,
                created_at: meta.created_at,
                updated_at: meta.updated_at,
            });
        }

        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }

    /// Read a full note by id
    pub async fn read(&self, id: &str) -> StorageResult<Note> {
        validate_note_id(id).map_err(|_| StorageError::InvalidId(id.to_string()))?;

        let path = self.note_path(id);
        if !tokio::fs::try_exists(&path).await? {
            return Err(StorageError::NotFound(id.to_string()));
        }

        let content = tokio::fs::read_to_string(&path).await?;
        let (meta, body): (NoteFrontMatter, String) = frontmatter::parse(&content)?;

        Ok(Note {
            uuid: id.to_string(),
            title: meta.title,
            tags: meta.tags,
            created_at: meta.created_at,
            updated_at: meta.updated_at,
            body: body.trim().to_string(),
        })
    }

    /// Create or fully replace a note
    ///
    /// `updatedAt` is always the current time. The creation time from the
    /// prior file revision wins over a caller-supplied value; the caller
    /// value only applies when no prior revision exists.
    pub async fn write(
        &self,
        id: &str,
        title: &str,
        tags: Vec<String>,
        body: &str,
        created_at: Option<DateTime<Utc>>,
    ) -> StorageResult<()> {
        if id.trim().is_empty() {
            return Err(StorageError::MissingField("uuid"));
        }
        validate_note_id(id).map_err(|_| StorageError::InvalidId(id.to_string()))?;
        if title.trim().is_empty() {
            return Err(StorageError::MissingField("title"));
        }
        if body.trim().is_empty() {
            return Err(StorageError::MissingField("body"));
        }

        let now = Utc::now();
        let existing_created_at = match tokio::fs::read_to_string(self.note_path(id)).await {
            Ok(content) => frontmatter::parse::<NoteFrontMatter>(&content)
                .ok()
                .and_then(|(meta, _)| meta.created_at),
            Err(_) => None,
        };

        let meta = NoteFrontMatter {
            title: title.to_string(),
            tags,
            created_at: Some(existing_created_at.or(created_at).unwrap_or(now)),
            updated_at: Some(now),
        };

        let rendered = frontmatter::render(&meta, body.trim())?;
        tokio::fs::write(self.note_path(id), rendered).await?;
        Ok(())
    }

    /// Delete a note by id
    pub async fn delete(&self, id: &str) -> StorageResult<()> {
        validate_note_id(id).map_err(|_| StorageError::InvalidId(id.to_string()))?;

        let path = self.note_path(id);
        if !tokio::fs::try_exists(&path).await? {
            return Err(StorageError::NotFound(id.to_string()));
        }

        tokio::fs::remove_file(&path).await?;
        Ok(())
    }
}
