//! Markdown front-matter codec
//!
//! Notes are stored as markdown files with a YAML metadata block between
//! `---` delimiter lines, followed by the free-form body.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::FrontMatterError;

/// Split a markdown document into its YAML front-matter and body
pub fn parse<T: DeserializeOwned>(content: &str) -> Result<(T, String), FrontMatterError> {
    let Some(rest) = content.strip_prefix("---\n") else {
        return Err(FrontMatterError::MissingOpeningDelimiter);
    };
    let Some(split_at) = rest.find("\n---\n") else {
        return Err(FrontMatterError::MissingClosingDelimiter);
    };
    let metadata = serde_yaml::from_str(&rest[..split_at])?;
    let body = rest[(split_at + 5)..].to_string();

    Ok((metadata, body))
}

/// Render metadata and a body back into a markdown document
pub fn render<T: Serialize>(metadata: &T, body: &str) -> Result<String, FrontMatterError> {
    let metadata_yaml = serde_yaml::to_string(metadata)?;
    Ok(format!("---\n{}---\n\n{}\n", metadata_yaml, body))
}

/// Lenient timestamp deserialization for front-matter fields
///
/// Hand-edited note files may carry timestamps in unexpected shapes; a value
/// that does not parse as RFC 3339 is treated as absent instead of failing
/// the whole document.
pub mod lenient_datetime {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.and_then(|value| {
            DateTime::parse_from_rfc3339(&value)
                .ok()
                .map(|parsed| parsed.with_timezone(&Utc))
        }))
    }
}
