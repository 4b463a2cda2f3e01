//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validate a note identifier
///
/// Note ids double as filenames, so only strings matching the UUID v1-v5
/// pattern are accepted.
pub fn validate_note_id(id: &str) -> Result<(), String> {
    if id.is_empty() {
        return Err("Note id is required".to_string());
    }

    static UUID_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = UUID_REGEX.get_or_init(|| {
        Regex::new(
            r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[1-5][0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}$",
        )
        .expect("Failed to compile uuid regex")
    });

    if !regex.is_match(id) {
        return Err("Note id must be a valid UUID".to_string());
    }

    Ok(())
}

/// Validate the shared password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        ));
    }

    Ok(())
}
