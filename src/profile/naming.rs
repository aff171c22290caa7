//! Display name validation.

use crate::core::constants::MAX_DISPLAY_NAME_LENGTH;

/// Checks a player-chosen display name and returns it trimmed.
pub fn validate_display_name(name: &str) -> Result<String, String> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err("Name cannot be empty".to_string());
    }

    if trimmed.chars().count() > MAX_DISPLAY_NAME_LENGTH {
        return Err(format!(
            "Name must be {} characters or less",
            MAX_DISPLAY_NAME_LENGTH
        ));
    }

    let valid_chars = trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.'));

    if !valid_chars {
        return Err(
            "Name can only contain letters, numbers, spaces, hyphens, underscores, and periods"
                .to_string(),
        );
    }

    Ok(trimmed.to_string())
}
