//! Input validation and sanitization utilities
//!
//! Validates user input before it reaches the API client: server URLs and
//! the file path list for render requests.

use crate::error::CliError;

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments("URL cannot be empty".to_string()).into());
    }

    // Basic URL validation - must start with http:// or https://
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        ))
        .into());
    }

    Ok(())
}

/// Validate the file path list for a render request.
///
/// Newlines are rejected because the wire format delimits paths with them.
pub fn validate_filepaths(filepaths: &[String]) -> crate::Result<()> {
    if filepaths.is_empty() {
        return Err(CliError::MissingInput {
            what: "at least one file path".to_string(),
        }
        .into());
    }

    for path in filepaths {
        if path.trim().is_empty() {
            return Err(
                CliError::InvalidArguments("File paths cannot be empty".to_string()).into(),
            );
        }
        if path.contains('\n') {
            return Err(CliError::InvalidArguments(format!(
                "File path '{}' must not contain newlines",
                path.escape_default()
            ))
            .into());
        }
    }

    Ok(())
}
