//! URL slugs for places, games and catalogs.

use crate::error::CoreError;

/// Generate a URL-safe slug from a display name.
///
/// Lowercases, replaces non-alphanumeric characters with hyphens, collapses
/// runs of hyphens, trims them from both ends and truncates to `max_len`.
pub fn generate_slug(name: &str, max_len: usize) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut prev_hyphen = true;
    for c in name.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }
    slug.truncate(max_len);
    slug.trim_end_matches('-').to_string()
}

/// Validate a caller-supplied slug.
pub fn validate_slug(slug: &str, max_len: usize) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if slug.len() > max_len {
        return Err(CoreError::Validation(format!(
            "Slug must be at most {max_len} characters"
        )));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::Validation(
            "Slug must contain only lowercase alphanumeric characters and hyphens".into(),
        ));
    }
    Ok(())
}

/// Use `explicit` when given, otherwise derive one from `name`.
pub fn resolve_slug(explicit: Option<&str>, name: &str, max_len: usize) -> Result<String, CoreError> {
    let slug = match explicit {
        Some(s) => s.to_string(),
        None => generate_slug(name, max_len),
    };
    validate_slug(&slug, max_len)?;
    Ok(slug)
}
