//! Admin mutation services.
//!
//! Each service performs exactly one backend write per operation and, only
//! after the write succeeds, hands the affected resource kind to the
//! revalidator. A failed write returns before any invalidation, so cached
//! reads keep serving the pre-mutation data.

pub mod careers;
pub mod categories;
pub mod inbox;
pub mod products;
pub mod statistics;
pub mod testimonials;

/// Trim `value` and reject empty input.
pub(crate) fn require(field: &'static str, value: &str) -> Result<String, &'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(field);
    }
    Ok(trimmed.to_string())
}

/// Validate a slug: lowercase alphanumerics and hyphens only.
pub(crate) fn require_slug(value: &str) -> Result<String, &'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty()
        || !trimmed
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("slug");
    }
    Ok(trimmed.to_string())
}
