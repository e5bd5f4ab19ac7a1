//! Comment addressing.
//!
//! Comments are shown oldest first, paginated per listing. A comment's
//! permalink is derived from its zero-based position in that sequence; it is
//! never stored.

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum comment length in characters.
pub const MAX_COMMENT_LEN: usize = 300;

/// One-based page number holding the comment at `position`.
pub fn page_for_position(position: i64, per_page: i64) -> i64 {
    let per_page = per_page.max(1);
    position.max(0) / per_page + 1
}

/// Anchor id used for a comment within a listing page.
pub fn comment_anchor(comment_id: DbId) -> String {
    format!("comment_{comment_id}")
}

/// Build the permalink of a comment.
///
/// `requested_per_page` is the page size the caller explicitly asked for;
/// when `None`, `default_per_page` is used and the size is left out of the
/// query string. `page` is omitted when it is the first page.
pub fn comment_permalink(
    listing_id: DbId,
    comment_id: DbId,
    position: i64,
    requested_per_page: Option<i64>,
    default_per_page: i64,
) -> String {
    let per_page = requested_per_page.unwrap_or(default_per_page);
    let page = page_for_position(position, per_page);

    let mut params = Vec::new();
    if page > 1 {
        params.push(format!("page={page}"));
    }
    if let Some(opp) = requested_per_page {
        params.push(format!("objects-per-page={opp}"));
    }

    let mut url = format!("/lots/{listing_id}");
    if !params.is_empty() {
        url.push('?');
        url.push_str(&params.join("&"));
    }
    url.push('#');
    url.push_str(&comment_anchor(comment_id));
    url
}

/// Validate comment text typed by a user.
pub fn validate_comment_text(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation("Comment text must not be empty".into()));
    }
    if text.chars().count() > MAX_COMMENT_LEN {
        return Err(CoreError::Validation(format!(
            "Comment text must be at most {MAX_COMMENT_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_has_no_query() {
        assert_eq!(comment_permalink(4, 17, 0, None, 10), "/lots/4#comment_17");
        assert_eq!(comment_permalink(4, 17, 9, None, 10), "/lots/4#comment_17");
    }

    #[test]
    fn later_pages_carry_page_number() {
        assert_eq!(
            comment_permalink(4, 17, 10, None, 10),
            "/lots/4?page=2#comment_17"
        );
        assert_eq!(
            comment_permalink(4, 17, 25, None, 10),
            "/lots/4?page=3#comment_17"
        );
    }

    #[test]
    fn explicit_page_size_is_kept_in_query() {
        assert_eq!(
            comment_permalink(4, 17, 1, Some(5), 10),
            "/lots/4?objects-per-page=5#comment_17"
        );
        assert_eq!(
            comment_permalink(4, 17, 7, Some(5), 10),
            "/lots/4?page=2&objects-per-page=5#comment_17"
        );
    }

    #[test]
    fn page_math_guards_bad_sizes() {
        assert_eq!(page_for_position(3, 0), 4);
        assert_eq!(page_for_position(-2, 10), 1);
    }

    #[test]
    fn empty_comment_rejected() {
        assert!(validate_comment_text("   ").is_err());
    }

    #[test]
    fn long_comment_rejected() {
        let text = "x".repeat(MAX_COMMENT_LEN + 1);
        assert!(validate_comment_text(&text).is_err());
        assert!(validate_comment_text(&text[..MAX_COMMENT_LEN]).is_ok());
    }
}
