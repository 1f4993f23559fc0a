//! Unique test data, so parallel tests never collide on names or emails.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use catalog_test_support::unique_helpers::unique_str;
///
/// assert_ne!(unique_str("slug"), unique_str("slug"));
/// assert!(unique_str("slug").starts_with("slug-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// `{prefix}-{ulid}@example.test`
///
/// ```
/// use catalog_test_support::unique_helpers::unique_email;
///
/// let email = unique_email("ada");
/// assert!(email.starts_with("ada-"));
/// assert!(email.ends_with("@example.test"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new())
}

/// Lowercase slug safe for product URLs.
pub fn unique_slug(prefix: &str) -> String {
    unique_str(prefix).to_lowercase()
}
