//! Collision-free fixture names so tests sharing a database never clash.

use ulid::Ulid;

/// `{prefix}_{ulid}`, lowercased.
///
/// ```
/// use backend_test_support::unique_helpers::unique_name;
///
/// let a = unique_name("soup");
/// assert!(a.starts_with("soup_"));
/// assert_ne!(a, unique_name("soup"));
/// ```
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix}_{}", Ulid::new()).to_ascii_lowercase()
}

/// A unique address under `example.test`.
pub fn unique_email(prefix: &str) -> String {
    format!("{}@example.test", unique_name(prefix))
}
