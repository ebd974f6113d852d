//! Test helpers for generating unique fixture data
//!
//! Player names must be unique within a store and team names must differ
//! within a match, so fixtures draw their names from ULIDs.

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("team");
/// let b = unique_str("team");
/// assert_ne!(a, b);
/// assert!(a.starts_with("team-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate `count` unique player names sharing a prefix.
///
/// ```
/// use backend_test_support::unique_helpers::unique_player_names;
///
/// let names = unique_player_names("lions", 3);
/// assert_eq!(names.len(), 3);
/// assert_ne!(names[0], names[1]);
/// ```
pub fn unique_player_names(prefix: &str, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| unique_str(&format!("{prefix}{i}")))
        .collect()
}
