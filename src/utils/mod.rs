//! Text matching helpers shared by the catalog and patron modules.

/// Unicode-aware case-insensitive equality.
pub fn eq_ignore_case(left: &str, right: &str) -> bool {
    left.to_lowercase() == right.to_lowercase()
}

/// Unicode-aware case-insensitive substring test. An empty needle matches.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
