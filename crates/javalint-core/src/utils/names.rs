//! Dotted qualified-name helpers.

/// Extracts the last segment of a dotted name.
///
/// # Example
///
/// ```
/// use javalint_core::utils::simple_name;
///
/// assert_eq!(simple_name("com.google.auto.value.AutoValue"), "AutoValue");
/// assert_eq!(simple_name("AutoValue"), "AutoValue");
/// ```
#[must_use]
pub fn simple_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Joins a prefix and a name with a dot. An empty side yields the other
/// side unchanged.
#[must_use]
pub fn qualify(prefix: &str, name: &str) -> String {
    match (prefix.is_empty(), name.is_empty()) {
        (true, _) => name.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix}.{name}"),
    }
}
