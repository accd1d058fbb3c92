//! Field cleanup applied to every raw column.

/// Clean one raw CSV field.
///
/// Strips exactly one pair of surrounding double quotes (no recursive
/// unquoting) and trims whitespace. Total: never fails.
#[must_use]
pub fn clean_field(value: &str) -> String {
    let unquoted = if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    };
    unquoted.trim().to_string()
}

/// Clean an optional column; absent columns become the empty string.
#[must_use]
pub fn clean_optional_field(value: Option<&str>) -> String {
    value.map(clean_field).unwrap_or_default()
}
