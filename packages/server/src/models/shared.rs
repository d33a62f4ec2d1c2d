/// Describe a string field that is shorter than `min` characters, or `None` if it is long enough.
pub fn min_length_violation(field: &str, value: &str, min: usize) -> Option<String> {
    if value.chars().count() < min {
        Some(format!(
            "{field}: Path `{field}` (`{value}`) is shorter than the minimum allowed length ({min})."
        ))
    } else {
        None
    }
}
