//! Field names derived from accessor names.

const PREFIXES: [&str; 2] = ["get", "is"];

/// Derives an output field name from an accessor name.
///
/// A leading `get` or `is` followed by at least one character is dropped and
/// the next character lower-cased. Other names are used verbatim.
#[must_use]
pub fn field_name(accessor: &str) -> String {
    for prefix in PREFIXES {
        if let Some(rest) = accessor.strip_prefix(prefix) {
            let mut chars = rest.chars();
            if let Some(first) = chars.next() {
                return first.to_lowercase().chain(chars).collect();
            }
        }
    }
    accessor.to_string()
}
