//! Lookup-key normalization.

/// Normalizes a raw breed name into a lookup key.
///
/// An absent name becomes the empty string; otherwise leading and trailing
/// characters at or below U+0020 (space and ASCII control characters) are
/// trimmed and the name is lowercased with Unicode's locale-independent case
/// mapping. Other Unicode spaces such as U+00A0 are kept. Blank input
/// normalizes to `""` and is not rejected.
pub fn normalize_breed(breed: Option<&str>) -> String {
    breed
        .map(|b| b.trim_matches(|c: char| c <= ' ').to_lowercase())
        .unwrap_or_default()
}
