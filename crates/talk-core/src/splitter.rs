//! Splits multi-part input into independent sub-questions.

/// Coordinating connectors treated as question boundaries, matched after lower-casing.
pub const CONNECTORS: &[&str] = &[" and ", " & ", " also ", " plus ", ", then "];

/// Lower-cases `text`, turns every connector into a `?` boundary and splits on `?`.
///
/// Empty fragments are dropped. Input with no connector and at most one
/// trailing `?` yields a single part.
pub fn split_compound(text: &str) -> Vec<String> {
    let mut t = text.trim().to_lowercase();
    for connector in CONNECTORS {
        t = t.replace(connector, "? ");
    }
    t.split('?')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
