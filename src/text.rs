//! Plain-text helpers shared by the translators.

/// Clean up text extracted from the document.
///
/// Word exports routinely carry no-break spaces and zero-width characters
/// that turn into mojibake ("Â" and friends) once the fragment is embedded
/// in a page with a different charset. Structure is never changed here.
pub(crate) fn normalize(s: &str) -> String {
    s.chars()
        .filter_map(|c| match c {
            '\u{00A0}' => Some(' '),
            // BOM, zero-width space, soft hyphen
            '\u{FEFF}' | '\u{200B}' | '\u{00AD}' => None,
            c => Some(c),
        })
        .collect()
}

/// Escape text content for inclusion in markup.
pub(crate) fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Remove markup tags, keeping only text content.
///
/// Used for the exclusion filter and the empty-row checks, which compare
/// against what a reader would actually see.
pub(crate) fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
