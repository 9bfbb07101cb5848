//! Escaping for the text-based formats.

/// Escapes HTML special characters.
#[must_use]
pub fn html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escapes text for a Markdown table cell.
///
/// Pipes are escaped, HTML is neutralized and newlines become `<br>`.
#[must_use]
pub fn markdown_cell(s: &str) -> String {
    html(s).replace('|', "\\|").replace("\r\n", "<br>").replace('\n', "<br>")
}

/// Quotes a CSV field when it contains a delimiter, quote or line break.
#[must_use]
pub fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
