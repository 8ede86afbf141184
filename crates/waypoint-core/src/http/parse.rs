//! Parse HTTP response header lines into name/value pairs.

/// Collects `Name: value` pairs from raw header lines.
///
/// A status line (`HTTP/...`) starts a new header block, so only the final
/// response's headers survive interim `1xx` responses.
pub(crate) fn parse_headers(lines: &[String]) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            out.clear();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            out.push((name.trim().to_string(), value.trim().to_string()));
        }
    }
    out
}
