//! Log sanitization utilities
//!
//! Keeps page bodies short in debug logs and hides login secrets and
//! anti-forgery tokens in logged form bodies.

/// Maximum number of bytes of a page body included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Form field names whose values never reach the log.
const SECRET_FIELDS: &[&str] = &["password", "token"];

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a page body for logging.
///
/// Whitespace runs are collapsed first, since server-rendered HTML is mostly
/// indentation.
pub fn truncate_for_log(s: &str) -> String {
    let compact = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if compact.len() <= TRUNCATE_LIMIT {
        compact
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &compact[..floor_char_boundary(&compact, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Render form fields as `name=value&...` with secret values masked.
pub fn redact_form(fields: &[(String, String)]) -> String {
    fields
        .iter()
        .map(|(name, value)| {
            if SECRET_FIELDS.contains(&name.as_str()) {
                format!("{name}=***")
            } else {
                format!("{name}={value}")
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}
