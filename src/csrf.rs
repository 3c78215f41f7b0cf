use log::debug;
use percent_encoding::percent_decode_str;

pub const CSRF_COOKIE: &str = "csrftoken";

/// Resolve the CSRF token for state-changing requests.
/// An injected page global wins; otherwise the `csrftoken` cookie is read
/// from the raw `Cookie` header string.
pub fn resolve(injected: Option<&str>, cookie_header: Option<&str>) -> Option<String> {
    if let Some(token) = injected.filter(|t| !t.is_empty()) {
        debug!("Using CSRF token from page globals");
        return Some(token.to_string());
    }
    let token = cookie_header.and_then(|c| cookie_value(c, CSRF_COOKIE));
    debug!(
        "CSRF token ({}): {}",
        CSRF_COOKIE,
        if token.is_some() { "found" } else { "not found (cookie fallback)" }
    );
    token
}

/// Find a cookie by name in a `name=value; other=value` header string.
/// The value is percent-decoded.
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    if header.is_empty() {
        return None;
    }
    header
        .split(';')
        .map(|c| c.trim())
        .find_map(|c| c.strip_prefix(name).and_then(|rest| rest.strip_prefix('=')))
        .map(|v| percent_decode_str(v).decode_utf8_lossy().into_owned())
}
