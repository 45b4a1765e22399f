//! Cookie value object.
//!
//! A [`Cookie`] is immutable once parsed; the jar never mutates one in place,
//! only replaces it. Identity is the uniqueness key
//! `(host_only, domain, path, name)` — two cookies with the same key occupy
//! the same slot in a jar.
//!
//! Parsing handles the subset of RFC 6265 `Set-Cookie` semantics this layer
//! needs: `Path`, `Domain` (leading dot stripped), `Expires` (HTTP date),
//! `Max-Age` (takes precedence over `Expires`), `Secure`, `HttpOnly`.
//! If `Path` is absent, a default path is derived from the request URL; if
//! `Domain` is absent, the cookie is host-only for the request host.

use serde::{Deserialize, Serialize};
use url::Url;

/// Expiry timestamp used for session cookies (no `Expires`/`Max-Age`): they
/// never age out on their own and live until the jar is dropped or cleared.
pub const SESSION_EXPIRY: i64 = i64::MAX;

/// A cookie as stored by the jar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name (case-sensitive).
    pub name: String,

    /// Raw cookie value (not URL-decoded).
    pub value: String,

    /// Domain the cookie is scoped to, without a leading dot.
    pub domain: String,

    /// Path scoping (e.g., `"/"`).
    pub path: String,

    /// If `true`, only an exact host match sends the cookie; otherwise
    /// subdomains of `domain` match as well.
    pub host_only: bool,

    /// If `true`, cookie is sent only over HTTPS.
    pub secure: bool,

    /// If `true`, cookie is flagged as inaccessible to client-side scripts.
    pub http_only: bool,

    /// Expiration as epoch milliseconds; [`SESSION_EXPIRY`] for session cookies.
    pub expires_at: i64,
}

impl Cookie {
    /// The uniqueness key. Two cookies with equal keys are the same slot.
    pub fn key(&self) -> (bool, &str, &str, &str) {
        (self.host_only, &self.domain, &self.path, &self.name)
    }

    /// Parses one `Set-Cookie` header value against the request URL it
    /// arrived on. Returns `None` for values without a `name=` part.
    pub fn parse(header: &str, url: &Url, now: i64) -> Option<Cookie> {
        let (name, rest) = header.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut cookie = Cookie {
            name: name.to_string(),
            value: String::new(),
            domain: url.host_str().unwrap_or_default().to_string(),
            path: String::new(),
            host_only: true,
            secure: false,
            http_only: false,
            expires_at: SESSION_EXPIRY,
        };

        let mut expires: Option<i64> = None;
        let mut max_age: Option<i64> = None;
        let mut first = true;

        for part in rest.split(';') {
            let part = part.trim();
            if first {
                cookie.value = part.to_string();
                first = false;
                continue;
            }

            if let Some((k, v)) = part.split_once('=') {
                let v = v.trim();
                match k.trim().to_ascii_lowercase().as_str() {
                    "path" => cookie.path = v.to_string(),
                    "domain" => {
                        cookie.domain = v.trim_start_matches('.').to_ascii_lowercase();
                        cookie.host_only = false;
                    }
                    "expires" => expires = parse_http_date(v),
                    "max-age" => max_age = v.parse::<i64>().ok(),
                    _ => {}
                }
            } else if part.eq_ignore_ascii_case("secure") {
                cookie.secure = true;
            } else if part.eq_ignore_ascii_case("httponly") {
                cookie.http_only = true;
            }
        }

        // RFC 6265 §5.3 step 6: a Domain attribute the request host does not
        // domain-match would let one site plant cookies for another; such
        // headers are rejected outright.
        if !cookie.host_only {
            let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
            if host != cookie.domain && !host.ends_with(&format!(".{}", cookie.domain)) {
                return None;
            }
        }

        // Max-Age wins over Expires when both are present.
        if let Some(secs) = max_age {
            cookie.expires_at = now.saturating_add(secs.saturating_mul(1000));
        } else if let Some(at) = expires {
            cookie.expires_at = at;
        }

        if cookie.path.is_empty() {
            cookie.path = default_path(url);
        }

        Some(cookie)
    }

    /// Domain/path/secure matching against a request URL. Expiry is the
    /// jar's concern, not the matcher's.
    pub fn matches(&self, url: &Url) -> bool {
        let host = url.host_str().unwrap_or_default().to_ascii_lowercase();

        let domain_ok = if self.host_only {
            host == self.domain
        } else {
            host == self.domain || host.ends_with(&format!(".{}", self.domain))
        };

        let path = url.path();
        let path_ok = path == self.path
            || (path.starts_with(&self.path)
                && (self.path.ends_with('/') || path[self.path.len()..].starts_with('/')));

        let secure_ok = !self.secure || url.scheme() == "https";

        domain_ok && path_ok && secure_ok
    }
}

impl std::fmt::Display for Cookie {
    /// `name=value`, the shape used in a `Cookie` request header.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Default path per RFC 6265 §5.1.4: the request path up to the last slash.
fn default_path(url: &Url) -> String {
    match url.path().rsplit_once('/') {
        Some((dir, _)) if !dir.is_empty() => dir.to_string(),
        _ => "/".to_string(),
    }
}

/// HTTP dates are RFC 2822-shaped (`Wed, 21 Oct 2015 07:28:00 GMT`).
fn parse_http_date(value: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|dt| dt.timestamp_millis())
}
