//! Cookie jar abstraction and the in-memory implementation.
//!
//! A jar accepts cookies produced by server responses, retains the valid
//! subset, and supplies the applicable subset for an outgoing request URL.
//!
//! ## Eviction model
//! Expired entries are removed by a **passive sweep** during writes, not on a
//! timer: every save pass drops entries already past their expiry. A cookie
//! that is expired on arrival is never stored — that is how servers delete a
//! cookie (same key, expiry in the past). Loads additionally filter expiry,
//! so a stale entry is never handed to a request even before the next sweep.
//!
//! ## Concurrency
//! Jars are internally synchronized and shared through a
//! [`CookieJarHandle`] (`Arc<dyn CookieJar>`). Writers serialize the
//! remove+insert sequence per saved cookie; concurrent loads don't block one
//! another and never observe a cookie removed but not yet replaced.

use std::sync::{Arc, RwLock};

use http::header::SET_COOKIE;
use http::HeaderMap;
use url::Url;

use crate::cookies::Cookie;

/// A handle to a type-erased, internally synchronized cookie jar.
///
/// Construct one jar per client (or share one across clients that should see
/// the same cookies) and pass it explicitly; there is no process-wide jar.
pub type CookieJarHandle = Arc<dyn CookieJar>;

/// Storage, retrieval and eviction of cookies for a client.
pub trait CookieJar: Send + Sync {
    /// Saves a batch of parsed cookies arriving on a response from `url`.
    ///
    /// Must uphold both store invariants when it returns: at most one cookie
    /// per uniqueness key, and no already-expired cookie retained.
    fn save_from_response(&self, url: &Url, cookies: Vec<Cookie>);

    /// Every stored cookie whose matcher accepts `url`, excluding expired ones.
    fn load_for_request(&self, url: &Url) -> Vec<Cookie>;

    /// Removes all cookies.
    fn clear(&self);

    /// Snapshot of all stored cookies, for diagnostics/inspection.
    fn cookies(&self) -> Vec<Cookie>;

    /// Parses every `Set-Cookie` header in `headers` and saves the batch.
    fn save_from_headers(&self, url: &Url, headers: &HeaderMap) {
        let now = chrono::Utc::now().timestamp_millis();
        let batch: Vec<Cookie> = headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| Cookie::parse(v, url, now))
            .collect();

        if !batch.is_empty() {
            self.save_from_response(url, batch);
        }
    }

    /// The `Cookie` request header value to send for `url`, if any cookie matches.
    fn request_header(&self, url: &Url) -> Option<String> {
        let cookies = self.load_for_request(url);
        if cookies.is_empty() {
            return None;
        }
        Some(
            cookies
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// In-memory cookie jar. Unordered, process-lifetime storage with
/// expiry-based eviction; no persistence.
pub struct MemoryCookieJar {
    cookies: RwLock<Vec<Cookie>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self {
            cookies: RwLock::new(Vec::new()),
        }
    }

    /// Wraps the jar in a shareable handle.
    pub fn into_handle(self) -> CookieJarHandle {
        Arc::new(self)
    }

    fn now() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

impl Default for MemoryCookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieJar for MemoryCookieJar {
    fn save_from_response(&self, _url: &Url, incoming: Vec<Cookie>) {
        // One time snapshot for the whole batch; the sweep below is
        // idempotent, so per-cookie passes and per-batch passes retain the
        // same final state.
        let now = Self::now();
        let mut store = self.cookies.write().unwrap();

        for cookie in incoming {
            // Sweep expired entries and displace the slot this cookie occupies.
            store.retain(|existing| existing.expires_at >= now && existing.key() != cookie.key());

            if cookie.expires_at > now {
                store.push(cookie);
            } else {
                log::debug!("dropping expired cookie {} for {}", cookie.name, cookie.domain);
            }
        }
    }

    fn load_for_request(&self, url: &Url) -> Vec<Cookie> {
        let now = Self::now();
        self.cookies
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.expires_at > now && c.matches(url))
            .cloned()
            .collect()
    }

    fn clear(&self) {
        self.cookies.write().unwrap().clear();
    }

    fn cookies(&self) -> Vec<Cookie> {
        self.cookies.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn cookie(name: &str, value: &str, expires_at: i64) -> Cookie {
        Cookie {
            name: name.to_string(),
            value: value.to_string(),
            domain: "example.com".to_string(),
            path: "/".to_string(),
            host_only: false,
            secure: false,
            http_only: false,
            expires_at,
        }
    }

    fn in_one_hour() -> i64 {
        chrono::Utc::now().timestamp_millis() + 3_600_000
    }

    #[test]
    fn save_then_load_for_a_matching_url() {
        let jar = MemoryCookieJar::new();
        jar.save_from_response(
            &url("https://example.com/"),
            vec![cookie("sid", "abc", in_one_hour())],
        );

        let loaded = jar.load_for_request(&url("https://example.com/"));
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].value, "abc");

        assert!(jar.load_for_request(&url("https://other.com/")).is_empty());
    }

    #[test]
    fn same_key_supersedes_the_previous_cookie() {
        let now = chrono::Utc::now().timestamp_millis();
        let jar = MemoryCookieJar::new();

        jar.save_from_response(
            &url("https://example.com/"),
            vec![cookie("sid", "abc", now + 3_600_000)],
        );
        jar.save_from_response(
            &url("https://example.com/"),
            vec![cookie("sid", "def", now + 7_200_000)],
        );

        let all = jar.cookies();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].value, "def");
    }

    #[test]
    fn cookies_expired_on_arrival_are_never_stored() {
        let now = chrono::Utc::now().timestamp_millis();
        let jar = MemoryCookieJar::new();

        jar.save_from_response(
            &url("https://example.com/"),
            vec![cookie("a", "1", now - 1), cookie("b", "2", now)],
        );

        assert!(jar.cookies().is_empty());
    }

    #[test]
    fn an_expired_cookie_with_the_same_key_deletes_the_stored_one() {
        let now = chrono::Utc::now().timestamp_millis();
        let jar = MemoryCookieJar::new();

        jar.save_from_response(
            &url("https://example.com/"),
            vec![cookie("sid", "abc", now + 3_600_000)],
        );
        // Deletion cookie: same key, expiry in the past.
        jar.save_from_response(
            &url("https://example.com/"),
            vec![cookie("sid", "", now - 3_600_000)],
        );

        assert!(jar.cookies().is_empty());
    }

    #[test]
    fn the_sweep_removes_unrelated_expired_entries_on_save() {
        let now = chrono::Utc::now().timestamp_millis();
        let jar = MemoryCookieJar::new();

        jar.save_from_response(
            &url("https://example.com/"),
            vec![cookie("old", "x", now + 5)],
        );
        std::thread::sleep(std::time::Duration::from_millis(10));
        jar.save_from_response(
            &url("https://example.com/"),
            vec![cookie("fresh", "y", in_one_hour())],
        );

        let all = jar.cookies();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "fresh");
    }

    #[test]
    fn different_keys_occupy_different_slots() {
        let exp = in_one_hour();
        let jar = MemoryCookieJar::new();

        let mut other_path = cookie("sid", "p", exp);
        other_path.path = "/admin".to_string();
        let mut host_only = cookie("sid", "h", exp);
        host_only.host_only = true;

        jar.save_from_response(
            &url("https://example.com/"),
            vec![cookie("sid", "root", exp), other_path, host_only],
        );

        assert_eq!(jar.cookies().len(), 3);
    }

    #[test]
    fn expired_entries_are_not_loaded_even_before_a_sweep() {
        let jar = MemoryCookieJar::new();
        jar.save_from_response(
            &url("https://example.com/"),
            vec![cookie("sid", "abc", chrono::Utc::now().timestamp_millis() + 5)],
        );
        std::thread::sleep(std::time::Duration::from_millis(10));

        assert!(jar.load_for_request(&url("https://example.com/")).is_empty());
        // Still in the store until the next save sweeps it.
        assert_eq!(jar.cookies().len(), 1);
    }

    #[test]
    fn save_from_headers_parses_every_set_cookie() {
        let jar = MemoryCookieJar::new();
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("a=1; Max-Age=3600"));
        headers.append(SET_COOKIE, HeaderValue::from_static("b=2; Max-Age=3600; Path=/x"));

        jar.save_from_headers(&url("https://example.com/x/y"), &headers);

        assert_eq!(jar.cookies().len(), 2);
        let header = jar.request_header(&url("https://example.com/x/y")).unwrap();
        assert!(header.contains("a=1"));
        assert!(header.contains("b=2"));

        // Both cookies default to path "/x", so the root path matches neither.
        assert!(jar.request_header(&url("https://example.com/")).is_none());
    }

    #[test]
    fn a_response_cannot_plant_cookies_for_a_foreign_domain() {
        let jar = MemoryCookieJar::new();
        let mut headers = HeaderMap::new();
        headers.append(
            SET_COOKIE,
            HeaderValue::from_static("sid=evil; Domain=victim.com; Max-Age=3600"),
        );

        jar.save_from_headers(&url("https://attacker.com/"), &headers);

        assert!(jar.load_for_request(&url("https://victim.com/")).is_empty());
        assert!(jar.cookies().is_empty());
    }

    #[test]
    fn request_header_is_none_when_nothing_matches() {
        let jar = MemoryCookieJar::new();
        assert!(jar.request_header(&url("https://example.com/")).is_none());
    }

    #[test]
    fn concurrent_saves_and_loads_keep_the_invariants() {
        let _ = env_logger::builder().is_test(true).try_init();
        let jar: CookieJarHandle = MemoryCookieJar::new().into_handle();
        let exp = in_one_hour();

        let writers: Vec<_> = (0..4)
            .map(|i| {
                let jar = jar.clone();
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        jar.save_from_response(
                            &Url::parse("https://example.com/").unwrap(),
                            vec![cookie("sid", &format!("w{i}"), exp)],
                        );
                    }
                })
            })
            .collect();

        let readers: Vec<_> = (0..2)
            .map(|_| {
                let jar = jar.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let loaded = jar.load_for_request(&Url::parse("https://example.com/").unwrap());
                        assert!(loaded.len() <= 1);
                    }
                })
            })
            .collect();

        for t in writers.into_iter().chain(readers) {
            t.join().unwrap();
        }

        // One slot, last writer wins.
        assert_eq!(jar.cookies().len(), 1);
    }
}
