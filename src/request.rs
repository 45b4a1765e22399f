//! Outgoing request model.
//!
//! A [`RequestTemplate`] is the mutable request under construction: method,
//! resolved URL, headers and (after encoding) the raw body bytes. The codec
//! layer writes into it; the client turns it into a real transport request.

use http::{HeaderMap, HeaderName, HeaderValue, Method};
use url::Url;

/// A request being assembled before it is handed to the transport.
#[derive(Debug, Clone)]
pub struct RequestTemplate {
    pub method: Method,
    pub url: Url,

    /// Request headers; name lookup is case-insensitive.
    pub headers: HeaderMap,

    /// Encoded body bytes, if any. Set by the encoder (or directly by the
    /// caller for pre-encoded payloads).
    pub body: Option<Vec<u8>>,
}

impl RequestTemplate {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Adds a header, silently skipping values that are not legal header text.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            name.parse::<HeaderName>(),
            HeaderValue::from_str(value),
        ) {
            self.headers.append(name, value);
        }
        self
    }

    /// Appends a query parameter to the URL.
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(key, value);
        self
    }

    /// Sets the `Content-Type` header, replacing any previous value.
    pub fn content_type(mut self, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.headers.insert(http::header::CONTENT_TYPE, value);
        }
        self
    }

    /// Replaces the body with already-encoded bytes.
    pub fn set_body(&mut self, bytes: Vec<u8>) {
        self.body = Some(bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accumulates_headers_and_query() {
        let url = Url::parse("https://api.example.com/v1/items").unwrap();
        let template = RequestTemplate::new(Method::GET, url)
            .header("Accept", "application/json")
            .query("page", "2");

        assert_eq!(
            template.headers.get("accept").unwrap(),
            "application/json"
        );
        assert_eq!(template.url.query(), Some("page=2"));
        assert!(template.body.is_none());
    }

    #[test]
    fn content_type_replaces_instead_of_appending() {
        let url = Url::parse("https://api.example.com/").unwrap();
        let template = RequestTemplate::new(Method::POST, url)
            .content_type("text/plain")
            .content_type("application/json");

        let values: Vec<_> = template.headers.get_all("content-type").iter().collect();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0], "application/json");
    }
}
