//! Media type parsing and subtype matching.
//!
//! A [`MediaType`] is the semantic `(type, subtype)` pair behind a
//! `Content-Type` header value. Parameters such as `charset` are parsed but
//! ignored by dispatch: `application/json; charset=utf-8` selects the same
//! codec as `application/json`.
//!
//! Matching is on the subtype token or its `+suffix`, so
//! `application/xhtml+xml` still counts as `xml`.

use http::header::CONTENT_TYPE;
use http::HeaderMap;
use mime::Mime;

/// A parsed media type, wrapping [`mime::Mime`].
#[derive(Debug, Clone)]
pub struct MediaType(Mime);

impl MediaType {
    /// Parses a `Content-Type` header value. Returns `None` for garbage.
    pub fn parse(value: &str) -> Option<MediaType> {
        value.trim().parse::<Mime>().ok().map(MediaType)
    }

    /// Extracts the media type from the first `Content-Type` header in `headers`.
    ///
    /// Header name lookup is case-insensitive (a `HeaderMap` property); absent
    /// or unparseable headers yield `None`, which callers treat as "use the
    /// default codec".
    pub fn from_headers(headers: &HeaderMap) -> Option<MediaType> {
        let value = headers.get(CONTENT_TYPE)?;
        MediaType::parse(value.to_str().ok()?)
    }

    /// Top-level type, e.g. `application`.
    pub fn kind(&self) -> &str {
        self.0.type_().as_str()
    }

    /// Subtype, e.g. `json` or `x-protobuf`.
    pub fn subtype(&self) -> &str {
        self.0.subtype().as_str()
    }

    /// True if the subtype equals `token` or carries it as a `+` suffix.
    pub fn is(&self, token: &str) -> bool {
        self.subtype() == token || self.0.suffix().map(|s| s.as_str()) == Some(token)
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn parameters_do_not_affect_the_subtype() {
        let mt = MediaType::parse("application/json; charset=utf-8").unwrap();
        assert_eq!(mt.kind(), "application");
        assert_eq!(mt.subtype(), "json");
        assert!(mt.is("json"));
    }

    #[test]
    fn suffix_counts_as_a_match() {
        let mt = MediaType::parse("application/xhtml+xml").unwrap();
        assert!(mt.is("xml"));
        assert!(!mt.is("html")); // subtype is "xhtml", not "html"
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/x-protobuf"));

        let mt = MediaType::from_headers(&headers).unwrap();
        assert!(mt.is("x-protobuf"));
    }

    #[test]
    fn missing_or_broken_header_yields_none() {
        assert!(MediaType::from_headers(&HeaderMap::new()).is_none());
        assert!(MediaType::parse("not a media type at all \u{7f}").is_none());
    }
}
