//! Buffered HTTP response.
//!
//! The decoder dispatches on headers and consumes body bytes, so the client
//! drains the transport response into a plain [`Response`] before any codec
//! work happens. Owning the body as `Vec<u8>` also gives the close-on-every-
//! path guarantee for free: whether decoding succeeds, fails to parse, or
//! rejects the declared type, the bytes are released when the value drops.
//!
//! Streaming bodies are out of scope for this layer.

use http::HeaderMap;
use url::Url;

/// What came back from the wire, untouched.
#[derive(Debug)]
pub struct Response {
    /// URL the response was ultimately served from; differs from the request
    /// URL when the transport followed redirects.
    pub url: Url,

    /// HTTP status code.
    pub status: u16,

    /// Canonical reason phrase for `status`, `"Unknown"` when the code has
    /// none registered.
    pub status_text: String,

    /// Response headers (name lookup is case-insensitive).
    pub headers: HeaderMap,

    /// The complete body.
    pub body: Vec<u8>,
}

impl Response {
    /// Buffers a reqwest response into a [`Response`].
    pub async fn buffer(res: reqwest::Response) -> Result<Response, reqwest::Error> {
        let url = res.url().clone();
        let status = res.status().as_u16();
        let status_text = res
            .status()
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_string();
        let headers = res.headers().clone();

        // Note: does not deal with streaming
        let body = res.bytes().await?.to_vec();

        Ok(Response {
            url,
            status,
            status_text,
            headers,
            body,
        })
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
