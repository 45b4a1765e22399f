//! Decode-side dispatch.
//!
//! [`AutoDecoder`] keys off the **response's** `Content-Type` header and
//! routes the buffered body to the matching [`Decodable`] entry point.
//! Matching is suffix-tolerant (`application/xhtml+xml` counts as `xml`),
//! parameters are ignored.
//!
//! Two policies carried from the original behavior:
//! - a 404 on the XML path yields the declared type's empty value instead of
//!   a parse attempt;
//! - HTML handling is only active when detection is enabled (the default);
//!   with it disabled, `text/html` falls through to the generic default.
//!
//! The XML frontend (`quick-xml`) performs no DTD processing and no external
//! entity expansion.

use crate::codec::html::HtmlDocument;
use crate::codec::Decodable;
use crate::errors::DecodeError;
use crate::media::MediaType;
use crate::response::Response;

/// Selects a decoder implementation from the observed media type of the
/// response body and delegates to it.
pub trait Decoder: Send + Sync {
    /// Consumes the response and produces the declared return type.
    fn decode<T: Decodable>(&self, response: Response) -> Result<T, DecodeError>;
}

/// Content-type driven decoder covering JSON, XML, protobuf, HTML and the
/// generic default.
#[derive(Debug, Clone, Copy)]
pub struct AutoDecoder {
    detect_html: bool,
}

impl AutoDecoder {
    /// Decoder with HTML auto-detection enabled.
    pub fn new() -> Self {
        AutoDecoder { detect_html: true }
    }

    /// Toggles HTML detection. Disabled, `text/html` responses go through
    /// the generic default codec instead.
    pub fn detect_html(mut self, enabled: bool) -> Self {
        self.detect_html = enabled;
        self
    }

    fn default_decode<T: Decodable>(body: Vec<u8>) -> Result<T, DecodeError> {
        match String::from_utf8(body) {
            Ok(text) => T::from_text(text),
            Err(err) => T::from_raw(err.into_bytes()),
        }
    }
}

impl Default for AutoDecoder {
    fn default() -> Self {
        AutoDecoder::new()
    }
}

impl Decoder for AutoDecoder {
    fn decode<T: Decodable>(&self, response: Response) -> Result<T, DecodeError> {
        let media = MediaType::from_headers(&response.headers);

        match media {
            Some(m) if m.is("json") => T::from_json(&response.body),
            Some(m) if m.is("xml") => {
                if response.status == 404 {
                    return T::empty().ok_or_else(|| DecodeError::unsupported::<T>("xml"));
                }
                let text = String::from_utf8(response.body)?;
                T::from_xml(&text)
            }
            Some(m) if m.is("x-protobuf") => T::from_wire(&response.body),
            Some(m) if self.detect_html && m.is("html") => {
                let text = String::from_utf8(response.body)?;
                T::from_html(HtmlDocument::parse(text, Some(response.url))?)
            }
            _ => Self::default_decode(response.body),
        }
    }
}
