//! Encode-side dispatch.
//!
//! [`AutoEncoder`] reads the request's `Content-Type` header and routes the
//! body value to the matching [`Encodable`] entry point. No header means the
//! generic default codec. The encoder is stateless and safe for concurrent
//! use; construct it once and share it.

use http::header::CONTENT_TYPE;
use http::HeaderValue;

use crate::codec::form;
use crate::codec::Encodable;
use crate::errors::EncodeError;
use crate::media::MediaType;
use crate::request::RequestTemplate;

/// Selects an encoder implementation from the declared media type of the
/// request body and delegates to it.
pub trait Encoder: Send + Sync {
    /// Serializes `value` into the template's body.
    fn encode<T: Encodable + ?Sized>(
        &self,
        value: &T,
        template: &mut RequestTemplate,
    ) -> Result<(), EncodeError>;
}

/// Content-type driven encoder covering JSON, XML, protobuf, forms and the
/// generic default.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoEncoder;

impl AutoEncoder {
    pub fn new() -> Self {
        AutoEncoder
    }
}

impl Encoder for AutoEncoder {
    fn encode<T: Encodable + ?Sized>(
        &self,
        value: &T,
        template: &mut RequestTemplate,
    ) -> Result<(), EncodeError> {
        let media = MediaType::from_headers(&template.headers);

        let body = match &media {
            Some(m) if m.is("json") => value.to_json()?,
            Some(m) if m.is("xml") => value.to_xml()?.into_bytes(),
            Some(m) if m.is("x-protobuf") => value.to_wire()?,
            Some(m) if m.is("form-data") => {
                let (content_type, body) = form::multipart(&value.to_form()?);
                // The boundary lives in the header, so rewrite it.
                if let Ok(header) = HeaderValue::from_str(&content_type) {
                    template.headers.insert(CONTENT_TYPE, header);
                }
                body
            }
            Some(m) if m.is("x-www-form-urlencoded") => value.to_form()?.into_bytes(),
            _ => value.to_plain()?,
        };

        template.set_body(body);
        Ok(())
    }
}
