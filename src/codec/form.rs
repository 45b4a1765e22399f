//! Form body framing.
//!
//! The form codec serializes a value to urlencoded `key=value` pairs (via
//! `serde_urlencoded`, see [`Encodable::to_form`]). This module turns that
//! pair string into the two wire shapes: pass-through for
//! `application/x-www-form-urlencoded`, multipart framing for
//! `multipart/form-data`.
//!
//! [`Encodable::to_form`]: crate::codec::Encodable::to_form

use std::io::Write;

/// Frames urlencoded `pairs` as a `multipart/form-data` body with a random
/// boundary. Returns the full `Content-Type` value and the body bytes.
pub(crate) fn multipart(pairs: &str) -> (String, Vec<u8>) {
    let boundary = format!("restbind-{}", uuid::Uuid::new_v4().simple());
    let mut body = Vec::new();

    for (name, value) in url::form_urlencoded::parse(pairs.as_bytes()) {
        // Vec<u8> writes cannot fail
        let _ = write!(
            body,
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        );
    }
    let _ = write!(body, "--{boundary}--\r\n");

    (
        format!("multipart/form-data; boundary={boundary}"),
        body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipart_frames_every_field_and_closes_the_body() {
        let (content_type, body) = multipart("name=sid&value=a%2Bb");
        let body = String::from_utf8(body).unwrap();
        let boundary = content_type.split("boundary=").nth(1).unwrap();

        assert!(content_type.starts_with("multipart/form-data; boundary="));
        assert!(body.contains("Content-Disposition: form-data; name=\"name\"\r\n\r\nsid\r\n"));
        // urlencoding is undone before framing
        assert!(body.contains("name=\"value\"\r\n\r\na+b\r\n"));
        assert!(body.ends_with(&format!("--{boundary}--\r\n")));
    }

    #[test]
    fn empty_pairs_still_produce_a_terminated_body() {
        let (_, body) = multipart("");
        assert!(String::from_utf8(body).unwrap().ends_with("--\r\n"));
    }
}
