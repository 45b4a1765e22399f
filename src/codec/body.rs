//! Body value capabilities.
//!
//! Instead of probing a value's runtime class, the dispatchers probe
//! **capability traits**: a request body implements [`Encodable`], a declared
//! return type implements [`Decodable`]. Every entry point defaults to an
//! `Unsupported` error carrying the codec and type name, so a mismatch between
//! the `Content-Type` header and the value surfaces immediately instead of
//! failing somewhere inside a reflective lookup.
//!
//! For serde-backed types, the [`serde_body!`] macro wires the JSON, XML and
//! form entry points in one line:
//!
//! ```rust,ignore
//! #[derive(Serialize, Deserialize)]
//! struct User { id: u64, name: String }
//!
//! restbind::serde_body!(User);
//! ```
//!
//! Protobuf messages go through the narrow [`WireMessage`] capability
//! (implemented for every `prost::Message`) and the [`Proto`] wrapper.

use crate::codec::html::HtmlDocument;
use crate::errors::{DecodeError, EncodeError};

/// Capability surface of a request body value. The encoder picks the entry
/// point from the request's `Content-Type`.
pub trait Encodable {
    /// JSON marshal of the value.
    fn to_json(&self) -> Result<Vec<u8>, EncodeError> {
        Err(EncodeError::unsupported::<Self>("json"))
    }

    /// XML marshal; the struct name becomes the root element.
    fn to_xml(&self) -> Result<String, EncodeError> {
        Err(EncodeError::unsupported::<Self>("xml"))
    }

    /// Protobuf wire bytes. Only generated message types have this.
    fn to_wire(&self) -> Result<Vec<u8>, EncodeError> {
        Err(EncodeError::unsupported::<Self>("protobuf"))
    }

    /// Urlencoded `key=value` pair string; also feeds the multipart framing.
    fn to_form(&self) -> Result<String, EncodeError> {
        Err(EncodeError::unsupported::<Self>("form"))
    }

    /// Generic default: UTF-8 stringify or raw byte pass-through.
    fn to_plain(&self) -> Result<Vec<u8>, EncodeError> {
        Err(EncodeError::unsupported::<Self>("plain"))
    }
}

/// Capability surface of a declared return type. The decoder picks the entry
/// point from the response's `Content-Type`.
pub trait Decodable: Sized {
    fn from_json(bytes: &[u8]) -> Result<Self, DecodeError> {
        let _ = bytes;
        Err(DecodeError::unsupported::<Self>("json"))
    }

    fn from_xml(text: &str) -> Result<Self, DecodeError> {
        let _ = text;
        Err(DecodeError::unsupported::<Self>("xml"))
    }

    fn from_wire(bytes: &[u8]) -> Result<Self, DecodeError> {
        let _ = bytes;
        Err(DecodeError::unsupported::<Self>("protobuf"))
    }

    fn from_html(doc: HtmlDocument) -> Result<Self, DecodeError> {
        let _ = doc;
        Err(DecodeError::unsupported::<Self>("html"))
    }

    /// Generic default for textual bodies.
    fn from_text(text: String) -> Result<Self, DecodeError> {
        let _ = text;
        Err(DecodeError::unsupported::<Self>("plain"))
    }

    /// Generic default for non-UTF-8 bodies.
    fn from_raw(bytes: Vec<u8>) -> Result<Self, DecodeError> {
        let _ = bytes;
        Err(DecodeError::unsupported::<Self>("raw"))
    }

    /// Semantically empty value, used for 404 responses on the XML path.
    /// `None` means the type has no empty form.
    fn empty() -> Option<Self> {
        None
    }
}

/// The "binary-serializable message" capability: serialize to wire bytes,
/// parse back from wire bytes. Blanket-implemented for prost messages.
pub trait WireMessage: Sized {
    fn to_wire_bytes(&self) -> Vec<u8>;
    fn from_wire_bytes(bytes: &[u8]) -> Result<Self, DecodeError>;
}

impl<M: prost::Message + Default> WireMessage for M {
    fn to_wire_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }

    fn from_wire_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(M::decode(bytes)?)
    }
}

/// Wrapper giving a [`WireMessage`] the body capabilities, so a protobuf
/// message can travel through the same dispatch as everything else:
/// `client.call::<Proto<Ping>, Proto<Pong>>(...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Proto<M>(pub M);

impl<M> Proto<M> {
    pub fn into_inner(self) -> M {
        self.0
    }
}

impl<M: WireMessage> Encodable for Proto<M> {
    fn to_wire(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(self.0.to_wire_bytes())
    }
}

impl<M: WireMessage> Decodable for Proto<M> {
    fn from_wire(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(Proto(M::from_wire_bytes(bytes)?))
    }
}

// Built-in capabilities for plain payload shapes.

impl Encodable for String {
    fn to_plain(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(self.clone().into_bytes())
    }
}

impl Encodable for str {
    fn to_plain(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(self.as_bytes().to_vec())
    }
}

impl Encodable for Vec<u8> {
    fn to_plain(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(self.clone())
    }
}

impl Encodable for serde_json::Value {
    fn to_json(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(serde_json::to_vec(self)?)
    }
}

impl Decodable for String {
    fn from_text(text: String) -> Result<Self, DecodeError> {
        Ok(text)
    }

    fn empty() -> Option<Self> {
        Some(String::new())
    }
}

impl Decodable for Vec<u8> {
    fn from_text(text: String) -> Result<Self, DecodeError> {
        Ok(text.into_bytes())
    }

    fn from_raw(bytes: Vec<u8>) -> Result<Self, DecodeError> {
        Ok(bytes)
    }

    fn empty() -> Option<Self> {
        Some(Vec::new())
    }
}

impl Decodable for serde_json::Value {
    fn from_json(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    fn empty() -> Option<Self> {
        Some(serde_json::Value::Null)
    }
}

/// `Option<T>` decodes like `T` and has an empty form even when `T` does not.
impl<T: Decodable> Decodable for Option<T> {
    fn from_json(bytes: &[u8]) -> Result<Self, DecodeError> {
        T::from_json(bytes).map(Some)
    }

    fn from_xml(text: &str) -> Result<Self, DecodeError> {
        T::from_xml(text).map(Some)
    }

    fn from_wire(bytes: &[u8]) -> Result<Self, DecodeError> {
        T::from_wire(bytes).map(Some)
    }

    fn from_html(doc: HtmlDocument) -> Result<Self, DecodeError> {
        T::from_html(doc).map(Some)
    }

    fn from_text(text: String) -> Result<Self, DecodeError> {
        T::from_text(text).map(Some)
    }

    fn from_raw(bytes: Vec<u8>) -> Result<Self, DecodeError> {
        T::from_raw(bytes).map(Some)
    }

    fn empty() -> Option<Self> {
        Some(None)
    }
}

/// Wires the serde-backed codec entry points (JSON, XML, form) for one or
/// more `Serialize + Deserialize` types.
#[macro_export]
macro_rules! serde_body {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::codec::Encodable for $ty {
            fn to_json(&self) -> Result<Vec<u8>, $crate::errors::EncodeError> {
                Ok($crate::__private::serde_json::to_vec(self)?)
            }

            fn to_xml(&self) -> Result<String, $crate::errors::EncodeError> {
                Ok($crate::__private::quick_xml::se::to_string(self)?)
            }

            fn to_form(&self) -> Result<String, $crate::errors::EncodeError> {
                Ok($crate::__private::serde_urlencoded::to_string(self)?)
            }
        }

        impl $crate::codec::Decodable for $ty {
            fn from_json(bytes: &[u8]) -> Result<Self, $crate::errors::DecodeError> {
                Ok($crate::__private::serde_json::from_slice(bytes)?)
            }

            fn from_xml(text: &str) -> Result<Self, $crate::errors::DecodeError> {
                Ok($crate::__private::quick_xml::de::from_str(text)?)
            }
        }
    )+};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_report_the_codec_and_type() {
        let err = <String as Decodable>::from_wire(b"\x0a\x00").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("protobuf"), "{msg}");
        assert!(msg.contains("String"), "{msg}");
    }

    #[test]
    fn proto_wrapper_round_trips_through_the_wire_capability() {
        #[derive(Clone, PartialEq, prost::Message)]
        struct Ping {
            #[prost(string, tag = "1")]
            token: String,
            #[prost(uint32, tag = "2")]
            seq: u32,
        }

        let ping = Proto(Ping {
            token: "abc".into(),
            seq: 7,
        });

        let bytes = ping.to_wire().unwrap();
        let back = Proto::<Ping>::from_wire(&bytes).unwrap();
        assert_eq!(back, ping);
    }

    #[test]
    fn option_has_an_empty_form_even_for_types_without_one() {
        #[derive(Debug, serde::Serialize, serde::Deserialize, PartialEq)]
        struct Item {
            id: u32,
        }
        crate::serde_body!(Item);

        assert!(Item::empty().is_none());
        assert_eq!(Option::<Item>::empty(), Some(None));
    }
}
