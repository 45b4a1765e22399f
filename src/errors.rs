//! Error taxonomy for the codec and client layers.
//!
//! Codec-resolution failures ([`EncodeError`], [`DecodeError`]) are programmer
//! or configuration errors (wrong type declared for the content type) and are
//! never retried. Transport failures pass through [`ClientError::Transport`]
//! unchanged and are subject to the client's retry policy.

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("{type_name} cannot be encoded by the {codec} codec")]
    Unsupported {
        codec: &'static str,
        type_name: &'static str,
    },

    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML encode error: {0}")]
    Xml(#[from] quick_xml::SeError),

    #[error("form encode error: {0}")]
    Form(#[from] serde_urlencoded::ser::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("{type_name} cannot be decoded by the {codec} codec")]
    Unsupported {
        codec: &'static str,
        type_name: &'static str,
    },

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML decode error: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("protobuf decode error: {0}")]
    Wire(#[from] prost::DecodeError),

    #[error("HTML decode error: {0}")]
    Html(String),

    #[error("body is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    // Surfaced unchanged from the underlying HTTP client, possibly after
    // all retry attempts are exhausted.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl EncodeError {
    pub(crate) fn unsupported<T: ?Sized>(codec: &'static str) -> Self {
        EncodeError::Unsupported {
            codec,
            type_name: std::any::type_name::<T>(),
        }
    }
}

impl DecodeError {
    pub(crate) fn unsupported<T: ?Sized>(codec: &'static str) -> Self {
        DecodeError::Unsupported {
            codec,
            type_name: std::any::type_name::<T>(),
        }
    }
}
