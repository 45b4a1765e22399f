//! restbind: declarative HTTP client core.
//!
//! Two subsystems do the real work: a content-type driven codec dispatch
//! ([`codec`]) and an in-memory cookie store with expiry-based eviction
//! ([`cookies`]). The [`client`] module ties them to a reqwest transport with
//! a fixed count/backoff retry policy.

pub mod client;
pub mod codec;
pub mod config;
pub mod cookies;
pub mod errors;
pub mod media;
pub mod request;
pub mod response;

pub use client::{Client, ClientBuilder};
pub use codec::{
    AutoDecoder, AutoEncoder, Decodable, Decoder, Encodable, Encoder, HtmlDocument, Proto,
    WireMessage,
};
pub use config::{ClientConfig, RetryConfig};
pub use cookies::{Cookie, CookieJar, CookieJarHandle, MemoryCookieJar};
pub use errors::{ClientError, DecodeError, EncodeError};
pub use media::MediaType;
pub use request::RequestTemplate;
pub use response::Response;

// Re-exports for the serde_body! macro expansion; not public API.
#[doc(hidden)]
pub mod __private {
    pub use quick_xml;
    pub use serde_json;
    pub use serde_urlencoded;
}
