// src/codec.rs
//! Content-type driven codec dispatch: [`AutoEncoder`], [`AutoDecoder`] and
//! the body capability traits.
//!
//! The registry is fixed at construction: both dispatchers are immutable
//! once built and safe for concurrent use without locking. Overriding a
//! codec means substituting your own [`Encoder`]/[`Decoder`] implementation
//! on the client, not mutating a shared registry.

mod body;
mod decode;
mod encode;
mod form;
mod html;

pub use body::Decodable;
pub use body::Encodable;
pub use body::Proto;
pub use body::WireMessage;

pub use decode::AutoDecoder;
pub use decode::Decoder;
pub use encode::AutoEncoder;
pub use encode::Encoder;

pub use html::HtmlDocument;
