// src/cookies.rs
//! Cookies: the [`Cookie`] value object and the [`CookieJar`] store.

mod cookie;
mod jar;

pub use cookie::Cookie;
pub use cookie::SESSION_EXPIRY;

pub use jar::CookieJar;
pub use jar::CookieJarHandle;
pub use jar::MemoryCookieJar;
