//! HTML document decoding.
//!
//! The HTML codec only exists on the decode side: an auto-detected
//! `text/html` response parses into an [`HtmlDocument`], and only declared
//! return types with the [`Decodable::from_html`] capability accept one.
//!
//! [`Decodable::from_html`]: crate::codec::Decodable::from_html

use crate::codec::Decodable;
use crate::errors::DecodeError;
use url::Url;

/// A parsed HTML response.
///
/// The document is parsed once at construction; queries run against the
/// owned DOM. The URL the document was fetched from is kept alongside it.
pub struct HtmlDocument {
    url: Option<Url>,
    source: String,
    dom: tl::VDomGuard,
}

impl HtmlDocument {
    /// Parses `source`, failing with [`DecodeError::Html`] when the parser
    /// rejects it.
    pub fn parse(source: String, url: Option<Url>) -> Result<HtmlDocument, DecodeError> {
        // SAFETY: `VDomGuard` owns the backing string for the DOM's lifetime.
        let dom = unsafe { tl::parse_owned(source.clone(), tl::ParserOptions::default()) }
            .map_err(|e| DecodeError::Html(e.to_string()))?;
        Ok(HtmlDocument { url, source, dom })
    }

    /// URL the document was fetched from, if known.
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// Raw document text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Inner text of the first node matching a CSS selector.
    pub fn select_text(&self, selector: &str) -> Option<String> {
        let dom = self.dom.get_ref();
        let parser = dom.parser();
        let handle = dom.query_selector(selector)?.next()?;
        Some(handle.get(parser)?.inner_text(parser).into_owned())
    }

    /// The `<title>` text, if present.
    pub fn title(&self) -> Option<String> {
        self.select_text("title")
    }
}

impl std::fmt::Debug for HtmlDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlDocument")
            .field("url", &self.url)
            .field("source_len", &self.source.len())
            .finish()
    }
}

impl Decodable for HtmlDocument {
    fn from_html(doc: HtmlDocument) -> Result<Self, DecodeError> {
        Ok(doc)
    }

    // A textual body with no recognizable content type can still be parsed
    // as a document when the caller asked for one.
    fn from_text(text: String) -> Result<Self, DecodeError> {
        HtmlDocument::parse(text, None)
    }
}
