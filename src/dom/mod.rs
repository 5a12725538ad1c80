//! HTML parsing into an arena tree.
//!
//! ```
//! use epub2zefania::dom::parse_html;
//!
//! let dom = parse_html("<h3>Ruth</h3><p class='bi'>text</p>");
//! let h3 = dom.find_by_tag("h3").unwrap();
//! assert_eq!(dom.text(h3), "Ruth");
//! ```

mod arena;
mod tree_sink;

pub use arena::{Children, HtmlDom, NodeId};
use tree_sink::DomSink;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

/// Parse an HTML (or XHTML served as HTML) document.
///
/// Parsing never fails: malformed markup is repaired the way a browser would.
pub fn parse_html(html: &str) -> HtmlDom {
    parse_document(DomSink::new(), ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}
