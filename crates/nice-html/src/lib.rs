//! nice-html
//!
//! Reads `<nice-select>` markup with html5ever and converts the element's
//! children into light-DOM source nodes.

mod parser;

pub use parser::MarkupParser;

use nice_dom::SourceNode;

/// A host element found in markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostMarkup {
    pub tag: String,
    /// Attributes in source order
    pub attributes: Vec<(String, String)>,
    pub children: Vec<SourceNode>,
}

impl HostMarkup {
    /// Attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("No <{tag}> element in markup")]
    HostNotFound { tag: String },
}

/// Find the first `tag` element in `html`
pub fn parse_host(html: &str, tag: &str) -> Result<HostMarkup, ParseError> {
    MarkupParser::new().parse_host(html, tag)
}

/// Convert the body children of `html` into source nodes
pub fn parse_children(html: &str) -> Vec<SourceNode> {
    MarkupParser::new().parse_children(html)
}
