//! Markup parser implementation
//!
//! Uses html5ever's RcDom and converts the relevant subtree to source nodes.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use nice_dom::{OptGroupSource, OptionSource, SourceNode};

use crate::{HostMarkup, ParseError};

/// Markup parser
pub struct MarkupParser;

impl MarkupParser {
    pub fn new() -> Self {
        Self
    }

    /// Find the first `tag` element and convert its children
    pub fn parse_host(&self, html: &str, tag: &str) -> Result<HostMarkup, ParseError> {
        let dom = self.parse_dom(html);
        let host = find_element(&dom.document, tag).ok_or_else(|| ParseError::HostNotFound {
            tag: tag.to_string(),
        })?;

        let attributes = match &host.data {
            NodeData::Element { attrs, .. } => attrs.borrow().iter()
                .map(|a| (a.name.local.to_string(), a.value.to_string()))
                .collect(),
            _ => Vec::new(),
        };
        let children = self.convert_children(&host);
        tracing::debug!(tag, children = children.len(), "parsed host markup");

        Ok(HostMarkup {
            tag: tag.to_string(),
            attributes,
            children,
        })
    }

    /// Convert the children of `<body>`
    pub fn parse_children(&self, html: &str) -> Vec<SourceNode> {
        let dom = self.parse_dom(html);
        match find_element(&dom.document, "body") {
            Some(body) => self.convert_children(&body),
            None => Vec::new(),
        }
    }

    fn parse_dom(&self, html: &str) -> RcDom {
        parse_document(RcDom::default(), Default::default()).one(html)
    }

    fn convert_children(&self, handle: &Handle) -> Vec<SourceNode> {
        handle.children.borrow().iter()
            .filter_map(|child| self.convert_node(child))
            .collect()
    }

    fn convert_node(&self, handle: &Handle) -> Option<SourceNode> {
        match &handle.data {
            NodeData::Text { contents } => Some(SourceNode::text(contents.borrow().to_string())),
            NodeData::Comment { contents } => Some(SourceNode::comment(contents.to_string())),
            NodeData::Element { name, attrs, .. } => {
                let attrs = attrs.borrow();
                let attr = |key: &str| attrs.iter()
                    .find(|a| &*a.name.local == key)
                    .map(|a| a.value.to_string());

                let node = match &*name.local {
                    "option" => {
                        let mut option = OptionSource::new(text_content(handle));
                        option.value = attr("value");
                        option.selected = attr("selected").is_some();
                        option.disabled = attr("disabled").is_some();
                        option.hidden = attr("hidden").is_some();
                        SourceNode::option(option)
                    }
                    "optgroup" => {
                        let mut group = OptGroupSource::new(attr("label").unwrap_or_default());
                        group.children = self.convert_children(handle);
                        SourceNode::optgroup(group)
                    }
                    other => SourceNode::element(other, text_content(handle)),
                };
                Some(node)
            }
            NodeData::Document
            | NodeData::Doctype { .. }
            | NodeData::ProcessingInstruction { .. } => None,
        }
    }
}

impl Default for MarkupParser {
    fn default() -> Self {
        Self::new()
    }
}

fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    if let NodeData::Element { name, .. } = &handle.data {
        if &*name.local == tag {
            return Some(handle.clone());
        }
    }
    handle.children.borrow().iter().find_map(|child| find_element(child, tag))
}

fn text_content(handle: &Handle) -> String {
    let mut text = String::new();
    collect_text(handle, &mut text);
    text
}

fn collect_text(handle: &Handle, out: &mut String) {
    if let NodeData::Text { contents } = &handle.data {
        out.push_str(&contents.borrow());
    }
    for child in handle.children.borrow().iter() {
        collect_text(child, out);
    }
}
