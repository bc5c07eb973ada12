//! Source Nodes
//!
//! Light-DOM children of a host element, as supplied by markup or script.

use crate::NodeId;

/// A light-DOM node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceNode {
    pub id: NodeId,
    pub kind: SourceKind,
}

/// What a light-DOM node is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    Option(OptionSource),
    OptGroup(OptGroupSource),
    Text(String),
    /// Any element other than `option`/`optgroup`
    Element { tag: String, text: String },
    Comment(String),
}

/// `<option>` description
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSource {
    pub text: String,
    /// The `value` attribute, if present
    pub value: Option<String>,
    pub selected: bool,
    pub disabled: bool,
    pub hidden: bool,
}

/// `<optgroup>` description
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptGroupSource {
    pub label: String,
    pub children: Vec<SourceNode>,
}

/// Boolean attributes of an option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionFlag {
    Selected,
    Disabled,
    Hidden,
}

impl OptionFlag {
    /// Attribute name
    pub fn attribute_name(self) -> &'static str {
        match self {
            Self::Selected => "selected",
            Self::Disabled => "disabled",
            Self::Hidden => "hidden",
        }
    }
}

impl OptionSource {
    /// Create an option with text and no `value` attribute
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set the `value` attribute
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Mark as selected
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    /// Mark as disabled
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Mark as hidden
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// The option's value: the `value` attribute, or its text when absent
    pub fn value(&self) -> String {
        match &self.value {
            Some(value) => value.clone(),
            None => self.text.split_whitespace().collect::<Vec<_>>().join(" "),
        }
    }

    pub fn flag(&self, flag: OptionFlag) -> bool {
        match flag {
            OptionFlag::Selected => self.selected,
            OptionFlag::Disabled => self.disabled,
            OptionFlag::Hidden => self.hidden,
        }
    }

    pub fn set_flag(&mut self, flag: OptionFlag, on: bool) {
        match flag {
            OptionFlag::Selected => self.selected = on,
            OptionFlag::Disabled => self.disabled = on,
            OptionFlag::Hidden => self.hidden = on,
        }
    }
}

impl OptGroupSource {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Add a child node
    pub fn with_child(mut self, child: SourceNode) -> Self {
        self.children.push(child);
        self
    }

    /// Add an option child
    pub fn with_option(self, option: OptionSource) -> Self {
        self.with_child(SourceNode::option(option))
    }
}

impl SourceNode {
    /// Detached node of the given kind
    pub fn new(kind: SourceKind) -> Self {
        Self { id: NodeId::NONE, kind }
    }

    pub fn option(option: OptionSource) -> Self {
        Self::new(SourceKind::Option(option))
    }

    pub fn optgroup(group: OptGroupSource) -> Self {
        Self::new(SourceKind::OptGroup(group))
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(SourceKind::Text(text.into()))
    }

    pub fn element(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(SourceKind::Element { tag: tag.into(), text: text.into() })
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self::new(SourceKind::Comment(text.into()))
    }

    /// Node name, uppercased like `Node.nodeName`
    pub fn node_name(&self) -> String {
        match &self.kind {
            SourceKind::Option(_) => "OPTION".to_string(),
            SourceKind::OptGroup(_) => "OPTGROUP".to_string(),
            SourceKind::Text(_) => "#text".to_string(),
            SourceKind::Element { tag, .. } => tag.to_ascii_uppercase(),
            SourceKind::Comment(_) => "#comment".to_string(),
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match &self.kind {
            SourceKind::Option(option) => option.text.clone(),
            SourceKind::OptGroup(group) => group.children.iter().map(|c| c.text_content()).collect(),
            SourceKind::Text(text) => text.clone(),
            SourceKind::Element { text, .. } => text.clone(),
            SourceKind::Comment(_) => String::new(),
        }
    }

    /// Whether this node may stay in a select's light DOM
    pub fn is_option_like(&self) -> bool {
        matches!(self.kind, SourceKind::Option(_) | SourceKind::OptGroup(_))
    }

    pub fn as_option(&self) -> Option<&OptionSource> {
        match &self.kind {
            SourceKind::Option(option) => Some(option),
            _ => None,
        }
    }

    pub fn as_option_mut(&mut self) -> Option<&mut OptionSource> {
        match &mut self.kind {
            SourceKind::Option(option) => Some(option),
            _ => None,
        }
    }

    pub fn as_optgroup(&self) -> Option<&OptGroupSource> {
        match &self.kind {
            SourceKind::OptGroup(group) => Some(group),
            _ => None,
        }
    }

    /// Direct children (only optgroups have any)
    pub fn children(&self) -> &[SourceNode] {
        match &self.kind {
            SourceKind::OptGroup(group) => &group.children,
            _ => &[],
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<SourceNode>> {
        match &mut self.kind {
            SourceKind::OptGroup(group) => Some(&mut group.children),
            _ => None,
        }
    }
}
