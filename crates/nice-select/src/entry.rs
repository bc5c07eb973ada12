//! Option entries and groups
//!
//! The mirrored copies of the host's `<option>` and `<optgroup>` children.

use nice_dom::{NodeId, OptionSource};

/// Handle to an entry in the mirror
///
/// Handles carry the generation of the resync that produced them, so a
/// handle kept across a resync no longer resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId {
    pub(crate) generation: u32,
    pub(crate) index: usize,
}

/// Handle to a group in the mirror
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId {
    pub(crate) generation: u32,
    pub(crate) index: usize,
}

/// One selectable choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    pub(crate) source: NodeId,
    pub(crate) text: String,
    pub(crate) value: String,
    pub(crate) disabled: bool,
    /// Hidden by the source markup
    pub(crate) source_hidden: bool,
    /// Hidden by the source markup or the search filter
    pub(crate) hidden: bool,
    pub(crate) selected: bool,
    pub(crate) group: Option<GroupId>,
}

/// Labelled, non-selectable cluster of entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionGroup {
    pub(crate) label: String,
    pub(crate) entries: Vec<EntryId>,
    pub(crate) parent: Option<GroupId>,
    pub(crate) hidden: bool,
}

/// Top-level item of the rendered option list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderItem {
    Entry(EntryId),
    Group(GroupId),
}

/// A row of the option list as laid out on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    GroupLabel(GroupId),
    Entry(EntryId),
}

impl OptionEntry {
    /// Clone a source option. The selected flag starts cleared; the mirror
    /// decides which entry ends up selected.
    pub(crate) fn from_source(source: NodeId, option: &OptionSource, group: Option<GroupId>) -> Self {
        Self {
            source,
            text: option.text.clone(),
            value: option.value(),
            disabled: option.disabled,
            source_hidden: option.hidden,
            hidden: option.hidden,
            selected: false,
            group,
        }
    }

    /// Display text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Light-DOM option this entry was cloned from
    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    /// Case-insensitive substring match on the display text
    pub fn matches(&self, query: &str) -> bool {
        self.text.to_lowercase().contains(&query.to_lowercase())
    }
}

impl OptionGroup {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn entries(&self) -> &[EntryId] {
        &self.entries
    }

    /// Enclosing optgroup, when nested
    pub fn parent(&self) -> Option<GroupId> {
        self.parent
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}
