//! Option Mirror
//!
//! Rebuilds entries and groups from the host's light-DOM children and keeps
//! the All / Visible / Available views consistent. Views are index lists
//! into `entries`, so Available ⊆ Visible ⊆ All holds by construction.

use nice_dom::{SourceKind, SourceNode};

use crate::entry::{EntryId, GroupId, OptionEntry, OptionGroup, RenderItem, Row};

/// Mirror of the host's options
#[derive(Debug, Default)]
pub struct OptionMirror {
    generation: u32,
    entries: Vec<OptionEntry>,
    groups: Vec<OptionGroup>,
    layout: Vec<RenderItem>,
    visible: Vec<EntryId>,
    available: Vec<EntryId>,
    filter: Option<String>,
}

impl OptionMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from scratch. Returns the entry that starts selected: the
    /// first retained option that is selected and enabled.
    pub fn rebuild(&mut self, nodes: &[SourceNode]) -> Option<EntryId> {
        self.generation = self.generation.wrapping_add(1);
        self.entries.clear();
        self.groups.clear();
        self.layout.clear();

        let mut initial = None;
        for node in nodes {
            self.add_node(node, None, &mut initial);
        }
        self.recompute();

        tracing::debug!(
            generation = self.generation,
            entries = self.entries.len(),
            groups = self.groups.len(),
            "option mirror rebuilt"
        );
        initial
    }

    fn add_node(&mut self, node: &SourceNode, group: Option<GroupId>, initial: &mut Option<EntryId>) {
        match &node.kind {
            SourceKind::OptGroup(source) => {
                if !has_retainable(&source.children) {
                    return;
                }
                // Rendered flat: an inner optgroup follows its parent's label
                let id = GroupId { generation: self.generation, index: self.groups.len() };
                self.groups.push(OptionGroup {
                    label: source.label.clone(),
                    entries: Vec::new(),
                    parent: group,
                    hidden: false,
                });
                self.layout.push(RenderItem::Group(id));

                for child in &source.children {
                    self.add_node(child, Some(id), initial);
                }
            }
            SourceKind::Option(option) => {
                if !is_retainable(node) {
                    return;
                }
                let id = EntryId { generation: self.generation, index: self.entries.len() };
                let mut entry = OptionEntry::from_source(node.id, option, group);

                // A disabled option never starts selected
                if option.selected && !option.disabled && initial.is_none() {
                    entry.selected = true;
                    *initial = Some(id);
                }
                self.entries.push(entry);

                match group {
                    Some(group) => self.groups[group.index].entries.push(id),
                    None => self.layout.push(RenderItem::Entry(id)),
                }
            }
            SourceKind::Text(_) | SourceKind::Element { .. } | SourceKind::Comment(_) => {}
        }
    }

    /// Filter by case-insensitive substring. `None` or an empty query
    /// shows every entry again.
    pub fn apply_filter(&mut self, query: Option<&str>) {
        self.filter = query.filter(|q| !q.is_empty()).map(str::to_string);
        self.recompute();
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    fn recompute(&mut self) {
        let generation = self.generation;
        let filter = self.filter.as_deref();

        for entry in &mut self.entries {
            let filtered_out = filter.is_some_and(|q| !entry.matches(q));
            entry.hidden = entry.source_hidden || filtered_out;
        }

        self.visible = self.entries.iter().enumerate()
            .filter(|(_, e)| !e.hidden)
            .map(|(index, _)| EntryId { generation, index })
            .collect();

        self.available = self.visible.iter()
            .copied()
            .filter(|id| !self.entries[id.index].disabled)
            .collect();

        for group in &mut self.groups {
            group.hidden = group.entries.iter().all(|id| self.entries[id.index].hidden);
        }
        // Children follow their parent, so walking backwards settles nesting
        for index in (0..self.groups.len()).rev() {
            let group = &self.groups[index];
            if let Some(parent) = group.parent.filter(|_| !group.hidden) {
                self.groups[parent.index].hidden = false;
            }
        }
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a handle. Handles from an earlier resync resolve to `None`.
    pub fn get(&self, id: EntryId) -> Option<&OptionEntry> {
        if id.generation != self.generation {
            return None;
        }
        self.entries.get(id.index)
    }

    pub fn group(&self, id: GroupId) -> Option<&OptionGroup> {
        if id.generation != self.generation {
            return None;
        }
        self.groups.get(id.index)
    }

    /// Every entry, in source order
    pub fn all(&self) -> Vec<EntryId> {
        (0..self.entries.len())
            .map(|index| EntryId { generation: self.generation, index })
            .collect()
    }

    /// Entries not hidden
    pub fn visible(&self) -> &[EntryId] {
        &self.visible
    }

    /// Entries visible and enabled
    pub fn available(&self) -> &[EntryId] {
        &self.available
    }

    pub fn entries(&self) -> impl Iterator<Item = (EntryId, &OptionEntry)> {
        let generation = self.generation;
        self.entries.iter().enumerate()
            .map(move |(index, entry)| (EntryId { generation, index }, entry))
    }

    pub fn groups(&self) -> impl Iterator<Item = (GroupId, &OptionGroup)> {
        let generation = self.generation;
        self.groups.iter().enumerate()
            .map(move |(index, group)| (GroupId { generation, index }, group))
    }

    /// Top-level render order
    pub fn layout(&self) -> &[RenderItem] {
        &self.layout
    }

    /// First available entry with `value`
    pub fn find_available(&self, value: &str) -> Option<EntryId> {
        self.available.iter()
            .copied()
            .find(|id| self.entries[id.index].value == value)
    }

    /// The entry carrying the selected flag
    pub fn selected(&self) -> Option<EntryId> {
        self.entries().find(|(_, e)| e.selected).map(|(id, _)| id)
    }

    /// Move the selected flag to `id`. Returns false for stale handles.
    pub fn mark_selected(&mut self, id: EntryId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        for entry in &mut self.entries {
            entry.selected = false;
        }
        self.entries[id.index].selected = true;
        true
    }

    /// Rows currently on screen: group labels and visible entries
    pub fn rows(&self) -> Vec<Row> {
        let mut rows = Vec::new();
        for item in &self.layout {
            match *item {
                RenderItem::Entry(id) => {
                    if !self.entries[id.index].hidden {
                        rows.push(Row::Entry(id));
                    }
                }
                RenderItem::Group(id) => {
                    let group = &self.groups[id.index];
                    if group.hidden {
                        continue;
                    }
                    if !group.label.trim().is_empty() {
                        rows.push(Row::GroupLabel(id));
                    }
                    rows.extend(
                        group.entries.iter()
                            .filter(|e| !self.entries[e.index].hidden)
                            .map(|e| Row::Entry(*e)),
                    );
                }
            }
        }
        rows
    }

    /// Row index of an entry, if it is on screen
    pub fn row_of(&self, id: EntryId) -> Option<usize> {
        self.rows().iter().position(|row| *row == Row::Entry(id))
    }
}

fn is_retainable(node: &SourceNode) -> bool {
    node.as_option().is_some_and(|o| !o.text.trim().is_empty())
}

fn has_retainable(nodes: &[SourceNode]) -> bool {
    nodes.iter().any(|n| is_retainable(n) || has_retainable(n.children()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nice_dom::{NodeId, OptGroupSource, OptionSource};

    fn nodes(list: Vec<SourceNode>) -> Vec<SourceNode> {
        list.into_iter()
            .enumerate()
            .map(|(i, mut n)| {
                n.id = NodeId(i as u32 + 1);
                n
            })
            .collect()
    }

    fn texts(mirror: &OptionMirror, ids: &[EntryId]) -> Vec<String> {
        ids.iter().map(|id| mirror.get(*id).unwrap().text().to_string()).collect()
    }

    #[test]
    fn test_rebuild_drops_blank_options() {
        let mut mirror = OptionMirror::new();
        mirror.rebuild(&nodes(vec![
            SourceNode::option(OptionSource::new("A")),
            SourceNode::option(OptionSource::new("   ")),
            SourceNode::text("\n"),
            SourceNode::element("div", "B"),
            SourceNode::option(OptionSource::new("C")),
        ]));

        assert_eq!(texts(&mirror, &mirror.all()), vec!["A", "C"]);
    }

    #[test]
    fn test_disabled_selected_is_not_selected() {
        let mut mirror = OptionMirror::new();
        let initial = mirror.rebuild(&nodes(vec![
            SourceNode::option(OptionSource::new("A")),
            SourceNode::option(OptionSource::new("B").disabled().selected()),
            SourceNode::option(OptionSource::new("C").selected()),
        ]));

        let c = initial.unwrap();
        assert_eq!(mirror.get(c).unwrap().text(), "C");
        assert_eq!(texts(&mirror, mirror.available()), vec!["A", "C"]);
        assert_eq!(mirror.entries().filter(|(_, e)| e.is_selected()).count(), 1);
    }

    #[test]
    fn test_first_selected_wins() {
        let mut mirror = OptionMirror::new();
        let initial = mirror.rebuild(&nodes(vec![
            SourceNode::option(OptionSource::new("A").selected()),
            SourceNode::option(OptionSource::new("B").selected()),
        ]));

        assert_eq!(mirror.get(initial.unwrap()).unwrap().text(), "A");
        assert_eq!(mirror.selected(), initial);
    }

    #[test]
    fn test_empty_group_is_dropped() {
        let mut mirror = OptionMirror::new();
        mirror.rebuild(&nodes(vec![
            SourceNode::optgroup(OptGroupSource::new("Empty").with_option(OptionSource::new(" "))),
            SourceNode::optgroup(OptGroupSource::new("Fruit").with_option(OptionSource::new("Apple"))),
        ]));

        let labels: Vec<&str> = mirror.groups().map(|(_, g)| g.label()).collect();
        assert_eq!(labels, vec!["Fruit"]);
        assert_eq!(mirror.layout().len(), 1);
    }

    #[test]
    fn test_nested_group_keeps_options() {
        let mut mirror = OptionMirror::new();
        mirror.rebuild(&nodes(vec![
            SourceNode::optgroup(
                OptGroupSource::new("Outer")
                    .with_child(SourceNode::optgroup(OptGroupSource::new("Inner").with_option(OptionSource::new("Apple")))),
            ),
        ]));

        assert_eq!(texts(&mirror, &mirror.all()), vec!["Apple"]);
        let labels: Vec<&str> = mirror.groups().map(|(_, g)| g.label()).collect();
        assert_eq!(labels, vec!["Outer", "Inner"]);

        let (outer, _) = mirror.groups().next().unwrap();
        let (inner, group) = mirror.groups().nth(1).unwrap();
        assert_eq!(group.parent(), Some(outer));
        let apple = mirror.all()[0];
        assert_eq!(mirror.get(apple).unwrap().group(), Some(inner));
        assert_eq!(mirror.rows(), vec![Row::GroupLabel(outer), Row::GroupLabel(inner), Row::Entry(apple)]);

        mirror.apply_filter(Some("x"));
        assert!(mirror.groups().all(|(_, g)| g.is_hidden()));
        assert!(mirror.rows().is_empty());

        mirror.apply_filter(Some("app"));
        assert!(mirror.groups().all(|(_, g)| !g.is_hidden()));
    }

    #[test]
    fn test_filter_and_group_visibility() {
        let mut mirror = OptionMirror::new();
        mirror.rebuild(&nodes(vec![
            SourceNode::optgroup(
                OptGroupSource::new("Red")
                    .with_option(OptionSource::new("Apple"))
                    .with_option(OptionSource::new("Cherry")),
            ),
            SourceNode::optgroup(OptGroupSource::new("Blue").with_option(OptionSource::new("Blueberry"))),
        ]));

        mirror.apply_filter(Some("BLUE"));
        assert_eq!(texts(&mirror, mirror.visible()), vec!["Blueberry"]);
        let hidden: Vec<bool> = mirror.groups().map(|(_, g)| g.is_hidden()).collect();
        assert_eq!(hidden, vec![true, false]);

        mirror.apply_filter(Some(""));
        assert_eq!(mirror.visible().len(), 3);
        assert!(mirror.groups().all(|(_, g)| !g.is_hidden()));
    }

    #[test]
    fn test_source_hidden_stays_hidden() {
        let mut mirror = OptionMirror::new();
        mirror.rebuild(&nodes(vec![
            SourceNode::option(OptionSource::new("Choose").hidden()),
            SourceNode::option(OptionSource::new("Apple")),
        ]));

        assert_eq!(texts(&mirror, mirror.visible()), vec!["Apple"]);
        mirror.apply_filter(Some("o"));
        mirror.apply_filter(None);
        assert_eq!(texts(&mirror, mirror.visible()), vec!["Apple"]);
    }

    #[test]
    fn test_stale_handles_do_not_resolve() {
        let mut mirror = OptionMirror::new();
        mirror.rebuild(&nodes(vec![SourceNode::option(OptionSource::new("A"))]));
        let old = mirror.all()[0];

        mirror.rebuild(&nodes(vec![SourceNode::option(OptionSource::new("A"))]));
        assert!(mirror.get(old).is_none());
        assert!(!mirror.mark_selected(old));
    }

    #[test]
    fn test_rows() {
        let mut mirror = OptionMirror::new();
        mirror.rebuild(&nodes(vec![
            SourceNode::option(OptionSource::new("Loose")),
            SourceNode::optgroup(
                OptGroupSource::new("Group")
                    .with_option(OptionSource::new("One"))
                    .with_option(OptionSource::new("Two")),
            ),
            SourceNode::optgroup(OptGroupSource::new("").with_option(OptionSource::new("Three"))),
        ]));

        let rows = mirror.rows();
        assert_eq!(rows.len(), 5);
        assert!(matches!(rows[1], Row::GroupLabel(_)));

        let three = mirror.all()[3];
        assert_eq!(mirror.row_of(three), Some(4));
    }
}
