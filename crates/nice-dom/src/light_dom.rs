//! Light DOM
//!
//! The host element's own children. Every structural, attribute or text
//! change is reported to the attached mutation observer.

use crate::document::NodeIds;
use crate::node::{OptionFlag, OptionSource, SourceNode};
use crate::observer::{MutationObserver, MutationObserverInit, MutationRecord};
use crate::NodeId;

/// Children of a host element
#[derive(Debug)]
pub struct LightDom {
    host: NodeId,
    ids: NodeIds,
    children: Vec<SourceNode>,
    observer: MutationObserver,
}

impl LightDom {
    pub fn new(host: NodeId, ids: NodeIds) -> Self {
        Self {
            host,
            ids,
            children: Vec::new(),
            observer: MutationObserver::new(),
        }
    }

    pub fn host(&self) -> NodeId {
        self.host
    }

    pub fn children(&self) -> &[SourceNode] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Append a child to the host
    pub fn append(&mut self, node: SourceNode) -> NodeId {
        let index = self.children.len();
        self.insert(index, node)
    }

    /// Insert a child at `index` (clamped to the child count)
    pub fn insert(&mut self, index: usize, mut node: SourceNode) -> NodeId {
        self.assign_ids(&mut node);
        let id = node.id;
        let index = index.min(self.children.len());
        self.children.insert(index, node);
        self.notify(MutationRecord::child_list(self.host, vec![id], Vec::new()));
        id
    }

    /// Append a child to an optgroup
    pub fn append_to(&mut self, parent: NodeId, mut node: SourceNode) -> Option<NodeId> {
        self.assign_ids(&mut node);
        let id = node.id;
        let children = find_mut(&mut self.children, parent)?.children_mut()?;
        children.push(node);
        self.notify(MutationRecord::child_list(parent, vec![id], Vec::new()));
        Some(id)
    }

    /// Remove a node anywhere in the light tree
    pub fn remove(&mut self, id: NodeId) -> Option<SourceNode> {
        let (parent, node) = remove_from(&mut self.children, id, self.host)?;
        self.notify(MutationRecord::child_list(parent, Vec::new(), vec![id]));
        Some(node)
    }

    /// Replace every child of the host in one mutation
    pub fn replace_children(&mut self, nodes: Vec<SourceNode>) -> Vec<NodeId> {
        let removed: Vec<NodeId> = self.children.iter().map(|c| c.id).collect();
        let mut added = Vec::with_capacity(nodes.len());
        self.children.clear();

        for mut node in nodes {
            self.assign_ids(&mut node);
            added.push(node.id);
            self.children.push(node);
        }

        self.notify(MutationRecord::child_list(self.host, added.clone(), removed));
        added
    }

    /// Remove host children that are neither options nor optgroups
    pub fn prune_invalid(&mut self) -> usize {
        let invalid: Vec<NodeId> = self.children.iter()
            .filter(|c| !c.is_option_like())
            .map(|c| c.id)
            .collect();

        for id in &invalid {
            self.remove(*id);
        }
        invalid.len()
    }

    /// Replace an option's text
    pub fn set_option_text(&mut self, id: NodeId, text: impl Into<String>) -> bool {
        let Some(option) = find_mut(&mut self.children, id).and_then(|n| n.as_option_mut()) else {
            return false;
        };
        let old = std::mem::replace(&mut option.text, text.into());
        self.notify(MutationRecord::character_data(id, old));
        true
    }

    /// Set or clear an option's `value` attribute
    pub fn set_option_value(&mut self, id: NodeId, value: Option<String>) -> bool {
        let Some(option) = find_mut(&mut self.children, id).and_then(|n| n.as_option_mut()) else {
            return false;
        };
        let old = std::mem::replace(&mut option.value, value);
        self.notify(MutationRecord::attribute(id, "value", old));
        true
    }

    /// Toggle a boolean attribute on an option. Returns whether it changed.
    pub fn set_option_flag(&mut self, id: NodeId, flag: OptionFlag, on: bool) -> bool {
        let Some(option) = find_mut(&mut self.children, id).and_then(|n| n.as_option_mut()) else {
            return false;
        };
        if option.flag(flag) == on {
            return false;
        }
        option.set_flag(flag, on);
        let old = if on { None } else { Some(String::new()) };
        self.notify(MutationRecord::attribute(id, flag.attribute_name(), old));
        true
    }

    pub fn find(&self, id: NodeId) -> Option<&SourceNode> {
        find(&self.children, id)
    }

    /// All options in tree order, including those inside optgroups
    pub fn options(&self) -> Vec<(NodeId, &OptionSource)> {
        let mut out = Vec::new();
        collect_options(&self.children, &mut out);
        out
    }

    pub fn observer(&self) -> &MutationObserver {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut MutationObserver {
        &mut self.observer
    }

    /// Observe this host with the given options
    pub fn observe(&mut self, options: MutationObserverInit) {
        let host = self.host;
        self.observer.observe(host, options);
    }

    pub fn take_records(&mut self) -> Vec<MutationRecord> {
        self.observer.take_records()
    }

    fn notify(&mut self, record: MutationRecord) {
        let in_subtree = record.target != self.host;
        self.observer.enqueue(record, in_subtree);
    }

    fn assign_ids(&self, node: &mut SourceNode) {
        node.id = self.ids.next();
        if let Some(children) = node.children_mut() {
            for child in children {
                self.assign_ids(child);
            }
        }
    }
}

fn find(nodes: &[SourceNode], id: NodeId) -> Option<&SourceNode> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find(node.children(), id) {
            return Some(found);
        }
    }
    None
}

fn find_mut(nodes: &mut [SourceNode], id: NodeId) -> Option<&mut SourceNode> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(children) = node.children_mut() {
            if let Some(found) = find_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn remove_from(nodes: &mut Vec<SourceNode>, id: NodeId, parent: NodeId) -> Option<(NodeId, SourceNode)> {
    if let Some(index) = nodes.iter().position(|n| n.id == id) {
        return Some((parent, nodes.remove(index)));
    }
    for node in nodes.iter_mut() {
        let node_id = node.id;
        if let Some(children) = node.children_mut() {
            if let Some(found) = remove_from(children, id, node_id) {
                return Some(found);
            }
        }
    }
    None
}

fn collect_options<'a>(nodes: &'a [SourceNode], out: &mut Vec<(NodeId, &'a OptionSource)>) {
    for node in nodes {
        if let Some(option) = node.as_option() {
            out.push((node.id, option));
        }
        collect_options(node.children(), out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::OptGroupSource;
    use crate::observer::MutationType;
    use crate::Document;

    fn light() -> LightDom {
        let document = Document::new();
        let host = document.create_node_id();
        LightDom::new(host, document.node_ids())
    }

    #[test]
    fn test_append_assigns_ids() {
        let mut light = light();
        let group = light.append(SourceNode::optgroup(
            OptGroupSource::new("G").with_option(OptionSource::new("A")),
        ));

        let node = light.find(group).unwrap();
        assert!(node.children()[0].id.is_valid());
        assert_ne!(node.children()[0].id, group);
        assert_eq!(light.options().len(), 1);
    }

    #[test]
    fn test_records_only_when_observed() {
        let mut light = light();
        light.append(SourceNode::option(OptionSource::new("A")));
        assert!(light.take_records().is_empty());

        light.observe(MutationObserverInit::everything());
        let id = light.append(SourceNode::option(OptionSource::new("B")));
        light.set_option_flag(id, OptionFlag::Selected, true);
        light.set_option_text(id, "Bee");

        let kinds: Vec<MutationType> = light.take_records().iter().map(|r| r.mutation_type).collect();
        assert_eq!(kinds, vec![MutationType::ChildList, MutationType::Attributes, MutationType::CharacterData]);
    }

    #[test]
    fn test_unchanged_flag_is_silent() {
        let mut light = light();
        light.observe(MutationObserverInit::everything());
        let id = light.append(SourceNode::option(OptionSource::new("A")));
        light.take_records();

        assert!(!light.set_option_flag(id, OptionFlag::Disabled, false));
        assert!(light.take_records().is_empty());
    }

    #[test]
    fn test_remove_nested() {
        let mut light = light();
        let group = light.append(SourceNode::optgroup(OptGroupSource::new("G")));
        let child = light.append_to(group, SourceNode::option(OptionSource::new("A"))).unwrap();

        light.observe(MutationObserverInit::everything());
        let removed = light.remove(child).unwrap();
        assert_eq!(removed.text_content(), "A");

        let records = light.take_records();
        assert_eq!(records[0].target, group);
        assert_eq!(records[0].removed_nodes, vec![child]);
    }

    #[test]
    fn test_prune_invalid() {
        let mut light = light();
        light.append(SourceNode::text("\n  "));
        light.append(SourceNode::option(OptionSource::new("A")));
        light.append(SourceNode::element("div", "junk"));
        light.append(SourceNode::comment("c"));

        assert_eq!(light.prune_invalid(), 3);
        assert_eq!(light.len(), 1);
    }
}
