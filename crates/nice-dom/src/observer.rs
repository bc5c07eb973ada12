//! Mutation Observer
//!
//! Queues mutation records for an observed host element.

use crate::NodeId;

/// Mutation observer
#[derive(Debug, Default)]
pub struct MutationObserver {
    options: MutationObserverInit,
    observed: Option<NodeId>,
    records: Vec<MutationRecord>,
}

/// Mutation observer options
#[derive(Debug, Clone, Default)]
pub struct MutationObserverInit {
    pub child_list: bool,
    pub attributes: bool,
    pub character_data: bool,
    pub subtree: bool,
    pub attribute_filter: Option<Vec<String>>,
}

/// Mutation record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    pub mutation_type: MutationType,
    pub target: NodeId,
    pub added_nodes: Vec<NodeId>,
    pub removed_nodes: Vec<NodeId>,
    pub attribute_name: Option<String>,
    pub old_value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationType {
    Attributes,
    CharacterData,
    ChildList,
}

impl MutationObserverInit {
    /// Everything below the target: children, attributes and text
    pub fn everything() -> Self {
        Self {
            child_list: true,
            attributes: true,
            character_data: true,
            subtree: true,
            attribute_filter: None,
        }
    }
}

impl MutationRecord {
    pub fn child_list(target: NodeId, added_nodes: Vec<NodeId>, removed_nodes: Vec<NodeId>) -> Self {
        Self {
            mutation_type: MutationType::ChildList,
            target,
            added_nodes,
            removed_nodes,
            attribute_name: None,
            old_value: None,
        }
    }

    pub fn attribute(target: NodeId, name: &str, old_value: Option<String>) -> Self {
        Self {
            mutation_type: MutationType::Attributes,
            target,
            added_nodes: Vec::new(),
            removed_nodes: Vec::new(),
            attribute_name: Some(name.to_string()),
            old_value,
        }
    }

    pub fn character_data(target: NodeId, old_value: String) -> Self {
        Self {
            mutation_type: MutationType::CharacterData,
            target,
            added_nodes: Vec::new(),
            removed_nodes: Vec::new(),
            attribute_name: None,
            old_value: Some(old_value),
        }
    }
}

impl MutationObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing `target`, replacing any previous observation
    pub fn observe(&mut self, target: NodeId, options: MutationObserverInit) {
        self.options = options;
        self.observed = Some(target);
    }

    /// Stop observing and drop queued records
    pub fn disconnect(&mut self) {
        self.observed = None;
        self.records.clear();
    }

    pub fn is_observing(&self) -> bool {
        self.observed.is_some()
    }

    pub fn take_records(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.records)
    }

    pub fn has_pending(&self) -> bool {
        !self.records.is_empty()
    }

    /// Queue `record` if it matches the observation. `in_subtree` is true
    /// when the record's target is a descendant of the observed node.
    pub fn enqueue(&mut self, record: MutationRecord, in_subtree: bool) -> bool {
        let Some(observed) = self.observed else {
            return false;
        };

        let matches_target = if in_subtree {
            self.options.subtree
        } else {
            record.target == observed
        };

        let matches_type = match record.mutation_type {
            MutationType::Attributes => self.options.attributes,
            MutationType::CharacterData => self.options.character_data,
            MutationType::ChildList => self.options.child_list,
        };

        let passes_filter = match (&self.options.attribute_filter, &record.attribute_name) {
            (Some(filter), Some(name)) => filter.iter().any(|f| f == name),
            _ => true,
        };

        if matches_target && matches_type && passes_filter {
            self.records.push(record);
            true
        } else {
            tracing::trace!(kind = ?record.mutation_type, target = record.target.0, "mutation not observed");
            false
        }
    }
}
