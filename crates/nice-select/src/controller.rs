//! Selection Controller
//!
//! Owns the option mirror and resolves pointer, keyboard and programmatic
//! interaction into one current value, published through the element's
//! internals.

use nice_dom::{ElementInternals, SourceNode, ValidityState};

use crate::config::{DEFAULT_PLACEHOLDER, DEFAULT_VALIDITY_MESSAGE};
use crate::entry::{EntryId, OptionEntry};
use crate::error::{Result, SelectError};
use crate::mirror::OptionMirror;
use crate::navigation::Direction;
use crate::search::SearchMode;

/// Shown in place of an empty option text
pub const BLANK_LABEL: &str = "\u{a0}";

/// Custom state set while the value is non-empty
pub const STATE_VALID: &str = "valid";
/// Custom state set once the user picked an option
pub const STATE_INTERACTED: &str = "interacted";
/// Custom state set while the dropdown is expanded
pub const STATE_OPEN: &str = "open";

/// Selection lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
    Unselected,
    /// A value has been chosen. Never returns to `Unselected`.
    Selected { value: String },
}

/// Change notification, one per committed selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub entry: EntryId,
    pub value: String,
}

/// Outcome of a resync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub entries: usize,
    pub visible: usize,
    pub available: usize,
    /// Entry that became current, if any
    pub current: Option<EntryId>,
    /// Whether the resync committed a new selection
    pub changed: bool,
}

/// Option mirror and selection state machine
#[derive(Debug)]
pub struct SelectionController {
    mirror: OptionMirror,
    search: SearchMode,
    current: Option<EntryId>,
    state: SelectionState,
    internals: ElementInternals,
    label: String,
    placeholder: String,
    validity_message: String,
    changes: Vec<ChangeEvent>,
}

impl SelectionController {
    pub fn new(placeholder: &str, validity_message: &str) -> Self {
        let mut internals = ElementInternals::new();
        internals.set_validity(ValidityState::missing(), validity_message);

        Self {
            mirror: OptionMirror::new(),
            search: SearchMode::Plain,
            current: None,
            state: SelectionState::Unselected,
            internals,
            label: placeholder.to_string(),
            placeholder: placeholder.to_string(),
            validity_message: validity_message.to_string(),
            changes: Vec::new(),
        }
    }

    /// Rebuild the mirror from the host's children.
    ///
    /// The first selected-and-enabled option becomes current. Without one,
    /// an entry carrying the already published value stays current.
    pub fn sync(&mut self, nodes: &[SourceNode]) -> SyncReport {
        let initial = self.mirror.rebuild(nodes);
        if let Some(query) = self.search.query().map(str::to_string) {
            self.mirror.apply_filter(Some(&query));
        }

        let mut changed = false;
        self.current = None;

        match initial {
            Some(id) if self.is_published(id) => self.restore(id),
            Some(id) => {
                changed = self.select(id);
            }
            None => {
                let previous = match &self.state {
                    SelectionState::Selected { value } => self.mirror.find_available(value),
                    SelectionState::Unselected => None,
                };
                if let Some(id) = previous {
                    self.restore(id);
                }
            }
        }

        SyncReport {
            entries: self.mirror.len(),
            visible: self.mirror.visible().len(),
            available: self.mirror.available().len(),
            current: self.current,
            changed,
        }
    }

    /// Make `id` current again without publishing or notifying
    fn restore(&mut self, id: EntryId) {
        let Some(entry) = self.mirror.get(id) else {
            return;
        };
        self.label = label_for(entry);
        self.mirror.mark_selected(id);
        self.current = Some(id);
    }

    fn is_published(&self, id: EntryId) -> bool {
        match (&self.state, self.mirror.get(id)) {
            (SelectionState::Selected { value }, Some(entry)) => entry.value() == value,
            _ => false,
        }
    }

    /// Filter entries by display text. `None` or an empty query clears it.
    pub fn set_search_filter(&mut self, query: Option<&str>) {
        self.search.set_query(query.unwrap_or_default());
        self.mirror.apply_filter(query);
    }

    /// Commit `id` as the current entry. Absent, stale and disabled entries
    /// are ignored.
    pub fn select(&mut self, id: EntryId) -> bool {
        let Some(entry) = self.mirror.get(id) else {
            tracing::trace!(?id, "select ignored: no such entry");
            return false;
        };
        if entry.is_disabled() {
            tracing::trace!(?id, "select ignored: entry disabled");
            return false;
        }

        let value = entry.value().to_string();
        let label = label_for(entry);

        self.mirror.mark_selected(id);
        self.current = Some(id);
        self.label = label;
        self.publish(&value);

        tracing::debug!(value = %value, "option selected");
        self.changes.push(ChangeEvent { entry: id, value: value.clone() });
        self.state = SelectionState::Selected { value };
        true
    }

    fn publish(&mut self, value: &str) {
        self.internals.set_form_value(Some(value));
        self.refresh_validity(value.is_empty());
    }

    fn refresh_validity(&mut self, missing: bool) {
        if missing {
            self.internals.states_mut().delete(STATE_VALID);
            self.internals.set_validity(ValidityState::missing(), &self.validity_message);
        } else {
            self.internals.states_mut().add(STATE_VALID);
            self.internals.set_validity(ValidityState::default(), &self.validity_message);
        }
    }

    /// Step through available entries with wrap-around
    pub fn move_selection(&mut self, direction: Direction) -> Option<EntryId> {
        let target = direction.step(self.mirror.available(), self.current)?;
        if !self.select(target) {
            return None;
        }
        self.mark_interacted();
        Some(target)
    }

    /// Select the available entry whose value is `value`
    pub fn set_value(&mut self, value: &str) -> Result<EntryId> {
        let Some(id) = self.mirror.find_available(value) else {
            tracing::warn!(value, "rejected value assignment");
            return Err(SelectError::InvalidOption(value.to_string()));
        };
        self.select(id);
        Ok(id)
    }

    /// Published value, `None` while empty
    pub fn value(&self) -> Option<&str> {
        match &self.state {
            SelectionState::Selected { value } if !value.is_empty() => Some(value),
            _ => None,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn current(&self) -> Option<EntryId> {
        self.current
    }

    pub fn current_entry(&self) -> Option<&OptionEntry> {
        self.current.and_then(|id| self.mirror.get(id))
    }

    pub fn mirror(&self) -> &OptionMirror {
        &self.mirror
    }

    pub fn search(&self) -> &SearchMode {
        &self.search
    }

    /// Turn the search capability on or off. Turning it off clears the
    /// filter. Returns whether the mode changed.
    pub fn set_search_enabled(&mut self, enabled: bool, placeholder: &str) -> bool {
        if enabled {
            return self.search.enable(placeholder);
        }
        if !self.search.disable() {
            return false;
        }
        self.mirror.apply_filter(None);
        true
    }

    pub fn set_search_placeholder(&mut self, placeholder: &str) {
        self.search.set_placeholder(placeholder);
    }

    /// Text of the presentation surface
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_placeholder(&mut self, placeholder: Option<&str>) {
        self.placeholder = placeholder.unwrap_or(DEFAULT_PLACEHOLDER).to_string();
        if self.state == SelectionState::Unselected {
            self.label = self.placeholder.clone();
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Change the missing-value message, re-reporting it if the value is
    /// currently missing
    pub fn set_validity_message(&mut self, message: Option<&str>) {
        self.validity_message = message.unwrap_or(DEFAULT_VALIDITY_MESSAGE).to_string();
        if self.internals.validity().value_missing {
            self.refresh_validity(true);
        }
    }

    pub fn validity(&self) -> &ValidityState {
        self.internals.validity()
    }

    pub fn validation_message(&self) -> &str {
        self.internals.validation_message()
    }

    pub fn check_validity(&self) -> bool {
        self.internals.check_validity()
    }

    pub fn report_validity(&mut self) -> bool {
        self.internals.report_validity()
    }

    pub fn form_value(&self) -> Option<&str> {
        self.internals.form_value()
    }

    pub fn internals(&self) -> &ElementInternals {
        &self.internals
    }

    pub fn mark_interacted(&mut self) {
        self.internals.states_mut().add(STATE_INTERACTED);
    }

    pub fn interacted(&self) -> bool {
        self.internals.states().has(STATE_INTERACTED)
    }

    pub fn set_open(&mut self, open: bool) {
        self.internals.states_mut().toggle(STATE_OPEN, open);
    }

    pub fn is_open(&self) -> bool {
        self.internals.states().has(STATE_OPEN)
    }

    /// Drain change notifications
    pub fn take_changes(&mut self) -> Vec<ChangeEvent> {
        std::mem::take(&mut self.changes)
    }

    pub fn pending_changes(&self) -> usize {
        self.changes.len()
    }
}

fn label_for(entry: &OptionEntry) -> String {
    if entry.text().is_empty() {
        BLANK_LABEL.to_string()
    } else {
        entry.text().to_string()
    }
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER, DEFAULT_VALIDITY_MESSAGE)
    }
}
