//! Scenario files
//!
//! A scenario is a list of actions replayed against one element, followed
//! by a report of the resulting state.

use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use nice_dom::{Document, OptionSource, SourceNode};
use nice_html::HostMarkup;
use nice_select::{NiceSelect, SelectError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Connect,
    Disconnect,
    Key { key: String },
    /// Click the n-th visible option
    Click { index: usize },
    Search { text: String },
    SetValue { value: String },
    Attribute { name: String, value: Option<String> },
    Append {
        text: String,
        #[serde(default)]
        value: Option<String>,
        #[serde(default)]
        selected: bool,
        #[serde(default)]
        disabled: bool,
    },
    /// Remove the n-th source option
    Remove { index: usize },
    Advance { ms: u64 },
    Frame,
    Flush,
    DocumentClick { inside: bool },
    ReportValidity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionReport {
    pub text: String,
    pub value: String,
    pub disabled: bool,
    pub hidden: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateReport {
    pub value: Option<String>,
    pub label: String,
    pub valid: bool,
    pub validation_message: String,
    pub open: bool,
    pub interacted: bool,
    pub options: Vec<OptionReport>,
    pub changes: Vec<String>,
    pub errors: Vec<String>,
    pub min_width: Option<f32>,
    pub scroll_top: f32,
    pub form: String,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid scenario")
    }
}

/// Replays actions against one element
pub struct Replay {
    document: Document,
    select: NiceSelect,
    attributes: HashMap<String, Option<String>>,
    changes: Vec<String>,
    errors: Vec<String>,
}

impl Replay {
    pub fn new(markup: &HostMarkup) -> Self {
        let document = Document::new();
        let select = NiceSelect::from_markup(&document, markup);
        let attributes = markup.attributes.iter()
            .map(|(name, value)| (name.clone(), Some(value.clone())))
            .collect();

        Self {
            document,
            select,
            attributes,
            changes: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn run(&mut self, scenario: &Scenario) -> Result<StateReport> {
        for (step, action) in scenario.actions.iter().enumerate() {
            tracing::info!(step, ?action, "replaying");
            self.apply(action).with_context(|| format!("step {step} failed"))?;
            self.collect_changes();
        }
        Ok(self.report())
    }

    fn apply(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Connect => self.select.connected_callback(&self.document),
            Action::Disconnect => self.select.disconnected_callback(),
            Action::Key { key } => {
                self.require_connected()?;
                self.select.handle_key(key);
            }
            Action::Click { index } => {
                self.require_connected()?;
                let Some(id) = self.select.controller().mirror().visible().get(*index).copied() else {
                    bail!("no visible option at {index}");
                };
                self.select.click_option(id);
            }
            Action::Search { text } => {
                self.require_connected()?;
                self.select.search_input(text);
            }
            Action::SetValue { value } => {
                if let Err(err) = self.select.set_value(value) {
                    self.errors.push(err.to_string());
                }
            }
            Action::Attribute { name, value } => {
                let old = self.attributes.insert(name.clone(), value.clone()).flatten();
                self.select.attribute_changed_callback(name, old.as_deref(), value.as_deref());
            }
            Action::Append { text, value, selected, disabled } => {
                let mut option = OptionSource::new(text.as_str());
                option.value = value.clone();
                option.selected = *selected;
                option.disabled = *disabled;
                self.select.mutate_children(|light| light.append(SourceNode::option(option)));
            }
            Action::Remove { index } => {
                let Some(id) = self.select.light().options().get(*index).map(|(id, _)| *id) else {
                    bail!("no source option at {index}");
                };
                self.select.mutate_children(|light| light.remove(id));
            }
            Action::Advance { ms } => self.select.advance(*ms),
            Action::Frame => self.select.run_animation_frame(),
            Action::Flush => self.select.flush(),
            Action::DocumentClick { inside } => {
                self.require_connected()?;
                let target = if *inside {
                    self.select.host()
                } else {
                    self.document.create_node_id()
                };
                self.select.handle_document_click(&[target]);
            }
            Action::ReportValidity => {
                self.select.report_validity();
            }
        }
        Ok(())
    }

    fn require_connected(&self) -> Result<(), SelectError> {
        if self.select.is_connected() {
            Ok(())
        } else {
            Err(SelectError::NotConnected)
        }
    }

    fn collect_changes(&mut self) {
        self.changes.extend(self.select.take_change_events().into_iter().map(|e| e.value));
    }

    pub fn report(&self) -> StateReport {
        let mirror = self.select.controller().mirror();
        let options = mirror.entries()
            .map(|(_, entry)| OptionReport {
                text: entry.text().to_string(),
                value: entry.value().to_string(),
                disabled: entry.is_disabled(),
                hidden: entry.is_hidden(),
                selected: entry.is_selected(),
            })
            .collect();

        StateReport {
            value: self.select.value().map(str::to_string),
            label: self.select.label().to_string(),
            valid: self.select.check_validity(),
            validation_message: self.select.validation_message().to_string(),
            open: self.select.open(),
            interacted: self.select.interacted(),
            options,
            changes: self.changes.clone(),
            errors: self.errors.clone(),
            min_width: self.select.min_width(),
            scroll_top: self.select.scroll_top(),
            form: self.select.form_data().to_url_encoded(),
        }
    }
}
