//! `<nice-select>` element
//!
//! Connects the selection controller to its host: light-DOM children,
//! observed attributes, shadow surfaces, the document click listener and
//! the deferred resync and measurement work.

use nice_dom::{
    CustomElementOptions, CustomElementRegistry, Document, EventLoop, EventType, FormControl,
    FormData, FrameId, LightDom, ListenerHandle, MutationObserverInit, NodeId, NodeIds,
    OptionFlag, ShadowRoot, TimerId, ValidityState,
};
use nice_html::HostMarkup;

use crate::config::{Attribute, SelectConfig};
use crate::controller::{ChangeEvent, SelectionController, SyncReport};
use crate::entry::EntryId;
use crate::error::Result;
use crate::measure::{self, FixedAdvance, TextMetrics};
use crate::navigation::{Direction, ListViewport};
use crate::parts;

/// Custom element name
pub const TAG_NAME: &str = "nice-select";

/// Deferred work run by the element's event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectTask {
    /// Rebuild the mirror after a burst of mutations
    Resync,
    /// Recompute the minimum width
    Measure,
    /// Drop children that are neither options nor optgroups
    PruneInvalid,
    /// End the write-back window
    ResumeObservers,
}

/// The select element
#[derive(Debug)]
pub struct NiceSelect {
    host: NodeId,
    ids: NodeIds,
    config: SelectConfig,
    light: LightDom,
    shadow: ShadowRoot,
    controller: SelectionController,
    event_loop: EventLoop<SelectTask>,
    pending_resync: Option<TimerId>,
    pending_measure: Option<FrameId>,
    /// Set while the element writes its own selection back to the light DOM
    skip_observers: bool,
    click_listener: Option<ListenerHandle>,
    connected: bool,
    focused_part: Option<&'static str>,
    viewport: ListViewport,
    min_width: Option<f32>,
    metrics: Box<dyn TextMetrics>,
}

impl NiceSelect {
    /// Create a disconnected element in `document`
    pub fn new(document: &Document, config: SelectConfig) -> Self {
        let ids = document.node_ids();
        let host = ids.next();

        let mut controller = SelectionController::new(&config.placeholder, &config.validity_message);
        controller.set_search_enabled(config.search_enabled, &config.search_placeholder);

        Self {
            host,
            light: LightDom::new(host, ids.clone()),
            ids,
            shadow: ShadowRoot::new(host),
            controller,
            event_loop: EventLoop::new(),
            pending_resync: None,
            pending_measure: None,
            skip_observers: false,
            click_listener: None,
            connected: false,
            focused_part: None,
            viewport: ListViewport::new(&config.viewport),
            min_width: None,
            metrics: Box::new(FixedAdvance::default()),
            config,
        }
    }

    /// Create an element from parsed markup, children included
    pub fn from_markup(document: &Document, markup: &HostMarkup) -> Self {
        let config = SelectConfig::from_attributes(
            markup.attributes.iter().map(|(name, value)| (name.as_str(), value.as_str())),
        );
        let mut element = Self::new(document, config);
        element.light.replace_children(markup.children.clone());
        element
    }

    /// Register the element with a custom element registry
    pub fn define(registry: &mut CustomElementRegistry) -> Result<()> {
        registry.define(TAG_NAME, CustomElementOptions {
            observed_attributes: Attribute::OBSERVED.iter().map(|a| a.to_string()).collect(),
            form_associated: true,
        })?;
        Ok(())
    }

    /// Use other text metrics for measurement
    pub fn with_metrics(mut self, metrics: impl TextMetrics + 'static) -> Self {
        self.metrics = Box::new(metrics);
        self
    }

    pub fn connected_callback(&mut self, document: &Document) {
        if self.connected {
            return;
        }

        self.build_surfaces();
        self.resync();

        self.event_loop.request_animation_frame(SelectTask::PruneInvalid);
        self.schedule_measure();

        self.light.observe(MutationObserverInit::everything());
        self.click_listener = Some(document.add_event_listener(EventType::Click, self.host));
        self.connected = true;

        let disabled = self.config.disabled;
        self.toggle_disabled(disabled);

        tracing::debug!(host = self.host.0, options = self.controller.mirror().len(), "select connected");
    }

    pub fn disconnected_callback(&mut self) {
        if !self.connected {
            return;
        }

        self.click_listener = None;
        self.light.observer_mut().disconnect();
        self.event_loop.clear();
        self.pending_resync = None;
        self.pending_measure = None;
        self.skip_observers = false;
        self.connected = false;

        tracing::debug!(host = self.host.0, "select disconnected");
    }

    pub fn attribute_changed_callback(&mut self, name: &str, old: Option<&str>, new: Option<&str>) {
        let Some(attribute) = Attribute::parse(name) else {
            return;
        };
        if old == new {
            return;
        }

        self.config.apply(attribute, new);
        tracing::debug!(attribute = name, value = ?new, "attribute changed");

        match attribute {
            Attribute::SearchEnabled => {
                let changed = self.controller
                    .set_search_enabled(self.config.search_enabled, &self.config.search_placeholder);
                if changed && self.connected {
                    self.build_search_surfaces();
                    self.schedule_measure();
                }
            }
            Attribute::SearchPlaceholder => {
                self.controller.set_search_placeholder(&self.config.search_placeholder);
                if self.connected {
                    self.schedule_measure();
                }
            }
            Attribute::Placeholder => self.controller.set_placeholder(new),
            Attribute::Disabled => {
                let disabled = self.config.disabled;
                self.toggle_disabled(disabled);
            }
            Attribute::ValidityMessage => self.controller.set_validity_message(new),
            Attribute::Name => {}
        }
        self.render();
    }

    fn build_surfaces(&mut self) {
        for part in [
            parts::PRESENTATION,
            parts::DROPDOWN,
            parts::DROPDOWN_INNER,
            parts::DROPDOWN_PADDING,
            parts::OPTION_LIST,
        ] {
            let id = self.ids.next();
            self.shadow.attach(id, part);
        }
        self.build_search_surfaces();
    }

    fn build_search_surfaces(&mut self) {
        if self.controller.search().is_enabled() {
            for part in [parts::SEARCH_WRAPPER, parts::SEARCH] {
                let id = self.ids.next();
                self.shadow.attach(id, part);
            }
        } else {
            self.shadow.detach(parts::SEARCH);
            self.shadow.detach(parts::SEARCH_WRAPPER);
        }

        if self.focused_part.is_some() {
            self.focused_part = Some(self.controller.search().focus_part());
        }
    }

    fn render(&mut self) {
        let label = self.controller.label().to_string();
        let open = self.controller.is_open();
        let placeholder = self.controller.search().placeholder().map(str::to_string);

        if let Some(presentation) = self.shadow.part_mut(parts::PRESENTATION) {
            presentation.text = label;
        }
        if let Some(dropdown) = self.shadow.part_mut(parts::DROPDOWN) {
            dropdown.hidden = !open;
        }
        if let (Some(search), Some(placeholder)) = (self.shadow.part_mut(parts::SEARCH), placeholder) {
            search.text = placeholder;
        }
    }

    /// Apply a change to the light-DOM children. Observed records schedule
    /// a debounced resync.
    pub fn mutate_children<R>(&mut self, f: impl FnOnce(&mut LightDom) -> R) -> R {
        let result = f(&mut self.light);

        let records = self.light.take_records();
        if records.is_empty() {
            return result;
        }
        if self.skip_observers {
            tracing::trace!(records = records.len(), "mutations during write-back ignored");
            return result;
        }

        self.schedule_resync();
        result
    }

    fn schedule_resync(&mut self) {
        if let Some(timer) = self.pending_resync.take() {
            self.event_loop.clear_timer(timer);
        }
        let timer = self.event_loop.set_timeout(SelectTask::Resync, self.config.debounce_ms);
        self.pending_resync = Some(timer);
    }

    fn schedule_measure(&mut self) {
        if let Some(frame) = self.pending_measure.take() {
            self.event_loop.cancel_animation_frame(frame);
        }
        self.pending_measure = Some(self.event_loop.request_animation_frame(SelectTask::Measure));
    }

    /// Advance the virtual clock, running timers that become due
    pub fn advance(&mut self, ms: u64) {
        for task in self.event_loop.tick(ms) {
            self.run_task(task);
        }
    }

    /// Run the callbacks queued for the next frame
    pub fn run_animation_frame(&mut self) {
        for task in self.event_loop.take_frame_callbacks() {
            self.run_task(task);
        }
    }

    /// Run deferred work until nothing is pending
    pub fn flush(&mut self) {
        while self.event_loop.has_pending() {
            self.run_animation_frame();
            self.advance(self.config.debounce_ms);
        }
    }

    fn run_task(&mut self, task: SelectTask) {
        match task {
            SelectTask::Resync => {
                self.pending_resync = None;
                self.resync();
                self.schedule_measure();
            }
            SelectTask::Measure => {
                self.pending_measure = None;
                self.measure();
            }
            SelectTask::PruneInvalid => {
                let removed = self.light.prune_invalid();
                self.light.take_records();
                if removed > 0 {
                    tracing::debug!(removed, "invalid children pruned");
                }
            }
            SelectTask::ResumeObservers => self.skip_observers = false,
        }
    }

    fn resync(&mut self) -> SyncReport {
        let report = self.controller.sync(self.light.children());
        if report.changed {
            if let Some(id) = report.current {
                self.write_back(id);
            }
        }
        self.render();
        report
    }

    fn measure(&mut self) {
        let width = measure::min_width(
            self.controller.mirror(),
            self.controller.label(),
            self.controller.search().placeholder(),
            self.metrics.as_ref(),
            &self.config.viewport,
        );
        tracing::trace!(width, "select measured");
        self.min_width = Some(width);
    }

    /// Make the source option matching `id` the only selected one. Records
    /// caused by this are ignored until the next frame.
    fn write_back(&mut self, id: EntryId) {
        let Some(entry) = self.controller.mirror().get(id) else {
            return;
        };
        let (value, text) = (entry.value().to_string(), entry.text().to_string());

        let options = self.light.options();
        // A value match wins over an earlier text match
        let target = options.iter()
            .find(|(_, o)| o.value() == value)
            .or_else(|| options.iter().find(|(_, o)| o.text == text))
            .map(|(id, _)| *id);
        let stale: Vec<NodeId> = options.iter()
            .filter(|(id, o)| o.selected && Some(*id) != target)
            .map(|(id, _)| *id)
            .collect();

        for node in stale {
            self.light.set_option_flag(node, OptionFlag::Selected, false);
        }
        if let Some(node) = target {
            self.light.set_option_flag(node, OptionFlag::Selected, true);
        }

        self.light.take_records();
        self.skip_observers = true;
        self.event_loop.request_animation_frame(SelectTask::ResumeObservers);
    }

    /// Keyboard input. Returns whether the key was handled.
    pub fn handle_key(&mut self, key: &str) -> bool {
        let Some(direction) = Direction::from_key(key) else {
            return false;
        };
        if self.config.disabled {
            return false;
        }
        let Some(id) = self.controller.move_selection(direction) else {
            return false;
        };

        self.write_back(id);
        self.controller.set_open(true);
        if let Some(row) = self.controller.mirror().row_of(id) {
            self.viewport.scroll_into_view(row);
        }
        self.render();
        true
    }

    /// Pointer activation of an option row
    pub fn click_option(&mut self, id: EntryId) -> bool {
        if self.config.disabled {
            return false;
        }

        if self.controller.current() != Some(id) {
            if !self.controller.select(id) {
                return false;
            }
            self.write_back(id);
        }

        self.controller.mark_interacted();
        self.focus();
        self.render();
        true
    }

    /// Click anywhere in the document. `path` lists the target and its
    /// ancestors.
    pub fn handle_document_click(&mut self, path: &[NodeId]) {
        if self.click_listener.is_none() {
            return;
        }
        let inside = path.iter().any(|id| *id == self.host || self.shadow.contains(*id));
        self.set_open(inside);
    }

    /// Text typed into the search box
    pub fn search_input(&mut self, text: &str) -> bool {
        if !self.controller.search().is_enabled() {
            return false;
        }
        self.controller.set_search_filter(Some(text));
        self.viewport.reset();
        self.render();
        true
    }

    /// Focus the control's focus target
    pub fn focus(&mut self) {
        self.focused_part = Some(self.controller.search().focus_part());
    }

    pub fn focused_part(&self) -> Option<&'static str> {
        self.focused_part
    }

    /// Make the interactive surfaces inert, or interactive again. Option
    /// data and the current value are left alone.
    pub fn toggle_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
        for part in parts::INTERACTIVE {
            self.shadow.set_inert(part, disabled);
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    pub fn value(&self) -> Option<&str> {
        self.controller.value()
    }

    /// Programmatic assignment
    pub fn set_value(&mut self, value: &str) -> Result<EntryId> {
        let id = self.controller.set_value(value)?;
        self.write_back(id);
        self.render();
        Ok(id)
    }

    pub fn validity(&self) -> &ValidityState {
        self.controller.validity()
    }

    pub fn validation_message(&self) -> &str {
        self.controller.validation_message()
    }

    pub fn check_validity(&self) -> bool {
        self.controller.check_validity()
    }

    pub fn report_validity(&mut self) -> bool {
        self.controller.report_validity()
    }

    pub fn open(&self) -> bool {
        self.controller.is_open()
    }

    pub fn set_open(&mut self, open: bool) {
        self.controller.set_open(open);
        self.render();
    }

    pub fn interacted(&self) -> bool {
        self.controller.interacted()
    }

    pub fn label(&self) -> &str {
        self.controller.label()
    }

    /// Width the control needs so no option is cut off. `None` until the
    /// first measurement frame has run.
    pub fn min_width(&self) -> Option<f32> {
        self.min_width
    }

    pub fn scroll_top(&self) -> f32 {
        self.viewport.scroll_top()
    }

    /// This control's contribution to a form submission
    pub fn form_data(&self) -> FormData {
        let mut data = FormData::new();
        data.append_control(self);
        data
    }

    pub fn take_change_events(&mut self) -> Vec<ChangeEvent> {
        self.controller.take_changes()
    }

    pub fn host(&self) -> NodeId {
        self.host
    }

    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    pub fn light(&self) -> &LightDom {
        &self.light
    }

    pub fn shadow(&self) -> &ShadowRoot {
        &self.shadow
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Whether a debounced resync is waiting
    pub fn resync_pending(&self) -> bool {
        self.pending_resync.is_some()
    }

    /// Virtual time (ms)
    pub fn now(&self) -> u64 {
        self.event_loop.now()
    }
}

impl FormControl for NiceSelect {
    fn name(&self) -> Option<&str> {
        self.config.name.as_deref()
    }

    fn form_value(&self) -> Option<&str> {
        self.controller.form_value()
    }

    fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    fn validity(&self) -> &ValidityState {
        self.controller.validity()
    }
}
