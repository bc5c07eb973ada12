//! Size measurement
//!
//! The control is as wide as its widest content so that picking an option
//! never changes its width.

use std::fmt;

use crate::config::ViewportConfig;
use crate::entry::Row;
use crate::mirror::OptionMirror;

/// Text measurement supplied by the embedder
pub trait TextMetrics: fmt::Debug {
    fn text_width(&self, text: &str) -> f32;
}

/// Same advance for every character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    pub advance: f32,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self { advance: 8.0 }
    }
}

impl TextMetrics for FixedAdvance {
    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance
    }
}

/// `max(dropdown content width, presentation width)` plus padding
pub fn min_width(
    mirror: &OptionMirror,
    label: &str,
    search_placeholder: Option<&str>,
    metrics: &dyn TextMetrics,
    config: &ViewportConfig,
) -> f32 {
    let presentation = metrics.text_width(label);

    let rows = mirror.rows().into_iter().map(|row| match row {
        Row::GroupLabel(id) => mirror.group(id)
            .map(|g| metrics.text_width(g.label()))
            .unwrap_or(0.0),
        Row::Entry(id) => mirror.get(id)
            .map(|e| {
                let indent = if e.group().is_some() { config.group_indent } else { 0.0 };
                metrics.text_width(e.text()) + indent
            })
            .unwrap_or(0.0),
    });

    let search = search_placeholder.map(|p| metrics.text_width(p)).unwrap_or(0.0);
    let dropdown = rows.fold(search, f32::max);

    dropdown.max(presentation) + config.padding * 2.0
}
