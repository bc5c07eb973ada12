//! Keyboard navigation
//!
//! Wrap-around stepping through available entries and keeping the
//! current row inside the option list viewport.

use crate::config::ViewportConfig;
use crate::entry::EntryId;

/// Step direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" => Some(Self::Next),
            "ArrowUp" => Some(Self::Previous),
            _ => None,
        }
    }

    /// Entry after (or before) `current` in `available`, wrapping at the
    /// ends. An absent or unavailable `current` starts from the edge.
    pub fn step(self, available: &[EntryId], current: Option<EntryId>) -> Option<EntryId> {
        if available.is_empty() {
            return None;
        }
        let position = current.and_then(|c| available.iter().position(|id| *id == c));
        let last = available.len() - 1;

        let index = match (self, position) {
            (Self::Next, Some(p)) if p < last => p + 1,
            (Self::Next, _) => 0,
            (Self::Previous, Some(p)) if p > 0 => p - 1,
            (Self::Previous, _) => last,
        };
        Some(available[index])
    }
}

/// Scroll state of the option list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListViewport {
    row_height: f32,
    height: f32,
    scroll_top: f32,
}

impl ListViewport {
    pub fn new(config: &ViewportConfig) -> Self {
        Self {
            row_height: config.row_height,
            height: config.row_height * config.max_rows,
            scroll_top: 0.0,
        }
    }

    pub fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn reset(&mut self) {
        self.scroll_top = 0.0;
    }

    /// Scroll the minimum distance that brings `row` fully into view
    pub fn scroll_into_view(&mut self, row: usize) {
        let top = row as f32 * self.row_height;
        let bottom = top + self.row_height;

        if bottom > self.height + self.scroll_top {
            self.scroll_top = bottom - self.height;
        } else if top < self.scroll_top {
            self.scroll_top = top;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<EntryId> {
        (0..n).map(|index| EntryId { generation: 1, index }).collect()
    }

    #[test]
    fn test_keys() {
        assert_eq!(Direction::from_key("ArrowDown"), Some(Direction::Next));
        assert_eq!(Direction::from_key("ArrowUp"), Some(Direction::Previous));
        assert_eq!(Direction::from_key("Enter"), None);
    }

    #[test]
    fn test_step_wraps() {
        let available = ids(3);
        assert_eq!(Direction::Next.step(&available, Some(available[2])), Some(available[0]));
        assert_eq!(Direction::Previous.step(&available, Some(available[0])), Some(available[2]));
        assert_eq!(Direction::Next.step(&available, Some(available[0])), Some(available[1]));
    }

    #[test]
    fn test_step_without_current() {
        let available = ids(3);
        assert_eq!(Direction::Next.step(&available, None), Some(available[0]));
        assert_eq!(Direction::Previous.step(&available, None), Some(available[2]));

        let outside = EntryId { generation: 1, index: 9 };
        assert_eq!(Direction::Next.step(&available, Some(outside)), Some(available[0]));
        assert_eq!(Direction::Next.step(&[], None), None);
    }

    #[test]
    fn test_scroll_into_view() {
        let mut viewport = ListViewport::new(&ViewportConfig {
            row_height: 10.0,
            max_rows: 3.0,
            ..Default::default()
        });

        viewport.scroll_into_view(2);
        assert_eq!(viewport.scroll_top(), 0.0);

        viewport.scroll_into_view(5);
        assert_eq!(viewport.scroll_top(), 30.0);

        viewport.scroll_into_view(1);
        assert_eq!(viewport.scroll_top(), 10.0);
    }
}
