//! nice-select
//!
//! A styled, searchable select control modelled as a form-associated custom
//! element. The host's `<option>` and `<optgroup>` children are mirrored
//! into entries; pointer, keyboard and programmatic interaction resolve to
//! a single value published to the enclosing form.

pub mod config;
pub mod controller;
pub mod element;
pub mod entry;
pub mod error;
pub mod measure;
pub mod mirror;
pub mod navigation;
pub mod parts;
pub mod search;

pub use config::{Attribute, SelectConfig, ViewportConfig};
pub use controller::{ChangeEvent, SelectionController, SelectionState, SyncReport};
pub use element::{NiceSelect, SelectTask, TAG_NAME};
pub use entry::{EntryId, GroupId, OptionEntry, OptionGroup, RenderItem, Row};
pub use error::{Result, SelectError};
pub use measure::{FixedAdvance, TextMetrics};
pub use mirror::OptionMirror;
pub use navigation::{Direction, ListViewport};
pub use search::{SearchBox, SearchMode};
