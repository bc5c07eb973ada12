//! Shadow part names

pub const PRESENTATION: &str = "presentation";
pub const DROPDOWN: &str = "dropdown";
pub const DROPDOWN_INNER: &str = "dropdown-inner";
pub const DROPDOWN_PADDING: &str = "dropdown-padding";
pub const OPTION_LIST: &str = "optionlist";
pub const SEARCH_WRAPPER: &str = "search-wrapper";
pub const SEARCH: &str = "search";

/// Surfaces made inert while the control is disabled
pub const INTERACTIVE: &[&str] = &[PRESENTATION, DROPDOWN];
