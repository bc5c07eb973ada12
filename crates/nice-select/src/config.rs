//! Select Configuration
//!
//! Settings read from the host element's attributes.

/// Label shown while nothing is selected
pub const DEFAULT_PLACEHOLDER: &str = "Select";

/// Message reported while the value is missing
pub const DEFAULT_VALIDITY_MESSAGE: &str = "Please select an option.";

/// Quiet period before a burst of light-DOM mutations is resynced
pub const RESYNC_DEBOUNCE_MS: u64 = 10;

/// Attributes the element reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    SearchEnabled,
    SearchPlaceholder,
    Placeholder,
    Disabled,
    ValidityMessage,
    Name,
}

impl Attribute {
    /// Attribute names passed to the custom element registry
    pub const OBSERVED: &'static [&'static str] = &[
        "search-enabled",
        "data-search",
        "search-placeholder",
        "data-search-placeholder",
        "placeholder",
        "disabled",
        "validity-message",
        "data-validity-message",
        "name",
    ];

    /// Parse an attribute name. The `data-` spellings are aliases.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "search-enabled" | "data-search" => Some(Self::SearchEnabled),
            "search-placeholder" | "data-search-placeholder" => Some(Self::SearchPlaceholder),
            "placeholder" => Some(Self::Placeholder),
            "disabled" => Some(Self::Disabled),
            "validity-message" | "data-validity-message" => Some(Self::ValidityMessage),
            "name" => Some(Self::Name),
            _ => None,
        }
    }
}

/// Option list viewport geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportConfig {
    /// Height of one option row
    pub row_height: f32,
    /// Rows shown before the list scrolls
    pub max_rows: f32,
    /// Horizontal padding on each side of the control
    pub padding: f32,
    /// Extra indent for options inside a group
    pub group_indent: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            row_height: 24.0,
            max_rows: 15.0,
            padding: 10.0,
            group_indent: 4.0,
        }
    }
}

/// Select configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SelectConfig {
    /// Form field name
    pub name: Option<String>,

    /// Show the search box and filter options by its text
    pub search_enabled: bool,

    /// Placeholder of the search box
    pub search_placeholder: String,

    /// Label shown with no selection
    pub placeholder: String,

    /// Inert state
    pub disabled: bool,

    /// Message reported while the value is missing
    pub validity_message: String,

    /// Mutation coalescing delay (ms)
    pub debounce_ms: u64,

    pub viewport: ViewportConfig,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            name: None,
            search_enabled: false,
            search_placeholder: String::new(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            disabled: false,
            validity_message: DEFAULT_VALIDITY_MESSAGE.to_string(),
            debounce_ms: RESYNC_DEBOUNCE_MS,
            viewport: ViewportConfig::default(),
        }
    }
}

impl SelectConfig {
    /// Build from host attributes
    pub fn from_attributes<'a>(attributes: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut config = Self::default();
        for (name, value) in attributes {
            if let Some(attribute) = Attribute::parse(name) {
                config.apply(attribute, Some(value));
            }
        }
        config
    }

    /// Apply an attribute change. `None` means the attribute was removed.
    pub fn apply(&mut self, attribute: Attribute, value: Option<&str>) {
        match attribute {
            Attribute::SearchEnabled => self.search_enabled = value.is_some(),
            Attribute::SearchPlaceholder => {
                self.search_placeholder = value.unwrap_or_default().to_string();
            }
            Attribute::Placeholder => {
                self.placeholder = value.unwrap_or(DEFAULT_PLACEHOLDER).to_string();
            }
            Attribute::Disabled => self.disabled = value.is_some(),
            Attribute::ValidityMessage => {
                self.validity_message = value.unwrap_or(DEFAULT_VALIDITY_MESSAGE).to_string();
            }
            Attribute::Name => self.name = value.map(str::to_string),
        }
    }
}
