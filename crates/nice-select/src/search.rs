//! Search capability
//!
//! A select either filters its options through a search box or it does
//! not. The mode decides where focus goes and whether a query is kept.

use crate::parts;

/// Search box state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchBox {
    query: String,
    placeholder: String,
}

/// Search capability of a select
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchMode {
    #[default]
    Plain,
    Searchable(SearchBox),
}

impl SearchBox {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            query: String::new(),
            placeholder: placeholder.into(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

impl SearchMode {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Searchable(_))
    }

    /// Active filter query, if any
    pub fn query(&self) -> Option<&str> {
        match self {
            Self::Searchable(search) if !search.query.is_empty() => Some(&search.query),
            _ => None,
        }
    }

    /// Surface that receives focus when the control is focused
    pub fn focus_part(&self) -> &'static str {
        match self {
            Self::Plain => parts::PRESENTATION,
            Self::Searchable(_) => parts::SEARCH,
        }
    }

    /// Switch to the searchable mode. Returns false if already searchable.
    pub fn enable(&mut self, placeholder: &str) -> bool {
        if self.is_enabled() {
            return false;
        }
        *self = Self::Searchable(SearchBox::new(placeholder));
        true
    }

    /// Switch to the plain mode, dropping any query. Returns false if
    /// already plain.
    pub fn disable(&mut self) -> bool {
        if !self.is_enabled() {
            return false;
        }
        *self = Self::Plain;
        true
    }

    /// Store typed text. Plain selects have nowhere to type.
    pub fn set_query(&mut self, text: &str) -> bool {
        match self {
            Self::Searchable(search) => {
                search.query = text.to_string();
                true
            }
            Self::Plain => false,
        }
    }

    pub fn set_placeholder(&mut self, placeholder: &str) {
        if let Self::Searchable(search) = self {
            search.placeholder = placeholder.to_string();
        }
    }

    pub fn placeholder(&self) -> Option<&str> {
        match self {
            Self::Searchable(search) => Some(&search.placeholder),
            Self::Plain => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_has_no_query() {
        let mut mode = SearchMode::Plain;
        assert!(!mode.set_query("a"));
        assert_eq!(mode.query(), None);
        assert_eq!(mode.focus_part(), parts::PRESENTATION);
    }

    #[test]
    fn test_enable_is_guarded() {
        let mut mode = SearchMode::Plain;
        assert!(mode.enable("Filter"));
        assert!(mode.set_query("ap"));

        assert!(!mode.enable("Other"));
        assert_eq!(mode.query(), Some("ap"));
        assert_eq!(mode.placeholder(), Some("Filter"));
        assert_eq!(mode.focus_part(), parts::SEARCH);
    }

    #[test]
    fn test_disable_drops_query() {
        let mut mode = SearchMode::Plain;
        mode.enable("");
        mode.set_query("x");
        assert!(mode.disable());
        assert!(!mode.disable());
        assert_eq!(mode.query(), None);
    }

    #[test]
    fn test_empty_query_is_none() {
        let mut mode = SearchMode::Plain;
        mode.enable("");
        mode.set_query("");
        assert_eq!(mode.query(), None);
    }
}
