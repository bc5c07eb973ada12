//! Element Internals
//!
//! Form value, validity and custom states of a form-associated element.

use std::collections::BTreeSet;

use super::validation::{ValidityFlags, ValidityState};

/// Custom state set (`:state(...)` pseudo-classes)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomStateSet {
    states: BTreeSet<String>,
}

impl CustomStateSet {
    pub fn add(&mut self, state: &str) {
        self.states.insert(state.to_string());
    }

    pub fn delete(&mut self, state: &str) -> bool {
        self.states.remove(state)
    }

    pub fn has(&self, state: &str) -> bool {
        self.states.contains(state)
    }

    /// Add or delete depending on `on`
    pub fn toggle(&mut self, state: &str, on: bool) {
        if on {
            self.add(state);
        } else {
            self.delete(state);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(|s| s.as_str())
    }
}

/// Element internals
#[derive(Debug, Clone, Default)]
pub struct ElementInternals {
    form_value: Option<String>,
    validity: ValidityState,
    validation_message: String,
    states: CustomStateSet,
    invalid_events: u32,
}

impl ElementInternals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value submitted with the owning form. `None` or an empty
    /// string means the element contributes nothing.
    pub fn set_form_value(&mut self, value: Option<&str>) {
        self.form_value = value.filter(|v| !v.is_empty()).map(str::to_string);
    }

    pub fn form_value(&self) -> Option<&str> {
        self.form_value.as_deref()
    }

    /// Set validity flags and the message shown when invalid
    pub fn set_validity(&mut self, flags: ValidityFlags, message: &str) {
        self.validity = flags;
        self.validation_message = if flags.is_valid() {
            String::new()
        } else {
            message.to_string()
        };
    }

    pub fn validity(&self) -> &ValidityState {
        &self.validity
    }

    pub fn validation_message(&self) -> &str {
        &self.validation_message
    }

    pub fn check_validity(&self) -> bool {
        self.validity.is_valid()
    }

    /// Check validity, firing an `invalid` event when it fails
    pub fn report_validity(&mut self) -> bool {
        let valid = self.check_validity();
        if !valid {
            self.invalid_events += 1;
            tracing::debug!(message = %self.validation_message, "invalid");
        }
        valid
    }

    /// Number of `invalid` events fired so far
    pub fn invalid_events(&self) -> u32 {
        self.invalid_events
    }

    pub fn states(&self) -> &CustomStateSet {
        &self.states
    }

    pub fn states_mut(&mut self) -> &mut CustomStateSet {
        &mut self.states
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_form_value_is_none() {
        let mut internals = ElementInternals::new();
        internals.set_form_value(Some(""));
        assert_eq!(internals.form_value(), None);

        internals.set_form_value(Some("uk"));
        assert_eq!(internals.form_value(), Some("uk"));

        internals.set_form_value(None);
        assert_eq!(internals.form_value(), None);
    }

    #[test]
    fn test_validity_message_cleared_when_valid() {
        let mut internals = ElementInternals::new();
        internals.set_validity(ValidityState::missing(), "Pick one");
        assert_eq!(internals.validation_message(), "Pick one");
        assert!(!internals.report_validity());
        assert_eq!(internals.invalid_events(), 1);

        internals.set_validity(ValidityState::default(), "Pick one");
        assert_eq!(internals.validation_message(), "");
        assert!(internals.report_validity());
        assert_eq!(internals.invalid_events(), 1);
    }

    #[test]
    fn test_custom_states() {
        let mut internals = ElementInternals::new();
        internals.states_mut().add("open");
        internals.states_mut().toggle("valid", true);
        assert!(internals.states().has("open"));
        assert_eq!(internals.states().iter().collect::<Vec<_>>(), vec!["open", "valid"]);

        internals.states_mut().toggle("open", false);
        assert!(!internals.states().has("open"));
    }
}
