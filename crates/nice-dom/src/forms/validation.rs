//! Form Validation
//!
//! Constraint validation state as reported through element internals.

/// Validity state for form controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidityState {
    /// The element's value is missing (for required)
    pub value_missing: bool,
}

/// Flags passed to `ElementInternals::set_validity`
pub type ValidityFlags = ValidityState;

impl ValidityState {
    /// State with `value_missing` set
    pub fn missing() -> Self {
        Self { value_missing: true }
    }

    /// Check if the element is valid
    pub fn is_valid(&self) -> bool {
        !self.value_missing
    }
}
