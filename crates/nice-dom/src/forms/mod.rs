//! Form Association
//!
//! Element internals, validity and form data for form-associated elements.

mod validation;
mod internals;
mod form_data;

pub use validation::{ValidityState, ValidityFlags};
pub use internals::{ElementInternals, CustomStateSet};
pub use form_data::FormData;

/// Trait for form-associated controls
pub trait FormControl {
    /// Get the element's name
    fn name(&self) -> Option<&str>;

    /// The value contributed to the form, `None` when there is none
    fn form_value(&self) -> Option<&str>;

    /// Check if the element is disabled
    fn is_disabled(&self) -> bool;

    /// Get validity state
    fn validity(&self) -> &ValidityState;

    /// Check validity
    fn check_validity(&self) -> bool {
        self.validity().is_valid()
    }
}
