//! Select errors

use nice_dom::CustomElementError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    #[error("'{0}' is not a valid option.")]
    InvalidOption(String),

    #[error("Element is not connected to a document")]
    NotConnected,

    #[error("Definition failed: {0}")]
    Definition(#[from] CustomElementError),
}

pub type Result<T> = std::result::Result<T, SelectError>;
