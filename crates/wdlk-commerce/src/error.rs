//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in commerce operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Checkout not found on the backend.
    #[error("Checkout not found: {0}")]
    CheckoutNotFound(String),

    /// The commerce backend rejected or failed a request.
    #[error("Commerce backend error: {0}")]
    Backend(String),

    /// Amount string could not be parsed.
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Checkout id store failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CommerceError::InvalidAmount("1,2".to_string()).to_string(),
            "Invalid amount: \"1,2\""
        );
        assert_eq!(
            CommerceError::Storage("poisoned".to_string()).to_string(),
            "Storage error: poisoned"
        );
        assert_eq!(
            CommerceError::InvalidQuantity(-1).to_string(),
            "Invalid quantity: -1"
        );
    }
}
