//! Domain error model.
//!
//! The taxonomy is a tagged enum rather than a type hierarchy: `DomainError`
//! wraps the specific failure and [`DomainError::kind`] exposes a flat
//! discriminant that boundaries can match on exhaustively.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Which construction invariant was violated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ValidationKind {
    NameTooLong,
    NegativePrice,
}

/// An entity failed its construction-time invariants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    kind: ValidationKind,
    message: String,
}

impl ValidationError {
    pub fn new(kind: ValidationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ValidationKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Cart-logic failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The targeted product (or product/member association) does not exist.
    #[error("{0}")]
    ProductNotFound(String),

    /// Any other cart rule violation.
    #[error("{0}")]
    General(String),
}

impl CartError {
    pub const PRODUCT_NOT_FOUND_MESSAGE: &'static str = "상품을 찾을 수 없습니다.";

    pub fn product_not_found() -> Self {
        Self::ProductNotFound(Self::PRODUCT_NOT_FOUND_MESSAGE.to_string())
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures. Storage and
/// transport faults belong to the layers that own them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Cart(#[from] CartError),

    /// An identifier was invalid (e.g. parse failure).
    #[error("{0}")]
    InvalidId(String),
}

/// Flat discriminant over every [`DomainError`] shape.
///
/// Variants are listed from most to least specific.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ProductNotFound,
    Cart,
    Validation(ValidationKind),
    InvalidId,
}

impl DomainError {
    pub fn validation(kind: ValidationKind, msg: impl Into<String>) -> Self {
        Self::Validation(ValidationError::new(kind, msg))
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn product_not_found() -> Self {
        Self::Cart(CartError::product_not_found())
    }

    pub fn cart(msg: impl Into<String>) -> Self {
        Self::Cart(CartError::general(msg))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Cart(CartError::ProductNotFound(_)) => ErrorKind::ProductNotFound,
            DomainError::Cart(CartError::General(_)) => ErrorKind::Cart,
            DomainError::Validation(e) => ErrorKind::Validation(e.kind()),
            DomainError::InvalidId(_) => ErrorKind::InvalidId,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_not_found_keeps_user_facing_message() {
        let err = DomainError::product_not_found();
        assert_eq!(err.kind(), ErrorKind::ProductNotFound);
        assert_eq!(err.to_string(), "상품을 찾을 수 없습니다.");
    }

    #[test]
    fn validation_error_displays_its_message_only() {
        let err = DomainError::validation(ValidationKind::NegativePrice, "price must be >= 0");
        assert_eq!(err.kind(), ErrorKind::Validation(ValidationKind::NegativePrice));
        assert_eq!(err.to_string(), "price must be >= 0");
    }

    #[test]
    fn general_cart_error_is_distinct_from_not_found() {
        let err = DomainError::cart("member missing");
        assert_eq!(err.kind(), ErrorKind::Cart);
        assert_ne!(err, DomainError::product_not_found());
    }
}
