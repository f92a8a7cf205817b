use serde::Deserialize;

use crate::app::errors::ApiError;

pub const NAME_REQUIRED: &str = "상품명은 필수입니다.";
pub const IMAGE_REQUIRED: &str = "상품 이미지는 필수입니다.";
pub const PRICE_REQUIRED: &str = "상품 가격은 필수입니다.";
pub const EMAIL_REQUIRED: &str = "이메일은 필수입니다.";
pub const PASSWORD_REQUIRED: &str = "비밀번호는 필수입니다.";

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /products` and `PUT /products/:id`.
///
/// Fields are optional so that a missing field is reported with its own
/// message instead of a generic parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct ProductRequest {
    pub name: Option<String>,
    pub image: Option<String>,
    pub price: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFields {
    pub name: String,
    pub image: String,
    pub price: i64,
}

impl ProductRequest {
    pub fn validate(self) -> Result<ProductFields, ApiError> {
        let mut errors = FieldErrors::default();
        let name = errors.require_text(self.name, NAME_REQUIRED);
        let image = errors.require_text(self.image, IMAGE_REQUIRED);
        let price = errors.require(self.price, PRICE_REQUIRED);

        match (name, image, price) {
            (Some(name), Some(image), Some(price)) => Ok(ProductFields { name, image, price }),
            _ => Err(errors.into_error()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RegisterMemberRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberFields {
    pub email: String,
    pub password: String,
}

impl RegisterMemberRequest {
    pub fn validate(self) -> Result<MemberFields, ApiError> {
        let mut errors = FieldErrors::default();
        let email = errors.require_text(self.email, EMAIL_REQUIRED);
        let password = errors.require_text(self.password, PASSWORD_REQUIRED);

        match (email, password) {
            (Some(email), Some(password)) => Ok(MemberFields { email, password }),
            _ => Err(errors.into_error()),
        }
    }
}

/// Collects one message per failing field, in field order.
#[derive(Debug, Default)]
struct FieldErrors(Vec<String>);

impl FieldErrors {
    fn require<T>(&mut self, value: Option<T>, message: &str) -> Option<T> {
        if value.is_none() {
            self.0.push(message.to_string());
        }
        value
    }

    fn require_text(&mut self, value: Option<String>, message: &str) -> Option<String> {
        let value = value.filter(|v| !v.trim().is_empty());
        self.require(value, message)
    }

    fn into_error(self) -> ApiError {
        ApiError::FieldValidation(self.0)
    }
}
