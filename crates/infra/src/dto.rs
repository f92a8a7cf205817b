//! Response DTOs returned by the services.
//!
//! These are decoupled from the entity shapes: they are plain data, always
//! carry an id, and never expose member credentials.

use serde::{Deserialize, Serialize};

use shopcart_carts::Member;
use shopcart_core::{MemberId, ProductId};
use shopcart_products::Product;

use crate::store::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub price: i64,
}

impl ProductDto {
    pub fn new(id: ProductId, name: impl Into<String>, image: impl Into<String>, price: i64) -> Self {
        Self {
            id,
            name: name.into(),
            image: image.into(),
            price,
        }
    }
}

impl TryFrom<Product> for ProductDto {
    type Error = StoreError;

    /// Products handed out by a store always carry their id.
    fn try_from(product: Product) -> Result<Self, Self::Error> {
        let id = product
            .id()
            .ok_or_else(|| StoreError::corrupt_row("product", "stored product without id"))?;
        Ok(Self::new(id, product.name(), product.image(), product.price()))
    }
}

/// A member's cart contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSearchResponse {
    pub products: Vec<ProductDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDto {
    pub id: MemberId,
    pub email: String,
}

impl TryFrom<Member> for MemberDto {
    type Error = StoreError;

    fn try_from(member: Member) -> Result<Self, Self::Error> {
        let id = member
            .id()
            .ok_or_else(|| StoreError::corrupt_row("member", "stored member without id"))?;
        Ok(Self {
            id,
            email: member.email().to_string(),
        })
    }
}

pub(crate) fn products_to_dtos(products: Vec<Product>) -> Result<Vec<ProductDto>, StoreError> {
    products.into_iter().map(ProductDto::try_from).collect()
}
