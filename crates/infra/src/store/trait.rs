use async_trait::async_trait;
use thiserror::Error;

use shopcart_carts::{Cart, Member};
use shopcart_core::{CartId, MemberId, ProductId};
use shopcart_products::Product;

/// Persistence operation error.
///
/// These are **infrastructure errors** as opposed to domain errors: a missing
/// row is never a `StoreError`, it is reported through `Option` or a zero
/// "rows affected" count and turned into a domain error by the services.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage failure in {operation}: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },

    #[error("referential integrity violation in {operation}: {message}")]
    Integrity {
        operation: &'static str,
        message: String,
    },

    /// A persisted row no longer satisfies the entity invariants.
    #[error("corrupt row in {table}: {message}")]
    CorruptRow { table: &'static str, message: String },
}

impl StoreError {
    pub fn backend(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Backend {
            operation,
            message: message.into(),
        }
    }

    pub fn corrupt_row(table: &'static str, message: impl Into<String>) -> Self {
        Self::CorruptRow {
            table,
            message: message.into(),
        }
    }
}

/// Product persistence port.
///
/// A dumb CRUD contract: no method here decides whether absence is an error.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert the product and return the generated id.
    async fn save_and_get_id(&self, product: &Product) -> Result<ProductId, StoreError>;

    /// All products, in id order.
    async fn find_all(&self) -> Result<Vec<Product>, StoreError>;

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Overwrite the row identified by `product.id()`. Returns rows affected
    /// (0 when the product has no id or the row is gone).
    async fn update(&self, product: &Product) -> Result<u64, StoreError>;

    /// Delete the product and every cart row referencing it. Returns the
    /// number of product rows removed.
    async fn delete(&self, id: ProductId) -> Result<u64, StoreError>;
}

/// Cart association persistence port.
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn save_and_get_id(&self, cart: &Cart) -> Result<CartId, StoreError>;

    /// Products linked to the member, in cart insertion order. A product added
    /// twice appears twice.
    async fn find_all_products_by_member_id(
        &self,
        member_id: MemberId,
    ) -> Result<Vec<Product>, StoreError>;

    /// Remove one association row for the pair. Returns rows affected; the
    /// lookup and the removal are a single atomic step.
    async fn delete(&self, product_id: ProductId, member_id: MemberId) -> Result<u64, StoreError>;
}

/// Member persistence port.
#[async_trait]
pub trait MemberStore: Send + Sync {
    async fn save_and_get_id(&self, member: &Member) -> Result<MemberId, StoreError>;

    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, StoreError>;

    /// All members, in id order.
    async fn find_all(&self) -> Result<Vec<Member>, StoreError>;
}
