//! Cart orchestration.
//!
//! `CartService` is the only place where cross-entity cart rules live. The
//! stores stay dumb CRUD; every "this does not exist" decision is made here
//! and expressed as a `DomainError`.

use std::sync::Arc;

use tracing::{info, instrument};

use shopcart_carts::Cart;
use shopcart_core::{CartId, DomainError, MemberId, ProductId};

use crate::dto::{products_to_dtos, CartSearchResponse};
use crate::error::ServiceError;
use crate::store::{CartStore, MemberStore, ProductStore, StoreError};

const MEMBER_NOT_FOUND_MESSAGE: &str = "회원을 찾을 수 없습니다.";

#[derive(Clone)]
pub struct CartService {
    products: Arc<dyn ProductStore>,
    carts: Arc<dyn CartStore>,
    members: Arc<dyn MemberStore>,
}

impl CartService {
    pub fn new(
        products: Arc<dyn ProductStore>,
        carts: Arc<dyn CartStore>,
        members: Arc<dyn MemberStore>,
    ) -> Self {
        Self {
            products,
            carts,
            members,
        }
    }

    /// Every product in the member's cart, in the order they were added.
    #[instrument(skip(self), fields(member_id = %member_id), err)]
    pub async fn find_all_for_member(
        &self,
        member_id: MemberId,
    ) -> Result<CartSearchResponse, ServiceError> {
        let products = self.carts.find_all_products_by_member_id(member_id).await?;
        Ok(CartSearchResponse {
            products: products_to_dtos(products)?,
        })
    }

    /// Link a product to the member's cart. Adding the same product again
    /// creates another row.
    #[instrument(skip(self), fields(member_id = %member_id, product_id = %product_id), err)]
    pub async fn add(&self, member_id: MemberId, product_id: ProductId) -> Result<CartId, ServiceError> {
        if self.members.find_by_id(member_id).await?.is_none() {
            return Err(DomainError::cart(MEMBER_NOT_FOUND_MESSAGE).into());
        }
        if self.products.find_by_id(product_id).await?.is_none() {
            return Err(DomainError::product_not_found().into());
        }

        // Members are never deleted, so a dangling reference at insert time
        // means the product went away after the lookup above.
        let id = match self.carts.save_and_get_id(&Cart::new(member_id, product_id)).await {
            Ok(id) => id,
            Err(StoreError::Integrity { .. }) => return Err(DomainError::product_not_found().into()),
            Err(e) => return Err(e.into()),
        };
        info!(cart_id = %id, "product added to cart");
        Ok(id)
    }

    /// Remove one association between the product and the member.
    ///
    /// Absence of the association is a `ProductNotFound` error, never a silent
    /// no-op, including when the same association was already removed.
    #[instrument(skip(self), fields(product_id = %product_id, member_id = %member_id), err)]
    pub async fn delete(&self, product_id: ProductId, member_id: MemberId) -> Result<(), ServiceError> {
        let removed = self.carts.delete(product_id, member_id).await?;
        if removed == 0 {
            return Err(DomainError::product_not_found().into());
        }
        info!("product removed from cart");
        Ok(())
    }
}
