//! Product catalog operations.
//!
//! Validation happens when the `Product` is constructed, before any store
//! call; existence checks for update/delete are made here.

use std::sync::Arc;

use tracing::{info, instrument};

use shopcart_core::{DomainError, ProductId};
use shopcart_products::Product;

use crate::dto::{products_to_dtos, ProductDto};
use crate::error::ServiceError;
use crate::store::ProductStore;

#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    #[instrument(skip(self, name, image), err)]
    pub async fn create(&self, name: &str, image: &str, price: i64) -> Result<ProductId, ServiceError> {
        let product = Product::new(name, image, price)?;
        let id = self.products.save_and_get_id(&product).await?;
        info!(product_id = %id, "product created");
        Ok(id)
    }

    pub async fn find_all(&self) -> Result<Vec<ProductDto>, ServiceError> {
        let products = self.products.find_all().await?;
        Ok(products_to_dtos(products)?)
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    pub async fn find(&self, id: ProductId) -> Result<ProductDto, ServiceError> {
        let product = self.load(id).await?;
        Ok(ProductDto::try_from(product)?)
    }

    /// Replace the product's attributes. The stored product is rebuilt through
    /// validation and keeps its id.
    #[instrument(skip(self, name, image), fields(product_id = %id), err)]
    pub async fn update(
        &self,
        id: ProductId,
        name: &str,
        image: &str,
        price: i64,
    ) -> Result<(), ServiceError> {
        let current = self.load(id).await?;
        let revised = current.revise(name, image, price)?;

        // The row can vanish between the lookup and the write.
        if self.products.update(&revised).await? == 0 {
            return Err(DomainError::product_not_found().into());
        }
        info!("product updated");
        Ok(())
    }

    /// Delete the product together with every cart entry pointing at it.
    #[instrument(skip(self), fields(product_id = %id), err)]
    pub async fn delete(&self, id: ProductId) -> Result<(), ServiceError> {
        if self.products.delete(id).await? == 0 {
            return Err(DomainError::product_not_found().into());
        }
        info!("product deleted");
        Ok(())
    }

    async fn load(&self, id: ProductId) -> Result<Product, ServiceError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::product_not_found().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopcart_core::{ErrorKind, ValidationKind};

    use crate::store::InMemoryStore;

    fn service() -> ProductService {
        ProductService::new(Arc::new(InMemoryStore::new()))
    }

    fn domain_kind(err: &ServiceError) -> Option<ErrorKind> {
        err.as_domain().map(DomainError::kind)
    }

    #[tokio::test]
    async fn create_then_find_round_trips_attributes() {
        let service = service();
        let id = service.create("pizza1", "pizza1.jpg", 8900).await.unwrap();

        let dto = service.find(id).await.unwrap();
        assert_eq!(dto, ProductDto::new(id, "pizza1", "pizza1.jpg", 8900));
    }

    #[tokio::test]
    async fn create_rejects_invalid_product_before_saving() {
        let service = service();

        let err = service.create("pizza", "pizza.jpg", -1).await.unwrap_err();
        assert_eq!(
            domain_kind(&err),
            Some(ErrorKind::Validation(ValidationKind::NegativePrice))
        );
        assert!(service.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_all_lists_products_in_id_order() {
        let service = service();
        let first = service.create("pizza1", "pizza1.jpg", 8900).await.unwrap();
        let second = service.create("pizza2", "pizza2.jpg", 18900).await.unwrap();

        let ids: Vec<_> = service.find_all().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[tokio::test]
    async fn update_keeps_id_and_revalidates() {
        let service = service();
        let id = service.create("pizza1", "pizza1.jpg", 8900).await.unwrap();

        service.update(id, "calzone", "calzone.jpg", 12000).await.unwrap();
        assert_eq!(
            service.find(id).await.unwrap(),
            ProductDto::new(id, "calzone", "calzone.jpg", 12000)
        );

        let err = service
            .update(id, &"x".repeat(101), "calzone.jpg", 12000)
            .await
            .unwrap_err();
        assert_eq!(
            domain_kind(&err),
            Some(ErrorKind::Validation(ValidationKind::NameTooLong))
        );
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_product_fail_with_not_found() {
        let service = service();

        let err = service.update(ProductId::new(5), "a", "b", 1).await.unwrap_err();
        assert_eq!(domain_kind(&err), Some(ErrorKind::ProductNotFound));

        let err = service.delete(ProductId::new(5)).await.unwrap_err();
        assert_eq!(domain_kind(&err), Some(ErrorKind::ProductNotFound));
    }

    #[tokio::test]
    async fn deleted_product_is_gone() {
        let service = service();
        let id = service.create("pizza1", "pizza1.jpg", 8900).await.unwrap();

        service.delete(id).await.unwrap();

        let err = service.find(id).await.unwrap_err();
        assert_eq!(domain_kind(&err), Some(ErrorKind::ProductNotFound));
    }
}
