use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use shopcart_carts::{Cart, Member};
use shopcart_core::{CartId, MemberId, ProductId};
use shopcart_products::Product;

use super::r#trait::{CartStore, MemberStore, ProductStore, StoreError};

#[derive(Debug, Default)]
struct Tables {
    products: BTreeMap<ProductId, Product>,
    members: BTreeMap<MemberId, Member>,
    /// Kept in insertion order, which is also id order.
    carts: Vec<Cart>,
    product_seq: i64,
    member_seq: i64,
    cart_seq: i64,
}

fn next_id(seq: &mut i64) -> i64 {
    *seq += 1;
    *seq
}

/// In-memory implementation of every persistence port.
///
/// Intended for tests/dev. All three tables sit behind one lock so the
/// cross-table steps (cart join, product delete cascade) are atomic.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self, operation: &'static str) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|_| StoreError::backend(operation, "lock poisoned"))
    }

    fn write(&self, operation: &'static str) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|_| StoreError::backend(operation, "lock poisoned"))
    }
}

#[async_trait]
impl ProductStore for InMemoryStore {
    async fn save_and_get_id(&self, product: &Product) -> Result<ProductId, StoreError> {
        let mut tables = self.write("product.save")?;
        let id = ProductId::new(next_id(&mut tables.product_seq));
        tables.products.insert(id, product.clone().persisted(id));
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        let tables = self.read("product.find_all")?;
        Ok(tables.products.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let tables = self.read("product.find_by_id")?;
        Ok(tables.products.get(&id).cloned())
    }

    async fn update(&self, product: &Product) -> Result<u64, StoreError> {
        let Some(id) = product.id() else {
            return Ok(0);
        };
        let mut tables = self.write("product.update")?;
        match tables.products.get_mut(&id) {
            Some(row) => {
                *row = product.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: ProductId) -> Result<u64, StoreError> {
        let mut tables = self.write("product.delete")?;
        if tables.products.remove(&id).is_none() {
            return Ok(0);
        }
        tables.carts.retain(|c| c.product_id() != id);
        Ok(1)
    }
}

#[async_trait]
impl CartStore for InMemoryStore {
    async fn save_and_get_id(&self, cart: &Cart) -> Result<CartId, StoreError> {
        let mut tables = self.write("cart.save")?;

        // Same guarantees the Postgres foreign keys give.
        if !tables.products.contains_key(&cart.product_id()) {
            return Err(StoreError::Integrity {
                operation: "cart.save",
                message: format!("product {} does not exist", cart.product_id()),
            });
        }
        if !tables.members.contains_key(&cart.member_id()) {
            return Err(StoreError::Integrity {
                operation: "cart.save",
                message: format!("member {} does not exist", cart.member_id()),
            });
        }

        let id = CartId::new(next_id(&mut tables.cart_seq));
        tables
            .carts
            .push(Cart::with_id(id, cart.member_id(), cart.product_id()));
        Ok(id)
    }

    async fn find_all_products_by_member_id(
        &self,
        member_id: MemberId,
    ) -> Result<Vec<Product>, StoreError> {
        let tables = self.read("cart.find_all_products_by_member_id")?;
        Ok(tables
            .carts
            .iter()
            .filter(|c| c.member_id() == member_id)
            .filter_map(|c| tables.products.get(&c.product_id()).cloned())
            .collect())
    }

    async fn delete(&self, product_id: ProductId, member_id: MemberId) -> Result<u64, StoreError> {
        let mut tables = self.write("cart.delete")?;
        match tables.carts.iter().position(|c| c.links(product_id, member_id)) {
            Some(idx) => {
                tables.carts.remove(idx);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[async_trait]
impl MemberStore for InMemoryStore {
    async fn save_and_get_id(&self, member: &Member) -> Result<MemberId, StoreError> {
        let mut tables = self.write("member.save")?;
        let id = MemberId::new(next_id(&mut tables.member_seq));
        tables
            .members
            .insert(id, Member::with_id(id, member.email(), member.password()));
        Ok(id)
    }

    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, StoreError> {
        let tables = self.read("member.find_by_id")?;
        Ok(tables.members.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Member>, StoreError> {
        let tables = self.read("member.find_all")?;
        Ok(tables.members.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pizza(n: u32) -> Product {
        Product::new(format!("pizza{n}"), format!("pizza{n}.jpg"), 8900).unwrap()
    }

    #[tokio::test]
    async fn ids_are_positive_and_sequential() {
        let store = InMemoryStore::new();
        let first = ProductStore::save_and_get_id(&store, &pizza(1)).await.unwrap();
        let second = ProductStore::save_and_get_id(&store, &pizza(2)).await.unwrap();
        assert_eq!(first.value(), 1);
        assert_eq!(second.value(), 2);

        let stored = ProductStore::find_by_id(&store, first).await.unwrap().unwrap();
        assert_eq!(stored.id(), Some(first));
    }

    #[tokio::test]
    async fn update_reports_rows_affected() {
        let store = InMemoryStore::new();
        let id = ProductStore::save_and_get_id(&store, &pizza(1)).await.unwrap();

        let stored = ProductStore::find_by_id(&store, id).await.unwrap().unwrap();
        let revised = stored.revise("calzone", "calzone.jpg", 12000).unwrap();
        assert_eq!(ProductStore::update(&store, &revised).await.unwrap(), 1);
        assert_eq!(ProductStore::update(&store, &pizza(9)).await.unwrap(), 0);

        let stored = ProductStore::find_by_id(&store, id).await.unwrap().unwrap();
        assert_eq!(stored.name(), "calzone");
    }

    #[tokio::test]
    async fn cart_save_rejects_dangling_references() {
        let store = InMemoryStore::new();
        let err = CartStore::save_and_get_id(&store, &Cart::new(MemberId::new(1), ProductId::new(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Integrity { .. }));
    }

    #[tokio::test]
    async fn cart_delete_removes_a_single_duplicate() {
        let store = InMemoryStore::new();
        let product_id = ProductStore::save_and_get_id(&store, &pizza(1)).await.unwrap();
        let member_id = MemberStore::save_and_get_id(&store, &Member::new("a@a.com", "pw"))
            .await
            .unwrap();
        let cart = Cart::new(member_id, product_id);
        CartStore::save_and_get_id(&store, &cart).await.unwrap();
        CartStore::save_and_get_id(&store, &cart).await.unwrap();

        assert_eq!(CartStore::delete(&store, product_id, member_id).await.unwrap(), 1);
        let remaining = store.find_all_products_by_member_id(member_id).await.unwrap();
        assert_eq!(remaining.len(), 1);
    }

    #[tokio::test]
    async fn product_delete_cascades_to_cart_rows() {
        let store = InMemoryStore::new();
        let product_id = ProductStore::save_and_get_id(&store, &pizza(1)).await.unwrap();
        let member_id = MemberStore::save_and_get_id(&store, &Member::new("a@a.com", "pw"))
            .await
            .unwrap();
        CartStore::save_and_get_id(&store, &Cart::new(member_id, product_id))
            .await
            .unwrap();

        assert_eq!(ProductStore::delete(&store, product_id).await.unwrap(), 1);
        assert!(store.find_all_products_by_member_id(member_id).await.unwrap().is_empty());
        assert_eq!(ProductStore::delete(&store, product_id).await.unwrap(), 0);
    }
}
