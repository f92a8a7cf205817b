//! Postgres-backed persistence ports.
//!
//! Column lists are spelled out in every statement; rows are mapped back
//! through the entity constructors so a row that breaks an invariant surfaces
//! as `StoreError::CorruptRow` instead of an invalid entity.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError |
//! |------------|----------------------|------------|
//! | Database (foreign key violation) | `23503` | `Integrity` |
//! | Database (other) | Any other | `Backend` |
//! | PoolClosed / Io / other | N/A | `Backend` |
//!
//! ## Transactions
//!
//! Multi-statement operations open a `sqlx::Transaction`, commit it on the
//! success path and rely on its drop-rollback for every early return.

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::instrument;

use shopcart_carts::{Cart, Member};
use shopcart_core::{CartId, MemberId, ProductId};
use shopcart_products::Product;

use super::r#trait::{CartStore, MemberStore, ProductStore, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS product (
    id    BIGSERIAL PRIMARY KEY,
    name  VARCHAR(100) NOT NULL,
    image TEXT NOT NULL,
    price BIGINT NOT NULL CHECK (price >= 0)
);

CREATE TABLE IF NOT EXISTS member (
    id       BIGSERIAL PRIMARY KEY,
    email    VARCHAR(255) NOT NULL,
    password VARCHAR(255) NOT NULL
);

CREATE TABLE IF NOT EXISTS cart (
    id         BIGSERIAL PRIMARY KEY,
    member_id  BIGINT NOT NULL REFERENCES member (id),
    product_id BIGINT NOT NULL REFERENCES product (id)
);

CREATE INDEX IF NOT EXISTS cart_member_product_idx ON cart (member_id, product_id);
"#;

/// Postgres implementation of every persistence port.
///
/// `PgPool` is internally reference counted, so cloning the store is cheap.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the tables if they do not exist yet.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait]
impl ProductStore for PostgresStore {
    #[instrument(skip(self, product), err)]
    async fn save_and_get_id(&self, product: &Product) -> Result<ProductId, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO product (name, image, price)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(product.name())
        .bind(product.image())
        .bind(product.price())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("product.save", e))?;

        read_id(&row, "product").map(ProductId::new)
    }

    #[instrument(skip(self), err)]
    async fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, image, price
            FROM product
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("product.find_all", e))?;

        rows.iter().map(product_from_row).collect()
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, image, price
            FROM product
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("product.find_by_id", e))?;

        row.as_ref().map(product_from_row).transpose()
    }

    #[instrument(skip(self, product), fields(product_id = ?product.id()), err)]
    async fn update(&self, product: &Product) -> Result<u64, StoreError> {
        let Some(id) = product.id() else {
            return Ok(0);
        };

        let result = sqlx::query(
            r#"
            UPDATE product
            SET name = $1, image = $2, price = $3
            WHERE id = $4
            "#,
        )
        .bind(product.name())
        .bind(product.image())
        .bind(product.price())
        .bind(id.value())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("product.update", e))?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn delete(&self, id: ProductId) -> Result<u64, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("product.delete.begin", e))?;

        sqlx::query("DELETE FROM cart WHERE product_id = $1")
            .bind(id.value())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("product.delete.cart_rows", e))?;

        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id.value())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("product.delete", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("product.delete.commit", e))?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl CartStore for PostgresStore {
    #[instrument(skip(self, cart), fields(member_id = %cart.member_id(), product_id = %cart.product_id()), err)]
    async fn save_and_get_id(&self, cart: &Cart) -> Result<CartId, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO cart (member_id, product_id)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(cart.member_id().value())
        .bind(cart.product_id().value())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("cart.save", e))?;

        read_id(&row, "cart").map(CartId::new)
    }

    #[instrument(skip(self), fields(member_id = %member_id), err)]
    async fn find_all_products_by_member_id(
        &self,
        member_id: MemberId,
    ) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.name, p.image, p.price
            FROM cart c
            JOIN product p ON p.id = c.product_id
            WHERE c.member_id = $1
            ORDER BY c.id ASC
            "#,
        )
        .bind(member_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("cart.find_all_products_by_member_id", e))?;

        rows.iter().map(product_from_row).collect()
    }

    #[instrument(skip(self), fields(product_id = %product_id, member_id = %member_id), err)]
    async fn delete(&self, product_id: ProductId, member_id: MemberId) -> Result<u64, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("cart.delete.begin", e))?;

        // One statement: a concurrent delete of the same row re-checks the
        // predicate after the first commits and affects zero rows.
        let result = sqlx::query(
            r#"
            DELETE FROM cart
            WHERE id = (
                SELECT id
                FROM cart
                WHERE product_id = $1 AND member_id = $2
                ORDER BY id ASC
                LIMIT 1
            )
            "#,
        )
        .bind(product_id.value())
        .bind(member_id.value())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("cart.delete", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("cart.delete.commit", e))?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl MemberStore for PostgresStore {
    #[instrument(skip(self, member), err)]
    async fn save_and_get_id(&self, member: &Member) -> Result<MemberId, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO member (email, password)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(member.email())
        .bind(member.password())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("member.save", e))?;

        read_id(&row, "member").map(MemberId::new)
    }

    #[instrument(skip(self), fields(member_id = %id), err)]
    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password
            FROM member
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("member.find_by_id", e))?;

        row.as_ref().map(member_from_row).transpose()
    }

    #[instrument(skip(self), err)]
    async fn find_all(&self) -> Result<Vec<Member>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, email, password
            FROM member
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("member.find_all", e))?;

        rows.iter().map(member_from_row).collect()
    }
}

fn read_id(row: &PgRow, table: &'static str) -> Result<i64, StoreError> {
    row.try_get::<i64, _>("id")
        .map_err(|e| StoreError::corrupt_row(table, format!("failed to read id: {e}")))
}

fn product_from_row(row: &PgRow) -> Result<Product, StoreError> {
    let read = |e: sqlx::Error| StoreError::corrupt_row("product", e.to_string());
    let id: i64 = row.try_get("id").map_err(read)?;
    let name: String = row.try_get("name").map_err(read)?;
    let image: String = row.try_get("image").map_err(read)?;
    let price: i64 = row.try_get("price").map_err(read)?;

    Product::with_id(ProductId::new(id), name, image, price)
        .map_err(|e| StoreError::corrupt_row("product", format!("row {id}: {e}")))
}

fn member_from_row(row: &PgRow) -> Result<Member, StoreError> {
    let read = |e: sqlx::Error| StoreError::corrupt_row("member", e.to_string());
    let id: i64 = row.try_get("id").map_err(read)?;
    let email: String = row.try_get("email").map_err(read)?;
    let password: String = row.try_get("password").map_err(read)?;

    Ok(Member::with_id(MemberId::new(id), email, password))
}

/// Map SQLx errors to StoreError.
fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let message = db_err.message().to_string();
            match db_err.code().as_deref() {
                Some("23503") => StoreError::Integrity { operation, message },
                _ => StoreError::Backend { operation, message },
            }
        }
        sqlx::Error::PoolClosed => StoreError::backend(operation, "connection pool closed"),
        other => StoreError::backend(operation, other.to_string()),
    }
}
