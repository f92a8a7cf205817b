use std::sync::Arc;

use shopcart_infra::config::StoreBackend;
use shopcart_infra::store::{CartStore, InMemoryStore, MemberStore, PostgresStore, ProductStore, StoreError};
use shopcart_infra::{CartService, MemberService, ProductService};

/// Application services shared by every handler.
#[derive(Clone)]
pub struct AppServices {
    pub products: ProductService,
    pub carts: CartService,
    pub members: MemberService,
}

impl AppServices {
    /// Services over a fresh in-memory store (dev and tests).
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(InMemoryStore::new()))
    }

    /// Wire all services to one store implementing every port.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: ProductStore + CartStore + MemberStore + 'static,
    {
        let products: Arc<dyn ProductStore> = store.clone();
        let carts: Arc<dyn CartStore> = store.clone();
        let members: Arc<dyn MemberStore> = store;

        Self {
            products: ProductService::new(products.clone()),
            carts: CartService::new(products, carts, members.clone()),
            members: MemberService::new(members),
        }
    }
}

/// Build the services for the configured backend.
///
/// The Postgres backend connects and creates the schema before returning.
pub async fn build_services(backend: &StoreBackend) -> Result<AppServices, StoreError> {
    match backend {
        StoreBackend::InMemory => {
            tracing::info!("using in-memory stores");
            Ok(AppServices::in_memory())
        }
        StoreBackend::Postgres {
            database_url,
            max_connections,
        } => {
            let store = PostgresStore::connect(database_url, *max_connections).await?;
            store.ensure_schema().await?;
            tracing::info!(max_connections, "using postgres stores");
            Ok(AppServices::from_store(Arc::new(store)))
        }
    }
}
