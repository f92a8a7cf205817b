//! Member registration and lookup.

use std::sync::Arc;

use tracing::{info, instrument};

use shopcart_carts::Member;
use shopcart_core::MemberId;

use crate::dto::MemberDto;
use crate::error::ServiceError;
use crate::store::MemberStore;

#[derive(Clone)]
pub struct MemberService {
    members: Arc<dyn MemberStore>,
}

impl MemberService {
    pub fn new(members: Arc<dyn MemberStore>) -> Self {
        Self { members }
    }

    #[instrument(skip(self, password), err)]
    pub async fn register(&self, email: &str, password: &str) -> Result<MemberId, ServiceError> {
        let id = self
            .members
            .save_and_get_id(&Member::new(email, password))
            .await?;
        info!(member_id = %id, "member registered");
        Ok(id)
    }

    pub async fn find_all(&self) -> Result<Vec<MemberDto>, ServiceError> {
        let members = self.members.find_all().await?;
        Ok(members
            .into_iter()
            .map(MemberDto::try_from)
            .collect::<Result<Vec<_>, _>>()?)
    }

    pub async fn exists(&self, id: MemberId) -> Result<bool, ServiceError> {
        Ok(self.members.find_by_id(id).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    #[tokio::test]
    async fn registered_member_exists_and_is_listed_without_password() {
        let service = MemberService::new(Arc::new(InMemoryStore::new()));
        let id = service.register("pizza@pizza.com", "password").await.unwrap();

        assert!(service.exists(id).await.unwrap());
        assert!(!service.exists(MemberId::new(id.value() + 1)).await.unwrap());

        let members = service.find_all().await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id, id);
        assert_eq!(members[0].email, "pizza@pizza.com");
    }
}
