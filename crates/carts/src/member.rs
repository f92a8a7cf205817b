use shopcart_core::{Entity, MemberId};

/// Member record as held by the member store.
///
/// The cart core only ever sees the [`MemberId`]; credentials are kept here so
/// the store can seed and list members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    id: Option<MemberId>,
    email: String,
    password: String,
}

impl Member {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: None,
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn with_id(id: MemberId, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn id(&self) -> Option<MemberId> {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl Entity for Member {
    type Id = MemberId;

    fn id(&self) -> Option<MemberId> {
        self.id
    }
}
