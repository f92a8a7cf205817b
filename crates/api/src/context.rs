use shopcart_core::MemberId;

/// The member a cart request acts on behalf of.
///
/// Inserted by the member middleware; every `/cart` handler can rely on it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MemberContext {
    member_id: MemberId,
}

impl MemberContext {
    pub fn new(member_id: MemberId) -> Self {
        Self { member_id }
    }

    pub fn member_id(&self) -> MemberId {
        self.member_id
    }
}
