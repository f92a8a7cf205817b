use shopcart_core::{CartId, Entity, MemberId, ProductId};

/// One member/product association row.
///
/// Duplicates are allowed: adding the same product twice yields two rows.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cart {
    id: Option<CartId>,
    member_id: MemberId,
    product_id: ProductId,
}

impl Cart {
    pub fn new(member_id: MemberId, product_id: ProductId) -> Self {
        Self {
            id: None,
            member_id,
            product_id,
        }
    }

    pub fn with_id(id: CartId, member_id: MemberId, product_id: ProductId) -> Self {
        Self {
            id: Some(id),
            member_id,
            product_id,
        }
    }

    pub fn id(&self) -> Option<CartId> {
        self.id
    }

    pub fn member_id(&self) -> MemberId {
        self.member_id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Whether this row is the association for the given pair.
    pub fn links(&self, product_id: ProductId, member_id: MemberId) -> bool {
        self.product_id == product_id && self.member_id == member_id
    }
}

impl Entity for Cart {
    type Id = CartId;

    fn id(&self) -> Option<CartId> {
        self.id
    }
}
