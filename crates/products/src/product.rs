use shopcart_core::{DomainError, DomainResult, Entity, ProductId, ValidationKind};

/// Longest accepted product name, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// Lowest accepted price (smallest currency unit).
pub const MIN_PRICE: i64 = 0;

/// Catalog product.
///
/// Every instance satisfies the name-length and price invariants: there is no
/// way to obtain a `Product` that skipped validation, and no setters. An
/// "update" is a new instance built through [`Product::revise`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: Option<ProductId>,
    name: String,
    image: String,
    price: i64,
}

impl Product {
    /// Build a product that has not been persisted yet.
    pub fn new(name: impl Into<String>, image: impl Into<String>, price: i64) -> DomainResult<Self> {
        Self::build(None, name.into(), image.into(), price)
    }

    /// Rebuild a product that already has a store-assigned id (row mapping).
    pub fn with_id(
        id: ProductId,
        name: impl Into<String>,
        image: impl Into<String>,
        price: i64,
    ) -> DomainResult<Self> {
        Self::build(Some(id), name.into(), image.into(), price)
    }

    /// The same product, now carrying the id the store assigned to it.
    pub fn persisted(self, id: ProductId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    /// A new validated instance with the same id and the given attributes.
    pub fn revise(
        &self,
        name: impl Into<String>,
        image: impl Into<String>,
        price: i64,
    ) -> DomainResult<Self> {
        Self::build(self.id, name.into(), image.into(), price)
    }

    pub fn id(&self) -> Option<ProductId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    fn build(id: Option<ProductId>, name: String, image: String, price: i64) -> DomainResult<Self> {
        validate_name(&name)?;
        validate_price(price)?;
        Ok(Self {
            id,
            name,
            image,
            price,
        })
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Option<ProductId> {
        self.id
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::validation(
            ValidationKind::NameTooLong,
            format!("상품명의 길이는 {MAX_NAME_LENGTH}자 이하여야합니다."),
        ));
    }
    Ok(())
}

fn validate_price(price: i64) -> DomainResult<()> {
    if price < MIN_PRICE {
        return Err(DomainError::validation(
            ValidationKind::NegativePrice,
            format!("상품 가격은 {MIN_PRICE}원 이상이여야 합니다."),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopcart_core::ErrorKind;

    #[test]
    fn new_product_has_no_id() {
        let product = Product::new("pizza1", "pizza1.jpg", 8900).unwrap();
        assert_eq!(product.id(), None);
        assert!(!product.is_persisted());
        assert_eq!(product.name(), "pizza1");
        assert_eq!(product.image(), "pizza1.jpg");
        assert_eq!(product.price(), 8900);
    }

    #[test]
    fn persisted_product_keeps_its_id_across_revisions() {
        let product = Product::new("pizza1", "pizza1.jpg", 8900)
            .unwrap()
            .persisted(ProductId::new(7));
        assert_eq!(product.id(), Some(ProductId::new(7)));

        let revised = product.revise("pizza2", "pizza2.jpg", 18900).unwrap();
        assert_eq!(revised.id(), Some(ProductId::new(7)));
        assert_eq!(revised.name(), "pizza2");
        // The original instance is untouched.
        assert_eq!(product.name(), "pizza1");
    }

    #[test]
    fn name_of_exactly_max_length_is_accepted() {
        let name = "a".repeat(MAX_NAME_LENGTH);
        assert!(Product::new(name, "img.png", 1).is_ok());
    }

    #[test]
    fn name_over_max_length_is_rejected() {
        let err = Product::new("a".repeat(MAX_NAME_LENGTH + 1), "img.png", 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation(ValidationKind::NameTooLong));
        assert_eq!(err.to_string(), "상품명의 길이는 100자 이하여야합니다.");
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        // 100 Hangul syllables are 300 bytes in UTF-8.
        let name = "피".repeat(MAX_NAME_LENGTH);
        assert!(Product::new(name, "img.png", 1).is_ok());
    }

    #[test]
    fn zero_price_is_accepted() {
        assert_eq!(Product::new("free", "free.png", 0).unwrap().price(), 0);
    }

    #[test]
    fn negative_price_is_rejected() {
        let err = Product::new("pizza", "pizza.jpg", -1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation(ValidationKind::NegativePrice));
        assert_eq!(err.to_string(), "상품 가격은 0원 이상이여야 합니다.");
    }

    #[test]
    fn revise_reapplies_validation() {
        let product = Product::with_id(ProductId::new(1), "pizza", "pizza.jpg", 100).unwrap();
        let err = product.revise("pizza", "pizza.jpg", -100).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation(ValidationKind::NegativePrice));
    }

    #[test]
    fn astral_characters_count_once_toward_name_length() {
        let at_limit = "😀".repeat(MAX_NAME_LENGTH);
        assert!(Product::new(at_limit, "pizza.jpg", 1).is_ok());

        let err = Product::new("😀".repeat(MAX_NAME_LENGTH + 1), "pizza.jpg", 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation(ValidationKind::NameTooLong));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: any name longer than the limit fails with NameTooLong.
            #[test]
            fn long_names_always_fail(name in "[a-z가-힣]{101,160}", price in 0i64..1_000_000) {
                let err = Product::new(name, "img.png", price).unwrap_err();
                prop_assert_eq!(err.kind(), ErrorKind::Validation(ValidationKind::NameTooLong));
            }

            /// Property: any negative price fails with NegativePrice.
            #[test]
            fn negative_prices_always_fail(name in "[a-z]{0,100}", price in i64::MIN..0) {
                let err = Product::new(name, "img.png", price).unwrap_err();
                prop_assert_eq!(err.kind(), ErrorKind::Validation(ValidationKind::NegativePrice));
            }

            /// Property: valid input always constructs, unpersisted, with attributes intact.
            #[test]
            fn valid_input_always_constructs(name in "[A-Za-z0-9 ]{0,100}", price in 0i64..i64::MAX) {
                let product = Product::new(name.clone(), "img.png", price).unwrap();
                prop_assert_eq!(product.id(), None);
                prop_assert_eq!(product.name(), name.as_str());
                prop_assert_eq!(product.price(), price);
            }
        }
    }
}
