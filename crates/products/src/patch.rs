use storekeep_core::{DomainError, DomainResult, Entity};

use crate::product::{CatalogEntry, Discount, Product, SpecialProduct};

/// Partial update of a catalog entry: only `Some` fields are merged.
///
/// The variant of the entry never changes through a patch; setting a
/// `discount` on a standard product is rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub base_price: Option<f64>,
    pub category: Option<String>,
    pub stock: Option<u32>,
    pub discount: Option<f64>,
}

impl ProductPatch {
    pub fn with_stock(stock: u32) -> Self {
        Self {
            stock: Some(stock),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.base_price.is_none()
            && self.category.is_none()
            && self.stock.is_none()
            && self.discount.is_none()
    }

    /// Merge into `entry`, revalidating the result. `entry` is left untouched.
    pub fn apply_to(&self, entry: &CatalogEntry) -> DomainResult<CatalogEntry> {
        let current = entry.product();
        let product = Product::new(
            *current.id(),
            self.name.clone().unwrap_or_else(|| current.name().to_string()),
            self.base_price.unwrap_or(current.base_price()),
            self.category.clone().unwrap_or_else(|| current.category().to_string()),
            self.stock.unwrap_or(current.stock()),
        )?;

        match entry {
            CatalogEntry::Standard(_) => {
                if self.discount.is_some() {
                    return Err(DomainError::validation(format!(
                        "product {} is not a special product; discount cannot be set",
                        current.id()
                    )));
                }
                Ok(CatalogEntry::Standard(product))
            }
            CatalogEntry::Special(special) => {
                let discount = match self.discount {
                    Some(d) => Discount::new(d)?,
                    None => special.discount(),
                };
                Ok(CatalogEntry::Special(SpecialProduct::new(product, discount)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Priced;
    use storekeep_core::ProductId;

    fn widget() -> CatalogEntry {
        Product::new(ProductId::new(1).unwrap(), "Widget", 10.0, "tools", 5)
            .unwrap()
            .into()
    }

    fn special_widget() -> CatalogEntry {
        let product = Product::new(ProductId::new(2).unwrap(), "Deluxe", 40.0, "tools", 2).unwrap();
        SpecialProduct::new(product, Discount::new(0.5).unwrap()).into()
    }

    #[test]
    fn empty_patch_is_identity() {
        let patch = ProductPatch::default();
        assert!(patch.is_empty());
        assert_eq!(patch.apply_to(&widget()).unwrap(), widget());
    }

    #[test]
    fn only_named_fields_change() {
        let patch = ProductPatch {
            name: Some("Sprocket".to_string()),
            stock: Some(9),
            ..ProductPatch::default()
        };
        let updated = patch.apply_to(&widget()).unwrap();

        assert_eq!(updated.name(), "Sprocket");
        assert_eq!(updated.stock(), 9);
        assert_eq!(updated.base_price(), 10.0);
        assert_eq!(updated.category(), "tools");
        assert_eq!(updated.id().get(), 1);
    }

    #[test]
    fn special_entry_keeps_discount_unless_patched() {
        let updated = ProductPatch::with_stock(1).apply_to(&special_widget()).unwrap();
        assert_eq!(updated.final_price(), 20.0);

        let patch = ProductPatch {
            discount: Some(0.25),
            ..ProductPatch::default()
        };
        let updated = patch.apply_to(&special_widget()).unwrap();
        assert_eq!(updated.final_price(), 30.0);
    }

    #[test]
    fn discount_on_standard_entry_is_rejected() {
        let patch = ProductPatch {
            discount: Some(0.1),
            ..ProductPatch::default()
        };
        match patch.apply_to(&widget()) {
            Err(DomainError::Validation(_)) => {}
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_values_are_rejected() {
        let negative_price = ProductPatch {
            base_price: Some(-1.0),
            ..ProductPatch::default()
        };
        assert!(negative_price.apply_to(&widget()).is_err());

        let blank_name = ProductPatch {
            name: Some(String::new()),
            ..ProductPatch::default()
        };
        assert!(blank_name.apply_to(&widget()).is_err());

        let bad_discount = ProductPatch {
            discount: Some(1.0),
            ..ProductPatch::default()
        };
        assert!(bad_discount.apply_to(&special_widget()).is_err());
    }
}
