use serde::{Deserialize, Serialize};

use storekeep_core::{DomainError, DomainResult, Entity, ProductId, ValueObject};

/// Catalog variant discriminator (persisted as `kind`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Standard,
    Special,
}

/// Final-price contract shared by every catalog entry.
pub trait Priced {
    /// Price charged per unit at sale time, after any discount.
    fn final_price(&self) -> f64;
}

/// Fractional discount in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discount(f64);

impl Discount {
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() || !(0.0..1.0).contains(&value) {
            return Err(DomainError::validation(format!(
                "discount must be in [0, 1), got {value}"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl ValueObject for Discount {}

/// Base catalog entity: a product sold at its base price.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    base_price: f64,
    category: String,
    stock: u32,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        base_price: f64,
        category: impl Into<String>,
        stock: u32,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if !base_price.is_finite() || base_price < 0.0 {
            return Err(DomainError::validation(format!(
                "base price must be a non-negative number, got {base_price}"
            )));
        }

        Ok(Self {
            id,
            name,
            base_price,
            category: category.into(),
            stock,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }
}

impl Priced for Product {
    fn final_price(&self) -> f64 {
        self.base_price
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Discounted catalog entity: base product fields plus a discount.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialProduct {
    product: Product,
    discount: Discount,
}

impl SpecialProduct {
    pub fn new(product: Product, discount: Discount) -> Self {
        Self { product, discount }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn discount(&self) -> Discount {
        self.discount
    }
}

impl Priced for SpecialProduct {
    fn final_price(&self) -> f64 {
        self.product.base_price * (1.0 - self.discount.value())
    }
}

/// Any entry in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEntry {
    Standard(Product),
    Special(SpecialProduct),
}

impl CatalogEntry {
    pub fn kind(&self) -> ProductKind {
        match self {
            CatalogEntry::Standard(_) => ProductKind::Standard,
            CatalogEntry::Special(_) => ProductKind::Special,
        }
    }

    /// Shared base fields, regardless of variant.
    pub fn product(&self) -> &Product {
        match self {
            CatalogEntry::Standard(p) => p,
            CatalogEntry::Special(s) => &s.product,
        }
    }

    pub fn name(&self) -> &str {
        self.product().name()
    }

    pub fn base_price(&self) -> f64 {
        self.product().base_price()
    }

    pub fn category(&self) -> &str {
        self.product().category()
    }

    pub fn stock(&self) -> u32 {
        self.product().stock()
    }

    pub fn discount(&self) -> Option<Discount> {
        match self {
            CatalogEntry::Standard(_) => None,
            CatalogEntry::Special(s) => Some(s.discount),
        }
    }

    /// Whether `quantity` units can be taken from stock.
    pub fn has_stock_for(&self, quantity: u32) -> bool {
        self.stock() >= quantity
    }
}

impl Priced for CatalogEntry {
    fn final_price(&self) -> f64 {
        match self {
            CatalogEntry::Standard(p) => p.final_price(),
            CatalogEntry::Special(s) => s.final_price(),
        }
    }
}

impl Entity for CatalogEntry {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.product().id
    }
}

impl From<Product> for CatalogEntry {
    fn from(value: Product) -> Self {
        CatalogEntry::Standard(value)
    }
}

impl From<SpecialProduct> for CatalogEntry {
    fn from(value: SpecialProduct) -> Self {
        CatalogEntry::Special(value)
    }
}
