//! Persisted (flat) representation of catalog entries.
//!
//! Records carry an explicit `kind` discriminator so reconstruction can
//! dispatch to the right variant and discounts survive a reload. Records
//! written before the discriminator existed have no `kind`; they load as
//! `special` when a `discount` is present and as `standard` otherwise.

use serde::{Deserialize, Serialize};

use storekeep_core::{DomainError, Entity, ProductId};

use crate::product::{CatalogEntry, Discount, Product, ProductKind, SpecialProduct};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ProductKind>,
    pub id: ProductId,
    pub name: String,
    pub base_price: f64,
    pub category: String,
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
}

impl From<&CatalogEntry> for ProductRecord {
    fn from(entry: &CatalogEntry) -> Self {
        let product = entry.product();
        Self {
            kind: Some(entry.kind()),
            id: *product.id(),
            name: product.name().to_string(),
            base_price: product.base_price(),
            category: product.category().to_string(),
            stock: product.stock(),
            discount: entry.discount().map(Discount::value),
        }
    }
}

impl TryFrom<ProductRecord> for CatalogEntry {
    type Error = DomainError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let product = Product::new(
            record.id,
            record.name,
            record.base_price,
            record.category,
            record.stock,
        )?;

        match (record.kind, record.discount) {
            (Some(ProductKind::Standard), None) | (None, None) => Ok(CatalogEntry::Standard(product)),
            (Some(ProductKind::Special), Some(d)) | (None, Some(d)) => Ok(CatalogEntry::Special(
                SpecialProduct::new(product, Discount::new(d)?),
            )),
            (Some(ProductKind::Special), None) => Err(DomainError::validation(format!(
                "special product {} has no discount",
                record.id
            ))),
            (Some(ProductKind::Standard), Some(_)) => Err(DomainError::validation(format!(
                "standard product {} cannot carry a discount",
                record.id
            ))),
        }
    }
}
