use std::sync::Arc;

use chrono::{DateTime, Utc};

use storekeep_core::{DomainError, Entity, ProductId};
use storekeep_products::{Priced, ProductPatch, ProductRecord};
use storekeep_sales::{Sale, SalesReport};

use crate::repository::Repository;

use super::error::{StoreError, StoreResult};
use super::product_store::ProductStore;

/// Append-only sales ledger.
///
/// Registering a sale draws stock from the catalog owned by `products`; the
/// ledger itself offers no way to edit or delete an entry.
#[derive(Debug)]
pub struct SalesLedger<P, L> {
    products: Arc<ProductStore<P>>,
    ledger: L,
}

impl<P, L> SalesLedger<P, L>
where
    P: Repository<ProductRecord>,
    L: Repository<Sale>,
{
    pub fn new(products: Arc<ProductStore<P>>, ledger: L) -> Self {
        Self { products, ledger }
    }

    pub fn products(&self) -> &ProductStore<P> {
        &self.products
    }

    /// Sell `quantity` units of `product_id`, stamped with the current time.
    pub fn register_sale(&self, product_id: ProductId, quantity: u32) -> StoreResult<Sale> {
        self.register_sale_at(product_id, quantity, Utc::now())
    }

    /// Sell `quantity` units of `product_id`, stamped at `at`.
    ///
    /// On success stock is decremented by exactly `quantity` and one sale is
    /// appended whose total is the final price at this moment times
    /// `quantity`. On any rejection neither the catalog nor the ledger
    /// changes.
    pub fn register_sale_at(
        &self,
        product_id: ProductId,
        quantity: u32,
        at: DateTime<Utc>,
    ) -> StoreResult<Sale> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive").into());
        }

        let entry = self
            .products
            .list_all()?
            .into_iter()
            .find(|e| *e.id() == product_id)
            .ok_or_else(|| {
                tracing::warn!(product_id = %product_id, "sale rejected: unknown product");
                StoreError::NotFound(product_id)
            })?;

        if !entry.has_stock_for(quantity) {
            tracing::warn!(
                product_id = %product_id,
                requested = quantity,
                available = entry.stock(),
                "sale rejected: insufficient stock"
            );
            return Err(StoreError::InsufficientStock {
                product_id,
                requested: quantity,
                available: entry.stock(),
            });
        }

        let sale = Sale::new(product_id, quantity, entry.final_price(), at)?;

        // Read the ledger before touching stock so an unreadable ledger
        // aborts the sale with nothing changed.
        let mut sales = self.ledger.load()?;

        let previous_stock = entry.stock();
        self.products
            .update(product_id, &ProductPatch::with_stock(previous_stock - quantity))?;

        sales.push(sale.clone());
        if let Err(err) = self.ledger.save(&sales) {
            tracing::error!(product_id = %product_id, error = %err, "failed to persist sale; restoring stock");
            if let Err(restore_err) = self
                .products
                .update(product_id, &ProductPatch::with_stock(previous_stock))
            {
                tracing::error!(
                    product_id = %product_id,
                    error = %restore_err,
                    "failed to restore stock after ledger write failure"
                );
            }
            return Err(err.into());
        }

        tracing::info!(
            product_id = %product_id,
            quantity,
            total = sale.total,
            "sale registered"
        );
        Ok(sale)
    }

    /// All sales with the sum of their totals (0 for an empty ledger).
    pub fn generate_report(&self) -> StoreResult<SalesReport> {
        Ok(SalesReport::from_sales(self.ledger.load()?))
    }
}
