use storekeep_core::{Entity, ProductId};
use storekeep_products::{CatalogEntry, ProductPatch, ProductRecord};

use crate::repository::Repository;

use super::error::{StoreError, StoreResult};

/// CRUD over the product catalog, enforcing id uniqueness.
///
/// Each call is a full read of the catalog, an in-memory edit and (for
/// mutations) a full rewrite.
#[derive(Debug)]
pub struct ProductStore<R> {
    repo: R,
}

impl<R> ProductStore<R>
where
    R: Repository<ProductRecord>,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Every catalog entry, reconstructed with its variant.
    pub fn list_all(&self) -> StoreResult<Vec<CatalogEntry>> {
        self.repo.load()?.into_iter().map(reconstruct).collect()
    }

    pub fn get(&self, id: ProductId) -> StoreResult<Option<CatalogEntry>> {
        self.repo
            .load()?
            .into_iter()
            .find(|r| r.id == id)
            .map(reconstruct)
            .transpose()
    }

    /// Add a new entry. Fails with `DuplicateId` (and writes nothing) when the
    /// id is already taken.
    pub fn register(&self, entry: CatalogEntry) -> StoreResult<()> {
        let id = *entry.id();
        let mut records = self.repo.load()?;

        if records.iter().any(|r| r.id == id) {
            tracing::warn!(product_id = %id, "rejected registration: duplicate id");
            return Err(StoreError::DuplicateId(id));
        }

        records.push(ProductRecord::from(&entry));
        self.repo.save(&records)?;

        tracing::info!(product_id = %id, kind = ?entry.kind(), "product registered");
        Ok(())
    }

    /// Merge `patch` into the entry with `id` and persist.
    ///
    /// Nothing is written when the id is absent (`NotFound`) or the merged
    /// entry fails validation.
    pub fn update(&self, id: ProductId, patch: &ProductPatch) -> StoreResult<CatalogEntry> {
        let mut records = self.repo.load()?;

        let Some(slot) = records.iter_mut().find(|r| r.id == id) else {
            tracing::warn!(product_id = %id, "update target not found");
            return Err(StoreError::NotFound(id));
        };

        let current = reconstruct(slot.clone())?;
        let updated = patch.apply_to(&current)?;
        *slot = ProductRecord::from(&updated);
        self.repo.save(&records)?;

        tracing::info!(product_id = %id, "product updated");
        Ok(updated)
    }

    /// Remove the entry with `id` if present. The catalog is rewritten either
    /// way; returns whether anything was removed.
    pub fn remove(&self, id: ProductId) -> StoreResult<bool> {
        let mut records = self.repo.load()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        let removed = records.len() != before;

        self.repo.save(&records)?;

        if removed {
            tracing::info!(product_id = %id, "product removed");
        } else {
            tracing::debug!(product_id = %id, "remove: no such product");
        }
        Ok(removed)
    }
}

fn reconstruct(record: ProductRecord) -> StoreResult<CatalogEntry> {
    let id = record.id;
    CatalogEntry::try_from(record).map_err(|source| StoreError::InvalidRecord { id, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use storekeep_core::DomainError;
    use storekeep_products::{Discount, Priced, Product, SpecialProduct};

    use crate::repository::InMemoryRepository;

    type Repo = Arc<InMemoryRepository<ProductRecord>>;

    fn pid(n: u64) -> ProductId {
        ProductId::new(n).unwrap()
    }

    fn widget() -> CatalogEntry {
        Product::new(pid(1), "Widget", 10.0, "tools", 5).unwrap().into()
    }

    fn special(id: u64, discount: f64) -> CatalogEntry {
        let product = Product::new(pid(id), "Deluxe", 40.0, "tools", 2).unwrap();
        SpecialProduct::new(product, Discount::new(discount).unwrap()).into()
    }

    fn setup() -> (ProductStore<Repo>, Repo) {
        let repo: Repo = Arc::new(InMemoryRepository::new());
        (ProductStore::new(repo.clone()), repo)
    }

    #[test]
    fn registered_product_is_listed_with_identical_fields() {
        let (store, _) = setup();
        store.register(widget()).unwrap();

        let all = store.list_all().unwrap();
        assert_eq!(all, vec![widget()]);
    }

    #[test]
    fn special_products_keep_their_discount_after_reload() {
        let (store, _) = setup();
        store.register(special(2, 0.5)).unwrap();

        let entry = store.get(pid(2)).unwrap().unwrap();
        assert_eq!(entry.discount().map(|d| d.value()), Some(0.5));
        assert_eq!(entry.final_price(), 20.0);
    }

    #[test]
    fn duplicate_id_is_rejected_without_mutation() {
        let (store, repo) = setup();
        store.register(widget()).unwrap();
        let before = repo.load().unwrap();

        let clash: CatalogEntry = Product::new(pid(1), "Other", 1.0, "misc", 1).unwrap().into();
        match store.register(clash) {
            Err(StoreError::DuplicateId(id)) => assert_eq!(id, pid(1)),
            other => panic!("Expected DuplicateId, got {other:?}"),
        }
        assert_eq!(repo.load().unwrap(), before);
    }

    #[test]
    fn update_changes_only_named_fields() {
        let (store, _) = setup();
        store.register(widget()).unwrap();

        let patch = ProductPatch {
            base_price: Some(12.5),
            ..ProductPatch::default()
        };
        let updated = store.update(pid(1), &patch).unwrap();

        assert_eq!(updated.base_price(), 12.5);
        let stored = store.get(pid(1)).unwrap().unwrap();
        assert_eq!(stored, updated);
        assert_eq!(stored.name(), "Widget");
        assert_eq!(stored.category(), "tools");
        assert_eq!(stored.stock(), 5);
    }

    #[test]
    fn update_of_absent_id_reports_not_found_and_writes_nothing() {
        let (store, repo) = setup();
        store.register(widget()).unwrap();
        let before = repo.load().unwrap();

        let err = store.update(pid(99), &ProductPatch::with_stock(1)).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(repo.load().unwrap(), before);
    }

    #[test]
    fn invalid_update_is_rejected_without_mutation() {
        let (store, _) = setup();
        store.register(widget()).unwrap();

        let patch = ProductPatch {
            base_price: Some(-3.0),
            ..ProductPatch::default()
        };
        match store.update(pid(1), &patch) {
            Err(StoreError::Domain(DomainError::Validation(_))) => {}
            other => panic!("Expected Validation error, got {other:?}"),
        }
        assert_eq!(store.get(pid(1)).unwrap().unwrap(), widget());
    }

    #[test]
    fn remove_is_idempotent() {
        let (store, _) = setup();
        store.register(widget()).unwrap();
        store.register(special(2, 0.1)).unwrap();

        assert!(store.remove(pid(1)).unwrap());
        assert!(!store.remove(pid(1)).unwrap());

        let ids: Vec<u64> = store.list_all().unwrap().iter().map(|e| e.id().get()).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn invalid_stored_record_is_reported_as_malformed() {
        let record = ProductRecord {
            kind: None,
            id: pid(3),
            name: "Broken".to_string(),
            base_price: -1.0,
            category: "misc".to_string(),
            stock: 0,
            discount: None,
        };
        let store = ProductStore::new(InMemoryRepository::with_records(vec![record]));

        let err = store.list_all().unwrap_err();
        assert!(err.is_malformed_store());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: a patch touches exactly the fields it names.
            #[test]
            fn update_preserves_unnamed_fields(
                name in proptest::option::of("[A-Za-z][A-Za-z0-9 ]{0,20}"),
                price in proptest::option::of(0.0f64..1000.0),
                stock in proptest::option::of(0u32..10_000)
            ) {
                let (store, _) = setup();
                store.register(widget()).unwrap();

                let patch = ProductPatch {
                    name: name.clone(),
                    base_price: price,
                    category: None,
                    stock,
                    discount: None,
                };
                store.update(pid(1), &patch).unwrap();
                let stored = store.get(pid(1)).unwrap().unwrap();

                prop_assert_eq!(stored.name(), name.as_deref().unwrap_or("Widget"));
                prop_assert_eq!(stored.base_price(), price.unwrap_or(10.0));
                prop_assert_eq!(stored.stock(), stock.unwrap_or(5));
                prop_assert_eq!(stored.category(), "tools");
            }
        }
    }
}
