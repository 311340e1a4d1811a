//! Products domain module (catalog entities).
//!
//! This crate contains the catalog entity model and its pricing rule,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod patch;
pub mod product;
pub mod record;

pub use patch::ProductPatch;
pub use product::{CatalogEntry, Discount, Priced, Product, ProductKind, SpecialProduct};
pub use record::ProductRecord;
