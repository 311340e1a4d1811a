//! Sales ledger domain module.
//!
//! This crate contains the sale record and report model, implemented purely as
//! deterministic domain logic (no IO, no storage).

pub mod report;
pub mod sale;

pub use report::SalesReport;
pub use sale::Sale;
