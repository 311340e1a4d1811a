//! Menu-driven front end over the catalog and sales ledger.

pub mod menu;

pub use menu::run;
