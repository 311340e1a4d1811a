use crate::sale::Sale;

/// Snapshot of the whole ledger with its grand total.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesReport {
    pub sales: Vec<Sale>,
    pub total: f64,
}

impl SalesReport {
    pub fn from_sales(sales: Vec<Sale>) -> Self {
        let total = sales.iter().map(|s| s.total).sum();
        Self { sales, total }
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    pub fn units_sold(&self) -> u64 {
        self.sales.iter().map(|s| u64::from(s.quantity)).sum()
    }
}
