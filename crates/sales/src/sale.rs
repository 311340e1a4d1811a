use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use storekeep_core::{DomainError, DomainResult, ProductId};

/// Ledger entry: one registered sale.
///
/// `total` is frozen at registration time from the final price then in
/// effect; it is never recomputed from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(with = "sale_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub total: f64,
}

impl Sale {
    /// Build a sale of `quantity` units at `unit_price`, stamped at `at`
    /// truncated to whole seconds.
    pub fn new(
        product_id: ProductId,
        quantity: u32,
        unit_price: f64,
        at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if !unit_price.is_finite() || unit_price < 0.0 {
            return Err(DomainError::validation(format!(
                "unit price must be a non-negative number, got {unit_price}"
            )));
        }

        // A non-finite total would be written to the ledger as `null`.
        let total = unit_price * f64::from(quantity);
        if !total.is_finite() {
            return Err(DomainError::validation(format!(
                "total of {quantity} x {unit_price} is out of range"
            )));
        }

        Ok(Self {
            product_id,
            quantity,
            timestamp: at.trunc_subsecs(0),
            total,
        })
    }
}

/// `YYYY-MM-DD HH:MM:SS` in UTC.
mod sale_timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}
