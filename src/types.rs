//! Re-exported types from external crates for convenience.
//!
//! These types are commonly used in this SDK and are re-exported here
//! so users don't need to add these dependencies to their `Cargo.toml`.

/// Date and time types for order, feed and report timestamps.
pub use chrono::{DateTime, Utc};
/// Arbitrary precision decimal type for prices and money amounts.
pub use rust_decimal::Decimal;
/// Macro for creating [`Decimal`] literals at compile time.
///
/// # Example
/// ```
/// use amazon_mws_client::types::dec;
/// let price = dec!(19.99);
/// ```
pub use rust_decimal_macros::dec;

pub use crate::codec::{Attributed, Map, Scalar, Value};

use serde::{Deserialize, Serialize};

/// An amount in a currency, as MWS reports order totals and item prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct Money {
    pub currency_code: Option<String>,
    pub amount: Decimal,
}
