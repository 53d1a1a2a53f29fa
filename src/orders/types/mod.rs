//! Types for the Orders API section.
//!
//! Request builders live in [`request`], decoded results in [`response`].

pub mod request;
pub mod response;

use serde::{Deserialize, Serialize};

pub use self::request::ListOrdersRequest;
pub use self::response::{Address, Order, OrderItem, OrderItemsPage, OrdersPage};

/// Lifecycle status of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[non_exhaustive]
pub enum OrderStatus {
    /// Placed but payment not yet authorized; only returned when asked for explicitly.
    PendingAvailability,
    Pending,
    Unshipped,
    PartiallyShipped,
    Shipped,
    /// Shipped, but the buyer has not confirmed the invoice yet.
    InvoiceUnconfirmed,
    Canceled,
    Unfulfillable,
    /// Status not known to this crate (captures the raw value).
    #[serde(untagged)]
    #[strum(to_string = "{0}")]
    Unknown(String),
}

/// Who fulfills an order: Amazon or the merchant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
#[non_exhaustive]
pub enum FulfillmentChannel {
    /// Fulfilled by Amazon
    Afn,
    /// Fulfilled by the merchant
    Mfn,
    #[serde(untagged)]
    #[strum(to_string = "{0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_display_as_sent() {
        assert_eq!(OrderStatus::PartiallyShipped.to_string(), "PartiallyShipped");
        assert_eq!(FulfillmentChannel::Mfn.to_string(), "MFN");
    }

    #[test]
    fn unknown_status_keeps_raw_value() -> anyhow::Result<()> {
        let status: OrderStatus = serde_json::from_str(r#""Delayed""#)?;
        assert_eq!(status, OrderStatus::Unknown("Delayed".to_owned()));

        let channel: FulfillmentChannel = serde_json::from_str(r#""AFN""#)?;
        assert_eq!(channel, FulfillmentChannel::Afn);
        Ok(())
    }

    #[test]
    fn unknown_values_display_as_received() {
        assert_eq!(OrderStatus::Unknown("Delayed".to_owned()).to_string(), "Delayed");
        assert_eq!(FulfillmentChannel::Unknown("SFP".to_owned()).to_string(), "SFP");
    }
}
