#![allow(
    clippy::module_name_repetitions,
    reason = "Request suffix is intentional for clarity"
)]

use bon::Builder;
use chrono::{DateTime, Utc};

use super::{FulfillmentChannel, OrderStatus};
use crate::executor::{Params, TIMESTAMP_FORMAT};

/// Filters for `ListOrders`.
#[derive(Debug, Clone, Builder)]
#[non_exhaustive]
pub struct ListOrdersRequest {
    pub created_after: DateTime<Utc>,
    pub created_before: Option<DateTime<Utc>>,
    #[builder(default = vec![OrderStatus::Unshipped, OrderStatus::PartiallyShipped])]
    pub order_statuses: Vec<OrderStatus>,
    #[builder(default = vec![FulfillmentChannel::Mfn])]
    pub fulfillment_channels: Vec<FulfillmentChannel>,
    /// Query every marketplace served by the configured region rather than only the configured one.
    #[builder(default)]
    pub all_marketplaces: bool,
}

impl ListOrdersRequest {
    /// Query parameters for this request; `marketplaces` is used when `all_marketplaces` is set.
    pub(crate) fn params(&self, marketplaces: &[&str]) -> Params {
        let mut params = Params::new();

        params.set(
            "CreatedAfter",
            self.created_after.format(TIMESTAMP_FORMAT).to_string(),
        );
        params.maybe_set(
            "CreatedBefore",
            self.created_before
                .map(|before| before.format(TIMESTAMP_FORMAT).to_string()),
        );
        params.set_list(
            "OrderStatus.Status",
            self.order_statuses.iter().map(ToString::to_string),
        );
        params.set_list(
            "FulfillmentChannel.Channel",
            self.fulfillment_channels.iter().map(ToString::to_string),
        );
        if self.all_marketplaces {
            params.set_list("MarketplaceId.Id", marketplaces.iter().copied());
        }

        params
    }
}
