//! Sellers API section (`/Sellers/2011-07-01`).

pub mod types;

use self::types::MarketplaceParticipations;
use crate::Result;
use crate::executor::{Executor, Params};

#[derive(Clone, Copy, Debug)]
pub struct Sellers<'client> {
    executor: &'client Executor,
}

impl<'client> Sellers<'client> {
    pub(crate) fn new(executor: &'client Executor) -> Self {
        Self { executor }
    }

    /// Marketplaces the seller can sell in, and the participation in each.
    pub async fn list_marketplace_participations(&self) -> Result<MarketplaceParticipations> {
        self.executor
            .call("ListMarketplaceParticipations", Params::new())
            .await
    }
}
