//! Fulfillment inventory API section (`/FulfillmentInventory/2010-10-01`).

pub mod types;

use self::types::{InventorySupply, InventorySupplyPage};
use crate::Result;
use crate::error::Error;
use crate::executor::{Executor, Params};

pub const MAX_SKUS: usize = 50;

#[derive(Clone, Copy, Debug)]
pub struct Inventory<'client> {
    executor: &'client Executor,
}

impl<'client> Inventory<'client> {
    pub(crate) fn new(executor: &'client Executor) -> Self {
        Self { executor }
    }

    /// Supply held in Amazon fulfillment centers for up to [`MAX_SKUS`] SKUs.
    pub async fn list_inventory_supply<S: AsRef<str>>(
        &self,
        skus: &[S],
    ) -> Result<Vec<InventorySupply>> {
        if skus.len() > MAX_SKUS {
            return Err(Error::validation(format!(
                "at most {MAX_SKUS} SKUs per call, got {}",
                skus.len()
            )));
        }

        let mut params = Params::new();
        params.set_list("SellerSkus.member", skus.iter().map(AsRef::as_ref));

        let page: InventorySupplyPage = self.executor.call("ListInventorySupply", params).await?;
        Ok(page.supply)
    }
}
