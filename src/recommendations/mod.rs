//! Recommendations API section (`/Recommendations/2013-04-01`).

use crate::Result;
use crate::codec::Value;
use crate::executor::{Executor, Params};

#[derive(Clone, Copy, Debug)]
pub struct Recommendations<'client> {
    executor: &'client Executor,
}

impl<'client> Recommendations<'client> {
    pub(crate) fn new(executor: &'client Executor) -> Self {
        Self { executor }
    }

    /// Active recommendations, for one category (`Inventory`, `Selection`, `Pricing`,
    /// `Fulfillment`, `ListingQuality`, `GlobalSelling`, `Advertising`) or for all of them.
    pub async fn list_recommendations(&self, category: Option<&str>) -> Result<Value> {
        let mut params = Params::new();
        params.maybe_set("RecommendationCategory", category);

        Ok(self
            .executor
            .execute("ListRecommendations", params, None)
            .await?
            .into_value())
    }
}
