//! Orders API section (`/Orders/2013-09-01`).
//!
//! | Method | Operation |
//! |--------|-----------|
//! | [`Orders::list_orders`] | `ListOrders` |
//! | [`Orders::list_orders_by_next_token`] | `ListOrdersByNextToken` |
//! | [`Orders::stream_orders`] | `ListOrders` followed by every `NextToken` page |
//! | [`Orders::get_order`] | `GetOrder` |
//! | [`Orders::list_order_items`] | `ListOrderItems` |
//! | [`Orders::list_order_items_by_next_token`] | `ListOrderItemsByNextToken` |

pub mod types;

use async_stream::try_stream;
use futures::Stream;

use self::types::{ListOrdersRequest, Order, OrderItemsPage, OrdersPage};
use crate::Result;
use crate::codec::as_sequence;
use crate::executor::{Executor, Params};
use crate::region_marketplaces;
use crate::serde_helpers::from_value;

/// Handle for the Orders section, borrowed from [`crate::Client::orders`].
#[derive(Clone, Copy, Debug)]
pub struct Orders<'client> {
    executor: &'client Executor,
}

impl<'client> Orders<'client> {
    pub(crate) fn new(executor: &'client Executor) -> Self {
        Self { executor }
    }

    /// Orders created in the requested window, first page only.
    pub async fn list_orders(&self, request: &ListOrdersRequest) -> Result<OrdersPage> {
        let marketplaces = if request.all_marketplaces {
            region_marketplaces(self.executor.region_host())
        } else {
            Vec::new()
        };

        self.executor
            .call("ListOrders", request.params(&marketplaces))
            .await
    }

    pub async fn list_orders_by_next_token(&self, next_token: &str) -> Result<OrdersPage> {
        let mut params = Params::new();
        params.set("NextToken", next_token);

        self.executor.call("ListOrdersByNextToken", params).await
    }

    /// Streams every order matching `request`, following `NextToken` until the last page.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use amazon_mws_client::Client;
    /// use amazon_mws_client::orders::types::ListOrdersRequest;
    /// use futures::StreamExt as _;
    /// use tokio::pin;
    ///
    /// # async fn example(client: Client, request: ListOrdersRequest) {
    /// let orders = client.orders();
    /// let stream = orders.stream_orders(&request);
    /// pin!(stream);
    ///
    /// while let Some(result) = stream.next().await {
    ///     match result {
    ///         Ok(order) => println!("Order: {}", order.amazon_order_id),
    ///         Err(e) => eprintln!("Error: {e}"),
    ///     }
    /// }
    /// # }
    /// ```
    pub fn stream_orders<'request>(
        &'request self,
        request: &'request ListOrdersRequest,
    ) -> impl Stream<Item = Result<Order>> + 'request
    where
        'client: 'request,
    {
        try_stream! {
            let mut page = self.list_orders(request).await?;

            loop {
                for order in page.orders {
                    yield order;
                }

                let Some(token) = page.next_token else {
                    break;
                };
                page = self.list_orders_by_next_token(&token).await?;
            }
        }
    }

    /// The order with `amazon_order_id`, or `None` when MWS does not know it.
    pub async fn get_order(&self, amazon_order_id: &str) -> Result<Option<Order>> {
        let mut params = Params::new();
        params.set("AmazonOrderId.Id.1", amazon_order_id);

        let result = self
            .executor
            .execute("GetOrder", params, None)
            .await?
            .into_value();

        match result.path(&["Orders", "Order"]) {
            Some(order) if !order.is_empty() => as_sequence(order.clone())
                .first()
                .map(from_value::<Order>)
                .transpose(),
            _ => Ok(None),
        }
    }

    pub async fn list_order_items(&self, amazon_order_id: &str) -> Result<OrderItemsPage> {
        let mut params = Params::new();
        params.set("AmazonOrderId", amazon_order_id);

        self.executor.call("ListOrderItems", params).await
    }

    pub async fn list_order_items_by_next_token(&self, next_token: &str) -> Result<OrderItemsPage> {
        let mut params = Params::new();
        params.set("NextToken", next_token);

        self.executor.call("ListOrderItemsByNextToken", params).await
    }
}
