#![allow(
    clippy::module_name_repetitions,
    reason = "Response suffix is intentional for clarity"
)]

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_with::{DisplayFromStr, NoneAsEmptyString, serde_as};

use super::{FulfillmentChannel, OrderStatus};
use crate::serde_helpers::{EmptyAsDefault, Sequence};
use crate::types::Money;

/// One page of `ListOrders` or `ListOrdersByNextToken`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "OrdersResult")]
#[non_exhaustive]
pub struct OrdersPage {
    pub orders: Vec<Order>,
    /// Present when more orders are available.
    pub next_token: Option<String>,
}

#[serde_as]
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OrdersResult {
    #[serde_as(as = "EmptyAsDefault")]
    #[serde(default)]
    orders: OrderList,
    next_token: Option<String>,
}

#[serde_as]
#[derive(Default, Deserialize)]
struct OrderList {
    #[serde_as(as = "Sequence")]
    #[serde(rename = "Order", default)]
    order: Vec<Order>,
}

impl From<OrdersResult> for OrdersPage {
    fn from(result: OrdersResult) -> Self {
        Self {
            orders: result.orders.order,
            next_token: result.next_token.filter(|token| !token.is_empty()),
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct Order {
    pub amazon_order_id: String,
    pub seller_order_id: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub purchase_date: Option<DateTime<Utc>>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub last_update_date: Option<DateTime<Utc>>,
    pub order_status: Option<OrderStatus>,
    pub fulfillment_channel: Option<FulfillmentChannel>,
    pub sales_channel: Option<String>,
    pub ship_service_level: Option<String>,
    pub shipment_service_level_category: Option<String>,
    pub shipping_address: Option<Address>,
    pub order_total: Option<Money>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub number_of_items_shipped: Option<u32>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub number_of_items_unshipped: Option<u32>,
    pub payment_method: Option<String>,
    pub marketplace_id: Option<String>,
    pub buyer_email: Option<String>,
    pub buyer_name: Option<String>,
    pub order_type: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub earliest_ship_date: Option<DateTime<Utc>>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub latest_ship_date: Option<DateTime<Utc>>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub is_prime: Option<bool>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub is_business_order: Option<bool>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub is_premium_order: Option<bool>,
}

/// Shipping address of an order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct Address {
    pub name: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub address_line3: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub district: Option<String>,
    pub state_or_region: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
    pub phone: Option<String>,
    pub address_type: Option<String>,
}

/// One page of `ListOrderItems` or `ListOrderItemsByNextToken`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "OrderItemsResult")]
#[non_exhaustive]
pub struct OrderItemsPage {
    pub amazon_order_id: Option<String>,
    pub items: Vec<OrderItem>,
    pub next_token: Option<String>,
}

#[serde_as]
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OrderItemsResult {
    amazon_order_id: Option<String>,
    #[serde_as(as = "EmptyAsDefault")]
    #[serde(default)]
    order_items: OrderItemList,
    next_token: Option<String>,
}

#[serde_as]
#[derive(Default, Deserialize)]
struct OrderItemList {
    #[serde_as(as = "Sequence")]
    #[serde(rename = "OrderItem", default)]
    order_item: Vec<OrderItem>,
}

impl From<OrderItemsResult> for OrderItemsPage {
    fn from(result: OrderItemsResult) -> Self {
        Self {
            amazon_order_id: result.amazon_order_id,
            items: result.order_items.order_item,
            next_token: result.next_token.filter(|token| !token.is_empty()),
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct OrderItem {
    pub order_item_id: String,
    #[serde(rename = "ASIN")]
    pub asin: Option<String>,
    #[serde(rename = "SellerSKU")]
    pub seller_sku: Option<String>,
    pub title: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub quantity_ordered: Option<u32>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub quantity_shipped: Option<u32>,
    pub item_price: Option<Money>,
    pub shipping_price: Option<Money>,
    pub item_tax: Option<Money>,
    pub shipping_tax: Option<Money>,
    pub promotion_discount: Option<Money>,
    pub shipping_discount: Option<Money>,
    pub condition_id: Option<String>,
    pub condition_subtype_id: Option<String>,
    pub condition_note: Option<String>,
}
