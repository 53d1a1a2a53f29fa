//! Types for the Feeds API section.

pub mod request;
pub mod response;

pub use self::request::{
    ConditionType, FeedContent, InventoryUpdate, PriceUpdate, Product, ProductIdType, Sale,
    SubmitFeedOptions,
};
pub use self::response::{FeedSubmissionInfo, FeedSubmissionPage};

/// Deletes, creates or updates catalog products (XML).
pub const PRODUCT_DATA: &str = "_POST_PRODUCT_DATA_";
/// Sets stock quantities and fulfillment latency (XML).
pub const INVENTORY_AVAILABILITY_DATA: &str = "_POST_INVENTORY_AVAILABILITY_DATA_";
/// Sets standard and sale prices (XML).
pub const PRODUCT_PRICING_DATA: &str = "_POST_PRODUCT_PRICING_DATA_";
/// Offer listings as a tab-delimited flat file.
pub const FLAT_FILE_LISTINGS_DATA: &str = "_POST_FLAT_FILE_LISTINGS_DATA_";
