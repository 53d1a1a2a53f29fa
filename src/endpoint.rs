//! Static catalog mapping an MWS operation name to how it is called.

use phf::phf_map;
use reqwest::Method;

use Envelope::{Key, Root};
use MarketplaceParam::{IdList, Indexed, None as Unscoped, Scalar};

use crate::Result;
use crate::error::Error;

#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }
}

/// Where the operation's payload sits in the decoded response.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Envelope {
    /// Under this key of the root element, e.g. `ListOrdersResult`
    Key(&'static str),
    /// The decoded root itself, for documents that are not wrapped in a `...Response`
    Root,
}

/// How the configured marketplace id is scoped onto the query.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarketplaceParam {
    /// `MarketplaceId`
    Scalar,
    /// `MarketplaceId.Id.1`
    Indexed,
    /// `MarketplaceIdList.Id.1`
    IdList,
    None,
}

impl MarketplaceParam {
    #[must_use]
    pub fn key(self) -> Option<&'static str> {
        match self {
            MarketplaceParam::Scalar => Some("MarketplaceId"),
            MarketplaceParam::Indexed => Some("MarketplaceId.Id.1"),
            MarketplaceParam::IdList => Some("MarketplaceIdList.Id.1"),
            MarketplaceParam::None => None,
        }
    }
}

#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub operation: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
    pub version: &'static str,
    pub envelope: Envelope,
    pub marketplace: MarketplaceParam,
}

#[derive(Clone, Copy)]
struct Section {
    path: &'static str,
    version: &'static str,
}

const ORDERS: Section = Section {
    path: "/Orders/2013-09-01",
    version: "2013-09-01",
};
const PRODUCTS: Section = Section {
    path: "/Products/2011-10-01",
    version: "2011-10-01",
};
const FEEDS_AND_REPORTS: Section = Section {
    path: "/",
    version: "2009-01-01",
};
const SELLERS: Section = Section {
    path: "/Sellers/2011-07-01",
    version: "2011-07-01",
};
const RECOMMENDATIONS: Section = Section {
    path: "/Recommendations/2013-04-01",
    version: "2013-04-01",
};
const FULFILLMENT_INVENTORY: Section = Section {
    path: "/FulfillmentInventory/2010-10-01",
    version: "2010-10-01",
};

const fn post(
    operation: &'static str,
    section: Section,
    envelope: Envelope,
    marketplace: MarketplaceParam,
) -> EndpointDescriptor {
    EndpointDescriptor {
        operation,
        method: HttpMethod::Post,
        path: section.path,
        version: section.version,
        envelope,
        marketplace,
    }
}

static ENDPOINTS: phf::Map<&'static str, EndpointDescriptor> = phf_map! {
    "ListOrders" => post("ListOrders", ORDERS, Key("ListOrdersResult"), Indexed),
    "ListOrdersByNextToken" => post(
        "ListOrdersByNextToken", ORDERS, Key("ListOrdersByNextTokenResult"), Unscoped,
    ),
    "GetOrder" => post("GetOrder", ORDERS, Key("GetOrderResult"), Unscoped),
    "ListOrderItems" => post("ListOrderItems", ORDERS, Key("ListOrderItemsResult"), Unscoped),
    "ListOrderItemsByNextToken" => post(
        "ListOrderItemsByNextToken", ORDERS, Key("ListOrderItemsByNextTokenResult"), Unscoped,
    ),

    "GetCompetitivePricingForASIN" => post(
        "GetCompetitivePricingForASIN", PRODUCTS, Key("GetCompetitivePricingForASINResult"), Scalar,
    ),
    "GetCompetitivePricingForSKU" => post(
        "GetCompetitivePricingForSKU", PRODUCTS, Key("GetCompetitivePricingForSKUResult"), Scalar,
    ),
    "GetLowestPricedOffersForASIN" => post(
        "GetLowestPricedOffersForASIN", PRODUCTS, Key("GetLowestPricedOffersForASINResult"), Scalar,
    ),
    "GetLowestPricedOffersForSKU" => post(
        "GetLowestPricedOffersForSKU", PRODUCTS, Key("GetLowestPricedOffersForSKUResult"), Scalar,
    ),
    "GetMyPriceForSKU" => post("GetMyPriceForSKU", PRODUCTS, Key("GetMyPriceForSKUResult"), Scalar),
    "GetMyPriceForASIN" => post(
        "GetMyPriceForASIN", PRODUCTS, Key("GetMyPriceForASINResult"), Scalar,
    ),
    "GetLowestOfferListingsForASIN" => post(
        "GetLowestOfferListingsForASIN", PRODUCTS, Key("GetLowestOfferListingsForASINResult"), Scalar,
    ),
    "GetProductCategoriesForSKU" => post(
        "GetProductCategoriesForSKU", PRODUCTS, Key("GetProductCategoriesForSKUResult"), Scalar,
    ),
    "GetProductCategoriesForASIN" => post(
        "GetProductCategoriesForASIN", PRODUCTS, Key("GetProductCategoriesForASINResult"), Scalar,
    ),
    "GetMatchingProductForId" => post(
        "GetMatchingProductForId", PRODUCTS, Key("GetMatchingProductForIdResult"), Scalar,
    ),
    "ListMatchingProducts" => post(
        "ListMatchingProducts", PRODUCTS, Key("ListMatchingProductsResult"), Scalar,
    ),

    "SubmitFeed" => post("SubmitFeed", FEEDS_AND_REPORTS, Key("SubmitFeedResult"), IdList),
    "GetFeedSubmissionList" => post(
        "GetFeedSubmissionList", FEEDS_AND_REPORTS, Key("GetFeedSubmissionListResult"), Unscoped,
    ),
    // The processing report is the returned document itself.
    "GetFeedSubmissionResult" => post("GetFeedSubmissionResult", FEEDS_AND_REPORTS, Root, Unscoped),

    "RequestReport" => post("RequestReport", FEEDS_AND_REPORTS, Key("RequestReportResult"), IdList),
    "GetReportRequestList" => post(
        "GetReportRequestList", FEEDS_AND_REPORTS, Key("GetReportRequestListResult"), Unscoped,
    ),
    "GetReportList" => post(
        "GetReportList", FEEDS_AND_REPORTS, Key("GetReportListResult"), Unscoped,
    ),
    "GetReport" => post("GetReport", FEEDS_AND_REPORTS, Root, Unscoped),

    "ListMarketplaceParticipations" => post(
        "ListMarketplaceParticipations", SELLERS, Key("ListMarketplaceParticipationsResult"), Unscoped,
    ),

    "ListRecommendations" => post(
        "ListRecommendations", RECOMMENDATIONS, Key("ListRecommendationsResult"), Scalar,
    ),

    "ListInventorySupply" => post(
        "ListInventorySupply", FULFILLMENT_INVENTORY, Key("ListInventorySupplyResult"), Scalar,
    ),
};

/// Descriptor for `operation`, or [`crate::error::Kind::UnknownOperation`].
pub fn lookup(operation: &str) -> Result<&'static EndpointDescriptor> {
    ENDPOINTS
        .get(operation)
        .ok_or_else(|| Error::unknown_operation(operation))
}

/// Every cataloged operation name, sorted.
#[must_use]
pub fn operations() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = ENDPOINTS.keys().copied().collect();
    names.sort_unstable();
    names
}
