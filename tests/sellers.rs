mod common;

mod marketplace_participations {
    use httpmock::{Method::POST, MockServer};
    use reqwest::StatusCode;

    use crate::common::{MARKETPLACE_ID, SELLER_ID, XML, client, response};

    #[tokio::test]
    async fn list_marketplace_participations_should_succeed() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = client(&server)?;

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/Sellers/2011-07-01")
                .query_param("Action", "ListMarketplaceParticipations")
                .query_param("Version", "2011-07-01")
                .query_param("SellerId", SELLER_ID);
            then.status(StatusCode::OK).header("content-type", XML).body(response(
                "ListMarketplaceParticipations",
                &format!(
                    "<ListParticipations>\
                       <Participation>\
                         <MarketplaceId>{MARKETPLACE_ID}</MarketplaceId>\
                         <SellerId>{SELLER_ID}</SellerId>\
                         <HasSellerSuspendedListings>No</HasSellerSuspendedListings>\
                       </Participation>\
                     </ListParticipations>\
                     <ListMarketplaces>\
                       <Marketplace>\
                         <MarketplaceId>{MARKETPLACE_ID}</MarketplaceId>\
                         <Name>Amazon.com</Name>\
                         <DefaultCountryCode>US</DefaultCountryCode>\
                         <DefaultCurrencyCode>USD</DefaultCurrencyCode>\
                         <DefaultLanguageCode>en_US</DefaultLanguageCode>\
                         <DomainName>www.amazon.com</DomainName>\
                       </Marketplace>\
                       <Marketplace>\
                         <MarketplaceId>A2Q3Y263D00KWC</MarketplaceId>\
                         <Name>Amazon.com.br</Name>\
                       </Marketplace>\
                     </ListMarketplaces>"
                ),
            ));
        });

        let participations = client.sellers().list_marketplace_participations().await?;

        assert_eq!(participations.participations.len(), 1);
        assert_eq!(participations.participations[0].marketplace_id, MARKETPLACE_ID);
        assert_eq!(
            participations.participations[0]
                .has_seller_suspended_listings
                .as_deref(),
            Some("No")
        );
        assert_eq!(participations.marketplaces.len(), 2);
        assert_eq!(
            participations.marketplaces[0].domain_name.as_deref(),
            Some("www.amazon.com")
        );
        assert!(participations.next_token.is_none(), "single page");
        mock.assert();
        Ok(())
    }
}

mod recommendations {
    use amazon_mws_client::types::Value;
    use httpmock::{Method::POST, MockServer};
    use reqwest::StatusCode;

    use crate::common::{MARKETPLACE_ID, XML, client, response};

    #[tokio::test]
    async fn list_recommendations_for_a_category() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = client(&server)?;

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/Recommendations/2013-04-01")
                .query_param("Action", "ListRecommendations")
                .query_param("MarketplaceId", MARKETPLACE_ID)
                .query_param("RecommendationCategory", "Inventory");
            then.status(StatusCode::OK).header("content-type", XML).body(response(
                "ListRecommendations",
                "<InventoryRecommendations>\
                   <member>\
                     <RecommendationId>7</RecommendationId>\
                     <RecommendationReason>Restock soon</RecommendationReason>\
                   </member>\
                 </InventoryRecommendations>",
            ));
        });

        let value = client
            .recommendations()
            .list_recommendations(Some("Inventory"))
            .await?;

        assert_eq!(
            value
                .path(&["InventoryRecommendations", "member", "RecommendationReason"])
                .and_then(Value::as_str),
            Some("Restock soon")
        );
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn all_categories_omit_the_filter() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = client(&server)?;

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/Recommendations/2013-04-01")
                .query_param_missing("RecommendationCategory");
            then.status(StatusCode::OK)
                .header("content-type", XML)
                .body(response("ListRecommendations", ""));
        });

        client.recommendations().list_recommendations(None).await?;

        mock.assert();
        Ok(())
    }
}

mod inventory_supply {
    use std::sync::Arc;

    use amazon_mws_client::Client;
    use amazon_mws_client::error::Kind;
    use amazon_mws_client::inventory::MAX_SKUS;
    use httpmock::{Method::POST, MockServer};
    use reqwest::StatusCode;

    use crate::common::{MARKETPLACE_ID, Spy, XML, client, config, response};

    #[tokio::test]
    async fn list_inventory_supply_should_succeed() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = client(&server)?;

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/FulfillmentInventory/2010-10-01")
                .query_param("Action", "ListInventorySupply")
                .query_param("MarketplaceId", MARKETPLACE_ID)
                .query_param("SellerSkus.member.1", "SKU-RED")
                .query_param("SellerSkus.member.2", "SKU-BLUE");
            then.status(StatusCode::OK).header("content-type", XML).body(response(
                "ListInventorySupply",
                "<InventorySupplyList>\
                   <member>\
                     <SellerSKU>SKU-RED</SellerSKU>\
                     <ASIN>B00TEST123</ASIN>\
                     <TotalSupplyQuantity>20</TotalSupplyQuantity>\
                     <FNSKU>X000TEST01</FNSKU>\
                     <Condition>NewItem</Condition>\
                     <InStockSupplyQuantity>15</InStockSupplyQuantity>\
                     <EarliestAvailability><TimepointType>Immediately</TimepointType></EarliestAvailability>\
                   </member>\
                   <member>\
                     <SellerSKU>SKU-BLUE</SellerSKU>\
                     <TotalSupplyQuantity>0</TotalSupplyQuantity>\
                     <InStockSupplyQuantity>0</InStockSupplyQuantity>\
                   </member>\
                 </InventorySupplyList>",
            ));
        });

        let supply = client
            .inventory()
            .list_inventory_supply(&["SKU-RED", "SKU-BLUE"])
            .await?;

        assert_eq!(supply.len(), 2);
        assert_eq!(supply[0].seller_sku, "SKU-RED");
        assert_eq!(supply[0].fnsku.as_deref(), Some("X000TEST01"));
        assert_eq!(supply[0].in_stock_supply_quantity, Some(15));
        assert_eq!(
            supply[0]
                .earliest_availability
                .as_ref()
                .map(|timepoint| timepoint.timepoint_type.as_str()),
            Some("Immediately")
        );
        assert_eq!(supply[1].total_supply_quantity, Some(0));
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn too_many_skus_sends_nothing() -> anyhow::Result<()> {
        let spy = Arc::new(Spy::new(response("ListInventorySupply", "")));
        let client = Client::with_transport(
            config("https://mws.amazonservices.com"),
            Arc::clone(&spy),
        )?;
        let skus: Vec<String> = (0..=MAX_SKUS).map(|i| format!("SKU-{i}")).collect();

        let err = client
            .inventory()
            .list_inventory_supply(&skus)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), Kind::Validation);
        assert_eq!(spy.calls(), 0);
        Ok(())
    }
}
