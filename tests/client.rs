mod common;

mod construction {
    use amazon_mws_client::auth::Credentials;
    use amazon_mws_client::error::Kind;
    use amazon_mws_client::{Client, Config};

    use crate::common::{MARKETPLACE_ID, SECRET, credentials};

    #[test]
    fn region_host_comes_from_marketplace() -> anyhow::Result<()> {
        let client = Client::new(Config::builder().credentials(credentials()).build())?;

        assert_eq!(client.region_host(), "mws.amazonservices.com");
        assert_eq!(
            client.executor().base_url().as_str(),
            "https://mws.amazonservices.com/"
        );
        Ok(())
    }

    #[test]
    fn unknown_marketplace_is_rejected() {
        let credentials = Credentials::builder()
            .marketplace_id("NOT-A-MARKETPLACE")
            .seller_id("seller")
            .access_key_id("key")
            .secret_access_key(SECRET)
            .build();

        let err = Client::new(Config::builder().credentials(credentials).build()).unwrap_err();

        assert_eq!(err.kind(), Kind::Configuration);
    }

    #[test]
    fn empty_field_is_rejected() {
        let credentials = Credentials::builder()
            .marketplace_id(MARKETPLACE_ID)
            .seller_id("")
            .access_key_id("key")
            .secret_access_key(SECRET)
            .build();

        let err = Client::new(Config::builder().credentials(credentials).build()).unwrap_err();

        assert_eq!(err.kind(), Kind::Configuration);
        assert!(err.to_string().contains("seller_id"), "{err}");
    }
}

mod signing {
    use std::sync::Arc;

    use amazon_mws_client::auth::{self, Credentials, SecretString};
    use amazon_mws_client::error::Method;
    use amazon_mws_client::executor::Params;
    use amazon_mws_client::{Client, Config};

    use crate::common::{
        ACCESS_KEY_ID, AUTH_TOKEN, MARKETPLACE_ID, SECRET, SELLER_ID, Spy, TIMESTAMP, credentials,
        query, response, timestamp,
    };

    fn spied(spy: &Arc<Spy>, config: Config) -> anyhow::Result<Client> {
        Ok(Client::with_transport(config, Arc::clone(spy))?)
    }

    fn config() -> Config {
        Config::builder()
            .credentials(credentials())
            .base_url("https://mws.amazonservices.com")
            .timestamp_generator(timestamp)
            .build()
    }

    #[tokio::test]
    async fn defaults_are_merged_and_signed() -> anyhow::Result<()> {
        let spy = Arc::new(Spy::new(response("ListOrders", "")));
        let client = spied(&spy, config())?;

        let mut params = Params::new();
        params.set("CreatedAfter", "2024-01-01T00:00:00.000Z");
        client.execute("ListOrders", params, None).await?;

        let request = spy.last_request().unwrap();
        let mut query = query(&request);

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url.path(), "/Orders/2013-09-01");
        assert_eq!(query["Action"], "ListOrders");
        assert_eq!(query["Version"], "2013-09-01");
        assert_eq!(query["AWSAccessKeyId"], ACCESS_KEY_ID);
        assert_eq!(query["SellerId"], SELLER_ID);
        assert_eq!(query["MarketplaceId.Id.1"], MARKETPLACE_ID);
        assert_eq!(query["SignatureMethod"], "HmacSHA256");
        assert_eq!(query["SignatureVersion"], "2");
        assert_eq!(query["Timestamp"], TIMESTAMP);
        assert_eq!(query["CreatedAfter"], "2024-01-01T00:00:00.000Z");
        assert!(!query.contains_key("MWSAuthToken"), "no token configured");

        let signature = query.remove("Signature").unwrap();
        let expected = auth::sign(
            &SecretString::from(SECRET),
            &Method::POST,
            "mws.amazonservices.com",
            "/Orders/2013-09-01",
            &query,
        )?;
        assert_eq!(signature, expected);
        Ok(())
    }

    #[tokio::test]
    async fn signature_is_the_last_query_parameter() -> anyhow::Result<()> {
        let spy = Arc::new(Spy::new(response("GetOrder", "")));
        let client = spied(&spy, config())?;

        let mut params = Params::new();
        params.set("AmazonOrderId.Id.1", "058-1233752-8214740 +x");
        client.execute("GetOrder", params, None).await?;

        let request = spy.last_request().unwrap();
        let raw = request.url.query().unwrap();

        assert!(raw.contains("AmazonOrderId.Id.1=058-1233752-8214740%20%2Bx"), "{raw}");
        assert!(
            raw.rsplit('&').next().unwrap().starts_with("Signature="),
            "{raw}"
        );
        Ok(())
    }

    #[tokio::test]
    async fn omitted_and_overridden_defaults() -> anyhow::Result<()> {
        let spy = Arc::new(Spy::new(response("ListOrders", "")));
        let client = spied(&spy, config())?;

        let mut params = Params::new();
        params
            .omit("MarketplaceId.Id.1")
            .set("SellerId", "OTHER")
            .set("Empty", "");
        client.execute("ListOrders", params, None).await?;

        let query = query(&spy.last_request().unwrap());

        assert!(!query.contains_key("MarketplaceId.Id.1"), "omitted");
        assert!(!query.contains_key("Empty"), "empty values are dropped");
        assert_eq!(query["SellerId"], "OTHER");
        Ok(())
    }

    #[tokio::test]
    async fn auth_token_is_sent_when_configured() -> anyhow::Result<()> {
        let spy = Arc::new(Spy::new(response("GetReportList", "")));
        let credentials = Credentials::builder()
            .marketplace_id(MARKETPLACE_ID)
            .seller_id(SELLER_ID)
            .access_key_id(ACCESS_KEY_ID)
            .secret_access_key(SECRET)
            .auth_token(AUTH_TOKEN)
            .build();
        let config = Config::builder()
            .credentials(credentials)
            .base_url("https://mws.amazonservices.com")
            .build();
        let client = spied(&spy, config)?;

        client
            .execute("GetReportList", Params::new(), None)
            .await?;

        let query = query(&spy.last_request().unwrap());
        assert_eq!(query["MWSAuthToken"], AUTH_TOKEN);
        assert!(
            query.keys().all(|key| !key.starts_with("MarketplaceId")),
            "report lists are not scoped"
        );
        Ok(())
    }

    #[tokio::test]
    async fn products_use_scalar_marketplace() -> anyhow::Result<()> {
        let spy = Arc::new(Spy::new(response("GetProductCategoriesForASIN", "")));
        let client = spied(&spy, config())?;

        client.products().product_categories_for_asin("B00TEST123").await?;

        let query = query(&spy.last_request().unwrap());
        assert_eq!(query["MarketplaceId"], MARKETPLACE_ID);
        assert_eq!(query["ASIN"], "B00TEST123");
        assert!(!query.contains_key("MarketplaceId.Id.1"), "scalar only");
        Ok(())
    }
}

mod execute {
    use amazon_mws_client::error::Kind;
    use amazon_mws_client::executor::{Params, Payload};
    use amazon_mws_client::types::Value;
    use httpmock::{Method::POST, MockServer};
    use reqwest::StatusCode;

    use crate::common::{XML, client, response};

    #[tokio::test]
    async fn envelope_is_unwrapped() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = client(&server)?;

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/Sellers/2011-07-01")
                .query_param("Action", "ListMarketplaceParticipations");
            then.status(StatusCode::OK)
                .header("content-type", XML)
                .body(response(
                    "ListMarketplaceParticipations",
                    "<NextToken>abc</NextToken>",
                ));
        });

        let payload = client
            .execute("ListMarketplaceParticipations", Params::new(), None)
            .await?;

        let Payload::Value(value) = payload else {
            panic!("expected a decoded value");
        };
        assert_eq!(value.get("NextToken").and_then(Value::as_str), Some("abc"));
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn raw_body_is_untouched() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = client(&server)?;
        let body = response("GetReportList", "<HasNext>false</HasNext>");

        let mock = server.mock(|when, then| {
            when.method(POST).path("/").query_param("Action", "GetReportList");
            then.status(StatusCode::OK).header("content-type", XML).body(&body);
        });

        let raw = client.execute_raw("GetReportList", Params::new(), None).await?;

        assert_eq!(raw, body);
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn non_xml_body_is_text() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = client(&server)?;

        let mock = server.mock(|when, then| {
            when.method(POST).path("/").query_param("Action", "GetReport");
            then.status(StatusCode::OK)
                .header("content-type", "text/plain")
                .body("sku\tqty\nA\t1\n");
        });

        let payload = client.execute("GetReport", Params::new(), None).await?;

        assert_eq!(payload, Payload::Text("sku\tqty\nA\t1\n".to_owned()));
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn error_response_becomes_status_error() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = client(&server)?;

        let mock = server.mock(|when, then| {
            when.method(POST).path("/Orders/2013-09-01");
            then.status(StatusCode::BAD_REQUEST)
                .header("content-type", XML)
                .body(
                    r#"<?xml version="1.0"?>
<ErrorResponse xmlns="https://mws.amazonservices.com/Orders/2013-09-01">
  <Error><Type>Sender</Type><Code>InvalidParameterValue</Code><Message>CreatedAfter is in the future</Message></Error>
  <RequestId>abc</RequestId>
</ErrorResponse>"#,
                );
        });

        let err = client
            .execute("ListOrders", Params::new(), None)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), Kind::Status);
        let status = err.as_status().unwrap();
        assert_eq!(status.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(status.code.as_deref(), Some("InvalidParameterValue"));
        assert_eq!(status.message, "CreatedAfter is in the future");
        assert_eq!(status.path, "/Orders/2013-09-01");
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn plain_error_body_is_the_message() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = client(&server)?;

        server.mock(|when, then| {
            when.method(POST).path("/");
            then.status(StatusCode::SERVICE_UNAVAILABLE).body("Service Unavailable");
        });

        let err = client
            .execute("GetReportList", Params::new(), None)
            .await
            .unwrap_err();

        assert_eq!(err.as_status().unwrap().message, "Service Unavailable");
        Ok(())
    }

    #[tokio::test]
    async fn unknown_operation_sends_nothing() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = client(&server)?;

        let mock = server.mock(|when, then| {
            when.any_request();
            then.status(StatusCode::OK);
        });

        let err = client
            .execute("ListEverything", Params::new(), None)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), Kind::UnknownOperation);
        mock.assert_calls(0);
        Ok(())
    }
}

mod validate_credentials {
    use httpmock::{Method::POST, MockServer};
    use reqwest::StatusCode;

    use crate::common::{XML, client, response};

    fn error_body(message: &str) -> String {
        format!(
            "<ErrorResponse><Error><Type>Sender</Type><Code>InvalidParameterValue</Code><Message>{message}</Message></Error></ErrorResponse>"
        )
    }

    #[tokio::test]
    async fn rejected_probe_order_means_valid() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = client(&server)?;

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/Orders/2013-09-01")
                .query_param("Action", "ListOrderItems")
                .query_param("AmazonOrderId", "validate");
            then.status(StatusCode::BAD_REQUEST)
                .header("content-type", XML)
                .body(error_body("Invalid AmazonOrderId: validate"));
        });

        assert!(client.validate_credentials().await?, "credentials accepted");
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn signature_mismatch_means_invalid() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = client(&server)?;

        server.mock(|when, then| {
            when.method(POST).path("/Orders/2013-09-01");
            then.status(StatusCode::FORBIDDEN)
                .header("content-type", XML)
                .body(error_body(
                    "The request signature we calculated does not match the signature you provided.",
                ));
        });

        assert!(!client.validate_credentials().await?, "credentials refused");
        Ok(())
    }

    #[tokio::test]
    async fn successful_probe_is_not_proof() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = client(&server)?;

        server.mock(|when, then| {
            when.method(POST).path("/Orders/2013-09-01");
            then.status(StatusCode::OK)
                .header("content-type", XML)
                .body(response("ListOrderItems", ""));
        });

        assert!(!client.validate_credentials().await?, "unexpected success");
        Ok(())
    }
}
