use super::*;
use crate::types::{GraphQlError, GraphQlErrorExtensions};

#[test]
fn store_origin_adds_https_to_bare_domain() {
    assert_eq!(
        store_origin("my-store.myshopify.com"),
        "https://my-store.myshopify.com"
    );
}

#[test]
fn store_origin_keeps_explicit_scheme_and_strips_trailing_slash() {
    assert_eq!(
        store_origin("http://localhost:8080/"),
        "http://localhost:8080"
    );
}

#[test]
fn graphql_endpoint_includes_api_version() {
    let url = graphql_endpoint("https://my-store.myshopify.com", "2024-10").unwrap();
    assert_eq!(
        url.as_str(),
        "https://my-store.myshopify.com/admin/api/2024-10/graphql.json"
    );
}

#[test]
fn graphql_endpoint_rejects_unparseable_store() {
    let result = graphql_endpoint("https://", "2024-10");
    assert!(
        matches!(result, Err(ShopifyError::InvalidStoreUrl { .. })),
        "got: {result:?}"
    );
}

#[test]
fn new_builds_endpoint_from_bare_store() {
    let client = AdminClient::new(
        "my-store.myshopify.com",
        "shpat_test",
        "2024-10",
        ClientPolicy::default(),
    )
    .expect("client construction should not fail");
    assert_eq!(
        client.endpoint().as_str(),
        "https://my-store.myshopify.com/admin/api/2024-10/graphql.json"
    );
}

fn error(message: &str, code: Option<&str>) -> GraphQlError {
    GraphQlError {
        message: message.to_owned(),
        extensions: Some(GraphQlErrorExtensions {
            code: code.map(ToOwned::to_owned),
        }),
    }
}

#[test]
fn into_data_maps_throttled_code() {
    let envelope: GraphQlResponse<()> = GraphQlResponse {
        data: None,
        errors: vec![error("Throttled", Some("THROTTLED"))],
    };
    assert!(matches!(
        into_data("orders", envelope),
        Err(ShopifyError::Throttled { .. })
    ));
}

#[test]
fn into_data_reports_first_error_message() {
    let envelope: GraphQlResponse<()> = GraphQlResponse {
        data: Some(()),
        errors: vec![error("Field 'x' doesn't exist", None), error("second", None)],
    };
    match into_data("orders", envelope) {
        Err(ShopifyError::GraphQl { operation, message }) => {
            assert_eq!(operation, "orders");
            assert_eq!(message, "Field 'x' doesn't exist");
        }
        other => panic!("expected GraphQl error, got: {other:?}"),
    }
}

#[test]
fn into_data_requires_data() {
    let envelope: GraphQlResponse<()> = GraphQlResponse {
        data: None,
        errors: Vec::new(),
    };
    assert!(matches!(
        into_data("orders", envelope),
        Err(ShopifyError::MissingData { .. })
    ));
}
