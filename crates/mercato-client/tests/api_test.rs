//! Integration tests for `SalesClient` against a mock backend.
//!
//! Each test spins an in-process `wiremock` server, points the client at
//! it, and asserts both the wire shape of the request and the mapping of
//! the response into domain types and the error taxonomy.

use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mercato_client::{ClientConfig, ClientError, SalesClient};
use mercato_core::{Money, PaymentMethod, SaleItem};

async fn client_for(server: &MockServer) -> SalesClient {
    let config = ClientConfig::new(&server.uri()).unwrap();
    SalesClient::new(config).unwrap()
}

#[tokio::test]
async fn search_products_parses_decimal_prices() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/"))
        .and(query_param("search", "coca"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "name": "Coca-Cola 350ml", "price": "4.50"},
            {"id": 2, "name": "Coca-Cola 2L", "price": "9.99"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let products = client.search_products("coca").await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, 1);
    assert_eq!(products[0].price_cents, 450);
    assert_eq!(products[1].price_cents, 999);
}

#[tokio::test]
async fn search_products_maps_server_error_to_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.search_products("coca").await.unwrap_err();
    assert!(matches!(err, ClientError::Network { .. }));
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    // Nothing listens here; connection is refused immediately.
    let config = ClientConfig::new("http://127.0.0.1:9").unwrap();
    let client = SalesClient::new(config).unwrap();

    let err = client.search_products("coca").await.unwrap_err();
    assert!(matches!(err, ClientError::Network { .. }));
}

#[tokio::test]
async fn login_stores_tokens_in_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login/"))
        .and(body_json(serde_json::json!({
            "username": "operator",
            "password": "secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access": "acc-token",
            "refresh": "ref-token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(!client.session().is_authenticated());

    let tokens = client.login("operator", "secret").await.unwrap();
    assert_eq!(tokens.access, "acc-token");
    assert!(client.session().is_authenticated());
    assert_eq!(client.session().access_token().as_deref(), Some("acc-token"));
}

#[tokio::test]
async fn login_with_bad_credentials_is_an_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.login("operator", "wrong").await.unwrap_err();
    assert!(matches!(err, ClientError::Auth { .. }));
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn authenticated_requests_carry_the_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access": "acc-token",
            "refresh": "ref-token"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/"))
        .and(header("authorization", "Bearer acc-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.login("operator", "secret").await.unwrap();
    client.search_products("abc").await.unwrap();
}

#[tokio::test]
async fn create_sale_sends_the_contracted_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sales/"))
        .and(body_json(serde_json::json!({
            "cashier": 5,
            "items": [
                {"product": 1, "quantity": 2, "subtotal": "20.00"},
                {"product": 2, "quantity": 1, "subtotal": "5.00"}
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 42,
            "cashier": 5,
            "status": "open"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let items = vec![
        SaleItem {
            product_id: 1,
            quantity: 2,
            subtotal_cents: 2000,
        },
        SaleItem {
            product_id: 2,
            quantity: 1,
            subtotal_cents: 500,
        },
    ];

    let sale_id = client.create_sale(5, &items).await.unwrap();
    assert_eq!(sale_id, 42);
}

#[tokio::test]
async fn create_sale_maps_bad_request_to_validation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sales/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"items": ["this list may not be empty"]})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.create_sale(5, &[]).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation { .. }));
}

#[tokio::test]
async fn submit_payment_hits_the_sale_scoped_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sales/42/payments/"))
        .and(body_json(serde_json::json!({
            "sale": 42,
            "payment_method": "credit_card",
            "amount": "23.25"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": 7})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let confirmation = client
        .submit_payment(42, PaymentMethod::CreditCard, Money::from_cents(2325))
        .await
        .unwrap();
    assert_eq!(confirmation.id, Some(7));
}

#[tokio::test]
async fn create_invoice_returns_the_invoice_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/invoices/"))
        .and(body_json(serde_json::json!({"sale_id": 42})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": 99})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert_eq!(client.create_invoice(42).await.unwrap(), 99);
}

#[tokio::test]
async fn download_invoice_returns_bytes_and_filename() {
    let server = MockServer::start().await;
    let pdf = b"%PDF-1.4 fake".to_vec();
    Mock::given(method("GET"))
        .and(path("/invoices/99/download/"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(pdf.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let document = client.download_invoice(99).await.unwrap();

    assert_eq!(document.invoice_id, 99);
    assert_eq!(document.filename, "nota_fiscal_99.pdf");
    assert_eq!(document.bytes, pdf);
}

#[tokio::test]
async fn total_sales_per_day_sums_are_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sales/total_per_day/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"day": "2025-03-13", "total_sales": "120.00"},
            {"day": "2025-03-14", "total_sales": "75.50"}
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let days = client.total_sales_per_day().await.unwrap();

    assert_eq!(days.len(), 2);
    assert_eq!(days[0].total_sales_cents, 12000);
    assert_eq!(days[1].total_sales_cents, 7550);
}

#[tokio::test]
async fn malformed_success_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/invoices/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.create_invoice(42).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse { .. }));
}
