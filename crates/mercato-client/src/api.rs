//! # Sales Backend Client
//!
//! The [`SalesClient`]: one method per backend operation, one request per
//! call.
//!
//! ## Wire DTOs
//! The backend (Django REST) speaks decimal strings for money (`"23.25"`)
//! and integer primary keys for identity. DTOs in this module translate
//! between that wire shape and the domain types in `mercato-core`; nothing
//! decimal-stringly leaks out of this crate.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      One Call, One Request                              │
//! │                                                                         │
//! │  caller ──► SalesClient::create_sale()                                  │
//! │                │                                                        │
//! │                ▼                                                        │
//! │          build request (bearer token from Session, if any)              │
//! │                │                                                        │
//! │                ▼                                                        │
//! │          send ──── transport error ────────────► ClientError::Network   │
//! │                │                                                        │
//! │                ▼                                                        │
//! │          status check ── 400 ──────────────────► ClientError::Validation│
//! │                │         401/403 ──────────────► ClientError::Auth      │
//! │                │         other non-2xx ────────► ClientError::Network   │
//! │                ▼                                                        │
//! │          decode body ── bad shape ─────────────► ClientError::          │
//! │                │                                   InvalidResponse      │
//! │                ▼                                                        │
//! │          domain value                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};

use mercato_core::{Money, PaymentMethod, Product, SaleItem};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::{Session, TokenPair};

// =============================================================================
// Wire DTOs
// =============================================================================

/// Deserializes a backend money field into centavos.
///
/// Django REST serializes DecimalField as a string (`"10.00"`), but plain
/// JSON numbers show up from other serializers; both are accepted.
fn de_decimal_cents<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Text(s) => Money::parse_decimal(&s)
            .map(|m| m.cents())
            .map_err(serde::de::Error::custom),
        Raw::Number(n) => Ok((n * 100.0).round() as i64),
    }
}

/// Product as returned by `GET /products/?search=...`.
#[derive(Debug, Deserialize)]
struct ProductDto {
    id: i64,
    name: String,
    #[serde(deserialize_with = "de_decimal_cents")]
    price: i64,
}

impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        Product {
            id: dto.id,
            name: dto.name,
            price_cents: dto.price,
        }
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Line item as `POST /sales/` expects it.
#[derive(Debug, Serialize)]
struct SaleItemDto {
    product: i64,
    quantity: i64,
    subtotal: String,
}

impl From<&SaleItem> for SaleItemDto {
    fn from(item: &SaleItem) -> Self {
        SaleItemDto {
            product: item.product_id,
            quantity: item.quantity,
            subtotal: Money::from_cents(item.subtotal_cents).to_decimal_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateSaleRequest {
    cashier: i64,
    items: Vec<SaleItemDto>,
}

/// Only the id matters to the client; the backend returns more.
#[derive(Debug, Deserialize)]
struct CreatedDto {
    id: i64,
}

#[derive(Debug, Serialize)]
struct PaymentRequest {
    sale: i64,
    payment_method: &'static str,
    amount: String,
}

/// Confirmation returned by the payments endpoint.
///
/// The client only needs to know the call succeeded; the payment id is
/// kept when present for log correlation.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfirmation {
    #[serde(default)]
    pub id: Option<i64>,
}

#[derive(Debug, Serialize)]
struct CreateInvoiceRequest {
    sale_id: i64,
}

/// A downloaded invoice document.
#[derive(Debug, Clone)]
pub struct InvoiceDocument {
    /// The invoice this document belongs to.
    pub invoice_id: i64,
    /// Suggested filename for saving (`nota_fiscal_{id}.pdf`).
    pub filename: String,
    /// Raw document bytes.
    pub bytes: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct DailySalesDto {
    #[serde(default)]
    day: Option<NaiveDate>,
    #[serde(deserialize_with = "de_decimal_cents")]
    total_sales: i64,
}

/// One day's aggregated sales from `GET /sales/total_per_day/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySales {
    /// The day, when the backend includes it.
    pub day: Option<NaiveDate>,
    /// Total sales for that day in centavos.
    pub total_sales_cents: i64,
}

impl DailySales {
    /// The day's total as Money.
    #[inline]
    pub fn total_sales(&self) -> Money {
        Money::from_cents(self.total_sales_cents)
    }
}

// =============================================================================
// Sales Client
// =============================================================================

/// REST client for the sales backend.
///
/// Cheap to clone: the HTTP connection pool and the session are shared
/// between clones, so the checkout and payment flows can each hold one.
#[derive(Debug, Clone)]
pub struct SalesClient {
    http: reqwest::Client,
    config: ClientConfig,
    session: Session,
}

impl SalesClient {
    /// Creates a client with a fresh session.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        Self::with_session(config, Session::new())
    }

    /// Creates a client sharing an existing session.
    pub fn with_session(config: ClientConfig, session: Session) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::network("client_init", e))?;

        Ok(SalesClient {
            http,
            config,
            session,
        })
    }

    /// The session this client authenticates with.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Attaches the bearer token when the session has one.
    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.access_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Maps a non-success status to the error taxonomy.
    async fn check_status(op: &'static str, response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = match response.text().await {
            Ok(body) if !body.is_empty() => format!("{}: {}", status, body),
            _ => status.to_string(),
        };
        warn!(op, %status, "backend returned non-success status");

        Err(match status {
            StatusCode::BAD_REQUEST => ClientError::validation(op, detail),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::auth(op, detail),
            _ => ClientError::network(op, detail),
        })
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Searches products by name. `GET /products/?search={query}`
    pub async fn search_products(&self, query: &str) -> ClientResult<Vec<Product>> {
        const OP: &str = "search_products";
        debug!(query, "searching products");

        let response = self
            .authed(self.http.get(self.config.endpoint("/products/")))
            .query(&[("search", query)])
            .send()
            .await
            .map_err(|e| ClientError::network(OP, e))?;
        let response = Self::check_status(OP, response).await?;

        let dtos: Vec<ProductDto> = response
            .json()
            .await
            .map_err(|e| ClientError::invalid_response(OP, e))?;

        info!(query, count = dtos.len(), "product search complete");
        Ok(dtos.into_iter().map(Product::from).collect())
    }

    /// Authenticates and stores the returned token pair in the session.
    /// `POST /login/`
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<TokenPair> {
        const OP: &str = "login";
        debug!(username, "logging in");

        let response = self
            .http
            .post(self.config.endpoint("/login/"))
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|e| ClientError::network(OP, e))?;
        let response = Self::check_status(OP, response).await?;

        let tokens: TokenPair = response
            .json()
            .await
            .map_err(|e| ClientError::invalid_response(OP, e))?;

        self.session.store(tokens.clone());
        info!(username, "login successful");
        Ok(tokens)
    }

    /// Creates a sale and returns its backend identifier. `POST /sales/`
    pub async fn create_sale(&self, cashier: i64, items: &[SaleItem]) -> ClientResult<i64> {
        const OP: &str = "create_sale";
        debug!(cashier, item_count = items.len(), "creating sale");

        let payload = CreateSaleRequest {
            cashier,
            items: items.iter().map(SaleItemDto::from).collect(),
        };

        let response = self
            .authed(self.http.post(self.config.endpoint("/sales/")))
            .json(&payload)
            .send()
            .await
            .map_err(|e| ClientError::network(OP, e))?;
        let response = Self::check_status(OP, response).await?;

        let created: CreatedDto = response
            .json()
            .await
            .map_err(|e| ClientError::invalid_response(OP, e))?;

        info!(sale_id = created.id, cashier, "sale created");
        Ok(created.id)
    }

    /// Submits a payment for a sale. `POST /sales/{sale_id}/payments/`
    pub async fn submit_payment(
        &self,
        sale_id: i64,
        method: PaymentMethod,
        amount: Money,
    ) -> ClientResult<PaymentConfirmation> {
        const OP: &str = "submit_payment";
        debug!(sale_id, method = method.as_str(), %amount, "submitting payment");

        let payload = PaymentRequest {
            sale: sale_id,
            payment_method: method.as_str(),
            amount: amount.to_decimal_string(),
        };

        let path = format!("/sales/{}/payments/", sale_id);
        let response = self
            .authed(self.http.post(self.config.endpoint(&path)))
            .json(&payload)
            .send()
            .await
            .map_err(|e| ClientError::network(OP, e))?;
        let response = Self::check_status(OP, response).await?;

        let confirmation: PaymentConfirmation = response
            .json()
            .await
            .map_err(|e| ClientError::invalid_response(OP, e))?;

        info!(sale_id, payment_id = ?confirmation.id, "payment confirmed");
        Ok(confirmation)
    }

    /// Generates an invoice for a paid sale and returns its identifier.
    /// `POST /invoices/`
    pub async fn create_invoice(&self, sale_id: i64) -> ClientResult<i64> {
        const OP: &str = "create_invoice";
        debug!(sale_id, "generating invoice");

        let response = self
            .authed(self.http.post(self.config.endpoint("/invoices/")))
            .json(&CreateInvoiceRequest { sale_id })
            .send()
            .await
            .map_err(|e| ClientError::network(OP, e))?;
        let response = Self::check_status(OP, response).await?;

        let created: CreatedDto = response
            .json()
            .await
            .map_err(|e| ClientError::invalid_response(OP, e))?;

        info!(sale_id, invoice_id = created.id, "invoice generated");
        Ok(created.id)
    }

    /// Downloads the invoice document. `GET /invoices/{invoice_id}/download/`
    pub async fn download_invoice(&self, invoice_id: i64) -> ClientResult<InvoiceDocument> {
        const OP: &str = "download_invoice";
        debug!(invoice_id, "downloading invoice");

        let path = format!("/invoices/{}/download/", invoice_id);
        let response = self
            .authed(self.http.get(self.config.endpoint(&path)))
            .send()
            .await
            .map_err(|e| ClientError::network(OP, e))?;
        let response = Self::check_status(OP, response).await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::network(OP, e))?;

        info!(invoice_id, size = bytes.len(), "invoice downloaded");
        Ok(InvoiceDocument {
            invoice_id,
            filename: format!("nota_fiscal_{}.pdf", invoice_id),
            bytes: bytes.to_vec(),
        })
    }

    /// Fetches the daily sales aggregate. `GET /sales/total_per_day/`
    pub async fn total_sales_per_day(&self) -> ClientResult<Vec<DailySales>> {
        const OP: &str = "total_sales_per_day";
        debug!("fetching daily sales totals");

        let response = self
            .authed(self.http.get(self.config.endpoint("/sales/total_per_day/")))
            .send()
            .await
            .map_err(|e| ClientError::network(OP, e))?;
        let response = Self::check_status(OP, response).await?;

        let dtos: Vec<DailySalesDto> = response
            .json()
            .await
            .map_err(|e| ClientError::invalid_response(OP, e))?;

        info!(days = dtos.len(), "daily sales totals fetched");
        Ok(dtos
            .into_iter()
            .map(|d| DailySales {
                day: d.day,
                total_sales_cents: d.total_sales,
            })
            .collect())
    }
}

// =============================================================================
// Unit Tests (pure DTO translation; HTTP behavior lives in tests/)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_dto_accepts_decimal_string_price() {
        let dto: ProductDto =
            serde_json::from_str(r#"{"id": 3, "name": "Coca-Cola", "price": "4.50"}"#).unwrap();
        assert_eq!(Product::from(dto).price_cents, 450);
    }

    #[test]
    fn test_product_dto_accepts_numeric_price() {
        let dto: ProductDto =
            serde_json::from_str(r#"{"id": 3, "name": "Coca-Cola", "price": 4.5}"#).unwrap();
        assert_eq!(dto.price, 450);
    }

    #[test]
    fn test_product_dto_rejects_malformed_price() {
        let result: Result<ProductDto, _> =
            serde_json::from_str(r#"{"id": 3, "name": "Coca-Cola", "price": "4.5.0"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_sale_item_dto_wire_shape() {
        let item = SaleItem {
            product_id: 7,
            quantity: 2,
            subtotal_cents: 2000,
        };
        let json = serde_json::to_value(SaleItemDto::from(&item)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"product": 7, "quantity": 2, "subtotal": "20.00"})
        );
    }

    #[test]
    fn test_payment_request_wire_shape() {
        let payload = PaymentRequest {
            sale: 42,
            payment_method: PaymentMethod::Pix.as_str(),
            amount: Money::from_cents(2325).to_decimal_string(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"sale": 42, "payment_method": "pix", "amount": "23.25"})
        );
    }

    #[test]
    fn test_daily_sales_dto_day_is_optional() {
        let dto: DailySalesDto = serde_json::from_str(r#"{"total_sales": "120.00"}"#).unwrap();
        assert_eq!(dto.total_sales, 12000);
        assert!(dto.day.is_none());

        let dto: DailySalesDto =
            serde_json::from_str(r#"{"day": "2025-03-14", "total_sales": "5.25"}"#).unwrap();
        assert_eq!(dto.day.unwrap().to_string(), "2025-03-14");
    }
}
