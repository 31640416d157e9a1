//! # mercato-client: REST Client for the Sales Backend
//!
//! This crate wraps the storefront's outbound REST calls: product search,
//! authentication, sale creation, payment submission, invoice generation and
//! download, and the daily sales aggregate.
//!
//! ## Endpoint Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Backend REST Endpoints                              │
//! │                                                                         │
//! │  search_products ──── GET  /products/?search={query}                    │
//! │  login ────────────── POST /login/                                      │
//! │  create_sale ──────── POST /sales/                                      │
//! │  submit_payment ───── POST /sales/{sale_id}/payments/                   │
//! │  create_invoice ───── POST /invoices/                                   │
//! │  download_invoice ─── GET  /invoices/{invoice_id}/download/             │
//! │  total_sales_per_day  GET  /sales/total_per_day/                        │
//! │                                                                         │
//! │  Every call is a single request. No retry, no backoff, no caching:     │
//! │  callers surface the failure and the cashier re-triggers the action.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`] - The [`SalesClient`] and its wire DTOs
//! - [`session`] - Explicit session context for access/refresh tokens
//! - [`config`] - Client configuration (base URL, timeout)
//! - [`error`] - Client error taxonomy
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mercato_client::{ClientConfig, SalesClient};
//!
//! # async fn run() -> Result<(), mercato_client::ClientError> {
//! let client = SalesClient::new(ClientConfig::from_env_or(None)?)?;
//! client.login("operator", "secret").await?;
//! let products = client.search_products("coca").await?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod api;
pub mod config;
pub mod error;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use api::{DailySales, InvoiceDocument, PaymentConfirmation, SalesClient};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use session::{Session, TokenPair};
