//! # Checkout Orchestrator
//!
//! Owns the cart for the lifetime of one sale attempt and drives the
//! sale-creation step.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout States                                    │
//! │                                                                         │
//! │            keystroke (debounced)                                        │
//! │   ┌──────┐ ─────────────────────► ┌───────────┐                        │
//! │   │ Idle │                        │ Searching │                        │
//! │   └──────┘ ◄───────────────────── └───────────┘                        │
//! │      │        response applied / discarded                             │
//! │      │                                                                  │
//! │      │ proceed_to_payment (non-empty cart)                             │
//! │      ▼                                                                  │
//! │   ┌──────────────┐   create_sale ok   ┌──────┐                         │
//! │   │ CreatingSale │ ─────────────────► │ Done │ ──► PaymentFlow         │
//! │   └──────────────┘                    └──────┘                         │
//! │      │ create_sale failed                                              │
//! │      ▼                                                                  │
//! │   ┌───────┐  dismiss_error                                             │
//! │   │ Error │ ───────────────► Idle  (cashier re-triggers manually)      │
//! │   └───────┘                                                            │
//! │                                                                         │
//! │   Empty cart: proceed aborts with a validation message BEFORE any      │
//! │   network call; no state change.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use mercato_client::SalesClient;
use mercato_core::{Cart, CartTotals, Product, QuantityChange, SaleHandle, TaxRate};

use crate::error::{FlowError, FlowResult};
use crate::payment::PaymentFlow;
use crate::search::{ProductSearch, SearchToken};

// =============================================================================
// Constants
// =============================================================================

/// Default debounce window for product search.
///
/// The window restarts on every keystroke; only the last query within it is
/// sent.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;

// =============================================================================
// Configuration
// =============================================================================

/// Checkout configuration for one terminal.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// The operator identity attributed to created sales.
    pub cashier_id: i64,

    /// Rate applied on top of the subtotal. `TaxRate::zero()` disables the
    /// surcharge for stores that price it in.
    pub tax_rate: TaxRate,

    /// Debounce window for product search.
    pub search_debounce: Duration,
}

impl CheckoutConfig {
    /// Creates a config with the storefront defaults.
    pub fn new(cashier_id: i64) -> Self {
        CheckoutConfig {
            cashier_id,
            tax_rate: TaxRate::default(),
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
        }
    }

    /// Overrides the tax rate.
    pub fn with_tax_rate(mut self, rate: TaxRate) -> Self {
        self.tax_rate = rate;
        self
    }

    /// Overrides the search debounce window (tests use zero).
    pub fn with_search_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce = debounce;
        self
    }
}

// =============================================================================
// State
// =============================================================================

/// Checkout state, serialized for whatever shell renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutState {
    /// Ready for input.
    Idle,
    /// A search request is in flight.
    Searching,
    /// The sale is being created on the backend.
    CreatingSale,
    /// Sale created; the payment flow owns the rest.
    Done,
    /// Sale creation failed; message available, action retryable.
    Error,
}

// =============================================================================
// Checkout Orchestrator
// =============================================================================

/// The checkout orchestrator for one sale attempt.
///
/// Owns the cart exclusively: nothing else mutates it while a sale attempt
/// is alive. Dropping the orchestrator (view navigated away) cancels any
/// in-flight work with no state mutation - all effects apply on resume,
/// which never happens for a dropped future.
#[derive(Debug)]
pub struct Checkout {
    client: SalesClient,
    config: CheckoutConfig,
    cart: Cart,
    search: ProductSearch,
    state: CheckoutState,
    sale: Option<SaleHandle>,
    last_error: Option<String>,
}

impl Checkout {
    /// Creates a checkout with an empty cart.
    pub fn new(client: SalesClient, config: CheckoutConfig) -> Self {
        Checkout {
            client,
            config,
            cart: Cart::new(),
            search: ProductSearch::new(),
            state: CheckoutState::Idle,
            sale: None,
            last_error: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current state.
    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// The cart (read-only; mutate through the operations below).
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The sale handle once a sale has been created.
    pub fn sale(&self) -> Option<SaleHandle> {
        self.sale
    }

    /// Last surfaced error message, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The latest applied search results.
    pub fn search_results(&self) -> &[Product] {
        self.search.results()
    }

    // =========================================================================
    // Cart Operations
    // =========================================================================

    /// Adds a product (or increments its line).
    pub fn add_product(&mut self, product: &Product) {
        debug!(product_id = product.id, "adding product to cart");
        self.cart.add_product(product);
    }

    /// Adjusts a line quantity by one; decrement floors at 1.
    pub fn change_quantity(&mut self, product_id: i64, change: QuantityChange) {
        self.cart.change_quantity(product_id, change);
    }

    /// Removes a line unconditionally.
    pub fn remove_line(&mut self, product_id: i64) {
        self.cart.remove_line(product_id);
    }

    /// Derived cart summary under the configured tax rate.
    pub fn totals(&self) -> CartTotals {
        self.cart.totals(self.config.tax_rate)
    }

    // =========================================================================
    // Product Search
    // =========================================================================

    /// Registers a keystroke in the search box.
    ///
    /// Supersedes any pending search. Returns a token to hand to
    /// [`Checkout::run_search`], or `None` when the query is too short to
    /// search (results are cleared, no network call will be made).
    pub fn keystroke(&mut self, query: &str) -> Option<SearchToken> {
        self.search.keystroke(query)
    }

    /// Drives one debounced search to completion.
    ///
    /// Sleeps the debounce window, then issues the request only if the
    /// token still represents the latest keystroke. Returns `Ok(true)` when
    /// results were applied, `Ok(false)` when the search was superseded
    /// (either during the window or by the time the response arrived).
    pub async fn run_search(&mut self, token: SearchToken) -> FlowResult<bool> {
        tokio::time::sleep(self.config.search_debounce).await;

        if !self.search.is_current(&token) {
            debug!(query = token.query(), "search superseded during debounce");
            return Ok(false);
        }

        self.state = CheckoutState::Searching;
        let result = self.client.search_products(token.query()).await;
        self.state = CheckoutState::Idle;

        match result {
            Ok(products) => Ok(self.search.apply(&token, products)),
            Err(e) => {
                warn!(query = token.query(), error = %e, "product search failed");
                self.search.apply(&token, Vec::new());
                self.last_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    // =========================================================================
    // Sale Creation
    // =========================================================================

    /// Creates the sale and hands off to the payment flow.
    ///
    /// An empty cart aborts with [`FlowError::EmptyCart`] before any
    /// network call. On backend failure the state moves to `Error` with a
    /// retryable message; [`Checkout::dismiss_error`] returns to `Idle` and
    /// the cashier re-triggers the action manually.
    pub async fn proceed_to_payment(&mut self) -> FlowResult<PaymentFlow> {
        if self.cart.is_empty() {
            warn!("proceed_to_payment with empty cart");
            return Err(FlowError::EmptyCart);
        }

        self.state = CheckoutState::CreatingSale;
        self.last_error = None;

        let totals = self.cart.totals(self.config.tax_rate);
        let items = self.cart.to_sale_items();

        match self.client.create_sale(self.config.cashier_id, &items).await {
            Ok(sale_id) => {
                let handle = SaleHandle {
                    sale_id,
                    total_cents: totals.total_cents,
                };
                self.sale = Some(handle);
                self.state = CheckoutState::Done;
                info!(sale_id, total = %totals.total(), "sale created, handing off to payment");
                PaymentFlow::new(self.client.clone(), handle)
            }
            Err(e) => {
                warn!(error = %e, "sale creation failed");
                self.state = CheckoutState::Error;
                self.last_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Acknowledges a surfaced error and returns to `Idle`.
    pub fn dismiss_error(&mut self) {
        if self.state == CheckoutState::Error {
            self.state = CheckoutState::Idle;
        }
    }

    /// Closes out a completed sale: clears the cart, the sale handle, and
    /// the search results, returning to `Idle` for the next customer.
    pub fn finish_sale(&mut self) {
        info!(sale_id = ?self.sale.map(|s| s.sale_id), "finishing sale");
        self.cart.clear();
        self.sale = None;
        self.search.invalidate();
        self.last_error = None;
        self.state = CheckoutState::Idle;
    }
}

// =============================================================================
// Unit Tests (network-free paths; backend behavior lives in tests/)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mercato_client::ClientConfig;

    fn checkout() -> Checkout {
        let client =
            SalesClient::new(ClientConfig::new("http://127.0.0.1:9").unwrap()).unwrap();
        Checkout::new(client, CheckoutConfig::new(1))
    }

    fn product(id: i64, price_cents: i64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            price_cents,
        }
    }

    #[test]
    fn test_starts_idle_and_empty() {
        let checkout = checkout();
        assert_eq!(checkout.state(), CheckoutState::Idle);
        assert!(checkout.cart().is_empty());
        assert!(checkout.sale().is_none());
    }

    #[tokio::test]
    async fn test_proceed_with_empty_cart_is_rejected_locally() {
        // Client points at a dead port: reaching the network would fail
        // loudly, proving the rejection happens before any request.
        let mut checkout = checkout();
        let err = checkout.proceed_to_payment().await.unwrap_err();

        assert!(matches!(err, FlowError::EmptyCart));
        assert_eq!(checkout.state(), CheckoutState::Idle);
    }

    #[test]
    fn test_totals_use_configured_rate() {
        let mut checkout = checkout();
        checkout.add_product(&product(1, 1000));
        checkout.add_product(&product(1, 1000));
        checkout.add_product(&product(2, 500));

        let totals = checkout.totals();
        assert_eq!(totals.subtotal_cents, 2500);
        assert_eq!(totals.tax_cents, 206); // default 8.25%
        assert_eq!(totals.total_cents, 2706);
    }

    #[test]
    fn test_dismiss_error_only_leaves_error_state() {
        let mut checkout = checkout();
        checkout.dismiss_error();
        assert_eq!(checkout.state(), CheckoutState::Idle);
    }

    #[test]
    fn test_finish_sale_resets_everything() {
        let mut checkout = checkout();
        checkout.add_product(&product(1, 1000));
        let token = checkout.keystroke("coca").unwrap();
        assert!(token.query() == "coca");

        checkout.finish_sale();
        assert!(checkout.cart().is_empty());
        assert!(checkout.sale().is_none());
        assert!(checkout.search_results().is_empty());
        assert_eq!(checkout.state(), CheckoutState::Idle);
    }

    #[test]
    fn test_state_serializes_snake_case() {
        let json = serde_json::to_string(&CheckoutState::CreatingSale).unwrap();
        assert_eq!(json, "\"creating_sale\"");
    }
}
