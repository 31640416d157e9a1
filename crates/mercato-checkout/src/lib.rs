//! # Mercato Checkout
//!
//! State machines driving a point-of-sale terminal against the Mercato
//! backend: product search with debounce, cart-to-sale handoff, and the
//! payment-through-invoice pipeline.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       One Sale, End to End                              │
//! │                                                                         │
//! │   keystrokes ──► Checkout ──► proceed_to_payment ──► PaymentFlow        │
//! │                  │  cart                             │  submit          │
//! │                  │  search (debounced)               │  invoice         │
//! │                  │                                   │  download        │
//! │                  └── finish_sale ◄───── finish ──────┘                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A typical terminal loop:
//!
//! 1. Construct a [`Checkout`] from a [`SalesClient`](mercato_client::SalesClient)
//!    and a [`CheckoutConfig`].
//! 2. On each search-box keystroke, call [`Checkout::keystroke`]; when it
//!    returns a token, spawn-or-await [`Checkout::run_search`] with it.
//!    Superseded searches resolve to `Ok(false)` and never clobber newer
//!    results.
//! 3. Mutate the cart through the delegated operations, then
//!    [`Checkout::proceed_to_payment`] to create the sale and obtain a
//!    [`PaymentFlow`].
//! 4. Select a method (entering cash and computing change if applicable),
//!    [`PaymentFlow::submit`] - which auto-chains invoice generation -
//!    and optionally [`PaymentFlow::download_invoice`].
//! 5. [`PaymentFlow::finish`] and [`Checkout::finish_sale`] reset for the
//!    next customer.

pub mod checkout;
pub mod dashboard;
pub mod error;
pub mod payment;
pub mod search;

pub use checkout::{Checkout, CheckoutConfig, CheckoutState, DEFAULT_SEARCH_DEBOUNCE_MS};
pub use error::{FlowError, FlowResult};
pub use payment::{PaymentFlow, PaymentState};
pub use search::{ProductSearch, SearchToken};
