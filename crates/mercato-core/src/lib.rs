//! # mercato-core: Pure Business Logic for Mercato POS
//!
//! This crate is the **heart** of the Mercato storefront client. It contains
//! all business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Mercato POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               mercato-checkout (Flow Layer)                     │   │
//! │  │     Checkout state machine ──► Payment state machine            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               mercato-client (Network Layer)                    │   │
//! │  │     search, login, create sale, pay, invoice, download          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ mercato-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │    pix    │   │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  payload  │   │   │
//! │  │   │  Payment  │  │  TaxCalc  │  │ CartLine  │  │ derivation│   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, PaymentMethod, SaleHandle, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart model: ordered lines, unique by product
//! - [`pix`] - Deterministic PIX payment reference derivation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network and file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in centavos (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pix;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartTotals, QuantityChange};
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum search query length (in characters) before a network request
/// is issued.
///
/// ## Business Reason
/// One- and two-character queries match almost the whole catalog and hammer
/// the backend on every keystroke. Only queries longer than two characters
/// are searched; shorter input clears the result list.
pub const MIN_SEARCH_QUERY_LEN: usize = 3;

/// Default tax rate applied on top of the cart subtotal, in basis points.
///
/// ## Business Reason
/// 825 bps = 8.25% service charge, the rate used by the current storefront.
/// The rate is configuration, not law: `TaxRate::zero()` turns the surcharge
/// off entirely (some stores price it in).
pub const DEFAULT_TAX_RATE_BPS: u32 = 825;
