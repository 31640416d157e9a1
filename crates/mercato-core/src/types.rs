//! # Domain Types
//!
//! Core domain types used throughout Mercato POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   SaleHandle    │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (backend)   │   │  sale_id        │   │  CreditCard     │       │
//! │  │  name           │   │  total          │   │  DebitCard      │       │
//! │  │  price_cents    │   │                 │   │  Pix            │       │
//! │  └─────────────────┘   └─────────────────┘   │  Cash           │       │
//! │                                              └─────────────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    TaxRate      │   │    SaleItem     │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  bps (u32)      │   │  product_id     │                             │
//! │  │  825 = 8.25%    │   │  quantity       │                             │
//! │  └─────────────────┘   │  subtotal_cents │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The backend owns entity identity: ids are the integer primary keys it
//! returns, and the client never mints its own.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 825 bps = 8.25% (the storefront's service charge)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate (stores that price the charge in).
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::from_bps(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// Sourced read-only from the backend via search; the client never mutates
/// product data, it only snapshots it into cart lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Backend identifier (integer primary key).
    pub id: i64,

    /// Display name shown to the cashier.
    pub name: String,

    /// Unit price in centavos.
    pub price_cents: i64,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// The fixed set of accepted payment methods.
///
/// Wire names (`credit_card`, `debit_card`, `pix`, `cash`) are the values
/// the payments endpoint expects in its `payment_method` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Credit card on external terminal.
    CreditCard,
    /// Debit card on external terminal.
    DebitCard,
    /// PIX instant payment via scannable reference.
    Pix,
    /// Physical cash payment (requires change calculation).
    Cash,
}

impl PaymentMethod {
    /// The wire name sent to the backend.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::DebitCard => "debit_card",
            PaymentMethod::Pix => "pix",
            PaymentMethod::Cash => "cash",
        }
    }

    /// Cash is the only method that needs a received amount and change.
    #[inline]
    pub const fn is_cash(&self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// The client's view of a created sale.
///
/// The backend owns the full sale record; after `create_sale` the client
/// holds only the identifier and the total it was created with. A new cart
/// discards the handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleHandle {
    /// Backend sale identifier.
    pub sale_id: i64,

    /// The total the sale was created with, in centavos.
    pub total_cents: i64,
}

impl SaleHandle {
    /// Returns the sale total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// A line item as submitted to the sale-creation endpoint.
///
///// Snapshot of the cart line at submission time: product reference,
/// quantity, and the line subtotal the cart computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleItem {
    /// Backend product identifier.
    pub product_id: i64,

    /// Quantity sold.
    pub quantity: i64,

    /// Line subtotal (unit price × quantity) in centavos.
    pub subtotal_cents: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
