//! # Flow Error Types
//!
//! User-surfaceable errors for the checkout and payment flows.
//!
//! ## Design Principles
//! - Preconditions violated locally (empty cart, no method) never reach the
//!   network - they are rejected client-side with their own variants.
//! - Payment failure and invoice failure are DISTINCT variants: a failed
//!   invoice after a successful payment must never look like a failed
//!   payment, because their retry actions differ.
//! - Every variant's `Display` is the message shown to the cashier.

use thiserror::Error;

use mercato_client::ClientError;

/// Result type alias for flow operations.
pub type FlowResult<T> = Result<T, FlowError>;

/// Errors from the checkout and payment state machines.
#[derive(Debug, Error)]
pub enum FlowError {
    // =========================================================================
    // Local Preconditions (no network call was made)
    // =========================================================================
    /// Proceeding to payment with nothing in the cart.
    #[error("cart is empty - add at least one product before payment")]
    EmptyCart,

    /// Payment flow opened without a valid sale identifier.
    #[error("sale identifier is missing or invalid - create the sale again")]
    InvalidSale,

    /// Payment flow opened with a non-positive total.
    #[error("sale total must be positive")]
    InvalidTotal,

    /// Submitting with no payment method selected.
    #[error("select a payment method before submitting")]
    NoMethodSelected,

    /// Submitting again after the payment already went through.
    ///
    /// The payment must not be re-attempted; only the invoice step may be
    /// retried.
    #[error("payment already confirmed - retry invoice generation instead")]
    PaymentAlreadyConfirmed,

    /// Generating an invoice before the payment is confirmed.
    #[error("payment has not been confirmed yet")]
    PaymentNotConfirmed,

    /// Downloading before invoice generation succeeded.
    #[error("invoice is not ready for download")]
    InvoiceNotReady,

    // =========================================================================
    // Backend Failures (distinguishable per step)
    // =========================================================================
    /// The payment submission failed. Safe to submit again.
    #[error("payment failed: {source}")]
    PaymentFailed { source: ClientError },

    /// Invoice generation failed AFTER a successful payment.
    #[error("invoice generation failed: {source}")]
    InvoiceFailed { source: ClientError },

    /// Any other backend failure (search, sale creation, download).
    #[error(transparent)]
    Client(#[from] ClientError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_and_invoice_failures_are_distinguishable() {
        let payment = FlowError::PaymentFailed {
            source: ClientError::Network {
                op: "submit_payment",
                detail: "timeout".to_string(),
            },
        };
        let invoice = FlowError::InvoiceFailed {
            source: ClientError::Network {
                op: "create_invoice",
                detail: "timeout".to_string(),
            },
        };

        assert!(payment.to_string().starts_with("payment failed"));
        assert!(invoice.to_string().starts_with("invoice generation failed"));
    }
}
