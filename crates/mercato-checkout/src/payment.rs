//! # Payment Flow
//!
//! Takes over from the checkout once a sale exists and drives it through
//! payment, invoice generation, and invoice download.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Payment States                                    │
//! │                                                                         │
//! │   ┌─────────────────┐  select Cash   ┌───────────────────┐             │
//! │   │ SelectingMethod │ ─────────────► │ AwaitingCashInput │             │
//! │   └─────────────────┘                └───────────────────┘             │
//! │        │ submit (method chosen)             │ submit                   │
//! │        ▼                                    ▼                          │
//! │   ┌────────────┐  payment accepted   ┌───────────────────┐            │
//! │   │ Submitting │ ──────────────────► │ GeneratingInvoice │            │
//! │   └────────────┘    (auto-chained)   └───────────────────┘            │
//! │        │ payment failed                     │ invoice ok              │
//! │        ▼                                    ▼                          │
//! │   ┌───────┐    ◄── invoice failed     ┌─────────┐                     │
//! │   │ Error │                           │ Success │ ──► download / done │
//! │   └───────┘                           └─────────┘                     │
//! │                                                                        │
//! │   Payment and invoice failures are distinguishable: a confirmed        │
//! │   payment is NEVER re-submitted - only the invoice step retries.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tracing::{debug, info, warn};

use mercato_client::{InvoiceDocument, SalesClient};
use mercato_core::{pix, Money, PaymentMethod, SaleHandle};

use crate::error::{FlowError, FlowResult};

// =============================================================================
// State
// =============================================================================

/// Payment flow state, serialized for whatever shell renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    /// Choosing a payment method.
    SelectingMethod,
    /// Cash chosen; waiting for the received amount.
    AwaitingCashInput,
    /// Payment request in flight.
    Submitting,
    /// Payment confirmed; invoice request in flight.
    GeneratingInvoice,
    /// Payment confirmed and invoice generated.
    Success,
    /// A step failed; message available, `retry` depends on which step.
    Error,
}

// =============================================================================
// Payment Flow
// =============================================================================

/// Drives one sale through payment and invoicing.
///
/// Constructed by `Checkout::proceed_to_payment` with a validated sale
/// handle. The two remote steps are chained: a successful payment
/// immediately attempts invoice generation, and once the payment is
/// confirmed it is never re-submitted - [`PaymentFlow::generate_invoice`]
/// is the only retry path from an invoice failure.
#[derive(Debug)]
pub struct PaymentFlow {
    client: SalesClient,
    sale: SaleHandle,
    state: PaymentState,
    method: Option<PaymentMethod>,
    received: Option<Money>,
    change: Option<Money>,
    payment_confirmed: bool,
    invoice_id: Option<i64>,
    downloading: AtomicBool,
    last_error: Option<String>,
}

impl PaymentFlow {
    /// Creates a flow for an existing sale.
    ///
    /// Rejects handles that cannot correspond to a created sale (missing
    /// identifier, non-positive total) before any network traffic.
    pub fn new(client: SalesClient, sale: SaleHandle) -> FlowResult<Self> {
        if sale.sale_id <= 0 {
            return Err(FlowError::InvalidSale);
        }
        if sale.total_cents <= 0 {
            return Err(FlowError::InvalidTotal);
        }

        Ok(PaymentFlow {
            client,
            sale,
            state: PaymentState::SelectingMethod,
            method: None,
            received: None,
            change: None,
            payment_confirmed: false,
            invoice_id: None,
            downloading: AtomicBool::new(false),
            last_error: None,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current state.
    pub fn state(&self) -> PaymentState {
        self.state
    }

    /// The sale being paid.
    pub fn sale(&self) -> SaleHandle {
        self.sale
    }

    /// The selected payment method.
    pub fn method(&self) -> Option<PaymentMethod> {
        self.method
    }

    /// The computed change, once requested.
    pub fn change(&self) -> Option<Money> {
        self.change
    }

    /// Whether the backend has confirmed the payment.
    pub fn payment_confirmed(&self) -> bool {
        self.payment_confirmed
    }

    /// The generated invoice identifier, once available.
    pub fn invoice_id(&self) -> Option<i64> {
        self.invoice_id
    }

    /// Last surfaced error message, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // =========================================================================
    // Method Selection & Cash Handling
    // =========================================================================

    /// Selects (or switches) the payment method.
    ///
    /// Switching clears any entered cash amount and computed change. Cash
    /// moves the flow to `AwaitingCashInput`; every other method stays in
    /// `SelectingMethod` ready to submit.
    pub fn select_method(&mut self, method: PaymentMethod) {
        debug!(method = method.as_str(), "payment method selected");
        self.method = Some(method);
        self.received = None;
        self.change = None;
        self.state = if method.is_cash() {
            PaymentState::AwaitingCashInput
        } else {
            PaymentState::SelectingMethod
        };
    }

    /// The Pix payment reference for this sale.
    ///
    /// Only meaningful once Pix is the selected method.
    pub fn pix_reference(&self) -> Option<String> {
        match self.method {
            Some(PaymentMethod::Pix) => {
                Some(pix::payment_reference(self.sale.sale_id, self.sale.total()))
            }
            _ => None,
        }
    }

    /// Records the cash amount handed over by the customer.
    ///
    /// Does not compute change; that is an explicit action.
    pub fn enter_received_amount(&mut self, amount: Money) {
        self.received = Some(amount);
        self.change = None;
    }

    /// Computes change for a cash payment.
    ///
    /// Returns the change when the received amount covers the total, `None`
    /// when no amount was entered or it falls short. The result is also
    /// retained for display.
    pub fn compute_change(&mut self) -> Option<Money> {
        let received = self.received?;
        let total = self.sale.total();
        if received >= total {
            let change = received - total;
            self.change = Some(change);
            Some(change)
        } else {
            self.change = None;
            None
        }
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Submits the payment, then chains straight into invoice generation.
    ///
    /// Requires a selected method; rejected locally otherwise. A payment
    /// failure leaves the flow in `Error` with nothing confirmed - the whole
    /// submission may be retried. Once the payment is confirmed, any
    /// subsequent failure is an invoice failure and only
    /// [`PaymentFlow::generate_invoice`] retries.
    pub async fn submit(&mut self) -> FlowResult<()> {
        if self.payment_confirmed {
            return Err(FlowError::PaymentAlreadyConfirmed);
        }
        let method = self.method.ok_or(FlowError::NoMethodSelected)?;

        self.state = PaymentState::Submitting;
        self.last_error = None;

        let total = self.sale.total();
        match self
            .client
            .submit_payment(self.sale.sale_id, method, total)
            .await
        {
            Ok(confirmation) => {
                info!(
                    sale_id = self.sale.sale_id,
                    payment_id = ?confirmation.id,
                    method = method.as_str(),
                    "payment confirmed"
                );
                self.payment_confirmed = true;
            }
            Err(e) => {
                warn!(sale_id = self.sale.sale_id, error = %e, "payment failed");
                self.state = PaymentState::Error;
                self.last_error = Some(e.to_string());
                return Err(FlowError::PaymentFailed { source: e });
            }
        }

        self.generate_invoice().await
    }

    /// Generates the invoice for a confirmed payment.
    ///
    /// Safe to call repeatedly after an invoice failure; the confirmed
    /// payment is never touched again.
    pub async fn generate_invoice(&mut self) -> FlowResult<()> {
        if !self.payment_confirmed {
            return Err(FlowError::PaymentNotConfirmed);
        }

        self.state = PaymentState::GeneratingInvoice;
        self.last_error = None;

        match self.client.create_invoice(self.sale.sale_id).await {
            Ok(invoice_id) => {
                info!(sale_id = self.sale.sale_id, invoice_id, "invoice generated");
                self.invoice_id = Some(invoice_id);
                self.state = PaymentState::Success;
                Ok(())
            }
            Err(e) => {
                warn!(sale_id = self.sale.sale_id, error = %e, "invoice generation failed");
                self.state = PaymentState::Error;
                self.last_error = Some(e.to_string());
                Err(FlowError::InvoiceFailed { source: e })
            }
        }
    }

    // =========================================================================
    // Invoice Download
    // =========================================================================

    /// Downloads the generated invoice document.
    ///
    /// At most one download runs at a time: a call while another is in
    /// flight returns `Ok(None)` without issuing a request. Requires the
    /// flow to have reached `Success`.
    pub async fn download_invoice(&self) -> FlowResult<Option<InvoiceDocument>> {
        let invoice_id = match (self.state, self.invoice_id) {
            (PaymentState::Success, Some(id)) => id,
            _ => return Err(FlowError::InvoiceNotReady),
        };

        if self
            .downloading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!(invoice_id, "download already in flight, skipping");
            return Ok(None);
        }

        let result = self.client.download_invoice(invoice_id).await;
        self.downloading.store(false, Ordering::Release);

        match result {
            Ok(document) => {
                info!(invoice_id, filename = %document.filename, "invoice downloaded");
                Ok(Some(document))
            }
            Err(e) => {
                warn!(invoice_id, error = %e, "invoice download failed");
                Err(e.into())
            }
        }
    }

    /// Consumes the flow once the sale is fully settled.
    ///
    /// Returns the sale handle so the caller can close out the checkout.
    pub fn finish(self) -> SaleHandle {
        self.sale
    }
}

// =============================================================================
// Unit Tests (network-free paths; backend behavior lives in tests/)
// =============================================================================
