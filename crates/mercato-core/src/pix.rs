//! # PIX Payment Reference
//!
//! Derives the scannable PIX payment reference for a sale.
//!
//! ## Why No Network Call?
//! The reference is a pure function of the sale identifier and the amount,
//! built locally the moment PIX is selected, so the QR code appears
//! instantly and deterministically - no round-trip, nothing to retry.

use crate::money::Money;

/// The payment gateway URL the reference points at.
///
/// Kept verbatim from the storefront contract; the backend recognizes
/// exactly this shape.
const PIX_GATEWAY_URL: &str = "https://fake-pix.com/payment";

/// Derives the PIX payment reference (QR payload) for a sale.
///
/// Same sale + same amount always yields the same reference.
///
/// ## Example
/// ```rust
/// use mercato_core::money::Money;
/// use mercato_core::pix::payment_reference;
///
/// let payload = payment_reference(42, Money::from_cents(2325));
/// assert_eq!(payload, "https://fake-pix.com/payment?saleId=42&amount=23.25");
/// ```
pub fn payment_reference(sale_id: i64, amount: Money) -> String {
    format!(
        "{}?saleId={}&amount={}",
        PIX_GATEWAY_URL,
        sale_id,
        amount.to_decimal_string()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_is_deterministic() {
        let a = payment_reference(7, Money::from_cents(1050));
        let b = payment_reference(7, Money::from_cents(1050));
        assert_eq!(a, b);
    }

    #[test]
    fn test_reference_shape() {
        assert_eq!(
            payment_reference(123, Money::from_cents(999)),
            "https://fake-pix.com/payment?saleId=123&amount=9.99"
        );
    }

    #[test]
    fn test_reference_varies_with_inputs() {
        let base = payment_reference(1, Money::from_cents(100));
        assert_ne!(base, payment_reference(2, Money::from_cents(100)));
        assert_ne!(base, payment_reference(1, Money::from_cents(200)));
    }
}
