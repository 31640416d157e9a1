//! # Error Types
//!
//! Domain-specific error types for mercato-core.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (the offending value)
//! 3. Errors are enum variants, never String

use thiserror::Error;

/// Core business logic errors.
///
/// Cart operations are total functions and never fail; the only fallible
/// pure operation is parsing a decimal amount received from the backend
/// or typed by the cashier.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A decimal currency string could not be parsed.
    ///
    /// ## When This Occurs
    /// - Backend returns a malformed price (e.g. `"abc"`, `"1.2.3"`)
    /// - Cashier types a received amount with more than two decimals
    #[error("invalid monetary amount: {value:?}")]
    InvalidAmount { value: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
