//! # Debounced Product Search
//!
//! Generation-counted search state that survives out-of-order responses.
//!
//! ## The Ordering Hazard
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Why a Generation Counter?                             │
//! │                                                                         │
//! │  keystroke "coc"  ──► request A issued          (generation 1)         │
//! │  keystroke "coca" ──► request B issued          (generation 2)         │
//! │                                                                         │
//! │  response B arrives ──► applied    (gen 2 == current 2)  ✅            │
//! │  response A arrives ──► DISCARDED  (gen 1 != current 2)  ✅            │
//! │                                                                         │
//! │  Without the counter, the slower, staler response A would overwrite    │
//! │  the newer results for "coca".                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every keystroke bumps the generation, which simultaneously cancels any
//! pending debounce window (the driver re-checks the token after sleeping)
//! and invalidates any in-flight response.

use tracing::debug;

use mercato_core::{Product, MIN_SEARCH_QUERY_LEN};

// =============================================================================
// Search Token
// =============================================================================

/// A handle for one issued search: the query plus the generation it was
/// issued under. Only the token matching the current generation may apply
/// its results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchToken {
    generation: u64,
    query: String,
}

impl SearchToken {
    /// The query this token was issued for.
    pub fn query(&self) -> &str {
        &self.query
    }
}

// =============================================================================
// Product Search State
// =============================================================================

/// Search state: current generation and the last applied result set.
#[derive(Debug, Default)]
pub struct ProductSearch {
    generation: u64,
    results: Vec<Product>,
}

impl ProductSearch {
    /// Creates an empty search state.
    pub fn new() -> Self {
        ProductSearch::default()
    }

    /// Registers a keystroke.
    ///
    /// Always bumps the generation (superseding every pending search).
    /// Returns a token when the query is long enough to search; shorter
    /// queries clear the results and return `None` - no network call is
    /// ever issued for them.
    pub fn keystroke(&mut self, query: &str) -> Option<SearchToken> {
        self.generation += 1;
        let query = query.trim();

        if query.chars().count() < MIN_SEARCH_QUERY_LEN {
            debug!(query, "query below minimum length, clearing results");
            self.results.clear();
            return None;
        }

        Some(SearchToken {
            generation: self.generation,
            query: query.to_string(),
        })
    }

    /// Whether the token still represents the latest keystroke.
    pub fn is_current(&self, token: &SearchToken) -> bool {
        token.generation == self.generation
    }

    /// Applies a response for the given token.
    ///
    /// Stale responses (token superseded since issue) are discarded and
    /// `false` is returned; the current result set is untouched.
    pub fn apply(&mut self, token: &SearchToken, products: Vec<Product>) -> bool {
        if !self.is_current(token) {
            debug!(
                query = token.query(),
                stale_generation = token.generation,
                current_generation = self.generation,
                "discarding stale search response"
            );
            return false;
        }
        self.results = products;
        true
    }

    /// The last applied result set.
    pub fn results(&self) -> &[Product] {
        &self.results
    }

    /// Drops the results and supersedes anything in flight (used when the
    /// checkout view resets).
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.results.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
