//! Daily sales dashboard.
//!
//! Thin read-only view over the aggregated sales endpoint: the manager's
//! landing screen shows per-day totals and a running grand total.

use tracing::debug;

use mercato_client::{DailySales, SalesClient};
use mercato_core::Money;

use crate::error::FlowResult;

/// Fetches the per-day sales breakdown.
pub async fn daily_sales(client: &SalesClient) -> FlowResult<Vec<DailySales>> {
    Ok(client.total_sales_per_day().await?)
}

/// Fetches the grand total across all reported days.
pub async fn daily_sales_total(client: &SalesClient) -> FlowResult<Money> {
    let days = client.total_sales_per_day().await?;
    let total = days
        .iter()
        .fold(Money::zero(), |acc, d| acc + d.total_sales());
    debug!(days = days.len(), total = %total, "daily sales aggregated");
    Ok(total)
}
