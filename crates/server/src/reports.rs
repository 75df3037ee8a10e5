//! Financial reporting endpoints.

use api_types::reports::{FinancialReportResponse, FinancialSummaryResponse};
use axum::{Json, extract::State};
use chrono::Utc;

use crate::{ServerError, server::ServerState, views};

/// Full financial report: totals, season buckets, six-month series, top
/// services. Recomputed from the store on every call.
pub async fn financial_reports(
    State(state): State<ServerState>,
) -> Result<Json<FinancialReportResponse>, ServerError> {
    let data = state.engine.financial_report(Utc::now()).await?;
    Ok(Json(FinancialReportResponse {
        success: true,
        data: views::financial_data_view(data),
    }))
}

/// Counts and totals over invoices, purchase orders and payments.
pub async fn metrics(
    State(state): State<ServerState>,
) -> Result<Json<FinancialSummaryResponse>, ServerError> {
    let summary = state.engine.financial_summary().await?;
    Ok(Json(FinancialSummaryResponse {
        success: true,
        summary: views::financial_summary_view(summary),
    }))
}
