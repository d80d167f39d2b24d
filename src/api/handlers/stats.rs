use axum::extract::{Query, State};
use axum::Json;

use crate::api::response::PeriodQuery;
use crate::errors::AppError;
use crate::ledger::messages::suggested_categories;
use crate::ledger::{compute_stats, unique_months, Month, OverallStats, PeriodFilter};
use crate::AppState;

/// GET /api/stats: financial and betting summary for the selected period
pub async fn overall(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<OverallStats>, AppError> {
    let period = PeriodFilter::parse(query.month.as_deref())?;
    let bets = state.store.get_all_bets().await?;
    let txs = state.store.get_all_transactions().await?;

    Ok(Json(compute_stats(&bets, &txs, period)?))
}

/// GET /api/months: periods with any activity, most recent first
pub async fn months(State(state): State<AppState>) -> Result<Json<Vec<Month>>, AppError> {
    let bets = state.store.get_all_bets().await?;
    let txs = state.store.get_all_transactions().await?;

    Ok(Json(unique_months(&bets, &txs)))
}

/// GET /api/categories: suggested tags; any non-blank category is accepted
pub async fn categories(State(state): State<AppState>) -> Json<&'static [&'static str]> {
    Json(suggested_categories(state.config.locale))
}
