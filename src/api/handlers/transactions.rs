use axum::extract::{Query, State};
use axum::Json;

use crate::api::response::{ApiResponse, PeriodQuery};
use crate::errors::AppError;
use crate::ledger::messages::Message;
use crate::ledger::validation::TransactionForm;
use crate::ledger::{actions, PeriodFilter};
use crate::models::Transaction;
use crate::AppState;

/// GET /api/transactions: ledger for the selected period, most recent first
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let period = PeriodFilter::parse(query.month.as_deref())?;
    let txs = state.store.get_all_transactions().await?;

    let txs: Vec<Transaction> = period.transactions(&txs).into_iter().cloned().collect();
    Ok(Json(txs))
}

/// POST /api/transactions: record a deposit, withdrawal or picks purchase
pub async fn create(
    State(state): State<AppState>,
    Json(form): Json<TransactionForm>,
) -> Result<Json<ApiResponse<Transaction>>, AppError> {
    let tx = actions::create_transaction(&state.store, form).await?;
    Ok(Json(ApiResponse::ok(
        tx,
        state.render(Message::TransactionCreated),
    )))
}
