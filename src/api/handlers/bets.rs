use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::response::{ApiResponse, PeriodQuery};
use crate::errors::AppError;
use crate::ledger::messages::Message;
use crate::ledger::validation::{BetForm, CashOutForm};
use crate::ledger::{actions, build_board, BetBoard, Outcome, PeriodFilter};
use crate::models::Bet;
use crate::AppState;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct ResolveRequest {
    pub outcome: Outcome,
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/bets: bets of the selected period, split into active and resolved
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<BetBoard>, AppError> {
    let period = PeriodFilter::parse(query.month.as_deref())?;
    let bets = state.store.get_all_bets().await?;

    Ok(Json(build_board(&bets, period)))
}

/// GET /api/bets/{id}
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Bet>, AppError> {
    Ok(Json(actions::load_bet(&state.store, id).await?))
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// POST /api/bets: create a pending bet
pub async fn create(
    State(state): State<AppState>,
    Json(form): Json<BetForm>,
) -> Result<Json<ApiResponse<Bet>>, AppError> {
    let bet = actions::create_bet(&state.store, form).await?;
    Ok(Json(ApiResponse::ok(bet, state.render(Message::BetCreated))))
}

/// PUT /api/bets/{id}: edit a pending bet
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<BetForm>,
) -> Result<Json<ApiResponse<Bet>>, AppError> {
    let bet = actions::edit_bet(&state.store, id, form).await?;
    Ok(Json(ApiResponse::ok(bet, state.render(Message::BetUpdated))))
}

/// DELETE /api/bets/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Uuid>>, AppError> {
    actions::delete_bet(&state.store, id).await?;
    Ok(Json(ApiResponse::ok(id, state.render(Message::BetDeleted))))
}

/// POST /api/bets/{id}/resolve: mark as won or lost
pub async fn resolve(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ResolveRequest>,
) -> Result<Json<ApiResponse<Bet>>, AppError> {
    let bet = actions::resolve_bet(&state.store, id, body.outcome).await?;
    let message = match body.outcome {
        Outcome::Won => Message::BetWon,
        Outcome::Lost => Message::BetLost,
    };
    Ok(Json(ApiResponse::ok(bet, state.render(message))))
}

/// POST /api/bets/{id}/void: refund the stake
pub async fn void(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Bet>>, AppError> {
    let bet = actions::void_bet(&state.store, id).await?;
    Ok(Json(ApiResponse::ok(bet, state.render(Message::BetVoided))))
}

/// POST /api/bets/{id}/cash-out
pub async fn cash_out(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<CashOutForm>,
) -> Result<Json<ApiResponse<Bet>>, AppError> {
    let bet = actions::cash_out_bet(&state.store, id, form).await?;
    let amount = bet.actual_winnings.unwrap_or_default();
    Ok(Json(ApiResponse::ok(
        bet,
        state.render(Message::BetCashedOut { amount }),
    )))
}

/// POST /api/bets/{id}/reopen: back to pending
pub async fn reopen(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Bet>>, AppError> {
    let bet = actions::reopen_bet(&state.store, id).await?;
    Ok(Json(ApiResponse::ok(bet, state.render(Message::BetReopened))))
}
