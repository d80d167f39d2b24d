use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::handlers;

pub fn create_router(state: AppState) -> Router {
    let ops = Router::new()
        .route("/health", get(handlers::ops::health_check))
        .route("/metrics", get(handlers::ops::metrics));

    let api = Router::new()
        // Bets
        .route("/api/bets", get(handlers::bets::list).post(handlers::bets::create))
        .route(
            "/api/bets/:id",
            get(handlers::bets::detail)
                .put(handlers::bets::update)
                .delete(handlers::bets::remove),
        )
        .route("/api/bets/:id/resolve", post(handlers::bets::resolve))
        .route("/api/bets/:id/void", post(handlers::bets::void))
        .route("/api/bets/:id/cash-out", post(handlers::bets::cash_out))
        .route("/api/bets/:id/reopen", post(handlers::bets::reopen))
        // Transactions
        .route(
            "/api/transactions",
            get(handlers::transactions::list).post(handlers::transactions::create),
        )
        // Statistics & period selector
        .route("/api/stats", get(handlers::stats::overall))
        .route("/api/months", get(handlers::stats::months))
        .route("/api/categories", get(handlers::stats::categories));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    ops.merge(api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
