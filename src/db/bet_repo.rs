use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Bet, BetStatus, NewBet};

/// All bets, newest first.
pub async fn get_all_bets(pool: &PgPool) -> anyhow::Result<Vec<Bet>> {
    let bets = sqlx::query_as::<_, Bet>("SELECT * FROM bets ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;

    Ok(bets)
}

pub async fn get_bet_by_id(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<Bet>> {
    let bet = sqlx::query_as::<_, Bet>("SELECT * FROM bets WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(bet)
}

pub async fn insert_bet(pool: &PgPool, bet: &NewBet) -> anyhow::Result<Bet> {
    let created = sqlx::query_as::<_, Bet>(
        r#"
        INSERT INTO bets (title, category, stake, odds, potential_winnings, status)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(&bet.title)
    .bind(&bet.category)
    .bind(bet.stake)
    .bind(bet.odds)
    .bind(bet.potential_winnings)
    .bind(BetStatus::Pending)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

/// Full-record replace, applied only while the row still has `expected` status.
/// Returns `None` when no row matched (deleted, or status changed underneath).
pub async fn update_bet(
    pool: &PgPool,
    bet: &Bet,
    expected: BetStatus,
) -> anyhow::Result<Option<Bet>> {
    let updated = sqlx::query_as::<_, Bet>(
        r#"
        UPDATE bets
        SET title = $2,
            category = $3,
            stake = $4,
            odds = $5,
            potential_winnings = $6,
            status = $7,
            resolved_at = $8,
            actual_winnings = $9
        WHERE id = $1 AND status = $10
        RETURNING *
        "#,
    )
    .bind(bet.id)
    .bind(&bet.title)
    .bind(&bet.category)
    .bind(bet.stake)
    .bind(bet.odds)
    .bind(bet.potential_winnings)
    .bind(bet.status)
    .bind(bet.resolved_at)
    .bind(bet.actual_winnings)
    .bind(expected)
    .fetch_optional(pool)
    .await?;

    Ok(updated)
}

/// Hard delete. Returns false if nothing was removed.
pub async fn delete_bet(pool: &PgPool, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM bets WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
