use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// Settlement state of a bet. Everything except `Pending` is terminal until reopened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "bet_status")]
pub enum BetStatus {
    Pending,
    Won,
    Lost,
    Void,
    CashedOut,
}

impl BetStatus {
    pub fn is_resolved(self) -> bool {
        !matches!(self, BetStatus::Pending)
    }
}

impl fmt::Display for BetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BetStatus::Pending => "Pending",
            BetStatus::Won => "Won",
            BetStatus::Lost => "Lost",
            BetStatus::Void => "Void",
            BetStatus::CashedOut => "CashedOut",
        };
        f.write_str(s)
    }
}

/// Database row for bets table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Bet {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub stake: Decimal,
    pub odds: Decimal,
    /// Always `stake * odds`; rewritten on every stake/odds edit.
    pub potential_winnings: Decimal,
    pub status: BetStatus,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    /// Total returned to the bettor, stake included. Present iff resolved.
    pub actual_winnings: Option<Decimal>,
}

impl Bet {
    /// Timestamp used to order the resolved list: settlement time, falling back to creation.
    pub fn settled_or_created_at(&self) -> DateTime<Utc> {
        self.resolved_at.unwrap_or(self.created_at)
    }
}

/// Validated bet fields ready for insertion. Id and `created_at` come from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBet {
    pub title: String,
    pub category: String,
    pub stake: Decimal,
    pub odds: Decimal,
    pub potential_winnings: Decimal,
}
