//! Fixtures shared by the ledger unit tests.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{Bet, BetStatus, Transaction, TransactionType};

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

/// A bet whose settlement fields agree with `status`. Resolved fixtures settle
/// at `created_at`; Won pays `stake * odds`, Void and CashedOut return the stake.
pub fn bet_fixture(
    stake: impl Into<Decimal>,
    odds: impl Into<Decimal>,
    status: BetStatus,
    created_at: DateTime<Utc>,
) -> Bet {
    let stake = stake.into();
    let odds = odds.into();
    let potential_winnings = stake * odds;

    let actual_winnings = match status {
        BetStatus::Pending => None,
        BetStatus::Won => Some(potential_winnings),
        BetStatus::Lost => Some(Decimal::ZERO),
        BetStatus::Void | BetStatus::CashedOut => Some(stake),
    };

    Bet {
        id: Uuid::new_v4(),
        title: "Arsenal v Chelsea".into(),
        category: "Football".into(),
        stake,
        odds,
        potential_winnings,
        status,
        created_at,
        resolved_at: status.is_resolved().then_some(created_at),
        actual_winnings,
    }
}

pub fn tx_fixture(kind: TransactionType, amount: impl Into<Decimal>, date: DateTime<Utc>) -> Transaction {
    Transaction {
        id: Uuid::new_v4(),
        kind,
        amount: amount.into(),
        description: "fixture".into(),
        date,
    }
}
