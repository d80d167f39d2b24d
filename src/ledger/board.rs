use serde::Serialize;

use crate::ledger::period::PeriodFilter;
use crate::models::{Bet, BetStatus};

/// Bets of a period split the way the bet list shows them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BetBoard {
    /// Pending bets, newest first.
    pub active: Vec<Bet>,
    /// Settled bets, most recently settled first.
    pub resolved: Vec<Bet>,
}

pub fn build_board(bets: &[Bet], period: PeriodFilter) -> BetBoard {
    let (mut active, mut resolved): (Vec<Bet>, Vec<Bet>) = period
        .bets(bets)
        .into_iter()
        .cloned()
        .partition(|b| b.status == BetStatus::Pending);

    active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    resolved.sort_by(|a, b| b.settled_or_created_at().cmp(&a.settled_or_created_at()));

    BetBoard { active, resolved }
}
