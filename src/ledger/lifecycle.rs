//! Bet state machine.
//!
//! Every transition is a pure function from the current record to the next
//! one; persisting the result is the caller's job. `now` is passed in so the
//! settlement timestamp is deterministic under test.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::AppError;
use crate::ledger::validation::{check_max_amount, check_terms, BetTerms};
use crate::models::{Bet, BetStatus, NewBet};

/// Market-determined result of a bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

impl From<Outcome> for BetStatus {
    fn from(o: Outcome) -> Self {
        match o {
            Outcome::Won => BetStatus::Won,
            Outcome::Lost => BetStatus::Lost,
        }
    }
}

/// Label of a state change, used for logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Edit,
    Resolve(Outcome),
    Void,
    CashOut,
    Reopen,
}

impl Transition {
    pub fn as_str(self) -> &'static str {
        match self {
            Transition::Edit => "edit",
            Transition::Resolve(Outcome::Won) => "won",
            Transition::Resolve(Outcome::Lost) => "lost",
            Transition::Void => "void",
            Transition::CashOut => "cash_out",
            Transition::Reopen => "reopen",
        }
    }
}

pub fn create(terms: BetTerms) -> Result<NewBet, AppError> {
    check_terms(&terms)?;
    Ok(NewBet {
        potential_winnings: potential_winnings(&terms)?,
        title: terms.title,
        category: terms.category,
        stake: terms.stake,
        odds: terms.odds,
    })
}

pub fn edit(bet: &Bet, terms: BetTerms) -> Result<Bet, AppError> {
    ensure_pending(bet, "only pending bets are editable; reopen a resolved bet first")?;
    check_terms(&terms)?;

    Ok(Bet {
        potential_winnings: potential_winnings(&terms)?,
        title: terms.title,
        category: terms.category,
        stake: terms.stake,
        odds: terms.odds,
        ..bet.clone()
    })
}

/// Won pays the full potential payout (stake included); Lost pays nothing.
pub fn resolve(bet: &Bet, outcome: Outcome, now: DateTime<Utc>) -> Result<Bet, AppError> {
    ensure_pending(bet, "bet is already resolved, voided or cashed out")?;

    let payout = match outcome {
        Outcome::Won => bet.potential_winnings,
        Outcome::Lost => Decimal::ZERO,
    };
    Ok(settle(bet, outcome.into(), payout, now))
}

/// Refunds the stake in full, whatever the odds.
pub fn void(bet: &Bet, now: DateTime<Utc>) -> Result<Bet, AppError> {
    ensure_pending(bet, "only pending bets can be voided")?;
    Ok(settle(bet, BetStatus::Void, bet.stake, now))
}

/// Settles at exactly `amount`, which may be above or below the stake.
pub fn cash_out(bet: &Bet, amount: Decimal, now: DateTime<Utc>) -> Result<Bet, AppError> {
    ensure_pending(bet, "only pending bets can be cashed out")?;
    if amount < Decimal::ZERO {
        return Err(AppError::Validation(
            "cash-out amount must be zero or greater".into(),
        ));
    }
    check_max_amount("cash-out amount", amount)?;
    Ok(settle(bet, BetStatus::CashedOut, amount, now))
}

/// Undo of any terminal transition. The previous settlement is not kept.
pub fn reopen(bet: &Bet) -> Result<Bet, AppError> {
    if bet.status == BetStatus::Pending {
        return Err(AppError::State("bet is already pending".into()));
    }

    Ok(Bet {
        status: BetStatus::Pending,
        resolved_at: None,
        actual_winnings: None,
        ..bet.clone()
    })
}

fn potential_winnings(terms: &BetTerms) -> Result<Decimal, AppError> {
    terms
        .stake
        .checked_mul(terms.odds)
        .ok_or_else(|| AppError::Validation("stake times odds is too large".into()))
}

fn settle(bet: &Bet, status: BetStatus, actual_winnings: Decimal, now: DateTime<Utc>) -> Bet {
    Bet {
        status,
        resolved_at: Some(now),
        actual_winnings: Some(actual_winnings),
        ..bet.clone()
    }
}

fn ensure_pending(bet: &Bet, message: &str) -> Result<(), AppError> {
    if bet.status != BetStatus::Pending {
        return Err(AppError::State(message.into()));
    }
    Ok(())
}
