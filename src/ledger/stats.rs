use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::AppError;
use crate::ledger::period::PeriodFilter;
use crate::models::{Bet, BetStatus, Transaction, TransactionType};

/// Summary of cash movements and betting performance for a period.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverallStats {
    pub total_deposits: Decimal,
    pub total_withdrawals: Decimal,
    pub total_picks_purchases: Decimal,
    /// Withdrawals minus deposits minus picks purchases.
    pub financial_balance: Decimal,

    /// All bets in the period, pending included.
    pub total_bets: usize,
    pub bets_won: usize,
    pub bets_lost: usize,
    pub bets_voided: usize,
    pub bets_cashed_out: usize,

    /// Stake summed over resolved bets.
    pub total_wagered: Decimal,
    /// Returns minus stake over resolved bets.
    pub total_net_winnings: Decimal,
    /// ROI over Won/Lost bets only, in percent.
    pub profit_percentage: Decimal,
    /// Net winnings per resolved bet.
    pub yield_per_bet: Decimal,
}

/// Fails only when stored totals exceed `Decimal`'s range, which the input
/// caps rule out for anything written through this crate.
pub fn compute_stats(
    bets: &[Bet],
    transactions: &[Transaction],
    period: PeriodFilter,
) -> Result<OverallStats, AppError> {
    let bets = period.bets(bets);
    let transactions = period.transactions(transactions);

    let sum_of = |kind: TransactionType| -> Result<Decimal, AppError> {
        transactions
            .iter()
            .filter(|t| t.kind == kind)
            .try_fold(Decimal::ZERO, |acc, t| add(acc, t.amount))
    };
    let total_deposits = sum_of(TransactionType::Deposit)?;
    let total_withdrawals = sum_of(TransactionType::Withdrawal)?;
    let total_picks_purchases = sum_of(TransactionType::PicksPurchase)?;

    let resolved: Vec<&Bet> = bets.iter().copied().filter(|b| b.status.is_resolved()).collect();
    let count = |status: BetStatus| resolved.iter().filter(|b| b.status == status).count();

    let total_wagered = resolved
        .iter()
        .try_fold(Decimal::ZERO, |acc, b| add(acc, b.stake))?;
    let total_returns = resolved
        .iter()
        .try_fold(Decimal::ZERO, |acc, b| add(acc, returned(b)))?;
    let total_net_winnings = sub(total_returns, total_wagered)?;

    // Void and cash-out are not market outcomes and stay out of ROI
    let (roi_base, roi_returns) = resolved
        .iter()
        .filter(|b| matches!(b.status, BetStatus::Won | BetStatus::Lost))
        .try_fold((Decimal::ZERO, Decimal::ZERO), |(base, back), b| {
            Ok::<_, AppError>((add(base, b.stake)?, add(back, returned(b))?))
        })?;
    let roi_profit = sub(roi_returns, roi_base)?;

    let profit_percentage = if roi_base > Decimal::ZERO {
        roi_profit
            .checked_div(roi_base)
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or_else(overflow)?
    } else {
        Decimal::ZERO
    };

    let yield_per_bet = if resolved.is_empty() {
        Decimal::ZERO
    } else {
        total_net_winnings
            .checked_div(Decimal::from(resolved.len()))
            .ok_or_else(overflow)?
    };

    let financial_balance = sub(
        sub(total_withdrawals, total_deposits)?,
        total_picks_purchases,
    )?;

    Ok(OverallStats {
        total_deposits,
        total_withdrawals,
        total_picks_purchases,
        financial_balance,
        total_bets: bets.len(),
        bets_won: count(BetStatus::Won),
        bets_lost: count(BetStatus::Lost),
        bets_voided: count(BetStatus::Void),
        bets_cashed_out: count(BetStatus::CashedOut),
        total_wagered,
        total_net_winnings,
        profit_percentage,
        yield_per_bet,
    })
}

fn returned(bet: &Bet) -> Decimal {
    bet.actual_winnings.unwrap_or(Decimal::ZERO)
}

fn add(a: Decimal, b: Decimal) -> Result<Decimal, AppError> {
    a.checked_add(b).ok_or_else(overflow)
}

fn sub(a: Decimal, b: Decimal) -> Result<Decimal, AppError> {
    a.checked_sub(b).ok_or_else(overflow)
}

fn overflow() -> AppError {
    AppError::State("stored amounts are too large to total".into())
}
