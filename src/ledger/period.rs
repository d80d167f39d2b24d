use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use serde::{Serialize, Serializer};

use crate::errors::AppError;
use crate::models::{Bet, Transaction};

/// Query value meaning "no period filter".
pub const ALL_TIME: &str = "all-time";

/// A calendar month, rendered as zero-padded `YYYY-MM`.
///
/// Ordering is chronological, which matches lexicographic order of the
/// rendered keys for four-digit years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        ((0..=9999).contains(&year) && (1..=12).contains(&month)).then_some(Self { year, month })
    }

    /// Month containing the given instant (UTC calendar).
    pub fn of(ts: DateTime<Utc>) -> Self {
        Self {
            year: ts.year(),
            month: ts.month(),
        }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        Self::of(ts) == *self
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::Validation(format!("invalid month '{s}', expected YYYY-MM"));

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4
            || month.len() != 2
            || !year.bytes().all(|b| b.is_ascii_digit())
            || !month.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Month::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Period selection threaded explicitly into every listing and aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodFilter {
    #[default]
    AllTime,
    Month(Month),
}

impl PeriodFilter {
    /// Parse the `month` query value. Absent, empty and `all-time` mean no filter.
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw.map(str::trim) {
            None | Some("") | Some(ALL_TIME) => Ok(PeriodFilter::AllTime),
            Some(s) => s.parse().map(PeriodFilter::Month),
        }
    }

    /// A bet belongs to a month if it was created OR resolved in it.
    pub fn includes_bet(&self, bet: &Bet) -> bool {
        match self {
            PeriodFilter::AllTime => true,
            PeriodFilter::Month(m) => {
                m.contains(bet.created_at) || bet.resolved_at.is_some_and(|r| m.contains(r))
            }
        }
    }

    pub fn includes_transaction(&self, tx: &Transaction) -> bool {
        match self {
            PeriodFilter::AllTime => true,
            PeriodFilter::Month(m) => m.contains(tx.date),
        }
    }

    pub fn bets<'a>(&self, bets: &'a [Bet]) -> Vec<&'a Bet> {
        bets.iter().filter(|b| self.includes_bet(b)).collect()
    }

    pub fn transactions<'a>(&self, txs: &'a [Transaction]) -> Vec<&'a Transaction> {
        txs.iter().filter(|t| self.includes_transaction(t)).collect()
    }
}

/// Every month touched by a bet's creation or resolution or by a transaction
/// date, most recent first.
pub fn unique_months(bets: &[Bet], transactions: &[Transaction]) -> Vec<Month> {
    let mut months = BTreeSet::new();

    for bet in bets {
        months.insert(Month::of(bet.created_at));
        if let Some(resolved_at) = bet.resolved_at {
            months.insert(Month::of(resolved_at));
        }
    }
    for tx in transactions {
        months.insert(Month::of(tx.date));
    }

    months.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::testing::{at, bet_fixture, tx_fixture};
    use crate::models::{BetStatus, TransactionType};

    fn month(s: &str) -> Month {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_render() {
        assert_eq!(month("2025-03").to_string(), "2025-03");
        assert_eq!(Month::new(987, 1).unwrap().to_string(), "0987-01");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["2025-3", "2025-13", "2025-00", "25-03", "2025/03", "abcd-ef", "2025-03-01"] {
            assert!(
                matches!(bad.parse::<Month>(), Err(AppError::Validation(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_filter_sentinels() {
        assert_eq!(PeriodFilter::parse(None).unwrap(), PeriodFilter::AllTime);
        assert_eq!(PeriodFilter::parse(Some("all-time")).unwrap(), PeriodFilter::AllTime);
        assert_eq!(PeriodFilter::parse(Some("")).unwrap(), PeriodFilter::AllTime);
        assert_eq!(
            PeriodFilter::parse(Some("2025-03")).unwrap(),
            PeriodFilter::Month(month("2025-03"))
        );
    }

    #[test]
    fn test_bet_created_and_resolved_in_different_months() {
        let filter = PeriodFilter::Month(month("2025-03"));

        let mut spans = bet_fixture(10, 2, BetStatus::Won, at(2025, 2, 20));
        spans.resolved_at = Some(at(2025, 3, 2));
        assert!(filter.includes_bet(&spans));

        let mut april = bet_fixture(10, 2, BetStatus::Lost, at(2025, 4, 1));
        april.resolved_at = Some(at(2025, 4, 9));
        assert!(!filter.includes_bet(&april));

        // Also visible in the month it was opened
        assert!(PeriodFilter::Month(month("2025-02")).includes_bet(&spans));
    }

    #[test]
    fn test_pending_bet_uses_created_at_only() {
        let bet = bet_fixture(10, 2, BetStatus::Pending, at(2025, 1, 31));
        assert!(PeriodFilter::Month(month("2025-01")).includes_bet(&bet));
        assert!(!PeriodFilter::Month(month("2025-02")).includes_bet(&bet));
    }

    #[test]
    fn test_transaction_filter() {
        let tx = tx_fixture(TransactionType::Deposit, 50, at(2025, 3, 31));
        assert!(PeriodFilter::Month(month("2025-03")).includes_transaction(&tx));
        assert!(!PeriodFilter::Month(month("2025-04")).includes_transaction(&tx));
        assert!(PeriodFilter::AllTime.includes_transaction(&tx));
    }

    #[test]
    fn test_unique_months_descending() {
        let bets = vec![bet_fixture(10, 2, BetStatus::Pending, at(2025, 1, 5))];
        let txs = vec![
            tx_fixture(TransactionType::Deposit, 100, at(2025, 3, 1)),
            tx_fixture(TransactionType::Withdrawal, 20, at(2025, 1, 20)),
        ];

        let months: Vec<String> = unique_months(&bets, &txs)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(months, vec!["2025-03", "2025-01"]);
    }

    #[test]
    fn test_unique_months_includes_resolution_month() {
        let mut bet = bet_fixture(10, 2, BetStatus::Won, at(2024, 12, 30));
        bet.resolved_at = Some(at(2025, 1, 2));

        let months: Vec<String> = unique_months(&[bet], &[])
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(months, vec!["2025-01", "2024-12"]);
    }

    #[test]
    fn test_month_serializes_as_string() {
        let json = serde_json::to_string(&vec![month("2025-03")]).unwrap();
        assert_eq!(json, r#"["2025-03"]"#);
    }
}
