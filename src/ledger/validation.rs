use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{NewTransaction, TransactionType};

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 150;
pub const DESCRIPTION_MIN_CHARS: usize = 2;
pub const DESCRIPTION_MAX_CHARS: usize = 100;

/// Upper bound for any single money value (stake, cash-out, transaction).
/// Keeps every product and running total far inside `Decimal`'s range.
pub const MAX_AMOUNT: u64 = 1_000_000_000;
pub const MAX_ODDS: u64 = 10_000;

/// Editable terms of a bet, already parsed into typed values.
#[derive(Debug, Clone, PartialEq)]
pub struct BetTerms {
    pub title: String,
    pub category: String,
    pub stake: Decimal,
    pub odds: Decimal,
}

/// Bet create/edit form. Numeric fields arrive as text so that non-numeric
/// input is reported as a validation failure.
#[derive(Debug, Clone, Deserialize)]
pub struct BetForm {
    pub title: String,
    pub category: String,
    pub stake: String,
    pub odds: String,
}

impl BetForm {
    pub fn into_terms(self) -> Result<BetTerms, AppError> {
        let terms = BetTerms {
            title: self.title.trim().to_string(),
            category: self.category.trim().to_string(),
            stake: parse_decimal("stake", &self.stake)?,
            odds: parse_decimal("odds", &self.odds)?,
        };
        check_terms(&terms)?;
        Ok(terms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CashOutForm {
    pub cash_out_amount: String,
}

impl CashOutForm {
    pub fn amount(&self) -> Result<Decimal, AppError> {
        parse_decimal("cash-out amount", &self.cash_out_amount)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionForm {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: String,
    pub description: String,
    /// RFC 3339 timestamp or plain `YYYY-MM-DD` (midnight UTC).
    pub date: Option<String>,
}

impl TransactionForm {
    pub fn into_new_transaction(self) -> Result<NewTransaction, AppError> {
        let amount = parse_decimal("amount", &self.amount)?;
        if amount <= Decimal::ZERO {
            return Err(AppError::Validation("amount must be greater than 0".into()));
        }
        check_max_amount("amount", amount)?;

        let description = self.description.trim().to_string();
        check_length(
            "description",
            &description,
            DESCRIPTION_MIN_CHARS,
            DESCRIPTION_MAX_CHARS,
        )?;

        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => {
                return Err(AppError::Validation("transaction date is required".into()))
            }
            Some(raw) => parse_date(raw)?,
        };

        Ok(NewTransaction {
            kind: self.kind,
            amount,
            description,
            date,
        })
    }
}

/// Range checks shared by Create and Edit.
pub fn check_terms(terms: &BetTerms) -> Result<(), AppError> {
    check_length("title", &terms.title, TITLE_MIN_CHARS, TITLE_MAX_CHARS)?;
    if terms.category.trim().is_empty() {
        return Err(AppError::Validation("category is required".into()));
    }
    if terms.stake <= Decimal::ZERO {
        return Err(AppError::Validation("stake must be greater than 0".into()));
    }
    check_max_amount("stake", terms.stake)?;
    if terms.odds <= Decimal::ONE {
        return Err(AppError::Validation("odds must be greater than 1".into()));
    }
    if terms.odds > Decimal::from(MAX_ODDS) {
        return Err(AppError::Validation(format!("odds must be at most {MAX_ODDS}")));
    }
    Ok(())
}

pub fn check_max_amount(field: &str, amount: Decimal) -> Result<(), AppError> {
    if amount > Decimal::from(MAX_AMOUNT) {
        return Err(AppError::Validation(format!(
            "{field} must be at most {MAX_AMOUNT}"
        )));
    }
    Ok(())
}

pub fn parse_decimal(field: &str, raw: &str) -> Result<Decimal, AppError> {
    Decimal::from_str(raw.trim())
        .map_err(|_| AppError::Validation(format!("{field} must be a number, got '{raw}'")))
}

fn parse_date(raw: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| AppError::Validation(format!("invalid date '{raw}'")))
}

fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len < min {
        return Err(AppError::Validation(format!(
            "{field} must be at least {min} characters"
        )));
    }
    if len > max {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn form(title: &str, stake: &str, odds: &str) -> BetForm {
        BetForm {
            title: title.into(),
            category: "Tennis".into(),
            stake: stake.into(),
            odds: odds.into(),
        }
    }

    fn tx_form(amount: &str, description: &str, date: Option<&str>) -> TransactionForm {
        TransactionForm {
            kind: TransactionType::Deposit,
            amount: amount.into(),
            description: description.into(),
            date: date.map(Into::into),
        }
    }

    #[test]
    fn test_valid_bet_form() {
        let terms = form("  Nadal to win  ", "12.50", "1.85").into_terms().unwrap();
        assert_eq!(terms.title, "Nadal to win");
        assert_eq!(terms.stake, Decimal::new(1250, 2));
        assert_eq!(terms.odds, Decimal::new(185, 2));
    }

    #[test]
    fn test_non_numeric_stake_rejected() {
        let err = form("Nadal to win", "ten", "1.85").into_terms().unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("stake")));
    }

    #[test]
    fn test_out_of_range_terms_rejected() {
        for (stake, odds) in [
            ("0", "2"),
            ("-5", "2"),
            ("10", "1"),
            ("10", "0.5"),
            ("1000000000.01", "2"),
            ("10", "10000.5"),
            ("79228162514264337593543950335", "2"),
        ] {
            let result = form("Nadal to win", stake, odds).into_terms();
            assert!(matches!(result, Err(AppError::Validation(_))), "{stake}@{odds}");
        }
    }

    #[test]
    fn test_largest_accepted_terms() {
        let terms = form("Nadal to win", "1000000000", "10000").into_terms().unwrap();
        assert_eq!(terms.stake, Decimal::from(MAX_AMOUNT));
        assert_eq!(terms.odds, Decimal::from(MAX_ODDS));
    }

    #[test]
    fn test_title_length_bounds() {
        assert!(form("ab", "10", "2").into_terms().is_err());
        assert!(form("abc", "10", "2").into_terms().is_ok());
        assert!(form(&"x".repeat(151), "10", "2").into_terms().is_err());
        // Counted in characters, not bytes
        assert!(form("Añó", "10", "2").into_terms().is_ok());
    }

    #[test]
    fn test_blank_category_rejected() {
        let mut f = form("Nadal to win", "10", "2");
        f.category = "   ".into();
        assert!(matches!(f.into_terms(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_cash_out_amount_parsing() {
        let ok = CashOutForm { cash_out_amount: "0".into() };
        assert_eq!(ok.amount().unwrap(), Decimal::ZERO);

        let bad = CashOutForm { cash_out_amount: "lots".into() };
        assert!(matches!(bad.amount(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_transaction_form() {
        let tx = tx_form("100", "Initial deposit", Some("2025-03-04"))
            .into_new_transaction()
            .unwrap();
        assert_eq!(tx.amount, Decimal::from(100));
        assert_eq!(tx.date, Utc.with_ymd_and_hms(2025, 3, 4, 0, 0, 0).unwrap());

        let rfc = tx_form("5", "Picks", Some("2025-03-04T10:30:00+02:00"))
            .into_new_transaction()
            .unwrap();
        assert_eq!(rfc.date, Utc.with_ymd_and_hms(2025, 3, 4, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_transaction_form_rejections() {
        assert!(tx_form("0", "Deposit", Some("2025-03-04")).into_new_transaction().is_err());
        assert!(tx_form("abc", "Deposit", Some("2025-03-04")).into_new_transaction().is_err());
        assert!(tx_form("50000000000000000000000000000", "Deposit", Some("2025-03-04"))
            .into_new_transaction()
            .is_err());
        assert!(tx_form("10", "D", Some("2025-03-04")).into_new_transaction().is_err());
        assert!(tx_form("10", "Deposit", None).into_new_transaction().is_err());
        assert!(tx_form("10", "Deposit", Some("yesterday")).into_new_transaction().is_err());
    }
}
