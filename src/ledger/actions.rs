//! Write paths: load the current record, apply a lifecycle transition, persist.
//!
//! Nothing is reported as updated unless the store accepted the write.

use chrono::Utc;
use metrics::counter;
use uuid::Uuid;

use crate::db::Store;
use crate::errors::AppError;
use crate::ledger::lifecycle::{self, Outcome, Transition};
use crate::ledger::validation::{BetForm, CashOutForm, TransactionForm};
use crate::models::{Bet, Transaction};

pub async fn load_bet(store: &Store, id: Uuid) -> Result<Bet, AppError> {
    store
        .get_bet_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("bet {id} not found")))
}

pub async fn create_bet(store: &Store, form: BetForm) -> Result<Bet, AppError> {
    let new_bet = lifecycle::create(form.into_terms()?)?;
    let bet = store.insert_bet(&new_bet).await?;

    counter!("bets_created_total").increment(1);
    tracing::info!(
        bet_id = %bet.id,
        category = %bet.category,
        stake = %bet.stake,
        odds = %bet.odds,
        "Bet created"
    );
    Ok(bet)
}

pub async fn edit_bet(store: &Store, id: Uuid, form: BetForm) -> Result<Bet, AppError> {
    let terms = form.into_terms()?;
    apply(store, id, Transition::Edit, |bet| lifecycle::edit(bet, terms)).await
}

pub async fn resolve_bet(store: &Store, id: Uuid, outcome: Outcome) -> Result<Bet, AppError> {
    let now = Utc::now();
    apply(store, id, Transition::Resolve(outcome), |bet| {
        lifecycle::resolve(bet, outcome, now)
    })
    .await
}

pub async fn void_bet(store: &Store, id: Uuid) -> Result<Bet, AppError> {
    let now = Utc::now();
    apply(store, id, Transition::Void, |bet| lifecycle::void(bet, now)).await
}

pub async fn cash_out_bet(store: &Store, id: Uuid, form: CashOutForm) -> Result<Bet, AppError> {
    let amount = form.amount()?;
    let now = Utc::now();
    apply(store, id, Transition::CashOut, |bet| {
        lifecycle::cash_out(bet, amount, now)
    })
    .await
}

pub async fn reopen_bet(store: &Store, id: Uuid) -> Result<Bet, AppError> {
    apply(store, id, Transition::Reopen, lifecycle::reopen).await
}

pub async fn delete_bet(store: &Store, id: Uuid) -> Result<(), AppError> {
    if !store.delete_bet(id).await? {
        return Err(AppError::NotFound(format!("bet {id} not found")));
    }

    counter!("bets_deleted_total").increment(1);
    tracing::info!(bet_id = %id, "Bet deleted");
    Ok(())
}

pub async fn create_transaction(store: &Store, form: TransactionForm) -> Result<Transaction, AppError> {
    let new_tx = form.into_new_transaction()?;
    let tx = store.insert_transaction(&new_tx).await?;

    counter!("transactions_created_total", "type" => tx.kind.to_string()).increment(1);
    tracing::info!(
        transaction_id = %tx.id,
        kind = %tx.kind,
        amount = %tx.amount,
        "Transaction created"
    );
    Ok(tx)
}

async fn apply<F>(store: &Store, id: Uuid, transition: Transition, f: F) -> Result<Bet, AppError>
where
    F: FnOnce(&Bet) -> Result<Bet, AppError>,
{
    let current = load_bet(store, id).await?;
    let next = f(&current)?;

    let saved = match store.update_bet(&next, current.status).await? {
        Some(saved) => saved,
        None => return Err(lost_race(store, id).await),
    };

    counter!("bet_transitions_total", "transition" => transition.as_str()).increment(1);
    tracing::info!(
        bet_id = %id,
        transition = transition.as_str(),
        from = %current.status,
        to = %saved.status,
        actual_winnings = ?saved.actual_winnings,
        "Bet transition applied"
    );
    Ok(saved)
}

/// The guarded update matched nothing: the bet was deleted or changed status
/// between the read and the write.
async fn lost_race(store: &Store, id: Uuid) -> AppError {
    match store.get_bet_by_id(id).await {
        Ok(None) => AppError::NotFound(format!("bet {id} not found")),
        Ok(Some(bet)) => {
            tracing::warn!(bet_id = %id, status = %bet.status, "Concurrent bet update detected");
            AppError::State(format!(
                "bet {id} was changed to {} by another request; refresh and retry",
                bet.status
            ))
        }
        Err(e) => AppError::Backend(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BetStatus;
    use rust_decimal::Decimal;

    fn form(stake: &str, odds: &str) -> BetForm {
        BetForm {
            title: "Verstappen pole".into(),
            category: "Motorsport".into(),
            stake: stake.into(),
            odds: odds.into(),
        }
    }

    #[tokio::test]
    async fn test_create_then_resolve_persists() {
        let store = Store::memory();
        let bet = create_bet(&store, form("10", "2.5")).await.unwrap();
        assert_eq!(bet.status, BetStatus::Pending);
        assert_eq!(bet.potential_winnings, Decimal::from(25));

        let won = resolve_bet(&store, bet.id, Outcome::Won).await.unwrap();
        let stored = load_bet(&store, bet.id).await.unwrap();
        assert_eq!(stored, won);
        assert_eq!(stored.actual_winnings, Some(Decimal::from(25)));
    }

    #[tokio::test]
    async fn test_invalid_form_writes_nothing() {
        let store = Store::memory();
        let result = create_bet(&store, form("0", "2")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(store.get_all_bets().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_transition_leaves_record_untouched() {
        let store = Store::memory();
        let bet = create_bet(&store, form("10", "2")).await.unwrap();
        let voided = void_bet(&store, bet.id).await.unwrap();

        let again = cash_out_bet(
            &store,
            bet.id,
            CashOutForm { cash_out_amount: "4".into() },
        )
        .await;
        assert!(matches!(again, Err(AppError::State(_))));
        assert_eq!(load_bet(&store, bet.id).await.unwrap(), voided);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let store = Store::memory();
        let id = Uuid::new_v4();
        assert!(matches!(void_bet(&store, id).await, Err(AppError::NotFound(_))));
        assert!(matches!(delete_bet(&store, id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_stale_status_reported_as_state_error() {
        let store = Store::memory();
        let bet = create_bet(&store, form("10", "2")).await.unwrap();
        resolve_bet(&store, bet.id, Outcome::Lost).await.unwrap();

        // A write validated against the old Pending status must not land
        let stale = lifecycle::void(&bet, Utc::now()).unwrap();
        assert!(store.update_bet(&stale, BetStatus::Pending).await.unwrap().is_none());
        assert!(matches!(lost_race(&store, bet.id).await, AppError::State(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_from_listing() {
        let store = Store::memory();
        let keep = create_bet(&store, form("10", "2")).await.unwrap();
        let gone = create_bet(&store, form("5", "3")).await.unwrap();

        delete_bet(&store, gone.id).await.unwrap();

        let ids: Vec<Uuid> = store.get_all_bets().await.unwrap().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![keep.id]);
    }
}
