use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Bet, BetStatus, NewBet, NewTransaction, Transaction};

/// Volatile store with the same contract as the Postgres tables.
#[derive(Debug, Default)]
pub struct MemoryStore {
    bets: RwLock<Vec<Bet>>,
    transactions: RwLock<Vec<Transaction>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_all_bets(&self) -> Vec<Bet> {
        let mut bets = self.bets.read().await.clone();
        bets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        bets
    }

    pub async fn get_bet_by_id(&self, id: Uuid) -> Option<Bet> {
        self.bets.read().await.iter().find(|b| b.id == id).cloned()
    }

    pub async fn insert_bet(&self, new_bet: &NewBet) -> Bet {
        let bet = Bet {
            id: Uuid::new_v4(),
            title: new_bet.title.clone(),
            category: new_bet.category.clone(),
            stake: new_bet.stake,
            odds: new_bet.odds,
            potential_winnings: new_bet.potential_winnings,
            status: BetStatus::Pending,
            created_at: Utc::now(),
            resolved_at: None,
            actual_winnings: None,
        };
        self.bets.write().await.push(bet.clone());
        bet
    }

    pub async fn update_bet(&self, bet: &Bet, expected: BetStatus) -> Option<Bet> {
        let mut bets = self.bets.write().await;
        let slot = bets
            .iter_mut()
            .find(|b| b.id == bet.id && b.status == expected)?;

        // id and created_at are owned by the store
        *slot = Bet {
            id: slot.id,
            created_at: slot.created_at,
            ..bet.clone()
        };
        Some(slot.clone())
    }

    pub async fn delete_bet(&self, id: Uuid) -> bool {
        let mut bets = self.bets.write().await;
        let before = bets.len();
        bets.retain(|b| b.id != id);
        bets.len() < before
    }

    pub async fn get_all_transactions(&self) -> Vec<Transaction> {
        let mut txs = self.transactions.read().await.clone();
        txs.sort_by(|a, b| b.date.cmp(&a.date));
        txs
    }

    pub async fn insert_transaction(&self, new_tx: &NewTransaction) -> Transaction {
        let tx = Transaction {
            id: Uuid::new_v4(),
            kind: new_tx.kind,
            amount: new_tx.amount,
            description: new_tx.description.clone(),
            date: new_tx.date,
        };
        self.transactions.write().await.push(tx.clone());
        tx
    }
}
