pub mod bet_repo;
pub mod memory;
pub mod transaction_repo;

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Bet, BetStatus, NewBet, NewTransaction, Transaction};
use memory::MemoryStore;

/// `DATABASE_URL` value selecting the in-memory store.
pub const MEMORY_URL: &str = "memory://";

pub async fn init_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    // Verify connectivity
    sqlx::query("SELECT 1").execute(&pool).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Persistence backend for bets and transactions.
///
/// Every call is one round trip. Reads return the whole table in display
/// order: bets by `created_at` descending, transactions by `date` descending.
#[derive(Clone)]
pub enum Store {
    Postgres(PgPool),
    Memory(Arc<MemoryStore>),
}

impl Store {
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        if database_url == MEMORY_URL {
            tracing::warn!("Using in-memory store, data is lost on restart");
            return Ok(Self::memory());
        }
        Ok(Store::Postgres(init_pool(database_url, max_connections).await?))
    }

    pub fn memory() -> Self {
        Store::Memory(Arc::new(MemoryStore::new()))
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        if let Store::Postgres(pool) = self {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        Ok(())
    }

    pub async fn get_all_bets(&self) -> anyhow::Result<Vec<Bet>> {
        match self {
            Store::Postgres(pool) => bet_repo::get_all_bets(pool).await,
            Store::Memory(mem) => Ok(mem.get_all_bets().await),
        }
    }

    pub async fn get_bet_by_id(&self, id: Uuid) -> anyhow::Result<Option<Bet>> {
        match self {
            Store::Postgres(pool) => bet_repo::get_bet_by_id(pool, id).await,
            Store::Memory(mem) => Ok(mem.get_bet_by_id(id).await),
        }
    }

    pub async fn insert_bet(&self, bet: &NewBet) -> anyhow::Result<Bet> {
        match self {
            Store::Postgres(pool) => bet_repo::insert_bet(pool, bet).await,
            Store::Memory(mem) => Ok(mem.insert_bet(bet).await),
        }
    }

    /// See [`bet_repo::update_bet`].
    pub async fn update_bet(&self, bet: &Bet, expected: BetStatus) -> anyhow::Result<Option<Bet>> {
        match self {
            Store::Postgres(pool) => bet_repo::update_bet(pool, bet, expected).await,
            Store::Memory(mem) => Ok(mem.update_bet(bet, expected).await),
        }
    }

    pub async fn delete_bet(&self, id: Uuid) -> anyhow::Result<bool> {
        match self {
            Store::Postgres(pool) => bet_repo::delete_bet(pool, id).await,
            Store::Memory(mem) => Ok(mem.delete_bet(id).await),
        }
    }

    pub async fn get_all_transactions(&self) -> anyhow::Result<Vec<Transaction>> {
        match self {
            Store::Postgres(pool) => transaction_repo::get_all_transactions(pool).await,
            Store::Memory(mem) => Ok(mem.get_all_transactions().await),
        }
    }

    pub async fn insert_transaction(&self, tx: &NewTransaction) -> anyhow::Result<Transaction> {
        match self {
            Store::Postgres(pool) => transaction_repo::insert_transaction(pool, tx).await,
            Store::Memory(mem) => Ok(mem.insert_transaction(tx).await),
        }
    }
}
