use sqlx::PgPool;

use crate::models::{NewTransaction, Transaction};

/// All transactions, most recent date first.
pub async fn get_all_transactions(pool: &PgPool) -> anyhow::Result<Vec<Transaction>> {
    let txs = sqlx::query_as::<_, Transaction>("SELECT * FROM transactions ORDER BY date DESC")
        .fetch_all(pool)
        .await?;

    Ok(txs)
}

pub async fn insert_transaction(pool: &PgPool, tx: &NewTransaction) -> anyhow::Result<Transaction> {
    let created = sqlx::query_as::<_, Transaction>(
        r#"
        INSERT INTO transactions (type, amount, description, date)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(tx.kind)
    .bind(tx.amount)
    .bind(&tx.description)
    .bind(tx.date)
    .fetch_one(pool)
    .await?;

    Ok(created)
}
