use std::env;

use crate::ledger::messages::Locale;

const DEFAULT_CURRENCY_SYMBOL: &str = "€";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres connection string, or `memory://` for the volatile store.
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,

    // Presentation
    pub locale: Locale,
    pub currency_symbol: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let locale_raw = env::var("LOCALE").unwrap_or_else(|_| "en".into());
        let locale = Locale::from_tag(&locale_raw).unwrap_or_else(|| {
            tracing::warn!(locale = %locale_raw, "Unknown LOCALE, falling back to en");
            Locale::En
        });

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .unwrap_or(10),

            locale,
            currency_symbol: env::var("CURRENCY_SYMBOL")
                .unwrap_or_else(|_| DEFAULT_CURRENCY_SYMBOL.into()),
        })
    }

    /// Config for the in-memory store, used by local runs and tests.
    pub fn in_memory() -> Self {
        Self {
            database_url: crate::db::MEMORY_URL.into(),
            host: "127.0.0.1".into(),
            port: 0,
            db_max_connections: 1,
            locale: Locale::En,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.into(),
        }
    }
}
