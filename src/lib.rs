pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod ledger;
pub mod metrics;
pub mod models;

use crate::config::AppConfig;
use crate::db::Store;
use crate::ledger::messages::Message;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: AppConfig,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}

impl AppState {
    /// Localized text for a successful mutation.
    pub fn render(&self, message: Message) -> String {
        message.render(self.config.locale, &self.config.currency_symbol)
    }
}
