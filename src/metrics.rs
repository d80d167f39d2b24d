use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::ledger::lifecycle::{Outcome, Transition};
use crate::models::TransactionType;

/// Install the Prometheus exporter as the global recorder and register all
/// application metrics. The returned handle renders the scrape payload.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    register_counters();
    Ok(handle)
}

/// Handle backed by a recorder that is not installed globally. Renders an
/// empty payload; used where several app instances share one process.
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}

// Pre-register counters so they appear even before the first increment.
fn register_counters() {
    counter!("bets_created_total").absolute(0);
    counter!("bets_deleted_total").absolute(0);

    for transition in [
        Transition::Edit,
        Transition::Resolve(Outcome::Won),
        Transition::Resolve(Outcome::Lost),
        Transition::Void,
        Transition::CashOut,
        Transition::Reopen,
    ] {
        counter!("bet_transitions_total", "transition" => transition.as_str()).absolute(0);
    }

    for kind in [
        TransactionType::Deposit,
        TransactionType::Withdrawal,
        TransactionType::PicksPurchase,
    ] {
        counter!("transactions_created_total", "type" => kind.to_string()).absolute(0);
    }
}
