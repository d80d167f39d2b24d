use bankroll::api::router::create_router;
use bankroll::config::AppConfig;
use bankroll::db::Store;
use bankroll::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("Connecting to store...");
    let store = Store::connect(&config.database_url, config.db_max_connections).await?;
    tracing::info!("Store ready");

    let metrics_handle = bankroll::metrics::init_metrics()?;

    tracing::info!(
        locale = ?config.locale,
        currency = %config.currency_symbol,
        "Ledger configured"
    );

    let state = AppState {
        store,
        config,
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());

    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
