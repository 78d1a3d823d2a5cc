use adapt_ai::config::AppConfig;
use adapt_ai::routes::configure_routes;
use adapt_ai::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("adapt_ai=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let state = AppState::from_config(&config)?;
    let routes = configure_routes(state);

    let addr = config.bind_addr();
    tracing::info!(%addr, model = %config.model, "starting server");
    warp::serve(routes).run(addr).await;

    Ok(())
}
