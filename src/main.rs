use tracing_subscriber::EnvFilter;
use tutorhub::{AppState, app, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tutorhub=debug,tower_http=debug".into()),
        )
        .init();

    let db_pool = db::connect(dotenv::var("DATABASE_URL")?.as_str()).await?;
    let addr = dotenv::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {addr}");
    axum::serve(listener, app(AppState { db_pool })).await?;

    Ok(())
}
