use course_feedback::config::Config;
use course_feedback::db::{self, Storage};
use course_feedback::router::{AppState, app_router};
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::from_env()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        loglevel = %cfg.loglevel,
        secure_cookie = cfg.secure_cookie,
        default_secret = cfg.secret_key == Config::default().secret_key,
    );

    let pool = db::connect(&cfg.database_url).await?;
    let storage = Storage::new(pool);
    storage.init_schema().await?;
    info!("database schema ready");

    let addr = cfg.listen_addr();
    let state = AppState::new(storage, cfg);
    let app = app_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
