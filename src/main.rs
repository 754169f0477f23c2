use aahar_buddy::{
    bot::{self, BotData},
    config::{database, tracker},
    core::rollover,
    errors::{Error, Result},
};
use dotenvy::dotenv;
use std::{env, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load tracker settings
    let config = tracker::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    let settings = config.tracker;
    info!(
        "Tracker settings: water goal {} ml, calorie goal {} kcal, rollover check every {}s",
        settings.default_water_goal_ml, settings.default_calorie_goal, settings.rollover_check_secs
    );

    // 4. Initialize database
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Watch for local midnight across every loaded session
    let data = BotData::new(db, settings.clone());
    let _watcher =
        rollover::spawn_rollover_watcher(Arc::clone(&data.sessions), settings.rollover_period());

    // 6. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(&token, data).await
}
