//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for `AaharBuddy`: slash commands,
//! autocomplete handlers, the shared bot context and framework start-up.
//! Every command is a thin adapter onto a per-user [`Session`].

/// Discord command implementations (profile, water, mess, meals, general)
pub mod commands;
/// Text rendering shared by several commands
pub mod format;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    config::tracker::TrackerSettings,
    core::{
        catalog::Catalog,
        day::SystemClock,
        rollover::{self, SessionMap},
        session::Session,
        store::SqliteStore,
    },
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};
use tracing::{error, info};

/// Session type the bot keeps per Discord user.
pub type UserSession = Session<SqliteStore, SystemClock>;

/// Shared data available to all bot commands.
/// Holds the database connection, the menu, the tracker settings and every
/// loaded user session.
pub struct BotData {
    /// Database connection backing every user's snapshots
    pub database: DatabaseConnection,
    /// Weekly mess menu
    pub catalog: Arc<Catalog>,
    /// Tracker settings from config.toml
    pub settings: TrackerSettings,
    /// Loaded sessions keyed by Discord user ID
    pub sessions: SessionMap<SqliteStore>,
}

impl BotData {
    /// Creates a new `BotData` with no sessions loaded yet.
    #[must_use]
    pub fn new(database: DatabaseConnection, settings: TrackerSettings) -> Self {
        Self {
            database,
            catalog: Arc::new(Catalog::mess()),
            settings,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Locks and returns `owner_id`'s session, loading it from the database on
    /// first use. The lock covers every session, so one command runs at a time.
    pub async fn session(&self, owner_id: &str) -> MappedMutexGuard<'_, UserSession> {
        let mut sessions = self.sessions.lock().await;
        if !sessions.contains_key(owner_id) {
            let session = Session::load(
                SqliteStore::new(self.database.clone(), owner_id),
                SystemClock,
                self.settings.clone(),
                Arc::clone(&self.catalog),
            )
            .await;
            info!("Loaded session for {}", owner_id);
            sessions.insert(owner_id.to_string(), session);
        }

        MutexGuard::map(sessions, |sessions| {
            sessions.entry(owner_id.to_string()).or_insert_with(|| {
                Session::new(
                    SqliteStore::new(self.database.clone(), owner_id),
                    SystemClock,
                    self.settings.clone(),
                    Arc::clone(&self.catalog),
                )
            })
        })
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("❌ An error occurred: {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Builds the poise framework with every command registered and the
/// day-boundary check hooked in before each command.
pub fn build_framework(data: BotData) -> poise::Framework<BotData, Error> {
    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            pre_command: |ctx| {
                Box::pin(async move {
                    let owner_id = ctx.author().id.to_string();
                    let mut session = ctx.data().session(&owner_id).await;
                    if let Some(rollover) = session.on_foreground().await {
                        info!("{}", rollover::format_rollover_summary(&owner_id, &rollover));
                    }
                })
            },
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build()
}

/// Connects to Discord and runs until the client stops.
///
/// # Errors
/// Returns [`Error::Discord`] if the client cannot be created or the gateway
/// connection fails.
pub async fn run_bot(token: &str, data: BotData) -> Result<()> {
    let framework = build_framework(data);
    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {}", e))?;
    Ok(())
}

pub use commands::*;
pub use handlers::*;
