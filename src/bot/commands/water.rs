//! Water tracking commands - `/water add`, `/water remove` and `/water status`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, format},
        errors::{Error, Result},
    };

    /// Tracks water intake.
    #[poise::command(
        slash_command,
        prefix_command,
        subcommands("water_add", "water_remove", "water_status"),
        subcommand_required
    )]
    pub async fn water(_ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        Ok(())
    }

    /// Logs a drink.
    #[poise::command(slash_command, prefix_command, rename = "add")]
    pub async fn water_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Amount in ml"]
        #[min = 1]
        #[max = 5000]
        amount: u32,
    ) -> Result<()> {
        let owner_id = ctx.author().id.to_string();
        let response = {
            let mut session = ctx.data().session(&owner_id).await;
            if session.add_water(amount).await {
                let water = session.tracker().water();
                format!(
                    "💧 Added {amount} ml. Today: {} / {} ml",
                    water.current,
                    session.water_goal()
                )
            } else if amount == 0 {
                "❌ Amount must be greater than zero".to_string()
            } else {
                format!(
                    "❌ Daily water cap of {} ml already reached",
                    session.water_cap()
                )
            }
        };

        ctx.say(response).await?;
        Ok(())
    }

    /// Removes a drink by its number in `/water status` (1 = most recent).
    #[poise::command(slash_command, prefix_command, rename = "remove")]
    pub async fn water_remove(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Drink number from /water status (1 = most recent)"]
        #[min = 1]
        number: u32,
    ) -> Result<()> {
        let owner_id = ctx.author().id.to_string();
        let response = {
            let mut session = ctx.data().session(&owner_id).await;
            let removed = match crate::bot::commands::position_to_index(number) {
                Some(index) => session.remove_water(index).await,
                None => None,
            };
            match removed {
                Some(entry) => format!(
                    "✅ Removed {} ml logged at {}. Today: {} ml",
                    entry.amount,
                    entry.time,
                    session.tracker().water().current
                ),
                None => format!(
                    "❌ No drink #{number}. Use `/water status` to see today's drinks."
                ),
            }
        };

        ctx.say(response).await?;
        Ok(())
    }

    /// Shows today's water total and drink history.
    #[poise::command(slash_command, prefix_command, rename = "status")]
    pub async fn water_status(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let owner_id = ctx.author().id.to_string();
        let response = {
            let session = ctx.data().session(&owner_id).await;
            format::format_water(
                session.tracker().water(),
                session.water_goal(),
                session.water_cap(),
            )?
        };

        ctx.say(response).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
