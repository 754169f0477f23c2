//! Meal log commands - free-form food entries, edits, the daily summary and trends.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::{choices::MealChoice, position_to_index},
            format,
        },
        core::{
            catalog::{FoodItem, MealSlot},
            tracker::LoggedMealEntry,
        },
        errors::{Error, Result},
    };

    /// Days shown by `/trend`.
    const TREND_DAYS: u32 = 7;

    /// Logs a food that is not on the mess menu.
    #[poise::command(slash_command, prefix_command)]
    #[allow(clippy::too_many_arguments)]
    pub async fn log_food(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Meal"] slot: MealChoice,
        #[description = "Food name"] name: String,
        #[description = "Calories per serving (kcal)"]
        #[max = 5000]
        calories: u32,
        #[description = "Protein per serving (g)"] protein: Option<f64>,
        #[description = "Carbs per serving (g)"] carbs: Option<f64>,
        #[description = "Fat per serving (g)"] fat: Option<f64>,
        #[description = "Servings (default 1)"]
        #[min = 1]
        #[max = 20]
        quantity: Option<u32>,
    ) -> Result<()> {
        let slot = MealSlot::from(slot);
        let name = name.trim().to_string();
        if name.is_empty() {
            ctx.say("❌ Food name must not be empty").await?;
            return Ok(());
        }

        let food = FoodItem {
            name,
            calories,
            protein: protein.unwrap_or(0.0).max(0.0),
            carbs: carbs.unwrap_or(0.0).max(0.0),
            fat: fat.unwrap_or(0.0).max(0.0),
            unit: None,
            unlimited: false,
            rating: None,
        };
        let entry = LoggedMealEntry::from_food(&food, quantity.unwrap_or(1).max(1));
        let owner_id = ctx.author().id.to_string();

        let response = {
            let mut session = ctx.data().session(&owner_id).await;
            let line = format::format_entry(&entry);
            session.add_food(slot, entry).await;
            format!("✅ Added to {slot}: {line}")
        };

        ctx.say(response).await?;
        Ok(())
    }

    /// Lists today's logged meals.
    #[poise::command(slash_command, prefix_command)]
    pub async fn meals(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let owner_id = ctx.author().id.to_string();
        let response = {
            let session = ctx.data().session(&owner_id).await;
            format::format_meals(session.tracker().meals())?
        };

        ctx.say(response).await?;
        Ok(())
    }

    /// Removes one logged entry.
    #[poise::command(slash_command, prefix_command)]
    pub async fn meal_remove(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Meal"] slot: MealChoice,
        #[description = "Entry number from /meals"] number: u32,
    ) -> Result<()> {
        let slot = MealSlot::from(slot);
        let owner_id = ctx.author().id.to_string();

        let response = {
            let mut session = ctx.data().session(&owner_id).await;
            let removed = match position_to_index(number) {
                Some(index) => session.remove_meal_item(slot, index).await,
                None => None,
            };
            removed.map_or_else(
                || format!("❌ No entry #{number} in {slot}. Use `/meals` to see the list."),
                |entry| format!("✅ Removed {} from {slot}", entry.name),
            )
        };

        ctx.say(response).await?;
        Ok(())
    }

    /// Changes the servings of a logged entry; calories and macros rescale.
    #[poise::command(slash_command, prefix_command)]
    pub async fn meal_quantity(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Meal"] slot: MealChoice,
        #[description = "Entry number from /meals"] number: u32,
        #[description = "New servings"]
        #[min = 1]
        #[max = 20]
        quantity: u32,
    ) -> Result<()> {
        let slot = MealSlot::from(slot);
        let owner_id = ctx.author().id.to_string();

        let response = {
            let mut session = ctx.data().session(&owner_id).await;
            let updated = match position_to_index(number) {
                Some(index) => session.update_meal_quantity(slot, index, quantity).await,
                None => false,
            };
            let entry = position_to_index(number)
                .filter(|_| updated)
                .and_then(|index| session.tracker().meals().get(slot).get(index));
            match entry {
                Some(entry) => format!("✅ Updated {slot}: {}", format::format_entry(entry)),
                None => format!("❌ Could not update entry #{number} in {slot}"),
            }
        };

        ctx.say(response).await?;
        Ok(())
    }

    /// Empties one meal's log.
    #[poise::command(slash_command, prefix_command)]
    pub async fn meal_clear(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Meal"] slot: MealChoice,
    ) -> Result<()> {
        let slot = MealSlot::from(slot);
        let owner_id = ctx.author().id.to_string();

        let response = {
            let mut session = ctx.data().session(&owner_id).await;
            let count = session.tracker().meals().get(slot).len();
            session.clear_meal(slot).await;
            let noun = if count == 1 { "entry" } else { "entries" };
            format!("✅ Cleared {count} {noun} from {slot}")
        };

        ctx.say(response).await?;
        Ok(())
    }

    /// Shows today's calories, macros and water against your goals.
    #[poise::command(slash_command, prefix_command)]
    pub async fn summary(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let owner_id = ctx.author().id.to_string();
        let response = {
            let session = ctx.data().session(&owner_id).await;
            format::format_summary(&session.daily_summary())?
        };

        ctx.say(response).await?;
        Ok(())
    }

    /// Shows water and weight over the last week.
    #[poise::command(slash_command, prefix_command)]
    pub async fn trend(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let owner_id = ctx.author().id.to_string();
        let response = {
            let session = ctx.data().session(&owner_id).await;
            let water = session.water_trend(TREND_DAYS);
            let weight = session.weight_trend(TREND_DAYS as usize);
            format::format_trend(&water, &weight)?
        };

        ctx.say(response).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
