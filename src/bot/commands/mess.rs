//! Mess menu commands - browse the weekly menu, pick items and commit a meal.
//!
//! Picks are held in the user's pending selection until `/confirm` logs them.
//! A meal that was already confirmed today cannot be re-picked on today's menu.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::choices::{DayChoice, MealChoice, weekday_or},
            format,
            handlers::autocomplete,
        },
        core::{catalog::MealSlot, nutrition, session::PickOutcome},
        errors::{Error, Result},
    };
    use chrono::Weekday;
    use std::fmt::Write;

    /// Shows the menu for a meal slot.
    ///
    /// Defaults to today's lunch. Items already picked are ticked.
    #[poise::command(slash_command, prefix_command)]
    pub async fn menu(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Meal (default: lunch)"] slot: Option<MealChoice>,
        #[description = "Day of the week (default: today)"] day: Option<DayChoice>,
    ) -> Result<()> {
        let slot = slot.map_or(MealSlot::Lunch, MealSlot::from);
        let owner_id = ctx.author().id.to_string();

        let response = {
            let session = ctx.data().session(&owner_id).await;
            let today = session.today();
            let weekday = weekday_or(day, today.weekday());
            let entry = session.menu(slot, weekday);
            let locked = session.tracker().is_locked(today, slot, weekday);
            format::format_menu(slot, weekday, &entry, session.tracker().selection(), locked)?
        };

        ctx.say(response).await?;
        Ok(())
    }

    /// Picks an item: sets a staple's quantity or toggles a special dish.
    #[poise::command(slash_command, prefix_command)]
    pub async fn pick(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Meal"] slot: MealChoice,
        #[description = "Item on the menu"]
        #[autocomplete = "autocomplete::autocomplete_menu_item"]
        item: String,
        #[description = "Servings for staples (default 1, 0 removes)"]
        #[min = 0]
        #[max = 20]
        quantity: Option<i64>,
        #[description = "Day of the week (default: today)"] day: Option<DayChoice>,
    ) -> Result<()> {
        let slot = MealSlot::from(slot);
        let owner_id = ctx.author().id.to_string();

        let response = {
            let mut session = ctx.data().session(&owner_id).await;
            let weekday = weekday_or(day, session.today().weekday());
            let outcome = session.pick(slot, weekday, &item, quantity).await;
            describe_pick(outcome, slot, weekday, &item)
        };

        ctx.say(response).await?;
        Ok(())
    }

    /// Steps a staple's servings up or down, e.g. `+1` or `-2`.
    #[poise::command(slash_command, prefix_command)]
    pub async fn adjust(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Meal"] slot: MealChoice,
        #[description = "Staple on the menu"]
        #[autocomplete = "autocomplete::autocomplete_menu_item"]
        item: String,
        #[description = "Servings to add (negative removes)"] delta: i64,
        #[description = "Day of the week (default: today)"] day: Option<DayChoice>,
    ) -> Result<()> {
        let slot = MealSlot::from(slot);
        let owner_id = ctx.author().id.to_string();

        let response = {
            let mut session = ctx.data().session(&owner_id).await;
            let weekday = weekday_or(day, session.today().weekday());
            let outcome = session.adjust_pick(slot, weekday, &item, delta).await;
            describe_pick(outcome, slot, weekday, &item)
        };

        ctx.say(response).await?;
        Ok(())
    }

    fn describe_pick(outcome: PickOutcome, slot: MealSlot, weekday: Weekday, item: &str) -> String {
        match outcome {
            PickOutcome::Unknown => format!(
                "❌ '{item}' is not on the {slot} menu for {weekday}. Use `/menu` to see it."
            ),
            PickOutcome::Locked => {
                format!("🔒 {slot} is already logged for today. Pick from another day's menu.")
            }
            PickOutcome::NotToday => {
                format!("❌ Specials can only be picked from today's {slot} menu")
            }
            PickOutcome::NotStaple => {
                format!("❌ {item} is a special dish. Use `/pick` to pick or un-pick it.")
            }
            PickOutcome::Quantity(0) => format!("✅ Removed {item} from {slot}"),
            PickOutcome::Quantity(n) => format!("✅ {item} ×{n} for {slot}"),
            PickOutcome::Toggled(true) => format!("✅ Picked {item} for {slot}"),
            PickOutcome::Toggled(false) => format!("✅ Un-picked {item} from {slot}"),
        }
    }

    /// Shows the calorie and macro totals of the pending selection.
    #[poise::command(slash_command, prefix_command)]
    pub async fn selection(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Meal"] slot: MealChoice,
        #[description = "Day of the week (default: today)"] day: Option<DayChoice>,
    ) -> Result<()> {
        let slot = MealSlot::from(slot);
        let owner_id = ctx.author().id.to_string();

        let response = {
            let session = ctx.data().session(&owner_id).await;
            let weekday = weekday_or(day, session.today().weekday());
            let summary = session.selection_summary(slot, weekday);
            format::format_selection(slot, &summary)?
        };

        ctx.say(response).await?;
        Ok(())
    }

    /// Logs today's picks for a meal. Each meal can be confirmed once per day.
    #[poise::command(slash_command, prefix_command)]
    pub async fn confirm(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Meal"] slot: MealChoice,
    ) -> Result<()> {
        let slot = MealSlot::from(slot);
        let owner_id = ctx.author().id.to_string();

        let response = {
            let mut session = ctx.data().session(&owner_id).await;
            if *session.tracker().booked().get(slot) {
                format!("🔒 {slot} is already logged for today")
            } else if let Some(items) = session.confirm_meal(slot).await {
                let mut response = format!("✅ **Logged {slot}**\n");
                for item in &items {
                    writeln!(&mut response, "• {}", format::format_entry(item))?;
                }
                writeln!(
                    &mut response,
                    "\nTotal: {} kcal • Today: {} / {} kcal",
                    nutrition::entries_calories(&items),
                    nutrition::total_calories(session.tracker().meals()),
                    session.calorie_goal()
                )?;
                response
            } else {
                format!("❌ Nothing picked for {slot} on today's menu. Use `/pick` first.")
            }
        };

        ctx.say(response).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
