//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't touch a user session
//! and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**AaharBuddy Help**\n\
        Track mess meals, water and calories against your daily goals.\n\n\
        **Getting Started**\n\
        • `/onboard <name> <age> <gender> <height> <weight> <activity>` - Sets up your profile and goals.\n\
        • `/profile` - Shows your profile, BMI and goals.\n\
        • `/profile_edit [weight] [height] [age] [activity]` - Updates your profile.\n\
        • `/preference <preference>` - Toggles a dietary preference.\n\n\
        **Mess Menu**\n\
        • `/menu [slot] [day]` - Shows the menu for a meal.\n\
        • `/pick <slot> <item> [quantity] [day]` - Sets a staple quantity or toggles one of today's specials.\n\
        • `/adjust <slot> <item> <delta> [day]` - Steps a staple's servings up or down.\n\
        • `/selection <slot> [day]` - Shows totals for what you have picked.\n\
        • `/confirm <slot>` - Logs today's picks (once per meal per day).\n\n\
        **Meal Log**\n\
        • `/log_food <slot> <name> <calories> [protein] [carbs] [fat] [quantity]` - Logs any food.\n\
        • `/meals` - Lists today's logged meals.\n\
        • `/meal_remove`, `/meal_quantity`, `/meal_clear` - Edit the log.\n\n\
        **Water & Reports**\n\
        • `/water add <ml>`, `/water remove <number>`, `/water status` - Track water.\n\
        • `/summary` - Calories, macros and water against your goals.\n\
        • `/trend` - Water over the last 7 days and recent weight.\n\n\
        **Utility Commands**\n\
        • `/reset` - Deletes all your data.\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.\n\n\
        Counters reset automatically at local midnight.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
