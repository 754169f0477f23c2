//! Profile commands - onboarding, profile view and edits, preferences and reset.
//!
//! Goals are derived from the profile on onboarding (Mifflin-St Jeor BMR times
//! the activity multiplier, and 35 ml of water per kg). Later edits recompute
//! BMI but leave the goals alone.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::choices::{ActivityChoice, GenderChoice, PreferenceChoice},
            format,
        },
        core::profile::{OnboardingInput, Preference, ProfileUpdate},
        errors::{Error, Result},
    };
    use std::fmt::Write;
    use tracing::info;

    /// Sets up your profile and daily goals.
    #[poise::command(slash_command, prefix_command)]
    #[allow(clippy::too_many_arguments)]
    pub async fn onboard(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Your name"] name: String,
        #[description = "Age in years"]
        #[min = 1]
        #[max = 120]
        age: u32,
        #[description = "Sex (used for the calorie formula)"] gender: GenderChoice,
        #[description = "Height in cm"] height: f64,
        #[description = "Weight in kg"] weight: f64,
        #[description = "How active you are"] activity: ActivityChoice,
        #[description = "Email (optional)"] email: Option<String>,
    ) -> Result<()> {
        let input = OnboardingInput {
            name,
            email: email.unwrap_or_default(),
            age,
            gender: gender.into(),
            height,
            weight,
            activity_level: activity.into(),
        };
        let owner_id = ctx.author().id.to_string();

        let response = {
            let mut session = ctx.data().session(&owner_id).await;
            match session.complete_onboarding(input).await {
                Ok(()) => {
                    let profile = session.profile();
                    let mut response = format!("✅ Welcome, {}!\n", profile.name);
                    writeln!(
                        &mut response,
                        "🎯 Daily goals: {} kcal • {} ml water",
                        profile.goal_calories, profile.goal_water
                    )?;
                    if let Some(category) = profile.bmi_category() {
                        writeln!(&mut response, "BMI {:.1} ({category})", profile.bmi)?;
                    }
                    response
                }
                Err(Error::InvalidProfile { message }) => format!("❌ {message}"),
                Err(e) => return Err(e),
            }
        };

        ctx.say(response).await?;
        Ok(())
    }

    /// Shows your profile, goals and preferences.
    #[poise::command(slash_command, prefix_command)]
    pub async fn profile(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let owner_id = ctx.author().id.to_string();
        let response = {
            let session = ctx.data().session(&owner_id).await;
            if session.is_onboarded() {
                format::format_profile(session.profile(), session.preferences())?
            } else {
                "👋 No profile yet. Run `/onboard` to set your goals.".to_string()
            }
        };

        ctx.say(response).await?;
        Ok(())
    }

    /// Edits your profile. Only the fields you give are changed.
    #[poise::command(slash_command, prefix_command)]
    #[allow(clippy::too_many_arguments)]
    pub async fn profile_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Weight in kg"] weight: Option<f64>,
        #[description = "Height in cm"] height: Option<f64>,
        #[description = "Age in years"]
        #[min = 1]
        #[max = 120]
        age: Option<u32>,
        #[description = "How active you are"] activity: Option<ActivityChoice>,
        #[description = "Calorie goal override (kcal)"] goal_calories: Option<u32>,
        #[description = "Water goal override (ml)"] goal_water: Option<u32>,
    ) -> Result<()> {
        let update = ProfileUpdate {
            name: None,
            age,
            height,
            weight,
            activity_level: activity.map(Into::into),
            goal_calories,
            goal_water,
        };
        let owner_id = ctx.author().id.to_string();

        let response = {
            let mut session = ctx.data().session(&owner_id).await;
            if session.is_onboarded() {
                let change = session.update_profile(update).await;
                let mut response = "✅ Profile updated\n".to_string();
                if change.weight_changed {
                    writeln!(
                        &mut response,
                        "⚖️ Weight recorded for today: {:.1} kg",
                        session.profile().weight
                    )?;
                }
                if change.bmi_recomputed {
                    writeln!(&mut response, "BMI is now {:.1}", session.profile().bmi)?;
                }
                response
            } else {
                "❌ No profile yet. Run `/onboard` first.".to_string()
            }
        };

        ctx.say(response).await?;
        Ok(())
    }

    /// Turns a dietary preference on or off.
    #[poise::command(slash_command, prefix_command)]
    pub async fn preference(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Preference to toggle"] preference: PreferenceChoice,
    ) -> Result<()> {
        let owner_id = ctx.author().id.to_string();
        let label = match preference {
            PreferenceChoice::Vegetarian => "Vegetarian",
            PreferenceChoice::GlutenFree => "Gluten free",
            PreferenceChoice::DairyFree => "Dairy free",
            PreferenceChoice::LowCarb => "Low carb",
        };

        let enabled = {
            let mut session = ctx.data().session(&owner_id).await;
            session.toggle_preference(Preference::from(preference)).await
        };

        let state = if enabled { "on" } else { "off" };
        ctx.say(format!("✅ {label} is now {state}")).await?;
        Ok(())
    }

    /// Deletes your profile, meals, water and history.
    #[poise::command(slash_command, prefix_command)]
    pub async fn reset(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let owner_id = ctx.author().id.to_string();
        {
            let mut session = ctx.data().session(&owner_id).await;
            session.reset().await;
        }
        info!("Reset all data for {}", owner_id);

        ctx.say("✅ All your data has been deleted. Run `/onboard` to start again.")
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
