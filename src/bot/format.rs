//! Text rendering for bot replies.
//!
//! Every function here is pure: it takes engine values and returns the
//! Markdown a command sends, so the layout can be tested without Discord.

use crate::core::{
    catalog::{DailySpecial, FoodItem, MealSlot, MenuEntry},
    day::DayKey,
    nutrition::{DailySummary, format_progress_bar, percent_of_goal},
    profile::{Preferences, UserProfile},
    selection::{SelectionState, SelectionSummary},
    tracker::{LoggedMealEntry, Meals, WaterState},
};
use crate::errors::Result;
use chrono::Weekday;
use std::fmt::Write;

fn slot_emoji(slot: MealSlot) -> &'static str {
    match slot {
        MealSlot::Breakfast => "🍳",
        MealSlot::Lunch => "🍛",
        MealSlot::Snack => "🥟",
        MealSlot::Dinner => "🍽️",
    }
}

fn item_line(item: &FoodItem) -> String {
    let mut line = format!("{} - {} kcal", item.name, item.calories);
    if let Some(unit) = &item.unit {
        line.push_str(&format!(" / {unit}"));
    }
    if let Some(rating) = item.rating {
        line.push_str(&format!(" ⭐ {rating:.1}"));
    }
    line
}

fn picked_mark(selection: &SelectionState, slot: MealSlot, name: &str) -> &'static str {
    if selection.quantity(slot, name) > 0 { "☑️" } else { "⬜" }
}

/// Staples and the day's special for one slot, with current picks.
pub fn format_menu(
    slot: MealSlot,
    weekday: Weekday,
    entry: &MenuEntry<'_>,
    selection: &SelectionState,
    locked: bool,
) -> Result<String> {
    let mut response = format!("{} **{} menu - {}**\n", slot_emoji(slot), slot, weekday);
    if locked {
        writeln!(&mut response, "🔒 Already logged today")?;
    }
    writeln!(&mut response)?;

    if !entry.staples.is_empty() {
        writeln!(&mut response, "**Unlimited staples**")?;
        for staple in entry.staples {
            let quantity = selection.quantity(slot, &staple.name);
            writeln!(&mut response, "• {} ×{}", item_line(staple), quantity)?;
        }
        writeln!(&mut response)?;
    }

    match entry.special {
        None => writeln!(&mut response, "_No special today_")?,
        Some(special) => {
            let heading = match special {
                DailySpecial::Single { .. } => "Today's special",
                DailySpecial::Choice { .. } => "Today's special (veg or non-veg)",
                DailySpecial::Special { .. } => "Chef's special (veg or non-veg)",
                DailySpecial::ItemSet { .. } => "Today's dishes",
            };
            writeln!(&mut response, "**{heading}**")?;
            for dish in special.selectable() {
                writeln!(
                    &mut response,
                    "{} {}",
                    picked_mark(selection, slot, &dish.name),
                    item_line(dish)
                )?;
            }
            for extra in special.extras() {
                writeln!(&mut response, "  ➕ {} (served with it)", item_line(extra))?;
            }
        }
    }

    Ok(response)
}

/// Live totals of a pending selection.
pub fn format_selection(slot: MealSlot, summary: &SelectionSummary) -> Result<String> {
    if summary.item_count == 0 {
        return Ok(format!("🛒 Nothing selected for {slot} yet. Use `/pick` to add items."));
    }

    let mut response = format!("🛒 **{slot} selection**\n");
    writeln!(
        &mut response,
        "{} item(s) • {} kcal",
        summary.item_count, summary.total_calories
    )?;
    writeln!(
        &mut response,
        "Protein {:.1}g • Carbs {:.1}g • Fat {:.1}g",
        summary.total_protein, summary.total_carbs, summary.total_fat
    )?;
    Ok(response)
}

/// One logged entry, e.g. `Rice ×2 - 400 kcal (P 8.0g C 88.0g F 0.0g)`.
#[must_use]
pub fn format_entry(entry: &LoggedMealEntry) -> String {
    format!(
        "{} ×{} - {} kcal (P {:.1}g C {:.1}g F {:.1}g)",
        entry.name, entry.quantity, entry.calories, entry.protein, entry.carbs, entry.fat
    )
}

/// Every slot's log with 1-based positions for the edit commands.
pub fn format_meals(meals: &Meals) -> Result<String> {
    let mut response = String::from("📒 **Today's meals**\n");
    for (slot, entries) in meals.iter() {
        writeln!(&mut response, "\n{} **{}**", slot_emoji(slot), slot)?;
        if entries.is_empty() {
            writeln!(&mut response, "_Nothing logged_")?;
            continue;
        }
        for (position, entry) in entries.iter().enumerate() {
            writeln!(&mut response, "{}. {}", position + 1, format_entry(entry))?;
        }
    }
    Ok(response)
}

/// Water total, goal progress and the drink history (newest first).
pub fn format_water(water: &WaterState, goal_ml: u32, cap_ml: u32) -> Result<String> {
    let percent = percent_of_goal(f64::from(water.current), f64::from(goal_ml));
    let mut response = format!("💧 **Water: {} / {} ml**\n", water.current, goal_ml);
    writeln!(&mut response, "{}", format_progress_bar(percent, Some(10)))?;
    if water.current >= cap_ml {
        writeln!(&mut response, "Daily cap of {cap_ml} ml reached")?;
    }

    if water.history.is_empty() {
        writeln!(&mut response, "\n_No drinks logged today_")?;
    } else {
        writeln!(&mut response, "\n**History** (newest first)")?;
        for (position, entry) in water.history.iter().enumerate() {
            writeln!(
                &mut response,
                "{}. {} ml at {}",
                position + 1,
                entry.amount,
                entry.time
            )?;
        }
    }
    Ok(response)
}

/// Calorie, macro and water totals against the goals.
pub fn format_summary(summary: &DailySummary) -> Result<String> {
    let mut response = String::from("📊 **Today's summary**\n\n");
    writeln!(
        &mut response,
        "🔥 Calories: {} / {} kcal",
        summary.total_calories, summary.goal_calories
    )?;
    writeln!(
        &mut response,
        "{}",
        format_progress_bar(summary.calorie_percent, Some(10))
    )?;
    if summary.remaining_calories >= 0 {
        writeln!(&mut response, "{} kcal remaining", summary.remaining_calories)?;
    } else {
        writeln!(
            &mut response,
            "{} kcal over goal",
            summary.remaining_calories.unsigned_abs()
        )?;
    }
    writeln!(
        &mut response,
        "\nProtein {:.1}g • Carbs {:.1}g • Fat {:.1}g ({} item(s))",
        summary.total_protein, summary.total_carbs, summary.total_fat, summary.entry_count
    )?;
    writeln!(
        &mut response,
        "\n💧 Water: {} / {} ml",
        summary.water_ml, summary.goal_water_ml
    )?;
    writeln!(
        &mut response,
        "{}",
        format_progress_bar(summary.water_percent, Some(10))
    )?;
    Ok(response)
}

/// Water per day and recorded weights.
pub fn format_trend(water: &[(DayKey, u32)], weight: &[(DayKey, f64)]) -> Result<String> {
    let mut response = String::from("📈 **Water, last 7 days**\n");
    for (day, ml) in water {
        writeln!(&mut response, "{} {}: {} ml", day.weekday(), day, ml)?;
    }

    writeln!(&mut response, "\n⚖️ **Weight**")?;
    let recorded: Vec<&(DayKey, f64)> = weight.iter().filter(|(_, kg)| *kg > 0.0).collect();
    if recorded.is_empty() {
        writeln!(&mut response, "_No weight recorded yet_")?;
    }
    for (day, kg) in recorded {
        writeln!(&mut response, "{day}: {kg:.1} kg")?;
    }
    Ok(response)
}

/// Profile card with goals and preferences.
pub fn format_profile(profile: &UserProfile, preferences: &Preferences) -> Result<String> {
    let mut response = format!("👤 **{}**\n", profile.name);
    writeln!(
        &mut response,
        "Age {} • {:.0} cm • {:.1} kg • {}",
        profile.age,
        profile.height,
        profile.weight,
        profile.activity_level.label()
    )?;
    match profile.bmi_category() {
        Some(category) => writeln!(&mut response, "BMI {:.1} ({category})", profile.bmi)?,
        None => writeln!(&mut response, "BMI unknown")?,
    }
    writeln!(
        &mut response,
        "🎯 Goals: {} kcal • {} ml water",
        profile.goal_calories, profile.goal_water
    )?;

    let enabled: Vec<&str> = [
        (preferences.vegetarian, "Vegetarian"),
        (preferences.gluten_free, "Gluten free"),
        (preferences.dairy_free, "Dairy free"),
        (preferences.low_carb, "Low carb"),
    ]
    .into_iter()
    .filter_map(|(on, label)| on.then_some(label))
    .collect();
    if enabled.is_empty() {
        writeln!(&mut response, "🥗 Preferences: none")?;
    } else {
        writeln!(&mut response, "🥗 Preferences: {}", enabled.join(", "))?;
    }
    Ok(response)
}
