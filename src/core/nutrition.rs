//! Nutrition aggregation.
//!
//! Pure functions over logged entries. Nothing here holds state: every figure
//! shown to the user is re-derived from the meal log on each read, so the
//! displayed totals cannot drift from what was actually logged.

use crate::core::tracker::{LoggedMealEntry, Meals, WaterState};

/// A macronutrient column of [`LoggedMealEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Macro {
    /// Protein (g)
    Protein,
    /// Carbohydrates (g)
    Carbs,
    /// Fat (g)
    Fat,
}

impl Macro {
    /// Reads this macro from an entry.
    #[must_use]
    pub const fn of(self, entry: &LoggedMealEntry) -> f64 {
        match self {
            Self::Protein => entry.protein,
            Self::Carbs => entry.carbs,
            Self::Fat => entry.fat,
        }
    }
}

/// Calories across a flat list of entries.
#[must_use]
pub fn entries_calories(entries: &[LoggedMealEntry]) -> u32 {
    entries
        .iter()
        .fold(0_u32, |sum, entry| sum.saturating_add(entry.calories))
}

/// One macro summed across a flat list of entries.
#[must_use]
pub fn entries_macro(entries: &[LoggedMealEntry], key: Macro) -> f64 {
    entries.iter().map(|entry| key.of(entry)).sum()
}

/// Calories across every slot.
#[must_use]
pub fn total_calories(meals: &Meals) -> u32 {
    meals
        .iter()
        .fold(0_u32, |sum, (_, entries)| sum.saturating_add(entries_calories(entries)))
}

/// One macro across every slot.
#[must_use]
pub fn total_macro(meals: &Meals, key: Macro) -> f64 {
    meals
        .iter()
        .map(|(_, entries)| entries_macro(entries, key))
        .sum()
}

/// `goal - total`. Negative means over goal.
#[must_use]
pub fn remaining(goal_calories: u32, total_calories: u32) -> i64 {
    i64::from(goal_calories) - i64::from(total_calories)
}

/// `value / goal` as a whole percentage capped at 100; 0 when there is no goal.
// Cast safety: the ratio is clamped into [0, 100] before the cast.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn percent_of_goal(value: f64, goal: f64) -> u32 {
    if goal <= 0.0 {
        return 0;
    }
    (value / goal * 100.0).round().clamp(0.0, 100.0) as u32
}

/// Everything the summary view shows, derived in one pass from the log.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    /// Calories eaten
    pub total_calories: u32,
    /// Protein eaten (g)
    pub total_protein: f64,
    /// Carbohydrates eaten (g)
    pub total_carbs: f64,
    /// Fat eaten (g)
    pub total_fat: f64,
    /// Calorie goal in effect
    pub goal_calories: u32,
    /// `goal - eaten`, may be negative
    pub remaining_calories: i64,
    /// Calories as a percentage of goal (0-100)
    pub calorie_percent: u32,
    /// Water drunk (ml)
    pub water_ml: u32,
    /// Water goal in effect (ml)
    pub goal_water_ml: u32,
    /// Water as a percentage of goal (0-100)
    pub water_percent: u32,
    /// Logged entries across all slots
    pub entry_count: usize,
}

impl DailySummary {
    /// Builds the summary from the log and the goals in effect.
    #[must_use]
    pub fn build(meals: &Meals, water: &WaterState, goal_calories: u32, goal_water_ml: u32) -> Self {
        let total_calories = total_calories(meals);
        Self {
            total_calories,
            total_protein: total_macro(meals, Macro::Protein),
            total_carbs: total_macro(meals, Macro::Carbs),
            total_fat: total_macro(meals, Macro::Fat),
            goal_calories,
            remaining_calories: remaining(goal_calories, total_calories),
            calorie_percent: percent_of_goal(f64::from(total_calories), f64::from(goal_calories)),
            water_ml: water.current,
            goal_water_ml,
            water_percent: percent_of_goal(f64::from(water.current), f64::from(goal_water_ml)),
            entry_count: meals.iter().map(|(_, entries)| entries.len()).sum(),
        }
    }
}

/// Text progress bar like `[████████░░] 80%`.
///
/// # Arguments
/// * `percent` - Progress percentage (0-100)
/// * `bar_length` - Bar width in characters (default 10)
#[must_use]
pub fn format_progress_bar(percent: u32, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = usize::try_from(percent.min(100)).unwrap_or(100);

    let filled = (clamped * length + 50) / 100;
    let empty = length.saturating_sub(filled);

    format!("[{}{}] {percent}%", "█".repeat(filled), "░".repeat(empty))
}
