//! Fixed-choice slash-command parameters and their engine counterparts.

use crate::core::{
    catalog::MealSlot,
    profile::{ActivityLevel, Gender, Preference},
};
use chrono::Weekday;

/// Meal slot picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum MealChoice {
    /// Breakfast
    Breakfast,
    /// Lunch
    Lunch,
    /// Evening snack
    Snack,
    /// Dinner
    Dinner,
}

impl From<MealChoice> for MealSlot {
    fn from(choice: MealChoice) -> Self {
        match choice {
            MealChoice::Breakfast => Self::Breakfast,
            MealChoice::Lunch => Self::Lunch,
            MealChoice::Snack => Self::Snack,
            MealChoice::Dinner => Self::Dinner,
        }
    }
}

/// Weekday picker for browsing the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum DayChoice {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
    /// Sunday
    Sunday,
}

impl From<DayChoice> for Weekday {
    fn from(choice: DayChoice) -> Self {
        match choice {
            DayChoice::Monday => Self::Mon,
            DayChoice::Tuesday => Self::Tue,
            DayChoice::Wednesday => Self::Wed,
            DayChoice::Thursday => Self::Thu,
            DayChoice::Friday => Self::Fri,
            DayChoice::Saturday => Self::Sat,
            DayChoice::Sunday => Self::Sun,
        }
    }
}

/// The chosen weekday, or `today` when none was given.
#[must_use]
pub fn weekday_or(day: Option<DayChoice>, today: Weekday) -> Weekday {
    day.map_or(today, Weekday::from)
}

/// Sex for the goal formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum GenderChoice {
    /// Male
    Male,
    /// Female
    Female,
}

impl From<GenderChoice> for Gender {
    fn from(choice: GenderChoice) -> Self {
        match choice {
            GenderChoice::Male => Self::Male,
            GenderChoice::Female => Self::Female,
        }
    }
}

/// Activity level picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum ActivityChoice {
    /// Little or no exercise
    #[name = "Sedentary"]
    Sedentary,
    /// 1-3 days a week
    #[name = "Lightly active"]
    Light,
    /// 3-5 days a week
    #[name = "Moderately active"]
    Moderate,
    /// 6-7 days a week
    #[name = "Active"]
    Active,
    /// Physical job or twice-daily training
    #[name = "Very active"]
    VeryActive,
}

impl From<ActivityChoice> for ActivityLevel {
    fn from(choice: ActivityChoice) -> Self {
        match choice {
            ActivityChoice::Sedentary => Self::Sedentary,
            ActivityChoice::Light => Self::Light,
            ActivityChoice::Moderate => Self::Moderate,
            ActivityChoice::Active => Self::Active,
            ActivityChoice::VeryActive => Self::VeryActive,
        }
    }
}

/// Dietary preference picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum PreferenceChoice {
    /// Vegetarian
    #[name = "Vegetarian"]
    Vegetarian,
    /// Gluten free
    #[name = "Gluten free"]
    GlutenFree,
    /// Dairy free
    #[name = "Dairy free"]
    DairyFree,
    /// Low carb
    #[name = "Low carb"]
    LowCarb,
}

impl From<PreferenceChoice> for Preference {
    fn from(choice: PreferenceChoice) -> Self {
        match choice {
            PreferenceChoice::Vegetarian => Self::Vegetarian,
            PreferenceChoice::GlutenFree => Self::GlutenFree,
            PreferenceChoice::DairyFree => Self::DairyFree,
            PreferenceChoice::LowCarb => Self::LowCarb,
        }
    }
}
