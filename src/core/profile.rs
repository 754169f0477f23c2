//! User profile, onboarding and derived goals.
//!
//! Goals come from the Mifflin-St Jeor BMR scaled by an activity multiplier;
//! the water goal is 35 ml per kg of body weight. A zero goal means "unknown"
//! and callers fall back to the configured defaults.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Biological sex used by the BMR formula.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// +5 kcal offset
    #[default]
    Male,
    /// -161 kcal offset
    Female,
}

/// Self-reported activity level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// 1-3 days a week
    Light,
    /// 3-5 days a week
    #[default]
    Moderate,
    /// 6-7 days a week
    Active,
    /// Physical job or twice-daily training
    VeryActive,
}

impl ActivityLevel {
    /// TDEE multiplier applied to BMR.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Active => 1.725,
            Self::VeryActive => 1.9,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sedentary => "Sedentary",
            Self::Light => "Lightly active",
            Self::Moderate => "Moderately active",
            Self::Active => "Active",
            Self::VeryActive => "Very active",
        }
    }
}

/// The single user's profile. Zero values mean "not set".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    /// Display name
    pub name: String,
    /// Contact email, if known
    pub email: String,
    /// Years
    pub age: u32,
    /// Sex for the BMR formula
    pub gender: Gender,
    /// Centimetres
    pub height: f64,
    /// Kilograms
    pub weight: f64,
    /// Activity level
    pub activity_level: ActivityLevel,
    /// Body mass index, one decimal
    pub bmi: f64,
    /// Daily calorie goal (kcal)
    pub goal_calories: u32,
    /// Daily water goal (ml)
    pub goal_water: u32,
}

impl UserProfile {
    /// Category of the stored BMI, `None` when BMI is unknown.
    #[must_use]
    pub fn bmi_category(&self) -> Option<BmiCategory> {
        (self.bmi > 0.0).then(|| BmiCategory::from_bmi(self.bmi))
    }
}

/// Answers collected by the onboarding flow.
#[derive(Debug, Clone, PartialEq)]
pub struct OnboardingInput {
    /// Display name
    pub name: String,
    /// Contact email (may be empty)
    pub email: String,
    /// Years
    pub age: u32,
    /// Sex for the BMR formula
    pub gender: Gender,
    /// Centimetres
    pub height: f64,
    /// Kilograms
    pub weight: f64,
    /// Activity level
    pub activity_level: ActivityLevel,
}

impl OnboardingInput {
    /// Checks the fields the goal formulas depend on.
    ///
    /// # Errors
    /// Returns [`Error::InvalidProfile`] for a blank name or a non-positive
    /// age, height or weight.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| {
            Err(Error::InvalidProfile {
                message: message.to_string(),
            })
        };

        if self.name.trim().is_empty() {
            return invalid("name must not be empty");
        }
        if self.age == 0 {
            return invalid("age must be greater than zero");
        }
        if self.height.is_nan() || self.height <= 0.0 {
            return invalid("height must be greater than zero");
        }
        if self.weight.is_nan() || self.weight <= 0.0 {
            return invalid("weight must be greater than zero");
        }
        Ok(())
    }

    /// Builds the profile with every derived field filled in.
    ///
    /// # Errors
    /// Propagates [`OnboardingInput::validate`] failures.
    pub fn into_profile(self) -> Result<UserProfile> {
        self.validate()?;
        let mut profile = UserProfile {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            age: self.age,
            gender: self.gender,
            height: self.height,
            weight: self.weight,
            activity_level: self.activity_level,
            ..UserProfile::default()
        };
        profile.bmi = calculate_bmi(profile.weight, profile.height);
        profile.goal_calories = calorie_goal(&profile);
        profile.goal_water = water_goal(profile.weight);
        Ok(profile)
    }
}

/// Partial profile edit; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    /// New display name
    pub name: Option<String>,
    /// New age
    pub age: Option<u32>,
    /// New height (cm)
    pub height: Option<f64>,
    /// New weight (kg)
    pub weight: Option<f64>,
    /// New activity level
    pub activity_level: Option<ActivityLevel>,
    /// Explicit calorie goal override
    pub goal_calories: Option<u32>,
    /// Explicit water goal override (ml)
    pub goal_water: Option<u32>,
}

/// What [`ProfileUpdate::apply`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileChange {
    /// Weight differs from before
    pub weight_changed: bool,
    /// BMI was recomputed
    pub bmi_recomputed: bool,
}

impl ProfileUpdate {
    /// Applies the patch. Non-positive measurements are ignored.
    pub fn apply(self, profile: &mut UserProfile) -> ProfileChange {
        let mut change = ProfileChange::default();

        if let Some(name) = self.name.filter(|name| !name.trim().is_empty()) {
            profile.name = name.trim().to_string();
        }
        if let Some(age) = self.age.filter(|age| *age > 0) {
            profile.age = age;
        }
        if let Some(activity) = self.activity_level {
            profile.activity_level = activity;
        }
        if let Some(height) = self.height.filter(|height| *height > 0.0) {
            change.bmi_recomputed |= (profile.height - height).abs() > f64::EPSILON;
            profile.height = height;
        }
        if let Some(weight) = self.weight.filter(|weight| *weight > 0.0) {
            change.weight_changed = (profile.weight - weight).abs() > f64::EPSILON;
            change.bmi_recomputed |= change.weight_changed;
            profile.weight = weight;
        }
        if change.bmi_recomputed {
            profile.bmi = calculate_bmi(profile.weight, profile.height);
        }
        if let Some(goal) = self.goal_calories {
            profile.goal_calories = goal;
        }
        if let Some(goal) = self.goal_water {
            profile.goal_water = goal;
        }

        change
    }
}

/// WHO BMI bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    /// Below 18.5
    Underweight,
    /// 18.5 to 24.9
    Healthy,
    /// 25 to 29.9
    Overweight,
    /// 30 and above
    Obese,
}

impl BmiCategory {
    /// Band for a BMI value.
    #[must_use]
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Healthy
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Underweight => "Underweight",
            Self::Healthy => "Healthy",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        };
        f.write_str(label)
    }
}

/// Dietary preference switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    /// No meat or fish
    pub vegetarian: bool,
    /// Avoid gluten
    pub gluten_free: bool,
    /// Avoid dairy
    pub dairy_free: bool,
    /// Prefer low-carbohydrate dishes
    pub low_carb: bool,
}

/// One switch of [`Preferences`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    /// See [`Preferences::vegetarian`]
    Vegetarian,
    /// See [`Preferences::gluten_free`]
    GlutenFree,
    /// See [`Preferences::dairy_free`]
    DairyFree,
    /// See [`Preferences::low_carb`]
    LowCarb,
}

impl Preferences {
    /// Flips one switch and returns its new value.
    pub fn toggle(&mut self, preference: Preference) -> bool {
        let flag = match preference {
            Preference::Vegetarian => &mut self.vegetarian,
            Preference::GlutenFree => &mut self.gluten_free,
            Preference::DairyFree => &mut self.dairy_free,
            Preference::LowCarb => &mut self.low_carb,
        };
        *flag = !*flag;
        *flag
    }
}

/// `weight / (height_m)^2`, one decimal; 0 when height is unknown.
#[must_use]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm <= 0.0 || weight_kg <= 0.0 {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    (weight_kg / (height_m * height_m) * 10.0).round() / 10.0
}

/// Mifflin-St Jeor basal metabolic rate (kcal/day).
#[must_use]
pub fn basal_metabolic_rate(profile: &UserProfile) -> f64 {
    let offset = match profile.gender {
        Gender::Male => 5.0,
        Gender::Female => -161.0,
    };
    10.0f64.mul_add(
        profile.weight,
        6.25f64.mul_add(profile.height, -5.0 * f64::from(profile.age)),
    ) + offset
}

/// Daily calorie goal, 2000 when the formula gives nothing usable.
// Cast safety: the value is checked positive and kcal goals are far below u32::MAX.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn calorie_goal(profile: &UserProfile) -> u32 {
    let goal = (basal_metabolic_rate(profile) * profile.activity_level.multiplier()).round();
    if goal > 0.0 { goal as u32 } else { FALLBACK_GOAL }
}

/// Daily water goal (35 ml per kg), 2000 when weight is unknown.
// Cast safety: the value is checked positive first.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn water_goal(weight_kg: f64) -> u32 {
    let goal = (weight_kg * 35.0).round();
    if goal > 0.0 { goal as u32 } else { FALLBACK_GOAL }
}

const FALLBACK_GOAL: u32 = 2000;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    fn input() -> OnboardingInput {
        OnboardingInput {
            name: "  Asha ".to_string(),
            email: String::new(),
            age: 25,
            gender: Gender::Female,
            height: 160.0,
            weight: 60.0,
            activity_level: ActivityLevel::Moderate,
        }
    }

    #[test]
    fn test_onboarding_computes_goals() {
        let profile = input().into_profile().unwrap();

        // BMR = 600 + 1000 - 125 - 161 = 1314; x1.55 = 2036.7
        assert_eq!(profile.name, "Asha");
        assert_eq!(profile.goal_calories, 2037);
        assert_eq!(profile.goal_water, 2100);
        assert_eq!(profile.bmi, 23.4);
        assert_eq!(profile.bmi_category(), Some(BmiCategory::Healthy));
    }

    #[test]
    fn test_male_offset_and_multiplier() {
        let profile = OnboardingInput {
            gender: Gender::Male,
            activity_level: ActivityLevel::Sedentary,
            ..input()
        }
        .into_profile()
        .unwrap();

        // BMR = 600 + 1000 - 125 + 5 = 1480; x1.2 = 1776
        assert_eq!(profile.goal_calories, 1776);
    }

    #[test]
    fn test_onboarding_rejects_bad_input() {
        let blank = OnboardingInput {
            name: "   ".to_string(),
            ..input()
        };
        assert!(matches!(
            blank.into_profile(),
            Err(Error::InvalidProfile { .. })
        ));

        let no_weight = OnboardingInput {
            weight: 0.0,
            ..input()
        };
        assert!(no_weight.validate().is_err());

        let nan_height = OnboardingInput {
            height: f64::NAN,
            ..input()
        };
        assert!(nan_height.validate().is_err());
    }

    #[test]
    fn test_goal_fallbacks() {
        assert_eq!(water_goal(0.0), 2000);
        let tiny = UserProfile {
            age: 120,
            ..UserProfile::default()
        };
        assert_eq!(calorie_goal(&tiny), 2000);
    }

    #[test]
    fn test_bmi_categories() {
        assert_eq!(BmiCategory::from_bmi(17.0), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Healthy);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(31.2), BmiCategory::Obese);
        assert_eq!(calculate_bmi(70.0, 0.0), 0.0);
        assert!(UserProfile::default().bmi_category().is_none());
    }

    #[test]
    fn test_update_recomputes_bmi_on_weight_change() {
        let mut profile = input().into_profile().unwrap();
        let change = ProfileUpdate {
            weight: Some(64.0),
            ..ProfileUpdate::default()
        }
        .apply(&mut profile);

        assert!(change.weight_changed);
        assert!(change.bmi_recomputed);
        assert_eq!(profile.bmi, 25.0);
        assert_eq!(profile.bmi_category(), Some(BmiCategory::Overweight));
    }

    #[test]
    fn test_update_ignores_nonsense_and_same_weight() {
        let mut profile = input().into_profile().unwrap();
        let change = ProfileUpdate {
            weight: Some(60.0),
            height: Some(-5.0),
            age: Some(0),
            ..ProfileUpdate::default()
        }
        .apply(&mut profile);

        assert_eq!(change, ProfileChange::default());
        assert_eq!(profile.height, 160.0);
        assert_eq!(profile.age, 25);
    }

    #[test]
    fn test_preferences_toggle() {
        let mut prefs = Preferences::default();
        assert!(prefs.toggle(Preference::Vegetarian));
        assert!(prefs.vegetarian);
        assert!(!prefs.toggle(Preference::Vegetarian));
        assert!(prefs.toggle(Preference::LowCarb));

        let json = serde_json::to_value(prefs).unwrap();
        assert_eq!(json["lowCarb"], true);
        assert_eq!(json["glutenFree"], false);
    }
}
