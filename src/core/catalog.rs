//! Mess menu catalog.
//!
//! Read-only description of what the mess serves: per meal slot, a list of
//! unlimited staples available every day plus at most one weekday-specific
//! special. Weekday lookups go through [`menu_day_index`], so the week is
//! Monday-first regardless of how the clock numbers its days.

use crate::core::day::menu_day_index;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// One of the four daily meal slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    /// Morning meal
    Breakfast,
    /// Midday meal
    Lunch,
    /// Evening snack
    Snack,
    /// Night meal
    Dinner,
}

impl MealSlot {
    /// All slots in display order.
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Snack, Self::Dinner];

    /// Lowercase identifier used in keys and messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Snack => "snack",
            Self::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "snack" | "snacks" => Ok(Self::Snack),
            "dinner" => Ok(Self::Dinner),
            other => Err(format!("unknown meal slot '{other}'")),
        }
    }
}

/// One value per meal slot. Serializes as `{breakfast, lunch, snack, dinner}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerSlot<T> {
    /// Breakfast value
    #[serde(default)]
    pub breakfast: T,
    /// Lunch value
    #[serde(default)]
    pub lunch: T,
    /// Snack value
    #[serde(default)]
    pub snack: T,
    /// Dinner value
    #[serde(default)]
    pub dinner: T,
}

impl<T> PerSlot<T> {
    /// Value for `slot`.
    #[must_use]
    pub const fn get(&self, slot: MealSlot) -> &T {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Snack => &self.snack,
            MealSlot::Dinner => &self.dinner,
        }
    }

    /// Mutable value for `slot`.
    pub fn get_mut(&mut self, slot: MealSlot) -> &mut T {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Snack => &mut self.snack,
            MealSlot::Dinner => &mut self.dinner,
        }
    }

    /// `(slot, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (MealSlot, &T)> {
        MealSlot::ALL.into_iter().map(move |slot| (slot, self.get(slot)))
    }
}

/// A catalog entry. Macros are per serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    /// Display name, unique within a slot's menu
    pub name: String,
    /// Energy per serving (kcal)
    pub calories: u32,
    /// Protein per serving (g)
    #[serde(default)]
    pub protein: f64,
    /// Carbohydrates per serving (g)
    #[serde(default)]
    pub carbs: f64,
    /// Fat per serving (g)
    #[serde(default)]
    pub fat: f64,
    /// Serving unit (`cup`, `bowl`, `pc`, ...)
    #[serde(default)]
    pub unit: Option<String>,
    /// Staple with no daily cap
    #[serde(default)]
    pub unlimited: bool,
    /// Popularity rating, display only
    #[serde(default)]
    pub rating: Option<f32>,
}

impl FoodItem {
    /// A weekday dish with only a calorie figure and a rating.
    #[must_use]
    pub fn dish(name: &str, calories: u32, rating: f32) -> Self {
        Self {
            name: name.to_string(),
            calories,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            unit: None,
            unlimited: false,
            rating: Some(rating),
        }
    }

    /// Adds per-serving macros to a dish.
    #[must_use]
    pub fn with_macros(mut self, protein: f64, carbs: f64, fat: f64) -> Self {
        self.protein = protein;
        self.carbs = carbs;
        self.fat = fat;
        self
    }

    /// An unlimited staple.
    #[must_use]
    pub fn staple(name: &str, unit: &str, calories: u32, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            name: name.to_string(),
            calories,
            protein,
            carbs,
            fat,
            unit: Some(unit.to_string()),
            unlimited: true,
            rating: None,
        }
    }
}

/// The weekday-specific part of a slot's menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DailySpecial {
    /// One dish, toggled on/off.
    Single {
        /// The dish
        item: FoodItem,
    },
    /// Veg or non-veg, never both.
    Choice {
        /// Vegetarian option
        veg: FoodItem,
        /// Non-vegetarian option
        non_veg: FoodItem,
    },
    /// Like `Choice`, plus extras served with whichever option is picked.
    Special {
        /// Vegetarian option
        veg: FoodItem,
        /// Non-vegetarian option
        non_veg: FoodItem,
        /// Always served with the chosen option
        extras: Vec<FoodItem>,
    },
    /// Independently toggleable dishes.
    ItemSet {
        /// The dishes
        items: Vec<FoodItem>,
    },
}

impl DailySpecial {
    /// Dishes a user can pick directly (extras excluded).
    #[must_use]
    pub fn selectable(&self) -> Vec<&FoodItem> {
        match self {
            Self::Single { item } => vec![item],
            Self::Choice { veg, non_veg } | Self::Special { veg, non_veg, .. } => {
                vec![veg, non_veg]
            }
            Self::ItemSet { items } => items.iter().collect(),
        }
    }

    /// Extras attached to the primary pick, empty unless `Special`.
    #[must_use]
    pub fn extras(&self) -> &[FoodItem] {
        match self {
            Self::Special { extras, .. } => extras,
            Self::Single { .. } | Self::Choice { .. } | Self::ItemSet { .. } => &[],
        }
    }

    /// Selectable dish named `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&FoodItem> {
        self.selectable().into_iter().find(|item| item.name == name)
    }

    /// For veg/non-veg pairs, the name of the option excluded by picking `name`.
    #[must_use]
    pub fn counterpart(&self, name: &str) -> Option<&str> {
        match self {
            Self::Choice { veg, non_veg } | Self::Special { veg, non_veg, .. } => {
                if veg.name == name {
                    Some(non_veg.name.as_str())
                } else if non_veg.name == name {
                    Some(veg.name.as_str())
                } else {
                    None
                }
            }
            Self::Single { .. } | Self::ItemSet { .. } => None,
        }
    }
}

/// Menu for one slot across the week.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuSection {
    /// Available every day
    pub staples: Vec<FoodItem>,
    /// Specials indexed Monday = 0 .. Sunday = 6
    pub weekly: [Option<DailySpecial>; 7],
}

/// What a slot offers on a given day.
#[derive(Debug, Clone, Copy)]
pub struct MenuEntry<'a> {
    /// Unlimited staples
    pub staples: &'a [FoodItem],
    /// The day's special, if any
    pub special: Option<&'a DailySpecial>,
}

/// How a menu item is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Quantity counter
    Staple,
    /// Binary pick from the special
    Special,
}

impl<'a> MenuEntry<'a> {
    /// Looks a name up among staples, then the special's selectable dishes.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<(ItemKind, &'a FoodItem)> {
        if let Some(staple) = self.staples.iter().find(|item| item.name == name) {
            return Some((ItemKind::Staple, staple));
        }
        self.special
            .and_then(|special| special.find(name))
            .map(|item| (ItemKind::Special, item))
    }

    /// Every pickable name: staples first, then special dishes.
    #[must_use]
    pub fn names(&self) -> Vec<&'a str> {
        let mut names: Vec<&str> = self.staples.iter().map(|item| item.name.as_str()).collect();
        if let Some(special) = self.special {
            names.extend(special.selectable().into_iter().map(|item| item.name.as_str()));
        }
        names
    }
}

/// The full weekly menu.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// One section per slot
    pub sections: PerSlot<MenuSection>,
}

impl Catalog {
    /// Staples and special for `slot` on `weekday`.
    #[must_use]
    pub fn lookup(&self, slot: MealSlot, weekday: Weekday) -> MenuEntry<'_> {
        let section = self.sections.get(slot);
        MenuEntry {
            staples: &section.staples,
            special: section.weekly[menu_day_index(weekday)].as_ref(),
        }
    }

    /// The hostel mess menu.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn mess() -> Self {
        let dal = FoodItem::staple("Dal", "bowl", 180, 12.0, 28.0, 3.0);
        let rice = FoodItem::staple("Rice", "150g", 200, 4.0, 44.0, 0.0);
        let roti = FoodItem::staple("Roti", "pc", 70, 2.5, 14.0, 1.0);
        let coffee = FoodItem::staple("Coffee", "cup", 80, 2.0, 12.0, 3.0);

        let single = |item: FoodItem| Some(DailySpecial::Single { item });
        let choice = |veg: FoodItem, non_veg: FoodItem| Some(DailySpecial::Choice { veg, non_veg });
        let set = |items: Vec<FoodItem>| Some(DailySpecial::ItemSet { items });

        let breakfast = MenuSection {
            staples: vec![
                coffee.clone(),
                FoodItem::staple("Chai", "cup", 60, 2.0, 10.0, 2.0),
            ],
            weekly: [
                single(FoodItem::dish("Poha", 250, 4.2).with_macros(6.0, 42.0, 8.0)),
                single(FoodItem::dish("Aloo Paratha", 320, 4.3).with_macros(8.0, 50.0, 12.0)),
                single(FoodItem::dish("Idli Sambar", 280, 4.4).with_macros(10.0, 46.0, 6.0)),
                single(FoodItem::dish("Bread Omelette", 260, 4.3).with_macros(14.0, 30.0, 10.0)),
                single(FoodItem::dish("Puri Bhaji", 380, 4.5).with_macros(9.0, 58.0, 14.0)),
                single(FoodItem::dish("Masala Dosa", 360, 4.7).with_macros(9.0, 55.0, 12.0)),
                single(FoodItem::dish("Chole Bhature", 480, 4.9).with_macros(14.0, 68.0, 16.0)),
            ],
        };

        let lunch = MenuSection {
            staples: vec![
                dal.clone(),
                rice.clone(),
                roti.clone(),
                FoodItem::staple("Achaar", "srv", 15, 0.0, 3.0, 0.0),
            ],
            weekly: [
                set(vec![FoodItem::dish("Aloo Sabzi", 180, 4.0).with_macros(4.0, 34.0, 6.0)]),
                choice(
                    FoodItem::dish("Paneer Sabzi", 220, 4.2),
                    FoodItem::dish("Chicken Curry", 280, 4.4),
                ),
                choice(FoodItem::dish("Mix Veg", 160, 3.9), FoodItem::dish("Egg Curry", 200, 4.1)),
                set(vec![FoodItem::dish("Rajma", 240, 4.3).with_macros(14.0, 42.0, 4.0)]),
                choice(FoodItem::dish("Aloo Gobi", 170, 4.0), FoodItem::dish("Fish Curry", 260, 4.3)),
                choice(FoodItem::dish("Chole", 240, 4.5), FoodItem::dish("Chicken Masala", 300, 4.6)),
                choice(
                    FoodItem::dish("Paneer Butter Masala", 280, 4.7),
                    FoodItem::dish("Mutton Curry", 340, 4.8),
                ),
            ],
        };

        let snack = MenuSection {
            staples: vec![coffee, FoodItem::staple("Tea", "cup", 60, 2.0, 10.0, 2.0)],
            weekly: [
                single(FoodItem::dish("Samosa", 240, 4.3)),
                single(FoodItem::dish("Pakora", 210, 4.2)),
                single(FoodItem::dish("Bread Pakoda", 220, 4.1)),
                single(FoodItem::dish("Kachori", 260, 4.3)),
                single(FoodItem::dish("Cutlet", 200, 4.2)),
                single(FoodItem::dish("Vada Pav", 290, 4.6)),
                single(FoodItem::dish("Pani Puri", 180, 4.8)),
            ],
        };

        let dinner = MenuSection {
            staples: vec![dal, rice, roti],
            weekly: [
                set(vec![FoodItem::dish("Seasonal Sabzi", 150, 3.9)]),
                choice(
                    FoodItem::dish("Paneer Do Pyaza", 240, 4.1),
                    FoodItem::dish("Chicken Curry", 280, 4.3),
                ),
                set(vec![FoodItem::dish("Aloo Matar", 180, 4.0)]),
                set(vec![FoodItem::dish("Chana Masala", 220, 4.2)]),
                Some(DailySpecial::Special {
                    veg: FoodItem::dish("Veg Biryani", 420, 4.7),
                    non_veg: FoodItem::dish("Chicken Biryani", 520, 4.9),
                    extras: vec![FoodItem::dish("Raita", 60, 4.0)],
                }),
                choice(
                    FoodItem::dish("Palak Paneer", 240, 4.4),
                    FoodItem::dish("Egg Bhurji", 220, 4.2),
                ),
                set(vec![FoodItem::dish("Dal Makhani", 260, 4.6)]),
            ],
        };

        Self {
            sections: PerSlot {
                breakfast,
                lunch,
                snack,
                dinner,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_lookup_uses_monday_first_week() {
        let catalog = Catalog::mess();

        let monday = catalog.lookup(MealSlot::Breakfast, Weekday::Mon);
        assert_eq!(monday.special.unwrap().selectable()[0].name, "Poha");

        let sunday = catalog.lookup(MealSlot::Breakfast, Weekday::Sun);
        assert_eq!(sunday.special.unwrap().selectable()[0].name, "Chole Bhature");
    }

    #[test]
    fn test_tuesday_lunch_is_a_choice() {
        let catalog = Catalog::mess();
        let entry = catalog.lookup(MealSlot::Lunch, Weekday::Tue);

        match entry.special {
            Some(DailySpecial::Choice { veg, non_veg }) => {
                assert_eq!(veg.name, "Paneer Sabzi");
                assert_eq!(non_veg.name, "Chicken Curry");
            }
            other => panic!("expected choice, got {other:?}"),
        }
        assert_eq!(entry.staples.len(), 4);
    }

    #[test]
    fn test_friday_dinner_special_has_extras() {
        let catalog = Catalog::mess();
        let special = catalog.lookup(MealSlot::Dinner, Weekday::Fri).special.unwrap();

        assert_eq!(special.extras().len(), 1);
        assert_eq!(special.extras()[0].name, "Raita");
        assert_eq!(special.counterpart("Veg Biryani"), Some("Chicken Biryani"));
        // Extras are not directly selectable
        assert!(special.find("Raita").is_none());
    }

    #[test]
    fn test_menu_entry_find_distinguishes_kinds() {
        let catalog = Catalog::mess();
        let entry = catalog.lookup(MealSlot::Lunch, Weekday::Sat);

        assert_eq!(entry.find("Rice").unwrap().0, ItemKind::Staple);
        assert_eq!(entry.find("Chole").unwrap().0, ItemKind::Special);
        assert!(entry.find("Pizza").is_none());
        assert_eq!(entry.names().len(), 6);
    }

    #[test]
    fn test_counterpart_is_none_for_item_sets() {
        let catalog = Catalog::mess();
        let special = catalog.lookup(MealSlot::Lunch, Weekday::Mon).special.unwrap();
        assert!(special.counterpart("Aloo Sabzi").is_none());
    }

    #[test]
    fn test_meal_slot_parsing() {
        assert_eq!("Lunch".parse::<MealSlot>().unwrap(), MealSlot::Lunch);
        assert_eq!(" snacks ".parse::<MealSlot>().unwrap(), MealSlot::Snack);
        assert!("brunch".parse::<MealSlot>().is_err());
    }

    #[test]
    fn test_special_serializes_with_type_tag() {
        let special = DailySpecial::Single {
            item: FoodItem::dish("Samosa", 240, 4.3),
        };
        let json = serde_json::to_value(&special).unwrap();
        assert_eq!(json["type"], "single");
        assert_eq!(json["item"]["name"], "Samosa");
    }
}
