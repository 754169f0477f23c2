//! Pending menu picks for each meal slot.
//!
//! A selection is what the user has ticked on the menu but not yet logged.
//! Staples carry a quantity; special dishes are binary picks, and for
//! veg/non-veg specials at most one side may be picked at a time.
//! Nothing here can fail: out-of-range input is clamped or ignored.

use crate::core::{
    catalog::{DailySpecial, MealSlot, MenuEntry},
    nutrition::{self, Macro},
    tracker::LoggedMealEntry,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Live totals for a pending selection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SelectionSummary {
    /// Sum of calories (kcal)
    pub total_calories: u32,
    /// Sum of protein (g)
    pub total_protein: f64,
    /// Sum of carbohydrates (g)
    pub total_carbs: f64,
    /// Sum of fat (g)
    pub total_fat: f64,
    /// Number of entries a commit would log
    pub item_count: usize,
}

/// Selected quantities keyed by `(slot, item name)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    picks: BTreeMap<MealSlot, BTreeMap<String, u32>>,
}

impl SelectionState {
    /// Quantity picked for `item` in `slot` (0 when never touched).
    #[must_use]
    pub fn quantity(&self, slot: MealSlot, item: &str) -> u32 {
        self.picks
            .get(&slot)
            .and_then(|items| items.get(item))
            .copied()
            .unwrap_or(0)
    }

    /// Sets a quantity, clamping negatives to zero. Returns the stored value.
    pub fn set_quantity(&mut self, slot: MealSlot, item: &str, quantity: i64) -> u32 {
        let stored = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
        self.picks
            .entry(slot)
            .or_default()
            .insert(item.to_string(), stored);
        stored
    }

    /// Adds `delta` to the current quantity, never going below zero.
    pub fn adjust_quantity(&mut self, slot: MealSlot, item: &str, delta: i64) -> u32 {
        let current = i64::from(self.quantity(slot, item));
        self.set_quantity(slot, item, current.saturating_add(delta))
    }

    /// Toggles a dish from the day's special.
    ///
    /// For veg/non-veg specials, picking one side zeroes the other; picking an
    /// already-picked dish un-picks it. Returns whether `item` is now picked,
    /// or `None` if `item` is not a selectable dish of `special`.
    pub fn toggle_choice(
        &mut self,
        slot: MealSlot,
        special: &DailySpecial,
        item: &str,
    ) -> Option<bool> {
        special.find(item)?;

        let selected = self.quantity(slot, item) == 0;
        let items = self.picks.entry(slot).or_default();
        items.insert(item.to_string(), u32::from(selected));

        if selected {
            if let Some(other) = special.counterpart(item) {
                items.insert(other.to_string(), 0);
            }
        }
        Some(selected)
    }

    /// Drops every pick belonging to `slot`.
    pub fn clear(&mut self, slot: MealSlot) {
        self.picks.remove(&slot);
    }

    /// Drops every pick.
    pub fn clear_all(&mut self) {
        self.picks.clear();
    }

    /// True if no key for `slot` exists.
    #[must_use]
    pub fn is_clear(&self, slot: MealSlot) -> bool {
        !self.picks.contains_key(&slot)
    }

    /// Entries a commit of `slot` against `entry` would log, already scaled
    /// by quantity. Staples first, then picked special dishes, then extras.
    #[must_use]
    pub fn items_to_log(&self, slot: MealSlot, entry: &MenuEntry<'_>) -> Vec<LoggedMealEntry> {
        let mut items: Vec<LoggedMealEntry> = entry
            .staples
            .iter()
            .filter_map(|staple| {
                let quantity = self.quantity(slot, &staple.name);
                (quantity > 0).then(|| LoggedMealEntry::from_food(staple, quantity))
            })
            .collect();

        if let Some(special) = entry.special {
            let picked: Vec<LoggedMealEntry> = special
                .selectable()
                .into_iter()
                .filter(|dish| self.quantity(slot, &dish.name) > 0)
                .map(|dish| LoggedMealEntry::from_food(dish, 1))
                .collect();

            let any_picked = !picked.is_empty();
            items.extend(picked);
            if any_picked {
                items.extend(
                    special
                        .extras()
                        .iter()
                        .map(|extra| LoggedMealEntry::from_food(extra, 1)),
                );
            }
        }

        items
    }

    /// Totals for what a commit would log right now.
    #[must_use]
    pub fn summarize(&self, slot: MealSlot, entry: &MenuEntry<'_>) -> SelectionSummary {
        let items = self.items_to_log(slot, entry);
        SelectionSummary {
            total_calories: nutrition::entries_calories(&items),
            total_protein: nutrition::entries_macro(&items, Macro::Protein),
            total_carbs: nutrition::entries_macro(&items, Macro::Carbs),
            total_fat: nutrition::entries_macro(&items, Macro::Fat),
            item_count: items.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::catalog::Catalog;
    use chrono::Weekday;

    #[test]
    fn test_set_quantity_clamps_negative() {
        let mut selection = SelectionState::default();
        assert_eq!(selection.set_quantity(MealSlot::Lunch, "Rice", -3), 0);
        assert_eq!(selection.set_quantity(MealSlot::Lunch, "Rice", 4), 4);
        assert_eq!(selection.quantity(MealSlot::Lunch, "Rice"), 4);
    }

    #[test]
    fn test_adjust_quantity_floors_at_zero() {
        let mut selection = SelectionState::default();
        assert_eq!(selection.adjust_quantity(MealSlot::Dinner, "Roti", 1), 1);
        assert_eq!(selection.adjust_quantity(MealSlot::Dinner, "Roti", 1), 2);
        assert_eq!(selection.adjust_quantity(MealSlot::Dinner, "Roti", -5), 0);
    }

    #[test]
    fn test_choice_is_mutually_exclusive() {
        let catalog = Catalog::mess();
        let special = catalog.lookup(MealSlot::Lunch, Weekday::Sat).special.unwrap();
        let mut selection = SelectionState::default();

        assert_eq!(selection.toggle_choice(MealSlot::Lunch, special, "Chole"), Some(true));
        assert_eq!(
            selection.toggle_choice(MealSlot::Lunch, special, "Chicken Masala"),
            Some(true)
        );

        assert_eq!(selection.quantity(MealSlot::Lunch, "Chicken Masala"), 1);
        assert_eq!(selection.quantity(MealSlot::Lunch, "Chole"), 0);
    }

    #[test]
    fn test_choice_toggle_to_zero() {
        let catalog = Catalog::mess();
        let special = catalog.lookup(MealSlot::Lunch, Weekday::Sat).special.unwrap();
        let mut selection = SelectionState::default();

        selection.toggle_choice(MealSlot::Lunch, special, "Chole");
        assert_eq!(selection.toggle_choice(MealSlot::Lunch, special, "Chole"), Some(false));
        assert_eq!(selection.quantity(MealSlot::Lunch, "Chole"), 0);
        assert_eq!(selection.quantity(MealSlot::Lunch, "Chicken Masala"), 0);
    }

    #[test]
    fn test_item_set_toggles_independently() {
        let special = DailySpecial::ItemSet {
            items: vec![
                crate::core::catalog::FoodItem::dish("A", 100, 4.0),
                crate::core::catalog::FoodItem::dish("B", 120, 4.0),
            ],
        };
        let mut selection = SelectionState::default();

        selection.toggle_choice(MealSlot::Dinner, &special, "A");
        selection.toggle_choice(MealSlot::Dinner, &special, "B");
        assert_eq!(selection.quantity(MealSlot::Dinner, "A"), 1);
        assert_eq!(selection.quantity(MealSlot::Dinner, "B"), 1);
    }

    #[test]
    fn test_toggle_unknown_item_is_ignored() {
        let catalog = Catalog::mess();
        let special = catalog.lookup(MealSlot::Lunch, Weekday::Tue).special.unwrap();
        let mut selection = SelectionState::default();

        assert_eq!(selection.toggle_choice(MealSlot::Lunch, special, "Pizza"), None);
        assert!(selection.is_clear(MealSlot::Lunch));
    }

    #[test]
    fn test_summarize_tuesday_lunch() {
        let catalog = Catalog::mess();
        let entry = catalog.lookup(MealSlot::Lunch, Weekday::Tue);
        let mut selection = SelectionState::default();

        selection.toggle_choice(MealSlot::Lunch, entry.special.unwrap(), "Chicken Curry");
        selection.set_quantity(MealSlot::Lunch, "Dal", 1);
        selection.set_quantity(MealSlot::Lunch, "Rice", 1);

        let summary = selection.summarize(MealSlot::Lunch, &entry);
        assert_eq!(summary.total_calories, 660);
        assert_eq!(summary.item_count, 3);
    }

    #[test]
    fn test_summarize_scales_staples_by_quantity() {
        let catalog = Catalog::mess();
        let entry = catalog.lookup(MealSlot::Dinner, Weekday::Mon);
        let mut selection = SelectionState::default();

        selection.set_quantity(MealSlot::Dinner, "Roti", 3);
        let summary = selection.summarize(MealSlot::Dinner, &entry);

        assert_eq!(summary.total_calories, 210);
        assert_eq!(summary.total_protein, 7.5);
        assert_eq!(summary.item_count, 1);
    }

    #[test]
    fn test_special_extras_follow_either_primary() {
        let catalog = Catalog::mess();
        let entry = catalog.lookup(MealSlot::Dinner, Weekday::Fri);
        let mut selection = SelectionState::default();

        assert_eq!(selection.summarize(MealSlot::Dinner, &entry).item_count, 0);

        selection.toggle_choice(MealSlot::Dinner, entry.special.unwrap(), "Chicken Biryani");
        let items = selection.items_to_log(MealSlot::Dinner, &entry);
        let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["Chicken Biryani", "Raita"]);
        assert_eq!(selection.summarize(MealSlot::Dinner, &entry).total_calories, 580);
    }

    #[test]
    fn test_special_dishes_are_not_quantity_scaled() {
        let catalog = Catalog::mess();
        let entry = catalog.lookup(MealSlot::Snack, Weekday::Sun);
        let mut selection = SelectionState::default();

        // Forced through the staple path; still counts once.
        selection.set_quantity(MealSlot::Snack, "Pani Puri", 5);
        assert_eq!(selection.summarize(MealSlot::Snack, &entry).total_calories, 180);
    }

    #[test]
    fn test_clear_only_touches_one_slot() {
        let mut selection = SelectionState::default();
        selection.set_quantity(MealSlot::Lunch, "Rice", 1);
        selection.set_quantity(MealSlot::Dinner, "Rice", 2);

        selection.clear(MealSlot::Lunch);

        assert!(selection.is_clear(MealSlot::Lunch));
        assert_eq!(selection.quantity(MealSlot::Dinner, "Rice"), 2);
    }
}
