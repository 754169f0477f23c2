//! Daily tracker - per-day meals, water, booking flags and stats history.
//!
//! The tracker only ever holds one day's worth of mutable state. Every public
//! mutator takes today's [`DayKey`] and first runs [`DailyTracker::roll_over`],
//! so a day boundary crossed while idle is applied before the mutation that
//! noticed it. Rolling over twice for the same day is a no-op.
//!
//! Calorie and macro totals are never stored here; see [`crate::core::nutrition`].

use crate::core::{
    catalog::{DailySpecial, FoodItem, MealSlot, MenuEntry, PerSlot},
    day::{DayKey, has_rolled_over},
    selection::SelectionState,
};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// A committed food entry. Nutrient fields are totals for `quantity` servings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedMealEntry {
    /// Dish name
    pub name: String,
    /// Servings eaten
    #[serde(default = "one")]
    pub quantity: u32,
    /// Total energy (kcal)
    pub calories: u32,
    /// Total protein (g)
    #[serde(default)]
    pub protein: f64,
    /// Total carbohydrates (g)
    #[serde(default)]
    pub carbs: f64,
    /// Total fat (g)
    #[serde(default)]
    pub fat: f64,
}

const fn one() -> u32 {
    1
}

impl LoggedMealEntry {
    /// Scales a catalog item by `quantity` servings.
    #[must_use]
    pub fn from_food(item: &FoodItem, quantity: u32) -> Self {
        let servings = f64::from(quantity);
        Self {
            name: item.name.clone(),
            quantity,
            calories: item.calories.saturating_mul(quantity),
            protein: item.protein * servings,
            carbs: item.carbs * servings,
            fat: item.fat * servings,
        }
    }

    /// Re-derives the totals for a new serving count from the current per-serving
    /// values. Calories round to whole kcal, macros to one decimal.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn rescale(&mut self, quantity: u32) {
        let old = f64::from(self.quantity.max(1));
        let new = f64::from(quantity);
        let per = |total: f64| total / old;
        let tenth = |value: f64| (value * 10.0).round() / 10.0;

        self.calories = (per(f64::from(self.calories)) * new).round().max(0.0) as u32;
        self.protein = tenth(per(self.protein) * new);
        self.carbs = tenth(per(self.carbs) * new);
        self.fat = tenth(per(self.fat) * new);
        self.quantity = quantity;
    }
}

/// Logged entries per slot, in insertion order.
pub type Meals = PerSlot<Vec<LoggedMealEntry>>;

/// "Already logged today" flag per slot.
pub type BookedMeals = PerSlot<bool>;

/// One drink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterEntry {
    /// Volume (ml)
    pub amount: u32,
    /// Wall-clock label (`HH:MM`)
    pub time: String,
}

/// Today's water intake. History is most-recent-first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterState {
    /// Running total, clamped to `[0, cap]`
    pub current: u32,
    /// Drinks, newest first
    pub history: Vec<WaterEntry>,
}

impl WaterState {
    fn history_total(&self) -> u32 {
        self.history
            .iter()
            .fold(0_u32, |sum, entry| sum.saturating_add(entry.amount))
    }
}

/// End-of-day style snapshot used for trend charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyStatsRecord {
    /// Body weight (kg)
    pub weight: f64,
    /// Water consumed (ml)
    pub water: u32,
}

/// What a rollover threw away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rollover {
    /// Day whose counters were reset
    pub previous_day: DayKey,
    /// Day now being tracked
    pub new_day: DayKey,
    /// Logged entries dropped across all slots
    pub meals_cleared: usize,
    /// Water total dropped (ml)
    pub water_cleared_ml: u32,
}

/// Authoritative state for the current day plus the stats history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyTracker {
    last_day: Option<DayKey>,
    meals: Meals,
    water: WaterState,
    booked: BookedMeals,
    daily_stats: BTreeMap<DayKey, DailyStatsRecord>,
    selection: SelectionState,
}

impl DailyTracker {
    /// Rebuilds a tracker from persisted parts.
    #[must_use]
    pub fn restore(
        last_day: Option<DayKey>,
        meals: Meals,
        water: WaterState,
        booked: BookedMeals,
        daily_stats: BTreeMap<DayKey, DailyStatsRecord>,
    ) -> Self {
        Self {
            last_day,
            meals,
            water,
            booked,
            daily_stats,
            selection: SelectionState::default(),
        }
    }

    /// Day the accumulators belong to, `None` before first use.
    #[must_use]
    pub const fn last_day(&self) -> Option<DayKey> {
        self.last_day
    }

    /// Logged meals.
    #[must_use]
    pub const fn meals(&self) -> &Meals {
        &self.meals
    }

    /// Water state.
    #[must_use]
    pub const fn water(&self) -> &WaterState {
        &self.water
    }

    /// Booking flags.
    #[must_use]
    pub const fn booked(&self) -> &BookedMeals {
        &self.booked
    }

    /// Stats history keyed by day.
    #[must_use]
    pub const fn daily_stats(&self) -> &BTreeMap<DayKey, DailyStatsRecord> {
        &self.daily_stats
    }

    /// Pending menu picks.
    #[must_use]
    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Resets the daily accumulators if `today` differs from the tracked day.
    ///
    /// Order matters: counters are cleared first, then the day key advances,
    /// so the caller's pending mutation lands on the fresh day. A tracker that
    /// has never seen a day simply adopts `today`.
    pub fn roll_over(&mut self, today: DayKey) -> Option<Rollover> {
        let previous_day = match self.last_day {
            None => {
                self.last_day = Some(today);
                return None;
            }
            Some(last) if !has_rolled_over(last, today) => return None,
            Some(last) => last,
        };

        let meals_cleared = self.meals.iter().map(|(_, entries)| entries.len()).sum();
        let water_cleared_ml = self.water.current;

        self.water = WaterState::default();
        self.meals = Meals::default();
        self.booked = BookedMeals::default();
        self.selection.clear_all();
        self.last_day = Some(today);

        info!(
            "New day detected ({} -> {}), reset {} meal entries and {} ml water",
            previous_day, today, meals_cleared, water_cleared_ml
        );

        Some(Rollover {
            previous_day,
            new_day: today,
            meals_cleared,
            water_cleared_ml,
        })
    }

    /// Records a drink of `amount` ml. `cap` is the most `current` may reach.
    ///
    /// Zero amounts are ignored, and so is any drink once the history already
    /// totals the cap. Returns whether the drink was recorded.
    pub fn add_water(&mut self, today: DayKey, amount: u32, time: String, cap: u32) -> bool {
        if amount == 0 {
            return false;
        }
        self.roll_over(today);

        let total = self.water.history_total();
        if total >= cap {
            debug!("Water already at cap ({} ml), ignoring {} ml", cap, amount);
            return false;
        }

        self.water.history.insert(0, WaterEntry { amount, time });
        self.water.current = total.saturating_add(amount).min(cap);
        true
    }

    /// Removes the drink at `index` (0 = most recent) and recomputes `current`
    /// against `cap`. Returns the removed entry, `None` if `index` is out of range.
    pub fn remove_water(&mut self, today: DayKey, index: usize, cap: u32) -> Option<WaterEntry> {
        self.roll_over(today);
        if index >= self.water.history.len() {
            return None;
        }

        let removed = self.water.history.remove(index);
        self.water.current = self.water.history_total().min(cap);
        Some(removed)
    }

    /// Re-applies `cap` after the water goal changed. Returns whether
    /// `current` moved.
    pub fn apply_water_cap(&mut self, today: DayKey, cap: u32) -> bool {
        self.roll_over(today);
        let capped = self.water.history_total().min(cap);
        let changed = capped != self.water.current;
        self.water.current = capped;
        changed
    }

    /// Appends committed items to `slot`, marks it booked and drops its picks.
    pub fn log_meal(&mut self, today: DayKey, slot: MealSlot, items: Vec<LoggedMealEntry>) {
        self.roll_over(today);
        info!("Logging {} item(s) to {}", items.len(), slot);

        self.meals.get_mut(slot).extend(items);
        *self.booked.get_mut(slot) = true;
        self.selection.clear(slot);
    }

    /// Appends one free-form entry (e.g. a food search hit) without booking the slot.
    pub fn add_food(&mut self, today: DayKey, slot: MealSlot, entry: LoggedMealEntry) {
        self.roll_over(today);
        self.meals.get_mut(slot).push(entry);
    }

    /// Removes the entry at `index` from `slot`.
    pub fn remove_meal_item(
        &mut self,
        today: DayKey,
        slot: MealSlot,
        index: usize,
    ) -> Option<LoggedMealEntry> {
        self.roll_over(today);
        let entries = self.meals.get_mut(slot);
        (index < entries.len()).then(|| entries.remove(index))
    }

    /// Changes the serving count of a logged entry. Zero or a bad index is refused.
    pub fn update_meal_quantity(
        &mut self,
        today: DayKey,
        slot: MealSlot,
        index: usize,
        quantity: u32,
    ) -> bool {
        self.roll_over(today);
        if quantity == 0 {
            return false;
        }
        match self.meals.get_mut(slot).get_mut(index) {
            Some(entry) => {
                entry.rescale(quantity);
                true
            }
            None => false,
        }
    }

    /// Empties one slot's log. The booking flag is left as is.
    pub fn clear_meal(&mut self, today: DayKey, slot: MealSlot) {
        self.roll_over(today);
        self.meals.get_mut(slot).clear();
    }

    /// True when edits to `slot` are locked: it was committed today and the
    /// menu being browsed is today's.
    #[must_use]
    pub fn is_locked(&self, today: DayKey, slot: MealSlot, browsing: Weekday) -> bool {
        self.last_day == Some(today) && *self.booked.get(slot) && browsing == today.weekday()
    }

    /// Sets a staple quantity in the pending selection. Refused while locked.
    pub fn set_selection_quantity(
        &mut self,
        today: DayKey,
        slot: MealSlot,
        browsing: Weekday,
        item: &str,
        quantity: i64,
    ) -> Option<u32> {
        self.roll_over(today);
        if self.is_locked(today, slot, browsing) {
            return None;
        }
        Some(self.selection.set_quantity(slot, item, quantity))
    }

    /// Steps a staple quantity by `delta`. Refused while locked.
    pub fn adjust_selection_quantity(
        &mut self,
        today: DayKey,
        slot: MealSlot,
        browsing: Weekday,
        item: &str,
        delta: i64,
    ) -> Option<u32> {
        self.roll_over(today);
        if self.is_locked(today, slot, browsing) {
            return None;
        }
        Some(self.selection.adjust_quantity(slot, item, delta))
    }

    /// Toggles a special dish in the pending selection. `None` while locked or
    /// if `item` is not part of `special`.
    pub fn toggle_selection(
        &mut self,
        today: DayKey,
        slot: MealSlot,
        browsing: Weekday,
        special: &DailySpecial,
        item: &str,
    ) -> Option<bool> {
        self.roll_over(today);
        if self.is_locked(today, slot, browsing) {
            return None;
        }
        self.selection.toggle_choice(slot, special, item)
    }

    /// Commits today's picks for `slot` against `entry`.
    ///
    /// Refused (returns `None`) if the slot is already booked today or nothing
    /// is picked. Otherwise logs the items and returns them.
    pub fn confirm_meal(
        &mut self,
        today: DayKey,
        slot: MealSlot,
        entry: &MenuEntry<'_>,
    ) -> Option<Vec<LoggedMealEntry>> {
        self.roll_over(today);
        if *self.booked.get(slot) {
            return None;
        }

        let items = self.selection.items_to_log(slot, entry);
        if items.is_empty() {
            return None;
        }
        self.log_meal(today, slot, items.clone());
        Some(items)
    }

    /// Writes `{weight, water}` for today, replacing only today's record.
    pub fn record_daily_stats(&mut self, today: DayKey, weight: f64) {
        self.roll_over(today);
        let record = DailyStatsRecord {
            weight,
            water: self.water.current,
        };
        self.daily_stats.insert(today, record);
    }
}
