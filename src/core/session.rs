//! One user's tracking session.
//!
//! A [`Session`] owns everything a single user can change: profile,
//! preferences and the [`DailyTracker`]. Every mutator reads the clock once,
//! applies a day change first (reset, new-day stats record, save), applies
//! its own change, then writes the snapshots back. Persistence is fire-and-forget: a failed load
//! falls back to defaults and a failed save is logged and otherwise ignored,
//! so in-memory state is never rolled back because of the store.

use crate::config::tracker::TrackerSettings;
use crate::core::{
    catalog::{Catalog, ItemKind, MealSlot, MenuEntry},
    day::{Clock, DayKey, SystemClock},
    nutrition::DailySummary,
    profile::{OnboardingInput, Preference, Preferences, ProfileChange, ProfileUpdate, UserProfile},
    selection::SelectionSummary,
    store::{self, SnapshotStore},
    tracker::{DailyTracker, LoggedMealEntry, Rollover, WaterEntry},
};
use crate::errors::Result;
use chrono::Weekday;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of [`Session::pick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// No such item on that menu
    Unknown,
    /// Slot already committed today
    Locked,
    /// Staple quantity now set to this value
    Quantity(u32),
    /// Special dish now picked (`true`) or un-picked
    Toggled(bool),
    /// Special dishes are only picked from today's menu
    NotToday,
    /// Special dishes have no quantity to step
    NotStaple,
}

/// Per-user composition root.
pub struct Session<S: SnapshotStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    settings: TrackerSettings,
    catalog: Arc<Catalog>,
    profile: UserProfile,
    onboarded: bool,
    preferences: Preferences,
    tracker: DailyTracker,
}

impl<S: SnapshotStore, C: Clock> Session<S, C> {
    /// Fresh session that has never been persisted.
    pub fn new(store: S, clock: C, settings: TrackerSettings, catalog: Arc<Catalog>) -> Self {
        Self {
            store,
            clock,
            settings,
            catalog,
            profile: UserProfile::default(),
            onboarded: false,
            preferences: Preferences::default(),
            tracker: DailyTracker::default(),
        }
    }

    /// Restores a session from `store`.
    ///
    /// Each snapshot is read independently; a missing or unreadable one
    /// leaves that part at its default. A day change since the last save is
    /// applied before the session is returned.
    pub async fn load(store: S, clock: C, settings: TrackerSettings, catalog: Arc<Catalog>) -> Self {
        let profile = load_or_default(&store, store::USER).await;
        let onboarded = load_or_default(&store, store::ONBOARDED).await;
        let preferences = load_or_default(&store, store::PREFERENCES).await;
        let tracker = DailyTracker::restore(
            load_or_default(&store, store::LAST_DATE).await,
            load_or_default(&store, store::MEALS).await,
            load_or_default(&store, store::WATER).await,
            load_or_default(&store, store::BOOKED).await,
            load_or_default(&store, store::DAILY_STATS).await,
        );

        let mut session = Self {
            store,
            clock,
            settings,
            catalog,
            profile,
            onboarded,
            preferences,
            tracker,
        };
        session.check_rollover().await;
        session
    }

    /// Profile.
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Whether onboarding was completed.
    pub const fn is_onboarded(&self) -> bool {
        self.onboarded
    }

    /// Dietary preferences.
    pub const fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Tracker state (read-only).
    pub const fn tracker(&self) -> &DailyTracker {
        &self.tracker
    }

    /// Settings in effect.
    pub const fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    /// Today according to the session clock.
    pub fn today(&self) -> DayKey {
        self.clock.today()
    }

    /// Calorie goal in effect.
    pub const fn calorie_goal(&self) -> u32 {
        self.settings.effective_calorie_goal(self.profile.goal_calories)
    }

    /// Water goal in effect (ml).
    pub const fn water_goal(&self) -> u32 {
        self.settings.effective_water_goal(self.profile.goal_water)
    }

    /// Highest water total allowed right now (ml).
    pub fn water_cap(&self) -> u32 {
        self.settings.water_cap(self.profile.goal_water)
    }

    /// Menu for `slot` on `weekday`.
    pub fn menu(&self, slot: MealSlot, weekday: Weekday) -> MenuEntry<'_> {
        self.catalog.lookup(slot, weekday)
    }

    /// Runs the day-boundary check with no other mutation. Safe to call as
    /// often as needed; it only writes when the day actually changed.
    pub async fn check_rollover(&mut self) -> Option<Rollover> {
        let today = self.clock.today();
        self.roll_over_to(today).await
    }

    /// Rollover check for the "user is back" trigger.
    pub async fn on_foreground(&mut self) -> Option<Rollover> {
        debug!("Foreground day check");
        self.check_rollover().await
    }

    /// Stores the onboarding answers and derived goals.
    ///
    /// # Errors
    /// Returns [`crate::errors::Error::InvalidProfile`] if the answers fail
    /// validation; nothing is changed in that case.
    pub async fn complete_onboarding(&mut self, input: OnboardingInput) -> Result<()> {
        let profile = input.into_profile()?;
        let today = self.enter_day().await;
        info!(
            "Onboarded {} with goals {} kcal / {} ml",
            profile.name, profile.goal_calories, profile.goal_water
        );

        self.profile = profile;
        self.onboarded = true;
        let cap = self.water_cap();
        self.tracker.apply_water_cap(today, cap);
        self.tracker.record_daily_stats(today, self.profile.weight);
        self.persist().await;
        Ok(())
    }

    /// Applies a profile edit. A weight change refreshes today's stats and a
    /// new water goal re-applies the cap to today's total.
    pub async fn update_profile(&mut self, update: ProfileUpdate) -> ProfileChange {
        let today = self.enter_day().await;
        let change = update.apply(&mut self.profile);
        let cap = self.water_cap();
        let water_capped = self.tracker.apply_water_cap(today, cap);
        if change.weight_changed || water_capped {
            self.tracker.record_daily_stats(today, self.profile.weight);
        }
        self.persist().await;
        change
    }

    /// Flips a dietary preference and returns its new value.
    pub async fn toggle_preference(&mut self, preference: Preference) -> bool {
        self.enter_day().await;
        let enabled = self.preferences.toggle(preference);
        self.persist().await;
        enabled
    }

    /// Records a drink. Returns false for zero or when already at the cap.
    pub async fn add_water(&mut self, amount_ml: u32) -> bool {
        let today = self.enter_day().await;
        let cap = self.water_cap();
        let added = self
            .tracker
            .add_water(today, amount_ml, self.clock.time_label(), cap);
        if added {
            self.tracker.record_daily_stats(today, self.profile.weight);
        }
        self.persist().await;
        added
    }

    /// Removes the drink at `index` (0 = most recent).
    pub async fn remove_water(&mut self, index: usize) -> Option<WaterEntry> {
        let today = self.enter_day().await;
        let cap = self.water_cap();
        let removed = self.tracker.remove_water(today, index, cap);
        if removed.is_some() {
            self.tracker.record_daily_stats(today, self.profile.weight);
        }
        self.persist().await;
        removed
    }

    /// Picks `item` from the `slot` menu of `weekday`.
    ///
    /// Staples take `quantity` (default 1, negatives clamp to 0); special
    /// dishes toggle and ignore `quantity`. Specials can only be picked on
    /// today's menu, since `/confirm` logs against today.
    pub async fn pick(
        &mut self,
        slot: MealSlot,
        weekday: Weekday,
        item: &str,
        quantity: Option<i64>,
    ) -> PickOutcome {
        let today = self.enter_day().await;
        let catalog = Arc::clone(&self.catalog);
        let entry = catalog.lookup(slot, weekday);

        let outcome = match (entry.find(item), entry.special) {
            (None, _) | (Some((ItemKind::Special, _)), None) => return PickOutcome::Unknown,
            (Some((ItemKind::Staple, food)), _) => self
                .tracker
                .set_selection_quantity(today, slot, weekday, &food.name, quantity.unwrap_or(1))
                .map(PickOutcome::Quantity),
            (Some((ItemKind::Special, _)), Some(_)) if weekday != today.weekday() => {
                return PickOutcome::NotToday;
            }
            (Some((ItemKind::Special, food)), Some(special)) => self
                .tracker
                .toggle_selection(today, slot, weekday, special, &food.name)
                .map(PickOutcome::Toggled),
        };
        outcome.unwrap_or(PickOutcome::Locked)
    }

    /// Steps a staple quantity by `delta`.
    ///
    /// Only staples have a quantity: special dishes get
    /// [`PickOutcome::NotStaple`] and must go through [`Session::pick`].
    pub async fn adjust_pick(
        &mut self,
        slot: MealSlot,
        weekday: Weekday,
        item: &str,
        delta: i64,
    ) -> PickOutcome {
        let today = self.enter_day().await;
        let catalog = Arc::clone(&self.catalog);
        let entry = catalog.lookup(slot, weekday);

        match entry.find(item) {
            None => PickOutcome::Unknown,
            Some((ItemKind::Special, _)) => PickOutcome::NotStaple,
            Some((ItemKind::Staple, food)) => self
                .tracker
                .adjust_selection_quantity(today, slot, weekday, &food.name, delta)
                .map_or(PickOutcome::Locked, PickOutcome::Quantity),
        }
    }

    /// Live totals for the pending selection against `weekday`'s menu.
    pub fn selection_summary(&self, slot: MealSlot, weekday: Weekday) -> SelectionSummary {
        let entry = self.catalog.lookup(slot, weekday);
        self.tracker.selection().summarize(slot, &entry)
    }

    /// Commits today's selection for `slot`. `None` if already booked or empty.
    pub async fn confirm_meal(&mut self, slot: MealSlot) -> Option<Vec<LoggedMealEntry>> {
        let today = self.enter_day().await;
        let catalog = Arc::clone(&self.catalog);
        let entry = catalog.lookup(slot, today.weekday());

        let logged = self.tracker.confirm_meal(today, slot, &entry);
        self.persist().await;
        logged
    }

    /// Logs pre-scaled items to `slot` and books it.
    pub async fn log_meal(&mut self, slot: MealSlot, items: Vec<LoggedMealEntry>) {
        let today = self.enter_day().await;
        self.tracker.log_meal(today, slot, items);
        self.persist().await;
    }

    /// Logs one free-form entry without booking the slot.
    pub async fn add_food(&mut self, slot: MealSlot, entry: LoggedMealEntry) {
        let today = self.enter_day().await;
        self.tracker.add_food(today, slot, entry);
        self.persist().await;
    }

    /// Removes a logged entry by position.
    pub async fn remove_meal_item(&mut self, slot: MealSlot, index: usize) -> Option<LoggedMealEntry> {
        let today = self.enter_day().await;
        let removed = self.tracker.remove_meal_item(today, slot, index);
        self.persist().await;
        removed
    }

    /// Changes the serving count of a logged entry.
    pub async fn update_meal_quantity(&mut self, slot: MealSlot, index: usize, quantity: u32) -> bool {
        let today = self.enter_day().await;
        let updated = self
            .tracker
            .update_meal_quantity(today, slot, index, quantity);
        self.persist().await;
        updated
    }

    /// Empties one slot's log.
    pub async fn clear_meal(&mut self, slot: MealSlot) {
        let today = self.enter_day().await;
        self.tracker.clear_meal(today, slot);
        self.persist().await;
    }

    /// Today's totals against the goals in effect.
    pub fn daily_summary(&self) -> DailySummary {
        DailySummary::build(
            self.tracker.meals(),
            self.tracker.water(),
            self.calorie_goal(),
            self.water_goal(),
        )
    }

    /// Water per day for the last `days` days ending today, oldest first.
    /// Today uses the live total; days without a record read 0.
    pub fn water_trend(&self, days: u32) -> Vec<(DayKey, u32)> {
        let today = self.clock.today();
        let stats = self.tracker.daily_stats();
        (0..days)
            .rev()
            .map(|offset| {
                let day = today.days_before(offset);
                let water = if offset == 0 {
                    self.tracker.water().current
                } else {
                    stats.get(&day).map_or(0, |record| record.water)
                };
                (day, water)
            })
            .collect()
    }

    /// Weight on the most recent `limit` recorded days, oldest first.
    pub fn weight_trend(&self, limit: usize) -> Vec<(DayKey, f64)> {
        let stats = self.tracker.daily_stats();
        let skip = stats.len().saturating_sub(limit);
        stats
            .iter()
            .skip(skip)
            .map(|(day, record)| (*day, record.weight))
            .collect()
    }

    /// Forgets everything, in memory and in the store.
    pub async fn reset(&mut self) {
        info!("Resetting session");
        self.profile = UserProfile::default();
        self.onboarded = false;
        self.preferences = Preferences::default();
        self.tracker = DailyTracker::default();

        if let Err(e) = self.store.clear_all().await {
            warn!("Failed to clear snapshots: {}", e);
        }
    }

    /// Reads the clock and applies any day change before a mutation, so
    /// every mutator handles the new day the same way.
    async fn enter_day(&mut self) -> DayKey {
        let today = self.clock.today();
        self.roll_over_to(today).await;
        today
    }

    /// Resets for a new day, stamps its stats record and persists.
    async fn roll_over_to(&mut self, today: DayKey) -> Option<Rollover> {
        let rollover = self.tracker.roll_over(today)?;
        self.tracker.record_daily_stats(today, self.profile.weight);
        self.persist().await;
        Some(rollover)
    }

    /// Writes every snapshot. Failures are logged and dropped.
    async fn persist(&self) {
        save_or_warn(&self.store, store::USER, &self.profile).await;
        save_or_warn(&self.store, store::ONBOARDED, &self.onboarded).await;
        save_or_warn(&self.store, store::PREFERENCES, &self.preferences).await;
        save_or_warn(&self.store, store::MEALS, self.tracker.meals()).await;
        save_or_warn(&self.store, store::WATER, self.tracker.water()).await;
        save_or_warn(&self.store, store::BOOKED, self.tracker.booked()).await;
        save_or_warn(&self.store, store::DAILY_STATS, self.tracker.daily_stats()).await;
        save_or_warn(&self.store, store::LAST_DATE, &self.tracker.last_day()).await;
    }
}

async fn load_or_default<S, T>(store: &S, name: &str) -> T
where
    S: SnapshotStore,
    T: DeserializeOwned + Default,
{
    match store.load(name).await {
        Ok(Some(value)) => serde_json::from_value(value).unwrap_or_else(|e| {
            warn!("Ignoring unreadable snapshot {}: {}", name, e);
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            warn!("Failed to load snapshot {}: {}", name, e);
            T::default()
        }
    }
}

async fn save_or_warn<S, T>(store: &S, name: &str, value: &T)
where
    S: SnapshotStore,
    T: Serialize + ?Sized,
{
    let result = match serde_json::to_value(value) {
        Ok(json) => store.save(name, &json).await,
        Err(e) => {
            warn!("Failed to encode snapshot {}: {}", name, e);
            return;
        }
    };
    if let Err(e) = result {
        warn!("Failed to save snapshot {}: {}", name, e);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::{
        catalog::FoodItem,
        profile::{ActivityLevel, Gender},
        store::MemoryStore,
    };
    use crate::errors::Error;
    use crate::test_utils::{ManualClock, init_test_tracing, memory_session};
    use serde_json::{Value, json};

    fn onboarding() -> OnboardingInput {
        OnboardingInput {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            age: 25,
            gender: Gender::Female,
            height: 160.0,
            weight: 60.0,
            activity_level: ActivityLevel::Moderate,
        }
    }

    struct FailingStore;

    impl SnapshotStore for FailingStore {
        async fn load(&self, name: &str) -> Result<Option<Value>> {
            Err(Error::Snapshot {
                name: name.to_string(),
                message: "unavailable".to_string(),
            })
        }

        async fn save(&self, name: &str, _value: &Value) -> Result<()> {
            Err(Error::Snapshot {
                name: name.to_string(),
                message: "quota exceeded".to_string(),
            })
        }

        async fn clear_all(&self) -> Result<()> {
            Err(Error::Snapshot {
                name: "*".to_string(),
                message: "unavailable".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_water_example_with_default_goal() {
        let clock = ManualClock::new(2024, 3, 4);
        let mut session = memory_session(clock).await;

        assert!(session.add_water(250).await);
        assert!(session.add_water(500).await);
        assert_eq!(session.tracker().water().current, 750);

        let removed = session.remove_water(0).await.unwrap();
        assert_eq!(removed.amount, 500);
        assert_eq!(session.tracker().water().current, 250);

        session.add_water(2000).await;
        assert_eq!(session.tracker().water().current, 2250);
        assert_eq!(session.water_cap(), 3000);
    }

    #[tokio::test]
    async fn test_water_cap_follows_profile_goal() {
        let clock = ManualClock::new(2024, 3, 4);
        let mut session = memory_session(clock).await;
        session.complete_onboarding(onboarding()).await.unwrap();

        // goal 2100 ml -> cap 3150
        session.add_water(5000).await;
        assert_eq!(session.tracker().water().current, 3150);
        assert!(!session.add_water(100).await);
    }

    #[tokio::test]
    async fn test_rollover_before_first_drink_of_the_day() {
        let clock = ManualClock::new(2024, 3, 4);
        let mut session = memory_session(clock.clone()).await;
        session.add_water(1500).await;
        let dish = FoodItem::dish("Thali", 300, 4.0);
        session
            .add_food(MealSlot::Lunch, LoggedMealEntry::from_food(&dish, 1))
            .await;

        clock.advance_days(1);
        session.add_water(200).await;

        assert_eq!(session.tracker().water().current, 200);
        assert!(session.tracker().meals().lunch.is_empty());
        assert_eq!(session.tracker().last_day(), Some(clock.today()));
    }

    #[tokio::test]
    async fn test_check_rollover_is_idempotent() {
        init_test_tracing();
        let clock = ManualClock::new(2024, 3, 4);
        let mut session = memory_session(clock.clone()).await;
        session.add_water(400).await;

        assert!(session.check_rollover().await.is_none());
        clock.advance_days(1);
        let rollover = session.check_rollover().await.unwrap();
        assert_eq!(rollover.water_cleared_ml, 400);
        assert!(session.on_foreground().await.is_none());
        assert!(session.check_rollover().await.is_none());
    }

    #[tokio::test]
    async fn test_state_survives_reload() {
        let clock = ManualClock::new(2024, 3, 5);
        let store = Arc::new(MemoryStore::new());
        let catalog = Arc::new(Catalog::mess());

        let mut session = Session::new(
            Arc::clone(&store),
            clock.clone(),
            TrackerSettings::default(),
            Arc::clone(&catalog),
        );
        session.complete_onboarding(onboarding()).await.unwrap();
        session.add_water(300).await;
        session.pick(MealSlot::Lunch, Weekday::Tue, "Dal", None).await;
        session.confirm_meal(MealSlot::Lunch).await.unwrap();
        session.toggle_preference(Preference::Vegetarian).await;

        let reloaded = Session::load(
            Arc::clone(&store),
            clock.clone(),
            TrackerSettings::default(),
            catalog,
        )
        .await;

        assert!(reloaded.is_onboarded());
        assert_eq!(reloaded.profile().name, "Asha");
        assert!(reloaded.preferences().vegetarian);
        assert_eq!(reloaded.tracker().water().current, 300);
        assert_eq!(reloaded.tracker().meals().lunch.len(), 1);
        assert!(reloaded.tracker().booked().lunch);
    }

    #[tokio::test]
    async fn test_reload_on_a_new_day_resets_counters() {
        let clock = ManualClock::new(2024, 3, 5);
        let store = Arc::new(MemoryStore::new());
        let catalog = Arc::new(Catalog::mess());

        let mut session = Session::new(
            Arc::clone(&store),
            clock.clone(),
            TrackerSettings::default(),
            Arc::clone(&catalog),
        );
        session.add_water(900).await;

        clock.advance_days(2);
        let reloaded = Session::load(store, clock.clone(), TrackerSettings::default(), catalog).await;

        assert_eq!(reloaded.tracker().water().current, 0);
        assert_eq!(reloaded.tracker().last_day(), Some(clock.today()));
        assert_eq!(
            reloaded.tracker().daily_stats()[&clock.today().days_before(2)].water,
            900
        );
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_falls_back_to_default() {
        let store = Arc::new(MemoryStore::new());
        store.save(store::WATER, &json!("garbage")).await.unwrap();
        store.save(store::ONBOARDED, &json!(true)).await.unwrap();

        let session = Session::load(
            store,
            ManualClock::new(2024, 3, 5),
            TrackerSettings::default(),
            Arc::new(Catalog::mess()),
        )
        .await;

        assert!(session.is_onboarded());
        assert_eq!(session.tracker().water().current, 0);
    }

    #[tokio::test]
    async fn test_failing_store_never_blocks_tracking() {
        init_test_tracing();
        let mut session = Session::load(
            FailingStore,
            ManualClock::new(2024, 3, 5),
            TrackerSettings::default(),
            Arc::new(Catalog::mess()),
        )
        .await;

        assert!(session.add_water(250).await);
        assert_eq!(session.tracker().water().current, 250);
        session.reset().await;
        assert_eq!(session.tracker().water().current, 0);
    }

    #[tokio::test]
    async fn test_pick_and_confirm_tuesday_lunch() {
        let clock = ManualClock::new(2024, 3, 5); // Tuesday
        let mut session = memory_session(clock).await;

        assert_eq!(
            session.pick(MealSlot::Lunch, Weekday::Tue, "Chicken Curry", None).await,
            PickOutcome::Toggled(true)
        );
        assert_eq!(
            session.pick(MealSlot::Lunch, Weekday::Tue, "Dal", Some(1)).await,
            PickOutcome::Quantity(1)
        );
        session.pick(MealSlot::Lunch, Weekday::Tue, "Rice", None).await;
        assert_eq!(
            session.pick(MealSlot::Lunch, Weekday::Tue, "Pizza", None).await,
            PickOutcome::Unknown
        );

        let summary = session.selection_summary(MealSlot::Lunch, Weekday::Tue);
        assert_eq!(summary.total_calories, 660);
        assert_eq!(summary.item_count, 3);

        let logged = session.confirm_meal(MealSlot::Lunch).await.unwrap();
        assert_eq!(logged.len(), 3);
        assert!(session.tracker().selection().is_clear(MealSlot::Lunch));
        assert_eq!(session.daily_summary().total_calories, 660);

        assert_eq!(
            session.pick(MealSlot::Lunch, Weekday::Tue, "Rice", None).await,
            PickOutcome::Locked
        );
        assert_eq!(
            session.pick(MealSlot::Lunch, Weekday::Wed, "Rice", None).await,
            PickOutcome::Quantity(1)
        );
        assert!(session.confirm_meal(MealSlot::Lunch).await.is_none());
    }

    #[tokio::test]
    async fn test_adjust_pick_steps_and_floors_at_zero() {
        let clock = ManualClock::new(2024, 3, 5);
        let mut session = memory_session(clock).await;

        for (delta, expected) in [(1, 1), (2, 3), (-5, 0), (2, 2)] {
            assert_eq!(
                session
                    .adjust_pick(MealSlot::Dinner, Weekday::Tue, "Roti", delta)
                    .await,
                PickOutcome::Quantity(expected)
            );
        }

        session.confirm_meal(MealSlot::Dinner).await.unwrap();
        assert_eq!(
            session
                .adjust_pick(MealSlot::Dinner, Weekday::Tue, "Roti", 1)
                .await,
            PickOutcome::Locked
        );
    }

    #[tokio::test]
    async fn test_adjust_pick_refuses_special_dishes() {
        let clock = ManualClock::new(2024, 3, 5); // Tuesday
        let mut session = memory_session(clock).await;

        session
            .pick(MealSlot::Lunch, Weekday::Tue, "Chicken Curry", None)
            .await;
        assert_eq!(
            session
                .adjust_pick(MealSlot::Lunch, Weekday::Tue, "Paneer Sabzi", 3)
                .await,
            PickOutcome::NotStaple
        );
        assert_eq!(
            session
                .adjust_pick(MealSlot::Lunch, Weekday::Tue, "Pizza", 1)
                .await,
            PickOutcome::Unknown
        );

        let selection = session.tracker().selection();
        assert_eq!(selection.quantity(MealSlot::Lunch, "Paneer Sabzi"), 0);
        assert_eq!(selection.quantity(MealSlot::Lunch, "Chicken Curry"), 1);

        let logged = session.confirm_meal(MealSlot::Lunch).await.unwrap();
        let names: Vec<&str> = logged.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, vec!["Chicken Curry"]);
    }

    #[tokio::test]
    async fn test_specials_are_picked_from_todays_menu_only() {
        let clock = ManualClock::new(2024, 3, 5); // Tuesday
        let mut session = memory_session(clock).await;

        assert_eq!(
            session
                .pick(MealSlot::Lunch, Weekday::Wed, "Egg Curry", None)
                .await,
            PickOutcome::NotToday
        );
        assert!(session.tracker().selection().is_clear(MealSlot::Lunch));

        // Staples stay editable on any day's menu
        assert_eq!(
            session
                .pick(MealSlot::Lunch, Weekday::Wed, "Rice", Some(2))
                .await,
            PickOutcome::Quantity(2)
        );
    }

    #[tokio::test]
    async fn test_pick_after_midnight_persists_the_new_day() {
        let clock = ManualClock::new(2024, 3, 4);
        let store = Arc::new(MemoryStore::new());
        let mut session = Session::new(
            Arc::clone(&store),
            clock.clone(),
            TrackerSettings::default(),
            Arc::new(Catalog::mess()),
        );
        session.complete_onboarding(onboarding()).await.unwrap();
        session.add_water(700).await;

        clock.advance_days(1);
        session
            .pick(MealSlot::Lunch, Weekday::Tue, "Rice", None)
            .await;

        let today = clock.today();
        assert_eq!(session.tracker().daily_stats()[&today].weight, 60.0);
        assert_eq!(session.tracker().daily_stats()[&today].water, 0);
        assert_eq!(
            store.load(store::LAST_DATE).await.unwrap(),
            Some(json!(today.to_string()))
        );
        assert_eq!(
            store.load(store::WATER).await.unwrap().unwrap()["current"],
            json!(0)
        );
    }

    #[tokio::test]
    async fn test_log_meal_survives_reload() {
        let clock = ManualClock::new(2024, 3, 4);
        let store = Arc::new(MemoryStore::new());
        let catalog = Arc::new(Catalog::mess());
        let mut session = Session::new(
            Arc::clone(&store),
            clock.clone(),
            TrackerSettings::default(),
            Arc::clone(&catalog),
        );
        session
            .pick(MealSlot::Snack, Weekday::Mon, "Tea", Some(2))
            .await;

        let samosa = FoodItem::dish("Samosa", 240, 4.3);
        session
            .log_meal(MealSlot::Snack, vec![LoggedMealEntry::from_food(&samosa, 2)])
            .await;
        assert!(session.tracker().selection().is_clear(MealSlot::Snack));

        let mut reloaded = Session::load(
            Arc::clone(&store),
            clock.clone(),
            TrackerSettings::default(),
            catalog,
        )
        .await;
        let snacks = reloaded.tracker().meals().get(MealSlot::Snack);
        assert_eq!(snacks.len(), 1);
        assert_eq!(snacks[0].calories, 480);
        assert!(*reloaded.tracker().booked().get(MealSlot::Snack));
        assert!(reloaded.tracker().selection().is_clear(MealSlot::Snack));
        assert_eq!(
            reloaded
                .pick(MealSlot::Snack, Weekday::Mon, "Tea", None)
                .await,
            PickOutcome::Locked
        );
    }

    #[tokio::test]
    async fn test_lower_water_goal_caps_todays_total() {
        let clock = ManualClock::new(2024, 3, 4);
        let mut session = memory_session(clock.clone()).await;
        session.complete_onboarding(onboarding()).await.unwrap();
        session.add_water(2500).await;
        assert_eq!(session.tracker().water().current, 2500);

        session
            .update_profile(ProfileUpdate {
                goal_water: Some(1000),
                ..ProfileUpdate::default()
            })
            .await;

        assert_eq!(session.water_cap(), 1500);
        assert_eq!(session.tracker().water().current, 1500);
        assert_eq!(session.tracker().daily_stats()[&clock.today()].water, 1500);
        assert_eq!(session.tracker().water().history.len(), 1);
    }

    #[tokio::test]
    async fn test_weight_change_writes_only_today() {
        let clock = ManualClock::new(2024, 3, 4);
        let mut session = memory_session(clock.clone()).await;
        session.complete_onboarding(onboarding()).await.unwrap();

        clock.advance_days(1);
        let change = session
            .update_profile(ProfileUpdate {
                weight: Some(59.0),
                ..ProfileUpdate::default()
            })
            .await;
        assert!(change.weight_changed);

        let yesterday = clock.today().days_before(1);
        let stats = session.tracker().daily_stats();
        assert_eq!(stats[&yesterday].weight, 60.0);
        assert_eq!(stats[&clock.today()].weight, 59.0);
        assert_eq!(session.weight_trend(7), vec![(yesterday, 60.0), (clock.today(), 59.0)]);
    }

    #[tokio::test]
    async fn test_water_trend_oldest_first() {
        let clock = ManualClock::new(2024, 3, 1);
        let mut session = memory_session(clock.clone()).await;
        session.add_water(1000).await;
        clock.advance_days(2);
        session.add_water(300).await;

        let trend = session.water_trend(4);
        let values: Vec<u32> = trend.iter().map(|(_, water)| *water).collect();
        assert_eq!(values, vec![0, 1000, 0, 300]);
        assert_eq!(trend[3].0, clock.today());
        assert_eq!(trend[0].0, DayKey::from_ymd(2024, 2, 29).unwrap());
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let clock = ManualClock::new(2024, 3, 4);
        let store = Arc::new(MemoryStore::new());
        let mut session = Session::new(
            Arc::clone(&store),
            clock.clone(),
            TrackerSettings::default(),
            Arc::new(Catalog::mess()),
        );
        session.complete_onboarding(onboarding()).await.unwrap();
        session.add_water(500).await;

        session.reset().await;

        assert!(!session.is_onboarded());
        assert_eq!(session.profile(), &UserProfile::default());
        assert!(session.tracker().daily_stats().is_empty());
        assert!(session.tracker().last_day().is_none());
        for name in store::ALL_SNAPSHOTS {
            assert!(store.load(name).await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn test_invalid_onboarding_changes_nothing() {
        let clock = ManualClock::new(2024, 3, 4);
        let mut session = memory_session(clock).await;
        let bad = OnboardingInput {
            age: 0,
            ..onboarding()
        };

        assert!(session.complete_onboarding(bad).await.is_err());
        assert!(!session.is_onboarded());
        assert_eq!(session.calorie_goal(), 2000);
    }
}
