/// Menu catalog: meal slots, food items and the weekly mess menu
pub mod catalog;
/// Day keys, the clock abstraction and weekday indexing
pub mod day;
/// Pure calorie/macro aggregation and the daily summary
pub mod nutrition;
/// User profile, onboarding goals and preferences
pub mod profile;
/// Background day-boundary watcher
pub mod rollover;
/// Pending menu picks per meal slot
pub mod selection;
/// Per-user composition root tying store, clock and tracker together
pub mod session;
/// Named JSON snapshot persistence
pub mod store;
/// Daily meals, water, booking flags and stats history
pub mod tracker;
