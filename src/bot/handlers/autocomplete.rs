//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggests menu item names so `/pick` receives names that match the catalog
//! exactly.

use crate::{
    bot::BotData,
    core::catalog::{Catalog, MealSlot},
    errors::Error,
};
use chrono::{Datelike, Local, Weekday};

/// Discord's cap on autocomplete suggestions.
const MAX_SUGGESTIONS: usize = 25;

/// Item names on `weekday`'s menu that contain `partial` (case-insensitive),
/// de-duplicated, sorted, at most 25.
#[must_use]
pub fn matching_menu_items(catalog: &Catalog, weekday: Weekday, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();

    let mut matching: Vec<String> = MealSlot::ALL
        .into_iter()
        .flat_map(|slot| catalog.lookup(slot, weekday).names())
        .filter(|name| name.to_lowercase().contains(&partial_lower))
        .map(str::to_string)
        .collect();

    // Sort alphabetically for consistent UX
    matching.sort();
    matching.dedup();
    matching.truncate(MAX_SUGGESTIONS);
    matching
}

/// Provides autocomplete suggestions for menu item names.
///
/// Lists staples and special dishes on today's menu across all meal slots.
///
/// # Arguments
/// * `ctx` - The poise context holding the catalog
/// * `partial` - The partial string the user has typed so far
pub async fn autocomplete_menu_item(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching_menu_items(&ctx.data().catalog, Local::now().weekday(), partial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_menu_items_is_case_insensitive() {
        let catalog = Catalog::mess();
        let names = matching_menu_items(&catalog, Weekday::Fri, "BIRYANI");
        assert_eq!(names, vec!["Chicken Biryani", "Veg Biryani"]);
    }

    #[test]
    fn test_matching_menu_items_dedups_shared_staples() {
        let catalog = Catalog::mess();
        let names = matching_menu_items(&catalog, Weekday::Mon, "");
        assert_eq!(names.iter().filter(|name| *name == "Dal").count(), 1);
        assert!(names.contains(&"Poha".to_string()));
        assert!(names.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(names.len() <= MAX_SUGGESTIONS);
    }
}
