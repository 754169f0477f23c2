//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Slash-command choice parameters
pub mod choices;

/// General utility commands
pub mod general;

/// Logged meal commands and daily reports
pub mod meals;

/// Mess menu browsing and selection commands
pub mod mess;

/// Profile, onboarding and preference commands
pub mod profile;

/// Water tracking commands
pub mod water;

// Export commands
pub use general::*;
pub use meals::*;
pub use mess::*;
pub use profile::*;
pub use water::*;

use crate::{bot::BotData, errors::Error};

/// Converts a 1-based position shown to users into a list index.
#[must_use]
pub fn position_to_index(position: u32) -> Option<usize> {
    position
        .checked_sub(1)
        .and_then(|index| usize::try_from(index).ok())
}

/// Every command the bot registers.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        onboard(),
        profile(),
        profile_edit(),
        preference(),
        reset(),
        water(),
        menu(),
        pick(),
        adjust(),
        selection(),
        confirm(),
        log_food(),
        meals(),
        meal_remove(),
        meal_quantity(),
        meal_clear(),
        summary(),
        trend(),
        ping(),
        help(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_to_index() {
        assert_eq!(position_to_index(1), Some(0));
        assert_eq!(position_to_index(3), Some(2));
        assert_eq!(position_to_index(0), None);
    }
}
