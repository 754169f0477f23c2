//! Background day-boundary watcher.
//!
//! User actions already roll a session over before they mutate it. This
//! watcher catches the day change for sessions that sit idle, so the reset
//! lands within one timer period of midnight instead of at the next command.

use crate::core::{
    day::{Clock, SystemClock},
    session::Session,
    store::SnapshotStore,
    tracker::Rollover,
};
use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

/// Live sessions keyed by owner.
pub type SessionMap<S, C = SystemClock> = Arc<Mutex<HashMap<String, Session<S, C>>>>;

/// Runs the rollover check on every live session.
///
/// # Returns
/// The owners whose day changed, with what was reset. Sessions already on
/// today are untouched, so calling this twice in a row returns nothing the
/// second time.
pub async fn check_all<S, C>(sessions: &Mutex<HashMap<String, Session<S, C>>>) -> Vec<(String, Rollover)>
where
    S: SnapshotStore,
    C: Clock,
{
    let mut sessions = sessions.lock().await;
    let mut rolled = Vec::new();
    for (owner, session) in sessions.iter_mut() {
        if let Some(rollover) = session.check_rollover().await {
            rolled.push((owner.clone(), rollover));
        }
    }
    debug!(
        "Rollover check: {} session(s), {} rolled over",
        sessions.len(),
        rolled.len()
    );
    rolled
}

/// Spawns the periodic rollover check. The task runs until aborted.
pub fn spawn_rollover_watcher<S, C>(sessions: SessionMap<S, C>, period: Duration) -> JoinHandle<()>
where
    S: SnapshotStore + 'static,
    C: Clock + 'static,
{
    info!("Starting rollover watcher (every {:?})", period);
    tokio::spawn(async move {
        let mut tick = interval(period);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tick.tick().await;
            for (owner, rollover) in check_all(&sessions).await {
                info!("{}", format_rollover_summary(&owner, &rollover));
            }
        }
    })
}

/// One-line log summary of a rollover.
#[must_use]
pub fn format_rollover_summary(owner: &str, rollover: &Rollover) -> String {
    let mut summary = format!(
        "New day for {owner}: {} -> {}",
        rollover.previous_day, rollover.new_day
    );
    if rollover.meals_cleared > 0 || rollover.water_cleared_ml > 0 {
        // Writing to a String cannot fail.
        let _ = write!(
            summary,
            " (cleared {} meal entries, {} ml water)",
            rollover.meals_cleared, rollover.water_cleared_ml
        );
    }
    summary
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::store::MemoryStore;
    use crate::test_utils::{ManualClock, memory_session};

    async fn sessions_on(clock: &ManualClock) -> SessionMap<MemoryStore, ManualClock> {
        let mut map = HashMap::new();
        for owner in ["alice", "bob"] {
            let mut session = memory_session(clock.clone()).await;
            session.add_water(500).await;
            map.insert(owner.to_string(), session);
        }
        Arc::new(Mutex::new(map))
    }

    #[tokio::test]
    async fn test_check_all_rolls_every_session_once() {
        let clock = ManualClock::new(2024, 3, 4);
        let sessions = sessions_on(&clock).await;

        assert!(check_all(&sessions).await.is_empty());

        clock.advance_days(1);
        let mut rolled = check_all(&sessions).await;
        rolled.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(rolled.len(), 2);
        assert_eq!(rolled[0].0, "alice");
        assert_eq!(rolled[0].1.water_cleared_ml, 500);

        assert!(check_all(&sessions).await.is_empty());
        let guard = sessions.lock().await;
        assert_eq!(guard["bob"].tracker().water().current, 0);
    }

    #[tokio::test]
    async fn test_watcher_resets_idle_sessions() {
        let clock = ManualClock::new(2024, 3, 4);
        let sessions = sessions_on(&clock).await;
        clock.advance_days(1);

        let handle = spawn_rollover_watcher(Arc::clone(&sessions), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();

        let guard = sessions.lock().await;
        assert_eq!(guard["alice"].tracker().water().current, 0);
        assert_eq!(guard["alice"].tracker().last_day(), Some(clock.today()));
    }

    #[test]
    fn test_format_rollover_summary() {
        let rollover = Rollover {
            previous_day: crate::core::day::DayKey::from_ymd(2024, 3, 4).unwrap(),
            new_day: crate::core::day::DayKey::from_ymd(2024, 3, 5).unwrap(),
            meals_cleared: 3,
            water_cleared_ml: 1250,
        };
        assert_eq!(
            format_rollover_summary("alice", &rollover),
            "New day for alice: 2024-03-04 -> 2024-03-05 (cleared 3 meal entries, 1250 ml water)"
        );

        let quiet = Rollover {
            meals_cleared: 0,
            water_cleared_ml: 0,
            ..rollover
        };
        assert_eq!(
            format_rollover_summary("bob", &quiet),
            "New day for bob: 2024-03-04 -> 2024-03-05"
        );
    }
}
