//! Countdown selection and rendering for the numeric display.
//!
//! At most one countdown is shown across all clients. Deadlines compare in
//! the wall-clock domain only; monotonic ticks never participate, so a tick
//! counter reset cannot shift what the display shows.

use crate::registry::{ClientRecord, ClientRegistry};
use crate::time::WallClock;

/// Largest remaining time the two-digit minute display can show (99:59).
pub const MAX_DISPLAY_SECONDS: u64 = 99 * 60 + 59;

/// What the numeric display should show. The two states are mutually
/// exclusive on the device.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DisplayState {
    /// No client is counting; the display is blank.
    Cleared,
    /// Remaining time of the soonest-expiring countdown.
    Time { minutes: u8, seconds: u8 },
}

/// Picks the counting client whose deadline expires soonest and renders its
/// remaining time as minutes and seconds, clamped to [`MAX_DISPLAY_SECONDS`].
///
/// Counting clients always win over non-counting ones regardless of
/// registration order; among equal deadlines the registry iteration order
/// decides, which is deterministic for a given message history. With no
/// counting client the display clears.
#[must_use]
pub fn render(registry: &ClientRegistry, now: WallClock) -> DisplayState {
    let soonest = registry
        .iter()
        .filter(|record| record.is_counting(now))
        .filter_map(ClientRecord::countdown_deadline)
        .min();

    let Some(deadline) = soonest else {
        return DisplayState::Cleared;
    };

    let remaining = (deadline - now).min(MAX_DISPLAY_SECONDS);
    DisplayState::Time {
        minutes: (remaining / 60) as u8,
        seconds: (remaining % 60) as u8,
    }
}
