//! Two-domain time model shared by every engine entry point.
//!
//! Timeout bookkeeping runs on a monotonic tick count so that wall-clock
//! discontinuities (NTP corrections, manual adjustment) cannot evict a live
//! client. Countdown deadlines compare in the wall-clock domain so that a
//! tick counter reset cannot shift a deadline. The two values travel
//! together in a single [`Timestamp`] so callers cannot mix them up.

/// Monotonically increasing time unit used only for timeout accounting.
/// One tick is one millisecond on the reference hardware.
pub type Tick = u64;

/// Absolute wall-clock value in seconds since the Unix epoch, used only for
/// countdown-deadline comparison.
pub type WallClock = u64;

/// Ticks a client may stay silent before the sweep evicts it.
pub const DEFAULT_TIMEOUT_WINDOW: Tick = 30_000;

/// Snapshot of both time domains taken when an event enters the engine.
///
/// The engine never reads a clock itself; callers supply a `Timestamp` with
/// every call and must guarantee that `tick` never regresses between calls.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Timestamp {
    /// Monotonic tick at the moment of the event.
    pub tick: Tick,
    /// Wall-clock seconds at the moment of the event.
    pub wall: WallClock,
}

impl Timestamp {
    /// Creates a timestamp from both time domains.
    #[must_use]
    pub const fn new(tick: Tick, wall: WallClock) -> Self {
        Self { tick, wall }
    }
}
