//! Registry of clients that have reported status recently.
//!
//! One [`ClientRecord`] exists per distinct sender identifier seen since the
//! last eviction. The registry is the single source of truth for both the
//! light aggregator and the display scheduler; insertion order is irrelevant
//! to the aggregation rule but does make the countdown tie-break
//! deterministic.

use core::fmt;

use heapless::{String, Vec};

use crate::time::{Tick, WallClock};

/// Maximum number of clients tracked at once.
pub const MAX_CLIENTS: usize = 16;

/// Maximum byte length of a sender identifier.
pub const MAX_CLIENT_ID_LEN: usize = 64;

/// Opaque sender identifier. The empty string is a valid key: every message
/// that omits `senderId` lands in one shared anonymous slot.
pub type ClientId = String<MAX_CLIENT_ID_LEN>;

/// Last reported state for a single client.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientRecord {
    id: ClientId,
    last_seen_tick: Tick,
    microphone_active: bool,
    camera_active: bool,
    countdown_deadline: Option<WallClock>,
}

impl ClientRecord {
    /// Returns the sender identifier this record belongs to.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the monotonic tick of the last valid message from this client.
    #[must_use]
    pub const fn last_seen_tick(&self) -> Tick {
        self.last_seen_tick
    }

    /// Returns `true` when the client last reported its microphone in use.
    #[must_use]
    pub const fn microphone_active(&self) -> bool {
        self.microphone_active
    }

    /// Returns `true` when the client last reported its camera in use.
    #[must_use]
    pub const fn camera_active(&self) -> bool {
        self.camera_active
    }

    /// Returns the wall-clock deadline of this client's countdown, if one is set.
    #[must_use]
    pub const fn countdown_deadline(&self) -> Option<WallClock> {
        self.countdown_deadline
    }

    /// Returns `true` when the countdown deadline exists and has not yet been
    /// reached at `now`.
    #[must_use]
    pub fn is_counting(&self, now: WallClock) -> bool {
        self.countdown_deadline
            .is_some_and(|deadline| now < deadline)
    }
}

/// Errors that may occur while updating the registry.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RegistryError {
    /// Registry already tracks [`MAX_CLIENTS`] distinct identifiers.
    RegistryFull,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::RegistryFull => f.write_str("client registry full"),
        }
    }
}

/// Bounded mapping from sender identifier to [`ClientRecord`].
#[derive(Clone, Debug, Default)]
pub struct ClientRegistry {
    clients: Vec<ClientRecord, MAX_CLIENTS>,
}

impl ClientRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            clients: Vec::new(),
        }
    }

    /// Inserts or overwrites the record for `id`, always resetting
    /// `last_seen_tick`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RegistryFull`] when a previously unseen
    /// identifier arrives while the registry is at capacity. The existing
    /// records are left untouched.
    pub fn upsert(
        &mut self,
        id: ClientId,
        tick: Tick,
        microphone: bool,
        camera: bool,
        deadline: Option<WallClock>,
    ) -> Result<(), RegistryError> {
        if let Some(existing) = self.clients.iter_mut().find(|record| record.id == id) {
            existing.last_seen_tick = tick;
            existing.microphone_active = microphone;
            existing.camera_active = camera;
            existing.countdown_deadline = deadline;
            Ok(())
        } else {
            self.clients
                .push(ClientRecord {
                    id,
                    last_seen_tick: tick,
                    microphone_active: microphone,
                    camera_active: camera,
                    countdown_deadline: deadline,
                })
                .map_err(|_| RegistryError::RegistryFull)
        }
    }

    /// Removes every record whose last message is strictly older than
    /// `window` ticks and returns the evicted identifiers for the caller to
    /// log. A record updated exactly `window` ticks ago survives.
    ///
    /// Tick subtraction is unsigned; callers guarantee `current_tick` never
    /// regresses below any stored `last_seen_tick`.
    pub fn sweep(&mut self, current_tick: Tick, window: Tick) -> Vec<ClientId, MAX_CLIENTS> {
        let mut removed = Vec::new();
        self.clients.retain(|record| {
            let stale = current_tick - record.last_seen_tick > window;
            if stale {
                let _ = removed.push(record.id.clone());
            }
            !stale
        });
        removed
    }

    /// Looks up a record by sender identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ClientRecord> {
        self.clients.iter().find(|record| record.id == id)
    }

    /// Iterates over all tracked records in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, ClientRecord> {
        self.clients.iter()
    }

    /// Returns the number of tracked clients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Returns `true` when no clients are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
