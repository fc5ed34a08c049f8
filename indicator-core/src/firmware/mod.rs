//! The firmware engine: message ingestion, eviction sweep, and output refresh.
//!
//! [`Firmware`] is driven cooperatively by the enclosing loop, once per
//! iteration: [`Firmware::loop_started`], zero or more calls to
//! [`Firmware::udp_received`], then [`Firmware::loop_ended`]. Nothing here
//! blocks or spawns work; every output is a synchronous call into the
//! [`Device`] before the triggering entry point returns.

use core::fmt::{self, Write as _};
use core::str;

use heapless::String;

use crate::display::{self, DisplayState};
use crate::lights::{self, LedColor, LightLevels};
use crate::registry::{ClientId, ClientRegistry, MAX_CLIENT_ID_LEN};
use crate::time::{DEFAULT_TIMEOUT_WINDOW, Tick, Timestamp, WallClock};
use crate::wire;

/// Upper bound for one formatted log line (raw packet text plus prefix).
pub const MAX_LOG_LINE: usize = 320;

/// Abstraction over the physical indicator hardware.
///
/// Implementations must not block or fail; the engine treats every call as
/// fire-and-forget. A test double substitutes for the real wiring.
pub trait Device {
    /// Writes one line to the diagnostic sink.
    fn log(&mut self, message: &str);

    /// Drives the microphone indicator channel.
    fn set_microphone_leds(&mut self, color: LedColor);

    /// Drives the camera indicator channel.
    fn set_webcam_leds(&mut self, color: LedColor);

    /// Shows a countdown on the numeric display.
    fn display_time(&mut self, minutes: u8, seconds: u8);

    /// Blanks the numeric display.
    fn clear_display(&mut self);
}

/// Client-presence aggregation and display-scheduling engine.
///
/// Owns the registry exclusively and holds the device it drives; construct
/// one per physical device and feed it timestamps from the enclosing loop.
pub struct Firmware<D: Device> {
    device: D,
    registry: ClientRegistry,
    timeout_window: Tick,
    last_rendered_wall: Option<WallClock>,
}

impl<D: Device> Firmware<D> {
    /// Creates an engine with the default eviction window and marks both
    /// channels as initializing until the first refresh.
    pub fn new(device: D) -> Self {
        Self::with_timeout_window(device, DEFAULT_TIMEOUT_WINDOW)
    }

    /// Creates an engine with an explicit eviction window in ticks. The
    /// window is fixed for the lifetime of the engine.
    pub fn with_timeout_window(mut device: D, timeout_window: Tick) -> Self {
        let LightLevels { microphone, webcam } = LightLevels::initializing();
        device.set_microphone_leds(microphone);
        device.set_webcam_leds(webcam);

        Self {
            device,
            registry: ClientRegistry::new(),
            timeout_window,
            last_rendered_wall: None,
        }
    }

    /// Accesses the driven device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Returns a read-only view of the client registry.
    pub fn registry(&self) -> &ClientRegistry {
        &self.registry
    }

    /// Returns the configured eviction window in ticks.
    #[must_use]
    pub const fn timeout_window(&self) -> Tick {
        self.timeout_window
    }

    /// Runs the eviction sweep at the top of a loop iteration. Each evicted
    /// client is logged; the lights refresh only when the sweep actually
    /// removed a record.
    pub fn loop_started(&mut self, ts: Timestamp) {
        let removed = self.registry.sweep(ts.tick, self.timeout_window);
        if removed.is_empty() {
            return;
        }

        for id in &removed {
            self.log_line(format_args!("client '{id}' timed out, evicting"));
        }
        self.refresh_lights();
    }

    /// Ingests one received datagram.
    ///
    /// A packet that fails to decode is logged and dropped without touching
    /// any state. A valid packet upserts the sender's record, then refreshes
    /// the lights and the display immediately, since new data may change the
    /// countdown selection.
    pub fn udp_received(&mut self, ts: Timestamp, packet: &[u8]) {
        if let Ok(text) = str::from_utf8(packet) {
            self.log_line(format_args!("UDP packet contents: {text}"));
        }

        let message = match wire::decode(packet) {
            Ok(message) => message,
            Err(error) => {
                self.log_line(format_args!("status decode failed: {error}"));
                return;
            }
        };

        self.log_line(format_args!("version {}", message.version));
        self.log_line(format_args!("microphone {}", on_off(message.microphone)));
        self.log_line(format_args!("webcam {}", on_off(message.webcam)));

        let mut id = ClientId::new();
        if let Some(sender) = message.sender_id
            && id.push_str(sender).is_err()
        {
            self.log_line(format_args!(
                "senderId exceeds {MAX_CLIENT_ID_LEN} bytes, dropping packet"
            ));
            return;
        }

        if let Err(error) = self.registry.upsert(
            id,
            ts.tick,
            message.microphone,
            message.webcam,
            message.count_down_target,
        ) {
            self.log_line(format_args!("{error}, dropping packet"));
            return;
        }

        self.refresh_lights();
        self.refresh_display(ts.wall);
    }

    /// Closes a loop iteration, re-rendering the display only when the
    /// wall-clock second has changed since the previous render. Sub-second
    /// iterations leave the device untouched.
    pub fn loop_ended(&mut self, ts: Timestamp) {
        if self.last_rendered_wall != Some(ts.wall) {
            self.refresh_display(ts.wall);
        }
    }

    fn refresh_lights(&mut self) {
        let LightLevels { microphone, webcam } = lights::aggregate(&self.registry);
        self.device.set_microphone_leds(microphone);
        self.device.set_webcam_leds(webcam);
    }

    fn refresh_display(&mut self, now: WallClock) {
        match display::render(&self.registry, now) {
            DisplayState::Cleared => self.device.clear_display(),
            DisplayState::Time { minutes, seconds } => self.device.display_time(minutes, seconds),
        }
        self.last_rendered_wall = Some(now);
    }

    // Formats into a bounded buffer; an over-long line is logged truncated
    // rather than dropped.
    fn log_line(&mut self, args: fmt::Arguments<'_>) {
        let mut line: String<MAX_LOG_LINE> = String::new();
        let _ = line.write_fmt(args);
        self.device.log(&line);
    }
}

const fn on_off(active: bool) -> &'static str {
    if active { "ON" } else { "OFF" }
}
