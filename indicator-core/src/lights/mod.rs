//! Indicator light aggregation over the client registry.

use crate::registry::ClientRegistry;

/// Output state for one LED channel.
///
/// `Standby` (no clients reporting) is deliberately distinct from `Off`
/// (clients confirmed idle), and `Initializing` marks the window between
/// boot and the first registry refresh.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LedColor {
    On,
    Off,
    Standby,
    Initializing,
}

/// Aggregated colors for both indicator channels.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LightLevels {
    pub microphone: LedColor,
    pub webcam: LedColor,
}

impl LightLevels {
    /// Levels emitted at boot, before the first refresh.
    #[must_use]
    pub const fn initializing() -> Self {
        Self {
            microphone: LedColor::Initializing,
            webcam: LedColor::Initializing,
        }
    }

    /// Levels for an empty registry.
    #[must_use]
    pub const fn standby() -> Self {
        Self {
            microphone: LedColor::Standby,
            webcam: LedColor::Standby,
        }
    }
}

/// Derives both channel colors from the registry by OR-reduction.
///
/// Each channel is `On` iff at least one tracked client reports it active,
/// `Off` otherwise; an empty registry yields `Standby` on both channels.
#[must_use]
pub fn aggregate(registry: &ClientRegistry) -> LightLevels {
    if registry.is_empty() {
        return LightLevels::standby();
    }

    LightLevels {
        microphone: channel_color(registry.iter().any(|record| record.microphone_active())),
        webcam: channel_color(registry.iter().any(|record| record.camera_active())),
    }
}

const fn channel_color(active: bool) -> LedColor {
    if active { LedColor::On } else { LedColor::Off }
}
