//! Terminal stand-in for the physical indicator hardware.

use crossterm::style::{Color, Stylize};

use indicator_core::firmware::Device;
use indicator_core::lights::LedColor;

/// What the numeric display currently shows; `None` until the engine has
/// rendered at least once.
type DisplayContent = Option<(u8, u8)>;

/// Renders LED channels and the countdown display as colored terminal
/// output. Repeated writes of an unchanged value stay silent so the console
/// mirrors actual state transitions rather than engine refresh traffic.
#[derive(Default)]
pub struct ConsoleDevice {
    microphone: Option<LedColor>,
    webcam: Option<LedColor>,
    display: Option<DisplayContent>,
}

impl ConsoleDevice {
    pub fn new() -> Self {
        Self::default()
    }

    fn set_channel(slot: &mut Option<LedColor>, label: &str, color: LedColor) {
        if *slot == Some(color) {
            return;
        }
        *slot = Some(color);
        println!("{label} leds {}", badge(color));
    }

    fn set_display(&mut self, content: DisplayContent) {
        if self.display == Some(content) {
            return;
        }
        self.display = Some(content);
        match content {
            Some((minutes, seconds)) => {
                println!("display {}", format!("{minutes:02}:{seconds:02}").cyan());
            }
            None => println!("display {}", "--:--".dark_grey()),
        }
    }
}

impl Device for ConsoleDevice {
    fn log(&mut self, message: &str) {
        println!("{}", message.trim_end().dark_grey());
    }

    fn set_microphone_leds(&mut self, color: LedColor) {
        Self::set_channel(&mut self.microphone, "microphone", color);
    }

    fn set_webcam_leds(&mut self, color: LedColor) {
        Self::set_channel(&mut self.webcam, "webcam", color);
    }

    fn display_time(&mut self, minutes: u8, seconds: u8) {
        self.set_display(Some((minutes, seconds)));
    }

    fn clear_display(&mut self) {
        self.set_display(None);
    }
}

fn badge(color: LedColor) -> crossterm::style::StyledContent<&'static str> {
    match color {
        LedColor::On => "ON".with(Color::Red),
        LedColor::Off => "OFF".with(Color::Green),
        LedColor::Standby => "STANDBY".with(Color::Blue),
        LedColor::Initializing => "INIT".with(Color::Yellow),
    }
}
