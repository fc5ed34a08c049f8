//! End-to-end firmware loop scenarios driven through the public entry
//! points with a fake device and synthetic timestamps.

use indicator_core::firmware::{Device, Firmware};
use indicator_core::lights::LedColor;
use indicator_core::time::{DEFAULT_TIMEOUT_WINDOW, Timestamp};

#[derive(Debug, Default)]
struct FakeDevice {
    console: String,
    microphone: Option<LedColor>,
    webcam: Option<LedColor>,
    display: Option<(u8, u8)>,
}

impl Device for FakeDevice {
    fn log(&mut self, message: &str) {
        self.console.push_str(message);
        self.console.push('\n');
    }

    fn set_microphone_leds(&mut self, color: LedColor) {
        self.microphone = Some(color);
    }

    fn set_webcam_leds(&mut self, color: LedColor) {
        self.webcam = Some(color);
    }

    fn display_time(&mut self, minutes: u8, seconds: u8) {
        self.display = Some((minutes, seconds));
    }

    fn clear_display(&mut self) {
        self.display = None;
    }
}

fn ts(tick: u64, wall: u64) -> Timestamp {
    Timestamp::new(tick, wall)
}

fn iteration(firmware: &mut Firmware<FakeDevice>, at: Timestamp, packet: &[u8]) {
    firmware.loop_started(at);
    firmware.udp_received(at, packet);
    firmware.loop_ended(at);
}

#[test]
fn single_client_led_matrix() {
    let cases = [
        (false, false, LedColor::Off, LedColor::Off),
        (false, true, LedColor::Off, LedColor::On),
        (true, false, LedColor::On, LedColor::Off),
        (true, true, LedColor::On, LedColor::On),
    ];

    for (microphone, webcam, expected_microphone, expected_webcam) in cases {
        let mut firmware = Firmware::new(FakeDevice::default());
        let packet = format!(
            r#"{{"version":1,"webcam":{webcam},"microphone":{microphone},"senderId":"51000b59-b3eb-4664-a895-e824260d9050"}}"#
        );
        iteration(&mut firmware, ts(0, 0), packet.as_bytes());

        assert_eq!(firmware.device().microphone, Some(expected_microphone));
        assert_eq!(firmware.device().webcam, Some(expected_webcam));
    }
}

#[test]
fn one_client_transitions_across_iterations() {
    let mut firmware = Firmware::new(FakeDevice::default());

    iteration(
        &mut firmware,
        ts(0, 0),
        br#"{"version":1,"webcam":false,"microphone":false,"senderId":"a"}"#,
    );
    assert_eq!(firmware.device().microphone, Some(LedColor::Off));
    assert_eq!(firmware.device().webcam, Some(LedColor::Off));

    iteration(
        &mut firmware,
        ts(10_000, 10),
        br#"{"version":1,"webcam":false,"microphone":true,"senderId":"a"}"#,
    );
    assert_eq!(firmware.device().microphone, Some(LedColor::On));
    assert_eq!(firmware.device().webcam, Some(LedColor::Off));

    iteration(
        &mut firmware,
        ts(20_000, 20),
        br#"{"version":1,"webcam":true,"microphone":true,"senderId":"a"}"#,
    );
    assert_eq!(firmware.device().microphone, Some(LedColor::On));
    assert_eq!(firmware.device().webcam, Some(LedColor::On));

    iteration(
        &mut firmware,
        ts(30_000, 30),
        br#"{"version":1,"webcam":false,"microphone":false,"senderId":"a"}"#,
    );
    assert_eq!(firmware.device().microphone, Some(LedColor::Off));
    assert_eq!(firmware.device().webcam, Some(LedColor::Off));
}

#[test]
fn lights_aggregate_across_clients() {
    let mut firmware = Firmware::new(FakeDevice::default());

    iteration(
        &mut firmware,
        ts(0, 0),
        br#"{"version":1,"webcam":false,"microphone":true,"senderId":"talker"}"#,
    );
    iteration(
        &mut firmware,
        ts(100, 0),
        br#"{"version":1,"webcam":true,"microphone":false,"senderId":"viewer"}"#,
    );

    assert_eq!(firmware.device().microphone, Some(LedColor::On));
    assert_eq!(firmware.device().webcam, Some(LedColor::On));

    // The talker goes idle; only the viewer's webcam keeps a light on.
    iteration(
        &mut firmware,
        ts(200, 0),
        br#"{"version":1,"webcam":false,"microphone":false,"senderId":"talker"}"#,
    );
    assert_eq!(firmware.device().microphone, Some(LedColor::Off));
    assert_eq!(firmware.device().webcam, Some(LedColor::On));
}

#[test]
fn silent_client_is_evicted_to_standby() {
    let mut firmware = Firmware::new(FakeDevice::default());

    iteration(
        &mut firmware,
        ts(0, 0),
        br#"{"version":1,"webcam":false,"microphone":true,"senderId":"a"}"#,
    );
    assert_eq!(firmware.device().microphone, Some(LedColor::On));

    // Exactly at the window boundary the client survives.
    firmware.loop_started(ts(DEFAULT_TIMEOUT_WINDOW, 30));
    firmware.loop_ended(ts(DEFAULT_TIMEOUT_WINDOW, 30));
    assert_eq!(firmware.registry().len(), 1);
    assert_eq!(firmware.device().microphone, Some(LedColor::On));

    // One tick past the boundary it is gone and both channels read standby.
    firmware.loop_started(ts(DEFAULT_TIMEOUT_WINDOW + 1, 31));
    firmware.loop_ended(ts(DEFAULT_TIMEOUT_WINDOW + 1, 31));
    assert!(firmware.registry().is_empty());
    assert_eq!(firmware.device().microphone, Some(LedColor::Standby));
    assert_eq!(firmware.device().webcam, Some(LedColor::Standby));
    assert!(firmware.device().console.contains("client 'a' timed out"));
}

#[test]
fn replaying_an_identical_message_changes_nothing() {
    let packet = br#"{"version":1,"webcam":true,"microphone":false,"senderId":"a"}"#;
    let mut firmware = Firmware::new(FakeDevice::default());

    iteration(&mut firmware, ts(500, 5), packet);
    let microphone = firmware.device().microphone;
    let webcam = firmware.device().webcam;
    let display = firmware.device().display;

    iteration(&mut firmware, ts(500, 5), packet);
    assert_eq!(firmware.device().microphone, microphone);
    assert_eq!(firmware.device().webcam, webcam);
    assert_eq!(firmware.device().display, display);
    assert_eq!(firmware.registry().len(), 1);
}

#[test]
fn anonymous_senders_collapse_into_one_slot() {
    let mut firmware = Firmware::new(FakeDevice::default());

    iteration(
        &mut firmware,
        ts(0, 0),
        br#"{"version":1,"webcam":false,"microphone":true}"#,
    );
    iteration(
        &mut firmware,
        ts(100, 0),
        br#"{"version":1,"webcam":true,"microphone":false}"#,
    );

    // The second anonymous message overwrote the first one's flags.
    assert_eq!(firmware.registry().len(), 1);
    assert_eq!(firmware.device().microphone, Some(LedColor::Off));
    assert_eq!(firmware.device().webcam, Some(LedColor::On));
}

#[test]
fn countdown_runs_down_and_clears_at_the_deadline() {
    let mut firmware = Firmware::new(FakeDevice::default());

    iteration(
        &mut firmware,
        ts(0, 100),
        br#"{"version":1,"webcam":false,"microphone":false,"senderId":"a","countDownTarget":200}"#,
    );
    assert_eq!(firmware.device().display, Some((1, 40)));

    // Ticks stay inside the timeout window; only the wall clock advances.
    firmware.loop_started(ts(1_000, 199));
    firmware.loop_ended(ts(1_000, 199));
    assert_eq!(firmware.device().display, Some((0, 1)));

    firmware.loop_started(ts(2_000, 200));
    firmware.loop_ended(ts(2_000, 200));
    assert_eq!(firmware.device().display, None);
}

#[test]
fn soonest_deadline_wins_across_clients() {
    let mut firmware = Firmware::new(FakeDevice::default());

    iteration(
        &mut firmware,
        ts(0, 0),
        br#"{"version":1,"webcam":false,"microphone":false,"senderId":"b","countDownTarget":20}"#,
    );
    iteration(
        &mut firmware,
        ts(10, 0),
        br#"{"version":1,"webcam":false,"microphone":false,"senderId":"a","countDownTarget":10}"#,
    );

    assert_eq!(firmware.device().display, Some((0, 10)));
}

#[test]
fn counting_client_beats_non_counting_client() {
    let mut firmware = Firmware::new(FakeDevice::default());

    iteration(
        &mut firmware,
        ts(0, 0),
        br#"{"version":1,"webcam":true,"microphone":true,"senderId":"first"}"#,
    );
    iteration(
        &mut firmware,
        ts(10, 0),
        br#"{"version":1,"webcam":false,"microphone":false,"senderId":"second","countDownTarget":5}"#,
    );

    assert_eq!(firmware.device().display, Some((0, 5)));
}

#[test]
fn omitting_the_target_clears_a_previous_countdown() {
    let mut firmware = Firmware::new(FakeDevice::default());

    iteration(
        &mut firmware,
        ts(0, 0),
        br#"{"version":1,"webcam":false,"microphone":false,"senderId":"a","countDownTarget":600}"#,
    );
    assert_eq!(firmware.device().display, Some((10, 0)));

    iteration(
        &mut firmware,
        ts(1_000, 1),
        br#"{"version":1,"webcam":false,"microphone":false,"senderId":"a"}"#,
    );
    assert_eq!(firmware.device().display, None);
}

#[test]
fn evicting_the_counting_client_clears_on_the_next_render() {
    let mut firmware = Firmware::new(FakeDevice::default());

    iteration(
        &mut firmware,
        ts(0, 0),
        br#"{"version":1,"webcam":false,"microphone":false,"senderId":"a","countDownTarget":600}"#,
    );
    assert!(firmware.device().display.is_some());

    let after = ts(DEFAULT_TIMEOUT_WINDOW + 1, 42);
    firmware.loop_started(after);
    firmware.loop_ended(after);

    assert!(firmware.registry().is_empty());
    assert_eq!(firmware.device().display, None);
}

#[test]
fn decode_failure_mid_session_preserves_previous_outputs() {
    let mut firmware = Firmware::new(FakeDevice::default());

    iteration(
        &mut firmware,
        ts(0, 0),
        br#"{"version":1,"webcam":true,"microphone":false,"senderId":"a"}"#,
    );
    assert_eq!(firmware.device().webcam, Some(LedColor::On));

    iteration(&mut firmware, ts(1_000, 1), b"not json at all");

    assert_eq!(firmware.registry().len(), 1);
    assert_eq!(firmware.device().webcam, Some(LedColor::On));
    assert!(firmware.device().console.contains("status decode failed"));
}
