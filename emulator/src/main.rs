//! Host-side emulator for the meeting-indicator device.
//!
//! Binds the status UDP port and drives the shared firmware engine exactly
//! the way the device main loop does: sweep, ingest pending datagrams,
//! close the iteration. LED and display output land on the terminal.

mod device;

use std::env;
use std::io;
use std::net::UdpSocket;
use std::process;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use indicator_core::firmware::Firmware;
use indicator_core::time::Timestamp;
use indicator_core::wire::STATUS_PORT;

use device::ConsoleDevice;

const RECV_BUFFER_LEN: usize = 1024;
const RECV_TIMEOUT: Duration = Duration::from_millis(250);

struct Options {
    bind: String,
    port: u16,
}

fn main() -> io::Result<()> {
    let options = parse_options().unwrap_or_else(|err| {
        eprintln!("{err}");
        eprintln!("Usage: indicator-emulator [--bind <address>] [--port <port>]");
        process::exit(2);
    });

    let socket = UdpSocket::bind((options.bind.as_str(), options.port))?;
    socket.set_read_timeout(Some(RECV_TIMEOUT))?;
    println!("Indicator emulator listening on {}", socket.local_addr()?);

    let started = Instant::now();
    let mut firmware = Firmware::new(ConsoleDevice::new());
    let mut buffer = [0u8; RECV_BUFFER_LEN];

    loop {
        firmware.loop_started(now(started));

        match socket.recv_from(&mut buffer) {
            Ok((length, _sender)) => {
                firmware.udp_received(now(started), &buffer[..length]);
            }
            Err(err)
                if matches!(err.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {}
            Err(err) => return Err(err),
        }

        firmware.loop_ended(now(started));
    }
}

/// Samples both time domains: monotonic milliseconds since startup for the
/// eviction sweep, wall-clock seconds for countdown deadlines.
fn now(started: Instant) -> Timestamp {
    let tick = started.elapsed().as_millis() as u64;
    let wall = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);
    Timestamp::new(tick, wall)
}

fn parse_options() -> Result<Options, String> {
    let mut options = Options {
        bind: "0.0.0.0".to_string(),
        port: STATUS_PORT,
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if let Some(value) = arg.strip_prefix("--port=") {
            options.port = parse_port(value)?;
        } else if arg == "--port" {
            let value = args.next().ok_or("Expected value after --port")?;
            options.port = parse_port(&value)?;
        } else if let Some(value) = arg.strip_prefix("--bind=") {
            options.bind = value.to_string();
        } else if arg == "--bind" {
            options.bind = args.next().ok_or("Expected value after --bind")?;
        } else {
            return Err(format!("Unknown argument: {arg}"));
        }
    }

    Ok(options)
}

fn parse_port(value: &str) -> Result<u16, String> {
    value
        .parse()
        .map_err(|_| format!("Invalid port number: {value}"))
}
