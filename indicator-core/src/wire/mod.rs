//! Inbound status message schema and JSON decoding.
//!
//! Senders broadcast small JSON documents over UDP. Field lookups follow
//! the permissive accessor semantics of the original device firmware: a
//! missing field falls back to its documented default and never fails the
//! parse; only malformed JSON is an error. Decoding is allocation-free and
//! borrows the sender identifier from the datagram buffer.

use core::fmt;

use serde::Deserialize;

/// Default UDP port status messages arrive on.
pub const STATUS_PORT: u16 = 26999;

/// Documented upper bound for an encoded status message. Senders stay below
/// this so a single recv buffer always holds a whole document.
pub const MAX_STATUS_JSON_LEN: usize = 250;

/// One decoded status message.
#[derive(Copy, Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct StatusPacket<'a> {
    /// Schema version; logged for observability, not yet gating behavior.
    #[serde(default)]
    pub version: u32,
    /// `true` while the sender's microphone is in use.
    #[serde(default)]
    pub microphone: bool,
    /// `true` while the sender's camera is in use.
    #[serde(default)]
    pub webcam: bool,
    /// Opaque sender identifier; absent for anonymous senders.
    #[serde(borrow, default, rename = "senderId")]
    pub sender_id: Option<&'a str>,
    /// Wall-clock deadline (seconds since epoch) to count down to; absent
    /// clears any previous countdown for this sender.
    #[serde(default, rename = "countDownTarget")]
    pub count_down_target: Option<u64>,
}

/// Failure to decode a status message.
#[derive(Debug)]
pub struct DecodeError(serde_json_core::de::Error);

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Decodes one datagram into a [`StatusPacket`].
///
/// # Errors
///
/// Returns a [`DecodeError`] describing the problem when the buffer is not
/// well-formed JSON matching the schema.
pub fn decode(bytes: &[u8]) -> Result<StatusPacket<'_>, DecodeError> {
    serde_json_core::de::from_slice(bytes)
        .map(|(packet, _consumed)| packet)
        .map_err(DecodeError)
}
