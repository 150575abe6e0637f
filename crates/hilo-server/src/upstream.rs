use hilo_core::{Event, Variant};
use serde::Deserialize;
use tracing::{debug, warn};

/// Notify endpoint used when no other URL is configured.
pub const DEFAULT_UPSTREAM_URL: &str = "https://jakpotgwab.geightdors.net/glms/v1/notify/taixiu";

/// Value of the `platform_id` query parameter.
pub const PLATFORM_ID: &str = "g8";

/// Status string of a usable notification.
pub const STATUS_OK: &str = "OK";

/// Classic table: announces the id of the round being played.
pub const CMD_CLASSIC_SESSION: i64 = 1008;

/// Classic table: carries the dice of the announced round.
pub const CMD_CLASSIC_RESULT: i64 = 1003;

/// MD5 table: carries both the round id and its dice.
pub const CMD_MD5_RESULT: i64 = 2006;

/// One response of the notify endpoint.
///
/// `data` stays untyped so that one malformed frame does not reject the rest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotifyResponse {
    /// Upstream status, `"OK"` when usable.
    #[serde(default)]
    pub status: Option<String>,
    /// Raw frame list.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl NotifyResponse {
    /// True when the upstream reported `"OK"`.
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some(STATUS_OK)
    }

    /// Frames that decode cleanly, in upstream order.
    pub fn frames(&self) -> Vec<NotifyFrame> {
        let Some(items) = self.data.as_ref().and_then(|d| d.as_array()) else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|item| match NotifyFrame::deserialize(item) {
                Ok(frame) => Some(frame),
                Err(e) => {
                    debug!(error = %e, "skipping undecodable frame");
                    None
                }
            })
            .collect()
    }
}

/// A single frame inside a notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NotifyFrame {
    /// Frame kind.
    #[serde(default)]
    pub cmd: Option<i64>,
    /// Round id, when present.
    #[serde(default)]
    pub sid: Option<u64>,
    /// First die.
    #[serde(default)]
    pub d1: Option<u32>,
    /// Second die.
    #[serde(default)]
    pub d2: Option<u32>,
    /// Third die.
    #[serde(default)]
    pub d3: Option<u32>,
}

impl NotifyFrame {
    /// All three dice, or `None` if any is missing.
    pub fn dice(&self) -> Option<[u32; 3]> {
        Some([self.d1?, self.d2?, self.d3?])
    }

    /// Round id, ignoring the zero placeholder.
    pub fn session_id(&self) -> Option<u64> {
        self.sid.filter(|&sid| sid != 0)
    }
}

/// State carried between polls of one variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractState {
    /// Classic round announced by a session frame and not yet resolved.
    pub pending_sid: Option<u64>,
}

/// Turn a notification into validated events, in upstream order.
///
/// Classic rounds arrive split: the session frame sets `pending_sid`, which
/// survives across polls until a result frame consumes it. Frames with
/// missing dice or no round id are dropped; dice outside 1-6 are logged and
/// dropped.
pub fn extract_events(
    variant: Variant,
    response: &NotifyResponse,
    state: &mut ExtractState,
) -> Vec<Event> {
    if !response.is_ok() {
        return Vec::new();
    }
    let frames = response.frames();
    let mut events = Vec::new();

    match variant {
        Variant::Classic => {
            for frame in &frames {
                if let (Some(CMD_CLASSIC_SESSION), Some(sid)) = (frame.cmd, frame.session_id()) {
                    state.pending_sid = Some(sid);
                }
            }
            for frame in &frames {
                if frame.cmd != Some(CMD_CLASSIC_RESULT) {
                    continue;
                }
                let (Some(sid), Some(faces)) = (state.pending_sid, frame.dice()) else {
                    continue;
                };
                if let Some(event) = validate(variant, sid, faces) {
                    events.push(event);
                }
                state.pending_sid = None;
            }
        }
        Variant::Md5 => {
            for frame in &frames {
                if frame.cmd != Some(CMD_MD5_RESULT) {
                    continue;
                }
                let (Some(sid), Some(faces)) = (frame.session_id(), frame.dice()) else {
                    continue;
                };
                if let Some(event) = validate(variant, sid, faces) {
                    events.push(event);
                }
            }
        }
    }

    events
}

fn validate(variant: Variant, sid: u64, faces: [u32; 3]) -> Option<Event> {
    match Event::new(sid, faces) {
        Ok(event) => Some(event),
        Err(e) => {
            warn!(variant = %variant, session = sid, error = %e, "rejecting upstream event");
            None
        }
    }
}
