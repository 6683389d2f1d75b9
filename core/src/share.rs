use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use percent_encoding::{NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::DecodeError;
use crate::grid::Grid;
use crate::theme::ThemeName;

/// Query parameter carrying an encoded board in a share link
pub const LOAD_PARAM: &str = "load";

/// The subset of a board that travels in a share link. Lock state and tags
/// never travel: the recipient starts tagging from scratch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SharePayload {
    pub goals: Grid,
    #[serde(default)]
    pub theme: ThemeName,
    #[serde(default)]
    pub name: String,
}

impl SharePayload {
    pub fn of(board: &Board) -> Self {
        Self {
            goals: board.goals().clone(),
            theme: board.theme(),
            name: board.name().to_owned(),
        }
    }

    /// JSON-serialize, percent-encode, base64-encode. Deterministic for
    /// identical input.
    pub fn encode(&self) -> String {
        let json =
            serde_json::to_string(self).expect("a share payload always serializes to JSON");
        let percent = utf8_percent_encode(&json, NON_ALPHANUMERIC).to_string();
        STANDARD.encode(percent)
    }

    /// Reverses [`SharePayload::encode`]. Fails on malformed base64, broken
    /// percent-encoding or a JSON document without a 25-cell `goals` array,
    /// touching no board state either way.
    pub fn decode(input: &str) -> Result<Self, DecodeError> {
        let bytes = STANDARD.decode(input.trim())?;
        let percent = core::str::from_utf8(&bytes)?;
        let json = percent_decode_str(percent).decode_utf8()?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Builds the `<origin>/?load=<encoded>` link for this payload
    pub fn share_url(&self, origin: &str) -> String {
        format!("{}/?{}={}", origin.trim_end_matches('/'), LOAD_PARAM, self.encode())
    }
}
