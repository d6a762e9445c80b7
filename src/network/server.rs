use serde::{Deserialize, Serialize};

use super::{GameSnapshot, PlayerId, RoomCode};

/// Packets sent from the server to the client
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Packet {
    Connected {
        sid: PlayerId,
    },
    RoomCreated {
        code: RoomCode,
    },
    RoomJoined {
        code: RoomCode,
        #[serde(default)]
        players: Vec<PlayerId>,
    },
    RoomError {
        error: String,
    },
    GameStarted(Option<GameSnapshot>),
    PlayerJoined {
        players: Vec<PlayerId>,
    },
    /// Either the full remaining roster or just the id of whoever left.
    PlayerLeft {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        players: Option<Vec<PlayerId>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sid: Option<PlayerId>,
    },
    GameUpdate(Option<GameSnapshot>),
}
