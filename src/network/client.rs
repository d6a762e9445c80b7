use serde::{Deserialize, Serialize};

use super::{PlayerId, Position, RoomCode};

/// Packets sent from the client to the server
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Packet {
    CreateRoom,
    JoinRoom {
        code: RoomCode,
    },
    StartGame,
    LeaveRoom,
    PlayerMove {
        position: Position,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<PlayerId>,
    },
}
