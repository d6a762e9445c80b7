use std::collections::HashMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::math::units::world::*;

pub mod client;
pub mod codec;
pub mod server;

/// Session identifier of a connected player, as handed out by the server.
#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Hash, Clone, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// A locally generated id, used until the server acknowledges the connection.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Hash, Clone)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Normalizes user input the way codes are typed into the lobby: trimmed and upper-cased.
    /// Returns `None` for blank input.
    pub fn parse(input: &str) -> Option<Self> {
        let code = input.trim().to_uppercase();
        if code.is_empty() {
            None
        } else {
            Some(Self(code))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RoomCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A position on the wire, `{x, y}`.
#[derive(Copy, Clone, Serialize, Deserialize, PartialEq, Debug, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<Point2D> for Position {
    fn from(point: Point2D) -> Self {
        Self::new(point.x, point.y)
    }
}

impl From<Position> for Point2D {
    fn from(position: Position) -> Self {
        Point2D::new(position.x, position.y)
    }
}

#[derive(Copy, Clone, Serialize, Deserialize, PartialEq, Debug, Default)]
pub struct BallState {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub vx: f32,
    #[serde(default)]
    pub vy: f32,
}

impl BallState {
    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// A player's entry in a snapshot. Servers report either `{x, y}` or `{position: {x, y}}`.
#[derive(Copy, Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(untagged)]
pub enum PlayerSnapshot {
    Nested { position: Position },
    Flat(Position),
}

impl PlayerSnapshot {
    pub fn position(&self) -> Position {
        match self {
            PlayerSnapshot::Nested { position } | PlayerSnapshot::Flat(position) => *position,
        }
    }
}

#[derive(Copy, Clone, Serialize, Deserialize, PartialEq, Debug, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Waiting,
    Playing,
    Ended,
}

/// Full state of a room as broadcast by the server.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct GameSnapshot {
    pub ball: BallState,
    #[serde(default)]
    pub players: HashMap<PlayerId, PlayerSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RoomStatus>,
}

impl GameSnapshot {
    pub fn player_position(&self, id: &PlayerId) -> Option<Position> {
        self.players.get(id).map(PlayerSnapshot::position)
    }
}
