use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::network::codec::WireFormat;
use crate::network::RoomCode;
use crate::{PLAYER_SPEED, RECONCILIATION_THRESHOLD};

#[derive(Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    #[default]
    Ws,
    Tcp,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(default)]
pub struct Settings {
    /// `ws://host:port/path` for websockets, `host:port` for tcp.
    pub address: String,
    pub transport: TransportKind,
    pub wire_format: WireFormat,
    pub player_speed: f32,
    pub reconciliation_threshold: f32,
    pub clamp_to_field: bool,
    pub include_player_id: bool,
    pub vsync: bool,
    pub log_level: String,
    /// Room to rejoin on startup. Written on create/join, cleared on leave.
    pub last_room: Option<RoomCode>,
}

impl Settings {
    pub fn path() -> PathBuf {
        PathBuf::from("./settings.toml")
    }

    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(&self)?;
        std::fs::write(path, contents)?;

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            address: "ws://127.0.0.1:5000/".to_owned(),
            transport: TransportKind::Ws,
            wire_format: WireFormat::Json,
            player_speed: PLAYER_SPEED,
            reconciliation_threshold: RECONCILIATION_THRESHOLD,
            clamp_to_field: false,
            include_player_id: false,
            vsync: true,
            log_level: String::from("info"),
            last_room: None,
        }
    }
}
