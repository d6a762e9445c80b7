pub mod input;
pub mod math;
pub mod network;
pub mod prediction;
pub mod session;
pub mod settings;

pub const GAME_WIDTH: f32 = 600.0;
pub const GAME_HEIGHT: f32 = 400.0;

pub const PLAYER_RADIUS: f32 = 15.0;
pub const BALL_RADIUS: f32 = 10.0;

/// Distance travelled per frame while a movement key is held.
pub const PLAYER_SPEED: f32 = 5.0;
/// Largest per-axis divergence from the server that is still trusted locally.
pub const RECONCILIATION_THRESHOLD: f32 = 20.0;

pub const SPAWN_X: f32 = 100.0;
pub const SPAWN_Y: f32 = 100.0;

pub const MAX_PLAYERS: usize = 4;
pub const MIN_PLAYERS_TO_START: usize = 2;
