//! Everything the client knows about itself: who it is, which room it is in,
//! what keys are held and where it predicts its player to be.

use ggez::input::keyboard::KeyCode;

use crate::input::{KeyState, MoveKey};
use crate::math::units::world::*;
use crate::network::client::Packet;
use crate::network::server::Packet as ServerPacket;
use crate::network::{GameSnapshot, PlayerId, RoomCode};
use crate::prediction::{Predictor, Reconciliation};
use crate::settings::Settings;
use crate::MIN_PLAYERS_TO_START;

/// Anything packets can be handed to. Sends are fire-and-forget.
pub trait Outbox {
    fn send(&mut self, packet: &Packet);

    /// Whether sends can currently reach the server.
    fn is_open(&self) -> bool {
        true
    }
}

impl Outbox for Vec<Packet> {
    fn send(&mut self, packet: &Packet) {
        self.push(packet.clone());
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Phase {
    Lobby,
    Waiting,
    Playing,
}

#[derive(Clone, Debug)]
pub struct Room {
    pub code: RoomCode,
    pub host: bool,
    pub started: bool,
    pub players: Vec<PlayerId>,
}

/// Armed on entering a room and cancelled on leave; ticks while cancelled do nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct FrameLoop {
    armed: bool,
    frames: u64,
}

impl FrameLoop {
    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn cancel(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Frames run since the loop was created.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn tick(&mut self) -> bool {
        if self.armed {
            self.frames += 1;
        }
        self.armed
    }
}

pub struct ClientSession {
    player_id: PlayerId,
    acknowledged: bool,
    include_player_id: bool,
    room: Option<Room>,
    keys: KeyState,
    predictor: Predictor,
    frame_loop: FrameLoop,
    snapshot: Option<GameSnapshot>,
    error: Option<String>,
}

impl Default for ClientSession {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl ClientSession {
    pub fn new(settings: &Settings) -> Self {
        let predictor = Predictor::new(settings.player_speed, settings.reconciliation_threshold)
            .with_field_clamp(settings.clamp_to_field);

        Self {
            player_id: PlayerId::generate(),
            acknowledged: false,
            include_player_id: settings.include_player_id,
            room: None,
            keys: KeyState::new(),
            predictor,
            frame_loop: FrameLoop::default(),
            snapshot: None,
            error: None,
        }
    }

    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    /// Whether the server has assigned our id yet.
    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }

    pub fn room(&self) -> Option<&Room> {
        self.room.as_ref()
    }

    pub fn phase(&self) -> Phase {
        match &self.room {
            None => Phase::Lobby,
            Some(room) if room.started => Phase::Playing,
            Some(_) => Phase::Waiting,
        }
    }

    pub fn is_host(&self) -> bool {
        self.room.as_ref().is_some_and(|room| room.host)
    }

    pub fn players(&self) -> &[PlayerId] {
        self.room.as_ref().map(|room| room.players.as_slice()).unwrap_or_default()
    }

    pub fn position(&self) -> Point2D {
        self.predictor.position()
    }

    pub fn keys(&self) -> &KeyState {
        &self.keys
    }

    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }

    /// Latest server snapshot, for rendering.
    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.snapshot.as_ref()
    }

    /// Last error reported by the server, cleared on the next lobby action.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_start(&self) -> bool {
        self.room
            .as_ref()
            .is_some_and(|room| room.host && !room.started && room.players.len() >= MIN_PLAYERS_TO_START)
    }

    pub fn create_room(&mut self, out: &mut impl Outbox) {
        self.error = None;
        out.send(&Packet::CreateRoom);
    }

    /// Asks to join the room typed by the user. Blank input is ignored.
    pub fn join_room(&mut self, input: &str, out: &mut impl Outbox) -> bool {
        let Some(code) = RoomCode::parse(input) else {
            return false;
        };

        self.error = None;
        out.send(&Packet::JoinRoom { code });
        true
    }

    pub fn start_game(&mut self, out: &mut impl Outbox) {
        if self.can_start() {
            out.send(&Packet::StartGame);
        } else {
            log::debug!("Ignoring start request, not allowed to start");
        }
    }

    pub fn leave_room(&mut self, out: &mut impl Outbox) {
        let Some(room) = self.room.take() else {
            return;
        };

        log::info!("Leaving room {}", room.code);
        out.send(&Packet::LeaveRoom);

        self.frame_loop.cancel();
        self.keys.clear();
        self.snapshot = None;
    }

    /// Records a key press while in a room. Keys other than the arrows are ignored.
    pub fn key_down(&mut self, code: KeyCode) {
        let Some(key) = MoveKey::from_keycode(code) else {
            return;
        };

        if self.room.is_some() {
            self.keys.press(key);
        }
    }

    pub fn key_up(&mut self, code: KeyCode) {
        if let Some(key) = MoveKey::from_keycode(code) {
            self.keys.release(key);
        }
    }

    /// Runs one tick of the prediction loop, returning the position sent to the server, if any.
    ///
    /// Nothing moves while the outbox is closed.
    pub fn frame(&mut self, out: &mut impl Outbox) -> Option<Point2D> {
        if self.room.is_none() || !out.is_open() || !self.frame_loop.tick() {
            return None;
        }

        let position = self.predictor.step(&self.keys)?;
        let id = self.include_player_id.then(|| self.player_id.clone());
        out.send(&Packet::PlayerMove {
            position: position.into(),
            id,
        });

        Some(position)
    }

    pub fn handle_packet(&mut self, packet: ServerPacket) {
        use ServerPacket::*;

        match &packet {
            GameUpdate(_) => log::trace!("GameUpdate(..)"),
            packet => log::debug!("{packet:?}"),
        }

        match packet {
            Connected { sid } => {
                log::info!("Connected with ID: {sid}");
                self.player_id = sid;
                self.acknowledged = true;
            }
            RoomCreated { code } => {
                self.enter_room(code, true, vec![self.player_id.clone()]);
            }
            RoomJoined { code, players } => {
                self.enter_room(code, false, players);
            }
            RoomError { error } => {
                log::warn!("Room error: {error}");
                self.error = Some(error);
            }
            GameStarted(initial) => match self.room.as_mut() {
                Some(room) => {
                    room.started = true;
                    if initial.is_some() {
                        self.snapshot = initial;
                    }
                }
                None => log::debug!("Game started while not in a room"),
            },
            PlayerJoined { players } => {
                if let Some(room) = self.room.as_mut() {
                    room.players = players;
                }
            }
            PlayerLeft { players, sid } => {
                if let Some(room) = self.room.as_mut() {
                    match (players, sid) {
                        (Some(players), _) => room.players = players,
                        (None, Some(sid)) => room.players.retain(|player| *player != sid),
                        (None, None) => log::debug!("PlayerLeft without a player"),
                    }
                }
            }
            GameUpdate(Some(snapshot)) => self.apply_snapshot(snapshot),
            GameUpdate(None) => log::trace!("Empty game update"),
        }
    }

    fn enter_room(&mut self, code: RoomCode, host: bool, players: Vec<PlayerId>) {
        log::info!("Entered room {code} (host: {host}, players: {})", players.len());

        self.error = None;
        self.snapshot = None;
        self.room = Some(Room {
            code,
            host,
            started: false,
            players,
        });
        self.frame_loop.arm();
    }

    fn apply_snapshot(&mut self, snapshot: GameSnapshot) {
        if self.room.is_none() {
            log::trace!("Dropping game update, not in a room");
            return;
        }

        if let Some(authoritative) = snapshot.player_position(&self.player_id) {
            if let Reconciliation::Snapped { from, to } = self.predictor.reconcile(authoritative) {
                log::debug!("Reconciled local player from {from:?} to {to:?}");
            }
        }

        self.snapshot = Some(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_room(session: &mut ClientSession) {
        session.handle_packet(ServerPacket::Connected { sid: "me".into() });
        session.handle_packet(ServerPacket::RoomCreated {
            code: RoomCode::parse("1234").unwrap(),
        });
    }

    #[test]
    fn starts_in_lobby_with_disarmed_loop() {
        let mut session = ClientSession::default();
        let mut out = Vec::new();

        assert_eq!(session.phase(), Phase::Lobby);
        assert!(!session.frame_loop().is_armed());
        assert!(!session.is_acknowledged());
        assert_eq!(session.frame(&mut out), None);
        assert!(out.is_empty());
    }

    #[test]
    fn keys_outside_room_are_dropped() {
        let mut session = ClientSession::default();
        session.key_down(KeyCode::Up);
        assert!(!session.keys().any_held());

        in_room(&mut session);
        session.key_down(KeyCode::Up);
        assert!(session.keys().is_held(MoveKey::Up));
    }

    #[test]
    fn frame_loop_counts_only_armed_ticks() {
        let mut session = ClientSession::default();
        let mut out = Vec::new();

        session.frame(&mut out);
        in_room(&mut session);
        session.frame(&mut out);
        session.frame(&mut out);

        assert_eq!(session.frame_loop().frames(), 2);
    }

    #[test]
    fn move_carries_id_when_configured() {
        let settings = Settings {
            include_player_id: true,
            ..Settings::default()
        };
        let mut session = ClientSession::new(&settings);
        let mut out = Vec::new();
        in_room(&mut session);

        session.key_down(KeyCode::Right);
        session.frame(&mut out);

        assert_eq!(
            out,
            vec![Packet::PlayerMove {
                position: crate::network::Position::new(105.0, 100.0),
                id: Some("me".into()),
            }]
        );
    }

    #[derive(Default)]
    struct ClosedOutbox(Vec<Packet>);

    impl Outbox for ClosedOutbox {
        fn send(&mut self, packet: &Packet) {
            self.0.push(packet.clone());
        }

        fn is_open(&self) -> bool {
            false
        }
    }

    #[test]
    fn closed_outbox_stops_the_loop() {
        let mut session = ClientSession::default();
        let mut out = ClosedOutbox::default();
        in_room(&mut session);

        session.key_down(KeyCode::Right);
        assert_eq!(session.frame(&mut out), None);
        assert_eq!(session.frame(&mut out), None);

        assert!(out.0.is_empty());
        assert_eq!(session.frame_loop().frames(), 0);
        assert_eq!(session.position(), Point2D::new(100.0, 100.0));

        let mut open = Vec::new();
        assert_eq!(session.frame(&mut open), Some(Point2D::new(105.0, 100.0)));
        assert_eq!(open.len(), 1);
    }

    #[test]
    fn player_left_by_sid_removes_only_that_player() {
        let mut session = ClientSession::default();
        in_room(&mut session);
        session.handle_packet(ServerPacket::PlayerJoined {
            players: vec!["me".into(), "you".into(), "them".into()],
        });

        session.handle_packet(ServerPacket::PlayerLeft {
            players: None,
            sid: Some("you".into()),
        });

        assert_eq!(session.players(), &[PlayerId::from("me"), PlayerId::from("them")]);
    }
}
