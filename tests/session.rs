use std::collections::HashMap;

use ggez::input::keyboard::KeyCode;
use kickabout::input::MoveKey;
use kickabout::math::units::world::Point2D;
use kickabout::network::client::Packet;
use kickabout::network::codec::WireFormat;
use kickabout::network::server::Packet as ServerPacket;
use kickabout::network::{BallState, GameSnapshot, PlayerId, PlayerSnapshot, Position, RoomCode};
use kickabout::session::{ClientSession, Phase};

fn code(code: &str) -> RoomCode {
    RoomCode::parse(code).unwrap()
}

fn snapshot(players: &[(&str, f32, f32)]) -> GameSnapshot {
    GameSnapshot {
        ball: BallState { x: 300.0, y: 200.0, vx: 0.0, vy: 0.0 },
        players: players
            .iter()
            .map(|(id, x, y)| (PlayerId::from(*id), PlayerSnapshot::Flat(Position::new(*x, *y))))
            .collect::<HashMap<_, _>>(),
        status: None,
    }
}

/// A connected host in a started game, with nothing sent yet.
fn playing() -> (ClientSession, Vec<Packet>) {
    let mut session = ClientSession::default();
    session.handle_packet(ServerPacket::Connected { sid: "me".into() });
    session.handle_packet(ServerPacket::RoomCreated { code: code("4821") });
    session.handle_packet(ServerPacket::GameStarted(None));
    (session, Vec::new())
}

#[test]
fn up_left_for_one_frame_sends_one_move() {
    let (mut session, mut out) = playing();
    session.key_down(KeyCode::Up);
    session.key_down(KeyCode::Left);

    let sent = session.frame(&mut out);

    assert_eq!(sent, Some(Point2D::new(95.0, 95.0)));
    assert_eq!(session.position(), Point2D::new(95.0, 95.0));
    assert_eq!(
        out,
        vec![Packet::PlayerMove {
            position: Position::new(95.0, 95.0),
            id: None
        }]
    );
}

#[test]
fn one_message_per_moving_frame_and_none_when_still() {
    let (mut session, mut out) = playing();

    session.frame(&mut out);
    assert!(out.is_empty());

    session.key_down(KeyCode::Down);
    for _ in 0..3 {
        session.frame(&mut out);
    }
    assert_eq!(out.len(), 3);

    session.key_up(KeyCode::Down);
    session.frame(&mut out);
    assert_eq!(out.len(), 3);

    session.key_down(KeyCode::Left);
    session.key_down(KeyCode::Right);
    session.frame(&mut out);
    assert_eq!(out.len(), 3);
    assert_eq!(session.position(), Point2D::new(100.0, 115.0));
}

#[test]
fn non_arrow_keys_leave_key_state_alone() {
    let (mut session, mut out) = playing();

    session.key_down(KeyCode::W);
    session.key_down(KeyCode::Space);
    session.key_down(KeyCode::Escape);
    assert!(!session.keys().any_held());
    assert_eq!(session.frame(&mut out), None);
    assert!(out.is_empty());

    session.key_down(KeyCode::Up);
    session.key_up(KeyCode::Space);
    assert!(session.keys().is_held(MoveKey::Up));
}

#[test]
fn far_update_snaps_local_position() {
    let (mut session, _) = playing();

    session.handle_packet(ServerPacket::GameUpdate(Some(snapshot(&[("me", 130.0, 100.0)]))));

    assert_eq!(session.position(), Point2D::new(130.0, 100.0));
}

#[test]
fn near_update_keeps_prediction() {
    let (mut session, _) = playing();

    session.handle_packet(ServerPacket::GameUpdate(Some(snapshot(&[("me", 105.0, 100.0)]))));

    assert_eq!(session.position(), Point2D::new(100.0, 100.0));
    assert!(session.snapshot().is_some());
}

#[test]
fn other_players_never_move_the_local_player() {
    let (mut session, _) = playing();

    session.handle_packet(ServerPacket::GameUpdate(Some(snapshot(&[("other", 500.0, 300.0)]))));

    assert_eq!(session.position(), Point2D::new(100.0, 100.0));
    let stored = session.snapshot().unwrap();
    assert_eq!(stored.player_position(&"other".into()), Some(Position::new(500.0, 300.0)));
}

#[test]
fn nested_player_shape_from_the_wire_reconciles() {
    let (mut session, _) = playing();
    let bytes = br#"{"event":"game_update","data":{
        "ball": {"x": 300, "y": 200, "vx": 0, "vy": 0},
        "players": {"me": {"position": {"x": 100, "y": 150}}},
        "status": "playing"
    }}"#;

    let packet: ServerPacket = WireFormat::Json.decode(bytes).unwrap();
    session.handle_packet(packet);

    assert_eq!(session.position(), Point2D::new(100.0, 150.0));
}

#[test]
fn room_lifecycle() {
    let mut session = ClientSession::default();
    let mut out = Vec::new();
    session.handle_packet(ServerPacket::Connected { sid: "host".into() });
    assert_eq!(session.phase(), Phase::Lobby);

    session.create_room(&mut out);
    assert_eq!(out, vec![Packet::CreateRoom]);

    session.handle_packet(ServerPacket::RoomCreated { code: code("4821") });
    assert_eq!(session.phase(), Phase::Waiting);
    assert!(session.is_host());
    assert!(session.frame_loop().is_armed());
    assert_eq!(session.players(), &[PlayerId::from("host")]);

    // alone in the room, start is refused
    assert!(!session.can_start());
    session.start_game(&mut out);
    assert_eq!(out.len(), 1);

    session.handle_packet(ServerPacket::PlayerJoined {
        players: vec!["host".into(), "guest".into()],
    });
    assert!(session.can_start());
    session.start_game(&mut out);
    assert_eq!(out.last(), Some(&Packet::StartGame));

    session.handle_packet(ServerPacket::GameStarted(None));
    assert_eq!(session.phase(), Phase::Playing);
    assert!(!session.can_start());

    session.key_down(KeyCode::Right);
    session.leave_room(&mut out);
    assert_eq!(out.last(), Some(&Packet::LeaveRoom));
    assert_eq!(session.phase(), Phase::Lobby);
    assert!(!session.is_host());
    assert!(!session.frame_loop().is_armed());
    assert!(!session.keys().any_held());
    assert!(session.snapshot().is_none());

    // no further moves once out of the room
    let sent = out.len();
    session.key_down(KeyCode::Right);
    session.frame(&mut out);
    assert_eq!(out.len(), sent);
}

#[test]
fn guest_cannot_start() {
    let mut session = ClientSession::default();
    let mut out = Vec::new();

    session.handle_packet(ServerPacket::RoomJoined {
        code: code("4821"),
        players: vec!["host".into(), "me".into()],
    });
    assert_eq!(session.phase(), Phase::Waiting);
    assert!(!session.is_host());

    session.start_game(&mut out);
    assert!(out.is_empty());
}

#[test]
fn join_normalizes_and_rejects_blank_codes() {
    let mut session = ClientSession::default();
    let mut out = Vec::new();

    assert!(!session.join_room("   ", &mut out));
    assert!(out.is_empty());

    assert!(session.join_room(" ab12 ", &mut out));
    assert_eq!(out, vec![Packet::JoinRoom { code: code("AB12") }]);
}

#[test]
fn room_error_is_kept_until_next_attempt() {
    let mut session = ClientSession::default();
    let mut out = Vec::new();

    session.handle_packet(ServerPacket::RoomError {
        error: "Room not found".to_owned(),
    });
    assert_eq!(session.error(), Some("Room not found"));
    assert_eq!(session.phase(), Phase::Lobby);

    session.join_room("1111", &mut out);
    assert_eq!(session.error(), None);
}

#[test]
fn leaving_outside_a_room_sends_nothing() {
    let mut session = ClientSession::default();
    let mut out = Vec::new();

    session.leave_room(&mut out);
    assert!(out.is_empty());
}

#[test]
fn updates_outside_a_room_are_dropped() {
    let mut session = ClientSession::default();
    session.handle_packet(ServerPacket::Connected { sid: "me".into() });

    session.handle_packet(ServerPacket::GameUpdate(Some(snapshot(&[("me", 400.0, 400.0)]))));

    assert_eq!(session.position(), Point2D::new(100.0, 100.0));
    assert!(session.snapshot().is_none());
}
