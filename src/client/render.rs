use ggez::graphics::{Canvas, Color, DrawMode, DrawParam, Mesh, MeshBuilder, Rect};
use ggez::{Context, GameResult};
use kickabout::math::units::world::*;
use kickabout::session::ClientSession;
use kickabout::{BALL_RADIUS, GAME_HEIGHT, GAME_WIDTH, PLAYER_RADIUS};

pub const BACKGROUND_COLOR: Color = Color { r: 0.298, g: 0.686, b: 0.314, a: 1.0 };
pub const BALL_COLOR: Color = Color::WHITE;
pub const LOCAL_PLAYER_COLOR: Color = Color::BLUE;
pub const REMOTE_PLAYER_COLOR: Color = Color::RED;

const TOLERANCE: f32 = 0.1;

fn to_mint(point: Point2D) -> mint::Point2<f32> {
    point.into()
}

/// Draws the field, the ball and every player from the latest snapshot.
///
/// The local player is drawn where it is predicted to be rather than where the server last saw it,
/// so its snapshot entry is skipped; otherwise it would lag its own input by a round trip.
pub fn draw_field(ctx: &mut Context, canvas: &mut Canvas, session: &ClientSession) -> GameResult {
    let mut builder = MeshBuilder::new();
    builder.rectangle(
        DrawMode::fill(),
        Rect::new(0.0, 0.0, GAME_WIDTH, GAME_HEIGHT),
        BACKGROUND_COLOR,
    )?;

    if let Some(snapshot) = session.snapshot() {
        builder.circle(
            DrawMode::fill(),
            to_mint(snapshot.ball.position()),
            BALL_RADIUS,
            TOLERANCE,
            BALL_COLOR,
        )?;

        for (id, player) in &snapshot.players {
            if id == session.player_id() {
                continue;
            }

            let position = Point2D::from(player.position());
            builder.circle(DrawMode::fill(), to_mint(position), PLAYER_RADIUS, TOLERANCE, REMOTE_PLAYER_COLOR)?;
        }
    }

    builder.circle(
        DrawMode::fill(),
        to_mint(session.position()),
        PLAYER_RADIUS,
        TOLERANCE,
        LOCAL_PLAYER_COLOR,
    )?;

    let mesh = Mesh::from_data(ctx, builder.build());
    canvas.draw(&mesh, DrawParam::default());

    Ok(())
}
