use ggegui::{egui, GuiContext};
use ggez::graphics::{Canvas, Color, DrawParam};
use ggez::{Context, GameResult};
use kickabout::session::{ClientSession, Phase};
use kickabout::MAX_PLAYERS;

use crate::{lobby_scene::LobbyScene, network::Network, render, scene::Transition, GameState};

pub struct RoomScene;

impl RoomScene {
    pub fn new() -> Self {
        Self
    }

    fn ui(&mut self, ctx: &mut GuiContext, session: &mut ClientSession, network: &mut Network) {
        use egui::*;

        let Some(room) = session.room() else {
            return;
        };

        let title = format!("Room {}", room.code);
        let player_count = format!("{}/{} players", room.players.len(), MAX_PLAYERS);
        let show_start = room.host && !room.started;
        let show_waiting = !room.host && !room.started;

        Window::new(title)
            .anchor(Align2::RIGHT_TOP, [-8.0, 8.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(player_count);

                if show_start {
                    let start = ui.add_enabled(session.can_start(), Button::new("Start game"));
                    if start.clicked() {
                        session.start_game(network);
                    }
                }

                if show_waiting {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Waiting for the host to start...");
                    });
                }

                ui.separator();

                if ui.button("Leave").clicked() {
                    session.leave_room(network);
                }
            });
    }

    pub fn update(&mut self, ctx: &mut Context, state: &mut GameState) -> GameResult<Transition> {
        let mut gui_ctx = state.gui.ctx();
        self.ui(&mut gui_ctx, &mut state.session, &mut state.network);
        state.gui.update(ctx);

        if state.session.phase() == Phase::Lobby {
            return Ok(Transition::Switch(LobbyScene::new().into()));
        }

        state.session.frame(&mut state.network);

        Ok(Transition::None)
    }

    pub fn draw(&mut self, ctx: &mut Context, state: &mut GameState) -> GameResult<()> {
        let mut canvas = Canvas::from_frame(ctx, Color::BLACK);

        if state.session.phase() == Phase::Playing {
            render::draw_field(ctx, &mut canvas, &state.session)?;
        }

        canvas.draw(&state.gui, DrawParam::default());
        canvas.finish(ctx)
    }
}
