use ggegui::{egui, GuiContext};
use ggez::graphics::{Canvas, Color, DrawParam};
use ggez::{Context, GameResult};
use kickabout::session::{ClientSession, Phase};

use crate::{network::{ConnectionStatus, Network}, room_scene::RoomScene, scene::Transition, GameState};

pub struct LobbyScene {
    room_input: String,
}

impl LobbyScene {
    pub fn new() -> Self {
        Self {
            room_input: String::new(),
        }
    }

    fn ui(&mut self, ctx: &mut GuiContext, session: &mut ClientSession, network: &mut Network) {
        use egui::*;

        let connected = network.is_connected();

        Window::new("Lobby")
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.add_enabled_ui(connected, |ui| {
                    if ui.button("Create room").clicked() {
                        session.create_room(network);
                    }

                    ui.separator();

                    ui.horizontal(|ui| {
                        ui.label("Room code:");
                        let response = ui.text_edit_singleline(&mut self.room_input);
                        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

                        if ui.button("Join").clicked() || submitted {
                            session.join_room(&self.room_input, network);
                        }
                    });
                });

                ui.horizontal(|ui| {
                    match network.status() {
                        ConnectionStatus::Connecting => {
                            ui.spinner();
                            ui.label("Connecting...");
                        }
                        ConnectionStatus::Closed => {
                            ui.colored_label(Color32::RED, "Disconnected");
                        }
                        ConnectionStatus::Connected => (),
                    }
                    if let Some(error) = session.error() {
                        ui.colored_label(Color32::RED, error);
                    }
                });
            });
    }

    pub fn update(&mut self, ctx: &mut Context, state: &mut GameState) -> GameResult<Transition> {
        let mut gui_ctx = state.gui.ctx();
        self.ui(&mut gui_ctx, &mut state.session, &mut state.network);
        state.gui.update(ctx);

        if state.session.phase() != Phase::Lobby {
            self.room_input.clear();
            return Ok(Transition::Switch(RoomScene::new().into()));
        }

        Ok(Transition::None)
    }

    pub fn draw(&mut self, ctx: &mut Context, state: &mut GameState) -> GameResult<()> {
        let mut canvas = Canvas::from_frame(ctx, Color::BLACK);
        canvas.draw(&state.gui, DrawParam::default());
        canvas.finish(ctx)
    }
}
