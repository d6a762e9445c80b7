mod lobby_scene;
mod network;
mod render;
mod room_scene;
mod scene;

use std::path::PathBuf;

use ggegui::Gui;
use ggez::conf::{WindowMode, WindowSetup};
use ggez::event::EventHandler;
use ggez::input::keyboard::KeyInput;
use ggez::{event, ContextBuilder};
use ggez::{Context, GameError, GameResult};
use kickabout::network::RoomCode;
use kickabout::session::{ClientSession, Phase};
use kickabout::settings::Settings;
use kickabout::{GAME_HEIGHT, GAME_WIDTH};

use lobby_scene::LobbyScene;
use network::{Network, NetworkEvent};
use scene::Scene;

fn main() -> GameResult {
    if let Ok(runtime) = std::env::var("RUNTIME_PATH") {
        let runtime = PathBuf::from(runtime).join("client");
        println!("Setting runtime to {}", runtime.display());
        std::env::set_current_dir(runtime)?;
    }

    let settings = load_settings();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(settings.log_level.as_str())).init();

    let cb = ContextBuilder::new("kickabout", "tylian")
        .window_setup(WindowSetup::default().title("Kickabout").vsync(settings.vsync))
        .window_mode(WindowMode::default().dimensions(GAME_WIDTH, GAME_HEIGHT));

    let (mut ctx, event_loop) = cb.build()?;

    // a room code on the command line wins over the one we were last in
    let rejoin = std::env::args()
        .nth(1)
        .and_then(|code| RoomCode::parse(&code))
        .or_else(|| settings.last_room.clone());

    let state = GameHandler::new(&mut ctx, settings, rejoin)?;
    event::run(ctx, event_loop, state)
}

fn load_settings() -> Settings {
    match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            // logger isn't up yet
            eprintln!("Using default settings ({e})");
            Settings::default()
        }
    }
}

struct GameHandler {
    scene: Scene,
    state: GameState,
}

impl GameHandler {
    fn new(ctx: &mut Context, settings: Settings, rejoin: Option<RoomCode>) -> GameResult<Self> {
        Ok(Self {
            scene: Scene::from(LobbyScene::new()),
            state: GameState::new(ctx, settings, rejoin)?,
        })
    }
}

impl EventHandler for GameHandler {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        self.state.update_network();
        self.scene.update(ctx, &mut self.state)?;
        self.state.remember_room();
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        self.scene.draw(ctx, &mut self.state)
    }

    fn quit_event(&mut self, _ctx: &mut Context) -> GameResult<bool> {
        log::info!("Goodbye!");
        self.state.network.stop();
        Ok(false)
    }

    fn key_down_event(&mut self, _ctx: &mut Context, input: KeyInput, _repeated: bool) -> GameResult {
        // Override default so esc doesn't close game
        if let Some(code) = input.keycode {
            self.state.session.key_down(code);
        }
        Ok(())
    }

    fn key_up_event(&mut self, _ctx: &mut Context, input: KeyInput) -> GameResult {
        if let Some(code) = input.keycode {
            self.state.session.key_up(code);
        }
        Ok(())
    }

    fn text_input_event(&mut self, _ctx: &mut Context, character: char) -> GameResult {
        self.state.gui.input.text_input_event(character);
        Ok(())
    }
}

pub struct GameState {
    gui: Gui,
    settings: Settings,
    session: ClientSession,
    network: Network,
    /// Room to join once the connection is up.
    rejoin: Option<RoomCode>,
}

impl GameState {
    fn new(ctx: &mut Context, settings: Settings, rejoin: Option<RoomCode>) -> GameResult<Self> {
        let gui = Gui::new(ctx);
        let session = ClientSession::new(&settings);
        let network = Network::connect(&settings).map_err(|e| GameError::CustomError(e.to_string()))?;

        Ok(Self {
            gui,
            settings,
            session,
            network,
            rejoin,
        })
    }

    fn update_network(&mut self) {
        while let Some(event) = self.network.try_receive() {
            match event {
                NetworkEvent::Connected => {
                    if let Some(code) = self.rejoin.take() {
                        log::info!("Rejoining room {code}");
                        self.session.join_room(code.as_str(), &mut self.network);
                    }
                }
                NetworkEvent::Packet(packet) => self.session.handle_packet(packet),
                NetworkEvent::ConnectFailed | NetworkEvent::Disconnected => (),
            }
        }
    }

    /// Keeps `last_room` in the settings file in step with the room we're in.
    fn remember_room(&mut self) {
        if self.rejoin.is_some() {
            return;
        }

        let current = match self.session.phase() {
            Phase::Lobby => None,
            Phase::Waiting | Phase::Playing => self.session.room().map(|room| room.code.clone()),
        };

        if current == self.settings.last_room {
            return;
        }

        self.settings.last_room = current;
        if let Err(e) = self.settings.save() {
            log::warn!("Couldn't write settings, just fyi: {:?}", e);
        }
    }
}
