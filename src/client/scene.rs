use ggez::GameResult;

use crate::{lobby_scene::LobbyScene, room_scene::RoomScene, GameState};

//? manual enum dispatch
pub enum Scene {
    Lobby(LobbyScene),
    Room(RoomScene),
}

impl From<LobbyScene> for Scene {
    fn from(value: LobbyScene) -> Self {
        Self::Lobby(value)
    }
}

impl From<RoomScene> for Scene {
    fn from(value: RoomScene) -> Self {
        Self::Room(value)
    }
}

impl Scene {
    pub fn update(&mut self, ctx: &mut ggez::Context, state: &mut GameState) -> GameResult<()> {
        let transition = match self {
            Scene::Lobby(scene) => scene.update(ctx, state)?,
            Scene::Room(scene) => scene.update(ctx, state)?,
        };

        match transition {
            Transition::None => (), // noop
            Transition::Switch(next_scene) => *self = next_scene,
        }
        Ok(())
    }

    pub fn draw(&mut self, ctx: &mut ggez::Context, state: &mut GameState) -> GameResult<()> {
        match self {
            Scene::Lobby(scene) => scene.draw(ctx, state),
            Scene::Room(scene) => scene.draw(ctx, state),
        }
    }
}

pub enum Transition {
    None,
    Switch(Scene),
}
