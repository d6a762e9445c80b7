use ggez::input::keyboard::KeyCode;
use strum::{EnumCount, EnumIter, IntoEnumIterator};

use crate::math::units::world::*;

/// The four logical movement inputs.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, EnumCount, EnumIter)]
pub enum MoveKey {
    Up,
    Down,
    Left,
    Right,
}

impl MoveKey {
    /// Unit vector for this key in world space, where y grows downwards.
    pub fn offset(&self) -> Vector2D {
        match self {
            MoveKey::Up => Vector2D::new(0.0, -1.0),
            MoveKey::Down => Vector2D::new(0.0, 1.0),
            MoveKey::Left => Vector2D::new(-1.0, 0.0),
            MoveKey::Right => Vector2D::new(1.0, 0.0),
        }
    }

    /// Maps a window key to a movement key. Anything but the arrow keys is `None`.
    pub fn from_keycode(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Up => Some(MoveKey::Up),
            KeyCode::Down => Some(MoveKey::Down),
            KeyCode::Left => Some(MoveKey::Left),
            KeyCode::Right => Some(MoveKey::Right),
            _ => None,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Held state of every [`MoveKey`], written by key events and read once per frame.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct KeyState {
    held: [bool; MoveKey::COUNT],
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: MoveKey) {
        self.held[key.index()] = true;
    }

    pub fn release(&mut self, key: MoveKey) {
        self.held[key.index()] = false;
    }

    pub fn is_held(&self, key: MoveKey) -> bool {
        self.held[key.index()]
    }

    pub fn any_held(&self) -> bool {
        self.held.iter().any(|held| *held)
    }

    pub fn clear(&mut self) {
        self.held = [false; MoveKey::COUNT];
    }

    /// Sum of the unit vectors of every held key. Opposite keys cancel out.
    pub fn direction(&self) -> Vector2D {
        MoveKey::iter()
            .filter(|key| self.is_held(*key))
            .fold(Vector2D::zero(), |acc, key| acc + key.offset())
    }
}
