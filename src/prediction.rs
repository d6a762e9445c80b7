//! Client-side prediction of the local player's position, and the hard
//! correction applied when the server disagrees by too much.

use crate::input::KeyState;
use crate::math::units::world::*;
use crate::math::{clamp_circle, field_bounds};
use crate::network::Position;
use crate::{PLAYER_RADIUS, PLAYER_SPEED, RECONCILIATION_THRESHOLD, SPAWN_X, SPAWN_Y};

/// Outcome of comparing the predicted position against an authoritative one.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Reconciliation {
    /// Within tolerance, the prediction was kept.
    Trusted,
    /// Too far off, the position was replaced by the server's.
    Snapped { from: Point2D, to: Point2D },
}

#[derive(Clone, Debug)]
pub struct Predictor {
    position: Point2D,
    speed: f32,
    threshold: f32,
    bounds: Option<Box2D>,
}

impl Default for Predictor {
    fn default() -> Self {
        Self::new(PLAYER_SPEED, RECONCILIATION_THRESHOLD)
    }
}

impl Predictor {
    pub fn new(speed: f32, threshold: f32) -> Self {
        Self {
            position: Point2D::new(SPAWN_X, SPAWN_Y),
            speed,
            threshold,
            bounds: None,
        }
    }

    /// Keeps the player's circle inside the field after every step.
    pub fn with_field_clamp(mut self, enabled: bool) -> Self {
        self.bounds = enabled.then(field_bounds);
        self
    }

    pub fn position(&self) -> Point2D {
        self.position
    }

    pub fn set_position(&mut self, position: Point2D) {
        self.position = position;
    }

    /// Advances the prediction by one frame of held keys.
    ///
    /// Returns the new position only if it differs from the previous one on either axis.
    pub fn step(&mut self, keys: &KeyState) -> Option<Point2D> {
        let previous = self.position;

        let mut next = previous + keys.direction() * self.speed;
        if let Some(bounds) = &self.bounds {
            next = clamp_circle(next, PLAYER_RADIUS, bounds);
        }
        self.position = next;

        (next.x != previous.x || next.y != previous.y).then_some(next)
    }

    pub fn reconcile(&mut self, authoritative: Position) -> Reconciliation {
        let server = Point2D::from(authoritative);
        let local = self.position;

        if (server.x - local.x).abs() > self.threshold || (server.y - local.y).abs() > self.threshold {
            self.position = server;
            Reconciliation::Snapped { from: local, to: server }
        } else {
            Reconciliation::Trusted
        }
    }
}
