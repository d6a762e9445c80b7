pub mod units {
    use paste::paste;

    macro_rules! euclid_units {
        ($($unit:ident => $default:ty),+) => {
            paste! {
                $(
                    pub struct [<$unit Unit>];

                    pub mod [<$unit:snake>] {
                        pub type Point2D<T = $default> = euclid::Point2D<T, super::[<$unit Unit>]>;
                        pub type Vector2D<T = $default> = euclid::Vector2D<T, super::[<$unit Unit>]>;
                        pub type Box2D<T = $default> = euclid::Box2D<T, super::[<$unit Unit>]>;
                        pub type Size2D<T = $default> = euclid::Size2D<T, super::[<$unit Unit>]>;
                    }
                )+
            }
        };
    }

    euclid_units!(World => f32);
}

use units::world::*;

use crate::{GAME_HEIGHT, GAME_WIDTH};

/// The playable area, in world units.
pub fn field_bounds() -> Box2D {
    Box2D::from_size(Size2D::new(GAME_WIDTH, GAME_HEIGHT))
}

/// Keeps a circle of `radius` centered on `point` fully inside `bounds`.
pub fn clamp_circle(point: Point2D, radius: f32, bounds: &Box2D) -> Point2D {
    let inner = bounds.inflate(-radius, -radius);
    if inner.is_negative() {
        return bounds.center();
    }

    point.clamp(inner.min, inner.max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_circle_inside_field() {
        let bounds = field_bounds();

        assert_eq!(clamp_circle(Point2D::new(-40.0, 10.0), 15.0, &bounds), Point2D::new(15.0, 15.0));
        assert_eq!(clamp_circle(Point2D::new(700.0, 390.0), 15.0, &bounds), Point2D::new(585.0, 385.0));
        assert_eq!(clamp_circle(Point2D::new(300.0, 200.0), 15.0, &bounds), Point2D::new(300.0, 200.0));
    }

    #[test]
    fn clamp_on_too_small_field_centers() {
        let bounds = Box2D::from_size(Size2D::new(10.0, 10.0));
        assert_eq!(clamp_circle(Point2D::new(0.0, 0.0), 15.0, &bounds), Point2D::new(5.0, 5.0));
    }
}
