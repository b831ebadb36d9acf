use crate::config::Config;
use crate::draw::{DrawCommand, Rect, Rgba};
use crate::ray::{Ray, RaySet, Side};

/// brightness of walls hit on a vertical grid line
const VERTICAL_LEVEL: u8 = 255;
/// brightness of walls hit on a horizontal grid line
const HORIZONTAL_LEVEL: u8 = 200;
/// distance at which a wall stops being fully opaque
const FOG_DISTANCE: f64 = 175.;

/// Distance from the eye to a screen plane wide enough that the field of
/// view exactly spans `screen_width`.
pub fn plane_distance(screen_width: f64, fov: f64) -> f64 {
    (screen_width / 2.) / (fov / 2.).tan()
}

/// on-screen height of a wall one cell tall at `distance`
pub fn strip_height(cell_size: f64, distance: f64, plane_distance: f64) -> f64 {
    (cell_size / distance) * plane_distance
}

/// One screen column of wall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Strip {
    pub column: usize,
    /// hit distance with the fish-eye distortion removed
    pub distance: f64,
    pub rect: Rect,
    pub color: Rgba,
}

impl Strip {
    pub fn command(&self) -> DrawCommand {
        DrawCommand::Rect {
            rect: self.rect,
            fill: self.color,
            stroke: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    plane_distance: f64,
    strip_width: f64,
    horizon: f64,
    cell_size: f64,
}

impl Projection {
    pub fn new(config: &Config, cell_size: f64) -> Self {
        Self {
            plane_distance: plane_distance(config.screen_width, config.fov),
            strip_width: config.strip_width,
            horizon: config.screen_height / 2.,
            cell_size,
        }
    }

    pub fn plane_distance(&self) -> f64 {
        self.plane_distance
    }

    /// `direction` is the player's facing angle the ray was fanned around
    pub fn strip(&self, column: usize, ray: &Ray, direction: f64) -> Strip {
        let distance = ray.hit.distance * (ray.angle - direction).cos();
        let height = strip_height(self.cell_size, distance, self.plane_distance);

        let level = match ray.hit.side {
            Side::Vertical => VERTICAL_LEVEL,
            Side::Horizontal => HORIZONTAL_LEVEL,
        };

        Strip {
            column,
            distance,
            rect: Rect::new(
                column as f64 * self.strip_width,
                self.horizon - height / 2.,
                self.strip_width,
                height,
            ),
            color: Rgba::gray(level).with_alpha(FOG_DISTANCE / distance),
        }
    }

    pub fn strips<'a>(
        &'a self,
        rays: &'a RaySet,
        direction: f64,
    ) -> impl Iterator<Item = Strip> + 'a {
        rays.iter()
            .enumerate()
            .map(move |(column, ray)| self.strip(column, ray, direction))
    }
}
