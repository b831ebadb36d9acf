use std::f64::consts::PI;

/// tile size of the built-in map, in world units
pub const TILE_SIZE: f64 = 62.5;
pub const MAP_ROWS: usize = 11;
pub const MAP_COLS: usize = 15;

const MAX_SCREEN_WIDTH: f64 = 16384.;

/// Fixed settings for one session. Defaults match the built-in map, where the
/// screen is exactly as large as the map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    pub screen_width: f64,
    pub screen_height: f64,
    /// field of view in radians
    pub fov: f64,
    /// width of the screen column drawn for each ray
    pub strip_width: f64,
    pub minimap_scale: f64,
    pub walk_speed: f64,
    /// radians per tick
    pub turn_speed: f64,
    pub player_radius: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: MAP_COLS as f64 * TILE_SIZE,
            screen_height: MAP_ROWS as f64 * TILE_SIZE,
            fov: 60f64.to_radians(),
            strip_width: 1.,
            minimap_scale: 0.25,
            walk_speed: 3.,
            turn_speed: 2.5 * (PI / 180.),
            player_radius: 3.,
        }
    }
}

impl Config {
    /// one ray per strip, a partial strip at the right edge still gets a ray
    pub fn num_rays(&self) -> usize {
        self.columns().ceil() as usize
    }

    /// Angle between neighbouring rays. Spread over the fractional column
    /// count, so with a partial last strip the fan runs slightly past the
    /// field of view.
    pub fn ray_spacing(&self) -> f64 {
        self.fov / self.columns()
    }

    fn columns(&self) -> f64 {
        self.screen_width / self.strip_width
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("strip_width", self.strip_width),
            ("minimap_scale", self.minimap_scale),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.) {
                anyhow::bail!("{name} must be a positive number, got {value}");
            }
        }

        // at most one ray per pixel column
        if self.columns() > self.screen_width.ceil() || self.screen_width > MAX_SCREEN_WIDTH {
            anyhow::bail!(
                "{}x{} screen with {} pixel strips needs too many rays",
                self.screen_width,
                self.screen_height,
                self.strip_width
            );
        }

        if !(self.fov > 0. && self.fov < PI) {
            anyhow::bail!(
                "field of view must lie in (0, 180) degrees, got {}",
                self.fov.to_degrees()
            );
        }

        if !(self.walk_speed.is_finite() && self.turn_speed.is_finite()) {
            anyhow::bail!("player speeds must be finite");
        }

        Ok(())
    }
}
