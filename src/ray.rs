use crate::config::Config;
use crate::map::TileMap;
use crate::player::Player;
use glam::DVec2;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Wraps an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let mut angle = angle % TAU;
    if angle < 0. {
        angle += TAU;
    }

    // tiny negative inputs round up to exactly 2π
    if angle >= TAU {
        0.
    } else {
        angle
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalFacing {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HorizontalFacing {
    Left,
    Right,
}

/// Which way a ray points on each axis. Screen coordinates: y grows
/// downwards, so angles in `(0, π)` face down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Facing {
    pub vertical: VerticalFacing,
    pub horizontal: HorizontalFacing,
}

impl Facing {
    /// `angle` must already be normalized
    pub fn of(angle: f64) -> Self {
        let vertical = if angle > 0. && angle < PI {
            VerticalFacing::Down
        } else {
            VerticalFacing::Up
        };
        let horizontal = if angle < FRAC_PI_2 || angle > 1.5 * PI {
            HorizontalFacing::Right
        } else {
            HorizontalFacing::Left
        };

        Self { vertical, horizontal }
    }

    fn x_sign(self) -> f64 {
        match self.horizontal {
            HorizontalFacing::Left => -1.,
            HorizontalFacing::Right => 1.,
        }
    }

    fn y_sign(self) -> f64 {
        match self.vertical {
            VerticalFacing::Up => -1.,
            VerticalFacing::Down => 1.,
        }
    }

    /// Offset added to a horizontal-line crossing before asking the map about
    /// it. Facing up, the cell to test is the one above the line.
    fn horizontal_probe(self) -> DVec2 {
        match self.vertical {
            VerticalFacing::Up => DVec2::new(0., -1.),
            VerticalFacing::Down => DVec2::ZERO,
        }
    }

    /// Offset for a vertical-line crossing. Facing left, the cell to test is
    /// the one left of the line.
    fn vertical_probe(self) -> DVec2 {
        match self.horizontal {
            HorizontalFacing::Left => DVec2::new(-1., 0.),
            HorizontalFacing::Right => DVec2::ZERO,
        }
    }
}

/// Which family of grid lines a hit landed on. Horizontal hits are the faces
/// of walls seen from above or below, vertical hits the faces seen from the
/// sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub point: DVec2,
    /// `f64::INFINITY` when nothing was hit
    pub distance: f64,
    pub side: Side,
}

impl Hit {
    pub const MISS: Self = Self {
        point: DVec2::ZERO,
        distance: f64::INFINITY,
        side: Side::Horizontal,
    };

    pub fn is_vertical(&self) -> bool {
        self.side == Side::Vertical
    }

    /// Picks the closer hit. The vertical hit has to be strictly closer to
    /// win, equal distances keep the horizontal one.
    pub fn nearest(horizontal: Self, vertical: Self) -> Self {
        if vertical.distance < horizontal.distance {
            vertical
        } else {
            horizontal
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub angle: f64,
    pub facing: Facing,
    pub hit: Hit,
}

impl Ray {
    pub fn new(angle: f64) -> Self {
        let angle = normalize_angle(angle);
        Self {
            angle,
            facing: Facing::of(angle),
            hit: Hit::MISS,
        }
    }

    /// Marches from `origin` along both families of grid lines and keeps the
    /// nearest wall.
    pub fn cast(mut self, origin: DVec2, map: &TileMap) -> Self {
        let horizontal = self.horizontal_hit(origin, map);
        let vertical = self.vertical_hit(origin, map);
        self.hit = Hit::nearest(horizontal, vertical);
        self
    }

    /// crossings of horizontal grid lines (constant y)
    fn horizontal_hit(&self, origin: DVec2, map: &TileMap) -> Hit {
        let cell = map.cell_size();
        let tan = self.angle.tan();

        let mut y = (origin.y / cell).floor() * cell;
        if self.facing.vertical == VerticalFacing::Down {
            y += cell;
        }
        let x = origin.x + (y - origin.y) / tan;
        let step = DVec2::new(
            (cell / tan).abs() * self.facing.x_sign(),
            cell * self.facing.y_sign(),
        );

        let probe = self.facing.horizontal_probe();
        march(origin, DVec2::new(x, y), step, probe, map, Side::Horizontal)
    }

    /// crossings of vertical grid lines (constant x)
    fn vertical_hit(&self, origin: DVec2, map: &TileMap) -> Hit {
        let cell = map.cell_size();
        let tan = self.angle.tan();

        let mut x = (origin.x / cell).floor() * cell;
        if self.facing.horizontal == HorizontalFacing::Right {
            x += cell;
        }
        let y = origin.y + (x - origin.x) * tan;
        let step = DVec2::new(
            cell * self.facing.x_sign(),
            (cell * tan).abs() * self.facing.y_sign(),
        );

        let probe = self.facing.vertical_probe();
        march(origin, DVec2::new(x, y), step, probe, map, Side::Vertical)
    }
}

/// Steps from one grid-line crossing to the next until the probe lands in a
/// wall or the crossing leaves the map.
fn march(
    origin: DVec2,
    mut touch: DVec2,
    step: DVec2,
    probe: DVec2,
    map: &TileMap,
    side: Side,
) -> Hit {
    while map.contains(touch) {
        if map.has_wall_at(touch + probe) {
            return Hit {
                point: touch,
                distance: origin.distance(touch),
                side,
            };
        }
        touch += step;
    }

    Hit::MISS
}

/// The rays of one frame, fanned left to right across the field of view.
#[derive(Clone, Debug)]
pub struct RaySet {
    rays: Vec<Ray>,
}

impl RaySet {
    pub fn new(count: usize) -> Self {
        Self {
            rays: vec![Ray::new(0.); count],
        }
    }

    /// Casts a fresh ray into every slot. Angles start half the field of view
    /// left of the player's direction and grow by `Config::ray_spacing` per
    /// column.
    pub fn cast_all(&mut self, player: &Player, config: &Config, map: &TileMap) {
        let delta = config.ray_spacing();
        let mut angle = player.direction() - config.fov / 2.;

        for slot in self.rays.iter_mut() {
            *slot = Ray::new(angle).cast(player.pos(), map);
            angle += delta;
        }
    }

    pub fn len(&self) -> usize {
        self.rays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rays.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ray> {
        self.rays.iter()
    }
}

impl<'a> IntoIterator for &'a RaySet {
    type Item = &'a Ray;
    type IntoIter = std::slice::Iter<'a, Ray>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    const CENTER: DVec2 = DVec2::new(15., 15.);

    /// 3x3 cells of size 10, only the middle one open
    fn cell() -> TileMap {
        TileMap::parse(10., "111\n101\n111").expect("map should parse")
    }

    #[test]
    fn normalize_range() {
        for angle in [0., 1., -1., TAU, -TAU, 7. * PI, -7.5 * PI, 1e6, -1e-17] {
            let n = normalize_angle(angle);
            assert!((0. ..TAU).contains(&n), "{angle} -> {n}");
        }
        assert_eq!(normalize_angle(-FRAC_PI_2), 1.5 * PI);
        assert_eq!(normalize_angle(-1e-17), 0.);
    }

    #[test]
    fn normalize_periodic() {
        for angle in [0.3, 2., 4.5, 6.] {
            for k in [-3., -1., 1., 4.] {
                let shifted = normalize_angle(angle + TAU * k);
                assert!((shifted - normalize_angle(angle)).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn facing_flags() {
        let f = Facing::of(FRAC_PI_4);
        assert_eq!(f.vertical, VerticalFacing::Down);
        assert_eq!(f.horizontal, HorizontalFacing::Right);

        let f = Facing::of(0.);
        assert_eq!(f.vertical, VerticalFacing::Up);
        assert_eq!(f.horizontal, HorizontalFacing::Right);

        let f = Facing::of(FRAC_PI_2);
        assert_eq!(f.vertical, VerticalFacing::Down);
        assert_eq!(f.horizontal, HorizontalFacing::Left);

        let f = Facing::of(1.25 * PI);
        assert_eq!(f.vertical, VerticalFacing::Up);
        assert_eq!(f.horizontal, HorizontalFacing::Left);
    }

    #[test]
    fn east_hits_vertical_line() {
        let ray = Ray::new(0.).cast(CENTER, &cell());
        assert!(ray.hit.is_vertical());
        assert_eq!(ray.hit.distance, 5.);
        assert_eq!(ray.hit.point, DVec2::new(20., 15.));
    }

    #[test]
    fn south_hits_horizontal_line() {
        let ray = Ray::new(FRAC_PI_2).cast(CENTER, &cell());
        assert!(!ray.hit.is_vertical());
        assert_eq!(ray.hit.distance, 5.);
        assert_eq!(ray.hit.point, DVec2::new(15., 20.));
    }

    #[test]
    fn west_and_north_probe_past_the_line() {
        let map = cell();

        let west = Ray::new(PI).cast(CENTER, &map);
        assert!(west.hit.is_vertical());
        assert_eq!(west.hit.point.x, 10.);
        assert!((west.hit.distance - 5.).abs() < 1e-9);

        let north = Ray::new(1.5 * PI).cast(CENTER, &map);
        assert!(!north.hit.is_vertical());
        assert_eq!(north.hit.point.y, 10.);
        assert!((north.hit.distance - 5.).abs() < 1e-9);
    }

    #[test]
    fn ties_go_horizontal() {
        let horizontal = Hit {
            point: DVec2::new(20., 20.),
            distance: 50f64.sqrt(),
            side: Side::Horizontal,
        };
        let vertical = Hit {
            side: Side::Vertical,
            ..horizontal
        };
        assert_eq!(Hit::nearest(horizontal, vertical).side, Side::Horizontal);

        let closer = Hit {
            distance: vertical.distance - 1e-9,
            ..vertical
        };
        assert_eq!(Hit::nearest(horizontal, closer).side, Side::Vertical);
        assert_eq!(Hit::nearest(Hit::MISS, Hit::MISS), Hit::MISS);
    }

    #[test]
    fn corner_rays() {
        let map = cell();

        // both scans land on (20, 20) at the same distance, horizontal keeps it
        let ray = Ray::new(FRAC_PI_4).cast(CENTER, &map);
        assert_eq!(ray.hit.side, Side::Horizontal);
        assert_eq!(ray.hit.distance, 7.0710678118654755);
        assert_eq!(ray.hit.point, DVec2::new(20., 20.));

        for angle in [3. * FRAC_PI_4, 7. * FRAC_PI_4] {
            let ray = Ray::new(angle).cast(CENTER, &map);
            assert_eq!(ray.hit.side, Side::Horizontal, "angle {angle}");
            assert!((ray.hit.distance - 50f64.sqrt()).abs() < 1e-9);
        }

        // tan rounding puts the vertical crossing a hair closer here
        let ray = Ray::new(5. * FRAC_PI_4).cast(CENTER, &map);
        assert_eq!(ray.hit.side, Side::Vertical);
        assert_eq!(ray.hit.distance, 7.071067811865475);
        assert_eq!(ray.hit.point, DVec2::new(10., 10.000000000000002));
    }

    #[test]
    fn nearer_family_wins() {
        let map = TileMap::parse(10., "11111\n10001\n10011\n11111").expect("map should parse");
        let origin = DVec2::new(12., 15.);

        // shallow: crosses x = 30 into the block at row 2, col 3 before
        // reaching the floor line at y = 30
        let ray = Ray::new(10f64.atan2(16.)).cast(origin, &map);
        assert_eq!(ray.hit.side, Side::Vertical);
        assert!(ray.hit.point.distance(DVec2::new(30., 26.25)) < 1e-9);

        // steep: reaches the bottom wall before the next vertical line
        let ray = Ray::new(10f64.atan2(5.)).cast(origin, &map);
        assert_eq!(ray.hit.side, Side::Horizontal);
        assert!(ray.hit.point.distance(DVec2::new(19.5, 30.)) < 1e-9);
        assert!((ray.hit.distance - 7.5f64.hypot(15.)).abs() < 1e-9);
    }

    #[test]
    fn open_map_stops_at_edges() {
        let map = TileMap::parse(10., "000\n000\n000").expect("map should parse");

        let west = Ray::new(PI).cast(CENTER, &map);
        assert!(west.hit.is_vertical());
        assert!((west.hit.distance - 15.).abs() < 1e-9);

        let east = Ray::new(0.).cast(CENTER, &map);
        assert!(east.hit.is_vertical());
        assert_eq!(east.hit.point, DVec2::new(30., 15.));
    }

    #[test]
    fn fan_covers_field_of_view() {
        let map = TileMap::builtin().expect("built-in map should parse");
        let config = Config::default();
        let player = Player::spawn_default(&map, &config).expect("spawn should succeed");
        let mut rays = RaySet::new(config.num_rays());
        rays.cast_all(&player, &config, &map);

        assert_eq!(rays.len(), 938);
        let first = rays.iter().next().expect("rays");
        let start = normalize_angle(player.direction() - config.fov / 2.);
        assert!((first.angle - start).abs() < 1e-12);
        assert!(rays.iter().all(|ray| ray.hit.distance.is_finite()));
    }

    #[test]
    fn fan_spacing() {
        let map = TileMap::builtin().expect("built-in map should parse");
        let config = Config::default();
        let player = Player::spawn_default(&map, &config).expect("spawn should succeed");
        let mut rays = RaySet::new(config.num_rays());
        rays.cast_all(&player, &config, &map);

        // 60 degrees over 937.5 columns, not over the 938 rays
        let spacing = config.fov / 937.5;
        let angles = rays.iter().map(|ray| ray.angle).collect::<Vec<_>>();
        assert!((angles[1] - angles[0] - spacing).abs() < 1e-12);
        assert!((angles[500] - angles[499] - spacing).abs() < 1e-12);

        let last = player.direction() - config.fov / 2. + 937. * spacing;
        assert!((angles[937] - last).abs() < 1e-9);
        assert!((angles[937] - 5.235429).abs() < 1e-6);
    }

    #[test]
    fn casting_is_deterministic() {
        let map = TileMap::builtin().expect("built-in map should parse");
        let config = Config::default();
        let player = Player::spawn_default(&map, &config).expect("spawn should succeed");

        let mut a = RaySet::new(config.num_rays());
        let mut b = RaySet::new(config.num_rays());
        a.cast_all(&player, &config, &map);
        b.cast_all(&player, &config, &map);
        a.cast_all(&player, &config, &map);

        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.hit.distance.to_bits(), y.hit.distance.to_bits());
            assert_eq!(x.hit.point, y.hit.point);
        }
    }
}
