use crate::config::Config;
use crate::input::{Intents, KeyEvent};
use crate::map::TileMap;
use crate::ray::normalize_angle;
use glam::DVec2;
use std::f64::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pos: DVec2,
    /// facing angle in radians, kept in `[0, 2π)`
    direction: f64,
    pub intents: Intents,
    pub walk_speed: f64,
    pub turn_speed: f64,
    pub radius: f64,
}

impl Player {
    /// Places a player on the map. The spawn point must be open floor, the
    /// update gate keeps it that way afterwards.
    pub fn spawn(
        map: &TileMap,
        pos: DVec2,
        direction: f64,
        config: &Config,
    ) -> anyhow::Result<Self> {
        if map.has_wall_at(pos) {
            anyhow::bail!("cannot spawn player inside a wall at {pos}");
        }

        log::info!("spawning player at {pos} facing {:.1} degrees", direction.to_degrees());

        Ok(Self {
            pos,
            direction: normalize_angle(direction),
            intents: Intents::default(),
            walk_speed: config.walk_speed,
            turn_speed: config.turn_speed,
            radius: config.player_radius,
        })
    }

    /// Spawn point of the built-in level: middle of the map, 250 units
    /// towards the bottom, looking up.
    pub fn spawn_default(map: &TileMap, config: &Config) -> anyhow::Result<Self> {
        let pos = DVec2::new(map.width() / 2., map.height() / 2. + 250.);
        Self::spawn(map, pos, PI * 1.5, config)
    }

    pub fn pos(&self) -> DVec2 {
        self.pos
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn handle_key(&mut self, event: KeyEvent) {
        self.intents.apply(event);
    }

    /// movement for this tick along the facing direction
    fn step(&self) -> DVec2 {
        DVec2::from_angle(self.direction) * (self.intents.walk.sign() * self.walk_speed)
    }

    /// Turns, then tries to walk. Only the destination point is checked, so
    /// a step longer than a wall is thick can pass through it.
    pub fn update(&mut self, map: &TileMap) {
        let turn = self.intents.turn.sign() * self.turn_speed;
        self.direction = normalize_angle(self.direction + turn);

        let candidate = self.pos + self.step();
        if map.has_wall_at(candidate) {
            log::trace!("blocked moving to {candidate}");
        } else {
            self.pos = candidate;
        }
    }
}
