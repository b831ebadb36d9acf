use crate::config::Config;
use crate::draw::{DrawCommand, Rgba, Surface};
use crate::input::KeyEvent;
use crate::map::TileMap;
use crate::minimap;
use crate::player::Player;
use crate::projection::Projection;
use crate::ray::RaySet;

/// Everything that changes from one frame to the next, plus a shared view of
/// the map it all happens on.
pub struct Frame<'map> {
    map: &'map TileMap,
    config: Config,
    player: Player,
    rays: RaySet,
    projection: Projection,
}

impl<'map> Frame<'map> {
    /// sets up a session with the player at the map's default spawn
    pub fn new(map: &'map TileMap, config: Config) -> anyhow::Result<Self> {
        let player = Player::spawn_default(map, &config)?;
        Self::with_player(map, config, player)
    }

    pub fn with_player(map: &'map TileMap, config: Config, player: Player) -> anyhow::Result<Self> {
        config.validate()?;

        let rays = config.num_rays();
        log::info!(
            "casting {rays} rays over {:.0} degrees on a {}x{} screen",
            config.fov.to_degrees(),
            config.screen_width,
            config.screen_height
        );

        let mut this = Self {
            map,
            projection: Projection::new(&config, map.cell_size()),
            rays: RaySet::new(rays),
            config,
            player,
        };
        // first frame can be drawn before the first tick
        this.rays.cast_all(&this.player, &this.config, this.map);

        Ok(this)
    }

    pub fn map(&self) -> &TileMap {
        self.map
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn rays(&self) -> &RaySet {
        &self.rays
    }

    pub fn handle_key(&mut self, event: KeyEvent) {
        log::debug!("key event: {event:?}");
        self.player.handle_key(event);
    }

    /// Moves the player, then recasts every ray from where it ended up.
    pub fn tick(&mut self) {
        self.player.update(self.map);
        self.rays.cast_all(&self.player, &self.config, self.map);
    }

    /// walls first, minimap on top
    pub fn commands(&self) -> Vec<DrawCommand> {
        let mut commands = vec![DrawCommand::Clear(Rgba::BLACK)];
        commands.extend(
            self.projection
                .strips(&self.rays, self.player.direction())
                .map(|strip| strip.command()),
        );
        commands.extend(minimap::commands(
            self.map,
            &self.player,
            &self.rays,
            self.config.minimap_scale,
        ));
        commands
    }

    pub fn render(&self, surface: &mut impl Surface) -> anyhow::Result<()> {
        for command in self.commands() {
            surface.draw(&command)?;
        }

        Ok(())
    }
}
