use crate::draw::{DrawCommand, Rect, Rgba};
use crate::map::{Cell, TileMap};
use crate::player::Player;
use crate::ray::RaySet;

const WALL_COLOR: Rgba = Rgba::rgb(0x22, 0x22, 0x22);
const FLOOR_COLOR: Rgba = Rgba::WHITE;

/// Top-down overlay in the corner of the screen: the map, every ray that hit
/// something, and the player on top.
pub fn commands(map: &TileMap, player: &Player, rays: &RaySet, scale: f64) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(map.rows() * map.cols() + rays.len() + 1);

    let cell = map.cell_size() * scale;
    commands.extend(map.cells().map(|(origin, tile)| DrawCommand::Rect {
        rect: Rect::new(origin.x * scale, origin.y * scale, cell, cell),
        fill: match tile {
            Cell::Wall => WALL_COLOR,
            Cell::Empty => FLOOR_COLOR,
        },
        stroke: Some(WALL_COLOR),
    }));

    let eye = player.pos() * scale;
    let ray_color = Rgba::RED.with_alpha(0.3);
    commands.extend(
        rays.iter()
            .filter(|ray| ray.hit.distance.is_finite())
            .map(|ray| DrawCommand::Line {
                from: eye,
                to: ray.hit.point * scale,
                color: ray_color,
            }),
    );

    commands.push(DrawCommand::Circle {
        center: eye,
        // player radius doubles as the dot's diameter
        radius: player.radius * scale / 2.,
        color: Rgba::RED,
    });

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use glam::DVec2;

    #[test]
    fn overlay_layers() {
        let map = TileMap::parse(10., "111\n101\n111").expect("map should parse");
        let config = Config::default();
        let player =
            Player::spawn(&map, DVec2::new(15., 15.), 0., &config).expect("spawn should succeed");
        let mut rays = RaySet::new(4);
        rays.cast_all(&player, &config, &map);

        let commands = commands(&map, &player, &rays, 0.5);
        assert_eq!(commands.len(), 9 + 4 + 1);

        assert_eq!(
            commands[4],
            DrawCommand::Rect {
                rect: Rect::new(5., 5., 5., 5.),
                fill: FLOOR_COLOR,
                stroke: Some(WALL_COLOR),
            }
        );
        assert!(matches!(
            commands[9],
            DrawCommand::Line { from, .. } if from == DVec2::new(7.5, 7.5)
        ));
        assert!(matches!(commands[13], DrawCommand::Circle { radius, .. } if radius == 0.75));
    }
}
