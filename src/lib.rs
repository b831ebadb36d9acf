//! Pseudo-3D view of a tile map, one ray per screen column.
//!
//! [`Frame`] ties the pieces together: each tick moves the [`Player`] through
//! the [`TileMap`], casts a fan of [`Ray`]s, and turns the hits into
//! [`DrawCommand`]s for whatever [`Surface`] is on the other end.

pub mod config;
pub mod draw;
pub mod frame;
pub mod input;
pub mod map;
pub mod minimap;
pub mod player;
pub mod projection;
pub mod ray;

pub use config::Config;
pub use draw::{DrawCommand, Recorder, Rgba, Surface};
pub use frame::Frame;
pub use input::{Key, KeyEvent};
pub use map::{Cell, TileMap};
pub use player::Player;
pub use ray::{Ray, RaySet};
