use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;
use std::time::{Duration, Instant};
use tilecast::draw::{self, DrawCommand, Rgba, Surface};
use tilecast::{Config, Frame, Key, KeyEvent, TileMap};

// helper trait to convert strings into std::error types
trait StringToAnyhow<T> {
    fn ah(self) -> anyhow::Result<T>;
}

impl<T> StringToAnyhow<T> for Result<T, String> {
    fn ah(self) -> anyhow::Result<T> {
        self.map_err(|err| anyhow::anyhow!("{err}"))
    }
}

const TARGET_FPS: u64 = 60;

fn color(c: Rgba) -> Color {
    Color::RGBA(c.r, c.g, c.b, c.a)
}

fn point(v: glam::DVec2) -> Point {
    Point::new(v.x.round() as i32, v.y.round() as i32)
}

/// `None` for rectangles with nothing to draw
fn rect(r: draw::Rect) -> Option<Rect> {
    let w = r.size.x.round();
    let h = r.size.y.round();
    if !(w >= 1. && h >= 1.) {
        return None;
    }
    Some(Rect::new(
        r.pos.x.round() as i32,
        r.pos.y.round() as i32,
        w as u32,
        h as u32,
    ))
}

struct SdlSurface {
    canvas: Canvas<Window>,
}

impl SdlSurface {
    fn fill_circle(&mut self, center: Point, radius: f64) -> anyhow::Result<()> {
        let r = radius.round().max(1.) as i32;
        for dy in -r..=r {
            let dx = (((r * r) - (dy * dy)) as f64).sqrt() as i32;
            self.canvas
                .draw_line(
                    Point::new(center.x() - dx, center.y() + dy),
                    Point::new(center.x() + dx, center.y() + dy),
                )
                .ah()?;
        }

        Ok(())
    }
}

impl Surface for SdlSurface {
    fn draw(&mut self, command: &DrawCommand) -> anyhow::Result<()> {
        match *command {
            DrawCommand::Clear(c) => {
                self.canvas.set_draw_color(color(c));
                self.canvas.clear();
            }
            DrawCommand::Rect { rect: r, fill, stroke } => {
                let Some(r) = rect(r) else {
                    return Ok(());
                };
                if fill.a > 0 {
                    self.canvas.set_draw_color(color(fill));
                    self.canvas.fill_rect(r).ah()?;
                }
                if let Some(stroke) = stroke {
                    self.canvas.set_draw_color(color(stroke));
                    self.canvas.draw_rect(r).ah()?;
                }
            }
            DrawCommand::Line { from, to, color: c } => {
                self.canvas.set_draw_color(color(c));
                self.canvas.draw_line(point(from), point(to)).ah()?;
            }
            DrawCommand::Circle { center, radius, color: c } => {
                self.canvas.set_draw_color(color(c));
                self.fill_circle(point(center), radius)?;
            }
        }

        Ok(())
    }
}

fn key(keycode: Keycode) -> Option<Key> {
    match keycode {
        Keycode::Up => Some(Key::Forward),
        Keycode::Down => Some(Key::Backward),
        Keycode::Left => Some(Key::Left),
        Keycode::Right => Some(Key::Right),
        _ => None,
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_custom_env("TILECAST_LOG");

    log::info!("loading map");
    let map = TileMap::builtin()?;
    let config = Config::default();
    let mut frame = Frame::new(&map, config)?;

    // sdl boilerplate
    log::info!("initializing sdl2");
    let sdl_ctx = sdl2::init().ah()?;
    log::info!("initializing video");
    let video = sdl_ctx.video().ah()?;

    let width = config.screen_width.ceil() as u32;
    let height = config.screen_height.ceil() as u32;
    log::info!("initializing {width}x{height} window");
    let mut window = video
        .window("tilecast", width, height)
        .position_centered()
        .build()?;
    window.set_resizable(false);

    log::info!("creating canvas");
    let mut canvas = window.into_canvas().build()?;
    canvas.set_blend_mode(BlendMode::Blend);
    let mut surface = SdlSurface { canvas };

    log::info!("pumping events");
    let mut events = sdl_ctx.event_pump().ah()?;

    let delta = Duration::from_millis(1_000 / TARGET_FPS);

    'main_loop: loop {
        let prev = Instant::now();

        // handle events
        for ev in events.poll_iter() {
            match ev {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'main_loop,
                Event::KeyDown {
                    keycode: Some(k),
                    repeat: false,
                    ..
                } => {
                    if let Some(k) = key(k) {
                        frame.handle_key(KeyEvent::Pressed(k));
                    }
                }
                Event::KeyUp {
                    keycode: Some(k), ..
                } => {
                    if let Some(k) = key(k) {
                        frame.handle_key(KeyEvent::Released(k));
                    }
                }
                _ => {}
            }
        }

        // update, then draw
        frame.tick();
        if let Err(err) = frame.render(&mut surface) {
            log::error!("error while drawing frame at {}: {err}", frame.player().pos());
            return Err(err);
        }
        surface.canvas.present();

        let diff = prev.elapsed();
        if diff < delta {
            std::thread::sleep(delta - diff);
        }
    }

    Ok(())
}
