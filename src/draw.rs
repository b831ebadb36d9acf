use glam::DVec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);
    pub const RED: Self = Self::rgb(0xff, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn gray(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    /// `alpha` is an opacity in `[0, 1]`, anything outside is clamped
    pub fn with_alpha(self, alpha: f64) -> Self {
        let alpha = if alpha.is_nan() { 0. } else { alpha.clamp(0., 1.) };
        Self {
            a: (alpha * 255.).round() as u8,
            ..self
        }
    }
}

/// Axis-aligned rectangle in screen pixels, may extend past the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub pos: DVec2,
    pub size: DVec2,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            size: DVec2::new(w, h),
        }
    }
}

/// One resolved drawing operation. Colors with an alpha below 255 are meant
/// to be blended over what is already on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    Rect {
        rect: Rect,
        fill: Rgba,
        stroke: Option<Rgba>,
    },
    Line {
        from: DVec2,
        to: DVec2,
        color: Rgba,
    },
    Circle {
        center: DVec2,
        radius: f64,
        color: Rgba,
    },
}

/// Whatever ends up putting pixels on a screen.
pub trait Surface {
    fn draw(&mut self, command: &DrawCommand) -> anyhow::Result<()>;
}

/// Keeps every command it is given, handy for tests and headless runs.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
}

impl Surface for Recorder {
    fn draw(&mut self, command: &DrawCommand) -> anyhow::Result<()> {
        self.commands.push(*command);
        Ok(())
    }
}
