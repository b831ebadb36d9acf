/// the only keys the game reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Forward,
    Backward,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    Pressed(Key),
    Released(Key),
}

/// Direction of a walk or turn request. For turning, `Negative` is
/// counter-clockwise on screen (towards the left).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Intent {
    Negative,
    #[default]
    Idle,
    Positive,
}

impl Intent {
    pub fn sign(self) -> f64 {
        match self {
            Self::Negative => -1.,
            Self::Idle => 0.,
            Self::Positive => 1.,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intents {
    pub walk: Intent,
    pub turn: Intent,
}

impl Intents {
    /// Releasing either key of an axis stops that axis, even if the opposite
    /// key is still held.
    pub fn apply(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Pressed(Key::Forward) => self.walk = Intent::Positive,
            KeyEvent::Pressed(Key::Backward) => self.walk = Intent::Negative,
            KeyEvent::Pressed(Key::Left) => self.turn = Intent::Negative,
            KeyEvent::Pressed(Key::Right) => self.turn = Intent::Positive,
            KeyEvent::Released(Key::Forward | Key::Backward) => self.walk = Intent::Idle,
            KeyEvent::Released(Key::Left | Key::Right) => self.turn = Intent::Idle,
        }
    }
}
