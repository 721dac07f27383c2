//! Discrete input events
//!
//! The input layer builds an `Event` and hands it to `Arena::accept`, which
//! matches on the variant. Keypresses carry raw platform key codes and are
//! translated to commands here; unmapped keys translate to nothing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Motion commands understood by the robot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    TurnLeft,
    TurnRight,
    SpeedUp,
    SlowDown,
}

impl Command {
    pub const ALL: [Command; 4] = [
        Command::TurnLeft,
        Command::TurnRight,
        Command::SpeedUp,
        Command::SlowDown,
    ];

    /// Numeric wire code for this command
    pub fn code(&self) -> i32 {
        match self {
            Command::TurnLeft => 0,
            Command::TurnRight => 1,
            Command::SpeedUp => 2,
            Command::SlowDown => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::TurnLeft => "turn-left",
            Command::TurnRight => "turn-right",
            Command::SpeedUp => "speed-up",
            Command::SlowDown => "slow-down",
        }
    }
}

/// A command code outside the known enumeration
///
/// This only happens when the input layer is broken, so it is logged at
/// error level and should be treated as a bug by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("bad actuator command code {0}")]
    Unknown(i32),
}

impl TryFrom<i32> for Command {
    type Error = CommandError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Command::TurnLeft),
            1 => Ok(Command::TurnRight),
            2 => Ok(Command::SpeedUp),
            3 => Ok(Command::SlowDown),
            _ => {
                log::error!("FATAL: bad actuator command {}", code);
                Err(CommandError::Unknown(code))
            }
        }
    }
}

/// A raw platform key code (GLFW numbering)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyCode(pub i32);

impl KeyCode {
    pub const RIGHT: KeyCode = KeyCode(262);
    pub const LEFT: KeyCode = KeyCode(263);
    pub const DOWN: KeyCode = KeyCode(264);
    pub const UP: KeyCode = KeyCode(265);

    /// Map arrow keys to motion commands; anything else is `None`
    pub fn to_command(self) -> Option<Command> {
        match self {
            KeyCode::LEFT => Some(Command::TurnLeft),
            KeyCode::RIGHT => Some(Command::TurnRight),
            KeyCode::UP => Some(Command::SpeedUp),
            KeyCode::DOWN => Some(Command::SlowDown),
            _ => None,
        }
    }
}

/// An immutable input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// An already-translated motion command
    Command(Command),
    /// A raw keypress to be translated
    Keypress(KeyCode),
}

impl Event {
    /// The motion command this event carries, if any
    pub fn command(&self) -> Option<Command> {
        match *self {
            Event::Command(cmd) => Some(cmd),
            Event::Keypress(key) => key.to_command(),
        }
    }
}

impl From<Command> for Event {
    fn from(cmd: Command) -> Self {
        Event::Command(cmd)
    }
}

impl From<KeyCode> for Event {
    fn from(key: KeyCode) -> Self {
        Event::Keypress(key)
    }
}
