//! Player input commands
//!
//! Key names follow the browser `KeyboardEvent.key` values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lane change or action trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    /// Jump
    Up,
    /// Slide
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// A direction name that is not one of left/right/up/down
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction: {0:?}")]
pub struct UnknownDirection(pub String);

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => Err(UnknownDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything an input source can ask the engine to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Move(Direction),
    Pause,
    Reset,
}

impl Command {
    /// Map a key name (arrows, WASD, space, R) to a command
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Command::Move(Direction::Left)),
            "ArrowRight" | "d" | "D" => Some(Command::Move(Direction::Right)),
            "ArrowUp" | "w" | "W" => Some(Command::Move(Direction::Up)),
            "ArrowDown" | "s" | "S" => Some(Command::Move(Direction::Down)),
            " " | "Space" => Some(Command::Pause),
            "r" | "R" => Some(Command::Reset),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_direction() {
        assert_eq!("left".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!("up".parse::<Direction>(), Ok(Direction::Up));
        // Names are exact: no trimming, no case folding
        assert!(" up ".parse::<Direction>().is_err());
        assert!("LEFT".parse::<Direction>().is_err());
        assert_eq!(
            "sideways".parse::<Direction>(),
            Err(UnknownDirection("sideways".to_string()))
        );
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            Command::from_key("ArrowLeft"),
            Some(Command::Move(Direction::Left))
        );
        assert_eq!(Command::from_key("W"), Some(Command::Move(Direction::Up)));
        assert_eq!(Command::from_key("s"), Some(Command::Move(Direction::Down)));
        assert_eq!(Command::from_key(" "), Some(Command::Pause));
        assert_eq!(Command::from_key("R"), Some(Command::Reset));
        assert_eq!(Command::from_key("Enter"), None);
    }
}
