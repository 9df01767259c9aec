use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The four possible move directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    /// All four directions, ordered by their discriminant.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Index into `[Up, Down, Left, Right]` arrays such as `legal_moves`.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = EngineError;

    /// Convert a raw code (0=Up, 1=Down, 2=Left, 3=Right).
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Direction::Up),
            1 => Ok(Direction::Down),
            2 => Ok(Direction::Left),
            3 => Ok(Direction::Right),
            _ => Err(EngineError::InvalidDirection(value.to_string())),
        }
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(EngineError::InvalidDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_u8() {
        assert_eq!(Direction::try_from(0), Ok(Direction::Up));
        assert_eq!(Direction::try_from(1), Ok(Direction::Down));
        assert_eq!(Direction::try_from(2), Ok(Direction::Left));
        assert_eq!(Direction::try_from(3), Ok(Direction::Right));
        assert_eq!(
            Direction::try_from(4),
            Err(EngineError::InvalidDirection("4".to_string()))
        );
        assert!(Direction::try_from(255).is_err());
    }

    #[test]
    fn test_direction_all_matches_index() {
        for (i, dir) in Direction::ALL.iter().enumerate() {
            assert_eq!(dir.index(), i);
        }
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("left".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!("RIGHT".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!("Up".parse::<Direction>(), Ok(Direction::Up));
        assert!("diagonal".parse::<Direction>().is_err());
    }

    #[test]
    fn test_direction_display_round_trips_through_parse() {
        for dir in Direction::ALL {
            assert_eq!(dir.to_string().parse::<Direction>(), Ok(dir));
        }
    }
}
