use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Kind of stroke recorded in a movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    Forehand,
    Backhand,
    Volley,
    Serve,
    Smash,
    Lob,
    Unknown,
}

impl MovementType {
    pub const ALL: [MovementType; 7] = [
        MovementType::Forehand,
        MovementType::Backhand,
        MovementType::Volley,
        MovementType::Serve,
        MovementType::Smash,
        MovementType::Lob,
        MovementType::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Forehand => "forehand",
            MovementType::Backhand => "backhand",
            MovementType::Volley => "volley",
            MovementType::Serve => "serve",
            MovementType::Smash => "smash",
            MovementType::Lob => "lob",
            MovementType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for MovementType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MovementType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::InvalidTag {
                kind: "movement type",
                value: s.to_string(),
            })
    }
}

/// Hand holding the racket during the movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Hand::Left => "left",
            Hand::Right => "right",
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Hand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Hand::Left),
            "right" => Ok(Hand::Right),
            _ => Err(Error::InvalidTag {
                kind: "hand",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_type_parses_every_tag() {
        for t in MovementType::ALL {
            assert_eq!(t.as_str().parse::<MovementType>().unwrap(), t);
        }
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert!("Forehand".parse::<MovementType>().is_err());
        assert!("RIGHT".parse::<Hand>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_tags() {
        assert_eq!(serde_json::to_string(&MovementType::Smash).unwrap(), "\"smash\"");
        let hand: Hand = serde_json::from_str("\"left\"").unwrap();
        assert_eq!(hand, Hand::Left);
    }
}
