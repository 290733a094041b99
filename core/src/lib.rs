#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Mars rover workspace.
//!
//! This crate defines the vocabulary that connects the terrain world, the rover
//! controller and the adapters. Callers submit batches of command symbols, the
//! controller interprets them as [`Command`] values against an immutable world,
//! and reports a [`CommandOutcome`] together with an optional [`Event`] stream
//! describing each step.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Location of a single grid cell expressed as x (column) and y (row).
///
/// The origin sits in the upper-left corner: x grows eastward and y grows
/// southward, so heading north decreases y.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct Position {
    x: u32,
    y: u32,
}

impl Position {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the position.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row index of the position.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Neighbouring position one cell toward `heading`.
    ///
    /// Returns `None` when the step would underflow past the top or left
    /// edge, or overflow the coordinate range. Callers still have to check
    /// the far edges against the world dimensions.
    #[must_use]
    pub fn neighbor(self, heading: Heading) -> Option<Position> {
        match heading {
            Heading::North => self.y.checked_sub(1).map(|y| Self::new(self.x, y)),
            Heading::East => self.x.checked_add(1).map(|x| Self::new(x, self.y)),
            Heading::South => self.y.checked_add(1).map(|y| Self::new(self.x, y)),
            Heading::West => self.x.checked_sub(1).map(|x| Self::new(x, self.y)),
        }
    }
}

impl From<[u32; 2]> for Position {
    fn from([x, y]: [u32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Position> for [u32; 2] {
    fn from(position: Position) -> Self {
        [position.x, position.y]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal direction the rover faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// Facing toward decreasing y.
    #[serde(rename = "N")]
    North,
    /// Facing toward increasing x.
    #[serde(rename = "E")]
    East,
    /// Facing toward increasing y.
    #[serde(rename = "S")]
    South,
    /// Facing toward decreasing x.
    #[serde(rename = "W")]
    West,
}

impl Heading {
    /// Heading after a quarter turn counter-clockwise.
    #[must_use]
    pub const fn turned_left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    /// Heading after a quarter turn clockwise.
    #[must_use]
    pub const fn turned_right(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Heading pointing the opposite way.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Single-letter symbol used on the command surface.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::North => "N",
            Self::East => "E",
            Self::South => "S",
            Self::West => "W",
        }
    }
}

impl FromStr for Heading {
    type Err = ParseSymbolError;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        match symbol {
            "N" => Ok(Self::North),
            "E" => Ok(Self::East),
            "S" => Ok(Self::South),
            "W" => Ok(Self::West),
            other => Err(ParseSymbolError::UnknownHeading(other.to_owned())),
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Terrain covering a single cell of the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    /// Open ground the rover may cross.
    Plain,
    /// Impassable high ground.
    Mountain,
    /// Impassable fissure.
    Crevasse,
}

impl Terrain {
    /// Reports whether the terrain blocks the rover.
    ///
    /// Mountains and crevasses differ only in name.
    #[must_use]
    pub const fn is_obstacle(self) -> bool {
        match self {
            Self::Plain => false,
            Self::Mountain | Self::Crevasse => true,
        }
    }

    /// Map symbol for the terrain.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Plain => 'P',
            Self::Mountain => 'M',
            Self::Crevasse => 'C',
        }
    }

    /// Human readable label for the terrain.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Plain => "plains",
            Self::Mountain => "mountains",
            Self::Crevasse => "crevasse",
        }
    }

    /// Parses a single map symbol.
    pub fn from_symbol(symbol: char) -> Result<Self, ParseSymbolError> {
        match symbol {
            'P' => Ok(Self::Plain),
            'M' => Ok(Self::Mountain),
            'C' => Ok(Self::Crevasse),
            other => Err(ParseSymbolError::UnknownTerrain(other)),
        }
    }
}

/// Recognised rover commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Move one cell along the current heading.
    #[serde(rename = "F")]
    Forward,
    /// Move one cell against the current heading.
    #[serde(rename = "B")]
    Backward,
    /// Rotate a quarter turn counter-clockwise in place.
    #[serde(rename = "L")]
    TurnLeft,
    /// Rotate a quarter turn clockwise in place.
    #[serde(rename = "R")]
    TurnRight,
}

impl Command {
    /// Single-letter symbol used on the command surface.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Forward => "F",
            Self::Backward => "B",
            Self::TurnLeft => "L",
            Self::TurnRight => "R",
        }
    }
}

impl FromStr for Command {
    type Err = ParseSymbolError;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        match symbol {
            "F" => Ok(Self::Forward),
            "B" => Ok(Self::Backward),
            "L" => Ok(Self::TurnLeft),
            "R" => Ok(Self::TurnRight),
            other => Err(ParseSymbolError::UnknownCommand(other.to_owned())),
        }
    }
}

/// A single symbol received in a batch, classified once at intake.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CommandToken {
    /// Symbol that maps onto a known command.
    Recognized(Command),
    /// Symbol the rover does not understand, kept verbatim.
    Unrecognized(String),
}

impl CommandToken {
    /// Classifies a raw symbol.
    #[must_use]
    pub fn parse(symbol: &str) -> Self {
        symbol
            .parse::<Command>()
            .map_or_else(|_| Self::Unrecognized(symbol.to_owned()), Self::Recognized)
    }

    /// Symbol exactly as it was received.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Recognized(command) => command.symbol(),
            Self::Unrecognized(symbol) => symbol,
        }
    }

    /// Recognised command carried by the token, if any.
    #[must_use]
    pub const fn command(&self) -> Option<Command> {
        match self {
            Self::Recognized(command) => Some(*command),
            Self::Unrecognized(_) => None,
        }
    }
}

/// Status reported for a whole command batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Every command was understood and no move was blocked.
    #[serde(rename = "OK")]
    Ok,
    /// A move would have left the world or entered obstacle terrain.
    #[serde(rename = "OBSTACLE")]
    Obstacle,
    /// The batch (or the rover start) contained input the rover does not understand.
    #[serde(rename = "INVALID_COMMAND")]
    InvalidCommand,
}

impl Status {
    /// Status code as reported on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Obstacle => "OBSTACLE",
            Self::InvalidCommand => "INVALID_COMMAND",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position and heading of the rover at a given moment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pose {
    /// Cell the rover occupies.
    pub position: Position,
    /// Direction the rover faces.
    pub heading: Heading,
}

impl Pose {
    /// Creates a new pose.
    #[must_use]
    pub const fn new(position: Position, heading: Heading) -> Self {
        Self { position, heading }
    }
}

/// Result returned from executing one command batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutcome {
    /// Final status of the batch.
    pub status: Status,
    /// Cell the rover occupies after the batch.
    #[serde(rename = "loc")]
    pub position: Position,
    /// Direction the rover faces after the batch.
    #[serde(rename = "dir")]
    pub heading: Heading,
}

impl CommandOutcome {
    /// Creates an outcome from a status and the rover's final pose.
    #[must_use]
    pub const fn new(status: Status, pose: Pose) -> Self {
        Self {
            status,
            position: pose.position,
            heading: pose.heading,
        }
    }
}

/// Reasons a move may be refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    /// The destination lies outside the world.
    Edge,
    /// The destination is covered by obstacle terrain.
    Terrain(Terrain),
}

/// Events reported by the controller while it works through a batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// The rover rotated in place.
    Turned {
        /// Heading before the turn.
        from: Heading,
        /// Heading after the turn.
        to: Heading,
    },
    /// The rover moved between two cells.
    Moved {
        /// Cell occupied before the move.
        from: Position,
        /// Cell occupied after the move.
        to: Position,
    },
    /// A move was refused and the rover stayed where it was.
    Blocked {
        /// Cell the rover occupies.
        from: Position,
        /// Direction of the refused move.
        toward: Heading,
        /// Why the move was refused.
        reason: BlockReason,
    },
    /// A symbol in the batch was not understood.
    Rejected {
        /// Symbol exactly as received.
        symbol: String,
    },
}

/// Errors raised while parsing surface symbols.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseSymbolError {
    /// The symbol is not one of `L`, `R`, `F`, `B`.
    #[error("unknown command symbol '{0}'")]
    UnknownCommand(String),
    /// The symbol is not one of `N`, `E`, `S`, `W`.
    #[error("unknown heading symbol '{0}'")]
    UnknownHeading(String),
    /// The symbol is not one of `P`, `M`, `C`.
    #[error("unknown terrain symbol '{0}'")]
    UnknownTerrain(char),
}
