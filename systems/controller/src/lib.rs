#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Rover controller that interprets command batches against a terrain world.
//!
//! Each batch is processed strictly in input order. Every symbol is logged,
//! unrecognised symbols are reported but never stop the batch, and each move is
//! evaluated by the pure [`attempt`] function before the controller commits the
//! resulting pose. A refused move is simply never committed, so the rover stays
//! on the last cell it reached legally.

use mars_rover_core::{
    BlockReason, Command, CommandOutcome, CommandToken, Event, Heading, ParseSymbolError, Pose,
    Position, Status, Terrain,
};
use mars_rover_world::{query, World};
use thiserror::Error;
use tracing::{debug, info};

/// Effect of a single recognised command evaluated against the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attempt {
    /// The rover rotates in place to the provided heading.
    Turned(Heading),
    /// The rover moves onto the provided cell.
    Moved(Position),
    /// The move is refused; the pose must remain unchanged.
    Blocked {
        /// Direction of the refused move.
        toward: Heading,
        /// Why the move was refused.
        reason: BlockReason,
    },
}

impl Attempt {
    /// Pose the rover ends up in once the attempt is committed.
    #[must_use]
    pub const fn resulting_pose(self, pose: Pose) -> Pose {
        match self {
            Self::Turned(heading) => Pose::new(pose.position, heading),
            Self::Moved(position) => Pose::new(position, pose.heading),
            Self::Blocked { .. } => pose,
        }
    }
}

/// Evaluates a single command from `pose` without mutating anything.
///
/// Moves are checked against the world bounds first and the destination
/// terrain second.
#[must_use]
pub fn attempt(world: &World, pose: Pose, command: Command) -> Attempt {
    let toward = match command {
        Command::TurnLeft => return Attempt::Turned(pose.heading.turned_left()),
        Command::TurnRight => return Attempt::Turned(pose.heading.turned_right()),
        Command::Forward => pose.heading,
        Command::Backward => pose.heading.reversed(),
    };

    let Some(destination) = pose
        .position
        .neighbor(toward)
        .filter(|cell| world.contains(*cell))
    else {
        return Attempt::Blocked {
            toward,
            reason: BlockReason::Edge,
        };
    };

    match query::terrain(world, destination) {
        Ok(terrain) if terrain.is_obstacle() => Attempt::Blocked {
            toward,
            reason: BlockReason::Terrain(terrain),
        },
        Ok(_) => Attempt::Moved(destination),
        Err(_) => Attempt::Blocked {
            toward,
            reason: BlockReason::Edge,
        },
    }
}

/// Single rover driving across an immutable world.
#[derive(Clone, Debug)]
pub struct Rover {
    world: World,
    pose: Pose,
    log: Vec<CommandToken>,
}

impl Rover {
    /// Places a rover on the world at the provided pose.
    ///
    /// The start cell must lie inside the world and must not be an obstacle.
    pub fn new(world: World, position: Position, heading: Heading) -> Result<Self, InitError> {
        let Some(terrain) = world.terrain_at(position) else {
            return Err(InitError::OutOfBounds {
                position,
                width: world.width(),
                height: world.height(),
            });
        };
        if terrain.is_obstacle() {
            return Err(InitError::Obstructed { position, terrain });
        }

        Ok(Self {
            world,
            pose: Pose::new(position, heading),
            log: Vec::new(),
        })
    }

    /// Places a rover from untyped surface values.
    ///
    /// Negative coordinates are a malformed position and anything other than
    /// `N`, `E`, `S` or `W` is an invalid heading.
    pub fn from_symbols(
        world: World,
        location: (i64, i64),
        heading: &str,
    ) -> Result<Self, InitError> {
        let (x, y) = location;
        let position = match (u32::try_from(x), u32::try_from(y)) {
            (Ok(x), Ok(y)) => Position::new(x, y),
            _ => return Err(InitError::MalformedPosition { x, y }),
        };
        let heading = heading.parse::<Heading>().map_err(InitError::InvalidHeading)?;
        Self::new(world, position, heading)
    }

    /// Executes a batch of command symbols and reports the outcome.
    pub fn command<I, S>(&mut self, symbols: I) -> CommandOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut events = Vec::new();
        self.execute(symbols, &mut events)
    }

    /// Executes a batch of command symbols, appending one event per symbol.
    ///
    /// The reported status starts as `INVALID_COMMAND` when any symbol in the
    /// batch is unrecognised and `OK` otherwise. Every refused move then
    /// overwrites it with `OBSTACLE`, so the last write before returning wins.
    /// Commands after a refused move or an unrecognised symbol still run.
    pub fn execute<I, S>(&mut self, symbols: I, out_events: &mut Vec<Event>) -> CommandOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<CommandToken> = symbols
            .into_iter()
            .map(|symbol| CommandToken::parse(symbol.as_ref()))
            .collect();
        self.log.extend(tokens.iter().cloned());

        let mut status = if tokens.iter().all(|token| token.command().is_some()) {
            Status::Ok
        } else {
            Status::InvalidCommand
        };

        for token in &tokens {
            let event = match token.command() {
                Some(command) => {
                    let before = self.pose;
                    let step = attempt(&self.world, before, command);
                    self.pose = step.resulting_pose(before);
                    match step {
                        Attempt::Turned(to) => Event::Turned {
                            from: before.heading,
                            to,
                        },
                        Attempt::Moved(to) => Event::Moved {
                            from: before.position,
                            to,
                        },
                        Attempt::Blocked { toward, reason } => {
                            status = Status::Obstacle;
                            Event::Blocked {
                                from: before.position,
                                toward,
                                reason,
                            }
                        }
                    }
                }
                None => Event::Rejected {
                    symbol: token.as_str().to_owned(),
                },
            };
            debug!(?event, "rover command evaluated");
            out_events.push(event);
        }

        let outcome = CommandOutcome::new(status, self.pose);
        info!(
            status = %outcome.status,
            position = %outcome.position,
            heading = %outcome.heading,
            commands = tokens.len(),
            "rover batch finished"
        );
        outcome
    }

    /// Cell the rover currently occupies.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.pose.position
    }

    /// Direction the rover currently faces.
    #[must_use]
    pub const fn heading(&self) -> Heading {
        self.pose.heading
    }

    /// Current position and heading.
    #[must_use]
    pub const fn pose(&self) -> Pose {
        self.pose
    }

    /// Every symbol received so far, recognised or not, in arrival order.
    #[must_use]
    pub fn commands(&self) -> &[CommandToken] {
        &self.log
    }

    /// World the rover drives on.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }
}

/// Reasons a rover cannot be placed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InitError {
    /// A coordinate was negative or exceeded the coordinate range.
    #[error("start location ({x}, {y}) is not a grid position")]
    MalformedPosition {
        /// Requested column.
        x: i64,
        /// Requested row.
        y: i64,
    },
    /// The heading symbol was not recognised.
    #[error("invalid start heading: {0}")]
    InvalidHeading(#[source] ParseSymbolError),
    /// The start cell lies outside the world.
    #[error("start position {position} lies outside the {width}x{height} world")]
    OutOfBounds {
        /// Requested start cell.
        position: Position,
        /// World width.
        width: u32,
        /// World height.
        height: u32,
    },
    /// The start cell is covered by obstacle terrain.
    #[error("start position {position} is covered by {}", .terrain.description())]
    Obstructed {
        /// Requested start cell.
        position: Position,
        /// Terrain covering the cell.
        terrain: Terrain,
    },
}
