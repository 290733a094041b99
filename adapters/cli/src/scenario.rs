//! TOML scenario files describing the world and the rover start.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use mars_rover_world::World;
use serde::Deserialize;

/// Scenario loaded from disk.
///
/// ```toml
/// [world]
/// rows = ["PPPCP", "PMPCP", "PMPCP", "PMPPP", "PMPPP"]
///
/// [rover]
/// x = 2
/// y = 2
/// heading = "N"
/// commands = ["F", "F", "R", "F"]
/// ```
///
/// Every table and key is optional; missing values fall back to the default
/// survey map and the command-line flags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Scenario {
    /// Terrain grid override.
    pub(crate) world: Option<WorldSection>,
    /// Rover start and default batch.
    #[serde(default)]
    pub(crate) rover: RoverSection,
}

/// `[world]` table.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct WorldSection {
    /// Terrain symbols, one string per row from north to south.
    pub(crate) rows: Vec<String>,
}

/// `[rover]` table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RoverSection {
    /// Starting column.
    pub(crate) x: Option<i64>,
    /// Starting row.
    pub(crate) y: Option<i64>,
    /// Starting heading symbol.
    pub(crate) heading: Option<String>,
    /// Batch executed when no commands are passed on the command line.
    #[serde(default)]
    pub(crate) commands: Vec<String>,
}

impl Scenario {
    /// Reads and parses a scenario file.
    pub(crate) fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to load scenario file {}", path.display()))
    }

    /// Parses scenario TOML contents.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse scenario toml contents")
    }

    /// Builds the world described by the scenario.
    pub(crate) fn world(&self) -> Result<World> {
        match &self.world {
            Some(section) => World::from_rows(&section.rows).context("scenario world is invalid"),
            None => Ok(World::mars()),
        }
    }
}
