#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Immutable terrain grid the rover drives across.

use mars_rover_core::{ParseSymbolError, Position, Terrain};
use thiserror::Error;

const P: Terrain = Terrain::Plain;
const M: Terrain = Terrain::Mountain;
const C: Terrain = Terrain::Crevasse;

/// Default Martian survey area, north row first.
const MARS_LAYOUT: [[Terrain; 5]; 5] = [
    [P, P, P, C, P],
    [P, M, P, C, P],
    [P, M, P, C, P],
    [P, M, P, P, P],
    [P, M, P, P, P],
];

/// Rectangular terrain grid indexed by row (y) then column (x).
///
/// The grid never changes once built; every rover holding a copy observes the
/// same map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct World {
    columns: u32,
    rows: u32,
    cells: Vec<Terrain>,
}

impl World {
    /// Builds the fixed 5x5 survey map.
    ///
    /// ```text
    /// P P P C P
    /// P M P C P
    /// P M P C P
    /// P M P P P
    /// P M P P P
    /// ```
    #[must_use]
    pub fn mars() -> Self {
        let cells = MARS_LAYOUT.iter().flatten().copied().collect();
        Self {
            columns: 5,
            rows: 5,
            cells,
        }
    }

    /// Parses a grid from rows of terrain symbols (`P`, `M`, `C`).
    ///
    /// Every row must have the same non-zero length. Surrounding whitespace on
    /// a row is ignored.
    pub fn from_rows<I, S>(rows: I) -> Result<Self, WorldError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cells = Vec::new();
        let mut columns: Option<usize> = None;
        let mut row_count: usize = 0;

        for (row_index, row) in rows.into_iter().enumerate() {
            let row = row.as_ref().trim();
            let width = row.chars().count();
            match columns {
                None if width == 0 => return Err(WorldError::Empty),
                None => columns = Some(width),
                Some(expected) if expected != width => {
                    return Err(WorldError::RaggedRow {
                        row: row_index,
                        expected,
                        found: width,
                    });
                }
                Some(_) => {}
            }

            for (column_index, symbol) in row.chars().enumerate() {
                let terrain = Terrain::from_symbol(symbol).map_err(|source| {
                    WorldError::UnknownTerrain {
                        column: column_index,
                        row: row_index,
                        source,
                    }
                })?;
                cells.push(terrain);
            }
            row_count += 1;
        }

        let columns = columns.ok_or(WorldError::Empty)?;
        Ok(Self {
            columns: u32::try_from(columns).map_err(|_| WorldError::TooLarge)?,
            rows: u32::try_from(row_count).map_err(|_| WorldError::TooLarge)?,
            cells,
        })
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.rows
    }

    /// Reports whether the position lies inside the grid.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.x() < self.columns && position.y() < self.rows
    }

    /// Terrain at the position, or `None` outside the grid.
    #[must_use]
    pub fn terrain_at(&self, position: Position) -> Option<Terrain> {
        self.index(position)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Iterator over the grid rows from north to south.
    pub fn rows(&self) -> impl Iterator<Item = &[Terrain]> {
        let width = usize::try_from(self.columns).unwrap_or(0).max(1);
        self.cells.chunks(width)
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        let row = usize::try_from(position.y()).ok()?;
        let column = usize::try_from(position.x()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::mars()
    }
}

/// Errors raised while building or querying a world.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WorldError {
    /// The grid has no rows or its first row has no cells.
    #[error("world grid is empty")]
    Empty,
    /// A row's length differs from the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A cell carries a symbol that is not a terrain.
    #[error("cell ({column}, {row}) is invalid: {source}")]
    UnknownTerrain {
        /// Zero-based column of the cell.
        column: usize,
        /// Zero-based row of the cell.
        row: usize,
        /// Underlying symbol error.
        source: ParseSymbolError,
    },
    /// The grid dimensions do not fit the coordinate range.
    #[error("world grid exceeds the coordinate range")]
    TooLarge,
    /// A lookup addressed a cell outside the grid.
    #[error("position {position} lies outside the {width}x{height} world")]
    OutOfBounds {
        /// Requested position.
        position: Position,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
}

/// Query functions that provide read-only access to the world.
pub mod query {
    use super::{World, WorldError};
    use mars_rover_core::{Position, Terrain};

    /// Terrain covering the position.
    ///
    /// Callers are expected to bounds-check first; positions outside the grid
    /// yield [`WorldError::OutOfBounds`].
    pub fn terrain(world: &World, position: Position) -> Result<Terrain, WorldError> {
        world
            .terrain_at(position)
            .ok_or(WorldError::OutOfBounds {
                position,
                width: world.width(),
                height: world.height(),
            })
    }
}
