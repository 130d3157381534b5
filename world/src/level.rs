//! Level loading from comma-separated tile grids.

use bastion_core::{CellCoord, GridDimensions, TileCode};
use thiserror::Error;

use crate::tiles::TileGrid;

/// Errors that prevent a level from starting.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LevelError {
    /// No level source was supplied.
    #[error("no level data was provided")]
    NoLevels,
    /// The declared dimensions contain no cells.
    #[error("declared grid dimensions {width}x{height} contain no cells")]
    EmptyDimensions {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
    },
    /// A level file holds a different number of rows than declared.
    #[error("level {level} declares {expected} rows but contains {found}")]
    RowCountMismatch {
        /// Index of the offending level.
        level: u32,
        /// Declared row count.
        expected: u32,
        /// Rows found in the data.
        found: usize,
    },
    /// A row holds a different number of columns than declared.
    #[error("level {level} row {row} declares {expected} columns but contains {found}")]
    ColumnCountMismatch {
        /// Index of the offending level.
        level: u32,
        /// Zero-based row within the file.
        row: usize,
        /// Declared column count.
        expected: u32,
        /// Columns found in the row.
        found: usize,
    },
    /// A field could not be parsed as a tile code.
    #[error("level {level} row {row} column {column}: '{value}' is not a tile code")]
    InvalidTile {
        /// Index of the offending level.
        level: u32,
        /// Zero-based row within the file.
        row: usize,
        /// Zero-based column within the row.
        column: usize,
        /// Raw field contents.
        value: String,
    },
    /// The level holds no player spawn marker.
    #[error("level {level} has no player spawn marker")]
    MissingSpawn {
        /// Index of the offending level.
        level: u32,
    },
}

/// Loaded level set: the tile grid plus the markers located at load time.
#[derive(Clone, Debug)]
pub struct Level {
    grid: TileGrid,
    spawns: Vec<CellCoord>,
    exits: Vec<Option<CellCoord>>,
}

impl Level {
    /// Parses one CSV source per level and locates the spawn and exit markers.
    ///
    /// Spawn markers are erased to empty ground once located. A level without
    /// a spawn marker cannot start; a missing exit is allowed.
    pub fn from_csv_sources<S>(dimensions: GridDimensions, sources: &[S]) -> Result<Self, LevelError>
    where
        S: AsRef<str>,
    {
        if sources.is_empty() {
            return Err(LevelError::NoLevels);
        }
        if dimensions.cell_count() == 0 {
            return Err(LevelError::EmptyDimensions {
                width: dimensions.width(),
                height: dimensions.height(),
            });
        }

        let level_count = u32::try_from(sources.len()).unwrap_or(u32::MAX);
        let mut grid = TileGrid::new(dimensions, level_count);
        let mut spawns = Vec::with_capacity(sources.len());
        let mut exits = Vec::with_capacity(sources.len());

        for (level, source) in (0..level_count).zip(sources) {
            let codes = parse_level_csv(level, dimensions, source.as_ref())?;
            let written = grid.write_level(level, &codes);
            debug_assert!(written, "parsed level matches grid dimensions");

            let _ = grid.select_level(level);
            let spawn = grid
                .find_first_value(TileCode::PLAYER_SPAWN)
                .ok_or(LevelError::MissingSpawn { level })?;
            let _ = grid.set_value(spawn, TileCode::EMPTY);
            spawns.push(spawn);
            exits.push(grid.find_first_value(TileCode::EXIT));

            log::debug!(
                "loaded level {level}: spawn at ({}, {}), exit {:?}",
                spawn.column(),
                spawn.row(),
                exits.last().copied().flatten()
            );
        }

        let _ = grid.select_level(0);
        Ok(Self {
            grid,
            spawns,
            exits,
        })
    }

    /// Tile grid holding every loaded level.
    #[must_use]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Player spawn located in the provided level.
    #[must_use]
    pub fn spawn(&self, level: u32) -> Option<CellCoord> {
        self.spawns.get(usize::try_from(level).ok()?).copied()
    }

    /// Exit marker located in the provided level, if the level has one.
    #[must_use]
    pub fn exit(&self, level: u32) -> Option<CellCoord> {
        self.exits
            .get(usize::try_from(level).ok()?)
            .copied()
            .flatten()
    }

    pub(crate) fn into_parts(self) -> (TileGrid, Vec<CellCoord>, Vec<Option<CellCoord>>) {
        (self.grid, self.spawns, self.exits)
    }
}

/// Parses a single level file into row-major tile codes.
///
/// Rows appear top first. Blank lines are skipped and whitespace around each
/// field is ignored.
pub fn parse_level_csv(
    level: u32,
    dimensions: GridDimensions,
    source: &str,
) -> Result<Vec<TileCode>, LevelError> {
    let expected_columns = usize::try_from(dimensions.width()).unwrap_or(usize::MAX);
    let mut codes = Vec::with_capacity(dimensions.cell_count());
    let mut rows = 0_usize;

    for line in source.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != expected_columns {
            return Err(LevelError::ColumnCountMismatch {
                level,
                row: rows,
                expected: dimensions.width(),
                found: fields.len(),
            });
        }

        for (column, field) in fields.into_iter().enumerate() {
            let value = field.parse::<i32>().map_err(|_| LevelError::InvalidTile {
                level,
                row: rows,
                column,
                value: field.to_owned(),
            })?;
            codes.push(TileCode::new(value));
        }
        rows += 1;
    }

    if rows != usize::try_from(dimensions.height()).unwrap_or(usize::MAX) {
        return Err(LevelError::RowCountMismatch {
            level,
            expected: dimensions.height(),
            found: rows,
        });
    }

    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_LEVEL: &str = "\
101,101,101,101
101,200,0,101
101,0,99,101
";

    #[test]
    fn parse_reads_rows_top_first() {
        let codes = parse_level_csv(0, GridDimensions::new(4, 3), SMALL_LEVEL).expect("parses");
        assert_eq!(codes.len(), 12);
        assert_eq!(codes[5], TileCode::PLAYER_SPAWN);
        assert_eq!(codes[10], TileCode::EXIT);
    }

    #[test]
    fn parse_tolerates_whitespace_and_blank_lines() {
        let source = "\n 1 , 2 \n\n3,4\n";
        let codes = parse_level_csv(0, GridDimensions::new(2, 2), source).expect("parses");
        assert_eq!(
            codes,
            vec![
                TileCode::new(1),
                TileCode::new(2),
                TileCode::new(3),
                TileCode::new(4)
            ]
        );
    }

    #[test]
    fn parse_rejects_row_count_mismatch() {
        let error = parse_level_csv(2, GridDimensions::new(4, 4), SMALL_LEVEL).unwrap_err();
        assert_eq!(
            error,
            LevelError::RowCountMismatch {
                level: 2,
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn parse_rejects_column_count_mismatch() {
        let error = parse_level_csv(0, GridDimensions::new(5, 3), SMALL_LEVEL).unwrap_err();
        assert!(matches!(
            error,
            LevelError::ColumnCountMismatch {
                row: 0,
                expected: 5,
                found: 4,
                ..
            }
        ));
    }

    #[test]
    fn parse_rejects_garbage_fields() {
        let error = parse_level_csv(0, GridDimensions::new(2, 1), "7,wall").unwrap_err();
        assert_eq!(
            error,
            LevelError::InvalidTile {
                level: 0,
                row: 0,
                column: 1,
                value: "wall".to_owned()
            }
        );
        assert!(error.to_string().contains("'wall'"));
    }

    #[test]
    fn loading_erases_spawn_marker_and_records_exit() {
        let level = Level::from_csv_sources(GridDimensions::new(4, 3), &[SMALL_LEVEL])
            .expect("level loads");

        assert_eq!(level.spawn(0), Some(CellCoord::new(1, 1)));
        assert_eq!(level.exit(0), Some(CellCoord::new(2, 2)));
        assert_eq!(
            level.grid().value(CellCoord::new(1, 1)),
            Some(TileCode::EMPTY)
        );
        assert_eq!(level.grid().find_first_value(TileCode::PLAYER_SPAWN), None);
    }

    #[test]
    fn loading_fails_without_spawn() {
        let source = "0,0\n0,99\n";
        let error = Level::from_csv_sources(GridDimensions::new(2, 2), &[source]).unwrap_err();
        assert_eq!(error, LevelError::MissingSpawn { level: 0 });
    }

    #[test]
    fn loading_requires_at_least_one_level() {
        let sources: [&str; 0] = [];
        let error = Level::from_csv_sources(GridDimensions::new(2, 2), &sources).unwrap_err();
        assert_eq!(error, LevelError::NoLevels);
    }

    #[test]
    fn every_level_gets_its_own_spawn() {
        let first = "200,0\n0,99\n";
        let second = "0,0\n99,200\n";
        let level = Level::from_csv_sources(GridDimensions::new(2, 2), &[first, second])
            .expect("levels load");

        assert_eq!(level.grid().level_count(), 2);
        assert_eq!(level.grid().active_level(), 0);
        assert_eq!(level.spawn(0), Some(CellCoord::new(0, 0)));
        assert_eq!(level.spawn(1), Some(CellCoord::new(1, 1)));
        assert_eq!(level.exit(1), Some(CellCoord::new(0, 1)));
        assert_eq!(level.exit(2), None);
    }
}
