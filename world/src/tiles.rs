//! Flat multi-level tile storage.

use bastion_core::{CellCoord, GridDimensions, TileCode, TileKind};

/// Selects which vertical origin a cell coordinate is expressed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RowOrder {
    /// Rows counted from the top, matching the order of level files.
    #[default]
    AsStored,
    /// Rows counted from the bottom; mirrored with `height - row - 1`.
    Inverted,
}

/// Mutable tile codes for every level of a session.
///
/// All levels share the same dimensions and live in one buffer of
/// `levels * width * height` codes. Queries address the active level. Blocking
/// is derived from the stored code on every call and never cached, so
/// [`TileGrid::set_value`] changes pathability immediately.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    dimensions: GridDimensions,
    level_count: u32,
    active_level: u32,
    tiles: Vec<TileCode>,
}

impl TileGrid {
    /// Creates a grid holding `level_count` levels of empty ground.
    #[must_use]
    pub fn new(dimensions: GridDimensions, level_count: u32) -> Self {
        let level_count = level_count.max(1);
        let capacity = dimensions
            .cell_count()
            .saturating_mul(usize::try_from(level_count).unwrap_or(0));
        Self {
            dimensions,
            level_count,
            active_level: 0,
            tiles: vec![TileCode::EMPTY; capacity],
        }
    }

    /// Dimensions shared by every level.
    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Number of levels stored in the grid.
    #[must_use]
    pub const fn level_count(&self) -> u32 {
        self.level_count
    }

    /// Index of the level answered by queries.
    #[must_use]
    pub const fn active_level(&self) -> u32 {
        self.active_level
    }

    /// Makes another level active. Returns `false` when the level does not exist.
    pub fn select_level(&mut self, level: u32) -> bool {
        if level >= self.level_count {
            return false;
        }

        self.active_level = level;
        true
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn is_in_bounds(&self, cell: CellCoord) -> bool {
        self.dimensions.contains(cell)
    }

    /// Tile code stored at the cell of the active level.
    #[must_use]
    pub fn value(&self, cell: CellCoord) -> Option<TileCode> {
        self.value_in(cell, RowOrder::AsStored)
    }

    /// Tile code stored at the cell, interpreting the row with the provided origin.
    #[must_use]
    pub fn value_in(&self, cell: CellCoord, order: RowOrder) -> Option<TileCode> {
        let offset = self.offset(cell, order)?;
        self.tiles.get(offset).copied()
    }

    /// Overwrites the cell of the active level, returning the previous code.
    ///
    /// Returns `None` and leaves the grid untouched when the cell lies outside
    /// the grid.
    pub fn set_value(&mut self, cell: CellCoord, value: TileCode) -> Option<TileCode> {
        self.set_value_in(cell, value, RowOrder::AsStored)
    }

    /// Overwrites the cell, interpreting the row with the provided origin.
    pub fn set_value_in(
        &mut self,
        cell: CellCoord,
        value: TileCode,
        order: RowOrder,
    ) -> Option<TileCode> {
        let offset = self.offset(cell, order)?;
        let slot = self.tiles.get_mut(offset)?;
        Some(std::mem::replace(slot, value))
    }

    /// Reports whether the cell blocks movement. Cells outside the grid block.
    #[must_use]
    pub fn is_blocked(&self, cell: CellCoord) -> bool {
        self.is_blocked_in(cell, RowOrder::AsStored)
    }

    /// Blocking check interpreting the row with the provided origin.
    #[must_use]
    pub fn is_blocked_in(&self, cell: CellCoord, order: RowOrder) -> bool {
        self.value_in(cell, order)
            .map_or(true, TileCode::is_blocking)
    }

    /// First cell of the active level holding `value`, scanning rows top to bottom.
    #[must_use]
    pub fn find_first_value(&self, value: TileCode) -> Option<CellCoord> {
        let level = self.level_slice();
        let index = level.iter().position(|code| *code == value)?;
        self.dimensions.cell_at(index)
    }

    /// First cell of the active level whose code belongs to `kind`.
    #[must_use]
    pub fn find_first_kind(&self, kind: TileKind) -> Option<CellCoord> {
        let level = self.level_slice();
        let index = level.iter().position(|code| code.kind() == kind)?;
        self.dimensions.cell_at(index)
    }

    /// Overwrites every cell of the active level whose code belongs to `kind`.
    ///
    /// Returns the number of cells that changed.
    pub fn replace_kind(&mut self, kind: TileKind, value: TileCode) -> usize {
        let start = self.level_offset(self.active_level);
        let end = start.saturating_add(self.dimensions.cell_count());
        let Some(level) = self.tiles.get_mut(start..end) else {
            return 0;
        };

        let mut replaced = 0;
        for code in level.iter_mut().filter(|code| code.kind() == kind) {
            *code = value;
            replaced += 1;
        }
        replaced
    }

    /// Codes of the active level in row-major order.
    #[must_use]
    pub fn level_slice(&self) -> &[TileCode] {
        let start = self.level_offset(self.active_level);
        let end = start.saturating_add(self.dimensions.cell_count());
        self.tiles.get(start..end).unwrap_or(&[])
    }

    /// Copies a full level worth of codes into the provided level.
    pub(crate) fn write_level(&mut self, level: u32, codes: &[TileCode]) -> bool {
        if level >= self.level_count || codes.len() != self.dimensions.cell_count() {
            return false;
        }

        let start = self.level_offset(level);
        match self.tiles.get_mut(start..start + codes.len()) {
            Some(slots) => {
                slots.copy_from_slice(codes);
                true
            }
            None => false,
        }
    }

    fn offset(&self, cell: CellCoord, order: RowOrder) -> Option<usize> {
        let cell = match order {
            RowOrder::AsStored => cell,
            RowOrder::Inverted => self.dimensions.flip_row(cell)?,
        };
        let index = self.dimensions.index(cell)?;
        self.level_offset(self.active_level).checked_add(index)
    }

    fn level_offset(&self, level: u32) -> usize {
        usize::try_from(level)
            .unwrap_or(0)
            .saturating_mul(self.dimensions.cell_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> TileGrid {
        TileGrid::new(GridDimensions::new(4, 3), 2)
    }

    #[test]
    fn new_grid_is_open_ground() {
        let grid = grid();
        assert_eq!(grid.value(CellCoord::new(3, 2)), Some(TileCode::EMPTY));
        assert!(!grid.is_blocked(CellCoord::new(0, 0)));
        assert_eq!(grid.value(CellCoord::new(4, 0)), None);
    }

    #[test]
    fn blocking_follows_set_value() {
        let mut grid = grid();
        let cell = CellCoord::new(1, 1);

        assert_eq!(grid.set_value(cell, TileCode::TURRET), Some(TileCode::EMPTY));
        assert!(!grid.is_blocked(cell));

        assert_eq!(grid.set_value(cell, TileCode::WALL), Some(TileCode::TURRET));
        assert!(grid.is_blocked(cell));

        let _ = grid.set_value(cell, TileCode::EMPTY);
        assert!(!grid.is_blocked(cell));
    }

    #[test]
    fn out_of_bounds_cells_block_and_reject_writes() {
        let mut grid = grid();
        let outside = CellCoord::new(0, 3);
        assert!(grid.is_blocked(outside));
        assert!(!grid.is_in_bounds(outside));
        assert_eq!(grid.set_value(outside, TileCode::WALL), None);
    }

    #[test]
    fn inverted_rows_mirror_stored_rows() {
        let mut grid = grid();
        let _ = grid.set_value(CellCoord::new(2, 0), TileCode::WALL);

        assert_eq!(
            grid.value_in(CellCoord::new(2, 2), RowOrder::Inverted),
            Some(TileCode::WALL)
        );
        assert!(grid.is_blocked_in(CellCoord::new(2, 2), RowOrder::Inverted));
        assert!(!grid.is_blocked_in(CellCoord::new(2, 0), RowOrder::Inverted));

        let _ = grid.set_value_in(CellCoord::new(0, 0), TileCode::EXIT, RowOrder::Inverted);
        assert_eq!(grid.value(CellCoord::new(0, 2)), Some(TileCode::EXIT));
    }

    #[test]
    fn find_first_value_scans_row_major() {
        let mut grid = grid();
        assert_eq!(grid.find_first_value(TileCode::PLAYER_SPAWN), None);

        let _ = grid.set_value(CellCoord::new(3, 1), TileCode::PLAYER_SPAWN);
        let _ = grid.set_value(CellCoord::new(0, 2), TileCode::PLAYER_SPAWN);
        assert_eq!(
            grid.find_first_value(TileCode::PLAYER_SPAWN),
            Some(CellCoord::new(3, 1))
        );
    }

    #[test]
    fn base_parts_are_found_and_cleared_per_level() {
        let mut grid = grid();
        assert_eq!(grid.find_first_kind(TileKind::BasePart), None);

        let _ = grid.set_value(CellCoord::new(2, 1), TileCode::new(137));
        let _ = grid.set_value(CellCoord::new(1, 2), TileCode::new(136));
        assert!(grid.select_level(1));
        let _ = grid.set_value(CellCoord::new(0, 0), TileCode::new(138));
        assert!(grid.select_level(0));

        assert_eq!(
            grid.find_first_kind(TileKind::BasePart),
            Some(CellCoord::new(2, 1))
        );
        assert_eq!(grid.replace_kind(TileKind::BasePart, TileCode::EMPTY), 2);
        assert_eq!(grid.find_first_kind(TileKind::BasePart), None);
        assert!(!grid.is_blocked(CellCoord::new(1, 2)));

        assert!(grid.select_level(1));
        assert_eq!(
            grid.find_first_kind(TileKind::BasePart),
            Some(CellCoord::new(0, 0))
        );
    }

    #[test]
    fn levels_are_isolated() {
        let mut grid = grid();
        let cell = CellCoord::new(1, 2);
        let _ = grid.set_value(cell, TileCode::WALL);

        assert!(grid.select_level(1));
        assert_eq!(grid.active_level(), 1);
        assert!(!grid.is_blocked(cell));
        assert!(!grid.select_level(2));
        assert_eq!(grid.active_level(), 1);

        assert!(grid.select_level(0));
        assert!(grid.is_blocked(cell));
    }
}
