//! Grid model shared by maze generators and pathfinders
//!
//! A [`Grid`] is a row-major array of [`Cell`]s. Maze generators write the
//! [`CellKind`] of each cell; pathfinders read the kind and mutate the search
//! bookkeeping (`distance`, `predecessor`, `visited`).
//!
//! # Movement
//!
//! Movement is 4-directional. [`Grid::neighbours`] yields in-bounds, non-wall
//! cells in the fixed order left, right, up, down. Entering a floor cell costs
//! [`FLOOR_COST`], entering a weight cell costs [`WEIGHT_COST`].

use crate::errors::{VisualizerError, VisualizerResult};
use std::fmt;

/// Cost of stepping onto a floor cell
pub const FLOOR_COST: u32 = 1;

/// Cost of stepping onto a weight cell
pub const WEIGHT_COST: u32 = 10;

/// Row/column position on a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }

    /// Manhattan distance to another coordinate
    pub fn manhattan(self, other: Coord) -> u32 {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as u32
    }

    /// Offset by a signed delta, `None` if the result would be negative
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Coord> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Some(Coord { row, col })
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// What occupies a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellKind {
    Wall,
    #[default]
    Floor,
    Weight,
}

impl CellKind {
    /// Cost of entering a cell of this kind, `None` for walls
    pub fn entry_cost(self) -> Option<u32> {
        match self {
            CellKind::Wall => None,
            CellKind::Floor => Some(FLOOR_COST),
            CellKind::Weight => Some(WEIGHT_COST),
        }
    }

    pub fn is_passable(self) -> bool {
        !matches!(self, CellKind::Wall)
    }
}

/// A single grid cell with its search bookkeeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub kind: CellKind,
    /// Best known distance from the search origin; `None` means unreached (infinity)
    pub distance: Option<u32>,
    pub predecessor: Option<Coord>,
    pub visited: bool,
}

impl Cell {
    fn new(row: usize, col: usize, kind: CellKind) -> Self {
        Cell {
            row,
            col,
            kind,
            distance: None,
            predecessor: None,
            visited: false,
        }
    }

    pub fn coord(&self) -> Coord {
        Coord::new(self.row, self.col)
    }

    fn clear_search(&mut self) {
        self.distance = None;
        self.predecessor = None;
        self.visited = false;
    }
}

/// 2-D array of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an all-floor grid
    pub fn new(rows: usize, cols: usize) -> Self {
        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Cell::new(row, col, CellKind::Floor)))
            .collect();
        Grid { rows, cols, cells }
    }

    /// Parse a grid from text: `#` wall, `.` floor, `w` weight, one line per row.
    ///
    /// Leading/trailing blank lines and surrounding whitespace are ignored.
    pub fn from_ascii(text: &str) -> VisualizerResult<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let rows = lines.len();
        let cols = lines.first().map(|l| l.chars().count()).unwrap_or(0);
        let mut grid = Grid::new(rows, cols);

        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(VisualizerError::invalid_input(
                    "grid",
                    format!("row {} has {} cells, expected {}", row, line.chars().count(), cols),
                ));
            }
            for (col, ch) in line.chars().enumerate() {
                let kind = match ch {
                    '#' => CellKind::Wall,
                    '.' => CellKind::Floor,
                    'w' | 'W' => CellKind::Weight,
                    other => {
                        return Err(VisualizerError::invalid_input(
                            "grid",
                            format!("unknown cell '{}' at {}", other, Coord::new(row, col)),
                        ))
                    }
                };
                grid.set_kind(Coord::new(row, col), kind);
            }
        }

        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, at: Coord) -> bool {
        at.row < self.rows && at.col < self.cols
    }

    /// Fail with [`VisualizerError::OutOfGrid`] unless `at` is inside the grid
    pub fn check_bounds(&self, at: Coord) -> VisualizerResult<()> {
        if self.contains(at) {
            Ok(())
        } else {
            Err(VisualizerError::OutOfGrid {
                coord: at,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    fn index(&self, at: Coord) -> usize {
        at.row * self.cols + at.col
    }

    pub fn get(&self, at: Coord) -> Option<&Cell> {
        if self.contains(at) {
            Some(&self.cells[self.index(at)])
        } else {
            None
        }
    }

    /// Cell at `at`; panics when out of bounds
    pub fn cell(&self, at: Coord) -> &Cell {
        let idx = self.index(at);
        &self.cells[idx]
    }

    pub fn cell_mut(&mut self, at: Coord) -> &mut Cell {
        let idx = self.index(at);
        &mut self.cells[idx]
    }

    pub fn kind(&self, at: Coord) -> CellKind {
        self.cell(at).kind
    }

    pub fn set_kind(&mut self, at: Coord, kind: CellKind) {
        self.cell_mut(at).kind = kind;
    }

    /// Overwrite every cell with `kind`
    pub fn fill(&mut self, kind: CellKind) {
        for cell in &mut self.cells {
            cell.kind = kind;
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// All non-wall coordinates in row-major order
    pub fn passable_cells(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .filter(|c| c.kind.is_passable())
            .map(Cell::coord)
            .collect()
    }

    /// In-bounds, non-wall neighbours of `at` in the order left, right, up, down
    pub fn neighbours(&self, at: Coord) -> Vec<Coord> {
        [(0, -1), (0, 1), (-1, 0), (1, 0)]
            .into_iter()
            .filter_map(|(dr, dc)| at.offset(dr, dc))
            .filter(|&c| self.contains(c) && self.kind(c).is_passable())
            .collect()
    }

    /// Clear distance, predecessor and visited flags on every cell
    pub fn reset_search(&mut self) {
        for cell in &mut self.cells {
            cell.clear_search();
        }
    }

    /// Render as text using the same symbols [`Grid::from_ascii`] accepts
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in 0..self.rows {
            for col in 0..self.cols {
                out.push(match self.kind(Coord::new(row, col)) {
                    CellKind::Wall => '#',
                    CellKind::Floor => '.',
                    CellKind::Weight => 'w',
                });
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbours_order_and_walls() {
        let grid = Grid::from_ascii(
            "
            ...
            #..
            ...
            ",
        )
        .unwrap();

        let nbs = grid.neighbours(Coord::new(1, 1));
        // left is a wall, so right, up, down remain in that order
        assert_eq!(
            nbs,
            vec![Coord::new(1, 2), Coord::new(0, 1), Coord::new(2, 1)]
        );
    }

    #[test]
    fn test_neighbours_corner_is_bounds_checked() {
        let grid = Grid::new(3, 3);
        let nbs = grid.neighbours(Coord::new(0, 0));
        assert_eq!(nbs, vec![Coord::new(0, 1), Coord::new(1, 0)]);
    }

    #[test]
    fn test_reset_search_clears_bookkeeping() {
        let mut grid = Grid::new(2, 2);
        let at = Coord::new(1, 1);
        grid.cell_mut(at).distance = Some(3);
        grid.cell_mut(at).predecessor = Some(Coord::new(0, 1));
        grid.cell_mut(at).visited = true;

        grid.reset_search();

        let cell = grid.cell(at);
        assert_eq!(cell.distance, None);
        assert_eq!(cell.predecessor, None);
        assert!(!cell.visited);
    }

    #[test]
    fn test_ascii_round_trip_preserves_kinds() {
        let text = "#.w\n..#\n";
        let grid = Grid::from_ascii(text).unwrap();
        assert_eq!(grid.kind(Coord::new(0, 2)), CellKind::Weight);
        assert_eq!(grid.to_ascii(), text);
    }

    #[test]
    fn test_ragged_ascii_is_rejected() {
        assert!(Grid::from_ascii("...\n..").is_err());
    }
}
