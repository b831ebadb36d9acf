use crate::config::TILE_SIZE;
use anyhow::Context;
use glam::DVec2;

/// the built-in level, one character per cell
pub const DEFAULT_MAP: &str = "\
111111111111111
100000000000001
101111000011101
101000000000101
101000101000101
100000000000001
101000101000101
101000000000101
101111000111101
100000000000001
111111111111111";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
}

impl Cell {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '1' | '#' => Some(Self::Wall),
            '0' | '.' | ' ' => Some(Self::Empty),
            _ => None,
        }
    }
}

/// Rectangular grid of cells laid over a world of `cols * cell_size` by
/// `rows * cell_size` units. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct TileMap {
    cell_size: f64,
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl TileMap {
    /// the built-in level at the default tile size
    pub fn builtin() -> anyhow::Result<Self> {
        Self::parse(TILE_SIZE, DEFAULT_MAP)
    }

    pub fn new(cell_size: f64, grid: Vec<Vec<Cell>>) -> anyhow::Result<Self> {
        if !(cell_size.is_finite() && cell_size > 0.) {
            anyhow::bail!("cell size must be a positive number, got {cell_size}");
        }

        let rows = grid.len();
        let cols = grid.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            anyhow::bail!("map has no cells");
        }

        if let Some(row) = grid.iter().position(|row| row.len() != cols) {
            anyhow::bail!(
                "map is not rectangular: row {row} has {} cells, expected {cols}",
                grid[row].len()
            );
        }

        log::debug!("built {cols}x{rows} map with cell size {cell_size}");

        Ok(Self {
            cell_size,
            rows,
            cols,
            cells: grid.into_iter().flatten().collect(),
        })
    }

    /// Reads one row per non-empty line. `1` or `#` is a wall, `0`, `.` or a
    /// space is empty.
    pub fn parse(cell_size: f64, text: &str) -> anyhow::Result<Self> {
        let mut grid = vec![];
        for (row, line) in text.lines().enumerate() {
            if line.is_empty() {
                continue;
            }

            let cells = line
                .chars()
                .enumerate()
                .map(|(col, c)| {
                    Cell::from_char(c).with_context(|| {
                        format!("invalid tile {c:?} in map at line {}, column {}", row + 1, col + 1)
                    })
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            grid.push(cells);
        }

        Self::new(cell_size, grid)
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn width(&self) -> f64 {
        self.cols as f64 * self.cell_size
    }

    pub fn height(&self) -> f64 {
        self.rows as f64 * self.cell_size
    }

    /// whether a point lies inside the closed box `[0, width] x [0, height]`
    pub fn contains(&self, pos: DVec2) -> bool {
        pos.x >= 0. && pos.x <= self.width() && pos.y >= 0. && pos.y <= self.height()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.cells[row * self.cols + col])
    }

    /// World is closed: anything outside the map, or on its far edges where
    /// the cell index runs past the grid, counts as wall.
    pub fn has_wall_at(&self, pos: DVec2) -> bool {
        if !self.contains(pos) {
            return true;
        }

        let col = (pos.x / self.cell_size).floor() as usize;
        let row = (pos.y / self.cell_size).floor() as usize;
        self.cell(row, col) != Some(Cell::Empty)
    }

    /// world position of the top-left corner of the cell at `idx`
    pub fn idx_to_vec(&self, idx: usize) -> DVec2 {
        let x = idx % self.cols;
        let y = idx / self.cols;
        DVec2::new(x as f64 * self.cell_size, y as f64 * self.cell_size)
    }

    /// every cell with the world position of its top-left corner, row by row
    pub fn cells(&self) -> impl Iterator<Item = (DVec2, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| (self.idx_to_vec(idx), *cell))
    }
}
