//! Map cells, display glyphs and the dense 2D buffer that holds them

use strum::{Display, EnumIter};

use crate::error::{DungeonError, Result};

/// Terrain type of a map cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter)]
pub enum Cell {
    #[default]
    Wall,
    Floor,
    Start,
    Finish,
}

impl Cell {
    /// Check if the player can stand here
    pub const fn is_passable(&self) -> bool {
        !matches!(self, Cell::Wall)
    }

    /// Check if this cell blocks line of sight
    pub const fn blocks_sight(&self) -> bool {
        matches!(self, Cell::Wall)
    }
}

/// What a display shows for one window cell
///
/// Terrain glyphs mirror [`Cell`]; `Explored` marks remembered non-wall
/// terrain that is out of sight and `Player` marks the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter)]
pub enum Glyph {
    #[default]
    Wall,
    Floor,
    Start,
    Finish,
    Explored,
    Player,
}

impl Glyph {
    /// Default display character
    pub const fn symbol(&self) -> char {
        match self {
            Glyph::Wall => '█',
            Glyph::Floor => ' ',
            Glyph::Start => 'S',
            Glyph::Finish => 'F',
            Glyph::Explored => '·',
            Glyph::Player => '@',
        }
    }
}

impl From<Cell> for Glyph {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Wall => Glyph::Wall,
            Cell::Floor => Glyph::Floor,
            Cell::Start => Glyph::Start,
            Cell::Finish => Glyph::Finish,
        }
    }
}

/// A grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Shift by a signed delta, `None` if either coordinate goes negative
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Pos> {
        Some(Pos {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

impl From<(usize, usize)> for Pos {
    fn from((row, col): (usize, usize)) -> Self {
        Pos { row, col }
    }
}

/// Dense row-major 2D buffer
///
/// Used for the terrain map (`Grid<Cell>`), rendered windows (`Grid<Glyph>`)
/// and the visited mask (`Grid<bool>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// Create a grid with every cell set to `value`
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            cells: vec![value; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Check if a position lies inside the grid
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Checked read; out-of-range positions read as `None`
    pub fn get(&self, pos: Pos) -> Option<T> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Bounds-enforcing read
    pub fn at(&self, pos: Pos) -> Result<T> {
        self.get(pos).ok_or_else(|| self.out_of_bounds(pos))
    }

    /// Bounds-enforcing write
    pub fn set(&mut self, pos: Pos, value: T) -> Result<()> {
        let i = self.index(pos).ok_or_else(|| self.out_of_bounds(pos))?;
        self.cells[i] = value;
        Ok(())
    }

    /// Write if in range, report whether the write happened
    pub fn set_if_inside(&mut self, pos: Pos, value: T) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    /// Iterate over rows as slices
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks(0) panics, and an empty grid has nothing to yield anyway
        self.cells.chunks(self.cols.max(1)).take(self.rows)
    }

    /// Iterate over every cell with its position
    pub fn iter(&self) -> impl Iterator<Item = (Pos, T)> + '_ {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &v)| (Pos::new(i / cols, i % cols), v))
    }

    /// Render as text lines, one character per cell
    pub fn to_lines(&self, symbol: impl Fn(T) -> char) -> Vec<String> {
        self.iter_rows()
            .map(|row| row.iter().map(|&v| symbol(v)).collect())
            .collect()
    }

    /// Transform every cell
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Grid<U> {
        Grid {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().map(|&v| f(v)).collect(),
        }
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        self.contains(pos).then(|| pos.row * self.cols + pos.col)
    }

    fn out_of_bounds(&self, pos: Pos) -> DungeonError {
        DungeonError::OutOfBounds {
            row: pos.row,
            col: pos.col,
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl<T: Copy + PartialEq> Grid<T> {
    /// Number of cells equal to `value`
    pub fn count(&self, value: T) -> usize {
        self.cells.iter().filter(|&&v| v == value).count()
    }

    /// First position (row-major) holding `value`
    pub fn find(&self, value: T) -> Option<Pos> {
        self.iter().find(|&(_, v)| v == value).map(|(p, _)| p)
    }
}

impl Grid<Cell> {
    /// Create an all-wall map
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, Cell::Wall)
    }
}
