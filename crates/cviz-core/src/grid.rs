#![forbid(unsafe_code)]

//! Grid geometry: cells and the static character matrix.

/// A grid position, 0-indexed, origin at top-left.
///
/// `(-1, -1)` is the "not applicable" sentinel ([`Cell::NONE`]), used for
/// characters that pass through a cipher untouched (spaces, punctuation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Row index, or -1 when not applicable.
    pub row: i32,
    /// Column index, or -1 when not applicable.
    pub col: i32,
}

impl Cell {
    /// The "not applicable" sentinel.
    pub const NONE: Cell = Cell { row: -1, col: -1 };

    /// Create a new cell.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Whether this is the "not applicable" sentinel.
    #[inline]
    pub const fn is_none(&self) -> bool {
        self.row < 0 || self.col < 0
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::NONE
    }
}

impl From<[i32; 2]> for Cell {
    fn from(pair: [i32; 2]) -> Self {
        Cell::new(pair[0], pair[1])
    }
}

/// The static character matrix of a grid cipher (e.g. a 5x5 Playfair square).
///
/// Built once from the trace's auxiliary `matrix` field and then only read.
/// Lookups are case-insensitive over the first char of each cell string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharGrid {
    rows: Vec<Vec<char>>,
}

impl CharGrid {
    /// Build a grid from the trace's matrix rows.
    ///
    /// Empty cell strings become NUL placeholders so row/col indices stay
    /// aligned with the source matrix.
    #[must_use]
    pub fn from_rows(rows: &[Vec<String>]) -> Self {
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|s| s.chars().next().unwrap_or('\0').to_ascii_uppercase())
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the widest row.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Whether the grid has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }

    /// The character at a cell, if in bounds.
    #[must_use]
    pub fn at(&self, cell: Cell) -> Option<char> {
        if cell.is_none() {
            return None;
        }
        self.rows
            .get(cell.row as usize)
            .and_then(|row| row.get(cell.col as usize))
            .copied()
    }

    /// Find the cell holding `ch` (case-insensitive). First match wins.
    #[must_use]
    pub fn position_of(&self, ch: char) -> Option<Cell> {
        let needle = ch.to_ascii_uppercase();
        for (r, row) in self.rows.iter().enumerate() {
            for (c, &cell) in row.iter().enumerate() {
                if cell == needle {
                    return Some(Cell::new(r as i32, c as i32));
                }
            }
        }
        None
    }

    /// Iterate rows as char slices.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.rows.iter().map(Vec::as_slice)
    }
}
