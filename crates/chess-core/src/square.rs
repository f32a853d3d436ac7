//! Board square representation.

use std::fmt;

/// A square on the 8x8 board, addressed by `(row, col)`.
///
/// Row 0 is Black's back rank (rank 8) and row 7 is White's back rank
/// (rank 1). Column 0 is the a-file and column 7 the h-file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Number of rows and columns on the board.
    pub const SIZE: u8 = 8;

    /// Creates a square, or `None` if either coordinate is outside `0..8`.
    #[inline]
    pub const fn new(row: i8, col: i8) -> Option<Self> {
        if row >= 0 && row < Self::SIZE as i8 && col >= 0 && col < Self::SIZE as i8 {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Creates a square from coordinates known to be in range.
    ///
    /// # Panics
    /// Panics if either coordinate is 8 or more.
    #[inline]
    pub const fn at(row: u8, col: u8) -> Self {
        assert!(row < Self::SIZE && col < Self::SIZE, "square out of range");
        Square { row, col }
    }

    /// Returns the row (0-7).
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column (0-7).
    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the dense index `row * 8 + col` (0-63).
    #[inline]
    pub const fn index(self) -> usize {
        (self.row * 8 + self.col) as usize
    }

    /// Returns the square displaced by `(d_row, d_col)`, if still on the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        Square::new(self.row as i8 + d_row, self.col as i8 + d_col)
    }

    /// Iterates over all 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(|i| Square {
            row: i / 8,
            col: i % 8,
        })
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if file < b'a' || file > b'h' || rank < b'1' || rank > b'8' {
            return None;
        }
        Some(Square {
            row: b'8' - rank,
            col: file - b'a',
        })
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.col) as char, (b'8' - self.row) as char)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({}, {})", self.row, self.col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
