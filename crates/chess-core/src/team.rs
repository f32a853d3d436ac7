//! Team (side) representation.

/// The two sides in a game.
///
/// White starts on rows 6-7 and advances toward row 0; Black starts on rows
/// 0-1 and advances toward row 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Team {
    White = 0,
    Black = 1,
}

impl Team {
    /// Both teams, White first.
    pub const ALL: [Team; 2] = [Team::White, Team::Black];

    /// Returns the opposing team.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Team::White => Team::Black,
            Team::Black => Team::White,
        }
    }

    /// Returns the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the row delta of a pawn advance (-1 for White, +1 for Black).
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Team::White => -1,
            Team::Black => 1,
        }
    }

    /// Returns the back row (7 for White, 0 for Black).
    #[inline]
    pub const fn back_row(self) -> u8 {
        match self {
            Team::White => 7,
            Team::Black => 0,
        }
    }

    /// Returns the row this team's pawns start on.
    #[inline]
    pub const fn pawn_row(self) -> u8 {
        match self {
            Team::White => 6,
            Team::Black => 1,
        }
    }

    /// Returns the row on which this team's pawns promote.
    #[inline]
    pub const fn promotion_row(self) -> u8 {
        self.opposite().back_row()
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::White => write!(f, "White"),
            Team::Black => write!(f, "Black"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_team() {
        assert_eq!(Team::White.opposite(), Team::Black);
        assert_eq!(Team::Black.opposite(), Team::White);
    }

    #[test]
    fn team_index() {
        assert_eq!(Team::White.index(), 0);
        assert_eq!(Team::Black.index(), 1);
    }

    #[test]
    fn pawn_direction() {
        assert_eq!(Team::White.pawn_direction(), -1);
        assert_eq!(Team::Black.pawn_direction(), 1);
    }

    #[test]
    fn rows() {
        assert_eq!(Team::White.back_row(), 7);
        assert_eq!(Team::Black.back_row(), 0);
        assert_eq!(Team::White.pawn_row(), 6);
        assert_eq!(Team::Black.pawn_row(), 1);
        assert_eq!(Team::White.promotion_row(), 0);
        assert_eq!(Team::Black.promotion_row(), 7);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Team::White), "White");
        assert_eq!(format!("{}", Team::Black), "Black");
    }
}
