//! The 4x4 board.

use super::types::{BOARD_SIZE, Piece, PieceType, Player, Square};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 4x4 grid of optional pieces.
///
/// Boards are plain values; [`Board::with_piece_at`] returns a new board
/// instead of mutating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Cells indexed `[row][col]`.
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff `(row, col)` lies on the board.
    pub fn is_within_bounds(row: isize, col: isize) -> bool {
        let size = BOARD_SIZE as isize;
        (0..size).contains(&row) && (0..size).contains(&col)
    }

    /// The piece at `square`, if any.
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.cells[square.row()][square.col()]
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// Returns a copy of this board with `square` set to `piece`.
    pub fn with_piece_at(&self, square: Square, piece: Option<Piece>) -> Board {
        let mut next = *self;
        next.cells[square.row()][square.col()] = piece;
        next
    }

    /// All occupied squares with their pieces, row-major.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|square| self.get(square).map(|piece| (square, piece)))
    }

    /// Piece types `player` has on the board, row-major.
    pub fn piece_types_of(&self, player: Player) -> Vec<PieceType> {
        self.pieces()
            .filter(|(_, piece)| piece.owner() == player)
            .map(|(_, piece)| piece.piece_type())
            .collect()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, cells) in self.cells.iter().enumerate() {
            for cell in cells {
                let symbol = cell.map(|piece| piece.symbol()).unwrap_or('.');
                write!(f, "{symbol}")?;
            }
            if row + 1 < BOARD_SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Error parsing a board diagram.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardParseError {
    /// Wrong number of non-blank lines.
    #[display("expected {} rows, found {}", BOARD_SIZE, _0)]
    RowCount(#[error(not(source))] usize),
    /// A row has the wrong width.
    #[display("row {} has {} cells, expected {}", row, width, BOARD_SIZE)]
    RowWidth {
        /// Offending row.
        row: usize,
        /// Cells found.
        width: usize,
    },
    /// A cell symbol is not `.` or a piece letter.
    #[display("unknown symbol {:?} at row {}", symbol, row)]
    Symbol {
        /// Offending row.
        row: usize,
        /// The symbol.
        symbol: char,
    },
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses the diagram produced by `Display`: one line per row, `.` for
    /// empty, upper case for white and lower case for black. Whitespace
    /// within a line is ignored. Pawns face their owner's home direction.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if rows.len() != BOARD_SIZE {
            return Err(BoardParseError::RowCount(rows.len()));
        }

        let mut board = Board::new();
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != BOARD_SIZE {
                return Err(BoardParseError::RowWidth {
                    row,
                    width: symbols.len(),
                });
            }
            for (col, symbol) in symbols.into_iter().enumerate() {
                if symbol == '.' {
                    continue;
                }
                let piece_type = PieceType::from_symbol(symbol)
                    .ok_or(BoardParseError::Symbol { row, symbol })?;
                let owner = if symbol.is_ascii_uppercase() {
                    Player::White
                } else {
                    Player::Black
                };
                board.cells[row][col] = Some(Piece::new(piece_type, owner));
            }
        }
        Ok(board)
    }
}
