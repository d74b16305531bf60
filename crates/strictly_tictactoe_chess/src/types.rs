//! Core domain types for tic-tac-toe chess.

use serde::{Deserialize, Deserializer, Serialize, de};
use std::ops::{Index, IndexMut};

/// Side length of the board.
pub const BOARD_SIZE: usize = 4;

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Player {
    /// White (moves first).
    White,
    /// Black (moves second).
    Black,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Direction a freshly created pawn of this player walks.
    ///
    /// White starts toward row 0, black toward the last row.
    pub fn home_direction(self) -> Direction {
        match self {
            Player::White => Direction::Up,
            Player::Black => Direction::Down,
        }
    }
}

/// The four piece types each player owns one of.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PieceType {
    /// Slides orthogonally.
    Rook,
    /// Jumps in an L.
    Knight,
    /// Slides diagonally.
    Bishop,
    /// Steps forward, captures diagonally forward.
    Pawn,
}

impl PieceType {
    /// Single-letter board symbol (upper case).
    pub fn symbol(self) -> char {
        match self {
            PieceType::Rook => 'R',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Pawn => 'P',
        }
    }

    /// Inverse of [`PieceType::symbol`], ignoring case.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'R' => Some(PieceType::Rook),
            'N' => Some(PieceType::Knight),
            'B' => Some(PieceType::Bishop),
            'P' => Some(PieceType::Pawn),
            _ => None,
        }
    }

    /// The starting hand: one of each type, in display order.
    pub fn full_set() -> Vec<PieceType> {
        <PieceType as strum::IntoEnumIterator>::iter().collect()
    }
}

/// Vertical direction of pawn travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward row 0.
    Up,
    /// Toward the last row.
    Down,
}

impl Direction {
    /// Row delta of one step.
    pub fn delta(self) -> isize {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
        }
    }

    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// The row a piece travelling this way can go no further than.
    pub fn edge_row(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => BOARD_SIZE - 1,
        }
    }
}

/// A piece on the board.
///
/// Pieces are values: the only thing that ever changes is a pawn's
/// direction, and that produces a new piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    piece_type: PieceType,
    owner: Player,
    /// Present only for pawns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    direction: Option<Direction>,
}

impl Piece {
    /// Creates a piece; pawns face their owner's home direction.
    pub fn new(piece_type: PieceType, owner: Player) -> Self {
        let direction = (piece_type == PieceType::Pawn).then(|| owner.home_direction());
        Self {
            piece_type,
            owner,
            direction,
        }
    }

    /// Creates a pawn facing the given direction.
    pub fn pawn(owner: Player, direction: Direction) -> Self {
        Self {
            piece_type: PieceType::Pawn,
            owner,
            direction: Some(direction),
        }
    }

    /// Returns the piece type.
    pub fn piece_type(&self) -> PieceType {
        self.piece_type
    }

    /// Returns the owning player.
    pub fn owner(&self) -> Player {
        self.owner
    }

    /// Returns the stored pawn direction (always `None` for other types).
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Direction this piece moves forward: the stored one, or the owner's default.
    pub fn forward(&self) -> Direction {
        self.direction.unwrap_or_else(|| self.owner.home_direction())
    }

    /// Returns a copy facing `direction`. Non-pawns are returned unchanged.
    pub fn with_direction(self, direction: Direction) -> Self {
        match self.piece_type {
            PieceType::Pawn => Self {
                direction: Some(direction),
                ..self
            },
            _ => self,
        }
    }

    /// Board symbol: upper case for white, lower case for black.
    pub fn symbol(&self) -> char {
        let symbol = self.piece_type.symbol();
        match self.owner {
            Player::White => symbol,
            Player::Black => symbol.to_ascii_lowercase(),
        }
    }
}

// Only pawns carry a direction; a pawn stored without one faces home.
impl<'de> Deserialize<'de> for Piece {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Fields {
            piece_type: PieceType,
            owner: Player,
            #[serde(default)]
            direction: Option<Direction>,
        }

        let Fields {
            piece_type,
            owner,
            direction,
        } = Fields::deserialize(deserializer)?;
        match (piece_type, direction) {
            (PieceType::Pawn, Some(direction)) => Ok(Piece::pawn(owner, direction)),
            (_, None) => Ok(Piece::new(piece_type, owner)),
            (_, Some(_)) => Err(de::Error::custom(format!(
                "{piece_type} cannot carry a direction"
            ))),
        }
    }
}

/// A coordinate on the board, always in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Square {
    row: usize,
    col: usize,
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Fields {
            row: usize,
            col: usize,
        }

        let Fields { row, col } = Fields::deserialize(deserializer)?;
        Square::new(row, col)
            .ok_or_else(|| de::Error::custom(format!("square ({row}, {col}) is off the board")))
    }
}

impl Square {
    /// Creates a square, or `None` when outside the board.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }

    /// Row index (0 is the top).
    pub fn row(&self) -> usize {
        self.row
    }

    /// Column index (0 is the left).
    pub fn col(&self) -> usize {
        self.col
    }

    /// The square `(dr, dc)` away, if it is on the board.
    pub fn offset(self, dr: isize, dc: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Self::new(row, col)
    }

    /// All squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| Square { row, col }))
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One value per player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ByPlayer<T> {
    /// White's value.
    pub white: T,
    /// Black's value.
    pub black: T,
}

impl<T> ByPlayer<T> {
    /// Builds both values from a function of the player.
    pub fn from_fn(mut f: impl FnMut(Player) -> T) -> Self {
        Self {
            white: f(Player::White),
            black: f(Player::Black),
        }
    }
}

impl<T> Index<Player> for ByPlayer<T> {
    type Output = T;

    fn index(&self, player: Player) -> &T {
        match player {
            Player::White => &self.white,
            Player::Black => &self.black,
        }
    }
}

impl<T> IndexMut<Player> for ByPlayer<T> {
    fn index_mut(&mut self, player: Player) -> &mut T {
        match player {
            Player::White => &mut self.white,
            Player::Black => &mut self.black,
        }
    }
}
