//! Win detection: four of one player's pieces in a line.

use crate::board::Board;
use crate::types::{BOARD_SIZE, Player, Square};
use tracing::instrument;

/// Every winning line as `(row, col)` pairs: rows, columns, then the two diagonals.
pub const LINES: [[(usize, usize); BOARD_SIZE]; 10] = [
    // Rows
    [(0, 0), (0, 1), (0, 2), (0, 3)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
    [(3, 0), (3, 1), (3, 2), (3, 3)],
    // Columns
    [(0, 0), (1, 0), (2, 0), (3, 0)],
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(0, 2), (1, 2), (2, 2), (3, 2)],
    [(0, 3), (1, 3), (2, 3), (3, 3)],
    // Diagonals
    [(0, 0), (1, 1), (2, 2), (3, 3)],
    [(0, 3), (1, 2), (2, 1), (3, 0)],
];

/// Checks if there is a winner on the board.
///
/// Returns `Some(player)` if every cell of some line holds one of that
/// player's pieces. Piece types do not matter.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Player> {
    LINES.iter().find_map(|line| line_owner(board, line))
}

fn line_owner(board: &Board, line: &[(usize, usize); BOARD_SIZE]) -> Option<Player> {
    let mut owners = line.iter().map(|&(row, col)| {
        Square::new(row, col)
            .and_then(|square| board.get(square))
            .map(|piece| piece.owner())
    });
    let first = owners.next()??;
    owners.all(|owner| owner == Some(first)).then_some(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(diagram: &str) -> Board {
        diagram.parse().unwrap()
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_row_with_mixed_types() {
        let b = board("....\nRNBP\n....\n....");
        assert_eq!(check_winner(&b), Some(Player::White));
    }

    #[test]
    fn test_winner_column() {
        let b = board("..r.\n..n.\n..b.\n..p.");
        assert_eq!(check_winner(&b), Some(Player::Black));
    }

    #[test]
    fn test_winner_diagonal() {
        let b = board("R...\n.N..\n..B.\n...P");
        assert_eq!(check_winner(&b), Some(Player::White));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let b = board("...r\n..n.\n.b..\np...");
        assert_eq!(check_winner(&b), Some(Player::Black));
    }

    #[test]
    fn test_no_winner_mixed_ownership() {
        let b = board("RNBp\nrnbP\nRNBp\nrnbP");
        assert_eq!(check_winner(&b), None);
    }

    #[test]
    fn test_no_winner_incomplete() {
        let b = board("RNB.\n....\n....\n....");
        assert_eq!(check_winner(&b), None);
    }
}
