//! Legal destination squares per piece type.

use super::board::Board;
use super::types::{Direction, Piece, PieceType, Square};
use tracing::instrument;

const ORTHOGONAL: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KNIGHT_JUMPS: [(isize, isize); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Returns every square `piece`, standing on `from`, may move to.
///
/// Order is not meaningful; the result never contains duplicates.
#[instrument(skip(board), fields(piece = %piece.piece_type(), owner = %piece.owner()))]
pub fn legal_moves(board: &Board, from: Square, piece: Piece) -> Vec<Square> {
    match piece.piece_type() {
        PieceType::Rook => sliding_moves(board, from, piece, &ORTHOGONAL),
        PieceType::Bishop => sliding_moves(board, from, piece, &DIAGONAL),
        PieceType::Knight => knight_moves(board, from, piece),
        PieceType::Pawn => pawn_moves(board, from, piece),
    }
}

/// True if moving `piece` onto `to` would take an opposing piece.
pub fn is_capture(board: &Board, piece: Piece, to: Square) -> bool {
    board
        .get(to)
        .is_some_and(|target| target.owner() != piece.owner())
}

/// Direction a pawn on `row` actually advances.
///
/// A pawn whose direction would carry it off the board turns around.
pub fn pawn_direction(piece: Piece, row: usize) -> Direction {
    let direction = piece.forward();
    if row == direction.edge_row() {
        direction.reversed()
    } else {
        direction
    }
}

fn sliding_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    directions: &[(isize, isize)],
) -> Vec<Square> {
    let mut moves = Vec::new();
    for &(dr, dc) in directions {
        let mut cursor = from.offset(dr, dc);
        while let Some(square) = cursor {
            match board.get(square) {
                None => moves.push(square),
                Some(target) => {
                    if target.owner() != piece.owner() {
                        moves.push(square);
                    }
                    break;
                }
            }
            cursor = square.offset(dr, dc);
        }
    }
    moves
}

fn knight_moves(board: &Board, from: Square, piece: Piece) -> Vec<Square> {
    KNIGHT_JUMPS
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .filter(|&square| board.is_empty(square) || is_capture(board, piece, square))
        .collect()
}

fn pawn_moves(board: &Board, from: Square, piece: Piece) -> Vec<Square> {
    let dr = pawn_direction(piece, from.row()).delta();
    let mut moves = Vec::new();

    // Straight ahead only onto an empty square.
    if let Some(ahead) = from.offset(dr, 0)
        && board.is_empty(ahead)
    {
        moves.push(ahead);
    }

    // Diagonals only as captures.
    for dc in [-1, 1] {
        if let Some(square) = from.offset(dr, dc)
            && is_capture(board, piece, square)
        {
            moves.push(square);
        }
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Player;

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col).unwrap()
    }

    fn board(diagram: &str) -> Board {
        diagram.parse().unwrap()
    }

    fn sorted(mut moves: Vec<Square>) -> Vec<Square> {
        moves.sort();
        moves
    }

    #[test]
    fn test_rook_on_empty_board() {
        let b = board("R...\n....\n....\n....");
        let rook = b.get(sq(0, 0)).unwrap();
        let moves = sorted(legal_moves(&b, sq(0, 0), rook));
        assert_eq!(
            moves,
            vec![sq(0, 1), sq(0, 2), sq(0, 3), sq(1, 0), sq(2, 0), sq(3, 0)]
        );
    }

    #[test]
    fn test_rook_stops_at_blockers() {
        // Own knight blocks to the right, black pawn is capturable below.
        let b = board("R.N.\n....\np...\n....");
        let rook = b.get(sq(0, 0)).unwrap();
        let moves = sorted(legal_moves(&b, sq(0, 0), rook));
        assert_eq!(moves, vec![sq(0, 1), sq(1, 0), sq(2, 0)]);
    }

    #[test]
    fn test_bishop_diagonals() {
        let b = board("....\n.B..\n..r.\n....");
        let bishop = b.get(sq(1, 1)).unwrap();
        let moves = sorted(legal_moves(&b, sq(1, 1), bishop));
        assert_eq!(moves, vec![sq(0, 0), sq(0, 2), sq(2, 0), sq(2, 2)]);
    }

    #[test]
    fn test_knight_jumps_over_pieces() {
        let b = board("N...\nRR..\n.b..\n....");
        let knight = b.get(sq(0, 0)).unwrap();
        let moves = sorted(legal_moves(&b, sq(0, 0), knight));
        assert_eq!(moves, vec![sq(1, 2), sq(2, 1)]);
    }

    #[test]
    fn test_knight_skips_own_pieces() {
        let b = board("N...\n..B.\n.R..\n....");
        let knight = b.get(sq(0, 0)).unwrap();
        assert!(legal_moves(&b, sq(0, 0), knight).is_empty());
    }

    #[test]
    fn test_white_pawn_moves_up() {
        let b = board("....\n....\n..P.\n....");
        let pawn = b.get(sq(2, 2)).unwrap();
        assert_eq!(legal_moves(&b, sq(2, 2), pawn), vec![sq(1, 2)]);
    }

    #[test]
    fn test_pawn_cannot_capture_straight() {
        let b = board("....\n..n.\n..P.\n....");
        let pawn = b.get(sq(2, 2)).unwrap();
        assert!(legal_moves(&b, sq(2, 2), pawn).is_empty());
    }

    #[test]
    fn test_pawn_captures_diagonally_only() {
        let b = board("....\n.n.N\n..P.\n....");
        let pawn = b.get(sq(2, 2)).unwrap();
        assert_eq!(sorted(legal_moves(&b, sq(2, 2), pawn)), vec![sq(1, 1), sq(1, 2)]);
    }

    #[test]
    fn test_black_pawn_moves_down() {
        let b = board("....\n.p..\n....\n....");
        let pawn = b.get(sq(1, 1)).unwrap();
        assert_eq!(legal_moves(&b, sq(1, 1), pawn), vec![sq(2, 1)]);
    }

    #[test]
    fn test_pawn_on_its_edge_turns_around() {
        let pawn = Piece::pawn(Player::White, Direction::Up);
        let b = Board::new().with_piece_at(sq(0, 1), Some(pawn));
        assert_eq!(legal_moves(&b, sq(0, 1), pawn), vec![sq(1, 1)]);
        assert_eq!(pawn_direction(pawn, 0), Direction::Down);
        assert_eq!(pawn_direction(pawn, 2), Direction::Up);
    }

    #[test]
    fn test_reversed_pawn_walks_back() {
        let pawn = Piece::pawn(Player::White, Direction::Down);
        let b = Board::new().with_piece_at(sq(1, 0), Some(pawn));
        assert_eq!(legal_moves(&b, sq(1, 0), pawn), vec![sq(2, 0)]);
    }

    #[test]
    fn test_is_capture() {
        let b = board("R..r\n....\n....\n....");
        let rook = b.get(sq(0, 0)).unwrap();
        assert!(is_capture(&b, rook, sq(0, 3)));
        assert!(!is_capture(&b, rook, sq(0, 1)));
        assert!(!is_capture(&b, rook, sq(0, 0)));
    }
}
