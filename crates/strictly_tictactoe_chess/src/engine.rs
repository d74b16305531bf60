//! Game engine for tic-tac-toe chess.
//!
//! [`GameState`] is an immutable snapshot; [`GameState::apply`] is a pure
//! transition returning the next snapshot or the reason the action was
//! rejected. [`Game`] holds the current snapshot for a front end.

use super::action::{Action, ActionError};
use super::board::Board;
use super::contracts::{ActionContract, Contract};
use super::movegen::{legal_moves, pawn_direction};
use super::rules::{Phase, check_winner, hands_exhausted};
use super::types::{ByPlayer, Piece, PieceType, Player, Square};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// One player's pieces off and on the board.
///
/// `hand.len() + placed.len()` is always the size of a full set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PlayerPieces {
    /// Types waiting to be placed, including ones returned by capture.
    hand: Vec<PieceType>,
    /// Types currently on the board, in placement order.
    placed: Vec<PieceType>,
    /// Types the opponent has captured, for display.
    captured: Vec<PieceType>,
}

impl PlayerPieces {
    /// A full hand and nothing on the board.
    pub fn new() -> Self {
        Self {
            hand: PieceType::full_set(),
            placed: Vec::new(),
            captured: Vec::new(),
        }
    }

    fn take_from_hand(&mut self, piece_type: PieceType) -> bool {
        match self.hand.iter().position(|&t| t == piece_type) {
            Some(index) => {
                self.hand.remove(index);
                self.placed.push(piece_type);
                true
            }
            None => false,
        }
    }

    fn return_captured(&mut self, piece_type: PieceType) {
        if let Some(index) = self.placed.iter().position(|&t| t == piece_type) {
            self.placed.remove(index);
        }
        self.hand.push(piece_type);
        self.captured.push(piece_type);
    }
}

impl Default for PlayerPieces {
    fn default() -> Self {
        Self::new()
    }
}

/// What the current player has picked, if anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    /// Nothing selected.
    #[default]
    None,
    /// A type from the hand is waiting to be placed.
    Placement {
        /// The type to place.
        piece_type: PieceType,
    },
    /// A piece on the board is waiting to move.
    Movement {
        /// Where the piece stands.
        from: Square,
        /// Where it may go.
        valid_moves: Vec<Square>,
    },
}

/// Complete game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    current_player: Player,
    phase: Phase,
    pieces: ByPlayer<PlayerPieces>,
    selection: Selection,
    winner: Option<Player>,
}

impl GameState {
    /// Empty board, full hands, white to place.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::White,
            phase: Phase::Placement,
            pieces: ByPlayer::default(),
            selection: Selection::None,
            winner: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to act.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the winner, if the game is over.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// True once a winner has been recorded.
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Returns a player's hand, placed and captured lists.
    pub fn pieces(&self, player: Player) -> &PlayerPieces {
        &self.pieces[player]
    }

    /// Returns a player's hand.
    pub fn hand(&self, player: Player) -> &[PieceType] {
        self.pieces[player].hand()
    }

    /// Returns the current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The type waiting to be placed, if any.
    pub fn selected_piece(&self) -> Option<PieceType> {
        match self.selection {
            Selection::Placement { piece_type } => Some(piece_type),
            _ => None,
        }
    }

    /// The square whose piece is waiting to move, if any.
    pub fn selected_square(&self) -> Option<Square> {
        match self.selection {
            Selection::Movement { from, .. } => Some(from),
            _ => None,
        }
    }

    /// Destinations of the selected piece; empty without a movement selection.
    pub fn valid_moves(&self) -> &[Square] {
        match &self.selection {
            Selection::Movement { valid_moves, .. } => valid_moves,
            _ => &[],
        }
    }

    /// Applies an action, returning the next state.
    ///
    /// `self` is never modified. Postconditions are verified in debug builds.
    ///
    /// # Errors
    ///
    /// Returns the [`ActionError`] naming why the action is not allowed.
    #[instrument(skip(self), fields(player = %self.current_player, phase = %self.phase))]
    pub fn apply(&self, action: Action) -> Result<GameState, ActionError> {
        ActionContract::pre(self, &action)?;

        let next = match action {
            Action::Reset => {
                info!("Game reset");
                return Ok(GameState::new());
            }
            Action::SelectPiece { piece_type } => self.select_piece(piece_type)?,
            Action::Square { row, col } => {
                let square =
                    Square::new(row, col).ok_or(ActionError::OutOfBounds { row, col })?;
                self.click(square)?
            }
        };

        #[cfg(debug_assertions)]
        ActionContract::post(self, &next)?;

        Ok(next)
    }

    fn select_piece(&self, piece_type: PieceType) -> Result<GameState, ActionError> {
        let hand = self.hand(self.current_player);
        if hand.is_empty() {
            return Err(ActionError::EmptyHand(self.current_player));
        }
        if !hand.contains(&piece_type) {
            return Err(ActionError::PieceNotInHand(piece_type));
        }

        debug!(%piece_type, "Piece selected for placement");
        let mut next = self.clone();
        next.selection = Selection::Placement { piece_type };
        Ok(next)
    }

    /// Dispatches a click: move, then toggle selection, then place.
    ///
    /// Pieces on the board can only be selected once the movement phase
    /// has begun.
    fn click(&self, square: Square) -> Result<GameState, ActionError> {
        if let Selection::Movement { from, valid_moves } = &self.selection
            && valid_moves.contains(&square)
        {
            return self.move_piece(*from, square);
        }

        let target = self.board.get(square);
        let own_piece = target.filter(|piece| piece.owner() == self.current_player);
        if let Some(piece) = own_piece
            && self.phase == Phase::Movement
        {
            return Ok(self.toggle_selection(square, piece));
        }

        if let (None, Selection::Placement { piece_type }) = (target, &self.selection) {
            return self.place(square, *piece_type);
        }

        Err(match (&self.selection, target) {
            (Selection::Movement { .. }, _) => ActionError::IllegalDestination(square),
            (Selection::Placement { .. }, Some(_)) => ActionError::OccupiedDestination(square),
            (_, Some(_)) if own_piece.is_some() => ActionError::WrongPhase(self.phase),
            (_, Some(_)) => ActionError::NotOwnPiece(square),
            _ => ActionError::NothingSelected,
        })
    }

    fn toggle_selection(&self, square: Square, piece: Piece) -> GameState {
        let mut next = self.clone();
        if self.selected_square() == Some(square) {
            debug!(%square, "Selection cleared");
            next.selection = Selection::None;
        } else {
            let valid_moves = legal_moves(&self.board, square, piece);
            debug!(%square, moves = valid_moves.len(), "Piece selected for movement");
            next.selection = Selection::Movement {
                from: square,
                valid_moves,
            };
        }
        next
    }

    fn place(&self, square: Square, piece_type: PieceType) -> Result<GameState, ActionError> {
        let player = self.current_player;
        let mut next = self.clone();
        if next.pieces[player].hand.is_empty() {
            return Err(ActionError::EmptyHand(player));
        }
        if !next.pieces[player].take_from_hand(piece_type) {
            return Err(ActionError::PieceNotInHand(piece_type));
        }

        let mut piece = Piece::new(piece_type, player);
        if piece_type == PieceType::Pawn {
            piece = piece.with_direction(pawn_direction(piece, square.row()));
        }
        next.board = self.board.with_piece_at(square, Some(piece));
        info!(%player, %piece_type, %square, "Piece placed");

        if next.phase == Phase::Placement
            && hands_exhausted(ByPlayer {
                white: next.hand(Player::White),
                black: next.hand(Player::Black),
            })
        {
            info!("All pieces placed, movement phase begins");
            next.phase = Phase::Movement;
        }

        next.finalize_turn();
        Ok(next)
    }

    fn move_piece(&self, from: Square, to: Square) -> Result<GameState, ActionError> {
        let piece = self.board.get(from).ok_or_else(|| {
            ActionError::InvariantViolation(format!("selected square {from} is empty"))
        })?;

        let moved = match piece.piece_type() {
            PieceType::Pawn => {
                let direction = pawn_direction(piece, from.row());
                if to.row() == direction.edge_row() {
                    piece.with_direction(direction.reversed())
                } else {
                    piece.with_direction(direction)
                }
            }
            _ => piece,
        };

        let mut next = self.clone();
        if let Some(taken) = self.board.get(to) {
            info!(
                captured = %taken.piece_type(),
                owner = %taken.owner(),
                %to,
                "Piece captured and returned to hand"
            );
            next.pieces[taken.owner()].return_captured(taken.piece_type());
        }
        next.board = self
            .board
            .with_piece_at(from, None)
            .with_piece_at(to, Some(moved));
        info!(
            player = %self.current_player,
            piece = %piece.piece_type(),
            %from,
            %to,
            "Piece moved"
        );

        next.finalize_turn();
        Ok(next)
    }

    /// Records a winner or passes the turn, and drops the selection.
    fn finalize_turn(&mut self) {
        self.selection = Selection::None;
        match check_winner(&self.board) {
            Some(winner) => {
                info!(%winner, "Four in a row");
                self.winner = Some(winner);
            }
            None => self.current_player = self.current_player.opponent(),
        }
    }

    /// Drops a pending movement selection, keeping a placement choice.
    pub(crate) fn clear_movement_selection(&mut self) {
        if matches!(self.selection, Selection::Movement { .. }) {
            self.selection = Selection::None;
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Tic-tac-toe chess game holding the current state.
///
/// Each method applies one action; on rejection the state is left as it
/// was, apart from dropping a stale movement selection.
#[derive(Debug, Clone, Default)]
pub struct Game {
    state: GameState,
}

impl Game {
    /// Creates a new game.
    #[instrument]
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Chooses a type from the current player's hand to place.
    ///
    /// # Errors
    ///
    /// See [`GameState::apply`].
    pub fn select_piece_type(&mut self, piece_type: PieceType) -> Result<&GameState, ActionError> {
        self.apply(Action::select(piece_type))
    }

    /// Clicks a square.
    ///
    /// # Errors
    ///
    /// See [`GameState::apply`].
    pub fn act(&mut self, row: usize, col: usize) -> Result<&GameState, ActionError> {
        self.apply(Action::square(row, col))
    }

    /// Restores the initial state.
    pub fn reset(&mut self) -> &GameState {
        self.state = GameState::new();
        &self.state
    }

    /// Applies any action.
    ///
    /// # Errors
    ///
    /// See [`GameState::apply`].
    #[instrument(skip(self))]
    pub fn apply(&mut self, action: Action) -> Result<&GameState, ActionError> {
        match self.state.apply(action) {
            Ok(next) => {
                self.state = next;
                Ok(&self.state)
            }
            Err(error) => {
                debug!(%error, "Action rejected");
                if error.clears_selection() {
                    self.state.clear_movement_selection();
                }
                Err(error)
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{pieces, state_with};
    use super::*;
    use PieceType::{Bishop, Knight, Pawn, Rook};

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn test_select_requires_piece_in_hand() {
        let state = GameState::new();
        let next = state.apply(Action::select(Knight)).unwrap();
        assert_eq!(next.selected_piece(), Some(Knight));
        assert_eq!(next.current_player(), Player::White);

        let white_has_no_rook = state_with(
            "R...\n....\n....\n....".parse().unwrap(),
            Player::White,
            Phase::Placement,
            ByPlayer {
                white: pieces(&[Knight, Bishop, Pawn], &[Rook]),
                black: PlayerPieces::new(),
            },
        );
        assert_eq!(
            white_has_no_rook.apply(Action::select(Rook)),
            Err(ActionError::PieceNotInHand(Rook))
        );
    }

    #[test]
    fn test_white_pawn_placed_on_top_row_faces_down() {
        let mut game = Game::new();
        game.select_piece_type(Pawn).unwrap();
        let state = game.act(0, 2).unwrap();
        assert_eq!(
            state.board().get(sq(0, 2)),
            Some(Piece::pawn(Player::White, crate::types::Direction::Down))
        );
    }

    #[test]
    fn test_black_pawn_placed_on_bottom_row_faces_up() {
        let mut game = Game::new();
        game.select_piece_type(Rook).unwrap();
        game.act(0, 0).unwrap();
        game.select_piece_type(Pawn).unwrap();
        let state = game.act(3, 1).unwrap();
        assert_eq!(
            state.board().get(sq(3, 1)),
            Some(Piece::pawn(Player::Black, crate::types::Direction::Up))
        );
    }

    #[test]
    fn test_pawn_reaching_edge_turns_around() {
        let board = Board::new()
            .with_piece_at(sq(1, 0), Some(Piece::new(Pawn, Player::White)))
            .with_piece_at(sq(3, 3), Some(Piece::new(Rook, Player::Black)));
        let state = state_with(
            board,
            Player::White,
            Phase::Movement,
            ByPlayer {
                white: pieces(&[Rook, Knight, Bishop], &[Pawn]),
                black: pieces(&[Knight, Bishop, Pawn], &[Rook]),
            },
        );

        let state = state.apply(Action::square(1, 0)).unwrap();
        assert_eq!(state.valid_moves(), &[sq(0, 0)]);
        let state = state.apply(Action::square(0, 0)).unwrap();
        assert_eq!(
            state.board().get(sq(0, 0)),
            Some(Piece::pawn(Player::White, crate::types::Direction::Down))
        );
        assert_eq!(state.current_player(), Player::Black);
    }

    #[test]
    fn test_pawn_capturing_onto_edge_turns_around() {
        let board = Board::new()
            .with_piece_at(sq(1, 1), Some(Piece::new(Pawn, Player::White)))
            .with_piece_at(sq(0, 2), Some(Piece::new(Knight, Player::Black)));
        let state = state_with(
            board,
            Player::White,
            Phase::Movement,
            ByPlayer {
                white: pieces(&[Rook, Knight, Bishop], &[Pawn]),
                black: pieces(&[Rook, Bishop, Pawn], &[Knight]),
            },
        );

        let state = state.apply(Action::square(1, 1)).unwrap();
        assert!(state.valid_moves().contains(&sq(0, 2)));
        let state = state.apply(Action::square(0, 2)).unwrap();

        assert_eq!(
            state.board().get(sq(0, 2)),
            Some(Piece::pawn(Player::White, crate::types::Direction::Down))
        );
        assert!(state.board().is_empty(sq(1, 1)));
        assert_eq!(state.hand(Player::Black), &[Rook, Bishop, Pawn, Knight]);
        assert_eq!(state.pieces(Player::Black).captured(), &vec![Knight]);
        assert_eq!(state.current_player(), Player::Black);
    }

    fn rooks_in_corners() -> Game {
        let state = state_with(
            "R...\n....\n....\n...r".parse().unwrap(),
            Player::White,
            Phase::Movement,
            ByPlayer {
                white: pieces(&[Knight, Bishop, Pawn], &[Rook]),
                black: pieces(&[Knight, Bishop, Pawn], &[Rook]),
            },
        );
        Game { state }
    }

    #[test]
    fn test_rejected_click_drops_movement_selection() {
        let mut game = rooks_in_corners();

        // White selects the rook, then clicks an unreachable square.
        game.act(0, 0).unwrap();
        assert_eq!(game.state().selected_square(), Some(sq(0, 0)));
        assert_eq!(game.act(1, 1), Err(ActionError::IllegalDestination(sq(1, 1))));
        assert_eq!(game.state().selected_square(), None);
        assert_eq!(game.state().current_player(), Player::White);
    }

    #[test]
    fn test_clicking_selected_piece_again_deselects() {
        let mut game = rooks_in_corners();
        game.act(0, 0).unwrap();
        assert_eq!(game.state().valid_moves().len(), 6);
        let state = game.act(0, 0).unwrap();
        assert_eq!(state.selection(), &Selection::None);
        assert!(state.valid_moves().is_empty());
    }

    #[test]
    fn test_selecting_piece_type_replaces_movement_selection() {
        let mut game = rooks_in_corners();
        game.act(0, 0).unwrap();
        let state = game.select_piece_type(Knight).unwrap();
        assert_eq!(state.selected_square(), None);
        assert_eq!(state.selected_piece(), Some(Knight));
    }

    #[test]
    fn test_board_pieces_cannot_move_during_placement() {
        let mut game = Game::new();
        game.select_piece_type(Rook).unwrap();
        game.act(0, 0).unwrap();
        game.select_piece_type(Rook).unwrap();
        game.act(3, 3).unwrap();
        assert_eq!(game.act(0, 0), Err(ActionError::WrongPhase(Phase::Placement)));
        assert_eq!(game.state().selection(), &Selection::None);
    }

    #[test]
    fn test_clicking_opponent_piece_without_selection() {
        let mut game = Game::new();
        game.select_piece_type(Rook).unwrap();
        game.act(0, 0).unwrap();
        assert_eq!(game.act(0, 0), Err(ActionError::NotOwnPiece(sq(0, 0))));

        game.select_piece_type(Knight).unwrap();
        assert_eq!(game.act(0, 0), Err(ActionError::OccupiedDestination(sq(0, 0))));
        assert_eq!(game.state().selected_piece(), Some(Knight));
    }

    #[test]
    fn test_out_of_bounds_and_nothing_selected() {
        let mut game = Game::new();
        assert_eq!(game.act(4, 0), Err(ActionError::OutOfBounds { row: 4, col: 0 }));
        assert_eq!(game.act(1, 1), Err(ActionError::NothingSelected));
        assert_eq!(game.state(), &GameState::new());

        // An off-board click keeps a pending placement choice.
        game.select_piece_type(Rook).unwrap();
        assert_eq!(
            game.act(usize::MAX, 0),
            Err(ActionError::OutOfBounds {
                row: usize::MAX,
                col: 0
            })
        );
        assert_eq!(game.state().selected_piece(), Some(Rook));
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut game = Game::new();
        game.select_piece_type(Bishop).unwrap();
        game.act(2, 2).unwrap();
        assert_eq!(game.reset(), &GameState::new());

        game.select_piece_type(Bishop).unwrap();
        game.act(2, 2).unwrap();
        assert_eq!(game.apply(Action::Reset).unwrap(), &GameState::new());
    }

    #[test]
    fn test_state_serializes() {
        let mut game = Game::new();
        game.select_piece_type(Rook).unwrap();
        game.act(0, 0).unwrap();
        let json = serde_json::to_value(game.state()).unwrap();
        assert_eq!(json["current_player"], "black");
        assert_eq!(json["phase"], "placement");
        assert_eq!(json["selection"]["kind"], "none");

        let back: GameState = serde_json::from_value(json).unwrap();
        assert_eq!(&back, game.state());
    }

    #[test]
    fn test_state_with_off_board_selection_is_not_loaded() {
        let mut json = serde_json::to_value(GameState::new()).unwrap();
        json["phase"] = "movement".into();
        json["selection"] = serde_json::json!({
            "kind": "movement",
            "from": { "row": 9, "col": 0 },
            "valid_moves": []
        });
        let error = serde_json::from_value::<GameState>(json).unwrap_err();
        assert!(error.to_string().contains("off the board"));
    }
}
