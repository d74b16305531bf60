//! Plain-text rendering of a game snapshot.

use std::fmt::Write;
use strictly_tictactoe_chess::{BOARD_SIZE, GameState, PieceType, Player, Selection, Square};
use strum::IntoEnumIterator;

/// Renders the board with coordinates followed by turn, phase, inventories,
/// selection and result.
pub fn render(state: &GameState) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_state(&mut out, state);
    out
}

fn write_state(out: &mut String, state: &GameState) -> std::fmt::Result {
    let highlighted = state.valid_moves();

    write!(out, "  ")?;
    for col in 0..BOARD_SIZE {
        write!(out, " {col}")?;
    }
    writeln!(out)?;

    for row in 0..BOARD_SIZE {
        write!(out, "{row} ")?;
        for col in 0..BOARD_SIZE {
            let square = Square::new(row, col);
            let cell = match square.and_then(|s| state.board().get(s)) {
                Some(piece) => piece.symbol(),
                None if square.is_some_and(|s| highlighted.contains(&s)) => '*',
                None => '.',
            };
            write!(out, " {cell}")?;
        }
        writeln!(out)?;
    }
    writeln!(out)?;

    match state.winner() {
        Some(winner) => writeln!(out, "{winner} wins!")?,
        None => writeln!(
            out,
            "Turn: {}   Phase: {}",
            state.current_player(),
            state.phase()
        )?,
    }

    for player in Player::iter() {
        let pieces = state.pieces(player);
        writeln!(
            out,
            "{player}  hand: [{}]  placed: [{}]  captured: [{}]",
            list(pieces.hand()),
            list(pieces.placed()),
            list(pieces.captured())
        )?;
    }

    match state.selection() {
        Selection::None => {}
        Selection::Placement { piece_type } => writeln!(out, "Selected: {piece_type} (to place)")?,
        Selection::Movement { from, valid_moves } => {
            let piece = state
                .board()
                .get(*from)
                .map(|p| p.piece_type().to_string())
                .unwrap_or_default();
            let moves: Vec<String> = valid_moves.iter().map(ToString::to_string).collect();
            writeln!(out, "Selected: {piece} at {from}")?;
            writeln!(out, "Moves: {}", moves.join(" "))?;
        }
    }
    Ok(())
}

fn list(types: &[PieceType]) -> String {
    types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
