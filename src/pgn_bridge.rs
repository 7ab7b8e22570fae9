//! Conversion between TCN and PGN movetext.
//!
//! The codec has no idea whether a move is legal; this module pairs it
//! with shakmaty, which tracks the position, rejects illegal moves and
//! speaks SAN. Engine errors are passed through unchanged so callers
//! see exactly why a sequence was rejected.

use std::fmt::Write as _;

use shakmaty::san::{ParseSanError, SanError, SanPlus};
use shakmaty::{
    Chess, File, Move as EngineMove, PlayError, Position, Role, Square as EngineSquare,
};
use thiserror::Error;

use crate::square::Square;
use crate::tcn_codec::{decode_tcn, encode_tcn, InvalidMove, MalformedTcn, Move, Piece};

#[derive(Error, Debug)]
pub enum PgnBridgeError {
    #[error(transparent)]
    MalformedTcn(#[from] MalformedTcn),
    #[error(transparent)]
    InvalidMove(#[from] InvalidMove),
    #[error("{0} is not legal in this position")]
    IllegalMove(Move),
    #[error("unparseable movetext token {token:?}")]
    UnparseableSan {
        token: String,
        #[source]
        source: ParseSanError,
    },
    #[error(transparent)]
    IllegalSan(#[from] SanError),
    #[error(transparent)]
    Play(#[from] PlayError<Chess>),
}

/// Decodes a TCN string and replays it from the starting position,
/// producing numbered SAN movetext.
///
/// Fails on the first move the engine rejects.
///
/// ```
/// let pgn = chess_tcn::tcn_to_pgn("mC0Kgv5Q")?;
/// assert_eq!(pgn, "1. e4 e5 2. Nf3 Nc6");
/// # Ok::<(), chess_tcn::PgnBridgeError>(())
/// ```
pub fn tcn_to_pgn(tcn: &str) -> Result<String, PgnBridgeError> {
    let moves = decode_tcn(tcn)?;
    let mut position = Chess::default();
    let mut movetext = String::new();

    for (ply, mv) in moves.iter().enumerate() {
        let engine_move = position
            .legal_moves()
            .into_iter()
            .find(|candidate| realizes(candidate, mv))
            .ok_or(PgnBridgeError::IllegalMove(*mv))?;
        let san = SanPlus::from_move(position.clone(), &engine_move);

        if !movetext.is_empty() {
            movetext.push(' ');
        }
        if ply % 2 == 0 {
            write!(movetext, "{}. ", ply / 2 + 1).unwrap();
        }
        write!(movetext, "{san}").unwrap();

        position = position.play(&engine_move)?;
    }

    Ok(movetext)
}

/// Parses PGN movetext, replays it from the starting position and
/// encodes the played moves as TCN.
///
/// Tag pairs, comments, variations, NAGs, move numbers and game
/// results are skipped; what remains must be legal SAN.
///
/// ```
/// let tcn = chess_tcn::pgn_to_tcn("1. e4 e5 2. Nf3 Nc6")?;
/// assert_eq!(tcn, "mC0Kgv5Q");
/// # Ok::<(), chess_tcn::PgnBridgeError>(())
/// ```
pub fn pgn_to_tcn(pgn: &str) -> Result<String, PgnBridgeError> {
    let mut position = Chess::default();
    let mut moves = Vec::new();

    for raw in san_tokens(pgn) {
        if matches!(raw, "1-0" | "0-1" | "1/2-1/2" | "*") || raw.starts_with('$') {
            continue;
        }
        let token = raw.trim_start_matches(|c: char| c.is_ascii_digit() || c == '.');
        if token.is_empty() {
            continue;
        }
        let san: SanPlus = token.parse().map_err(|source| PgnBridgeError::UnparseableSan {
            token: token.to_string(),
            source,
        })?;
        let engine_move = san.san.to_move(&position)?;
        moves.push(codec_move(&engine_move));
        position = position.play(&engine_move)?;
    }

    Ok(encode_tcn(&moves)?)
}

/// Whether a legal engine move is the one a decoded TCN move names.
/// Castling is compared against the king's own destination, which is
/// how TCN records it.
fn realizes(engine: &EngineMove, mv: &Move) -> bool {
    match *mv {
        Move::Normal { from, to } => {
            engine.promotion().is_none()
                && engine.from() == Some(engine_square(from))
                && king_destination(engine) == engine_square(to)
        }
        Move::Promotion { from, to, piece } => {
            engine.from() == Some(engine_square(from))
                && engine.to() == engine_square(to)
                && engine.promotion() == Some(piece_role(piece))
        }
        Move::Drop { piece, to } => matches!(
            *engine,
            EngineMove::Put { role, to: target }
                if role == piece_role(piece) && target == engine_square(to)
        ),
    }
}

/// An applied engine move, reshaped the way the codec records it.
fn codec_move(engine: &EngineMove) -> Move {
    match *engine {
        EngineMove::Normal {
            from,
            to,
            promotion: Some(role),
            ..
        } => Move::Promotion {
            from: codec_square(from),
            to: codec_square(to),
            piece: role_piece(role),
        },
        EngineMove::Normal { from, to, .. } | EngineMove::EnPassant { from, to } => Move::Normal {
            from: codec_square(from),
            to: codec_square(to),
        },
        EngineMove::Castle { king, .. } => Move::Normal {
            from: codec_square(king),
            to: codec_square(king_destination(engine)),
        },
        EngineMove::Put { role, to } => Move::Drop {
            piece: role_piece(role),
            to: codec_square(to),
        },
    }
}

/// Where the moving piece ends up from the mover's point of view. For
/// castling shakmaty reports the rook's square as `to`; TCN uses the
/// king's target square instead.
fn king_destination(engine: &EngineMove) -> EngineSquare {
    match *engine {
        EngineMove::Castle { king, rook } => {
            let file = if rook.file() > king.file() {
                File::G
            } else {
                File::C
            };
            EngineSquare::from_coords(file, king.rank())
        }
        _ => engine.to(),
    }
}

fn engine_square(square: Square) -> EngineSquare {
    EngineSquare::new(u32::from(square.index()))
}

fn codec_square(square: EngineSquare) -> Square {
    Square::from_index_unchecked(square as u8)
}

fn piece_role(piece: Piece) -> Role {
    match piece {
        Piece::Queen => Role::Queen,
        Piece::Knight => Role::Knight,
        Piece::Rook => Role::Rook,
        Piece::Bishop => Role::Bishop,
        Piece::King => Role::King,
        Piece::Pawn => Role::Pawn,
    }
}

fn role_piece(role: Role) -> Piece {
    match role {
        Role::Queen => Piece::Queen,
        Role::Knight => Piece::Knight,
        Role::Rook => Piece::Rook,
        Role::Bishop => Piece::Bishop,
        Role::King => Piece::King,
        Role::Pawn => Piece::Pawn,
    }
}

/// Splits movetext into bare tokens, skipping `[...]` tag pairs,
/// `{...}` comments and parenthesised variations.
fn san_tokens(movetext: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut brace = false;
    let mut bracket = false;
    let mut depth = 0usize;

    for (i, c) in movetext.char_indices() {
        let skipping = brace || bracket || depth > 0;
        let boundary =
            skipping || c.is_whitespace() || matches!(c, '{' | '}' | '[' | ']' | '(' | ')');
        if boundary {
            if let Some(s) = start.take() {
                tokens.push(&movetext[s..i]);
            }
        }
        match c {
            '{' => brace = true,
            '}' => brace = false,
            '[' if !brace => bracket = true,
            ']' if !brace => bracket = false,
            '(' if !brace && !bracket => depth += 1,
            ')' if !brace && !bracket => depth = depth.saturating_sub(1),
            _ if !boundary && start.is_none() => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push(&movetext[s..]);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizer_keeps_san_only() {
        let pgn = "[Event \"Casual game\"]\n1. e4 {best by test} e5 (1... c5 2. Nf3) 2. Nf3 $1 Nc6 1/2-1/2";
        assert_eq!(
            san_tokens(pgn),
            vec!["1.", "e4", "e5", "2.", "Nf3", "$1", "Nc6", "1/2-1/2"]
        );
    }

    #[test]
    fn tokenizer_splits_glued_move_numbers() {
        assert_eq!(san_tokens("1.e4 e5"), vec!["1.e4", "e5"]);
    }

    #[test]
    fn castling_is_recorded_from_the_kings_view() {
        let tcn = pgn_to_tcn("1. e4 e5 2. Nf3 Nc6 3. Bb5 a6 4. Ba4 Nf6 5. O-O").unwrap();
        assert!(tcn.ends_with("eg"), "{tcn}");
    }
}
