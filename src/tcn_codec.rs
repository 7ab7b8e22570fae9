//! The TCN move codec.
//!
//! TCN spends exactly two symbols per move, both drawn from one
//! 85-symbol alphabet. Symbols 0–63 name board squares; symbols 64–84
//! are overloaded: in the destination slot they carry a
//! promotion-adjusted destination, in the origin slot they name the
//! piece of a drop move. The slot a symbol occupies and its numeric
//! range disambiguate the three regimes, so no tag byte is needed.

use std::fmt;

use thiserror::Error;

use crate::square::Square;

/// The shared symbol alphabet. Order is the wire format: two encoders
/// only interoperate if they agree on every position. Note that
/// indices 82 and 83 are both `'+'`; see [`InvalidMove::KingDrop`].
const ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!?{~}(^)[_]@#$,./&-*++=";

/// Destination codes at and above this value carry a promotion.
const PROMOTION_BASE: u8 = 64;

/// Origin codes at and above this value name a dropped piece.
const DROP_BASE: u8 = 79;

/// A piece kind, in TCN wire order (`qnrbkp`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    Queen,
    Knight,
    Rook,
    Bishop,
    King,
    Pawn,
}

impl Piece {
    pub const ALL: [Piece; 6] = [
        Piece::Queen,
        Piece::Knight,
        Piece::Rook,
        Piece::Bishop,
        Piece::King,
        Piece::Pawn,
    ];

    /// The 0–5 wire index.
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn from_index(index: u8) -> Option<Piece> {
        match index {
            0 => Some(Piece::Queen),
            1 => Some(Piece::Knight),
            2 => Some(Piece::Rook),
            3 => Some(Piece::Bishop),
            4 => Some(Piece::King),
            5 => Some(Piece::Pawn),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Piece::Queen => 'q',
            Piece::Knight => 'n',
            Piece::Rook => 'r',
            Piece::Bishop => 'b',
            Piece::King => 'k',
            Piece::Pawn => 'p',
        }
    }

    pub const fn from_char(c: char) -> Option<Piece> {
        match c {
            'q' => Some(Piece::Queen),
            'n' => Some(Piece::Knight),
            'r' => Some(Piece::Rook),
            'b' => Some(Piece::Bishop),
            'k' => Some(Piece::King),
            'p' => Some(Piece::Pawn),
            _ => None,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A single move, tagged by regime.
///
/// The wire format packs all three regimes into the same two-symbol
/// unit; internally they are distinct variants, so a drop can never
/// carry an origin square and a promotion can never be a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// A slide or jump from one square to another.
    Normal { from: Square, to: Square },
    /// A pawn reaching the back rank and becoming `piece`.
    Promotion {
        from: Square,
        to: Square,
        piece: Piece,
    },
    /// A piece leaving the reserve and landing on `to`.
    Drop { piece: Piece, to: Square },
}

impl Move {
    /// Origin square; `None` for drops.
    pub const fn from(&self) -> Option<Square> {
        match *self {
            Move::Normal { from, .. } | Move::Promotion { from, .. } => Some(from),
            Move::Drop { .. } => None,
        }
    }

    /// Destination square.
    pub const fn to(&self) -> Square {
        match *self {
            Move::Normal { to, .. } | Move::Promotion { to, .. } | Move::Drop { to, .. } => to,
        }
    }

    /// Promotion piece, if any.
    pub const fn promotion(&self) -> Option<Piece> {
        match *self {
            Move::Promotion { piece, .. } => Some(piece),
            _ => None,
        }
    }

    /// Dropped piece, if any.
    pub const fn drop_piece(&self) -> Option<Piece> {
        match *self {
            Move::Drop { piece, .. } => Some(piece),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    /// Formats in UCI style: `e2e4`, `e7e8q`, `N@e4`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Normal { from, to } => write!(f, "{from}{to}"),
            Move::Promotion { from, to, piece } => write!(f, "{from}{to}{piece}"),
            Move::Drop { piece, to } => {
                write!(f, "{}@{}", piece.to_char().to_ascii_uppercase(), to)
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidMove {
    /// Symbols 82 and 83 of the alphabet are both `'+'`, so bishop and
    /// king drops collide on the wire and a decoder always reads the
    /// bishop. Kings can never sit in reserve in any drop variant, so
    /// the king drop is rejected instead of encoded ambiguously.
    #[error("kings cannot be dropped from reserve")]
    KingDrop,
    #[error("promotion from {from} to {to} is not a single forward step onto a back rank")]
    PromotionShape { from: Square, to: Square },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedTcn {
    #[error("TCN length {0} is odd; every move takes exactly two symbols")]
    OddLength(usize),
    #[error("{0:?} is not a TCN symbol")]
    UnknownSymbol(char),
    #[error("origin code {0} names neither a square nor a drop")]
    OriginNotASquare(u8),
    #[error("origin code {0} is reserved (drops start at 79)")]
    ReservedOriginCode(u8),
    #[error("a drop cannot also be a promotion")]
    DropPromotion,
    #[error("destination code {0} names no promotion piece")]
    UnknownPromotionPiece(u8),
    #[error("promotion implied by codes ({origin}, {dest}) leaves the board")]
    PromotionOffBoard { origin: u8, dest: u8 },
}

/// Encodes a sequence of moves into a TCN string, two symbols per
/// move, in play order.
pub fn encode_tcn(moves: &[Move]) -> Result<String, InvalidMove> {
    let mut tcn = String::with_capacity(moves.len() * 2);
    for m in moves {
        let (origin, dest) = encode_unit(m)?;
        tcn.push(symbol(origin));
        tcn.push(symbol(dest));
    }
    Ok(tcn)
}

/// Decodes a TCN string into moves, in play order. Fails on the first
/// malformed unit; no partial result is produced.
pub fn decode_tcn(tcn: &str) -> Result<Vec<Move>, MalformedTcn> {
    let codes = tcn
        .chars()
        .map(symbol_index)
        .collect::<Result<Vec<u8>, MalformedTcn>>()?;
    if codes.len() % 2 != 0 {
        return Err(MalformedTcn::OddLength(codes.len()));
    }
    codes
        .chunks_exact(2)
        .map(|unit| decode_unit(unit[0], unit[1]))
        .collect()
}

fn encode_unit(m: &Move) -> Result<(u8, u8), InvalidMove> {
    match *m {
        Move::Normal { from, to } => Ok((from.index(), to.index())),
        Move::Drop { piece, to } => {
            if piece == Piece::King {
                return Err(InvalidMove::KingDrop);
            }
            Ok((DROP_BASE + piece.index(), to.index()))
        }
        Move::Promotion { from, to, piece } => {
            let delta = i16::from(to.index()) - i16::from(from.index());
            // Only the six deltas that survive the decoder's direction
            // inference are encodable: one step forward onto rank 1 or
            // rank 8, straight or capturing one file sideways.
            let upward = from.rank() == 6 && to.rank() == 7 && (7..=9).contains(&delta);
            let downward = from.rank() == 1 && to.rank() == 0 && (-9..=-7).contains(&delta);
            if !upward && !downward {
                return Err(InvalidMove::PromotionShape { from, to });
            }
            let offset = if delta >= 0 { delta - 7 } else { delta + 9 };
            #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
            let dest = PROMOTION_BASE + 3 * piece.index() + offset as u8;
            Ok((from.index(), dest))
        }
    }
}

fn decode_unit(origin: u8, dest: u8) -> Result<Move, MalformedTcn> {
    let drop_piece = match origin {
        0..=63 => None,
        76..=78 => return Err(MalformedTcn::ReservedOriginCode(origin)),
        79..=84 => Piece::from_index(origin - DROP_BASE),
        _ => return Err(MalformedTcn::OriginNotASquare(origin)),
    };

    if dest >= PROMOTION_BASE {
        if drop_piece.is_some() {
            return Err(MalformedTcn::DropPromotion);
        }
        let piece = Piece::from_index((dest - PROMOTION_BASE) / 3)
            .ok_or(MalformedTcn::UnknownPromotionPiece(dest))?;
        let offset = i16::from((dest - 1) % 3) - 1;
        let direction = if is_lower_half_origin(origin) { -8 } else { 8 };
        let from = Square::from_index_unchecked(origin);
        let to = i16::from(origin) + direction + offset;
        let to = u8::try_from(to)
            .ok()
            .and_then(Square::from_index)
            .filter(|to| {
                let back_rank = if direction < 0 { 0 } else { 7 };
                to.rank() == back_rank && from.file().abs_diff(to.file()) <= 1
            })
            .ok_or(MalformedTcn::PromotionOffBoard { origin, dest })?;
        return Ok(Move::Promotion { from, to, piece });
    }

    let to = Square::from_index_unchecked(dest);
    Ok(match drop_piece {
        Some(piece) => Move::Drop { piece, to },
        None => Move::Normal {
            from: Square::from_index_unchecked(origin),
            to,
        },
    })
}

/// Whether an origin code sits in the board half where a promoting
/// pawn pushes toward lower indices (ranks 1–2 as seen by the codec).
const fn is_lower_half_origin(origin: u8) -> bool {
    origin < 16
}

fn symbol(code: u8) -> char {
    ALPHABET.as_bytes()[code as usize] as char
}

/// First index of `c` in the alphabet, matching the reference decoder:
/// the duplicated `'+'` always resolves to 82.
fn symbol_index(c: char) -> Result<u8, MalformedTcn> {
    ALPHABET
        .bytes()
        .position(|b| b as char == c)
        .map(|i| i as u8)
        .ok_or(MalformedTcn::UnknownSymbol(c))
}
