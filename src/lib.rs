//! TCN ("Tiny Chess Notation") codec.
//!
//! TCN packs every chess move into exactly two characters of an
//! 85-symbol alphabet, so a whole game is a short delimiter-free
//! string. This crate provides the bidirectional mapping between that
//! encoding and structured [`Move`] values, plus a bridge that
//! converts whole games between TCN and PGN movetext using shakmaty
//! as the rules engine.
//!
//! The codec itself never checks legality: it only cares about the
//! shape of a move (origin, destination, optional promotion or drop)
//! and how to pack it. Everything is a pure function; there is no
//! shared state and every operation runs in one pass over its input.
//!
//! # Examples
//!
//! ```
//! use chess_tcn::{decode_tcn, encode_tcn, Move};
//!
//! let m = Move::Normal {
//!     from: "e2".parse()?,
//!     to: "e4".parse()?,
//! };
//! let tcn = encode_tcn(&[m])?;
//! assert_eq!(tcn, "mC");
//! assert_eq!(decode_tcn(&tcn)?, vec![m]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Converting a game to and from PGN:
//!
//! ```
//! let tcn = chess_tcn::pgn_to_tcn("1. e4 e5 2. Nf3 Nc6")?;
//! assert_eq!(tcn, "mC0Kgv5Q");
//! assert_eq!(chess_tcn::tcn_to_pgn(&tcn)?, "1. e4 e5 2. Nf3 Nc6");
//! # Ok::<(), chess_tcn::PgnBridgeError>(())
//! ```

pub mod pgn_bridge;
pub mod square;
pub mod tcn_codec;

pub use pgn_bridge::{pgn_to_tcn, tcn_to_pgn, PgnBridgeError};
pub use square::{InvalidSquare, Square};
pub use tcn_codec::{decode_tcn, encode_tcn, InvalidMove, MalformedTcn, Move, Piece};
