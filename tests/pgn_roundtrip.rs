//! End-to-end tests for the TCN <-> PGN bridge.

use chess_tcn::{decode_tcn, encode_tcn, pgn_to_tcn, tcn_to_pgn, Move, PgnBridgeError};

#[test]
fn pgn_to_tcn_produces_an_even_length_tcn_string() {
    let tcn = pgn_to_tcn("1. e4 e5 2. Nf3 Nc6").unwrap();
    assert!(!tcn.is_empty());
    assert_eq!(tcn.len() % 2, 0);
    assert_eq!(tcn, "mC0Kgv5Q");
}

#[test]
fn tcn_to_pgn_reproduces_the_original_movetext() {
    let pgn = "1. e4 e5 2. Nf3 Nc6";
    let tcn = pgn_to_tcn(pgn).unwrap();
    assert_eq!(tcn_to_pgn(&tcn).unwrap(), pgn);
}

#[test]
fn four_symbols_decode_to_exactly_two_moves() {
    let moves = decode_tcn("mC0K").unwrap();
    assert_eq!(moves.len(), 2);
    assert_eq!(moves[0].to_string(), "e2e4");
    assert_eq!(moves[1].to_string(), "e7e5");
}

#[test]
fn castling_survives_the_round_trip() {
    let pgn = "1. e4 e5 2. Nf3 Nc6 3. Bb5 a6 4. Ba4 Nf6 5. O-O";
    let tcn = pgn_to_tcn(pgn).unwrap();
    assert_eq!(tcn, "mC0Kgv5QfHWOHy!Teg");
    assert_eq!(tcn_to_pgn(&tcn).unwrap(), pgn);
}

#[test]
fn promotion_survives_the_round_trip() {
    let pgn = "1. e4 d5 2. exd5 c6 3. dxc6 e6 4. cxb7 e5 5. bxa8=Q";
    let tcn = pgn_to_tcn(pgn).unwrap();
    assert_eq!(tcn, "mCZJCJYQJQ0SQXSKX{");
    assert_eq!(tcn_to_pgn(&tcn).unwrap(), pgn);
}

#[test]
fn headers_comments_and_variations_are_ignored() {
    let pgn = "[Event \"Casual game\"]\n[Result \"*\"]\n\n1. e4 {king's pawn} e5 (1... c5) 2. Nf3 Nc6 *";
    assert_eq!(pgn_to_tcn(pgn).unwrap(), "mC0Kgv5Q");
}

#[test]
fn unparseable_movetext_is_an_error() {
    let err = pgn_to_tcn("invalid pgn").unwrap_err();
    assert!(matches!(err, PgnBridgeError::UnparseableSan { .. }), "{err}");
}

#[test]
fn legal_san_in_an_illegal_position_is_an_error() {
    // Both sides would need to have moved a pawn first.
    let err = pgn_to_tcn("1. Qh5").unwrap_err();
    assert!(matches!(err, PgnBridgeError::IllegalSan(_)), "{err}");
}

#[test]
fn well_formed_but_illegal_tcn_is_an_error() {
    // a1a8: the rook cannot pass through its own pawn.
    let tcn = encode_tcn(&[Move::Normal {
        from: "a1".parse().unwrap(),
        to: "a8".parse().unwrap(),
    }])
    .unwrap();
    let err = tcn_to_pgn(&tcn).unwrap_err();
    assert!(matches!(err, PgnBridgeError::IllegalMove(_)), "{err}");
}

#[test]
fn drops_are_illegal_in_standard_chess() {
    // Structurally valid TCN, but no standard position admits a drop.
    let err = tcn_to_pgn("-C").unwrap_err();
    assert!(matches!(err, PgnBridgeError::IllegalMove(_)), "{err}");
}

#[test]
fn malformed_tcn_is_rejected_before_reaching_the_engine() {
    let err = tcn_to_pgn("mCa").unwrap_err();
    assert!(matches!(err, PgnBridgeError::MalformedTcn(_)), "{err}");
}

#[test]
fn empty_inputs_convert_to_empty_outputs() {
    assert_eq!(pgn_to_tcn("").unwrap(), "");
    assert_eq!(tcn_to_pgn("").unwrap(), "");
}
