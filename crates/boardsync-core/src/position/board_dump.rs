//! ハードウェアのボードダンプ（64升分の駒コード）の解析
//!
//! 電子チェス盤は盤面を 8段目a筋 → 1段目h筋 の順に 1升1バイトの駒コードで返す。
//! 送受信の枠（ヘッダー・長さ）は扱わず、64バイトの本体だけを受け取る。

use super::Position;
use crate::types::{Color, File, Piece, PieceKind, Rank, Square};

/// ボードダンプ本体の長さ
pub const BOARD_DUMP_LEN: usize = 64;

/// 駒コードから駒へ。0 と未知のコードは空き升
fn piece_from_code(code: u8) -> Option<Piece> {
    let (color, index) = match code {
        1..=6 => (Color::White, code - 1),
        7..=12 => (Color::Black, code - 7),
        _ => return None,
    };
    let kind = match index {
        0 => PieceKind::Pawn,
        1 => PieceKind::Rook,
        2 => PieceKind::Knight,
        3 => PieceKind::Bishop,
        4 => PieceKind::King,
        _ => PieceKind::Queen,
    };
    Some(Piece::new(color, kind))
}

/// ボードダンプを局面に変換する。長さが 64 でなければ空の局面
pub fn decode_board_dump(payload: &[u8]) -> Position {
    if payload.len() != BOARD_DUMP_LEN {
        log::debug!("board dump has {} bytes (expected {BOARD_DUMP_LEN})", payload.len());
        return Position::empty();
    }
    let pieces = payload.iter().enumerate().filter_map(|(i, &code)| {
        let piece = piece_from_code(code)?;
        let rank = Rank::ALL[Rank::NUM - 1 - i / File::NUM];
        let file = File::ALL[i % File::NUM];
        Some(piece.at(Square::new(file, rank)))
    });
    Position::from_pieces(pieces)
}

/// ボードダンプを盤面記法に変換する
pub fn board_dump_to_text(payload: &[u8]) -> String {
    decode_board_dump(payload).to_board_text()
}
