//! FEN (Forsyth-Edwards Notation) parsing and serialization.
//!
//! Only the text is checked here: eight ranks of eight squares, known piece
//! letters, at most one king per side and well-formed remaining fields. The
//! engine turns a [`FenParser`] into a board.

use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 4 or 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// The checked fields of a FEN record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    /// Piece placement, rank 8 first.
    pub piece_placement: String,
    /// `'w'` or `'b'`.
    pub active_color: char,
    /// `"-"` or a subset of `"KQkq"`.
    pub castling: String,
    /// `"-"` or a square on rank 3 or 6.
    pub en_passant: String,
    /// 0 when the clock fields are omitted.
    pub halfmove_clock: u32,
    /// 1 when the clock fields are omitted.
    pub fullmove_number: u32,
}

const PIECE_LETTERS: &str = "pnbrqkPNBRQK";

impl FenParser {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN record. The two clock fields may be left off together.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let (board, color, castling, en_passant, clocks) = match fields.as_slice() {
            [b, c, k, e] => (*b, *c, *k, *e, None),
            [b, c, k, e, half, full] => (*b, *c, *k, *e, Some((*half, *full))),
            other => return Err(FenError::InvalidPartCount(other.len())),
        };

        check_placement(board)?;
        let active_color = parse_color(color)?;
        check_castling(castling)?;
        check_en_passant(en_passant)?;
        let (halfmove_clock, fullmove_number) = match clocks {
            Some((half, full)) => parse_clocks(half, full)?,
            None => (0, 1),
        };

        Ok(FenParser {
            piece_placement: board.to_owned(),
            active_color,
            castling: castling.to_owned(),
            en_passant: en_passant.to_owned(),
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Writes all six fields back out.
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.piece_placement,
            self.active_color,
            self.castling,
            self.en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

fn check_placement(board: &str) -> Result<(), FenError> {
    let bad = |msg: String| Err(FenError::InvalidPiecePlacement(msg));

    let rows: Vec<&str> = board.split('/').collect();
    if rows.len() != 8 {
        return bad(format!("expected 8 ranks, got {}", rows.len()));
    }

    let mut white_kings = 0;
    let mut black_kings = 0;
    for (row, text) in rows.iter().enumerate() {
        let rank = 8 - row;
        let mut width = 0;
        for c in text.chars() {
            width += match c {
                '1'..='8' => c as u32 - '0' as u32,
                'K' => {
                    white_kings += 1;
                    1
                }
                'k' => {
                    black_kings += 1;
                    1
                }
                _ if PIECE_LETTERS.contains(c) => 1,
                _ => return bad(format!("invalid character '{}' in rank {}", c, rank)),
            };
        }
        if width != 8 {
            return bad(format!("rank {} covers {} squares", rank, width));
        }
    }

    if white_kings > 1 || black_kings > 1 {
        return bad("more than one king of a color".to_owned());
    }
    Ok(())
}

fn parse_color(field: &str) -> Result<char, FenError> {
    match field {
        "w" => Ok('w'),
        "b" => Ok('b'),
        other => Err(FenError::InvalidActiveColor(other.to_owned())),
    }
}

fn check_castling(field: &str) -> Result<(), FenError> {
    if field == "-" {
        return Ok(());
    }
    match field.chars().find(|c| !"KQkq".contains(*c)) {
        Some(c) => Err(FenError::InvalidCastlingRights(format!(
            "invalid character '{}'",
            c
        ))),
        None => Ok(()),
    }
}

fn check_en_passant(field: &str) -> Result<(), FenError> {
    let valid = field == "-"
        || matches!(
            field.as_bytes(),
            [b'a'..=b'h', b'3' | b'6']
        );
    if valid {
        Ok(())
    } else {
        Err(FenError::InvalidEnPassantSquare(field.to_owned()))
    }
}

fn parse_clocks(half: &str, full: &str) -> Result<(u32, u32), FenError> {
    let halfmove = half
        .parse::<u32>()
        .map_err(|_| FenError::InvalidHalfmoveClock(half.to_owned()))?;
    // Move numbering starts at 1.
    let fullmove = full
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| FenError::InvalidFullmoveNumber(full.to_owned()))?;
    Ok((halfmove, fullmove))
}
