//! Chess position representation.

use chess_core::{Color, FenError, FenParser, Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Castling rights flags.
///
/// Rights are only ever removed. Nothing in the engine sets a flag once it
/// has been cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove_kingside(color);
        self.remove_queenside(color);
    }

    /// Removes kingside castling for a color.
    #[inline]
    pub fn remove_kingside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_KINGSIDE,
            Color::Black => !Self::BLACK_KINGSIDE,
        };
        self.0 &= mask;
    }

    /// Removes queenside castling for a color.
    #[inline]
    pub fn remove_queenside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_QUEENSIDE,
            Color::Black => !Self::BLACK_QUEENSIDE,
        };
        self.0 &= mask;
    }

    /// Removes whichever right depends on a rook standing on `sq`.
    ///
    /// Used both when a rook leaves its home corner and when something
    /// lands on it.
    pub fn remove_for_rook_square(&mut self, sq: Square) {
        match sq {
            Square::H1 => self.remove_kingside(Color::White),
            Square::A1 => self.remove_queenside(Color::White),
            Square::H8 => self.remove_kingside(Color::Black),
            Square::A8 => self.remove_queenside(Color::Black),
            _ => {}
        }
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Returns true if every flag set in `self` is also set in `earlier`.
    #[inline]
    pub const fn is_subset_of(self, earlier: CastlingRights) -> bool {
        self.0 & !earlier.0 == 0
    }
}

/// Complete chess position state.
///
/// Serialized as its FEN string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Position {
    /// Piece placement, indexed by [`Square::index`].
    grid: [Option<Piece>; 64],

    /// The side to move.
    pub side_to_move: Color,

    /// Castling rights.
    pub castling: CastlingRights,

    /// En passant target square (if any): the square a pawn skipped over on
    /// the previous ply.
    pub en_passant: Option<Square>,

    /// Halfmove clock (plies since the last pawn move or capture).
    pub halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

impl Position {
    /// Creates an empty position.
    pub fn empty() -> Self {
        Position {
            grid: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut position = Position::empty();
        for color in Color::BOTH {
            for (col, kind) in BACK_RANK.iter().enumerate() {
                let col = col as u8;
                if let Some(sq) = Square::at(color.back_rank(), col) {
                    position.set_piece(sq, Some(Piece::new(color, *kind)));
                }
                if let Some(sq) = Square::at(color.pawn_start_row(), col) {
                    position.set_piece(sq, Some(Piece::new(color, PieceKind::Pawn)));
                }
            }
        }
        position.castling = CastlingRights::ALL;
        position
    }

    /// Creates a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;
        let mut position = Position::empty();

        // FEN lists rank 8 first, which is grid row 0.
        for (row, rank_str) in parsed.piece_placement.split('/').enumerate() {
            let mut col = 0u8;
            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    col += digit as u8;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    if let Some(sq) = Square::at(row as u8, col) {
                        position.set_piece(sq, Some(piece));
                    }
                    col += 1;
                }
            }
        }

        position.side_to_move = match parsed.active_color {
            'b' => Color::Black,
            _ => Color::White,
        };

        let mut castling = 0u8;
        for c in parsed.castling.chars() {
            match c {
                'K' => castling |= CastlingRights::WHITE_KINGSIDE,
                'Q' => castling |= CastlingRights::WHITE_QUEENSIDE,
                'k' => castling |= CastlingRights::BLACK_KINGSIDE,
                'q' => castling |= CastlingRights::BLACK_QUEENSIDE,
                _ => {}
            }
        }
        position.castling = CastlingRights::new(castling);

        position.en_passant = if parsed.en_passant == "-" {
            None
        } else {
            Square::from_algebraic(&parsed.en_passant)
        };

        position.halfmove_clock = parsed.halfmove_clock;
        position.fullmove_number = parsed.fullmove_number;

        Ok(position)
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for row in 0..8u8 {
            let mut empty_count = 0;
            for col in 0..8u8 {
                match Square::at(row, col).and_then(|sq| self.piece_at(sq)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.to_fen_char());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if row < 7 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(self.side_to_move.to_fen_char());

        fen.push(' ');
        if self.castling.raw() == 0 {
            fen.push('-');
        } else {
            if self.castling.can_castle_kingside(Color::White) {
                fen.push('K');
            }
            if self.castling.can_castle_queenside(Color::White) {
                fen.push('Q');
            }
            if self.castling.can_castle_kingside(Color::Black) {
                fen.push('k');
            }
            if self.castling.can_castle_queenside(Color::Black) {
                fen.push('q');
            }
        }

        fen.push(' ');
        match self.en_passant {
            Some(sq) => fen.push_str(&sq.to_algebraic()),
            None => fen.push('-'),
        }

        fen.push(' ');
        fen.push_str(&self.halfmove_clock.to_string());
        fen.push(' ');
        fen.push_str(&self.fullmove_number.to_string());

        fen
    }

    /// Returns the piece at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.grid[sq.index() as usize]
    }

    /// Returns true if no piece stands on `sq`.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Places `piece` on `sq` (or clears it), returning what stood there.
    #[inline]
    pub fn set_piece(&mut self, sq: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.grid[sq.index() as usize], piece)
    }

    /// Iterates over the pieces of `color` with their squares.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| {
            self.piece_at(sq)
                .filter(|piece| piece.is(color))
                .map(|piece| (sq, piece))
        })
    }

    /// Returns the square of the king of `color`, if it is on the board.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Returns the number of occupied squares.
    pub fn occupied_count(&self) -> usize {
        self.grid.iter().filter(|cell| cell.is_some()).count()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.to_fen()
    }
}

impl TryFrom<String> for Position {
    type Error = FenError;

    fn try_from(fen: String) -> Result<Self, Self::Error> {
        Position::from_fen(&fen)
    }
}

/// Board diagram with rank 8 at the top, empty squares shown as `.`.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8u8 {
                let c = Square::at(row, col)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', Piece::to_fen_char);
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
