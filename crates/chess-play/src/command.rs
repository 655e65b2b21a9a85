//! Parsing of host input lines.

use chess_core::{Move, PieceKind, Square};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move request, e.g. `E2 E4`, `e7 e8 q` or `e2e4`.
    Move(Move),
    Promote(PieceKind),
    Undo,
    Reset,
    History,
    Board,
    Status,
    /// Let the engine move for the side to move.
    Ai,
    Save(PathBuf),
    Load(PathBuf),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Empty input")]
    Empty,
    #[error("Unknown command: {0} (type 'help')")]
    UnknownCommand(String),
    #[error("Invalid square: {0}")]
    InvalidSquare(String),
    #[error("Invalid promotion piece: {0} (use q, r, b or n)")]
    InvalidPromotion(String),
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),
}

pub const HELP: &str = "\
Commands:
  <from> <to> [q|r|b|n]   move a piece, e.g. E2 E4 or e7 e8 q
  promote <q|r|b|n>       choose the piece for a pawn on the last rank
  undo                    take back the last move
  reset                   start over from the initial position
  history                 list the moves played
  board                   show the board
  status                  show whose turn it is and the game status
  ai                      let the engine move for the side to move
  save <file>             save the game as JSON
  load <file>             load a saved game
  help                    show this help
  quit                    leave";

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or(ParseError::Empty)?;
        let rest: Vec<&str> = words.collect();

        let command = match head.to_ascii_lowercase().as_str() {
            "promote" => {
                let piece = rest.first().ok_or(ParseError::MissingArgument("piece"))?;
                Command::Promote(parse_promotion(piece)?)
            }
            "undo" => Command::Undo,
            "reset" => Command::Reset,
            "history" => Command::History,
            "board" => Command::Board,
            "status" => Command::Status,
            "ai" => Command::Ai,
            "save" => Command::Save(path_arg(&rest)?),
            "load" => Command::Load(path_arg(&rest)?),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return parse_move(head, &rest),
        };

        let extra = match command {
            Command::Promote(_) | Command::Save(_) | Command::Load(_) => rest.get(1),
            _ => rest.first(),
        };
        match extra {
            Some(word) => Err(ParseError::UnexpectedArgument(word.to_string())),
            None => Ok(command),
        }
    }
}

fn path_arg(rest: &[&str]) -> Result<PathBuf, ParseError> {
    rest.first()
        .map(PathBuf::from)
        .ok_or(ParseError::MissingArgument("file"))
}

fn parse_square(word: &str) -> Result<Square, ParseError> {
    Square::from_algebraic(word).ok_or_else(|| ParseError::InvalidSquare(word.to_string()))
}

fn parse_promotion(word: &str) -> Result<PieceKind, ParseError> {
    let mut chars = word.chars();
    match (chars.next().and_then(PieceKind::from_char), chars.next()) {
        (Some(kind), None) if kind.is_promotion_choice() => Ok(kind),
        _ => Err(ParseError::InvalidPromotion(word.to_string())),
    }
}

/// Accepts `e2 e4 [q]` as well as the joined `e2e4[q]`.
fn parse_move(head: &str, rest: &[&str]) -> Result<Command, ParseError> {
    let joined = matches!(head.len(), 4 | 5)
        && rest.is_empty()
        && head.is_ascii()
        && Square::from_algebraic(&head[..2]).is_some();
    let (from, to, promo, extra) = if joined {
        let promo = head.get(4..).filter(|p| !p.is_empty());
        (&head[..2], &head[2..4], promo, None)
    } else if head.len() == 2 {
        let to = rest.first().ok_or(ParseError::MissingArgument("destination square"))?;
        (head, *to, rest.get(1).copied(), rest.get(2))
    } else {
        return Err(ParseError::UnknownCommand(head.to_string()));
    };

    if let Some(word) = extra {
        return Err(ParseError::UnexpectedArgument(word.to_string()));
    }

    let from = parse_square(from)?;
    let to = parse_square(to)?;
    Ok(Command::Move(match promo {
        Some(p) => Move::with_promotion(from, to, parse_promotion(p)?),
        None => Move::new(from, to),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn parses_spaced_moves() {
        assert_eq!(
            "E2 E4".parse::<Command>(),
            Ok(Command::Move(Move::new(sq("e2"), sq("e4"))))
        );
        assert_eq!(
            "  e7   e8 n ".parse::<Command>(),
            Ok(Command::Move(Move::with_promotion(
                sq("e7"),
                sq("e8"),
                PieceKind::Knight
            )))
        );
    }

    #[test]
    fn parses_joined_moves() {
        assert_eq!(
            "g1f3".parse::<Command>(),
            Ok(Command::Move(Move::new(sq("g1"), sq("f3"))))
        );
        assert_eq!(
            "a7a8Q".parse::<Command>(),
            Ok(Command::Move(Move::with_promotion(
                sq("a7"),
                sq("a8"),
                PieceKind::Queen
            )))
        );
    }

    #[test]
    fn parses_controls() {
        assert_eq!("undo".parse::<Command>(), Ok(Command::Undo));
        assert_eq!("RESET".parse::<Command>(), Ok(Command::Reset));
        assert_eq!("ai".parse::<Command>(), Ok(Command::Ai));
        assert_eq!("promote r".parse::<Command>(), Ok(Command::Promote(PieceKind::Rook)));
        assert_eq!(
            "save game.json".parse::<Command>(),
            Ok(Command::Save(PathBuf::from("game.json")))
        );
        assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!("".parse::<Command>(), Err(ParseError::Empty));
        assert_eq!(
            "castle".parse::<Command>(),
            Err(ParseError::UnknownCommand("castle".to_string()))
        );
        assert_eq!(
            "e2 e9".parse::<Command>(),
            Err(ParseError::InvalidSquare("e9".to_string()))
        );
        assert_eq!(
            "e2".parse::<Command>(),
            Err(ParseError::MissingArgument("destination square"))
        );
        assert_eq!(
            "promote k".parse::<Command>(),
            Err(ParseError::InvalidPromotion("k".to_string()))
        );
        assert_eq!(
            "undo now".parse::<Command>(),
            Err(ParseError::UnexpectedArgument("now".to_string()))
        );
        assert_eq!(
            "load".parse::<Command>(),
            Err(ParseError::MissingArgument("file"))
        );
    }
}
