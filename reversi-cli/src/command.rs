//! Parsing of shell input lines.

use std::path::PathBuf;
use std::str::FromStr;

use reversi_core::{Coord, Piece};

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Place a piece: `3 4`, `3,4` or `(3,4)`.
    Place(Coord),
    Undo,
    /// Start over, optionally switching sides.
    Restart(Option<Piece>),
    /// Write the match record, to the default file if no path is given.
    Export(Option<PathBuf>),
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Command, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "" => Err("Empty command".to_string()),
            "undo" | "u" => Ok(Command::Undo),
            "restart" | "r" => {
                if rest.is_empty() {
                    Ok(Command::Restart(None))
                } else {
                    rest.parse::<Piece>()
                        .map(|piece| Command::Restart(Some(piece)))
                        .map_err(|e| e.to_string())
                }
            }
            "export" | "e" => Ok(Command::Export(
                (!rest.is_empty()).then(|| PathBuf::from(rest)),
            )),
            "show" | "s" => Ok(Command::Show),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            _ => line
                .parse::<Coord>()
                .map(Command::Place)
                .map_err(|e| e.to_string()),
        }
    }
}

pub const HELP: &str = "\
Commands:
  <row> <col>        place a piece (also `r,c` or `(r,c)`)
  undo               take back your last move and the AI's reply
  restart [one|two]  start a new round, optionally switching sides
  export [path]      save the match record as JSON
  show               redraw the board
  help               this text
  quit               leave";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_placements() {
        let at = Coord::from_row_col(3, 4);
        assert_eq!("3 4".parse(), Ok(Command::Place(at)));
        assert_eq!("3,4".parse(), Ok(Command::Place(at)));
        assert_eq!("  (3,4) ".parse(), Ok(Command::Place(at)));
    }

    #[test]
    fn test_parse_words() {
        assert_eq!("undo".parse(), Ok(Command::Undo));
        assert_eq!("U".parse(), Ok(Command::Undo));
        assert_eq!("restart".parse(), Ok(Command::Restart(None)));
        assert_eq!("restart two".parse(), Ok(Command::Restart(Some(Piece::Two))));
        assert_eq!("export".parse(), Ok(Command::Export(None)));
        assert_eq!(
            "export out/game.json".parse(),
            Ok(Command::Export(Some(PathBuf::from("out/game.json"))))
        );
        assert_eq!("quit".parse(), Ok(Command::Quit));
        assert_eq!("?".parse(), Ok(Command::Help));
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<Command>().is_err());
        assert!("8 8".parse::<Command>().is_err());
        assert!("fly".parse::<Command>().is_err());
        assert!("restart three".parse::<Command>().is_err());
    }

    #[test]
    fn test_help_descriptions_line_up() {
        let columns: Vec<usize> = HELP
            .lines()
            .skip(1)
            .map(|line| {
                let entry = line.trim_start();
                let name_end = entry.find("  ").unwrap();
                let gap = entry[name_end..].len() - entry[name_end..].trim_start().len();
                line.len() - entry.len() + name_end + gap
            })
            .collect();
        assert_eq!(columns.len(), 7);
        assert!(columns.iter().all(|&col| col == columns[0]), "{:?}", columns);
    }
}
