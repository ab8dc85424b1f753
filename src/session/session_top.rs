//! Line-oriented session front-end and command loop.
//!
//! Parses text commands into `SessionCommand`, applies them to one `Board`,
//! and writes a short human-readable answer (plus the JSON snapshot when
//! asked to). One command is processed at a time, which is all the board's
//! single-owner contract needs.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use tracing::warn;

use crate::{
    board::{Board, Placement},
    board_location::SquareId,
    chess_errors::ChessErrors,
    piece_class::PieceClass,
    piece_team::PieceTeam,
    presets::Preset,
    utils::render_game_state::{render_game_state, render_status},
};

/// One parsed session command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Preset(Preset),
    Add(Placement),
    Remove(SquareId),
    Start,
    Move(SquareId, SquareId),
    Promote(PieceClass),
    Moves,
    Show,
    Json,
    Reset,
    Quit,
}

fn argument<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, ChessErrors> {
    parts
        .next()
        .ok_or(ChessErrors::MissingArgument { command, argument })
}

impl FromStr for SessionCommand {
    type Err = ChessErrors;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let trimmed = line.trim();
        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default().to_ascii_lowercase();

        let command = match cmd.as_str() {
            "preset" => {
                let rest: Vec<&str> = parts.collect();
                if rest.is_empty() {
                    return Err(ChessErrors::MissingArgument {
                        command: "preset",
                        argument: "name",
                    });
                }
                SessionCommand::Preset(rest.join(" ").parse()?)
            }
            "add" => {
                let square = argument(&mut parts, "add", "square")?.parse()?;
                let colour = argument(&mut parts, "add", "colour")?.parse()?;
                let kind = argument(&mut parts, "add", "kind")?.parse()?;
                SessionCommand::Add(Placement::new(square, kind, colour))
            }
            "remove" => SessionCommand::Remove(argument(&mut parts, "remove", "square")?.parse()?),
            "start" => SessionCommand::Start,
            "move" => {
                let source = argument(&mut parts, "move", "source")?.parse()?;
                let target = argument(&mut parts, "move", "target")?.parse()?;
                SessionCommand::Move(source, target)
            }
            "promote" => SessionCommand::Promote(argument(&mut parts, "promote", "kind")?.parse()?),
            "moves" => SessionCommand::Moves,
            "show" => SessionCommand::Show,
            "json" => SessionCommand::Json,
            "reset" => SessionCommand::Reset,
            "quit" | "exit" => SessionCommand::Quit,
            _ => return Err(ChessErrors::InvalidCommand(trimmed.to_string())),
        };
        Ok(command)
    }
}

/// Options the session binary passes in.
#[derive(Clone, Debug, Default)]
pub struct SessionOptions {
    /// Echo the JSON snapshot after every command that changes the board.
    pub echo_json: bool,
}

/// Board plus session options.
pub struct SessionState {
    board: Board,
    options: SessionOptions,
}

impl SessionState {
    pub fn new(board: Board, options: SessionOptions) -> Self {
        SessionState { board, options }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Handles one input line. Returns true when the session should end.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        if line.trim().is_empty() {
            return Ok(false);
        }
        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "error: {err}")?;
                return Ok(false);
            }
        };

        let mut changed = true;
        match command {
            SessionCommand::Preset(preset) => {
                self.board.load_preset(preset);
                writeln!(out, "loaded {preset}")?;
            }
            SessionCommand::Add(placement) => {
                if self.board.game_state().in_progress {
                    writeln!(out, "error: the board is frozen while a game runs")?;
                    changed = false;
                } else {
                    self.board.add_piece(&[placement]);
                    writeln!(
                        out,
                        "added {} {} on {}",
                        placement.colour, placement.kind, placement.square
                    )?;
                }
            }
            SessionCommand::Remove(square) => {
                if self.board.game_state().in_progress {
                    writeln!(out, "error: the board is frozen while a game runs")?;
                    changed = false;
                } else {
                    self.board.remove_piece(square);
                    writeln!(out, "cleared {square}")?;
                }
            }
            SessionCommand::Start => match self.board.start_game() {
                Ok(()) => writeln!(out, "{}", render_status(&self.board))?,
                Err(err) => {
                    warn!(%err, "start refused");
                    writeln!(out, "error: {err}")?;
                    changed = false;
                }
            },
            SessionCommand::Move(source, target) => {
                let report = self.board.request_move(source, target);
                match report.action {
                    Some(action) if report.succeeded => {
                        writeln!(out, "{action}: {}", render_status(&self.board))?
                    }
                    _ => {
                        writeln!(out, "illegal move {source} {target}")?;
                        changed = false;
                    }
                }
            }
            SessionCommand::Promote(kind) => {
                if self.board.promote_piece(kind) {
                    writeln!(out, "{}", render_status(&self.board))?;
                } else {
                    writeln!(out, "no promotion to {kind}")?;
                    changed = false;
                }
            }
            SessionCommand::Moves => {
                let team: PieceTeam = self.board.game_state().current_player;
                let moves: Vec<String> = self
                    .board
                    .legal_moves(team)
                    .into_iter()
                    .map(|(source, target)| format!("{source}{target}"))
                    .collect();
                writeln!(out, "{team}: {}", moves.join(" "))?;
                changed = false;
            }
            SessionCommand::Show => {
                writeln!(out, "{}", render_game_state(&self.board))?;
                writeln!(out, "{}", render_status(&self.board))?;
                changed = false;
            }
            SessionCommand::Json => {
                self.write_snapshot(out)?;
                changed = false;
            }
            SessionCommand::Reset => {
                self.board.reset();
                writeln!(out, "reset")?;
            }
            SessionCommand::Quit => return Ok(true),
        }

        if changed && self.options.echo_json {
            self.write_snapshot(out)?;
        }
        Ok(false)
    }

    fn write_snapshot(&self, out: &mut impl Write) -> io::Result<()> {
        let json = serde_json::to_string(&self.board).map_err(io::Error::other)?;
        writeln!(out, "{json}")
    }
}

/// Reads commands from stdin until `quit` or end of input.
pub fn run_stdio_loop(board: Board, options: SessionOptions) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session = SessionState::new(board, options);

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = session.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(id: &str) -> SquareId {
        id.parse().unwrap()
    }

    fn run(session: &mut SessionState, line: &str) -> String {
        let mut out = Vec::new();
        session.handle_command(line, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(
            "move e2 e4".parse::<SessionCommand>().unwrap(),
            SessionCommand::Move(sq("E2"), sq("E4"))
        );
        assert_eq!(
            "add A8 black king".parse::<SessionCommand>().unwrap(),
            SessionCommand::Add(Placement::new(sq("A8"), PieceClass::King, PieceTeam::Black))
        );
        assert_eq!(
            "preset shuffled 9".parse::<SessionCommand>().unwrap(),
            SessionCommand::Preset(Preset::Shuffled { seed: 9 })
        );
        assert!(matches!(
            "move e2".parse::<SessionCommand>(),
            Err(ChessErrors::MissingArgument { command: "move", .. })
        ));
        assert!(matches!(
            "fly e2".parse::<SessionCommand>(),
            Err(ChessErrors::InvalidCommand(_))
        ));
        assert!(matches!(
            "promote emperor".parse::<SessionCommand>(),
            Err(ChessErrors::InvalidPieceClass(_))
        ));
    }

    #[test]
    fn plays_a_short_game() {
        let mut session = SessionState::new(Board::new(), SessionOptions::default());
        assert_eq!(run(&mut session, "preset standard"), "loaded standard\n");
        assert_eq!(run(&mut session, "start"), "white to move\n");
        assert_eq!(run(&mut session, "move E2 E4"), "move-self: black to move\n");
        assert_eq!(run(&mut session, "move E2 E4"), "illegal move E2 E4\n");
        assert_eq!(run(&mut session, "move D7 D5"), "move-self: white to move\n");
        assert_eq!(run(&mut session, "move E4 D5"), "capture: black to move\n");
        assert!(run(&mut session, "moves").starts_with("black: "));
        assert!(!run(&mut session, "quit").contains("error"));
    }

    #[test]
    fn reports_setup_errors() {
        let mut session = SessionState::new(Board::new(), SessionOptions::default());
        let answer = run(&mut session, "start");
        assert!(answer.starts_with("error: a game needs exactly one king per side"));
        assert!(run(&mut session, "teleport").starts_with("error: unknown command"));
    }

    #[test]
    fn echoes_json_snapshots() {
        let options = SessionOptions { echo_json: true };
        let mut session = SessionState::new(Board::new(), options);
        let answer = run(&mut session, "add E1 white king");
        let json_line = answer.lines().nth(1).unwrap();
        let value: serde_json::Value = serde_json::from_str(json_line).unwrap();
        assert_eq!(value["squares"][4]["id"], "E1");
        assert_eq!(value["squares"][4]["piece"], "king");
        assert_eq!(value["gameState"]["currentPlayer"], "white");
    }
}
