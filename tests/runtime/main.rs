//! Integration tests for Layer 3: Runtime
//!
//! Drives the REPL through a scripted editor and through script files.

use std::fs;
use std::path::PathBuf;

use oche_foundation::{ErrorKind, Result};
use oche_runtime::{Command, LineEditor, ReadResult, Repl, Reply, RuntimeConfig};

/// Feeds a fixed list of lines, then EOF.
struct ScriptedEditor {
    lines: std::vec::IntoIter<String>,
}

impl ScriptedEditor {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .into_iter(),
        }
    }
}

impl LineEditor for ScriptedEditor {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        Ok(self.lines.next().map_or(ReadResult::Closed, ReadResult::Line))
    }

    fn add_history(&mut self, _line: &str) {}

    fn set_commands(&mut self, _commands: Vec<String>) {}
}

fn repl(lines: &[&str]) -> Repl<ScriptedEditor> {
    let config = RuntimeConfig::default().with_banner(false).with_color(false);
    Repl::with_editor(ScriptedEditor::new(lines), config).unwrap()
}

fn script(name: &str, body: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("oche-{}-{name}", std::process::id()));
    fs::write(&path, body).unwrap();
    path
}

// =============================================================================
// Commands
// =============================================================================

#[test]
fn every_command_word_parses() {
    let parsed: Vec<Command> = [
        "new g1",
        "player alice 50",
        "start",
        "score 60",
        "board",
        "players",
        "help",
        "quit",
    ]
    .iter()
    .map(|line| Command::parse(line).unwrap())
    .collect();
    assert_eq!(parsed.len(), oche_runtime::COMMANDS.len());
}

#[test]
fn full_match_through_eval() {
    let mut repl = repl(&[]);
    for line in ["new g1", "player alice 50", "player bob 40", "start"] {
        repl.eval(line).unwrap();
    }

    let Reply::Text(board) = repl.eval("score 60").unwrap() else {
        panic!("scoring should render the board");
    };
    assert!(board.contains("target 60"));
    assert!(board.lines().nth(1).unwrap().starts_with("> bob"));

    for line in ["score 20", "score 60", "score 20", "score 60"] {
        repl.eval(line).unwrap();
    }
    let Reply::Text(board) = repl.eval("score 20").unwrap() else {
        panic!("scoring should render the board");
    };
    assert!(board.contains("alice wins"));
    assert!(board.contains("out: bob"));

    let err = repl.eval("score 60").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Precondition(_)));
}

#[test]
fn run_drives_the_session() {
    let mut repl = repl(&["new g1", "player alice 50", "bogus", "player bob 40", "start"]);
    repl.run().unwrap();

    let game = repl.session().game().unwrap();
    assert!(game.is_started());
    assert_eq!(game.players(repl.session().store()).unwrap().len(), 2);
}

// =============================================================================
// Scripts
// =============================================================================

#[test]
fn script_files_run_line_by_line() {
    let path = script(
        "setup.oche",
        "# two player match\nnew g1\nplayer alice 50\n\nplayer bob 40\nstart\n",
    );
    let mut repl = repl(&[]);

    assert!(repl.eval_file(&path).unwrap());
    assert!(repl.session().game().unwrap().is_started());
    fs::remove_file(path).unwrap();
}

#[test]
fn script_errors_carry_location() {
    let path = script("broken.oche", "new g1\nstart\n");
    let mut repl = repl(&[]);

    let err = repl.eval_file(&path).unwrap_err();
    let context = err.context.unwrap();
    assert_eq!(context.line, Some(2));
    assert!(context.source.unwrap().ends_with("broken.oche"));
    fs::remove_file(path).unwrap();
}

#[test]
fn script_quit_stops_early() {
    let path = script("quit.oche", "new g1\nquit\nplayer alice 50\n");
    let mut repl = repl(&[]);

    assert!(!repl.eval_file(&path).unwrap());
    let game = repl.session().game().unwrap();
    assert!(game.players(repl.session().store()).unwrap().is_empty());
    fs::remove_file(path).unwrap();
}

#[test]
fn missing_script_is_an_error() {
    let mut repl = repl(&[]);
    let err = repl
        .eval_file(&std::env::temp_dir().join("oche-no-such-script"))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Internal(_)));
}
