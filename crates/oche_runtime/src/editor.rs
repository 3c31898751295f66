//! Terminal input for the REPL.
//!
//! [`Repl`](crate::Repl) only talks to a [`LineEditor`]. The binary plugs in
//! [`RustylineEditor`]; tests feed scripted lines instead.

use std::borrow::Cow;
use std::fmt::Display;

use oche_foundation::{Error, ErrorKind, Result};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::{Completer, Config, Context, Editor, Helper, Hinter, Validator};

const HISTORY_LIMIT: usize = 500;

/// What one prompt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadResult {
    /// The text the user entered.
    Line(String),
    /// Ctrl+C: abandon the current line and prompt again.
    Cancelled,
    /// Ctrl+D or end of input.
    Closed,
}

/// Source of REPL input lines.
pub trait LineEditor {
    /// Prompts for one line.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the terminal cannot be read.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Remembers a line for history navigation.
    fn add_history(&mut self, line: &str);

    /// Replaces the command words offered on tab.
    fn set_commands(&mut self, commands: Vec<String>);
}

fn terminal_error(e: impl Display) -> Error {
    Error::new(ErrorKind::Internal(format!("terminal: {e}")))
}

#[derive(Helper, Completer, Hinter, Validator)]
struct OcheHelper {
    #[rustyline(Completer)]
    completer: CommandCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
    color: bool,
}

impl OcheHelper {
    fn paint<'t>(&self, code: &str, text: &'t str) -> Cow<'t, str> {
        if self.color {
            Cow::Owned(format!("\x1b[{code}m{text}\x1b[0m"))
        } else {
            Cow::Borrowed(text)
        }
    }
}

impl Highlighter for OcheHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            self.paint("1;33", prompt)
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        self.paint("2", hint)
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        false
    }
}

/// Completes the command word at the start of a line.
#[derive(Debug, Default)]
struct CommandCompleter {
    commands: Vec<String>,
}

impl CommandCompleter {
    fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let head = &line[..pos];
        let start = head.len() - head.trim_start().len();
        let word = &head[start..];
        if word.contains(char::is_whitespace) {
            return (pos, Vec::new());
        }

        let pairs = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(word))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        (start, pairs)
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(line, pos))
    }
}

/// [`LineEditor`] backed by rustyline, with command completion and
/// history hints.
pub struct RustylineEditor {
    editor: Editor<OcheHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Opens the terminal editor.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if rustyline cannot attach to the terminal.
    pub fn new(color: bool) -> Result<Self> {
        let config = Config::builder()
            .max_history_size(HISTORY_LIMIT)
            .map_err(terminal_error)?
            .auto_add_history(false)
            .build();

        let mut editor = Editor::with_config(config).map_err(terminal_error)?;
        editor.set_helper(Some(OcheHelper {
            completer: CommandCompleter::default(),
            hinter: HistoryHinter::new(),
            color,
        }));
        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Cancelled),
            Err(ReadlineError::Eof) => Ok(ReadResult::Closed),
            Err(e) => Err(terminal_error(e)),
        }
    }

    fn add_history(&mut self, line: &str) {
        // a rejected entry (duplicate, blank) is not worth reporting
        let _ = self.editor.add_history_entry(line);
    }

    fn set_commands(&mut self, commands: Vec<String>) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.completer.commands = commands;
        }
    }
}
