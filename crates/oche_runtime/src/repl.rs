//! The main REPL implementation.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use oche_foundation::{Error, ErrorKind, Result};
use tracing::{debug, warn};

use crate::config::RuntimeConfig;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::Session;

/// Command words, in the order `help` lists them.
pub const COMMANDS: [&str; 8] = [
    "new", "player", "start", "score", "board", "players", "help", "quit",
];

/// A parsed REPL command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `new <id>`: create a match and make it current.
    New(String),
    /// `player <name> <splash>`: add a player to the current match.
    Player {
        /// Player name.
        name: String,
        /// Splash score used for the throwing order.
        splash: i64,
    },
    /// `start`: start the current match.
    Start,
    /// `score <n>`: score a round for the player due to throw.
    Score(i64),
    /// `board`: show the scoreboard.
    Board,
    /// `players`: list players and their rounds.
    Players,
    /// `help`: list commands.
    Help,
    /// `quit`: leave the REPL.
    Quit,
}

impl Command {
    /// Parses one input line.
    ///
    /// # Errors
    ///
    /// Returns `Precondition` naming the problem for unknown commands or bad
    /// arguments.
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(Error::precondition("empty command"));
        };
        let args: Vec<&str> = words.collect();

        let command = match (head, args.as_slice()) {
            ("new", [id]) => Self::New((*id).to_string()),
            ("player", [name, splash]) => Self::Player {
                name: (*name).to_string(),
                splash: parse_number("splash", splash)?,
            },
            ("start", []) => Self::Start,
            ("score", [total]) => Self::Score(parse_number("score", total)?),
            ("board", []) => Self::Board,
            ("players", []) => Self::Players,
            ("help" | "?", []) => Self::Help,
            ("quit" | "exit", []) => Self::Quit,
            (known, _) if COMMANDS.contains(&known) => {
                return Err(Error::precondition(format!("usage: {}", usage(known))));
            }
            (unknown, _) => {
                return Err(Error::precondition(format!(
                    "unknown command `{unknown}`; try `help`"
                )));
            }
        };
        Ok(command)
    }
}

fn parse_number(what: &str, text: &str) -> Result<i64> {
    text.parse()
        .map_err(|_| Error::precondition(format!("{what} must be a whole number, got `{text}`")))
}

fn usage(command: &str) -> &'static str {
    match command {
        "new" => "new <id>",
        "player" => "player <name> <splash>",
        "score" => "score <n>",
        "start" => "start",
        "board" => "board",
        "players" => "players",
        "help" => "help",
        _ => "quit",
    }
}

/// Outcome of evaluating one line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Text to show the user.
    Text(String),
    /// Nothing to show.
    Silent,
    /// The user asked to leave.
    Quit,
}

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Store and current match.
    session: Session,

    /// Prompt, banner, and color settings.
    config: RuntimeConfig,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor or session fails to initialize.
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        let editor = RustylineEditor::new(config.color)?;
        Self::with_editor(editor, config)
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the session fails to initialize.
    pub fn with_editor(mut editor: E, config: RuntimeConfig) -> Result<Self> {
        editor.set_commands(COMMANDS.iter().map(ToString::to_string).collect());
        Ok(Self {
            editor,
            session: Session::new()?,
            config,
        })
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Runs the REPL loop until EOF or `quit`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub fn run(&mut self) -> Result<()> {
        if self.config.show_banner {
            self.print_banner();
        }

        loop {
            let line = match self.editor.read_line(&self.config.prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Cancelled => continue,
                ReadResult::Closed => break,
            };
            if line.trim().is_empty() {
                continue;
            }
            self.editor.add_history(&line);

            if !self.eval_and_print(&line) {
                break;
            }
        }

        println!("\nGame on!");
        Ok(())
    }

    /// Evaluates one line, returning what to show.
    ///
    /// Any board render requested by the match's observer while the command
    /// ran is appended to the reply.
    ///
    /// # Errors
    ///
    /// Returns an error if the line does not parse or the command is
    /// rejected.
    pub fn eval(&mut self, line: &str) -> Result<Reply> {
        let command = Command::parse(line)?;
        debug!(?command, "dispatch");
        let reply = self.execute(&command);
        let rendered = self.render_requested();
        match (reply?, rendered?) {
            (Reply::Silent, Some(board)) => Ok(Reply::Text(board)),
            (Reply::Text(text), Some(board)) => Ok(Reply::Text(format!("{text}\n{board}"))),
            (reply, _) => Ok(reply),
        }
    }

    /// Evaluates a script file line by line, skipping blanks and `#`
    /// comments. Stops at the first error or at `quit`.
    ///
    /// Returns false if the script asked to quit.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a line is rejected;
    /// the error names the file and line.
    pub fn eval_file(&mut self, path: &Path) -> Result<bool> {
        let source = fs::read_to_string(path).map_err(|e| {
            Error::new(ErrorKind::Internal(format!(
                "failed to read {}: {e}",
                path.display()
            )))
        })?;

        for (idx, line) in source.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let reply = self.eval(line).map_err(|e| {
                let context = oche_foundation::ErrorContext::new()
                    .with_source(path.display().to_string())
                    .with_line(idx + 1);
                e.with_context(context)
            })?;
            match reply {
                Reply::Text(text) => println!("{text}"),
                Reply::Silent => {}
                Reply::Quit => return Ok(false),
            }
        }
        Ok(true)
    }

    fn execute(&mut self, command: &Command) -> Result<Reply> {
        match command {
            Command::New(id) => {
                self.session.new_game(id)?;
                Ok(Reply::Silent)
            }
            Command::Player { name, splash } => {
                self.session.add_player(name, *splash)?;
                Ok(Reply::Silent)
            }
            Command::Start => {
                self.session.start()?;
                Ok(Reply::Silent)
            }
            Command::Score(total) => {
                self.session.score(*total)?;
                Ok(Reply::Silent)
            }
            Command::Board => Ok(Reply::Text(self.session.render_board()?)),
            Command::Players => Ok(Reply::Text(self.session.render_players()?)),
            Command::Help => Ok(Reply::Text(help_text())),
            Command::Quit => Ok(Reply::Quit),
        }
    }

    fn render_requested(&mut self) -> Result<Option<String>> {
        if self.session.take_render_requests() == 0 {
            return Ok(None);
        }
        self.session.render_board().map(Some)
    }

    /// Evaluates and prints one line. Returns false on `quit`.
    fn eval_and_print(&mut self, line: &str) -> bool {
        match self.eval(line) {
            Ok(Reply::Text(text)) => println!("{text}"),
            Ok(Reply::Silent) => {}
            Ok(Reply::Quit) => return false,
            Err(e) => {
                warn!(line, error = %e, "command rejected");
                self.print_error(&e);
            }
        }
        true
    }

    /// Prints an error to stderr.
    fn print_error(&self, error: &Error) {
        eprintln!("{}", self.config.paint("31", &format!("Error: {error}")));
    }

    /// Prints the welcome banner.
    fn print_banner(&self) {
        println!("{}", self.config.paint("1;36", "   ___  ___ _  _ ___ \n  / _ \\/ __| || | __|\n | (_) | (__| __ | _| \n  \\___/ \\___|_||_|___|"));
        println!("Welcome to Oche v{}", env!("CARGO_PKG_VERSION"));
        println!("Type `help` for commands. Use Ctrl+D to exit.\n");

        let _ = io::stdout().flush();
    }
}

fn help_text() -> String {
    let mut lines = vec!["commands:".to_string()];
    lines.extend(COMMANDS.iter().map(|c| format!("  {}", usage(c))));
    lines.join("\n")
}
