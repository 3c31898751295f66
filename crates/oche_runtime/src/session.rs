//! Session state for the REPL.
//!
//! The session owns the [`Store`] and tracks the match being played. The
//! match's observer only records that a render was requested; the REPL
//! drains those requests after each command, once the store is free again.

use std::cell::Cell;
use std::fmt::Write as _;
use std::rc::Rc;

use oche_foundation::{Error, Result};
use oche_legs::{LegsGame, LegsPlayer, LegsRound, MAX_STRIKES, MIN_PLAYERS};
use oche_storage::{Attributes, Store};
use tracing::info;

/// Session state for an interactive REPL session.
pub struct Session {
    /// Every match, player, and round created so far.
    store: Store,

    /// The match commands apply to.
    game: Option<LegsGame>,

    /// Observer notifications not yet rendered.
    renders: Rc<Cell<usize>>,
}

impl Session {
    /// Creates a session with the legs models registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the models fail to register.
    pub fn new() -> Result<Self> {
        let mut store = Store::new();
        oche_legs::register(&mut store)?;
        Ok(Self {
            store,
            game: None,
            renders: Rc::new(Cell::new(0)),
        })
    }

    /// Returns the store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Returns the current match.
    #[must_use]
    pub fn game(&self) -> Option<&LegsGame> {
        self.game.as_ref()
    }

    /// Creates a match and makes it current.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if a match with this id exists.
    pub fn new_game(&mut self, id: &str) -> Result<LegsGame> {
        let renders = Rc::clone(&self.renders);
        let game = LegsGame::create(
            &mut self.store,
            Attributes::new()
                .with("id", id)
                .with_observer(move || renders.set(renders.get() + 1)),
        )?;
        info!(game = id, "match created");
        self.game = Some(game.clone());
        self.request_render();
        Ok(game)
    }

    /// Adds a player to the current match.
    ///
    /// # Errors
    ///
    /// Returns `Precondition` without a match or once it has started, and
    /// `DuplicateKey` if the name is taken.
    pub fn add_player(&mut self, name: &str, splash: i64) -> Result<LegsPlayer> {
        let game = self.require_game()?;
        if game.is_started() {
            return Err(Error::precondition("the match has already started"));
        }
        game.create_player(&mut self.store, name, splash)
    }

    /// Starts the current match.
    ///
    /// # Errors
    ///
    /// Returns `Precondition` without a match, if it already started, or with
    /// too few players.
    pub fn start(&mut self) -> Result<()> {
        let game = self.require_game()?;
        if game.is_started() {
            return Err(Error::precondition("the match has already started"));
        }
        game.start(&self.store)?;
        info!(game = %game.id(), "match started");
        Ok(())
    }

    /// Scores a round for the player whose turn it is.
    ///
    /// # Errors
    ///
    /// Returns `Precondition` unless a match is in play.
    pub fn score(&mut self, total: i64) -> Result<LegsRound> {
        let game = self.require_game()?;
        if !game.is_started() {
            return Err(Error::precondition("the match has not started"));
        }
        if game.is_finished(&self.store)? {
            return Err(Error::precondition("the match is over"));
        }
        let player = game
            .current_player(&self.store)?
            .ok_or_else(|| Error::precondition("no player is due to throw"))?;

        let round = player.score(&mut self.store, total)?;
        if game.is_finished(&self.store)? {
            let winner = game.current_player(&self.store)?.map(|p| p.name());
            info!(game = %game.id(), winner = ?winner, "match finished");
        }
        Ok(round)
    }

    /// Returns and clears the number of pending render requests.
    pub fn take_render_requests(&self) -> usize {
        self.renders.replace(0)
    }

    fn request_render(&self) {
        self.renders.set(self.renders.get() + 1);
    }

    fn require_game(&self) -> Result<LegsGame> {
        self.game
            .clone()
            .ok_or_else(|| Error::precondition("no match; use `new <id>` first"))
    }

    // --- Rendering ---

    /// Renders the scoreboard for the current match.
    ///
    /// # Errors
    ///
    /// Returns `Precondition` without a match.
    pub fn render_board(&self) -> Result<String> {
        let game = self.require_game()?;
        let store = &self.store;
        let mut out = String::new();

        let status = if game.is_finished(store)? {
            let winner = game
                .current_player(store)?
                .map_or_else(String::new, |p| p.name().to_string());
            format!("finished, {winner} wins")
        } else if game.is_started() {
            format!("in play, target {}", game.target_score(store)?)
        } else {
            let count = game.players(store)?.len();
            format!("waiting for players ({count}/{MIN_PLAYERS})")
        };
        let _ = writeln!(out, "== {} == {status}", game.id());

        let order = game.player_order(store)?;
        for (idx, player) in order.iter().enumerate() {
            let marker = if idx == 0 && game.is_started() { '>' } else { ' ' };
            let _ = writeln!(
                out,
                "{marker} {:<12} splash {:>3}  strikes {}/{MAX_STRIKES}",
                player.name().to_string(),
                player.splash(),
                player.strikes(store)?,
            );
        }

        let out_players: Vec<String> = game
            .players(store)?
            .into_iter()
            .filter(|p| !order.contains(p))
            .map(|p| p.name().to_string())
            .collect();
        if !out_players.is_empty() {
            let _ = writeln!(out, "  out: {}", out_players.join(", "));
        }
        Ok(out.trim_end().to_string())
    }

    /// Lists the current match's players in the order they joined.
    ///
    /// # Errors
    ///
    /// Returns `Precondition` without a match.
    pub fn render_players(&self) -> Result<String> {
        let game = self.require_game()?;
        let players = game.players(&self.store)?;
        if players.is_empty() {
            return Ok("no players yet".to_string());
        }

        let mut out = String::new();
        for player in players {
            let rounds: Vec<String> = player
                .rounds(&self.store)?
                .iter()
                .filter_map(LegsRound::score)
                .map(|s| s.to_string())
                .collect();
            let _ = writeln!(
                out,
                "{} (splash {}): {}",
                player.name(),
                player.splash(),
                if rounds.is_empty() { "-".to_string() } else { rounds.join(" ") },
            );
        }
        Ok(out.trim_end().to_string())
    }
}
