//! The legs game itself.
//!
//! Players take turns in splash order. Each round's score becomes the target
//! for the next thrower; scoring below the target earns a strike, and a
//! player with three strikes is out. The last player standing wins.

use std::cmp::Reverse;

use oche_foundation::{Error, Result, Value};
use oche_storage::{Attributes, Entity, ModelSchema, Store, observed};

use crate::player::LegsPlayer;
use crate::round::LegsRound;

/// Strikes that eliminate a player.
pub const MAX_STRIKES: usize = 3;

/// Players required to start.
pub const MIN_PLAYERS: usize = 2;

/// A match of legs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegsGame(pub(crate) Entity);

impl LegsGame {
    /// Store identifier for games.
    pub const STORE_ID: &'static str = "legs-games";

    /// Declares the game model.
    ///
    /// # Errors
    ///
    /// Never fails for this fixed declaration; the `Result` comes from the
    /// schema builder.
    pub fn schema() -> Result<ModelSchema> {
        ModelSchema::declare(Self::STORE_ID)
            .key("id")
            .prop("started")
            .has_many("players", LegsPlayer::STORE_ID, "gameId")
            .has_many("rounds", LegsRound::STORE_ID, "gameId")
            .finish()
    }

    /// Creates and stores a game. `started` defaults to false.
    ///
    /// # Errors
    ///
    /// Returns any factory error, including `MissingKey` without an `id`.
    pub fn create(store: &mut Store, attributes: Attributes) -> Result<Self> {
        let mut defaults = Attributes::new().with("started", false);
        for (name, attribute) in attributes {
            defaults.insert(name, attribute);
        }
        store.create(Self::STORE_ID, defaults).map(Self)
    }

    /// Looks up a game by id.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStore` if the legs models are not registered.
    pub fn find(store: &Store, id: &str) -> Result<Option<Self>> {
        let games = store.collection(Self::STORE_ID)?;
        Ok(games.get(id)?.cloned().map(Self))
    }

    /// Returns the underlying entity.
    #[must_use]
    pub fn entity(&self) -> &Entity {
        &self.0
    }

    /// Returns the game id.
    #[must_use]
    pub fn id(&self) -> Value {
        self.0.get("id")
    }

    /// Returns the game's players in store order.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the player store is not registered.
    pub fn players(&self, store: &Store) -> Result<Vec<LegsPlayer>> {
        let players = store.resolve_many(&self.0, "players")?;
        Ok(players.into_iter().map(LegsPlayer).collect())
    }

    /// Returns the game's rounds in the order they were thrown.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the round store is not registered.
    pub fn rounds(&self, store: &Store) -> Result<Vec<LegsRound>> {
        let rounds = store.resolve_many(&self.0, "rounds")?;
        Ok(rounds.into_iter().map(LegsRound).collect())
    }

    // --- Observed operations ---

    /// Creates a player in this game.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if the name is already taken.
    pub fn create_player(&self, store: &mut Store, name: &str, splash: i64) -> Result<LegsPlayer> {
        observed(&self.0, || {
            LegsPlayer::create(
                store,
                Attributes::new()
                    .with("name", name)
                    .with("splash", splash)
                    .with_one("game", &self.0),
            )
        })
    }

    /// Starts the game.
    ///
    /// # Errors
    ///
    /// Returns `Precondition` with fewer than two players; the game stays
    /// unstarted.
    pub fn start(&self, store: &Store) -> Result<()> {
        observed(&self.0, || {
            if self.players(store)?.len() < MIN_PLAYERS {
                return Err(Error::precondition(format!(
                    "legs requires at least {MIN_PLAYERS} players to start"
                )));
            }
            self.0.set("started", true);
            Ok(())
        })
    }

    /// Records a round thrown by `player`.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the round cannot be created.
    pub fn score_round(&self, store: &mut Store, player: &LegsPlayer, score: i64) -> Result<LegsRound> {
        observed(&self.0, || {
            LegsRound::create(
                store,
                Attributes::new()
                    .with_one("player", player.entity())
                    .with("score", score)
                    .with_one("game", &self.0),
            )
        })
    }

    // --- Derived state ---

    /// Counts rounds where `player` scored below the round thrown just before.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the round store is not registered.
    pub fn calculate_strikes(&self, store: &Store, player: &LegsPlayer) -> Result<usize> {
        let rounds = self.rounds(store)?;
        let strikes = rounds
            .iter()
            .enumerate()
            .filter(|(_, round)| round.is_by(player))
            .filter(|(idx, round)| {
                let previous = idx.checked_sub(1).and_then(|i| rounds[i].score());
                matches!((previous, round.score()), (Some(prev), Some(cur)) if prev > cur)
            })
            .count();
        Ok(strikes)
    }

    /// Returns true once the game has been started.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.0.get("started").is_truthy()
    }

    /// Returns true when the game is started and one player remains.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the legs models are not registered.
    pub fn is_finished(&self, store: &Store) -> Result<bool> {
        if !self.is_started() {
            return Ok(false);
        }
        Ok(self.active_players(store)?.len() == 1)
    }

    /// Returns the remaining players in throwing order.
    ///
    /// Players are ranked by splash, highest first, and the order is rotated
    /// so that the player after the most recent thrower leads.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the legs models are not registered.
    pub fn player_order(&self, store: &Store) -> Result<Vec<LegsPlayer>> {
        let mut order = self.active_players(store)?;
        order.sort_by_key(|player| Reverse(player.splash()));

        let last_player = match self.rounds(store)?.last() {
            Some(round) => round.player(store)?,
            None => None,
        };
        let Some(last_player) = last_player else {
            return Ok(order);
        };

        if let Some(idx) = order.iter().position(|p| *p == last_player) {
            let len = order.len();
            order.rotate_left((idx + 1) % len);
        }
        Ok(order)
    }

    /// Returns the score to beat: the last round's score, or `0`.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the round store is not registered.
    pub fn target_score(&self, store: &Store) -> Result<i64> {
        Ok(self
            .rounds(store)?
            .last()
            .and_then(LegsRound::score)
            .unwrap_or_default())
    }

    /// Returns the player due to throw next.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the legs models are not registered.
    pub fn current_player(&self, store: &Store) -> Result<Option<LegsPlayer>> {
        Ok(self.player_order(store)?.into_iter().next())
    }

    fn active_players(&self, store: &Store) -> Result<Vec<LegsPlayer>> {
        let mut active = Vec::new();
        for player in self.players(store)? {
            if self.calculate_strikes(store, &player)? < MAX_STRIKES {
                active.push(player);
            }
        }
        Ok(active)
    }
}
