//! Players in a legs game.

use oche_foundation::{Error, Result, Value};
use oche_storage::{Attributes, Entity, ModelSchema, Store};

use crate::game::LegsGame;
use crate::round::LegsRound;

/// A player, identified by name, with a splash (bull-off) score.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegsPlayer(pub(crate) Entity);

impl LegsPlayer {
    /// Store identifier for players.
    pub const STORE_ID: &'static str = "legs-players";

    /// Declares the player model.
    ///
    /// # Errors
    ///
    /// Never fails for this fixed declaration; the `Result` comes from the
    /// schema builder.
    pub fn schema() -> Result<ModelSchema> {
        ModelSchema::declare(Self::STORE_ID)
            .key("name")
            .prop("splash")
            .belongs_to("game", LegsGame::STORE_ID, "gameId")
            .has_many("rounds", LegsRound::STORE_ID, "playerName")
            .finish()
    }

    /// Creates and stores a player from constructor attributes.
    ///
    /// # Errors
    ///
    /// Returns any factory error, including `MissingKey` without a name and
    /// `DuplicateKey` if the name is taken.
    pub fn create(store: &mut Store, attributes: Attributes) -> Result<Self> {
        store.create(Self::STORE_ID, attributes).map(Self)
    }

    /// Looks up a player by name.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStore` if the legs models are not registered.
    pub fn find(store: &Store, name: &str) -> Result<Option<Self>> {
        let players = store.collection(Self::STORE_ID)?;
        Ok(players.get(name)?.cloned().map(Self))
    }

    /// Returns the underlying entity.
    #[must_use]
    pub fn entity(&self) -> &Entity {
        &self.0
    }

    /// Returns the player's name.
    #[must_use]
    pub fn name(&self) -> Value {
        self.0.get("name")
    }

    /// Returns the splash score, `0` if unset.
    #[must_use]
    pub fn splash(&self) -> i64 {
        self.0.get("splash").as_int().unwrap_or_default()
    }

    /// Resolves the player's game.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the game store is not registered.
    pub fn game(&self, store: &Store) -> Result<Option<LegsGame>> {
        Ok(store.resolve_one(&self.0, "game")?.map(LegsGame))
    }

    /// Returns every round this player has thrown, in store order.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the round store is not registered.
    pub fn rounds(&self, store: &Store) -> Result<Vec<LegsRound>> {
        let rounds = store.resolve_many(&self.0, "rounds")?;
        Ok(rounds.into_iter().map(LegsRound).collect())
    }

    /// Counts this player's strikes in their game.
    ///
    /// # Errors
    ///
    /// Returns `Precondition` if the player is not in a game.
    pub fn strikes(&self, store: &Store) -> Result<usize> {
        self.require_game(store)?.calculate_strikes(store, self)
    }

    /// Scores a round for this player in their game.
    ///
    /// # Errors
    ///
    /// Returns `Precondition` if the player is not in a game.
    pub fn score(&self, store: &mut Store, total: i64) -> Result<LegsRound> {
        self.require_game(store)?.score_round(store, self, total)
    }

    fn require_game(&self, store: &Store) -> Result<LegsGame> {
        self.game(store)?
            .ok_or_else(|| Error::precondition(format!("player {} is not in a game", self.name())))
    }
}
