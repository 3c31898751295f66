//! A single scored visit to the oche.

use oche_foundation::Result;
use oche_storage::{Attributes, Entity, ModelSchema, Store};

use crate::game::LegsGame;
use crate::player::LegsPlayer;

/// One round: a score thrown by a player in a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegsRound(pub(crate) Entity);

impl LegsRound {
    /// Store identifier for rounds.
    pub const STORE_ID: &'static str = "legs-rounds";

    /// Declares the round model. Rounds carry no identity key.
    ///
    /// # Errors
    ///
    /// Never fails for this fixed declaration; the `Result` comes from the
    /// schema builder.
    pub fn schema() -> Result<ModelSchema> {
        ModelSchema::declare(Self::STORE_ID)
            .prop("score")
            .belongs_to("game", LegsGame::STORE_ID, "gameId")
            .belongs_to("player", LegsPlayer::STORE_ID, "playerName")
            .finish()
    }

    /// Creates and stores a round from constructor attributes.
    ///
    /// # Errors
    ///
    /// Returns any factory error, e.g. `UnknownStore` if the legs models are
    /// not registered.
    pub fn create(store: &mut Store, attributes: Attributes) -> Result<Self> {
        store.create(Self::STORE_ID, attributes).map(Self)
    }

    /// Returns the underlying entity.
    #[must_use]
    pub fn entity(&self) -> &Entity {
        &self.0
    }

    /// Returns the round's score, if one was recorded as a number.
    #[must_use]
    pub fn score(&self) -> Option<i64> {
        self.0.get("score").as_int()
    }

    /// Resolves the game this round belongs to.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the game store is not registered.
    pub fn game(&self, store: &Store) -> Result<Option<LegsGame>> {
        Ok(store.resolve_one(&self.0, "game")?.map(LegsGame))
    }

    /// Resolves the player who threw this round.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the player store is not registered.
    pub fn player(&self, store: &Store) -> Result<Option<LegsPlayer>> {
        Ok(store.resolve_one(&self.0, "player")?.map(LegsPlayer))
    }

    /// Returns true if this round was thrown by `player`.
    ///
    /// Compares the stored foreign key, so no lookup is needed.
    #[must_use]
    pub fn is_by(&self, player: &LegsPlayer) -> bool {
        let name = player.name();
        !name.is_nil() && self.0.get("playerName") == name
    }
}
