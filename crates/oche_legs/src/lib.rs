//! The legs darts game for Oche.
//!
//! This crate provides:
//! - [`LegsGame`] - A match: its players, rounds, turn order, and outcome
//! - [`LegsPlayer`] - A named player with a splash score
//! - [`LegsRound`] - One scored round
//!
//! Each type is a thin handle over an [`oche_storage::Entity`]; all state
//! lives in the [`Store`] passed to every operation. Call [`register`] once
//! per store before creating anything.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod game;
pub mod player;
pub mod round;

pub use game::{LegsGame, MAX_STRIKES, MIN_PLAYERS};
pub use player::LegsPlayer;
pub use round::LegsRound;

use oche_foundation::Result;
use oche_storage::Store;

/// Registers the game, player, and round models with a store.
///
/// # Errors
///
/// Returns an error if a model declaration is malformed.
pub fn register(store: &mut Store) -> Result<()> {
    store.register(LegsGame::schema()?);
    store.register(LegsPlayer::schema()?);
    store.register(LegsRound::schema()?);
    Ok(())
}
