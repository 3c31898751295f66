//! Post-mutation observation.
//!
//! An entity may carry one [`Observer`], a zero-argument callback supplied by
//! whatever renders the entity. Methods that change visible state run their
//! body through [`observed`], which fires the observer once the body succeeds.

use std::rc::Rc;

use crate::entity::Entity;

/// Zero-argument callback fired after an observed mutation.
pub type Observer = Rc<dyn Fn()>;

/// Runs `body`, then notifies `entity`'s observer if the body succeeded.
///
/// Errors from `body` are returned unchanged and the observer is not called.
/// Entities without an observer only see the body's own effects.
///
/// # Errors
///
/// Returns whatever error `body` returns.
pub fn observed<T, E>(entity: &Entity, body: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
    let result = body()?;
    entity.notify();
    Ok(result)
}
