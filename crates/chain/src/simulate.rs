//! Forward simulation of chain realisations.

use crate::choice::weighted_choice;
use crate::error::ChainError;
use crate::model::ChainModel;

/// Draws one realisation of the chain.
///
/// The first state is drawn from `init_p`, each subsequent state from the
/// row of the previous state's transition matrix. Exactly one uniform value
/// is consumed per position.
///
/// # Returns
///
/// A vector of `model.n_positions()` state indices.
pub fn simulate(model: &ChainModel, rng: &mut impl rand::Rng) -> Vec<usize> {
    let mut out = vec![0; model.n_positions()];
    // Buffer is sized to the chain length.
    simulate_into(model, rng, &mut out).expect("buffer length matches chain length");
    out
}

/// Draws one realisation of the chain into a pre-allocated buffer.
///
/// # Errors
///
/// Returns [`ChainError::BufferLength`] if `out.len() != model.n_positions()`.
pub fn simulate_into(
    model: &ChainModel,
    rng: &mut impl rand::Rng,
    out: &mut [usize],
) -> Result<(), ChainError> {
    if out.len() != model.n_positions() {
        return Err(ChainError::BufferLength {
            expected: model.n_positions(),
            got: out.len(),
        });
    }
    let mut prev = weighted_choice(rng.random(), model.init_p());
    out[0] = prev;
    for (step, slot) in out.iter_mut().enumerate().skip(1) {
        let next = weighted_choice(rng.random(), model.transition(step - 1).row(prev));
        *slot = next;
        prev = next;
    }
    Ok(())
}
