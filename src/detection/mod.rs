//! Entropy-loss detection: drives each primitive directly (bypassing the
//! chain layer) with independently extracted input parameters and verifies
//! that the mapping from inputs to outputs stays injective. The sound
//! idealizations must never collide on these sample sizes; the unsound,
//! stateless forms are exercised to document where that guarantee rests.

pub mod hkdf_detection;
pub mod prg_detection;
pub mod xdrbg_detection;

pub use hkdf_detection::HkdfDetection;
pub use prg_detection::PrgDetection;
pub use xdrbg_detection::XdrbgDetection;

use crate::errors::Errors::{self, CollisionDetected};
use crate::extractor::Extractor;
use crate::primitives::hkdf::HashFunc;
use crate::primitives::xdrbg::Xof;
use std::collections::HashMap;
use tracing::info;

/// Default number of independent extractor draws per idealization check.
pub const DEFAULT_TRIAL_COUNT: usize = 1 << 21;

/// Length of the random outputs requested from the generate/expand calls
/// while checking their injectivity.
pub(crate) const DETECTION_OUTPUT_LENGTH: usize = 32;

/// Asserts that the input-to-output mapping is injective by recording every
/// output; the first repeated output raises [`Errors::CollisionDetected`]
/// carrying both offending inputs.
pub fn check_injectivity(
    corresponding_inputs: &[Vec<u8>],
    random_outputs: &[Vec<u8>],
) -> Result<(), Errors> {
    let mut input_per_output: HashMap<&[u8], &[u8]> =
        HashMap::with_capacity(random_outputs.len());

    for (input, output) in corresponding_inputs.iter().zip(random_outputs) {
        if let Some(prior_input) = input_per_output.insert(output.as_slice(), input.as_slice()) {
            return Err(CollisionDetected {
                first_input: prior_input.to_vec(),
                second_input: input.clone(),
                colliding_output: output.clone(),
            });
        }
    }

    Ok(())
}

/// Runs every HKDF check of the harness: seeds to pseudorandom keys, then
/// pseudorandom keys to expanded outputs.
pub fn detect_entropy_loss_in_hkdf(
    hash_func: HashFunc,
    trials: usize,
    extractor: &mut dyn Extractor,
) -> Result<(), Errors> {
    let detection = HkdfDetection::new(hash_func, trials);

    info!(?hash_func, trials, "sound idealization of HKDF");
    let seeds = detection.draw_input_parameters(extractor);

    let pseudo_random_keys = detection.pseudo_random_keys_sound(&seeds)?;
    detection.check_for_entropy_loss("hkdf_extract", &seeds, &pseudo_random_keys)?;

    let random_outputs = detection.expanded_outputs_sound(&pseudo_random_keys)?;
    detection.check_for_entropy_loss("hkdf_expand", &pseudo_random_keys, &random_outputs)?;

    Ok(())
}

/// Runs every XDRBG check of the harness: instantiate, sound reseed, the
/// generate chain, and finally the stateless (unsound) reseed.
pub fn detect_entropy_loss_in_xdrbg(
    xof: Xof,
    trials: usize,
    extractor: &mut dyn Extractor,
) -> Result<(), Errors> {
    let detection = XdrbgDetection::new(xof, trials);

    info!(?xof, trials, "sound idealization of XDRBG");
    let seeds = detection.draw_input_parameters(extractor);

    let initial_states = detection.initial_states_sound(&seeds)?;
    detection.check_for_entropy_loss("xdrbg_instantiate", &seeds, &initial_states)?;

    let reseeded_states = detection.reseeded_states_sound(&seeds, extractor)?;
    detection.check_for_entropy_loss("xdrbg_reseed", &seeds, &reseeded_states)?;

    let (random_outputs, chain_states) = detection.generate_chain_sound(extractor)?;
    detection.check_for_entropy_loss("xdrbg_generate", &chain_states, &random_outputs)?;

    info!(?xof, trials, "unsound idealization of XDRBG");
    let stateless_reseeded = detection.reseeded_states_unsound(&seeds)?;
    detection.check_for_entropy_loss("stateless xdrbg_reseed", &seeds, &stateless_reseeded)?;

    Ok(())
}

/// Runs every PRG check of the harness: sound refresh, the next chain, and
/// the stateless (unsound) refresh.
pub fn detect_entropy_loss_in_prg(
    security_param_lambda: usize,
    trials: usize,
    extractor: &mut dyn Extractor,
) -> Result<(), Errors> {
    let detection = PrgDetection::new(security_param_lambda, trials)?;

    info!(security_param_lambda, trials, "sound idealization of PRG");
    let seeds = detection.draw_input_parameters(extractor);

    let refreshed_states = detection.refreshed_states_sound(&seeds)?;
    detection.check_for_entropy_loss("prg_refresh", &seeds, &refreshed_states)?;

    let (random_outputs, chain_states) = detection.next_chain_sound()?;
    detection.check_for_entropy_loss("prg_next", &chain_states, &random_outputs)?;

    info!(security_param_lambda, trials, "unsound idealization of PRG");
    let stateless_refreshed = detection.refreshed_states_unsound(&seeds)?;
    detection.check_for_entropy_loss("stateless prg_refresh", &seeds, &stateless_refreshed)?;

    Ok(())
}
