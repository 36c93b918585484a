use super::{DETECTION_OUTPUT_LENGTH, check_injectivity};
use crate::errors::Errors;
use crate::extractor::Extractor;
use crate::primitives::hkdf::{HashFunc, HkdfWrap};
use crate::variant::Variant;
use tracing::info;

/// Injectivity checks for HKDF: seeds into pseudorandom keys via the
/// extract step, pseudorandom keys into outputs via the expand step. HKDF
/// has no stateless counterpart; both steps are already keyed by their
/// whole input.
pub struct HkdfDetection {
    hkdf: HkdfWrap,
    extractor_bits: usize,
    trials: usize,
}

impl HkdfDetection {
    pub fn new(hash_func: HashFunc, trials: usize) -> Self {
        Self {
            hkdf: HkdfWrap::new(hash_func),
            extractor_bits: Variant::for_hash_func(hash_func).extractor_bits(),
            trials,
        }
    }

    /// One source-key-material draw of digest size per trial.
    pub fn draw_input_parameters(&self, extractor: &mut dyn Extractor) -> Vec<Vec<u8>> {
        (0..self.trials)
            .map(|_| extractor.extract_bits(self.extractor_bits))
            .collect()
    }

    pub fn pseudo_random_keys_sound(&self, seeds: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, Errors> {
        seeds
            .iter()
            .map(|seed| self.hkdf.extract(None, seed))
            .collect()
    }

    pub fn expanded_outputs_sound(
        &self,
        pseudo_random_keys: &[Vec<u8>],
    ) -> Result<Vec<Vec<u8>>, Errors> {
        pseudo_random_keys
            .iter()
            .map(|prk| self.hkdf.expand(prk, None, DETECTION_OUTPUT_LENGTH))
            .collect()
    }

    pub fn check_for_entropy_loss(
        &self,
        operation: &str,
        corresponding_inputs: &[Vec<u8>],
        random_outputs: &[Vec<u8>],
    ) -> Result<(), Errors> {
        check_injectivity(corresponding_inputs, random_outputs)?;
        info!(
            operation,
            trials = self.trials,
            "no collisions, the mapping is injective on this sample"
        );

        Ok(())
    }
}
