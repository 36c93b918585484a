use super::{DETECTION_OUTPUT_LENGTH, check_injectivity};
use crate::errors::Errors;
use crate::extractor::Extractor;
use crate::primitives::unsound::UnsoundXdrbg;
use crate::primitives::xdrbg::{Xdrbg, Xof};
use crate::variant::Variant;
use tracing::info;

/// Injectivity checks for the XDRBG under both idealizations.
pub struct XdrbgDetection {
    xdrbg: Xdrbg,
    unsound_xdrbg: UnsoundXdrbg,
    extractor_bits: usize,
    trials: usize,
}

impl XdrbgDetection {
    pub fn new(xof: Xof, trials: usize) -> Self {
        Self {
            xdrbg: Xdrbg::new(xof),
            unsound_xdrbg: UnsoundXdrbg::new(xof),
            extractor_bits: Variant::for_xof(xof).extractor_bits(),
            trials,
        }
    }

    /// One seed per trial, wide enough for both instantiate and reseed.
    pub fn draw_input_parameters(&self, extractor: &mut dyn Extractor) -> Vec<Vec<u8>> {
        (0..self.trials)
            .map(|_| extractor.extract_bits(self.extractor_bits))
            .collect()
    }

    pub fn initial_states_sound(&self, seeds: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, Errors> {
        seeds
            .iter()
            .map(|seed| self.xdrbg.instantiate(seed, None))
            .collect()
    }

    /// Reseeds one fixed instantiated state with every seed in turn.
    pub fn reseeded_states_sound(
        &self,
        seeds: &[Vec<u8>],
        extractor: &mut dyn Extractor,
    ) -> Result<Vec<Vec<u8>>, Errors> {
        let fixed_state = self
            .xdrbg
            .instantiate(&extractor.extract_bits(self.extractor_bits), None)?;

        seeds
            .iter()
            .map(|seed| self.xdrbg.reseed(&fixed_state, seed, None))
            .collect()
    }

    pub fn reseeded_states_unsound(&self, seeds: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, Errors> {
        seeds
            .iter()
            .map(|seed| self.unsound_xdrbg.reseed(seed, None))
            .collect()
    }

    /// Walks one generate chain of `trials` steps and returns the outputs
    /// along with the state each output was produced from.
    pub fn generate_chain_sound(
        &self,
        extractor: &mut dyn Extractor,
    ) -> Result<(Vec<Vec<u8>>, Vec<Vec<u8>>), Errors> {
        let mut random_outputs = Vec::with_capacity(self.trials);
        let mut chain_states = Vec::with_capacity(self.trials);
        let mut xdrbg_state = self
            .xdrbg
            .instantiate(&extractor.extract_bits(self.extractor_bits), None)?;

        for _ in 0..self.trials {
            let (new_state, random_output) =
                self.xdrbg
                    .generate(&xdrbg_state, DETECTION_OUTPUT_LENGTH, None)?;
            chain_states.push(xdrbg_state);
            random_outputs.push(random_output);
            xdrbg_state = new_state;
        }

        Ok((random_outputs, chain_states))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::RngExtractor;
    use rand::{SeedableRng, rngs::StdRng};

    const SMALL_TRIALS: usize = 512;

    #[test]
    fn instantiate_and_reseed_are_injective_on_a_small_sample() {
        for xof in [Xof::Shake128, Xof::Shake256, Xof::Ascon] {
            let detection = XdrbgDetection::new(xof, SMALL_TRIALS);
            let mut extractor = RngExtractor::new(StdRng::seed_from_u64(2));

            let seeds = detection.draw_input_parameters(&mut extractor);

            let initial_states = detection.initial_states_sound(&seeds).unwrap();
            detection
                .check_for_entropy_loss("xdrbg_instantiate", &seeds, &initial_states)
                .unwrap();

            let reseeded = detection
                .reseeded_states_sound(&seeds, &mut extractor)
                .unwrap();
            detection
                .check_for_entropy_loss("xdrbg_reseed", &seeds, &reseeded)
                .unwrap();
        }
    }

    #[test]
    fn generate_chain_states_map_injectively_to_outputs() {
        let detection = XdrbgDetection::new(Xof::Ascon, SMALL_TRIALS);
        let mut extractor = RngExtractor::new(StdRng::seed_from_u64(3));

        let (outputs, states) = detection.generate_chain_sound(&mut extractor).unwrap();
        assert_eq!(outputs.len(), SMALL_TRIALS);
        detection
            .check_for_entropy_loss("xdrbg_generate", &states, &outputs)
            .unwrap();
    }

    #[test]
    fn stateless_reseed_collides_exactly_on_repeated_seeds() {
        let detection = XdrbgDetection::new(Xof::Shake128, 2);
        let seed = vec![0x24u8; 24];
        let seeds = vec![seed.clone(), seed];

        let reseeded = detection.reseeded_states_unsound(&seeds).unwrap();
        assert!(matches!(
            detection.check_for_entropy_loss("stateless xdrbg_reseed", &seeds, &reseeded),
            Err(Errors::CollisionDetected { .. })
        ));
    }
}
