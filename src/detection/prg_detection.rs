use super::check_injectivity;
use crate::errors::Errors;
use crate::extractor::Extractor;
use crate::primitives::prg::Prg;
use crate::primitives::unsound::UnsoundPrg;
use crate::variant::Variant;
use tracing::info;

/// Injectivity checks for the PRG under both idealizations. All refresh
/// checks run against the all-zero prior state, matching the chain's
/// instantiation; the next chain starts from that state as well.
pub struct PrgDetection {
    prg: Prg,
    unsound_prg: UnsoundPrg,
    zero_state: Vec<u8>,
    extractor_bits: usize,
    trials: usize,
}

impl PrgDetection {
    pub fn new(security_param_lambda: usize, trials: usize) -> Result<Self, Errors> {
        let variant = Variant::for_security_param_lambda(security_param_lambda)?;

        Ok(Self {
            prg: Prg::new(security_param_lambda)?,
            unsound_prg: UnsoundPrg::new(security_param_lambda)?,
            zero_state: vec![0u8; security_param_lambda],
            extractor_bits: variant.extractor_bits(),
            trials,
        })
    }

    /// One extracted parameter of lambda bytes per trial.
    pub fn draw_input_parameters(&self, extractor: &mut dyn Extractor) -> Vec<Vec<u8>> {
        (0..self.trials)
            .map(|_| extractor.extract_bits(self.extractor_bits))
            .collect()
    }

    pub fn refreshed_states_sound(&self, seeds: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, Errors> {
        seeds
            .iter()
            .map(|seed| self.prg.refresh(&self.zero_state, seed))
            .collect()
    }

    pub fn refreshed_states_unsound(&self, seeds: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, Errors> {
        seeds
            .iter()
            .map(|seed| self.unsound_prg.refresh(seed))
            .collect()
    }

    /// Walks one next chain of `trials` steps and returns the outputs along
    /// with the state each output was produced from.
    pub fn next_chain_sound(&self) -> Result<(Vec<Vec<u8>>, Vec<Vec<u8>>), Errors> {
        let mut random_outputs = Vec::with_capacity(self.trials);
        let mut chain_states = Vec::with_capacity(self.trials);
        let mut prg_state = self.zero_state.clone();

        for _ in 0..self.trials {
            let (random_output, new_state) = self.prg.next(&prg_state)?;
            chain_states.push(prg_state);
            random_outputs.push(random_output);
            prg_state = new_state;
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
