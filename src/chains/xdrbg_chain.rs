use super::{InitialState, KeyChain, NewState, OutputKey, persist_new_state, resolve_storage};
use crate::chains::store::StateStore;
use crate::errors::Errors::{self, NotInstantiated};
use crate::primitives::xdrbg::{Xdrbg, Xof};
use crate::variant::Variant;
use std::sync::Arc;
use zeroize::Zeroize;

/// Key chain over the XDRBG. Each update performs a sound reseed (the
/// current state is prefixed to the fresh seed) followed by a generate call
/// that yields the successor state and the output key.
pub struct XdrbgChain {
    xdrbg: Xdrbg,
    variant: Variant,
    output_key_length: usize,
    instantiated: bool,
    store: Option<Arc<dyn StateStore>>,
}

impl XdrbgChain {
    /// `output_key_length` defaults to the security level of the chosen XOF
    /// (16 bytes for SHAKE-128 and Ascon-XOF, 32 bytes for SHAKE-256).
    pub fn new(
        chosen_xof: Xof,
        output_key_length: Option<usize>,
        store_persistently: bool,
        store: Option<Arc<dyn StateStore>>,
    ) -> Result<Self, Errors> {
        let variant = Variant::for_xof(chosen_xof);

        Ok(Self {
            xdrbg: Xdrbg::new(chosen_xof),
            variant,
            output_key_length: output_key_length.unwrap_or(chosen_xof.security_lambda()),
            instantiated: false,
            store: resolve_storage(variant, store_persistently, store)?,
        })
    }

    pub fn instantiate(
        &mut self,
        seed: &[u8],
        alpha: Option<&[u8]>,
    ) -> Result<InitialState, Errors> {
        let initial_state = self.xdrbg.instantiate(seed, alpha)?;
        self.instantiated = true;

        Ok(initial_state)
    }

    pub fn update(
        &mut self,
        arbitrary_input_param: &[u8],
        chain_state: &[u8],
        alpha_reseed: Option<&[u8]>,
        alpha_generate: Option<&[u8]>,
    ) -> Result<(NewState, OutputKey), Errors> {
        if !self.instantiated {
            return Err(NotInstantiated(format!(
                "Instantiate the {} chain before updating it.",
                self.variant.slot_name()
            )));
        }

        let mut reseeded_state =
            self.xdrbg
                .reseed(chain_state, arbitrary_input_param, alpha_reseed)?;
        let generate_result =
            self.xdrbg
                .generate(&reseeded_state, self.output_key_length, alpha_generate);
        reseeded_state.zeroize();
        let (new_state, random_output) = generate_result?;

        persist_new_state(&self.store, self.variant, &new_state)?;

        Ok((new_state, random_output))
    }
}

impl KeyChain for XdrbgChain {
    fn variant(&self) -> Variant {
        self.variant
    }

    fn instantiate(&mut self, seed: &[u8]) -> Result<InitialState, Errors> {
        XdrbgChain::instantiate(self, seed, None)
    }

    fn update(
        &mut self,
        arbitrary_input_param: &[u8],
        chain_state: &[u8],
    ) -> Result<(NewState, OutputKey), Errors> {
        XdrbgChain::update(self, arbitrary_input_param, chain_state, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::store::MemoryStore;

    fn min_seed(xof: Xof) -> Vec<u8> {
        vec![0x11; xof.min_seed_size_instantiate()]
    }

    #[test]
    fn default_output_key_length_is_the_xof_lambda() {
        for (xof, expected_out) in [(Xof::Shake128, 16), (Xof::Ascon, 16), (Xof::Shake256, 32)] {
            let mut chain = XdrbgChain::new(xof, None, false, None).unwrap();
            let state = chain.instantiate(&min_seed(xof), None).unwrap();
            assert_eq!(state.len(), xof.state_size());

            let input = vec![0x22u8; xof.min_seed_size_reseed()];
            let (new_state, output_key) = chain.update(&input, &state, None, None).unwrap();
            assert_eq!(new_state.len(), xof.state_size());
            assert_eq!(output_key.len(), expected_out);
        }
    }

    #[test]
    fn explicit_output_key_length_is_honored() {
        let mut chain = XdrbgChain::new(Xof::Shake256, Some(96), false, None).unwrap();
        let state = chain.instantiate(&min_seed(Xof::Shake256), None).unwrap();
        let (_, output_key) = chain.update(&[0x33u8; 32], &state, None, None).unwrap();
        assert_eq!(output_key.len(), 96);
    }

    #[test]
    fn update_before_instantiate_is_refused() {
        let mut chain = XdrbgChain::new(Xof::Shake128, None, false, None).unwrap();
        assert!(matches!(
            chain.update(&[0u8; 16], &[0u8; 32], None, None),
            Err(Errors::NotInstantiated(_))
        ));
    }

    #[test]
    fn persistent_chain_requires_a_store() {
        assert!(matches!(
            XdrbgChain::new(Xof::Ascon, None, true, None),
            Err(Errors::UninitializedStorage(_))
        ));
    }

    #[test]
    fn persisted_state_lands_in_the_xof_slot() {
        let store = Arc::new(MemoryStore::new());
        let mut chain = XdrbgChain::new(Xof::Ascon, None, true, Some(store.clone())).unwrap();

        let state = chain.instantiate(&min_seed(Xof::Ascon), None).unwrap();
        let (new_state, _) = chain.update(&[0x44u8; 16], &state, None, None).unwrap();

        assert_eq!(store.get("ascon").unwrap(), new_state);
    }

    #[test]
    fn alpha_contexts_separate_the_chains() {
        let mut with_alpha = XdrbgChain::new(Xof::Shake128, None, false, None).unwrap();
        let mut without_alpha = XdrbgChain::new(Xof::Shake128, None, false, None).unwrap();

        let seed = min_seed(Xof::Shake128);
        let state_a = with_alpha.instantiate(&seed, Some(b"device-7")).unwrap();
        let state_b = without_alpha.instantiate(&seed, None).unwrap();
        assert_ne!(state_a, state_b);
    }
}
