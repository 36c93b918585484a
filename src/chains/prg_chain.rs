use super::{InitialState, KeyChain, NewState, OutputKey, persist_new_state, resolve_storage};
use crate::chains::store::StateStore;
use crate::errors::Errors::{self, NotInstantiated};
use crate::primitives::prg::Prg;
use crate::variant::Variant;
use std::sync::Arc;
use zeroize::Zeroize;

/// Key chain over the Barak-Halevi AES-CTR PRG. Every update folds a fresh
/// extracted parameter into the state via `refresh` and ratchets forward via
/// `next`, so a compromised state reveals no earlier output key.
pub struct PrgChain {
    prg: Prg,
    variant: Variant,
    zero_state: Vec<u8>,
    instantiated: bool,
    store: Option<Arc<dyn StateStore>>,
}

impl PrgChain {
    pub fn new(
        security_param_lambda: usize,
        store_persistently: bool,
        store: Option<Arc<dyn StateStore>>,
    ) -> Result<Self, Errors> {
        let prg = Prg::new(security_param_lambda)?;
        let variant = Variant::for_security_param_lambda(security_param_lambda)?;

        Ok(Self {
            prg,
            variant,
            zero_state: vec![0u8; security_param_lambda],
            instantiated: false,
            store: resolve_storage(variant, store_persistently, store)?,
        })
    }

    /// `S0 = refresh(0^lambda, seed)`.
    pub fn instantiate(&mut self, seed: &[u8]) -> Result<InitialState, Errors> {
        let initial_state = self.prg.refresh(&self.zero_state, seed)?;
        self.instantiated = true;

        Ok(initial_state)
    }

    /// Refreshes the state with the input parameter, then ratchets:
    /// `(out, S') = next(refresh(S, x))`.
    pub fn update(
        &mut self,
        arbitrary_input_param: &[u8],
        chain_state: &[u8],
    ) -> Result<(NewState, OutputKey), Errors> {
        if !self.instantiated {
            return Err(NotInstantiated(format!(
                "Instantiate the {} chain before updating it.",
                self.variant.slot_name()
            )));
        }

        let mut refreshed_state = self.prg.refresh(chain_state, arbitrary_input_param)?;
        let next_result = self.prg.next(&refreshed_state);
        refreshed_state.zeroize();
        let (random_output, new_state) = next_result?;

        persist_new_state(&self.store, self.variant, &new_state)?;

        Ok((new_state, random_output))
    }
}

impl KeyChain for PrgChain {
    fn variant(&self) -> Variant {
        self.variant
    }

    fn instantiate(&mut self, seed: &[u8]) -> Result<InitialState, Errors> {
        PrgChain::instantiate(self, seed)
    }

    fn update(
        &mut self,
        arbitrary_input_param: &[u8],
        chain_state: &[u8],
    ) -> Result<(NewState, OutputKey), Errors> {
        PrgChain::update(self, arbitrary_input_param, chain_state)
    }
}
