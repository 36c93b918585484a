use super::{InitialState, KeyChain, NewState, OutputKey, persist_new_state, resolve_storage};
use crate::chains::store::StateStore;
use crate::errors::Errors::{self, NotInstantiated};
use crate::primitives::hkdf::{HashFunc, HkdfWrap};
use crate::variant::Variant;
use std::sync::Arc;
use zeroize::Zeroizing;

/// Key chain over HKDF. Each update extracts a pseudorandom key from the
/// input parameter concatenated with the current state, then expands it into
/// the successor state followed by the output key.
pub struct HkdfChain {
    hkdf: HkdfWrap,
    variant: Variant,
    state_length: usize,
    output_length: usize,
    instantiated: bool,
    store: Option<Arc<dyn StateStore>>,
}

impl HkdfChain {
    /// `output_length` defaults to the digest size of the chosen hash.
    pub fn new(
        hash_func: HashFunc,
        output_length: Option<usize>,
        store_persistently: bool,
        store: Option<Arc<dyn StateStore>>,
    ) -> Result<Self, Errors> {
        let variant = Variant::for_hash_func(hash_func);
        let state_length = hash_func.output_size();

        Ok(Self {
            hkdf: HkdfWrap::new(hash_func),
            variant,
            state_length,
            output_length: output_length.unwrap_or(state_length),
            instantiated: false,
            store: resolve_storage(variant, store_persistently, store)?,
        })
    }

    /// `S0 = expand(extract(salt, ikm), info, digest_size)`.
    pub fn instantiate(
        &mut self,
        initial_source_key_material: &[u8],
        extractor_salt: Option<&[u8]>,
        info_param: Option<&[u8]>,
    ) -> Result<InitialState, Errors> {
        let pseudo_random_key = Zeroizing::new(
            self.hkdf
                .extract(extractor_salt, initial_source_key_material)?,
        );
        let initial_state =
            self.hkdf
                .expand(pseudo_random_key.as_slice(), info_param, self.state_length)?;
        self.instantiated = true;

        Ok(initial_state)
    }

    pub fn update(
        &mut self,
        arbitrary_input_param: &[u8],
        chain_state: &[u8],
        extractor_salt: Option<&[u8]>,
        info_param: Option<&[u8]>,
    ) -> Result<(NewState, OutputKey), Errors> {
        if !self.instantiated {
            return Err(NotInstantiated(format!(
                "Instantiate the {} chain before updating it.",
                self.variant.slot_name()
            )));
        }

        let source_key_material =
            Zeroizing::new([arbitrary_input_param, chain_state].concat());
        let pseudo_random_key = Zeroizing::new(
            self.hkdf
                .extract(extractor_salt, source_key_material.as_slice())?,
        );

        let total_output = self.hkdf.expand(
            pseudo_random_key.as_slice(),
            info_param,
            self.state_length + self.output_length,
        )?;
        let (new_state, random_output) = total_output.split_at(self.state_length);
        let (new_state, random_output) = (new_state.to_vec(), random_output.to_vec());

        persist_new_state(&self.store, self.variant, &new_state)?;

        Ok((new_state, random_output))
    }
}

impl KeyChain for HkdfChain {
    fn variant(&self) -> Variant {
        self.variant
    }

    fn instantiate(&mut self, seed: &[u8]) -> Result<InitialState, Errors> {
        HkdfChain::instantiate(self, seed, None, None)
    }

    fn update(
        &mut self,
        arbitrary_input_param: &[u8],
        chain_state: &[u8],
    ) -> Result<(NewState, OutputKey), Errors> {
        HkdfChain::update(self, arbitrary_input_param, chain_state, None, None)
    }
}
