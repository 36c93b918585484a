pub mod hkdf_chain;
pub mod prg_chain;
pub mod store;
pub mod xdrbg_chain;

use crate::errors::Errors;
use crate::variant::Variant;
use std::sync::Arc;
use store::StateStore;

pub type InitialState = Vec<u8>;
pub type NewState = Vec<u8>;
pub type OutputKey = Vec<u8>;

/// Common capability surface of the three chain families. Concrete chains
/// expose richer inherent methods (alpha contexts, salts, info parameters);
/// the trait drives them with the default empty values.
///
/// A chain starts out uninstantiated. A successful [`KeyChain::instantiate`]
/// makes it ready; calling [`KeyChain::update`] before that raises
/// [`Errors::NotInstantiated`]. The caller owns the state bytes between
/// calls, so a chain instance must not be shared between concurrent updates.
pub trait KeyChain {
    fn variant(&self) -> Variant;

    fn instantiate(&mut self, seed: &[u8]) -> Result<InitialState, Errors>;

    fn update(
        &mut self,
        arbitrary_input_param: &[u8],
        chain_state: &[u8],
    ) -> Result<(NewState, OutputKey), Errors>;
}

/// Resolves the persistence configuration shared by all chain constructors:
/// a chain asked to persist must actually be handed a store.
pub(crate) fn resolve_storage(
    variant: Variant,
    store_persistently: bool,
    store: Option<Arc<dyn StateStore>>,
) -> Result<Option<Arc<dyn StateStore>>, Errors> {
    if !store_persistently {
        return Ok(None);
    }

    store.map(Some).ok_or_else(|| {
        Errors::UninitializedStorage(format!(
            "Key chain for {} is configured to persist but has no storage.",
            variant.slot_name()
        ))
    })
}

/// Writes the freshly derived state into its slot. Called at the end of
/// every update of a persistently configured chain, before the update
/// returns, so a caller never observes a state the store has not seen.
pub(crate) fn persist_new_state(
    store: &Option<Arc<dyn StateStore>>,
    variant: Variant,
    new_state: &[u8],
) -> Result<(), Errors> {
    if let Some(store) = store {
        store.put(variant.slot_name(), new_state)?;
    }

    Ok(())
}
