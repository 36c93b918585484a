use forward_keychains::chains::xdrbg_chain::XdrbgChain;
use forward_keychains::{Extractor, RngExtractor, SqliteStore, StateStore, Variant, Xof};
use std::sync::Arc;

fn main() {
    let mut extractor = RngExtractor::from_os_entropy();

    let store: Arc<SqliteStore> = Arc::new(SqliteStore::open("chain_states.db").unwrap());
    let mut chain = XdrbgChain::new(Xof::Shake128, None, true, Some(store.clone())).unwrap();

    let seed = extractor.extract_bits(Variant::Shake128.extractor_bits());
    let mut state = chain.instantiate(&seed, None).unwrap();

    for round in 1..=5 {
        let input_param = extractor.extract_bits(Variant::Shake128.extractor_bits());
        let (new_state, output_key) = chain.update(&input_param, &state, None, None).unwrap();

        // Every successful update leaves the latest state in the slot.
        let stored = store.get(Variant::Shake128.slot_name()).unwrap();
        assert_eq!(stored, new_state);

        println!("key {round}: {}", hex::encode(&output_key));
        state = new_state;
    }

    println!(
        "latest shake128 chain state persisted to chain_states.db: {}",
        hex::encode(store.get("shake128").unwrap())
    );
}
