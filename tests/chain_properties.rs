//! End-to-end properties of the three chain families: determinism, size
//! contracts, parameter bounds, persistence ordering and the detection
//! harness at a reduced sample size.

use forward_keychains::chains::hkdf_chain::HkdfChain;
use forward_keychains::chains::prg_chain::PrgChain;
use forward_keychains::chains::xdrbg_chain::XdrbgChain;
use forward_keychains::detection::{
    PrgDetection, check_injectivity, detect_entropy_loss_in_hkdf, detect_entropy_loss_in_prg,
    detect_entropy_loss_in_xdrbg,
};
use forward_keychains::{
    Errors, Extractor, HashFunc, KeyChain, MemoryStore, RngExtractor, SqliteStore, StateStore,
    Variant, Xof,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;

fn seeded_extractor(seed: u64) -> RngExtractor<StdRng> {
    RngExtractor::new(StdRng::seed_from_u64(seed))
}

#[test]
fn prg_chain_with_lambda_16_produces_fresh_16_byte_values() {
    let seed = [0u8; 16];
    let mut chain = PrgChain::new(16, false, None).unwrap();

    let initial_state = chain.instantiate(&seed).unwrap();
    assert_eq!(initial_state.len(), 16);

    let (next_state, output_key) = chain.update(&[0u8; 16], &initial_state).unwrap();
    assert_eq!(next_state.len(), 16);
    assert_eq!(output_key.len(), 16);
    assert_ne!(next_state, initial_state);
    assert_ne!(next_state.as_slice(), seed.as_slice());
    assert_ne!(output_key.as_slice(), seed.as_slice());
}

#[test]
fn shake128_chain_produces_32_byte_states_and_16_byte_keys() {
    let mut extractor = seeded_extractor(11);
    let mut chain = XdrbgChain::new(Xof::Shake128, None, false, None).unwrap();

    let seed = extractor.extract_bits(192);
    let initial_state = chain.instantiate(&seed, None).unwrap();
    assert_eq!(initial_state.len(), 32);

    let input_param = extractor.extract_bits(128);
    let (next_state, output_key) = chain
        .update(&input_param, &initial_state, None, None)
        .unwrap();
    assert_eq!(next_state.len(), 32);
    assert_eq!(output_key.len(), 16);
}

#[test]
fn ascon_generate_one_byte_over_the_cap_is_invalid() {
    let mut chain = XdrbgChain::new(Xof::Ascon, Some(225), false, None).unwrap();
    let state = chain.instantiate(&[0x61u8; 24], None).unwrap();

    // state size 32 + requested 225 = 257 > 256
    assert!(matches!(
        chain.update(&[0x62u8; 16], &state, None, None),
        Err(Errors::InvalidLength(_))
    ));
}

#[test]
fn hkdf_sha256_chain_reproduces_bytewise() {
    let run = || {
        let mut chain = HkdfChain::new(HashFunc::Sha256, None, false, None).unwrap();
        let initial_state = chain.instantiate(&[0u8; 32], None, None).unwrap();
        assert_eq!(initial_state.len(), 32);

        let (next_state, output_key) = chain
            .update(&[0x0au8; 32], &initial_state, None, None)
            .unwrap();
        assert_eq!(next_state.len(), 32);
        assert_eq!(output_key.len(), 32);
        (initial_state, next_state, output_key)
    };

    assert_eq!(run(), run());
}

#[test]
fn duplicate_extractor_outputs_raise_a_collision_with_both_seeds() {
    let detection = PrgDetection::new(16, 2).unwrap();
    let repeated_seed = vec![0x5eu8; 16];
    let seeds = vec![repeated_seed.clone(), repeated_seed.clone()];

    let refreshed = detection.refreshed_states_unsound(&seeds).unwrap();
    match check_injectivity(&seeds, &refreshed) {
        Err(Errors::CollisionDetected {
            first_input,
            second_input,
            colliding_output,
        }) => {
            assert_eq!(first_input, repeated_seed);
            assert_eq!(second_input, repeated_seed);
            assert!(!colliding_output.is_empty());
        }
        other => panic!("expected CollisionDetected, got {other:?}"),
    }
}

#[test]
fn ten_persistent_updates_leave_the_tenth_state_in_the_slot() {
    for store in [
        Arc::new(MemoryStore::new()) as Arc<dyn StateStore>,
        Arc::new(SqliteStore::open_in_memory().unwrap()) as Arc<dyn StateStore>,
    ] {
        let mut extractor = seeded_extractor(12);
        let mut chain =
            HkdfChain::new(HashFunc::Sha512, None, true, Some(store.clone())).unwrap();

        let mut state = chain
            .instantiate(&extractor.extract_bits(512), None, None)
            .unwrap();
        let mut latest_state = Vec::new();
        for _ in 0..10 {
            let (next_state, _) = chain
                .update(&extractor.extract_bits(512), &state, None, None)
                .unwrap();
            state = next_state.clone();
            latest_state = next_state;
        }

        assert_eq!(store.get("hkdf_sha512").unwrap(), latest_state);
    }
}

#[test]
fn state_sizes_are_constant_across_updates_for_every_variant() {
    let mut extractor = seeded_extractor(13);

    let mut chains: Vec<Box<dyn KeyChain>> = vec![
        Box::new(PrgChain::new(16, false, None).unwrap()),
        Box::new(PrgChain::new(24, false, None).unwrap()),
        Box::new(PrgChain::new(32, false, None).unwrap()),
        Box::new(XdrbgChain::new(Xof::Shake128, None, false, None).unwrap()),
        Box::new(XdrbgChain::new(Xof::Shake256, None, false, None).unwrap()),
        Box::new(XdrbgChain::new(Xof::Ascon, None, false, None).unwrap()),
        Box::new(HkdfChain::new(HashFunc::Sha256, None, false, None).unwrap()),
        Box::new(HkdfChain::new(HashFunc::Sha3_256, None, false, None).unwrap()),
        Box::new(HkdfChain::new(HashFunc::Sha512, None, false, None).unwrap()),
        Box::new(HkdfChain::new(HashFunc::Sha3_512, None, false, None).unwrap()),
    ];

    for chain in &mut chains {
        let variant = chain.variant();
        let seed = extractor.extract_bits(variant.extractor_bits());
        let mut state = chain.instantiate(&seed).unwrap();
        assert_eq!(state.len(), variant.state_size(), "{:?}", variant);

        for _ in 0..3 {
            let input_param = extractor.extract_bits(variant.extractor_bits());
            let (next_state, output_key) = chain.update(&input_param, &state).unwrap();
            assert_eq!(next_state.len(), variant.state_size(), "{:?}", variant);
            assert_eq!(output_key.len(), variant.output_key_length(), "{:?}", variant);
            state = next_state;
        }
    }
}

#[test]
fn chains_refuse_updates_before_instantiation() {
    let mut prg_chain = PrgChain::new(32, false, None).unwrap();
    let mut xdrbg_chain = XdrbgChain::new(Xof::Shake256, None, false, None).unwrap();
    let mut hkdf_chain = HkdfChain::new(HashFunc::Sha3_512, None, false, None).unwrap();

    assert!(matches!(
        KeyChain::update(&mut prg_chain, &[0u8; 32], &[0u8; 32]),
        Err(Errors::NotInstantiated(_))
    ));
    assert!(matches!(
        KeyChain::update(&mut xdrbg_chain, &[0u8; 32], &[0u8; 64]),
        Err(Errors::NotInstantiated(_))
    ));
    assert!(matches!(
        KeyChain::update(&mut hkdf_chain, &[0u8; 64], &[0u8; 64]),
        Err(Errors::NotInstantiated(_))
    ));
}

#[test]
fn identically_seeded_chains_stay_in_lockstep() {
    let mut extractor = seeded_extractor(14);
    let seed = extractor.extract_bits(384);
    let inputs: Vec<Vec<u8>> = (0..5).map(|_| extractor.extract_bits(384)).collect();

    let mut first = XdrbgChain::new(Xof::Shake256, None, false, None).unwrap();
    let mut second = XdrbgChain::new(Xof::Shake256, None, false, None).unwrap();

    let mut state_a = first.instantiate(&seed, None).unwrap();
    let mut state_b = second.instantiate(&seed, None).unwrap();
    assert_eq!(state_a, state_b);

    for input_param in &inputs {
        let (next_a, out_a) = first.update(input_param, &state_a, None, None).unwrap();
        let (next_b, out_b) = second.update(input_param, &state_b, None, None).unwrap();
        assert_eq!(next_a, next_b);
        assert_eq!(out_a, out_b);
        state_a = next_a;
        state_b = next_b;
    }
}

#[test]
fn detection_harness_passes_at_a_reduced_sample_size() {
    const TRIALS: usize = 2048;
    let mut extractor = seeded_extractor(15);

    detect_entropy_loss_in_hkdf(HashFunc::Sha256, TRIALS, &mut extractor).unwrap();
    detect_entropy_loss_in_xdrbg(Xof::Shake128, TRIALS, &mut extractor).unwrap();
    detect_entropy_loss_in_prg(16, TRIALS, &mut extractor).unwrap();
}

struct FailingStore;

impl StateStore for FailingStore {
    fn put(&self, slot: &str, _state_of_key_chain: &[u8]) -> Result<(), Errors> {
        Err(Errors::StorageFailure(format!(
            "refusing to write slot \"{slot}\""
        )))
    }

    fn get(&self, slot: &str) -> Result<Vec<u8>, Errors> {
        Err(Errors::NoStoredState(format!(
            "No state stored under slot \"{slot}\"."
        )))
    }
}

#[test]
fn failed_persistence_surfaces_from_the_update_call() {
    let mut chain = PrgChain::new(16, true, Some(Arc::new(FailingStore))).unwrap();
    let state = chain.instantiate(&[0x71u8; 16]).unwrap();

    assert!(matches!(
        chain.update(&[0x72u8; 16], &state),
        Err(Errors::StorageFailure(_))
    ));
}

#[test]
fn slot_names_cover_every_variant_exactly_once() {
    let mut names: Vec<&str> = Variant::ALL.iter().map(|v| v.slot_name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), Variant::ALL.len());
}
