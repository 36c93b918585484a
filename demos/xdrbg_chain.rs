use forward_keychains::chains::xdrbg_chain::XdrbgChain;
use forward_keychains::{Extractor, RngExtractor, Variant, Xof};

fn main() {
    let mut extractor = RngExtractor::from_os_entropy();

    for xof in [Xof::Shake128, Xof::Shake256, Xof::Ascon] {
        let variant = match xof {
            Xof::Shake128 => Variant::Shake128,
            Xof::Shake256 => Variant::Shake256,
            Xof::Ascon => Variant::Ascon,
        };
        let mut chain = XdrbgChain::new(xof, None, false, None).unwrap();

        let seed = extractor.extract_bits(variant.extractor_bits());
        let alpha = b"demo context".as_slice();
        let mut state = chain.instantiate(&seed, Some(alpha)).unwrap();

        for round in 1..=2 {
            let input_param = extractor.extract_bits(variant.extractor_bits());
            let (new_state, output_key) = chain
                .update(&input_param, &state, Some(alpha), None)
                .unwrap();
            assert_eq!(new_state.len(), xof.state_size());

            println!(
                "key {round} in the chain over {xof:?}: {}",
                hex::encode(&output_key)
            );
            state = new_state;
        }
    }
}
