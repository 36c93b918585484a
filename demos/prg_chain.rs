use forward_keychains::chains::prg_chain::PrgChain;
use forward_keychains::{Extractor, RngExtractor, Variant};

fn main() {
    let mut extractor = RngExtractor::from_os_entropy();

    for (lambda, variant) in [(16, Variant::Prg16), (24, Variant::Prg24), (32, Variant::Prg32)] {
        let mut chain = PrgChain::new(lambda, false, None).unwrap();

        let seed = extractor.extract_bits(variant.extractor_bits());
        let mut state = chain.instantiate(&seed).unwrap();

        for round in 1..=2 {
            let input_param = extractor.extract_bits(variant.extractor_bits());
            let (new_state, output_key) = chain.update(&input_param, &state).unwrap();
            assert_eq!(output_key.len(), lambda);

            println!(
                "key {round} in the chain with lambda = {lambda}: {}",
                hex::encode(&output_key)
            );
            state = new_state;
        }
    }
}
