use forward_keychains::chains::hkdf_chain::HkdfChain;
use forward_keychains::{Extractor, HashFunc, RngExtractor, Variant};

fn main() {
    let mut extractor = RngExtractor::from_os_entropy();

    for (hash_func, variant) in [
        (HashFunc::Sha256, Variant::HkdfSha256),
        (HashFunc::Sha3_256, Variant::HkdfSha3_256),
        (HashFunc::Sha512, Variant::HkdfSha512),
        (HashFunc::Sha3_512, Variant::HkdfSha3_512),
    ] {
        let mut chain = HkdfChain::new(hash_func, None, false, None).unwrap();

        let initial_skm = extractor.extract_bits(variant.extractor_bits());
        let mut state = chain
            .instantiate(&initial_skm, Some(b"demo extraction salt"), None)
            .unwrap();

        for round in 1..=2 {
            let input_param = extractor.extract_bits(variant.extractor_bits());
            let (new_state, output_key) = chain
                .update(&input_param, &state, None, Some(b"demo info param"))
                .unwrap();
            assert_eq!(output_key.len(), hash_func.output_size());

            println!(
                "key {round} in the chain over {hash_func:?}: {}",
                hex::encode(&output_key)
            );
            state = new_state;
        }
    }
}
