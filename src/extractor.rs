use rand::{RngCore, rngs::OsRng};

/// Source of the arbitrary input parameters absorbed by the key chains.
///
/// The production deployment feeds the chains from a two-source randomness
/// extractor; this crate only relies on the interface below and ships an
/// RNG-backed implementation for the detection harness, benches and demos.
pub trait Extractor {
    /// Returns `number_of_bits` uniformly distributed bits packed MSB-first
    /// into the minimum number of bytes.
    fn extract_bits(&mut self, number_of_bits: usize) -> Vec<u8>;
}

/// Default [`Extractor`] drawing from any [`RngCore`].
pub struct RngExtractor<R: RngCore> {
    rng: R,
}

impl<R: RngCore> RngExtractor<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngExtractor<OsRng> {
    /// Extractor backed by operating-system entropy.
    pub fn from_os_entropy() -> Self {
        Self::new(OsRng)
    }
}

impl<R: RngCore> Extractor for RngExtractor<R> {
    fn extract_bits(&mut self, number_of_bits: usize) -> Vec<u8> {
        let mut output = vec![0u8; number_of_bits.div_ceil(8)];
        self.rng.fill_bytes(&mut output);

        // MSB-first packing: surplus low-order bits of the last byte stay 0.
        let surplus_bits = output.len() * 8 - number_of_bits;
        if surplus_bits > 0 {
            if let Some(last) = output.last_mut() {
                *last &= 0xFF << surplus_bits;
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn packs_bits_into_minimum_byte_count() {
        let mut extractor = RngExtractor::new(StdRng::seed_from_u64(7));
        assert_eq!(extractor.extract_bits(128).len(), 16);
        assert_eq!(extractor.extract_bits(192).len(), 24);
        assert_eq!(extractor.extract_bits(384).len(), 48);
        assert_eq!(extractor.extract_bits(3).len(), 1);
    }

    #[test]
    fn surplus_bits_of_the_last_byte_are_cleared() {
        let mut extractor = RngExtractor::new(StdRng::seed_from_u64(7));
        for _ in 0..64 {
            let byte = extractor.extract_bits(3)[0];
            assert_eq!(byte & 0b0001_1111, 0);
        }
    }

    #[test]
    fn seeded_extractor_is_reproducible() {
        let mut first = RngExtractor::new(StdRng::seed_from_u64(42));
        let mut second = RngExtractor::new(StdRng::seed_from_u64(42));
        assert_eq!(first.extract_bits(256), second.extract_bits(256));
    }
}
