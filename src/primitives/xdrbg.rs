// [1] Kelsey, John, Stefan Lucks, and Stephan Müller. "XDRBG: A Proposed Deterministic Random Bit Generator Based on Any XOF."
// IACR Transactions on Symmetric Cryptology 2024.1 (2024): 5-34. https://tosc.iacr.org/index.php/ToSC/article/view/11399

use crate::errors::Errors::{self, InvalidLength};
use ascon_hash::AsconXof;
use sha3::{
    Shake128, Shake256,
    digest::{ExtendableOutput, Update, XofReader},
};

const MAX_LEN_ALPHA: usize = 84;

/// Extendable-output function backing an [`Xdrbg`]. The choice fixes the
/// DRBG state size, the minimum seed lengths and the squeeze ceiling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Xof {
    Shake128,
    Shake256,
    Ascon,
}

impl Xof {
    pub fn state_size(&self) -> usize {
        match self {
            Self::Shake128 | Self::Ascon => 32,
            Self::Shake256 => 64,
        }
    }

    /// Security level of the XOF in bytes. Key chains use this as the
    /// default output-key length.
    pub fn security_lambda(&self) -> usize {
        match self {
            Self::Shake128 | Self::Ascon => 16,
            Self::Shake256 => 32,
        }
    }

    pub fn min_seed_size_instantiate(&self) -> usize {
        match self {
            Self::Shake128 | Self::Ascon => 24,
            Self::Shake256 => 48,
        }
    }

    pub fn min_seed_size_reseed(&self) -> usize {
        match self {
            Self::Shake128 | Self::Ascon => 16,
            Self::Shake256 => 32,
        }
    }

    /// Upper bound on state size plus requested output per generate call.
    pub fn max_total_output_size(&self) -> usize {
        match self {
            Self::Shake128 => 304,
            Self::Shake256 => 344,
            Self::Ascon => 256,
        }
    }

    fn check_seed(&self, seed: &[u8], min_seed_len: usize, operation: &str) -> Result<(), Errors> {
        if seed.len() < min_seed_len {
            return Err(InvalidLength(format!(
                "Provided a seed of {} bytes. Minimum seed length is {} bytes for the XOF {:?} during {}.",
                seed.len(),
                min_seed_len,
                self,
                operation
            )));
        }

        Ok(())
    }

    fn check_alpha(&self, alpha: &[u8]) -> Result<(), Errors> {
        if alpha.len() > MAX_LEN_ALPHA {
            return Err(InvalidLength(format!(
                "Provided alpha of {} bytes. Maximum length is {MAX_LEN_ALPHA} bytes.",
                alpha.len()
            )));
        }

        Ok(())
    }

    fn check_total_output(&self, output_key_length: usize) -> Result<(), Errors> {
        let total = output_key_length + self.state_size();
        if total > self.max_total_output_size() {
            return Err(InvalidLength(format!(
                "Requested output and XOF state size: {} + {} = {} bytes. Acceptable length is <= {} bytes for the XOF {:?}.",
                output_key_length,
                self.state_size(),
                total,
                self.max_total_output_size(),
                self
            )));
        }

        Ok(())
    }
}

// Normalises the three digest-0.10 XOF implementations to one call shape.
macro_rules! squeeze_xof {
    ($xof:ty, $encoded:expr, $length:expr) => {{
        let mut xof_instance = <$xof>::default();
        xof_instance.update($encoded);
        let mut reader = xof_instance.finalize_xof();
        let mut output = vec![0u8; $length];
        reader.read(&mut output);
        output
    }};
}

/// XDRBG: a deterministic random bit generator over any XOF [1]. Every call
/// domain-separates its XOF input with `ENCODE(payload, alpha, n)` where
/// `n` is 0 for instantiate, 1 for reseed and 2 for generate.
#[derive(Clone, Copy)]
pub struct Xdrbg {
    xof: Xof,
}

impl Xdrbg {
    pub fn new(chosen_xof: Xof) -> Self {
        Self { xof: chosen_xof }
    }

    pub fn xof(&self) -> Xof {
        self.xof
    }

    /// Derives the initial DRBG state from a fresh seed.
    pub fn instantiate(&self, seed: &[u8], alpha: Option<&[u8]>) -> Result<Vec<u8>, Errors> {
        let alpha = alpha.unwrap_or_default();

        if cfg!(not(feature = "unchecked-params")) {
            self.xof
                .check_seed(seed, self.xof.min_seed_size_instantiate(), "instantiate")?;
            self.xof.check_alpha(alpha)?;
        }

        let encoded = self.encode(seed, alpha, 0);
        Ok(self.squeeze(&encoded, self.xof.state_size()))
    }

    /// Derives a new state from the current state and a fresh seed. The
    /// current state is always part of the XOF input; dropping it is the
    /// unsound idealization studied by the detection harness.
    pub fn reseed(
        &self,
        current_xdrbg_state: &[u8],
        seed: &[u8],
        alpha: Option<&[u8]>,
    ) -> Result<Vec<u8>, Errors> {
        let alpha = alpha.unwrap_or_default();

        if cfg!(not(feature = "unchecked-params")) {
            self.xof
                .check_seed(seed, self.xof.min_seed_size_reseed(), "reseed")?;
            self.xof.check_alpha(alpha)?;
        }

        let payload = [current_xdrbg_state, seed].concat();
        let encoded = self.encode(&payload, alpha, 1);
        Ok(self.squeeze(&encoded, self.xof.state_size()))
    }

    /// Squeezes `state_size + output_key_length` bytes: the leading bytes
    /// become the successor state, the remainder the random output.
    pub fn generate(
        &self,
        current_xdrbg_state: &[u8],
        output_key_length: usize,
        alpha: Option<&[u8]>,
    ) -> Result<(Vec<u8>, Vec<u8>), Errors> {
        let alpha = alpha.unwrap_or_default();

        if cfg!(not(feature = "unchecked-params")) {
            self.xof.check_total_output(output_key_length)?;
            self.xof.check_alpha(alpha)?;
        }

        let encoded = self.encode(current_xdrbg_state, alpha, 2);
        let total_output = self.squeeze(&encoded, self.xof.state_size() + output_key_length);
        let (new_xdrbg_state, random_output) = total_output.split_at(self.xof.state_size());

        Ok((new_xdrbg_state.to_vec(), random_output.to_vec()))
    }

    /// `ENCODE(payload, alpha, n) = payload || alpha || BE(85*n + |alpha|)`
    /// with the trailing integer serialised in the minimum number of
    /// big-endian bytes [1].
    pub(super) fn encode(&self, payload: &[u8], alpha: &[u8], value_n: usize) -> Vec<u8> {
        let domain_param = value_n * 85 + alpha.len();

        let num_bytes = if domain_param == 0 {
            1
        } else {
            ((usize::BITS - domain_param.leading_zeros()).div_ceil(8)) as usize
        };

        let mut encoded = Vec::with_capacity(payload.len() + alpha.len() + num_bytes);
        encoded.extend_from_slice(payload);
        encoded.extend_from_slice(alpha);
        for shift in (0..num_bytes).rev() {
            encoded.push(((domain_param >> (8 * shift)) & 0xFF) as u8);
        }

        encoded
    }

    pub(super) fn squeeze(&self, encoded: &[u8], total_output_length: usize) -> Vec<u8> {
        match self.xof {
            Xof::Shake128 => squeeze_xof!(Shake128, encoded, total_output_length),
            Xof::Shake256 => squeeze_xof!(Shake256, encoded, total_output_length),
            Xof::Ascon => squeeze_xof!(AsconXof, encoded, total_output_length),
        }
    }
}
