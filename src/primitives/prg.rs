// [1] Barak, Boaz, and Shai Halevi. "A model and architecture for pseudo-random generation with applications to /dev/random."
// Proceedings of the 12th ACM conference on Computer and communications security. 2005. https://eprint.iacr.org/2005/029.pdf

use crate::errors::Errors::{self, InvalidLength};
use crate::primitives::xor_bytes;
use crate::variant::Variant;
use aes::{Aes128, Aes192, Aes256};
use ctr::Ctr32BE;
use ctr::cipher::{KeyIvInit, StreamCipher};
use zeroize::Zeroizing;

/// The two PRG calls share the CTR schedule but must never share a counter
/// block, so each call owns a 12-byte nonce: `0x96` followed by eleven `\r`
/// bytes for refresh, eleven `\n` bytes for next. The 32-bit big-endian
/// counter starts at 0 in both cases.
pub(super) const NONCE_FOR_PRG_REFRESH: [u8; 12] = [
    0x96, 0x0d, 0x0d, 0x0d, 0x0d, 0x0d, 0x0d, 0x0d, 0x0d, 0x0d, 0x0d, 0x0d,
];
const NONCE_FOR_PRG_NEXT: [u8; 12] = [
    0x96, 0x0a, 0x0a, 0x0a, 0x0a, 0x0a, 0x0a, 0x0a, 0x0a, 0x0a, 0x0a, 0x0a,
];

/// Barak-Halevi pseudorandom generator instantiated with AES in counter
/// mode. The security parameter lambda (16, 24 or 32 bytes) selects
/// AES-128, AES-192 or AES-256 and fixes the state and output sizes.
#[derive(Clone, Copy)]
pub struct Prg {
    security_param_lambda: usize,
}

impl Prg {
    pub fn new(security_param_lambda: usize) -> Result<Self, Errors> {
        Variant::for_security_param_lambda(security_param_lambda)?;

        Ok(Self {
            security_param_lambda,
        })
    }

    pub fn security_param_lambda(&self) -> usize {
        self.security_param_lambda
    }

    /// Folds an extracted parameter into the current state: the XOR of both
    /// becomes the AES key and the first lambda keystream bytes become the
    /// refreshed state.
    pub fn refresh(
        &self,
        current_prg_state: &[u8],
        extracted_parameter: &[u8],
    ) -> Result<Vec<u8>, Errors> {
        self.check_input_length("current state", current_prg_state)?;
        self.check_input_length("extracted parameter", extracted_parameter)?;

        let input_key = Zeroizing::new(xor_bytes(current_prg_state, extracted_parameter)?);
        let mut keystream = self.keystream(input_key.as_slice(), &NONCE_FOR_PRG_REFRESH);

        keystream.truncate(self.security_param_lambda);
        Ok(keystream)
    }

    /// Ratchets the state forward: the first lambda keystream bytes are the
    /// fresh output key, the next lambda bytes are the new state.
    pub fn next(&self, current_prg_state: &[u8]) -> Result<(Vec<u8>, Vec<u8>), Errors> {
        self.check_input_length("current state", current_prg_state)?;

        let keystream = self.keystream(current_prg_state, &NONCE_FOR_PRG_NEXT);
        let (random_output, new_prg_state) = keystream.split_at(self.security_param_lambda);

        Ok((random_output.to_vec(), new_prg_state.to_vec()))
    }

    /// Encrypts 2*lambda zero bytes under `input_key`. The caller has already
    /// validated that the key length matches lambda.
    pub(super) fn keystream(&self, input_key: &[u8], nonce: &[u8; 12]) -> Vec<u8> {
        let mut iv = [0u8; 16];
        iv[..12].copy_from_slice(nonce);

        let mut keystream = vec![0u8; 2 * self.security_param_lambda];

        match input_key.len() {
            16 => {
                let mut cipher = Ctr32BE::<Aes128>::new(input_key.into(), iv.as_slice().into());
                cipher.apply_keystream(&mut keystream);
            }
            24 => {
                let mut cipher = Ctr32BE::<Aes192>::new(input_key.into(), iv.as_slice().into());
                cipher.apply_keystream(&mut keystream);
            }
            32 => {
                let mut cipher = Ctr32BE::<Aes256>::new(input_key.into(), iv.as_slice().into());
                cipher.apply_keystream(&mut keystream);
            }
            _ => unreachable!("key length validated against lambda"),
        }

        keystream
    }

    fn check_input_length(&self, name: &str, input: &[u8]) -> Result<(), Errors> {
        if input.len() != self.security_param_lambda {
            return Err(InvalidLength(format!(
                "Provided {name} of {} bytes. Expected {} bytes for the chosen security parameter lambda.",
                input.len(),
                self.security_param_lambda
            )));
        }

        Ok(())
    }
}
