//! Stateless forms of `Prg::refresh` and `Xdrbg::reseed` that leave the
//! previous chain state out of their input. They exist only so the
//! detection harness can contrast them with the sound forms; nothing in the
//! chain layer may call them.

use crate::errors::Errors;
use crate::primitives::prg::{NONCE_FOR_PRG_REFRESH, Prg};
use crate::primitives::xdrbg::{Xdrbg, Xof};

/// PRG refresh that keys AES with the extracted parameter alone.
#[derive(Clone, Copy)]
pub struct UnsoundPrg {
    prg: Prg,
}

impl UnsoundPrg {
    pub fn new(security_param_lambda: usize) -> Result<Self, Errors> {
        Ok(Self {
            prg: Prg::new(security_param_lambda)?,
        })
    }

    /// Same CTR schedule as the sound refresh, but the AES key is the seed
    /// itself: any repeated seed repeats the refreshed state, regardless of
    /// chain history.
    pub fn refresh(&self, extracted_parameter: &[u8]) -> Result<Vec<u8>, Errors> {
        if extracted_parameter.len() != self.prg.security_param_lambda() {
            return Err(Errors::InvalidLength(format!(
                "Provided extracted parameter of {} bytes. Expected {} bytes for the chosen security parameter lambda.",
                extracted_parameter.len(),
                self.prg.security_param_lambda()
            )));
        }

        let mut keystream = self
            .prg
            .keystream(extracted_parameter, &NONCE_FOR_PRG_REFRESH);
        keystream.truncate(self.prg.security_param_lambda());

        Ok(keystream)
    }
}

/// XDRBG reseed that squeezes `XOF(ENCODE(seed, alpha, 1))` without the
/// current-state prefix.
#[derive(Clone, Copy)]
pub struct UnsoundXdrbg {
    xdrbg: Xdrbg,
}

impl UnsoundXdrbg {
    pub fn new(chosen_xof: Xof) -> Self {
        Self {
            xdrbg: Xdrbg::new(chosen_xof),
        }
    }

    pub fn reseed(&self, seed: &[u8], alpha: Option<&[u8]>) -> Result<Vec<u8>, Errors> {
        let alpha = alpha.unwrap_or_default();
        let xof = self.xdrbg.xof();

        if seed.len() < xof.min_seed_size_reseed() {
            return Err(Errors::InvalidLength(format!(
                "Provided a seed of {} bytes. Minimum seed length is {} bytes for the XOF {:?} during reseed.",
                seed.len(),
                xof.min_seed_size_reseed(),
                xof
            )));
        }

        let encoded = self.xdrbg.encode(seed, alpha, 1);
        Ok(self.xdrbg.squeeze(&encoded, xof.state_size()))
    }
}
