pub mod hkdf;
pub mod prg;
pub mod unsound;
pub mod xdrbg;

use crate::errors::Errors::{self, InvalidLength};

pub(crate) fn xor_bytes(param_1: &[u8], param_2: &[u8]) -> Result<Vec<u8>, Errors> {
    if param_1.len() != param_2.len() {
        return Err(InvalidLength(format!(
            "Cannot XOR {} bytes with {} bytes.",
            param_1.len(),
            param_2.len()
        )));
    }

    Ok(param_1
        .iter()
        .zip(param_2.iter())
        .map(|(a, b)| a ^ b)
        .collect())
}
