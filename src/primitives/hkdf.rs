// [1] Krawczyk, Hugo. "Cryptographic extraction and key derivation: The HKDF scheme."
// Annual Cryptology Conference. Berlin, Heidelberg: Springer Berlin Heidelberg, 2010.
// [2] RFC 5869, "HMAC-based Extract-and-Expand Key Derivation Function (HKDF)".

use crate::errors::Errors::{self, InvalidLength};
use digest::Digest;
use hkdf::Hkdf;
use sha2::{Sha256, Sha512};
use sha3::{Sha3_256, Sha3_512};
use zeroize::Zeroizing;

/// Hash function underneath the HMAC of both HKDF steps. The digest size
/// doubles as the key-chain state size and the salt ceiling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HashFunc {
    Sha256,
    Sha512,
    Sha3_256,
    Sha3_512,
}

impl HashFunc {
    pub fn output_size(&self) -> usize {
        match self {
            Self::Sha256 => <Sha256 as Digest>::output_size(),
            Self::Sha512 => <Sha512 as Digest>::output_size(),
            Self::Sha3_256 => <Sha3_256 as Digest>::output_size(),
            Self::Sha3_512 => <Sha3_512 as Digest>::output_size(),
        }
    }

    /// An absent salt becomes `digest_size` zero bytes [2]; a present one may
    /// not exceed the digest size.
    fn resolve_salt(&self, extractor_salt: Option<&[u8]>) -> Result<Vec<u8>, Errors> {
        let digest_size = self.output_size();

        match extractor_salt {
            Some(salt) => {
                if cfg!(not(feature = "unchecked-params")) && salt.len() > digest_size {
                    return Err(InvalidLength(format!(
                        "Provided salt of {} bytes. Acceptable length is <= {digest_size} bytes for the hash function {self:?}.",
                        salt.len()
                    )));
                }
                Ok(salt.to_vec())
            }
            None => Ok(vec![0u8; digest_size]),
        }
    }

    fn check_total_output(&self, total_output_length: usize) -> Result<(), Errors> {
        let limit = 255 * self.output_size();
        if cfg!(not(feature = "unchecked-params")) && total_output_length > limit {
            return Err(InvalidLength(format!(
                "Total requested output of {total_output_length} bytes. Acceptable length is <= {limit} bytes for the hash function {self:?}."
            )));
        }

        Ok(())
    }
}

macro_rules! hkdf_extract {
    ($hash_algo:ty, $salt:expr, $source_key_material:expr) => {{
        let (pseudo_random_key, _) = Hkdf::<$hash_algo>::extract(Some($salt), $source_key_material);
        pseudo_random_key.to_vec()
    }};
}

macro_rules! hkdf_expand {
    ($hash_algo:ty, $pseudo_random_key:expr, $info:expr, $total_output_length:expr) => {{
        let hkdf_instance = Hkdf::<$hash_algo>::from_prk($pseudo_random_key).map_err(|_| {
            InvalidLength(format!(
                "Provided a pseudorandom key of {} bytes, shorter than the digest size.",
                $pseudo_random_key.len()
            ))
        })?;

        let mut total_output = vec![0u8; $total_output_length];
        hkdf_instance.expand($info, &mut total_output).map_err(|_| {
            InvalidLength(format!(
                "Requested {} output bytes, beyond the expansion limit.",
                $total_output_length
            ))
        })?;
        total_output
    }};
}

/// RFC 5869 extract-then-expand wrapper, parameterised over [`HashFunc`].
#[derive(Clone, Copy)]
pub struct HkdfWrap {
    hash_func: HashFunc,
}

impl HkdfWrap {
    pub fn new(hash_func: HashFunc) -> Self {
        Self { hash_func }
    }

    pub fn hash_func(&self) -> HashFunc {
        self.hash_func
    }

    /// `PRK = HMAC(salt, source_key_material)`.
    pub fn extract(
        &self,
        extractor_salt: Option<&[u8]>,
        source_key_material: &[u8],
    ) -> Result<Vec<u8>, Errors> {
        let salt = Zeroizing::new(self.hash_func.resolve_salt(extractor_salt)?);

        Ok(match self.hash_func {
            HashFunc::Sha256 => hkdf_extract!(Sha256, salt.as_slice(), source_key_material),
            HashFunc::Sha512 => hkdf_extract!(Sha512, salt.as_slice(), source_key_material),
            HashFunc::Sha3_256 => hkdf_extract!(Sha3_256, salt.as_slice(), source_key_material),
            HashFunc::Sha3_512 => hkdf_extract!(Sha3_512, salt.as_slice(), source_key_material),
        })
    }

    /// Iterated-HMAC expansion of a pseudorandom key, truncated to
    /// `total_output_length` bytes.
    pub fn expand(
        &self,
        pseudo_random_key: &[u8],
        info_param: Option<&[u8]>,
        total_output_length: usize,
    ) -> Result<Vec<u8>, Errors> {
        self.hash_func.check_total_output(total_output_length)?;
        let info = info_param.unwrap_or_default();

        Ok(match self.hash_func {
            HashFunc::Sha256 => hkdf_expand!(Sha256, pseudo_random_key, info, total_output_length),
            HashFunc::Sha512 => hkdf_expand!(Sha512, pseudo_random_key, info, total_output_length),
            HashFunc::Sha3_256 => {
                hkdf_expand!(Sha3_256, pseudo_random_key, info, total_output_length)
            }
            HashFunc::Sha3_512 => {
                hkdf_expand!(Sha3_512, pseudo_random_key, info, total_output_length)
            }
        })
    }
}
