use crate::errors::Errors::{self, UnsupportedVariant};
use crate::primitives::hkdf::HashFunc;
use crate::primitives::xdrbg::Xof;

/// Tag identifying one concrete key-chain configuration. The tag fixes the
/// chain state size, the output-key length, the persistent storage slot and
/// the width of the extractor draw feeding the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    Prg16,
    Prg24,
    Prg32,
    Shake128,
    Shake256,
    Ascon,
    HkdfSha256,
    HkdfSha3_256,
    HkdfSha512,
    HkdfSha3_512,
}

impl Variant {
    pub const ALL: [Variant; 10] = [
        Variant::Prg16,
        Variant::Prg24,
        Variant::Prg32,
        Variant::Shake128,
        Variant::Shake256,
        Variant::Ascon,
        Variant::HkdfSha256,
        Variant::HkdfSha3_256,
        Variant::HkdfSha512,
        Variant::HkdfSha3_512,
    ];

    /// Fixed slot name under which the latest chain state is persisted.
    pub fn slot_name(&self) -> &'static str {
        match self {
            Self::Prg16 => "prg_16",
            Self::Prg24 => "prg_24",
            Self::Prg32 => "prg_32",
            Self::Shake128 => "shake128",
            Self::Shake256 => "shake256",
            Self::Ascon => "ascon",
            Self::HkdfSha256 => "hkdf_sha256",
            Self::HkdfSha3_256 => "hkdf_sha3_256",
            Self::HkdfSha512 => "hkdf_sha512",
            Self::HkdfSha3_512 => "hkdf_sha3_512",
        }
    }

    pub fn from_slot_name(slot: &str) -> Result<Self, Errors> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.slot_name() == slot)
            .ok_or_else(|| UnsupportedVariant(format!("Unknown storage slot \"{slot}\".")))
    }

    /// Chain state size in bytes. Constant across the lifetime of a chain.
    pub fn state_size(&self) -> usize {
        match self {
            Self::Prg16 => 16,
            Self::Prg24 => 24,
            Self::Prg32 => 32,
            Self::Shake128 | Self::Ascon => Xof::Shake128.state_size(),
            Self::Shake256 => Xof::Shake256.state_size(),
            Self::HkdfSha256 => HashFunc::Sha256.output_size(),
            Self::HkdfSha3_256 => HashFunc::Sha3_256.output_size(),
            Self::HkdfSha512 => HashFunc::Sha512.output_size(),
            Self::HkdfSha3_512 => HashFunc::Sha3_512.output_size(),
        }
    }

    /// Default length of the output key produced by one chain update.
    pub fn output_key_length(&self) -> usize {
        match self {
            Self::Prg16 => 16,
            Self::Prg24 => 24,
            Self::Prg32 => 32,
            Self::Shake128 | Self::Ascon => Xof::Shake128.security_lambda(),
            Self::Shake256 => Xof::Shake256.security_lambda(),
            Self::HkdfSha256 => HashFunc::Sha256.output_size(),
            Self::HkdfSha3_256 => HashFunc::Sha3_256.output_size(),
            Self::HkdfSha512 => HashFunc::Sha512.output_size(),
            Self::HkdfSha3_512 => HashFunc::Sha3_512.output_size(),
        }
    }

    /// Number of bits requested from the randomness extractor for one input
    /// parameter of this variant.
    pub fn extractor_bits(&self) -> usize {
        match self {
            Self::Prg16 => 128,
            Self::Prg24 => 192,
            Self::Prg32 => 256,
            Self::Shake128 | Self::Ascon => 192,
            Self::Shake256 => 384,
            Self::HkdfSha256 | Self::HkdfSha3_256 => 256,
            Self::HkdfSha512 | Self::HkdfSha3_512 => 512,
        }
    }

    pub fn for_xof(xof: Xof) -> Self {
        match xof {
            Xof::Shake128 => Self::Shake128,
            Xof::Shake256 => Self::Shake256,
            Xof::Ascon => Self::Ascon,
        }
    }

    pub fn for_hash_func(hash_func: HashFunc) -> Self {
        match hash_func {
            HashFunc::Sha256 => Self::HkdfSha256,
            HashFunc::Sha3_256 => Self::HkdfSha3_256,
            HashFunc::Sha512 => Self::HkdfSha512,
            HashFunc::Sha3_512 => Self::HkdfSha3_512,
        }
    }

    pub fn for_security_param_lambda(lambda: usize) -> Result<Self, Errors> {
        match lambda {
            16 => Ok(Self::Prg16),
            24 => Ok(Self::Prg24),
            32 => Ok(Self::Prg32),
            other => Err(UnsupportedVariant(format!(
                "Security parameter lambda of {other} bytes. Acceptable values are 16, 24 or 32 bytes."
            ))),
        }
    }
}
