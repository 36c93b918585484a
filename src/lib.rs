//! Forward-secure symmetric key chains.
//!
//! Starting from an initial seed, a chain repeatedly absorbs fresh input
//! parameters from a randomness extractor and emits a new opaque state plus
//! a uniformly distributed output key, so that compromise of any state
//! reveals neither prior outputs nor prior states. Three chain families are
//! provided, each over a keyed primitive:
//!
//! - [`chains::prg_chain::PrgChain`] over the Barak-Halevi AES-CTR PRG,
//! - [`chains::xdrbg_chain::XdrbgChain`] over the XDRBG with a SHAKE or
//!   Ascon XOF,
//! - [`chains::hkdf_chain::HkdfChain`] over RFC 5869 HKDF.
//!
//! The [`detection`] module exercises the primitives in their sound and
//! deliberately unsound idealizations and checks for output collisions.

pub mod chains;
pub mod detection;
mod errors;
pub mod extractor;
pub mod primitives;
mod variant;

pub use crate::chains::KeyChain;
pub use crate::chains::store::{MemoryStore, SqliteStore, StateStore};
pub use crate::errors::Errors;
pub use crate::extractor::{Extractor, RngExtractor};
pub use crate::primitives::hkdf::HashFunc;
pub use crate::primitives::xdrbg::Xof;
pub use crate::variant::Variant;
