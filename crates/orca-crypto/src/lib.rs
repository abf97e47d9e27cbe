//! Orca Crypto
//!
//! WebCrypto bindings layer for the Orca engine.
//!
//! Features:
//! - Algorithm normalization from loosely-typed identifiers
//! - Script-facing `SubtleCrypto` operation surface
//! - `CryptoKey` with format/usage parsing and access checks
//! - Promise bridge with origin-thread completion discipline
//! - JSON Web Key dictionary
//!
//! All cryptography happens behind the `orca_platform::WebCrypto`
//! backend; this crate validates and dispatches.

pub mod crypto;
pub mod crypto_key;
pub mod jwk;
pub mod normalize;
pub mod result;
pub mod subtle;

pub use crypto::Crypto;
pub use crypto_key::CryptoKey;
pub use jwk::{JsonWebKey, RsaOtherPrimesInfo};
pub use normalize::normalize_algorithm;
pub use result::{pending, CryptoValue, ResultFuture};
pub use subtle::{ExportedKey, GeneratedKey, KeyData, SubtleCrypto};
