//! Backend Interface
//!
//! The pluggable crypto engine boundary. Every operation receives
//! pre-normalized algorithms and pre-validated keys; backends never parse
//! untyped input and never re-check usage masks. Operations complete
//! asynchronously through the supplied `WebCryptoResult`, on the origin
//! thread.

use crate::error::Result;
use crate::key::{KeyFormat, UsageMask, WebCryptoKey};
use crate::params::WebCryptoAlgorithm;
use crate::result::WebCryptoResult;

/// A crypto engine implementation
///
/// Implementations:
/// - Production: an embedder-supplied engine wrapping a real crypto
///   library or OS facility
/// - Testing: the deterministic [`crate::mock::MockCrypto`]
pub trait WebCrypto: Send + Sync {
    fn encrypt(
        &self,
        algorithm: WebCryptoAlgorithm,
        key: WebCryptoKey,
        data: Vec<u8>,
        result: WebCryptoResult,
    );

    fn decrypt(
        &self,
        algorithm: WebCryptoAlgorithm,
        key: WebCryptoKey,
        data: Vec<u8>,
        result: WebCryptoResult,
    );

    fn sign(
        &self,
        algorithm: WebCryptoAlgorithm,
        key: WebCryptoKey,
        data: Vec<u8>,
        result: WebCryptoResult,
    );

    /// Completes with a boolean verdict, not an error, on mismatch
    fn verify_signature(
        &self,
        algorithm: WebCryptoAlgorithm,
        key: WebCryptoKey,
        signature: Vec<u8>,
        data: Vec<u8>,
        result: WebCryptoResult,
    );

    fn digest(&self, algorithm: WebCryptoAlgorithm, data: Vec<u8>, result: WebCryptoResult);

    /// Completes with a key or, for public-key algorithms, a key pair
    fn generate_key(
        &self,
        algorithm: WebCryptoAlgorithm,
        extractable: bool,
        usages: UsageMask,
        result: WebCryptoResult,
    );

    /// `key_data` carries raw/pkcs8/spki bytes, or UTF-8 JWK JSON
    fn import_key(
        &self,
        format: KeyFormat,
        key_data: Vec<u8>,
        algorithm: WebCryptoAlgorithm,
        extractable: bool,
        usages: UsageMask,
        result: WebCryptoResult,
    );

    /// Completes with a buffer, or with JWK JSON for `KeyFormat::Jwk`
    fn export_key(&self, format: KeyFormat, key: WebCryptoKey, result: WebCryptoResult);

    fn wrap_key(
        &self,
        format: KeyFormat,
        key: WebCryptoKey,
        wrapping_key: WebCryptoKey,
        wrap_algorithm: WebCryptoAlgorithm,
        result: WebCryptoResult,
    );

    #[allow(clippy::too_many_arguments)]
    fn unwrap_key(
        &self,
        format: KeyFormat,
        wrapped_key: Vec<u8>,
        unwrapping_key: WebCryptoKey,
        unwrap_algorithm: WebCryptoAlgorithm,
        unwrapped_key_algorithm: WebCryptoAlgorithm,
        extractable: bool,
        usages: UsageMask,
        result: WebCryptoResult,
    );

    fn derive_bits(
        &self,
        algorithm: WebCryptoAlgorithm,
        base_key: WebCryptoKey,
        length_bits: u32,
        result: WebCryptoResult,
    );

    /// Derivation, import, and key-length algorithms arrive together so
    /// the backend can size, derive, and construct the key in one step
    #[allow(clippy::too_many_arguments)]
    fn derive_key(
        &self,
        algorithm: WebCryptoAlgorithm,
        base_key: WebCryptoKey,
        import_algorithm: WebCryptoAlgorithm,
        key_length_algorithm: WebCryptoAlgorithm,
        extractable: bool,
        usages: UsageMask,
        result: WebCryptoResult,
    );

    /// Fill `dest` with cryptographically strong random bytes
    fn fill_random(&self, dest: &mut [u8]) -> Result<()>;
}
