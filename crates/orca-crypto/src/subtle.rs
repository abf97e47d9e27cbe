//! SubtleCrypto
//!
//! The script-facing operation surface. Each method validates its
//! arguments synchronously (format strings, usage masks, algorithm
//! normalization, key/algorithm match), then forwards pre-validated,
//! strongly-typed inputs to the backend and awaits the promise bridge.

use std::sync::Arc;

use orca_idl::Value;
use orca_platform::{Error, Operation, Result, Usage, WebCrypto, WebCryptoKey};

use crate::crypto_key::CryptoKey;
use crate::jwk::JsonWebKey;
use crate::normalize::normalize_algorithm;
use crate::result::{pending, CryptoValue};

/// Key material supplied to `import_key`
#[derive(Debug, Clone)]
pub enum KeyData {
    /// raw / pkcs8 / spki bytes
    Bytes(Vec<u8>),
    /// A JWK dictionary, required for the jwk format
    Jwk(JsonWebKey),
}

/// Result of `generate_key`
#[derive(Debug, Clone)]
pub enum GeneratedKey {
    Single(CryptoKey),
    Pair {
        public_key: CryptoKey,
        private_key: CryptoKey,
    },
}

/// Result of `export_key`
#[derive(Debug, Clone)]
pub enum ExportedKey {
    Bytes(Vec<u8>),
    Jwk(JsonWebKey),
}

/// The SubtleCrypto façade over a pluggable backend
#[derive(Clone)]
pub struct SubtleCrypto {
    backend: Arc<dyn WebCrypto>,
}

impl SubtleCrypto {
    pub fn new(backend: Arc<dyn WebCrypto>) -> SubtleCrypto {
        SubtleCrypto { backend }
    }

    pub async fn encrypt(
        &self,
        algorithm: &Value,
        key: &CryptoKey,
        data: &[u8],
    ) -> Result<Vec<u8>> {
        let normalized = normalize_algorithm(algorithm, Operation::Encrypt)?;
        key.can_be_used_for_algorithm(&normalized, Usage::Encrypt)?;
        tracing::debug!(algorithm = normalized.name(), "subtle.encrypt");
        let (result, future) = pending();
        self.backend
            .encrypt(normalized, key.platform_key().clone(), data.to_vec(), result);
        expect_buffer(future.await?)
    }

    pub async fn decrypt(
        &self,
        algorithm: &Value,
        key: &CryptoKey,
        data: &[u8],
    ) -> Result<Vec<u8>> {
        let normalized = normalize_algorithm(algorithm, Operation::Decrypt)?;
        key.can_be_used_for_algorithm(&normalized, Usage::Decrypt)?;
        tracing::debug!(algorithm = normalized.name(), "subtle.decrypt");
        let (result, future) = pending();
        self.backend
            .decrypt(normalized, key.platform_key().clone(), data.to_vec(), result);
        expect_buffer(future.await?)
    }

    pub async fn sign(&self, algorithm: &Value, key: &CryptoKey, data: &[u8]) -> Result<Vec<u8>> {
        let normalized = normalize_algorithm(algorithm, Operation::Sign)?;
        key.can_be_used_for_algorithm(&normalized, Usage::Sign)?;
        tracing::debug!(algorithm = normalized.name(), "subtle.sign");
        let (result, future) = pending();
        self.backend
            .sign(normalized, key.platform_key().clone(), data.to_vec(), result);
        expect_buffer(future.await?)
    }

    /// The `verify()` method; mismatches resolve to `false`, not errors
    pub async fn verify_signature(
        &self,
        algorithm: &Value,
        key: &CryptoKey,
        signature: &[u8],
        data: &[u8],
    ) -> Result<bool> {
        let normalized = normalize_algorithm(algorithm, Operation::Verify)?;
        key.can_be_used_for_algorithm(&normalized, Usage::Verify)?;
        tracing::debug!(algorithm = normalized.name(), "subtle.verify");
        let (result, future) = pending();
        self.backend.verify_signature(
            normalized,
            key.platform_key().clone(),
            signature.to_vec(),
            data.to_vec(),
            result,
        );
        expect_bool(future.await?)
    }

    pub async fn digest(&self, algorithm: &Value, data: &[u8]) -> Result<Vec<u8>> {
        let normalized = normalize_algorithm(algorithm, Operation::Digest)?;
        tracing::debug!(algorithm = normalized.name(), "subtle.digest");
        let (result, future) = pending();
        self.backend.digest(normalized, data.to_vec(), result);
        expect_buffer(future.await?)
    }

    pub async fn generate_key(
        &self,
        algorithm: &Value,
        extractable: bool,
        key_usages: &[String],
    ) -> Result<GeneratedKey> {
        let normalized = normalize_algorithm(algorithm, Operation::GenerateKey)?;
        let usages = CryptoKey::parse_usage_mask(key_usages)?;
        tracing::debug!(algorithm = normalized.name(), "subtle.generateKey");
        let (result, future) = pending();
        self.backend
            .generate_key(normalized, extractable, usages, result);
        match future.await? {
            CryptoValue::Key(key) => Ok(GeneratedKey::Single(CryptoKey::new(key))),
            CryptoValue::KeyPair {
                public_key,
                private_key,
            } => Ok(GeneratedKey::Pair {
                public_key: CryptoKey::new(public_key),
                private_key: CryptoKey::new(private_key),
            }),
            _ => Err(unexpected_completion()),
        }
    }

    pub async fn import_key(
        &self,
        format: &str,
        key_data: KeyData,
        algorithm: &Value,
        extractable: bool,
        key_usages: &[String],
    ) -> Result<CryptoKey> {
        let format = CryptoKey::parse_format(format)?;
        let data = match (format, key_data) {
            (orca_platform::KeyFormat::Jwk, KeyData::Jwk(jwk)) => jwk.to_json_bytes()?,
            (orca_platform::KeyFormat::Jwk, KeyData::Bytes(_)) => {
                return Err(Error::type_error(
                    "Key data must be a JSON Web Key for jwk format",
                ));
            },
            (_, KeyData::Bytes(bytes)) => bytes,
            (_, KeyData::Jwk(_)) => {
                return Err(Error::type_error(
                    "Key data must be a BufferSource for non-JWK formats",
                ));
            },
        };
        let usages = CryptoKey::parse_usage_mask(key_usages)?;
        let normalized = normalize_algorithm(algorithm, Operation::ImportKey)?;
        tracing::debug!(algorithm = normalized.name(), "subtle.importKey");
        let (result, future) = pending();
        self.backend
            .import_key(format, data, normalized, extractable, usages, result);
        expect_key(future.await?).map(CryptoKey::new)
    }

    pub async fn export_key(&self, format: &str, key: &CryptoKey) -> Result<ExportedKey> {
        let format = CryptoKey::parse_format(format)?;
        if !key.extractable() {
            return Err(Error::invalid_access("key is not extractable"));
        }
        tracing::debug!("subtle.exportKey");
        let (result, future) = pending();
        self.backend
            .export_key(format, key.platform_key().clone(), result);
        match format {
            orca_platform::KeyFormat::Jwk => {
                let json = expect_json(future.await?)?;
                JsonWebKey::from_json_bytes(json.as_bytes()).map(ExportedKey::Jwk)
            },
            _ => expect_buffer(future.await?).map(ExportedKey::Bytes),
        }
    }

    pub async fn wrap_key(
        &self,
        format: &str,
        key: &CryptoKey,
        wrapping_key: &CryptoKey,
        wrap_algorithm: &Value,
    ) -> Result<Vec<u8>> {
        let format = CryptoKey::parse_format(format)?;
        let normalized = normalize_algorithm(wrap_algorithm, Operation::WrapKey)?;
        wrapping_key.can_be_used_for_algorithm(&normalized, Usage::WrapKey)?;
        if !key.extractable() {
            return Err(Error::invalid_access("key is not extractable"));
        }
        tracing::debug!(algorithm = normalized.name(), "subtle.wrapKey");
        let (result, future) = pending();
        self.backend.wrap_key(
            format,
            key.platform_key().clone(),
            wrapping_key.platform_key().clone(),
            normalized,
            result,
        );
        expect_buffer(future.await?)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn unwrap_key(
        &self,
        format: &str,
        wrapped_key: &[u8],
        unwrapping_key: &CryptoKey,
        unwrap_algorithm: &Value,
        unwrapped_key_algorithm: &Value,
        extractable: bool,
        key_usages: &[String],
    ) -> Result<CryptoKey> {
        let format = CryptoKey::parse_format(format)?;
        let normalized_unwrap = normalize_algorithm(unwrap_algorithm, Operation::UnwrapKey)?;
        let normalized_import =
            normalize_algorithm(unwrapped_key_algorithm, Operation::ImportKey)?;
        let usages = CryptoKey::parse_usage_mask(key_usages)?;
        unwrapping_key.can_be_used_for_algorithm(&normalized_unwrap, Usage::UnwrapKey)?;
        tracing::debug!(algorithm = normalized_unwrap.name(), "subtle.unwrapKey");
        let (result, future) = pending();
        self.backend.unwrap_key(
            format,
            wrapped_key.to_vec(),
            unwrapping_key.platform_key().clone(),
            normalized_unwrap,
            normalized_import,
            extractable,
            usages,
            result,
        );
        expect_key(future.await?).map(CryptoKey::new)
    }

    pub async fn derive_bits(
        &self,
        algorithm: &Value,
        base_key: &CryptoKey,
        length_bits: u32,
    ) -> Result<Vec<u8>> {
        let normalized = normalize_algorithm(algorithm, Operation::DeriveBits)?;
        base_key.can_be_used_for_algorithm(&normalized, Usage::DeriveBits)?;
        tracing::debug!(algorithm = normalized.name(), "subtle.deriveBits");
        let (result, future) = pending();
        self.backend.derive_bits(
            normalized,
            base_key.platform_key().clone(),
            length_bits,
            result,
        );
        expect_buffer(future.await?)
    }

    pub async fn derive_key(
        &self,
        algorithm: &Value,
        base_key: &CryptoKey,
        derived_key_type: &Value,
        extractable: bool,
        key_usages: &[String],
    ) -> Result<CryptoKey> {
        let normalized = normalize_algorithm(algorithm, Operation::DeriveBits)?;
        let import_algorithm = normalize_algorithm(derived_key_type, Operation::ImportKey)?;
        let key_length_algorithm =
            normalize_algorithm(derived_key_type, Operation::GetKeyLength)?;
        base_key.can_be_used_for_algorithm(&normalized, Usage::DeriveKey)?;
        let usages = CryptoKey::parse_usage_mask(key_usages)?;
        tracing::debug!(algorithm = normalized.name(), "subtle.deriveKey");
        let (result, future) = pending();
        self.backend.derive_key(
            normalized,
            base_key.platform_key().clone(),
            import_algorithm,
            key_length_algorithm,
            extractable,
            usages,
            result,
        );
        expect_key(future.await?).map(CryptoKey::new)
    }
}

fn unexpected_completion() -> Error {
    Error::operation("Backend completed with an unexpected result type")
}

fn expect_buffer(value: CryptoValue) -> Result<Vec<u8>> {
    match value {
        CryptoValue::Buffer(bytes) => Ok(bytes),
        _ => Err(unexpected_completion()),
    }
}

fn expect_bool(value: CryptoValue) -> Result<bool> {
    match value {
        CryptoValue::Bool(verdict) => Ok(verdict),
        _ => Err(unexpected_completion()),
    }
}

fn expect_json(value: CryptoValue) -> Result<String> {
    match value {
        CryptoValue::Json(json) => Ok(json),
        _ => Err(unexpected_completion()),
    }
}

fn expect_key(value: CryptoValue) -> Result<WebCryptoKey> {
    match value {
        CryptoValue::Key(key) => Ok(key),
        _ => Err(unexpected_completion()),
    }
}
