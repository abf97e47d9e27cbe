//! Mock Backend
//!
//! Deterministic, reproducible `WebCrypto` implementation for automated
//! testing. Transforms are reversible XOR/fold constructions, not real
//! cryptography; key material is random only where the API demands
//! distinct keys. Everything completes synchronously on the calling
//! (origin) thread.

use base64ct::{Base64UrlUnpadded, Encoding};
use rand::RngCore;
use serde_json::json;

use crate::algorithm::AlgorithmId;
use crate::backend::WebCrypto;
use crate::error::{Error, Result};
use crate::key::{
    KeyAlgorithm, KeyAlgorithmParams, KeyFormat, KeyHandle, KeyType, UsageMask, WebCryptoKey,
};
use crate::params::{AlgorithmParams, NamedCurve, WebCryptoAlgorithm};
use crate::result::WebCryptoResult;

/// Key material held by mock keys
pub struct MockKeyHandle {
    material: Vec<u8>,
}

impl MockKeyHandle {
    pub fn new(material: Vec<u8>) -> Self {
        Self { material }
    }

    pub fn material(&self) -> &[u8] {
        &self.material
    }
}

impl KeyHandle for MockKeyHandle {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Deterministic mock crypto engine
#[derive(Default)]
pub struct MockCrypto;

impl MockCrypto {
    pub fn new() -> Self {
        Self
    }
}

fn key_material(key: &WebCryptoKey) -> Result<&[u8]> {
    key.handle()
        .as_any()
        .downcast_ref::<MockKeyHandle>()
        .map(MockKeyHandle::material)
        .ok_or_else(|| Error::operation("Key was not created by this backend"))
}

/// XOR keystream; its own inverse, so decrypt(encrypt(x)) == x
fn xor_transform(material: &[u8], data: &[u8]) -> Vec<u8> {
    data.iter()
        .enumerate()
        .map(|(index, byte)| byte ^ material[index % material.len()])
        .collect()
}

/// Fold input into `out_len` pseudo-digest bytes
fn fold_digest(seed: u64, data: &[u8], out_len: usize) -> Vec<u8> {
    let mut state = 0xcbf2_9ce4_8422_2325u64 ^ seed;
    for byte in data {
        state ^= u64::from(*byte);
        state = state.wrapping_mul(0x0000_0100_0000_01b3);
    }
    let mut out = Vec::with_capacity(out_len);
    for _ in 0..out_len {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        out.push((state >> 33) as u8);
    }
    out
}

fn digest_length_bytes(id: AlgorithmId) -> usize {
    match id {
        AlgorithmId::Sha1 => 20,
        AlgorithmId::Sha384 => 48,
        AlgorithmId::Sha512 => 64,
        _ => 32,
    }
}

/// HMAC default key length is the hash block size
fn block_size_bits(id: AlgorithmId) -> u32 {
    match id {
        AlgorithmId::Sha384 | AlgorithmId::Sha512 => 1024,
        _ => 512,
    }
}

fn curve_field_bytes(curve: NamedCurve) -> usize {
    match curve {
        NamedCurve::P256 => 32,
        NamedCurve::P384 => 48,
        NamedCurve::P521 => 66,
    }
}

fn signature_length(key: &WebCryptoKey) -> usize {
    match key.algorithm().params() {
        KeyAlgorithmParams::Hmac { hash, .. } => digest_length_bytes(*hash),
        KeyAlgorithmParams::RsaHashed {
            modulus_length_bits,
            ..
        } => (*modulus_length_bits as usize) / 8,
        KeyAlgorithmParams::Ec { curve } => curve_field_bytes(*curve) * 2,
        _ => 32,
    }
}

fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    bytes
}

const PUBLIC_USAGES: u16 = 1 | 8 | 64; // encrypt, verify, wrapKey
const PRIVATE_USAGES: u16 = 2 | 4 | 16 | 32 | 128; // decrypt, sign, deriveKey, deriveBits, unwrapKey

fn split_pair_usages(usages: UsageMask) -> (UsageMask, UsageMask) {
    (
        usages.intersect(UsageMask::from_bits(PUBLIC_USAGES)),
        usages.intersect(UsageMask::from_bits(PRIVATE_USAGES)),
    )
}

fn secret_key(material: Vec<u8>, algorithm: KeyAlgorithm, extractable: bool, usages: UsageMask) -> WebCryptoKey {
    WebCryptoKey::new(
        Box::new(MockKeyHandle::new(material)),
        KeyType::Secret,
        extractable,
        algorithm,
        usages,
    )
}

impl MockCrypto {
    fn generate_key_inner(
        &self,
        algorithm: &WebCryptoAlgorithm,
        extractable: bool,
        usages: UsageMask,
    ) -> Result<GeneratedKey> {
        match algorithm.params() {
            AlgorithmParams::AesKeyGen(params) => {
                if usages.is_empty() {
                    return Err(Error::syntax(
                        "Usages cannot be empty when creating a key",
                    ));
                }
                if !matches!(params.length_bits, 128 | 192 | 256) {
                    return Err(Error::operation(
                        "AES key length must be 128, 192 or 256 bits",
                    ));
                }
                let material = random_bytes(usize::from(params.length_bits) / 8);
                let key_algorithm = KeyAlgorithm::aes(algorithm.id(), params.length_bits);
                Ok(GeneratedKey::Single(secret_key(
                    material,
                    key_algorithm,
                    extractable,
                    usages,
                )))
            },
            AlgorithmParams::HmacKeyGen(params) => {
                if usages.is_empty() {
                    return Err(Error::syntax(
                        "Usages cannot be empty when creating a key",
                    ));
                }
                let hash = params.hash.id();
                let length_bits = params.length_bits.unwrap_or(block_size_bits(hash));
                if length_bits == 0 {
                    return Err(Error::operation("HMAC key length cannot be zero"));
                }
                let material = random_bytes(length_bits.div_ceil(8) as usize);
                Ok(GeneratedKey::Single(secret_key(
                    material,
                    KeyAlgorithm::hmac(hash, length_bits),
                    extractable,
                    usages,
                )))
            },
            AlgorithmParams::RsaHashedKeyGen(params) => {
                let (public_usages, private_usages) = split_pair_usages(usages);
                if private_usages.is_empty() {
                    return Err(Error::syntax(
                        "Usages cannot be empty when creating a key",
                    ));
                }
                if params.modulus_length_bits < 256 || params.modulus_length_bits % 8 != 0 {
                    return Err(Error::operation("Invalid RSA modulus length"));
                }
                let material = random_bytes((params.modulus_length_bits / 8) as usize);
                let key_algorithm = KeyAlgorithm::rsa_hashed(
                    algorithm.id(),
                    params.modulus_length_bits,
                    params.public_exponent.clone(),
                    params.hash.id(),
                );
                let public_key = WebCryptoKey::new(
                    Box::new(MockKeyHandle::new(material.clone())),
                    KeyType::Public,
                    true,
                    key_algorithm.clone(),
                    public_usages,
                );
                let private_key = WebCryptoKey::new(
                    Box::new(MockKeyHandle::new(material)),
                    KeyType::Private,
                    extractable,
                    key_algorithm,
                    private_usages,
                );
                Ok(GeneratedKey::Pair {
                    public_key,
                    private_key,
                })
            },
            AlgorithmParams::EcKeyGen(params) => {
                let (public_usages, private_usages) = split_pair_usages(usages);
                if private_usages.is_empty() {
                    return Err(Error::syntax(
                        "Usages cannot be empty when creating a key",
                    ));
                }
                let material = random_bytes(curve_field_bytes(params.curve));
                let key_algorithm = KeyAlgorithm::ec(algorithm.id(), params.curve);
                let public_key = WebCryptoKey::new(
                    Box::new(MockKeyHandle::new(material.clone())),
                    KeyType::Public,
                    true,
                    key_algorithm.clone(),
                    public_usages,
                );
                let private_key = WebCryptoKey::new(
                    Box::new(MockKeyHandle::new(material)),
                    KeyType::Private,
                    extractable,
                    key_algorithm,
                    private_usages,
                );
                Ok(GeneratedKey::Pair {
                    public_key,
                    private_key,
                })
            },
            _ => Err(Error::operation("Key generation is not available")),
        }
    }

    fn import_key_inner(
        &self,
        format: KeyFormat,
        key_data: &[u8],
        algorithm: &WebCryptoAlgorithm,
        extractable: bool,
        usages: UsageMask,
    ) -> Result<WebCryptoKey> {
        match format {
            KeyFormat::Raw => self.import_raw(key_data, algorithm, extractable, usages),
            KeyFormat::Jwk => self.import_jwk(key_data, algorithm, extractable, usages),
            KeyFormat::Pkcs8 => {
                let key_algorithm = asymmetric_key_algorithm(algorithm)?;
                if key_data.is_empty() {
                    return Err(Error::data("Key data is empty"));
                }
                if usages.is_empty() {
                    return Err(Error::syntax(
                        "Usages cannot be empty when creating a key",
                    ));
                }
                Ok(WebCryptoKey::new(
                    Box::new(MockKeyHandle::new(key_data.to_vec())),
                    KeyType::Private,
                    extractable,
                    key_algorithm,
                    usages,
                ))
            },
            KeyFormat::Spki => {
                let key_algorithm = asymmetric_key_algorithm(algorithm)?;
                if key_data.is_empty() {
                    return Err(Error::data("Key data is empty"));
                }
                Ok(WebCryptoKey::new(
                    Box::new(MockKeyHandle::new(key_data.to_vec())),
                    KeyType::Public,
                    true,
                    key_algorithm,
                    usages,
                ))
            },
        }
    }

    fn import_raw(
        &self,
        key_data: &[u8],
        algorithm: &WebCryptoAlgorithm,
        extractable: bool,
        usages: UsageMask,
    ) -> Result<WebCryptoKey> {
        match algorithm.id() {
            AlgorithmId::AesCbc | AlgorithmId::AesCtr | AlgorithmId::AesGcm | AlgorithmId::AesKw => {
                if !matches!(key_data.len(), 16 | 24 | 32) {
                    return Err(Error::data("AES key data must be 128, 192 or 256 bits"));
                }
                if usages.is_empty() {
                    return Err(Error::syntax(
                        "Usages cannot be empty when creating a key",
                    ));
                }
                let key_algorithm =
                    KeyAlgorithm::aes(algorithm.id(), (key_data.len() * 8) as u16);
                Ok(secret_key(key_data.to_vec(), key_algorithm, extractable, usages))
            },
            AlgorithmId::Hmac => {
                let params = algorithm
                    .hmac_import_params()
                    .ok_or_else(|| Error::operation("Missing HMAC import parameters"))?;
                if key_data.is_empty() {
                    return Err(Error::data("HMAC key data cannot be empty"));
                }
                if usages.is_empty() {
                    return Err(Error::syntax(
                        "Usages cannot be empty when creating a key",
                    ));
                }
                let length_bits = params
                    .length_bits
                    .unwrap_or((key_data.len() * 8) as u32);
                Ok(secret_key(
                    key_data.to_vec(),
                    KeyAlgorithm::hmac(params.hash.id(), length_bits),
                    extractable,
                    usages,
                ))
            },
            AlgorithmId::Hkdf | AlgorithmId::Pbkdf2 => {
                if extractable {
                    return Err(Error::syntax(
                        "extractable must be false for key derivation material",
                    ));
                }
                Ok(secret_key(
                    key_data.to_vec(),
                    KeyAlgorithm::without_params(algorithm.id()),
                    false,
                    usages,
                ))
            },
            AlgorithmId::Ecdsa | AlgorithmId::Ecdh => {
                let params = algorithm
                    .ec_key_import_params()
                    .ok_or_else(|| Error::operation("Missing EC import parameters"))?;
                if key_data.is_empty() {
                    return Err(Error::data("EC point data is empty"));
                }
                Ok(WebCryptoKey::new(
                    Box::new(MockKeyHandle::new(key_data.to_vec())),
                    KeyType::Public,
                    true,
                    KeyAlgorithm::ec(algorithm.id(), params.curve),
                    usages,
                ))
            },
            _ => Err(Error::not_supported(
                "Raw import is not supported for this algorithm",
            )),
        }
    }

    fn import_jwk(
        &self,
        key_data: &[u8],
        algorithm: &WebCryptoAlgorithm,
        extractable: bool,
        usages: UsageMask,
    ) -> Result<WebCryptoKey> {
        let jwk: serde_json::Value = serde_json::from_slice(key_data)
            .map_err(|_| Error::data("Failed to parse JSON Web Key"))?;
        let kty = jwk
            .get("kty")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::data("JWK member kty is missing or not a string"))?;
        match kty {
            "oct" => {
                let k = jwk
                    .get("k")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| Error::data("JWK member k is missing or not a string"))?;
                let material = Base64UrlUnpadded::decode_vec(k)
                    .map_err(|_| Error::data("JWK member k could not be base64url-decoded"))?;
                self.import_raw(&material, algorithm, extractable, usages)
            },
            "RSA" | "EC" => {
                let field = if kty == "RSA" { "n" } else { "x" };
                let encoded = jwk.get(field).and_then(|v| v.as_str()).ok_or_else(|| {
                    Error::data(format!("JWK member {field} is missing or not a string"))
                })?;
                let material = Base64UrlUnpadded::decode_vec(encoded).map_err(|_| {
                    Error::data(format!("JWK member {field} could not be base64url-decoded"))
                })?;
                let key_algorithm = asymmetric_key_algorithm(algorithm)?;
                let key_type = if jwk.get("d").is_some() {
                    KeyType::Private
                } else {
                    KeyType::Public
                };
                Ok(WebCryptoKey::new(
                    Box::new(MockKeyHandle::new(material)),
                    key_type,
                    if key_type == KeyType::Public { true } else { extractable },
                    key_algorithm,
                    usages,
                ))
            },
            _ => Err(Error::data("JWK member kty is unrecognized")),
        }
    }

    fn export_key_inner(&self, format: KeyFormat, key: &WebCryptoKey) -> Result<Exported> {
        if !key.extractable() {
            return Err(Error::invalid_access("Key is not extractable"));
        }
        let material = key_material(key)?;
        match format {
            KeyFormat::Raw => {
                if key.key_type() == KeyType::Private {
                    return Err(Error::invalid_access(
                        "Private keys cannot be exported in raw format",
                    ));
                }
                Ok(Exported::Bytes(material.to_vec()))
            },
            KeyFormat::Pkcs8 => {
                if key.key_type() != KeyType::Private {
                    return Err(Error::invalid_access(
                        "Only private keys can be exported as pkcs8",
                    ));
                }
                Ok(Exported::Bytes(material.to_vec()))
            },
            KeyFormat::Spki => {
                if key.key_type() != KeyType::Public {
                    return Err(Error::invalid_access(
                        "Only public keys can be exported as spki",
                    ));
                }
                Ok(Exported::Bytes(material.to_vec()))
            },
            KeyFormat::Jwk => {
                let encoded = Base64UrlUnpadded::encode_string(material);
                let key_ops: Vec<&str> =
                    key.usages().usages().iter().map(|u| u.as_str()).collect();
                let jwk = match key.key_type() {
                    KeyType::Secret => json!({
                        "kty": "oct",
                        "k": encoded,
                        "ext": key.extractable(),
                        "key_ops": key_ops,
                    }),
                    KeyType::Public => json!({
                        "kty": jwk_kty(key),
                        "n": encoded,
                        "ext": key.extractable(),
                        "key_ops": key_ops,
                    }),
                    KeyType::Private => json!({
                        "kty": jwk_kty(key),
                        "n": encoded,
                        "d": encoded,
                        "ext": key.extractable(),
                        "key_ops": key_ops,
                    }),
                };
                Ok(Exported::Json(jwk.to_string()))
            },
        }
    }

    fn derive_bits_inner(
        &self,
        algorithm: &WebCryptoAlgorithm,
        base_key: &WebCryptoKey,
        length_bits: u32,
    ) -> Result<Vec<u8>> {
        if length_bits == 0 || length_bits % 8 != 0 {
            return Err(Error::operation(
                "Derivation length must be a non-zero multiple of 8 bits",
            ));
        }
        let mut input = key_material(base_key)?.to_vec();
        match algorithm.params() {
            AlgorithmParams::Hkdf(params) => {
                input.extend_from_slice(&params.salt);
                input.extend_from_slice(&params.info);
            },
            AlgorithmParams::Pbkdf2(params) => {
                if params.iterations == 0 {
                    return Err(Error::operation("Iteration count cannot be zero"));
                }
                input.extend_from_slice(&params.salt);
                input.extend_from_slice(&params.iterations.to_be_bytes());
            },
            AlgorithmParams::EcdhKeyDerive(params) => {
                input.extend_from_slice(key_material(&params.public)?);
            },
            _ => return Err(Error::operation("Algorithm cannot derive bits")),
        }
        Ok(fold_digest(
            algorithm.id() as u64,
            &input,
            (length_bits / 8) as usize,
        ))
    }

    fn key_length_bits(&self, key_length_algorithm: &WebCryptoAlgorithm) -> Result<u32> {
        match key_length_algorithm.params() {
            AlgorithmParams::AesDerivedKey(params) => {
                if !matches!(params.length_bits, 128 | 192 | 256) {
                    return Err(Error::operation(
                        "AES key length must be 128, 192 or 256 bits",
                    ));
                }
                Ok(u32::from(params.length_bits))
            },
            AlgorithmParams::HmacImport(params) => Ok(params
                .length_bits
                .unwrap_or(block_size_bits(params.hash.id()))),
            // KDF keys have no intrinsic length; pick a stable default
            AlgorithmParams::None => Ok(256),
            _ => Err(Error::operation("Cannot determine derived key length")),
        }
    }
}

fn jwk_kty(key: &WebCryptoKey) -> &'static str {
    match key.algorithm().params() {
        KeyAlgorithmParams::Ec { .. } => "EC",
        _ => "RSA",
    }
}

fn asymmetric_key_algorithm(algorithm: &WebCryptoAlgorithm) -> Result<KeyAlgorithm> {
    match algorithm.params() {
        AlgorithmParams::RsaHashedImport(params) => Ok(KeyAlgorithm::rsa_hashed(
            algorithm.id(),
            2048,
            vec![0x01, 0x00, 0x01],
            params.hash.id(),
        )),
        AlgorithmParams::EcKeyImport(params) => {
            Ok(KeyAlgorithm::ec(algorithm.id(), params.curve))
        },
        _ => Err(Error::not_supported(
            "Format is not supported for this algorithm",
        )),
    }
}

enum Exported {
    Bytes(Vec<u8>),
    Json(String),
}

enum GeneratedKey {
    Single(WebCryptoKey),
    Pair {
        public_key: WebCryptoKey,
        private_key: WebCryptoKey,
    },
}

fn finish<T>(result: WebCryptoResult, outcome: Result<T>, complete: impl FnOnce(WebCryptoResult, T)) {
    if result.cancelled() {
        tracing::debug!("dropping completion for cancelled operation");
        return;
    }
    match outcome {
        Ok(value) => complete(result, value),
        Err(error) => result.complete_with_error(error),
    }
}

impl WebCrypto for MockCrypto {
    fn encrypt(
        &self,
        _algorithm: WebCryptoAlgorithm,
        key: WebCryptoKey,
        data: Vec<u8>,
        result: WebCryptoResult,
    ) {
        let outcome = key_material(&key).map(|material| xor_transform(material, &data));
        finish(result, outcome, WebCryptoResult::complete_with_buffer);
    }

    fn decrypt(
        &self,
        _algorithm: WebCryptoAlgorithm,
        key: WebCryptoKey,
        data: Vec<u8>,
        result: WebCryptoResult,
    ) {
        let outcome = key_material(&key).map(|material| xor_transform(material, &data));
        finish(result, outcome, WebCryptoResult::complete_with_buffer);
    }

    fn sign(
        &self,
        _algorithm: WebCryptoAlgorithm,
        key: WebCryptoKey,
        data: Vec<u8>,
        result: WebCryptoResult,
    ) {
        let outcome = key_material(&key).map(|material| {
            let mut input = material.to_vec();
            input.extend_from_slice(&data);
            fold_digest(0x5161, &input, signature_length(&key))
        });
        finish(result, outcome, WebCryptoResult::complete_with_buffer);
    }

    fn verify_signature(
        &self,
        _algorithm: WebCryptoAlgorithm,
        key: WebCryptoKey,
        signature: Vec<u8>,
        data: Vec<u8>,
        result: WebCryptoResult,
    ) {
        let outcome = key_material(&key).map(|material| {
            let mut input = material.to_vec();
            input.extend_from_slice(&data);
            fold_digest(0x5161, &input, signature_length(&key)) == signature
        });
        finish(result, outcome, WebCryptoResult::complete_with_bool);
    }

    fn digest(&self, algorithm: WebCryptoAlgorithm, data: Vec<u8>, result: WebCryptoResult) {
        let length = digest_length_bytes(algorithm.id());
        let digest = fold_digest(algorithm.id() as u64, &data, length);
        finish(result, Ok(digest), WebCryptoResult::complete_with_buffer);
    }

    fn generate_key(
        &self,
        algorithm: WebCryptoAlgorithm,
        extractable: bool,
        usages: UsageMask,
        result: WebCryptoResult,
    ) {
        let outcome = self.generate_key_inner(&algorithm, extractable, usages);
        finish(result, outcome, |result, generated| match generated {
            GeneratedKey::Single(key) => result.complete_with_key(key),
            GeneratedKey::Pair {
                public_key,
                private_key,
            } => result.complete_with_key_pair(public_key, private_key),
        });
    }

    fn import_key(
        &self,
        format: KeyFormat,
        key_data: Vec<u8>,
        algorithm: WebCryptoAlgorithm,
        extractable: bool,
        usages: UsageMask,
        result: WebCryptoResult,
    ) {
        let outcome = self.import_key_inner(format, &key_data, &algorithm, extractable, usages);
        finish(result, outcome, WebCryptoResult::complete_with_key);
    }

    fn export_key(&self, format: KeyFormat, key: WebCryptoKey, result: WebCryptoResult) {
        let outcome = self.export_key_inner(format, &key);
        finish(result, outcome, |result, exported| match exported {
            Exported::Bytes(bytes) => result.complete_with_buffer(bytes),
            Exported::Json(json) => result.complete_with_json(json),
        });
    }

    fn wrap_key(
        &self,
        format: KeyFormat,
        key: WebCryptoKey,
        wrapping_key: WebCryptoKey,
        _wrap_algorithm: WebCryptoAlgorithm,
        result: WebCryptoResult,
    ) {
        let outcome = self.export_key_inner(format, &key).and_then(|exported| {
            let plaintext = match exported {
                Exported::Bytes(bytes) => bytes,
                Exported::Json(json) => json.into_bytes(),
            };
            key_material(&wrapping_key).map(|material| xor_transform(material, &plaintext))
        });
        finish(result, outcome, WebCryptoResult::complete_with_buffer);
    }

    fn unwrap_key(
        &self,
        format: KeyFormat,
        wrapped_key: Vec<u8>,
        unwrapping_key: WebCryptoKey,
        _unwrap_algorithm: WebCryptoAlgorithm,
        unwrapped_key_algorithm: WebCryptoAlgorithm,
        extractable: bool,
        usages: UsageMask,
        result: WebCryptoResult,
    ) {
        let outcome = key_material(&unwrapping_key)
            .map(|material| xor_transform(material, &wrapped_key))
            .and_then(|key_data| {
                self.import_key_inner(
                    format,
                    &key_data,
                    &unwrapped_key_algorithm,
                    extractable,
                    usages,
                )
            });
        finish(result, outcome, WebCryptoResult::complete_with_key);
    }

    fn derive_bits(
        &self,
        algorithm: WebCryptoAlgorithm,
        base_key: WebCryptoKey,
        length_bits: u32,
        result: WebCryptoResult,
    ) {
        let outcome = self.derive_bits_inner(&algorithm, &base_key, length_bits);
        finish(result, outcome, WebCryptoResult::complete_with_buffer);
    }

    fn derive_key(
        &self,
        algorithm: WebCryptoAlgorithm,
        base_key: WebCryptoKey,
        import_algorithm: WebCryptoAlgorithm,
        key_length_algorithm: WebCryptoAlgorithm,
        extractable: bool,
        usages: UsageMask,
        result: WebCryptoResult,
    ) {
        let outcome = self
            .key_length_bits(&key_length_algorithm)
            .and_then(|length_bits| self.derive_bits_inner(&algorithm, &base_key, length_bits))
            .and_then(|material| {
                self.import_key_inner(
                    KeyFormat::Raw,
                    &material,
                    &import_algorithm,
                    extractable,
                    usages,
                )
            });
        finish(result, outcome, WebCryptoResult::complete_with_key);
    }

    fn fill_random(&self, dest: &mut [u8]) -> Result<()> {
        rand::rngs::OsRng.fill_bytes(dest);
        Ok(())
    }
}
