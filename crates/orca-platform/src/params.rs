//! Algorithm Parameters
//!
//! Strongly-typed parameter structs produced by normalization, one per
//! WebCrypto parameter dictionary, and the immutable algorithm wrapper
//! that carries them to the backend.

use std::sync::Arc;

use crate::algorithm::AlgorithmId;
use crate::key::WebCryptoKey;

/// Recognized elliptic curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedCurve {
    P256,
    P384,
    P521,
}

impl NamedCurve {
    pub fn as_str(&self) -> &'static str {
        match self {
            NamedCurve::P256 => "P-256",
            NamedCurve::P384 => "P-384",
            NamedCurve::P521 => "P-521",
        }
    }

    /// Curve names are matched case-sensitively
    pub fn from_name(name: &str) -> Option<NamedCurve> {
        match name {
            "P-256" => Some(NamedCurve::P256),
            "P-384" => Some(NamedCurve::P384),
            "P-521" => Some(NamedCurve::P521),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AesCbcParams {
    pub iv: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AesCtrParams {
    pub counter: Vec<u8>,
    pub length_bits: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AesGcmParams {
    pub iv: Vec<u8>,
    pub additional_data: Option<Vec<u8>>,
    pub tag_length_bits: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AesKeyGenParams {
    pub length_bits: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AesDerivedKeyParams {
    pub length_bits: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HmacImportParams {
    pub hash: WebCryptoAlgorithm,
    pub length_bits: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HmacKeyGenParams {
    pub hash: WebCryptoAlgorithm,
    pub length_bits: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RsaHashedKeyGenParams {
    pub modulus_length_bits: u32,
    /// Big-endian unsigned bytes, as received from the BigInteger member
    pub public_exponent: Vec<u8>,
    pub hash: WebCryptoAlgorithm,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RsaHashedImportParams {
    pub hash: WebCryptoAlgorithm,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RsaOaepParams {
    pub label: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaPssParams {
    pub salt_length_bytes: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EcdsaParams {
    pub hash: WebCryptoAlgorithm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcKeyGenParams {
    pub curve: NamedCurve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcKeyImportParams {
    pub curve: NamedCurve,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EcdhKeyDeriveParams {
    pub public: WebCryptoKey,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HkdfParams {
    pub hash: WebCryptoAlgorithm,
    pub salt: Vec<u8>,
    pub info: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pbkdf2Params {
    pub hash: WebCryptoAlgorithm,
    pub salt: Vec<u8>,
    pub iterations: u32,
}

/// The normalized parameter payload
#[derive(Debug, Clone, PartialEq)]
pub enum AlgorithmParams {
    None,
    AesCbc(AesCbcParams),
    AesCtr(AesCtrParams),
    AesGcm(AesGcmParams),
    AesKeyGen(AesKeyGenParams),
    AesDerivedKey(AesDerivedKeyParams),
    HmacImport(HmacImportParams),
    HmacKeyGen(HmacKeyGenParams),
    RsaHashedKeyGen(RsaHashedKeyGenParams),
    RsaHashedImport(RsaHashedImportParams),
    RsaOaep(RsaOaepParams),
    RsaPss(RsaPssParams),
    Ecdsa(EcdsaParams),
    EcKeyGen(EcKeyGenParams),
    EcKeyImport(EcKeyImportParams),
    EcdhKeyDerive(EcdhKeyDeriveParams),
    Hkdf(HkdfParams),
    Pbkdf2(Pbkdf2Params),
}

/// A normalized algorithm: ID plus typed parameters
///
/// Immutable and cheap to clone; the parameter payload is shared, never
/// copied or mutated after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct WebCryptoAlgorithm {
    id: AlgorithmId,
    params: Arc<AlgorithmParams>,
}

impl WebCryptoAlgorithm {
    pub fn new(id: AlgorithmId, params: AlgorithmParams) -> WebCryptoAlgorithm {
        WebCryptoAlgorithm {
            id,
            params: Arc::new(params),
        }
    }

    /// Shorthand for parameterless algorithms (digests, AES-KW wrap)
    pub fn without_params(id: AlgorithmId) -> WebCryptoAlgorithm {
        WebCryptoAlgorithm::new(id, AlgorithmParams::None)
    }

    pub fn id(&self) -> AlgorithmId {
        self.id
    }

    /// Canonical name of the algorithm
    pub fn name(&self) -> &'static str {
        self.id.as_str()
    }

    pub fn params(&self) -> &AlgorithmParams {
        &self.params
    }

    pub fn aes_cbc_params(&self) -> Option<&AesCbcParams> {
        match self.params() {
            AlgorithmParams::AesCbc(params) => Some(params),
            _ => None,
        }
    }

    pub fn aes_ctr_params(&self) -> Option<&AesCtrParams> {
        match self.params() {
            AlgorithmParams::AesCtr(params) => Some(params),
            _ => None,
        }
    }

    pub fn aes_gcm_params(&self) -> Option<&AesGcmParams> {
        match self.params() {
            AlgorithmParams::AesGcm(params) => Some(params),
            _ => None,
        }
    }

    pub fn aes_key_gen_params(&self) -> Option<&AesKeyGenParams> {
        match self.params() {
            AlgorithmParams::AesKeyGen(params) => Some(params),
            _ => None,
        }
    }

    pub fn aes_derived_key_params(&self) -> Option<&AesDerivedKeyParams> {
        match self.params() {
            AlgorithmParams::AesDerivedKey(params) => Some(params),
            _ => None,
        }
    }

    pub fn hmac_import_params(&self) -> Option<&HmacImportParams> {
        match self.params() {
            AlgorithmParams::HmacImport(params) => Some(params),
            _ => None,
        }
    }

    pub fn hmac_key_gen_params(&self) -> Option<&HmacKeyGenParams> {
        match self.params() {
            AlgorithmParams::HmacKeyGen(params) => Some(params),
            _ => None,
        }
    }

    pub fn rsa_hashed_key_gen_params(&self) -> Option<&RsaHashedKeyGenParams> {
        match self.params() {
            AlgorithmParams::RsaHashedKeyGen(params) => Some(params),
            _ => None,
        }
    }

    pub fn rsa_hashed_import_params(&self) -> Option<&RsaHashedImportParams> {
        match self.params() {
            AlgorithmParams::RsaHashedImport(params) => Some(params),
            _ => None,
        }
    }

    pub fn rsa_oaep_params(&self) -> Option<&RsaOaepParams> {
        match self.params() {
            AlgorithmParams::RsaOaep(params) => Some(params),
            _ => None,
        }
    }

    pub fn rsa_pss_params(&self) -> Option<&RsaPssParams> {
        match self.params() {
            AlgorithmParams::RsaPss(params) => Some(params),
            _ => None,
        }
    }

    pub fn ecdsa_params(&self) -> Option<&EcdsaParams> {
        match self.params() {
            AlgorithmParams::Ecdsa(params) => Some(params),
            _ => None,
        }
    }

    pub fn ec_key_gen_params(&self) -> Option<&EcKeyGenParams> {
        match self.params() {
            AlgorithmParams::EcKeyGen(params) => Some(params),
            _ => None,
        }
    }

    pub fn ec_key_import_params(&self) -> Option<&EcKeyImportParams> {
        match self.params() {
            AlgorithmParams::EcKeyImport(params) => Some(params),
            _ => None,
        }
    }

    pub fn ecdh_key_derive_params(&self) -> Option<&EcdhKeyDeriveParams> {
        match self.params() {
            AlgorithmParams::EcdhKeyDerive(params) => Some(params),
            _ => None,
        }
    }

    pub fn hkdf_params(&self) -> Option<&HkdfParams> {
        match self.params() {
            AlgorithmParams::Hkdf(params) => Some(params),
            _ => None,
        }
    }

    pub fn pbkdf2_params(&self) -> Option<&Pbkdf2Params> {
        match self.params() {
            AlgorithmParams::Pbkdf2(params) => Some(params),
            _ => None,
        }
    }
}
