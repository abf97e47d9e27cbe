//! Capability Table
//!
//! Declares, per algorithm, which parameter dictionary each operation
//! expects. A missing entry means the (algorithm, operation) pair is
//! unsupported and must fail normalization with NotSupported.

use crate::algorithm::{AlgorithmId, Operation, OPERATION_COUNT};

/// Tag naming a parameter dictionary type
///
/// `ParamsType::None` is a real entry: the operation is supported and
/// takes no parameters beyond the algorithm name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamsType {
    None,
    AesCbc,
    AesCtr,
    AesGcm,
    AesKeyGen,
    AesDerivedKey,
    HmacImport,
    HmacKeyGen,
    RsaHashedKeyGen,
    RsaHashedImport,
    RsaOaep,
    RsaPss,
    Ecdsa,
    EcKeyGen,
    EcKeyImport,
    EcdhKeyDerive,
    Hkdf,
    Pbkdf2,
}

/// Per-algorithm operation support
///
/// Columns are indexed by `Operation::index()`: encrypt, decrypt, sign,
/// verify, digest, generateKey, importKey, getKeyLength, deriveBits,
/// wrapKey, unwrapKey.
pub struct AlgorithmInfo {
    pub operation_params: [Option<ParamsType>; OPERATION_COUNT],
}

use ParamsType as PT;

const NO: Option<ParamsType> = None;

static AES_CBC_INFO: AlgorithmInfo = AlgorithmInfo {
    operation_params: [
        Some(PT::AesCbc),        // encrypt
        Some(PT::AesCbc),        // decrypt
        NO,                      // sign
        NO,                      // verify
        NO,                      // digest
        Some(PT::AesKeyGen),     // generateKey
        Some(PT::None),          // importKey
        Some(PT::AesDerivedKey), // getKeyLength
        NO,                      // deriveBits
        Some(PT::AesCbc),        // wrapKey
        Some(PT::AesCbc),        // unwrapKey
    ],
};

static AES_CTR_INFO: AlgorithmInfo = AlgorithmInfo {
    operation_params: [
        Some(PT::AesCtr),
        Some(PT::AesCtr),
        NO,
        NO,
        NO,
        Some(PT::AesKeyGen),
        Some(PT::None),
        Some(PT::AesDerivedKey),
        NO,
        Some(PT::AesCtr),
        Some(PT::AesCtr),
    ],
};

static AES_GCM_INFO: AlgorithmInfo = AlgorithmInfo {
    operation_params: [
        Some(PT::AesGcm),
        Some(PT::AesGcm),
        NO,
        NO,
        NO,
        Some(PT::AesKeyGen),
        Some(PT::None),
        Some(PT::AesDerivedKey),
        NO,
        Some(PT::AesGcm),
        Some(PT::AesGcm),
    ],
};

static AES_KW_INFO: AlgorithmInfo = AlgorithmInfo {
    operation_params: [
        NO,
        NO,
        NO,
        NO,
        NO,
        Some(PT::AesKeyGen),
        Some(PT::None),
        Some(PT::AesDerivedKey),
        NO,
        Some(PT::None), // wrapKey
        Some(PT::None), // unwrapKey
    ],
};

static HMAC_INFO: AlgorithmInfo = AlgorithmInfo {
    operation_params: [
        NO,
        NO,
        Some(PT::None), // sign
        Some(PT::None), // verify
        NO,
        Some(PT::HmacKeyGen),
        Some(PT::HmacImport),
        Some(PT::HmacImport), // getKeyLength
        NO,
        NO,
        NO,
    ],
};

static RSASSA_INFO: AlgorithmInfo = AlgorithmInfo {
    operation_params: [
        NO,
        NO,
        Some(PT::None),
        Some(PT::None),
        NO,
        Some(PT::RsaHashedKeyGen),
        Some(PT::RsaHashedImport),
        NO,
        NO,
        NO,
        NO,
    ],
};

static RSA_PSS_INFO: AlgorithmInfo = AlgorithmInfo {
    operation_params: [
        NO,
        NO,
        Some(PT::RsaPss),
        Some(PT::RsaPss),
        NO,
        Some(PT::RsaHashedKeyGen),
        Some(PT::RsaHashedImport),
        NO,
        NO,
        NO,
        NO,
    ],
};

static RSA_OAEP_INFO: AlgorithmInfo = AlgorithmInfo {
    operation_params: [
        Some(PT::RsaOaep),
        Some(PT::RsaOaep),
        NO,
        NO,
        NO,
        Some(PT::RsaHashedKeyGen),
        Some(PT::RsaHashedImport),
        NO,
        NO,
        Some(PT::RsaOaep),
        Some(PT::RsaOaep),
    ],
};

static ECDSA_INFO: AlgorithmInfo = AlgorithmInfo {
    operation_params: [
        NO,
        NO,
        Some(PT::Ecdsa),
        Some(PT::Ecdsa),
        NO,
        Some(PT::EcKeyGen),
        Some(PT::EcKeyImport),
        NO,
        NO,
        NO,
        NO,
    ],
};

static ECDH_INFO: AlgorithmInfo = AlgorithmInfo {
    operation_params: [
        NO,
        NO,
        NO,
        NO,
        NO,
        Some(PT::EcKeyGen),
        Some(PT::EcKeyImport),
        NO,
        Some(PT::EcdhKeyDerive), // deriveBits
        NO,
        NO,
    ],
};

static SHA_INFO: AlgorithmInfo = AlgorithmInfo {
    operation_params: [
        NO,
        NO,
        NO,
        NO,
        Some(PT::None), // digest
        NO,
        NO,
        NO,
        NO,
        NO,
        NO,
    ],
};

static HKDF_INFO: AlgorithmInfo = AlgorithmInfo {
    operation_params: [
        NO,
        NO,
        NO,
        NO,
        NO,
        NO,
        Some(PT::None), // importKey
        Some(PT::None), // getKeyLength
        Some(PT::Hkdf), // deriveBits
        NO,
        NO,
    ],
};

static PBKDF2_INFO: AlgorithmInfo = AlgorithmInfo {
    operation_params: [
        NO,
        NO,
        NO,
        NO,
        NO,
        NO,
        Some(PT::None),
        Some(PT::None),
        Some(PT::Pbkdf2),
        NO,
        NO,
    ],
};

/// Look up the support row for an algorithm
pub fn info_for(id: AlgorithmId) -> &'static AlgorithmInfo {
    match id {
        AlgorithmId::AesCbc => &AES_CBC_INFO,
        AlgorithmId::Hmac => &HMAC_INFO,
        AlgorithmId::RsassaPkcs1V1_5 => &RSASSA_INFO,
        AlgorithmId::Sha1
        | AlgorithmId::Sha256
        | AlgorithmId::Sha384
        | AlgorithmId::Sha512 => &SHA_INFO,
        AlgorithmId::AesGcm => &AES_GCM_INFO,
        AlgorithmId::RsaOaep => &RSA_OAEP_INFO,
        AlgorithmId::AesCtr => &AES_CTR_INFO,
        AlgorithmId::AesKw => &AES_KW_INFO,
        AlgorithmId::RsaPss => &RSA_PSS_INFO,
        AlgorithmId::Ecdsa => &ECDSA_INFO,
        AlgorithmId::Ecdh => &ECDH_INFO,
        AlgorithmId::Hkdf => &HKDF_INFO,
        AlgorithmId::Pbkdf2 => &PBKDF2_INFO,
    }
}

/// Parameter dictionary required for (algorithm, operation), or `None`
/// if the pair is unsupported
pub fn param_type_for(id: AlgorithmId, op: Operation) -> Option<ParamsType> {
    info_for(id).operation_params[op.index()]
}
