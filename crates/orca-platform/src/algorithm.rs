//! Algorithm Identifiers
//!
//! Recognized algorithm names, their IDs, and the supported operations.

use std::cmp::Ordering;

/// Recognized crypto algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmId {
    AesCbc,
    Hmac,
    RsassaPkcs1V1_5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
    AesGcm,
    RsaOaep,
    AesCtr,
    AesKw,
    RsaPss,
    Ecdsa,
    Ecdh,
    Hkdf,
    Pbkdf2,
}

/// Number of algorithm IDs, for table sizing
pub const ALGORITHM_ID_COUNT: usize = 16;

/// One entry of the name table
struct NameMapping {
    name: &'static str,
    id: AlgorithmId,
}

// Sorted by name under ASCII case folding; from_name binary-searches it.
static ALGORITHM_NAME_MAPPINGS: &[NameMapping] = &[
    NameMapping { name: "AES-CBC", id: AlgorithmId::AesCbc },
    NameMapping { name: "AES-CTR", id: AlgorithmId::AesCtr },
    NameMapping { name: "AES-GCM", id: AlgorithmId::AesGcm },
    NameMapping { name: "AES-KW", id: AlgorithmId::AesKw },
    NameMapping { name: "ECDH", id: AlgorithmId::Ecdh },
    NameMapping { name: "ECDSA", id: AlgorithmId::Ecdsa },
    NameMapping { name: "HKDF", id: AlgorithmId::Hkdf },
    NameMapping { name: "HMAC", id: AlgorithmId::Hmac },
    NameMapping { name: "PBKDF2", id: AlgorithmId::Pbkdf2 },
    NameMapping { name: "RSA-OAEP", id: AlgorithmId::RsaOaep },
    NameMapping { name: "RSA-PSS", id: AlgorithmId::RsaPss },
    NameMapping { name: "RSASSA-PKCS1-v1_5", id: AlgorithmId::RsassaPkcs1V1_5 },
    NameMapping { name: "SHA-1", id: AlgorithmId::Sha1 },
    NameMapping { name: "SHA-256", id: AlgorithmId::Sha256 },
    NameMapping { name: "SHA-384", id: AlgorithmId::Sha384 },
    NameMapping { name: "SHA-512", id: AlgorithmId::Sha512 },
];

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    let mut rhs = b.bytes();
    for lhs_byte in a.bytes() {
        match rhs.next() {
            None => return Ordering::Greater,
            Some(rhs_byte) => {
                let ordering = lhs_byte
                    .to_ascii_lowercase()
                    .cmp(&rhs_byte.to_ascii_lowercase());
                if ordering != Ordering::Equal {
                    return ordering;
                }
            },
        }
    }
    if rhs.next().is_some() {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

impl AlgorithmId {
    /// Canonical spelling of the algorithm name
    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::AesCbc => "AES-CBC",
            AlgorithmId::Hmac => "HMAC",
            AlgorithmId::RsassaPkcs1V1_5 => "RSASSA-PKCS1-v1_5",
            AlgorithmId::Sha1 => "SHA-1",
            AlgorithmId::Sha256 => "SHA-256",
            AlgorithmId::Sha384 => "SHA-384",
            AlgorithmId::Sha512 => "SHA-512",
            AlgorithmId::AesGcm => "AES-GCM",
            AlgorithmId::RsaOaep => "RSA-OAEP",
            AlgorithmId::AesCtr => "AES-CTR",
            AlgorithmId::AesKw => "AES-KW",
            AlgorithmId::RsaPss => "RSA-PSS",
            AlgorithmId::Ecdsa => "ECDSA",
            AlgorithmId::Ecdh => "ECDH",
            AlgorithmId::Hkdf => "HKDF",
            AlgorithmId::Pbkdf2 => "PBKDF2",
        }
    }

    /// Case-insensitive lookup against the sorted name table
    pub fn from_name(name: &str) -> Option<AlgorithmId> {
        ALGORITHM_NAME_MAPPINGS
            .binary_search_by(|probe| cmp_ignore_case(probe.name, name))
            .ok()
            .map(|index| ALGORITHM_NAME_MAPPINGS[index].id)
    }

    /// Table index for per-algorithm lookups
    pub fn index(self) -> usize {
        self as usize
    }

    /// SHA-family digest algorithm
    pub fn is_hash(self) -> bool {
        matches!(
            self,
            AlgorithmId::Sha1 | AlgorithmId::Sha256 | AlgorithmId::Sha384 | AlgorithmId::Sha512
        )
    }

    /// All IDs, in table order
    pub fn all() -> [AlgorithmId; ALGORITHM_ID_COUNT] {
        [
            AlgorithmId::AesCbc,
            AlgorithmId::Hmac,
            AlgorithmId::RsassaPkcs1V1_5,
            AlgorithmId::Sha1,
            AlgorithmId::Sha256,
            AlgorithmId::Sha384,
            AlgorithmId::Sha512,
            AlgorithmId::AesGcm,
            AlgorithmId::RsaOaep,
            AlgorithmId::AesCtr,
            AlgorithmId::AesKw,
            AlgorithmId::RsaPss,
            AlgorithmId::Ecdsa,
            AlgorithmId::Ecdh,
            AlgorithmId::Hkdf,
            AlgorithmId::Pbkdf2,
        ]
    }
}

/// The dispatch-table operations
///
/// `deriveKey` and the script-facing surface compose these; the capability
/// table has exactly one column per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Encrypt,
    Decrypt,
    Sign,
    Verify,
    Digest,
    GenerateKey,
    ImportKey,
    GetKeyLength,
    DeriveBits,
    WrapKey,
    UnwrapKey,
}

/// Number of operations, for table sizing
pub const OPERATION_COUNT: usize = 11;

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Encrypt => "encrypt",
            Operation::Decrypt => "decrypt",
            Operation::Sign => "sign",
            Operation::Verify => "verify",
            Operation::Digest => "digest",
            Operation::GenerateKey => "generateKey",
            Operation::ImportKey => "importKey",
            Operation::GetKeyLength => "get key length",
            Operation::DeriveBits => "deriveBits",
            Operation::WrapKey => "wrapKey",
            Operation::UnwrapKey => "unwrapKey",
        }
    }

    /// Column index in the capability table
    pub fn index(self) -> usize {
        self as usize
    }
}
