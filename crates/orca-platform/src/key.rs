//! Key Model
//!
//! Immutable, shareable key records wrapping the backend's opaque key
//! material, plus the key-usage bitmask and format/type vocabularies.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::algorithm::AlgorithmId;
use crate::params::NamedCurve;

/// Key type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Secret,
    Public,
    Private,
}

impl KeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Secret => "secret",
            KeyType::Public => "public",
            KeyType::Private => "private",
        }
    }
}

/// Serialization format for key import/export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyFormat {
    Raw,
    Pkcs8,
    Spki,
    Jwk,
}

impl KeyFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyFormat::Raw => "raw",
            KeyFormat::Pkcs8 => "pkcs8",
            KeyFormat::Spki => "spki",
            KeyFormat::Jwk => "jwk",
        }
    }

    /// Exact (case-sensitive) format name lookup
    pub fn from_name(name: &str) -> Option<KeyFormat> {
        match name {
            "raw" => Some(KeyFormat::Raw),
            "pkcs8" => Some(KeyFormat::Pkcs8),
            "spki" => Some(KeyFormat::Spki),
            "jwk" => Some(KeyFormat::Jwk),
            _ => None,
        }
    }
}

/// A single permitted key operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Usage {
    Encrypt,
    Decrypt,
    Sign,
    Verify,
    DeriveKey,
    DeriveBits,
    WrapKey,
    UnwrapKey,
}

impl Usage {
    /// Bit position is fixed; serialization follows this order
    pub fn bit(self) -> u16 {
        match self {
            Usage::Encrypt => 1 << 0,
            Usage::Decrypt => 1 << 1,
            Usage::Sign => 1 << 2,
            Usage::Verify => 1 << 3,
            Usage::DeriveKey => 1 << 4,
            Usage::DeriveBits => 1 << 5,
            Usage::WrapKey => 1 << 6,
            Usage::UnwrapKey => 1 << 7,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Usage::Encrypt => "encrypt",
            Usage::Decrypt => "decrypt",
            Usage::Sign => "sign",
            Usage::Verify => "verify",
            Usage::DeriveKey => "deriveKey",
            Usage::DeriveBits => "deriveBits",
            Usage::WrapKey => "wrapKey",
            Usage::UnwrapKey => "unwrapKey",
        }
    }

    /// Exact (case-sensitive) usage name lookup
    pub fn from_name(name: &str) -> Option<Usage> {
        match name {
            "encrypt" => Some(Usage::Encrypt),
            "decrypt" => Some(Usage::Decrypt),
            "sign" => Some(Usage::Sign),
            "verify" => Some(Usage::Verify),
            "deriveKey" => Some(Usage::DeriveKey),
            "deriveBits" => Some(Usage::DeriveBits),
            "wrapKey" => Some(Usage::WrapKey),
            "unwrapKey" => Some(Usage::UnwrapKey),
            _ => None,
        }
    }

    /// All usages, in bit order
    pub fn all() -> [Usage; 8] {
        [
            Usage::Encrypt,
            Usage::Decrypt,
            Usage::Sign,
            Usage::Verify,
            Usage::DeriveKey,
            Usage::DeriveBits,
            Usage::WrapKey,
            Usage::UnwrapKey,
        ]
    }
}

/// Ordered bitmask of permitted key operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UsageMask(u16);

impl UsageMask {
    pub const EMPTY: UsageMask = UsageMask(0);

    pub fn from_bits(bits: u16) -> UsageMask {
        UsageMask(bits)
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, usage: Usage) -> bool {
        self.0 & usage.bit() != 0
    }

    pub fn with(self, usage: Usage) -> UsageMask {
        UsageMask(self.0 | usage.bit())
    }

    pub fn intersect(self, other: UsageMask) -> UsageMask {
        UsageMask(self.0 & other.0)
    }

    /// Decode back to usages, always in canonical bit order
    pub fn usages(self) -> Vec<Usage> {
        Usage::all()
            .into_iter()
            .filter(|usage| self.contains(*usage))
            .collect()
    }
}

impl FromIterator<Usage> for UsageMask {
    fn from_iter<I: IntoIterator<Item = Usage>>(iter: I) -> Self {
        iter.into_iter()
            .fold(UsageMask::EMPTY, |mask, usage| mask.with(usage))
    }
}

/// Parameters baked into a key at creation time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAlgorithmParams {
    None,
    Aes {
        length_bits: u16,
    },
    Hmac {
        hash: AlgorithmId,
        length_bits: u32,
    },
    RsaHashed {
        modulus_length_bits: u32,
        public_exponent: Vec<u8>,
        hash: AlgorithmId,
    },
    Ec {
        curve: NamedCurve,
    },
}

/// The algorithm a key was created for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAlgorithm {
    id: AlgorithmId,
    params: KeyAlgorithmParams,
}

impl KeyAlgorithm {
    pub fn without_params(id: AlgorithmId) -> KeyAlgorithm {
        KeyAlgorithm {
            id,
            params: KeyAlgorithmParams::None,
        }
    }

    pub fn aes(id: AlgorithmId, length_bits: u16) -> KeyAlgorithm {
        KeyAlgorithm {
            id,
            params: KeyAlgorithmParams::Aes { length_bits },
        }
    }

    pub fn hmac(hash: AlgorithmId, length_bits: u32) -> KeyAlgorithm {
        KeyAlgorithm {
            id: AlgorithmId::Hmac,
            params: KeyAlgorithmParams::Hmac { hash, length_bits },
        }
    }

    pub fn rsa_hashed(
        id: AlgorithmId,
        modulus_length_bits: u32,
        public_exponent: Vec<u8>,
        hash: AlgorithmId,
    ) -> KeyAlgorithm {
        KeyAlgorithm {
            id,
            params: KeyAlgorithmParams::RsaHashed {
                modulus_length_bits,
                public_exponent,
                hash,
            },
        }
    }

    pub fn ec(id: AlgorithmId, curve: NamedCurve) -> KeyAlgorithm {
        KeyAlgorithm {
            id,
            params: KeyAlgorithmParams::Ec { curve },
        }
    }

    pub fn id(&self) -> AlgorithmId {
        self.id
    }

    pub fn params(&self) -> &KeyAlgorithmParams {
        &self.params
    }
}

/// Opaque backend key material
///
/// The dispatch layer never inspects the contents; backends downcast via
/// `as_any` to recover their own concrete type.
pub trait KeyHandle: Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

struct KeyInner {
    handle: Box<dyn KeyHandle>,
    key_type: KeyType,
    extractable: bool,
    algorithm: KeyAlgorithm,
    usages: UsageMask,
}

/// A platform key: immutable, reference-counted, thread-safe
///
/// Cloning shares the underlying record; there is no way to mutate a key
/// after construction.
#[derive(Clone)]
pub struct WebCryptoKey {
    inner: Arc<KeyInner>,
}

impl WebCryptoKey {
    pub fn new(
        handle: Box<dyn KeyHandle>,
        key_type: KeyType,
        extractable: bool,
        algorithm: KeyAlgorithm,
        usages: UsageMask,
    ) -> WebCryptoKey {
        WebCryptoKey {
            inner: Arc::new(KeyInner {
                handle,
                key_type,
                extractable,
                algorithm,
                usages,
            }),
        }
    }

    pub fn handle(&self) -> &dyn KeyHandle {
        self.inner.handle.as_ref()
    }

    pub fn key_type(&self) -> KeyType {
        self.inner.key_type
    }

    pub fn extractable(&self) -> bool {
        self.inner.extractable
    }

    pub fn algorithm(&self) -> &KeyAlgorithm {
        &self.inner.algorithm
    }

    pub fn usages(&self) -> UsageMask {
        self.inner.usages
    }
}

impl fmt::Debug for WebCryptoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebCryptoKey")
            .field("key_type", &self.inner.key_type)
            .field("extractable", &self.inner.extractable)
            .field("algorithm", &self.inner.algorithm)
            .field("usages", &self.inner.usages)
            .finish_non_exhaustive()
    }
}

impl PartialEq for WebCryptoKey {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullHandle;

    impl KeyHandle for NullHandle {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_usage_bits_are_ordered() {
        let order = Usage::all();
        for (index, usage) in order.into_iter().enumerate() {
            assert_eq!(usage.bit(), 1 << index);
        }
    }

    #[test]
    fn test_mask_roundtrip_is_order_insensitive() {
        let mask: UsageMask = [Usage::WrapKey, Usage::Encrypt, Usage::Sign]
            .into_iter()
            .collect();

        assert_eq!(
            mask.usages(),
            vec![Usage::Encrypt, Usage::Sign, Usage::WrapKey]
        );
    }

    #[test]
    fn test_mask_contains() {
        let mask = UsageMask::EMPTY.with(Usage::Decrypt);

        assert!(mask.contains(Usage::Decrypt));
        assert!(!mask.contains(Usage::Encrypt));
        assert!(UsageMask::EMPTY.is_empty());
    }

    #[test]
    fn test_format_names() {
        assert_eq!(KeyFormat::from_name("raw"), Some(KeyFormat::Raw));
        assert_eq!(KeyFormat::from_name("jwk"), Some(KeyFormat::Jwk));
        assert_eq!(KeyFormat::from_name("RAW"), None);
        assert_eq!(KeyFormat::from_name("der"), None);
    }

    #[test]
    fn test_key_clone_shares_record() {
        let key = WebCryptoKey::new(
            Box::new(NullHandle),
            KeyType::Secret,
            true,
            KeyAlgorithm::aes(AlgorithmId::AesGcm, 128),
            UsageMask::EMPTY.with(Usage::Encrypt),
        );
        let copy = key.clone();

        assert_eq!(key, copy);
        assert_eq!(copy.algorithm().id(), AlgorithmId::AesGcm);
        assert_eq!(copy.key_type(), KeyType::Secret);
        assert!(copy.extractable());
    }
}
