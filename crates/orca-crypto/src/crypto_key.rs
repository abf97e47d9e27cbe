//! CryptoKey
//!
//! Script-facing view over a platform key: string vocabularies for
//! formats and usages, the algorithm dictionary, and the access checks
//! run before every keyed operation.

use orca_idl::{Dict, External, Value};
use orca_platform::{
    Error, KeyAlgorithmParams, KeyFormat, Result, Usage, UsageMask, WebCryptoAlgorithm,
    WebCryptoKey,
};

/// A key as exposed to script
#[derive(Debug, Clone, PartialEq)]
pub struct CryptoKey {
    key: WebCryptoKey,
}

impl CryptoKey {
    pub fn new(key: WebCryptoKey) -> CryptoKey {
        CryptoKey { key }
    }

    /// The underlying platform key
    pub fn platform_key(&self) -> &WebCryptoKey {
        &self.key
    }

    /// "secret", "public" or "private"
    pub fn key_type(&self) -> &'static str {
        self.key.key_type().as_str()
    }

    pub fn extractable(&self) -> bool {
        self.key.extractable()
    }

    /// Usage strings in canonical bitmask order
    pub fn usages(&self) -> Vec<&'static str> {
        self.key
            .usages()
            .usages()
            .into_iter()
            .map(|usage| usage.as_str())
            .collect()
    }

    /// Build the KeyAlgorithm dictionary surfaced on `key.algorithm`
    pub fn algorithm_value(&self) -> Value {
        let algorithm = self.key.algorithm();
        let dict = Dict::new().set("name", algorithm.id().as_str());
        let dict = match algorithm.params() {
            KeyAlgorithmParams::None => dict,
            KeyAlgorithmParams::Aes { length_bits } => {
                dict.set("length", u32::from(*length_bits))
            },
            KeyAlgorithmParams::Hmac { hash, length_bits } => dict
                .set("hash", Dict::new().set("name", hash.as_str()))
                .set("length", *length_bits),
            KeyAlgorithmParams::RsaHashed {
                modulus_length_bits,
                public_exponent,
                hash,
            } => dict
                .set("modulusLength", *modulus_length_bits)
                .set("publicExponent", public_exponent.clone())
                .set("hash", Dict::new().set("name", hash.as_str())),
            KeyAlgorithmParams::Ec { curve } => dict.set("namedCurve", curve.as_str()),
        };
        Value::Dict(dict)
    }

    /// Wrap for use as a dictionary member (e.g. ECDH `public`)
    pub fn to_value(&self) -> Value {
        Value::External(External::new(self.clone()))
    }

    /// Parse a key serialization format name
    pub fn parse_format(format: &str) -> Result<KeyFormat> {
        KeyFormat::from_name(format)
            .ok_or_else(|| Error::type_error("Invalid keyFormat argument"))
    }

    /// Parse usage strings into the ordered bitmask
    pub fn parse_usage_mask(usages: &[String]) -> Result<UsageMask> {
        let mut mask = UsageMask::EMPTY;
        for usage in usages {
            let parsed = Usage::from_name(usage)
                .ok_or_else(|| Error::type_error("Invalid keyUsages argument"))?;
            mask = mask.with(parsed);
        }
        Ok(mask)
    }

    /// Reject keys whose algorithm or usage mask does not permit the
    /// requested operation
    pub fn can_be_used_for_algorithm(
        &self,
        algorithm: &WebCryptoAlgorithm,
        usage: Usage,
    ) -> Result<()> {
        if self.key.algorithm().id() != algorithm.id() {
            return Err(Error::invalid_access(
                "key.algorithm does not match that of operation",
            ));
        }
        if !self.key.usages().contains(usage) {
            return Err(Error::invalid_access(
                "key.usages does not permit this operation",
            ));
        }
        Ok(())
    }
}
