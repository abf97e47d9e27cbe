//! Script Values
//!
//! Untyped values crossing the bindings boundary, with typed accessors.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Conversion failure for a dictionary member
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("{field}: Missing or not a {expected}")]
    NotA { field: String, expected: &'static str },

    #[error("{field}: Outside of numeric range")]
    OutOfRange { field: String },

    #[error("{field}: Is empty")]
    Empty { field: String },
}

impl ConvertError {
    fn not_a(field: &str, expected: &'static str) -> Self {
        Self::NotA {
            field: field.to_string(),
            expected,
        }
    }
}

/// Opaque native object smuggled through a script value
///
/// Stands in for a host object reference (e.g. a key handed back into an
/// algorithm dictionary). Compared by identity.
#[derive(Clone)]
pub struct External(pub Arc<dyn Any + Send + Sync>);

impl External {
    pub fn new<T: Any + Send + Sync>(inner: T) -> Self {
        Self(Arc::new(inner))
    }

    /// Downcast to the concrete native type
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl fmt::Debug for External {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("External(..)")
    }
}

impl PartialEq for External {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A script value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// BufferSource contents, already copied out of the caller's buffer
    Buffer(Vec<u8>),
    Array(Vec<Value>),
    Dict(Dict),
    External(External),
}

impl Value {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Buffer(bytes)
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::Buffer(bytes.to_vec())
    }
}

impl From<Dict> for Value {
    fn from(dict: Dict) -> Self {
        Value::Dict(dict)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

/// A script dictionary (string-keyed, insertion-ordered)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dict {
    entries: Vec<(String, Value)>,
}

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a member, builder-style
    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a member in place, replacing any existing entry
    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key.to_string(), value));
        }
    }

    /// Look up a member; `undefined` members count as absent
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .filter(|v| !v.is_undefined())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get_string(&self, key: &str) -> Result<&str, ConvertError> {
        match self.get(key) {
            Some(Value::String(s)) => Ok(s),
            _ => Err(ConvertError::not_a(key, "String")),
        }
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, ConvertError> {
        match self.get(key) {
            Some(Value::Bool(b)) => Ok(*b),
            _ => Err(ConvertError::not_a(key, "Boolean")),
        }
    }

    /// Required BufferSource member
    pub fn get_buffer(&self, key: &str) -> Result<&[u8], ConvertError> {
        match self.get(key) {
            Some(Value::Buffer(bytes)) => Ok(bytes),
            _ => Err(ConvertError::not_a(key, "BufferSource")),
        }
    }

    /// Optional BufferSource member; absent yields `None`
    pub fn get_optional_buffer(&self, key: &str) -> Result<Option<&[u8]>, ConvertError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Buffer(bytes)) => Ok(Some(bytes)),
            Some(_) => Err(ConvertError::not_a(key, "BufferSource")),
        }
    }

    /// Required nested dictionary member
    pub fn get_dict(&self, key: &str) -> Result<&Dict, ConvertError> {
        match self.get(key) {
            Some(Value::Dict(dict)) => Ok(dict),
            _ => Err(ConvertError::not_a(key, "Dictionary")),
        }
    }

    pub fn get_array(&self, key: &str) -> Result<&[Value], ConvertError> {
        match self.get(key) {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(ConvertError::not_a(key, "Array")),
        }
    }

    /// Raw member access for values normalized elsewhere (e.g. nested
    /// algorithm identifiers that may be either strings or dictionaries)
    pub fn get_value(&self, key: &str) -> Result<&Value, ConvertError> {
        self.get(key)
            .ok_or_else(|| ConvertError::not_a(key, "value"))
    }

    pub fn get_external(&self, key: &str) -> Result<&External, ConvertError> {
        match self.get(key) {
            Some(Value::External(ext)) => Ok(ext),
            _ => Err(ConvertError::not_a(key, "native object")),
        }
    }

    pub fn get_u8(&self, key: &str) -> Result<u8, ConvertError> {
        self.integer_in_range(key, u8::MAX as u64).map(|n| n as u8)
    }

    pub fn get_u16(&self, key: &str) -> Result<u16, ConvertError> {
        self.integer_in_range(key, u16::MAX as u64).map(|n| n as u16)
    }

    pub fn get_u32(&self, key: &str) -> Result<u32, ConvertError> {
        self.integer_in_range(key, u32::MAX as u64).map(|n| n as u32)
    }

    pub fn get_optional_u8(&self, key: &str) -> Result<Option<u8>, ConvertError> {
        match self.get(key) {
            None => Ok(None),
            Some(_) => self.get_u8(key).map(Some),
        }
    }

    pub fn get_optional_u32(&self, key: &str) -> Result<Option<u32>, ConvertError> {
        match self.get(key) {
            None => Ok(None),
            Some(_) => self.get_u32(key).map(Some),
        }
    }

    /// WebCrypto BigInteger: big-endian unsigned bytes, must be non-empty
    pub fn get_big_integer(&self, key: &str) -> Result<&[u8], ConvertError> {
        match self.get(key) {
            Some(Value::Buffer(bytes)) => {
                if bytes.is_empty() {
                    Err(ConvertError::Empty {
                        field: key.to_string(),
                    })
                } else {
                    Ok(bytes)
                }
            },
            _ => Err(ConvertError::not_a(key, "Uint8Array")),
        }
    }

    fn integer_in_range(&self, key: &str, max: u64) -> Result<u64, ConvertError> {
        let number = match self.get(key) {
            Some(Value::Number(n)) => *n,
            _ => return Err(ConvertError::not_a(key, "Number")),
        };
        if !number.is_finite() || number.fract() != 0.0 {
            return Err(ConvertError::not_a(key, "Number"));
        }
        if number < 0.0 || number > max as f64 {
            return Err(ConvertError::OutOfRange {
                field: key.to_string(),
            });
        }
        Ok(number as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_get() {
        let dict = Dict::new().set("name", "AES-GCM").set("tagLength", 128u32);

        assert_eq!(dict.get_string("name").unwrap(), "AES-GCM");
        assert_eq!(dict.get_u8("tagLength").unwrap(), 128);
    }

    #[test]
    fn test_insert_replaces() {
        let mut dict = Dict::new().set("name", "SHA-1");
        dict.insert("name", "SHA-256");

        assert_eq!(dict.get_string("name").unwrap(), "SHA-256");
    }

    #[test]
    fn test_undefined_counts_as_absent() {
        let dict = Dict::new().set("length", Value::Undefined);

        assert!(dict.get("length").is_none());
        assert!(matches!(
            dict.get_u32("length"),
            Err(ConvertError::NotA { .. })
        ));
    }

    #[test]
    fn test_numeric_range_checks() {
        let dict = Dict::new()
            .set("big", 256.0)
            .set("fractional", 1.5)
            .set("negative", -1.0);

        assert!(matches!(
            dict.get_u8("big"),
            Err(ConvertError::OutOfRange { .. })
        ));
        assert!(matches!(
            dict.get_u8("fractional"),
            Err(ConvertError::NotA { .. })
        ));
        assert!(matches!(
            dict.get_u32("negative"),
            Err(ConvertError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_no_type_coercion() {
        let dict = Dict::new().set("iterations", "1000");

        assert!(dict.get_u32("iterations").is_err());
    }

    #[test]
    fn test_big_integer_rejects_empty() {
        let dict = Dict::new()
            .set("publicExponent", Vec::<u8>::new())
            .set("modulus", vec![0x01, 0x00, 0x01]);

        assert!(matches!(
            dict.get_big_integer("publicExponent"),
            Err(ConvertError::Empty { .. })
        ));
        assert_eq!(
            dict.get_big_integer("modulus").unwrap(),
            &[0x01, 0x00, 0x01]
        );
    }

    #[test]
    fn test_optional_members() {
        let dict = Dict::new().set("iv", vec![0u8; 16]);

        assert_eq!(dict.get_optional_buffer("additionalData").unwrap(), None);
        assert_eq!(
            dict.get_optional_buffer("iv").unwrap(),
            Some(&[0u8; 16][..])
        );
        assert!(dict.get_optional_u8("tagLength").unwrap().is_none());
    }

    #[test]
    fn test_external_identity() {
        let ext = External::new(42u32);
        let dict = Dict::new().set("public", Value::External(ext.clone()));

        let fetched = dict.get_external("public").unwrap();
        assert_eq!(fetched.downcast_ref::<u32>(), Some(&42));
        assert_eq!(fetched, &ext);
    }

    #[test]
    fn test_convert_error_messages() {
        let dict = Dict::new();
        let err = dict.get_buffer("iv").unwrap_err();

        assert_eq!(err.to_string(), "iv: Missing or not a BufferSource");
    }
}
