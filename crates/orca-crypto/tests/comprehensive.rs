//! Comprehensive tests for orca-crypto
//!
//! Drives the full dispatch surface against the deterministic mock
//! backend: name resolution, capability enforcement, usage checks, and
//! operation round trips.

use std::sync::Arc;

use base64ct::{Base64UrlUnpadded, Encoding};
use orca_crypto::{Crypto, CryptoKey, ExportedKey, GeneratedKey, JsonWebKey, KeyData};
use orca_idl::{Dict, Value};
use orca_platform::{
    param_type_for, AlgorithmId, ErrorType, MockCrypto, Operation,
};
use smol::block_on;

fn crypto() -> Crypto {
    Crypto::new(Arc::new(MockCrypto::new()))
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn aes_key(crypto: &Crypto, usages: &[&str]) -> CryptoKey {
    block_on(crypto.subtle().import_key(
        "raw",
        KeyData::Bytes(vec![7u8; 16]),
        &Value::from("AES-GCM"),
        true,
        &strings(usages),
    ))
    .unwrap()
}

// ============================================================================
// NAME RESOLUTION
// ============================================================================

/// An identifier and operation that exercise normalization for each
/// algorithm without extra members where possible
fn identifier_for(id: AlgorithmId, name: &str) -> (Value, Operation) {
    match id {
        AlgorithmId::AesCbc | AlgorithmId::AesCtr | AlgorithmId::AesGcm | AlgorithmId::AesKw => {
            (Value::from(name), Operation::ImportKey)
        },
        AlgorithmId::Hmac | AlgorithmId::RsassaPkcs1V1_5 => (Value::from(name), Operation::Sign),
        AlgorithmId::Sha1 | AlgorithmId::Sha256 | AlgorithmId::Sha384 | AlgorithmId::Sha512 => {
            (Value::from(name), Operation::Digest)
        },
        AlgorithmId::RsaOaep => (Value::from(name), Operation::Encrypt),
        AlgorithmId::RsaPss => (
            Value::Dict(Dict::new().set("name", name).set("hash", "SHA-256")),
            Operation::ImportKey,
        ),
        AlgorithmId::Ecdsa | AlgorithmId::Ecdh => (
            Value::Dict(Dict::new().set("name", name).set("namedCurve", "P-256")),
            Operation::ImportKey,
        ),
        AlgorithmId::Hkdf | AlgorithmId::Pbkdf2 => (Value::from(name), Operation::ImportKey),
    }
}

#[test]
fn test_every_supported_name_resolves_in_any_case() {
    for id in AlgorithmId::all() {
        let canonical = id.as_str();
        let spellings = [
            canonical.to_string(),
            canonical.to_ascii_lowercase(),
            canonical.to_ascii_uppercase(),
        ];
        for spelling in spellings {
            let (identifier, op) = identifier_for(id, &spelling);
            let normalized = orca_crypto::normalize_algorithm(&identifier, op)
                .unwrap_or_else(|err| panic!("{spelling}: {err}"));
            assert_eq!(normalized.id(), id);
            assert_eq!(normalized.name(), canonical);
        }
    }
}

#[test]
fn test_unlisted_names_are_not_supported() {
    for name in ["DES", "AES", "SHA", "RC4", "Curve25519", "sha256", "AES_GCM"] {
        let error =
            orca_crypto::normalize_algorithm(&Value::from(name), Operation::Digest).unwrap_err();
        assert_eq!(error.error_type, ErrorType::NotSupported, "{name}");
    }
}

// ============================================================================
// CAPABILITY TABLE
// ============================================================================

#[test]
fn test_every_capability_hole_fails_not_supported() {
    let operations = [
        Operation::Encrypt,
        Operation::Decrypt,
        Operation::Sign,
        Operation::Verify,
        Operation::Digest,
        Operation::GenerateKey,
        Operation::ImportKey,
        Operation::GetKeyLength,
        Operation::DeriveBits,
        Operation::WrapKey,
        Operation::UnwrapKey,
    ];
    for id in AlgorithmId::all() {
        for op in operations {
            if param_type_for(id, op).is_some() {
                continue;
            }
            let error =
                orca_crypto::normalize_algorithm(&Value::from(id.as_str()), op).unwrap_err();
            assert_eq!(
                error.error_type,
                ErrorType::NotSupported,
                "{} / {}",
                id.as_str(),
                op.as_str()
            );
            assert!(
                error.message.contains("Unsupported operation"),
                "{}",
                error.message
            );
        }
    }
}

// ============================================================================
// USAGE MASKS AND FORMATS
// ============================================================================

#[test]
fn test_usage_mask_roundtrip_order_insensitive() {
    let orderings = [
        vec!["sign", "encrypt", "unwrapKey"],
        vec!["unwrapKey", "sign", "encrypt"],
        vec!["encrypt", "unwrapKey", "sign"],
    ];
    for ordering in orderings {
        let mask = CryptoKey::parse_usage_mask(&strings(&ordering)).unwrap();
        let decoded: Vec<&str> = mask.usages().iter().map(|usage| usage.as_str()).collect();
        assert_eq!(decoded, vec!["encrypt", "sign", "unwrapKey"]);
    }
}

#[test]
fn test_all_eight_usages_parse() {
    let all = strings(&[
        "encrypt",
        "decrypt",
        "sign",
        "verify",
        "deriveKey",
        "deriveBits",
        "wrapKey",
        "unwrapKey",
    ]);
    let mask = CryptoKey::parse_usage_mask(&all).unwrap();
    assert_eq!(mask.usages().len(), 8);
}

#[test]
fn test_unknown_usage_rejected() {
    let error = CryptoKey::parse_usage_mask(&strings(&["encrypt", "Decrypt"])).unwrap_err();
    assert_eq!(error.error_type, ErrorType::Type);
}

#[test]
fn test_parse_format_surface() {
    for good in ["raw", "pkcs8", "spki", "jwk"] {
        assert!(CryptoKey::parse_format(good).is_ok());
    }
    for bad in ["Raw", "JWK", "der", "pem", ""] {
        assert_eq!(
            CryptoKey::parse_format(bad).unwrap_err().error_type,
            ErrorType::Type
        );
    }
}

// ============================================================================
// KEY/ALGORITHM ACCESS CHECKS
// ============================================================================

#[test]
fn test_encrypt_rejects_mismatched_algorithm() {
    let crypto = crypto();
    let key = aes_key(&crypto, &["encrypt", "decrypt"]);

    let error = block_on(crypto.subtle().encrypt(
        &Value::Dict(Dict::new().set("name", "AES-CBC").set("iv", vec![0u8; 16])),
        &key,
        b"data",
    ))
    .unwrap_err();
    assert_eq!(error.error_type, ErrorType::InvalidAccess);
}

#[test]
fn test_encrypt_rejects_missing_usage() {
    let crypto = crypto();
    let key = aes_key(&crypto, &["decrypt"]);

    let error = block_on(crypto.subtle().encrypt(
        &Value::Dict(Dict::new().set("name", "AES-GCM").set("iv", vec![0u8; 12])),
        &key,
        b"data",
    ))
    .unwrap_err();
    assert_eq!(error.error_type, ErrorType::InvalidAccess);
    assert_eq!(
        error.message,
        "key.usages does not permit this operation"
    );
}

// ============================================================================
// OPERATION ROUND TRIPS (MOCK BACKEND)
// ============================================================================

#[test]
fn test_encrypt_decrypt_roundtrip() {
    let crypto = crypto();
    let key = aes_key(&crypto, &["encrypt", "decrypt"]);
    let algorithm = Value::Dict(Dict::new().set("name", "AES-GCM").set("iv", vec![9u8; 12]));
    let plaintext = b"the quick brown fox".to_vec();

    let ciphertext = block_on(crypto.subtle().encrypt(&algorithm, &key, &plaintext)).unwrap();
    assert_ne!(ciphertext, plaintext);

    let decrypted = block_on(crypto.subtle().decrypt(&algorithm, &key, &ciphertext)).unwrap();
    assert_eq!(decrypted, plaintext);
}

#[test]
fn test_digest_lengths_follow_algorithm() {
    let crypto = crypto();
    for (name, length) in [
        ("SHA-1", 20),
        ("SHA-256", 32),
        ("SHA-384", 48),
        ("SHA-512", 64),
    ] {
        let digest = block_on(crypto.subtle().digest(&Value::from(name), b"abc")).unwrap();
        assert_eq!(digest.len(), length, "{name}");
    }
}

#[test]
fn test_digest_is_deterministic_and_input_sensitive() {
    let crypto = crypto();
    let first = block_on(crypto.subtle().digest(&Value::from("SHA-256"), b"abc")).unwrap();
    let second = block_on(crypto.subtle().digest(&Value::from("SHA-256"), b"abc")).unwrap();
    let other = block_on(crypto.subtle().digest(&Value::from("SHA-256"), b"abd")).unwrap();

    assert_eq!(first, second);
    assert_ne!(first, other);
}

#[test]
fn test_hmac_sign_verify() {
    let crypto = crypto();
    let algorithm = Value::Dict(Dict::new().set("name", "HMAC").set("hash", "SHA-256"));
    let key = block_on(crypto.subtle().import_key(
        "raw",
        KeyData::Bytes(vec![3u8; 32]),
        &algorithm,
        false,
        &strings(&["sign", "verify"]),
    ))
    .unwrap();

    let signature = block_on(crypto.subtle().sign(&Value::from("HMAC"), &key, b"message")).unwrap();
    assert_eq!(signature.len(), 32);

    let valid = block_on(crypto.subtle().verify_signature(
        &Value::from("HMAC"),
        &key,
        &signature,
        b"message",
    ))
    .unwrap();
    assert!(valid);

    let tampered = block_on(crypto.subtle().verify_signature(
        &Value::from("HMAC"),
        &key,
        &signature,
        b"messagf",
    ))
    .unwrap();
    assert!(!tampered);
}

#[test]
fn test_generate_aes_key() {
    let crypto = crypto();
    let algorithm = Value::Dict(Dict::new().set("name", "AES-CBC").set("length", 256u32));

    let generated = block_on(crypto.subtle().generate_key(
        &algorithm,
        true,
        &strings(&["encrypt", "decrypt"]),
    ))
    .unwrap();
    let GeneratedKey::Single(key) = generated else {
        panic!("expected a single secret key");
    };
    assert_eq!(key.key_type(), "secret");
    assert!(key.extractable());
    assert_eq!(key.usages(), vec!["encrypt", "decrypt"]);

    let exported = block_on(crypto.subtle().export_key("raw", &key)).unwrap();
    let ExportedKey::Bytes(bytes) = exported else {
        panic!("expected raw bytes");
    };
    assert_eq!(bytes.len(), 32);
}

#[test]
fn test_generate_rsa_pair_splits_usages() {
    let crypto = crypto();
    let algorithm = Value::Dict(
        Dict::new()
            .set("name", "RSASSA-PKCS1-v1_5")
            .set("modulusLength", 2048u32)
            .set("publicExponent", vec![0x01, 0x00, 0x01])
            .set("hash", "SHA-256"),
    );

    let generated = block_on(crypto.subtle().generate_key(
        &algorithm,
        false,
        &strings(&["sign", "verify"]),
    ))
    .unwrap();
    let GeneratedKey::Pair {
        public_key,
        private_key,
    } = generated
    else {
        panic!("expected a key pair");
    };

    assert_eq!(public_key.key_type(), "public");
    assert!(public_key.extractable());
    assert_eq!(public_key.usages(), vec!["verify"]);

    assert_eq!(private_key.key_type(), "private");
    assert!(!private_key.extractable());
    assert_eq!(private_key.usages(), vec!["sign"]);
}

#[test]
fn test_jwk_import_export_roundtrip() {
    let crypto = crypto();
    let material: Vec<u8> = (0u8..16).collect();
    let encoded = Base64UrlUnpadded::encode_string(&material);
    let jwk = JsonWebKey {
        kty: Some("oct".to_string()),
        k: Some(encoded.clone()),
        ext: Some(true),
        ..Default::default()
    };

    let key = block_on(crypto.subtle().import_key(
        "jwk",
        KeyData::Jwk(jwk),
        &Value::from("AES-KW"),
        true,
        &strings(&["wrapKey", "unwrapKey"]),
    ))
    .unwrap();
    let algorithm_value = key.algorithm_value();
    let dict = algorithm_value.as_dict().unwrap();
    assert_eq!(dict.get_string("name").unwrap(), "AES-KW");
    assert_eq!(dict.get_u32("length").unwrap(), 128);

    let exported = block_on(crypto.subtle().export_key("jwk", &key)).unwrap();
    let ExportedKey::Jwk(exported) = exported else {
        panic!("expected a JWK");
    };
    assert_eq!(exported.kty.as_deref(), Some("oct"));
    assert_eq!(exported.k.as_deref(), Some(encoded.as_str()));
}

#[test]
fn test_wrap_unwrap_restores_key() {
    let crypto = crypto();
    let wrapping_key = block_on(crypto.subtle().import_key(
        "raw",
        KeyData::Bytes(vec![0x55u8; 16]),
        &Value::from("AES-KW"),
        false,
        &strings(&["wrapKey", "unwrapKey"]),
    ))
    .unwrap();
    let secret = aes_key(&crypto, &["encrypt", "decrypt"]);

    let wrapped = block_on(crypto.subtle().wrap_key(
        "raw",
        &secret,
        &wrapping_key,
        &Value::from("AES-KW"),
    ))
    .unwrap();
    assert_ne!(wrapped, vec![7u8; 16]);

    let unwrapped = block_on(crypto.subtle().unwrap_key(
        "raw",
        &wrapped,
        &wrapping_key,
        &Value::from("AES-KW"),
        &Value::from("AES-GCM"),
        true,
        &strings(&["encrypt", "decrypt"]),
    ))
    .unwrap();

    let exported = block_on(crypto.subtle().export_key("raw", &unwrapped)).unwrap();
    let ExportedKey::Bytes(material) = exported else {
        panic!("expected raw bytes");
    };
    assert_eq!(material, vec![7u8; 16]);
}

#[test]
fn test_derive_bits_pbkdf2() {
    let crypto = crypto();
    let base_key = block_on(crypto.subtle().import_key(
        "raw",
        KeyData::Bytes(b"password".to_vec()),
        &Value::from("PBKDF2"),
        false,
        &strings(&["deriveBits", "deriveKey"]),
    ))
    .unwrap();
    let params = |salt: Vec<u8>| {
        Value::Dict(
            Dict::new()
                .set("name", "PBKDF2")
                .set("hash", "SHA-256")
                .set("salt", salt)
                .set("iterations", 1000u32),
        )
    };

    let bits = block_on(crypto.subtle().derive_bits(&params(vec![1u8; 8]), &base_key, 256)).unwrap();
    assert_eq!(bits.len(), 32);

    let again =
        block_on(crypto.subtle().derive_bits(&params(vec![1u8; 8]), &base_key, 256)).unwrap();
    assert_eq!(bits, again);

    let salted =
        block_on(crypto.subtle().derive_bits(&params(vec![2u8; 8]), &base_key, 256)).unwrap();
    assert_ne!(bits, salted);
}

#[test]
fn test_derive_key_hkdf_to_aes() {
    let crypto = crypto();
    let base_key = block_on(crypto.subtle().import_key(
        "raw",
        KeyData::Bytes(vec![0xAAu8; 32]),
        &Value::from("HKDF"),
        false,
        &strings(&["deriveKey"]),
    ))
    .unwrap();
    let derivation = Value::Dict(
        Dict::new()
            .set("name", "HKDF")
            .set("hash", "SHA-256")
            .set("salt", vec![1u8; 16])
            .set("info", b"aead key".to_vec()),
    );
    let derived_type = Value::Dict(Dict::new().set("name", "AES-GCM").set("length", 256u32));

    let derived = block_on(crypto.subtle().derive_key(
        &derivation,
        &base_key,
        &derived_type,
        true,
        &strings(&["encrypt", "decrypt"]),
    ))
    .unwrap();

    assert_eq!(derived.key_type(), "secret");
    let algorithm_value = derived.algorithm_value();
    let dict = algorithm_value.as_dict().unwrap();
    assert_eq!(dict.get_string("name").unwrap(), "AES-GCM");
    assert_eq!(dict.get_u32("length").unwrap(), 256);

    // The derived key is immediately usable.
    let iv = Value::Dict(Dict::new().set("name", "AES-GCM").set("iv", vec![0u8; 12]));
    let ciphertext = block_on(crypto.subtle().encrypt(&iv, &derived, b"payload")).unwrap();
    let plaintext = block_on(crypto.subtle().decrypt(&iv, &derived, &ciphertext)).unwrap();
    assert_eq!(plaintext, b"payload");
}

#[test]
fn test_ecdh_derive_bits_uses_public_key() {
    let crypto = crypto();
    let ec_algorithm = Value::Dict(Dict::new().set("name", "ECDH").set("namedCurve", "P-256"));

    let generated = block_on(crypto.subtle().generate_key(
        &ec_algorithm,
        false,
        &strings(&["deriveBits"]),
    ))
    .unwrap();
    let GeneratedKey::Pair {
        public_key,
        private_key,
    } = generated
    else {
        panic!("expected a key pair");
    };

    let derive_params = Value::Dict(
        Dict::new()
            .set("name", "ECDH")
            .set("public", public_key.to_value()),
    );
    let bits =
        block_on(crypto.subtle().derive_bits(&derive_params, &private_key, 128)).unwrap();
    assert_eq!(bits.len(), 16);
}
