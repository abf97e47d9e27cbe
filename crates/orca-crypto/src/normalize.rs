//! Algorithm Normalization
//!
//! Turns a loosely-typed algorithm identifier (a name string or a
//! dictionary) into a strongly-typed [`WebCryptoAlgorithm`] for one
//! operation. Nested hash identifiers are resolved recursively with the
//! digest operation. All failures are produced synchronously, before
//! any backend involvement.

use orca_idl::{ConvertError, Dict, Value};
use orca_platform::params::{
    AesCbcParams, AesCtrParams, AesDerivedKeyParams, AesGcmParams, AesKeyGenParams,
    EcKeyGenParams, EcKeyImportParams, EcdhKeyDeriveParams, EcdsaParams, HkdfParams,
    HmacImportParams, HmacKeyGenParams, Pbkdf2Params, RsaHashedImportParams,
    RsaHashedKeyGenParams, RsaOaepParams, RsaPssParams,
};
use orca_platform::{
    param_type_for, AlgorithmId, AlgorithmParams, Error, KeyType, NamedCurve, Operation,
    ParamsType, Result, WebCryptoAlgorithm,
};

use crate::crypto_key::CryptoKey;

/// Normalize an algorithm identifier for `op`
///
/// A bare string is shorthand for `{ name: <string> }`; names are
/// matched case-insensitively. Unknown names and unsupported
/// (algorithm, operation) pairs are NotSupported.
pub fn normalize_algorithm(value: &Value, op: Operation) -> Result<WebCryptoAlgorithm> {
    match value {
        Value::String(name) => {
            let dict = Dict::new().set("name", name.as_str());
            normalize_algorithm_dict(&dict, op)
        },
        Value::Dict(dict) => normalize_algorithm_dict(dict, op),
        _ => Err(Error::type_error("Not an object or a string")),
    }
}

fn normalize_algorithm_dict(dict: &Dict, op: Operation) -> Result<WebCryptoAlgorithm> {
    let name = dict
        .get_string("name")
        .map_err(|err| member_error("Algorithm", err))?;
    let id = AlgorithmId::from_name(name)
        .ok_or_else(|| Error::not_supported("Unrecognized name"))?;
    let Some(params_type) = param_type_for(id, op) else {
        return Err(Error::not_supported(format!(
            "{}: Unsupported operation: {}",
            id.as_str(),
            op.as_str()
        )));
    };
    let params = parse_params(dict, params_type)?;
    tracing::trace!(
        algorithm = id.as_str(),
        operation = op.as_str(),
        "normalized algorithm"
    );
    Ok(WebCryptoAlgorithm::new(id, params))
}

/// Member conversion failures keep the dictionary name as context, e.g.
/// "AesGcmParams: iv: Missing or not a BufferSource"
fn member_error(context: &str, err: ConvertError) -> Error {
    match err {
        ConvertError::OutOfRange { .. } => Error::type_error(format!("{context}: {err}")),
        _ => Error::syntax(format!("{context}: {err}")),
    }
}

/// Nested hash members normalize with the digest operation
fn parse_hash(dict: &Dict, context: &str) -> Result<WebCryptoAlgorithm> {
    let value = dict
        .get_value("hash")
        .map_err(|err| member_error(context, err))?;
    normalize_algorithm(value, Operation::Digest)
        .map_err(|err| Error::new(err.error_type, format!("{context}: hash: {}", err.message)))
}

fn parse_params(dict: &Dict, params_type: ParamsType) -> Result<AlgorithmParams> {
    match params_type {
        ParamsType::None => Ok(AlgorithmParams::None),
        ParamsType::AesCbc => {
            const CTX: &str = "AesCbcParams";
            let iv = dict
                .get_buffer("iv")
                .map_err(|err| member_error(CTX, err))?
                .to_vec();
            Ok(AlgorithmParams::AesCbc(AesCbcParams { iv }))
        },
        ParamsType::AesCtr => {
            const CTX: &str = "AesCtrParams";
            let counter = dict
                .get_buffer("counter")
                .map_err(|err| member_error(CTX, err))?
                .to_vec();
            let length_bits = dict
                .get_u8("length")
                .map_err(|err| member_error(CTX, err))?;
            Ok(AlgorithmParams::AesCtr(AesCtrParams {
                counter,
                length_bits,
            }))
        },
        ParamsType::AesGcm => {
            const CTX: &str = "AesGcmParams";
            let iv = dict
                .get_buffer("iv")
                .map_err(|err| member_error(CTX, err))?
                .to_vec();
            let additional_data = dict
                .get_optional_buffer("additionalData")
                .map_err(|err| member_error(CTX, err))?
                .map(<[u8]>::to_vec);
            let tag_length_bits = dict
                .get_optional_u8("tagLength")
                .map_err(|err| member_error(CTX, err))?;
            Ok(AlgorithmParams::AesGcm(AesGcmParams {
                iv,
                additional_data,
                tag_length_bits,
            }))
        },
        ParamsType::AesKeyGen => {
            const CTX: &str = "AesKeyGenParams";
            let length_bits = dict
                .get_u16("length")
                .map_err(|err| member_error(CTX, err))?;
            Ok(AlgorithmParams::AesKeyGen(AesKeyGenParams { length_bits }))
        },
        ParamsType::AesDerivedKey => {
            const CTX: &str = "AesDerivedKeyParams";
            let length_bits = dict
                .get_u16("length")
                .map_err(|err| member_error(CTX, err))?;
            Ok(AlgorithmParams::AesDerivedKey(AesDerivedKeyParams {
                length_bits,
            }))
        },
        ParamsType::HmacImport => {
            const CTX: &str = "HmacImportParams";
            let hash = parse_hash(dict, CTX)?;
            let length_bits = dict
                .get_optional_u32("length")
                .map_err(|err| member_error(CTX, err))?;
            Ok(AlgorithmParams::HmacImport(HmacImportParams {
                hash,
                length_bits,
            }))
        },
        ParamsType::HmacKeyGen => {
            const CTX: &str = "HmacKeyGenParams";
            let hash = parse_hash(dict, CTX)?;
            let length_bits = dict
                .get_optional_u32("length")
                .map_err(|err| member_error(CTX, err))?;
            Ok(AlgorithmParams::HmacKeyGen(HmacKeyGenParams {
                hash,
                length_bits,
            }))
        },
        ParamsType::RsaHashedKeyGen => {
            const CTX: &str = "RsaHashedKeyGenParams";
            let modulus_length_bits = dict
                .get_u32("modulusLength")
                .map_err(|err| member_error(CTX, err))?;
            let public_exponent = dict
                .get_big_integer("publicExponent")
                .map_err(|err| member_error(CTX, err))?
                .to_vec();
            let hash = parse_hash(dict, CTX)?;
            Ok(AlgorithmParams::RsaHashedKeyGen(RsaHashedKeyGenParams {
                modulus_length_bits,
                public_exponent,
                hash,
            }))
        },
        ParamsType::RsaHashedImport => {
            const CTX: &str = "RsaHashedImportParams";
            let hash = parse_hash(dict, CTX)?;
            Ok(AlgorithmParams::RsaHashedImport(RsaHashedImportParams {
                hash,
            }))
        },
        ParamsType::RsaOaep => {
            const CTX: &str = "RsaOaepParams";
            let label = dict
                .get_optional_buffer("label")
                .map_err(|err| member_error(CTX, err))?
                .map(<[u8]>::to_vec);
            Ok(AlgorithmParams::RsaOaep(RsaOaepParams { label }))
        },
        ParamsType::RsaPss => {
            const CTX: &str = "RsaPssParams";
            let salt_length_bytes = dict
                .get_u32("saltLength")
                .map_err(|err| member_error(CTX, err))?;
            Ok(AlgorithmParams::RsaPss(RsaPssParams { salt_length_bytes }))
        },
        ParamsType::Ecdsa => {
            const CTX: &str = "EcdsaParams";
            let hash = parse_hash(dict, CTX)?;
            Ok(AlgorithmParams::Ecdsa(EcdsaParams { hash }))
        },
        ParamsType::EcKeyGen => {
            let curve = parse_named_curve(dict, "EcKeyGenParams")?;
            Ok(AlgorithmParams::EcKeyGen(EcKeyGenParams { curve }))
        },
        ParamsType::EcKeyImport => {
            let curve = parse_named_curve(dict, "EcKeyImportParams")?;
            Ok(AlgorithmParams::EcKeyImport(EcKeyImportParams { curve }))
        },
        ParamsType::EcdhKeyDerive => {
            const CTX: &str = "EcdhKeyDeriveParams";
            let key = dict
                .get_external("public")
                .ok()
                .and_then(|external| external.downcast_ref::<CryptoKey>())
                .ok_or_else(|| {
                    Error::type_error(format!("{CTX}: public: Missing or not a CryptoKey"))
                })?;
            if key.platform_key().algorithm().id() != AlgorithmId::Ecdh {
                return Err(Error::invalid_access(
                    "public key must be an ECDH key",
                ));
            }
            if key.platform_key().key_type() != KeyType::Public {
                return Err(Error::invalid_access("public key must be a public key"));
            }
            Ok(AlgorithmParams::EcdhKeyDerive(EcdhKeyDeriveParams {
                public: key.platform_key().clone(),
            }))
        },
        ParamsType::Hkdf => {
            const CTX: &str = "HkdfParams";
            let hash = parse_hash(dict, CTX)?;
            let salt = dict
                .get_buffer("salt")
                .map_err(|err| member_error(CTX, err))?
                .to_vec();
            let info = dict
                .get_buffer("info")
                .map_err(|err| member_error(CTX, err))?
                .to_vec();
            Ok(AlgorithmParams::Hkdf(HkdfParams { hash, salt, info }))
        },
        ParamsType::Pbkdf2 => {
            const CTX: &str = "Pbkdf2Params";
            let hash = parse_hash(dict, CTX)?;
            let salt = dict
                .get_buffer("salt")
                .map_err(|err| member_error(CTX, err))?
                .to_vec();
            let iterations = dict
                .get_u32("iterations")
                .map_err(|err| member_error(CTX, err))?;
            Ok(AlgorithmParams::Pbkdf2(Pbkdf2Params {
                hash,
                salt,
                iterations,
            }))
        },
    }
}

fn parse_named_curve(dict: &Dict, context: &str) -> Result<NamedCurve> {
    let name = dict
        .get_string("namedCurve")
        .map_err(|err| member_error(context, err))?;
    NamedCurve::from_name(name).ok_or_else(|| {
        Error::not_supported(format!("{context}: namedCurve: Unrecognized namedCurve"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use orca_platform::ErrorType;

    fn name(value: &str) -> Value {
        Value::String(value.to_string())
    }

    #[test]
    fn test_string_shorthand_normalizes() {
        let algorithm = normalize_algorithm(&name("SHA-256"), Operation::Digest).unwrap();

        assert_eq!(algorithm.id(), AlgorithmId::Sha256);
        assert!(matches!(algorithm.params(), AlgorithmParams::None));
    }

    #[test]
    fn test_names_match_case_insensitively() {
        for spelling in ["sha-1", "SHA-1", "Sha-1", "sHa-1"] {
            let algorithm = normalize_algorithm(&name(spelling), Operation::Digest).unwrap();
            assert_eq!(algorithm.id(), AlgorithmId::Sha1);
            assert_eq!(algorithm.name(), "SHA-1");
        }
    }

    #[test]
    fn test_unknown_name_is_not_supported() {
        let error = normalize_algorithm(&name("SHA-0"), Operation::Digest).unwrap_err();

        assert_eq!(error.error_type, ErrorType::NotSupported);
        assert_eq!(error.message, "Unrecognized name");
    }

    #[test]
    fn test_unsupported_operation_is_not_supported() {
        let error = normalize_algorithm(&name("AES-GCM"), Operation::Digest).unwrap_err();

        assert_eq!(error.error_type, ErrorType::NotSupported);
        assert_eq!(error.message, "AES-GCM: Unsupported operation: digest");
    }

    #[test]
    fn test_identifier_must_be_string_or_dict() {
        let error = normalize_algorithm(&Value::Number(5.0), Operation::Digest).unwrap_err();

        assert_eq!(error.error_type, ErrorType::Type);
    }

    #[test]
    fn test_missing_name_member() {
        let error =
            normalize_algorithm(&Value::Dict(Dict::new()), Operation::Digest).unwrap_err();

        assert_eq!(error.error_type, ErrorType::Syntax);
        assert_eq!(error.message, "Algorithm: name: Missing or not a String");
    }

    #[test]
    fn test_aes_gcm_params() {
        let dict = Dict::new()
            .set("name", "AES-GCM")
            .set("iv", vec![1u8; 12])
            .set("additionalData", vec![2u8; 4])
            .set("tagLength", 96u32);

        let algorithm =
            normalize_algorithm(&Value::Dict(dict), Operation::Encrypt).unwrap();
        let params = algorithm.aes_gcm_params().unwrap();
        assert_eq!(params.iv, vec![1u8; 12]);
        assert_eq!(params.additional_data.as_deref(), Some(&[2u8; 4][..]));
        assert_eq!(params.tag_length_bits, Some(96));
    }

    #[test]
    fn test_aes_gcm_missing_iv_message() {
        let dict = Dict::new().set("name", "aes-gcm");
        let error = normalize_algorithm(&Value::Dict(dict), Operation::Encrypt).unwrap_err();

        assert_eq!(error.error_type, ErrorType::Syntax);
        assert_eq!(error.message, "AesGcmParams: iv: Missing or not a BufferSource");
    }

    #[test]
    fn test_nested_hash_accepts_string_and_dict() {
        let with_string = Dict::new().set("name", "HMAC").set("hash", "SHA-512");
        let with_dict = Dict::new()
            .set("name", "HMAC")
            .set("hash", Dict::new().set("name", "SHA-512"));

        for dict in [with_string, with_dict] {
            let algorithm =
                normalize_algorithm(&Value::Dict(dict), Operation::ImportKey).unwrap();
            let params = algorithm.hmac_import_params().unwrap();
            assert_eq!(params.hash.id(), AlgorithmId::Sha512);
        }
    }

    #[test]
    fn test_nested_hash_errors_carry_context() {
        let dict = Dict::new().set("name", "HMAC").set("hash", "MD5");
        let error =
            normalize_algorithm(&Value::Dict(dict), Operation::GenerateKey).unwrap_err();

        assert_eq!(error.error_type, ErrorType::NotSupported);
        assert_eq!(error.message, "HmacKeyGenParams: hash: Unrecognized name");
    }

    #[test]
    fn test_nested_hash_must_support_digest() {
        // AES-CBC is a recognized name but not a digest algorithm.
        let dict = Dict::new().set("name", "HMAC").set("hash", "AES-CBC");
        let error =
            normalize_algorithm(&Value::Dict(dict), Operation::GenerateKey).unwrap_err();

        assert_eq!(error.error_type, ErrorType::NotSupported);
        assert_eq!(
            error.message,
            "HmacKeyGenParams: hash: AES-CBC: Unsupported operation: digest"
        );
    }

    #[test]
    fn test_rsa_key_gen_params() {
        let dict = Dict::new()
            .set("name", "RSA-OAEP")
            .set("modulusLength", 2048u32)
            .set("publicExponent", vec![0x01, 0x00, 0x01])
            .set("hash", "SHA-256");

        let algorithm =
            normalize_algorithm(&Value::Dict(dict), Operation::GenerateKey).unwrap();
        let params = algorithm.rsa_hashed_key_gen_params().unwrap();
        assert_eq!(params.modulus_length_bits, 2048);
        assert_eq!(params.public_exponent, vec![0x01, 0x00, 0x01]);
        assert_eq!(params.hash.id(), AlgorithmId::Sha256);
    }

    #[test]
    fn test_rsa_empty_exponent_rejected() {
        let dict = Dict::new()
            .set("name", "RSA-PSS")
            .set("modulusLength", 2048u32)
            .set("publicExponent", Vec::<u8>::new())
            .set("hash", "SHA-256");

        let error =
            normalize_algorithm(&Value::Dict(dict), Operation::GenerateKey).unwrap_err();
        assert_eq!(error.error_type, ErrorType::Syntax);
        assert_eq!(
            error.message,
            "RsaHashedKeyGenParams: publicExponent: Is empty"
        );
    }

    #[test]
    fn test_aes_key_gen_length_out_of_range() {
        let dict = Dict::new().set("name", "AES-CBC").set("length", 70000u32);
        let error =
            normalize_algorithm(&Value::Dict(dict), Operation::GenerateKey).unwrap_err();

        assert_eq!(error.error_type, ErrorType::Type);
        assert_eq!(
            error.message,
            "AesKeyGenParams: length: Outside of numeric range"
        );
    }

    #[test]
    fn test_unknown_curve_not_supported() {
        let dict = Dict::new().set("name", "ECDSA").set("namedCurve", "P-512");
        let error =
            normalize_algorithm(&Value::Dict(dict), Operation::GenerateKey).unwrap_err();

        assert_eq!(error.error_type, ErrorType::NotSupported);
        assert_eq!(
            error.message,
            "EcKeyGenParams: namedCurve: Unrecognized namedCurve"
        );
    }

    #[test]
    fn test_unknown_members_ignored() {
        let dict = Dict::new()
            .set("name", "PBKDF2")
            .set("hash", "SHA-1")
            .set("salt", vec![0u8; 8])
            .set("iterations", 1000u32)
            .set("bogus", "ignored");

        let algorithm =
            normalize_algorithm(&Value::Dict(dict), Operation::DeriveBits).unwrap();
        let params = algorithm.pbkdf2_params().unwrap();
        assert_eq!(params.iterations, 1000);
        assert_eq!(params.hash.id(), AlgorithmId::Sha1);
    }
}
