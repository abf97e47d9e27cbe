//! Example: Basic usage of the Orca WebCrypto layer

use std::sync::Arc;

use orca_crypto::{Crypto, GeneratedKey, KeyData};
use orca_idl::{Dict, Value};
use orca_platform::MockCrypto;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // The mock backend stands in for a real crypto engine
    let crypto = Crypto::new(Arc::new(MockCrypto::new()));

    let uuid = crypto.random_uuid().expect("uuid");
    println!("random UUID: {uuid}");

    smol::block_on(async {
        let subtle = crypto.subtle();

        let digest = subtle
            .digest(&Value::from("SHA-256"), b"hello orca")
            .await
            .expect("digest");
        println!("SHA-256 digest: {} bytes", digest.len());

        let key = subtle
            .import_key(
                "raw",
                KeyData::Bytes(vec![0x42; 16]),
                &Value::from("AES-GCM"),
                true,
                &["encrypt".to_string(), "decrypt".to_string()],
            )
            .await
            .expect("import");
        let params = Value::Dict(Dict::new().set("name", "AES-GCM").set("iv", vec![0u8; 12]));
        let ciphertext = subtle
            .encrypt(&params, &key, b"attack at dawn")
            .await
            .expect("encrypt");
        let plaintext = subtle
            .decrypt(&params, &key, &ciphertext)
            .await
            .expect("decrypt");
        println!("round trip: {}", String::from_utf8_lossy(&plaintext));

        let generated = subtle
            .generate_key(
                &Value::Dict(Dict::new().set("name", "AES-CBC").set("length", 256u32)),
                true,
                &["encrypt".to_string(), "decrypt".to_string()],
            )
            .await
            .expect("generateKey");
        if let GeneratedKey::Single(key) = generated {
            println!(
                "generated a {} key, usages {:?}",
                key.key_type(),
                key.usages()
            );
        }
    });
}
