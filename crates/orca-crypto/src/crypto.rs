//! Crypto
//!
//! The parent crypto interface: entropy requests and UUID generation,
//! with the subtle surface hanging off it.

use std::sync::Arc;

use orca_platform::{Error, Result, WebCrypto};

use crate::subtle::SubtleCrypto;

/// Entropy quota per getRandomValues call, in bytes
const RANDOM_VALUES_QUOTA: usize = 65536;

/// The script-facing crypto root object
#[derive(Clone)]
pub struct Crypto {
    backend: Arc<dyn WebCrypto>,
    subtle: SubtleCrypto,
}

impl Crypto {
    pub fn new(backend: Arc<dyn WebCrypto>) -> Crypto {
        Crypto {
            subtle: SubtleCrypto::new(Arc::clone(&backend)),
            backend,
        }
    }

    pub fn subtle(&self) -> &SubtleCrypto {
        &self.subtle
    }

    /// Fill `dest` with cryptographically strong random bytes
    ///
    /// Requests beyond the 65,536-byte quota are rejected without
    /// touching the backend.
    pub fn get_random_values(&self, dest: &mut [u8]) -> Result<()> {
        if dest.len() > RANDOM_VALUES_QUOTA {
            return Err(Error::operation(format!(
                "The requested length of {} bytes exceeds the {} bytes of entropy available per call",
                dest.len(),
                RANDOM_VALUES_QUOTA
            )));
        }
        self.backend.fill_random(dest)
    }

    /// An RFC 4122 version 4 UUID string
    pub fn random_uuid(&self) -> Result<String> {
        let mut bytes = [0u8; 16];
        self.backend.fill_random(&mut bytes)?;
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;
        let hex: Vec<String> = bytes.iter().map(|byte| format!("{byte:02x}")).collect();
        Ok(format!(
            "{}-{}-{}-{}-{}",
            hex[0..4].concat(),
            hex[4..6].concat(),
            hex[6..8].concat(),
            hex[8..10].concat(),
            hex[10..16].concat()
        ))
    }
}
