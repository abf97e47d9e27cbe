//! Orca Platform Crypto
//!
//! Embedder-facing WebCrypto API for the Orca engine.
//!
//! Features:
//! - Algorithm IDs, name table, and per-operation capability table
//! - Strongly-typed algorithm parameters
//! - Immutable, thread-safe key records over opaque backend handles
//! - The `WebCrypto` backend trait and asynchronous result handle
//! - A deterministic mock backend for tests
//!
//! No cryptographic primitives live here; the real engine is supplied by
//! the embedder behind [`WebCrypto`].

pub mod algorithm;
pub mod backend;
pub mod error;
pub mod info;
pub mod key;
pub mod mock;
pub mod params;
pub mod result;

pub use algorithm::{AlgorithmId, Operation, ALGORITHM_ID_COUNT, OPERATION_COUNT};
pub use backend::WebCrypto;
pub use error::{Error, ErrorType, Result};
pub use info::{info_for, param_type_for, AlgorithmInfo, ParamsType};
pub use key::{
    KeyAlgorithm, KeyAlgorithmParams, KeyFormat, KeyHandle, KeyType, Usage, UsageMask,
    WebCryptoKey,
};
pub use mock::{MockCrypto, MockKeyHandle};
pub use params::{AlgorithmParams, NamedCurve, WebCryptoAlgorithm};
pub use result::{CryptoResponder, WebCryptoResult};
