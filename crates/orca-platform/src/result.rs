//! Result Handle
//!
//! Bridges an asynchronous backend operation to the caller's pending
//! promise. The handle is created on the origin thread (the one owning
//! the script context), may be cloned and queried from any thread, but
//! completion must happen on the origin thread. Each handle completes at
//! most once; the completion methods consume it.

use std::sync::Arc;

use crate::error::Error;
use crate::key::WebCryptoKey;

/// Origin-side completion sink
///
/// Implemented by the bindings layer; backends only see `WebCryptoResult`.
pub trait CryptoResponder: Send + Sync {
    fn complete_with_error(&self, error: Error);
    fn complete_with_buffer(&self, bytes: Vec<u8>);
    fn complete_with_json(&self, json: String);
    fn complete_with_bool(&self, value: bool);
    fn complete_with_key(&self, key: WebCryptoKey);
    fn complete_with_key_pair(&self, public_key: WebCryptoKey, private_key: WebCryptoKey);

    /// True once the consumer has gone away; backends should stop work
    /// and drop the handle without completing
    fn cancelled(&self) -> bool;
}

/// Shareable handle to a pending operation's result
#[derive(Clone)]
pub struct WebCryptoResult {
    responder: Arc<dyn CryptoResponder>,
}

impl WebCryptoResult {
    pub fn new(responder: Arc<dyn CryptoResponder>) -> WebCryptoResult {
        WebCryptoResult { responder }
    }

    /// Safe to call from any thread
    pub fn cancelled(&self) -> bool {
        self.responder.cancelled()
    }

    pub fn complete_with_error(self, error: Error) {
        self.responder.complete_with_error(error);
    }

    pub fn complete_with_buffer(self, bytes: Vec<u8>) {
        self.responder.complete_with_buffer(bytes);
    }

    pub fn complete_with_json(self, json: String) {
        self.responder.complete_with_json(json);
    }

    pub fn complete_with_bool(self, value: bool) {
        self.responder.complete_with_bool(value);
    }

    pub fn complete_with_key(self, key: WebCryptoKey) {
        self.responder.complete_with_key(key);
    }

    pub fn complete_with_key_pair(self, public_key: WebCryptoKey, private_key: WebCryptoKey) {
        self.responder.complete_with_key_pair(public_key, private_key);
    }
}
