//! Promise Bridge
//!
//! Connects a backend completion to the caller's pending future. The
//! pair is created on the origin thread; the handle side may travel to
//! other threads for cancellation checks, but completion values are
//! only accepted on the origin thread. Dropping the future cancels the
//! operation.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, Waker};
use std::thread::{self, ThreadId};

use orca_platform::{CryptoResponder, Error, WebCryptoKey, WebCryptoResult};

/// A completed operation's payload
#[derive(Debug)]
pub enum CryptoValue {
    Buffer(Vec<u8>),
    Json(String),
    Bool(bool),
    Key(WebCryptoKey),
    KeyPair {
        public_key: WebCryptoKey,
        private_key: WebCryptoKey,
    },
}

enum State {
    Pending,
    Settled(Result<CryptoValue, Error>),
    Taken,
}

struct Cell {
    state: State,
    waker: Option<Waker>,
}

struct Shared {
    origin: ThreadId,
    cancelled: AtomicBool,
    cell: Mutex<Cell>,
}

impl Shared {
    fn settle(&self, outcome: Result<CryptoValue, Error>) {
        let outcome = if thread::current().id() == self.origin {
            outcome
        } else {
            tracing::error!("crypto result completed off its origin thread");
            Err(Error::operation("Operation completed on the wrong thread"))
        };
        let mut cell = match self.cell.lock() {
            Ok(cell) => cell,
            Err(poisoned) => poisoned.into_inner(),
        };
        if matches!(cell.state, State::Pending) {
            cell.state = State::Settled(outcome);
            if let Some(waker) = cell.waker.take() {
                waker.wake();
            }
        }
    }
}

/// Responder half, handed to the backend inside a `WebCryptoResult`
struct CryptoResultImpl {
    shared: Arc<Shared>,
}

impl CryptoResponder for CryptoResultImpl {
    fn complete_with_error(&self, error: Error) {
        self.shared.settle(Err(error));
    }

    fn complete_with_buffer(&self, bytes: Vec<u8>) {
        self.shared.settle(Ok(CryptoValue::Buffer(bytes)));
    }

    fn complete_with_json(&self, json: String) {
        self.shared.settle(Ok(CryptoValue::Json(json)));
    }

    fn complete_with_bool(&self, value: bool) {
        self.shared.settle(Ok(CryptoValue::Bool(value)));
    }

    fn complete_with_key(&self, key: WebCryptoKey) {
        self.shared.settle(Ok(CryptoValue::Key(key)));
    }

    fn complete_with_key_pair(&self, public_key: WebCryptoKey, private_key: WebCryptoKey) {
        self.shared.settle(Ok(CryptoValue::KeyPair {
            public_key,
            private_key,
        }));
    }

    fn cancelled(&self) -> bool {
        self.shared.cancelled.load(Ordering::Acquire)
    }
}

/// Consumer half; resolves once the backend completes
pub struct ResultFuture {
    shared: Arc<Shared>,
}

impl Future for ResultFuture {
    type Output = Result<CryptoValue, Error>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut cell = match self.shared.cell.lock() {
            Ok(cell) => cell,
            Err(poisoned) => poisoned.into_inner(),
        };
        match std::mem::replace(&mut cell.state, State::Taken) {
            State::Settled(outcome) => Poll::Ready(outcome),
            State::Taken => Poll::Ready(Err(Error::operation(
                "Result was already consumed",
            ))),
            State::Pending => {
                cell.state = State::Pending;
                cell.waker = Some(cx.waker().clone());
                Poll::Pending
            },
        }
    }
}

impl Drop for ResultFuture {
    fn drop(&mut self) {
        self.shared.cancelled.store(true, Ordering::Release);
    }
}

/// Create a connected (handle, future) pair on the current thread
pub fn pending() -> (WebCryptoResult, ResultFuture) {
    let shared = Arc::new(Shared {
        origin: thread::current().id(),
        cancelled: AtomicBool::new(false),
        cell: Mutex::new(Cell {
            state: State::Pending,
            waker: None,
        }),
    });
    let responder = CryptoResultImpl {
        shared: Arc::clone(&shared),
    };
    (
        WebCryptoResult::new(Arc::new(responder)),
        ResultFuture { shared },
    )
}
