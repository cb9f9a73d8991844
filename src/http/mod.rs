//! HTTP request hook: issues calls, tracks loading/error state, and cancels
//! everything still in flight when its owner goes away.
//!
//! DESIGN
//! ======
//! `HttpHook` is the owning scope (one per view). Dropping it, or calling
//! `dispose`, cancels every registered request and freezes the state. Work
//! that must outlive a borrow (spawned tasks) uses a cloned `HttpHandle`;
//! disposal of the hook still reaches requests issued through any handle.
//!
//! Every request settles under the same mutex that cancellation takes, and
//! the cancelled check happens inside that critical section. A request whose
//! token was cancelled therefore never writes `is_loading` or `error`.
//!
//! ERROR CONTRACT
//! ==============
//! The returned `Result` drives control flow. `RequestState::error` mirrors
//! the user-facing message of the same failure for display only.
//! `Cancelled` is returned but never recorded.
//!
//! Overlapping requests are tracked independently; the last one to settle
//! decides the visible state. A request future dropped before it settles
//! (timeout, losing `select!` branch) only deregisters itself, and clears
//! `is_loading` when nothing else is in flight.

pub mod error;
pub mod registry;
pub mod request;

use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;

pub use error::{GENERIC_ERROR_MESSAGE, RequestError};
pub use registry::{ActiveRequestRegistry, RequestId};
pub use request::{FileUpload, MultipartField, RequestBody, RequestSpec};

// =============================================================================
// STATE
// =============================================================================

/// Observable request state for one hook instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestState {
    pub is_loading: bool,
    pub error: Option<String>,
    /// Bumped on every mutation.
    pub revision: u64,
}

impl RequestState {
    fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
        self.revision += 1;
    }

    fn finish(&mut self, error: Option<String>) {
        self.is_loading = false;
        if error.is_some() {
            self.error = error;
        }
        self.revision += 1;
    }
}

struct Inner {
    state: RequestState,
    registry: ActiveRequestRegistry,
    disposed: bool,
}

struct Shared {
    http: reqwest::Client,
    inner: Mutex<Inner>,
}

// =============================================================================
// HANDLE
// =============================================================================

/// Cloneable sender bound to one hook instance.
#[derive(Clone)]
pub struct HttpHandle {
    shared: Arc<Shared>,
}

impl HttpHandle {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.shared.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Send a request and decode the JSON success body into `T`.
    ///
    /// Empty success bodies decode as JSON `null`, so `()` and `Option<_>`
    /// work for endpoints that answer without content.
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` if the hook was disposed or the request was
    /// cancelled mid-flight; any other variant has also been recorded in
    /// [`RequestState::error`].
    pub async fn send_request<T>(&self, spec: RequestSpec) -> Result<T, RequestError>
    where
        T: DeserializeOwned,
    {
        let id = RequestId::new();
        let token = CancellationToken::new();
        {
            let mut inner = self.lock();
            if inner.disposed {
                return Err(RequestError::Cancelled);
            }
            inner.registry.register(id, token.clone());
            inner.state.begin();
        }
        let mut in_flight = InFlight { handle: self, id, armed: true };

        tracing::debug!(method = %spec.method, url = %spec.url, request_id = %id.0, "sending request");

        let outcome = match spec.into_builder(&self.shared.http) {
            Ok(builder) => {
                tokio::select! {
                    biased;
                    () = token.cancelled() => Err(RequestError::Cancelled),
                    result = perform::<T>(builder) => result,
                }
            }
            Err(e) => Err(e),
        };

        in_flight.armed = false;
        self.settle(id, &token, outcome)
    }

    fn settle<T>(
        &self,
        id: RequestId,
        token: &CancellationToken,
        outcome: Result<T, RequestError>,
    ) -> Result<T, RequestError> {
        let mut inner = self.lock();
        if token.is_cancelled() || inner.disposed {
            tracing::debug!(request_id = %id.0, "request cancelled; state left untouched");
            return Err(RequestError::Cancelled);
        }
        inner.registry.settle(id);

        match outcome {
            Ok(value) => {
                inner.state.finish(None);
                Ok(value)
            }
            Err(RequestError::Cancelled) => Err(RequestError::Cancelled),
            Err(e) => {
                tracing::warn!(request_id = %id.0, error = %e, "request failed");
                inner.state.finish(Some(e.user_message()));
                Err(e)
            }
        }
    }

    #[must_use]
    pub fn state(&self) -> RequestState {
        self.lock().state.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().state.is_loading
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.lock().state.error.clone()
    }

    /// Reset `error` to none. No-op after disposal.
    pub fn clear_error(&self) {
        let mut inner = self.lock();
        if inner.disposed || inner.state.error.is_none() {
            return;
        }
        inner.state.error = None;
        inner.state.revision += 1;
    }

    /// Cancel every in-flight request while keeping the hook usable.
    /// Loading is cleared since nothing remains in flight.
    pub fn cancel_all(&self) -> usize {
        let mut inner = self.lock();
        let cancelled = inner.registry.cancel_all();
        if cancelled > 0 && !inner.disposed {
            inner.state.is_loading = false;
            inner.state.revision += 1;
        }
        if cancelled > 0 {
            tracing::debug!(cancelled, "cancelled in-flight requests");
        }
        cancelled
    }

    #[must_use]
    pub fn active_requests(&self) -> usize {
        self.lock().registry.len()
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.lock().disposed
    }

    fn release(&self) {
        let mut inner = self.lock();
        if inner.disposed {
            return;
        }
        inner.disposed = true;
        let cancelled = inner.registry.cancel_all();
        tracing::debug!(cancelled, "request hook disposed");
    }
}

/// Registration of one `send_request` call. If the future is dropped before
/// it settles, the entry is removed here instead.
struct InFlight<'a> {
    handle: &'a HttpHandle,
    id: RequestId,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = self.handle.lock();
        if !inner.registry.settle(self.id) || inner.disposed {
            return;
        }
        tracing::debug!(request_id = %self.id.0, "request dropped before settling");
        if inner.registry.is_empty() && inner.state.is_loading {
            inner.state.is_loading = false;
            inner.state.revision += 1;
        }
    }
}

// =============================================================================
// HOOK
// =============================================================================

/// Owning request scope. Dropping it cancels all outstanding requests.
pub struct HttpHook {
    handle: HttpHandle,
}

impl HttpHook {
    /// Build a hook with a transport configured from `config` timeouts.
    ///
    /// # Errors
    ///
    /// Returns `ClientBuild` if the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, RequestError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeouts.request())
            .connect_timeout(config.timeouts.connect())
            .build()
            .map_err(|e| RequestError::ClientBuild(e.to_string()))?;
        Ok(Self::with_client(http))
    }

    #[must_use]
    pub fn with_client(http: reqwest::Client) -> Self {
        let inner = Inner { state: RequestState::default(), registry: ActiveRequestRegistry::new(), disposed: false };
        Self { handle: HttpHandle { shared: Arc::new(Shared { http, inner: Mutex::new(inner) }) } }
    }

    /// A cloneable handle for tasks that outlive a borrow of the hook.
    #[must_use]
    pub fn handle(&self) -> HttpHandle {
        self.handle.clone()
    }

    /// Tear down explicitly; equivalent to dropping the hook.
    pub fn dispose(self) {
        drop(self);
    }
}

impl Deref for HttpHook {
    type Target = HttpHandle;

    fn deref(&self) -> &Self::Target {
        &self.handle
    }
}

impl Drop for HttpHook {
    fn drop(&mut self) {
        self.handle.release();
    }
}

// =============================================================================
// TRANSPORT
// =============================================================================

async fn perform<T>(builder: reqwest::RequestBuilder) -> Result<T, RequestError>
where
    T: DeserializeOwned,
{
    let response = builder
        .send()
        .await
        .map_err(|e| RequestError::Network(e.to_string()))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| RequestError::Network(e.to_string()))?;

    if !status.is_success() {
        return Err(RequestError::Server { status: status.as_u16(), message: error::extract_error_message(&text) });
    }

    parse_body(&text)
}

pub(crate) fn parse_body<T>(text: &str) -> Result<T, RequestError>
where
    T: DeserializeOwned,
{
    let text = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(text).map_err(|e| RequestError::Parse(e.to_string()))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
