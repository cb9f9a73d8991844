//! Active-request registry: cancellation tokens for every request a hook
//! instance currently has in flight, in issue order.

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub Uuid);

impl RequestId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
pub struct ActiveRequestRegistry {
    entries: Vec<(RequestId, CancellationToken)>,
}

impl ActiveRequestRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: RequestId, token: CancellationToken) {
        self.entries.push((id, token));
    }

    /// Drop the entry for a settled request. Returns `false` if it was
    /// already gone (cancelled and cleared).
    pub fn settle(&mut self, id: RequestId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Cancel every registered request and empty the registry.
    /// Returns how many requests were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.entries.len();
        for (_, token) in self.entries.drain(..) {
            token.cancel();
        }
        count
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = RequestId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
