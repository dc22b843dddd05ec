//! In-memory session store
//!
//! Process-lifetime registry of session records. Each record sits behind
//! its own mutex so read-modify-write on one visitor never races with
//! another request for the same visitor, while different visitors never
//! contend.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::models::SessionRecord;

type SharedRecord = Arc<Mutex<SessionRecord>>;

/// Session token -> record, plus public view token -> session token.
#[derive(Debug, Default)]
pub struct SessionStore {
    records: DashMap<String, SharedRecord>,
    views: DashMap<String, String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a public view token for `session_token`.
    ///
    /// Returns `false` when the view token is already taken.
    pub fn claim_view_token(&self, view_token: &str, session_token: &str) -> bool {
        match self.views.entry(view_token.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(session_token.to_string());
                true
            }
        }
    }

    /// Insert a freshly created record. Its view token must already be claimed.
    pub fn insert(&self, record: SessionRecord) {
        self.records
            .insert(record.token.clone(), Arc::new(Mutex::new(record)));
    }

    /// Snapshot of the record for `token`.
    pub fn get(&self, token: &str) -> Option<SessionRecord> {
        let shared = self.shared(token)?;
        let record = shared.lock().clone();
        Some(record)
    }

    /// Snapshot of the record behind a public view token.
    pub fn get_by_view_token(&self, view_token: &str) -> Option<SessionRecord> {
        let token = self.views.get(view_token)?.value().clone();
        self.get(&token)
    }

    /// Run `f` on the record under its lock and return a snapshot of the result.
    pub fn update<F>(&self, token: &str, f: F) -> Option<SessionRecord>
    where
        F: FnOnce(&mut SessionRecord),
    {
        let shared = self.shared(token)?;
        let mut record = shared.lock();
        f(&mut record);
        Some(record.clone())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // Clone the Arc out so the shard lock is released before the record lock is taken.
    fn shared(&self, token: &str) -> Option<SharedRecord> {
        self.records.get(token).map(|r| Arc::clone(r.value()))
    }
}
