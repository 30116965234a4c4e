//! Verification-code store with explicit TTL eviction.
//!
//! Replaces the legacy module-level map that grew without bound: the store is
//! owned and injected by its caller (no global state), every entry carries an
//! expiry, and stale entries are dropped both on access and by the sweep.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use rand::Rng;

#[derive(Debug, Clone)]
struct StoredCode {
    code: String,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct VerificationStore {
    ttl: Duration,
    entries: HashMap<String, StoredCode>,
}

impl VerificationStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Issue a fresh 6-digit code for `key`, replacing any previous entry.
    pub fn issue(&mut self, key: &str) -> String {
        let code = format!("{:06}", rand::rng().random_range(0..1_000_000));
        self.store(key, &code);
        code
    }

    pub fn store(&mut self, key: &str, code: &str) {
        self.store_at(key, code, Instant::now());
    }

    pub fn store_at(&mut self, key: &str, code: &str, now: Instant) {
        self.entries.insert(
            key.to_string(),
            StoredCode {
                code: code.to_string(),
                expires_at: now + self.ttl,
            },
        );
    }

    /// Check `code` against the entry for `key`.
    ///
    /// A match consumes the entry so a code can be redeemed once; a mismatch
    /// leaves it in place for another attempt. Expired entries are dropped on
    /// the spot and never match.
    pub fn verify(&mut self, key: &str, code: &str) -> bool {
        self.verify_at(key, code, Instant::now())
    }

    pub fn verify_at(&mut self, key: &str, code: &str, now: Instant) -> bool {
        let (expired, matched) = match self.entries.get(key) {
            None => return false,
            Some(entry) => (entry.expires_at <= now, entry.code == code),
        };

        if expired {
            self.entries.remove(key);
            return false;
        }
        if matched {
            self.entries.remove(key);
            return true;
        }
        false
    }

    /// Drop every expired entry. Callers pick the sweep cadence; `verify`
    /// already cleans the keys it touches.
    pub fn purge_expired(&mut self) {
        self.purge_expired_at(Instant::now());
    }

    pub fn purge_expired_at(&mut self, now: Instant) {
        self.entries.retain(|_, entry| entry.expires_at > now);
    }

    /// Stored entries, including stale ones that no sweep has visited yet.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
