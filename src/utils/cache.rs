//! In-Memory Report Cache
//!
//! DashMap-backed TTL cache for wallet reports, shared by the API handlers.
//! Keys combine the exact address with a fingerprint of the evidence, so
//! the same address scanned with different evidence never collides.
//! Addresses are not lower-cased: suspicious patterns may be case-sensitive.

use dashmap::DashMap;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::models::types::{FraudReport, GeoEvidence, TransactionEvidence};
use crate::utils::constants::DEFAULT_CACHE_TTL_SECS;

/// Cached report with its insertion time
#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub report: FraudReport,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl CacheEntry {
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }

    /// Seconds left before expiry
    pub fn remaining_ttl(&self) -> u64 {
        self.ttl.saturating_sub(self.created_at.elapsed()).as_secs()
    }
}

/// Thread-safe report cache; clones share the same store
#[derive(Clone)]
pub struct ReportCache {
    store: Arc<DashMap<String, CacheEntry>>,
    ttl: Duration,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl Default for ReportCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_CACHE_TTL_SECS))
    }
}

impl ReportCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            store: Arc::new(DashMap::new()),
            ttl,
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Cache key for an address and its evidence
    pub fn key(
        address: &str,
        transaction: Option<&TransactionEvidence>,
        geo: Option<&GeoEvidence>,
    ) -> String {
        format!("{}|{}|{}", address, fingerprint(transaction), fingerprint(geo))
    }

    /// Lookup with TTL validation; expired entries are evicted on read
    pub fn get(&self, key: &str) -> Option<FraudReport> {
        let Some(entry) = self.store.get(key) else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!("📭 CACHE MISS: {}", key);
            return None;
        };

        if entry.is_expired() {
            drop(entry); // Release read lock before removing
            self.store.remove(key);
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!("📭 CACHE MISS (expired): {}", key);
            return None;
        }

        self.hits.fetch_add(1, Ordering::Relaxed);
        debug!("✅ CACHE HIT: {} (TTL: {}s remaining)", key, entry.remaining_ttl());
        Some(entry.report.clone())
    }

    pub fn set(&self, key: String, report: FraudReport) {
        debug!("💾 CACHE SET: {} (TTL: {}s)", key, self.ttl.as_secs());
        self.store.insert(
            key,
            CacheEntry {
                report,
                created_at: Instant::now(),
                ttl: self.ttl,
            },
        );
    }

    /// Drop every expired entry, returning how many were removed
    pub fn cleanup_expired(&self) -> usize {
        let before = self.store.len();
        self.store.retain(|_, entry| !entry.is_expired());
        let removed = before.saturating_sub(self.store.len());
        if removed > 0 {
            debug!("🧹 CACHE CLEANUP: {} expired entries removed", removed);
        }
        removed
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            entries: self.store.len(),
            hits,
            misses,
            hit_rate,
            ttl_secs: self.ttl.as_secs(),
        }
    }
}

/// Cache statistics for /stats
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub ttl_secs: u64,
}

fn fingerprint<T: Serialize>(evidence: Option<&T>) -> String {
    evidence
        .and_then(|e| serde_json::to_string(e).ok())
        .unwrap_or_else(|| "-".to_string())
}
