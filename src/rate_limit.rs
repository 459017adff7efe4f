use dashmap::DashMap;
use std::time::{Duration, Instant};

// Storage for per-client request timestamps. Injectable so the in-process
// map can be swapped for a shared backend when running multiple instances.
pub trait RateLimitStore: Send + Sync {
    fn get(&self, key: &str) -> Vec<Instant>;
    fn set(&self, key: &str, hits: Vec<Instant>);
}

// In-process store. Entries live for the lifetime of the process;
// stale keys are never evicted.
#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, Vec<Instant>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RateLimitStore for MemoryStore {
    fn get(&self, key: &str) -> Vec<Instant> {
        self.entries
            .get(key)
            .map(|e| e.value().clone())
            .unwrap_or_default()
    }

    fn set(&self, key: &str, hits: Vec<Instant>) {
        self.entries.insert(key.to_string(), hits);
    }
}

// Sliding-window limiter: the window is anchored to `now`, not to fixed
// buckets, so admission smooths instead of resetting at interval boundaries.
pub struct RateLimiter {
    store: Box<dyn RateLimitStore>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(store: Box<dyn RateLimitStore>, max_requests: u32, window: Duration) -> Self {
        Self {
            store,
            max_requests,
            window,
        }
    }

    pub fn in_memory(max_requests: u32, window: Duration) -> Self {
        Self::new(Box::new(MemoryStore::new()), max_requests, window)
    }

    // Returns true if the client is over its limit. Admitted calls record a
    // hit; rejected calls do not consume a slot.
    pub fn is_limited(&self, key: &str) -> bool {
        self.is_limited_at(key, Instant::now())
    }

    fn is_limited_at(&self, key: &str, now: Instant) -> bool {
        let mut hits = self.store.get(key);
        hits.retain(|&t| now.duration_since(t) < self.window);

        if hits.len() >= self.max_requests as usize {
            return true;
        }

        hits.push(now);
        self.store.set(key, hits);
        false
    }
}
