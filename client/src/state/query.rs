//! Query cache bookkeeping for server collections.
//!
//! DESIGN
//! ======
//! Entries track freshness and failures only; the fetched data itself lives
//! in the page state structs. Time is passed in as milliseconds so every rule
//! here is deterministic under test.
//!
//! Defaults: data is stale immediately, idle entries are collected after five
//! minutes, failed fetches retry three times with exponential back-off capped
//! at thirty seconds.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use std::collections::HashMap;

/// Cached server collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Tasks,
    Sprints,
    Users,
    CurrentSprint,
}

/// Cache policy shared by every key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryOptions {
    pub stale_time_ms: u64,
    pub gc_time_ms: u64,
    pub retry: u32,
    pub retry_delay_max_ms: u64,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self { stale_time_ms: 0, gc_time_ms: 300_000, retry: 3, retry_delay_max_ms: 30_000 }
    }
}

/// What to do after a failed fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryDecision {
    Retry { delay_ms: u64 },
    GiveUp,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct QueryEntry {
    updated_at_ms: Option<u64>,
    last_used_ms: u64,
    invalidated: bool,
    fetching: bool,
    failure_count: u32,
    /// Bumped by every `invalidate`.
    generation: u64,
    /// `generation` when the in-flight fetch started.
    fetch_generation: u64,
}

/// Per-key freshness and retry tracking.
#[derive(Clone, Debug, Default)]
pub struct QueryClient {
    options: QueryOptions,
    entries: HashMap<QueryKey, QueryEntry>,
}

impl QueryClient {
    pub fn new(options: QueryOptions) -> Self {
        Self { options, entries: HashMap::new() }
    }

    pub fn options(&self) -> QueryOptions {
        self.options
    }

    /// True when `key` has no fetch in flight and its data is missing,
    /// invalidated, or older than the stale time.
    pub fn should_fetch(&self, key: QueryKey, now_ms: u64) -> bool {
        let Some(entry) = self.entries.get(&key) else {
            return true;
        };
        if entry.fetching {
            return false;
        }
        if entry.invalidated {
            return true;
        }
        match entry.updated_at_ms {
            None => true,
            Some(updated) => now_ms.saturating_sub(updated) >= self.options.stale_time_ms,
        }
    }

    pub fn begin_fetch(&mut self, key: QueryKey, now_ms: u64) {
        let entry = self.entries.entry(key).or_default();
        entry.fetching = true;
        entry.fetch_generation = entry.generation;
        entry.last_used_ms = now_ms;
    }

    /// Store a completed fetch. An invalidation that arrived while the fetch
    /// was in flight survives, so the older response is not treated as fresh.
    pub fn record_success(&mut self, key: QueryKey, now_ms: u64) {
        let entry = self.entries.entry(key).or_default();
        entry.updated_at_ms = Some(now_ms);
        entry.last_used_ms = now_ms;
        entry.invalidated = entry.generation != entry.fetch_generation;
        entry.fetching = false;
        entry.failure_count = 0;
    }

    /// Count a failure. The fetch stays in flight while retries remain;
    /// giving up ends it and resets the count for the next attempt.
    pub fn record_failure(&mut self, key: QueryKey) -> RetryDecision {
        let retry = self.options.retry;
        let entry = self.entries.entry(key).or_default();
        entry.failure_count += 1;
        if entry.failure_count <= retry {
            let attempt = entry.failure_count - 1;
            return RetryDecision::Retry { delay_ms: self.retry_delay_ms(attempt) };
        }
        entry.fetching = false;
        entry.failure_count = 0;
        RetryDecision::GiveUp
    }

    /// `min(1000 * 2^attempt, retry_delay_max_ms)`, with `attempt` counted from zero.
    pub fn retry_delay_ms(&self, attempt: u32) -> u64 {
        1000_u64
            .checked_shl(attempt)
            .filter(|delay| delay >> attempt == 1000)
            .unwrap_or(u64::MAX)
            .min(self.options.retry_delay_max_ms)
    }

    pub fn invalidate(&mut self, key: QueryKey) {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.invalidated = true;
            entry.generation += 1;
        }
    }

    pub fn is_invalidated(&self, key: QueryKey) -> bool {
        self.entries.get(&key).is_some_and(|entry| entry.invalidated)
    }

    pub fn failure_count(&self, key: QueryKey) -> u32 {
        self.entries.get(&key).map_or(0, |entry| entry.failure_count)
    }

    pub fn is_fetching(&self, key: QueryKey) -> bool {
        self.entries.get(&key).is_some_and(|entry| entry.fetching)
    }

    /// Drop idle entries not used within the gc window. Returns how many went.
    pub fn collect_garbage(&mut self, now_ms: u64) -> usize {
        let gc = self.options.gc_time_ms;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.fetching || now_ms.saturating_sub(entry.last_used_ms) < gc);
        before - self.entries.len()
    }

    pub fn contains(&self, key: QueryKey) -> bool {
        self.entries.contains_key(&key)
    }
}

/// Run `fetch` for `key`, retrying on failure per the client's policy.
///
/// The caller checks `should_fetch` and calls `begin_fetch` first.
#[cfg(feature = "hydrate")]
pub async fn run_query<T, F, Fut>(
    client: leptos::prelude::RwSignal<QueryClient>,
    key: QueryKey,
    fetch: F,
) -> Result<T, String>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T, String>>,
{
    use leptos::prelude::*;

    loop {
        match fetch().await {
            Ok(value) => {
                let now = crate::util::clock::now_ms();
                let superseded = client
                    .try_update(|q| {
                        q.record_success(key, now);
                        if !q.is_invalidated(key) {
                            return false;
                        }
                        q.begin_fetch(key, now);
                        true
                    })
                    .unwrap_or(false);
                if superseded {
                    log::debug!("query {key:?} invalidated mid-flight, refetching");
                    continue;
                }
                return Ok(value);
            }
            Err(e) => {
                let decision = client.try_update(|q| q.record_failure(key)).unwrap_or(RetryDecision::GiveUp);
                match decision {
                    RetryDecision::Retry { delay_ms } => {
                        log::warn!("query {key:?} failed, retrying in {delay_ms}ms: {e}");
                        gloo_timers::future::sleep(std::time::Duration::from_millis(delay_ms)).await;
                    }
                    RetryDecision::GiveUp => {
                        log::error!("query {key:?} failed: {e}");
                        return Err(e);
                    }
                }
            }
        }
    }
}
