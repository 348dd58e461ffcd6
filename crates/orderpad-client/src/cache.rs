//! # Cached Lists
//!
//! `CachedList<T>` keeps a server list in memory and decides when to fetch
//! it again. Screens read a [`ListSnapshot`]; the list itself is driven by
//! [`CachedList::load`] and [`CachedList::refresh`].
//!
//! ## Load Decision
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           load(force)                                   │
//! │                                                                         │
//! │   force == false                                                        │
//! │   && items not empty          ──── yes ───►  CacheHit (no fetch)        │
//! │   && now - last_loaded_at < window                                      │
//! │            │                                                            │
//! │            no                                                           │
//! │            ▼                                                            │
//! │   is_loading = true, last_error = None, generation += 1                 │
//! │   started = now                                                         │
//! │            │                                                            │
//! │            ▼                                                            │
//! │   source.fetch_list().await                                             │
//! │            │                                                            │
//! │            ├── a newer load started meanwhile ──► Superseded (dropped)  │
//! │            │                                                            │
//! │            ├── Ok(items) ──► items replaced, last_loaded_at = started   │
//! │            │                                                            │
//! │            └── Err(e)    ──► items kept, last_error = message           │
//! │                              notify the user only if force == true      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! State sits behind a `parking_lot::RwLock` that is never held across the
//! fetch. Each network load takes the next generation number before it
//! starts; on completion it commits only if no later load has started, so a
//! slow early request can never overwrite a fresher result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use orderpad_core::Area;
use parking_lot::{RwLock, RwLockWriteGuard};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::CacheSettings;
use crate::error::ClientResult;
use crate::notify::Notifier;

// =============================================================================
// Collaborators
// =============================================================================

/// Anything that can fetch a whole list from the backend.
#[async_trait]
pub trait ListSource<T>: Send + Sync {
    async fn fetch_list(&self) -> ClientResult<Vec<T>>;
}

/// Tuning for one cached list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheOptions {
    /// Loads within this window of the last success are skipped.
    pub freshness_window: Duration,
    /// Title passed to the notifier when a forced load fails.
    pub error_title: String,
    /// Used when a failure carries no message.
    pub default_error_message: String,
}

impl Default for CacheOptions {
    fn default() -> Self {
        CacheOptions::from(&CacheSettings::default())
    }
}

impl From<&CacheSettings> for CacheOptions {
    fn from(settings: &CacheSettings) -> Self {
        CacheOptions {
            freshness_window: settings.freshness_window(),
            error_title: settings.error_title.clone(),
            default_error_message: settings.default_error_message.clone(),
        }
    }
}

// =============================================================================
// State
// =============================================================================

/// Consistent copy of a list's state for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSnapshot<T> {
    /// Items in server order.
    pub items: Vec<T>,
    /// Unix milliseconds when the current items were requested; 0 before
    /// the first successful load.
    pub last_loaded_at: i64,
    pub is_loading: bool,
    pub last_error: Option<String>,
}

/// What a call to [`CachedList::load`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Items were fresh; nothing was fetched.
    CacheHit,
    /// The fetch succeeded and its items were committed.
    Loaded { count: usize },
    /// The fetch failed; previous items were kept.
    Failed { message: String },
    /// A later load started before this one finished; its result was dropped.
    Superseded,
}

// =============================================================================
// Cached List
// =============================================================================

pub struct CachedList<T> {
    source: Arc<dyn ListSource<T>>,
    notifier: Arc<dyn Notifier>,
    options: CacheOptions,
    state: RwLock<ListSnapshot<T>>,
    generation: AtomicU64,
}

/// Dining areas shown on the order-type screen.
pub type AreasData = CachedList<Area>;

impl<T> CachedList<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates an empty list in the loading state.
    ///
    /// Nothing is fetched until [`load`](Self::load) is called;
    /// [`spawn`](Self::spawn) does both.
    pub fn new(
        source: Arc<dyn ListSource<T>>,
        notifier: Arc<dyn Notifier>,
        options: CacheOptions,
    ) -> Self {
        CachedList {
            source,
            notifier,
            options,
            state: RwLock::new(ListSnapshot {
                items: Vec::new(),
                last_loaded_at: 0,
                is_loading: true,
                last_error: None,
            }),
            generation: AtomicU64::new(0),
        }
    }

    /// Creates the list and starts its initial (non-forced) load on the
    /// runtime. Must be called from within a tokio runtime.
    pub fn spawn(
        source: Arc<dyn ListSource<T>>,
        notifier: Arc<dyn Notifier>,
        options: CacheOptions,
    ) -> (Arc<Self>, JoinHandle<LoadOutcome>) {
        let list = Arc::new(Self::new(source, notifier, options));
        let task = {
            let list = Arc::clone(&list);
            tokio::spawn(async move { list.load(false).await })
        };
        (list, task)
    }

    /// Loads the list unless it is still fresh (or `force` is set).
    pub async fn load(&self, force: bool) -> LoadOutcome {
        let started = Utc::now().timestamp_millis();

        let generation = {
            let mut state = self.write_state();
            if !force && self.is_fresh(&state, started) {
                debug!(count = state.items.len(), "Serving list from cache");
                return LoadOutcome::CacheHit;
            }
            state.is_loading = true;
            state.last_error = None;
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        debug!(generation, force, "Fetching list");
        let result = self.source.fetch_list().await;

        let mut state = self.write_state();
        let latest = self.generation.load(Ordering::SeqCst);
        if latest != generation {
            debug!(generation, latest, "Discarding superseded list load");
            return LoadOutcome::Superseded;
        }

        state.is_loading = false;
        match result {
            Ok(items) => {
                let count = items.len();
                state.items = items;
                state.last_loaded_at = started;
                info!(count, "List loaded");
                LoadOutcome::Loaded { count }
            }
            Err(e) => {
                let message = e
                    .message()
                    .unwrap_or_else(|| self.options.default_error_message.clone());
                state.last_error = Some(message.clone());
                drop(state);

                warn!(error = %e, force, "List load failed");
                if force {
                    self.notifier
                        .notify_error(&self.options.error_title, &message);
                }
                LoadOutcome::Failed { message }
            }
        }
    }

    /// Forced load, as from a pull-to-refresh.
    pub async fn refresh(&self) -> LoadOutcome {
        self.load(true).await
    }

    pub fn snapshot(&self) -> ListSnapshot<T> {
        self.state.read().clone()
    }

    pub fn items(&self) -> Vec<T> {
        self.state.read().items.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.read().last_error.clone()
    }

    pub fn last_loaded_at(&self) -> i64 {
        self.state.read().last_loaded_at
    }

    pub fn options(&self) -> &CacheOptions {
        &self.options
    }

    fn is_fresh(&self, state: &ListSnapshot<T>, now: i64) -> bool {
        let window = i64::try_from(self.options.freshness_window.as_millis()).unwrap_or(i64::MAX);
        !state.items.is_empty() && now.saturating_sub(state.last_loaded_at) < window
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, ListSnapshot<T>> {
        self.state.write()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
