use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::adapter::{Adapter, DEFAULT_LIMIT};
use crate::api::CatalogClient;
use crate::domain::{PokemonId, Summary};
use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Loaded(usize),
    Failed,
    /// The session was torn down or re-initialized while the load was in flight.
    Discarded,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Neighbors {
    pub previous: Option<Summary>,
    pub next: Option<Summary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectionSnapshot {
    pub items: Vec<Summary>,
    pub loading: bool,
    pub error: Option<String>,
    pub loaded_at: Option<String>,
}

#[derive(Debug, Default)]
struct StoreState {
    items: Vec<Summary>,
    loading: bool,
    error: Option<StoreError>,
    loaded_at: Option<DateTime<Utc>>,
}

impl StoreState {
    fn position(&self, id: PokemonId) -> Option<usize> {
        self.items.binary_search_by_key(&id, |item| item.id).ok()
    }

    // skips ids already held; keeps ascending id order
    fn merge(&mut self, incoming: impl IntoIterator<Item = Summary>) -> usize {
        let mut added = 0;
        for summary in incoming {
            if let Err(slot) = self.items.binary_search_by_key(&summary.id, |item| item.id) {
                self.items.insert(slot, summary);
                added += 1;
            }
        }
        added
    }
}

pub struct CollectionStore<C: CatalogClient> {
    adapter: Adapter<C>,
    limit: u32,
    generation: AtomicU64,
    state: Mutex<StoreState>,
}

impl<C: CatalogClient> CollectionStore<C> {
    pub fn new(adapter: Adapter<C>) -> Self {
        Self::with_limit(adapter, DEFAULT_LIMIT)
    }

    pub fn with_limit(adapter: Adapter<C>, limit: u32) -> Self {
        Self {
            adapter,
            limit,
            generation: AtomicU64::new(0),
            state: Mutex::new(StoreState::default()),
        }
    }

    pub fn adapter(&self) -> &Adapter<C> {
        &self.adapter
    }

    pub fn initialize(&self) -> InitOutcome {
        let generation = {
            let mut state = self.lock();
            state.loading = true;
            state.error = None;
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        let result = self.adapter.fetch_collection(self.limit);

        let mut state = self.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            info!(generation, "discarding stale collection load");
            return InitOutcome::Discarded;
        }
        state.loading = false;
        match result {
            Ok(items) => {
                let count = items.len();
                // keep entries merged by load_by_id while the bulk load was running
                let previous = std::mem::replace(&mut state.items, items);
                state.merge(previous);
                state.loaded_at = Some(Utc::now());
                debug!(count, "collection loaded");
                InitOutcome::Loaded(count)
            }
            Err(err) => {
                warn!(error = %err, "collection load failed");
                state.error = Some(StoreError::CollectionLoadFailed);
                InitOutcome::Failed
            }
        }
    }

    pub fn teardown(&self) {
        let _state = self.lock();
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn get_by_id(&self, id: PokemonId) -> Option<Summary> {
        let state = self.lock();
        state.position(id).map(|index| state.items[index].clone())
    }

    pub fn index_of(&self, id: PokemonId) -> Option<usize> {
        self.lock().position(id)
    }

    pub fn neighbors(&self, id: PokemonId) -> Neighbors {
        let state = self.lock();
        let Some(index) = state.position(id) else {
            return Neighbors::default();
        };
        Neighbors {
            previous: index
                .checked_sub(1)
                .and_then(|prev| state.items.get(prev))
                .cloned(),
            next: state.items.get(index + 1).cloned(),
        }
    }

    pub fn load_by_id(&self, id: PokemonId) -> Option<Summary> {
        if let Some(existing) = self.get_by_id(id) {
            debug!(%id, "cache hit");
            return Some(existing);
        }

        match self.adapter.fetch_one(id) {
            Ok(fetched) => {
                let mut state = self.lock();
                if state.merge([fetched.clone()]) == 0 {
                    debug!(%id, "entry already merged by a concurrent load");
                }
                Some(fetched)
            }
            Err(err) => {
                warn!(%id, error = %err, "detail load failed");
                self.lock().error = Some(StoreError::DetailLoadFailed);
                None
            }
        }
    }

    pub fn items(&self) -> Vec<Summary> {
        self.lock().items.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    pub fn error(&self) -> Option<StoreError> {
        self.lock().error
    }

    pub fn snapshot(&self) -> CollectionSnapshot {
        let state = self.lock();
        CollectionSnapshot {
            items: state.items.clone(),
            loading: state.loading,
            error: state.error.map(|err| err.to_string()),
            loaded_at: state.loaded_at.map(|at| at.to_rfc3339()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
