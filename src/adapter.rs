use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;

use tracing::{debug, warn};

use crate::api::{CatalogClient, DetailTarget, RawListEntry};
use crate::domain::{PokemonId, Summary};
use crate::error::CatalogError;
use crate::normalize::normalize;

pub const DEFAULT_LIMIT: u32 = 151;
pub const DEFAULT_FANOUT: usize = 16;

pub struct Adapter<C: CatalogClient> {
    client: C,
    fanout: usize,
}

impl<C: CatalogClient> Adapter<C> {
    pub fn new(client: C) -> Self {
        Self::with_fanout(client, DEFAULT_FANOUT)
    }

    pub fn with_fanout(client: C, fanout: usize) -> Self {
        Self {
            client,
            fanout: fanout.max(1),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn fanout(&self) -> usize {
        self.fanout
    }

    // Only the listing call can fail the whole load; entries whose detail
    // fetch fails are left out.
    pub fn fetch_collection(&self, limit: u32) -> Result<Vec<Summary>, CatalogError> {
        let listing = self.client.list(limit, 0)?;
        let entries: Vec<RawListEntry> = listing.results.into_iter().take(limit as usize).collect();
        debug!(requested = limit, listed = entries.len(), "resolving catalog entries");

        let mut items = self.resolve_all(&entries);
        items.sort_by_key(|item| item.id);
        items.dedup_by_key(|item| item.id);
        Ok(items)
    }

    fn resolve_all(&self, entries: &[RawListEntry]) -> Vec<Summary> {
        let next = AtomicUsize::new(0);
        let resolved = Mutex::new(Vec::with_capacity(entries.len()));
        let workers = self.fanout.min(entries.len());

        let drain = || {
            while let Some(entry) = entries.get(next.fetch_add(1, Ordering::SeqCst)) {
                match panic::catch_unwind(AssertUnwindSafe(|| self.resolve_entry(entry))) {
                    Ok(Some(summary)) => resolved
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .push(summary),
                    Ok(None) => {}
                    Err(_) => warn!(name = %entry.name, "detail lookup panicked; entry dropped"),
                }
            }
        };

        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(workers);
            for worker in 0..workers {
                match thread::Builder::new()
                    .name(format!("catalog-detail-{worker}"))
                    .spawn_scoped(scope, drain)
                {
                    Ok(handle) => handles.push(handle),
                    Err(err) => {
                        warn!(worker, error = %err, "unable to spawn detail worker");
                        break;
                    }
                }
            }

            if handles.is_empty() && workers > 0 {
                warn!("no detail workers available; resolving on the calling thread");
                drain();
            }

            for handle in handles {
                if handle.join().is_err() {
                    warn!("detail worker exited abnormally");
                }
            }
        });

        resolved.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn fetch_one(&self, id: PokemonId) -> Result<Summary, CatalogError> {
        let detail = self
            .client
            .detail(&DetailTarget::Id(id))
            .map_err(|err| match err {
                CatalogError::Status { status: 404, .. } => CatalogError::NotFound(id.get()),
                other => other,
            })?;
        normalize(detail)
    }

    fn resolve_entry(&self, entry: &RawListEntry) -> Option<Summary> {
        let result = self
            .client
            .detail(&DetailTarget::Url(entry.url.clone()))
            .and_then(normalize);
        match result {
            Ok(summary) => Some(summary),
            Err(err) => {
                warn!(name = %entry.name, url = %entry.url, error = %err, "skipping entry");
                None
            }
        }
    }
}
